//! Error types for license signing and verification.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading, framing, signing or verifying a license.
///
/// A signature that is present but does not authenticate is not an error;
/// see [`crate::Verification`].
#[derive(Debug, Error)]
pub enum LicenseError {
    /// A file could not be opened, read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// The artifact is structurally malformed.
    #[error("malformed license artifact: {0}")]
    Format(String),

    /// Embedded Base64 text could not be decoded.
    #[error("invalid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// A key could not be parsed or the signature primitive failed.
    #[error("crypto error: {0}")]
    Crypto(String),
}

impl LicenseError {
    /// Wraps an I/O error with the path it occurred on.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;

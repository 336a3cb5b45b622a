//! Authenticating signed license artifacts.

use std::path::Path;

use tracing::debug;

use crate::error::LicenseResult;
use crate::framer::{Framing, parse_artifact, signable_bytes};
use crate::lines::read_lines;
use crate::scheme::SignatureScheme;

/// Outcome of checking a well-formed artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// The signature matches; carries the embedded license lines.
    Valid(Vec<String>),
    /// The signature does not match the license or the key.
    Invalid,
}

impl Verification {
    /// Returns true if the signature matched.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Returns the license lines of a valid artifact.
    #[must_use]
    pub fn into_license(self) -> Option<Vec<String>> {
        match self {
            Self::Valid(lines) => Some(lines),
            Self::Invalid => None,
        }
    }
}

/// Checks an artifact and recovers its license lines.
///
/// The signed bytes are rebuilt from the embedded license alone.
///
/// # Errors
///
/// Returns [`crate::LicenseError::Format`] or
/// [`crate::LicenseError::InvalidBase64`] when no signature can be recovered.
pub fn verify<S, L>(
    scheme: &S,
    artifact: &[L],
    key: &S::PublicKey,
    framing: Framing,
) -> LicenseResult<Verification>
where
    S: SignatureScheme,
    L: AsRef<str>,
{
    let parsed = parse_artifact(artifact, framing)?;
    let message = signable_bytes(&parsed.license);
    let valid = scheme.verify(&message, &parsed.signature, key)?;
    debug!(valid, signed_bytes = message.len(), "verified license");
    Ok(if valid {
        Verification::Valid(parsed.license)
    } else {
        Verification::Invalid
    })
}

/// Loads the key in `public_key` and checks the artifact in `input`.
///
/// # Errors
///
/// Returns [`crate::LicenseError::Io`] for unreadable files,
/// [`crate::LicenseError::Crypto`] for a bad key, and format errors as
/// [`verify`] does.
pub fn verify_license_file<S: SignatureScheme>(
    scheme: &S,
    public_key: &Path,
    input: &Path,
    framing: Framing,
) -> LicenseResult<Verification> {
    let key = scheme.load_public_key(public_key)?;
    let artifact = read_lines(input)?;
    verify(scheme, &artifact, &key, framing)
}

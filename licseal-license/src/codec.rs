//! Base64 text encoding and fixed-width wrapping for binary blobs.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

use crate::error::LicenseResult;

/// Width of every wrapped Base64 line except the last.
///
/// Part of the wire format: files signed by other encoders use exactly this
/// width, so it must not change.
pub const LINE_WIDTH: usize = 20;

/// Encodes bytes as padded standard Base64, without line breaks.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Decodes padded standard Base64.
///
/// # Errors
///
/// Returns [`crate::LicenseError::InvalidBase64`] on characters outside the
/// alphabet or bad padding/length.
pub fn decode(text: &str) -> LicenseResult<Vec<u8>> {
    Ok(BASE64.decode(text)?)
}

/// Splits `text` into chunks of `width` characters. The last chunk may be
/// shorter; empty input yields no chunks.
///
/// # Panics
///
/// Panics if `width` is zero.
#[must_use]
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    assert!(width > 0, "wrap width must be non-zero");
    let chars: Vec<char> = text.chars().collect();
    chars.chunks(width).map(|c| c.iter().collect()).collect()
}

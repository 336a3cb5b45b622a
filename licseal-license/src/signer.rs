//! Producing signed license artifacts.

use std::path::Path;

use tracing::debug;

use crate::error::LicenseResult;
use crate::framer::{render_artifact, render_text, signable_bytes};
use crate::lines::{read_lines, write_text};
use crate::scheme::SignatureScheme;

/// Signs license lines and returns the artifact lines.
///
/// # Errors
///
/// Returns [`crate::LicenseError::Crypto`] if the signature primitive fails.
pub fn sign<S, L>(scheme: &S, license: &[L], key: &S::PrivateKey) -> LicenseResult<Vec<String>>
where
    S: SignatureScheme,
    L: AsRef<str>,
{
    let message = signable_bytes(license);
    let signature = scheme.sign(&message, key)?;
    debug!(
        license_lines = license.len(),
        signed_bytes = message.len(),
        signature_len = signature.len(),
        "signed license"
    );
    Ok(render_artifact(license, &signature))
}

/// Reads a license file, signs it with the key in `private_key`, and writes
/// the artifact to `output`.
///
/// # Errors
///
/// Returns [`crate::LicenseError::Io`] for unreadable inputs or an unwritable
/// output and [`crate::LicenseError::Crypto`] for a bad key.
pub fn sign_license_file<S: SignatureScheme>(
    scheme: &S,
    input: &Path,
    private_key: &Path,
    output: &Path,
) -> LicenseResult<()> {
    let license = read_lines(input)?;
    let key = scheme.load_private_key(private_key)?;
    let artifact = sign(scheme, &license, &key)?;
    write_text(output, &render_text(&artifact))
}

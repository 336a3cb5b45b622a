//! Key files: raw Base64 DER without PEM armour, wrapped at 20 characters.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use ed25519_dalek::SigningKey;
use ed25519_dalek::pkcs8::{EncodePrivateKey, EncodePublicKey};
use rand::rngs::OsRng;
use tracing::debug;

use crate::codec::{self, LINE_WIDTH};
use crate::error::{LicenseError, LicenseResult};
use crate::lines::{LINE_SEPARATOR, read_lines};

/// Reads a key file and returns the decoded DER bytes.
///
/// All lines are joined without separators before decoding.
///
/// # Errors
///
/// Returns [`LicenseError::Io`] if the file cannot be read and
/// [`LicenseError::Crypto`] if the content is not Base64.
pub fn read_key_der(path: &Path) -> LicenseResult<Vec<u8>> {
    let text = read_lines(path)?.concat();
    codec::decode(&text)
        .map_err(|e| LicenseError::Crypto(format!("cannot decode key {}: {e}", path.display())))
}

/// Renders DER key bytes as wrapped Base64 text. The last line has no
/// separator after it.
#[must_use]
pub fn render_key(der: &[u8]) -> String {
    codec::wrap_lines(&codec::encode(der), LINE_WIDTH).join(LINE_SEPARATOR)
}

/// Writes DER key bytes to `path` as wrapped Base64 text.
///
/// Refuses to replace an existing file unless `overwrite` is set. On Unix the
/// file ends up with `mode`, whether it is new or replaced.
///
/// # Errors
///
/// Returns [`LicenseError::Io`] if the file exists (without `overwrite`) or
/// cannot be written.
pub fn write_key(path: &Path, der: &[u8], overwrite: bool, mode: u32) -> LicenseResult<()> {
    let mut options = OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let mut file = options.open(path).map_err(|e| LicenseError::io(path, e))?;
    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(Permissions::from_mode(mode))
            .map_err(|e| LicenseError::io(path, e))?;
    }
    file.write_all(render_key(der).as_bytes())
        .map_err(|e| LicenseError::io(path, e))?;
    debug!(path = %path.display(), "wrote key");
    Ok(())
}

/// Generates an Ed25519 key pair and writes the PKCS#8 private key and SPKI
/// public key files.
///
/// # Errors
///
/// Returns [`LicenseError::Crypto`] if encoding fails and
/// [`LicenseError::Io`] if either file cannot be written. Without
/// `overwrite`, an existing file at either path is refused before anything is
/// written.
pub fn generate_keypair(
    private_path: &Path,
    public_path: &Path,
    overwrite: bool,
) -> LicenseResult<()> {
    if !overwrite {
        for path in [private_path, public_path] {
            if path.exists() {
                return Err(LicenseError::io(
                    path,
                    io::Error::new(io::ErrorKind::AlreadyExists, "key file already exists"),
                ));
            }
        }
    }

    let signing = SigningKey::generate(&mut OsRng);
    let private_der = signing
        .to_pkcs8_der()
        .map_err(|e| LicenseError::Crypto(format!("cannot encode private key: {e}")))?;
    let public_der = signing
        .verifying_key()
        .to_public_key_der()
        .map_err(|e| LicenseError::Crypto(format!("cannot encode public key: {e}")))?;

    write_key(private_path, private_der.as_bytes(), overwrite, 0o600)?;
    if let Err(e) = write_key(public_path, public_der.as_bytes(), overwrite, 0o644) {
        let _ = fs::remove_file(private_path);
        return Err(e);
    }
    Ok(())
}

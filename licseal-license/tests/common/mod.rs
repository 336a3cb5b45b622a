//! Shared test helpers for license tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use ed25519_dalek::SigningKey;
use ed25519_dalek::pkcs8::{EncodePrivateKey, EncodePublicKey};
use licseal_license::{LicenseError, LicenseResult, SignatureScheme, read_key_der, write_key};
use sha2::{Digest, Sha256};

/// Deterministic stand-in for a real signature primitive: the "signature" is
/// SHA-256 over key || message, and both keys are the same 32 bytes.
#[derive(Debug, Default)]
pub struct MockScheme;

impl SignatureScheme for MockScheme {
    type PrivateKey = [u8; 32];
    type PublicKey = [u8; 32];

    fn sign(&self, message: &[u8], key: &[u8; 32]) -> LicenseResult<Vec<u8>> {
        Ok(mock_digest(key, message))
    }

    fn verify(&self, message: &[u8], signature: &[u8], key: &[u8; 32]) -> LicenseResult<bool> {
        Ok(mock_digest(key, message) == signature)
    }

    fn load_private_key(&self, path: &Path) -> LicenseResult<[u8; 32]> {
        load_mock_key(path)
    }

    fn load_public_key(&self, path: &Path) -> LicenseResult<[u8; 32]> {
        load_mock_key(path)
    }
}

fn mock_digest(key: &[u8], message: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(key);
    hasher.update(message);
    hasher.finalize().to_vec()
}

fn load_mock_key(path: &Path) -> LicenseResult<[u8; 32]> {
    read_key_der(path)?
        .try_into()
        .map_err(|_| LicenseError::Crypto("mock key must be 32 bytes".to_string()))
}

/// Returns a deterministic Ed25519 key from a seed byte.
pub fn test_signing_key(seed: u8) -> SigningKey {
    SigningKey::from_bytes(&[seed; 32])
}

/// Writes the PKCS#8 and SPKI key files for `key` into `dir`.
pub fn write_ed25519_keys(dir: &Path, name: &str, key: &SigningKey) -> (PathBuf, PathBuf) {
    let private_path = dir.join(format!("{name}.private"));
    let public_path = dir.join(format!("{name}.public"));
    let private_der = key.to_pkcs8_der().unwrap();
    let public_der = key.verifying_key().to_public_key_der().unwrap();
    write_key(&private_path, private_der.as_bytes(), false, 0o600).unwrap();
    write_key(&public_path, public_der.as_bytes(), false, 0o644).unwrap();
    (private_path, public_path)
}

/// Converts string slices to owned lines.
pub fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

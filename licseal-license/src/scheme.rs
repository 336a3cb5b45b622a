//! The signature primitive behind signing and verification.
//!
//! The core only needs to sign bytes, check a signature and load keys from
//! files, so those four capabilities are a trait. [`Ed25519`] is the
//! production implementation.

use std::path::Path;

use ed25519_dalek::{
    Signature as DalekSignature, Signer as _, SigningKey as DalekSigningKey, Verifier as _,
    VerifyingKey as DalekVerifyingKey,
    pkcs8::{DecodePrivateKey, DecodePublicKey},
};

use crate::error::{LicenseError, LicenseResult};
use crate::keys::read_key_der;

/// An asymmetric signature scheme.
pub trait SignatureScheme {
    /// Key used to produce signatures.
    type PrivateKey;
    /// Key used to check signatures.
    type PublicKey;

    /// Signs `message`, returning the raw signature bytes.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Crypto`] if the primitive fails.
    fn sign(&self, message: &[u8], key: &Self::PrivateKey) -> LicenseResult<Vec<u8>>;

    /// Checks `signature` over `message`.
    ///
    /// A mismatch, including a signature of the wrong shape, is `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Crypto`] only if the primitive cannot run.
    fn verify(
        &self,
        message: &[u8],
        signature: &[u8],
        key: &Self::PublicKey,
    ) -> LicenseResult<bool>;

    /// Loads a private key file.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Io`] if the file cannot be read and
    /// [`LicenseError::Crypto`] if it does not hold a key.
    fn load_private_key(&self, path: &Path) -> LicenseResult<Self::PrivateKey>;

    /// Loads a public key file.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Io`] if the file cannot be read and
    /// [`LicenseError::Crypto`] if it does not hold a key.
    fn load_public_key(&self, path: &Path) -> LicenseResult<Self::PublicKey>;
}

/// Ed25519 signatures with PKCS#8 private keys and SPKI public keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519;

impl SignatureScheme for Ed25519 {
    type PrivateKey = DalekSigningKey;
    type PublicKey = DalekVerifyingKey;

    fn sign(&self, message: &[u8], key: &Self::PrivateKey) -> LicenseResult<Vec<u8>> {
        Ok(key.sign(message).to_bytes().to_vec())
    }

    fn verify(
        &self,
        message: &[u8],
        signature: &[u8],
        key: &Self::PublicKey,
    ) -> LicenseResult<bool> {
        let Ok(signature) = DalekSignature::from_slice(signature) else {
            return Ok(false);
        };
        Ok(key.verify(message, &signature).is_ok())
    }

    fn load_private_key(&self, path: &Path) -> LicenseResult<Self::PrivateKey> {
        let der = read_key_der(path)?;
        DalekSigningKey::from_pkcs8_der(&der).map_err(|e| {
            LicenseError::Crypto(format!("invalid private key in {}: {e}", path.display()))
        })
    }

    fn load_public_key(&self, path: &Path) -> LicenseResult<Self::PublicKey> {
        let der = read_key_der(path)?;
        DalekVerifyingKey::from_public_key_der(&der).map_err(|e| {
            LicenseError::Crypto(format!("invalid public key in {}: {e}", path.display()))
        })
    }
}

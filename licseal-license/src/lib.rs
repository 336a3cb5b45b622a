//! Signed plain-text license files.
//!
//! A license is opaque text. Signing wraps it in delimiter lines and appends a
//! Base64 signature block; verification needs only the signed file and the
//! public key.
//!
//! # Format
//!
//! ```text
//! LICENSE_BEGIN
//! FeatureX=true
//! Expiry=2099-01-01
//! LICENSE_END
//! SIGNATURE_BEGIN
//! <base64, 20 characters per line>
//! SIGNATURE_END
//! ```
//!
//! The signature covers the license line contents concatenated without
//! separators, so CRLF and LF sources sign identically.

mod codec;
mod error;
mod framer;
mod keys;
mod lines;
mod scheme;
mod signer;
mod verifier;

pub use codec::{LINE_WIDTH, decode, encode, wrap_lines};
pub use error::{LicenseError, LicenseResult};
pub use framer::{
    Framing, LICENSE_BEGIN, LICENSE_END, ParsedArtifact, SIGNATURE_BEGIN, SIGNATURE_END,
    parse_artifact, render_artifact, render_text, signable_bytes,
};
pub use keys::{generate_keypair, read_key_der, render_key, write_key};
pub use lines::{
    LINE_SEPARATOR, Section, extract_between, find_section, read_lines, split_lines, write_text,
};
pub use scheme::{Ed25519, SignatureScheme};
pub use signer::{sign, sign_license_file};
pub use verifier::{Verification, verify, verify_license_file};

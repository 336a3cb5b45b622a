mod common;

use std::fs;

use common::{test_signing_key, write_ed25519_keys};
use licseal_license::{
    Ed25519, LINE_SEPARATOR, LicenseError, SignatureScheme, generate_keypair, read_key_der,
};
use tempfile::tempdir;

#[test]
fn key_files_are_wrapped_base64_without_armour() {
    let dir = tempdir().unwrap();
    let (private_path, public_path) = write_ed25519_keys(dir.path(), "k", &test_signing_key(1));

    for path in [&private_path, &public_path] {
        let text = fs::read_to_string(path).unwrap();
        assert!(!text.contains("-----BEGIN"));
        assert!(!text.ends_with(LINE_SEPARATOR));
        let lines: Vec<&str> = text.split(LINE_SEPARATOR).collect();
        let (last, full) = lines.split_last().unwrap();
        assert!(full.iter().all(|l| l.len() == 20));
        assert!(!last.is_empty() && last.len() <= 20);
    }
}

#[test]
fn loaded_keys_match_written_keys() {
    let dir = tempdir().unwrap();
    let key = test_signing_key(2);
    let (private_path, public_path) = write_ed25519_keys(dir.path(), "k", &key);

    let private = Ed25519.load_private_key(&private_path).unwrap();
    let public = Ed25519.load_public_key(&public_path).unwrap();
    assert_eq!(private.to_bytes(), key.to_bytes());
    assert_eq!(public, key.verifying_key());
}

#[test]
fn generated_pair_signs_and_verifies() {
    let dir = tempdir().unwrap();
    let private_path = dir.path().join("private.key");
    let public_path = dir.path().join("public.key");
    generate_keypair(&private_path, &public_path, false).unwrap();

    let private = Ed25519.load_private_key(&private_path).unwrap();
    let public = Ed25519.load_public_key(&public_path).unwrap();
    let sig = Ed25519.sign(b"message", &private).unwrap();
    assert!(Ed25519.verify(b"message", &sig, &public).unwrap());
}

#[test]
fn generate_refuses_to_overwrite() {
    let dir = tempdir().unwrap();
    let private_path = dir.path().join("private.key");
    let public_path = dir.path().join("public.key");
    fs::write(&private_path, "keep me").unwrap();

    let err = generate_keypair(&private_path, &public_path, false).unwrap_err();
    assert!(matches!(err, LicenseError::Io { .. }));
    assert_eq!(fs::read_to_string(&private_path).unwrap(), "keep me");
}

#[test]
fn generate_overwrites_when_asked() {
    let dir = tempdir().unwrap();
    let private_path = dir.path().join("private.key");
    let public_path = dir.path().join("public.key");
    fs::write(&private_path, "old").unwrap();

    generate_keypair(&private_path, &public_path, true).unwrap();
    assert!(Ed25519.load_private_key(&private_path).is_ok());
}

#[cfg(unix)]
#[test]
fn generated_private_key_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let private_path = dir.path().join("private.key");
    let public_path = dir.path().join("public.key");
    generate_keypair(&private_path, &public_path, false).unwrap();

    let mode = fs::metadata(&private_path).unwrap().permissions().mode();
    assert_eq!(mode & 0o077, 0);
}

#[cfg(unix)]
#[test]
fn overwritten_private_key_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let private_path = dir.path().join("private.key");
    let public_path = dir.path().join("public.key");
    fs::write(&private_path, "old").unwrap();
    fs::set_permissions(&private_path, fs::Permissions::from_mode(0o644)).unwrap();

    generate_keypair(&private_path, &public_path, true).unwrap();

    let mode = fs::metadata(&private_path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn existing_public_key_leaves_no_private_key_behind() {
    let dir = tempdir().unwrap();
    let private_path = dir.path().join("private.key");
    let public_path = dir.path().join("public.key");
    fs::write(&public_path, "keep me").unwrap();

    let err = generate_keypair(&private_path, &public_path, false).unwrap_err();
    assert!(matches!(err, LicenseError::Io { .. }));
    assert!(!private_path.exists());
    assert_eq!(fs::read_to_string(&public_path).unwrap(), "keep me");
}

#[test]
fn key_with_crlf_lines_loads() {
    let dir = tempdir().unwrap();
    let key = test_signing_key(3);
    let (_, public_path) = write_ed25519_keys(dir.path(), "k", &key);
    let text = fs::read_to_string(&public_path).unwrap();
    fs::write(&public_path, text.replace(LINE_SEPARATOR, "\r\n") + "\r\n").unwrap();

    let public = Ed25519.load_public_key(&public_path).unwrap();
    assert_eq!(public, key.verifying_key());
}

#[test]
fn non_base64_key_is_crypto_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.key");
    fs::write(&path, "not a key!").unwrap();

    let err = read_key_der(&path).unwrap_err();
    assert!(matches!(err, LicenseError::Crypto(_)));
    let err = Ed25519.load_public_key(&path).unwrap_err();
    assert!(matches!(err, LicenseError::Crypto(_)));
}

#[test]
fn public_key_file_is_not_a_private_key() {
    let dir = tempdir().unwrap();
    let (_, public_path) = write_ed25519_keys(dir.path(), "k", &test_signing_key(4));

    let err = Ed25519.load_private_key(&public_path).unwrap_err();
    assert!(matches!(err, LicenseError::Crypto(_)));
    assert!(format!("{err}").contains("private key"));
}

#[test]
fn missing_key_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = Ed25519.load_private_key(&dir.path().join("absent")).unwrap_err();
    assert!(matches!(err, LicenseError::Io { .. }));
}

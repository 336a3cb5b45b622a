//! Sign and verify plain-text license files.
//!
//! Usage:
//!   licseal sign --private-key <key-file> --input <in-file> --output <out-file>
//!   licseal verify --public-key <key-file> --input <in-file> [--strict]
//!   licseal keygen --private-key <key-file> --public-key <key-file> [--force]
//!
//! Exit codes: 0 on success or a valid license, 1 on usage, I/O or key
//! errors, 2 when the license was read but its signature is invalid.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use licseal_license::{
    Ed25519, Framing, Verification, generate_keypair, sign_license_file, verify_license_file,
};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "licseal")]
#[command(about = "Sign and verify plain-text license files")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    action: Action,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Sign a license file with a private key
    Sign {
        /// Private key file (Base64 PKCS#8)
        #[arg(long)]
        private_key: PathBuf,

        /// License file to sign
        #[arg(long)]
        input: PathBuf,

        /// Where to write the signed license
        #[arg(long)]
        output: PathBuf,
    },

    /// Verify a signed license file with a public key
    Verify {
        /// Public key file (Base64 X.509 SubjectPublicKeyInfo)
        #[arg(long)]
        public_key: PathBuf,

        /// Signed license file
        #[arg(long)]
        input: PathBuf,

        /// Reject files with missing section delimiters
        #[arg(long)]
        strict: bool,
    },

    /// Generate a new key pair
    Keygen {
        /// Where to write the private key
        #[arg(long)]
        private_key: PathBuf,

        /// Where to write the public key
        #[arg(long)]
        public_key: PathBuf,

        /// Overwrite existing key files
        #[arg(short, long)]
        force: bool,
    },
}

/// Exit status of a completed command.
enum Outcome {
    Success,
    InvalidSignature,
}

const EXIT_ERROR: u8 = 1;
const EXIT_INVALID: u8 = 2;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(EXIT_ERROR),
            };
        }
    };

    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    match run(args.action) {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::InvalidSignature) => ExitCode::from(EXIT_INVALID),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(action: Action) -> Result<Outcome> {
    match action {
        Action::Sign {
            private_key,
            input,
            output,
        } => {
            debug!("Signing {:?} with {:?}", input, private_key);
            sign_license_file(&Ed25519, &input, &private_key, &output)
                .with_context(|| format!("failed to sign {}", input.display()))?;
            info!("Signed license written to {:?}", output);
            Ok(Outcome::Success)
        }
        Action::Verify {
            public_key,
            input,
            strict,
        } => {
            let framing = if strict { Framing::Strict } else { Framing::Lenient };
            debug!("Verifying {:?} with {:?} ({:?})", input, public_key, framing);
            let verification = verify_license_file(&Ed25519, &public_key, &input, framing)
                .with_context(|| format!("failed to verify {}", input.display()))?;
            match verification {
                Verification::Valid(lines) => {
                    debug!("License has {} lines", lines.len());
                    println!("License is valid.");
                    Ok(Outcome::Success)
                }
                Verification::Invalid => {
                    println!("License is NOT valid.");
                    Ok(Outcome::InvalidSignature)
                }
            }
        }
        Action::Keygen {
            private_key,
            public_key,
            force,
        } => {
            generate_keypair(&private_key, &public_key, force)
                .context("failed to generate key pair")?;
            info!(
                "Generated Ed25519 key pair: private {:?}, public {:?}",
                private_key, public_key
            );
            Ok(Outcome::Success)
        }
    }
}

//! The signed license text format.
//!
//! An artifact is a sequence of lines:
//!
//! ```text
//! LICENSE_BEGIN
//! <license lines, verbatim>
//! LICENSE_END
//! SIGNATURE_BEGIN
//! <base64 signature, 20 characters per line>
//! SIGNATURE_END
//! ```
//!
//! The signature covers the license line contents concatenated with no
//! separators, so the signed bytes can be rebuilt from the artifact alone and
//! do not depend on the line terminators of the source file.

use tracing::{debug, warn};

use crate::codec::{self, LINE_WIDTH};
use crate::error::{LicenseError, LicenseResult};
use crate::lines::{LINE_SEPARATOR, find_section};

/// Opens the license section.
pub const LICENSE_BEGIN: &str = "LICENSE_BEGIN";
/// Closes the license section, and ends the signed content.
pub const LICENSE_END: &str = "LICENSE_END";
/// Opens the signature section.
pub const SIGNATURE_BEGIN: &str = "SIGNATURE_BEGIN";
/// Closes the signature section.
pub const SIGNATURE_END: &str = "SIGNATURE_END";

/// How tolerant [`parse_artifact`] is of missing delimiters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Framing {
    /// A missing begin delimiter yields an empty section and a missing end
    /// delimiter extends the section to the end of the file. Files written
    /// by older tools rely on this.
    #[default]
    Lenient,
    /// Both sections must be opened and closed.
    Strict,
}

/// A license and its signature recovered from an artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArtifact {
    /// License lines exactly as embedded.
    pub license: Vec<String>,
    /// Raw signature bytes.
    pub signature: Vec<u8>,
}

/// Computes the bytes that are signed for a set of license lines.
///
/// Line contents are concatenated in order with nothing in between, stopping
/// before the first line equal to [`LICENSE_END`].
#[must_use]
pub fn signable_bytes<S: AsRef<str>>(lines: &[S]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for line in lines.iter().map(|l| l.as_ref()) {
        if line == LICENSE_END {
            break;
        }
        bytes.extend_from_slice(line.as_bytes());
    }
    bytes
}

/// Builds the artifact lines for a license and its signature.
#[must_use]
pub fn render_artifact<S: AsRef<str>>(license: &[S], signature: &[u8]) -> Vec<String> {
    let chunks = codec::wrap_lines(&codec::encode(signature), LINE_WIDTH);
    let mut out = Vec::with_capacity(license.len() + chunks.len() + 4);
    out.push(LICENSE_BEGIN.to_string());
    out.extend(license.iter().map(|l| l.as_ref().to_string()));
    out.push(LICENSE_END.to_string());
    out.push(SIGNATURE_BEGIN.to_string());
    out.extend(chunks);
    out.push(SIGNATURE_END.to_string());
    out
}

/// Joins artifact lines with [`LINE_SEPARATOR`]. Nothing follows the final
/// line.
#[must_use]
pub fn render_text<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .map(|l| l.as_ref())
        .collect::<Vec<_>>()
        .join(LINE_SEPARATOR)
}

/// Recovers the license lines and signature bytes from an artifact.
///
/// The signature section is looked for after a closed license section, so a
/// license line reading `SIGNATURE_BEGIN` cannot stand in for the real one.
///
/// # Errors
///
/// Returns [`LicenseError::Format`] when the signature section is empty or,
/// under [`Framing::Strict`], when a delimiter is missing. Returns
/// [`LicenseError::InvalidBase64`] when the signature does not decode.
pub fn parse_artifact<S: AsRef<str>>(
    lines: &[S],
    framing: Framing,
) -> LicenseResult<ParsedArtifact> {
    let license = find_section(lines, LICENSE_BEGIN, LICENSE_END);
    check_section(license.opened, license.closed, LICENSE_BEGIN, LICENSE_END, framing)?;

    let tail = if license.closed {
        &lines[license.next..]
    } else {
        lines
    };
    let signature = find_section(tail, SIGNATURE_BEGIN, SIGNATURE_END);
    check_section(
        signature.opened,
        signature.closed,
        SIGNATURE_BEGIN,
        SIGNATURE_END,
        framing,
    )?;

    if signature.body.is_empty() {
        return Err(LicenseError::Format("no signature found".to_string()));
    }
    let encoded: String = signature.body.iter().map(|l| l.as_ref()).collect();
    let signature_bytes = codec::decode(&encoded)?;

    debug!(
        license_lines = license.body.len(),
        signature_len = signature_bytes.len(),
        "parsed artifact"
    );

    Ok(ParsedArtifact {
        license: license.body.iter().map(|l| l.as_ref().to_string()).collect(),
        signature: signature_bytes,
    })
}

fn check_section(
    opened: bool,
    closed: bool,
    begin: &str,
    end: &str,
    framing: Framing,
) -> LicenseResult<()> {
    if opened && closed {
        return Ok(());
    }
    let missing = if opened { end } else { begin };
    match framing {
        Framing::Strict => Err(LicenseError::Format(format!("missing {missing} line"))),
        Framing::Lenient => {
            warn!(delimiter = missing, "delimiter missing, reading leniently");
            Ok(())
        }
    }
}

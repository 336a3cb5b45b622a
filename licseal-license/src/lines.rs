//! Line-oriented file access and delimiter-bounded section extraction.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{LicenseError, LicenseResult};

/// Separator written between emitted lines.
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
/// Separator written between emitted lines.
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Reads a text file into its logical lines, terminators stripped.
///
/// Bytes that are not valid UTF-8 become U+FFFD, so a corrupted license
/// still reads and then fails signature checks.
///
/// # Errors
///
/// Returns [`LicenseError::Io`] if the file cannot be opened or read.
pub fn read_lines(path: impl AsRef<Path>) -> LicenseResult<Vec<String>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| LicenseError::io(path, e))?;
    let lines = split_lines(&String::from_utf8_lossy(&bytes));
    debug!(path = %path.display(), lines = lines.len(), "read lines");
    Ok(lines)
}

/// Writes `text` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`LicenseError::Io`] if the file cannot be written.
pub fn write_text(path: impl AsRef<Path>, text: &str) -> LicenseResult<()> {
    let path = path.as_ref();
    fs::write(path, text).map_err(|e| LicenseError::io(path, e))?;
    debug!(path = %path.display(), bytes = text.len(), "wrote file");
    Ok(())
}

/// Splits text on `\n`, `\r\n` or a lone `\r`.
///
/// A terminator at the very end does not start another line, and a final
/// line without one is kept.
#[must_use]
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find(['\n', '\r']) {
            Some(idx) => {
                lines.push(rest[..idx].to_string());
                let skip = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[idx + skip..];
            }
            None => {
                lines.push(rest.to_string());
                break;
            }
        }
    }
    lines
}

/// A delimiter-bounded run of lines found by [`find_section`].
#[derive(Debug, PartialEq, Eq)]
pub struct Section<'a, S = String> {
    /// Lines strictly between the delimiters.
    pub body: &'a [S],
    /// Whether the begin delimiter was seen.
    pub opened: bool,
    /// Whether the end delimiter was seen after the begin delimiter.
    pub closed: bool,
    /// Index of the first line after the section; 0 when it never opened.
    pub next: usize,
}

/// Locates the lines between the first `begin` line and the following `end`
/// line, comparing whole lines.
///
/// Never fails: with no `begin` line the body is empty, and with no `end`
/// line after it the body runs to the last line.
#[must_use]
pub fn find_section<'a, S: AsRef<str>>(lines: &'a [S], begin: &str, end: &str) -> Section<'a, S> {
    let Some(start) = lines.iter().position(|l| l.as_ref() == begin) else {
        return Section {
            body: &[],
            opened: false,
            closed: false,
            next: 0,
        };
    };
    let from = start + 1;
    match lines[from..].iter().position(|l| l.as_ref() == end) {
        Some(len) => Section {
            body: &lines[from..from + len],
            opened: true,
            closed: true,
            next: from + len + 1,
        },
        None => Section {
            body: &lines[from..],
            opened: true,
            closed: false,
            next: lines.len(),
        },
    }
}

/// Returns a copy of the lines strictly between `begin` and `end`.
///
/// See [`find_section`] for the handling of missing delimiters.
#[must_use]
pub fn extract_between<S: AsRef<str>>(lines: &[S], begin: &str, end: &str) -> Vec<String> {
    find_section(lines, begin, end)
        .body
        .iter()
        .map(|l| l.as_ref().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// SaveError: typed errors for template save/load
// ---------------------------------------------------------------------------

use std::fmt;

use massing::grid::GridDataError;

/// Errors that can occur while persisting or loading a massing template.
///
/// Every failure path is typed and propagated; a failed load must leave
/// the live session untouched.
#[derive(Debug)]
pub enum SaveError {
    /// I/O error (file not found, permission denied, disk full, ...).
    Io(std::io::Error),
    /// Bitcode decoding failed (corrupt or invalid template data).
    Decode(String),
    /// Payload checksum mismatch: the file was modified or damaged.
    Corrupted { expected: u32, found: u32 },
    /// The file was written by a newer build.
    VersionMismatch { expected_max: u32, found: u32 },
    /// The file does not start with the template magic bytes.
    BadMagic,
    /// Declared grid dimensions disagree with the stored value array, or
    /// exceed the hard allocation bounds.
    Malformed(String),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "I/O error: {e}"),
            SaveError::Decode(msg) => write!(f, "Decoding error: {msg}"),
            SaveError::Corrupted { expected, found } => write!(
                f,
                "Template file is corrupted: checksum mismatch (expected {expected:#010X}, got {found:#010X})"
            ),
            SaveError::VersionMismatch {
                expected_max,
                found,
            } => write!(
                f,
                "Version mismatch: template is v{found}, but this build only supports up to v{expected_max}"
            ),
            SaveError::BadMagic => write!(f, "Not a massing template file"),
            SaveError::Malformed(msg) => write!(f, "Malformed template: {msg}"),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<bitcode::Error> for SaveError {
    fn from(e: bitcode::Error) -> Self {
        SaveError::Decode(e.to_string())
    }
}

impl From<GridDataError> for SaveError {
    fn from(e: GridDataError) -> Self {
        SaveError::Malformed(e.to_string())
    }
}

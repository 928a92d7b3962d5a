//! Header block validation.
//!
//! A dicam source opens with a fixed file-type marker line followed by a version
//! line. Any further header lines are free-form notes; they play no role in the
//! core pipeline but are preserved for diagnostics.

use crate::error::DicamError;

/// The fixed file-type marker every dicam source must open with.
pub const FILE_MARKER: &str = "DICAM FILE";

/// The single format version this parser supports.
pub const SUPPORTED_VERSION: &str = "v1.0.0";

/// The validated header of a dicam source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub version: String,
    /// Free-form note lines, with their `- ` prefix removed.
    pub notes: Vec<String>,
}

impl Header {
    /// Validate the header block (everything before the first blank line).
    pub fn parse(block: &str) -> Result<Header, DicamError> {
        let mut lines = block.lines();

        match lines.next() {
            Some(line) if line == FILE_MARKER => {}
            _ => {
                return Err(DicamError::Format(format!(
                    "missing '{}' marker line",
                    FILE_MARKER
                )))
            }
        }

        let version = match lines.next() {
            Some(line) if line == SUPPORTED_VERSION => line.to_string(),
            other => {
                return Err(DicamError::Version {
                    expected: SUPPORTED_VERSION,
                    found: other.unwrap_or("").to_string(),
                })
            }
        };

        let notes = lines
            .map(|line| line.strip_prefix("- ").unwrap_or(line).to_string())
            .collect();

        Ok(Header { version, notes })
    }
}

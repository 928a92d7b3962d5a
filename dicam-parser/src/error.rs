//! Error types for dicam parsing.

use std::fmt;

/// Errors that can occur while parsing a dicam source.
///
/// All variants are fatal for the document being parsed: the pipeline aborts
/// without emitting a partial result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DicamError {
    /// The header marker line is missing or malformed.
    Format(String),
    /// The declared format version is not supported.
    Version {
        expected: &'static str,
        found: String,
    },
    /// A body token matched no grammar alternative.
    Parse {
        /// Zero-based index of the token in the normalized body.
        token_index: usize,
        /// The raw token text, for diagnosis.
        raw: String,
        reason: String,
    },
}

impl fmt::Display for DicamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DicamError::Format(msg) => write!(f, "format error: {}", msg),
            DicamError::Version { expected, found } => {
                write!(
                    f,
                    "incompatible version: '{}' (running {})",
                    found, expected
                )
            }
            DicamError::Parse {
                token_index,
                raw,
                reason,
            } => {
                write!(f, "token {}: cannot parse '{}': {}", token_index, raw, reason)
            }
        }
    }
}

impl std::error::Error for DicamError {}

impl From<DicamError> for String {
    fn from(err: DicamError) -> Self {
        err.to_string()
    }
}

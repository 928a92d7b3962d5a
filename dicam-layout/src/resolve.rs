//! Offset → grid-cell → pixel-rectangle resolution.

use crate::{Measure, Metrics};
use serde::Serialize;
use std::fmt;

/// Sentence-final punctuation removed before width measurement only. The drawn
/// text keeps its punctuation.
const MEASURE_STRIPPED: [char; 3] = ['.', ',', ';'];

/// The resolved geometric placement of a word offset or offset range.
///
/// Derived, never stored: valid only for the line width and measurement function
/// in effect when resolved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub line: usize,
    pub word: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

/// Errors from position resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The offset exceeds the resolvable word count after wrapping.
    OffsetNotFound { offset: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::OffsetNotFound { offset } => {
                write!(f, "word offset {} not found in wrapped text", offset)
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Resolve a word offset (and optional inclusive span end) against wrapped lines.
///
/// The canonical offset → grid-cell lookup walks line-by-line, word-by-word.
/// One empty sentinel word is appended to the final line so that an offset
/// exactly at the end of the text (zero-width trailing markers) still resolves.
///
/// When the span end lands on a later line than the start, the measured width is
/// clamped to the end of the start word's line; the caller draws the remainder
/// on the end word's line as a second segment.
pub fn resolve(
    lines: &[String],
    metrics: &Metrics,
    measure: &dyn Measure,
    start: usize,
    end: Option<usize>,
) -> Result<Position, LayoutError> {
    let mut line_words: Vec<Vec<&str>> = lines
        .iter()
        .map(|line| line.split_whitespace().collect())
        .collect();
    if line_words.is_empty() {
        line_words.push(Vec::new());
    }
    // End-of-document sentinel.
    line_words
        .last_mut()
        .expect("at least one line")
        .push("");

    let (line, word) =
        locate(&line_words, start).ok_or(LayoutError::OffsetNotFound { offset: start })?;

    let end_word = match end {
        Some(end_offset) if end_offset > start => {
            let (end_line, end_word) = locate(&line_words, end_offset)
                .ok_or(LayoutError::OffsetNotFound { offset: end_offset })?;
            if end_line == line {
                end_word
            } else {
                line_words[line].len() - 1
            }
        }
        _ => word,
    };

    let words = &line_words[line];
    let x = if word == 0 {
        metrics.padding
    } else {
        metrics.padding + measure.width(&format!("{} ", words[..word].join(" ")))
    };
    let y = metrics.baseline(line) + 1.0;
    let span: String = words[word..=end_word]
        .join(" ")
        .chars()
        .filter(|c| !MEASURE_STRIPPED.contains(c))
        .collect();
    let width = measure.width(&span);

    Ok(Position {
        line,
        word,
        x,
        y,
        width,
    })
}

/// Walk the flattened line/word grid until the offset is consumed.
fn locate(line_words: &[Vec<&str>], offset: usize) -> Option<(usize, usize)> {
    let mut remaining = offset;
    for (line, words) in line_words.iter().enumerate() {
        if remaining < words.len() {
            return Some((line, remaining));
        }
        remaining -= words.len();
    }
    None
}

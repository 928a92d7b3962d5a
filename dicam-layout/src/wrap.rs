//! Greedy word wrapping.

use crate::{Measure, Metrics};

/// Break text into width-constrained display lines.
///
/// Greedy packing: a word joins the current line if the measured candidate stays
/// within the usable text width, otherwise it opens a new line. A paragraph
/// break (`\n` inside the text) forces a new line unconditionally; the break
/// character itself is not placed. Pure and deterministic given `measure`; no
/// drawing happens here.
pub fn wrap(text: &str, metrics: &Metrics, measure: &dyn Measure) -> Vec<String> {
    let limit = metrics.text_width();
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut pending_break = false;

    for chunk in text.split(' ') {
        for (i, word) in chunk.split('\n').enumerate() {
            if i > 0 {
                pending_break = true;
            }
            if word.is_empty() {
                continue;
            }
            if pending_break {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                pending_break = false;
            }
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{} {}", current, word);
            if measure.width(&candidate) <= limit {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

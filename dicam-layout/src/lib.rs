//! # dicam-layout
//!
//! Word wrapping and position resolution for dicam documents.
//!
//! Three coordinate spaces must stay consistent across this crate:
//!
//!     1. Cleaned-word offsets, assigned by the parser.
//!     2. Wrapped line / intra-line word indices, produced by [`wrap`].
//!     3. Pixel geometry, produced by [`resolve`].
//!
//! The crate depends only on a text-width measurement function (the [`Measure`]
//! trait) and numeric layout constants ([`Metrics`]); color and theme data never
//! enter here. A [`Position`] is valid only for the line width and measurement
//! function in effect when it was resolved and must never be cached across
//! re-wraps.

pub mod resolve;
pub mod wrap;

pub use resolve::{resolve, LayoutError, Position};
pub use wrap::wrap;

use serde::{Deserialize, Serialize};

/// Text-width measurement in the body font. The only seam between layout and
/// whatever font machinery the rendering collaborator brings.
pub trait Measure {
    fn width(&self, text: &str) -> f64;
}

/// Fixed-advance measurement: every char is `advance` wide. Deterministic stand-in
/// for real font metrics in tests and render-plan output.
#[derive(Debug, Clone, Copy)]
pub struct CharMeasure {
    pub advance: f64,
}

impl CharMeasure {
    pub fn new(advance: f64) -> Self {
        CharMeasure { advance }
    }
}

impl Measure for CharMeasure {
    fn width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.advance
    }
}

/// Numeric layout constants shared by the wrapper and the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Full page width; lines wrap at `max_width - 2 * padding`.
    pub max_width: f64,
    /// Horizontal padding on both page edges.
    pub padding: f64,
    /// Glyph height of the body font.
    pub font_size: f64,
    /// Vertical space between line baselines, beyond the glyph height.
    pub line_spacing: f64,
}

impl Metrics {
    /// The usable text width of a line.
    pub fn text_width(&self) -> f64 {
        self.max_width - 2.0 * self.padding
    }

    /// Baseline y of a zero-based line index.
    pub fn baseline(&self, line: usize) -> f64 {
        (self.font_size + self.line_spacing) * (line as f64 + 1.0)
    }
}

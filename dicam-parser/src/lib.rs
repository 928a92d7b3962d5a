//! # dicam-parser
//!
//! A parser for the dicam grammar-markup format.
//!
//! Dicam sources are plain-text documents annotated inline with a compact syntax
//! used to diagram Latin sentence grammar: case, mood, clause boundaries and
//! cross-references between words. Parsing turns such a source into clean prose
//! plus a sequence of typed [`Marking`] records carrying zero-based word offsets.
//!
//! Parsing End To End
//!
//!     The pipeline transforms a dicam source into a [`ParsedDocument`] through
//!     these stages:
//!
//!         Header validation:
//!             The source splits into a header block and a body block at the first
//!             blank line. The header must open with the `DICAM FILE` marker and a
//!             supported version line; remaining lines are free-form notes kept for
//!             diagnostics. See [header].
//!
//!         Body normalization:
//!             Footnote lines are stripped, formatting artifacts (spaces before
//!             markup openers) are removed, and soft line breaks are rejoined with
//!             the double-space token separator so that downstream splitting
//!             reconstructs annotation tokens regardless of how the source was
//!             wrapped. Paragraph breaks survive as a `\n` attached to the word
//!             that precedes them. See [normalize].
//!
//!         Token grammar:
//!             The normalized body splits on the double-space separator; each token
//!             is matched by a small recursive-descent grammar with five payload
//!             groups (global annotation, clean word, `<type:value>` annotation,
//!             `[±offset]` cross-reference, `{top_bottom}` notes). See [grammar].
//!
//!         Marking construction:
//!             Payload values decode into the typed [`MarkingKind`] variants at the
//!             point the annotation type is known. Offset bookkeeping is a pure
//!             fold over tokens: the cursor counts cleaned words emitted so far;
//!             markup and footnotes never advance it. See [parser].
//!
//! All offsets index the cleaned word sequence. Every error is fatal for the
//! document being parsed; there is no best-effort partial output.

pub mod error;
pub mod grammar;
pub mod header;
pub mod markings;
pub mod normalize;
pub mod parser;

pub use error::DicamError;
pub use header::{Header, FILE_MARKER, SUPPORTED_VERSION};
pub use markings::{BoundaryTick, Case, ClauseLetter, ConstructionKind, Marking, MarkingKind};
pub use parser::{parse, ParsedDocument};

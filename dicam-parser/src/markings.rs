//! The marking model.
//!
//! A [`Marking`] attaches one structured annotation to a word or word-span of the
//! cleaned document text. Offsets are zero-based indices into the cleaned word
//! sequence; the geometry of a marking is resolved later, against the wrapped
//! line layout, by the position resolver.
//!
//! The variant is decided once, at construction time, and never inferred from
//! field presence afterwards.

use serde::{Deserialize, Serialize};

/// A structured annotation record attached to one word or word-span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marking {
    /// Zero-based index of the first cleaned word this marking covers.
    pub start: usize,
    /// Inclusive end of a multi-word span.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
    /// Cross-reference target for a connecting curve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<usize>,
    /// Ordered note lines rendered above the word.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_note: Option<Vec<String>>,
    /// Ordered note lines rendered below the word.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_note: Option<Vec<String>>,
    #[serde(flatten)]
    pub kind: MarkingKind,
}

impl Marking {
    /// The inclusive end offset of the span (`start` for single-word markings).
    pub fn span_end(&self) -> usize {
        self.end.unwrap_or(self.start)
    }
}

/// The typed payload of a marking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MarkingKind {
    /// Clause-boundary marker: letter, optional numeral label, optional tick.
    Clause {
        letter: Option<ClauseLetter>,
        number: Option<u32>,
        tick: Option<BoundaryTick>,
    },
    /// A noun phrase in a given case.
    NounPhrase {
        case: Case,
        /// Whether the phrase carries the clause's head function. Head-function
        /// phrases render as highlight boxes, the rest as underlines.
        head_function: bool,
        /// Participial forms get a secondary dashed underline.
        participle: bool,
    },
    /// A prepositional phrase; same fields as a noun phrase, rendered with an
    /// additional outline box.
    PrepPhrase {
        case: Case,
        head_function: bool,
        participle: bool,
    },
    /// A verb form.
    Verb {
        /// Finite forms get a solid underline, non-finite a dashed one.
        finite: bool,
        /// The clause subject gets an extra highlight segment.
        subject: bool,
    },
    /// A bracket-like multi-token span marker.
    Construction {
        kind: ConstructionKind,
        /// Closing brackets mirror the open orientation.
        close: bool,
    },
    /// A word carrying only notes or a cross-reference, with no grammatical
    /// payload. Renders its notes and curve but no underline or highlight.
    Note,
}

impl MarkingKind {
    pub fn is_clause(&self) -> bool {
        matches!(self, MarkingKind::Clause { .. })
    }
}

/// The six Latin cases carried by noun and prepositional phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Case {
    Nom,
    Gen,
    Dat,
    Acc,
    Abl,
    Voc,
}

impl Case {
    /// Decode a three-letter case code as written in the markup.
    pub fn from_code(code: &str) -> Option<Case> {
        match code {
            "nom" => Some(Case::Nom),
            "gen" => Some(Case::Gen),
            "dat" => Some(Case::Dat),
            "acc" => Some(Case::Acc),
            "abl" => Some(Case::Abl),
            "voc" => Some(Case::Voc),
            _ => None,
        }
    }
}

/// Main (`H`) or subordinate (`B`) clause letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClauseLetter {
    H,
    B,
}

impl ClauseLetter {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClauseLetter::H => "H",
            ClauseLetter::B => "B",
        }
    }
}

/// Single or double vertical boundary tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryTick {
    Single,
    Double,
}

/// Bracketed multi-word grammatical units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstructionKind {
    /// Accusative-with-infinitive clause.
    #[serde(rename = "aci")]
    AccInfinitive,
    /// Ablative absolute.
    #[serde(rename = "ablabs")]
    AblAbsolute,
}

impl ConstructionKind {
    /// Decode a construction kind as written in the markup.
    pub fn from_code(code: &str) -> Option<ConstructionKind> {
        match code {
            "aci" => Some(ConstructionKind::AccInfinitive),
            "ablabs" => Some(ConstructionKind::AblAbsolute),
            _ => None,
        }
    }
}

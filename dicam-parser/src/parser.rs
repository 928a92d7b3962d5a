//! Document parsing: header validation, normalization, token fold.
//!
//! Parsing is a pure fold over the normalized body tokens, carrying a
//! `(cursor, clean_text, markings)` accumulator. The cursor counts cleaned words
//! emitted so far; annotation markup and stripped footnotes never shift it. A
//! token whose clean word spans several whitespace-separated words advances the
//! cursor by that word count and sets `end = start + count - 1` on its marking.

use crate::error::DicamError;
use crate::grammar::{parse_token, RawToken};
use crate::header::Header;
use crate::markings::{
    BoundaryTick, Case, ClauseLetter, ConstructionKind, Marking, MarkingKind,
};
use crate::normalize::normalize;
use serde::Serialize;

/// The parsed form of a dicam source: validated header, cleaned prose, and the
/// ordered marking list. Markings are immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedDocument {
    #[serde(skip)]
    pub header: Header,
    /// Cleaned prose with all markup stripped. Paragraph breaks survive as `\n`
    /// attached to the preceding word.
    pub text: String,
    pub markings: Vec<Marking>,
}

/// Parse a dicam source into clean text plus markings.
pub fn parse(source: &str) -> Result<ParsedDocument, DicamError> {
    let source = source.replace("\r\n", "\n");
    let (header_block, body) = match source.split_once("\n\n") {
        Some((header, body)) => (header, body),
        None => (source.as_str(), ""),
    };
    let header = Header::parse(header_block)?;
    let body = normalize(body);

    let mut cursor = 0usize;
    let mut clean_text = String::new();
    let mut markings: Vec<Marking> = Vec::new();

    for (token_index, raw) in body.split("  ").enumerate() {
        // Pure separators consume no position slot.
        if raw.trim().is_empty() {
            continue;
        }

        let fail = |reason: String| DicamError::Parse {
            token_index,
            raw: raw.to_string(),
            reason,
        };

        let token = parse_token(raw).map_err(&fail)?;
        let plain_word = !token.has_payload();

        match token {
            RawToken::Global { kind, value } => {
                markings.push(build_global(kind, value, cursor).map_err(&fail)?);
            }
            RawToken::Word {
                word,
                annotation,
                cross_ref,
                top_note,
                bottom_note,
                paragraph,
            } => {
                let word_count = word.split_whitespace().count();
                if !clean_text.is_empty() && !clean_text.ends_with('\n') {
                    clean_text.push(' ');
                }
                clean_text.push_str(word);
                if paragraph {
                    clean_text.push('\n');
                }

                let start = cursor;
                cursor += word_count;

                if plain_word {
                    continue;
                }

                let kind = match annotation {
                    Some((ty, value)) => build_kind(ty, value).map_err(&fail)?,
                    None => MarkingKind::Note,
                };

                let to = match cross_ref {
                    Some(offset) => {
                        let target = start as i64 + offset;
                        if target < 0 {
                            return Err(fail(format!(
                                "cross-reference offset {} points before the document",
                                offset
                            )));
                        }
                        Some(target as usize)
                    }
                    None => None,
                };

                markings.push(Marking {
                    start,
                    end: (word_count > 1).then(|| start + word_count - 1),
                    to,
                    top_note: top_note.map(to_owned_lines),
                    bottom_note: bottom_note.map(to_owned_lines),
                    kind,
                });
            }
        }
    }

    Ok(ParsedDocument {
        header,
        text: clean_text,
        markings,
    })
}

fn to_owned_lines(lines: Vec<&str>) -> Vec<String> {
    lines.into_iter().map(str::to_string).collect()
}

/// Decode a parenthesis-form global annotation. Only clause (`zin`) markers
/// exist at this level.
fn build_global(kind: &str, value: &str, cursor: usize) -> Result<Marking, String> {
    if kind != "zin" {
        return Err(format!("unknown global annotation type '{}'", kind));
    }

    let (tick, rest) = if let Some(rest) = value.strip_prefix("||") {
        (Some(BoundaryTick::Double), rest)
    } else if let Some(rest) = value.strip_prefix('|') {
        (Some(BoundaryTick::Single), rest)
    } else {
        (None, value)
    };

    let (letter, rest) = if let Some(rest) = rest.strip_prefix('H') {
        (Some(ClauseLetter::H), rest)
    } else if let Some(rest) = rest.strip_prefix('B') {
        (Some(ClauseLetter::B), rest)
    } else {
        (None, rest)
    };

    let number = if rest.is_empty() {
        None
    } else {
        Some(
            rest.parse::<u32>()
                .map_err(|_| format!("invalid clause label '{}'", value))?,
        )
    };

    Ok(Marking {
        start: cursor,
        end: None,
        to: None,
        top_note: None,
        bottom_note: None,
        kind: MarkingKind::Clause {
            letter,
            number,
            tick,
        },
    })
}

/// Decode a `<type:value>` payload into the typed variant. Trailing flag
/// suffixes are stripped before the enumerated value is stored.
fn build_kind(ty: &str, value: Option<&str>) -> Result<MarkingKind, String> {
    match ty {
        "nw" | "ovw" => {
            let value = value.ok_or_else(|| format!("'{}' annotation requires a case value", ty))?;
            let (case, head_function, participle) = decode_case_flags(value)?;
            if ty == "nw" {
                Ok(MarkingKind::NounPhrase {
                    case,
                    head_function,
                    participle,
                })
            } else {
                Ok(MarkingKind::PrepPhrase {
                    case,
                    head_function,
                    participle,
                })
            }
        }
        "ww" => {
            let value = value.unwrap_or("");
            let (base, subject) = match value.strip_suffix('*') {
                Some(base) => (base, true),
                None => (value, false),
            };
            Ok(MarkingKind::Verb {
                finite: base.is_empty() || base == "pv",
                subject,
            })
        }
        "con" => {
            let value = value.ok_or("'con' annotation requires a construction kind")?;
            let (base, close) = match value.strip_suffix('.') {
                Some(base) => (base, true),
                None => (value, false),
            };
            let kind = ConstructionKind::from_code(base)
                .ok_or_else(|| format!("unknown construction kind '{}'", base))?;
            Ok(MarkingKind::Construction { kind, close })
        }
        other => Err(format!("unknown annotation type '{}'", other)),
    }
}

/// Strip `_` (non-head function) and `*` (participle) suffixes, then decode the
/// three-letter case code.
fn decode_case_flags(value: &str) -> Result<(Case, bool, bool), String> {
    let mut base = value;
    let mut head_function = true;
    let mut participle = false;

    loop {
        if let Some(rest) = base.strip_suffix('_') {
            head_function = false;
            base = rest;
        } else if let Some(rest) = base.strip_suffix('*') {
            participle = true;
            base = rest;
        } else {
            break;
        }
    }

    let case = Case::from_code(base).ok_or_else(|| format!("unknown case code '{}'", base))?;
    Ok((case, head_function, participle))
}

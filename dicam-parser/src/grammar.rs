//! The annotation-token grammar.
//!
//! Each body token matches one of two shapes, tried in priority order:
//!
//!     (type:value)                             global annotation, no clean word
//!     word[<type[:value]>][[±offset]][{top[_bottom]}]
//!
//! The grammar is a small recursive descent over the token text. Group order is
//! fixed (annotation, then cross-reference, then notes) and every group is
//! optional; anything left over after the groups is an error, as is a token with
//! markup but no word text.

/// A structurally parsed token, before payload values are decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawToken<'a> {
    /// Parenthesis form `(type:value)`. Carries no clean word.
    Global { kind: &'a str, value: &'a str },
    /// Word form with optional payload groups.
    Word {
        /// The literal text to keep. May contain spaces (a multi-word idiom
        /// treated as one span) and a trailing `\n` paragraph break.
        word: &'a str,
        /// `<type:value>` grammatical annotation; value is optional.
        annotation: Option<(&'a str, Option<&'a str>)>,
        /// `[±offset]` cross-reference, relative to the token's own start.
        cross_ref: Option<i64>,
        top_note: Option<Vec<&'a str>>,
        bottom_note: Option<Vec<&'a str>>,
        /// Whether a paragraph break follows this token.
        paragraph: bool,
    },
}

impl RawToken<'_> {
    /// Whether the token carries any annotation payload at all.
    pub fn has_payload(&self) -> bool {
        match self {
            RawToken::Global { .. } => true,
            RawToken::Word {
                annotation,
                cross_ref,
                top_note,
                bottom_note,
                ..
            } => {
                annotation.is_some()
                    || cross_ref.is_some()
                    || top_note.is_some()
                    || bottom_note.is_some()
            }
        }
    }
}

/// Parse one body token. Errors carry a reason only; the caller attaches the
/// token index and raw text.
pub fn parse_token(raw: &str) -> Result<RawToken<'_>, String> {
    // A paragraph break survives normalization as a trailing newline on the
    // token that precedes it.
    let trimmed = raw.trim_end_matches('\n');
    let paragraph = trimmed.len() != raw.len();
    let raw = trimmed;

    if raw.starts_with('(') && raw.ends_with(')') && raw.contains(':') {
        let inner = &raw[1..raw.len() - 1];
        let (kind, value) = inner.split_once(':').expect("colon checked above");
        if kind.is_empty() {
            return Err("empty global annotation type".to_string());
        }
        return Ok(RawToken::Global { kind, value });
    }

    let word_end = raw.find(['<', '[', '{']).unwrap_or(raw.len());
    let word = raw[..word_end].trim_end_matches(' ');
    if word.trim().is_empty() {
        return Err("annotation without word text".to_string());
    }

    let mut rest = &raw[word_end..];
    let mut annotation = None;
    let mut cross_ref = None;
    let mut top_note = None;
    let mut bottom_note = None;

    if let Some(body) = rest.strip_prefix('<') {
        let end = body.find('>').ok_or("unterminated '<' annotation")?;
        let inner = &body[..end];
        let (ty, value) = match inner.split_once(':') {
            Some((ty, value)) => (ty, Some(value)),
            None => (inner, None),
        };
        if ty.is_empty() {
            return Err("empty annotation type".to_string());
        }
        annotation = Some((ty, value));
        rest = &body[end + 1..];
    }

    if let Some(body) = rest.strip_prefix('[') {
        let end = body.find(']').ok_or("unterminated '[' cross-reference")?;
        let offset = body[..end]
            .parse::<i64>()
            .map_err(|_| format!("invalid cross-reference offset '{}'", &body[..end]))?;
        cross_ref = Some(offset);
        rest = &body[end + 1..];
    }

    if let Some(body) = rest.strip_prefix('{') {
        let end = body.find('}').ok_or("unterminated '{' note")?;
        let inner = &body[..end];
        let (top, bottom) = match inner.split_once('_') {
            Some((top, bottom)) => (top, Some(bottom)),
            None => (inner, None),
        };
        if !top.is_empty() {
            top_note = Some(top.split('/').collect());
        }
        if let Some(bottom) = bottom {
            if !bottom.is_empty() {
                bottom_note = Some(bottom.split('/').collect());
            }
        }
        rest = &body[end + 1..];
    }

    if !rest.is_empty() {
        return Err(format!("unexpected trailing text '{}'", rest));
    }

    Ok(RawToken::Word {
        word,
        annotation,
        cross_ref,
        top_note,
        bottom_note,
        paragraph,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn plain_word() {
        assert_eq!(
            parse_token("beatus"),
            Ok(RawToken::Word {
                word: "beatus",
                annotation: None,
                cross_ref: None,
                top_note: None,
                bottom_note: None,
                paragraph: false,
            })
        );
    }

    #[test]
    fn annotated_word_with_value() {
        assert_eq!(
            parse_token("Ego<nw:nom>"),
            Ok(RawToken::Word {
                word: "Ego",
                annotation: Some(("nw", Some("nom"))),
                cross_ref: None,
                top_note: None,
                bottom_note: None,
                paragraph: false,
            })
        );
    }

    #[test]
    fn annotated_word_without_value() {
        assert_eq!(
            parse_token("sum.<ww>"),
            Ok(RawToken::Word {
                word: "sum.",
                annotation: Some(("ww", None)),
                cross_ref: None,
                top_note: None,
                bottom_note: None,
                paragraph: false,
            })
        );
    }

    #[test]
    fn trailing_newline_marks_a_paragraph_break() {
        match parse_token("puella<nw:nom>\n") {
            Ok(RawToken::Word {
                word, paragraph, ..
            }) => {
                assert_eq!(word, "puella");
                assert!(paragraph);
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[rstest]
    #[case("se<nw:acc_>[-2]", -2)]
    #[case("quem<nw:acc_>[+3]", 3)]
    #[case("quod<nw:nom_>[4]", 4)]
    fn cross_reference_offsets(#[case] token: &str, #[case] expected: i64) {
        match parse_token(token) {
            Ok(RawToken::Word { cross_ref, .. }) => assert_eq!(cross_ref, Some(expected)),
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn notes_split_on_slashes() {
        match parse_token("amat<ww:pv>{ind pr/3e ev_verb}") {
            Ok(RawToken::Word {
                top_note,
                bottom_note,
                ..
            }) => {
                assert_eq!(top_note, Some(vec!["ind pr", "3e ev"]));
                assert_eq!(bottom_note, Some(vec!["verb"]));
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn bottom_only_note() {
        match parse_token("amat{_nw.d.}") {
            Ok(RawToken::Word {
                top_note,
                bottom_note,
                ..
            }) => {
                assert_eq!(top_note, None);
                assert_eq!(bottom_note, Some(vec!["nw.d."]));
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn global_annotation() {
        assert_eq!(
            parse_token("(zin:||H1)"),
            Ok(RawToken::Global {
                kind: "zin",
                value: "||H1"
            })
        );
    }

    #[test]
    fn parenthesized_word_without_colon_is_a_plain_word() {
        match parse_token("(sic)") {
            Ok(RawToken::Word { word, .. }) => assert_eq!(word, "(sic)"),
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn multi_word_idiom_keeps_internal_spaces() {
        match parse_token("res publica<nw:nom>") {
            Ok(RawToken::Word { word, .. }) => assert_eq!(word, "res publica"),
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[rstest]
    #[case("<ww>", "annotation without word text")]
    #[case("sum<ww", "unterminated '<' annotation")]
    #[case("sum[1", "unterminated '[' cross-reference")]
    #[case("sum{a", "unterminated '{' note")]
    #[case("sum[abc]", "invalid cross-reference offset 'abc'")]
    #[case("sum<ww>x", "unexpected trailing text 'x'")]
    fn malformed_tokens(#[case] token: &str, #[case] reason: &str) {
        assert_eq!(parse_token(token), Err(reason.to_string()));
    }
}

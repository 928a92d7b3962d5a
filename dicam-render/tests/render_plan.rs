//! End-to-end render-plan tests: parse a source, render against the recording
//! surface, and assert on the emitted draw calls.

use dicam_config::{load_defaults, DicamConfig};
use dicam_parser::parse;
use dicam_render::{DrawOp, RecordingSurface, RenderError, Renderer, TextAlign};

/// Per-char advance of the recording surface at the default 20px body font.
const ADVANCE: f64 = 10.0;
const PADDING: f64 = 10.0;

fn config() -> DicamConfig {
    load_defaults().expect("defaults to load")
}

fn render_source(config: &DicamConfig, body: &str) -> (Vec<DrawOp>, Vec<String>) {
    let source = format!("DICAM FILE\nv1.0.0\n\n{}", body);
    let document = parse(&source).expect("source to parse");
    let renderer = Renderer::new(config).expect("renderer to build");
    let mut surface = RecordingSurface::new();
    let lines = renderer
        .render(&mut surface, &document)
        .expect("document to render");
    (surface.into_ops(), lines)
}

fn polylines<'a>(ops: &'a [DrawOp], color: &str) -> Vec<&'a DrawOp> {
    ops.iter()
        .filter(|op| matches!(op, DrawOp::Polyline { style, .. } if style.color == color))
        .collect()
}

#[test]
fn background_first_body_text_last() {
    let (ops, lines) = render_source(&config(), "Ego<nw:nom>  beatus<nw:nom_>  sum.<ww>");
    assert_eq!(lines, vec!["Ego beatus sum."]);

    match &ops[0] {
        DrawOp::FillRect { rect, color, .. } => {
            assert_eq!(rect.x, 0.0);
            assert_eq!(rect.width, 500.0);
            assert_eq!(color, "white");
        }
        other => panic!("expected background rect, got {:?}", other),
    }
    match ops.last().expect("at least one op") {
        DrawOp::Text { text, x, align, .. } => {
            assert_eq!(text, "Ego beatus sum.");
            assert_eq!(*x, PADDING);
            assert_eq!(*align, TextAlign::Left);
        }
        other => panic!("expected body text last, got {:?}", other),
    }
}

#[test]
fn head_function_highlights_and_underlines() {
    let cfg = config();
    let nom = cfg.themes["default"].nom.clone();
    let (ops, _) = render_source(&cfg, "Ego<nw:nom>  beatus<nw:nom_>  sum.<ww>");

    // Head-function nominative: a filled highlight box behind "Ego".
    let highlight = ops.iter().find(
        |op| matches!(op, DrawOp::FillRect { color, .. } if *color == nom),
    );
    assert!(highlight.is_some(), "expected a nominative highlight box");

    // Non-head nominative: an underline in the case color.
    let underlines = polylines(&ops, &nom);
    assert_eq!(underlines.len(), 1);
    match underlines[0] {
        DrawOp::Polyline { points, .. } => {
            // "beatus" starts after "Ego " (four chars).
            assert_eq!(points[0].x, PADDING + 4.0 * ADVANCE);
            assert_eq!(points[1].x, PADDING + 10.0 * ADVANCE);
        }
        _ => unreachable!(),
    }
}

#[test]
fn verb_width_excludes_trailing_period() {
    let cfg = config();
    let annotation = cfg.themes["default"].annotation.clone();
    let (ops, _) = render_source(&cfg, "Ego<nw:nom>  beatus<nw:nom_>  sum.<ww>");

    let underlines = polylines(&ops, &annotation);
    assert_eq!(underlines.len(), 1);
    match underlines[0] {
        DrawOp::Polyline { points, style, .. } => {
            assert!(style.dash.is_none(), "finite verbs underline solid");
            // "sum." starts after "Ego beatus " (11 chars) and measures as "sum".
            assert_eq!(points[0].x, PADDING + 11.0 * ADVANCE);
            assert_eq!(points[1].x, PADDING + 14.0 * ADVANCE);
        }
        _ => unreachable!(),
    }
}

#[test]
fn non_finite_verb_underlines_dashed() {
    let cfg = config();
    let annotation = cfg.themes["default"].annotation.clone();
    let (ops, _) = render_source(&cfg, "errare<ww:inf>");

    let underlines = polylines(&ops, &annotation);
    assert_eq!(underlines.len(), 1);
    match underlines[0] {
        DrawOp::Polyline { style, .. } => assert_eq!(style.dash, Some((8.0, 6.0))),
        _ => unreachable!(),
    }
}

#[test]
fn subject_verb_gets_an_extra_nominative_segment() {
    let cfg = config();
    let nom = cfg.themes["default"].nom.clone();
    let (ops, _) = render_source(&cfg, "venit<ww:pv*>");

    let segment = ops
        .iter()
        .find_map(|op| match op {
            DrawOp::FillRect { rect, color, .. } if *color == nom => Some(rect),
            _ => None,
        })
        .expect("expected a subject highlight segment");
    // max(width * 0.3, 13) plus highlight padding on both sides.
    assert_eq!(segment.width, 0.3 * 5.0 * ADVANCE + 2.0 * 2.0);
}

#[test]
fn cross_line_span_splits_into_two_segments() {
    let mut cfg = config();
    cfg.page.width = 160.0; // usable width: 14 chars
    let acc = cfg.themes["default"].acc.clone();
    let (ops, lines) = render_source(&cfg, "in silvam magnam<ovw:acc_>  it.<ww>");
    assert_eq!(lines, vec!["in silvam", "magnam it."]);

    let segments = polylines(&ops, &acc);
    assert_eq!(segments.len(), 2, "cross-line spans draw two segments");
    match (segments[0], segments[1]) {
        (
            DrawOp::Polyline { points: first, .. },
            DrawOp::Polyline { points: second, .. },
        ) => {
            // First segment covers "in silvam" from the span start to the right
            // edge of its line's text.
            assert_eq!(first[0].x, PADDING);
            assert_eq!(first[1].x, PADDING + 9.0 * ADVANCE);
            // Second segment runs from the left text edge to the end of "magnam".
            assert_eq!(second[0].x, PADDING);
            assert_eq!(second[1].x, PADDING + 6.0 * ADVANCE);
            assert!(second[0].y > first[0].y);
        }
        _ => unreachable!(),
    }
}

#[test]
fn same_line_cross_reference_is_one_curve() {
    let cfg = config();
    let acc = cfg.themes["default"].acc.clone();
    let (ops, _) = render_source(&cfg, "puella<nw:nom>  quam<nw:acc_>[-1]  amo<ww:pv>");

    let curves: Vec<_> = ops
        .iter()
        .filter(|op| matches!(op, DrawOp::QuadCurve { style, .. } if style.color == acc))
        .collect();
    assert_eq!(curves.len(), 1);
}

#[test]
fn cross_line_reference_splits_toward_facing_edges() {
    let cfg = config();
    let acc = cfg.themes["default"].acc.clone();
    // The paragraph break forces "quam" onto its own line.
    let (ops, lines) = render_source(&cfg, "puella<nw:nom>\n\nquam<nw:acc_>[-1]");
    assert_eq!(lines, vec!["puella", "quam"]);

    let curves: Vec<_> = ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::QuadCurve { from, to, style, .. } if style.color == acc => Some((from, to)),
            _ => None,
        })
        .collect();
    assert_eq!(curves.len(), 2, "cross-line references draw two curves");
    // Backward reference: first segment exits at the left text edge, second
    // re-enters from the right page edge.
    assert_eq!(curves[0].1.x, PADDING);
    assert_eq!(curves[1].1.x, 500.0 - PADDING);
}

#[test]
fn construction_close_mirrors_the_bracket() {
    let cfg = config();
    let (ops, _) = render_source(&cfg, "Marco<nw:abl_>  duce<con:ablabs.>  venit<ww:pv>");

    let bracket = ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Polyline { points, .. } if points.len() == 4 => Some(points),
            _ => None,
        })
        .expect("expected an ablative-absolute bracket");
    // A closing bracket opens to the right: the vertical bar sits right of the
    // path start.
    assert!(bracket[1].x > bracket[0].x);
}

#[test]
fn opening_construction_bracket_faces_left() {
    let cfg = config();
    let (ops, _) = render_source(&cfg, "Marco<con:ablabs>  duce<nw:abl_>");

    let bracket = ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Polyline { points, .. } if points.len() == 4 => Some(points),
            _ => None,
        })
        .expect("expected an ablative-absolute bracket");
    assert!(bracket[1].x < bracket[0].x);
}

#[test]
fn clause_marker_draws_ticks_and_label() {
    let cfg = config();
    let annotation = cfg.themes["default"].annotation.clone();
    let (ops, _) = render_source(&cfg, "(zin:||H1)  Ego<nw:nom>  sum.<ww>");

    let bars: Vec<_> = ops
        .iter()
        .filter(|op| {
            matches!(op, DrawOp::FillRect { rect, color, .. }
                if rect.width == 2.0 && *color == annotation)
        })
        .collect();
    assert_eq!(bars.len(), 2, "double tick draws two bars");

    let letter = ops.iter().any(
        |op| matches!(op, DrawOp::Text { text, font, .. } if text == "H" && font.size == 16.0),
    );
    assert!(letter, "clause letter rendered at 16px");
    let number = ops
        .iter()
        .any(|op| matches!(op, DrawOp::Text { text, .. } if text == "1"));
    assert!(number, "clause numeral rendered");
}

#[test]
fn note_only_word_renders_its_note() {
    let cfg = config();
    let (ops, lines) = render_source(&cfg, "Caesar{dux}  venit<ww:pv>");
    assert_eq!(lines, vec!["Caesar venit"]);

    let note = ops.iter().any(|op| {
        matches!(op, DrawOp::Text { text, align, .. }
            if text == "dux" && *align == TextAlign::Center)
    });
    assert!(note, "note rendered for a word without a grammar annotation");
}

#[test]
fn cross_reference_without_annotation_still_curves() {
    let cfg = config();
    let annotation = cfg.themes["default"].annotation.clone();
    let (ops, _) = render_source(&cfg, "puella<nw:nom>  eam[-1]");

    let curves = ops
        .iter()
        .filter(|op| matches!(op, DrawOp::QuadCurve { style, .. } if style.color == annotation))
        .count();
    assert_eq!(curves, 1);
}

#[test]
fn clause_numeral_requires_a_letter() {
    let cfg = config();
    let (ops, _) = render_source(&cfg, "(zin:|2)  Ego<nw:nom>  sum.<ww>");

    let numeral = ops
        .iter()
        .any(|op| matches!(op, DrawOp::Text { text, .. } if text == "2"));
    assert!(!numeral, "numeral only renders alongside a clause letter");
}

#[test]
fn top_notes_stack_upward() {
    let cfg = config();
    let (ops, _) = render_source(&cfg, "amat<ww>{ind pr/3e ev}");

    let note_y = |wanted: &str| {
        ops.iter()
            .find_map(|op| match op {
                DrawOp::Text { text, y, .. } if text == wanted => Some(*y),
                _ => None,
            })
            .expect("note line rendered")
    };
    // The first note line sits above the second.
    assert!(note_y("ind pr") < note_y("3e ev"));
}

#[test]
fn out_of_range_reference_is_a_hard_error() {
    let cfg = config();
    let source = "DICAM FILE\nv1.0.0\n\nquem<nw:acc_>[+5]";
    let document = parse(source).expect("source to parse");
    let renderer = Renderer::new(&cfg).expect("renderer to build");
    let mut surface = RecordingSurface::new();

    let err = renderer.render(&mut surface, &document).unwrap_err();
    assert_eq!(
        err,
        RenderError::OffsetNotFound {
            marking: 0,
            offset: 5
        }
    );
}

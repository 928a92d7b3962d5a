//! Draw-call generation for parsed documents.
//!
//! The geometry here mirrors the original diagramming conventions: head-function
//! phrases get a filled highlight box, everything else an underline; participles
//! add a dashed secondary underline; finite verbs get a solid underline and the
//! clause subject an extra highlight segment at the span's right end; clause
//! boundaries render as vertical ticks plus a letter/numeral label above the
//! line; constructions render as bracket curves mirrored by their open/close
//! orientation; cross-references render as quadratic curves between word
//! centers.

use crate::surface::{FontSpec, LineStyle, Point, Rect, Surface, TextAlign};
use dicam_config::{DicamConfig, ThemeConfig};
use dicam_layout::{resolve, wrap, LayoutError, Measure, Metrics, Position};
use dicam_parser::{
    BoundaryTick, Case, ClauseLetter, ConstructionKind, Marking, MarkingKind, ParsedDocument,
};
use std::fmt;

/// Errors from draw-call generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The configured theme name has no entry in the theme table.
    UnknownTheme(String),
    /// A marking's offset fell outside the wrapped text.
    OffsetNotFound { marking: usize, offset: usize },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::UnknownTheme(name) => write!(f, "unknown theme '{}'", name),
            RenderError::OffsetNotFound { marking, offset } => {
                write!(
                    f,
                    "marking {}: word offset {} not found in wrapped text",
                    marking, offset
                )
            }
        }
    }
}

impl std::error::Error for RenderError {}

/// Adapts a surface's font-parameterized measurement to the layout seam.
struct FontMeasure<'a, S: Surface + ?Sized> {
    surface: &'a S,
    font: &'a FontSpec,
}

impl<S: Surface + ?Sized> Measure for FontMeasure<'_, S> {
    fn width(&self, text: &str) -> f64 {
        self.surface.width(text, self.font)
    }
}

/// Walks a parsed document and emits draw calls onto a [`Surface`].
#[derive(Debug, Clone)]
pub struct Renderer {
    metrics: Metrics,
    body_font: FontSpec,
    note_font: FontSpec,
    highlight_padding: f64,
    theme: ThemeConfig,
}

impl Renderer {
    pub fn new(config: &DicamConfig) -> Result<Renderer, RenderError> {
        let theme = config
            .themes
            .get(&config.theme)
            .cloned()
            .ok_or_else(|| RenderError::UnknownTheme(config.theme.clone()))?;
        Ok(Renderer {
            metrics: Metrics {
                max_width: config.page.width,
                padding: config.page.padding,
                font_size: config.fonts.body.size,
                line_spacing: config.layout.line_spacing,
            },
            body_font: FontSpec::new(config.fonts.body.family.clone(), config.fonts.body.size),
            note_font: FontSpec::new(config.fonts.note.family.clone(), config.fonts.note.size),
            highlight_padding: config.layout.highlight_padding,
            theme,
        })
    }

    /// Canvas height needed for `line_count` wrapped lines.
    pub fn canvas_height(&self, line_count: usize) -> f64 {
        self.metrics.line_spacing
            + (self.metrics.font_size + self.metrics.line_spacing) * line_count as f64
    }

    /// Render a document: background, markings (clause boundaries last, so their
    /// ticks paint over phrase highlights), then the body text.
    ///
    /// Returns the wrapped lines the geometry was resolved against.
    pub fn render<S: Surface>(
        &self,
        surface: &mut S,
        document: &ParsedDocument,
    ) -> Result<Vec<String>, RenderError> {
        let lines = {
            let measure = FontMeasure {
                surface: &*surface,
                font: &self.body_font,
            };
            wrap(&document.text, &self.metrics, &measure)
        };

        surface.fill_rect(
            Rect {
                x: 0.0,
                y: 0.0,
                width: self.metrics.max_width,
                height: self.canvas_height(lines.len()),
            },
            0.0,
            &self.theme.background,
        );

        for clause_pass in [false, true] {
            for (index, marking) in document
                .markings
                .iter()
                .enumerate()
                .filter(|(_, m)| m.kind.is_clause() == clause_pass)
            {
                self.mark(surface, &lines, index, marking)?;
            }
        }

        for (line, text) in lines.iter().enumerate() {
            surface.fill_text(
                text,
                self.metrics.padding,
                self.metrics.baseline(line),
                &self.body_font,
                TextAlign::Left,
                &self.theme.text,
            );
        }

        Ok(lines)
    }

    fn resolve_span<S: Surface>(
        &self,
        surface: &S,
        lines: &[String],
        marking_index: usize,
        start: usize,
        end: Option<usize>,
    ) -> Result<Position, RenderError> {
        let measure = FontMeasure {
            surface,
            font: &self.body_font,
        };
        resolve(lines, &self.metrics, &measure, start, end).map_err(|err| match err {
            LayoutError::OffsetNotFound { offset } => RenderError::OffsetNotFound {
                marking: marking_index,
                offset,
            },
        })
    }

    fn mark<S: Surface>(
        &self,
        surface: &mut S,
        lines: &[String],
        index: usize,
        marking: &Marking,
    ) -> Result<(), RenderError> {
        let pos = self.resolve_span(&*surface, lines, index, marking.start, marking.end)?;

        if let Some(to) = marking.to {
            let to_pos = self.resolve_span(&*surface, lines, index, to, None)?;
            self.draw_cross_reference(surface, marking, pos, to_pos);
        }

        match marking.kind {
            MarkingKind::Clause {
                letter,
                number,
                tick,
            } => self.draw_clause(surface, pos, letter, number, tick),
            MarkingKind::NounPhrase {
                case,
                head_function,
                participle,
            } => {
                self.draw_phrase(
                    surface, lines, index, marking, pos, case, head_function, participle, false,
                )?;
            }
            MarkingKind::PrepPhrase {
                case,
                head_function,
                participle,
            } => {
                self.draw_phrase(
                    surface, lines, index, marking, pos, case, head_function, participle, true,
                )?;
            }
            MarkingKind::Verb { finite, subject } => {
                if subject {
                    let mark_width = (pos.width * 0.3).max(13.0);
                    surface.fill_rect(
                        Rect {
                            x: pos.x + pos.width - mark_width - self.highlight_padding,
                            y: pos.y + 2.0 - self.metrics.font_size,
                            width: mark_width + self.highlight_padding * 2.0,
                            height: self.metrics.font_size,
                        },
                        2.0,
                        &self.theme.nom,
                    );
                }
                self.draw_underline(surface, lines, index, marking, !finite, 0.0, &self.theme.annotation)?;
            }
            MarkingKind::Construction { kind, close } => {
                self.draw_construction(surface, pos, kind, close);
            }
            // Notes and the cross-reference curve are drawn for every marking;
            // a bare carrier has nothing else.
            MarkingKind::Note => {}
        }

        self.draw_notes(surface, pos, marking);
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_phrase<S: Surface>(
        &self,
        surface: &mut S,
        lines: &[String],
        index: usize,
        marking: &Marking,
        pos: Position,
        case: Case,
        head_function: bool,
        participle: bool,
        outlined: bool,
    ) -> Result<(), RenderError> {
        let case_color = self.case_color(case);

        if head_function {
            surface.fill_rect(
                Rect {
                    x: pos.x - self.highlight_padding,
                    y: pos.y + 2.0 - self.metrics.font_size,
                    width: pos.width + self.highlight_padding * 2.0,
                    height: self.metrics.font_size,
                },
                2.0,
                case_color,
            );
        } else {
            self.draw_underline(surface, lines, index, marking, false, 0.0, case_color)?;
        }

        if participle {
            self.draw_underline(surface, lines, index, marking, true, 2.0, &self.theme.annotation)?;
        }

        if outlined {
            surface.stroke_rect(
                Rect {
                    x: pos.x,
                    y: pos.y + 2.0 - self.metrics.font_size,
                    width: pos.width + 1.0,
                    height: self.metrics.font_size,
                },
                6.0,
                &LineStyle::solid(self.theme.annotation.clone()),
            );
        }

        Ok(())
    }

    /// Underline the marking's span. A span whose endpoints resolve to different
    /// lines splits into two segments: start point to the right edge of the
    /// start line's span, left text edge to the end point on the end line.
    fn draw_underline<S: Surface>(
        &self,
        surface: &mut S,
        lines: &[String],
        index: usize,
        marking: &Marking,
        dashed: bool,
        offset_y: f64,
        color: &str,
    ) -> Result<(), RenderError> {
        let start_pos = self.resolve_span(&*surface, lines, index, marking.start, marking.end)?;
        let end_pos = self.resolve_span(&*surface, lines, index, marking.span_end(), None)?;

        let style = if dashed {
            LineStyle::dashed(color)
        } else {
            LineStyle::solid(color)
        };
        let y = start_pos.y + 1.0 + offset_y;

        if start_pos.line == end_pos.line {
            surface.stroke_polyline(
                &[
                    Point::new(start_pos.x, y),
                    Point::new(end_pos.x + end_pos.width, y),
                ],
                &style,
            );
        } else {
            surface.stroke_polyline(
                &[
                    Point::new(start_pos.x, y),
                    Point::new(start_pos.x + start_pos.width, y),
                ],
                &style,
            );
            let end_y = end_pos.y + 1.0 + offset_y;
            surface.stroke_polyline(
                &[
                    Point::new(self.metrics.padding, end_y),
                    Point::new(end_pos.x + end_pos.width, end_y),
                ],
                &style,
            );
        }

        Ok(())
    }

    fn draw_clause<S: Surface>(
        &self,
        surface: &mut S,
        pos: Position,
        letter: Option<ClauseLetter>,
        number: Option<u32>,
        tick: Option<BoundaryTick>,
    ) {
        if let Some(tick) = tick {
            let bar = |x: f64| Rect {
                x,
                y: pos.y + 5.0 - (self.metrics.font_size + 15.0),
                width: 2.0,
                height: self.metrics.font_size + 15.0,
            };
            let x = pos.x - 2.0;
            surface.fill_rect(bar(x), 1.0, &self.theme.annotation);
            if tick == BoundaryTick::Double {
                surface.fill_rect(bar(x - 3.0), 1.0, &self.theme.annotation);
            }
        }

        // The numeral is a sub-label of the clause letter and never stands alone.
        if let Some(letter) = letter {
            let label_y = pos.y - self.metrics.font_size - 20.0;
            let letter_font = FontSpec::new(self.note_font.family.clone(), 16.0);
            surface.fill_text(
                letter.as_str(),
                pos.x + 2.0,
                label_y,
                &letter_font,
                TextAlign::Left,
                &self.theme.annotation,
            );
            if let Some(number) = number {
                surface.fill_text(
                    &number.to_string(),
                    pos.x + 12.0,
                    label_y,
                    &self.note_font,
                    TextAlign::Left,
                    &self.theme.annotation,
                );
            }
        }
    }

    fn draw_construction<S: Surface>(
        &self,
        surface: &mut S,
        pos: Position,
        kind: ConstructionKind,
        close: bool,
    ) {
        let mut start_x = pos.x;
        if kind == ConstructionKind::AblAbsolute {
            start_x += if close { -5.0 } else { 5.0 };
        }
        let mut middle_x = start_x - 7.0;
        if close {
            std::mem::swap(&mut start_x, &mut middle_x);
        }

        let start_y = pos.y + 5.0;
        let end_y = pos.y + 5.0 - self.metrics.font_size - 15.0;
        let middle_y = (start_y + end_y) / 2.0;
        let style = LineStyle::solid(self.theme.annotation.clone());

        match kind {
            ConstructionKind::AccInfinitive => {
                surface.stroke_quad(
                    Point::new(start_x, start_y),
                    Point::new(middle_x, middle_y),
                    Point::new(start_x, end_y),
                    &style,
                );
            }
            ConstructionKind::AblAbsolute => {
                surface.stroke_polyline(
                    &[
                        Point::new(start_x, start_y),
                        Point::new(middle_x, start_y),
                        Point::new(middle_x, end_y),
                        Point::new(start_x, end_y),
                    ],
                    &style,
                );
            }
        }
    }

    /// Connecting curve between a marking and its cross-reference target.
    /// Non-head phrases curve in their case color, everything else in the
    /// annotation ink. Same-line targets get one quadratic dip; targets on
    /// another line get two segments running off the facing page edges.
    fn draw_cross_reference<S: Surface>(
        &self,
        surface: &mut S,
        marking: &Marking,
        pos: Position,
        to_pos: Position,
    ) {
        let color = match marking.kind {
            MarkingKind::NounPhrase {
                case,
                head_function: false,
                ..
            }
            | MarkingKind::PrepPhrase {
                case,
                head_function: false,
                ..
            } => self.case_color(case).to_string(),
            _ => self.theme.annotation.clone(),
        };
        let style = LineStyle::solid(color);

        let start_x = pos.x + pos.width / 2.0;
        let start_y = pos.y + 2.0;
        let end_x = to_pos.x + to_pos.width / 2.0;
        let end_y = to_pos.y + 4.0;

        if pos.line == to_pos.line {
            surface.stroke_quad(
                Point::new(start_x, start_y),
                Point::new((start_x + end_x) / 2.0, pos.y + 20.0),
                Point::new(end_x, end_y),
                &style,
            );
            return;
        }

        // Target on an earlier line: exit left and re-enter right; later line,
        // the mirror image.
        let backward = pos.line > to_pos.line;

        let break_x = if backward {
            self.metrics.padding
        } else {
            self.metrics.max_width - self.metrics.padding
        };
        let break_y = pos.y + 25.0;
        let control_x = if backward {
            start_x - 20.0
        } else {
            start_x + 20.0
        };
        surface.stroke_quad(
            Point::new(start_x, start_y),
            Point::new(control_x, break_y),
            Point::new(break_x, break_y),
            &style,
        );

        let break_x = if backward {
            self.metrics.max_width - self.metrics.padding
        } else {
            self.metrics.padding
        };
        let break_y = to_pos.y + 25.0;
        let control_x = if backward { end_x + 20.0 } else { end_x - 20.0 };
        surface.stroke_quad(
            Point::new(end_x, end_y),
            Point::new(control_x, break_y),
            Point::new(break_x, break_y),
            &style,
        );
    }

    fn draw_notes<S: Surface>(&self, surface: &mut S, pos: Position, marking: &Marking) {
        let center_x = pos.x + pos.width / 2.0;

        if let Some(top) = &marking.top_note {
            // Bottom-up: the last note line sits closest to the word.
            for (i, line) in top.iter().rev().enumerate() {
                surface.fill_text(
                    line,
                    center_x,
                    pos.y - self.metrics.font_size - self.note_font.size * i as f64,
                    &self.note_font,
                    TextAlign::Center,
                    &self.theme.annotation,
                );
            }
        }

        if let Some(bottom) = &marking.bottom_note {
            for (i, line) in bottom.iter().enumerate() {
                surface.fill_text(
                    line,
                    center_x,
                    pos.y + 13.0 + self.note_font.size * i as f64,
                    &self.note_font,
                    TextAlign::Center,
                    &self.theme.annotation,
                );
            }
        }
    }

    fn case_color(&self, case: Case) -> &str {
        match case {
            Case::Nom => &self.theme.nom,
            Case::Gen => &self.theme.gen,
            Case::Dat => &self.theme.dat,
            Case::Acc => &self.theme.acc,
            Case::Abl => &self.theme.abl,
            Case::Voc => &self.theme.voc,
        }
    }
}

//! The drawing surface contract and the recording implementation.

use serde::Serialize;

/// A font description handed to the surface alongside text operations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontSpec {
    pub family: String,
    pub size: f64,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        FontSpec {
            family: family.into(),
            size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Stroke parameters: color, width, optional dash pattern. Caps and joins are
/// rounded on every surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<(f64, f64)>,
}

impl LineStyle {
    pub fn solid(color: impl Into<String>) -> Self {
        LineStyle {
            color: color.into(),
            width: 2.0,
            dash: None,
        }
    }

    pub fn dashed(color: impl Into<String>) -> Self {
        LineStyle {
            color: color.into(),
            width: 2.0,
            dash: Some((8.0, 6.0)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
}

/// The narrow contract the core draws through. Implemented externally by real
/// canvases; implemented here by [`RecordingSurface`].
pub trait Surface {
    /// Measured width of `text` in `font`.
    fn width(&self, text: &str, font: &FontSpec) -> f64;
    /// Filled rectangle with rounded corners.
    fn fill_rect(&mut self, rect: Rect, radius: f64, color: &str);
    /// Stroked rectangle outline with rounded corners.
    fn stroke_rect(&mut self, rect: Rect, radius: f64, style: &LineStyle);
    /// Stroked open polyline through the given points.
    fn stroke_polyline(&mut self, points: &[Point], style: &LineStyle);
    /// Stroked quadratic curve.
    fn stroke_quad(&mut self, from: Point, control: Point, to: Point, style: &LineStyle);
    /// A text run anchored at `(x, y)`.
    fn fill_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        font: &FontSpec,
        align: TextAlign,
        color: &str,
    );
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawOp {
    FillRect {
        rect: Rect,
        radius: f64,
        color: String,
    },
    StrokeRect {
        rect: Rect,
        radius: f64,
        style: LineStyle,
    },
    Polyline {
        points: Vec<Point>,
        style: LineStyle,
    },
    QuadCurve {
        from: Point,
        control: Point,
        to: Point,
        style: LineStyle,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        font: FontSpec,
        align: TextAlign,
        color: String,
    },
}

/// Records draw calls instead of painting, and measures text with a fixed
/// per-char advance proportional to the font size. The recorded op list is the
/// render plan the CLI serializes.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
    advance_ratio: f64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        RecordingSurface {
            ops: Vec::new(),
            advance_ratio: 0.5,
        }
    }

    /// Use a custom advance-to-font-size ratio.
    pub fn with_advance_ratio(advance_ratio: f64) -> Self {
        RecordingSurface {
            ops: Vec::new(),
            advance_ratio,
        }
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }
}

impl Surface for RecordingSurface {
    fn width(&self, text: &str, font: &FontSpec) -> f64 {
        text.chars().count() as f64 * font.size * self.advance_ratio
    }

    fn fill_rect(&mut self, rect: Rect, radius: f64, color: &str) {
        self.ops.push(DrawOp::FillRect {
            rect,
            radius,
            color: color.to_string(),
        });
    }

    fn stroke_rect(&mut self, rect: Rect, radius: f64, style: &LineStyle) {
        self.ops.push(DrawOp::StrokeRect {
            rect,
            radius,
            style: style.clone(),
        });
    }

    fn stroke_polyline(&mut self, points: &[Point], style: &LineStyle) {
        self.ops.push(DrawOp::Polyline {
            points: points.to_vec(),
            style: style.clone(),
        });
    }

    fn stroke_quad(&mut self, from: Point, control: Point, to: Point, style: &LineStyle) {
        self.ops.push(DrawOp::QuadCurve {
            from,
            control,
            to,
            style: style.clone(),
        });
    }

    fn fill_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        font: &FontSpec,
        align: TextAlign,
        color: &str,
    ) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            font: font.clone(),
            align,
            color: color.to_string(),
        });
    }
}

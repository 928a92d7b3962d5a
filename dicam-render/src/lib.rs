//! # dicam-render
//!
//! The rendering collaborator for dicam documents.
//!
//! The core pipeline never performs pixel output itself. This crate defines the
//! narrow contract it draws through, the [`Surface`] trait (text-width
//! measurement parameterized by a font, plus primitive draw calls), and a
//! [`Renderer`] that walks `(Marking, Position)` pairs and the wrapped line list,
//! emitting underlines, highlight boxes, connecting curves, boundary ticks,
//! brackets and margin notes onto whatever surface the caller brings.
//!
//! [`RecordingSurface`] is the built-in surface: it records every draw call as a
//! serializable [`DrawOp`] and measures text with a fixed per-char advance. The
//! CLI serializes its op list as the per-document render plan, and the tests
//! assert against it.
//!
//! Cross-line policy: when a span's two endpoints resolve to different display
//! lines, the renderer draws two independent segments (start point to the right
//! edge of the start line's span, left text edge of the end line to the end
//! point) instead of one continuous shape. Connecting curves likewise split into
//! two curve segments running off the facing page edges, with direction chosen
//! by comparing line indices and word offsets.

pub mod renderer;
pub mod surface;

pub use renderer::{RenderError, Renderer};
pub use surface::{
    DrawOp, FontSpec, LineStyle, Point, RecordingSurface, Rect, Surface, TextAlign,
};

//! Visual primitives shared by the SVG exporter.
//!
//! - [`layer`]: z-ordered grouping of SVG nodes ([`RenderLayer`], [`LayeredOutput`])
//! - [`stroke`]: line styling ([`StrokeDefinition`]) and the
//!   [`apply_stroke!`](crate::apply_stroke!) macro

mod layer;
mod stroke;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use stroke::{StrokeCap, StrokeDefinition, StrokeStyle};

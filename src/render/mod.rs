mod frame;
mod null_renderer;
mod primitives;
mod svg_renderer;

pub use crate::core::PathCommand;
pub use frame::{FrameLayer, LayerPrimitives, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, CornerRadii, Fill, FontWeight, GradientStop, LinePrimitive,
    LineStrokeStyle, PathPrimitive, PathStroke, RectPrimitive, TextHAlign, TextPrimitive,
    TextVAlign, WedgePrimitive,
};
pub use svg_renderer::SvgRenderer;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from chart data and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};

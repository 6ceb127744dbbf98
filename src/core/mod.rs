pub mod curve;
pub mod format;
pub mod pie;
pub mod scale;
pub mod text;
pub mod ticks;
pub mod types;

pub use curve::{PathCommand, close_to_baseline, monotone_x_path};
pub use pie::{PieFrame, PieSliceGeometry, layout_pie, slice_at, slice_label_position};
pub use scale::{BandScale, LinearScale, LogScale, PixelRange, PointScale};
pub use ticks::{DecadeTicks, LinearTicks, decade_ticks, nice_linear_ticks};
pub use types::{Margins, PixelRect, Point, Viewport, resolve_plot_area};

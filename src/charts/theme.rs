use crate::render::Color;

/// Shared dark palette for chart chrome. Series colors live with each
/// chart's dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartTheme {
    pub background: Color,
    pub grid_line: Color,
    pub axis_line: Color,
    pub axis_text: Color,
    pub caption_text: Color,
    pub legend_text: Color,
    pub tooltip_background: Color,
    pub tooltip_shadow: Color,
    pub tooltip_text: Color,
    pub tooltip_detail_text: Color,
    pub tooltip_accent: Color,
    pub cursor_fill: Color,
    pub brand: Color,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: Color::rgb8(0x11, 0x11, 0x11),
            grid_line: Color::rgb8(0x33, 0x33, 0x33),
            axis_line: Color::rgb8(0x88, 0x88, 0x88),
            axis_text: Color::rgb8(0x88, 0x88, 0x88),
            caption_text: Color::rgb8(0x88, 0x88, 0x88),
            legend_text: Color::rgb8(0xcc, 0xcc, 0xcc),
            tooltip_background: Color::rgb8(0x1a, 0x1a, 0x1a),
            tooltip_shadow: Color::rgba(0.0, 0.0, 0.0, 0.3),
            tooltip_text: Color::WHITE,
            tooltip_detail_text: Color::rgb8(0xcc, 0xcc, 0xcc),
            tooltip_accent: Color::rgb8(0x07, 0xb2, 0xc9),
            cursor_fill: Color::rgba(0.8, 0.8, 0.8, 0.12),
            brand: Color::rgb8(0x0d, 0x6b, 0x93),
        }
    }
}

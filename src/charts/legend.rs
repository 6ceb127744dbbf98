use crate::core::text::estimate_text_width_px;
use crate::render::{
    Color, CornerRadii, FrameLayer, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign,
    TextPrimitive,
};

const ICON_SIZE_PX: f64 = 14.0;
const ICON_GAP_PX: f64 = 4.0;
const ITEM_GAP_PX: f64 = 10.0;
const FONT_SIZE_PX: f64 = 14.0;

/// Padding between the axis band and an inline legend row.
pub const INLINE_LEGEND_PADDING_TOP_PX: f64 = 20.0;
/// Total band height reserved for a single inline legend row.
pub const INLINE_LEGEND_HEIGHT_PX: f64 = INLINE_LEGEND_PADDING_TOP_PX + 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendIcon {
    Rect,
    Line,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
    pub icon: LegendIcon,
}

impl LegendEntry {
    #[must_use]
    pub fn new(label: impl Into<String>, color: Color, icon: LegendIcon) -> Self {
        Self {
            label: label.into(),
            color,
            icon,
        }
    }
}

fn entry_width(entry: &LegendEntry) -> f64 {
    ICON_SIZE_PX + ICON_GAP_PX + estimate_text_width_px(&entry.label, FONT_SIZE_PX)
}

/// Single centered row of entries; label text takes the entry color.
pub fn push_inline_legend(
    frame: &mut RenderFrame,
    entries: &[LegendEntry],
    center_x: f64,
    center_y: f64,
) {
    if entries.is_empty() {
        return;
    }
    let total: f64 = entries.iter().map(entry_width).sum::<f64>()
        + ITEM_GAP_PX * (entries.len() - 1) as f64;
    let mut x = center_x - total * 0.5;

    for entry in entries {
        match entry.icon {
            LegendIcon::Rect => frame.push_rect(
                FrameLayer::Labels,
                RectPrimitive::new(
                    x,
                    center_y - ICON_SIZE_PX * 0.5,
                    ICON_SIZE_PX,
                    ICON_SIZE_PX,
                    entry.color,
                ),
            ),
            LegendIcon::Line => frame.push_line(
                FrameLayer::Labels,
                LinePrimitive::new(x, center_y, x + ICON_SIZE_PX, center_y, 4.0, entry.color),
            ),
        }
        frame.push_text(
            FrameLayer::Labels,
            TextPrimitive::new(
                entry.label.clone(),
                x + ICON_SIZE_PX + ICON_GAP_PX,
                center_y,
                FONT_SIZE_PX,
                entry.color,
                TextHAlign::Left,
            ),
        );
        x += entry_width(entry) + ITEM_GAP_PX;
    }
}

/// Layout of a vertical swatch list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwatchListStyle {
    pub swatch_size_px: f64,
    pub swatch_radius_px: f64,
    pub row_gap_px: f64,
    pub text_gap_px: f64,
    pub font_size_px: f64,
    pub text_color: Color,
}

impl SwatchListStyle {
    #[must_use]
    pub fn height(self, rows: usize) -> f64 {
        if rows == 0 {
            return 0.0;
        }
        self.swatch_size_px * rows as f64 + self.row_gap_px * (rows - 1) as f64
    }

    #[must_use]
    pub fn width(self, entries: &[LegendEntry]) -> f64 {
        entries
            .iter()
            .map(|entry| {
                self.swatch_size_px
                    + self.text_gap_px
                    + estimate_text_width_px(&entry.label, self.font_size_px)
            })
            .fold(0.0, f64::max)
    }
}

/// Vertical list of rounded swatches with labels, left edge at `left`.
pub fn push_swatch_list(
    frame: &mut RenderFrame,
    entries: &[LegendEntry],
    left: f64,
    top: f64,
    style: SwatchListStyle,
) {
    let mut y = top;
    for entry in entries {
        frame.push_rect(
            FrameLayer::Labels,
            RectPrimitive::new(
                left,
                y,
                style.swatch_size_px,
                style.swatch_size_px,
                entry.color,
            )
            .with_corner_radii(CornerRadii::uniform(style.swatch_radius_px)),
        );
        frame.push_text(
            FrameLayer::Labels,
            TextPrimitive::new(
                entry.label.clone(),
                left + style.swatch_size_px + style.text_gap_px,
                y + style.swatch_size_px * 0.5,
                style.font_size_px,
                style.text_color,
                TextHAlign::Left,
            ),
        );
        y += style.swatch_size_px + style.row_gap_px;
    }
}

#[cfg(test)]
mod tests {
    use super::{
        LegendEntry, LegendIcon, SwatchListStyle, push_inline_legend, push_swatch_list,
    };
    use crate::core::Viewport;
    use crate::render::{Color, FrameLayer, RenderFrame};

    #[test]
    fn inline_legend_is_centered() {
        let mut frame = RenderFrame::new(Viewport::new(400, 100), Color::BLACK);
        let entries = [LegendEntry::new("Minimum Stake Required", Color::WHITE, LegendIcon::Rect)];
        push_inline_legend(&mut frame, &entries, 200.0, 50.0);
        let layer = frame.layer(FrameLayer::Labels);
        let icon_left = layer.rects[0].x;
        let text = &layer.texts[0];
        assert!(icon_left < 200.0);
        assert!(text.x > icon_left);
    }

    #[test]
    fn swatch_list_stacks_rows() {
        let style = SwatchListStyle {
            swatch_size_px: 16.0,
            swatch_radius_px: 3.0,
            row_gap_px: 8.0,
            text_gap_px: 8.0,
            font_size_px: 13.0,
            text_color: Color::WHITE,
        };
        assert_eq!(style.height(4), 88.0);
        let entries = [
            LegendEntry::new("a", Color::WHITE, LegendIcon::Rect),
            LegendEntry::new("b", Color::WHITE, LegendIcon::Rect),
        ];
        let mut frame = RenderFrame::new(Viewport::new(400, 100), Color::BLACK);
        push_swatch_list(&mut frame, &entries, 10.0, 20.0, style);
        let rects = &frame.layer(FrameLayer::Labels).rects;
        assert_eq!(rects[1].y - rects[0].y, 24.0);
    }
}

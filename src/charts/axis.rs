use crate::charts::ChartTheme;
use crate::charts::legend::INLINE_LEGEND_PADDING_TOP_PX;
use crate::core::{Margins, PixelRect, Viewport, resolve_plot_area};
use crate::error::ChartResult;
use crate::render::{
    FontWeight, FrameLayer, LinePrimitive, LineStrokeStyle, RenderFrame, TextHAlign,
    TextPrimitive, TextVAlign,
};

const TICK_MARK_PX: f64 = 6.0;
const TICK_LABEL_GAP_PX: f64 = 2.0;
const GRID_DASH: LineStrokeStyle = LineStrokeStyle::Dashed {
    dash_px: 3.0,
    gap_px: 3.0,
};

/// Container geometry of a cartesian chart: outer margins, axis bands and the
/// inline legend band under the category axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartesianLayout {
    pub container_height: f64,
    pub margins: Margins,
    pub y_axis_width: f64,
    pub x_axis_height: f64,
    pub legend_height: f64,
}

impl CartesianLayout {
    /// Plot rectangle for a container whose top edge sits at `top`.
    pub fn plot_area(self, viewport: Viewport, top: f64) -> ChartResult<PixelRect> {
        let margins = Margins {
            bottom: self.margins.bottom + self.legend_height,
            ..self.margins
        };
        let mut area = resolve_plot_area(
            viewport,
            self.container_height,
            margins,
            self.y_axis_width,
            self.x_axis_height,
        )?;
        area.y += top;
        Ok(area)
    }

    /// Vertical center of the legend row.
    #[must_use]
    pub fn legend_center_y(self, top: f64) -> f64 {
        let legend_top = top + self.container_height - self.margins.bottom - self.legend_height;
        legend_top
            + INLINE_LEGEND_PADDING_TOP_PX
            + (self.legend_height - INLINE_LEGEND_PADDING_TOP_PX) * 0.5
    }
}

/// One labelled position on an axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub pixel: f64,
    pub label: String,
}

/// Dashed background grid.
pub fn push_grid(
    frame: &mut RenderFrame,
    plot: PixelRect,
    horizontal_pixels: &[f64],
    vertical_pixels: &[f64],
    theme: &ChartTheme,
) {
    for y in horizontal_pixels {
        frame.push_line(
            FrameLayer::Grid,
            LinePrimitive::new(plot.x, *y, plot.right(), *y, 1.0, theme.grid_line)
                .with_stroke_style(GRID_DASH),
        );
    }
    for x in vertical_pixels {
        frame.push_line(
            FrameLayer::Grid,
            LinePrimitive::new(*x, plot.y, *x, plot.bottom(), 1.0, theme.grid_line)
                .with_stroke_style(GRID_DASH),
        );
    }
}

/// Vertical value axis on the left edge of `plot` with an optional rotated
/// title inside the axis band.
pub fn push_value_axis(
    frame: &mut RenderFrame,
    plot: PixelRect,
    ticks: &[AxisTick],
    font_size_px: f64,
    title: Option<(&str, f64)>,
    theme: &ChartTheme,
) {
    frame.push_line(
        FrameLayer::Labels,
        LinePrimitive::new(plot.x, plot.y, plot.x, plot.bottom(), 1.0, theme.axis_line),
    );
    for tick in ticks {
        frame.push_line(
            FrameLayer::Labels,
            LinePrimitive::new(
                plot.x - TICK_MARK_PX,
                tick.pixel,
                plot.x,
                tick.pixel,
                1.0,
                theme.axis_line,
            ),
        );
        frame.push_text(
            FrameLayer::Labels,
            TextPrimitive::new(
                tick.label.clone(),
                plot.x - TICK_MARK_PX - TICK_LABEL_GAP_PX,
                tick.pixel,
                font_size_px,
                theme.axis_text,
                TextHAlign::Right,
            ),
        );
    }
    if let Some((title, band_left)) = title {
        frame.push_text(
            FrameLayer::Labels,
            TextPrimitive::new(
                title,
                band_left + 5.0,
                plot.y + plot.height * 0.5,
                font_size_px,
                theme.axis_text,
                TextHAlign::Center,
            )
            .with_v_align(TextVAlign::Top)
            .rotated(-90.0),
        );
    }
}

/// Label styling for a category axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryLabelStyle {
    pub font_size_px: f64,
    pub weight: FontWeight,
    /// Rotation in degrees; rotated labels are end-anchored at their tick.
    pub rotation_deg: f64,
}

/// Horizontal category axis along the bottom edge of `plot`.
pub fn push_category_axis(
    frame: &mut RenderFrame,
    plot: PixelRect,
    ticks: &[AxisTick],
    style: CategoryLabelStyle,
    theme: &ChartTheme,
) {
    let baseline = plot.bottom();
    frame.push_line(
        FrameLayer::Labels,
        LinePrimitive::new(plot.x, baseline, plot.right(), baseline, 1.0, theme.axis_line),
    );
    for tick in ticks {
        frame.push_line(
            FrameLayer::Labels,
            LinePrimitive::new(
                tick.pixel,
                baseline,
                tick.pixel,
                baseline + TICK_MARK_PX,
                1.0,
                theme.axis_line,
            ),
        );
        let label_y = baseline + TICK_MARK_PX + TICK_LABEL_GAP_PX;
        let text = if style.rotation_deg != 0.0 {
            TextPrimitive::new(
                tick.label.clone(),
                tick.pixel,
                label_y,
                style.font_size_px,
                theme.axis_text,
                TextHAlign::Right,
            )
            .with_v_align(TextVAlign::Top)
            .rotated(style.rotation_deg)
        } else {
            TextPrimitive::new(
                tick.label.clone(),
                tick.pixel,
                label_y,
                style.font_size_px,
                theme.axis_text,
                TextHAlign::Center,
            )
            .with_v_align(TextVAlign::Top)
        };
        frame.push_text(FrameLayer::Labels, text.with_weight(style.weight));
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisTick, CartesianLayout, push_grid, push_value_axis};
    use crate::charts::ChartTheme;
    use crate::core::{Margins, PixelRect, Viewport};
    use crate::render::{Color, FrameLayer, RenderFrame};

    #[test]
    fn layout_offsets_plot_by_container_top() {
        let layout = CartesianLayout {
            container_height: 400.0,
            margins: Margins::new(20.0, 30.0, 20.0, 0.0),
            y_axis_width: 60.0,
            x_axis_height: 30.0,
            legend_height: 44.0,
        };
        let plot = layout.plot_area(Viewport::new(800, 500), 58.0).expect("plot");
        assert_eq!(plot, PixelRect::new(60.0, 78.0, 710.0, 286.0));
        assert!(layout.legend_center_y(58.0) > plot.bottom());
    }

    #[test]
    fn grid_and_axis_emit_expected_primitives() {
        let plot = PixelRect::new(60.0, 20.0, 700.0, 300.0);
        let theme = ChartTheme::default();
        let mut frame = RenderFrame::new(Viewport::new(800, 400), Color::BLACK);
        push_grid(&mut frame, plot, &[20.0, 170.0, 320.0], &[100.0], &theme);
        assert_eq!(frame.layer(FrameLayer::Grid).lines.len(), 4);

        let ticks = vec![
            AxisTick {
                pixel: 320.0,
                label: "0".to_owned(),
            },
            AxisTick {
                pixel: 20.0,
                label: "1k".to_owned(),
            },
        ];
        push_value_axis(&mut frame, plot, &ticks, 12.0, Some(("Title", 0.0)), &theme);
        let labels = frame.layer(FrameLayer::Labels);
        assert_eq!(labels.texts.len(), 3);
        assert_eq!(labels.texts[2].rotation_deg, -90.0);
    }
}

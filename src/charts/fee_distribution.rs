use serde::Serialize;
use tracing::{debug, trace};

use crate::charts::legend::{LegendEntry, LegendIcon, SwatchListStyle, push_swatch_list};
use crate::charts::tooltip::{TooltipContent, TooltipLine};
use crate::charts::{Chart, ChartKind, ChartTheme, caption_height, push_caption, push_tooltip, resolve_hover};
use crate::core::format::format_share_percent;
use crate::core::{
    PieFrame, PieSliceGeometry, Point, Viewport, layout_pie, slice_at, slice_label_position,
};
use crate::error::ChartResult;
use crate::interaction::HoverTarget;
use crate::render::{
    Color, FontWeight, FrameLayer, RenderFrame, TextHAlign, TextPrimitive, TextVAlign,
    WedgePrimitive,
};

const CONTAINER_HEIGHT_PX: f64 = 450.0;
const CENTER_Y_RATIO: f64 = 0.45;
const OUTER_RADIUS_PX: f64 = 140.0;
const INNER_RADIUS_PX: f64 = 0.0;
const LABEL_FONT_SIZE_PX: f64 = 14.0;
const LABEL_SHADOW_OFFSET_PX: f64 = 1.0;
const LABEL_SHADOW: Color = Color::rgba(0.0, 0.0, 0.0, 0.8);
const LEGEND_MARGIN_BOTTOM_PX: f64 = 5.0;
const TOOLTIP_MAX_WIDTH_PX: f64 = 280.0;

const CAPTION: &str = "Transaction fee distribution: 70% to BaseFeeVault (35% burned + 35% to stakers), \
20% to sequencer operations, 10% for Base L2 data availability costs.";

/// One wedge of the fee split. `value` is a percentage of all fees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeSlice {
    pub name: &'static str,
    pub value: u32,
    pub description: &'static str,
    pub color: &'static str,
}

impl FeeSlice {
    pub fn color(&self) -> ChartResult<Color> {
        Color::from_hex(self.color)
    }
}

#[must_use]
pub fn fee_slices() -> Vec<FeeSlice> {
    vec![
        FeeSlice {
            name: "BaseFeeVault (Burned)",
            value: 35,
            description: "50% of 70% base fee - permanently burned",
            color: "#8B0000",
        },
        FeeSlice {
            name: "BaseFeeVault (Stakers)",
            value: 35,
            description: "50% of 70% base fee - distributed to stakers",
            color: "#0D6B93",
        },
        FeeSlice {
            name: "SequencerFeeVault",
            value: 20,
            description: "Sequencer operations and infrastructure",
            color: "#07B2C9",
        },
        FeeSlice {
            name: "L1FeeVault",
            value: 10,
            description: "Base L2 data availability costs",
            color: "#1BACCD",
        },
    ]
}

/// Percentage label placed inside a slice.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceLabel {
    pub text: String,
    pub position: Point,
    pub h_align: TextHAlign,
}

/// Pie of how transaction fees are split between vaults.
#[derive(Debug, Clone)]
pub struct FeeDistributionChart {
    slices: Vec<FeeSlice>,
    theme: ChartTheme,
}

impl Default for FeeDistributionChart {
    fn default() -> Self {
        Self::new()
    }
}

impl FeeDistributionChart {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slices: fee_slices(),
            theme: ChartTheme::default(),
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn slices(&self) -> &[FeeSlice] {
        &self.slices
    }

    /// Sum of all slice percentages.
    #[must_use]
    pub fn total_share(&self) -> u32 {
        self.slices.iter().map(|slice| slice.value).sum()
    }

    fn pie_frame(viewport: Viewport) -> PieFrame {
        PieFrame {
            center: Point::new(
                f64::from(viewport.width) * 0.5,
                CONTAINER_HEIGHT_PX * CENTER_Y_RATIO,
            ),
            inner_radius: INNER_RADIUS_PX,
            outer_radius: OUTER_RADIUS_PX,
            start_angle: 0.0,
            end_angle: 360.0,
        }
    }

    pub fn slice_geometries(&self, viewport: Viewport) -> ChartResult<Vec<PieSliceGeometry>> {
        let viewport = viewport.ensure_valid()?;
        let values: Vec<f64> = self
            .slices
            .iter()
            .map(|slice| f64::from(slice.value))
            .collect();
        layout_pie(Self::pie_frame(viewport), &values)
    }

    /// In-slice percentage labels at each slice's mid angle and half radius.
    pub fn slice_labels(&self, viewport: Viewport) -> ChartResult<Vec<SliceLabel>> {
        let center = Self::pie_frame(viewport).center;
        let labels = self
            .slice_geometries(viewport)?
            .into_iter()
            .map(|geometry| {
                let position = slice_label_position(center, geometry);
                SliceLabel {
                    text: format_share_percent(geometry.percent),
                    position,
                    h_align: if position.x > center.x {
                        TextHAlign::Left
                    } else {
                        TextHAlign::Right
                    },
                }
            })
            .collect();
        Ok(labels)
    }

    fn legend_entries(&self) -> ChartResult<Vec<LegendEntry>> {
        self.slices
            .iter()
            .map(|slice| Ok(LegendEntry::new(slice.name, slice.color()?, LegendIcon::Rect)))
            .collect()
    }

    fn legend_style(&self) -> SwatchListStyle {
        SwatchListStyle {
            swatch_size_px: 16.0,
            swatch_radius_px: 3.0,
            row_gap_px: 8.0,
            text_gap_px: 8.0,
            font_size_px: 13.0,
            text_color: self.theme.legend_text,
        }
    }

    /// Tooltip for one slice: name, share and description.
    #[must_use]
    pub fn slice_tooltip(&self, index: usize) -> Option<TooltipContent> {
        let slice = self.slices.get(index)?;
        let color = slice.color().ok()?;
        Some(
            TooltipContent::new(color, 2.0)
                .with_max_width(TOOLTIP_MAX_WIDTH_PX)
                .with_line(TooltipLine::title(slice.name, color, 14.0))
                .with_line(TooltipLine::field(
                    "Share: ",
                    format!("{}%", slice.value),
                    self.theme.tooltip_text,
                ))
                .with_line(TooltipLine::detail(
                    slice.description,
                    self.theme.tooltip_detail_text,
                )),
        )
    }
}

impl Chart for FeeDistributionChart {
    fn kind(&self) -> ChartKind {
        ChartKind::FeeDistribution
    }

    fn caption(&self) -> &'static str {
        CAPTION
    }

    fn preferred_viewport(&self, width: u32) -> Viewport {
        let height = CONTAINER_HEIGHT_PX + caption_height(CAPTION, width);
        Viewport::new(width, height.ceil() as u32)
    }

    fn hover_target(&self, viewport: Viewport, pointer: Point) -> ChartResult<Option<HoverTarget>> {
        let center = Self::pie_frame(viewport).center;
        let slices = self.slice_geometries(viewport)?;
        let target = slice_at(center, &slices, pointer).map(HoverTarget::Slice);
        trace!(?target, x = pointer.x, y = pointer.y, "fee pie hover");
        Ok(target)
    }

    fn tooltip(&self, target: Option<HoverTarget>) -> Option<TooltipContent> {
        match target? {
            HoverTarget::Slice(index) => self.slice_tooltip(index),
            _ => None,
        }
    }

    fn build_render_frame(
        &self,
        viewport: Viewport,
        pointer: Option<Point>,
    ) -> ChartResult<RenderFrame> {
        let viewport = viewport.ensure_valid()?;
        let mut frame = RenderFrame::new(viewport, self.theme.background);
        let pie = Self::pie_frame(viewport);

        for (slice, geometry) in self.slices.iter().zip(self.slice_geometries(viewport)?) {
            frame.push_wedge(
                FrameLayer::Series,
                WedgePrimitive {
                    center: pie.center,
                    inner_radius: geometry.inner_radius,
                    outer_radius: geometry.outer_radius,
                    start_angle: geometry.start_angle,
                    end_angle: geometry.end_angle,
                    fill_color: slice.color()?,
                    stroke_width: 1.0,
                    stroke_color: Color::WHITE,
                },
            );
        }

        for label in self.slice_labels(viewport)? {
            // Drop shadow first so it paints under the label.
            for (offset, color) in [(LABEL_SHADOW_OFFSET_PX, LABEL_SHADOW), (0.0, Color::WHITE)] {
                frame.push_text(
                    FrameLayer::Labels,
                    TextPrimitive::new(
                        label.text.clone(),
                        label.position.x + offset,
                        label.position.y + offset,
                        LABEL_FONT_SIZE_PX,
                        color,
                        label.h_align,
                    )
                    .with_v_align(TextVAlign::Middle)
                    .with_weight(FontWeight::Bold),
                );
            }
        }

        let entries = self.legend_entries()?;
        let style = self.legend_style();
        let legend_top = CONTAINER_HEIGHT_PX - LEGEND_MARGIN_BOTTOM_PX - style.height(entries.len());
        let legend_left = pie.center.x - style.width(&entries) * 0.5;
        push_swatch_list(&mut frame, &entries, legend_left, legend_top, style);

        push_caption(&mut frame, CAPTION, CONTAINER_HEIGHT_PX, &self.theme);

        let target = resolve_hover(self, viewport, pointer)?;
        push_tooltip(self, &mut frame, pointer, target, &self.theme);

        debug!(
            primitives = frame.primitive_count(),
            hovered = ?target,
            "built fee distribution frame"
        );
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::{FeeDistributionChart, LABEL_SHADOW};
    use crate::charts::Chart;
    use crate::core::{Point, Viewport};
    use crate::interaction::HoverTarget;
    use crate::render::{Color, FrameLayer, TextHAlign};

    #[test]
    fn shares_sum_to_one_hundred() {
        assert_eq!(FeeDistributionChart::new().total_share(), 100);
    }

    #[test]
    fn labels_are_whole_percentages() {
        let chart = FeeDistributionChart::new();
        let labels = chart.slice_labels(Viewport::new(800, 560)).expect("labels");
        let texts: Vec<&str> = labels.iter().map(|label| label.text.as_str()).collect();
        assert_eq!(texts, vec!["35%", "35%", "20%", "10%"]);
    }

    #[test]
    fn first_label_sits_right_of_center() {
        let chart = FeeDistributionChart::new();
        let labels = chart.slice_labels(Viewport::new(800, 560)).expect("labels");
        // First slice spans 0..126 degrees, so its mid angle (63) is right of center.
        assert_eq!(labels[0].h_align, TextHAlign::Left);
        assert_eq!(labels[1].h_align, TextHAlign::Right);
    }

    #[test]
    fn labels_carry_an_offset_shadow() {
        let chart = FeeDistributionChart::new();
        let viewport = Viewport::new(800, 560);
        let frame = chart.build_render_frame(viewport, None).expect("frame");
        let labels = chart.slice_labels(viewport).expect("labels");
        let texts = &frame.layer(FrameLayer::Labels).texts;
        for (pair, label) in texts.chunks(2).zip(&labels) {
            let (shadow, text) = (&pair[0], &pair[1]);
            assert_eq!(shadow.text, label.text);
            assert_eq!(text.text, label.text);
            assert_eq!(shadow.color, LABEL_SHADOW);
            assert_eq!(text.color, Color::WHITE);
            assert_eq!(shadow.x, label.position.x + 1.0);
            assert_eq!(shadow.y, label.position.y + 1.0);
            assert_eq!(text.x, label.position.x);
        }
    }

    #[test]
    fn tooltip_lists_name_share_and_description() {
        let chart = FeeDistributionChart::new();
        let tooltip = chart.tooltip(Some(HoverTarget::Slice(2))).expect("tooltip");
        assert_eq!(
            tooltip.texts(),
            vec![
                "SequencerFeeVault",
                "Share: 20%",
                "Sequencer operations and infrastructure"
            ]
        );
        assert!(chart.tooltip(None).is_none());
        assert!(chart.tooltip(Some(HoverTarget::Slice(9))).is_none());
    }

    #[test]
    fn hover_outside_pie_has_no_target() {
        let chart = FeeDistributionChart::new();
        let viewport = Viewport::new(800, 560);
        let target = chart
            .hover_target(viewport, Point::new(5.0, 5.0))
            .expect("hover");
        assert_eq!(target, None);
        let inside = chart
            .hover_target(viewport, Point::new(450.0, 180.0))
            .expect("hover");
        assert_eq!(inside, Some(HoverTarget::Slice(0)));
    }
}

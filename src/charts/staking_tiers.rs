use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::charts::axis::{
    AxisTick, CartesianLayout, CategoryLabelStyle, push_category_axis, push_grid, push_value_axis,
};
use crate::charts::legend::{
    INLINE_LEGEND_HEIGHT_PX, LegendEntry, LegendIcon, push_inline_legend,
};
use crate::charts::tooltip::{TooltipContent, TooltipLine};
use crate::charts::{Chart, ChartKind, ChartTheme, caption_height, push_caption, push_tooltip, resolve_hover};
use crate::core::format::{format_grouped_integer, format_plain_number, format_thousands_tick};
use crate::core::{
    BandScale, LinearScale, Margins, PixelRange, PixelRect, Point, Viewport, nice_linear_ticks,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::HoverTarget;
use crate::render::{Color, CornerRadii, FontWeight, FrameLayer, RectPrimitive, RenderFrame};

/// Raw task limit that stands for "no limit" in published tier tables.
pub const UNLIMITED_TASKS_SENTINEL: u32 = 999;

const LAYOUT: CartesianLayout = CartesianLayout {
    container_height: 400.0,
    margins: Margins::new(20.0, 30.0, 20.0, 0.0),
    y_axis_width: 60.0,
    x_axis_height: 30.0,
    legend_height: INLINE_LEGEND_HEIGHT_PX,
};
const BAR_PADDING_RATIO: f64 = 0.2;
const BAR_CORNER_RADIUS_PX: f64 = 8.0;
const TARGET_TICK_COUNT: usize = 5;
const TOOLTIP_MIN_WIDTH_PX: f64 = 200.0;

const TIER_COLORS: [Color; 4] = [
    Color::rgb8(0x0d, 0x6b, 0x93),
    Color::rgb8(0x0d, 0x7f, 0xa5),
    Color::rgb8(0x0d, 0x93, 0xb7),
    Color::rgb8(0x07, 0xb2, 0xc9),
];

const CAPTION: &str = "Four staking tiers with increasing benefits: Starter (1k NZT) to Elite (50k NZT). \
Higher tiers unlock more tasks, better APY, and reputation multipliers.";

/// Daily task allowance of a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskLimit {
    Limited(u32),
    Unlimited,
}

impl TaskLimit {
    /// Maps the published raw value, where the sentinel means unlimited.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        if raw == UNLIMITED_TASKS_SENTINEL {
            Self::Unlimited
        } else {
            Self::Limited(raw)
        }
    }
}

impl fmt::Display for TaskLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limited(tasks) => write!(f, "{tasks}"),
            Self::Unlimited => f.write_str("Unlimited"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StakingTier {
    pub tier: &'static str,
    pub min_stake: u64,
    pub max_tasks: TaskLimit,
    pub apy_min: u32,
    pub apy_max: u32,
    pub multiplier: f64,
}

#[must_use]
pub fn staking_tiers() -> Vec<StakingTier> {
    let tier = |tier, min_stake, raw_tasks, apy_min, apy_max, multiplier| StakingTier {
        tier,
        min_stake,
        max_tasks: TaskLimit::from_raw(raw_tasks),
        apy_min,
        apy_max,
        multiplier,
    };
    vec![
        tier("Starter", 1_000, 10, 5, 8, 1.0),
        tier("Standard", 5_000, 50, 7, 10, 1.5),
        tier("Pro", 10_000, 200, 9, 13, 2.0),
        tier("Elite", 50_000, 999, 12, 15, 3.0),
    ]
}

/// Bar chart of the minimum stake per tier.
#[derive(Debug, Clone)]
pub struct StakingTiersChart {
    tiers: Vec<StakingTier>,
    theme: ChartTheme,
}

impl Default for StakingTiersChart {
    fn default() -> Self {
        Self::new()
    }
}

impl StakingTiersChart {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tiers: staking_tiers(),
            theme: ChartTheme::default(),
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn tiers(&self) -> &[StakingTier] {
        &self.tiers
    }

    #[must_use]
    pub fn tier_color(index: usize) -> Color {
        TIER_COLORS[index % TIER_COLORS.len()]
    }

    fn plot_area(viewport: Viewport) -> ChartResult<PixelRect> {
        LAYOUT.plot_area(viewport, 0.0)
    }

    fn band_scale(&self, plot: PixelRect) -> ChartResult<BandScale> {
        BandScale::new(
            self.tiers.len(),
            PixelRange::new(plot.x, plot.right()),
            BAR_PADDING_RATIO,
        )
    }

    fn value_scale(&self, plot: PixelRect) -> ChartResult<(LinearScale, Vec<f64>)> {
        let max = self
            .tiers
            .iter()
            .map(|tier| tier.min_stake)
            .max()
            .ok_or_else(|| ChartError::InvalidData("no staking tiers".to_owned()))?;
        let ticks = nice_linear_ticks(0.0, max as f64, TARGET_TICK_COUNT)?;
        let scale = LinearScale::new(
            ticks.domain_min,
            ticks.domain_max,
            PixelRange::new(plot.bottom(), plot.y),
        )?;
        Ok((scale, ticks.values))
    }

    /// Tooltip for tier `index`.
    #[must_use]
    pub fn tier_tooltip(&self, index: usize) -> Option<TooltipContent> {
        let tier = self.tiers.get(index)?;
        let text = self.theme.tooltip_text;
        Some(
            TooltipContent::new(self.theme.brand, 1.0)
                .with_min_width(TOOLTIP_MIN_WIDTH_PX)
                .with_line(TooltipLine::title(
                    format!("{} Tier", tier.tier),
                    self.theme.tooltip_accent,
                    14.0,
                ))
                .with_line(TooltipLine::field(
                    "Min Stake: ",
                    format!("{} NZT", format_grouped_integer(tier.min_stake)),
                    text,
                ))
                .with_line(TooltipLine::field(
                    "Max Tasks/Day: ",
                    tier.max_tasks.to_string(),
                    text,
                ))
                .with_line(TooltipLine::field(
                    "APY Range: ",
                    format!("{}% - {}%", tier.apy_min, tier.apy_max),
                    text,
                ))
                .with_line(TooltipLine::field(
                    "Rep Multiplier: ",
                    format!("{}x", format_plain_number(tier.multiplier)),
                    text,
                )),
        )
    }
}

impl Chart for StakingTiersChart {
    fn kind(&self) -> ChartKind {
        ChartKind::StakingTiers
    }

    fn caption(&self) -> &'static str {
        CAPTION
    }

    fn preferred_viewport(&self, width: u32) -> Viewport {
        let height = LAYOUT.container_height + caption_height(CAPTION, width);
        Viewport::new(width, height.ceil() as u32)
    }

    fn hover_target(&self, viewport: Viewport, pointer: Point) -> ChartResult<Option<HoverTarget>> {
        let plot = Self::plot_area(viewport)?;
        if !plot.contains(pointer) {
            return Ok(None);
        }
        let target = self
            .band_scale(plot)?
            .index_at(pointer.x)
            .map(HoverTarget::Bar);
        trace!(?target, x = pointer.x, y = pointer.y, "staking tiers hover");
        Ok(target)
    }

    fn tooltip(&self, target: Option<HoverTarget>) -> Option<TooltipContent> {
        match target? {
            HoverTarget::Bar(index) => self.tier_tooltip(index),
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
        let target = resolve_hover(self, viewport, pointer)?;
        let plot = Self::plot_area(viewport)?;
        let bands = self.band_scale(plot)?;
        let (scale, tick_values) = self.value_scale(plot)?;
        let baseline = scale.domain_to_pixel(0.0)?;

        let value_ticks = tick_values
            .iter()
            .map(|value| {
                Ok(AxisTick {
                    pixel: scale.domain_to_pixel(*value)?,
                    label: format_thousands_tick(*value),
                })
            })
            .collect::<ChartResult<Vec<_>>>()?;
        let category_ticks: Vec<AxisTick> = self
            .tiers
            .iter()
            .enumerate()
            .map(|(index, tier)| AxisTick {
                pixel: bands.band_center(index),
                label: tier.tier.to_owned(),
            })
            .collect();

        let horizontal: Vec<f64> = value_ticks.iter().map(|tick| tick.pixel).collect();
        let vertical: Vec<f64> = category_ticks.iter().map(|tick| tick.pixel).collect();
        push_grid(&mut frame, plot, &horizontal, &vertical, &self.theme);

        if let Some(HoverTarget::Bar(index)) = target {
            frame.push_rect(
                FrameLayer::Grid,
                RectPrimitive::new(
                    bands.band_start(index),
                    plot.y,
                    bands.step(),
                    plot.height,
                    self.theme.cursor_fill,
                ),
            );
        }

        for (index, tier) in self.tiers.iter().enumerate() {
            let (x, width) = bands.bar_extent(index);
            let top = scale.domain_to_pixel(tier.min_stake as f64)?;
            frame.push_rect(
                FrameLayer::Series,
                RectPrimitive::new(x, top, width, baseline - top, Self::tier_color(index))
                    .with_corner_radii(CornerRadii::top(BAR_CORNER_RADIUS_PX)),
            );
        }

        push_value_axis(
            &mut frame,
            plot,
            &value_ticks,
            12.0,
            Some(("Minimum Stake (NZT)", plot.x - LAYOUT.y_axis_width)),
            &self.theme,
        );
        push_category_axis(
            &mut frame,
            plot,
            &category_ticks,
            CategoryLabelStyle {
                font_size_px: 13.0,
                weight: FontWeight::Medium,
                rotation_deg: 0.0,
            },
            &self.theme,
        );

        let legend = [LegendEntry::new(
            "Minimum Stake Required",
            self.theme.brand,
            LegendIcon::Rect,
        )];
        push_inline_legend(
            &mut frame,
            &legend,
            f64::from(viewport.width) * 0.5,
            LAYOUT.legend_center_y(0.0),
        );

        push_caption(&mut frame, CAPTION, LAYOUT.container_height, &self.theme);
        push_tooltip(self, &mut frame, pointer, target, &self.theme);

        debug!(
            tiers = self.tiers.len(),
            primitives = frame.primitive_count(),
            "built staking tiers frame"
        );
        Ok(frame)
    }
}

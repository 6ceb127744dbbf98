//! The four chart components and the pieces they share.
//!
//! Every chart owns its literal dataset, palette, tooltip function and axis
//! formatter. Nothing flows between charts; a page only lays them out as
//! siblings.

pub mod axis;
pub mod fee_distribution;
pub mod legend;
pub mod performance_benchmark;
pub mod staking_tiers;
pub mod theme;
pub mod token_emissions;
pub mod tooltip;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::text::{line_height_px, wrap_text};
use crate::core::{Point, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::HoverTarget;
use crate::render::{FrameLayer, RenderFrame, TextHAlign, TextPrimitive, TextVAlign};

pub use fee_distribution::{FeeDistributionChart, FeeSlice, SliceLabel, fee_slices};
pub use performance_benchmark::{
    CostDataPoint, PerformanceBenchmarkChart, REFERENCE_LABEL, Scenario, cost_scenarios,
};
pub use staking_tiers::{
    StakingTier, StakingTiersChart, TaskLimit, UNLIMITED_TASKS_SENTINEL, staking_tiers,
};
pub use theme::ChartTheme;
pub use token_emissions::{EmissionPoint, TokenEmissionsChart, derive_inflation, emission_schedule};
pub use tooltip::{TooltipContent, TooltipLine, TooltipLineKind};

const CAPTION_FONT_SIZE_PX: f64 = 13.0;
const CAPTION_MARGIN_TOP_PX: f64 = 16.0;
const CAPTION_SIDE_PADDING_PX: f64 = 20.0;

/// Stable identifier of each chart component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    FeeDistribution,
    PerformanceBenchmark,
    StakingTiers,
    TokenEmissions,
}

impl ChartKind {
    pub const ALL: [Self; 4] = [
        Self::FeeDistribution,
        Self::PerformanceBenchmark,
        Self::StakingTiers,
        Self::TokenEmissions,
    ];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::FeeDistribution => "fee-distribution",
            Self::PerformanceBenchmark => "performance-benchmark",
            Self::StakingTiers => "staking-tiers",
            Self::TokenEmissions => "token-emissions",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == value)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown chart id `{value}`")))
    }
}

/// Contract shared by the chart components.
///
/// Frame building is pure: equal chart state, viewport and pointer always
/// produce an identical frame.
pub trait Chart {
    fn kind(&self) -> ChartKind;

    /// Italic note rendered under the chart.
    fn caption(&self) -> &'static str;

    /// Viewport tall enough for the chart, its controls and its caption.
    fn preferred_viewport(&self, width: u32) -> Viewport;

    /// Resolves what lies under `pointer`, if anything interactive.
    fn hover_target(&self, viewport: Viewport, pointer: Point) -> ChartResult<Option<HoverTarget>>;

    /// Tooltip fragment for a hovered datum. `None` without an active datum.
    fn tooltip(&self, target: Option<HoverTarget>) -> Option<TooltipContent>;

    fn build_render_frame(
        &self,
        viewport: Viewport,
        pointer: Option<Point>,
    ) -> ChartResult<RenderFrame>;
}

/// Height taken by a wrapped caption, including its top margin.
#[must_use]
pub fn caption_height(caption: &str, width: u32) -> f64 {
    let lines = wrap_text(
        caption,
        CAPTION_FONT_SIZE_PX,
        f64::from(width) - 2.0 * CAPTION_SIDE_PADDING_PX,
    );
    CAPTION_MARGIN_TOP_PX + lines.len() as f64 * line_height_px(CAPTION_FONT_SIZE_PX)
}

/// Centered, wrapped, italic caption starting below `top`.
pub fn push_caption(frame: &mut RenderFrame, caption: &str, top: f64, theme: &ChartTheme) {
    let width = f64::from(frame.viewport.width);
    let line_height = line_height_px(CAPTION_FONT_SIZE_PX);
    let lines = wrap_text(
        caption,
        CAPTION_FONT_SIZE_PX,
        width - 2.0 * CAPTION_SIDE_PADDING_PX,
    );
    let mut y = top + CAPTION_MARGIN_TOP_PX;
    for line in lines {
        frame.push_text(
            FrameLayer::Labels,
            TextPrimitive::new(
                line,
                width * 0.5,
                y,
                CAPTION_FONT_SIZE_PX,
                theme.caption_text,
                TextHAlign::Center,
            )
            .with_v_align(TextVAlign::Top)
            .italic(),
        );
        y += line_height;
    }
}

/// Resolves the hover target for an optional pointer.
pub(crate) fn resolve_hover<C: Chart + ?Sized>(
    chart: &C,
    viewport: Viewport,
    pointer: Option<Point>,
) -> ChartResult<Option<HoverTarget>> {
    match pointer {
        Some(pointer) => chart.hover_target(viewport, pointer),
        None => Ok(None),
    }
}

/// Draws the tooltip next to `pointer` when the target carries a datum.
pub(crate) fn push_tooltip<C: Chart + ?Sized>(
    chart: &C,
    frame: &mut RenderFrame,
    pointer: Option<Point>,
    target: Option<HoverTarget>,
    theme: &ChartTheme,
) {
    if let (Some(pointer), Some(tooltip)) = (pointer, chart.tooltip(target)) {
        tooltip.push_primitives(frame, pointer, theme);
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartKind, caption_height};

    #[test]
    fn chart_ids_round_trip() {
        for kind in ChartKind::ALL {
            assert_eq!(kind.id().parse::<ChartKind>().expect("parse"), kind);
        }
        assert!("pie".parse::<ChartKind>().is_err());
    }

    #[test]
    fn narrow_viewports_grow_caption() {
        let text = "Four staking tiers with increasing benefits: Starter (1k NZT) to Elite (50k NZT).";
        assert!(caption_height(text, 240) > caption_height(text, 1200));
    }
}

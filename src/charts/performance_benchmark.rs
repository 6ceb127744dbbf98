use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::charts::axis::{
    AxisTick, CartesianLayout, CategoryLabelStyle, push_category_axis, push_grid, push_value_axis,
};
use crate::charts::legend::{
    INLINE_LEGEND_HEIGHT_PX, LegendEntry, LegendIcon, push_inline_legend,
};
use crate::charts::tooltip::{TooltipContent, TooltipLine};
use crate::charts::{Chart, ChartKind, ChartTheme, caption_height, push_caption, push_tooltip, resolve_hover};
use crate::core::format::{
    decimal_to_f64, format_decimal_fixed, format_plain_number, format_usd_tick,
};
use crate::core::text::{estimate_text_width_px, line_height_px};
use crate::core::{
    BandScale, LogScale, Margins, PixelRange, PixelRect, Point, Viewport, decade_ticks,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::HoverTarget;
use crate::render::{
    Color, CornerRadii, FontWeight, FrameLayer, RectPrimitive, RenderFrame, TextHAlign,
    TextPrimitive,
};

/// Chain every multiplier is measured against.
pub const REFERENCE_LABEL: &str = "Nexis";

const LAYOUT: CartesianLayout = CartesianLayout {
    container_height: 400.0,
    margins: Margins::new(20.0, 30.0, 80.0, 20.0),
    y_axis_width: 60.0,
    x_axis_height: 100.0,
    legend_height: INLINE_LEGEND_HEIGHT_PX,
};
const BAR_PADDING_RATIO: f64 = 0.2;
const BAR_CORNER_RADIUS_PX: f64 = 8.0;
const VALUE_TICK_FONT_PX: f64 = 11.0;
const CATEGORY_TICK_FONT_PX: f64 = 12.0;
const TOOLTIP_MIN_WIDTH_PX: f64 = 180.0;

const BUTTON_FONT_PX: f64 = 13.0;
const BUTTON_PADDING_X_PX: f64 = 20.0;
const BUTTON_PADDING_Y_PX: f64 = 10.0;
const BUTTON_GAP_PX: f64 = 12.0;
const BUTTON_RADIUS_PX: f64 = 8.0;
const SELECTOR_MARGIN_BOTTOM_PX: f64 = 20.0;

const SELECTED_BUTTON_FILL: Color = Color::rgb8(0x0d, 0x6b, 0x93);
const SELECTED_BUTTON_BORDER: Color = Color::rgb8(0x07, 0xb2, 0xc9);
const BUTTON_FILL: Color = Color::rgb8(0x2a, 0x2a, 0x2a);
const BUTTON_BORDER: Color = Color::rgb8(0x44, 0x44, 0x44);
const HOVERED_BUTTON_FILL: Color = Color::rgb8(0x33, 0x33, 0x33);
const HOVERED_BUTTON_BORDER: Color = Color::rgb8(0x55, 0x55, 0x55);
const BUTTON_TEXT: Color = Color::rgb8(0x88, 0x88, 0x88);

const CAPTION: &str = "Transaction cost comparison across major chains. Nexis is optimized for AI agent \
operations with 2-second blocks, offering 30,000x cost savings vs Ethereum L1.";

/// Named cost-comparison dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Scenario {
    #[default]
    EthTransfer,
    Swap,
    AiAgent,
}

impl Scenario {
    pub const ALL: [Self; 3] = [Self::EthTransfer, Self::Swap, Self::AiAgent];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::EthTransfer => "ethTransfer",
            Self::Swap => "swap",
            Self::AiAgent => "aiAgent",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::EthTransfer => "ETH Transfer",
            Self::Swap => "Token Swap",
            Self::AiAgent => "AI Agent Registration",
        }
    }

    pub fn from_key(key: &str) -> ChartResult<Self> {
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.key() == key)
            .ok_or_else(|| ChartError::UnknownScenario(key.to_owned()))
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Scenario {
    type Err = ChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_key(value)
    }
}

/// One chain's cost for a scenario. Costs are exact USD amounts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostDataPoint {
    pub chain: &'static str,
    #[serde(with = "rust_decimal::serde::str")]
    pub cost: Decimal,
    pub block_time_seconds: f64,
    pub color: &'static str,
}

impl CostDataPoint {
    fn new(
        chain: &'static str,
        cost: Decimal,
        block_time_seconds: f64,
        color: &'static str,
    ) -> Self {
        Self {
            chain,
            cost,
            block_time_seconds,
            color,
        }
    }

    pub fn color(&self) -> ChartResult<Color> {
        Color::from_hex(self.color)
    }
}

/// Every scenario's dataset in definition order. The first point of each is
/// the reference chain.
#[must_use]
pub fn cost_scenarios() -> IndexMap<Scenario, Vec<CostDataPoint>> {
    let mut scenarios = IndexMap::with_capacity(Scenario::ALL.len());
    scenarios.insert(
        Scenario::EthTransfer,
        vec![
            CostDataPoint::new("Nexis L3", Decimal::new(42, 6), 2.0, "#0D6B93"),
            CostDataPoint::new("Base L2", Decimal::new(2, 6), 2.0, "#0051FF"),
            CostDataPoint::new("Optimism", Decimal::new(3, 6), 2.0, "#FF0420"),
            CostDataPoint::new("Arbitrum", Decimal::new(4, 6), 0.25, "#28A0F0"),
            CostDataPoint::new("Polygon", Decimal::new(42, 4), 2.0, "#8247E5"),
            CostDataPoint::new("Ethereum L1", Decimal::new(126, 2), 12.0, "#627EEA"),
        ],
    );
    scenarios.insert(
        Scenario::Swap,
        vec![
            CostDataPoint::new("Nexis L3", Decimal::new(3, 4), 2.0, "#0D6B93"),
            CostDataPoint::new("Base L2", Decimal::new(15, 6), 2.0, "#0051FF"),
            CostDataPoint::new("Optimism", Decimal::new(24, 6), 2.0, "#FF0420"),
            CostDataPoint::new("Arbitrum", Decimal::new(3, 5), 0.25, "#28A0F0"),
            CostDataPoint::new("Polygon", Decimal::new(3, 2), 2.0, "#8247E5"),
            CostDataPoint::new("Ethereum L1", Decimal::new(9, 0), 12.0, "#627EEA"),
        ],
    );
    scenarios.insert(
        Scenario::AiAgent,
        vec![
            CostDataPoint::new("Nexis L3", Decimal::new(5, 4), 2.0, "#0D6B93"),
            CostDataPoint::new("Base L2", Decimal::new(25, 6), 2.0, "#0051FF"),
            CostDataPoint::new("Ethereum L1", Decimal::new(15, 0), 12.0, "#627EEA"),
        ],
    );
    scenarios
}

/// Log-scale bar comparison of per-chain transaction costs with a scenario
/// selector above the plot.
#[derive(Debug, Clone)]
pub struct PerformanceBenchmarkChart {
    scenarios: IndexMap<Scenario, Vec<CostDataPoint>>,
    selected: Scenario,
    theme: ChartTheme,
}

impl Default for PerformanceBenchmarkChart {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceBenchmarkChart {
    #[must_use]
    pub fn new() -> Self {
        Self {
            scenarios: cost_scenarios(),
            selected: Scenario::default(),
            theme: ChartTheme::default(),
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_selected(mut self, scenario: Scenario) -> Self {
        self.selected = scenario;
        self
    }

    #[must_use]
    pub fn selected(&self) -> Scenario {
        self.selected
    }

    #[must_use]
    pub fn scenarios(&self) -> &IndexMap<Scenario, Vec<CostDataPoint>> {
        &self.scenarios
    }

    /// Switches the displayed dataset. Returns whether the selection changed.
    pub fn select(&mut self, scenario: Scenario) -> bool {
        if self.selected == scenario {
            return false;
        }
        debug!(from = %self.selected, to = %scenario, "benchmark scenario selected");
        self.selected = scenario;
        true
    }

    pub fn select_by_key(&mut self, key: &str) -> ChartResult<bool> {
        let scenario = Scenario::from_key(key)?;
        Ok(self.select(scenario))
    }

    /// Bars of the selected scenario, in definition order.
    #[must_use]
    pub fn data(&self) -> &[CostDataPoint] {
        self.scenarios
            .get(&self.selected)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Cost of the selected scenario's reference chain.
    #[must_use]
    pub fn reference_cost(&self) -> Option<Decimal> {
        self.data().first().map(|point| point.cost)
    }

    /// Cost of bar `index` relative to the reference, rounded to one decimal.
    #[must_use]
    pub fn cost_multiplier(&self, index: usize) -> Option<Decimal> {
        let point = self.data().get(index)?;
        let multiplier = point.cost.checked_div(self.reference_cost()?)?;
        Some(multiplier.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Relative-cost remark for bar `index`; `None` for the reference chain.
    #[must_use]
    pub fn multiplier_note(&self, index: usize) -> Option<String> {
        if index == 0 {
            return None;
        }
        let multiplier = self.cost_multiplier(index)?;
        let direction = if multiplier > Decimal::ONE {
            "more expensive"
        } else {
            "cheaper"
        };
        Some(format!(
            "{}x {direction} than {REFERENCE_LABEL}",
            format_decimal_fixed(multiplier, 1)
        ))
    }

    fn button_height() -> f64 {
        line_height_px(BUTTON_FONT_PX) + 2.0 * BUTTON_PADDING_Y_PX
    }

    fn selector_band_height() -> f64 {
        Self::button_height() + SELECTOR_MARGIN_BOTTOM_PX
    }

    /// Selector buttons in scenario order, centered in one row.
    #[must_use]
    pub fn button_rects(&self, viewport: Viewport) -> Vec<(Scenario, PixelRect)> {
        let widths: Vec<f64> = self
            .scenarios
            .keys()
            .map(|scenario| {
                estimate_text_width_px(scenario.label(), BUTTON_FONT_PX) + 2.0 * BUTTON_PADDING_X_PX
            })
            .collect();
        let total = widths.iter().sum::<f64>()
            + BUTTON_GAP_PX * widths.len().saturating_sub(1) as f64;
        let mut x = ((f64::from(viewport.width) - total) * 0.5).max(0.0);
        let height = Self::button_height();

        self.scenarios
            .keys()
            .zip(widths)
            .map(|(scenario, width)| {
                let rect = PixelRect::new(x, 0.0, width, height);
                x += width + BUTTON_GAP_PX;
                (*scenario, rect)
            })
            .collect()
    }

    /// Applies a click at `(x, y)`. Only selector buttons react; returns
    /// whether a button was hit.
    pub fn click(&mut self, viewport: Viewport, x: f64, y: f64) -> bool {
        let point = Point::new(x, y);
        let hit = self
            .button_rects(viewport)
            .into_iter()
            .find(|(_, rect)| rect.contains(point))
            .map(|(scenario, _)| scenario);
        match hit {
            Some(scenario) => {
                self.select(scenario);
                true
            }
            None => false,
        }
    }

    fn plot_area(viewport: Viewport) -> ChartResult<PixelRect> {
        LAYOUT.plot_area(viewport, Self::selector_band_height())
    }

    fn band_scale(&self, plot: PixelRect) -> ChartResult<BandScale> {
        BandScale::new(
            self.data().len(),
            PixelRange::new(plot.x, plot.right()),
            BAR_PADDING_RATIO,
        )
    }

    /// Log scale over whole decades around the selected costs.
    fn value_scale(&self, plot: PixelRect) -> ChartResult<(LogScale, Vec<f64>)> {
        let costs = self
            .data()
            .iter()
            .map(|point| OrderedFloat(decimal_to_f64(point.cost)));
        let min = costs.clone().min().ok_or_else(|| {
            ChartError::InvalidData("benchmark scenario has no data".to_owned())
        })?;
        let max = costs.max().unwrap_or(min);
        let ticks = decade_ticks(min.into_inner(), max.into_inner())?;
        let scale = LogScale::new(
            ticks.domain_min,
            ticks.domain_max,
            PixelRange::new(plot.bottom(), plot.y),
        )?;
        Ok((scale, ticks.values))
    }

    /// Tooltip for bar `index` of the selected scenario.
    #[must_use]
    pub fn bar_tooltip(&self, index: usize) -> Option<TooltipContent> {
        let point = self.data().get(index)?;
        let color = point.color().ok()?;
        let mut content = TooltipContent::new(color, 2.0)
            .with_min_width(TOOLTIP_MIN_WIDTH_PX)
            .with_line(TooltipLine::title(point.chain, color, 14.0))
            .with_line(TooltipLine::field(
                "Cost: ",
                format!("${}", format_decimal_fixed(point.cost, 6)),
                self.theme.tooltip_text,
            ))
            .with_line(TooltipLine::field(
                "Block Time: ",
                format!("{}s", format_plain_number(point.block_time_seconds)),
                self.theme.tooltip_text,
            ));
        if let Some(note) = self.multiplier_note(index) {
            content = content.with_line(TooltipLine::note(note, self.theme.tooltip_accent));
        }
        Some(content)
    }

    fn push_selector(&self, frame: &mut RenderFrame, hovered: Option<Scenario>) {
        for (scenario, rect) in self.button_rects(frame.viewport) {
            let selected = scenario == self.selected;
            let (fill, border, border_width) = if selected {
                (SELECTED_BUTTON_FILL, SELECTED_BUTTON_BORDER, 2.0)
            } else if hovered == Some(scenario) {
                (HOVERED_BUTTON_FILL, HOVERED_BUTTON_BORDER, 1.0)
            } else {
                (BUTTON_FILL, BUTTON_BORDER, 1.0)
            };
            frame.push_rect(
                FrameLayer::Overlay,
                RectPrimitive::new(rect.x, rect.y, rect.width, rect.height, fill)
                    .with_border(border_width, border)
                    .with_corner_radii(CornerRadii::uniform(BUTTON_RADIUS_PX)),
            );
            let (text_color, weight) = if selected {
                (Color::WHITE, FontWeight::SemiBold)
            } else {
                (BUTTON_TEXT, FontWeight::Normal)
            };
            frame.push_text(
                FrameLayer::Overlay,
                TextPrimitive::new(
                    scenario.label(),
                    rect.x + rect.width * 0.5,
                    rect.y + rect.height * 0.5,
                    BUTTON_FONT_PX,
                    text_color,
                    TextHAlign::Center,
                )
                .with_weight(weight),
            );
        }
    }
}

impl Chart for PerformanceBenchmarkChart {
    fn kind(&self) -> ChartKind {
        ChartKind::PerformanceBenchmark
    }

    fn caption(&self) -> &'static str {
        CAPTION
    }

    fn preferred_viewport(&self, width: u32) -> Viewport {
        let height = Self::selector_band_height()
            + LAYOUT.container_height
            + caption_height(CAPTION, width);
        Viewport::new(width, height.ceil() as u32)
    }

    fn hover_target(&self, viewport: Viewport, pointer: Point) -> ChartResult<Option<HoverTarget>> {
        if let Some((scenario, _)) = self
            .button_rects(viewport)
            .into_iter()
            .find(|(_, rect)| rect.contains(pointer))
        {
            return Ok(Some(HoverTarget::SelectorButton(scenario)));
        }

        let plot = Self::plot_area(viewport)?;
        if !plot.contains(pointer) {
            return Ok(None);
        }
        let target = self
            .band_scale(plot)?
            .index_at(pointer.x)
            .map(HoverTarget::Bar);
        trace!(?target, x = pointer.x, y = pointer.y, "benchmark hover");
        Ok(target)
    }

    fn tooltip(&self, target: Option<HoverTarget>) -> Option<TooltipContent> {
        match target? {
            HoverTarget::Bar(index) => self.bar_tooltip(index),
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
        let top = Self::selector_band_height();
        let plot = Self::plot_area(viewport)?;
        let bands = self.band_scale(plot)?;
        let (scale, tick_values) = self.value_scale(plot)?;
        let (domain_min, _) = scale.domain();
        let baseline = scale.domain_to_pixel(domain_min)?;

        let hovered_button = match target {
            Some(HoverTarget::SelectorButton(scenario)) => Some(scenario),
            _ => None,
        };
        self.push_selector(&mut frame, hovered_button);

        let value_ticks = tick_values
            .iter()
            .map(|value| {
                Ok(AxisTick {
                    pixel: scale.domain_to_pixel(*value)?,
                    label: format_usd_tick(*value),
                })
            })
            .collect::<ChartResult<Vec<_>>>()?;
        let category_ticks: Vec<AxisTick> = self
            .data()
            .iter()
            .enumerate()
            .map(|(index, point)| AxisTick {
                pixel: bands.band_center(index),
                label: point.chain.to_owned(),
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

        for (index, point) in self.data().iter().enumerate() {
            let (x, width) = bands.bar_extent(index);
            let top_y = scale.domain_to_pixel(decimal_to_f64(point.cost))?;
            frame.push_rect(
                FrameLayer::Series,
                RectPrimitive::new(x, top_y, width, (baseline - top_y).max(0.0), point.color()?)
                    .with_corner_radii(CornerRadii::top(BAR_CORNER_RADIUS_PX)),
            );
        }

        push_value_axis(
            &mut frame,
            plot,
            &value_ticks,
            VALUE_TICK_FONT_PX,
            Some(("Cost (USD)", plot.x - LAYOUT.y_axis_width)),
            &self.theme,
        );
        push_category_axis(
            &mut frame,
            plot,
            &category_ticks,
            CategoryLabelStyle {
                font_size_px: CATEGORY_TICK_FONT_PX,
                weight: FontWeight::Normal,
                rotation_deg: -45.0,
            },
            &self.theme,
        );

        let legend = [LegendEntry::new(
            format!("Cost Comparison: {}", self.selected.label()),
            self.theme.brand,
            LegendIcon::Rect,
        )];
        push_inline_legend(
            &mut frame,
            &legend,
            f64::from(viewport.width) * 0.5,
            LAYOUT.legend_center_y(top),
        );

        push_caption(&mut frame, CAPTION, top + LAYOUT.container_height, &self.theme);
        push_tooltip(self, &mut frame, pointer, target, &self.theme);

        debug!(
            scenario = %self.selected,
            bars = self.data().len(),
            primitives = frame.primitive_count(),
            "built performance benchmark frame"
        );
        Ok(frame)
    }
}

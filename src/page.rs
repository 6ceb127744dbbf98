//! The page hosting all four charts as independent siblings.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::charts::{
    Chart, ChartKind, ChartTheme, CostDataPoint, EmissionPoint, FeeDistributionChart, FeeSlice,
    PerformanceBenchmarkChart, Scenario, StakingTier, StakingTiersChart, TokenEmissionsChart,
};
use crate::config::ChartPageConfig;
use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::interaction::PointerState;
use crate::render::{RenderFrame, SvgRenderer};

pub const PAGE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serialized view of one chart: id, caption and its dataset.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSnapshot<'a, T> {
    pub id: ChartKind,
    pub caption: &'static str,
    pub data: &'a [T],
}

#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkSnapshot<'a> {
    pub id: ChartKind,
    pub caption: &'static str,
    pub selected: Scenario,
    pub data: &'a [CostDataPoint],
    pub scenarios: &'a IndexMap<Scenario, Vec<CostDataPoint>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot<'a> {
    pub schema_version: u32,
    pub width: u32,
    pub fee_distribution: ChartSnapshot<'a, FeeSlice>,
    pub performance_benchmark: BenchmarkSnapshot<'a>,
    pub staking_tiers: ChartSnapshot<'a, StakingTier>,
    pub token_emissions: ChartSnapshot<'a, EmissionPoint>,
}

/// All four charts laid out as siblings at one width.
#[derive(Debug, Clone)]
pub struct ChartPage {
    config: ChartPageConfig,
    fee_distribution: FeeDistributionChart,
    performance_benchmark: PerformanceBenchmarkChart,
    staking_tiers: StakingTiersChart,
    token_emissions: TokenEmissionsChart,
}

impl Default for ChartPage {
    fn default() -> Self {
        Self::mount(ChartPageConfig::default(), ChartTheme::default())
    }
}

impl ChartPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: ChartPageConfig) -> ChartResult<Self> {
        config.validate()?;
        let theme = config.theme.to_theme()?;
        Ok(Self::mount(config, theme))
    }

    fn mount(config: ChartPageConfig, theme: ChartTheme) -> Self {
        debug!(
            width = config.width,
            scenario = %config.initial_scenario,
            "mounting chart page"
        );
        Self {
            fee_distribution: FeeDistributionChart::new().with_theme(theme),
            performance_benchmark: PerformanceBenchmarkChart::new()
                .with_theme(theme)
                .with_selected(config.initial_scenario),
            staking_tiers: StakingTiersChart::new().with_theme(theme),
            token_emissions: TokenEmissionsChart::new().with_theme(theme),
            config,
        }
    }

    /// Recreates every chart, dropping local state such as the selected
    /// scenario.
    pub fn remount(&mut self) -> ChartResult<()> {
        *self = Self::from_config(self.config.clone())?;
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &ChartPageConfig {
        &self.config
    }

    #[must_use]
    pub fn fee_distribution(&self) -> &FeeDistributionChart {
        &self.fee_distribution
    }

    #[must_use]
    pub fn performance_benchmark(&self) -> &PerformanceBenchmarkChart {
        &self.performance_benchmark
    }

    pub fn performance_benchmark_mut(&mut self) -> &mut PerformanceBenchmarkChart {
        &mut self.performance_benchmark
    }

    #[must_use]
    pub fn staking_tiers(&self) -> &StakingTiersChart {
        &self.staking_tiers
    }

    #[must_use]
    pub fn token_emissions(&self) -> &TokenEmissionsChart {
        &self.token_emissions
    }

    #[must_use]
    pub fn chart(&self, kind: ChartKind) -> &dyn Chart {
        match kind {
            ChartKind::FeeDistribution => &self.fee_distribution,
            ChartKind::PerformanceBenchmark => &self.performance_benchmark,
            ChartKind::StakingTiers => &self.staking_tiers,
            ChartKind::TokenEmissions => &self.token_emissions,
        }
    }

    /// Viewport for `kind`: the configured height override, else the chart's
    /// preferred height at page width.
    #[must_use]
    pub fn viewport_for(&self, kind: ChartKind) -> Viewport {
        match self.config.heights.get(&kind) {
            Some(height) => Viewport::new(self.config.width, *height),
            None => self.chart(kind).preferred_viewport(self.config.width),
        }
    }

    /// Validated frame for `kind` with hover state taken from `pointer`.
    pub fn build_frame(&self, kind: ChartKind, pointer: &PointerState) -> ChartResult<RenderFrame> {
        let frame = self
            .chart(kind)
            .build_render_frame(self.viewport_for(kind), pointer.position())?;
        frame.validate()?;
        Ok(frame)
    }

    /// Frames for every chart in page order, without pointer.
    pub fn build_all(&self) -> ChartResult<Vec<(ChartKind, RenderFrame)>> {
        ChartKind::ALL
            .into_iter()
            .map(|kind| Ok((kind, self.build_frame(kind, &PointerState::default())?)))
            .collect()
    }

    pub fn render_svg(&self, kind: ChartKind, pointer: &PointerState) -> ChartResult<String> {
        SvgRenderer::render_to_string(&self.build_frame(kind, pointer)?)
    }

    /// Forwards a click to the chart; only the benchmark selector reacts.
    pub fn click(&mut self, kind: ChartKind, x: f64, y: f64) -> bool {
        if kind != ChartKind::PerformanceBenchmark {
            return false;
        }
        let viewport = self.viewport_for(kind);
        self.performance_benchmark.click(viewport, x, y)
    }

    #[must_use]
    pub fn snapshot(&self) -> PageSnapshot<'_> {
        let benchmark = &self.performance_benchmark;
        PageSnapshot {
            schema_version: PAGE_SNAPSHOT_JSON_SCHEMA_V1,
            width: self.config.width,
            fee_distribution: ChartSnapshot {
                id: ChartKind::FeeDistribution,
                caption: self.fee_distribution.caption(),
                data: self.fee_distribution.slices(),
            },
            performance_benchmark: BenchmarkSnapshot {
                id: ChartKind::PerformanceBenchmark,
                caption: benchmark.caption(),
                selected: benchmark.selected(),
                data: benchmark.data(),
                scenarios: benchmark.scenarios(),
            },
            staking_tiers: ChartSnapshot {
                id: ChartKind::StakingTiers,
                caption: self.staking_tiers.caption(),
                data: self.staking_tiers.tiers(),
            },
            token_emissions: ChartSnapshot {
                id: ChartKind::TokenEmissions,
                caption: self.token_emissions.caption(),
                data: self.token_emissions.points(),
            },
        }
    }

    pub fn snapshot_json(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize page snapshot: {e}")))
    }
}

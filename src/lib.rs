//! nexis-charts: static illustrative charts for the Nexis docs site.
//!
//! Four self-contained components (fee distribution pie, cross-chain cost
//! benchmark, staking tiers, token emissions) build backend-agnostic render
//! frames that an SVG writer or the optional Cairo backend turns into pixels.

pub mod charts;
pub mod config;
pub mod core;
pub mod error;
pub mod interaction;
pub mod page;
pub mod render;
pub mod telemetry;

pub use charts::{
    Chart, ChartKind, FeeDistributionChart, PerformanceBenchmarkChart, Scenario,
    StakingTiersChart, TokenEmissionsChart,
};
pub use config::ChartPageConfig;
pub use error::{ChartError, ChartResult};
pub use page::ChartPage;

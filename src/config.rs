use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::charts::{ChartKind, ChartTheme, Scenario};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Page bootstrap configuration.
///
/// Every field is defaulted so an empty JSON object yields the stock page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPageConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    /// Viewport height overrides per chart. Charts without an entry use
    /// their preferred height for `width`.
    #[serde(default)]
    pub heights: IndexMap<ChartKind, u32>,
    /// Benchmark scenario selected at mount.
    #[serde(default)]
    pub initial_scenario: Scenario,
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for ChartPageConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            heights: IndexMap::new(),
            initial_scenario: Scenario::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl ChartPageConfig {
    #[must_use]
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_height(mut self, kind: ChartKind, height: u32) -> Self {
        self.heights.insert(kind, height);
        self
    }

    #[must_use]
    pub fn with_initial_scenario(mut self, scenario: Scenario) -> Self {
        self.initial_scenario = scenario;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.width == 0 {
            return Err(ChartError::InvalidData(
                "page width must be > 0".to_owned(),
            ));
        }
        if let Some((kind, _)) = self.heights.iter().find(|(_, height)| **height == 0) {
            return Err(ChartError::InvalidData(format!(
                "height override for `{kind}` must be > 0"
            )));
        }
        self.theme.to_theme().map(|_| ())
    }

    /// Serializes config to pretty JSON for config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

/// Chrome colors as hex strings (`#RGB` or `#RRGGBB`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_grid_line")]
    pub grid_line: String,
    #[serde(default = "default_axis")]
    pub axis: String,
    #[serde(default = "default_legend_text")]
    pub legend_text: String,
    #[serde(default = "default_tooltip_background")]
    pub tooltip_background: String,
    #[serde(default = "default_tooltip_accent")]
    pub tooltip_accent: String,
    #[serde(default = "default_brand")]
    pub brand: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            grid_line: default_grid_line(),
            axis: default_axis(),
            legend_text: default_legend_text(),
            tooltip_background: default_tooltip_background(),
            tooltip_accent: default_tooltip_accent(),
            brand: default_brand(),
        }
    }
}

impl ThemeConfig {
    /// Resolves the hex strings over the stock theme.
    pub fn to_theme(&self) -> ChartResult<ChartTheme> {
        let axis = Color::from_hex(&self.axis)?;
        Ok(ChartTheme {
            background: Color::from_hex(&self.background)?,
            grid_line: Color::from_hex(&self.grid_line)?,
            axis_line: axis,
            axis_text: axis,
            caption_text: axis,
            legend_text: Color::from_hex(&self.legend_text)?,
            tooltip_background: Color::from_hex(&self.tooltip_background)?,
            tooltip_accent: Color::from_hex(&self.tooltip_accent)?,
            brand: Color::from_hex(&self.brand)?,
            ..ChartTheme::default()
        })
    }
}

fn default_width() -> u32 {
    800
}

fn default_background() -> String {
    "#111111".to_owned()
}

fn default_grid_line() -> String {
    "#333333".to_owned()
}

fn default_axis() -> String {
    "#888888".to_owned()
}

fn default_legend_text() -> String {
    "#cccccc".to_owned()
}

fn default_tooltip_background() -> String {
    "#1a1a1a".to_owned()
}

fn default_tooltip_accent() -> String {
    "#07B2C9".to_owned()
}

fn default_brand() -> String {
    "#0D6B93".to_owned()
}

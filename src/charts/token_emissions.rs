use serde::Serialize;
use smallvec::smallvec;
use tracing::{debug, trace};

use crate::charts::axis::{
    AxisTick, CartesianLayout, CategoryLabelStyle, push_category_axis, push_grid, push_value_axis,
};
use crate::charts::legend::{
    INLINE_LEGEND_HEIGHT_PX, LegendEntry, LegendIcon, push_inline_legend,
};
use crate::charts::tooltip::{TooltipContent, TooltipLine};
use crate::charts::{Chart, ChartKind, ChartTheme, caption_height, push_caption, push_tooltip, resolve_hover};
use crate::core::format::format_plain_number;
use crate::core::{
    LinearScale, Margins, PixelRange, PixelRect, Point, PointScale, Viewport, close_to_baseline,
    monotone_x_path, nice_linear_ticks,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::HoverTarget;
use crate::render::{
    CirclePrimitive, Color, Fill, FontWeight, FrameLayer, GradientStop, LinePrimitive,
    PathPrimitive, PathStroke, RenderFrame,
};

const LAYOUT: CartesianLayout = CartesianLayout {
    container_height: 400.0,
    margins: Margins::new(20.0, 30.0, 20.0, 0.0),
    y_axis_width: 60.0,
    x_axis_height: 30.0,
    legend_height: INLINE_LEGEND_HEIGHT_PX,
};
const TARGET_TICK_COUNT: usize = 5;
const STROKE_WIDTH_PX: f64 = 3.0;
const ACTIVE_DOT_RADIUS_PX: f64 = 4.0;
const ACTIVE_DOT_STROKE_PX: f64 = 2.0;

const ANNUAL_COLOR: Color = Color::rgb8(0x0d, 0x6b, 0x93);
const CUMULATIVE_COLOR: Color = Color::rgb8(0x07, 0xb2, 0xc9);
const ANNUAL_LABEL: &str = "Annual Emission";
const CUMULATIVE_LABEL: &str = "Cumulative Supply";

const CAPTION: &str = "5-year emission schedule showing annual emissions declining from 250M to 100M NZT, \
reaching 1B max supply by Year 5";

/// One year of the emission schedule, amounts in millions of tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmissionPoint {
    pub year: &'static str,
    pub annual: u32,
    pub cumulative: u32,
    /// Whole-percent supply growth over the previous year.
    pub inflation: u32,
}

/// Inflation per `(annual, cumulative)` row: this year's emission over the
/// previous year's cumulative supply, rounded to whole percent. The first
/// row has no predecessor and reports 0.
#[must_use]
pub fn derive_inflation(schedule: &[(u32, u32)]) -> Vec<u32> {
    let mut inflation = Vec::with_capacity(schedule.len());
    let mut previous_cumulative: Option<u32> = None;
    for &(annual, cumulative) in schedule {
        let rate = match previous_cumulative {
            Some(previous) if previous > 0 => {
                (f64::from(annual) / f64::from(previous) * 100.0).round() as u32
            }
            _ => 0,
        };
        inflation.push(rate);
        previous_cumulative = Some(cumulative);
    }
    inflation
}

#[must_use]
pub fn emission_schedule() -> Vec<EmissionPoint> {
    const ROWS: [(&str, u32, u32); 7] = [
        ("Launch", 100, 100),
        ("Year 1", 200, 300),
        ("Year 2", 250, 550),
        ("Year 3", 200, 750),
        ("Year 4", 150, 900),
        ("Year 5", 100, 1_000),
        ("Year 6+", 0, 1_000),
    ];
    let amounts: Vec<(u32, u32)> = ROWS
        .iter()
        .map(|(_, annual, cumulative)| (*annual, *cumulative))
        .collect();
    ROWS.iter()
        .zip(derive_inflation(&amounts))
        .map(|(&(year, annual, cumulative), inflation)| EmissionPoint {
            year,
            annual,
            cumulative,
            inflation,
        })
        .collect()
}

/// Overlaid annual-emission and cumulative-supply areas.
#[derive(Debug, Clone)]
pub struct TokenEmissionsChart {
    points: Vec<EmissionPoint>,
    theme: ChartTheme,
}

impl Default for TokenEmissionsChart {
    fn default() -> Self {
        Self::new()
    }
}

struct Projection {
    plot: PixelRect,
    categories: PointScale,
    values: LinearScale,
    tick_values: Vec<f64>,
}

impl Projection {
    fn point(&self, index: usize, value: u32) -> ChartResult<Point> {
        Ok(Point::new(
            self.categories.position(index),
            self.values.domain_to_pixel(f64::from(value))?,
        ))
    }
}

impl TokenEmissionsChart {
    #[must_use]
    pub fn new() -> Self {
        Self {
            points: emission_schedule(),
            theme: ChartTheme::default(),
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn points(&self) -> &[EmissionPoint] {
        &self.points
    }

    fn project(&self, viewport: Viewport) -> ChartResult<Projection> {
        let plot = LAYOUT.plot_area(viewport, 0.0)?;
        let categories = PointScale::new(self.points.len(), PixelRange::new(plot.x, plot.right()))?;
        let max = self
            .points
            .iter()
            .map(|point| point.annual.max(point.cumulative))
            .max()
            .ok_or_else(|| ChartError::InvalidData("emission schedule is empty".to_owned()))?;
        let ticks = nice_linear_ticks(0.0, f64::from(max), TARGET_TICK_COUNT)?;
        let values = LinearScale::new(
            ticks.domain_min,
            ticks.domain_max,
            PixelRange::new(plot.bottom(), plot.y),
        )?;
        Ok(Projection {
            plot,
            categories,
            values,
            tick_values: ticks.values,
        })
    }

    /// Tooltip for year `index`.
    #[must_use]
    pub fn year_tooltip(&self, index: usize) -> Option<TooltipContent> {
        let point = self.points.get(index)?;
        let text = self.theme.tooltip_text;
        Some(
            TooltipContent::new(self.theme.brand, 1.0)
                .with_line(TooltipLine::title(point.year, self.theme.tooltip_accent, 14.0))
                .with_line(TooltipLine::field(
                    "Annual Emission: ",
                    format!("{}M NZT", point.annual),
                    text,
                ))
                .with_line(TooltipLine::field(
                    "Cumulative Supply: ",
                    format!("{}M NZT", point.cumulative),
                    text,
                ))
                .with_line(TooltipLine::field(
                    "Inflation Rate: ",
                    format!("{}%", point.inflation),
                    text,
                )),
        )
    }

    fn push_area(
        frame: &mut RenderFrame,
        projection: &Projection,
        series: &[Point],
        color: Color,
    ) {
        let curve = monotone_x_path(series);
        let baseline = projection.plot.bottom();
        frame.push_path(
            FrameLayer::Series,
            PathPrimitive {
                commands: close_to_baseline(&curve, baseline),
                fill: Some(Fill::VerticalGradient(smallvec![
                    GradientStop {
                        offset: 0.05,
                        color: color.with_alpha(0.8),
                    },
                    GradientStop {
                        offset: 0.95,
                        color: color.with_alpha(0.1),
                    },
                ])),
                stroke: None,
            },
        );
        frame.push_path(
            FrameLayer::Series,
            PathPrimitive {
                commands: curve,
                fill: None,
                stroke: Some(PathStroke {
                    width: STROKE_WIDTH_PX,
                    color,
                }),
            },
        );
    }
}

impl Chart for TokenEmissionsChart {
    fn kind(&self) -> ChartKind {
        ChartKind::TokenEmissions
    }

    fn caption(&self) -> &'static str {
        CAPTION
    }

    fn preferred_viewport(&self, width: u32) -> Viewport {
        let height = LAYOUT.container_height + caption_height(CAPTION, width);
        Viewport::new(width, height.ceil() as u32)
    }

    fn hover_target(&self, viewport: Viewport, pointer: Point) -> ChartResult<Option<HoverTarget>> {
        let projection = self.project(viewport)?;
        if !projection.plot.contains(pointer) {
            return Ok(None);
        }
        let index = projection.categories.nearest_index(pointer.x);
        trace!(index, x = pointer.x, y = pointer.y, "token emissions hover");
        Ok(Some(HoverTarget::Category(index)))
    }

    fn tooltip(&self, target: Option<HoverTarget>) -> Option<TooltipContent> {
        match target? {
            HoverTarget::Category(index) => self.year_tooltip(index),
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
        let projection = self.project(viewport)?;
        let plot = projection.plot;

        let value_ticks = projection
            .tick_values
            .iter()
            .map(|value| {
                Ok(AxisTick {
                    pixel: projection.values.domain_to_pixel(*value)?,
                    label: format_plain_number(*value),
                })
            })
            .collect::<ChartResult<Vec<_>>>()?;
        let category_ticks: Vec<AxisTick> = self
            .points
            .iter()
            .enumerate()
            .map(|(index, point)| AxisTick {
                pixel: projection.categories.position(index),
                label: point.year.to_owned(),
            })
            .collect();

        let horizontal: Vec<f64> = value_ticks.iter().map(|tick| tick.pixel).collect();
        let vertical: Vec<f64> = category_ticks.iter().map(|tick| tick.pixel).collect();
        push_grid(&mut frame, plot, &horizontal, &vertical, &self.theme);

        let annual = self
            .points
            .iter()
            .enumerate()
            .map(|(index, point)| projection.point(index, point.annual))
            .collect::<ChartResult<Vec<_>>>()?;
        let cumulative = self
            .points
            .iter()
            .enumerate()
            .map(|(index, point)| projection.point(index, point.cumulative))
            .collect::<ChartResult<Vec<_>>>()?;
        Self::push_area(&mut frame, &projection, &annual, ANNUAL_COLOR);
        Self::push_area(&mut frame, &projection, &cumulative, CUMULATIVE_COLOR);

        if let Some(HoverTarget::Category(index)) = target {
            let x = projection.categories.position(index);
            frame.push_line(
                FrameLayer::Grid,
                LinePrimitive::new(x, plot.y, x, plot.bottom(), 1.0, self.theme.axis_line),
            );
            for (series, color) in [(&annual, ANNUAL_COLOR), (&cumulative, CUMULATIVE_COLOR)] {
                if let Some(center) = series.get(index) {
                    frame.push_circle(
                        FrameLayer::Overlay,
                        CirclePrimitive {
                            center: *center,
                            radius: ACTIVE_DOT_RADIUS_PX,
                            fill_color: color,
                            stroke_width: ACTIVE_DOT_STROKE_PX,
                            stroke_color: Color::WHITE,
                        },
                    );
                }
            }
        }

        push_value_axis(
            &mut frame,
            plot,
            &value_ticks,
            12.0,
            Some(("NZT (Millions)", plot.x - LAYOUT.y_axis_width)),
            &self.theme,
        );
        push_category_axis(
            &mut frame,
            plot,
            &category_ticks,
            CategoryLabelStyle {
                font_size_px: 12.0,
                weight: FontWeight::Normal,
                rotation_deg: 0.0,
            },
            &self.theme,
        );

        let legend = [
            LegendEntry::new(ANNUAL_LABEL, ANNUAL_COLOR, LegendIcon::Line),
            LegendEntry::new(CUMULATIVE_LABEL, CUMULATIVE_COLOR, LegendIcon::Line),
        ];
        push_inline_legend(
            &mut frame,
            &legend,
            f64::from(viewport.width) * 0.5,
            LAYOUT.legend_center_y(0.0),
        );

        push_caption(&mut frame, CAPTION, LAYOUT.container_height, &self.theme);
        push_tooltip(self, &mut frame, pointer, target, &self.theme);

        debug!(
            years = self.points.len(),
            primitives = frame.primitive_count(),
            "built token emissions frame"
        );
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::{TokenEmissionsChart, derive_inflation, emission_schedule};
    use crate::charts::Chart;
    use crate::core::{Point, Viewport};
    use crate::interaction::HoverTarget;
    use crate::render::FrameLayer;

    #[test]
    fn derived_inflation_matches_published_rates() {
        let inflation: Vec<u32> = emission_schedule().iter().map(|p| p.inflation).collect();
        assert_eq!(inflation, vec![0, 200, 83, 36, 20, 11, 0]);
    }

    #[test]
    fn inflation_of_single_row_is_zero() {
        assert_eq!(derive_inflation(&[(500, 500)]), vec![0]);
        assert!(derive_inflation(&[]).is_empty());
    }

    #[test]
    fn cumulative_supply_never_decreases() {
        let cumulative: Vec<u32> = emission_schedule().iter().map(|p| p.cumulative).collect();
        assert_eq!(cumulative, vec![100, 300, 550, 750, 900, 1_000, 1_000]);
        assert!(cumulative.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn tooltip_reports_year_amounts() {
        let chart = TokenEmissionsChart::new();
        let tooltip = chart.tooltip(Some(HoverTarget::Category(2))).expect("tooltip");
        assert_eq!(
            tooltip.texts(),
            vec![
                "Year 2",
                "Annual Emission: 250M NZT",
                "Cumulative Supply: 550M NZT",
                "Inflation Rate: 83%",
            ]
        );
    }

    #[test]
    fn hover_draws_cursor_and_two_active_dots() {
        let chart = TokenEmissionsChart::new();
        let viewport = Viewport::new(800, 480);
        let frame = chart
            .build_render_frame(viewport, Some(Point::new(400.0, 200.0)))
            .expect("frame");
        assert_eq!(frame.layer(FrameLayer::Overlay).circles.len(), 2);
        assert_eq!(frame.layer(FrameLayer::Series).paths.len(), 4);

        let idle = chart.build_render_frame(viewport, None).expect("frame");
        assert!(idle.layer(FrameLayer::Overlay).circles.is_empty());
    }
}

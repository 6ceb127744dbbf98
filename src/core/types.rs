use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn ensure_valid(self) -> ChartResult<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Pixel position inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Outer spacing around a cartesian plot, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

/// Resolves the plot rectangle left after reserving margins and axis bands.
///
/// `axis_left` is the vertical-axis band width and `axis_bottom` the
/// category-axis band height; both are carved out of the area inside margins.
pub fn resolve_plot_area(
    viewport: Viewport,
    chart_height: f64,
    margins: Margins,
    axis_left: f64,
    axis_bottom: f64,
) -> ChartResult<PixelRect> {
    let viewport = viewport.ensure_valid()?;
    let width = f64::from(viewport.width) - margins.left - margins.right - axis_left;
    let height = chart_height - margins.top - margins.bottom - axis_bottom;
    if width <= 0.0 || height <= 0.0 {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    Ok(PixelRect::new(
        margins.left + axis_left,
        margins.top,
        width,
        height,
    ))
}

#[cfg(test)]
mod tests {
    use super::{Margins, PixelRect, Point, Viewport, resolve_plot_area};

    #[test]
    fn plot_area_reserves_margins_and_axis_bands() {
        let area = resolve_plot_area(
            Viewport::new(800, 400),
            400.0,
            Margins::new(20.0, 30.0, 20.0, 0.0),
            60.0,
            30.0,
        )
        .expect("plot area");
        assert_eq!(area, PixelRect::new(60.0, 20.0, 710.0, 330.0));
    }

    #[test]
    fn plot_area_rejects_viewport_smaller_than_margins() {
        let result = resolve_plot_area(
            Viewport::new(50, 400),
            400.0,
            Margins::new(20.0, 30.0, 20.0, 0.0),
            60.0,
            30.0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn rect_contains_edges() {
        let rect = PixelRect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(Point::new(10.0, 30.0)));
        assert!(!rect.contains(Point::new(9.9, 15.0)));
    }
}

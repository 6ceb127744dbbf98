use crate::error::{ChartError, ChartResult};

/// Pixel span a scale projects onto.
///
/// `start` maps to the domain start. Vertical value axes pass the plot bottom
/// as `start` so larger values land higher on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRange {
    pub start: f64,
    pub end: f64,
}

impl PixelRange {
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.end - self.start
    }

    fn validate(self) -> ChartResult<Self> {
        if !self.start.is_finite() || !self.end.is_finite() || self.start == self.end {
            return Err(ChartError::InvalidData(
                "pixel range must be finite and non-empty".to_owned(),
            ));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range: PixelRange,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64, range: PixelRange) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range: range.validate()?,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> PixelRange {
        self.range
    }

    pub fn domain_to_pixel(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(self.range.start + normalized * self.range.span())
    }

    pub fn pixel_to_domain(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (pixel - self.range.start) / self.range.span();
        Ok(self.domain_start + normalized * span)
    }
}

/// Base-10 logarithmic scale. Domain bounds and mapped values must be > 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogScale {
    linear: LinearScale,
}

impl LogScale {
    pub fn new(domain_start: f64, domain_end: f64, range: PixelRange) -> ChartResult<Self> {
        if domain_start <= 0.0 || domain_end <= 0.0 {
            return Err(ChartError::InvalidData(
                "log scale domain must be > 0".to_owned(),
            ));
        }
        let linear = LinearScale::new(domain_start.log10(), domain_end.log10(), range)?;
        Ok(Self { linear })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        let (start, end) = self.linear.domain();
        (10f64.powf(start), 10f64.powf(end))
    }

    pub fn domain_to_pixel(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChartError::InvalidData(
                "log scale value must be finite and > 0".to_owned(),
            ));
        }
        self.linear.domain_to_pixel(value.log10())
    }
}

/// Categorical scale splitting a range into equal bands.
///
/// `padding_ratio` is the share of each band left empty, split evenly on both
/// sides of the drawn bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    count: usize,
    range: PixelRange,
    padding_ratio: f64,
}

impl BandScale {
    pub fn new(count: usize, range: PixelRange, padding_ratio: f64) -> ChartResult<Self> {
        if count == 0 {
            return Err(ChartError::InvalidData(
                "band scale needs at least one category".to_owned(),
            ));
        }
        if !padding_ratio.is_finite() || !(0.0..1.0).contains(&padding_ratio) {
            return Err(ChartError::InvalidData(
                "band padding ratio must be in [0, 1)".to_owned(),
            ));
        }
        Ok(Self {
            count,
            range: range.validate()?,
            padding_ratio,
        })
    }

    #[must_use]
    pub fn step(self) -> f64 {
        self.range.span() / self.count as f64
    }

    #[must_use]
    pub fn band_start(self, index: usize) -> f64 {
        self.range.start + self.step() * index as f64
    }

    #[must_use]
    pub fn band_center(self, index: usize) -> f64 {
        self.band_start(index) + self.step() * 0.5
    }

    /// Returns `(x, width)` of the drawn bar inside band `index`.
    #[must_use]
    pub fn bar_extent(self, index: usize) -> (f64, f64) {
        let step = self.step();
        let inset = step * self.padding_ratio * 0.5;
        (self.band_start(index) + inset, step - 2.0 * inset)
    }

    /// Band index under `pixel`, if any.
    #[must_use]
    pub fn index_at(self, pixel: f64) -> Option<usize> {
        if !pixel.is_finite() {
            return None;
        }
        let offset = (pixel - self.range.start) / self.step();
        if offset < 0.0 || offset >= self.count as f64 {
            return None;
        }
        Some(offset.floor() as usize)
    }
}

/// Categorical scale placing categories on evenly spaced points, first and
/// last on the range edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointScale {
    count: usize,
    range: PixelRange,
}

impl PointScale {
    pub fn new(count: usize, range: PixelRange) -> ChartResult<Self> {
        if count == 0 {
            return Err(ChartError::InvalidData(
                "point scale needs at least one category".to_owned(),
            ));
        }
        Ok(Self {
            count,
            range: range.validate()?,
        })
    }

    #[must_use]
    pub fn step(self) -> f64 {
        if self.count == 1 {
            return 0.0;
        }
        self.range.span() / (self.count - 1) as f64
    }

    #[must_use]
    pub fn position(self, index: usize) -> f64 {
        if self.count == 1 {
            return self.range.start + self.range.span() * 0.5;
        }
        self.range.start + self.step() * index as f64
    }

    /// Nearest category to `pixel`, clamped to the valid index range.
    #[must_use]
    pub fn nearest_index(self, pixel: f64) -> usize {
        if self.count == 1 || !pixel.is_finite() {
            return 0;
        }
        let raw = ((pixel - self.range.start) / self.step()).round();
        raw.clamp(0.0, (self.count - 1) as f64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::{BandScale, LinearScale, LogScale, PixelRange, PointScale};
    use approx::assert_relative_eq;

    #[test]
    fn linear_scale_maps_inverted_vertical_range() {
        let scale = LinearScale::new(0.0, 100.0, PixelRange::new(300.0, 20.0)).expect("scale");
        assert_relative_eq!(scale.domain_to_pixel(0.0).expect("px"), 300.0);
        assert_relative_eq!(scale.domain_to_pixel(100.0).expect("px"), 20.0);
        assert_relative_eq!(scale.domain_to_pixel(50.0).expect("px"), 160.0);
        assert_relative_eq!(scale.pixel_to_domain(160.0).expect("value"), 50.0);
    }

    #[test]
    fn log_scale_spaces_decades_evenly() {
        let scale = LogScale::new(1e-6, 10.0, PixelRange::new(700.0, 0.0)).expect("scale");
        let a = scale.domain_to_pixel(1e-6).expect("px");
        let b = scale.domain_to_pixel(1e-5).expect("px");
        let c = scale.domain_to_pixel(1e-4).expect("px");
        assert_relative_eq!(a - b, b - c, epsilon = 1e-9);
        assert_relative_eq!(a - b, 100.0, epsilon = 1e-9);
        assert!(scale.domain_to_pixel(0.0).is_err());
    }

    #[test]
    fn band_scale_hits_bands_and_insets_bars() {
        let scale = BandScale::new(4, PixelRange::new(0.0, 400.0), 0.2).expect("scale");
        assert_eq!(scale.index_at(5.0), Some(0));
        assert_eq!(scale.index_at(399.0), Some(3));
        assert_eq!(scale.index_at(400.0), None);
        let (x, width) = scale.bar_extent(1);
        assert_relative_eq!(x, 110.0);
        assert_relative_eq!(width, 80.0);
    }

    #[test]
    fn point_scale_pins_edges() {
        let scale = PointScale::new(7, PixelRange::new(60.0, 660.0)).expect("scale");
        assert_relative_eq!(scale.position(0), 60.0);
        assert_relative_eq!(scale.position(6), 660.0);
        assert_eq!(scale.nearest_index(148.0), 1);
        assert_eq!(scale.nearest_index(-500.0), 0);
        assert_eq!(scale.nearest_index(5_000.0), 6);
    }
}

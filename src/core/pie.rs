use serde::{Deserialize, Serialize};

use crate::core::Point;
use crate::error::{ChartError, ChartResult};

pub const RADIAN: f64 = std::f64::consts::PI / 180.0;

const FULL_TURN_EPSILON_DEG: f64 = 1e-6;

/// Angular and radial extent of one pie slice.
///
/// Angles are in degrees, measured counter-clockwise from the positive x axis
/// with screen y pointing down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieSliceGeometry {
    pub start_angle: f64,
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Share of the whole pie in `[0, 1]`.
    pub percent: f64,
}

impl PieSliceGeometry {
    #[must_use]
    pub fn mid_angle(self) -> f64 {
        (self.start_angle + self.end_angle) * 0.5
    }

    #[must_use]
    pub fn contains_angle(self, angle: f64) -> bool {
        angle >= self.start_angle && angle < self.end_angle
    }
}

/// Pie center and radii in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieFrame {
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PieFrame {
    fn validate(self) -> ChartResult<Self> {
        if !self.center.x.is_finite() || !self.center.y.is_finite() {
            return Err(ChartError::InvalidData(
                "pie center must be finite".to_owned(),
            ));
        }
        if !self.inner_radius.is_finite()
            || !self.outer_radius.is_finite()
            || self.inner_radius < 0.0
            || self.outer_radius <= self.inner_radius
        {
            return Err(ChartError::InvalidData(
                "pie radii must be finite with outer > inner >= 0".to_owned(),
            ));
        }
        if !self.start_angle.is_finite() || !self.end_angle.is_finite() {
            return Err(ChartError::InvalidData(
                "pie angles must be finite".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Splits the pie sweep proportionally to `values`, in order.
pub fn layout_pie(frame: PieFrame, values: &[f64]) -> ChartResult<Vec<PieSliceGeometry>> {
    let frame = frame.validate()?;
    if values.iter().any(|value| !value.is_finite() || *value < 0.0) {
        return Err(ChartError::InvalidData(
            "pie values must be finite and >= 0".to_owned(),
        ));
    }
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return Err(ChartError::InvalidData(
            "pie values must not sum to zero".to_owned(),
        ));
    }

    let sweep = frame.end_angle - frame.start_angle;
    let mut cursor = frame.start_angle;
    let slices = values
        .iter()
        .map(|value| {
            let percent = value / total;
            let start_angle = cursor;
            cursor += sweep * percent;
            PieSliceGeometry {
                start_angle,
                end_angle: cursor,
                inner_radius: frame.inner_radius,
                outer_radius: frame.outer_radius,
                percent,
            }
        })
        .collect();
    Ok(slices)
}

/// Projects a polar coordinate (degrees, counter-clockwise) to screen space.
#[must_use]
pub fn polar_to_cartesian(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + radius * (-angle * RADIAN).cos(),
        center.y + radius * (-angle * RADIAN).sin(),
    )
}

/// Label anchor at the slice's angular midpoint and half radius.
#[must_use]
pub fn slice_label_position(center: Point, slice: PieSliceGeometry) -> Point {
    let radius = slice.inner_radius + (slice.outer_radius - slice.inner_radius) * 0.5;
    polar_to_cartesian(center, radius, slice.mid_angle())
}

/// Index of the slice under `point`, if it falls inside the ring.
#[must_use]
pub fn slice_at(center: Point, slices: &[PieSliceGeometry], point: Point) -> Option<usize> {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    let distance = dx.hypot(dy);
    let first = slices.first()?;
    if distance < first.inner_radius || distance > first.outer_radius {
        return None;
    }

    // Screen y grows downwards, so negate it to recover the math angle.
    let mut angle = (-dy).atan2(dx) / RADIAN;
    let base = first.start_angle;
    while angle < base {
        angle += 360.0;
    }
    while angle >= base + 360.0 {
        angle -= 360.0;
    }
    slices
        .iter()
        .position(|slice| slice.contains_angle(angle))
        .or_else(|| {
            // Accumulated sweeps can stop a hair short of a full turn.
            let last = slices.last()?;
            (base + 360.0 - last.end_angle < FULL_TURN_EPSILON_DEG).then(|| slices.len() - 1)
        })
}

#[cfg(test)]
mod tests {
    use super::{PieFrame, PieSliceGeometry, RADIAN, layout_pie, slice_at, slice_label_position};
    use crate::core::Point;
    use approx::assert_relative_eq;

    fn frame() -> PieFrame {
        PieFrame {
            center: Point::new(400.0, 200.0),
            inner_radius: 0.0,
            outer_radius: 140.0,
            start_angle: 0.0,
            end_angle: 360.0,
        }
    }

    #[test]
    fn slices_sweep_proportionally() {
        let slices = layout_pie(frame(), &[35.0, 35.0, 20.0, 10.0]).expect("layout");
        assert_eq!(slices.len(), 4);
        assert_relative_eq!(slices[0].end_angle, 126.0, epsilon = 1e-9);
        assert_relative_eq!(slices[2].start_angle, 252.0, epsilon = 1e-9);
        assert_relative_eq!(slices[3].end_angle, 360.0, epsilon = 1e-9);
    }

    #[test]
    fn sliver_before_full_turn_maps_to_last_slice() {
        let slice = |start_angle, end_angle| PieSliceGeometry {
            start_angle,
            end_angle,
            inner_radius: 0.0,
            outer_radius: 140.0,
            percent: 0.5,
        };
        let center = Point::new(400.0, 200.0);
        let short = [slice(0.0, 180.0), slice(180.0, 360.0 - 1e-10)];
        // Just below the positive x axis: 360 - 5e-11 degrees.
        let point = Point::new(500.0, 200.0 + 100.0 * (5e-11 * RADIAN).tan());
        assert_eq!(slice_at(center, &short, point), Some(1));

        let partial = [slice(0.0, 90.0), slice(90.0, 180.0)];
        assert_eq!(slice_at(center, &partial, Point::new(400.0, 260.0)), None);
    }

    #[test]
    fn label_sits_at_half_radius_on_mid_angle() {
        let slices = layout_pie(frame(), &[50.0, 50.0]).expect("layout");
        let label = slice_label_position(Point::new(400.0, 200.0), slices[0]);
        // Mid angle 90 degrees points straight up on screen.
        assert_relative_eq!(label.x, 400.0, epsilon = 1e-9);
        assert_relative_eq!(label.y, 130.0, epsilon = 1e-9);
    }

    #[test]
    fn hit_test_resolves_slice_by_angle() {
        let center = Point::new(400.0, 200.0);
        let slices = layout_pie(frame(), &[25.0, 25.0, 25.0, 25.0]).expect("layout");
        assert_eq!(slice_at(center, &slices, Point::new(450.0, 150.0)), Some(0));
        assert_eq!(slice_at(center, &slices, Point::new(350.0, 150.0)), Some(1));
        assert_eq!(slice_at(center, &slices, Point::new(350.0, 250.0)), Some(2));
        assert_eq!(slice_at(center, &slices, Point::new(450.0, 250.0)), Some(3));
        assert_eq!(slice_at(center, &slices, Point::new(700.0, 200.0)), None);
    }

    #[test]
    fn zero_total_is_rejected() {
        assert!(layout_pie(frame(), &[0.0, 0.0]).is_err());
    }
}

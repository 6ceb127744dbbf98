use serde::{Deserialize, Serialize};

use crate::core::Point;

/// One step of a pixel-space path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    Close,
}

impl PathCommand {
    /// End point reached by this command, `None` for `Close`.
    #[must_use]
    pub fn end_point(self) -> Option<Point> {
        match self {
            Self::MoveTo(point) | Self::LineTo(point) => Some(point),
            Self::CubicTo { end, .. } => Some(end),
            Self::Close => None,
        }
    }
}

fn sign(value: f64) -> f64 {
    if value < 0.0 { -1.0 } else { 1.0 }
}

/// Tangent at `p1` limited so the curve never overshoots its neighbours.
fn interior_tangent(p0: Point, p1: Point, p2: Point) -> f64 {
    let h0 = p1.x - p0.x;
    let h1 = p2.x - p1.x;
    if h0 == 0.0 || h1 == 0.0 {
        return 0.0;
    }
    let s0 = (p1.y - p0.y) / h0;
    let s1 = (p2.y - p1.y) / h1;
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let tangent = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if tangent.is_finite() { tangent } else { 0.0 }
}

/// Endpoint tangent derived from the neighbouring interior tangent.
fn edge_tangent(from: Point, to: Point, neighbour: f64) -> f64 {
    let h = to.x - from.x;
    if h == 0.0 {
        return neighbour;
    }
    (3.0 * (to.y - from.y) / h - neighbour) * 0.5
}

/// Monotone cubic interpolation along x through `points`.
///
/// Emits a `MoveTo` followed by one segment per consecutive pair: a straight
/// line when only two points exist, cubic segments otherwise. Points must be
/// sorted by x.
#[must_use]
pub fn monotone_x_path(points: &[Point]) -> Vec<PathCommand> {
    let Some(first) = points.first().copied() else {
        return Vec::new();
    };
    let mut commands = Vec::with_capacity(points.len());
    commands.push(PathCommand::MoveTo(first));
    if points.len() == 2 {
        commands.push(PathCommand::LineTo(points[1]));
        return commands;
    }
    if points.len() < 2 {
        return commands;
    }

    let last = points.len() - 1;
    let mut tangents = vec![0.0; points.len()];
    for index in 1..last {
        tangents[index] = interior_tangent(points[index - 1], points[index], points[index + 1]);
    }
    tangents[0] = edge_tangent(points[0], points[1], tangents[1]);
    tangents[last] = edge_tangent(points[last - 1], points[last], tangents[last - 1]);

    for index in 0..last {
        let start = points[index];
        let end = points[index + 1];
        let dx = (end.x - start.x) / 3.0;
        commands.push(PathCommand::CubicTo {
            control1: Point::new(start.x + dx, start.y + dx * tangents[index]),
            control2: Point::new(end.x - dx, end.y - dx * tangents[index + 1]),
            end,
        });
    }
    commands
}

/// Closes a curve down to `baseline_y`, producing a fillable area outline.
#[must_use]
pub fn close_to_baseline(curve: &[PathCommand], baseline_y: f64) -> Vec<PathCommand> {
    let first_x = curve.first().and_then(|command| command.end_point()).map(|p| p.x);
    let last_x = curve.last().and_then(|command| command.end_point()).map(|p| p.x);
    let (Some(first_x), Some(last_x)) = (first_x, last_x) else {
        return Vec::new();
    };

    let mut area = Vec::with_capacity(curve.len() + 3);
    area.extend_from_slice(curve);
    area.push(PathCommand::LineTo(Point::new(last_x, baseline_y)));
    area.push(PathCommand::LineTo(Point::new(first_x, baseline_y)));
    area.push(PathCommand::Close);
    area
}

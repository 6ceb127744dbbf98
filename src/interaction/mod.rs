use serde::{Deserialize, Serialize};

use crate::charts::Scenario;
use crate::core::Point;

/// What the pointer currently rests on inside one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoverTarget {
    /// Pie slice index.
    Slice(usize),
    /// Bar (category band) index.
    Bar(usize),
    /// Point-category index on an area chart.
    Category(usize),
    /// Scenario selector button.
    SelectorButton(Scenario),
}

impl HoverTarget {
    /// Data index for targets bound to a datum.
    #[must_use]
    pub fn datum_index(self) -> Option<usize> {
        match self {
            Self::Slice(index) | Self::Bar(index) | Self::Category(index) => Some(index),
            Self::SelectorButton(_) => None,
        }
    }
}

/// Pointer state a host feeds into frame builds.
///
/// Hosts forward raw pointer events; charts resolve targets from it on
/// each build so no hover result is cached between passes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerState {
    position: Option<Point>,
}

impl PointerState {
    /// State of a pointer resting at `(x, y)`; non-finite input means no pointer.
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        let mut state = Self::default();
        state.pointer_move(x, y);
        state
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.position = if x.is_finite() && y.is_finite() {
            Some(Point::new(x, y))
        } else {
            None
        };
    }

    pub fn pointer_leave(&mut self) {
        self.position = None;
    }

    #[must_use]
    pub fn position(self) -> Option<Point> {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::{HoverTarget, PointerState};
    use crate::charts::Scenario;
    use crate::core::Point;

    #[test]
    fn pointer_tracks_and_clears_position() {
        let mut pointer = PointerState::default();
        assert_eq!(pointer.position(), None);
        pointer.pointer_move(12.0, 30.0);
        assert_eq!(pointer.position(), Some(Point::new(12.0, 30.0)));
        pointer.pointer_move(f64::NAN, 30.0);
        assert_eq!(pointer.position(), None);
        pointer.pointer_move(1.0, 2.0);
        pointer.pointer_leave();
        assert_eq!(pointer.position(), None);
    }

    #[test]
    fn selector_targets_have_no_datum() {
        assert_eq!(HoverTarget::Bar(2).datum_index(), Some(2));
        assert_eq!(HoverTarget::SelectorButton(Scenario::Swap).datum_index(), None);
    }
}

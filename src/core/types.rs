//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of the editor canvas (cells)
pub const EDITOR_WIDTH: i32 = 500;
/// Height of the editor canvas (cells)
pub const EDITOR_HEIGHT: i32 = 500;
/// Width of the simulation grid (cells)
pub const MAP_WIDTH: i32 = 100;
/// Height of the simulation grid (cells)
pub const MAP_HEIGHT: i32 = 100;

/// Faces on the combat die
pub const DICE_SIDES: u32 = 6;

/// Integer grid position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt()
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    pub fn is_within_editor_bounds(&self) -> bool {
        Bounds::EDITOR.contains(*self)
    }

    pub fn is_within_simulation_bounds(&self) -> bool {
        Bounds::SIMULATION.contains(*self)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Half-open rectangle anchored at the origin: `0 <= x < width`, `0 <= y < height`.
///
/// The editor canvas and the simulation grid are two different rectangles.
/// Entities may be placed anywhere on the editor canvas, but once the
/// simulation moves them they are clamped onto the smaller grid.
///
/// Both rectangles exclude their far edge, so x=500 is off the editor
/// canvas. The factory check and `Position::is_within_editor_bounds` share
/// this one definition and must not disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub const EDITOR: Bounds = Bounds {
        width: EDITOR_WIDTH,
        height: EDITOR_HEIGHT,
    };

    pub const SIMULATION: Bounds = Bounds {
        width: MAP_WIDTH,
        height: MAP_HEIGHT,
    };

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Axis-wise clamp; out-of-range coordinates land exactly on the edge.
    pub fn clamp(&self, pos: Position) -> Position {
        Position {
            x: pos.x.clamp(0, self.width - 1),
            y: pos.y.clamp(0, self.height - 1),
        }
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x in [0, {}], y in [0, {}]",
            self.width - 1,
            self.height - 1
        )
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::EDITOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_pythagorean() {
        let a = Position::new(0, 0);
        let b = Position::new(3, 4);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn test_editor_and_simulation_bounds_differ() {
        let p = Position::new(499, 50);
        assert!(p.is_within_editor_bounds());
        assert!(!p.is_within_simulation_bounds());

        assert!(Position::new(50, 50).is_within_simulation_bounds());
        assert!(!Position::new(-1, 50).is_within_simulation_bounds());
        assert!(!Position::new(500, 0).is_within_editor_bounds());
    }

    #[test]
    fn test_clamp_lands_on_edge() {
        let b = Bounds::SIMULATION;
        assert_eq!(b.clamp(Position::new(-20, 140)), Position::new(0, 99));
        assert_eq!(b.clamp(Position::new(42, 7)), Position::new(42, 7));
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(10, 20).to_string(), "(10, 20)");
    }
}

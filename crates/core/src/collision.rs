//! Collision detection shared by moves, rotations, spawns and ghost projection

use serde::Serialize;

use crate::grid::Grid;
use crate::pieces::PieceShape;

/// Top-left anchor of a piece's bounding box in grid coordinates (hidden rows included)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// This offset moved by (dx, dy)
    pub fn shifted(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Stateless legality checks over a grid
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionDetector;

impl CollisionDetector {
    /// Shape at `at` overlaps a filled cell or leaves the grid
    #[inline]
    pub fn intersects(grid: &Grid, shape: &PieceShape, at: Offset) -> bool {
        grid.intersects(shape, at.x, at.y)
    }

    #[inline]
    pub fn can_place(grid: &Grid, shape: &PieceShape, at: Offset) -> bool {
        !Self::intersects(grid, shape, at)
    }

    /// Lowest row the shape can occupy when dropped straight down from `(x, y)`
    ///
    /// Returns `y` unchanged when the shape cannot be placed at `(x, y)` at all.
    pub fn landing_y(grid: &Grid, shape: &PieceShape, x: i32, y: i32) -> i32 {
        let mut at = Offset::new(x, y);
        if Self::intersects(grid, shape, at) {
            return y;
        }
        while Self::can_place(grid, shape, at.shifted(0, 1)) {
            at = at.shifted(0, 1);
        }
        at.y
    }
}

//! Configuration errors
//!
//! These are integration mistakes (bad dimensions, unknown piece ids, malformed shape
//! tables) and are reported at construction time. Gameplay itself never errors: rejected
//! moves are plain `false` returns.

use blockfall_types::Cell;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid grid dimensions {width}x{height} (need width > 0, height > {hidden_rows} hidden rows, and a cell count that fits in memory)")]
    InvalidDimensions {
        width: usize,
        height: usize,
        hidden_rows: usize,
    },

    #[error("spawn offset ({x}, {y}) cannot hold piece {piece} on an empty {width}x{height} grid")]
    SpawnOutOfBounds {
        x: i32,
        y: i32,
        piece: &'static str,
        width: usize,
        height: usize,
    },

    #[error("unknown piece identity: {0:?}")]
    UnknownPiece(String),

    #[error("invalid cell value {0} (expected 0..=7)")]
    InvalidCell(Cell),

    #[error("ragged rows: row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("piece {piece} has cell value {found}, expected its color {expected}")]
    ColorMismatch {
        piece: &'static str,
        expected: Cell,
        found: Cell,
    },

    #[error("piece has {0} rotation states, at most {} supported", crate::pieces::MAX_ROTATIONS)]
    TooManyRotations(usize),

    #[error("empty shape or grid")]
    Empty,
}

//! Line clear engine - full-row detection and gravity compaction
//!
//! Full rows are removed and the surviving rows drop to the bottom of a fresh grid,
//! keeping their relative order. Empty rows appear at the top.

use serde::Serialize;

use crate::grid::Grid;

/// Outcome of one line clear pass
///
/// An owned value: the grid inside is an independent copy, not a view into the
/// playfield.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineClearResult {
    pub lines_removed: u32,
    pub compacted_grid: Grid,
    /// Points awarded for this clear
    ///
    /// The engine leaves this at 0; [`crate::ScoreTracker::apply_line_clear`] owns the
    /// formula and the playfield fills it in once the clear is scored.
    pub score_bonus: i64,
    /// Pre-compaction indices of the removed rows, ascending
    pub cleared_row_indices: Vec<usize>,
}

impl LineClearResult {
    /// Whether `lines_removed` agrees with the recorded row indices
    pub fn is_consistent(&self) -> bool {
        self.lines_removed as usize == self.cleared_row_indices.len()
    }

    /// This result with `score_bonus` set
    pub fn with_bonus(mut self, bonus: i64) -> Self {
        self.score_bonus = bonus;
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LineClearEngine;

impl LineClearEngine {
    /// Find full rows in `grid` and build the compacted grid
    ///
    /// `grid` itself is not modified.
    pub fn check_and_clear(grid: &Grid) -> LineClearResult {
        let cleared_row_indices: Vec<usize> =
            (0..grid.height()).filter(|&y| grid.is_row_full(y)).collect();

        if cleared_row_indices.is_empty() {
            return LineClearResult {
                lines_removed: 0,
                compacted_grid: grid.clone(),
                score_bonus: 0,
                cleared_row_indices,
            };
        }

        // Two pointers from the bottom: every surviving row lands at the next free slot.
        let mut compacted = grid.empty_like();
        let mut write_y = grid.height();
        for read_y in (0..grid.height()).rev() {
            if grid.is_row_full(read_y) {
                continue;
            }
            write_y -= 1;
            if let Some(row) = grid.row(read_y) {
                compacted.row_mut(write_y).copy_from_slice(row);
            }
        }

        LineClearResult {
            lines_removed: cleared_row_indices.len() as u32,
            compacted_grid: compacted,
            score_bonus: 0,
            cleared_row_indices,
        }
    }
}

//! Scoring module - points, lines and the combo streak
//!
//! Line clears are worth `50 * lines^2 * (1 + combo)`. The combo counts consecutive
//! locks that cleared at least one line, and a clearing lock bumps it *before* its own
//! bonus is computed, so the first clear of a streak already multiplies by 2:
//!
//! | lines | combo before | combo used | bonus |
//! |-------|--------------|------------|-------|
//! | 1 | 0 | 1 | 100 |
//! | 4 | 0 | 1 | 1600 |
//! | 1 | 1 | 2 | 150 |
//!
//! A lock that clears nothing resets the combo to 0.
//!
//! Drops: a user-initiated soft drop step is worth 1 point, a tick-driven step is worth
//! nothing, and a hard drop is worth 2 points per row fallen.

use serde::Serialize;
use tracing::debug;

use crate::line_clear::LineClearResult;
use crate::types::{HARD_DROP_POINTS_PER_CELL, LINE_CLEAR_BASE, SOFT_DROP_POINTS};

/// Bonus for clearing `lines` rows with the (already incremented) `combo`
pub fn line_clear_bonus(lines: u32, combo: u32) -> i64 {
    if lines == 0 {
        return 0;
    }
    let lines = lines as i64;
    LINE_CLEAR_BASE * lines * lines * (1 + combo as i64)
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> i64 {
    if is_hard_drop {
        cells as i64 * HARD_DROP_POINTS_PER_CELL
    } else {
        cells as i64 * SOFT_DROP_POINTS
    }
}

/// Score totals at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct ScoreState {
    pub points: i64,
    /// Signed like `points`: `add_lines` accepts negative adjustments and never clamps
    pub lines_total: i64,
    pub combo: u32,
}

/// Running score for one session
#[derive(Debug, Clone, Default)]
pub struct ScoreTracker {
    state: ScoreState,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScoreState {
        self.state
    }

    pub fn points(&self) -> i64 {
        self.state.points
    }

    pub fn lines(&self) -> i64 {
        self.state.lines_total
    }

    pub fn combo(&self) -> u32 {
        self.state.combo
    }

    /// Add `n` points; negative values subtract, nothing is clamped
    pub fn add_points(&mut self, n: i64) {
        self.state.points += n;
    }

    pub fn add_lines(&mut self, n: i64) {
        self.state.lines_total += n;
    }

    /// One row of descent; pays only when the user asked for it
    ///
    /// Returns the points awarded.
    pub fn soft_drop_tick(&mut self, is_user_initiated: bool) -> i64 {
        if !is_user_initiated {
            return 0;
        }
        let points = calculate_drop_score(1, false);
        self.add_points(points);
        points
    }

    /// Award a hard drop of `cells_dropped` rows; returns the points awarded
    pub fn hard_drop(&mut self, cells_dropped: u32) -> i64 {
        let points = calculate_drop_score(cells_dropped, true);
        self.add_points(points);
        points
    }

    /// Score a lock that removed `lines_removed` rows and return the bonus
    ///
    /// Zero lines resets the combo and awards nothing. Otherwise the combo is
    /// incremented first and the bonus uses the new value.
    pub fn apply_line_clear(&mut self, lines_removed: u32) -> i64 {
        if lines_removed == 0 {
            self.state.combo = 0;
            return 0;
        }

        self.state.combo += 1;
        let bonus = line_clear_bonus(lines_removed, self.state.combo);
        self.add_points(bonus);
        self.add_lines(lines_removed as i64);

        debug!(
            lines = lines_removed,
            combo = self.state.combo,
            bonus,
            "line clear scored"
        );
        bonus
    }

    /// Score a [`LineClearResult`] if there is a usable one
    ///
    /// A missing result, or one whose line count disagrees with its row indices, is
    /// ignored: no points and no combo change.
    pub fn apply_result(&mut self, result: Option<&LineClearResult>) -> i64 {
        match result {
            Some(result) if result.is_consistent() => self.apply_line_clear(result.lines_removed),
            _ => 0,
        }
    }

    /// Zero points, lines and combo
    pub fn reset(&mut self) {
        self.state = ScoreState::default();
    }
}

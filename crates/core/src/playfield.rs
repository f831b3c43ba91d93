//! Playfield module - the game session state machine
//!
//! Ties together the grid, the active piece, the piece source and the score tracker.
//! A session moves through these phases:
//!
//! ```text
//! AwaitingSpawn --spawn_next--> Active --lock/clear--> AwaitingSpawn
//!                                  \
//!                                   `--spawn collides--> ToppedOut (terminal)
//! ```
//!
//! The phases are implied by the call sequence rather than stored, except for the
//! terminal top-out flag. Every legality check is a `bool`; nothing here panics or
//! returns an error during play.
//!
//! There is no clock in here. A tick scheduler calls [`Playfield::move_down`] (or
//! [`Playfield::apply_intent`] with [`MoveIntent::tick`]) at whatever cadence it likes,
//! and pausing is simply not calling it.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::collision::{CollisionDetector, Offset};
use crate::error::ConfigError;
use crate::grid::Grid;
use crate::line_clear::{LineClearEngine, LineClearResult};
use crate::pieces::{Piece, PieceCatalog, PieceShape};
use crate::rng::PieceSource;
use crate::rotation::RotationCursor;
use crate::scoring::{ScoreState, ScoreTracker};
use crate::snapshot::{PlayfieldSnapshot, PreviewSnapshot};
use crate::types::{Direction, MoveIntent, PlayfieldConfig, RotationPolicy};

/// Result of locking the active piece and spawning the next one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled {
    /// Line clear with `score_bonus` filled in
    pub cleared: LineClearResult,
    pub topped_out: bool,
}

/// What a [`MoveIntent`] did
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntentOutcome {
    /// The piece moved or rotated
    pub moved: bool,
    /// Rows fallen by a hard drop
    pub distance: u32,
    /// Present when the intent locked the piece
    pub cleared: Option<LineClearResult>,
    pub topped_out: bool,
}

/// Complete playfield state
#[derive(Debug, Clone)]
pub struct Playfield {
    config: PlayfieldConfig,
    grid: Grid,
    cursor: RotationCursor,
    source: PieceSource,
    score: ScoreTracker,
    offset: Offset,
    held: Option<Arc<Piece>>,
    can_hold: bool,
    topped_out: bool,
    /// Pieces spawned this game (hold swaps excluded)
    pieces_spawned: u64,
}

impl Playfield {
    /// Validate `config`, then start a new game
    pub fn new(config: PlayfieldConfig) -> Result<Self, ConfigError> {
        let grid = Grid::with_hidden_rows(config.width, config.height, config.hidden_rows)?;
        let catalog = PieceCatalog::new()?;
        let spawn = Offset::new(config.spawn_x, config.spawn_y);

        if let Some(piece) = catalog
            .iter()
            .find(|piece| CollisionDetector::intersects(&grid, piece.spawn_shape(), spawn))
        {
            return Err(ConfigError::SpawnOutOfBounds {
                x: spawn.x,
                y: spawn.y,
                piece: piece.kind().as_str(),
                width: config.width,
                height: config.height,
            });
        }

        let source = PieceSource::new(catalog, config.seed);
        let cursor = RotationCursor::new(source.peek(), config.rotation_policy);

        let mut playfield = Self {
            config,
            grid,
            cursor,
            source,
            score: ScoreTracker::new(),
            offset: spawn,
            held: None,
            can_hold: true,
            topped_out: false,
            pieces_spawned: 0,
        };
        playfield.new_game();
        Ok(playfield)
    }

    /// Default-sized playfield with the given seed
    pub fn with_seed(seed: u32) -> Result<Self, ConfigError> {
        Self::new(PlayfieldConfig {
            seed,
            ..PlayfieldConfig::default()
        })
    }

    fn spawn_offset(&self) -> Offset {
        Offset::new(self.config.spawn_x, self.config.spawn_y)
    }

    /// Empty the grid, reset the score and spawn the first piece
    ///
    /// Returns `true` if that first spawn topped out.
    pub fn new_game(&mut self) -> bool {
        self.grid.clear();
        self.score.reset();
        self.held = None;
        self.topped_out = false;
        self.pieces_spawned = 0;
        debug!(
            width = self.grid.width(),
            height = self.grid.height(),
            seed = self.source.seed(),
            "new game"
        );
        self.spawn_next()
    }

    /// Install the next piece from the source at the spawn offset
    ///
    /// Returns `true` when the new piece already collides there: the session is over
    /// and the grid is left as it was. Once topped out this does nothing and keeps
    /// returning `true` until [`Playfield::new_game`].
    pub fn spawn_next(&mut self) -> bool {
        if self.topped_out {
            return true;
        }
        let piece = self.source.next();
        let kind = piece.kind();
        self.cursor.set_piece(piece);
        self.offset = self.spawn_offset();
        self.can_hold = true;
        self.pieces_spawned += 1;

        if CollisionDetector::intersects(&self.grid, self.cursor.current_shape(), self.offset) {
            self.topped_out = true;
            warn!(
                piece = kind.as_str(),
                points = self.score.points(),
                lines = self.score.lines(),
                "topped out"
            );
            return true;
        }

        debug!(piece = kind.as_str(), next = self.source.peek_kind().as_str(), "spawned");
        false
    }

    fn try_shift(&mut self, dx: i32, dy: i32) -> bool {
        if self.topped_out {
            return false;
        }
        let candidate = self.offset.shifted(dx, dy);
        if CollisionDetector::can_place(&self.grid, self.cursor.current_shape(), candidate) {
            self.offset = candidate;
            return true;
        }
        trace!(dx, dy, x = self.offset.x, y = self.offset.y, "move rejected");
        false
    }

    pub fn move_left(&mut self) -> bool {
        self.try_shift(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_shift(1, 0)
    }

    pub fn move_down(&mut self) -> bool {
        self.try_shift(0, 1)
    }

    /// Rotate in place to the policy's next state
    ///
    /// There is no wall kick: if the rotated shape collides at the current offset the
    /// rotation is refused.
    pub fn rotate(&mut self) -> bool {
        if self.topped_out {
            return false;
        }
        let (shape, next) = self.cursor.proposed_next();
        let fits = CollisionDetector::can_place(&self.grid, shape, self.offset);
        if fits {
            self.cursor.commit(next);
        } else {
            trace!(from = self.cursor.index(), to = next, "rotation rejected");
        }
        fits
    }

    /// Drop straight down as far as possible; returns the rows fallen
    ///
    /// Does not lock or score; see [`Playfield::apply_intent`] for the full sequence.
    pub fn hard_drop(&mut self) -> u32 {
        let mut distance = 0;
        while self.move_down() {
            distance += 1;
        }
        distance
    }

    /// Landing row of the active shape dropped from `(x, y)`
    ///
    /// Pure projection for ghost rendering; nothing is mutated.
    pub fn ghost_y(&self, x: i32, y: i32) -> i32 {
        CollisionDetector::landing_y(&self.grid, self.cursor.current_shape(), x, y)
    }

    /// Merge the active shape into the grid at the current offset
    ///
    /// Returns a copy of the merged grid. After a top-out the grid is left alone.
    pub fn lock(&mut self) -> Grid {
        if self.topped_out {
            return self.grid.clone();
        }
        let shape = self.cursor.current_shape();
        self.grid = self.grid.merge(shape, self.offset.x, self.offset.y);
        debug!(
            piece = self.cursor.piece().kind().as_str(),
            x = self.offset.x,
            y = self.offset.y,
            rotation = self.cursor.index(),
            "locked"
        );
        self.grid.clone()
    }

    /// Remove full rows from the grid
    ///
    /// Scoring is left to the caller (feed `lines_removed` to the score tracker), as is
    /// spawning the next piece. The returned bonus is 0.
    pub fn clear(&mut self) -> LineClearResult {
        let result = LineClearEngine::check_and_clear(&self.grid);
        if result.lines_removed > 0 {
            self.grid = result.compacted_grid.clone();
            debug!(rows = ?result.cleared_row_indices, "rows cleared");
        }
        result
    }

    /// Lock, clear, score the clear, then spawn the next piece
    ///
    /// After a top-out nothing happens: the result is an empty clear of the current grid.
    pub fn settle(&mut self) -> Settled {
        if self.topped_out {
            return Settled {
                cleared: LineClearResult {
                    lines_removed: 0,
                    compacted_grid: self.grid.clone(),
                    score_bonus: 0,
                    cleared_row_indices: Vec::new(),
                },
                topped_out: true,
            };
        }
        self.lock();
        let result = self.clear();
        let bonus = self.score.apply_line_clear(result.lines_removed);
        let topped_out = self.spawn_next();
        Settled {
            cleared: result.with_bonus(bonus),
            topped_out,
        }
    }

    /// Swap the active piece with the held one
    ///
    /// With nothing held yet, the active piece is stored and the next source piece comes
    /// in. Allowed once per spawned piece. The incoming piece starts at the spawn offset
    /// in its first rotation state; if it collides there the session tops out.
    pub fn hold(&mut self) -> bool {
        if self.topped_out || !self.can_hold {
            return false;
        }

        let current = Arc::clone(self.cursor.piece());
        let incoming = match self.held.take() {
            Some(piece) => piece,
            None => self.source.next(),
        };
        debug!(
            held = current.kind().as_str(),
            active = incoming.kind().as_str(),
            "hold"
        );
        self.cursor.set_piece(incoming);
        self.held = Some(current);
        self.offset = self.spawn_offset();
        self.can_hold = false;

        if CollisionDetector::intersects(&self.grid, self.cursor.current_shape(), self.offset) {
            self.topped_out = true;
            warn!("topped out on hold");
        }
        true
    }

    /// Apply one input or tick event
    ///
    /// - `Left`/`Right`/`RotateClockwise`: the matching move
    /// - `Down`: one row; a user step scores a soft drop point. When the piece cannot
    ///   descend it settles (lock, clear, score, spawn).
    /// - `HardDrop`: drop, score 2 per row, then settle
    ///
    /// Ignored once topped out.
    pub fn apply_intent(&mut self, intent: MoveIntent) -> IntentOutcome {
        if self.topped_out {
            return IntentOutcome {
                topped_out: true,
                ..IntentOutcome::default()
            };
        }

        let moved = match intent.direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::RotateClockwise => self.rotate(),
            Direction::Down => {
                if !self.move_down() {
                    return self.settle_outcome(0);
                }
                self.score.soft_drop_tick(intent.is_user_initiated());
                true
            }
            Direction::HardDrop => {
                let distance = self.hard_drop();
                self.score.hard_drop(distance);
                return self.settle_outcome(distance);
            }
        };

        IntentOutcome {
            moved,
            topped_out: self.topped_out,
            ..IntentOutcome::default()
        }
    }

    fn settle_outcome(&mut self, distance: u32) -> IntentOutcome {
        let settled = self.settle();
        IntentOutcome {
            moved: distance > 0,
            distance,
            cleared: Some(settled.cleared),
            topped_out: settled.topped_out,
        }
    }

    /// Owned copies of the active piece, its offset and the previews
    pub fn snapshot(&self) -> PlayfieldSnapshot {
        let next = self.source.peek();
        PlayfieldSnapshot {
            kind: self.cursor.piece().kind(),
            rotation_index: self.cursor.index(),
            shape: self.cursor.current_shape().clone(),
            offset: self.offset,
            ghost_y: self.ghost_y(self.offset.x, self.offset.y),
            next: PreviewSnapshot {
                kind: next.kind(),
                shape: next.spawn_shape().clone(),
            },
            held: self.held.as_ref().map(|piece| PreviewSnapshot {
                kind: piece.kind(),
                shape: piece.spawn_shape().clone(),
            }),
            score: self.score.state(),
            topped_out: self.topped_out,
        }
    }

    /// Replace the grid, e.g. to start from a prepared board
    ///
    /// The new grid must match the configured dimensions. Returns the old grid.
    pub fn replace_grid(&mut self, grid: Grid) -> Result<Grid, ConfigError> {
        if grid.width() != self.config.width
            || grid.height() != self.config.height
            || grid.hidden_rows() != self.config.hidden_rows
        {
            return Err(ConfigError::InvalidDimensions {
                width: grid.width(),
                height: grid.height(),
                hidden_rows: grid.hidden_rows(),
            });
        }
        Ok(std::mem::replace(&mut self.grid, grid))
    }

    pub fn config(&self) -> &PlayfieldConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn current_piece(&self) -> &Arc<Piece> {
        self.cursor.piece()
    }

    pub fn current_shape(&self) -> &PieceShape {
        self.cursor.current_shape()
    }

    pub fn rotation_index(&self) -> usize {
        self.cursor.index()
    }

    /// The piece the next spawn will bring in
    pub fn next_piece(&self) -> Arc<Piece> {
        self.source.peek()
    }

    pub fn held_piece(&self) -> Option<&Arc<Piece>> {
        self.held.as_ref()
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> ScoreState {
        self.score.state()
    }

    pub fn score_tracker(&self) -> &ScoreTracker {
        &self.score
    }

    /// For callers driving `lock`/`clear` by hand and scoring the result themselves
    pub fn score_tracker_mut(&mut self) -> &mut ScoreTracker {
        &mut self.score
    }

    pub fn is_topped_out(&self) -> bool {
        self.topped_out
    }

    pub fn pieces_spawned(&self) -> u64 {
        self.pieces_spawned
    }

    pub fn rotation_policy(&self) -> RotationPolicy {
        self.cursor.policy()
    }

    pub fn set_rotation_policy(&mut self, policy: RotationPolicy) {
        self.cursor.set_policy(policy);
        self.config.rotation_policy = policy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{InputSource, PieceKind};

    fn playfield() -> Playfield {
        Playfield::with_seed(12345).unwrap()
    }

    /// Fill row `y` except for the columns in `gaps`
    fn fill_row(grid: &mut Grid, y: i32, gaps: &[i32]) {
        for x in 0..grid.width() as i32 {
            if !gaps.contains(&x) {
                grid.set(x, y, 1);
            }
        }
    }

    #[test]
    fn test_new_playfield() {
        let pf = playfield();
        assert!(!pf.is_topped_out());
        assert_eq!(pf.offset(), Offset::new(3, 0));
        assert_eq!(pf.rotation_index(), 0);
        assert_eq!(pf.score(), ScoreState::default());
        assert!(pf.grid().is_empty());
        assert_eq!(pf.pieces_spawned(), 1);
        assert!(pf.held_piece().is_none());
    }

    #[test]
    fn test_rejects_bad_config() {
        let err = Playfield::new(PlayfieldConfig {
            width: 0,
            ..PlayfieldConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDimensions { .. }));

        // The I piece is four wide and cannot start at column 8 of a 10-wide grid.
        let err = Playfield::new(PlayfieldConfig {
            spawn_x: 8,
            ..PlayfieldConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::SpawnOutOfBounds { .. }));
    }

    #[test]
    fn test_moves_shift_offset() {
        let mut pf = playfield();
        assert!(pf.move_left());
        assert_eq!(pf.offset(), Offset::new(2, 0));
        assert!(pf.move_right());
        assert!(pf.move_right());
        assert_eq!(pf.offset(), Offset::new(4, 0));
        assert!(pf.move_down());
        assert_eq!(pf.offset(), Offset::new(4, 1));
    }

    #[test]
    fn test_move_left_stops_at_wall() {
        let mut pf = playfield();
        let mut steps = 0;
        while pf.move_left() {
            steps += 1;
            assert!(steps < 20);
        }
        let before = pf.offset();
        assert!(!pf.move_left());
        assert_eq!(pf.offset(), before);
    }

    #[test]
    fn test_rotate_cycles_back() {
        let mut pf = playfield();
        // Get clear of the hidden rows so every state fits.
        for _ in 0..4 {
            pf.move_down();
        }
        let count = pf.current_piece().rotation_count();
        for _ in 0..count {
            assert!(pf.rotate());
        }
        assert_eq!(pf.rotation_index(), 0);
    }

    #[test]
    fn test_rotate_rejected_without_kick() {
        let mut pf = playfield();
        let t = pf.source.catalog().create(PieceKind::T);
        pf.cursor.set_piece(t);
        // Flat T against the floor: rotating to the upright state needs row y + 2.
        let bottom = pf.grid().height() as i32 - 2;
        pf.offset = Offset::new(3, bottom);
        assert!(CollisionDetector::can_place(pf.grid(), pf.current_shape(), pf.offset()));
        assert!(!pf.rotate());
        assert_eq!(pf.rotation_index(), 0);
        assert_eq!(pf.offset(), Offset::new(3, bottom));
    }

    #[test]
    fn test_identity_policy_keeps_shape() {
        let mut pf = playfield();
        pf.set_rotation_policy(RotationPolicy::Identity);
        let before = pf.current_shape().clone();
        assert!(pf.rotate());
        assert_eq!(pf.current_shape(), &before);
        assert_eq!(pf.rotation_policy(), RotationPolicy::Identity);
    }

    #[test]
    fn test_hard_drop_reaches_ghost() {
        let mut pf = playfield();
        let ghost = pf.ghost_y(pf.offset().x, pf.offset().y);
        let distance = pf.hard_drop();
        assert_eq!(pf.offset().y, ghost);
        assert_eq!(distance as i32, ghost);
        assert!(!pf.move_down());
    }

    #[test]
    fn test_ghost_does_not_mutate() {
        let pf = playfield();
        let before = pf.snapshot();
        let _ = pf.ghost_y(0, 0);
        assert_eq!(pf.snapshot(), before);
    }

    #[test]
    fn test_lock_merges_only_on_lock() {
        let mut pf = playfield();
        pf.hard_drop();
        assert!(pf.grid().is_empty());
        let merged = pf.lock();
        assert_eq!(merged.cells().iter().filter(|&&c| c != 0).count(), 4);
        assert_eq!(&merged, pf.grid());
    }

    #[test]
    fn test_clear_compacts_grid_without_scoring() {
        let mut pf = playfield();
        let mut grid = pf.grid().empty_like();
        fill_row(&mut grid, 21, &[]);
        fill_row(&mut grid, 20, &[0]);
        pf.replace_grid(grid).unwrap();

        let result = pf.clear();
        assert_eq!(result.lines_removed, 1);
        assert_eq!(result.cleared_row_indices, vec![21]);
        assert_eq!(result.score_bonus, 0);
        assert_eq!(pf.score().points, 0);
        assert_eq!(pf.grid().get(0, 21), Some(0));
        assert_eq!(pf.grid().get(1, 21), Some(1));
        assert!(!pf.grid().is_row_full(20));
    }

    #[test]
    fn test_spawn_onto_filled_grid_tops_out() {
        let mut pf = playfield();
        let mut grid = pf.grid().empty_like();
        for y in 0..4 {
            fill_row(&mut grid, y, &[0]);
        }
        pf.replace_grid(grid.clone()).unwrap();

        assert!(pf.spawn_next());
        assert!(pf.is_topped_out());
        assert_eq!(pf.grid(), &grid);

        // Terminal: nothing moves any more.
        assert!(!pf.move_down());
        assert!(!pf.rotate());
        assert!(!pf.hold());
        let outcome = pf.apply_intent(MoveIntent::user(Direction::HardDrop));
        assert!(outcome.topped_out);
        assert!(outcome.cleared.is_none());
        assert_eq!(pf.grid(), &grid);
    }

    #[test]
    fn test_topped_out_session_is_frozen() {
        let mut pf = Playfield::with_seed(3).unwrap();
        while !pf.is_topped_out() {
            pf.apply_intent(MoveIntent::user(Direction::HardDrop));
        }
        let grid = pf.grid().clone();
        let score = pf.score();
        let spawned = pf.pieces_spawned();

        let settled = pf.settle();
        assert!(settled.topped_out);
        assert_eq!(settled.cleared.lines_removed, 0);
        assert_eq!(settled.cleared.compacted_grid, grid);
        assert_eq!(pf.lock(), grid);
        assert!(pf.spawn_next());

        assert!(pf.is_topped_out());
        assert_eq!(pf.grid(), &grid);
        assert_eq!(pf.score(), score);
        assert_eq!(pf.pieces_spawned(), spawned);

        assert!(!pf.new_game());
        assert!(!pf.is_topped_out());
    }

    #[test]
    fn test_new_game_resets() {
        let mut pf = playfield();
        pf.apply_intent(MoveIntent::user(Direction::HardDrop));
        assert!(pf.score().points > 0);
        assert!(!pf.new_game());
        assert!(pf.grid().is_empty());
        assert_eq!(pf.score(), ScoreState::default());
        assert_eq!(pf.pieces_spawned(), 1);
    }

    #[test]
    fn test_soft_drop_scoring_by_source() {
        let mut pf = playfield();
        let outcome = pf.apply_intent(MoveIntent::user(Direction::Down));
        assert!(outcome.moved);
        assert_eq!(pf.score().points, 1);

        let outcome = pf.apply_intent(MoveIntent::new(Direction::Down, InputSource::AutomaticTick));
        assert!(outcome.moved);
        assert_eq!(pf.score().points, 1);
    }

    #[test]
    fn test_hard_drop_intent_scores_and_spawns() {
        let mut pf = playfield();
        let next = pf.next_piece().kind();
        let outcome = pf.apply_intent(MoveIntent::user(Direction::HardDrop));
        assert_eq!(pf.score().points, 2 * outcome.distance as i64);
        assert_eq!(outcome.cleared.as_ref().map(|c| c.lines_removed), Some(0));
        assert!(!outcome.topped_out);
        assert_eq!(pf.current_piece().kind(), next);
        assert_eq!(pf.offset(), Offset::new(3, 0));
        assert_eq!(pf.pieces_spawned(), 2);
    }

    #[test]
    fn test_tick_locks_when_grounded() {
        let mut pf = playfield();
        pf.hard_drop();
        let outcome = pf.apply_intent(MoveIntent::tick());
        assert!(!outcome.moved);
        assert!(outcome.cleared.is_some());
        assert_eq!(pf.grid().cells().iter().filter(|&&c| c != 0).count(), 4);
        // Landing by tick earns nothing.
        assert_eq!(pf.score().points, 0);
    }

    #[test]
    fn test_settle_scores_line_clear_with_combo() {
        let mut pf = playfield();
        let o = pf.source.catalog().create(PieceKind::O);

        // Bottom row full except columns 0 and 1; drop an O into the gap.
        let mut grid = pf.grid().empty_like();
        fill_row(&mut grid, 21, &[0, 1]);
        fill_row(&mut grid, 20, &[0, 1]);
        pf.replace_grid(grid).unwrap();

        pf.cursor.set_piece(Arc::clone(&o));
        pf.offset = Offset::new(0, 0);
        pf.hard_drop();
        let settled = pf.settle();
        assert_eq!(settled.cleared.lines_removed, 2);
        assert_eq!(settled.cleared.cleared_row_indices, vec![20, 21]);
        // 50 * 2^2 * (1 + 1)
        assert_eq!(settled.cleared.score_bonus, 400);
        assert_eq!(pf.score().combo, 1);
        assert_eq!(pf.score().lines_total, 2);
        assert!(pf.grid().is_empty());
    }

    #[test]
    fn test_hold_swaps_once_per_piece() {
        let mut pf = playfield();
        let first = pf.current_piece().kind();
        let next = pf.next_piece().kind();

        assert!(pf.hold());
        assert_eq!(pf.held_piece().map(|p| p.kind()), Some(first));
        assert_eq!(pf.current_piece().kind(), next);
        assert!(!pf.hold());

        pf.apply_intent(MoveIntent::user(Direction::HardDrop));
        assert!(pf.can_hold());
        let active = pf.current_piece().kind();
        assert!(pf.hold());
        assert_eq!(pf.current_piece().kind(), first);
        assert_eq!(pf.held_piece().map(|p| p.kind()), Some(active));
        assert_eq!(pf.rotation_index(), 0);
    }

    #[test]
    fn test_snapshot_is_independent_copy() {
        let mut pf = playfield();
        pf.hold();
        let mut snap = pf.snapshot();
        assert_eq!(snap.shape, *pf.current_shape());
        assert_eq!(snap.next.kind, pf.next_piece().kind());
        assert!(snap.held.is_some());

        snap.offset = Offset::new(-5, -5);
        snap.shape = PieceShape::single(1).unwrap();
        assert_eq!(pf.offset(), Offset::new(3, 0));
        assert_ne!(pf.current_shape(), &snap.shape);
    }

    #[test]
    fn test_replace_grid_checks_dimensions() {
        let mut pf = playfield();
        assert!(pf.replace_grid(Grid::new(4, 4).unwrap()).is_err());
    }
}

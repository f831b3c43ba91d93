//! Core game logic - pure, deterministic, and testable
//!
//! Everything needed to simulate a falling-block session with no terminal, clock or
//! I/O attached. A front end drives a [`Playfield`] with moves (or [`MoveIntent`]s)
//! and renders from [`Playfield::grid`] and [`Playfield::snapshot`].
//!
//! - **Deterministic**: the same seed yields the same piece sequence
//! - **Headless**: usable from a terminal, a GUI, a bot or a test
//!
//! # Module Structure
//!
//! - [`grid`]: cell storage, bounds checks and non-destructive merge
//! - [`pieces`]: rotation-state matrices and the piece catalog
//! - [`rng`]: seeded piece source with one-piece lookahead
//! - [`rotation`]: rotation cursor and policy
//! - [`collision`]: overlap/bounds checks and drop projection
//! - [`line_clear`]: full-row detection and compaction
//! - [`scoring`]: points, lines and combo
//! - [`playfield`]: the session state machine tying it all together
//! - [`snapshot`]: owned read-only views for rendering
//!
//! # Rules
//!
//! - Pieces spawn at a fixed offset; a spawn that collides ends the session
//! - Rotation goes to the policy's next state in place, with no wall kicks
//! - Line clears pay `50 * lines^2 * (1 + combo)`
//! - Soft drop pays 1 per user step; hard drop pays 2 per row
//!
//! # Example
//!
//! ```
//! use blockfall_core::Playfield;
//! use blockfall_core::types::{Direction, MoveIntent, PlayfieldConfig};
//!
//! let mut playfield = Playfield::new(PlayfieldConfig::default()).unwrap();
//! playfield.move_left();
//! playfield.rotate();
//!
//! let outcome = playfield.apply_intent(MoveIntent::user(Direction::HardDrop));
//! assert!(outcome.distance > 0);
//! assert!(playfield.score().points > 0); // Hard drop awards points
//! ```

pub mod collision;
pub mod error;
pub mod grid;
pub mod line_clear;
pub mod pieces;
pub mod playfield;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use collision::{CollisionDetector, Offset};
pub use error::ConfigError;
pub use grid::Grid;
pub use line_clear::{LineClearEngine, LineClearResult};
pub use pieces::{Piece, PieceCatalog, PieceShape};
pub use playfield::{IntentOutcome, Playfield, Settled};
pub use rng::{PieceSource, SimpleRng};
pub use rotation::RotationCursor;
pub use scoring::{calculate_drop_score, line_clear_bonus, ScoreState, ScoreTracker};
pub use snapshot::{PlayfieldSnapshot, PreviewSnapshot};

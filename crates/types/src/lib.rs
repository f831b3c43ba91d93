//! Shared types module - data structures and constants
//!
//! This crate defines the plain data exchanged between the playfield core and its
//! collaborators (tick scheduler, input mapping, renderer, score persistence).
//! Nothing here owns game state; every type is a small value that can be copied or
//! serialized freely.
//!
//! # Playfield Dimensions
//!
//! Default playfield:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 22 rows (indexed 0-21), of which the top 2 are a hidden spawn buffer
//! - **Spawn offset**: (3, 0), the top-left corner of the piece's bounding box
//!
//! # Cells
//!
//! A cell is a small integer: `0` is empty, `1..=7` is filled, with each non-zero value
//! identifying the color class of the piece that filled it.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Direction, MoveIntent, PieceKind, RotationPolicy};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(PieceKind::from_color(piece.color()), Some(PieceKind::T));
//!
//! assert_eq!(RotationPolicy::Cyclic.next_index(3, 4), 0);
//! assert_eq!(RotationPolicy::Identity.next_index(3, 4), 3);
//!
//! let intent = MoveIntent::user(Direction::Down);
//! assert!(intent.is_user_initiated());
//! ```

use serde::{Deserialize, Serialize};

/// Default playfield width in columns
pub const DEFAULT_WIDTH: usize = 10;

/// Default playfield height in rows, hidden buffer included
pub const DEFAULT_HEIGHT: usize = 22;

/// Rows at the top of the grid that a renderer does not show
pub const HIDDEN_ROWS: usize = 2;

/// Default spawn column (left edge of the piece bounding box)
pub const SPAWN_X: i32 = 3;

/// Default spawn row (top edge of the piece bounding box)
pub const SPAWN_Y: i32 = 0;

/// Points awarded per user-initiated soft drop step
pub const SOFT_DROP_POINTS: i64 = 1;

/// Points awarded per cell of a hard drop
pub const HARD_DROP_POINTS_PER_CELL: i64 = 2;

/// Base unit of the line clear formula `LINE_CLEAR_BASE * lines^2 * (1 + combo)`
pub const LINE_CLEAR_BASE: i64 = 50;

/// A cell on the grid
///
/// - `0`: empty
/// - `1..=7`: filled, value is the color id of the piece kind (see [`PieceKind::color`])
pub type Cell = u8;

/// The empty cell value
pub const EMPTY: Cell = 0;

/// Largest valid cell value
pub const MAX_CELL: Cell = 7;

/// Whether `cell` is one of the values a grid may contain
#[inline]
pub fn is_valid_cell(cell: Cell) -> bool {
    cell <= MAX_CELL
}

/// The seven piece identities
///
/// Each piece has a distinct shape and color id:
/// - **I**: 1, straight bar
/// - **O**: 2, 2x2 square
/// - **T**: 3
/// - **S**: 4
/// - **Z**: 5 (mirror of S)
/// - **J**: 6
/// - **L**: 7 (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in color id order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Position of this kind in [`PieceKind::ALL`]
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Cell value written into the grid by this kind (1..=7)
    #[inline]
    pub fn color(self) -> Cell {
        self as Cell + 1
    }

    /// Reverse of [`PieceKind::color`]
    pub fn from_color(color: Cell) -> Option<Self> {
        match color {
            1..=7 => Some(Self::ALL[(color - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// How a rotation request picks the next rotation state
///
/// The set is closed, so it is matched on rather than boxed behind a trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    /// Advance to the next state, wrapping after the last one
    #[default]
    Cyclic,
    /// Stay on the current state (rotation has no effect)
    Identity,
}

impl RotationPolicy {
    /// Next rotation index for a piece with `count` states currently at `current`
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::RotationPolicy;
    ///
    /// assert_eq!(RotationPolicy::Cyclic.next_index(0, 4), 1);
    /// assert_eq!(RotationPolicy::Cyclic.next_index(0, 1), 0);
    /// assert_eq!(RotationPolicy::Identity.next_index(2, 4), 2);
    /// ```
    pub fn next_index(self, current: usize, count: usize) -> usize {
        match self {
            RotationPolicy::Cyclic if count == 0 => 0,
            RotationPolicy::Cyclic => (current + 1) % count,
            RotationPolicy::Identity => current,
        }
    }
}

/// Direction carried by a [`MoveIntent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Shift one column left
    Left,
    /// Shift one column right
    Right,
    /// Descend one row (soft drop or gravity)
    Down,
    /// Advance to the next rotation state
    RotateClockwise,
    /// Drop to the landing row and lock
    HardDrop,
}

impl Direction {
    /// Parse direction from string (for scripted input)
    ///
    /// ```
    /// use blockfall_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("hardDrop"), Some(Direction::HardDrop));
    /// assert_eq!(Direction::from_str("rotate"), Some(Direction::RotateClockwise));
    /// assert_eq!(Direction::from_str("up"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            "down" => Some(Direction::Down),
            "rotate" | "rotateclockwise" | "rotatecw" => Some(Direction::RotateClockwise),
            "harddrop" => Some(Direction::HardDrop),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::RotateClockwise => "rotateClockwise",
            Direction::HardDrop => "hardDrop",
        }
    }
}

/// Who produced a [`MoveIntent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputSource {
    /// A manual key press
    User,
    /// The periodic automatic-descent tick
    AutomaticTick,
}

/// A discrete input event fed to the playfield
///
/// The source only matters for soft drop scoring: a `Down` from the user is worth a
/// point, a `Down` from the tick is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveIntent {
    pub direction: Direction,
    pub source: InputSource,
}

impl MoveIntent {
    pub fn new(direction: Direction, source: InputSource) -> Self {
        Self { direction, source }
    }

    /// Intent from a manual key press
    pub fn user(direction: Direction) -> Self {
        Self::new(direction, InputSource::User)
    }

    /// Gravity step from the tick scheduler
    pub fn tick() -> Self {
        Self::new(Direction::Down, InputSource::AutomaticTick)
    }

    pub fn is_user_initiated(&self) -> bool {
        self.source == InputSource::User
    }
}

/// Construction-time settings for a playfield
///
/// Every field has a default, so a partial JSON document such as `{"width": 8}` is a
/// complete configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldConfig {
    /// Columns
    pub width: usize,
    /// Rows, hidden buffer included
    pub height: usize,
    /// Rows at the top not shown to a renderer
    pub hidden_rows: usize,
    pub spawn_x: i32,
    pub spawn_y: i32,
    /// Seed for the piece source
    pub seed: u32,
    pub rotation_policy: RotationPolicy,
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            hidden_rows: HIDDEN_ROWS,
            spawn_x: SPAWN_X,
            spawn_y: SPAWN_Y,
            seed: 1,
            rotation_policy: RotationPolicy::Cyclic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_ids_cover_one_through_seven() {
        let colors: Vec<Cell> = PieceKind::ALL.iter().map(|k| k.color()).collect();
        assert_eq!(colors, vec![1, 2, 3, 4, 5, 6, 7]);
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_color(kind.color()), Some(kind));
        }
        assert_eq!(PieceKind::from_color(0), None);
        assert_eq!(PieceKind::from_color(8), None);
    }

    #[test]
    fn piece_kind_names_parse_back() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn cyclic_policy_returns_to_start() {
        for count in 1..=4 {
            let mut index = 0;
            for _ in 0..count {
                index = RotationPolicy::Cyclic.next_index(index, count);
            }
            assert_eq!(index, 0, "count {}", count);
        }
    }

    #[test]
    fn tick_intent_is_not_user_initiated() {
        let intent = MoveIntent::tick();
        assert_eq!(intent.direction, Direction::Down);
        assert!(!intent.is_user_initiated());
    }

    #[test]
    fn valid_cells() {
        assert!(is_valid_cell(EMPTY));
        assert!(is_valid_cell(7));
        assert!(!is_valid_cell(8));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: PlayfieldConfig =
            serde_json::from_str(r#"{"width": 8, "rotation_policy": "identity"}"#).unwrap();
        assert_eq!(config.width, 8);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.hidden_rows, HIDDEN_ROWS);
        assert_eq!(config.rotation_policy, RotationPolicy::Identity);
    }
}

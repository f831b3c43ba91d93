//! Snapshot module - owned read-only views of the playfield for renderers

use serde::Serialize;

use crate::collision::Offset;
use crate::pieces::PieceShape;
use crate::scoring::ScoreState;
use crate::types::PieceKind;

/// A piece as shown in a preview slot (next or held)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PreviewSnapshot {
    pub kind: PieceKind,
    pub shape: PieceShape,
}

/// Read-only view of the active piece and its surroundings
///
/// Every field is an owned copy; mutating a snapshot never reaches the playfield.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PlayfieldSnapshot {
    pub kind: PieceKind,
    pub rotation_index: usize,
    pub shape: PieceShape,
    pub offset: Offset,
    /// Row the active piece would land on
    pub ghost_y: i32,
    pub next: PreviewSnapshot,
    pub held: Option<PreviewSnapshot>,
    pub score: ScoreState,
    pub topped_out: bool,
}

impl PlayfieldSnapshot {
    pub fn playable(&self) -> bool {
        !self.topped_out
    }
}

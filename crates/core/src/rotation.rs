//! Rotation cursor - the active piece and its rotation index
//!
//! Picking the next index is delegated to a [`RotationPolicy`]. Proposing a rotation
//! never commits it; the playfield commits only after the collision check passes.

use std::sync::Arc;

use crate::pieces::{Piece, PieceShape};
use crate::types::RotationPolicy;

#[derive(Debug, Clone)]
pub struct RotationCursor {
    piece: Arc<Piece>,
    index: usize,
    policy: RotationPolicy,
}

impl RotationCursor {
    pub fn new(piece: Arc<Piece>, policy: RotationPolicy) -> Self {
        Self {
            piece,
            index: 0,
            policy,
        }
    }

    /// Replace the active piece and reset to its first rotation state
    pub fn set_piece(&mut self, piece: Arc<Piece>) {
        self.piece = piece;
        self.index = 0;
    }

    pub fn piece(&self) -> &Arc<Piece> {
        &self.piece
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current_shape(&self) -> &PieceShape {
        // `index` only ever comes from `set_piece` (0) or a validated `commit`.
        &self.piece.rotations()[self.index]
    }

    /// Shape and index the policy would rotate to, without committing
    pub fn proposed_next(&self) -> (&PieceShape, usize) {
        let next = self
            .policy
            .next_index(self.index, self.piece.rotation_count());
        (&self.piece.rotations()[next], next)
    }

    /// Make `index` current
    ///
    /// Out-of-range indices are ignored and reported as `false`.
    pub fn commit(&mut self, index: usize) -> bool {
        if index >= self.piece.rotation_count() {
            return false;
        }
        self.index = index;
        true
    }

    pub fn policy(&self) -> RotationPolicy {
        self.policy
    }

    /// Swap the policy; takes effect on the next proposal
    pub fn set_policy(&mut self, policy: RotationPolicy) {
        self.policy = policy;
    }
}

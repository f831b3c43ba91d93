//! Pieces module - rotation-state matrices and the piece catalog
//!
//! Every piece is an ordered list of fixed-size matrices, one per rotation state.
//! Non-zero cells carry the piece's color id. The canonical tables live in a static
//! array indexed by [`PieceKind`], so adding a kind without a table is a compile error.

use std::sync::Arc;

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::error::ConfigError;
use crate::types::{is_valid_cell, Cell, PieceKind, EMPTY};

/// Upper bound on rotation states per piece
pub const MAX_ROTATIONS: usize = 4;

/// One rotation state: a small rectangular matrix of cells
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PieceShape {
    width: usize,
    height: usize,
    /// Row-major (row * width + col)
    cells: Vec<Cell>,
}

impl PieceShape {
    /// Build a shape from rows, checking that they are rectangular and hold valid cells
    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Result<Self, ConfigError> {
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if width == 0 {
            return Err(ConfigError::Empty);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != width {
                return Err(ConfigError::RaggedRows {
                    row,
                    expected: width,
                    found: r.len(),
                });
            }
            if let Some(&bad) = r.iter().find(|&&c| !is_valid_cell(c)) {
                return Err(ConfigError::InvalidCell(bad));
            }
            cells.extend_from_slice(r);
        }

        Ok(Self {
            width,
            height: rows.len(),
            cells,
        })
    }

    /// A 1x1 shape holding `cell`
    pub fn single(cell: Cell) -> Result<Self, ConfigError> {
        Self::from_rows(&[[cell]])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at (row, col), `None` outside the matrix
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.cells[row * self.width + col])
    }

    /// Rows of the matrix, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Non-empty cells as `(row, col, cell)`
    pub fn filled(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c != EMPTY)
            .map(move |(i, &c)| (i / width, i % width, c))
    }

    /// Number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.filled().count()
    }

    /// Rows as owned vectors
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(<[Cell]>::to_vec).collect()
    }
}

/// A piece identity with its rotation states
///
/// Immutable once built. The playfield shares pieces through `Arc` instead of copying
/// matrices every frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    rotations: ArrayVec<PieceShape, MAX_ROTATIONS>,
}

impl Piece {
    /// Build a piece from rotation states
    ///
    /// Every non-zero cell of every state must equal `kind.color()`.
    pub fn new<I>(kind: PieceKind, states: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = PieceShape>,
    {
        let states: Vec<PieceShape> = states.into_iter().collect();
        if states.is_empty() {
            return Err(ConfigError::Empty);
        }
        if states.len() > MAX_ROTATIONS {
            return Err(ConfigError::TooManyRotations(states.len()));
        }

        let expected = kind.color();
        for state in &states {
            if let Some((_, _, found)) = state.filled().find(|&(_, _, c)| c != expected) {
                return Err(ConfigError::ColorMismatch {
                    piece: kind.as_str(),
                    expected,
                    found,
                });
            }
        }

        Ok(Self {
            kind,
            rotations: states.into_iter().collect(),
        })
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Color id shared by all rotation states
    pub fn color(&self) -> Cell {
        self.kind.color()
    }

    pub fn rotations(&self) -> &[PieceShape] {
        &self.rotations
    }

    pub fn rotation_count(&self) -> usize {
        self.rotations.len()
    }

    /// Shape at `index`, `None` past the last state
    pub fn shape(&self, index: usize) -> Option<&PieceShape> {
        self.rotations.get(index)
    }

    /// Spawn orientation
    pub fn spawn_shape(&self) -> &PieceShape {
        &self.rotations[0]
    }
}

/// Static rotation table for one kind: states → rows → cells
type StateTable = &'static [&'static [&'static [Cell]]];

const I_STATES: StateTable = &[
    &[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]],
    &[&[0, 0, 1, 0], &[0, 0, 1, 0], &[0, 0, 1, 0], &[0, 0, 1, 0]],
    &[&[0, 0, 0, 0], &[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0]],
    &[&[0, 1, 0, 0], &[0, 1, 0, 0], &[0, 1, 0, 0], &[0, 1, 0, 0]],
];

// O has a single state; rotating it is a no-op under any policy.
const O_STATES: StateTable = &[&[&[2, 2], &[2, 2]]];

const T_STATES: StateTable = &[
    &[&[0, 3, 0], &[3, 3, 3], &[0, 0, 0]],
    &[&[0, 3, 0], &[0, 3, 3], &[0, 3, 0]],
    &[&[0, 0, 0], &[3, 3, 3], &[0, 3, 0]],
    &[&[0, 3, 0], &[3, 3, 0], &[0, 3, 0]],
];

const S_STATES: StateTable = &[
    &[&[0, 4, 4], &[4, 4, 0], &[0, 0, 0]],
    &[&[0, 4, 0], &[0, 4, 4], &[0, 0, 4]],
    &[&[0, 0, 0], &[0, 4, 4], &[4, 4, 0]],
    &[&[4, 0, 0], &[4, 4, 0], &[0, 4, 0]],
];

const Z_STATES: StateTable = &[
    &[&[5, 5, 0], &[0, 5, 5], &[0, 0, 0]],
    &[&[0, 0, 5], &[0, 5, 5], &[0, 5, 0]],
    &[&[0, 0, 0], &[5, 5, 0], &[0, 5, 5]],
    &[&[0, 5, 0], &[5, 5, 0], &[5, 0, 0]],
];

const J_STATES: StateTable = &[
    &[&[6, 0, 0], &[6, 6, 6], &[0, 0, 0]],
    &[&[0, 6, 6], &[0, 6, 0], &[0, 6, 0]],
    &[&[0, 0, 0], &[6, 6, 6], &[0, 0, 6]],
    &[&[0, 6, 0], &[0, 6, 0], &[6, 6, 0]],
];

const L_STATES: StateTable = &[
    &[&[0, 0, 7], &[7, 7, 7], &[0, 0, 0]],
    &[&[0, 7, 0], &[0, 7, 0], &[0, 7, 7]],
    &[&[0, 0, 0], &[7, 7, 7], &[7, 0, 0]],
    &[&[7, 7, 0], &[0, 7, 0], &[0, 7, 0]],
];

/// Canonical tables, indexed by `PieceKind::index()`
static SHAPE_TABLE: [StateTable; 7] = [
    I_STATES, O_STATES, T_STATES, S_STATES, Z_STATES, J_STATES, L_STATES,
];

/// Maps each piece identity to its canonical rotation states
///
/// Pieces are built once and handed out as shared `Arc`s.
#[derive(Debug, Clone)]
pub struct PieceCatalog {
    /// Indexed by `PieceKind::index()`
    pieces: Vec<Arc<Piece>>,
}

impl PieceCatalog {
    /// Build the catalog from the static tables
    ///
    /// Fails only if a static table is malformed.
    pub fn new() -> Result<Self, ConfigError> {
        let pieces = PieceKind::ALL
            .iter()
            .map(|&kind| Self::build(kind).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { pieces })
    }

    fn build(kind: PieceKind) -> Result<Piece, ConfigError> {
        let states = SHAPE_TABLE[kind.index()]
            .iter()
            .map(|rows| PieceShape::from_rows(*rows))
            .collect::<Result<Vec<_>, _>>()?;
        Piece::new(kind, states)
    }

    /// Piece for a kind
    pub fn create(&self, kind: PieceKind) -> Arc<Piece> {
        Arc::clone(&self.pieces[kind.index()])
    }

    /// Piece for an external name such as `"t"`; unknown names are rejected
    pub fn create_named(&self, name: &str) -> Result<Arc<Piece>, ConfigError> {
        PieceKind::from_str(name)
            .map(|kind| self.create(kind))
            .ok_or_else(|| ConfigError::UnknownPiece(name.to_string()))
    }

    /// Piece for a color id (1..=7); anything else is rejected
    pub fn create_by_color(&self, color: Cell) -> Result<Arc<Piece>, ConfigError> {
        PieceKind::from_color(color)
            .map(|kind| self.create(kind))
            .ok_or_else(|| ConfigError::UnknownPiece(color.to_string()))
    }

    /// All pieces, in `PieceKind::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Piece>> {
        self.pieces.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> PieceCatalog {
        PieceCatalog::new().expect("static tables are valid")
    }

    #[test]
    fn test_every_state_has_four_cells() {
        let catalog = catalog();
        for piece in catalog.iter() {
            for (i, shape) in piece.rotations().iter().enumerate() {
                assert_eq!(shape.cell_count(), 4, "{:?} state {}", piece.kind(), i);
            }
        }
    }

    #[test]
    fn test_states_are_square_and_same_size() {
        let catalog = catalog();
        for piece in catalog.iter() {
            let first = piece.spawn_shape();
            assert_eq!(first.width(), first.height());
            for shape in piece.rotations() {
                assert_eq!(shape.width(), first.width());
                assert_eq!(shape.height(), first.height());
            }
        }
    }

    #[test]
    fn test_rotation_counts() {
        let catalog = catalog();
        assert_eq!(catalog.create(PieceKind::O).rotation_count(), 1);
        for kind in [
            PieceKind::I,
            PieceKind::T,
            PieceKind::S,
            PieceKind::Z,
            PieceKind::J,
            PieceKind::L,
        ] {
            assert_eq!(catalog.create(kind).rotation_count(), 4);
        }
    }

    #[test]
    fn test_create_shares_the_same_piece() {
        let catalog = catalog();
        let a = catalog.create(PieceKind::T);
        let b = catalog.create(PieceKind::T);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_t_spawn_shape() {
        let t = catalog().create(PieceKind::T);
        assert_eq!(
            t.spawn_shape().to_rows(),
            vec![vec![0, 3, 0], vec![3, 3, 3], vec![0, 0, 0]]
        );
    }

    #[test]
    fn test_unknown_identity_fails_fast() {
        let catalog = catalog();
        assert_eq!(
            catalog.create_named("x"),
            Err(ConfigError::UnknownPiece("x".to_string()))
        );
        assert!(catalog.create_by_color(0).is_err());
        assert!(catalog.create_by_color(8).is_err());
        assert_eq!(catalog.create_named("L").unwrap().kind(), PieceKind::L);
    }

    #[test]
    fn test_shape_from_rows_validation() {
        assert_eq!(
            PieceShape::from_rows(&[vec![1u8, 1], vec![1]]),
            Err(ConfigError::RaggedRows {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            PieceShape::from_rows(&[[9u8]]),
            Err(ConfigError::InvalidCell(9))
        );
        let empty: [[Cell; 0]; 0] = [];
        assert_eq!(PieceShape::from_rows(&empty), Err(ConfigError::Empty));
    }

    #[test]
    fn test_piece_rejects_foreign_color() {
        let shape = PieceShape::single(2).unwrap();
        let err = Piece::new(PieceKind::I, [shape]).unwrap_err();
        assert!(matches!(err, ConfigError::ColorMismatch { found: 2, .. }));
    }

    #[test]
    fn test_piece_rejects_too_many_states() {
        let shape = PieceShape::single(1).unwrap();
        let err = Piece::new(PieceKind::I, vec![shape; 5]).unwrap_err();
        assert_eq!(err, ConfigError::TooManyRotations(5));
    }

    #[test]
    fn test_filled_reports_row_and_col() {
        let shape = PieceShape::from_rows(&[[0u8, 3], [3, 0]]).unwrap();
        let cells: Vec<_> = shape.filled().collect();
        assert_eq!(cells, vec![(0, 1, 3), (1, 0, 3)]);
    }
}

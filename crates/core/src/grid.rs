//! Grid module - raw cell storage for the playfield
//!
//! The grid is `height` rows of `width` cells stored in one flat row-major vector.
//! Coordinates are `(x, y)`: x is the column (left to right), y is the row (top to
//! bottom). The top `hidden_rows` rows form the spawn buffer: a renderer skips them,
//! but they take part in collision and merging like any other row.
//!
//! Offsets are signed so that a piece's bounding box may hang off the left or top edge
//! as long as its filled cells stay inside.

use serde::Serialize;

use crate::error::ConfigError;
use crate::pieces::PieceShape;
use crate::types::{is_valid_cell, Cell, EMPTY};

/// Rectangular cell storage
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Grid {
    width: usize,
    height: usize,
    hidden_rows: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

/// Largest width or height a grid accepts
pub const MAX_SIDE: usize = i32::MAX as usize;

impl Grid {
    /// Create an empty grid with no hidden rows
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        Self::with_hidden_rows(width, height, 0)
    }

    /// Create an empty grid whose top `hidden_rows` rows are a spawn buffer
    pub fn with_hidden_rows(
        width: usize,
        height: usize,
        hidden_rows: usize,
    ) -> Result<Self, ConfigError> {
        let invalid = ConfigError::InvalidDimensions {
            width,
            height,
            hidden_rows,
        };
        // Coordinates are i32, so each side must fit in one.
        if width == 0 || height <= hidden_rows || width > MAX_SIDE || height > MAX_SIDE {
            return Err(invalid);
        }
        let len = width.checked_mul(height).ok_or_else(|| invalid.clone())?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| invalid)?;
        cells.resize(len, EMPTY);
        Ok(Self {
            width,
            height,
            hidden_rows,
            cells,
        })
    }

    /// Build a grid from rows (top to bottom), validating shape and cell values
    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Result<Self, ConfigError> {
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut grid = Self::new(width, rows.len())?;
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(ConfigError::RaggedRows {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            if let Some(&bad) = row.iter().find(|&&c| !is_valid_cell(c)) {
                return Err(ConfigError::InvalidCell(bad));
            }
            grid.row_mut(y).copy_from_slice(row);
        }
        Ok(grid)
    }

    /// Same grid with a different hidden buffer size
    pub fn hiding(mut self, hidden_rows: usize) -> Result<Self, ConfigError> {
        if self.height <= hidden_rows {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
                hidden_rows,
            });
        }
        self.hidden_rows = hidden_rows;
        Ok(self)
    }

    /// An empty grid with the same dimensions
    pub fn empty_like(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            hidden_rows: self.hidden_rows,
            cells: vec![EMPTY; self.cells.len()],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn hidden_rows(&self) -> usize {
        self.hidden_rows
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds or `cell` is not a valid cell value
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if !is_valid_cell(cell) {
            return false;
        }
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(c) if c != EMPTY)
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i32, y: i32) -> bool {
        x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height
    }

    /// Row `y`, top row is 0
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [Cell] {
        let start = y * self.width;
        &mut self.cells[start..start + self.width]
    }

    /// All rows, top to bottom, hidden buffer included
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Rows a renderer shows (hidden buffer skipped)
    pub fn visible_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows().skip(self.hidden_rows)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|&cell| cell != EMPTY))
            .unwrap_or(false)
    }

    /// True when every cell is empty
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == EMPTY)
    }

    /// Does `shape` placed with its top-left corner at (x, y) overlap a filled cell or
    /// leave the grid?
    ///
    /// Only the shape's non-zero cells are checked. Anything outside the grid counts as
    /// a collision.
    pub fn intersects(&self, shape: &PieceShape, x: i32, y: i32) -> bool {
        shape.filled().any(|(row, col, _)| {
            let gx = x + col as i32;
            let gy = y + row as i32;
            match self.get(gx, gy) {
                Some(cell) => cell != EMPTY,
                None => true,
            }
        })
    }

    /// A new grid with every non-zero cell of `shape` written at (x, y)
    ///
    /// Cells overwrite what was there. Cells falling outside the grid are dropped.
    /// The receiver is left untouched.
    pub fn merge(&self, shape: &PieceShape, x: i32, y: i32) -> Grid {
        let mut merged = self.clone();
        for (row, col, cell) in shape.filled() {
            merged.set(x + col as i32, y + row as i32, cell);
        }
        merged
    }

    /// Independent deep copy (same as `clone`)
    pub fn copy(&self) -> Grid {
        self.clone()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Rows as owned vectors (for display and tests)
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(<[Cell]>::to_vec).collect()
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }
}

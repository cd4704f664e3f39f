//! Well module - the grid of locked cells
//!
//! The well is a `width x height` grid of booleans stored as one flat buffer,
//! row-major with the bottom row first. Coordinates are (row, col) where row 0
//! is the bottom and col 0 the left wall.
//!
//! Completed rows are reported top to bottom (descending indices), which is
//! also the order [`Well::delete_rows`] deletes them in: removing a row only
//! renumbers the rows above it, so every lower index stays valid.

use crate::error::WellError;
use crate::piece::Piece;
use crate::position::Position;
use crate::rotation::Mask;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// The grid of locked cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Well {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<bool>,
}

impl Well {
    /// Create an empty well.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "well dimensions must be non-zero");
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// An empty well of the standard 10x22 size.
    pub fn standard() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Build a well from rows given bottom row first.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, WellError> {
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if width == 0 {
            return Err(WellError::Empty);
        }
        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, cols) in rows.iter().enumerate() {
            let cols = cols.as_ref();
            if cols.len() != width {
                return Err(WellError::Ragged {
                    row,
                    len: cols.len(),
                    expected: width,
                });
            }
            cells.extend_from_slice(cols);
        }
        Ok(Self {
            width,
            height: rows.len(),
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if !self.is_valid_position(row, col) {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    /// Whether (row, col) lies inside the well. Both upper bounds are exclusive.
    pub fn is_valid_position(&self, row: i32, col: i32) -> bool {
        row >= 0 && (row as usize) < self.height && col >= 0 && (col as usize) < self.width
    }

    /// Get cell at (row, col); `None` if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<bool> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Whether (row, col) is inside the well and filled
    pub fn is_filled(&self, row: i32, col: i32) -> bool {
        self.get(row, col) == Some(true)
    }

    /// Set cell at (row, col). Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, filled: bool) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = filled;
                true
            }
            None => false,
        }
    }

    /// The cells of one row, left to right.
    ///
    /// # Panics
    ///
    /// Panics if `row >= height`.
    pub fn row(&self, row: usize) -> &[bool] {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    /// Rows from the bottom up.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks(self.width)
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Whether `mask` placed with its top-left corner at `pos` overlaps a wall,
    /// the floor, the ceiling or a filled cell.
    pub fn collides(&self, mask: &Mask, pos: Position) -> bool {
        mask.cells_at(pos)
            .into_iter()
            .any(|(row, col)| self.get(row, col) != Some(false))
    }

    pub fn collides_piece(&self, piece: &Piece) -> bool {
        self.collides(piece.layout(), piece.position())
    }

    /// Write the piece's cells into the well.
    ///
    /// Callers check for collisions first; cells outside the well are skipped.
    pub fn add_to_well(&mut self, piece: &Piece) {
        for (row, col) in piece.occupied_cells() {
            self.set(row, col, true);
        }
    }

    /// Check if a row is completely filled
    pub fn is_completed_row(&self, row: usize) -> bool {
        if row >= self.height {
            return false;
        }
        self.row(row).iter().all(|&c| c)
    }

    /// Indices of all completed rows, top to bottom.
    pub fn completed_rows(&self) -> Vec<usize> {
        (0..self.height)
            .rev()
            .filter(|&row| self.is_completed_row(row))
            .collect()
    }

    /// Remove row `n`, shifting every row above it down by one and clearing
    /// the top row. Out-of-range rows are ignored.
    pub fn delete_row(&mut self, n: usize) {
        if n >= self.height {
            return;
        }
        let w = self.width;
        self.cells.copy_within((n + 1) * w.., n * w);
        let top = (self.height - 1) * w;
        self.cells[top..].fill(false);
    }

    /// Remove every listed row, whatever order the indices come in.
    ///
    /// Rows are deleted one at a time from the highest index down, so each
    /// index still names the row it named before any deletion.
    pub fn delete_rows(&mut self, rows: &[usize]) {
        let mut sorted = rows.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();
        for row in sorted {
            self.delete_row(row);
        }
    }

    /// Clear the entire well
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }
}

impl Default for Well {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::rotation::RotationTable;
    use crate::types::PieceKind;

    const X: bool = true;
    const O: bool = false;

    #[test]
    fn test_well_index_calculation() {
        let well = Well::standard();
        assert_eq!(well.index(0, 0), Some(0));
        assert_eq!(well.index(0, 9), Some(9));
        assert_eq!(well.index(1, 0), Some(10));
        assert_eq!(well.index(21, 9), Some(219));
        assert_eq!(well.index(-1, 0), None);
        assert_eq!(well.index(0, 10), None);
        assert_eq!(well.index(22, 0), None);
    }

    #[test]
    fn test_right_wall_bound_is_strict() {
        let well = Well::standard();
        let mask = *RotationTable::standard().mask(PieceKind::I, 1);
        // Vertical I lives in mask column 2: col 7 puts it on column 9.
        assert!(!well.collides(&mask, Position::new(10, 7)));
        assert!(well.collides(&mask, Position::new(10, 8)));
    }

    #[test]
    fn test_no_completed_rows_in_hollow_well() {
        let well = Well::from_rows(&[[O, O, O, O], [O, X, X, O], [O, X, X, O], [O, O, O, O]])
            .unwrap();
        assert!((0..4).all(|r| !well.is_completed_row(r)));
        assert!(well.completed_rows().is_empty());
    }

    #[test]
    fn test_delete_row_copy_within() {
        let mut well = Well::from_rows(&[[X, X, X, X], [O, X, O, O]]).unwrap();
        well.delete_row(0);
        assert_eq!(well, Well::from_rows(&[[O, X, O, O], [O, O, O, O]]).unwrap());
    }

    #[test]
    fn test_delete_top_row_only_clears_it() {
        let mut well = Well::from_rows(&[[X, O], [O, X], [X, X]]).unwrap();
        well.delete_row(2);
        assert_eq!(well, Well::from_rows(&[[X, O], [O, X], [O, O]]).unwrap());
    }

    #[test]
    fn test_delete_rows_order_independent() {
        let rows = [[O, O, O, O], [X, X, X, X], [O, O, X, O], [X, X, X, X]];
        let mut a = Well::from_rows(&rows).unwrap();
        let mut b = a.clone();
        a.delete_rows(&[1, 3]);
        b.delete_rows(&[3, 1]);
        assert_eq!(a, b);
        assert!(a.completed_rows().is_empty());
    }

    #[test]
    fn test_add_to_well_skips_out_of_bounds_cells() {
        let mut well = Well::new(4, 2);
        let piece = Piece::new(
            PieceKind::O,
            Position::new(2, 0),
            Arc::new(RotationTable::standard()),
        );
        well.add_to_well(&piece);
        // O occupies rows 2 and 1 here; row 2 is above the ceiling.
        assert_eq!(well.row(1), &[O, X, X, O]);
        assert_eq!(well.row(0), &[O, O, O, O]);
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let rows: Vec<Vec<bool>> = vec![vec![X, X], vec![X]];
        assert_eq!(
            Well::from_rows(&rows),
            Err(WellError::Ragged {
                row: 1,
                len: 1,
                expected: 2
            })
        );
        let empty: Vec<Vec<bool>> = Vec::new();
        assert_eq!(Well::from_rows(&empty), Err(WellError::Empty));
    }
}

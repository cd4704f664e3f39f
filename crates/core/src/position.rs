//! Position module - grid location plus sub-row gravity progress
//!
//! Gravity is fixed-point: a piece accumulates fractional rows in
//! `remainder` (units of 1/[`GRAVITY_UNIT`] row) and only moves on the grid when
//! the accumulated amount crosses a whole row.

use crate::types::GRAVITY_UNIT;

/// A well location with accumulated gravity.
///
/// `remainder` is always in `[0, GRAVITY_UNIT)`. Equality includes the
/// remainder, so two positions on the same cell with different progress differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: i32,
    pub col: i32,
    pub remainder: u32,
}

impl Position {
    /// A position with no gravity progress.
    pub const fn new(row: i32, col: i32) -> Self {
        Self {
            row,
            col,
            remainder: 0,
        }
    }

    pub const fn with_remainder(row: i32, col: i32, remainder: u32) -> Self {
        Self {
            row,
            col,
            remainder: remainder % GRAVITY_UNIT,
        }
    }

    /// Shift by whole cells, keeping the gravity remainder.
    pub fn offset(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
            remainder: self.remainder,
        }
    }

    /// Every position visited when falling `rate` gravity units from here.
    ///
    /// Each whole row crossed yields one position (descending, remainder 0) so
    /// callers can collision-test every step instead of skipping rows at high
    /// rates. A leftover fraction is carried by a final position on the last
    /// row. When no row is crossed the path is this cell with the new remainder.
    pub fn path_from_gravity(self, rate: u32) -> Vec<Position> {
        // remainder + rate can exceed u32::MAX.
        let sum = u64::from(self.remainder) + u64::from(rate);
        let unit = u64::from(GRAVITY_UNIT);
        let whole = (sum / unit) as i32;
        let rem = (sum % unit) as u32;

        if whole == 0 {
            return vec![Position::with_remainder(self.row, self.col, rem)];
        }

        let mut path = Vec::with_capacity(whole as usize + 1);
        for i in 1..=whole {
            path.push(Position::new(self.row - i, self.col));
        }
        if rem > 0 {
            path.push(Position::with_remainder(self.row - whole, self.col, rem));
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_row_gravity_stays_on_row() {
        let path = Position::with_remainder(10, 3, 100).path_from_gravity(48);
        assert_eq!(path, vec![Position::with_remainder(10, 3, 148)]);
    }

    #[test]
    fn test_crossing_one_row_carries_remainder() {
        let path = Position::with_remainder(10, 3, 240).path_from_gravity(48);
        assert_eq!(
            path,
            vec![Position::new(9, 3), Position::with_remainder(9, 3, 32)]
        );
    }

    #[test]
    fn test_exact_rows_have_no_trailing_element() {
        let path = Position::new(10, 3).path_from_gravity(3 * GRAVITY_UNIT);
        assert_eq!(
            path,
            vec![Position::new(9, 3), Position::new(8, 3), Position::new(7, 3)]
        );
    }

    #[test]
    fn test_zero_rate_is_identity() {
        let start = Position::with_remainder(4, 1, 17);
        assert_eq!(start.path_from_gravity(0), vec![start]);
    }

    #[test]
    fn test_offset_keeps_remainder() {
        let moved = Position::with_remainder(5, 5, 200).offset(0, -1);
        assert_eq!(moved, Position::with_remainder(5, 4, 200));
    }

    #[test]
    fn test_max_rate_with_remainder_does_not_overflow() {
        let path = Position::with_remainder(21, 3, 200).path_from_gravity(u32::MAX);
        // 200 + (2^32 - 1) = 2^24 whole rows plus 199.
        assert_eq!(path.len(), (1 << 24) + 1);
        assert_eq!(
            path.last().copied(),
            Some(Position::with_remainder(21 - (1 << 24), 3, 199))
        );
    }

    #[test]
    fn test_high_rate_enumerates_every_row() {
        let path = Position::new(21, 0).path_from_gravity(20 * 22 * GRAVITY_UNIT);
        assert_eq!(path.len(), 440);
        assert!(path.windows(2).all(|w| w[0].row - 1 == w[1].row));
    }
}

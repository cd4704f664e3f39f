//! Rotation module - piece geometry for every kind and orientation
//!
//! Every piece kind has four orientations, each a 4x4 occupancy [`Mask`].
//! The table is built once (either the built-in set or parsed from text) and is
//! shared read-only between the well, the pieces and the engine.
//!
//! # Text format
//!
//! Four blocks of four lines, one block per orientation (0 to 3, clockwise).
//! An `x` marks a filled cell; any other character is empty. The first line of
//! a block is the top row of the mask. Blank lines between blocks are ignored.
//!
//! ```text
//! .x..
//! xxx.
//! ....
//! ....
//!
//! .x..
//! .xx.
//! .x..
//! ....
//! ```

use arrayvec::ArrayVec;

use crate::error::{ParseError, RotationError};
use crate::position::Position;
use crate::types::PieceKind;

/// Side length of a piece mask
pub const MASK_SIZE: usize = 4;

/// Number of orientations per piece
pub const ORIENTATIONS: usize = 4;

/// Occupancy of a piece in one orientation.
///
/// Stored bottom row first: `cells[0]` is the lowest row of the 4x4 box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Mask {
    cells: [[bool; MASK_SIZE]; MASK_SIZE],
}

impl Mask {
    pub const fn from_cells(cells: [[bool; MASK_SIZE]; MASK_SIZE]) -> Self {
        Self { cells }
    }

    /// Build a mask from four row bit patterns, TOP row first.
    ///
    /// Bit 3 is column 0, so `0b1100` fills the two leftmost cells.
    pub const fn from_top_rows(rows: [u8; MASK_SIZE]) -> Self {
        let mut cells = [[false; MASK_SIZE]; MASK_SIZE];
        let mut i = 0;
        while i < MASK_SIZE {
            let bits = rows[MASK_SIZE - 1 - i];
            let mut col = 0;
            while col < MASK_SIZE {
                cells[i][col] = bits & (0b1000 >> col) != 0;
                col += 1;
            }
            i += 1;
        }
        Self { cells }
    }

    /// Whether mask cell (row, col) is filled; row 0 is the bottom.
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < MASK_SIZE && col < MASK_SIZE && self.cells[row][col]
    }

    pub fn rows(&self) -> &[[bool; MASK_SIZE]; MASK_SIZE] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(|filled| !filled)
    }

    /// Filled cells as (row, col) pairs within the mask, bottom row first.
    pub fn occupied(&self) -> ArrayVec<(usize, usize), 16> {
        let mut out = ArrayVec::new();
        for (row, cols) in self.cells.iter().enumerate() {
            for (col, &filled) in cols.iter().enumerate() {
                if filled {
                    out.push((row, col));
                }
            }
        }
        out
    }

    /// Well cells (row, col) covered when the mask's top-left corner sits at `pos`.
    ///
    /// Mask cell (r, c) lands on well row `pos.row - (3 - r)` and column
    /// `pos.col + c`. Results may lie outside the well.
    pub fn cells_at(&self, pos: Position) -> ArrayVec<(i32, i32), 16> {
        self.occupied()
            .into_iter()
            .map(|(r, c)| {
                (
                    pos.row - (MASK_SIZE as i32 - 1 - r as i32),
                    pos.col + c as i32,
                )
            })
            .collect()
    }
}

/// Masks for all seven kinds, indexed by [`PieceKind::index`] then orientation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationTable {
    masks: [[Mask; ORIENTATIONS]; 7],
}

impl RotationTable {
    /// The built-in geometry (SRS-style spawn orientations, clockwise order).
    pub fn standard() -> Self {
        Self {
            masks: [I_MASKS, J_MASKS, L_MASKS, O_MASKS, S_MASKS, T_MASKS, Z_MASKS],
        }
    }

    /// Build a table from per-kind rotation texts.
    ///
    /// `source` is asked once per kind; `None` means the data is missing.
    pub fn from_sources<'a, F>(mut source: F) -> Result<Self, RotationError>
    where
        F: FnMut(PieceKind) -> Option<&'a str>,
    {
        let mut masks = [[Mask::default(); ORIENTATIONS]; 7];
        for kind in PieceKind::ALL {
            let text = source(kind).ok_or(RotationError::Missing { kind })?;
            masks[kind.index()] = parse_rotations(text)
                .map_err(|source| RotationError::Malformed { kind, source })?;
        }
        Ok(Self { masks })
    }

    pub fn masks(&self, kind: PieceKind) -> &[Mask; ORIENTATIONS] {
        &self.masks[kind.index()]
    }

    /// Mask of `kind` in `orientation` (taken modulo 4).
    pub fn mask(&self, kind: PieceKind, orientation: usize) -> &Mask {
        &self.masks[kind.index()][orientation % ORIENTATIONS]
    }
}

impl Default for RotationTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Parse the four orientations of one piece from the text format.
pub fn parse_rotations(text: &str) -> Result<[Mask; ORIENTATIONS], ParseError> {
    let mut rows: ArrayVec<(usize, &str), 16> = ArrayVec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        if rows.try_push((i + 1, line)).is_err() {
            return Err(ParseError::TrailingData { line: i + 1 });
        }
    }
    if !rows.is_full() {
        return Err(ParseError::Truncated { found: rows.len() });
    }

    let mut masks = [Mask::default(); ORIENTATIONS];
    for (orientation, block) in rows.chunks(MASK_SIZE).enumerate() {
        let mut cells = [[false; MASK_SIZE]; MASK_SIZE];
        for (i, &(line_no, line)) in block.iter().enumerate() {
            let len = line.chars().count();
            if len < MASK_SIZE {
                return Err(ParseError::ShortRow { line: line_no, len });
            }
            // First line of a block is the top row.
            let row = MASK_SIZE - 1 - i;
            for (col, ch) in line.chars().take(MASK_SIZE).enumerate() {
                cells[row][col] = ch == 'x';
            }
        }
        let mask = Mask::from_cells(cells);
        if mask.is_empty() {
            return Err(ParseError::EmptyMask { orientation });
        }
        masks[orientation] = mask;
    }
    Ok(masks)
}

const I_MASKS: [Mask; 4] = [
    Mask::from_top_rows([0b0000, 0b1111, 0b0000, 0b0000]),
    Mask::from_top_rows([0b0010, 0b0010, 0b0010, 0b0010]),
    Mask::from_top_rows([0b0000, 0b0000, 0b1111, 0b0000]),
    Mask::from_top_rows([0b0100, 0b0100, 0b0100, 0b0100]),
];

const J_MASKS: [Mask; 4] = [
    Mask::from_top_rows([0b1000, 0b1110, 0b0000, 0b0000]),
    Mask::from_top_rows([0b0110, 0b0100, 0b0100, 0b0000]),
    Mask::from_top_rows([0b0000, 0b1110, 0b0010, 0b0000]),
    Mask::from_top_rows([0b0100, 0b0100, 0b1100, 0b0000]),
];

const L_MASKS: [Mask; 4] = [
    Mask::from_top_rows([0b0010, 0b1110, 0b0000, 0b0000]),
    Mask::from_top_rows([0b0100, 0b0100, 0b0110, 0b0000]),
    Mask::from_top_rows([0b0000, 0b1110, 0b1000, 0b0000]),
    Mask::from_top_rows([0b1100, 0b0100, 0b0100, 0b0000]),
];

const O_MASKS: [Mask; 4] = [Mask::from_top_rows([0b0110, 0b0110, 0b0000, 0b0000]); 4];

const S_MASKS: [Mask; 4] = [
    Mask::from_top_rows([0b0110, 0b1100, 0b0000, 0b0000]),
    Mask::from_top_rows([0b0100, 0b0110, 0b0010, 0b0000]),
    Mask::from_top_rows([0b0000, 0b0110, 0b1100, 0b0000]),
    Mask::from_top_rows([0b1000, 0b1100, 0b0100, 0b0000]),
];

const T_MASKS: [Mask; 4] = [
    Mask::from_top_rows([0b0100, 0b1110, 0b0000, 0b0000]),
    Mask::from_top_rows([0b0100, 0b0110, 0b0100, 0b0000]),
    Mask::from_top_rows([0b0000, 0b1110, 0b0100, 0b0000]),
    Mask::from_top_rows([0b0100, 0b1100, 0b0100, 0b0000]),
];

const Z_MASKS: [Mask; 4] = [
    Mask::from_top_rows([0b1100, 0b0110, 0b0000, 0b0000]),
    Mask::from_top_rows([0b0010, 0b0110, 0b0100, 0b0000]),
    Mask::from_top_rows([0b0000, 0b1100, 0b0110, 0b0000]),
    Mask::from_top_rows([0b0100, 0b1100, 0b1000, 0b0000]),
];

#[cfg(test)]
mod tests {
    use super::*;

    const T_TEXT: &str = "\
.x..
xxx.
....
....

.x..
.xx.
.x..
....

....
xxx.
.x..
....

.x..
xx..
.x..
....
";

    #[test]
    fn test_from_top_rows_is_bottom_first() {
        let mask = Mask::from_top_rows([0b1000, 0b0000, 0b0000, 0b0001]);
        assert!(mask.get(3, 0));
        assert!(mask.get(0, 3));
        assert!(!mask.get(0, 0));
        assert_eq!(mask.occupied().as_slice(), &[(0, 3), (3, 0)]);
    }

    #[test]
    fn test_every_standard_mask_has_four_cells() {
        let table = RotationTable::standard();
        for kind in PieceKind::ALL {
            for mask in table.masks(kind) {
                assert_eq!(mask.occupied().len(), 4, "{kind:?}");
            }
        }
    }

    #[test]
    fn test_parse_matches_builtin_t() {
        let parsed = parse_rotations(T_TEXT).unwrap();
        assert_eq!(&parsed, RotationTable::standard().masks(PieceKind::T));
    }

    #[test]
    fn test_parse_without_blank_separators() {
        let compact: String = T_TEXT
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| format!("{l}\n"))
            .collect();
        assert_eq!(parse_rotations(&compact).unwrap(), parse_rotations(T_TEXT).unwrap());
    }

    #[test]
    fn test_parse_rejects_truncated_text() {
        let text: String = T_TEXT.lines().take(9).map(|l| format!("{l}\n")).collect();
        assert_eq!(parse_rotations(&text), Err(ParseError::Truncated { found: 8 }));
    }

    #[test]
    fn test_parse_rejects_short_row() {
        let text = T_TEXT.replacen("xxx.", "xx", 1);
        assert_eq!(
            parse_rotations(&text),
            Err(ParseError::ShortRow { line: 2, len: 2 })
        );
    }

    #[test]
    fn test_parse_rejects_trailing_rows() {
        let text = format!("{T_TEXT}\nx...\n");
        assert_eq!(
            parse_rotations(&text),
            Err(ParseError::TrailingData { line: 21 })
        );
    }

    #[test]
    fn test_parse_rejects_empty_orientation() {
        let text = T_TEXT.replacen(".x..\n.xx.\n.x..", "....\n....\n....", 1);
        assert_eq!(
            parse_rotations(&text),
            Err(ParseError::EmptyMask { orientation: 1 })
        );
    }

    #[test]
    fn test_from_sources_reports_missing_kind() {
        let err = RotationTable::from_sources(|kind| (kind != PieceKind::S).then_some(T_TEXT));
        assert_eq!(err, Err(RotationError::Missing { kind: PieceKind::S }));
    }

    #[test]
    fn test_from_sources_reports_malformed_kind() {
        let err = RotationTable::from_sources(|kind| {
            Some(if kind == PieceKind::L { "xxxx\n" } else { T_TEXT })
        });
        assert_eq!(
            err,
            Err(RotationError::Malformed {
                kind: PieceKind::L,
                source: ParseError::Truncated { found: 1 },
            })
        );
    }

    #[test]
    fn test_cells_at_uses_top_left_anchor() {
        let table = RotationTable::standard();
        let mask = table.mask(PieceKind::O, 0);
        let cells = mask.cells_at(Position::new(10, 2));
        let mut sorted: Vec<_> = cells.into_iter().collect();
        sorted.sort();
        assert_eq!(sorted, vec![(9, 3), (9, 4), (10, 3), (10, 4)]);
    }
}

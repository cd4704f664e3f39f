//! Snapshot module - settled post-tick view for renderers
//!
//! A snapshot is a plain copy of the well and the active piece, taken between
//! ticks. Consumers never see the engine mid-step.

use arrayvec::ArrayVec;

use crate::position::Position;
use crate::rotation::Mask;
use crate::types::PieceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub orientation: usize,
    pub position: Position,
    pub mask: Mask,
}

impl ActiveSnapshot {
    /// Well cells covered by the piece.
    pub fn occupied_cells(&self) -> ArrayVec<(i32, i32), 16> {
        self.mask.cells_at(self.position)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    /// Locked cells, row-major with the bottom row first.
    pub cells: Vec<bool>,
    pub active: Option<ActiveSnapshot>,
    pub game_over: bool,
    pub lines_cleared: u64,
    pub frame: u64,
}

impl Snapshot {
    /// Whether a locked cell sits at (row, col). Out of range reads as empty.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col]
    }

    /// Whether the active piece covers (row, col).
    pub fn is_active(&self, row: usize, col: usize) -> bool {
        self.active.is_some_and(|a| {
            a.occupied_cells()
                .into_iter()
                .any(|(r, c)| r == row as i32 && c == col as i32)
        })
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

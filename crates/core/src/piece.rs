//! Piece module - the falling tetromino the player controls

use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::position::Position;
use crate::rotation::{Mask, RotationTable, ORIENTATIONS};
use crate::types::{PieceKind, Rgb};

/// Active falling piece
///
/// The kind is fixed at creation; orientation and position change as the
/// piece is moved. Masks are borrowed from the shared [`RotationTable`], never
/// copied per piece.
#[derive(Debug, Clone)]
pub struct Piece {
    kind: PieceKind,
    orientation: usize,
    position: Position,
    table: Arc<RotationTable>,
}

impl Piece {
    /// Create a piece in orientation 0 at `position`.
    pub fn new(kind: PieceKind, position: Position, table: Arc<RotationTable>) -> Self {
        Self {
            kind,
            orientation: 0,
            position,
            table,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn orientation(&self) -> usize {
        self.orientation
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn color(&self) -> Rgb {
        self.kind.color()
    }

    /// Current occupancy mask.
    pub fn layout(&self) -> &Mask {
        self.table.mask(self.kind, self.orientation)
    }

    /// Well cells covered at the current position.
    pub fn occupied_cells(&self) -> ArrayVec<(i32, i32), 16> {
        self.layout().cells_at(self.position)
    }

    /// Turn a quarter in the given direction. Does not check for collisions.
    pub fn rotate(&mut self, clockwise: bool) {
        self.orientation = if clockwise {
            (self.orientation + 1) % ORIENTATIONS
        } else {
            (self.orientation + ORIENTATIONS - 1) % ORIENTATIONS
        };
    }

    /// Move to `position` unconditionally; callers validate first.
    pub fn move_to(&mut self, position: Position) {
        self.position = position;
    }
}

//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behaviour beyond small conversions, making
//! them usable from the simulation core, the terminal renderer and the host.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 22 rows (indexed 0-21, bottom to top)
//! - **Hidden rows**: the top 2 rows are a spawn buffer and are not drawn
//!
//! # Gravity Units
//!
//! Fall speed is fixed-point: one row is [`GRAVITY_UNIT`] (256) units, and a
//! gravity rate is the number of units a piece falls per frame.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRAVITY_UNIT` | 256 | Units per row |
//! | `GRAVITY_1G` | 5632 | A full well height per frame |
//! | `GRAVITY_20G` | 112640 | Sonic drop rate |
//! | `GRAVITY_SOFT_DROP` | 1408 | Soft drop rate |
//!
//! # Frame Timing Defaults
//!
//! | Attribute | Frames |
//! |-----------|--------|
//! | ARE (entry delay) | 25 |
//! | Line ARE | 40 |
//! | DAS | 14 |
//! | Lock delay | 30 |
//! | Line clear delay | 24 |
//! | Gravity | 48 units |
//!
//! # Examples
//!
//! ```
//! use blocky_types::{KeyKind, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(KeyKind::from_str("rotateCw"), Some(KeyKind::RotateCw));
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 22);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: usize = 10;

/// Board height in cells (22 rows, including the hidden spawn buffer)
pub const BOARD_HEIGHT: usize = 22;

/// Rows at the top of the well that renderers keep out of view
pub const HIDDEN_ROWS: usize = 2;

/// Fixed simulation rate (frames per second)
pub const TICKS_PER_SECOND: u32 = 60;

/// Denominator of the fractional row unit used by gravity.
pub const GRAVITY_UNIT: u32 = 256;

/// "1G": a full well height per frame, in gravity units.
pub const GRAVITY_1G: u32 = BOARD_HEIGHT as u32 * GRAVITY_UNIT;

/// "20G": effectively instantaneous; used for sonic drops.
pub const GRAVITY_20G: u32 = 20 * GRAVITY_1G;

/// Gravity applied while the soft drop key is held.
pub const GRAVITY_SOFT_DROP: u32 = GRAVITY_1G / 4;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The seven tetromino piece kinds
///
/// Each kind carries a presentation color:
/// - **I**: Red
/// - **J**: Blue
/// - **L**: Orange
/// - **O**: Yellow
/// - **S**: Pink
/// - **T**: Cyan
/// - **Z**: Green
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, in table order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Position of this kind in [`PieceKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::J => 1,
            PieceKind::L => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::T => 5,
            PieceKind::Z => 6,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blocky_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Uppercase letter, also the stem of the rotation data file name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }

    /// Presentation color; never consulted by the simulation.
    pub fn color(&self) -> Rgb {
        match self {
            PieceKind::I => Rgb::new(255, 0, 0),
            PieceKind::J => Rgb::new(0, 0, 255),
            PieceKind::L => Rgb::new(255, 200, 0),
            PieceKind::O => Rgb::new(255, 255, 0),
            PieceKind::S => Rgb::new(255, 175, 175),
            PieceKind::T => Rgb::new(0, 255, 255),
            PieceKind::Z => Rgb::new(0, 255, 0),
        }
    }
}

/// Logical keys understood by the engine.
///
/// Several physical keys may map to one logical key; that mapping lives in the
/// input crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// Shift one column left, auto-repeating after DAS
    MoveLeft,
    /// Shift one column right, auto-repeating after DAS
    MoveRight,
    /// Drop to the floor in a single frame without locking
    SonicDrop,
    /// Faster gravity while held; grounded pieces lock at once
    SoftDrop,
    RotateCcw,
    RotateCw,
}

impl KeyKind {
    pub const ALL: [KeyKind; 6] = [
        KeyKind::MoveLeft,
        KeyKind::MoveRight,
        KeyKind::SonicDrop,
        KeyKind::SoftDrop,
        KeyKind::RotateCcw,
        KeyKind::RotateCw,
    ];

    pub fn index(self) -> usize {
        match self {
            KeyKind::MoveLeft => 0,
            KeyKind::MoveRight => 1,
            KeyKind::SonicDrop => 2,
            KeyKind::SoftDrop => 3,
            KeyKind::RotateCcw => 4,
            KeyKind::RotateCw => 5,
        }
    }

    /// Parse key from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blocky_types::KeyKind;
    ///
    /// assert_eq!(KeyKind::from_str("moveLeft"), Some(KeyKind::MoveLeft));
    /// assert_eq!(KeyKind::from_str("SONICDROP"), Some(KeyKind::SonicDrop));
    /// assert_eq!(KeyKind::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(KeyKind::MoveLeft),
            "moveright" => Some(KeyKind::MoveRight),
            "sonicdrop" => Some(KeyKind::SonicDrop),
            "softdrop" => Some(KeyKind::SoftDrop),
            "rotateccw" => Some(KeyKind::RotateCcw),
            "rotatecw" => Some(KeyKind::RotateCw),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyKind::MoveLeft => "moveLeft",
            KeyKind::MoveRight => "moveRight",
            KeyKind::SonicDrop => "sonicDrop",
            KeyKind::SoftDrop => "softDrop",
            KeyKind::RotateCcw => "rotateCcw",
            KeyKind::RotateCw => "rotateCw",
        }
    }
}

/// Frame timings and gravity that govern a game.
///
/// All delays are in frames; `gravity` is in 1/[`GRAVITY_UNIT`] rows per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameAttributes {
    /// Entry delay (ARE): frames between a lock and the next spawn.
    pub are: u32,
    /// Entry delay used after a lock that cleared lines.
    pub line_are: u32,
    /// Delayed auto shift: frames a direction is held before it repeats.
    pub das: u32,
    /// Frames a grounded piece may still act before it locks.
    pub lock_delay: u32,
    /// Frames spent on the line clear itself, before line ARE starts counting.
    pub line_clear_delay: u32,
    pub gravity: u32,
}

impl GameAttributes {
    /// Frames to wait before the next spawn.
    pub fn entry_delay(&self, line_cleared: bool) -> u32 {
        if line_cleared {
            self.line_clear_delay + self.line_are
        } else {
            self.are
        }
    }
}

impl Default for GameAttributes {
    fn default() -> Self {
        Self {
            are: 25,
            line_are: 40,
            das: 14,
            lock_delay: 30,
            line_clear_delay: 24,
            gravity: 48,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_timing_defaults() {
        let attrs = GameAttributes::default();
        assert_eq!(attrs.are, 25);
        assert_eq!(attrs.line_are, 40);
        assert_eq!(attrs.das, 14);
        assert_eq!(attrs.lock_delay, 30);
        assert_eq!(attrs.line_clear_delay, 24);
        assert_eq!(attrs.gravity, 48);
    }

    #[test]
    fn test_entry_delay_after_line_clear() {
        let attrs = GameAttributes::default();
        assert_eq!(attrs.entry_delay(false), 25);
        assert_eq!(attrs.entry_delay(true), 64);
    }

    #[test]
    fn test_gravity_constants() {
        assert_eq!(GRAVITY_1G, 22 * 256);
        assert_eq!(GRAVITY_20G, 20 * 22 * 256);
        assert_eq!(GRAVITY_SOFT_DROP, 1408);
    }

    #[test]
    fn test_indices_match_all_order() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(*kind));
        }
        for (i, key) in KeyKind::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
            assert_eq!(KeyKind::from_str(key.as_str()), Some(*key));
        }
    }
}

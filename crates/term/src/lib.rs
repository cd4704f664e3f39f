//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal play. It
//! avoids widget toolkits and instead renders a [`Snapshot`] into a simple
//! framebuffer that is then diffed and flushed to the terminal with crossterm.
//!
//! - [`GameView`] turns a snapshot into a [`FrameBuffer`] (pure, testable)
//! - [`TerminalRenderer`] owns the terminal and writes framebuffers to it
//!
//! [`Snapshot`]: crate::core::Snapshot

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blocky_core as core;
pub use blocky_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::{AnchorY, BoardLayout, GameView, Viewport};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, Run, TerminalRenderer};

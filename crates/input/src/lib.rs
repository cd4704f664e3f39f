//! Terminal input module (engine-facing).
//!
//! This module maps `crossterm` key events onto logical [`KeyKind`]s and
//! carries them from a reader thread to the tick loop over a
//! `crossbeam-channel` queue. Terminals that never report key releases get
//! synthesized ones after a timeout.
//!
//! [`KeyKind`]: crate::types::KeyKind

pub mod map;
pub mod queue;
pub mod reader;
pub mod release;

pub use blocky_core as core;
pub use blocky_types as types;

pub use map::{key_for, should_quit, transition_for};
pub use queue::{channel, Drained, InputEvent, KeyQueue, KeySender, KeyTransition};
pub use reader::spawn_reader;
pub use release::{ReleaseTimeout, DEFAULT_KEY_RELEASE_TIMEOUT_MS};

//! Core simulation module - pure, deterministic, and testable
//!
//! This crate contains the game rules and the fixed-step simulation. It has no
//! dependencies on terminals, threads or files, which makes it:
//!
//! - **Deterministic**: the same seed and inputs produce the same game
//! - **Testable**: every rule can be driven frame by frame
//! - **Portable**: any host can step it (terminal, headless, benchmarks)
//!
//! # Module Structure
//!
//! - [`well`]: the grid of locked cells, collision tests and line clearing
//! - [`rotation`]: 4x4 occupancy masks for every kind and orientation
//! - [`piece`]: the active piece (kind, orientation, position)
//! - [`position`]: grid position plus fixed-point gravity progress
//! - [`input`]: per-key press/hold tracking in frames
//! - [`rng`]: 7-bag random piece generation
//! - [`engine`]: the per-frame step (spawn, input, gravity, line clear)
//! - [`snapshot`]: settled post-tick view for renderers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use blocky_core::{Engine, RotationTable, Status};
//! use blocky_core::types::{GameAttributes, KeyKind};
//!
//! let mut engine = Engine::new(Arc::new(RotationTable::standard()), GameAttributes::default(), 42);
//! engine.key_down(KeyKind::SonicDrop);
//! assert_eq!(engine.step(), Status::Running);
//! assert!(engine.active_piece().is_some());
//! ```
//!
//! # Timing
//!
//! Everything is measured in frames. The host calls [`Engine::step`] at a
//! fixed rate (60 Hz by default); gravity is in 1/256 rows per frame.

pub mod engine;
pub mod error;
pub mod input;
pub mod piece;
pub mod position;
pub mod rng;
pub mod rotation;
pub mod snapshot;
pub mod well;

pub use blocky_types as types;

// Re-export commonly used types for convenience
pub use engine::{spawn_position, Engine, Phase, Status, TickEvents};
pub use error::{ParseError, RotationError, WellError};
pub use input::{InputState, KeySink};
pub use piece::Piece;
pub use position::Position;
pub use rng::{FixedSequence, PieceSource, Randomizer};
pub use rotation::{parse_rotations, Mask, RotationTable};
pub use snapshot::{ActiveSnapshot, Snapshot};
pub use well::Well;

//! Blocky (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof as
//! `blocky::{core,input,term,types}` and adds the host's [`config`] layer.
//! The simulation itself lives in `blocky-core`.

pub mod config;

pub use blocky_core as core;
pub use blocky_input as input;
pub use blocky_term as term;
pub use blocky_types as types;

pub use config::{Config, ConfigError};

//! Runtime configuration for the terminal host.
//!
//! Configuration is a TOML file; every field is optional.
//!
//! ```toml
//! seed = 42
//! tick_hz = 60
//! data_dir = "data"
//! key_release_timeout_ms = 150
//!
//! [attributes]
//! gravity = 96
//! das = 10
//! ```
//!
//! The file is looked up as: the first command-line argument, then the
//! `BLOCKY_CONFIG` environment variable, then `blocky.toml` in the working
//! directory. With none of those, defaults apply.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{RotationError, RotationTable};
use crate::input::DEFAULT_KEY_RELEASE_TIMEOUT_MS;
use crate::types::{GameAttributes, PieceKind, GRAVITY_20G, TICKS_PER_SECOND};

pub const CONFIG_ENV: &str = "BLOCKY_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "blocky.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config syntax")]
    Parse(#[from] toml::de::Error),
    #[error("bad rotation data in {}", dir.display())]
    Rotation {
        dir: PathBuf,
        #[source]
        source: RotationError,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Randomizer seed; `None` seeds from the clock.
    pub seed: Option<u64>,
    pub tick_hz: u32,
    /// Directory holding `<KIND>.data` rotation files; `None` uses the
    /// built-in geometry.
    pub data_dir: Option<PathBuf>,
    pub key_release_timeout_ms: u64,
    pub attributes: GameAttributes,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            tick_hz: TICKS_PER_SECOND,
            data_dir: None,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            attributes: GameAttributes::default(),
        }
    }
}

impl Config {
    /// Parse and validate TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Find and load the config file, falling back to defaults when there is
    /// none. Returns the path that was used, if any.
    pub fn discover(arg: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        match resolve_path(arg, env, Path::new(DEFAULT_CONFIG_FILE)) {
            Some(path) => Ok((Self::load(&path)?, Some(path))),
            None => Ok((Self::default(), None)),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_hz == 0 {
            return Err(ConfigError::Invalid("tick_hz must be at least 1".into()));
        }
        if self.attributes.gravity > GRAVITY_20G {
            return Err(ConfigError::Invalid(format!(
                "attributes.gravity must be at most {GRAVITY_20G}, got {}",
                self.attributes.gravity
            )));
        }
        Ok(())
    }

    /// Time between simulation steps.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.tick_hz.max(1)
    }

    pub fn key_release_timeout(&self) -> Duration {
        Duration::from_millis(self.key_release_timeout_ms)
    }

    /// The configured seed, or one taken from the clock.
    pub fn seed_or_clock(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }

    /// Build the rotation table: built in, or read from `data_dir`.
    pub fn rotation_table(&self) -> Result<Arc<RotationTable>, ConfigError> {
        match &self.data_dir {
            None => Ok(Arc::new(RotationTable::standard())),
            Some(dir) => load_rotation_table(dir).map(Arc::new),
        }
    }
}

/// Config file precedence: explicit argument, then environment, then the
/// default file if it exists.
pub fn resolve_path(arg: Option<PathBuf>, env: Option<PathBuf>, default: &Path) -> Option<PathBuf> {
    arg.or(env)
        .or_else(|| default.is_file().then(|| default.to_path_buf()))
}

/// Read `<KIND>.data` for every kind from `dir`.
pub fn load_rotation_table(dir: &Path) -> Result<RotationTable, ConfigError> {
    let mut texts = Vec::with_capacity(PieceKind::ALL.len());
    for kind in PieceKind::ALL {
        let path = dir.join(format!("{}.data", kind.as_str()));
        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io { path, source })?;
        texts.push(text);
    }
    RotationTable::from_sources(|kind| texts.get(kind.index()).map(String::as_str)).map_err(
        |source| ConfigError::Rotation {
            dir: dir.to_path_buf(),
            source,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_tick_duration_at_60hz() {
        let config = Config::default();
        assert_eq!(config.tick_duration(), Duration::from_secs(1) / 60);
    }

    #[test]
    fn test_explicit_seed_is_used() {
        let config = Config {
            seed: Some(9),
            ..Config::default()
        };
        assert_eq!(config.seed_or_clock(), 9);
    }

    #[test]
    fn test_gravity_above_20g_is_invalid() {
        let text = format!("[attributes]\ngravity = {}\n", GRAVITY_20G + 1);
        assert!(matches!(Config::from_toml(&text), Err(ConfigError::Invalid(_))));
        let text = format!("[attributes]\ngravity = {GRAVITY_20G}\n");
        assert_eq!(Config::from_toml(&text).unwrap().attributes.gravity, GRAVITY_20G);
    }

    #[test]
    fn test_argument_beats_environment() {
        let picked = resolve_path(
            Some(PathBuf::from("a.toml")),
            Some(PathBuf::from("b.toml")),
            Path::new("does-not-exist.toml"),
        );
        assert_eq!(picked, Some(PathBuf::from("a.toml")));
        let picked = resolve_path(None, Some(PathBuf::from("b.toml")), Path::new("x"));
        assert_eq!(picked, Some(PathBuf::from("b.toml")));
        assert_eq!(resolve_path(None, None, Path::new("does-not-exist.toml")), None);
    }
}

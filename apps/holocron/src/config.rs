//! # Configuration
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. Built-in defaults
//! 2. `holocron.toml` (or the file given with `--config`)
//! 3. Environment: `HOLOCRON_API_URL`, `HOLOCRON_DATABASE`
//!
//! Command-line flags are applied on top by the CLI.
//!
//! ```toml
//! api_base_url = "https://swapi.dev/api"
//! database = "holocron.db"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//! ```

use crate::error::AppError;
use confique::Config as _;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "holocron.toml";

/// File-layer values before defaults and environment are merged in.
type PartialConfig = <Config as confique::Config>::Layer;

// =============================================================================
// CONFIGURATION STRUCTS
// =============================================================================

#[derive(confique::Config, Serialize, Debug, Clone, PartialEq, Eq)]
#[config(layer_attr(serde(deny_unknown_fields)))]
pub struct Config {
    /// Base URL of the reference API, without trailing slash.
    #[config(env = "HOLOCRON_API_URL", default = "https://swapi.dev/api")]
    pub api_base_url: String,

    /// Path of the redb database holding cache entries and favorites.
    #[config(env = "HOLOCRON_DATABASE", default = "holocron.db")]
    pub database: PathBuf,

    #[config(nested)]
    pub server: ServerConfig,
}

#[derive(confique::Config, Serialize, Debug, Clone, PartialEq, Eq)]
#[config(layer_attr(serde(deny_unknown_fields)))]
pub struct ServerConfig {
    #[config(default = "127.0.0.1")]
    pub host: String,
    #[config(default = 8080)]
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: holocron_core::primitives::DEFAULT_API_BASE_URL.to_string(),
            database: PathBuf::from("holocron.db"),
            server: ServerConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

impl Config {
    /// Load file and environment layers.
    ///
    /// An explicit path must exist. Without one, `holocron.toml` is read if
    /// present and defaults are used otherwise. Empty environment values
    /// count as unset.
    pub fn load(explicit: Option<&Path>) -> Result<Self, AppError> {
        let file = match explicit {
            Some(path) => Some(read_partial(path)?),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Some(read_partial(path)?)
                } else {
                    None
                }
            }
        };

        let mut builder = Self::builder().env();
        if let Some(partial) = file {
            builder = builder.preloaded(partial);
        }
        builder.load().map_err(|e| AppError::Config(e.to_string()))
    }

    /// File layer only; the environment is not consulted.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let partial = read_partial(path)?;
        Self::builder()
            .preloaded(partial)
            .load()
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse a TOML document over the defaults.
    pub fn from_toml(raw: &str) -> Result<Self, AppError> {
        Self::builder()
            .preloaded(parse_partial(raw)?)
            .load()
            .map_err(|e| AppError::Config(e.to_string()))
    }
}

fn parse_partial(raw: &str) -> Result<PartialConfig, AppError> {
    toml::from_str(raw).map_err(|e| AppError::Config(e.to_string()))
}

fn read_partial(path: &Path) -> Result<PartialConfig, AppError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
    let partial = parse_partial(&raw)
        .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
    tracing::debug!(path = %path.display(), "configuration file loaded");
    Ok(partial)
}

// =============================================================================
// TESTS
// =============================================================================

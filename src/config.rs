//! Server configuration loaded from TOML.

use crate::error::ConfigError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_gridtoe_core::{DEFAULT_MAX_DEPTH, SearchConfig};
use tracing::{debug, info, instrument};

/// Upper bound accepted for `max_grid_size`.
pub const GRID_SIZE_LIMIT: usize = 64;

/// Upper bound accepted for `max_ai_grid_size`.
pub const AI_GRID_SIZE_LIMIT: usize = 3;

/// Upper bound accepted for `search_depth`; a 3x3 game never runs deeper.
pub const SEARCH_DEPTH_LIMIT: usize = 9;

/// Configuration for the game server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    port: u16,

    /// Grid size used when a new game request omits one.
    #[serde(default = "default_grid_size")]
    default_grid_size: usize,

    /// Largest grid any game may use.
    #[serde(default = "default_max_grid_size")]
    max_grid_size: usize,

    /// Largest grid on which a computer opponent may be requested.
    #[serde(default = "default_max_ai_grid_size")]
    max_ai_grid_size: usize,

    /// Minimax depth ceiling for the hard opponent.
    #[serde(default = "default_search_depth")]
    search_depth: usize,

    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_grid_size() -> usize {
    3
}

fn default_max_grid_size() -> usize {
    15
}

fn default_max_ai_grid_size() -> usize {
    3
}

fn default_search_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            default_grid_size: default_grid_size(),
            max_grid_size: default_max_grid_size(),
            max_ai_grid_size: default_max_ai_grid_size(),
            search_depth: default_search_depth(),
            log_filter: default_log_filter(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Loads from `path` when given, otherwise returns defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Overrides the bind address.
    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = host.into();
    }

    /// Overrides the bind port.
    pub fn set_port(&mut self, port: u16) {
        self.port = port;
    }

    /// Search settings for hard opponents.
    pub fn search(&self) -> SearchConfig {
        SearchConfig::with_max_depth(self.search_depth)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=GRID_SIZE_LIMIT).contains(&self.max_grid_size) {
            return Err(ConfigError::new(format!(
                "max_grid_size must be between 1 and {GRID_SIZE_LIMIT}, got {}",
                self.max_grid_size
            )));
        }
        if !(1..=self.max_grid_size).contains(&self.default_grid_size) {
            return Err(ConfigError::new(format!(
                "default_grid_size must be between 1 and {}, got {}",
                self.max_grid_size, self.default_grid_size
            )));
        }
        if self.max_ai_grid_size > AI_GRID_SIZE_LIMIT {
            return Err(ConfigError::new(format!(
                "max_ai_grid_size must be at most {AI_GRID_SIZE_LIMIT}, got {}",
                self.max_ai_grid_size
            )));
        }
        if self.search_depth > SEARCH_DEPTH_LIMIT {
            return Err(ConfigError::new(format!(
                "search_depth must be at most {SEARCH_DEPTH_LIMIT}, got {}",
                self.search_depth
            )));
        }
        Ok(())
    }
}

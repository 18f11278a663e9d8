//! Game configuration: default constants and the TOML-backed `AppConfig`

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;

/// Playfield width in pixels
pub const FIELD_WIDTH: i32 = 960;

/// Playfield height in pixels
pub const FIELD_HEIGHT: i32 = 500;

/// Cell size (one entity) in pixels, same on both axes
pub const CELL_SIZE: i32 = 20;

/// Horizontal margin subtracted from the width when bounding the agent length
pub const AGENT_LENGTH_MARGIN: i32 = 100;

/// Game tick delay in milliseconds
pub const TICK_DELAY_MS: u64 = 100;

/// Lives the agent starts a session with
pub const STARTING_LIVES: u32 = 5;

/// Items that must be eaten before the agent grows by one segment
pub const GROWTH_THRESHOLD: u32 = 3;

/// Agent length used when the requested one is out of range
pub const DEFAULT_AGENT_LENGTH: i32 = 3;

/// Obstacle count used when the requested one is negative
pub const DEFAULT_OBSTACLE_COUNT: i32 = 10;

/// Item count used when the requested one is not positive
pub const DEFAULT_ITEM_COUNT: i32 = 5;

/// WebSocket server port
pub const SERVER_PORT: u16 = 8080;

/// Broadcast channel capacity
pub const BROADCAST_CAPACITY: usize = 100;

/// Session command channel capacity
pub const COMMAND_CAPACITY: usize = 32;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "GRID_SNAKE_CONFIG";

/// Config file picked up from the working directory
pub const CONFIG_FILE: &str = "grid-snake.toml";

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub game: GameConfig,
}

/// HTTP / WebSocket server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_broadcast_capacity")]
    pub broadcast_capacity: usize,
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_width")]
    pub field_width: i32,
    #[serde(default = "default_height")]
    pub field_height: i32,
    #[serde(default = "default_cell")]
    pub cell_size: i32,
    #[serde(default = "default_tick")]
    pub tick_ms: u64,
    #[serde(default = "default_lives")]
    pub lives: u32,
    #[serde(default = "default_growth")]
    pub growth_threshold: u32,
    #[serde(default = "default_agent_length")]
    pub agent_length: i32,
    #[serde(default = "default_obstacle_count")]
    pub obstacle_count: i32,
    #[serde(default = "default_item_count")]
    pub item_count: i32,
    /// Fixed RNG seed; random when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    SERVER_PORT
}

fn default_broadcast_capacity() -> usize {
    BROADCAST_CAPACITY
}

fn default_width() -> i32 {
    FIELD_WIDTH
}

fn default_height() -> i32 {
    FIELD_HEIGHT
}

fn default_cell() -> i32 {
    CELL_SIZE
}

fn default_tick() -> u64 {
    TICK_DELAY_MS
}

fn default_lives() -> u32 {
    STARTING_LIVES
}

fn default_growth() -> u32 {
    GROWTH_THRESHOLD
}

fn default_agent_length() -> i32 {
    DEFAULT_AGENT_LENGTH
}

fn default_obstacle_count() -> i32 {
    DEFAULT_OBSTACLE_COUNT
}

fn default_item_count() -> i32 {
    DEFAULT_ITEM_COUNT
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            broadcast_capacity: default_broadcast_capacity(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            cell_size: CELL_SIZE,
            tick_ms: TICK_DELAY_MS,
            lives: STARTING_LIVES,
            growth_threshold: GROWTH_THRESHOLD,
            agent_length: DEFAULT_AGENT_LENGTH,
            obstacle_count: DEFAULT_OBSTACLE_COUNT,
            item_count: DEFAULT_ITEM_COUNT,
            seed: None,
        }
    }
}

impl AppConfig {
    /// Parse and validate configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Resolve configuration: `GRID_SNAKE_CONFIG`, then `grid-snake.toml`, then defaults
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            info!("Loading config from {}", path);
            return Self::load_file(path);
        }

        if Path::new(CONFIG_FILE).exists() {
            info!("Loading config from {}", CONFIG_FILE);
            return Self::load_file(CONFIG_FILE);
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Check field geometry and timing
    pub fn validate(&self) -> Result<(), ConfigError> {
        let game = &self.game;

        if game.cell_size <= 0 {
            return Err(ConfigError::Validation("cell_size must be positive".into()));
        }
        if game.field_width <= 0 || game.field_width % game.cell_size != 0 {
            return Err(ConfigError::Validation(format!(
                "field_width {} must be a positive multiple of cell_size {}",
                game.field_width, game.cell_size
            )));
        }
        if game.field_height <= 0 || game.field_height % game.cell_size != 0 {
            return Err(ConfigError::Validation(format!(
                "field_height {} must be a positive multiple of cell_size {}",
                game.field_height, game.cell_size
            )));
        }
        if game.field_width <= AGENT_LENGTH_MARGIN + 2 * game.cell_size {
            return Err(ConfigError::Validation(format!(
                "field_width {} leaves no room for an agent",
                game.field_width
            )));
        }
        if game.tick_ms == 0 {
            return Err(ConfigError::Validation("tick_ms must be positive".into()));
        }
        if self.server.broadcast_capacity == 0 {
            return Err(ConfigError::Validation(
                "broadcast_capacity must be positive".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.game.field_width, 960);
        assert_eq!(config.game.field_height, 500);
        assert_eq!(config.game.cell_size, 20);
    }

    #[test]
    fn test_partial_toml() {
        let config = AppConfig::from_toml(
            r#"
            [game]
            tick_ms = 50
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.game.tick_ms, 50);
        assert_eq!(config.game.seed, Some(7));
        assert_eq!(config.game.lives, STARTING_LIVES);
        assert_eq!(config.server.port, SERVER_PORT);
    }

    #[test]
    fn test_rejects_off_grid_field() {
        let err = AppConfig::from_toml(
            r#"
            [game]
            field_width = 965
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_rejects_bad_toml() {
        let err = AppConfig::from_toml("[game\nwidth = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 9000").unwrap();

        let config = AppConfig::load_file(file.path()).unwrap();
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::load_file("/nonexistent/grid-snake.toml").unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}

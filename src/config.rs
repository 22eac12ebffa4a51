//! Tunable limits for inventories and the world spawner
//!
//! Every field has a default matching the reference game, so a config file
//! only needs the values it changes:
//!
//! ```json
//! { "spawner": { "max_potions": 8, "spawn_interval_ms": 5000 } }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Slots an inventory holds
pub const DEFAULT_MAX_SLOTS: usize = 5;
/// Units per stackable slot
pub const DEFAULT_MAX_STACK: u32 = 3;
/// Tries per placement search
pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InventoryConfig {
    pub max_slots: usize,
    pub max_stack: u32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        InventoryConfig {
            max_slots: DEFAULT_MAX_SLOTS,
            max_stack: DEFAULT_MAX_STACK,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpawnerConfig {
    pub spawn_interval_ms: u64,
    pub max_potions: usize,
    pub map_width: u32,
    pub map_height: u32,
    /// Side length of a world potion's square bounding box
    pub potion_size: u32,
    pub max_attempts: u32,
}

impl SpawnerConfig {
    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        SpawnerConfig {
            spawn_interval_ms: 10_000,
            max_potions: 5,
            map_width: 640,
            map_height: 360,
            potion_size: 32,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub inventory: InventoryConfig,
    pub spawner: SpawnerConfig,
}

impl GameConfig {
    /// Loads and validates a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.inventory.max_slots == 0 {
            return Err(ConfigError::Invalid("inventory.max_slots must be at least 1".into()));
        }
        if self.inventory.max_stack == 0 {
            return Err(ConfigError::Invalid("inventory.max_stack must be at least 1".into()));
        }
        if self.spawner.potion_size == 0 {
            return Err(ConfigError::Invalid("spawner.potion_size must be at least 1".into()));
        }
        let max_extent = i32::MAX as u32;
        if self.spawner.map_width > max_extent || self.spawner.map_height > max_extent {
            return Err(ConfigError::Invalid(format!(
                "spawner map dimensions must not exceed {max_extent}"
            )));
        }
        if self.spawner.max_attempts == 0 {
            return Err(ConfigError::Invalid("spawner.max_attempts must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_limits() {
        let config = GameConfig::default();
        assert_eq!(config.inventory.max_slots, 5);
        assert_eq!(config.inventory.max_stack, 3);
        assert_eq!(config.spawner.max_attempts, 30);
        assert_eq!(config.spawner.spawn_interval(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "spawner": { "max_potions": 8 } }"#).unwrap();
        assert_eq!(config.spawner.max_potions, 8);
        assert_eq!(config.spawner.map_width, 640);
        assert_eq!(config.inventory, InventoryConfig::default());
    }

    #[test]
    fn test_rejects_zero_slots() {
        let err = GameConfig::from_json(r#"{ "inventory": { "max_slots": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_map_beyond_coordinate_range() {
        let err = GameConfig::from_json(r#"{ "spawner": { "map_width": 3000000000 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = GameConfig::from_json(r#"{ "spawner": { "map_height": 2147483648 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let edge = GameConfig::from_json(r#"{ "spawner": { "map_width": 2147483647 } }"#);
        assert!(edge.is_ok());
    }

    #[test]
    fn test_rejects_zero_potion_size() {
        let err = GameConfig::from_json(r#"{ "spawner": { "potion_size": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_accepts_huge_stack_limit() {
        let config = GameConfig::from_json(r#"{ "inventory": { "max_stack": 4294967295 } }"#).unwrap();
        assert_eq!(config.inventory.max_stack, u32::MAX);
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

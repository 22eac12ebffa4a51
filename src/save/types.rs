//! Save data types for world potions
//!
//! Uses Serde to write the live potion list as JSON.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use thiserror::Error;

use crate::spawner::WorldPotionRecord;

/// The root save file structure
#[derive(Debug, Serialize, Deserialize)]
pub struct PotionSaveFile {
    pub version: u32,
    pub timestamp: SystemTime,
    /// Human-readable local time of the save
    pub label: String,
    pub potions: Vec<WorldPotionRecord>,
}

/// Error types for save/load operations
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid save version: {0}")]
    InvalidVersion(u32),

    #[error("No save directory available")]
    NoSaveDirectory,
}

/// Current save file version
pub const CURRENT_SAVE_VERSION: u32 = 1;

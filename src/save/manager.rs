//! Save manager for world potions
//!
//! This module provides the SaveManager struct which handles:
//! - Writing the live potion list to a JSON file
//! - Reading it back with a version check
//! - Picking a default save directory

use super::store::PotionStore;
use super::types::*;
use crate::spawner::WorldPotionRecord;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const POTION_FILE: &str = "world_potions.json";

#[derive(Debug, Clone)]
pub struct SaveManager {
    save_directory: PathBuf,
}

impl SaveManager {
    /// Creates a new SaveManager with the given save directory
    ///
    /// The save directory will be created if it doesn't exist.
    pub fn new(save_directory: impl AsRef<Path>) -> Result<Self, SaveError> {
        let save_dir = save_directory.as_ref().to_path_buf();

        if !save_dir.exists() {
            fs::create_dir_all(&save_dir)?;
        }

        Ok(SaveManager {
            save_directory: save_dir,
        })
    }

    /// `~/.consumables/saves`
    pub fn default_directory() -> Result<PathBuf, SaveError> {
        dirs::home_dir()
            .map(|home| home.join(".consumables").join("saves"))
            .ok_or(SaveError::NoSaveDirectory)
    }

    pub fn save_path(&self) -> PathBuf {
        self.save_directory.join(POTION_FILE)
    }

    /// Write the potion list to disk
    pub fn save_potions(&self, potions: &[WorldPotionRecord]) -> Result<PathBuf, SaveError> {
        let save_file = PotionSaveFile {
            version: CURRENT_SAVE_VERSION,
            timestamp: SystemTime::now(),
            label: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            potions: potions.to_vec(),
        };

        // Pretty format for readability/debugging
        let json = serde_json::to_string_pretty(&save_file)?;
        let filepath = self.save_path();
        fs::write(&filepath, json)?;

        tracing::debug!(path = %filepath.display(), count = potions.len(), "world potions saved");

        Ok(filepath)
    }

    /// Read the potion list back. No file yet means no potions.
    pub fn load_potions(&self) -> Result<Vec<WorldPotionRecord>, SaveError> {
        let filepath = self.save_path();

        if !filepath.exists() {
            return Ok(Vec::new());
        }

        let json = fs::read_to_string(&filepath)?;
        let save_file: PotionSaveFile = serde_json::from_str(&json)?;

        if save_file.version > CURRENT_SAVE_VERSION {
            return Err(SaveError::InvalidVersion(save_file.version));
        }

        Ok(save_file.potions)
    }

    pub fn save_exists(&self) -> bool {
        self.save_path().exists()
    }
}

impl PotionStore for SaveManager {
    fn persist(&mut self, potions: &[WorldPotionRecord]) -> Result<(), SaveError> {
        self.save_potions(potions).map(|_| ())
    }

    fn load(&mut self) -> Result<Vec<WorldPotionRecord>, SaveError> {
        self.load_potions()
    }
}

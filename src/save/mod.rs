//! Save/Load of world potions
//!
//! This module lets spawned-but-uncollected potions survive a restart:
//! - JSON-based save file (human-readable, debuggable)
//! - Version check on load
//! - A `PotionStore` trait so the spawner does not care where records go
//!
//! # Architecture
//!
//! - `types`: Save data structures and error types
//! - `manager`: SaveManager, the JSON file store
//! - `store`: the `PotionStore` trait plus no-op and in-memory stores
//!
//! # Example Usage
//!
//! ```ignore
//! let store = SaveManager::new(SaveManager::default_directory()?)?;
//! let mut spawner = WorldSpawner::new(config, table, notifier).with_store(Box::new(store));
//! spawner.restore();
//! ```

pub mod manager;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use manager::SaveManager;
pub use store::{MemoryStore, NoopStore, PotionStore};
pub use types::*;

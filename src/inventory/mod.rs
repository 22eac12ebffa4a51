// Inventory system module
//
// This module provides the actor's item container:
// - Fixed number of slots with stacking
// - One active slot that input acts on
// - Per-tick item updates and removal of consumed items

pub mod error;
pub mod inventory;

// Re-export main types
pub use error::InventoryError;
pub use inventory::Inventory;

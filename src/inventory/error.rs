use thiserror::Error;
use crate::item::ItemError;

/// Errors that can occur during inventory operations
///
/// All of these are normal outcomes the caller is expected to handle
/// (usually by telling the player), never reasons to stop the game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// A new slot is needed and none is free
    #[error("Inventory is full")]
    InventoryFull,

    /// Slot index out of bounds
    #[error("Invalid slot index: {0}")]
    InvalidSlot(usize),

    /// Nothing is selected (inventory empty)
    #[error("No active item")]
    NoActiveItem,

    /// The active item is charging, aiming or active
    #[error("Active item is busy")]
    ItemNotIdle,

    #[error(transparent)]
    Item(#[from] ItemError),
}

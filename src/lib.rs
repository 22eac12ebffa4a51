//! Timed consumable items for a 2D action game
//!
//! - `item`: definitions, the registry and the per-instance state machine
//!   (idle, charging, aiming, active, consumed)
//! - `inventory`: slot container with stacking and an active slot
//! - `spawner`: weighted world potion spawning and pickup
//! - `game`: the per-tick orchestration tying the three together
//!
//! Time is always passed in as a `Duration` since some fixed origin; nothing
//! in here reads a clock.

pub mod collision;
pub mod config;
pub mod game;
pub mod input;
pub mod inventory;
pub mod item;
pub mod notify;
pub mod player;
pub mod save;
pub mod spawner;
pub mod stats;

#[cfg(test)]
mod test_support;

pub use config::GameConfig;
pub use game::{GameWorld, TickReport};
pub use input::ItemInput;
pub use inventory::{Inventory, InventoryError};
pub use item::{Actor, ItemDefinition, ItemEvent, ItemInstance, ItemPhase, ItemRegistry};
pub use notify::{Notifier, Severity};
pub use spawner::WorldSpawner;

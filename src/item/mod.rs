// Item system module
//
// This module provides the core item system, including:
// - Item definitions and properties
// - Item registry for centralized storage
// - Item instances and their charge/active/consumed state machine
// - The actor hooks effects are delivered through

pub mod definition;
pub mod effect;
pub mod error;
pub mod instance;
pub mod properties;
pub mod registry;

// Re-export main types for convenient access
pub use definition::{ItemDefinition, StackClass};
pub use effect::{Actor, AimTarget};
pub use error::ItemError;
pub use instance::{ItemEvent, ItemInstance, ItemPhase};
pub use properties::{ConsumableEffect, ItemProperties, ThrowEffect};
pub use registry::ItemRegistry;

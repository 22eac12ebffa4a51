use serde::{Serialize, Deserialize};
use std::time::Duration;
use super::properties::ItemProperties;

/// How an item type behaves in an inventory slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackClass {
    /// Consumables and crafting materials, stack up to the inventory's limit
    Stackable,

    /// Equippables, one per slot
    Unique,
}

/// The blueprint for an item type
///
/// This defines the static properties of an item that are shared
/// across all instances. Think of it as the "class" and `ItemInstance`
/// as the "instance".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Unique identifier (used for lookups, stacking and saves)
    pub id: String,

    /// Display name shown in UI
    pub name: String,

    /// Description shown in tooltips
    pub description: String,

    /// How long the item charges before its effect lands (zero = instant)
    pub charge_duration: Duration,

    /// How long the effect stays on after landing (zero = one-shot)
    pub active_duration: Duration,

    /// Whether moving while charging cancels the charge
    pub cancel_on_move: bool,

    pub stack_class: StackClass,

    /// Item-specific properties and behaviors
    pub properties: ItemProperties,
}

impl ItemDefinition {
    /// Creates an instant, one-shot, stackable definition.
    ///
    /// Use the `with_*` builders to set timing and flags.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        properties: ItemProperties,
    ) -> Self {
        ItemDefinition {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            charge_duration: Duration::ZERO,
            active_duration: Duration::ZERO,
            cancel_on_move: false,
            stack_class: StackClass::Stackable,
            properties,
        }
    }

    pub fn with_charge(mut self, charge: Duration) -> Self {
        self.charge_duration = charge;
        self
    }

    pub fn with_active(mut self, active: Duration) -> Self {
        self.active_duration = active;
        self
    }

    pub fn cancelled_by_movement(mut self) -> Self {
        self.cancel_on_move = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.stack_class = StackClass::Unique;
        self
    }

    pub fn is_stackable(&self) -> bool {
        self.stack_class == StackClass::Stackable
    }

    /// Returns true if this item can share a slot with another
    pub fn can_stack_with(&self, other: &ItemDefinition) -> bool {
        // Items can only stack if they're the same type and stackable
        self.id == other.id && self.is_stackable()
    }
}

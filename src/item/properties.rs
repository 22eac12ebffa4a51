use serde::{Serialize, Deserialize};
use crate::stats::ModifierEffect;

/// Different categories of items with type-specific data
///
/// This enum lets each kind of item carry what its effect hooks need while
/// all of them share the same timing rules in `ItemDefinition`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemProperties {
    /// Crafting material, never used on its own
    Material,

    /// Drunk or eaten by the holder
    Consumable {
        effect: ConsumableEffect,
    },

    /// Worn for stat bonuses during its active window, then used up.
    /// A charm that burns out, not a permanent slot.
    Equipment {
        modifiers: Vec<ModifierEffect>,
    },

    /// Thrown at a point; waits in the aiming state for a target
    Throwable {
        effect: ThrowEffect,
        range: u32,  // Pixels from the thrower
    },
}

/// Effects for consumable items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConsumableEffect {
    /// Restore health
    Heal(f32),

    /// Restore stamina
    RestoreStamina(f32),

    /// Apply a stat buff for the item's active duration
    Buff {
        modifier: ModifierEffect,
    },

    /// Custom effect (for special items)
    Custom(String),  // Effect ID to look up
}

/// What a thrown item does where it lands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ThrowEffect {
    /// Deal damage in a radius
    Damage {
        amount: f32,
        radius: u32,
    },
}

impl ItemProperties {
    pub fn is_material(&self) -> bool {
        matches!(self, ItemProperties::Material)
    }

    /// Returns true if using this item passes through the aiming state
    pub fn needs_aim(&self) -> bool {
        matches!(self, ItemProperties::Throwable { .. })
    }
}

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use super::definition::ItemDefinition;
use super::error::ItemError;
use super::properties::*;
use crate::stats::{ModifierEffect, StatModifier, StatType};

/// Central registry of all item definitions
///
/// This is the single source of truth for what items exist in the game.
/// Definitions are handed out as `Arc`s so every instance, world potion and
/// spawn table entry shares the same immutable blueprint.
#[derive(Debug, Clone)]
pub struct ItemRegistry {
    items: HashMap<String, Arc<ItemDefinition>>,
}

impl ItemRegistry {
    /// Creates a new empty registry
    pub fn new() -> Self {
        ItemRegistry {
            items: HashMap::new(),
        }
    }

    /// Creates a registry with all built-in items pre-registered
    pub fn create_default() -> Self {
        let mut registry = Self::new();
        registry.register_base_items();
        registry
    }

    /// Registers a new item definition
    ///
    /// Returns error if an item with this ID already exists.
    pub fn register(&mut self, item: ItemDefinition) -> Result<Arc<ItemDefinition>, ItemError> {
        if self.items.contains_key(&item.id) {
            return Err(ItemError::DuplicateDefinition(item.id));
        }

        let item = Arc::new(item);
        self.items.insert(item.id.clone(), Arc::clone(&item));
        Ok(item)
    }

    /// Gets an item definition by ID
    pub fn get(&self, id: &str) -> Option<Arc<ItemDefinition>> {
        self.items.get(id).cloned()
    }

    /// Returns true if an item with this ID exists
    pub fn exists(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns all item definitions
    pub fn all_items(&self) -> impl Iterator<Item = &Arc<ItemDefinition>> {
        self.items.values()
    }

    // ======================================================================
    // Item Registration - Base Game Items
    // ======================================================================

    /// Registers all base game items
    ///
    /// This is where all built-in items are defined. Add new items here.
    fn register_base_items(&mut self) {
        for item in base_items() {
            if let Err(err) = self.register(item) {
                tracing::warn!(%err, "skipping built-in item");
            }
        }
    }
}

impl Default for ItemRegistry {
    fn default() -> Self {
        Self::create_default()
    }
}

fn base_items() -> Vec<ItemDefinition> {
    vec![
        ItemDefinition::new(
            "health_potion",
            "Health Potion",
            "Restores 50 health after a short sip.",
            ItemProperties::Consumable {
                effect: ConsumableEffect::Heal(50.0),
            },
        )
        .with_charge(Duration::from_millis(1000)),
        ItemDefinition::new(
            "stamina_draught",
            "Stamina Draught",
            "Restores 30 stamina instantly.",
            ItemProperties::Consumable {
                effect: ConsumableEffect::RestoreStamina(30.0),
            },
        ),
        ItemDefinition::new(
            "ice_flask",
            "Ice Flask",
            "Chills the blood: slower, but harder to hurt.",
            ItemProperties::Consumable {
                effect: ConsumableEffect::Buff {
                    modifier: ModifierEffect::new(StatType::Defense, StatModifier::Flat(0.3)),
                },
            },
        )
        .with_active(Duration::from_millis(6000)),
        ItemDefinition::new(
            "speed_elixir",
            "Speed Elixir",
            "Doubles movement speed for a while.",
            ItemProperties::Consumable {
                effect: ConsumableEffect::Buff {
                    modifier: ModifierEffect::new(
                        StatType::MovementSpeed,
                        StatModifier::Percentage(1.0),
                    ),
                },
            },
        )
        .with_charge(Duration::from_millis(500))
        .with_active(Duration::from_millis(5000)),
        // Must be drunk standing still
        ItemDefinition::new(
            "shield_tonic",
            "Shield Tonic",
            "Halves incoming damage. Interrupted by moving while drinking.",
            ItemProperties::Consumable {
                effect: ConsumableEffect::Buff {
                    modifier: ModifierEffect::new(StatType::Defense, StatModifier::Flat(0.5)),
                },
            },
        )
        .with_charge(Duration::from_millis(1500))
        .with_active(Duration::from_millis(4000))
        .cancelled_by_movement(),
        ItemDefinition::new(
            "fire_bomb",
            "Fire Bomb",
            "Light, aim, throw.",
            ItemProperties::Throwable {
                effect: ThrowEffect::Damage {
                    amount: 25.0,
                    radius: 48,
                },
                range: 200,
            },
        )
        .with_charge(Duration::from_millis(300)),
        ItemDefinition::new(
            "slime_ball",
            "Slime Ball",
            "A bouncy ball of slime. Used in crafting.",
            ItemProperties::Material,
        ),
        ItemDefinition::new(
            "iron_ring",
            "Iron Ring",
            "A plain ring that steadies the hand.",
            ItemProperties::Equipment {
                modifiers: vec![ModifierEffect::new(
                    StatType::AttackDamage,
                    StatModifier::Flat(2.0),
                )],
            },
        )
        .with_active(Duration::from_millis(30_000))
        .unique(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_has_base_items() {
        let registry = ItemRegistry::create_default();
        assert_eq!(registry.len(), 8);
        assert!(registry.exists("ice_flask"));
        assert!(registry.get("shield_tonic").is_some_and(|d| d.cancel_on_move));
        assert!(registry.get("iron_ring").is_some_and(|d| !d.is_stackable()));
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = ItemRegistry::create_default();
        let dup = ItemDefinition::new("slime_ball", "Dup", "", ItemProperties::Material);

        let err = registry.register(dup).unwrap_err();
        assert_eq!(err, ItemError::DuplicateDefinition("slime_ball".to_string()));
    }

    #[test]
    fn test_get_shares_definition() {
        let registry = ItemRegistry::create_default();
        let a = registry.get("fire_bomb").unwrap();
        let b = registry.get("fire_bomb").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}

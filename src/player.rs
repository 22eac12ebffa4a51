use std::collections::{HashMap, VecDeque};

use crate::collision::{Collidable, Rect};
use crate::item::{
    Actor, AimTarget, ConsumableEffect, ItemDefinition, ItemProperties, ThrowEffect,
};
use crate::stats::{ModifierEffect, Stats};

/// A thrown item landing, waiting for the combat layer to resolve it
#[derive(Debug, Clone, PartialEq)]
pub struct ThrownImpact {
    pub item_id: String,
    pub target: AimTarget,
    pub effect: ThrowEffect,
}

/// The player character, as far as items are concerned
///
/// Owns the stats that potions act on and implements the effect hooks the
/// item state machine calls.
#[derive(Debug, Clone)]
pub struct Character {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub stats: Stats,
    /// Thrown items that landed since the combat layer last drained them
    pub impacts: Vec<ThrownImpact>,
    /// Modifier source tags of each live activation, oldest first, by item id
    activations: HashMap<String, VecDeque<String>>,
    next_activation: u64,
}

impl Character {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Character {
            x,
            y,
            width,
            height,
            stats: Stats::new(),
            impacts: Vec::new(),
            activations: HashMap::new(),
            next_activation: 0,
        }
    }

    /// Moves by a velocity, returning true if the position changed
    pub fn move_by(&mut self, dx: i32, dy: i32) -> bool {
        self.x += dx;
        self.y += dy;
        dx != 0 || dy != 0
    }

    /// Takes every pending throw impact
    pub fn drain_impacts(&mut self) -> Vec<ThrownImpact> {
        std::mem::take(&mut self.impacts)
    }

    /// Number of activations of `item_id` whose modifiers are still on
    pub fn active_count(&self, item_id: &str) -> usize {
        self.activations.get(item_id).map_or(0, VecDeque::len)
    }

    /// Applies `modifiers` as one activation of `definition`
    ///
    /// Each activation gets its own source tag, so two copies of the same
    /// potion running at once are removed one at a time.
    fn begin_activation(&mut self, modifiers: &[ModifierEffect], definition: &ItemDefinition) {
        let tag = format!("{}#{}", definition.id, self.next_activation);
        self.next_activation += 1;

        for modifier in modifiers {
            let mut effect = modifier.from_source(&tag);
            if !definition.active_duration.is_zero() {
                effect.duration = Some(definition.active_duration);
            }
            self.stats.add_modifier(effect);
        }

        self.activations
            .entry(definition.id.clone())
            .or_default()
            .push_back(tag);
    }
}

impl Actor for Character {
    fn position(&self) -> (i32, i32) {
        // Throws start from the character's centre
        (
            self.x + (self.width / 2) as i32,
            self.y + (self.height / 2) as i32,
        )
    }

    fn apply_effect(&mut self, definition: &ItemDefinition) {
        match &definition.properties {
            ItemProperties::Consumable { effect } => match effect {
                ConsumableEffect::Heal(amount) => {
                    let healed = self.stats.health.heal(*amount);
                    tracing::debug!(item = %definition.id, healed, "healed");
                }
                ConsumableEffect::RestoreStamina(amount) => {
                    self.stats.stamina.heal(*amount);
                }
                ConsumableEffect::Buff { modifier } => {
                    self.begin_activation(std::slice::from_ref(modifier), definition);
                }
                ConsumableEffect::Custom(effect_id) => {
                    tracing::debug!(item = %definition.id, effect_id = %effect_id, "custom effect has no handler");
                }
            },
            ItemProperties::Equipment { modifiers } => {
                self.begin_activation(modifiers, definition);
            }
            // Landing is handled by apply_thrown; materials never get here
            ItemProperties::Throwable { .. } | ItemProperties::Material => {}
        }
    }

    fn remove_effect(&mut self, definition: &ItemDefinition) {
        // Every copy of an item lasts equally long, so the oldest ends first.
        // Only modifiers outlive the moment of use; removing none is fine.
        let Some(queue) = self.activations.get_mut(&definition.id) else {
            return;
        };
        if let Some(tag) = queue.pop_front() {
            self.stats.remove_modifiers_from(&tag);
        }
        if queue.is_empty() {
            self.activations.remove(&definition.id);
        }
    }

    fn apply_thrown(&mut self, definition: &ItemDefinition, target: AimTarget) {
        if let ItemProperties::Throwable { effect, .. } = &definition.properties {
            self.impacts.push(ThrownImpact {
                item_id: definition.id.clone(),
                target,
                effect: effect.clone(),
            });
        }
    }
}

impl Collidable for Character {
    fn get_bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InventoryConfig;
    use crate::inventory::Inventory;
    use crate::item::{ItemInstance, ItemRegistry};
    use crate::notify::MessageLog;
    use crate::stats::StatType;
    use std::rc::Rc;
    use std::time::Duration;

    #[test]
    fn test_health_potion_heals_after_charge() {
        let registry = ItemRegistry::create_default();
        let mut hero = Character::new(0, 0, 16, 16);
        hero.stats.health.take_damage(70.0);

        let mut potion = ItemInstance::new(registry.get("health_potion").unwrap());
        potion.use_item(Duration::ZERO, &mut hero).unwrap();
        assert_eq!(hero.stats.health.current(), 30.0);

        potion.update(Duration::from_millis(1000), &mut hero, false);
        assert_eq!(hero.stats.health.current(), 80.0);
    }

    #[test]
    fn test_buff_lasts_for_active_duration() {
        let registry = ItemRegistry::create_default();
        let mut hero = Character::new(0, 0, 16, 16);
        let base = hero.stats.effective_stat(StatType::MovementSpeed);

        let mut elixir = ItemInstance::new(registry.get("speed_elixir").unwrap());
        elixir.use_item(Duration::ZERO, &mut hero).unwrap();
        elixir.update(Duration::from_millis(500), &mut hero, false);
        assert_eq!(hero.stats.effective_stat(StatType::MovementSpeed), base * 2.0);

        elixir.update(Duration::from_millis(5500), &mut hero, false);
        assert_eq!(hero.stats.effective_stat(StatType::MovementSpeed), base);
        assert!(elixir.is_consumed());
    }

    #[test]
    fn test_remove_effect_is_idempotent() {
        let registry = ItemRegistry::create_default();
        let mut hero = Character::new(0, 0, 16, 16);
        let ring = registry.get("iron_ring").unwrap();

        hero.apply_effect(&ring);
        hero.remove_effect(&ring);
        hero.remove_effect(&ring);
        assert!(hero.stats.modifiers.is_empty());
    }

    fn defense(hero: &Character) -> f32 {
        hero.stats.effective_stat(StatType::Defense)
    }

    #[test]
    fn test_overlapping_copies_expire_separately() {
        let registry = ItemRegistry::create_default();
        let flask = registry.get("ice_flask").unwrap();
        let mut inv = Inventory::new(InventoryConfig::default(), Rc::new(MessageLog::new()));
        let mut hero = Character::new(0, 0, 16, 16);

        // Fourth flask opens a second slot
        for _ in 0..4 {
            inv.add_item(flask.clone()).unwrap();
        }
        assert_eq!(inv.len(), 2);

        inv.use_active(Duration::ZERO, &mut hero).unwrap();
        inv.set_active(1).unwrap();
        inv.use_active(Duration::from_millis(3000), &mut hero).unwrap();
        assert!((defense(&hero) - 0.6).abs() < 1e-6);
        assert_eq!(hero.active_count("ice_flask"), 2);

        // First copy runs out; the second keeps going until 9000
        inv.update(Duration::from_millis(6000), &mut hero, false);
        assert!((defense(&hero) - 0.3).abs() < 1e-6);
        assert_eq!(hero.active_count("ice_flask"), 1);

        inv.update(Duration::from_millis(9000), &mut hero, false);
        assert_eq!(defense(&hero), 0.0);
        assert_eq!(hero.active_count("ice_flask"), 0);
        assert!(hero.stats.modifiers.is_empty());
    }

    #[test]
    fn test_equipment_burns_out_after_active_window() {
        let registry = ItemRegistry::create_default();
        let mut hero = Character::new(0, 0, 16, 16);
        let base = hero.stats.effective_stat(StatType::AttackDamage);

        let mut ring = ItemInstance::new(registry.get("iron_ring").unwrap());
        ring.use_item(Duration::ZERO, &mut hero).unwrap();
        assert_eq!(hero.stats.effective_stat(StatType::AttackDamage), base + 2.0);

        ring.update(Duration::from_millis(30_000), &mut hero, false);
        assert!(ring.is_consumed());
        assert_eq!(hero.stats.effective_stat(StatType::AttackDamage), base);
    }

    #[test]
    fn test_thrown_bomb_records_impact() {
        let registry = ItemRegistry::create_default();
        let mut hero = Character::new(100, 100, 16, 16);

        let mut bomb = ItemInstance::new(registry.get("fire_bomb").unwrap());
        bomb.use_item(Duration::ZERO, &mut hero).unwrap();
        bomb.update(Duration::from_millis(300), &mut hero, false);
        bomb.confirm_aim(Duration::from_millis(400), &mut hero, AimTarget::new(150, 108))
            .unwrap();

        let impacts = hero.drain_impacts();
        assert_eq!(impacts.len(), 1);
        assert_eq!(impacts[0].item_id, "fire_bomb");
        assert!(hero.impacts.is_empty());
    }

    #[test]
    fn test_move_by_reports_movement() {
        let mut hero = Character::new(0, 0, 16, 16);
        assert!(!hero.move_by(0, 0));
        assert!(hero.move_by(3, 0));
        assert_eq!(hero.get_bounds(), Rect::new(3, 0, 16, 16));
    }
}

//! Character stats touched by item effects
//!
//! This module provides the numbers that potions and equipment act on:
//! - `Health` with capped healing
//! - A stamina pool restored by draughts
//! - Stat modifiers for buffs/debuffs, tagged by the item that applied them
//!
//! # Design Philosophy
//!
//! All stat values are f32 so that percentage modifiers (0.5 = +50%) and
//! fractional speeds compose without rounding.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A bounded resource pool (health, stamina).
///
/// # Example
///
/// ```ignore
/// let mut health = Health::new(100.0);
/// health.take_damage(30.0);
/// assert_eq!(health.current(), 70.0);
/// assert_eq!(health.percentage(), 0.7);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    current: f32,
    max: f32,
}

impl Health {
    /// Creates a new pool, full.
    pub fn new(max: f32) -> Self {
        Health { current: max, max }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Returns the pool as a fraction (0.0 to 1.0)
    pub fn percentage(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    /// Removes `amount`, never going below zero.
    ///
    /// Returns the amount actually removed.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let old = self.current;
        self.current = (self.current - amount).max(0.0);
        old - self.current
    }

    /// Restores `amount`, capped at max.
    ///
    /// Returns the actual amount healed (which may be less than requested
    /// if already near max)
    pub fn heal(&mut self, amount: f32) -> f32 {
        let old = self.current;
        self.current = (self.current + amount).min(self.max);
        self.current - old
    }
}

/// Categories of stats that can be modified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatType {
    /// Movement speed in pixels per tick
    MovementSpeed,
    /// Base attack damage
    AttackDamage,
    /// Attacks per second
    AttackSpeed,
    /// Damage reduction (0.0 = no reduction, 1.0 = invulnerable)
    Defense,
}

/// Types of stat modifications
///
/// Modifiers are applied in a specific order to ensure consistent behavior:
/// 1. Override - replaces the value completely
/// 2. Flat - adds/subtracts a fixed amount
/// 3. Percentage - multiplies by a factor (0.5 = +50%)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StatModifier {
    Override(f32),
    Flat(f32),
    /// Multiply by (1.0 + value). So 0.5 means +50%, -0.2 means -20%
    Percentage(f32),
}

/// A stat modification effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierEffect {
    pub stat_type: StatType,
    pub modifier: StatModifier,
    /// Informational only; expiry is driven by the owning item's active phase.
    pub duration: Option<Duration>,
    /// Item id that applied this effect, used to remove it again
    pub source: String,
}

impl ModifierEffect {
    pub fn new(stat_type: StatType, modifier: StatModifier) -> Self {
        ModifierEffect {
            stat_type,
            modifier,
            duration: None,
            source: String::new(),
        }
    }

    /// Returns a copy attributed to `source`.
    pub fn from_source(&self, source: &str) -> Self {
        ModifierEffect {
            source: source.to_string(),
            ..self.clone()
        }
    }
}

/// Base stats before modifiers, plus the active modifier list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stats {
    pub health: Health,
    pub stamina: Health,
    pub movement_speed: f32,
    pub attack_damage: f32,
    pub attack_speed: f32,
    pub defense: f32,
    pub modifiers: Vec<ModifierEffect>,
}

impl Stats {
    /// Default values for a starting character
    pub fn new() -> Self {
        Stats {
            health: Health::new(100.0),
            stamina: Health::new(50.0),
            movement_speed: 3.0,
            attack_damage: 10.0,
            attack_speed: 3.0,
            defense: 0.0,
            modifiers: Vec::new(),
        }
    }

    fn base_stat(&self, stat_type: StatType) -> f32 {
        match stat_type {
            StatType::MovementSpeed => self.movement_speed,
            StatType::AttackDamage => self.attack_damage,
            StatType::AttackSpeed => self.attack_speed,
            StatType::Defense => self.defense,
        }
    }

    /// Adds a modifier to the active list
    pub fn add_modifier(&mut self, effect: ModifierEffect) {
        self.modifiers.push(effect);
    }

    /// Removes every modifier applied by `source`.
    ///
    /// Returns how many were removed (0 when nothing matched).
    pub fn remove_modifiers_from(&mut self, source: &str) -> usize {
        let before = self.modifiers.len();
        self.modifiers.retain(|m| m.source != source);
        before - self.modifiers.len()
    }

    /// Calculates the effective value of a stat after applying the active modifiers
    ///
    /// Modifiers are applied in order:
    /// 1. Check for Override - if found, return that value immediately
    /// 2. Sum all Flat modifiers
    /// 3. Sum all Percentage modifiers
    /// 4. Apply: (base + flat) * (1.0 + percentage)
    pub fn effective_stat(&self, stat_type: StatType) -> f32 {
        let relevant = self.modifiers.iter().filter(|m| m.stat_type == stat_type);

        for modifier in relevant.clone() {
            if let StatModifier::Override(value) = modifier.modifier {
                return value;
            }
        }

        let mut flat_bonus = 0.0;
        let mut percentage_multiplier = 1.0;

        for modifier in relevant {
            match modifier.modifier {
                StatModifier::Override(_) => {}
                StatModifier::Flat(value) => flat_bonus += value,
                StatModifier::Percentage(value) => percentage_multiplier += value,
            }
        }

        (self.base_stat(stat_type) + flat_bonus) * percentage_multiplier
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

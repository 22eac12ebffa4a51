use rand::Rng;
use std::sync::Arc;

use crate::item::{ItemDefinition, ItemRegistry};

/// One row of the spawn table
#[derive(Debug, Clone)]
pub struct SpawnEntry {
    pub tag: String,
    /// Relative chance; zero never spawns
    pub weight: u32,
    pub definition: Arc<ItemDefinition>,
}

/// Which potion types the world spawns, and how often relative to each other
///
/// The table is small and static, so a linear walk over cumulative weights
/// is all the selection needs.
#[derive(Debug, Clone, Default)]
pub struct SpawnRegistry {
    entries: Vec<SpawnEntry>,
    total_weight: u32,
}

impl SpawnRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in world potion mix
    pub fn create_default(items: &ItemRegistry) -> Self {
        Self::from_items(
            items,
            &[
                ("health_potion", 40),
                ("stamina_draught", 25),
                ("ice_flask", 15),
                ("speed_elixir", 10),
                ("shield_tonic", 7),
                ("fire_bomb", 3),
            ],
        )
    }

    /// Builds a table from item ids. Unknown ids are skipped with a warning.
    pub fn from_items(items: &ItemRegistry, weights: &[(&str, u32)]) -> Self {
        let mut table = Self::new();
        for (tag, weight) in weights {
            match items.get(tag) {
                Some(definition) => table.register(*tag, *weight, definition),
                None => tracing::warn!(tag, "spawn table names an unknown item"),
            }
        }
        table
    }

    /// Adds (or replaces) a potion type
    pub fn register(&mut self, tag: impl Into<String>, weight: u32, definition: Arc<ItemDefinition>) {
        let tag = tag.into();
        self.entries.retain(|entry| entry.tag != tag);
        self.entries.push(SpawnEntry {
            tag,
            weight,
            definition,
        });
        self.total_weight = self.entries.iter().map(|entry| entry.weight).sum();
    }

    pub fn get(&self, tag: &str) -> Option<&SpawnEntry> {
        self.entries.iter().find(|entry| entry.tag == tag)
    }

    pub fn entries(&self) -> &[SpawnEntry] {
        &self.entries
    }

    pub fn total_weight(&self) -> u32 {
        self.total_weight
    }

    /// Entry owning the point `roll` on the cumulative weight line
    ///
    /// `roll` must be in `[0, total_weight)`; anything else gives `None`.
    pub fn pick(&self, roll: u32) -> Option<&SpawnEntry> {
        let mut cumulative = 0;
        for entry in &self.entries {
            cumulative += entry.weight;
            if roll < cumulative {
                return Some(entry);
            }
        }
        None
    }

    /// Weighted random draw
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&SpawnEntry> {
        if self.total_weight == 0 {
            return None;
        }
        self.pick(rng.gen_range(0..self.total_weight))
    }
}

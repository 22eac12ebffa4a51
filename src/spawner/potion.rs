use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::collision::{Collidable, Rect};
use crate::item::{ItemDefinition, ItemInstance};

/// Serializable form of a world potion, used for persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldPotionRecord {
    pub id: u64,
    pub potion_type: String,
    pub x: i32,
    pub y: i32,
    pub size: u32,
}

/// A potion lying in the world, waiting to be picked up
///
/// Not an `ItemInstance` yet: it becomes one only when collected. It never
/// expires on its own.
#[derive(Debug, Clone)]
pub struct WorldPotion {
    pub id: u64,
    /// Spawn table tag this potion was drawn from
    pub potion_type: String,
    pub definition: Arc<ItemDefinition>,
    pub x: i32,
    pub y: i32,
    pub size: u32,
}

impl WorldPotion {
    pub fn from_record(record: WorldPotionRecord, definition: Arc<ItemDefinition>) -> Self {
        WorldPotion {
            id: record.id,
            potion_type: record.potion_type,
            definition,
            x: record.x,
            y: record.y,
            size: record.size,
        }
    }

    pub fn to_record(&self) -> WorldPotionRecord {
        WorldPotionRecord {
            id: self.id,
            potion_type: self.potion_type.clone(),
            x: self.x,
            y: self.y,
            size: self.size,
        }
    }

    /// Turns the pickup into a fresh, idle inventory item
    pub fn into_item(self) -> ItemInstance {
        ItemInstance::new(self.definition)
    }
}

impl Collidable for WorldPotion {
    fn get_bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

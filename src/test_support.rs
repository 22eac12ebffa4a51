//! Shared doubles for unit tests

use std::sync::Arc;
use std::time::Duration;

use crate::collision::{Collidable, Rect};
use crate::item::{Actor, AimTarget, ConsumableEffect, ItemDefinition, ItemProperties};

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// A healing consumable with the given timings
pub fn consumable(id: &str, charge_ms: u64, active_ms: u64) -> Arc<ItemDefinition> {
    Arc::new(
        ItemDefinition::new(
            id,
            id,
            "",
            ItemProperties::Consumable {
                effect: ConsumableEffect::Heal(1.0),
            },
        )
        .with_charge(ms(charge_ms))
        .with_active(ms(active_ms)),
    )
}

/// Records every hook call by item id
#[derive(Debug, Default)]
pub struct RecordingActor {
    pub x: i32,
    pub y: i32,
    pub applied: Vec<String>,
    pub removed: Vec<String>,
    pub thrown: Vec<(String, AimTarget)>,
}

impl RecordingActor {
    pub fn at(x: i32, y: i32) -> Self {
        RecordingActor {
            x,
            y,
            ..Default::default()
        }
    }
}

impl Actor for RecordingActor {
    fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn apply_effect(&mut self, definition: &ItemDefinition) {
        self.applied.push(definition.id.clone());
    }

    fn remove_effect(&mut self, definition: &ItemDefinition) {
        self.removed.push(definition.id.clone());
    }

    fn apply_thrown(&mut self, definition: &ItemDefinition, target: AimTarget) {
        self.thrown.push((definition.id.clone(), target));
    }
}

impl Collidable for RecordingActor {
    fn get_bounds(&self) -> Rect {
        Rect::new(self.x, self.y, 16, 16)
    }
}

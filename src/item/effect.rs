use serde::{Serialize, Deserialize};
use super::definition::ItemDefinition;

/// A world point picked while aiming a throwable item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AimTarget {
    pub x: i32,
    pub y: i32,
}

impl AimTarget {
    pub fn new(x: i32, y: i32) -> Self {
        AimTarget { x, y }
    }

    /// Straight-line distance in whole pixels from `(x, y)`
    pub fn distance_from(&self, x: i32, y: i32) -> u32 {
        let dx = (self.x - x) as f64;
        let dy = (self.y - y) as f64;
        dx.hypot(dy).round() as u32
    }
}

/// The character an item is used by.
///
/// These are the only points where item semantics touch the rest of the
/// game. The state machine decides *when* they are called; the
/// implementation decides what they mean for a given definition.
pub trait Actor {
    /// World position used for throw range checks
    fn position(&self) -> (i32, i32);

    /// Called exactly once when an item's effect lands
    fn apply_effect(&mut self, definition: &ItemDefinition);

    /// Called exactly once when a timed effect runs out. Must be a no-op for
    /// effects with nothing to undo.
    fn remove_effect(&mut self, definition: &ItemDefinition);

    /// Called instead of `apply_effect` when a throwable lands at `target`
    fn apply_thrown(&mut self, definition: &ItemDefinition, target: AimTarget) {
        let _ = target;
        self.apply_effect(definition);
    }
}

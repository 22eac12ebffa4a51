// GameWorld struct and per-tick orchestration
//
// This module contains the GameWorld struct which owns the actor's inventory
// and the world spawner, and runs them in a fixed order once per tick:
// spawn -> pickup -> item timers.

use rand::Rng;
use rand::rngs::StdRng;
use std::rc::Rc;
use std::time::Duration;

use crate::collision::Collidable;
use crate::config::GameConfig;
use crate::input::ItemInput;
use crate::inventory::{Inventory, InventoryError};
use crate::item::{Actor, ItemEvent, ItemRegistry};
use crate::notify::{Notifier, Severity};
use crate::save::PotionStore;
use crate::spawner::{SpawnRegistry, WorldSpawner};

/// What happened during one tick, for UI and effects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Id of a potion that appeared this tick
    pub spawned: Option<u64>,
    /// Item id of a potion picked up this tick
    pub collected: Option<String>,
    /// Item transitions, in slot order
    pub item_events: Vec<ItemEvent>,
}

/// GameWorld owns the item-related state of one player's session
pub struct GameWorld<R: Rng = StdRng> {
    pub inventory: Inventory,
    pub spawner: WorldSpawner<R>,
    notifier: Rc<dyn Notifier>,
    /// Potion we already told the player there is no room for
    blocked_pickup: Option<u64>,
}

impl GameWorld<StdRng> {
    /// Builds a world from config with the default spawn table
    ///
    /// Placement is already confined to the map, so only interior
    /// obstacles need registering (`spawner.add_obstacle`).
    pub fn new(config: &GameConfig, items: &ItemRegistry, notifier: Rc<dyn Notifier>) -> Self {
        let inventory = Inventory::new(config.inventory.clone(), Rc::clone(&notifier));
        let spawner = WorldSpawner::new(
            config.spawner.clone(),
            SpawnRegistry::create_default(items),
            Rc::clone(&notifier),
        );

        Self::from_parts(inventory, spawner, notifier)
    }
}

impl<R: Rng> GameWorld<R> {
    pub fn from_parts(inventory: Inventory, spawner: WorldSpawner<R>, notifier: Rc<dyn Notifier>) -> Self {
        GameWorld {
            inventory,
            spawner,
            notifier,
            blocked_pickup: None,
        }
    }

    /// Routes spawner persistence to `store`
    pub fn with_store(self, store: Box<dyn PotionStore>) -> Self {
        GameWorld {
            spawner: self.spawner.with_store(store),
            ..self
        }
    }

    /// Runs one simulation step
    ///
    /// 1. Maybe spawn a new world potion
    /// 2. Pick up the potion under the actor, if the inventory has room
    /// 3. Advance every held item
    pub fn tick<A: Actor + Collidable>(&mut self, now: Duration, actor: &mut A, actor_moved: bool) -> TickReport {
        let spawned = self.spawner.maybe_spawn(now);
        let collected = self.try_pickup(&*actor);
        let item_events = self.inventory.update(now, actor, actor_moved);

        TickReport {
            spawned,
            collected,
            item_events,
        }
    }

    fn try_pickup(&mut self, actor: &impl Collidable) -> Option<String> {
        let (potion_id, fits) = {
            let potion = self.spawner.peek_collection(actor)?;
            (potion.id, self.inventory.can_accept(&potion.definition))
        };

        if !fits {
            // Say so once per potion, not every tick the actor stands on it
            if self.blocked_pickup != Some(potion_id) {
                self.notifier.notify("Inventory full", Severity::Warning);
                self.blocked_pickup = Some(potion_id);
            }
            return None;
        }
        self.blocked_pickup = None;

        let item = self.spawner.check_collection(actor)?;
        let item_id = item.id().to_string();
        match self.inventory.add_instance(item) {
            Ok(_) => Some(item_id),
            Err(err) => {
                // can_accept said yes, so this means the two disagree
                tracing::warn!(%err, item = %item_id, "collected potion did not fit");
                None
            }
        }
    }

    /// Forwards an input action to the inventory
    pub fn handle_input(
        &mut self,
        now: Duration,
        actor: &mut dyn Actor,
        input: ItemInput,
    ) -> Result<Option<ItemEvent>, InventoryError> {
        self.inventory.handle_input(now, actor, input)
    }
}

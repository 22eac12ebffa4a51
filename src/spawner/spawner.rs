use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use super::potion::{WorldPotion, WorldPotionRecord};
use super::registry::SpawnRegistry;
use crate::collision::{AabbCollision, Collidable, CollisionCheck, Rect, StaticCollidable, StaticObject};
use crate::config::SpawnerConfig;
use crate::item::ItemInstance;
use crate::notify::{Notifier, Severity};
use crate::save::{NoopStore, PotionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpawnerState {
    /// Waiting for the next interval
    Idle,
    /// Inside a spawn attempt
    Spawning,
}

/// Keeps a bounded population of potions lying around the map
///
/// Every `spawn_interval` it draws a potion type from the spawn table and
/// looks for a free spot for it. Walking over a potion collects it.
///
/// Time is passed in; the spawner never reads a clock. Randomness comes from
/// the `R` it was built with, so a seeded `StdRng` makes runs repeatable.
pub struct WorldSpawner<R: Rng = StdRng> {
    config: SpawnerConfig,
    table: SpawnRegistry,
    potions: Vec<WorldPotion>,
    obstacles: Vec<StaticObject>,
    last_spawn_time: Duration,
    next_id: u64,
    state: SpawnerState,
    rng: R,
    collision: Box<dyn CollisionCheck>,
    store: Box<dyn PotionStore>,
    notifier: Rc<dyn Notifier>,
}

impl WorldSpawner<StdRng> {
    pub fn new(config: SpawnerConfig, table: SpawnRegistry, notifier: Rc<dyn Notifier>) -> Self {
        Self::with_rng(config, table, notifier, StdRng::from_entropy())
    }
}

impl<R: Rng> WorldSpawner<R> {
    pub fn with_rng(config: SpawnerConfig, table: SpawnRegistry, notifier: Rc<dyn Notifier>, rng: R) -> Self {
        WorldSpawner {
            config,
            table,
            potions: Vec::new(),
            obstacles: Vec::new(),
            last_spawn_time: Duration::ZERO,
            next_id: 1,
            state: SpawnerState::Idle,
            rng,
            collision: Box::new(AabbCollision),
            store: Box::new(NoopStore),
            notifier,
        }
    }

    /// Replaces the plain AABB overlap test
    pub fn with_collision(mut self, collision: Box<dyn CollisionCheck>) -> Self {
        self.collision = collision;
        self
    }

    /// Sets where live potions are persisted
    pub fn with_store(mut self, store: Box<dyn PotionStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_obstacles(mut self, obstacles: Vec<StaticObject>) -> Self {
        self.obstacles = obstacles;
        self
    }

    /// Registers a wall or other obstacle potions must not be placed on
    pub fn add_obstacle(&mut self, obstacle: StaticObject) {
        self.obstacles.push(obstacle);
    }

    pub fn obstacles(&self) -> &[StaticObject] {
        &self.obstacles
    }

    pub fn config(&self) -> &SpawnerConfig {
        &self.config
    }

    pub fn last_spawn_time(&self) -> Duration {
        self.last_spawn_time
    }

    /// Number of potions currently in the world
    pub fn len(&self) -> usize {
        self.potions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.potions.is_empty()
    }

    /// Live potions, in spawn order, for drawing
    pub fn render_query(&self) -> impl Iterator<Item = &WorldPotion> {
        self.potions.iter()
    }

    /// Spawns a potion if the interval has passed and there is room
    ///
    /// Returns the new potion's id. Nothing is queued when the population
    /// cap is reached or no free spot turns up; the next call simply tries
    /// again.
    pub fn maybe_spawn(&mut self, now: Duration) -> Option<u64> {
        if now.saturating_sub(self.last_spawn_time) < self.config.spawn_interval() {
            return None;
        }
        if self.potions.len() >= self.config.max_potions {
            return None;
        }

        self.state = SpawnerState::Spawning;
        let spawned = self.spawn_one(now);
        self.state = SpawnerState::Idle;
        spawned
    }

    fn spawn_one(&mut self, now: Duration) -> Option<u64> {
        debug_assert_eq!(self.state, SpawnerState::Spawning);

        let (tag, definition) = {
            let entry = self.table.choose(&mut self.rng)?;
            (entry.tag.clone(), Arc::clone(&entry.definition))
        };

        let Some(spot) = self.find_placement() else {
            tracing::debug!(potion = %tag, "no free spot, skipping spawn");
            return None;
        };

        let id = self.next_id;
        self.next_id += 1;

        tracing::info!(id, potion = %tag, x = spot.x(), y = spot.y(), "potion spawned");

        self.potions.push(WorldPotion {
            id,
            potion_type: tag,
            definition,
            x: spot.x(),
            y: spot.y(),
            size: self.config.potion_size,
        });
        self.last_spawn_time = now;
        self.persist();

        Some(id)
    }

    /// Looks for a spot where a potion touches no obstacle and no other potion
    ///
    /// Tries up to `max_attempts` uniformly random positions inside the map.
    /// Returns `None` when all of them are blocked; callers must not fall
    /// back to an overlapping spot.
    pub fn find_placement(&mut self) -> Option<Rect> {
        let size = self.config.potion_size;
        // Also rules out maps too large for world coordinates
        let max_x = i32::try_from(self.config.map_width.checked_sub(size)?).ok()?;
        let max_y = i32::try_from(self.config.map_height.checked_sub(size)?).ok()?;

        for _ in 0..self.config.max_attempts {
            let x = self.rng.gen_range(0..=max_x);
            let y = self.rng.gen_range(0..=max_y);
            let candidate = Rect::new(x, y, size, size);

            if !self.is_blocked(&candidate) {
                return Some(candidate);
            }
        }

        tracing::debug!(attempts = self.config.max_attempts, "placement search exhausted");
        None
    }

    fn is_blocked(&self, candidate: &Rect) -> bool {
        let hits_obstacle = self
            .obstacles
            .iter()
            .any(|obstacle| self.collision.collides(candidate, &obstacle.get_bounds()));

        hits_obstacle
            || self
                .potions
                .iter()
                .any(|potion| self.collision.collides(candidate, &potion.get_bounds()))
    }

    /// The potion `actor` would pick up right now, if any
    pub fn peek_collection(&self, actor: &impl Collidable) -> Option<&WorldPotion> {
        let bounds = actor.get_bounds();
        self.potions
            .iter()
            .find(|potion| self.collision.collides(&bounds, &potion.get_bounds()))
    }

    /// Picks up the first potion (in spawn order) the actor overlaps
    ///
    /// At most one potion is collected per call, even when the actor stands
    /// on several.
    pub fn check_collection(&mut self, actor: &impl Collidable) -> Option<ItemInstance> {
        let bounds = actor.get_bounds();
        let index = self
            .potions
            .iter()
            .position(|potion| self.collision.collides(&bounds, &potion.get_bounds()))?;

        let potion = self.potions.remove(index);
        tracing::info!(id = potion.id, potion = %potion.potion_type, "potion collected");
        self.notifier
            .notify(&format!("Picked up {}", potion.definition.name), Severity::Info);
        self.persist();

        Some(potion.into_item())
    }

    /// Reloads persisted potions, returning how many came back
    ///
    /// Records whose type is no longer in the spawn table are dropped.
    pub fn restore(&mut self) -> usize {
        let records = match self.store.load() {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(%err, "could not load world potions");
                return 0;
            }
        };

        let mut restored = 0;
        for record in records {
            let Some(entry) = self.table.get(&record.potion_type) else {
                tracing::warn!(potion = %record.potion_type, "dropping saved potion of unknown type");
                continue;
            };

            let definition = Arc::clone(&entry.definition);
            self.next_id = self.next_id.max(record.id + 1);
            self.potions.push(WorldPotion::from_record(record, definition));
            restored += 1;
        }

        tracing::debug!(restored, "world potions restored");
        restored
    }

    fn persist(&mut self) {
        let records: Vec<WorldPotionRecord> = self.potions.iter().map(WorldPotion::to_record).collect();
        if let Err(err) = self.store.persist(&records) {
            tracing::warn!(%err, "could not persist world potions");
        }
    }
}

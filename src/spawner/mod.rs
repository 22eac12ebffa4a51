// World potion spawning
//
// - registry.rs: weighted spawn table
// - potion.rs: world-placed potion records
// - spawner.rs: interval/cap/placement logic and pickup

pub mod potion;
pub mod registry;
pub mod spawner;

pub use potion::{WorldPotion, WorldPotionRecord};
pub use registry::{SpawnEntry, SpawnRegistry};
pub use spawner::WorldSpawner;

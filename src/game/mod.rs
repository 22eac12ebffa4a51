// Game module - per-tick orchestration of the item systems
//
// This module contains:
// - world.rs: GameWorld, which runs spawner, pickup and inventory in order

pub mod world;

pub use world::{GameWorld, TickReport};

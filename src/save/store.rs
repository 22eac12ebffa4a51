//! Durability hook for uncollected world potions
//!
//! The spawner calls `persist` after every change to its live list and
//! `load` once when restoring. Persistence is strictly additive: a spawner
//! with a `NoopStore` behaves identically within a session.

use std::cell::RefCell;
use std::rc::Rc;

use super::types::SaveError;
use crate::spawner::WorldPotionRecord;

pub trait PotionStore {
    fn persist(&mut self, potions: &[WorldPotionRecord]) -> Result<(), SaveError>;
    fn load(&mut self) -> Result<Vec<WorldPotionRecord>, SaveError>;
}

/// Keeps nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStore;

impl PotionStore for NoopStore {
    fn persist(&mut self, _potions: &[WorldPotionRecord]) -> Result<(), SaveError> {
        Ok(())
    }

    fn load(&mut self) -> Result<Vec<WorldPotionRecord>, SaveError> {
        Ok(Vec::new())
    }
}

/// Keeps the last persisted list in memory, shared with whoever cloned it
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    potions: Rc<RefCell<Vec<WorldPotionRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<WorldPotionRecord> {
        self.potions.borrow().clone()
    }
}

impl PotionStore for MemoryStore {
    fn persist(&mut self, potions: &[WorldPotionRecord]) -> Result<(), SaveError> {
        *self.potions.borrow_mut() = potions.to_vec();
        Ok(())
    }

    fn load(&mut self) -> Result<Vec<WorldPotionRecord>, SaveError> {
        Ok(self.snapshot())
    }
}

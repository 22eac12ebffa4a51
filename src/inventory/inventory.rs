use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use super::error::InventoryError;
use crate::config::InventoryConfig;
use crate::input::ItemInput;
use crate::item::{Actor, ItemDefinition, ItemEvent, ItemInstance, ItemPhase};
use crate::notify::{Notifier, Severity};

/// Bounded, stacking container of items belonging to one actor
///
/// Slots are kept packed: there are no holes, and removing a slot shifts
/// every later slot down by one. `active_index` is always `None` or a valid
/// index into `slots`.
pub struct Inventory {
    slots: Vec<ItemInstance>,
    active_index: Option<usize>,
    config: InventoryConfig,
    notifier: Rc<dyn Notifier>,
}

impl Inventory {
    /// Creates a new empty inventory
    pub fn new(config: InventoryConfig, notifier: Rc<dyn Notifier>) -> Self {
        Inventory {
            slots: Vec::with_capacity(config.max_slots),
            active_index: None,
            config,
            notifier,
        }
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    pub fn slots(&self) -> &[ItemInstance] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&ItemInstance> {
        self.slots.get(index)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn active_item(&self) -> Option<&ItemInstance> {
        self.active_index.and_then(|i| self.slots.get(i))
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns true if all slots are occupied
    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.config.max_slots
    }

    /// Counts how many units of a specific item are held
    pub fn count_item(&self, item_id: &str) -> u32 {
        self.slots
            .iter()
            .filter(|slot| slot.id() == item_id)
            .map(|slot| slot.stack_count())
            .sum()
    }

    /// Returns true if one more unit of `definition` would fit
    pub fn can_accept(&self, definition: &ItemDefinition) -> bool {
        self.room_for(definition) >= 1
    }

    /// Units of `definition` that fit without touching anything else
    fn room_for(&self, definition: &ItemDefinition) -> u32 {
        let free_slots = u32::try_from(self.config.max_slots.saturating_sub(self.slots.len()))
            .unwrap_or(u32::MAX);

        if !definition.is_stackable() {
            return free_slots;
        }

        let max_stack = self.config.max_stack;
        let in_existing: u32 = self
            .slots
            .iter()
            .filter(|slot| slot.definition().can_stack_with(definition))
            .map(|slot| max_stack.saturating_sub(slot.stack_count()))
            .fold(0, u32::saturating_add);

        in_existing.saturating_add(free_slots.saturating_mul(max_stack))
    }

    /// Adds one unit of `definition`
    ///
    /// Returns the slot it landed in.
    pub fn add_item(&mut self, definition: Arc<ItemDefinition>) -> Result<usize, InventoryError> {
        self.add_instance(ItemInstance::new(definition))
    }

    /// Adds an instance (and all units of its stack)
    ///
    /// This is the one insertion path for pickups, transfers and restores.
    ///
    /// # Strategy
    /// 1. Fail without changing anything if the units can't all fit
    /// 2. Top up existing stacks of the same item
    /// 3. Open new slots for the rest
    pub fn add_instance(&mut self, item: ItemInstance) -> Result<usize, InventoryError> {
        let definition = Arc::clone(item.definition());
        let mut remaining = item.stack_count();

        if self.room_for(&definition) < remaining {
            self.notifier.notify(
                &format!("Inventory full, no room for {}", definition.name),
                Severity::Warning,
            );
            tracing::debug!(item = %definition.id, "add rejected, inventory full");
            return Err(InventoryError::InventoryFull);
        }

        let max_stack = self.config.max_stack;
        let mut landed = None;

        // Phase 1: Try to add to existing stacks
        if definition.is_stackable() {
            for (index, slot) in self.slots.iter_mut().enumerate() {
                if remaining == 0 {
                    break;
                }
                if slot.definition().can_stack_with(&definition) && slot.stack_count() < max_stack {
                    remaining = slot.add_to_stack(remaining, max_stack);
                    landed = Some(index);
                }
            }
        }

        // Phase 2: Create new stacks in free slots
        let per_slot = if definition.is_stackable() { max_stack } else { 1 };
        while remaining > 0 {
            let stack_size = remaining.min(per_slot);
            self.slots.push(ItemInstance::with_stack(Arc::clone(&definition), stack_size));
            remaining -= stack_size;
            landed = Some(self.slots.len() - 1);
        }

        if self.active_index.is_none() && !self.slots.is_empty() {
            self.active_index = Some(0);
        }

        // room_for guaranteed at least one unit landed
        landed.ok_or(InventoryError::InventoryFull)
    }

    /// Removes one unit from a slot
    ///
    /// The slot itself goes away when its last unit is removed. Only idle
    /// slots can be taken from: a charging, aiming or active item stays put
    /// until its cycle ends, so its effect is always removed by `update`.
    pub fn remove_item(&mut self, index: usize) -> Result<(), InventoryError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(InventoryError::InvalidSlot(index))?;
        if !slot.is_idle() {
            return Err(InventoryError::ItemNotIdle);
        }

        if !slot.remove_one() {
            self.remove_slot(index);
        }
        Ok(())
    }

    /// Deletes a whole slot and keeps `active_index` on the same logical item
    fn remove_slot(&mut self, index: usize) -> ItemInstance {
        let removed = self.slots.remove(index);

        self.active_index = match self.active_index {
            Some(active) if active == index => {
                if self.slots.is_empty() {
                    None
                } else {
                    Some(0)
                }
            }
            Some(active) if index < active => Some(active - 1),
            other => other,
        };

        removed
    }

    /// Selects a slot
    pub fn set_active(&mut self, index: usize) -> Result<(), InventoryError> {
        if index >= self.slots.len() {
            return Err(InventoryError::InvalidSlot(index));
        }
        self.active_index = Some(index);
        Ok(())
    }

    fn active_mut(&mut self) -> Result<&mut ItemInstance, InventoryError> {
        let index = self.active_index.ok_or(InventoryError::NoActiveItem)?;
        self.slots.get_mut(index).ok_or(InventoryError::NoActiveItem)
    }

    /// Uses the selected item if it is idle
    pub fn use_active(&mut self, now: Duration, actor: &mut dyn Actor) -> Result<ItemEvent, InventoryError> {
        let item = self.active_mut()?;
        if !item.is_idle() {
            return Err(InventoryError::ItemNotIdle);
        }
        Ok(item.use_item(now, actor)?)
    }

    /// Cancels the selected item's charge
    pub fn cancel_active(&mut self) -> Result<ItemEvent, InventoryError> {
        let event = self.active_mut()?.cancel()?;
        self.notifier.notify("Charge canceled", Severity::Info);
        Ok(event)
    }

    /// Routes an input action to the selected item
    pub fn handle_input(
        &mut self,
        now: Duration,
        actor: &mut dyn Actor,
        input: ItemInput,
    ) -> Result<Option<ItemEvent>, InventoryError> {
        match input {
            ItemInput::Select(index) => self.set_active(index).map(|_| None),
            ItemInput::Use => self.use_active(now, actor).map(Some),
            ItemInput::Cancel => self.cancel_active().map(Some),
            ItemInput::Confirm(target) => {
                let event = self.active_mut()?.confirm_aim(now, actor, target)?;
                Ok(Some(event))
            }
            ItemInput::Abort => Ok(Some(self.active_mut()?.abort_aim()?)),
        }
    }

    /// Advances every item, then clears out the consumed ones
    ///
    /// Items are updated in slot order. Removal happens only after the whole
    /// pass, highest index first, so no item is touched twice in one tick.
    pub fn update(&mut self, now: Duration, actor: &mut dyn Actor, actor_moved: bool) -> Vec<ItemEvent> {
        let mut events = Vec::new();

        for slot in self.slots.iter_mut() {
            if let Some(event) = slot.update(now, actor, actor_moved) {
                if event == ItemEvent::ChargeCancelled {
                    self.notifier.notify("Charge canceled", Severity::Info);
                }
                events.push(event);
            }
        }

        let consumed: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_consumed())
            .map(|(index, _)| index)
            .collect();

        for index in consumed.into_iter().rev() {
            if !self.slots[index].remove_one() {
                self.remove_slot(index);
            }
        }

        events
    }

    /// Moves one unit from `index` into another inventory
    ///
    /// Goes through the same add/remove pair as every other transfer. The
    /// source is left untouched if the destination has no room.
    pub fn transfer_to(&mut self, index: usize, other: &mut Inventory) -> Result<usize, InventoryError> {
        let slot = self.slots.get(index).ok_or(InventoryError::InvalidSlot(index))?;
        if !slot.is_idle() {
            return Err(InventoryError::ItemNotIdle);
        }

        let landed = other.add_item(Arc::clone(slot.definition()))?;
        self.remove_item(index)?;
        Ok(landed)
    }

    /// Clears all items from the inventory, ending any effect still active
    pub fn clear(&mut self, actor: &mut dyn Actor) {
        for slot in &self.slots {
            if matches!(slot.phase(), ItemPhase::Active { .. }) {
                actor.remove_effect(slot.definition());
            }
        }
        self.slots.clear();
        self.active_index = None;
    }

    /// Returns an iterator over all held items
    pub fn iter_items(&self) -> impl Iterator<Item = &ItemInstance> {
        self.slots.iter()
    }
}

impl std::fmt::Debug for Inventory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inventory")
            .field("slots", &self.slots)
            .field("active_index", &self.active_index)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemProperties;
    use crate::notify::MessageLog;
    use crate::test_support::{consumable, ms, RecordingActor};

    fn inventory() -> (Inventory, Rc<MessageLog>) {
        let log = Rc::new(MessageLog::new());
        let inv = Inventory::new(InventoryConfig::default(), log.clone());
        (inv, log)
    }

    #[test]
    fn test_reference_scenario() {
        let (mut inv, log) = inventory();
        let flask = consumable("ice_flask", 0, 0);

        for _ in 0..3 {
            inv.add_item(flask.clone()).unwrap();
        }
        assert_eq!(inv.len(), 1);
        assert_eq!(inv.slots()[0].stack_count(), 3);

        // First stack is capped, so the fourth opens a second slot
        assert_eq!(inv.add_item(flask.clone()), Ok(1));
        assert_eq!(inv.slots()[1].stack_count(), 1);

        for id in ["a", "b", "c"] {
            inv.add_item(consumable(id, 0, 0)).unwrap();
        }
        assert!(inv.is_full());
        assert_eq!(inv.add_item(consumable("sixth", 0, 0)), Err(InventoryError::InventoryFull));
        assert!(log.contains("Inventory full"));

        // Still stacks into the second flask slot when full
        assert_eq!(inv.add_item(flask), Ok(1));
        assert_eq!(inv.count_item("ice_flask"), 5);
    }

    #[test]
    fn test_unique_items_never_stack() {
        let (mut inv, _) = inventory();
        let ring = Arc::new((*consumable("ring", 0, 0)).clone().unique());

        inv.add_item(ring.clone()).unwrap();
        inv.add_item(ring).unwrap();
        assert_eq!(inv.len(), 2);
        assert!(inv.slots().iter().all(|s| s.stack_count() == 1));
    }

    #[test]
    fn test_first_item_becomes_active() {
        let (mut inv, _) = inventory();
        assert_eq!(inv.active_index(), None);

        inv.add_item(consumable("a", 0, 0)).unwrap();
        inv.add_item(consumable("b", 0, 0)).unwrap();
        assert_eq!(inv.active_index(), Some(0));
    }

    #[test]
    fn test_remove_before_active_keeps_selection() {
        let (mut inv, _) = inventory();
        for id in ["a", "b", "c"] {
            inv.add_item(consumable(id, 0, 0)).unwrap();
        }
        inv.set_active(2).unwrap();

        inv.remove_item(0).unwrap();
        assert_eq!(inv.active_index(), Some(1));
        assert_eq!(inv.active_item().map(|i| i.id()), Some("c"));
    }

    #[test]
    fn test_remove_active_falls_back_to_first() {
        let (mut inv, _) = inventory();
        for id in ["a", "b", "c"] {
            inv.add_item(consumable(id, 0, 0)).unwrap();
        }
        inv.set_active(1).unwrap();

        inv.remove_item(1).unwrap();
        assert_eq!(inv.active_index(), Some(0));

        inv.remove_item(0).unwrap();
        inv.remove_item(0).unwrap();
        assert_eq!(inv.active_index(), None);
        assert_eq!(inv.remove_item(0), Err(InventoryError::InvalidSlot(0)));
    }

    #[test]
    fn test_remove_decrements_stack_first() {
        let (mut inv, _) = inventory();
        let flask = consumable("ice_flask", 0, 0);
        inv.add_item(flask.clone()).unwrap();
        inv.add_item(flask).unwrap();

        inv.remove_item(0).unwrap();
        assert_eq!(inv.len(), 1);
        assert_eq!(inv.slots()[0].stack_count(), 1);
    }

    #[test]
    fn test_remove_refuses_busy_slots() {
        let (mut inv, _) = inventory();
        let mut actor = RecordingActor::default();
        inv.add_item(consumable("flask", 0, 6000)).unwrap();
        inv.add_item(consumable("tonic", 1000, 0)).unwrap();

        inv.use_active(ms(0), &mut actor).unwrap();
        assert_eq!(inv.remove_item(0), Err(InventoryError::ItemNotIdle));

        inv.set_active(1).unwrap();
        inv.use_active(ms(0), &mut actor).unwrap();
        assert_eq!(inv.remove_item(1), Err(InventoryError::ItemNotIdle));

        // The active effect still ends exactly once, through update
        inv.update(ms(6000), &mut actor, false);
        assert_eq!(actor.removed, vec!["flask"]);
        assert_eq!(inv.count_item("flask"), 0);
    }

    #[test]
    fn test_clear_ends_active_effects() {
        let (mut inv, _) = inventory();
        let mut actor = RecordingActor::default();
        inv.add_item(consumable("flask", 0, 6000)).unwrap();
        inv.add_item(consumable("tonic", 1000, 0)).unwrap();
        inv.use_active(ms(0), &mut actor).unwrap();
        inv.set_active(1).unwrap();
        inv.use_active(ms(0), &mut actor).unwrap();

        inv.clear(&mut actor);
        assert_eq!(actor.applied, vec!["flask"]);
        assert_eq!(actor.removed, vec!["flask"]);
        assert_eq!(inv.active_index(), None);
    }

    #[test]
    fn test_huge_stack_limit_does_not_overflow() {
        let log = Rc::new(MessageLog::new());
        let config = InventoryConfig { max_slots: 5, max_stack: u32::MAX };
        let mut inv = Inventory::new(config, log);
        let flask = consumable("flask", 0, 0);

        assert!(inv.can_accept(&flask));
        assert_eq!(inv.add_item(flask.clone()), Ok(0));
        assert_eq!(inv.add_item(flask), Ok(0));
        assert_eq!(inv.count_item("flask"), 2);
    }

    #[test]
    fn test_set_active_validates() {
        let (mut inv, _) = inventory();
        assert_eq!(inv.set_active(0), Err(InventoryError::InvalidSlot(0)));
        inv.add_item(consumable("a", 0, 0)).unwrap();
        assert_eq!(inv.set_active(0), Ok(()));
    }

    #[test]
    fn test_use_active_requires_idle() {
        let (mut inv, _) = inventory();
        let mut actor = RecordingActor::default();
        inv.add_item(consumable("potion", 1000, 0)).unwrap();

        assert_eq!(inv.use_active(ms(0), &mut actor), Ok(ItemEvent::ChargeStarted));
        assert_eq!(inv.use_active(ms(10), &mut actor), Err(InventoryError::ItemNotIdle));
    }

    #[test]
    fn test_use_on_empty_inventory() {
        let (mut inv, log) = inventory();
        let mut actor = RecordingActor::default();
        assert_eq!(inv.use_active(ms(0), &mut actor), Err(InventoryError::NoActiveItem));
        assert_eq!(inv.cancel_active(), Err(InventoryError::NoActiveItem));
        assert!(log.is_empty());
    }

    #[test]
    fn test_cancel_active_notifies() {
        let (mut inv, log) = inventory();
        let mut actor = RecordingActor::default();
        inv.add_item(consumable("potion", 1000, 0)).unwrap();

        assert!(matches!(inv.cancel_active(), Err(InventoryError::Item(_))));
        inv.use_active(ms(0), &mut actor).unwrap();
        assert_eq!(inv.cancel_active(), Ok(ItemEvent::ChargeCancelled));
        assert!(log.contains("Charge canceled"));
        assert_eq!(inv.slots()[0].phase(), ItemPhase::Idle);
    }

    #[test]
    fn test_update_removes_consumed_items() {
        let (mut inv, _) = inventory();
        let mut actor = RecordingActor::default();
        inv.add_item(consumable("a", 0, 0)).unwrap();
        inv.add_item(consumable("b", 0, 0)).unwrap();
        inv.set_active(1).unwrap();

        inv.use_active(ms(0), &mut actor).unwrap();
        assert_eq!(inv.len(), 2); // Consumed slot waits for the tick

        inv.update(ms(16), &mut actor, false);
        assert_eq!(inv.len(), 1);
        assert_eq!(inv.slots()[0].id(), "a");
        assert_eq!(inv.active_index(), Some(0));
    }

    #[test]
    fn test_update_consumes_one_from_stack() {
        let (mut inv, _) = inventory();
        let mut actor = RecordingActor::default();
        let potion = consumable("potion", 1000, 0);
        inv.add_item(potion.clone()).unwrap();
        inv.add_item(potion).unwrap();

        inv.use_active(ms(0), &mut actor).unwrap();
        let events = inv.update(ms(1000), &mut actor, false);

        assert_eq!(events, vec![ItemEvent::Consumed]);
        assert_eq!(inv.len(), 1);
        assert_eq!(inv.slots()[0].stack_count(), 1);
        assert!(inv.slots()[0].is_idle());
        assert_eq!(actor.applied, vec!["potion"]);
    }

    #[test]
    fn test_update_notifies_movement_cancel() {
        let (mut inv, log) = inventory();
        let mut actor = RecordingActor::default();
        let shield = Arc::new((*consumable("shield", 1500, 4000)).clone().cancelled_by_movement());
        inv.add_item(shield).unwrap();

        inv.use_active(ms(0), &mut actor).unwrap();
        let events = inv.update(ms(200), &mut actor, true);

        assert_eq!(events, vec![ItemEvent::ChargeCancelled]);
        assert!(log.contains("Charge canceled"));
        assert!(actor.applied.is_empty());
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn test_handle_input_routes_to_active() {
        let (mut inv, _) = inventory();
        let mut actor = RecordingActor::default();
        inv.add_item(consumable("a", 0, 0)).unwrap();
        inv.add_item(consumable("b", 500, 0)).unwrap();

        assert_eq!(inv.handle_input(ms(0), &mut actor, ItemInput::Select(1)), Ok(None));
        assert_eq!(
            inv.handle_input(ms(0), &mut actor, ItemInput::Use),
            Ok(Some(ItemEvent::ChargeStarted))
        );
        assert_eq!(
            inv.handle_input(ms(10), &mut actor, ItemInput::Cancel),
            Ok(Some(ItemEvent::ChargeCancelled))
        );
        assert!(matches!(
            inv.handle_input(ms(10), &mut actor, ItemInput::Abort),
            Err(InventoryError::Item(_))
        ));
    }

    #[test]
    fn test_transfer_moves_one_unit() {
        let (mut source, _) = inventory();
        let (mut dest, _) = inventory();
        let flask = consumable("ice_flask", 0, 0);
        source.add_item(flask.clone()).unwrap();
        source.add_item(flask.clone()).unwrap();
        dest.add_item(flask).unwrap();

        assert_eq!(source.transfer_to(0, &mut dest), Ok(0));
        assert_eq!(source.count_item("ice_flask"), 1);
        assert_eq!(dest.count_item("ice_flask"), 2);
        assert_eq!(dest.len(), 1);
    }

    #[test]
    fn test_transfer_to_full_inventory_keeps_source() {
        let (mut source, _) = inventory();
        let (mut dest, _) = inventory();
        source.add_item(consumable("x", 0, 0)).unwrap();
        for id in ["a", "b", "c", "d", "e"] {
            dest.add_item(consumable(id, 0, 0)).unwrap();
        }

        assert_eq!(source.transfer_to(0, &mut dest), Err(InventoryError::InventoryFull));
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn test_add_instance_is_all_or_nothing() {
        let log = Rc::new(MessageLog::new());
        let config = InventoryConfig { max_slots: 1, max_stack: 3 };
        let mut inv = Inventory::new(config, log);
        let flask = consumable("ice_flask", 0, 0);
        inv.add_item(flask.clone()).unwrap();

        let big = ItemInstance::with_stack(flask, 3);
        assert_eq!(inv.add_instance(big), Err(InventoryError::InventoryFull));
        assert_eq!(inv.slots()[0].stack_count(), 1);
    }

    #[test]
    fn test_material_counts_but_cannot_be_used() {
        let (mut inv, _) = inventory();
        let mut actor = RecordingActor::default();
        let slime = Arc::new(ItemDefinition::new("slime_ball", "Slime", "", ItemProperties::Material));
        inv.add_item(slime).unwrap();

        assert!(matches!(
            inv.use_active(ms(0), &mut actor),
            Err(InventoryError::Item(crate::item::ItemError::NotUsable(_)))
        ));
        inv.clear(&mut actor);
        assert!(inv.is_empty());
        assert_eq!(inv.active_index(), None);
    }
}

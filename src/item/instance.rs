//! Item instances and their use/charge/expire state machine
//!
//! # State Machine
//!
//! ```text
//!            use (charge > 0)          charge done (active > 0)
//!   Idle ─────────────────────▶ Charging ────────────────────▶ Active ──▶ Consumed
//!    ▲  ◀──── cancel / move ────┘   │                          ▲   active done
//!    │                              │ charge done (active = 0) │
//!    │                              └──────────────────────────┼──────▶ Consumed
//!    │                                                         │
//!    └──── abort ──── Aiming ─── confirm(target) ──────────────┘  (throwables)
//! ```
//!
//! Timestamps are passed in by the caller on every call; nothing here reads a
//! clock, so transition boundaries are exact for synthetic times.

use std::sync::Arc;
use std::time::Duration;
use serde::{Serialize, Deserialize};
use super::definition::ItemDefinition;
use super::effect::{Actor, AimTarget};
use super::error::ItemError;

/// Where an item is in its use cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemPhase {
    Idle,
    Charging { started_at: Duration },
    /// Waiting for a confirm or abort input
    Aiming { since: Duration },
    Active { started_at: Duration },
    /// Terminal
    Consumed,
}

/// The transition an operation or tick caused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemEvent {
    ChargeStarted,
    ChargeCancelled,
    AimStarted,
    AimAborted,
    /// Effect applied, item now active
    Activated,
    /// Item reached `Consumed` (effect applied and, if timed, removed)
    Consumed,
}

/// A live occurrence of an `ItemDefinition` held in an inventory slot
///
/// The definition is shared; phase and stack count belong to this instance.
#[derive(Debug, Clone)]
pub struct ItemInstance {
    definition: Arc<ItemDefinition>,
    phase: ItemPhase,
    stack_count: u32,
}

impl ItemInstance {
    pub fn new(definition: Arc<ItemDefinition>) -> Self {
        Self::with_stack(definition, 1)
    }

    /// Creates an instance holding `count` units (at least one)
    pub fn with_stack(definition: Arc<ItemDefinition>, count: u32) -> Self {
        ItemInstance {
            definition,
            phase: ItemPhase::Idle,
            stack_count: count.max(1),
        }
    }

    pub fn definition(&self) -> &Arc<ItemDefinition> {
        &self.definition
    }

    pub fn id(&self) -> &str {
        &self.definition.id
    }

    pub fn phase(&self) -> ItemPhase {
        self.phase
    }

    pub fn stack_count(&self) -> u32 {
        self.stack_count
    }

    pub fn is_idle(&self) -> bool {
        self.phase == ItemPhase::Idle
    }

    pub fn is_consumed(&self) -> bool {
        self.phase == ItemPhase::Consumed
    }

    /// Adds units to this stack, capped at `max_stack`
    ///
    /// Returns how many units couldn't fit (overflow)
    pub(crate) fn add_to_stack(&mut self, amount: u32, max_stack: u32) -> u32 {
        let room = max_stack.saturating_sub(self.stack_count);
        let added = amount.min(room);
        self.stack_count += added;
        amount - added
    }

    /// Takes one unit off the stack.
    ///
    /// Returns false when this was the last unit and the slot should go.
    /// The units left behind by a consumed item start over at `Idle`.
    pub(crate) fn remove_one(&mut self) -> bool {
        if self.stack_count <= 1 {
            return false;
        }

        self.stack_count -= 1;
        if self.phase == ItemPhase::Consumed {
            self.phase = ItemPhase::Idle;
        }
        true
    }

    /// Starts using the item.
    ///
    /// A zero-charge item lands immediately: its effect is applied before this
    /// returns (or, for throwables, it goes straight to aiming).
    pub fn use_item(&mut self, now: Duration, actor: &mut dyn Actor) -> Result<ItemEvent, ItemError> {
        if self.definition.properties.is_material() {
            return Err(ItemError::NotUsable(self.definition.id.clone()));
        }
        if self.phase != ItemPhase::Idle {
            return Err(ItemError::NotIdle(self.definition.id.clone()));
        }

        if self.definition.charge_duration.is_zero() {
            Ok(self.finish_charge(now, actor))
        } else {
            self.phase = ItemPhase::Charging { started_at: now };
            tracing::debug!(item = %self.definition.id, "charge started");
            Ok(ItemEvent::ChargeStarted)
        }
    }

    /// Cancels a charge in progress. No effect is applied.
    pub fn cancel(&mut self) -> Result<ItemEvent, ItemError> {
        match self.phase {
            ItemPhase::Charging { .. } => {
                self.phase = ItemPhase::Idle;
                tracing::debug!(item = %self.definition.id, "charge cancelled");
                Ok(ItemEvent::ChargeCancelled)
            }
            _ => Err(ItemError::NothingToCancel),
        }
    }

    /// Throws an aiming item at `target`.
    pub fn confirm_aim(
        &mut self,
        now: Duration,
        actor: &mut dyn Actor,
        target: AimTarget,
    ) -> Result<ItemEvent, ItemError> {
        if !matches!(self.phase, ItemPhase::Aiming { .. }) {
            return Err(ItemError::NotAiming(self.definition.id.clone()));
        }

        if let Some(range) = self.throw_range() {
            let (x, y) = actor.position();
            let distance = target.distance_from(x, y);
            if distance > range {
                return Err(ItemError::OutOfRange { distance, range });
            }
        }

        actor.apply_thrown(&self.definition, target);
        Ok(self.activate(now))
    }

    /// Puts an aiming item away again without using it.
    pub fn abort_aim(&mut self) -> Result<ItemEvent, ItemError> {
        match self.phase {
            ItemPhase::Aiming { .. } => {
                self.phase = ItemPhase::Idle;
                Ok(ItemEvent::AimAborted)
            }
            _ => Err(ItemError::NotAiming(self.definition.id.clone())),
        }
    }

    /// Advances timers. Called once per tick.
    ///
    /// # State-Dependent Behavior
    ///
    /// - **Charging**: cancelled if the actor moved and the item cares;
    ///   otherwise completes once `charge_duration` has elapsed
    /// - **Active**: removes the effect and consumes once `active_duration`
    ///   has elapsed since activation
    /// - **Idle / Aiming / Consumed**: nothing to do
    ///
    /// At most one transition happens per call.
    pub fn update(&mut self, now: Duration, actor: &mut dyn Actor, actor_moved: bool) -> Option<ItemEvent> {
        match self.phase {
            ItemPhase::Charging { started_at } => {
                if actor_moved && self.definition.cancel_on_move {
                    self.phase = ItemPhase::Idle;
                    tracing::debug!(item = %self.definition.id, "charge broken by movement");
                    return Some(ItemEvent::ChargeCancelled);
                }

                let done_at = started_at + self.definition.charge_duration;
                if now >= done_at {
                    Some(self.finish_charge(done_at, actor))
                } else {
                    None
                }
            }
            ItemPhase::Active { started_at } => {
                if now.saturating_sub(started_at) >= self.definition.active_duration {
                    actor.remove_effect(&self.definition);
                    self.phase = ItemPhase::Consumed;
                    tracing::debug!(item = %self.definition.id, "effect expired");
                    Some(ItemEvent::Consumed)
                } else {
                    None
                }
            }
            ItemPhase::Idle | ItemPhase::Aiming { .. } | ItemPhase::Consumed => None,
        }
    }

    /// Fraction of the charge completed, in `[0, 1]`; 0 when not charging
    pub fn charge_progress(&self, now: Duration) -> f32 {
        match self.phase {
            ItemPhase::Charging { started_at } => {
                progress(now.saturating_sub(started_at), self.definition.charge_duration)
            }
            _ => 0.0,
        }
    }

    /// Fraction of the active time used up, in `[0, 1]`; 0 when not active
    pub fn active_progress(&self, now: Duration) -> f32 {
        match self.phase {
            ItemPhase::Active { started_at } => {
                progress(now.saturating_sub(started_at), self.definition.active_duration)
            }
            _ => 0.0,
        }
    }

    fn throw_range(&self) -> Option<u32> {
        match self.definition.properties {
            super::ItemProperties::Throwable { range, .. } => Some(range),
            _ => None,
        }
    }

    /// Charge is complete at `at`: aim, or apply and move on.
    fn finish_charge(&mut self, at: Duration, actor: &mut dyn Actor) -> ItemEvent {
        if self.definition.properties.needs_aim() {
            self.phase = ItemPhase::Aiming { since: at };
            return ItemEvent::AimStarted;
        }

        actor.apply_effect(&self.definition);
        self.activate(at)
    }

    fn activate(&mut self, at: Duration) -> ItemEvent {
        if self.definition.active_duration.is_zero() {
            self.phase = ItemPhase::Consumed;
            ItemEvent::Consumed
        } else {
            self.phase = ItemPhase::Active { started_at: at };
            ItemEvent::Activated
        }
    }
}

fn progress(elapsed: Duration, total: Duration) -> f32 {
    if total.is_zero() {
        return 0.0;
    }
    (elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0) as f32
}

use serde::{Deserialize, Serialize};
use crate::item::AimTarget;

/// Item actions the input layer can deliver
///
/// This decouples keys, buttons and clicks from what they do to the
/// inventory: the host maps its raw events to these and hands them to
/// `Inventory::handle_input`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemInput {
    /// Select a slot (0-based)
    Select(usize),

    /// Use the selected item
    Use,

    /// Stop charging the selected item
    Cancel,

    /// Throw the aiming item at a point
    Confirm(AimTarget),

    /// Put the aiming item away
    Abort,
}

impl ItemInput {
    /// Maps a number key (1-9) to a slot selection
    pub fn from_number_key(key: u8) -> Option<Self> {
        match key {
            1..=9 => Some(ItemInput::Select(key as usize - 1)),
            _ => None,
        }
    }
}

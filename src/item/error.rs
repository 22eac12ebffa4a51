use thiserror::Error;

/// Expected, local failures of the item state machine.
///
/// None of these are exceptional: they are returned on the per-frame path
/// and the caller decides whether the player hears about them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    /// `use` while charging, aiming or active
    #[error("item '{0}' is already in use")]
    NotIdle(String),

    /// Crafting materials have no use of their own
    #[error("item '{0}' cannot be used")]
    NotUsable(String),

    /// Cancel when nothing is charging
    #[error("nothing to cancel")]
    NothingToCancel,

    /// Confirm/abort when the item is not waiting for a target
    #[error("item '{0}' is not aiming")]
    NotAiming(String),

    /// Target outside the throw range
    #[error("target is out of range ({distance} > {range})")]
    OutOfRange { distance: u32, range: u32 },

    #[error("item '{0}' already registered")]
    DuplicateDefinition(String),
}

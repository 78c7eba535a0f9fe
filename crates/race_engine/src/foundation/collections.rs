//! Specialized collection types

pub use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Stable handle to a scene entity
    pub struct EntityKey;
}

/// Handle-based map using slot map for stable references
pub type HandleMap<T> = SlotMap<EntityKey, T>;

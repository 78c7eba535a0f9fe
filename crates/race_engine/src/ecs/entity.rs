//! Entity implementation

use crate::foundation::collections::EntityKey;

/// Entity identifier
///
/// Wraps a generational slot-map key, so a handle to a destroyed entity never
/// aliases a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    key: EntityKey,
}

impl Entity {
    /// Create an entity handle from its storage key
    pub(crate) fn new(key: EntityKey) -> Self {
        Self { key }
    }

    /// Get the storage key
    pub(crate) fn key(self) -> EntityKey {
        self.key
    }
}

//! Collision layer system for filtering queries
//!
//! Every collider sits on one or more layers; queries carry a mask and only
//! consider colliders whose layers intersect it.

use bitflags::bitflags;

bitflags! {
    /// Collision layer bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionLayers: u32 {
        /// Static ground geometry (islands)
        const GROUND = 1 << 0;
        /// Placed bridge pieces
        const BRIDGE = 1 << 1;
        /// Runner bodies
        const RUNNER = 1 << 2;
        /// Pickups and collectibles
        const PICKUP = 1 << 3;
        /// Anything a character can stand on
        const WALKABLE = Self::GROUND.bits() | Self::BRIDGE.bits();
    }
}

impl CollisionLayers {
    /// Check whether a collider on `layers` should be considered by a query using `mask`
    pub fn matches(self, mask: CollisionLayers) -> bool {
        self.intersects(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walkable_mask() {
        assert!(CollisionLayers::GROUND.matches(CollisionLayers::WALKABLE));
        assert!(CollisionLayers::BRIDGE.matches(CollisionLayers::WALKABLE));
        assert!(!CollisionLayers::PICKUP.matches(CollisionLayers::WALKABLE));
        assert!(!CollisionLayers::RUNNER.matches(CollisionLayers::WALKABLE));
    }
}

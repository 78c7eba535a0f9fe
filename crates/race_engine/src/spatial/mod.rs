//! Spatial query interface
//!
//! Games ask the host for raycasts through this trait instead of touching
//! collider storage directly, so the simulation can run against the engine
//! world or against a test double.

use crate::ecs::Entity;
use crate::foundation::math::Vec3;
use crate::physics::{CollisionLayers, Ray, RayHit};

/// Abstract interface for collision queries against the scene
pub trait SpatialQuery {
    /// Cast a ray and return the closest hit within `max_distance`
    ///
    /// Only colliders whose layers intersect `mask` are considered, and the
    /// `ignore` entity (usually the caster's own body) is skipped.
    fn raycast(
        &self,
        ray: &Ray,
        max_distance: f32,
        mask: CollisionLayers,
        ignore: Option<Entity>,
    ) -> Option<RayHit>;

    /// Probe straight down from `origin`
    fn probe_down(
        &self,
        origin: Vec3,
        max_distance: f32,
        mask: CollisionLayers,
        ignore: Option<Entity>,
    ) -> Option<RayHit> {
        self.raycast(&Ray::down(origin), max_distance, mask, ignore)
    }
}

//! Physics module for collision queries
//!
//! Provides rays, axis-aligned boxes and collision layers used by the
//! spatial query interface.

pub mod collision;
pub mod collision_layers;

pub use collision::{Aabb, Ray, RayHit};
pub use collision_layers::CollisionLayers;

//! Scene world implementation

use super::{Collider, Entity, Renderable};
use crate::foundation::collections::HandleMap;
use crate::foundation::math::{Transform, Vec3};
use crate::physics::{CollisionLayers, Ray, RayHit};
use crate::spatial::SpatialQuery;

/// Data stored for every scene entity
#[derive(Debug, Clone, PartialEq)]
pub struct SceneEntity {
    /// World transform
    pub transform: Transform,
    /// How the entity is drawn, if at all
    pub renderable: Option<Renderable>,
    /// Box collider, if the entity takes part in queries
    pub collider: Option<Collider>,
}

impl SceneEntity {
    /// Create an entity with only a transform
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            renderable: None,
            collider: None,
        }
    }

    /// Attach a renderable
    pub fn with_renderable(mut self, renderable: Renderable) -> Self {
        self.renderable = Some(renderable);
        self
    }

    /// Attach a collider
    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.collider = Some(collider);
        self
    }
}

/// World containing all scene entities
pub struct World {
    entities: HandleMap<SceneEntity>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            entities: HandleMap::with_key(),
        }
    }

    /// Create a new entity
    pub fn spawn(&mut self, entity: SceneEntity) -> Entity {
        Entity::new(self.entities.insert(entity))
    }

    /// Destroy an entity, returning its data if it was alive
    pub fn destroy(&mut self, entity: Entity) -> Option<SceneEntity> {
        self.entities.remove(entity.key())
    }

    /// Check whether an entity handle still refers to a live entity
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity.key())
    }

    /// Get an entity's data
    pub fn get(&self, entity: Entity) -> Option<&SceneEntity> {
        self.entities.get(entity.key())
    }

    /// Get an entity's data mutably
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut SceneEntity> {
        self.entities.get_mut(entity.key())
    }

    /// Move an entity; returns `false` if the entity no longer exists
    pub fn set_position(&mut self, entity: Entity, position: Vec3) -> bool {
        self.get_mut(entity)
            .map(|scene_entity| scene_entity.transform.position = position)
            .is_some()
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the world has no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Get an iterator over all entities
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &SceneEntity)> {
        self.entities.iter().map(|(key, data)| (Entity::new(key), data))
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl SpatialQuery for World {
    fn raycast(
        &self,
        ray: &Ray,
        max_distance: f32,
        mask: CollisionLayers,
        ignore: Option<Entity>,
    ) -> Option<RayHit> {
        self.iter()
            .filter(|(entity, _)| Some(*entity) != ignore)
            .filter_map(|(entity, data)| {
                let collider = data.collider.as_ref()?;
                if !collider.layers.matches(mask) {
                    return None;
                }
                let distance = collider
                    .world_bounds(data.transform.position)
                    .intersect_ray(ray)?;
                (distance <= max_distance).then(|| RayHit {
                    entity,
                    distance,
                    point: ray.point_at(distance),
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

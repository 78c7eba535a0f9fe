//! Blocks lying on the ground waiting to be picked up

use crate::color::BlockColor;
use race_engine::ecs::{Collider, Entity, Renderable, SceneEntity, Shape, World};
use race_engine::foundation::math::{Transform, Vec3};
use race_engine::physics::CollisionLayers;

/// A block on the ground
///
/// Collectables sit on the pickup layer, so ground and build rays pass
/// straight through them.
#[derive(Debug, Clone, PartialEq)]
pub struct Collectable {
    /// Block center
    pub position: Vec3,
    /// Only the runner of this color can pick it up
    pub color: BlockColor,
    /// Scene entity drawing the block
    pub entity: Entity,
}

impl Collectable {
    /// Create the block and its scene entity
    pub fn spawn(world: &mut World, color: BlockColor, position: Vec3) -> Self {
        let entity = world.spawn(
            SceneEntity::new(Transform::from_position(position))
                .with_renderable(Renderable::new(Shape::Cube, color.color()))
                .with_collider(Collider::cuboid(
                    Vec3::new(0.5, 0.5, 0.5),
                    CollisionLayers::PICKUP,
                )),
        );
        Self {
            position,
            color,
            entity,
        }
    }

    /// Remove the block's scene entity
    pub fn despawn(self, world: &mut World) {
        world.destroy(self.entity);
    }
}

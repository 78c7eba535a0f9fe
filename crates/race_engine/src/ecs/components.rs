//! Scene entity components
//!
//! Every scene entity carries a transform; renderable and collider data are
//! optional so markers can be drawn without colliding and triggers can collide
//! without being drawn.

use crate::foundation::math::Vec3;
use crate::physics::{Aabb, CollisionLayers};

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel (0.0 - 1.0)
    pub r: f32,
    /// Green channel (0.0 - 1.0)
    pub g: f32,
    /// Blue channel (0.0 - 1.0)
    pub b: f32,
    /// Alpha channel (0.0 - 1.0)
    pub a: f32,
}

impl Color {
    /// Create an opaque color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Darken (negative amount) or lighten (positive amount) the color
    pub fn tint(self, amount: f32) -> Self {
        let apply = |c: f32| {
            let tinted = if amount < 0.0 {
                c * (1.0 + amount)
            } else {
                c + (1.0 - c) * amount
            };
            tinted.clamp(0.0, 1.0)
        };
        Self {
            r: apply(self.r),
            g: apply(self.g),
            b: apply(self.b),
            a: self.a,
        }
    }
}

/// Primitive shape used to draw an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Unit cube scaled by the transform
    Cube,
}

/// Component for entities that can be rendered
#[derive(Debug, Clone, PartialEq)]
pub struct Renderable {
    /// Primitive shape
    pub shape: Shape,
    /// Base color
    pub color: Color,
    /// Whether this object is visible
    pub visible: bool,
}

impl Renderable {
    /// Create a visible renderable
    pub fn new(shape: Shape, color: Color) -> Self {
        Self {
            shape,
            color,
            visible: true,
        }
    }
}

/// Box collider attached to an entity
///
/// The box is centered on the entity position plus `offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    /// Half size of the box along each axis
    pub half_extents: Vec3,
    /// Offset of the box center from the entity position
    pub offset: Vec3,
    /// Layers this collider belongs to
    pub layers: CollisionLayers,
}

impl Collider {
    /// Create a box collider centered on the entity
    pub fn cuboid(half_extents: Vec3, layers: CollisionLayers) -> Self {
        Self {
            half_extents,
            offset: Vec3::zeros(),
            layers,
        }
    }

    /// Shift the box center relative to the entity position
    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    /// World-space bounds for an entity at `position`
    pub fn world_bounds(&self, position: Vec3) -> Aabb {
        Aabb::from_center_extents(position + self.offset, self.half_extents)
    }
}

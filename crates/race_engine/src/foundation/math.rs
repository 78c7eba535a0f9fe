//! Math utilities and types
//!
//! Provides fundamental math types for 3D game simulation.

pub use nalgebra::{Vector2, Vector3, Quaternion, Unit};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and scale
    pub fn from_position_scale(position: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            scale,
            ..Default::default()
        }
    }

    /// Set a yaw-only rotation about +Y, in degrees
    pub fn set_yaw_degrees(&mut self, yaw_degrees: f32) {
        self.rotation = Quat::from_axis_angle(&Vec3::y_axis(), utils::deg_to_rad(yaw_degrees));
    }

    /// Combine this transform with a child-local transform
    pub fn combine(&self, other: &Transform) -> Transform {
        Transform {
            position: self.position + self.rotation * (self.scale.component_mul(&other.position)),
            rotation: self.rotation * other.rotation,
            scale: self.scale.component_mul(&other.scale),
        }
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec2, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Euclidean distance between two points
    pub fn distance(a: Vec3, b: Vec3) -> f32 {
        (a - b).magnitude()
    }

    /// Distance between two points measured on the ground plane (x, z)
    pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
        Vec2::new(a.x - b.x, a.z - b.z).magnitude()
    }

    /// Direction from `from` to `to` on the ground plane, normalized
    ///
    /// Returns the zero vector when the points coincide horizontally.
    pub fn planar_direction(from: Vec3, to: Vec3) -> Vec3 {
        let delta = Vec3::new(to.x - from.x, 0.0, to.z - from.z);
        delta.try_normalize(f32::EPSILON).unwrap_or_else(Vec3::zeros)
    }

    /// Yaw in degrees that faces `direction` (+Z is 0°, +X is 90°)
    pub fn yaw_degrees_from_direction(direction: Vec3) -> f32 {
        rad_to_deg(direction.x.atan2(direction.z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_planar_distance_ignores_height() {
        let a = Vec3::new(0.0, 10.0, 0.0);
        let b = Vec3::new(3.0, -4.0, 4.0);
        assert_relative_eq!(utils::planar_distance(a, b), 5.0);
        assert!(utils::distance(a, b) > 5.0);
    }

    #[test]
    fn test_planar_direction() {
        let dir = utils::planar_direction(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 7.0, 2.0));
        assert_relative_eq!(dir, Vec3::new(0.0, 0.0, 1.0));

        let none = utils::planar_direction(Vec3::new(1.0, 0.0, 1.0), Vec3::new(1.0, 5.0, 1.0));
        assert_eq!(none, Vec3::zeros());
    }

    #[test]
    fn test_yaw_from_direction() {
        assert_relative_eq!(utils::yaw_degrees_from_direction(Vec3::new(0.0, 0.0, 1.0)), 0.0);
        assert_relative_eq!(utils::yaw_degrees_from_direction(Vec3::new(1.0, 0.0, 0.0)), 90.0);
        assert_relative_eq!(utils::yaw_degrees_from_direction(Vec3::new(-1.0, 0.0, 0.0)), -90.0);
    }

    #[test]
    fn test_combine_offsets_child_by_parent() {
        let parent = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let child = Transform::from_position(Vec3::new(0.0, 0.5, -0.5));
        let world = parent.combine(&child);
        assert_relative_eq!(world.position, Vec3::new(1.0, 2.5, 2.5));
    }
}

//! Ray and box primitives for collision queries

use crate::ecs::Entity;
use crate::foundation::math::Vec3;

/// A ray for ray casting
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Creates a ray pointing straight down (-Y) from `origin`
    pub fn down(origin: Vec3) -> Self {
        Self {
            origin,
            direction: Vec3::new(0.0, -1.0, 0.0),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Result of a ray intersection test
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// The entity that was hit
    pub entity: Entity,
    /// The distance from the ray origin to the hit point
    pub distance: f32,
    /// The point of intersection in world space
    pub point: Vec3,
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given half extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Test ray intersection with this AABB using the slab method
    ///
    /// Returns the distance to the entry point, or `None` when the ray misses.
    /// A ray starting inside the box does not report a hit: only surfaces the
    /// ray enters from outside count, like engine raycasts that skip colliders
    /// enclosing the origin.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        if self.contains_point(ray.origin) {
            return None;
        }

        let inv_dir = Vec3::new(
            if ray.direction.x != 0.0 { 1.0 / ray.direction.x } else { f32::INFINITY },
            if ray.direction.y != 0.0 { 1.0 / ray.direction.y } else { f32::INFINITY },
            if ray.direction.z != 0.0 { 1.0 / ray.direction.z } else { f32::INFINITY },
        );

        let mut tmin = f32::NEG_INFINITY;
        let mut tmax = f32::INFINITY;
        for axis in 0..3 {
            if ray.direction[axis] == 0.0 {
                // Parallel to this slab: must already lie within it
                if ray.origin[axis] < self.min[axis] || ray.origin[axis] > self.max[axis] {
                    return None;
                }
                continue;
            }
            let t1 = (self.min[axis] - ray.origin[axis]) * inv_dir[axis];
            let t2 = (self.max[axis] - ray.origin[axis]) * inv_dir[axis];
            tmin = tmin.max(t1.min(t2));
            tmax = tmax.min(t1.max(t2));
        }

        if tmax >= tmin && tmin >= 0.0 {
            Some(tmin)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn slab() -> Aabb {
        Aabb::from_center_extents(Vec3::new(0.0, -0.5, 0.0), Vec3::new(5.0, 0.5, 5.0))
    }

    #[test]
    fn test_downward_ray_hits_top_face() {
        let ray = Ray::down(Vec3::new(1.0, 0.3, 1.0));
        let t = slab().intersect_ray(&ray).expect("should hit");
        assert_relative_eq!(t, 0.3);
        assert_relative_eq!(ray.point_at(t), Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_ray_outside_footprint_misses() {
        let ray = Ray::down(Vec3::new(6.0, 0.3, 0.0));
        assert!(slab().intersect_ray(&ray).is_none());
    }

    #[test]
    fn test_ray_pointing_away_misses() {
        let ray = Ray::new(Vec3::new(0.0, 0.3, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert!(slab().intersect_ray(&ray).is_none());
    }

    #[test]
    fn test_ray_from_inside_is_ignored() {
        let ray = Ray::down(Vec3::new(0.0, -0.25, 0.0));
        assert!(slab().intersect_ray(&ray).is_none());
    }

    #[test]
    fn test_diagonal_ray() {
        let ray = Ray::new(Vec3::new(-10.0, 1.0, 0.0), Vec3::new(1.0, -0.1, 0.0));
        assert!(slab().intersect_ray(&ray).is_some());
    }
}

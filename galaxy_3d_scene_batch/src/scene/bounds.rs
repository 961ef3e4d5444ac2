/// Bounding volumes used by spatial queries and light collection.

use glam::{Mat4, Vec3};
use crate::camera::FrustumTest;
use crate::galaxy3d::LARGE_VALUE;

// ===== AABB =====

/// Axis-Aligned Bounding Box.
///
/// Drawables report their bounds in world space; the octree stores
/// one per indexed object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_half_size(center: Vec3, half_size: Vec3) -> Self {
        Self { min: center - half_size, max: center + half_size }
    }

    /// Box covering the whole usable world (±LARGE_VALUE on each axis).
    pub fn infinite() -> Self {
        Self::from_center_half_size(Vec3::ZERO, Vec3::splat(LARGE_VALUE))
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_size(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Whether the half-extent is at or beyond the "infinite" threshold.
    ///
    /// Such boxes (skyboxes, zones) are visible but have no meaningful depth.
    pub fn is_infinite(&self) -> bool {
        self.half_size().length_squared() >= LARGE_VALUE * LARGE_VALUE
    }

    /// Transform this AABB by a matrix, returning a new AABB.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the AABB extents
    /// for an exact (tight) result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let mut new_min = matrix.col(3).truncate();
        let mut new_max = new_min;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB { min: new_min, max: new_max }
    }

    /// Test if this AABB fully contains another AABB.
    ///
    /// Used by OctreeSceneIndex to decide if an object fits entirely
    /// within a node.
    pub fn contains(&self, other: &AABB) -> bool {
        self.min.cmple(other.min).all() && self.max.cmpge(other.max).all()
    }

    /// Test if this AABB intersects (overlaps or touches) another AABB.
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    /// Closest point of the box to `point` (the point itself when inside).
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }

    /// Euclidean distance from `point` to the box (0 when inside).
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.closest_point(point).distance(point)
    }
}

// ===== SPHERE =====

/// Bounding sphere, used as the query volume of point lights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }

    /// Whether the sphere overlaps (or touches) the box.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        aabb.closest_point(self.center).distance_squared(self.center) <= self.radius * self.radius
    }

    /// Classify an AABB against the sphere (3-way test).
    ///
    /// `Inside` when the farthest corner of the box is within the sphere.
    pub fn classify_aabb(&self, aabb: &AABB) -> FrustumTest {
        if !self.intersects_aabb(aabb) {
            return FrustumTest::Outside;
        }

        let to_far = (aabb.center() - self.center).abs() + aabb.half_size();
        if to_far.length_squared() <= self.radius * self.radius {
            FrustumTest::Inside
        } else {
            FrustumTest::Partial
        }
    }
}

#[cfg(test)]
#[path = "bounds_tests.rs"]
mod tests;

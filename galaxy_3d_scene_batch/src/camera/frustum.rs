/// Frustum: six clipping planes for volume queries.
///
/// Each plane is a Vec4 (A, B, C, D) where (A, B, C) is the inward-pointing
/// unit normal and D the signed distance. A point P is inside when
/// `dot(plane, (P, 1)) >= 0` for all planes.
///
/// Used both for the culling camera and for spot light volumes.

use glam::{Mat4, Vec3, Vec4};
use crate::scene::AABB;

/// Result of a 3-way volume/AABB classification.
///
/// Used by spatial acceleration structures (OctreeSceneIndex) for
/// hierarchical culling:
/// - `Outside` → skip the entire subtree
/// - `Inside` → collect all objects without further testing
/// - `Partial` → test individual objects and recurse into children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumTest {
    Outside,
    Inside,
    Partial,
}

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Six frustum planes: left, right, bottom, top, near, far.
///
/// Works with both perspective and orthographic projections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub planes: [Vec4; 6],
}

/// AABB corner furthest along `normal`.
fn positive_vertex(aabb: &AABB, normal: Vec3) -> Vec3 {
    Vec3::select(normal.cmpge(Vec3::ZERO), aabb.max, aabb.min)
}

/// AABB corner furthest against `normal`.
fn negative_vertex(aabb: &AABB, normal: Vec3) -> Vec3 {
    Vec3::select(normal.cmpge(Vec3::ZERO), aabb.min, aabb.max)
}

impl Frustum {
    /// Extract frustum planes from a view-projection matrix (Gribb & Hartmann).
    ///
    /// Expects a 0..1 clip depth range (glam `perspective_rh` / `orthographic_rh`).
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let row0 = vp.row(0);
        let row1 = vp.row(1);
        let row2 = vp.row(2);
        let row3 = vp.row(3);

        let mut planes = [
            row3 + row0,
            row3 - row0,
            row3 + row1,
            row3 - row1,
            row2,
            row3 - row2,
        ];

        for plane in &mut planes {
            let normal_len = plane.truncate().length();
            if normal_len > 0.0 {
                *plane /= normal_len;
            }
        }

        Self { planes }
    }

    /// Perspective frustum looking from `position` along `direction`.
    ///
    /// `fov_y` in radians. Used to derive spot light volumes.
    pub fn from_perspective(
        position: Vec3,
        direction: Vec3,
        fov_y: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let forward = direction.try_normalize().unwrap_or(Vec3::NEG_Z);
        let up = if forward.abs_diff_eq(Vec3::Y, 1e-3) || forward.abs_diff_eq(Vec3::NEG_Y, 1e-3) {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let view = Mat4::look_to_rh(position, forward, up);
        let projection = Mat4::perspective_rh(fov_y, aspect_ratio, near, far);
        Self::from_view_projection(&(projection * view))
    }

    /// Signed distance from a point to a plane (positive = inside).
    pub fn distance(&self, plane_index: usize, point: Vec3) -> f32 {
        let plane = self.planes[plane_index];
        plane.truncate().dot(point) + plane.w
    }

    /// Whether a point lies inside all six planes.
    pub fn contains_point(&self, point: Vec3) -> bool {
        (0..6).all(|i| self.distance(i, point) >= 0.0)
    }

    /// Conservative AABB test: may return false positives, never false negatives.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        self.planes.iter().all(|plane| {
            let normal = plane.truncate();
            normal.dot(positive_vertex(aabb, normal)) + plane.w >= 0.0
        })
    }

    /// Classify an AABB against the frustum (3-way test).
    pub fn classify_aabb(&self, aabb: &AABB) -> FrustumTest {
        let mut all_inside = true;

        for plane in &self.planes {
            let normal = plane.truncate();

            if normal.dot(positive_vertex(aabb, normal)) + plane.w < 0.0 {
                return FrustumTest::Outside;
            }
            if normal.dot(negative_vertex(aabb, normal)) + plane.w < 0.0 {
                all_inside = false;
            }
        }

        if all_inside { FrustumTest::Inside } else { FrustumTest::Partial }
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;

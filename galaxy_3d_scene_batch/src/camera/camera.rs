/// Camera: low-level passive data container.
///
/// The Camera computes nothing beyond trivial derived values. The caller
/// (game engine) is responsible for computing and setting the view matrix,
/// projection matrix and frustum.
///
/// The collector does NOT store or manage cameras. It reads the culling
/// camera handed over in each frame's `FrameInfo`.

use bitflags::bitflags;
use glam::{Mat4, Vec3};
use super::frustum::Frustum;

bitflags! {
    /// Per-camera overrides of the default rendering behaviour.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ViewOverrideFlags: u32 {
        /// Force the lowest material quality for every batch seen by this camera
        const LOW_MATERIAL_QUALITY = 1 << 0;
        /// Disable shadow rendering (not consumed by batch collection)
        const DISABLE_SHADOWS      = 1 << 1;
        /// Disable instancing (not consumed by batch collection)
        const DISABLE_INSTANCING   = 1 << 2;
    }
}

/// Low-level culling camera. A passive data container.
///
/// Typically, the game engine computes view/projection/frustum from
/// high-level parameters (position, rotation, FOV, etc.) and passes
/// the results here.
#[derive(Debug, Clone)]
pub struct Camera {
    view_matrix: Mat4,
    projection_matrix: Mat4,
    frustum: Frustum,
    view_override_flags: ViewOverrideFlags,
    light_mask: u32,
}

impl Camera {
    /// Create a new camera. Overrides default to none, light mask to all bits.
    pub fn new(view: Mat4, projection: Mat4, frustum: Frustum) -> Self {
        Self {
            view_matrix: view,
            projection_matrix: projection,
            frustum,
            view_override_flags: ViewOverrideFlags::empty(),
            light_mask: u32::MAX,
        }
    }

    /// Build a perspective camera at `position` looking at `target`.
    ///
    /// Convenience for tools and tests; the frustum is extracted from
    /// the resulting view-projection matrix.
    pub fn perspective(
        position: Vec3,
        target: Vec3,
        fov_y: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let view = Mat4::look_at_rh(position, target, Vec3::Y);
        let projection = Mat4::perspective_rh(fov_y, aspect_ratio, near, far);
        let frustum = Frustum::from_view_projection(&(projection * view));
        Self::new(view, projection, frustum)
    }

    // ===== GETTERS =====

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Projection matrix (perspective or orthographic).
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// Frustum planes for culling.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// World-space position, recovered from the inverse view matrix.
    pub fn position(&self) -> Vec3 {
        self.view_matrix.inverse().col(3).truncate()
    }

    /// Linear view-space depth of a world-space point (distance along the view axis).
    pub fn view_depth(&self, point: Vec3) -> f32 {
        -self.view_matrix.row(2).truncate().dot(point) - self.view_matrix.row(2).w
    }

    pub fn view_override_flags(&self) -> ViewOverrideFlags {
        self.view_override_flags
    }

    /// Bits ANDed with each light's mask before lighting geometry.
    pub fn light_mask(&self) -> u32 {
        self.light_mask
    }

    // ===== SETTERS (store, compute nothing) =====

    /// Set the view matrix.
    pub fn set_view(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
    }

    /// Set the projection matrix.
    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection_matrix = matrix;
    }

    /// Set the frustum.
    pub fn set_frustum(&mut self, frustum: Frustum) {
        self.frustum = frustum;
    }

    pub fn set_view_override_flags(&mut self, flags: ViewOverrideFlags) {
        self.view_override_flags = flags;
    }

    pub fn set_light_mask(&mut self, mask: u32) {
        self.light_mask = mask;
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;

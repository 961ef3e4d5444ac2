/// Spatial acceleration structures for scene queries.
///
/// A SceneIndex indexes drawables by their world-space AABB for volume
/// queries: "all drawables of class C whose bounds intersect volume V".
/// The collector uses it to find the geometries lit by point and spot lights.
/// Implementations include Octree, BVH, grid, etc.
///
/// Ownership: the caller creates and owns the SceneIndex. The `Scene` arena
/// keeps it in sync (`Scene::sync_scene_index`), and the collector borrows
/// it read-only during light processing.

use std::sync::Arc;
use crate::camera::Frustum;
use super::bounds::Sphere;
use super::drawable::{Drawable, DrawableFlags, DrawableIndex};

/// Trait for spatial indexing of scene drawables.
///
/// Queries only take `&self` and may run concurrently from worker threads.
pub trait SceneIndex: Send + Sync {
    /// Insert a drawable with its current world-space AABB.
    fn insert(&mut self, drawable: Arc<dyn Drawable>);

    /// Remove a drawable from the index.
    fn remove(&mut self, index: DrawableIndex);

    /// Re-read a drawable's world-space AABB (e.g. after a transform change).
    fn update(&mut self, drawable: Arc<dyn Drawable>);

    /// Append every drawable of a class in `flags` whose AABB intersects the frustum.
    fn query_frustum(
        &self,
        frustum: &Frustum,
        flags: DrawableFlags,
        results: &mut Vec<Arc<dyn Drawable>>,
    );

    /// Append every drawable of a class in `flags` whose AABB intersects the sphere.
    fn query_sphere(
        &self,
        sphere: &Sphere,
        flags: DrawableFlags,
        results: &mut Vec<Arc<dyn Drawable>>,
    );

    /// Remove all drawables from the index.
    fn clear(&mut self);

    /// Number of indexed drawables.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

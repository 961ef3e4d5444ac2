/// Tests for Scene
///
/// These tests validate drawable lifecycle through DrawableIndex handles,
/// index recycling, deferred removal and spatial index synchronization.

use super::*;
use crate::error::Error;
use crate::scene::{
    AABB, DrawableFlags, Light, LightDesc, OctreeSceneIndex, Sphere, StaticModel, StaticModelDesc,
};
use glam::Vec3;

// ============================================================================
// Helper Functions
// ============================================================================

fn add_model(scene: &mut Scene, center: Vec3) -> Arc<StaticModel> {
    scene
        .add_drawable(|index| StaticModel::new(index, StaticModelDesc {
            world_bounding_box: AABB::from_center_half_size(center, Vec3::splat(0.5)),
            ..Default::default()
        }))
        .unwrap()
}

fn octree() -> OctreeSceneIndex {
    OctreeSceneIndex::new(AABB::new(Vec3::splat(-64.0), Vec3::splat(64.0)), 3)
}

fn query_everything(index: &OctreeSceneIndex) -> Vec<u32> {
    let mut results = Vec::new();
    index.query_sphere(
        &Sphere::new(Vec3::ZERO, 1000.0),
        DrawableFlags::GEOMETRY | DrawableFlags::LIGHT,
        &mut results,
    );
    let mut indices: Vec<u32> = results.iter().map(|d| d.index().0).collect();
    indices.sort_unstable();
    indices
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_new_scene_is_empty() {
    let scene = Scene::new();
    assert!(scene.is_empty());
    assert_eq!(scene.drawable_count(), 0);
    assert!(scene.drawables().is_empty());
}

#[test]
fn test_add_drawable_assigns_dense_indices() {
    let mut scene = Scene::new();
    let a = add_model(&mut scene, Vec3::ZERO);
    let b = add_model(&mut scene, Vec3::X);
    let light = scene.add_drawable(|index| Light::new(index, LightDesc::default())).unwrap();

    assert_eq!(a.index(), DrawableIndex(0));
    assert_eq!(b.index(), DrawableIndex(1));
    assert_eq!(light.index(), DrawableIndex(2));
    assert_eq!(scene.len(), 3);
    assert_eq!(scene.drawable_count(), 3);
    assert!(scene.drawable(DrawableIndex(2)).unwrap().is_light());
}

#[test]
fn test_add_drawable_rejects_wrong_index() {
    let mut scene = Scene::new();
    let result = scene.add_drawable(|_| StaticModel::new(DrawableIndex(42), StaticModelDesc::default()));

    assert!(matches!(result, Err(Error::InvalidResource(_))));
    assert!(scene.is_empty());
    // Index 0 was released and is handed out again
    assert_eq!(add_model(&mut scene, Vec3::ZERO).index(), DrawableIndex(0));
}

#[test]
fn test_drawables_in_index_order() {
    let mut scene = Scene::new();
    for i in 0..4 {
        add_model(&mut scene, Vec3::splat(i as f32));
    }

    let indices: Vec<u32> = scene.drawables().iter().map(|d| d.index().0).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
}

// ============================================================================
// Deferred removal
// ============================================================================

#[test]
fn test_remove_is_visible_immediately() {
    let mut scene = Scene::new();
    let a = add_model(&mut scene, Vec3::ZERO);
    add_model(&mut scene, Vec3::X);

    scene.remove_drawable(a.index()).unwrap();

    assert!(scene.drawable(a.index()).is_none());
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.drawables().len(), 1);
}

#[test]
fn test_removed_index_recycled_after_sync() {
    let mut scene = Scene::new();
    let a = add_model(&mut scene, Vec3::ZERO);
    add_model(&mut scene, Vec3::X);

    scene.remove_drawable(a.index()).unwrap();
    // Not recycled before sync
    assert_eq!(add_model(&mut scene, Vec3::Y).index(), DrawableIndex(2));

    scene.sync_scene_index(None);
    assert_eq!(add_model(&mut scene, Vec3::Z).index(), DrawableIndex(0));
    assert_eq!(scene.drawable_count(), 3);
}

#[test]
fn test_remove_unknown_drawable_fails() {
    let mut scene = Scene::new();
    assert!(scene.remove_drawable(DrawableIndex(5)).is_err());
    assert!(scene.mark_bounds_dirty(DrawableIndex(5)).is_err());
}

#[test]
fn test_double_remove_fails() {
    let mut scene = Scene::new();
    let a = add_model(&mut scene, Vec3::ZERO);
    scene.remove_drawable(a.index()).unwrap();
    assert!(scene.remove_drawable(a.index()).is_err());
}

// ============================================================================
// Scene index synchronization
// ============================================================================

#[test]
fn test_sync_inserts_new_drawables() {
    let mut scene = Scene::new();
    let mut index = octree();
    add_model(&mut scene, Vec3::ZERO);
    scene.add_drawable(|i| Light::new(i, LightDesc::default())).unwrap();

    scene.sync_scene_index(Some(&mut index));

    assert_eq!(index.len(), 2);
    assert_eq!(query_everything(&index), vec![0, 1]);
}

#[test]
fn test_sync_removes_drawables() {
    let mut scene = Scene::new();
    let mut index = octree();
    let a = add_model(&mut scene, Vec3::ZERO);
    add_model(&mut scene, Vec3::X);
    scene.sync_scene_index(Some(&mut index));

    scene.remove_drawable(a.index()).unwrap();
    scene.sync_scene_index(Some(&mut index));

    assert_eq!(query_everything(&index), vec![1]);
}

#[test]
fn test_add_then_remove_before_sync_never_reaches_index() {
    let mut scene = Scene::new();
    let mut index = octree();
    let a = add_model(&mut scene, Vec3::ZERO);
    scene.remove_drawable(a.index()).unwrap();

    scene.sync_scene_index(Some(&mut index));

    assert!(index.is_empty());
    assert!(scene.is_empty());
}

#[test]
fn test_mark_bounds_dirty_updates_index() {
    let mut scene = Scene::new();
    let mut index = octree();
    let a = add_model(&mut scene, Vec3::ZERO);
    scene.sync_scene_index(Some(&mut index));

    scene.mark_bounds_dirty(a.index()).unwrap();
    scene.sync_scene_index(Some(&mut index));

    assert_eq!(index.len(), 1);
    assert_eq!(query_everything(&index), vec![0]);
}

#[test]
fn test_clear_resets_allocation() {
    let mut scene = Scene::new();
    add_model(&mut scene, Vec3::ZERO);
    add_model(&mut scene, Vec3::X);

    scene.clear();

    assert!(scene.is_empty());
    assert_eq!(scene.drawable_count(), 0);
    assert_eq!(add_model(&mut scene, Vec3::ZERO).index(), DrawableIndex(0));
}

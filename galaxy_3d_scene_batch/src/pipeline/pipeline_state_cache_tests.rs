use std::sync::Arc;
use glam::Vec3;
use crate::camera::Camera;
use crate::error::Error;
use crate::resource::{
    Geometry, GeometryDesc, Material, MaterialDesc, Pass, PassDesc, PassRegistry,
    Technique, TechniqueDesc,
};
use crate::scene::{DrawableIndex, StaticModel, StaticModelDesc};
use crate::pipeline::mock_pipeline_state::MockPipelineStateFactory;
use super::*;

// ============================================================================
// Helper Functions
// ============================================================================

struct Fixture {
    camera: Camera,
    model: StaticModel,
    geometry: Arc<Geometry>,
    material: Arc<Material>,
    pass: Arc<Pass>,
    factory: MockPipelineStateFactory,
}

fn create_fixture() -> Fixture {
    let registry = PassRegistry::new();
    let technique = Technique::from_desc(TechniqueDesc {
        name: "NoTexture".to_string(),
        supported: true,
        passes: vec![PassDesc { name: "base".to_string(), pipeline_state_hash: 3 }],
    }, &registry).unwrap();

    Fixture {
        camera: Camera::perspective(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 1.0, 1.0, 0.1, 100.0),
        model: StaticModel::new(DrawableIndex(0), StaticModelDesc::default()),
        geometry: Arc::new(Geometry::from_desc(GeometryDesc {
            name: "box".to_string(),
            vertex_count: 24,
            index_count: 36,
            pipeline_state_hash: 1,
        }).unwrap()),
        material: Arc::new(Material::from_desc(MaterialDesc {
            name: "stone".to_string(),
            techniques: vec![],
            pipeline_state_hash: 2,
        }).unwrap()),
        pass: Arc::clone(technique.pass(registry.pass_index("base")).unwrap()),
        factory: MockPipelineStateFactory::new(),
    }
}

impl Fixture {
    fn request(&self) -> PipelineStateRequest<'_> {
        PipelineStateRequest {
            drawable: &self.model,
            geometry: &self.geometry,
            material: &self.material,
            pass: &self.pass,
        }
    }

    fn context(&self) -> PipelineStateContext<'_> {
        PipelineStateContext { camera: &self.camera, light: None }
    }
}

// ============================================================================
// lookup / get_or_create
// ============================================================================

#[test]
fn test_lookup_on_empty_cache_misses() {
    let fixture = create_fixture();
    let cache = PipelineStateCache::new();

    assert!(cache.lookup(&fixture.request().key()).is_none());
    assert!(cache.is_empty());
}

#[test]
fn test_get_or_create_then_lookup_hits() {
    let fixture = create_fixture();
    let mut cache = PipelineStateCache::new();

    let state = cache.get_or_create(&fixture.request(), &fixture.context(), &fixture.factory).unwrap();
    let found = cache.lookup(&fixture.request().key()).unwrap();

    assert!(Arc::ptr_eq(&state, &found));
    assert_eq!(state.debug_name(), "0/box/stone/base");
    assert_eq!(fixture.factory.build_count(), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_get_or_create_builds_once_per_key() {
    let fixture = create_fixture();
    let mut cache = PipelineStateCache::new();

    for _ in 0..5 {
        cache.get_or_create(&fixture.request(), &fixture.context(), &fixture.factory).unwrap();
    }

    assert_eq!(fixture.factory.build_count(), 1);
}

#[test]
fn test_distinct_resources_get_distinct_entries() {
    let fixture = create_fixture();
    let other_material = Arc::new(Material::from_desc(MaterialDesc {
        name: "stone".to_string(),
        techniques: vec![],
        pipeline_state_hash: 2,
    }).unwrap());
    let mut cache = PipelineStateCache::new();

    cache.get_or_create(&fixture.request(), &fixture.context(), &fixture.factory).unwrap();
    let other = PipelineStateRequest { material: &other_material, ..fixture.request() };
    cache.get_or_create(&other, &fixture.context(), &fixture.factory).unwrap();

    // Same content, different identity
    assert_eq!(cache.len(), 2);
    assert_eq!(fixture.factory.build_count(), 2);
}

// ============================================================================
// Staleness and invalidation
// ============================================================================

#[test]
fn test_changed_resource_hash_makes_entry_stale() {
    let fixture = create_fixture();
    let mut cache = PipelineStateCache::new();
    let first = cache.get_or_create(&fixture.request(), &fixture.context(), &fixture.factory).unwrap();

    fixture.material.set_pipeline_state_hash(99);
    assert!(cache.lookup(&fixture.request().key()).is_none());

    let rebuilt = cache.get_or_create(&fixture.request(), &fixture.context(), &fixture.factory).unwrap();
    assert!(!Arc::ptr_eq(&first, &rebuilt));
    assert!(cache.lookup(&fixture.request().key()).is_some());
    assert_eq!(fixture.factory.build_count(), 2);

    fixture.pass.set_pipeline_state_hash(100);
    fixture.geometry.set_pipeline_state_hash(101);
    assert!(cache.lookup(&fixture.request().key()).is_none());
}

#[test]
fn test_invalidate_all_forces_rebuild() {
    let fixture = create_fixture();
    let mut cache = PipelineStateCache::new();
    cache.get_or_create(&fixture.request(), &fixture.context(), &fixture.factory).unwrap();

    cache.invalidate_all();

    assert!(cache.lookup(&fixture.request().key()).is_none());
    assert_eq!(cache.len(), 1);

    cache.get_or_create(&fixture.request(), &fixture.context(), &fixture.factory).unwrap();
    assert!(cache.lookup(&fixture.request().key()).is_some());
    assert_eq!(fixture.factory.build_count(), 2);
}

#[test]
fn test_factory_error_leaves_cache_unchanged() {
    let fixture = create_fixture();
    fixture.factory.fail_pass("base");
    let mut cache = PipelineStateCache::new();

    let result = cache.get_or_create(&fixture.request(), &fixture.context(), &fixture.factory);

    assert!(matches!(result, Err(Error::PipelineStateCreationFailed(_))));
    assert!(cache.is_empty());
}

#[test]
fn test_clear() {
    let fixture = create_fixture();
    let mut cache = PipelineStateCache::new();
    cache.get_or_create(&fixture.request(), &fixture.context(), &fixture.factory).unwrap();

    cache.clear();

    assert!(cache.is_empty());
    assert!(cache.lookup(&fixture.request().key()).is_none());
}

// ============================================================================
// Eviction
// ============================================================================

#[test]
fn test_cache_does_not_keep_resources_alive() {
    let fixture = create_fixture();
    let mut cache = PipelineStateCache::new();
    cache.begin_frame(1);

    let materials: Vec<Arc<Material>> = (0..100)
        .map(|i| Arc::new(Material::from_desc(MaterialDesc {
            name: format!("stone_{}", i),
            techniques: vec![],
            pipeline_state_hash: 2,
        }).unwrap()))
        .collect();
    for material in &materials {
        let request = PipelineStateRequest { material, ..fixture.request() };
        cache.get_or_create(&request, &fixture.context(), &fixture.factory).unwrap();
    }
    assert_eq!(cache.len(), 100);
    assert!(materials.iter().all(|m| Arc::strong_count(m) == 1));

    let weak: Vec<_> = materials.iter().map(Arc::downgrade).collect();
    drop(materials);

    assert!(weak.iter().all(|w| w.upgrade().is_none()));
    assert_eq!(cache.evict_stale(60), 100);
    assert!(cache.is_empty());
}

#[test]
fn test_dropped_resource_is_a_miss() {
    let fixture = create_fixture();
    let material = Arc::new(Material::from_desc(MaterialDesc {
        name: "temporary".to_string(),
        techniques: vec![],
        pipeline_state_hash: 2,
    }).unwrap());
    let mut cache = PipelineStateCache::new();

    let request = PipelineStateRequest { material: &material, ..fixture.request() };
    cache.get_or_create(&request, &fixture.context(), &fixture.factory).unwrap();
    let key = request.key();
    drop(material);

    assert!(cache.lookup(&key).is_none());
}

#[test]
fn test_unused_entries_expire_after_retention() {
    let fixture = create_fixture();
    let mut cache = PipelineStateCache::new();
    cache.begin_frame(10);
    cache.get_or_create(&fixture.request(), &fixture.context(), &fixture.factory).unwrap();

    cache.begin_frame(13);
    assert_eq!(cache.evict_stale(3), 0);

    // Looking the entry up refreshes it
    assert!(cache.lookup(&fixture.request().key()).is_some());
    cache.begin_frame(16);
    assert_eq!(cache.evict_stale(3), 0);

    cache.begin_frame(20);
    assert_eq!(cache.evict_stale(3), 1);
    assert!(cache.is_empty());
}

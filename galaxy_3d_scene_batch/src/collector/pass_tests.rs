//! Unit tests for pass.rs (validity table and pass matching)

use std::sync::Arc;
use crate::collector::pass::{PassData, ScenePassDescription, ScenePassType};
use crate::error::Error;
use crate::resource::{PassDesc, PassRegistry, Technique, TechniqueDesc};
use crate::scene::{Drawable, DrawableIndex, StaticModel, StaticModelDesc};

fn technique(registry: &PassRegistry, passes: &[&str]) -> Technique {
    Technique::from_desc(
        TechniqueDesc {
            name: format!("tech[{}]", passes.join(",")),
            supported: true,
            passes: passes
                .iter()
                .map(|name| PassDesc { name: name.to_string(), pipeline_state_hash: 1 })
                .collect(),
        },
        registry,
    )
    .unwrap()
}

fn drawable() -> Arc<dyn Drawable> {
    Arc::new(StaticModel::new(DrawableIndex(0), StaticModelDesc::default()))
}

fn description(
    pass_type: ScenePassType,
    unlit: Option<&str>,
    lit: Option<&str>,
    additional: Option<&str>,
) -> ScenePassDescription {
    ScenePassDescription {
        pass_type,
        unlit_base_pass: unlit.map(str::to_string),
        lit_base_pass: lit.map(str::to_string),
        additional_light_pass: additional.map(str::to_string),
    }
}

// ============================================================================
// VALIDITY TABLE
// ============================================================================

#[test]
fn test_unlit_validity() {
    use ScenePassType::Unlit;
    assert!(description(Unlit, Some("base"), None, None).is_valid());
    assert!(!description(Unlit, None, None, None).is_valid());
    assert!(!description(Unlit, Some("base"), Some("litbase"), None).is_valid());
    assert!(!description(Unlit, Some("base"), None, Some("light")).is_valid());
}

#[test]
fn test_forward_lit_base_validity() {
    use ScenePassType::ForwardLitBase;
    assert!(description(ForwardLitBase, None, Some("litbase"), Some("light")).is_valid());
    assert!(description(ForwardLitBase, Some("base"), Some("litbase"), Some("light")).is_valid());
    assert!(!description(ForwardLitBase, Some("base"), None, Some("light")).is_valid());
    assert!(!description(ForwardLitBase, Some("base"), Some("litbase"), None).is_valid());
}

#[test]
fn test_forward_unlit_base_validity() {
    use ScenePassType::ForwardUnlitBase;
    assert!(description(ForwardUnlitBase, Some("base"), None, Some("light")).is_valid());
    assert!(!description(ForwardUnlitBase, Some("base"), Some("litbase"), Some("light")).is_valid());
    assert!(!description(ForwardUnlitBase, None, None, Some("light")).is_valid());
    assert!(!description(ForwardUnlitBase, Some("base"), None, None).is_valid());
}

#[test]
fn test_invalid_description_is_rejected() {
    let registry = PassRegistry::new();
    let result = PassData::new(
        description(ScenePassType::Unlit, None, Some("litbase"), None),
        &registry,
    );
    assert!(matches!(result, Err(Error::InvalidPassConfiguration(_))));
}

#[test]
fn test_helper_constructors_are_valid() {
    assert!(ScenePassDescription::unlit("base").is_valid());
    assert!(ScenePassDescription::forward_lit_base(Some("base"), "litbase", "light").is_valid());
    assert!(ScenePassDescription::forward_lit_base(None, "litbase", "light").is_valid());
    assert!(ScenePassDescription::forward_unlit_base("base", "light").is_valid());
}

// ============================================================================
// INTERMEDIATE BATCH CREATION
// ============================================================================

#[test]
fn test_unlit_pass_ignores_additional_light_pass() {
    let registry = PassRegistry::new();
    let pass = PassData::new(ScenePassDescription::unlit("base"), &registry).unwrap();
    let tech = technique(&registry, &["base", "light"]);

    let batch = pass.create_intermediate_batch(&drawable(), 0, &tech).unwrap();
    assert_eq!(batch.base_pass.name(), "base");
    assert!(batch.additional_pass.is_none());
}

#[test]
fn test_forward_lit_base_picks_lit_base_pass() {
    let registry = PassRegistry::new();
    let pass = PassData::new(
        ScenePassDescription::forward_lit_base(Some("base"), "litbase", "light"),
        &registry,
    )
    .unwrap();
    let tech = technique(&registry, &["base", "litbase", "light"]);

    let batch = pass.create_intermediate_batch(&drawable(), 2, &tech).unwrap();
    assert_eq!(batch.source_batch_index, 2);
    assert_eq!(batch.base_pass.name(), "litbase");
    assert_eq!(batch.additional_pass.as_ref().map(|p| p.name()), Some("light"));
}

#[test]
fn test_technique_without_light_pass_falls_back_to_unlit_base() {
    let registry = PassRegistry::new();
    let pass = PassData::new(
        ScenePassDescription::forward_lit_base(Some("base"), "litbase", "light"),
        &registry,
    )
    .unwrap();
    let tech = technique(&registry, &["base", "litbase"]);

    let batch = pass.create_intermediate_batch(&drawable(), 0, &tech).unwrap();
    assert_eq!(batch.base_pass.name(), "base");
    assert!(batch.additional_pass.is_none());
}

#[test]
fn test_forward_lit_base_without_lit_base_in_technique_yields_nothing() {
    let registry = PassRegistry::new();
    let pass = PassData::new(
        ScenePassDescription::forward_lit_base(Some("base"), "litbase", "light"),
        &registry,
    )
    .unwrap();
    let tech = technique(&registry, &["base", "light"]);

    assert!(pass.create_intermediate_batch(&drawable(), 0, &tech).is_none());
}

#[test]
fn test_forward_unlit_base_pairs_base_with_light() {
    let registry = PassRegistry::new();
    let pass = PassData::new(ScenePassDescription::forward_unlit_base("base", "light"), &registry).unwrap();
    let tech = technique(&registry, &["base", "light"]);

    let batch = pass.create_intermediate_batch(&drawable(), 0, &tech).unwrap();
    assert_eq!(batch.base_pass.name(), "base");
    assert_eq!(batch.additional_pass.as_ref().map(|p| p.name()), Some("light"));
}

#[test]
fn test_technique_without_any_matching_pass_yields_nothing() {
    let registry = PassRegistry::new();
    let pass = PassData::new(ScenePassDescription::unlit("base"), &registry).unwrap();
    let tech = technique(&registry, &["shadow"]);

    assert!(pass.create_intermediate_batch(&drawable(), 0, &tech).is_none());
}

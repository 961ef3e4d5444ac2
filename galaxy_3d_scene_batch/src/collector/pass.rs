/// Scene pass configuration and per-pass collection state.
///
/// A scene pass groups up to three technique passes:
/// - unlit-base: drawn once for objects that receive no per-pixel light
/// - lit-base: drawn once with the main per-pixel light folded in
/// - additional-light: drawn once per extra per-pixel light
///
/// Which combinations are allowed depends on the scene pass type.

use std::sync::Arc;
use crate::error::Result;
use crate::engine_bail;
use crate::pipeline::PipelineStateCache;
use crate::resource::{Pass, PassIndex, PassRegistry, Technique};
use crate::scene::Drawable;
use super::batch::{IntermediateSceneBatch, SceneBatch};

/// Lighting model of a scene pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenePassType {
    /// Unlit-base only
    Unlit,
    /// Lit-base and additional-light, optional unlit-base
    ForwardLitBase,
    /// Unlit-base and additional-light
    ForwardUnlitBase,
}

/// Scene pass configuration, passed to `SceneBatchCollector::initialize_passes`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScenePassDescription {
    pub pass_type: ScenePassType,
    pub unlit_base_pass: Option<String>,
    pub lit_base_pass: Option<String>,
    pub additional_light_pass: Option<String>,
}

impl ScenePassDescription {
    /// Unlit pass drawing `base_pass`
    pub fn unlit(base_pass: &str) -> Self {
        Self {
            pass_type: ScenePassType::Unlit,
            unlit_base_pass: Some(base_pass.to_string()),
            lit_base_pass: None,
            additional_light_pass: None,
        }
    }

    /// Forward pass with the main light folded into `lit_base_pass`
    pub fn forward_lit_base(
        unlit_base_pass: Option<&str>,
        lit_base_pass: &str,
        additional_light_pass: &str,
    ) -> Self {
        Self {
            pass_type: ScenePassType::ForwardLitBase,
            unlit_base_pass: unlit_base_pass.map(str::to_string),
            lit_base_pass: Some(lit_base_pass.to_string()),
            additional_light_pass: Some(additional_light_pass.to_string()),
        }
    }

    /// Forward pass drawing every light additively over `unlit_base_pass`
    pub fn forward_unlit_base(unlit_base_pass: &str, additional_light_pass: &str) -> Self {
        Self {
            pass_type: ScenePassType::ForwardUnlitBase,
            unlit_base_pass: Some(unlit_base_pass.to_string()),
            lit_base_pass: None,
            additional_light_pass: Some(additional_light_pass.to_string()),
        }
    }

    /// Whether the present sub-passes match the pass type.
    pub fn is_valid(&self) -> bool {
        let unlit = self.unlit_base_pass.is_some();
        let lit = self.lit_base_pass.is_some();
        let additional = self.additional_light_pass.is_some();

        match self.pass_type {
            ScenePassType::Unlit => unlit && !lit && !additional,
            ScenePassType::ForwardLitBase => lit && additional,
            ScenePassType::ForwardUnlitBase => unlit && !lit && additional,
        }
    }
}

// ===== PASS DATA =====

/// Collection state of one configured scene pass.
///
/// Intermediate and final batch lists are rebuilt every frame; the two
/// pipeline state caches live as long as the pass configuration.
pub(crate) struct PassData {
    pub(crate) description: ScenePassDescription,
    pub(crate) unlit_base_pass: Option<PassIndex>,
    pub(crate) lit_base_pass: Option<PassIndex>,
    pub(crate) additional_light_pass: Option<PassIndex>,

    pub(crate) unlit_batches: Vec<IntermediateSceneBatch>,
    pub(crate) lit_batches: Vec<IntermediateSceneBatch>,

    pub(crate) unlit_base_scene_batches: Vec<SceneBatch>,
    pub(crate) lit_base_scene_batches: Vec<SceneBatch>,

    pub(crate) unlit_pipeline_state_cache: PipelineStateCache,
    pub(crate) lit_pipeline_state_cache: PipelineStateCache,
}

impl PassData {
    /// Validate `description` and resolve its pass names.
    pub(crate) fn new(description: ScenePassDescription, registry: &PassRegistry) -> Result<Self> {
        // ========== VALIDATION: sub-pass presence must match the pass type ==========
        if !description.is_valid() {
            engine_bail!(InvalidPassConfiguration, "galaxy3d::SceneBatchCollector",
                "{:?} pass requires {}, got unlit-base={:?} lit-base={:?} additional-light={:?}",
                description.pass_type,
                match description.pass_type {
                    ScenePassType::Unlit => "only an unlit-base pass",
                    ScenePassType::ForwardLitBase => "lit-base and additional-light passes",
                    ScenePassType::ForwardUnlitBase => "unlit-base and additional-light passes only",
                },
                description.unlit_base_pass,
                description.lit_base_pass,
                description.additional_light_pass);
        }

        let resolve = |name: &Option<String>| name.as_deref().map(|n| registry.pass_index(n));

        Ok(Self {
            unlit_base_pass: resolve(&description.unlit_base_pass),
            lit_base_pass: resolve(&description.lit_base_pass),
            additional_light_pass: resolve(&description.additional_light_pass),
            description,
            unlit_batches: Vec::new(),
            lit_batches: Vec::new(),
            unlit_base_scene_batches: Vec::new(),
            lit_base_scene_batches: Vec::new(),
            unlit_pipeline_state_cache: PipelineStateCache::new(),
            lit_pipeline_state_cache: PipelineStateCache::new(),
        })
    }

    /// Drop last frame's batches, keep the pipeline state caches.
    pub(crate) fn clear_frame(&mut self) {
        self.unlit_batches.clear();
        self.lit_batches.clear();
        self.unlit_base_scene_batches.clear();
        self.lit_base_scene_batches.clear();
    }

    /// Match a source batch's technique against this pass.
    ///
    /// Returns `None` when the technique has no usable combination of passes.
    /// The batch is lit when `additional_pass` is set.
    pub(crate) fn create_intermediate_batch(
        &self,
        drawable: &Arc<dyn Drawable>,
        source_batch_index: usize,
        technique: &Technique,
    ) -> Option<IntermediateSceneBatch> {
        let find = |index: Option<PassIndex>| index.and_then(|i| technique.pass(i)).cloned();

        let unlit_base = find(self.unlit_base_pass);
        let additional = find(self.additional_light_pass);

        let (base_pass, additional_pass) = match (self.description.pass_type, additional) {
            (ScenePassType::Unlit, _) | (_, None) => (unlit_base?, None),
            (ScenePassType::ForwardUnlitBase, Some(additional)) => (unlit_base?, Some(additional)),
            (ScenePassType::ForwardLitBase, Some(additional)) => (find(self.lit_base_pass)?, Some(additional)),
        };

        Some(IntermediateSceneBatch {
            drawable: Arc::clone(drawable),
            source_batch_index,
            base_pass,
            additional_pass,
        })
    }

    /// Whether `index` is one of this pass's base sub-passes.
    pub(crate) fn has_base_pass(&self, index: PassIndex) -> bool {
        self.unlit_base_pass == Some(index) || self.lit_base_pass == Some(index)
    }
}

#[cfg(test)]
#[path = "pass_tests.rs"]
mod tests;

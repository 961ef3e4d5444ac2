/// Scene batches produced by collection.

use std::sync::Arc;
use crate::pipeline::PipelineState;
use crate::resource::{Geometry, Material, Pass};
use crate::scene::{Drawable, DrawableIndex};

/// Source batch matched with the pass(es) of its technique, before
/// pipeline state resolution.
#[derive(Clone)]
pub struct IntermediateSceneBatch {
    pub drawable: Arc<dyn Drawable>,
    pub source_batch_index: usize,
    /// Unlit-base or lit-base pass
    pub base_pass: Arc<Pass>,
    /// Per-light pass, `None` for unlit batches
    pub additional_pass: Option<Arc<Pass>>,
}

/// Fully resolved batch, ready to be sorted and drawn. Valid for one frame.
#[derive(Clone)]
pub struct SceneBatch {
    pub drawable: Arc<dyn Drawable>,
    pub drawable_index: DrawableIndex,
    pub source_batch_index: usize,
    pub geometry: Arc<Geometry>,
    /// Source batch material or the collector's default material
    pub material: Arc<Material>,
    pub pass: Arc<Pass>,
    pub pipeline_state: Arc<dyn PipelineState>,
}

impl std::fmt::Debug for SceneBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneBatch")
            .field("drawable_index", &self.drawable_index)
            .field("source_batch_index", &self.source_batch_index)
            .field("geometry", &self.geometry.name())
            .field("material", &self.material.name())
            .field("pass", &self.pass.name())
            .field("pipeline_state", &self.pipeline_state.debug_name())
            .finish()
    }
}

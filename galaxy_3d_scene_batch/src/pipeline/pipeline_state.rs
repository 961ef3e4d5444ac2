/// Pipeline state traits.
///
/// A pipeline state is the fully resolved GPU state (shaders, vertex
/// layout, blend/depth states) needed to draw one batch. The collector
/// never looks inside it; it only asks a `PipelineStateFactory` to build
/// one per distinct (drawable, geometry, material, pass) configuration.

use std::fmt::Debug;
use std::sync::Arc;
use crate::camera::Camera;
use crate::error::Result;
use crate::resource::{Geometry, Material, Pass};
use crate::scene::{Drawable, Light};
use super::pipeline_state_cache::PipelineStateKey;

/// Opaque handle to a built pipeline state
pub trait PipelineState: Send + Sync + Debug {
    /// Name for debugging and profiling tools
    fn debug_name(&self) -> &str;
}

/// Frame-level inputs of pipeline state creation.
#[derive(Debug, Clone, Copy)]
pub struct PipelineStateContext<'a> {
    /// Culling camera of the frame
    pub camera: &'a Camera,
    /// Main directional light for lit batches, `None` for unlit batches
    pub light: Option<&'a Light>,
}

/// One batch configuration for which a pipeline state is needed.
#[derive(Clone, Copy)]
pub struct PipelineStateRequest<'a> {
    pub drawable: &'a dyn Drawable,
    pub geometry: &'a Arc<Geometry>,
    pub material: &'a Arc<Material>,
    pub pass: &'a Arc<Pass>,
}

impl PipelineStateRequest<'_> {
    /// Cache key of this configuration
    pub fn key(&self) -> PipelineStateKey {
        PipelineStateKey::new(
            self.drawable.pipeline_state_hash(),
            self.geometry,
            self.material,
            self.pass,
        )
    }
}

/// Builds pipeline states. Implemented by renderer backends.
pub trait PipelineStateFactory: Send + Sync {
    /// Build the pipeline state for one batch configuration.
    ///
    /// Called from a single thread, after parallel batch scanning has joined.
    fn create_pipeline_state(
        &self,
        context: &PipelineStateContext<'_>,
        drawable: &dyn Drawable,
        geometry: &Geometry,
        material: &Material,
        pass: &Pass,
    ) -> Result<Arc<dyn PipelineState>>;
}

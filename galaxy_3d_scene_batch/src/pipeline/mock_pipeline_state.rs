/// Mock pipeline state factory for unit tests (no GPU required)

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use crate::error::Result;
use crate::engine_bail;
use crate::resource::{Geometry, Material, Pass};
use crate::scene::Drawable;
use super::pipeline_state::{PipelineState, PipelineStateContext, PipelineStateFactory};

#[derive(Debug)]
pub struct MockPipelineState {
    pub name: String,
    /// Sequence number of the build that produced this state
    pub build_id: usize,
    pub lit: bool,
}

impl PipelineState for MockPipelineState {
    fn debug_name(&self) -> &str {
        &self.name
    }
}

/// Factory counting builds, optionally failing for one pass name.
#[derive(Default)]
pub struct MockPipelineStateFactory {
    builds: AtomicUsize,
    failing_pass: Mutex<Option<String>>,
}

impl MockPipelineStateFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of states built so far
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    /// Make every build for `pass_name` fail
    pub fn fail_pass(&self, pass_name: &str) {
        if let Ok(mut failing) = self.failing_pass.lock() {
            *failing = Some(pass_name.to_string());
        }
    }
}

impl PipelineStateFactory for MockPipelineStateFactory {
    fn create_pipeline_state(
        &self,
        context: &PipelineStateContext<'_>,
        drawable: &dyn Drawable,
        geometry: &Geometry,
        material: &Material,
        pass: &Pass,
    ) -> Result<Arc<dyn PipelineState>> {
        let failing = self.failing_pass.lock().ok().and_then(|f| f.clone());
        if failing.as_deref() == Some(pass.name()) {
            engine_bail!(PipelineStateCreationFailed, "galaxy3d::MockPipelineStateFactory",
                "Shader compilation failed for pass '{}'", pass.name());
        }

        let build_id = self.builds.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MockPipelineState {
            name: format!("{}/{}/{}/{}", drawable.index().0, geometry.name(), material.name(), pass.name()),
            build_id,
            lit: context.light.is_some(),
        }))
    }
}

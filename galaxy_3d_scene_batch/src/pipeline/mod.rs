//! Pipeline state module
//!
//! Pipeline state objects are built by an external factory (the renderer
//! backend) and cached per batch configuration.

mod pipeline_state;
mod pipeline_state_cache;

#[cfg(test)]
pub(crate) mod mock_pipeline_state;

pub use pipeline_state::{
    PipelineState, PipelineStateContext, PipelineStateFactory, PipelineStateRequest,
};
pub use pipeline_state_cache::{PipelineStateCache, PipelineStateKey};

/*!
# Galaxy 3D Scene Batch Collector

Per-frame batch collection for the Galaxy 3D engine.

Given the drawables of a scene, a culling camera and a set of scene passes,
the collector produces the batches a renderer needs to draw the frame.

## Architecture

- **Scene**: arena of drawables (`StaticModel`, `Light`) addressed by `DrawableIndex`
- **SceneIndex**: spatial index (`OctreeSceneIndex`) answering light volume queries
- **Material / Technique / Pass**: data-only descriptions of how surfaces are drawn
- **SceneBatchCollector**: classifies drawables, matches techniques to passes,
  ranks lights per geometry and resolves pipeline states
- **PipelineStateFactory**: renderer backend hook building pipeline states
- **WorkQueue**: fork-join worker pool running the parallel stages

The renderer backend only implements `PipelineStateFactory`; everything
else is platform-agnostic.
*/

// Internal modules
mod error;
mod engine;
mod constants;
mod work_queue;
mod utils;
pub mod log;
pub mod camera;
pub mod scene;
pub mod resource;
pub mod pipeline;
pub mod collector;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Shared constants
    pub use crate::constants::{EPSILON, LARGE_EPSILON, LARGE_VALUE, MAX_VERTEX_LIGHTS};

    // Worker pool
    pub use crate::work_queue::WorkQueue;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, RecordingLogger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Pipeline state sub-module
    pub mod pipeline {
        pub use crate::pipeline::*;
    }

    // Batch collection sub-module
    pub mod collector {
        pub use crate::collector::*;
    }
}

// Re-export math library at crate root
pub use glam;

/// Per-frame inputs of batch collection.

use std::sync::Arc;
use crate::camera::Camera;

/// Frame description handed to `SceneBatchCollector::initialize_frame`.
#[derive(Debug, Clone)]
pub struct FrameInfo {
    /// Monotonic frame counter (wraps)
    pub frame_number: u32,
    /// Seconds elapsed since the previous frame
    pub time_step: f32,
    /// Culling camera
    pub camera: Arc<Camera>,
    /// Size of the per-frame drawable tables (`Scene::drawable_count`)
    pub num_drawables: u32,
}

impl FrameInfo {
    pub fn new(frame_number: u32, camera: Arc<Camera>, num_drawables: u32) -> Self {
        Self {
            frame_number,
            time_step: 0.0,
            camera,
            num_drawables,
        }
    }
}

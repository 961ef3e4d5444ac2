/// Batch collector configuration.

use crate::resource::MaterialQuality;

/// Collector tuning parameters.
///
/// Work thresholds are minimum chunk sizes handed to the work queue: a
/// parallel loop never splits its input into chunks smaller than these.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectorConfig {
    /// Minimum drawables per chunk during visibility classification
    pub drawable_work_threshold: usize,
    /// Minimum lit geometries per chunk during light accumulation
    pub lit_geometries_work_threshold: usize,
    /// Minimum intermediate batches per chunk during batch assembly
    pub batch_work_threshold: usize,
    /// Number of per-pixel lights per drawable
    pub max_pixel_lights: usize,
    /// Highest material quality techniques may require
    pub material_quality: MaterialQuality,
    /// Frames a light may stay invisible before its cached light data is dropped
    pub light_data_retention_frames: u32,
    /// Frames a pipeline state may stay unused before it is dropped from its cache
    pub pipeline_state_retention_frames: u32,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            drawable_work_threshold: 1,
            lit_geometries_work_threshold: 64,
            batch_work_threshold: 64,
            max_pixel_lights: 1,
            material_quality: MaterialQuality::High,
            light_data_retention_frames: 60,
            pipeline_state_retention_frames: 60,
        }
    }
}

//! Scene batch collection
//!
//! Per-frame pipeline turning scene drawables into sorted-ready batches:
//! visibility classification, technique and pass matching, light
//! collection and ranking, pipeline state resolution.

mod batch;
mod config;
mod frame;
mod light_accumulator;
mod light_data;
mod pass;
mod scene_batch_collector;
mod technique_resolver;
mod transient;

pub use batch::{IntermediateSceneBatch, SceneBatch};
pub use config::CollectorConfig;
pub use frame::FrameInfo;
pub use light_accumulator::DrawableLightAccumulator;
pub use light_data::{LightData, LightDataCache};
pub use pass::{ScenePassDescription, ScenePassType};
pub use scene_batch_collector::SceneBatchCollector;
pub use technique_resolver::{active_material_quality, find_technique};
pub use transient::{DrawableZRange, TransientDrawableIndex, TransientTraits};

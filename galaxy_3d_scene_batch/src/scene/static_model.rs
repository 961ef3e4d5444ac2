/// StaticModel: geometry drawable with a fixed set of source batches.

use glam::Vec3;
use crate::collector::FrameInfo;
use crate::galaxy3d::EPSILON;
use super::bounds::AABB;
use super::drawable::{AtomicF32, Drawable, DrawableFlags, DrawableIndex, SourceBatch};

/// StaticModel creation descriptor
#[derive(Debug, Clone)]
pub struct StaticModelDesc {
    pub world_bounding_box: AABB,
    pub batches: Vec<SourceBatch>,
    /// 0 = unlimited
    pub draw_distance: f32,
    /// Divides the camera distance before LOD selection (> 1 keeps detail longer)
    pub lod_bias: f32,
    pub light_mask: u32,
    pub pipeline_state_hash: u32,
}

impl Default for StaticModelDesc {
    fn default() -> Self {
        Self {
            world_bounding_box: AABB::from_center_half_size(Vec3::ZERO, Vec3::splat(0.5)),
            batches: Vec::new(),
            draw_distance: 0.0,
            lod_bias: 1.0,
            light_mask: u32::MAX,
            pipeline_state_hash: 0,
        }
    }
}

/// Non-animated renderable geometry
#[derive(Debug)]
pub struct StaticModel {
    index: DrawableIndex,
    desc: StaticModelDesc,
    distance: AtomicF32,
    lod_distance: AtomicF32,
}

impl StaticModel {
    /// Create a model at `index` (normally called from `Scene::add_drawable`).
    pub fn new(index: DrawableIndex, desc: StaticModelDesc) -> Self {
        Self {
            index,
            desc,
            distance: AtomicF32::new(0.0),
            lod_distance: AtomicF32::new(0.0),
        }
    }

    pub fn lod_bias(&self) -> f32 {
        self.desc.lod_bias
    }
}

impl Drawable for StaticModel {
    fn index(&self) -> DrawableIndex {
        self.index
    }

    fn flags(&self) -> DrawableFlags {
        DrawableFlags::GEOMETRY
    }

    fn world_bounding_box(&self) -> AABB {
        self.desc.world_bounding_box
    }

    fn draw_distance(&self) -> f32 {
        self.desc.draw_distance
    }

    fn distance(&self) -> f32 {
        self.distance.load()
    }

    fn lod_distance(&self) -> f32 {
        self.lod_distance.load()
    }

    fn light_mask(&self) -> u32 {
        self.desc.light_mask
    }

    fn pipeline_state_hash(&self) -> u32 {
        self.desc.pipeline_state_hash
    }

    fn source_batches(&self) -> &[SourceBatch] {
        &self.desc.batches
    }

    fn update_batches(&self, frame: &FrameInfo) {
        let center = self.desc.world_bounding_box.center();
        let distance = frame.camera.position().distance(center);
        self.distance.store(distance);
        self.lod_distance.store(distance / self.desc.lod_bias.max(EPSILON));
    }
}

#[cfg(test)]
#[path = "static_model_tests.rs"]
mod tests;

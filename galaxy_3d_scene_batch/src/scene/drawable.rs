/// Drawable: the per-object interface read by batch collection.
///
/// A drawable is anything the scene can index: renderable geometry
/// (`StaticModel`) or a light (`Light`). Drawables are shared as
/// `Arc<dyn Drawable>` between the scene arena, the spatial index and the
/// collector's per-frame tables, so every per-frame refresh goes through
/// interior mutability.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use bitflags::bitflags;
use glam::Vec3;
use crate::collector::FrameInfo;
use crate::resource::{Geometry, Material};
use super::bounds::AABB;
use super::light::Light;

// ===== DRAWABLE INDEX =====

/// Dense, stable index of a drawable within its scene.
///
/// Per-frame tables are addressed by this index. Indices of removed
/// drawables are recycled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrawableIndex(pub u32);

impl DrawableIndex {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ===== FLAGS =====

bitflags! {
    /// Drawable classes, used to filter spatial queries.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DrawableFlags: u8 {
        const GEOMETRY = 1 << 0;
        const LIGHT    = 1 << 1;
    }
}

// ===== SOURCE BATCH =====

/// One geometry/material pair of a drawable, before technique resolution.
#[derive(Debug, Clone)]
pub struct SourceBatch {
    pub geometry: Arc<Geometry>,
    /// `None` falls back to the collector's default material
    pub material: Option<Arc<Material>>,
}

// ===== DRAWABLE TRAIT =====

/// Scene object visible to batch collection.
///
/// Implementations must be thread-safe: `update_batches` and every
/// accessor are called from worker threads.
pub trait Drawable: Send + Sync {
    /// Index assigned by the owning scene.
    fn index(&self) -> DrawableIndex;

    fn flags(&self) -> DrawableFlags;

    fn world_bounding_box(&self) -> AABB;

    fn world_position(&self) -> Vec3 {
        self.world_bounding_box().center()
    }

    /// Maximum camera distance at which the drawable is processed (0 = unlimited).
    fn draw_distance(&self) -> f32 {
        0.0
    }

    /// Camera distance computed by the last `update_batches`.
    fn distance(&self) -> f32;

    /// Distance used for LOD selection, computed by the last `update_batches`.
    fn lod_distance(&self) -> f32 {
        self.distance()
    }

    /// Lights affect this drawable only if their masks overlap.
    fn light_mask(&self) -> u32 {
        u32::MAX
    }

    /// Hash of per-drawable state that changes pipeline states (skinning, instancing...).
    fn pipeline_state_hash(&self) -> u32 {
        0
    }

    fn source_batches(&self) -> &[SourceBatch] {
        &[]
    }

    /// Per-frame refresh (distances, LOD). Called once per frame from a worker thread.
    fn update_batches(&self, _frame: &FrameInfo) {}

    /// Downcast to a light.
    fn into_light(self: Arc<Self>) -> Option<Arc<Light>> {
        None
    }

    fn is_geometry(&self) -> bool {
        self.flags().contains(DrawableFlags::GEOMETRY)
    }

    fn is_light(&self) -> bool {
        self.flags().contains(DrawableFlags::LIGHT)
    }
}

// ===== ATOMIC F32 =====

/// `f32` stored as bits in an `AtomicU32`, for per-frame values written
/// by `update_batches` through `&self`.
#[derive(Debug, Default)]
pub(crate) struct AtomicF32(AtomicU32);

impl AtomicF32 {
    pub(crate) fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    pub(crate) fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub(crate) fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

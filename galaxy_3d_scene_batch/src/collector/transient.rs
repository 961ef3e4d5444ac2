/// Per-frame, per-drawable tables.
///
/// Indexed by `DrawableIndex`, sized once per frame from
/// `FrameInfo::num_drawables` and never resized mid-frame.

use bitflags::bitflags;
use crate::galaxy3d::LARGE_VALUE;
use crate::scene::DrawableIndex;

bitflags! {
    /// What happened to a drawable during the current frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TransientTraits: u8 {
        /// `update_batches` was called
        const UPDATED          = 1 << 0;
        /// Geometry passed the draw distance test
        const VISIBLE_GEOMETRY = 1 << 1;
        /// At least one batch goes through a forward lit pass
        const FORWARD_LIT      = 1 << 2;
    }
}

// ===== Z RANGE =====

/// Linear view depth interval covered by a drawable (or the whole scene).
///
/// Depth is positive in front of the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawableZRange {
    pub min: f32,
    pub max: f32,
}

impl DrawableZRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Range of geometries with an infinite bounding box.
    pub fn infinite() -> Self {
        Self { min: LARGE_VALUE, max: LARGE_VALUE }
    }

    /// Empty range; absorbs nothing and is absorbed by anything.
    pub fn empty() -> Self {
        Self { min: f32::INFINITY, max: f32::NEG_INFINITY }
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    /// Grow to cover `other`.
    pub fn accumulate(&mut self, other: DrawableZRange) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }
}

impl Default for DrawableZRange {
    fn default() -> Self {
        Self::empty()
    }
}

// ===== TRANSIENT DRAWABLE INDEX =====

/// Dense per-frame state of every drawable.
#[derive(Debug, Default)]
pub struct TransientDrawableIndex {
    traits: Vec<TransientTraits>,
    z_ranges: Vec<DrawableZRange>,
}

impl TransientDrawableIndex {
    /// Clear every slot and size the tables for `num_drawables`.
    pub fn reset(&mut self, num_drawables: usize) {
        self.traits.clear();
        self.traits.resize(num_drawables, TransientTraits::empty());
        self.z_ranges.clear();
        self.z_ranges.resize(num_drawables, DrawableZRange::empty());
    }

    pub fn len(&self) -> usize {
        self.traits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traits.is_empty()
    }

    pub fn contains(&self, index: DrawableIndex) -> bool {
        index.index() < self.traits.len()
    }

    /// Traits of a drawable (empty when out of range).
    pub fn traits(&self, index: DrawableIndex) -> TransientTraits {
        self.traits.get(index.index()).copied().unwrap_or_default()
    }

    /// Z range of a drawable (empty when out of range or not a visible geometry).
    pub fn z_range(&self, index: DrawableIndex) -> DrawableZRange {
        self.z_ranges.get(index.index()).copied().unwrap_or_default()
    }

    pub(crate) fn insert_traits(&mut self, index: DrawableIndex, traits: TransientTraits) {
        if let Some(slot) = self.traits.get_mut(index.index()) {
            slot.insert(traits);
        }
    }

    pub(crate) fn set_z_range(&mut self, index: DrawableIndex, range: DrawableZRange) {
        if let Some(slot) = self.z_ranges.get_mut(index.index()) {
            *slot = range;
        }
    }
}

#[cfg(test)]
#[path = "transient_tests.rs"]
mod tests;

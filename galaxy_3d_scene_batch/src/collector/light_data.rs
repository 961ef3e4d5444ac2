/// Light data: geometries lit by each visible light.
///
/// Light data is keyed by light identity and survives across frames, so a
/// light that stays visible keeps its buffers. The cache only holds weak
/// references: a light dropped by the scene is evicted on the next sweep,
/// as is a light that has not been visible for too many frames.

use std::sync::{Arc, Weak};
use rustc_hash::FxHashMap;
use crate::scene::{Drawable, Light};

/// Per-light collection results of the current frame.
#[derive(Default)]
pub struct LightData {
    lit_geometries: Vec<Arc<dyn Drawable>>,
    last_seen_frame: u32,
}

impl LightData {
    /// Visible geometries within the light volume whose mask overlaps the light's.
    pub fn lit_geometries(&self) -> &[Arc<dyn Drawable>] {
        &self.lit_geometries
    }

    /// Frame number of the last frame this light was visible in
    pub fn last_seen_frame(&self) -> u32 {
        self.last_seen_frame
    }

    /// Replace the lit geometries, reusing the existing allocation.
    pub(crate) fn set_lit_geometries(&mut self, geometries: impl IntoIterator<Item = Arc<dyn Drawable>>) {
        self.lit_geometries.clear();
        self.lit_geometries.extend(geometries);
    }
}

struct CachedLightData {
    // Keeps the allocation, and thus the key, from being reused
    light: Weak<Light>,
    data: LightData,
}

/// Identity-keyed store of `LightData`.
#[derive(Default)]
pub struct LightDataCache {
    entries: FxHashMap<usize, CachedLightData>,
}

impl LightDataCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(light: &Arc<Light>) -> usize {
        Arc::as_ptr(light) as usize
    }

    /// Light data of `light`, created on first use, marked as seen in `frame_number`.
    pub fn get_or_insert(&mut self, light: &Arc<Light>, frame_number: u32) -> &mut LightData {
        let entry = self
            .entries
            .entry(Self::key(light))
            .or_insert_with(|| CachedLightData {
                light: Arc::downgrade(light),
                data: LightData::default(),
            });

        entry.data.last_seen_frame = frame_number;
        &mut entry.data
    }

    /// Light data of `light`, if cached.
    pub fn get(&self, light: &Arc<Light>) -> Option<&LightData> {
        self.entries.get(&Self::key(light)).map(|entry| &entry.data)
    }

    /// Drop entries whose light is gone or unseen for more than
    /// `retention_frames` frames. Returns the number of evicted entries.
    pub fn evict_stale(&mut self, frame_number: u32, retention_frames: u32) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| {
            entry.light.strong_count() > 0
                && frame_number.wrapping_sub(entry.data.last_seen_frame) <= retention_frames
        });
        let evicted = before - self.entries.len();

        if evicted > 0 {
            crate::engine_trace!("galaxy3d::LightDataCache",
                "Evicted {} stale light data entries, {} remaining", evicted, self.entries.len());
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "light_data_tests.rs"]
mod tests;

/// Pipeline state cache.
///
/// Maps a batch configuration to its built pipeline state. Entries are
/// keyed by the drawable's pipeline state hash and the identities of the
/// geometry, material and pass, and validated against the content hashes
/// those resources carry at lookup time.
///
/// Access is split in two phases:
/// - `lookup` (`&self`) runs concurrently from batch scanning workers and
///   never builds anything;
/// - `get_or_create` (`&mut self`) runs serially afterwards and builds the
///   states that were missing, stale or invalidated.
///
/// Entries only hold weak references to their resources. An entry whose
/// geometry, material or pass was dropped is a miss, and `evict_stale`
/// removes it together with entries unused for too many frames.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Weak};
use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::resource::{Geometry, Material, Pass};
use super::pipeline_state::{
    PipelineState, PipelineStateContext, PipelineStateFactory, PipelineStateRequest,
};

/// Cache key: drawable hash plus resource identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineStateKey {
    drawable_hash: u32,
    geometry: usize,
    material: usize,
    pass: usize,
}

impl PipelineStateKey {
    pub fn new(
        drawable_hash: u32,
        geometry: &Arc<Geometry>,
        material: &Arc<Material>,
        pass: &Arc<Pass>,
    ) -> Self {
        Self {
            drawable_hash,
            geometry: Arc::as_ptr(geometry) as usize,
            material: Arc::as_ptr(material) as usize,
            pass: Arc::as_ptr(pass) as usize,
        }
    }
}

struct CacheEntry {
    // Weak references keep the key addresses reserved without keeping the
    // resources alive
    geometry: Weak<Geometry>,
    material: Weak<Material>,
    pass: Weak<Pass>,
    geometry_hash: u32,
    material_hash: u32,
    pass_hash: u32,
    state: Arc<dyn PipelineState>,
    invalidated: bool,
    /// Last frame the entry was looked up or built
    last_used_frame: AtomicU32,
}

impl CacheEntry {
    fn is_alive(&self) -> bool {
        self.geometry.strong_count() > 0
            && self.material.strong_count() > 0
            && self.pass.strong_count() > 0
    }

    fn is_current(&self) -> bool {
        if self.invalidated {
            return false;
        }
        let (Some(geometry), Some(material), Some(pass)) =
            (self.geometry.upgrade(), self.material.upgrade(), self.pass.upgrade())
        else {
            return false;
        };
        geometry.pipeline_state_hash() == self.geometry_hash
            && material.pipeline_state_hash() == self.material_hash
            && pass.pipeline_state_hash() == self.pass_hash
    }
}

/// Pipeline states of one scene pass (unlit or lit batches).
#[derive(Default)]
pub struct PipelineStateCache {
    entries: FxHashMap<PipelineStateKey, CacheEntry>,
    frame_number: u32,
}

impl PipelineStateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the frame recorded on entries used from now on.
    pub fn begin_frame(&mut self, frame_number: u32) {
        self.frame_number = frame_number;
    }

    /// Cached state for `key`, if present and still current.
    pub fn lookup(&self, key: &PipelineStateKey) -> Option<Arc<dyn PipelineState>> {
        let entry = self.entries.get(key).filter(|entry| entry.is_current())?;
        entry.last_used_frame.store(self.frame_number, Ordering::Relaxed);
        Some(Arc::clone(&entry.state))
    }

    /// Cached state for the request, building and storing it when missing,
    /// stale or invalidated.
    pub fn get_or_create(
        &mut self,
        request: &PipelineStateRequest<'_>,
        context: &PipelineStateContext<'_>,
        factory: &dyn PipelineStateFactory,
    ) -> Result<Arc<dyn PipelineState>> {
        let key = request.key();
        if let Some(state) = self.lookup(&key) {
            return Ok(state);
        }

        let geometry_hash = request.geometry.pipeline_state_hash();
        let material_hash = request.material.pipeline_state_hash();
        let pass_hash = request.pass.pipeline_state_hash();

        let state = factory.create_pipeline_state(
            context,
            request.drawable,
            request.geometry,
            request.material,
            request.pass,
        )?;

        self.entries.insert(key, CacheEntry {
            geometry: Arc::downgrade(request.geometry),
            material: Arc::downgrade(request.material),
            pass: Arc::downgrade(request.pass),
            geometry_hash,
            material_hash,
            pass_hash,
            state: Arc::clone(&state),
            invalidated: false,
            last_used_frame: AtomicU32::new(self.frame_number),
        });

        Ok(state)
    }

    /// Force every entry to be rebuilt on next use (device or shader reset).
    pub fn invalidate_all(&mut self) {
        for entry in self.entries.values_mut() {
            entry.invalidated = true;
        }
    }

    /// Drop entries whose resources are gone or that went unused for more
    /// than `retention_frames` frames. Returns the number of evicted entries.
    pub fn evict_stale(&mut self, retention_frames: u32) -> usize {
        let frame_number = self.frame_number;
        let before = self.entries.len();
        self.entries.retain(|_, entry| {
            entry.is_alive()
                && frame_number.wrapping_sub(entry.last_used_frame.load(Ordering::Relaxed)) <= retention_frames
        });
        let evicted = before - self.entries.len();

        if evicted > 0 {
            crate::engine_trace!("galaxy3d::PipelineStateCache",
                "Evicted {} stale pipeline states, {} remaining", evicted, self.entries.len());
        }
        evicted
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "pipeline_state_cache_tests.rs"]
mod tests;

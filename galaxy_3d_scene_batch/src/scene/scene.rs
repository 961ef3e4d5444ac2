/// Scene: arena owning the drawables of one world.
///
/// Drawables are addressed by a dense `DrawableIndex` allocated by a
/// `SlotAllocator`. Indices stay valid until their drawable is removed, and
/// per-frame tables of the batch collector are sized by
/// `drawable_count()` (the index high-water mark).
///
/// The spatial index is owned by the caller. Additions, removals and bound
/// changes are recorded and applied in one go by `sync_scene_index`, before
/// the frame's batch collection starts.

use std::sync::Arc;
use rustc_hash::FxHashSet;
use crate::error::Result;
use crate::engine_bail;
use crate::utils::SlotAllocator;
use super::drawable::{Drawable, DrawableIndex};
use super::scene_index::SceneIndex;

/// Drawable arena with deferred spatial index synchronization.
#[derive(Default)]
pub struct Scene {
    /// Indexed by `DrawableIndex`; `None` for free slots
    drawables: Vec<Option<Arc<dyn Drawable>>>,
    index_allocator: SlotAllocator,
    /// Drawables added since the last sync
    new_drawables: FxHashSet<DrawableIndex>,
    /// Drawables whose bounds changed since the last sync
    dirty_bounds: FxHashSet<DrawableIndex>,
    /// Drawables marked for deferred removal
    removed_drawables: FxHashSet<DrawableIndex>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an index, build the drawable for it and add it to the scene.
    ///
    /// The builder receives the allocated index and must return a drawable
    /// reporting that same index.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let light = scene.add_drawable(|index| Light::new(index, LightDesc::default()))?;
    /// ```
    pub fn add_drawable<D, F>(&mut self, build: F) -> Result<Arc<D>>
    where
        D: Drawable + 'static,
        F: FnOnce(DrawableIndex) -> D,
    {
        let index = DrawableIndex(self.index_allocator.alloc());
        let drawable = Arc::new(build(index));

        if drawable.index() != index {
            self.index_allocator.free(index.0);
            engine_bail!("galaxy3d::Scene",
                "Drawable built for index {} reports index {}", index.0, drawable.index().0);
        }

        if self.drawables.len() <= index.index() {
            self.drawables.resize_with(index.index() + 1, || None);
        }
        let shared: Arc<dyn Drawable> = drawable.clone();
        self.drawables[index.index()] = Some(shared);
        self.new_drawables.insert(index);

        Ok(drawable)
    }

    /// Mark a drawable for deferred removal.
    ///
    /// The drawable leaves `drawables()` immediately; its index is recycled
    /// after the next `sync_scene_index`.
    pub fn remove_drawable(&mut self, index: DrawableIndex) -> Result<()> {
        if self.drawable(index).is_none() {
            engine_bail!("galaxy3d::Scene", "Drawable {} not found", index.0);
        }

        self.removed_drawables.insert(index);
        self.new_drawables.remove(&index);
        self.dirty_bounds.remove(&index);
        Ok(())
    }

    /// Record that a drawable's world bounding box changed.
    pub fn mark_bounds_dirty(&mut self, index: DrawableIndex) -> Result<()> {
        if self.drawable(index).is_none() {
            engine_bail!("galaxy3d::Scene", "Drawable {} not found", index.0);
        }

        if !self.new_drawables.contains(&index) {
            self.dirty_bounds.insert(index);
        }
        Ok(())
    }

    /// Live drawable at `index` (`None` if free or pending removal).
    pub fn drawable(&self, index: DrawableIndex) -> Option<&Arc<dyn Drawable>> {
        if self.removed_drawables.contains(&index) {
            return None;
        }
        self.drawables.get(index.index())?.as_ref()
    }

    /// All live drawables, in index order.
    pub fn drawables(&self) -> Vec<Arc<dyn Drawable>> {
        self.drawables.iter()
            .flatten()
            .filter(|d| !self.removed_drawables.contains(&d.index()))
            .cloned()
            .collect()
    }

    /// Index high-water mark: every index in use is below this value.
    pub fn drawable_count(&self) -> u32 {
        self.index_allocator.high_water_mark()
    }

    /// Number of live drawables
    pub fn len(&self) -> usize {
        self.index_allocator.len() as usize - self.removed_drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply pending additions, removals and bound changes to a spatial index.
    ///
    /// Removed indices are released for reuse even without a spatial index.
    pub fn sync_scene_index(&mut self, mut scene_index: Option<&mut dyn SceneIndex>) {
        // Phase 0: removals, clean the index then free the slots
        for index in std::mem::take(&mut self.removed_drawables) {
            if let Some(idx) = scene_index.as_deref_mut() {
                idx.remove(index);
            }
            if let Some(slot) = self.drawables.get_mut(index.index()) {
                *slot = None;
            }
            self.index_allocator.free(index.0);
        }

        // Phase 1: new drawables
        for index in std::mem::take(&mut self.new_drawables) {
            if let (Some(idx), Some(drawable)) = (scene_index.as_deref_mut(), self.drawable(index)) {
                idx.insert(Arc::clone(drawable));
            }
        }

        // Phase 2: moved drawables
        for index in std::mem::take(&mut self.dirty_bounds) {
            if let (Some(idx), Some(drawable)) = (scene_index.as_deref_mut(), self.drawable(index)) {
                idx.update(Arc::clone(drawable));
            }
        }
    }

    /// Drop every drawable and reset index allocation.
    ///
    /// The caller is responsible for clearing its spatial index.
    pub fn clear(&mut self) {
        self.drawables.clear();
        self.index_allocator = SlotAllocator::new();
        self.new_drawables.clear();
        self.dirty_bounds.clear();
        self.removed_drawables.clear();
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;

/// Technique selection for one source batch.

use std::sync::Arc;
use crate::camera::{Camera, ViewOverrideFlags};
use crate::resource::{Material, MaterialQuality, Technique};
use crate::scene::Drawable;

/// Material quality in effect for `camera`.
pub fn active_material_quality(configured: MaterialQuality, camera: &Camera) -> MaterialQuality {
    if camera.view_override_flags().contains(ViewOverrideFlags::LOW_MATERIAL_QUALITY) {
        MaterialQuality::Low
    } else {
        configured
    }
}

/// Pick the technique `drawable` is drawn with.
///
/// A single entry is used unconditionally. Otherwise entries are scanned in
/// declaration order and the first usable one whose LOD distance is within
/// the drawable's LOD distance wins. Entries without a technique, with an
/// unsupported technique or above `quality` are never picked by the scan.
/// When nothing matches, the last entry is used.
pub fn find_technique(
    drawable: &dyn Drawable,
    material: &Material,
    quality: MaterialQuality,
) -> Option<Arc<Technique>> {
    let entries = material.techniques();
    if let [only] = entries {
        return only.technique.clone();
    }

    let lod_distance = drawable.lod_distance();
    entries
        .iter()
        .filter(|entry| entry.quality_level <= quality)
        .filter_map(|entry| {
            let technique = entry.technique.as_ref()?;
            (technique.is_supported() && entry.lod_distance <= lod_distance).then_some(technique)
        })
        .next()
        .or_else(|| entries.last()?.technique.as_ref())
        .cloned()
}

#[cfg(test)]
#[path = "technique_resolver_tests.rs"]
mod tests;

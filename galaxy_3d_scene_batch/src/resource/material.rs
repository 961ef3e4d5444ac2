/// Resource-level material type.
///
/// A Material is a pure data description of how a surface is drawn: an
/// ordered list of technique entries, each gated by a quality level and a
/// LOD distance. The batch collector picks one entry per source batch.
///
/// No GPU resources are created at this level.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use crate::error::Result;
use crate::engine_bail;
use crate::resource::technique::Technique;

// ===== MATERIAL QUALITY =====

/// Material quality level. Ordered: `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum MaterialQuality {
    Low,
    Medium,
    #[default]
    High,
}

// ===== TECHNIQUE ENTRY =====

/// One candidate technique of a material.
#[derive(Debug, Clone)]
pub struct TechniqueEntry {
    /// `None` entries are kept (declaration order matters) but never selected
    pub technique: Option<Arc<Technique>>,
    /// Highest material quality this entry requires
    pub quality_level: MaterialQuality,
    /// Minimum LOD distance at which this entry applies
    pub lod_distance: f32,
}

impl TechniqueEntry {
    pub fn new(technique: Arc<Technique>, quality_level: MaterialQuality, lod_distance: f32) -> Self {
        Self {
            technique: Some(technique),
            quality_level,
            lod_distance,
        }
    }
}

// ===== MATERIAL =====

/// Material resource: technique candidates plus a pipeline state hash
#[derive(Debug)]
pub struct Material {
    name: String,
    techniques: Vec<TechniqueEntry>,
    pipeline_state_hash: AtomicU32,
}

// ===== DESCRIPTORS =====

/// Material creation descriptor
pub struct MaterialDesc {
    pub name: String,
    /// Candidates in priority order
    pub techniques: Vec<TechniqueEntry>,
    /// Hash of shader defines and render states contributed by the material
    pub pipeline_state_hash: u32,
}

// ===== MATERIAL IMPLEMENTATION =====

impl Material {
    /// Create material from descriptor
    pub fn from_desc(desc: MaterialDesc) -> Result<Self> {
        // ========== VALIDATION: LOD distances must be usable ==========
        for (i, entry) in desc.techniques.iter().enumerate() {
            if !entry.lod_distance.is_finite() || entry.lod_distance < 0.0 {
                engine_bail!("galaxy3d::Material",
                    "Material '{}': technique entry {} has invalid LOD distance {}",
                    desc.name, i, entry.lod_distance);
            }
        }

        Ok(Self {
            name: desc.name,
            techniques: desc.techniques,
            pipeline_state_hash: AtomicU32::new(desc.pipeline_state_hash),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Technique entries in declaration order
    pub fn techniques(&self) -> &[TechniqueEntry] {
        &self.techniques
    }

    pub fn pipeline_state_hash(&self) -> u32 {
        self.pipeline_state_hash.load(Ordering::Acquire)
    }

    /// Replace the pipeline state hash (defines or render states edited).
    pub fn set_pipeline_state_hash(&self, hash: u32) {
        self.pipeline_state_hash.store(hash, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;

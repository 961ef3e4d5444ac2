//! Resource-level geometry type.
//!
//! Batch collection never reads vertex data. A `Geometry` only carries
//! its identity (shared through `Arc`) and the content hash of the
//! vertex layout / topology, which feeds pipeline state caching.

use std::sync::atomic::{AtomicU32, Ordering};
use crate::error::Result;
use crate::engine_bail;

/// Geometry creation descriptor
pub struct GeometryDesc {
    pub name: String,
    pub vertex_count: u32,
    pub index_count: u32,
    /// Hash of the vertex layout and primitive topology
    pub pipeline_state_hash: u32,
}

/// Geometry resource shared by source batches.
#[derive(Debug)]
pub struct Geometry {
    name: String,
    vertex_count: u32,
    index_count: u32,
    pipeline_state_hash: AtomicU32,
}

impl Geometry {
    /// Create geometry from descriptor.
    pub fn from_desc(desc: GeometryDesc) -> Result<Self> {
        if desc.vertex_count == 0 {
            engine_bail!("galaxy3d::Geometry",
                "Geometry '{}' has no vertices", desc.name);
        }

        Ok(Self {
            name: desc.name,
            vertex_count: desc.vertex_count,
            index_count: desc.index_count,
            pipeline_state_hash: AtomicU32::new(desc.pipeline_state_hash),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Number of indices (0 if non-indexed)
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn is_indexed(&self) -> bool {
        self.index_count > 0
    }

    /// Current pipeline state hash.
    pub fn pipeline_state_hash(&self) -> u32 {
        self.pipeline_state_hash.load(Ordering::Acquire)
    }

    /// Replace the pipeline state hash (vertex layout changed).
    ///
    /// Cached pipeline states built from the previous hash become stale
    /// and are rebuilt on the next batch assembly.
    pub fn set_pipeline_state_hash(&self, hash: u32) {
        self.pipeline_state_hash.store(hash, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;

/// Resource-level technique type with named rendering passes.
///
/// A Technique groups the passes a material can be drawn with
/// (e.g. "base", "litbase", "light"). Pass names are mapped to dense
/// `PassIndex` values by a shared `PassRegistry`, and each technique stores
/// its passes in a vector indexed by `PassIndex` so that lookups during
/// batch collection are O(1).

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, RwLock};
use rustc_hash::{FxHashMap, FxHashSet};
use crate::error::Result;
use crate::engine_bail;

// ===== PASS INDEX =====

/// Dense identifier of a pass name, assigned by `PassRegistry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PassIndex(pub u32);

impl PassIndex {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ===== PASS REGISTRY =====

/// Maps pass names to `PassIndex` values.
///
/// Shared (via `Arc`) between technique creation and the batch collector so
/// both resolve the same name to the same index. Registration happens on
/// first use and is never undone.
#[derive(Default)]
pub struct PassRegistry {
    indices: RwLock<FxHashMap<String, PassIndex>>,
}

impl PassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `name`, registering it if unknown.
    pub fn pass_index(&self, name: &str) -> PassIndex {
        if let Some(index) = self.find(name) {
            return index;
        }

        let mut indices = match self.indices.write() {
            Ok(lock) => lock,
            Err(poisoned) => poisoned.into_inner(),
        };
        let next = PassIndex(indices.len() as u32);
        *indices.entry(name.to_string()).or_insert(next)
    }

    /// Index of `name` if already registered.
    pub fn find(&self, name: &str) -> Option<PassIndex> {
        let indices = match self.indices.read() {
            Ok(lock) => lock,
            Err(poisoned) => poisoned.into_inner(),
        };
        indices.get(name).copied()
    }

    /// Number of registered pass names
    pub fn len(&self) -> usize {
        match self.indices.read() {
            Ok(lock) => lock.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ===== PASS =====

/// A single rendering pass of a technique.
#[derive(Debug)]
pub struct Pass {
    name: String,
    index: PassIndex,
    pipeline_state_hash: AtomicU32,
}

impl Pass {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> PassIndex {
        self.index
    }

    /// Hash of shaders, defines and render states of this pass.
    pub fn pipeline_state_hash(&self) -> u32 {
        self.pipeline_state_hash.load(Ordering::Acquire)
    }

    /// Replace the pipeline state hash (shader reloaded, render state edited).
    pub fn set_pipeline_state_hash(&self, hash: u32) {
        self.pipeline_state_hash.store(hash, Ordering::Release);
    }
}

// ===== TECHNIQUE =====

/// Technique resource: a set of passes addressed by `PassIndex`.
#[derive(Debug)]
pub struct Technique {
    name: String,
    supported: bool,
    /// Indexed by `PassIndex`; `None` where the technique lacks the pass
    passes: Vec<Option<Arc<Pass>>>,
}

// ===== DESCRIPTORS =====

/// Technique creation descriptor
pub struct TechniqueDesc {
    pub name: String,
    /// `false` when the technique needs hardware features that are missing
    pub supported: bool,
    pub passes: Vec<PassDesc>,
}

/// Pass descriptor
pub struct PassDesc {
    pub name: String,
    pub pipeline_state_hash: u32,
}

// ===== TECHNIQUE IMPLEMENTATION =====

impl Technique {
    /// Create technique from descriptor, registering its pass names.
    pub fn from_desc(desc: TechniqueDesc, registry: &PassRegistry) -> Result<Self> {
        // ========== VALIDATION: No duplicate pass names ==========
        let mut seen_names = FxHashSet::default();
        for pass_desc in &desc.passes {
            if pass_desc.name.is_empty() {
                engine_bail!("galaxy3d::Technique",
                    "Technique '{}' has a pass without a name", desc.name);
            }
            if !seen_names.insert(pass_desc.name.as_str()) {
                engine_bail!("galaxy3d::Technique",
                    "Technique '{}': duplicate pass name '{}'", desc.name, pass_desc.name);
            }
        }

        // ========== RESOLVE PASS INDICES ==========
        let mut passes: Vec<Option<Arc<Pass>>> = Vec::new();
        for pass_desc in desc.passes {
            let index = registry.pass_index(&pass_desc.name);
            if passes.len() <= index.index() {
                passes.resize(index.index() + 1, None);
            }
            passes[index.index()] = Some(Arc::new(Pass {
                name: pass_desc.name,
                index,
                pipeline_state_hash: AtomicU32::new(pass_desc.pipeline_state_hash),
            }));
        }

        Ok(Self {
            name: desc.name,
            supported: desc.supported,
            passes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_supported(&self) -> bool {
        self.supported
    }

    /// Pass registered under `index`, if this technique has it.
    pub fn pass(&self, index: PassIndex) -> Option<&Arc<Pass>> {
        self.passes.get(index.index())?.as_ref()
    }

    pub fn has_pass(&self, index: PassIndex) -> bool {
        self.pass(index).is_some()
    }

    /// Iterate over the passes this technique defines (in index order).
    pub fn passes(&self) -> impl Iterator<Item = &Arc<Pass>> {
        self.passes.iter().flatten()
    }
}

#[cfg(test)]
#[path = "technique_tests.rs"]
mod tests;

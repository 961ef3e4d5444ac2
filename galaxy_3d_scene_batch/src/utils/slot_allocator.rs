/// Allocates and recycles dense `u32` indices.
///
/// Used by the scene arena to hand out drawable indices. Per-frame tables
/// are sized by the high-water mark, so freed indices are recycled
/// lowest-first to keep the tables as small as possible.
///
/// # Example
///
/// ```ignore
/// let mut alloc = SlotAllocator::new();
/// let a = alloc.alloc();  // 0
/// let b = alloc.alloc();  // 1
/// let c = alloc.alloc();  // 2
/// alloc.free(c);
/// alloc.free(a);
/// let d = alloc.alloc();  // 0 (lowest free slot)
/// ```

use std::cmp::Reverse;
use std::collections::BinaryHeap;

pub struct SlotAllocator {
    free_slots: BinaryHeap<Reverse<u32>>,
    allocated: Vec<bool>,
    len: u32,
}

impl SlotAllocator {
    /// Create a new empty allocator
    pub fn new() -> Self {
        Self {
            free_slots: BinaryHeap::new(),
            allocated: Vec::new(),
            len: 0,
        }
    }

    /// Allocate the lowest available slot index
    pub fn alloc(&mut self) -> u32 {
        let id = match self.free_slots.pop() {
            Some(Reverse(id)) => id,
            None => {
                self.allocated.push(false);
                (self.allocated.len() - 1) as u32
            }
        };
        self.allocated[id as usize] = true;
        self.len += 1;
        id
    }

    /// Return a slot index to the pool for reuse.
    ///
    /// Returns `false` (and changes nothing) if the slot is not allocated.
    pub fn free(&mut self, id: u32) -> bool {
        match self.allocated.get_mut(id as usize) {
            Some(slot) if *slot => {
                *slot = false;
                self.len -= 1;
                self.free_slots.push(Reverse(id));
                true
            }
            _ => false,
        }
    }

    /// Whether `id` is currently allocated
    pub fn is_allocated(&self, id: u32) -> bool {
        self.allocated.get(id as usize).copied().unwrap_or(false)
    }

    /// Highest index ever allocated + 1.
    ///
    /// This is the minimum capacity the backing storage must have
    /// to accommodate all allocated indices.
    pub fn high_water_mark(&self) -> u32 {
        self.allocated.len() as u32
    }

    /// Number of currently allocated slots
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Whether no slots are currently allocated
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for SlotAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "slot_allocator_tests.rs"]
mod tests;

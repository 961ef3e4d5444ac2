/// OctreeSceneIndex: static octree spatial index for volume queries.
///
/// Uses **Approach 1** (single-node placement): each object is stored in
/// exactly one node: the deepest node whose AABB fully contains the object.
/// If the object straddles a child boundary, it stays in the parent.
///
/// Benefits:
/// - No duplication → no HashSet needed for query results
/// - Simple insert/remove/query logic
/// - O(depth) insert and remove per object
///
/// The tree structure is pre-allocated at construction time (static octree)
/// with a fixed `max_depth`. All 8^d nodes exist regardless of occupancy.

use std::sync::Arc;
use rustc_hash::FxHashMap;
use glam::Vec3;
use crate::camera::{Frustum, FrustumTest};
use super::bounds::{AABB, Sphere};
use super::drawable::{Drawable, DrawableFlags, DrawableIndex};
use super::scene_index::SceneIndex;

/// Index of the root node in the flat node array.
const ROOT: usize = 0;

/// A single node in the octree.
struct OctreeNode {
    /// World-space AABB of this node
    aabb: AABB,
    /// Index of the first child in the flat array (0 = no children / leaf)
    first_child: usize,
    /// Objects stored in this node (Approach 1: objects that don't fit in any child)
    objects: Vec<DrawableIndex>,
}

/// Placement of one indexed drawable.
struct IndexedObject {
    node: usize,
    world_aabb: AABB,
    flags: DrawableFlags,
    drawable: Arc<dyn Drawable>,
}

/// Static octree spatial index.
///
/// Constructed with a world-space AABB and a maximum depth.
/// All nodes are pre-allocated. Objects are inserted into the deepest
/// node that fully contains their world AABB.
pub struct OctreeSceneIndex {
    /// Flat array of all octree nodes (pre-allocated)
    nodes: Vec<OctreeNode>,
    /// Maximum depth of the tree (root = depth 0)
    max_depth: u32,
    /// Reverse lookup: drawable index → placement and cached bounds.
    /// Needed for O(1) remove without tree traversal.
    object_locations: FxHashMap<DrawableIndex, IndexedObject>,
    /// Pre-computed subtree sizes indexed by remaining depth.
    /// subtree_sizes[d] = total node count for a subtree of depth d.
    subtree_sizes: Vec<usize>,
}

impl OctreeSceneIndex {
    /// Create a new static octree with the given world bounds and depth.
    ///
    /// # Arguments
    ///
    /// * `world_aabb` - The world-space AABB encompassing the entire scene
    /// * `max_depth` - Maximum tree depth (root = 0). Total nodes = (8^(d+1) - 1) / 7.
    ///   Typical values: 4–6 for most scenes.
    pub fn new(world_aabb: AABB, max_depth: u32) -> Self {
        // Pre-compute total node count: sum of 8^i for i=0..=max_depth
        let total_nodes = Self::total_node_count(max_depth);
        let mut nodes = Vec::with_capacity(total_nodes);

        // Build the tree level by level
        Self::build_recursive(&mut nodes, &world_aabb, 0, max_depth);

        debug_assert_eq!(nodes.len(), total_nodes);

        let subtree_sizes: Vec<usize> = (0..=max_depth).map(Self::total_node_count).collect();

        Self {
            nodes,
            max_depth,
            object_locations: FxHashMap::default(),
            subtree_sizes,
        }
    }

    /// Total number of nodes for a given depth: (8^(d+1) - 1) / 7
    fn total_node_count(max_depth: u32) -> usize {
        let mut count = 0usize;
        let mut level_count = 1usize;
        for _ in 0..=max_depth {
            count += level_count;
            level_count *= 8;
        }
        count
    }

    /// Recursively build the static octree node array (depth-first).
    fn build_recursive(
        nodes: &mut Vec<OctreeNode>,
        aabb: &AABB,
        depth: u32,
        max_depth: u32,
    ) {
        let node_index = nodes.len();

        if depth >= max_depth {
            // Leaf node: no children
            nodes.push(OctreeNode {
                aabb: *aabb,
                first_child: 0,
                objects: Vec::new(),
            });
            return;
        }

        // Internal node: reserve slot, then build 8 children
        nodes.push(OctreeNode {
            aabb: *aabb,
            first_child: 0, // will be filled below
            objects: Vec::new(),
        });

        let center = (*aabb).center();
        let first_child = nodes.len();
        nodes[node_index].first_child = first_child;

        // 8 children: enumerate all octants
        for octant in 0..8u8 {
            let child_aabb = Self::octant_aabb(aabb, &center, octant);
            Self::build_recursive(nodes, &child_aabb, depth + 1, max_depth);
        }
    }

    /// Compute the AABB of a specific octant (0–7).
    ///
    /// Octant bit layout: bit0 = X, bit1 = Y, bit2 = Z.
    /// - 0 = low, 1 = high for each axis.
    fn octant_aabb(parent: &AABB, center: &Vec3, octant: u8) -> AABB {
        AABB {
            min: Vec3::new(
                if octant & 1 == 0 { parent.min.x } else { center.x },
                if octant & 2 == 0 { parent.min.y } else { center.y },
                if octant & 4 == 0 { parent.min.z } else { center.z },
            ),
            max: Vec3::new(
                if octant & 1 == 0 { center.x } else { parent.max.x },
                if octant & 2 == 0 { center.y } else { parent.max.y },
                if octant & 4 == 0 { center.z } else { parent.max.z },
            ),
        }
    }

    /// Determine which octant a point falls into relative to a center.
    ///
    /// Bit layout: bit0 = X, bit1 = Y, bit2 = Z (0 = low, 1 = high).
    fn point_octant(center: &Vec3, point: &Vec3) -> u8 {
        ((point.x >= center.x) as u8)
            | (((point.y >= center.y) as u8) << 1)
            | (((point.z >= center.z) as u8) << 2)
    }

    /// Find the deepest node that fully contains an AABB.
    ///
    /// Uses direct octant calculation instead of testing all 8 children:
    /// if both AABB corners (min, max) fall into the same octant, the object
    /// fits entirely in that child. Otherwise it straddles a boundary
    /// and stays in the current node.
    fn find_target_node(&self, world_aabb: &AABB) -> usize {
        let mut node_idx = ROOT;
        let mut depth = 0;

        loop {
            if depth >= self.max_depth {
                return node_idx;
            }

            let first_child = self.nodes[node_idx].first_child;
            if first_child == 0 {
                return node_idx;
            }

            let center = self.nodes[node_idx].aabb.center();
            let min_oct = Self::point_octant(&center, &world_aabb.min);
            let max_oct = Self::point_octant(&center, &world_aabb.max);

            if min_oct != max_oct {
                return node_idx;
            }

            node_idx = first_child + self.subtree_offset(min_oct, self.max_depth - depth - 1);
            depth += 1;
        }
    }

    /// Compute the offset of octant `i` in the depth-first node layout.
    ///
    /// Uses pre-computed subtree sizes for O(1) lookup.
    fn subtree_offset(&self, octant: u8, remaining_depth: u32) -> usize {
        octant as usize * self.subtree_sizes[remaining_depth as usize]
    }

    /// Recursively query the octree with a volume.
    ///
    /// 3-way classification at each node:
    /// - `Outside` → skip entire subtree
    /// - `Inside` → collect all objects from subtree without further testing
    /// - `Partial` → test objects individually, recurse into children
    fn query_recursive<V: QueryVolume>(
        &self,
        node_idx: usize,
        volume: &V,
        flags: DrawableFlags,
        classification: FrustumTest,
        results: &mut Vec<Arc<dyn Drawable>>,
        depth: u32,
    ) {
        let node = &self.nodes[node_idx];

        match classification {
            FrustumTest::Outside => {}

            FrustumTest::Inside => self.collect_all(node_idx, flags, results, depth),

            FrustumTest::Partial => {
                for key in &node.objects {
                    if let Some(object) = self.object_locations.get(key) {
                        if object.flags.intersects(flags) && volume.intersects(&object.world_aabb) {
                            results.push(Arc::clone(&object.drawable));
                        }
                    }
                }

                for child_idx in self.children(node_idx, depth) {
                    let child_class = volume.classify(&self.nodes[child_idx].aabb);
                    self.query_recursive(child_idx, volume, flags, child_class, results, depth + 1);
                }
            }
        }
    }

    /// Collect all objects of the requested classes from a subtree (no volume test).
    ///
    /// Used when the parent node's AABB is fully inside the volume.
    fn collect_all(
        &self,
        node_idx: usize,
        flags: DrawableFlags,
        results: &mut Vec<Arc<dyn Drawable>>,
        depth: u32,
    ) {
        for key in &self.nodes[node_idx].objects {
            if let Some(object) = self.object_locations.get(key) {
                if object.flags.intersects(flags) {
                    results.push(Arc::clone(&object.drawable));
                }
            }
        }

        for child_idx in self.children(node_idx, depth) {
            self.collect_all(child_idx, flags, results, depth + 1);
        }
    }

    /// Flat indices of the 8 children of a node (empty for leaves).
    fn children(&self, node_idx: usize, depth: u32) -> impl Iterator<Item = usize> + '_ {
        let first_child = self.nodes[node_idx].first_child;
        let has_children = depth < self.max_depth && first_child != 0;
        let remaining = if has_children { self.max_depth - depth - 1 } else { 0 };

        (0..8u8)
            .filter(move |_| has_children)
            .map(move |octant| first_child + self.subtree_offset(octant, remaining))
    }

    fn query<V: QueryVolume>(&self, volume: &V, flags: DrawableFlags, results: &mut Vec<Arc<dyn Drawable>>) {
        if self.nodes.is_empty() || flags.is_empty() {
            return;
        }

        // Objects stored at the root may lie outside the root bounds,
        // so they are always tested individually
        let root_class = match volume.classify(&self.nodes[ROOT].aabb) {
            _ if !self.nodes[ROOT].objects.is_empty() => FrustumTest::Partial,
            class => class,
        };
        self.query_recursive(ROOT, volume, flags, root_class, results, 0);
    }

    fn place(&mut self, drawable: Arc<dyn Drawable>, node: usize, world_aabb: AABB) {
        let key = drawable.index();
        self.nodes[node].objects.push(key);
        self.object_locations.insert(key, IndexedObject {
            node,
            world_aabb,
            flags: drawable.flags(),
            drawable,
        });
    }
}

// ===== QUERY VOLUMES =====

/// Volume the octree can be queried with.
trait QueryVolume {
    fn classify(&self, aabb: &AABB) -> FrustumTest;
    fn intersects(&self, aabb: &AABB) -> bool;
}

impl QueryVolume for Frustum {
    fn classify(&self, aabb: &AABB) -> FrustumTest {
        self.classify_aabb(aabb)
    }

    fn intersects(&self, aabb: &AABB) -> bool {
        self.intersects_aabb(aabb)
    }
}

impl QueryVolume for Sphere {
    fn classify(&self, aabb: &AABB) -> FrustumTest {
        self.classify_aabb(aabb)
    }

    fn intersects(&self, aabb: &AABB) -> bool {
        self.intersects_aabb(aabb)
    }
}

// ===== SCENE INDEX TRAIT =====

impl SceneIndex for OctreeSceneIndex {
    fn insert(&mut self, drawable: Arc<dyn Drawable>) {
        let key = drawable.index();
        if self.object_locations.contains_key(&key) {
            self.remove(key);
        }

        let world_aabb = drawable.world_bounding_box();

        // Objects outside the octree bounds are stored at the root
        let node = if self.nodes[ROOT].aabb.contains(&world_aabb) {
            self.find_target_node(&world_aabb)
        } else {
            ROOT
        };
        self.place(drawable, node, world_aabb);
    }

    fn remove(&mut self, index: DrawableIndex) {
        if let Some(object) = self.object_locations.remove(&index) {
            let objects = &mut self.nodes[object.node].objects;
            if let Some(pos) = objects.iter().position(|&k| k == index) {
                objects.swap_remove(pos);
            }
        }
    }

    fn update(&mut self, drawable: Arc<dyn Drawable>) {
        let key = drawable.index();
        let world_aabb = drawable.world_bounding_box();
        let target = if self.nodes[ROOT].aabb.contains(&world_aabb) {
            self.find_target_node(&world_aabb)
        } else {
            ROOT
        };

        if let Some(object) = self.object_locations.get_mut(&key) {
            if object.node == target {
                // Same node: refresh the cached bounds in place
                object.world_aabb = world_aabb;
                object.flags = drawable.flags();
                object.drawable = drawable;
                return;
            }
        }

        // Different node (or unknown drawable): remove from old, place in target
        self.remove(key);
        self.place(drawable, target, world_aabb);
    }

    fn query_frustum(
        &self,
        frustum: &Frustum,
        flags: DrawableFlags,
        results: &mut Vec<Arc<dyn Drawable>>,
    ) {
        self.query(frustum, flags, results);
    }

    fn query_sphere(
        &self,
        sphere: &Sphere,
        flags: DrawableFlags,
        results: &mut Vec<Arc<dyn Drawable>>,
    ) {
        self.query(sphere, flags, results);
    }

    fn clear(&mut self) {
        for node in &mut self.nodes {
            node.objects.clear();
        }
        self.object_locations.clear();
    }

    fn len(&self) -> usize {
        self.object_locations.len()
    }
}

#[cfg(test)]
#[path = "octree_scene_index_tests.rs"]
mod tests;

//! Scene module
//!
//! Drawables (static models and lights), the scene arena owning them, and
//! spatial indexing used by light queries.

mod bounds;
mod drawable;
mod light;
mod static_model;
mod scene;
mod scene_index;
mod octree_scene_index;

pub use bounds::{AABB, Sphere};
pub use drawable::{Drawable, DrawableFlags, DrawableIndex, SourceBatch};
pub use light::{Light, LightDesc, LightImportance, LightType};
pub use static_model::{StaticModel, StaticModelDesc};
pub use scene::Scene;
pub use scene_index::SceneIndex;
pub use octree_scene_index::OctreeSceneIndex;

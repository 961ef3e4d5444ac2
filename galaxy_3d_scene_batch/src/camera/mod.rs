//! Camera module: culling camera and frustum.
//!
//! Provides passive data containers read by batch collection.
//! The collector does NOT own cameras; they are owned and driven by the caller.

mod camera;
mod frustum;

pub use camera::{Camera, ViewOverrideFlags};
pub use frustum::{
    Frustum, FrustumTest,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};

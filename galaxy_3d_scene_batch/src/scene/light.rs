/// Light: a drawable that illuminates geometry.
///
/// Lights are indexed by the scene like any other drawable (class
/// `DrawableFlags::LIGHT`). The collector queries the volume of each visible
/// light to find the geometries it affects, then ranks lights per geometry.

use std::sync::Arc;
use glam::Vec3;
use crate::camera::Frustum;
use crate::collector::FrameInfo;
use crate::galaxy3d::{EPSILON, LARGE_VALUE};
use super::bounds::{AABB, Sphere};
use super::drawable::{AtomicF32, Drawable, DrawableFlags, DrawableIndex};

/// Near clip distance of spot light frustums.
const SPOT_NEAR_CLIP: f32 = 0.01;

/// Light volume shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightType {
    /// Infinite light affecting every visible geometry (sun, moon)
    Directional,
    /// Omnidirectional light limited by a sphere
    Point,
    /// Cone light limited by a perspective frustum
    Spot,
}

/// How the light competes for per-pixel slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LightImportance {
    /// Ranked by distance and intensity
    #[default]
    Auto,
    /// Always ranked first, always per-pixel when a slot is available
    Important,
    /// Never per-pixel
    NotImportant,
}

/// Light creation descriptor
#[derive(Debug, Clone)]
pub struct LightDesc {
    pub light_type: LightType,
    pub position: Vec3,
    /// Forward direction (Directional and Spot)
    pub direction: Vec3,
    /// Linear RGB color
    pub color: Vec3,
    pub brightness: f32,
    /// Attenuation range (Point and Spot)
    pub range: f32,
    /// Spot cone vertical field of view, in radians
    pub fov: f32,
    pub aspect_ratio: f32,
    pub light_mask: u32,
    pub importance: LightImportance,
    pub draw_distance: f32,
    pub enabled: bool,
}

impl Default for LightDesc {
    fn default() -> Self {
        Self {
            light_type: LightType::Point,
            position: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            color: Vec3::ONE,
            brightness: 1.0,
            range: 10.0,
            fov: std::f32::consts::FRAC_PI_6,
            aspect_ratio: 1.0,
            light_mask: u32::MAX,
            importance: LightImportance::Auto,
            draw_distance: 0.0,
            enabled: true,
        }
    }
}

/// Scene light
#[derive(Debug)]
pub struct Light {
    index: DrawableIndex,
    desc: LightDesc,
    distance: AtomicF32,
}

impl Light {
    /// Create a light at `index` (normally called from `Scene::add_drawable`).
    pub fn new(index: DrawableIndex, desc: LightDesc) -> Self {
        Self {
            index,
            desc,
            distance: AtomicF32::new(0.0),
        }
    }

    // ===== PROPERTIES =====

    pub fn light_type(&self) -> LightType {
        self.desc.light_type
    }

    pub fn position(&self) -> Vec3 {
        self.desc.position
    }

    /// Normalized forward direction
    pub fn direction(&self) -> Vec3 {
        self.desc.direction.try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    pub fn color(&self) -> Vec3 {
        self.desc.color
    }

    pub fn brightness(&self) -> f32 {
        self.desc.brightness
    }

    pub fn range(&self) -> f32 {
        self.desc.range
    }

    pub fn fov(&self) -> f32 {
        self.desc.fov
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.desc.aspect_ratio
    }

    pub fn importance(&self) -> LightImportance {
        self.desc.importance
    }

    pub fn is_enabled(&self) -> bool {
        self.desc.enabled
    }

    // ===== DERIVED VALUES =====

    /// Color scaled by brightness
    pub fn effective_color(&self) -> Vec3 {
        self.desc.color * self.desc.brightness
    }

    /// Light mask, or zero when the light is disabled
    pub fn effective_light_mask(&self) -> u32 {
        if self.desc.enabled { self.desc.light_mask } else { 0 }
    }

    /// Whether the light can't contribute anything this frame
    pub fn is_negligible(&self) -> bool {
        self.effective_color() == Vec3::ZERO || self.effective_light_mask() == 0
    }

    /// Divisor applied to distances when ranking lights (brighter lights rank higher).
    pub fn intensity_divisor(&self) -> f32 {
        self.effective_color().element_sum().max(0.0) + EPSILON
    }

    /// Query volume of a point light
    pub fn sphere(&self) -> Sphere {
        Sphere::new(self.desc.position, self.desc.range)
    }

    /// Query volume of a spot light
    pub fn frustum(&self) -> Frustum {
        Frustum::from_perspective(
            self.desc.position,
            self.direction(),
            self.desc.fov,
            self.desc.aspect_ratio,
            SPOT_NEAR_CLIP,
            self.desc.range.max(SPOT_NEAR_CLIP * 2.0),
        )
    }

    /// Distance from the light to a drawable's bounding box.
    ///
    /// Directional lights are at distance zero from everything.
    pub fn distance_to(&self, drawable: &dyn Drawable) -> f32 {
        match self.desc.light_type {
            LightType::Directional => 0.0,
            LightType::Point | LightType::Spot => {
                drawable.world_bounding_box().distance_to_point(self.desc.position)
            }
        }
    }
}

impl Drawable for Light {
    fn index(&self) -> DrawableIndex {
        self.index
    }

    fn flags(&self) -> DrawableFlags {
        DrawableFlags::LIGHT
    }

    fn world_bounding_box(&self) -> AABB {
        match self.desc.light_type {
            LightType::Directional => AABB::infinite(),
            LightType::Point | LightType::Spot => {
                AABB::from_center_half_size(self.desc.position, Vec3::splat(self.desc.range))
            }
        }
    }

    fn world_position(&self) -> Vec3 {
        self.desc.position
    }

    fn draw_distance(&self) -> f32 {
        self.desc.draw_distance
    }

    fn distance(&self) -> f32 {
        self.distance.load()
    }

    fn light_mask(&self) -> u32 {
        self.desc.light_mask
    }

    fn update_batches(&self, frame: &FrameInfo) {
        let distance = match self.desc.light_type {
            LightType::Directional => 0.0,
            LightType::Point | LightType::Spot => {
                frame.camera.position().distance(self.desc.position).min(LARGE_VALUE)
            }
        };
        self.distance.store(distance);
    }

    fn into_light(self: Arc<Self>) -> Option<Arc<Light>> {
        Some(self)
    }
}

#[cfg(test)]
#[path = "light_tests.rs"]
mod tests;

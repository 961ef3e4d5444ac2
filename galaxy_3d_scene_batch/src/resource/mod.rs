//! Resource module
//!
//! Geometry, material and technique descriptions consumed by batch collection.

pub mod geometry;
pub mod material;
pub mod technique;

pub use geometry::{Geometry, GeometryDesc};
pub use material::{Material, MaterialDesc, MaterialQuality, TechniqueEntry};
pub use technique::{
    Technique, TechniqueDesc,
    Pass, PassDesc, PassIndex, PassRegistry,
};

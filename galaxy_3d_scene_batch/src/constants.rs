/// Numeric constants shared by culling, lighting and batch collection.

/// Magnitude treated as "infinite" (bounding boxes, Z ranges, penalties).
pub const LARGE_VALUE: f32 = 1.0e8;

/// Minimum light-to-geometry distance used when ranking lights.
pub const LARGE_EPSILON: f32 = 5.0e-5;

/// Small bias preventing division by zero.
pub const EPSILON: f32 = 1.0e-6;

/// Capacity of a drawable's light accumulator (per-pixel + per-vertex lights).
pub const MAX_VERTEX_LIGHTS: usize = 4;

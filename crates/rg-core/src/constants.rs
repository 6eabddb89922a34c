//! Global constants for rg-core

/// Multiplier applied to the camera-to-target distance when translating
pub const TRANSLATE_DISTANCE_FACTOR: f32 = 2.0;

/// Degrees per unit of pointer motion per second for the rotate tool
pub const ROTATION_SPEED: f32 = 75.0;

/// Scale units per unit of pointer motion per second for the scale tool
pub const SCALE_SPEED: f32 = 7.5;

/// Smallest local scale an axis handle may leave on the target
pub const MIN_AXIS_SCALE: f32 = 0.01;

/// The uniform handle may not shrink the gizmo below baseline / this value
pub const CENTER_SCALE_FLOOR_DIVISOR: f32 = 25.0;

/// Seconds after a view snap during which directional handles are ignored
pub const SNAP_COOLDOWN_SECS: f64 = 0.5;

/// Degrees per unit of pointer motion per second for free orbit
pub const ORBIT_SPEED: f32 = 75.0;

/// Narrowest picking camera field of view, in degrees
pub const MIN_FOV_DEGREES: f32 = 10.0;

/// Widest picking camera field of view, in degrees
pub const MAX_FOV_DEGREES: f32 = 120.0;

/// Layer index that gizmo colliders live on
pub const GIZMO_LAYER: u32 = 8;

/// Node names containing this marker are plane sub-handles
pub const PLANE_HANDLE_MARKER: &str = "_plane_";

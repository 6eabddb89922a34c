//! Gizmo geometry and camera constants
//!
//! Dimensions of the handle hierarchy built by [`crate::rig`]. All lengths
//! are in gizmo-local units before any gizmo scale is applied.

/// Picking camera defaults
pub mod camera {
    /// Default field of view in degrees
    pub const DEFAULT_FOV_DEGREES: f32 = 60.0;
    /// Default near clipping plane
    pub const DEFAULT_NEAR: f32 = 0.1;
    /// Default far clipping plane
    pub const DEFAULT_FAR: f32 = 1000.0;
}

/// Translate arrows
pub mod translate {
    /// Arrow length from the gizmo origin
    pub const ARROW_LENGTH: f32 = 1.0;
    /// Hit radius of an arrow
    pub const HIT_RADIUS: f32 = 0.08;
    /// Edge length of a square plane sub-handle
    pub const PLANE_SIZE: f32 = 0.3;
    /// Distance of a plane sub-handle's centre from the origin along each other axis
    pub const PLANE_OFFSET: f32 = 0.25;
    /// Half thickness of a plane sub-handle
    pub const PLANE_THICKNESS: f32 = 0.01;
}

/// Rotate rings
pub mod rotate {
    /// Ring radius
    pub const RING_RADIUS: f32 = 0.8;
    /// Hit tolerance either side of the ring centre line
    pub const RING_HIT_THICKNESS: f32 = 0.06;
}

/// Scale handles
pub mod scale {
    /// Stem mesh length at unit scale (a cylinder along its local Z)
    pub const STEM_LENGTH: f32 = 1.0;
    /// Stem radius
    pub const STEM_RADIUS: f32 = 0.02;
    /// Hit radius of a stem
    pub const STEM_HIT_RADIUS: f32 = 0.06;
    /// Half edge of the cap cube at the end of each stem
    pub const CAP_HALF_SIZE: f32 = 0.07;
    /// Half edge of the centre (uniform) cube
    pub const CENTER_HALF_SIZE: f32 = 0.1;
}

/// View cube
pub mod view {
    use glam::Vec3;

    /// Position of the cube in the camera container's space
    pub const ANCHOR: Vec3 = Vec3::new(2.2, 1.5, -6.0);
    /// Distance of each face handle from the cube centre
    pub const FACE_OFFSET: f32 = 0.5;
    /// Half edge of a face handle
    pub const FACE_HALF_SIZE: f32 = 0.2;
    /// Half thickness of a face handle
    pub const FACE_HALF_DEPTH: f32 = 0.05;
    /// Half edge of the free-rotate cube
    pub const CENTER_HALF_SIZE: f32 = 0.25;
}

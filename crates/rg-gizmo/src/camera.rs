//! Picking camera
//!
//! A perspective camera attached to a scene node whose only job is turning a
//! pointer position into a world ray that sees gizmo colliders.

use glam::{Mat4, Vec2, Vec3, Vec4};
use rg_core::{LayerMask, NodeId, Scene};

use crate::collision::Ray;
use crate::constants::camera as constants;

/// Camera used to ray-test gizmo handles independently of the main scene
#[derive(Debug, Clone)]
pub struct PickingCamera {
    /// Node whose world transform places the camera (looking down its -Z)
    pub node: NodeId,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Near clipping plane distance
    pub near: f32,
    /// Far clipping plane distance
    pub far: f32,
    /// Layers this camera can pick
    pub culling_mask: LayerMask,
}

impl PickingCamera {
    /// Create a camera on `node` that only sees `culling_mask`
    pub fn new(node: NodeId, culling_mask: LayerMask) -> Self {
        Self {
            node,
            fov: constants::DEFAULT_FOV_DEGREES.to_radians(),
            near: constants::DEFAULT_NEAR,
            far: constants::DEFAULT_FAR,
            culling_mask,
        }
    }

    /// Set field of view in degrees; range checks belong to [`rg_core::GizmoConfig::validate`]
    pub fn set_fov_degrees(&mut self, fov_degrees: f32) {
        self.fov = fov_degrees.to_radians();
    }

    /// View matrix from the node's world transform
    pub fn view_matrix(&self, scene: &Scene) -> Option<Mat4> {
        scene.world_matrix(self.node).map(|m| {
            let (_, rotation, translation) = m.to_scale_rotation_translation();
            Mat4::from_rotation_translation(rotation, translation).inverse()
        })
    }

    /// Projection matrix for a viewport of the given size
    pub fn projection_matrix(&self, viewport: Vec2) -> Mat4 {
        let aspect = if viewport.y > 0.0 {
            viewport.x / viewport.y
        } else {
            1.0
        };
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }

    /// Convert a pointer position (pixels, origin top-left) to a world ray
    pub fn screen_to_ray(&self, scene: &Scene, pointer: Vec2, viewport: Vec2) -> Option<Ray> {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return None;
        }

        let ndc_x = (2.0 * pointer.x / viewport.x) - 1.0;
        let ndc_y = 1.0 - (2.0 * pointer.y / viewport.y);

        let inv_proj = self.projection_matrix(viewport).inverse();
        let inv_view = self.view_matrix(scene)?.inverse();

        // perspective_rh maps depth to [0, 1]
        let near_view = inv_proj * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let far_view = inv_proj * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let near_view = near_view.truncate() / near_view.w;
        let far_view = far_view.truncate() / far_view.w;

        let near_world = inv_view.transform_point3(near_view);
        let far_world = inv_view.transform_point3(far_view);

        Some(Ray::new(near_world, far_world - near_world))
    }

    /// Project a world point to pointer coordinates. None if it is behind the camera.
    pub fn world_to_screen(&self, scene: &Scene, point: Vec3, viewport: Vec2) -> Option<Vec2> {
        let clip = self.projection_matrix(viewport) * self.view_matrix(scene)? * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.x,
            (1.0 - ndc.y) * 0.5 * viewport.y,
        ))
    }
}

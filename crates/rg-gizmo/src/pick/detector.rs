//! Per-handle pick detection

use rg_core::{FrameInput, MaterialId, NodeId, Scene};

use super::DetectorId;
use super::capture::{CaptureArbiter, DragSession};
use crate::camera::PickingCamera;
use crate::collision::raycast_all;

/// Detects presses on one handle's collision geometry.
///
/// A detector watches a set of target nodes. When the primary button goes
/// down over any of them (and nobody else holds the press) it reports
/// `pressing` until the button is released, and highlights every renderer
/// under its targets for the duration.
#[derive(Debug, Clone)]
pub struct PickDetector {
    name: String,
    targets: Vec<NodeId>,
    highlight: MaterialId,
    plane_marker: String,
    enabled: bool,
    pressing: bool,
    pressing_plane: bool,
}

impl PickDetector {
    /// Create a detector for `targets`, highlighting with `highlight`
    pub fn new(name: impl Into<String>, targets: Vec<NodeId>, highlight: MaterialId) -> Self {
        Self {
            name: name.into(),
            targets,
            highlight,
            plane_marker: rg_core::constants::PLANE_HANDLE_MARKER.to_string(),
            enabled: true,
            pressing: false,
            pressing_plane: false,
        }
    }

    /// Use a different name fragment to recognise plane sub-handles
    pub fn with_plane_marker(mut self, marker: impl Into<String>) -> Self {
        self.plane_marker = marker.into();
        self
    }

    /// Detector name, for diagnostics
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Nodes this detector reacts to
    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    /// Whether the detector takes part in picking
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// True from the press that hit a target until release
    pub fn pressing(&self) -> bool {
        self.enabled && self.pressing
    }

    /// True when the captured press landed on a plane sub-handle
    pub fn pressing_plane(&self) -> bool {
        self.enabled && self.pressing_plane
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub(crate) fn clear(&mut self) {
        self.pressing = false;
        self.pressing_plane = false;
    }

    /// Run one tick of hit testing and capture bookkeeping
    pub fn update(
        &mut self,
        id: DetectorId,
        scene: &mut Scene,
        camera: &PickingCamera,
        input: &FrameInput,
        arbiter: &mut CaptureArbiter,
    ) {
        if !self.enabled {
            return;
        }

        if !arbiter.is_captured() && input.button.pressed {
            self.try_capture(id, scene, camera, input, arbiter);
        } else if input.button.released && arbiter.end(id, scene) {
            self.clear();
        }
    }

    fn try_capture(
        &mut self,
        id: DetectorId,
        scene: &mut Scene,
        camera: &PickingCamera,
        input: &FrameInput,
        arbiter: &mut CaptureArbiter,
    ) {
        let Some(ray) = camera.screen_to_ray(scene, input.pointer, input.viewport) else {
            return;
        };

        self.pressing_plane = false;
        let mut detected = false;

        for hit in raycast_all(scene, &ray, camera.culling_mask) {
            if !self.targets.contains(&hit.node) || !scene.renderer_enabled(hit.node) {
                continue;
            }
            if scene
                .get(hit.node)
                .is_some_and(|n| n.name.contains(&self.plane_marker))
            {
                self.pressing_plane = true;
            }
            detected = true;
            self.pressing = true;
        }

        if detected {
            tracing::debug!(
                "'{}' hit (plane: {}) at {:?}",
                self.name,
                self.pressing_plane,
                input.pointer
            );
            let session = DragSession::highlight(id, scene, &self.targets, self.highlight);
            if let Err(session) = arbiter.begin(session) {
                session.restore(scene);
                self.clear();
            }
        }
    }
}

//! Pick detection for gizmo handles
//!
//! The [`PickSystem`] owns every [`PickDetector`] and the [`CaptureArbiter`]
//! that decides which of them owns a press. Tools hold [`DetectorId`]s and
//! query `pressing` / `pressing_plane` after the system has updated for the
//! tick.

mod capture;
mod detector;

pub use capture::{CaptureArbiter, DragSession};
pub use detector::PickDetector;

use rg_core::{FrameInput, GizmoError, Scene};

use crate::camera::PickingCamera;

/// Index of a detector inside a [`PickSystem`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DetectorId(pub usize);

/// All detectors of a scene plus the arbiter they share
#[derive(Debug, Default)]
pub struct PickSystem {
    arbiter: CaptureArbiter,
    detectors: Vec<PickDetector>,
}

impl PickSystem {
    /// Create an empty pick system
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a detector after checking its targets exist in `scene`
    pub fn register(
        &mut self,
        scene: &Scene,
        detector: PickDetector,
    ) -> Result<DetectorId, GizmoError> {
        if detector.targets().is_empty() {
            return Err(GizmoError::EmptyTargets {
                name: detector.name().to_string(),
            });
        }
        if let Some(&missing) = detector.targets().iter().find(|t| !scene.contains(**t)) {
            return Err(GizmoError::MissingNode {
                tool: "PickDetector",
                role: "target",
                id: missing,
            });
        }
        self.detectors.push(detector);
        Ok(DetectorId(self.detectors.len() - 1))
    }

    /// Number of registered detectors
    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    /// True if no detector is registered
    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    /// True if `id` names a registered detector
    pub fn contains(&self, id: DetectorId) -> bool {
        id.0 < self.detectors.len()
    }

    /// Fail unless every id in `ids` is registered
    pub fn require(&self, tool: &'static str, ids: &[DetectorId]) -> Result<(), GizmoError> {
        match ids.iter().find(|id| !self.contains(**id)) {
            Some(missing) => Err(GizmoError::MissingDetector {
                tool,
                index: missing.0,
            }),
            None => Ok(()),
        }
    }

    /// Detector by id
    pub fn get(&self, id: DetectorId) -> Option<&PickDetector> {
        self.detectors.get(id.0)
    }

    /// Arbiter shared by all detectors
    pub fn arbiter(&self) -> &CaptureArbiter {
        &self.arbiter
    }

    /// True from a press on the detector's handle until release
    pub fn pressing(&self, id: DetectorId) -> bool {
        self.get(id).is_some_and(PickDetector::pressing)
    }

    /// True while the detector's press is on a plane sub-handle
    pub fn pressing_plane(&self, id: DetectorId) -> bool {
        self.get(id).is_some_and(PickDetector::pressing_plane)
    }

    /// Run every enabled detector for this tick, in registration order
    pub fn update(&mut self, scene: &mut Scene, camera: &PickingCamera, input: &FrameInput) {
        let Self { arbiter, detectors } = self;
        for (index, detector) in detectors.iter_mut().enumerate() {
            detector.update(DetectorId(index), scene, camera, input, arbiter);
        }
    }

    /// Enable or disable a detector.
    ///
    /// Disabling tears the detector down: any outstanding highlight, whoever
    /// owns it, is restored and every detector's press state is cleared.
    pub fn set_enabled(&mut self, id: DetectorId, enabled: bool, scene: &mut Scene) {
        let Some(detector) = self.detectors.get_mut(id.0) else {
            return;
        };
        if detector.is_enabled() == enabled {
            return;
        }
        detector.set_enabled(enabled);
        if enabled {
            return;
        }
        detector.clear();
        if self.arbiter.force_release(scene).is_some() {
            self.detectors.iter_mut().for_each(PickDetector::clear);
        }
    }
}

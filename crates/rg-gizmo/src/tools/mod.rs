//! Gizmo tools
//!
//! Each tool reads the press state of its detectors once per tick (after the
//! [`PickSystem`] has updated) and performs at most one axis or mode worth of
//! work on the node it manipulates.

mod rotate;
mod scale;
mod translate;
mod view;

pub use rotate::RotateTool;
pub use scale::{ScaleHandle, ScaleTool};
pub use translate::TranslateTool;
pub use view::{ViewFace, ViewFaceHandle, ViewTool};

use glam::Vec3;
use rg_core::{FrameInput, GizmoError, NodeId, Scene};

use crate::axis::Axis;
use crate::pick::{DetectorId, PickSystem};

/// What a tool did during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolAction {
    /// Target moved by `offset` (world space)
    Translated {
        /// Handle that was dragged
        axis: Axis,
        /// Whether the plane sub-handle was dragged
        plane: bool,
        /// World-space displacement applied to the target
        offset: Vec3,
    },
    /// Target and ring rotated by `degrees` about the handle's axis
    Rotated {
        /// Ring that was dragged
        axis: Axis,
        /// Angle applied this tick
        degrees: f32,
    },
    /// Target scale changed along one axis
    ScaledAxis {
        /// Handle that was dragged
        axis: Axis,
        /// Change applied to the target's local scale on that axis
        delta: f32,
    },
    /// Target and gizmo scale changed uniformly
    ScaledUniform {
        /// Change applied to every axis
        delta: f32,
    },
    /// Handle geometry returned to its baseline
    Reverted,
    /// Camera snapped to a canonical vantage
    Snapped(ViewFace),
    /// Camera orbited freely around the pivot
    Orbited {
        /// Degrees about world up
        yaw: f32,
        /// Degrees about world right
        pitch: f32,
    },
}

/// Borrowed per-tick state handed to each tool
pub struct ToolContext<'a> {
    /// Scene the tool mutates
    pub scene: &'a mut Scene,
    /// Press state for this tick
    pub picks: &'a PickSystem,
    /// Polled input for this tick
    pub input: &'a FrameInput,
}

impl ToolContext<'_> {
    /// First detector in `ids` reporting a press while the button is held
    pub fn first_pressed(&self, ids: &[DetectorId]) -> Option<usize> {
        if !self.input.button.held {
            return None;
        }
        ids.iter().position(|id| self.picks.pressing(*id))
    }
}

/// Common surface of the four tools
pub trait GizmoTool {
    /// Name used in logs and errors
    fn name(&self) -> &'static str;

    /// Detectors this tool reads, in scan order
    fn detectors(&self) -> Vec<DetectorId>;

    /// Return handle geometry to its pre-drag state.
    ///
    /// Runs on release and when the tool is switched off mid-drag.
    fn cancel(&mut self, _scene: &mut Scene) {}

    /// Run one tick
    fn tick(&mut self, ctx: &mut ToolContext<'_>) -> Option<ToolAction>;
}

/// Fail unless `id` is in `scene`
pub(crate) fn require_node(
    scene: &Scene,
    tool: &'static str,
    role: &'static str,
    id: NodeId,
) -> Result<(), GizmoError> {
    if scene.contains(id) {
        Ok(())
    } else {
        Err(GizmoError::MissingNode { tool, role, id })
    }
}

/// Fail unless `id` is in `scene` and has a mesh renderer
pub(crate) fn require_renderer(
    scene: &Scene,
    tool: &'static str,
    role: &'static str,
    id: NodeId,
) -> Result<(), GizmoError> {
    require_node(scene, tool, role, id)?;
    match scene.renderer(id) {
        Some(_) => Ok(()),
        None => Err(GizmoError::MissingRenderer {
            tool,
            name: scene.get(id).map(|n| n.name.clone()).unwrap_or_default(),
        }),
    }
}

/// Move `follower` onto `leader`'s world position
pub(crate) fn follow(scene: &mut Scene, follower: NodeId, leader: NodeId) {
    if let Some(position) = scene.world_position(leader) {
        scene.set_world_position(follower, position);
    }
}

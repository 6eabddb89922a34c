//! Axis and plane translation

use glam::Vec3;
use rg_core::{GizmoError, NodeId, Scene, TranslateConfig};

use super::{GizmoTool, ToolAction, ToolContext, follow, require_node};
use crate::axis::{Axis, AxisDrive, PointerComponent};
use crate::pick::{DetectorId, PickSystem};
use Axis::{X, Y, Z};
use PointerComponent::{Horizontal, Vertical};

const NAME: &str = "TranslateTool";

/// Single-axis drives, indexed by handle axis
const AXIS_DRIVES: [[AxisDrive; 1]; 3] = [
    [AxisDrive::new(X, Horizontal, -1.0)],
    [AxisDrive::new(Y, Vertical, 1.0)],
    [AxisDrive::new(Z, Horizontal, 1.0)],
];

/// Plane drives, indexed by the axis whose arrow carries the plane sub-handle
const PLANE_DRIVES: [[AxisDrive; 2]; 3] = [
    [
        AxisDrive::new(Y, Vertical, 1.0),
        AxisDrive::new(Z, Horizontal, 1.0),
    ],
    [
        AxisDrive::new(X, Horizontal, -1.0),
        AxisDrive::new(Z, Vertical, -1.0),
    ],
    [
        AxisDrive::new(X, Horizontal, -1.0),
        AxisDrive::new(Y, Vertical, 1.0),
    ],
];

/// Moves the target along one axis, or across the plane of a plane sub-handle,
/// while one of its three arrows is dragged.
///
/// Drag sensitivity scales with the distance between the main camera and the
/// target so that a far-away object moves as fast on screen as a near one.
#[derive(Debug, Clone)]
pub struct TranslateTool {
    gizmo: NodeId,
    target: NodeId,
    camera: NodeId,
    detectors: [DetectorId; 3],
    config: TranslateConfig,
}

impl TranslateTool {
    /// Bind the tool to its nodes and X/Y/Z detectors, and snap the gizmo onto the target
    pub fn new(
        scene: &mut Scene,
        picks: &PickSystem,
        gizmo: NodeId,
        target: NodeId,
        camera: NodeId,
        detectors: [DetectorId; 3],
        config: TranslateConfig,
    ) -> Result<Self, GizmoError> {
        require_node(scene, NAME, "gizmo", gizmo)?;
        require_node(scene, NAME, "target", target)?;
        require_node(scene, NAME, "camera", camera)?;
        picks.require(NAME, &detectors)?;

        follow(scene, gizmo, target);
        Ok(Self {
            gizmo,
            target,
            camera,
            detectors,
            config,
        })
    }

    /// Drives applied for a press on `axis`'s arrow or its plane sub-handle
    pub fn drives(axis: Axis, plane: bool) -> &'static [AxisDrive] {
        if plane {
            &PLANE_DRIVES[axis.index()]
        } else {
            &AXIS_DRIVES[axis.index()]
        }
    }

    /// Node being moved
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Current settings
    pub fn config(&self) -> &TranslateConfig {
        &self.config
    }
}

impl GizmoTool for TranslateTool {
    fn name(&self) -> &'static str {
        NAME
    }

    fn detectors(&self) -> Vec<DetectorId> {
        self.detectors.to_vec()
    }

    fn tick(&mut self, ctx: &mut ToolContext<'_>) -> Option<ToolAction> {
        follow(ctx.scene, self.gizmo, self.target);
        let index = ctx.first_pressed(&self.detectors)?;
        let axis = Axis::ALL[index];
        let plane = ctx.picks.pressing_plane(self.detectors[index]);

        let camera = ctx.scene.world_position(self.camera)?;
        let target = ctx.scene.world_position(self.target)?;
        let gain = self.config.distance_factor * camera.distance(target) * ctx.input.dt;

        let local: Vec3 = Self::drives(axis, plane)
            .iter()
            .map(|drive| drive.offset(ctx.input.delta, gain))
            .sum();

        if !ctx.scene.translate(self.target, local, self.config.space) {
            return None;
        }
        let offset = ctx.scene.world_position(self.target)? - target;
        follow(ctx.scene, self.gizmo, self.target);

        tracing::debug!(
            "Translate {}{}: {:?}",
            axis.label(),
            if plane { " plane" } else { "" },
            offset
        );
        Some(ToolAction::Translated {
            axis,
            plane,
            offset,
        })
    }
}

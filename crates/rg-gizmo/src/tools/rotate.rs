//! Ring rotation

use glam::{Quat, Vec3};
use rg_core::{GizmoError, NodeId, RotateConfig, RotateConvention, Scene};

use super::{GizmoTool, ToolAction, ToolContext, follow, require_node};
use crate::axis::Axis;
use crate::pick::{DetectorId, PickSystem};

const NAME: &str = "RotateTool";

/// Rotates the target about a world axis while one of three rings is dragged.
///
/// The dragged ring turns with the target. Under
/// [`RotateConvention::Reverting`] the rings return to the orientation they
/// had when the tool was built as soon as the button is released; the target
/// keeps its accumulated rotation either way.
#[derive(Debug, Clone)]
pub struct RotateTool {
    gizmo: NodeId,
    target: NodeId,
    detectors: [DetectorId; 3],
    config: RotateConfig,
    baseline: Quat,
}

impl RotateTool {
    /// Bind the tool to its nodes and X/Y/Z ring detectors, snapping the gizmo onto the target
    pub fn new(
        scene: &mut Scene,
        picks: &PickSystem,
        gizmo: NodeId,
        target: NodeId,
        detectors: [DetectorId; 3],
        config: RotateConfig,
    ) -> Result<Self, GizmoError> {
        require_node(scene, NAME, "gizmo", gizmo)?;
        require_node(scene, NAME, "target", target)?;
        picks.require(NAME, &detectors)?;

        follow(scene, gizmo, target);
        let baseline = scene.world_rotation(gizmo).unwrap_or(Quat::IDENTITY);
        Ok(Self {
            gizmo,
            target,
            detectors,
            config,
            baseline,
        })
    }

    /// World axis a ring rotates about under `convention`
    pub fn rotation_axis(convention: RotateConvention, axis: Axis) -> Vec3 {
        match (convention, axis) {
            (_, Axis::X) => Vec3::X,
            (RotateConvention::Reverting, Axis::Y) => Vec3::NEG_Y,
            (RotateConvention::Reverting, Axis::Z) => Vec3::NEG_Z,
            (RotateConvention::Accumulating, axis) => axis.unit(),
        }
    }

    /// Gizmo world rotation restored on release
    pub fn baseline(&self) -> Quat {
        self.baseline
    }

    /// Current settings
    pub fn config(&self) -> &RotateConfig {
        &self.config
    }
}

impl GizmoTool for RotateTool {
    fn name(&self) -> &'static str {
        NAME
    }

    fn detectors(&self) -> Vec<DetectorId> {
        self.detectors.to_vec()
    }

    fn cancel(&mut self, scene: &mut Scene) {
        if self.config.convention == RotateConvention::Reverting {
            scene.set_world_rotation(self.gizmo, self.baseline);
            tracing::debug!("Rotate rings reverted");
        }
    }

    fn tick(&mut self, ctx: &mut ToolContext<'_>) -> Option<ToolAction> {
        follow(ctx.scene, self.gizmo, self.target);
        if ctx.input.button.released && self.config.convention == RotateConvention::Reverting {
            self.cancel(ctx.scene);
            return Some(ToolAction::Reverted);
        }

        let index = ctx.first_pressed(&self.detectors)?;
        let axis = Axis::ALL[index];
        let direction = Self::rotation_axis(self.config.convention, axis);
        let delta = ctx.input.delta;
        let degrees = (delta.x - delta.y) * ctx.input.dt * self.config.speed;

        if !ctx.scene.rotate_world(self.target, direction, degrees) {
            return None;
        }
        ctx.scene.rotate_world(self.gizmo, direction, degrees);
        follow(ctx.scene, self.gizmo, self.target);

        tracing::debug!("Rotate {}: {:.3} deg", axis.label(), degrees);
        Some(ToolAction::Rotated { axis, degrees })
    }
}

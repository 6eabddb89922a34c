//! Per-axis and uniform scaling

use glam::Vec3;
use rg_core::{GizmoError, NodeId, ScaleConfig, Scene, Transform};

use super::{GizmoTool, ToolAction, ToolContext, follow, require_node, require_renderer};
use crate::axis::{Axis, AxisDrive, PointerComponent};
use crate::pick::{DetectorId, PickSystem};

const NAME: &str = "ScaleTool";

/// Stem meshes are cylinders along their local Z
const STEM_GROWTH_AXIS: Axis = Axis::Z;

const DRIVES: [AxisDrive; 3] = [
    AxisDrive::new(Axis::X, PointerComponent::Horizontal, -1.0),
    AxisDrive::new(Axis::Y, PointerComponent::Vertical, 1.0),
    AxisDrive::new(Axis::Z, PointerComponent::Horizontal, 1.0),
];

/// One axis handle of the scale gizmo: a stem from the gizmo origin and a cap at its tip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleHandle {
    /// Detector over the stem and cap
    pub detector: DetectorId,
    /// Stem node, a child of the gizmo root
    pub stem: NodeId,
    /// Cap node, a child of the gizmo root
    pub cap: NodeId,
}

#[derive(Debug, Clone)]
struct Baseline {
    gizmo: Transform,
    stems: [Transform; 3],
    caps: [Transform; 3],
}

/// Scales the target along one axis while an axis handle is dragged, or
/// uniformly while the centre cube is dragged.
///
/// Axis handles stretch with the target and snap back to their initial
/// geometry on release. Per-axis target scale never drops below
/// [`ScaleConfig::min_axis_scale`]; the centre handle stops before the gizmo
/// shrinks to 1/[`ScaleConfig::center_floor_divisor`] of its initial size.
#[derive(Debug, Clone)]
pub struct ScaleTool {
    gizmo: NodeId,
    target: NodeId,
    handles: [ScaleHandle; 3],
    center: DetectorId,
    config: ScaleConfig,
    baseline: Baseline,
}

impl ScaleTool {
    /// Bind the tool to its nodes, X/Y/Z handles and centre detector.
    ///
    /// The handle geometry as it stands now becomes the baseline restored on
    /// every release.
    pub fn new(
        scene: &mut Scene,
        picks: &PickSystem,
        gizmo: NodeId,
        target: NodeId,
        handles: [ScaleHandle; 3],
        center: DetectorId,
        config: ScaleConfig,
    ) -> Result<Self, GizmoError> {
        require_node(scene, NAME, "gizmo", gizmo)?;
        require_node(scene, NAME, "target", target)?;
        for handle in &handles {
            require_renderer(scene, NAME, "stem", handle.stem)?;
            require_node(scene, NAME, "cap", handle.cap)?;
        }
        picks.require(NAME, &handles.map(|h| h.detector))?;
        picks.require(NAME, &[center])?;

        follow(scene, gizmo, target);
        let local = |id: NodeId| scene.transform(id).copied().unwrap_or_default();
        let baseline = Baseline {
            gizmo: local(gizmo),
            stems: handles.map(|h| local(h.stem)),
            caps: handles.map(|h| local(h.cap)),
        };
        Ok(Self {
            gizmo,
            target,
            handles,
            center,
            config,
            baseline,
        })
    }

    /// Gizmo local scale the centre floor is measured against
    pub fn baseline_scale(&self) -> Vec3 {
        self.baseline.gizmo.scale
    }

    /// Current settings
    pub fn config(&self) -> &ScaleConfig {
        &self.config
    }

    fn revert(&self, scene: &mut Scene) {
        if let Some(t) = scene.transform_mut(self.gizmo) {
            t.scale = self.baseline.gizmo.scale;
        }
        for (i, handle) in self.handles.iter().enumerate() {
            if let Some(t) = scene.transform_mut(handle.stem) {
                *t = self.baseline.stems[i];
            }
            if let Some(t) = scene.transform_mut(handle.cap) {
                *t = self.baseline.caps[i];
            }
        }
    }

    /// Scale the target along `axis`, keeping its scale at or above the floor.
    ///
    /// Returns the change actually applied. A step that would cross the floor
    /// lands on it exactly; once there, further shrinking does nothing.
    fn scale_axis(&self, scene: &mut Scene, axis: Axis, requested: f32) -> Option<f32> {
        let i = axis.index();
        let floor = self.config.min_axis_scale;
        let current = scene.transform(self.target)?.scale[i];

        let next = current + requested;
        let next = if next < floor {
            if current <= floor {
                return None;
            }
            floor
        } else {
            next
        };
        let applied = next - current;
        if applied == 0.0 {
            return None;
        }
        scene.transform_mut(self.target)?.scale[i] = next;

        let handle = self.handles[i];
        let before = scene.world_bounds(handle.stem)?.size()[i];
        scene.transform_mut(handle.stem)?.scale[STEM_GROWTH_AXIS.index()] += applied;
        let after = scene.world_bounds(handle.stem)?.size()[i];

        if let Some(cap) = scene.world_position(handle.cap) {
            scene.set_world_position(handle.cap, cap + axis.unit() * (after - before));
        }
        let origin = scene.world_position(self.gizmo)?;
        let mut stem = scene.world_position(handle.stem)?;
        stem[i] = origin[i] + after * 0.5;
        scene.set_world_position(handle.stem, stem);

        Some(applied)
    }

    fn scale_uniform(&self, scene: &mut Scene, delta: f32) -> Option<f32> {
        if delta == 0.0 {
            return None;
        }
        let floor = self.baseline.gizmo.scale / self.config.center_floor_divisor;
        let gizmo = scene.transform(self.gizmo)?.scale;
        if (gizmo + delta).cmple(floor).any() {
            return None;
        }
        scene.transform_mut(self.target)?.scale += Vec3::splat(delta);
        scene.transform_mut(self.gizmo)?.scale += Vec3::splat(delta);
        Some(delta)
    }
}

impl GizmoTool for ScaleTool {
    fn name(&self) -> &'static str {
        NAME
    }

    fn detectors(&self) -> Vec<DetectorId> {
        let mut ids: Vec<DetectorId> = self.handles.iter().map(|h| h.detector).collect();
        ids.push(self.center);
        ids
    }

    fn cancel(&mut self, scene: &mut Scene) {
        self.revert(scene);
        tracing::debug!("Scale handles reverted");
    }

    fn tick(&mut self, ctx: &mut ToolContext<'_>) -> Option<ToolAction> {
        follow(ctx.scene, self.gizmo, self.target);
        if ctx.input.button.released {
            self.cancel(ctx.scene);
            return Some(ToolAction::Reverted);
        }

        let ids = self.detectors();
        let index = ctx.first_pressed(&ids)?;
        let gain = ctx.input.dt * self.config.speed;
        let delta = ctx.input.delta;

        let action = match DRIVES.get(index) {
            Some(drive) => {
                let applied = self.scale_axis(ctx.scene, drive.axis, drive.amount(delta, gain))?;
                tracing::debug!("Scale {}: {:+.4}", drive.axis.label(), applied);
                ToolAction::ScaledAxis {
                    axis: drive.axis,
                    delta: applied,
                }
            }
            None => {
                let applied = self.scale_uniform(ctx.scene, (delta.x + delta.y) * gain)?;
                tracing::debug!("Scale uniform: {:+.4}", applied);
                ToolAction::ScaledUniform { delta: applied }
            }
        };

        follow(ctx.scene, self.gizmo, self.target);
        Some(action)
    }
}

//! Per-tick driver for a built rig

use rg_core::{FrameInput, Scene};

use crate::camera::PickingCamera;
use crate::pick::PickSystem;
use crate::rig::{GizmoRig, RigNodes};
use crate::tools::{
    GizmoTool, RotateTool, ScaleTool, ToolAction, ToolContext, TranslateTool, ViewTool,
};

/// The four tools of a suite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    /// Axis and plane translation
    Translate,
    /// Ring rotation
    Rotate,
    /// Axis and uniform scale
    Scale,
    /// Camera snap and orbit
    View,
}

impl ToolKind {
    /// Tools in the order they run each tick
    pub const ALL: [ToolKind; 4] = [
        ToolKind::Translate,
        ToolKind::Rotate,
        ToolKind::Scale,
        ToolKind::View,
    ];

    fn index(self) -> usize {
        match self {
            ToolKind::Translate => 0,
            ToolKind::Rotate => 1,
            ToolKind::Scale => 2,
            ToolKind::View => 3,
        }
    }
}

/// Runs picking and then every enabled tool, once per tick.
#[derive(Debug)]
pub struct GizmoSuite {
    camera: PickingCamera,
    picks: PickSystem,
    translate: TranslateTool,
    rotate: RotateTool,
    scale: ScaleTool,
    view: ViewTool,
    nodes: RigNodes,
    enabled: [bool; 4],
}

impl GizmoSuite {
    /// Take over a built rig with every tool enabled
    pub fn new(rig: GizmoRig) -> Self {
        Self {
            camera: rig.camera,
            picks: rig.picks,
            translate: rig.translate,
            rotate: rig.rotate,
            scale: rig.scale,
            view: rig.view,
            nodes: rig.nodes,
            enabled: [true; 4],
        }
    }

    /// Update every detector, then run each enabled tool in [`ToolKind::ALL`] order.
    ///
    /// Returns what each tool did this tick.
    pub fn tick(&mut self, scene: &mut Scene, input: &FrameInput) -> Vec<(ToolKind, ToolAction)> {
        let Self {
            camera,
            picks,
            translate,
            rotate,
            scale,
            view,
            enabled,
            ..
        } = self;

        picks.update(scene, camera, input);

        let tools: [&mut dyn GizmoTool; 4] = [translate, rotate, scale, view];
        let mut ctx = ToolContext {
            scene,
            picks,
            input,
        };
        let mut actions = Vec::new();
        for (kind, tool) in ToolKind::ALL.into_iter().zip(tools) {
            if !enabled[kind.index()] {
                continue;
            }
            if let Some(action) = tool.tick(&mut ctx) {
                actions.push((kind, action));
            }
        }
        actions
    }

    /// Enable or disable a tool.
    ///
    /// Disabling returns the tool's handles to their pre-drag state and tears
    /// down its detectors, which also ends any drag in progress and restores
    /// its highlight.
    pub fn set_tool_enabled(&mut self, scene: &mut Scene, kind: ToolKind, enabled: bool) {
        if self.enabled[kind.index()] == enabled {
            return;
        }
        self.enabled[kind.index()] = enabled;
        if !enabled {
            self.tool_mut(kind).cancel(scene);
        }
        let ids = self.tool(kind).detectors();
        for id in ids {
            self.picks.set_enabled(id, enabled, scene);
        }
        tracing::info!(
            "{} {}",
            self.tool(kind).name(),
            if enabled { "enabled" } else { "disabled" }
        );
    }

    /// Whether `kind` runs on tick
    pub fn is_tool_enabled(&self, kind: ToolKind) -> bool {
        self.enabled[kind.index()]
    }

    fn tool(&self, kind: ToolKind) -> &dyn GizmoTool {
        match kind {
            ToolKind::Translate => &self.translate,
            ToolKind::Rotate => &self.rotate,
            ToolKind::Scale => &self.scale,
            ToolKind::View => &self.view,
        }
    }

    fn tool_mut(&mut self, kind: ToolKind) -> &mut dyn GizmoTool {
        match kind {
            ToolKind::Translate => &mut self.translate,
            ToolKind::Rotate => &mut self.rotate,
            ToolKind::Scale => &mut self.scale,
            ToolKind::View => &mut self.view,
        }
    }

    /// Picking camera
    pub fn camera(&self) -> &PickingCamera {
        &self.camera
    }

    /// Detectors and capture state
    pub fn picks(&self) -> &PickSystem {
        &self.picks
    }

    /// Handle nodes
    pub fn nodes(&self) -> &RigNodes {
        &self.nodes
    }

    /// Translate tool
    pub fn translate(&self) -> &TranslateTool {
        &self.translate
    }

    /// Rotate tool
    pub fn rotate(&self) -> &RotateTool {
        &self.rotate
    }

    /// Scale tool
    pub fn scale(&self) -> &ScaleTool {
        &self.scale
    }

    /// View tool
    pub fn view(&self) -> &ViewTool {
        &self.view
    }
}

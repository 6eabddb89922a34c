//! Headless replay of recorded input
//!
//! Builds a small scene (a target cube, a pivot and a camera container),
//! wires a full gizmo rig to it and feeds every frame of an [`InputScript`]
//! through [`GizmoSuite::tick`].

use std::path::Path;

use glam::Vec3;
use rg_core::{
    BoundingBox, Collider, ConfigError, GizmoConfig, GizmoError, InputScript, MeshRenderer, Node,
    NodeId, Scene, Transform,
};
use rg_gizmo::{GizmoRig, GizmoSuite, ToolAction, ToolKind};

/// Where the camera container starts, relative to the pivot
pub const CAMERA_START: Vec3 = Vec3::new(0.0, 0.0, 10.0);

/// Replay errors
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Gizmo(#[from] GizmoError),
    #[error("{0} left the scene during replay")]
    Vanished(&'static str),
}

/// The scene a script is replayed against
#[derive(Debug)]
pub struct ReplayScene {
    pub scene: Scene,
    pub target: NodeId,
    pub pivot: NodeId,
    pub camera_container: NodeId,
}

impl ReplayScene {
    pub fn new() -> Self {
        let mut scene = Scene::new();
        let material = scene.create_material("target");
        let half = Vec3::splat(0.5);
        let target = scene.insert(
            Node::new("target")
                .with_renderer(MeshRenderer::new(
                    material,
                    BoundingBox::from_center_half_extents(Vec3::ZERO, half),
                ))
                .with_collider(Collider::Cuboid { half_extents: half }),
        );
        let pivot = scene.insert(Node::new("pivot"));
        let camera_container = scene.insert(
            Node::new("camera_container").with_transform(Transform::from_translation(CAMERA_START)),
        );
        Self {
            scene,
            target,
            pivot,
            camera_container,
        }
    }
}

impl Default for ReplayScene {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a replay
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayReport {
    /// Frames fed to the suite
    pub ticks: usize,
    /// Every tool action, tagged with the frame it happened on
    pub actions: Vec<(usize, ToolKind, ToolAction)>,
    /// Final local transform of the target
    pub target: Transform,
    /// Final world position of the camera container
    pub camera_position: Vec3,
}

/// Replay `script` against a fresh [`ReplayScene`]
pub fn replay(script: &InputScript, config: &GizmoConfig) -> Result<ReplayReport, ReplayError> {
    let mut world = ReplayScene::new();
    let start = script.frames.first().map_or(0.0, |f| f.time);
    let rig = GizmoRig::build(
        &mut world.scene,
        world.target,
        world.pivot,
        world.camera_container,
        config,
        start,
    )?;
    let mut suite = GizmoSuite::new(rig);

    let mut actions = Vec::new();
    for (index, frame) in script.frames.iter().enumerate() {
        for (kind, action) in suite.tick(&mut world.scene, frame) {
            tracing::debug!("frame {index}: {kind:?} {action:?}");
            actions.push((index, kind, action));
        }
    }

    let target = world
        .scene
        .transform(world.target)
        .copied()
        .ok_or(ReplayError::Vanished("target"))?;
    let camera_position = world
        .scene
        .world_position(world.camera_container)
        .ok_or(ReplayError::Vanished("camera container"))?;

    Ok(ReplayReport {
        ticks: script.frames.len(),
        actions,
        target,
        camera_position,
    })
}

/// Load a script and optional config from disk and replay it
pub fn run(
    script: impl AsRef<Path>,
    config: Option<impl AsRef<Path>>,
) -> Result<ReplayReport, ReplayError> {
    let config = match config {
        Some(path) => GizmoConfig::load(path)?,
        None => GizmoConfig::default(),
    };
    let script = InputScript::load(script)?;
    tracing::info!("Replaying {} frames", script.frames.len());
    replay(&script, &config)
}

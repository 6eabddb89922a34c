//! Scene fixture shared by the unit tests

use glam::{Vec2, Vec3};
use rg_core::{
    BoundingBox, ButtonState, Collider, FrameInput, LayerMask, MaterialId, MeshRenderer, Node,
    NodeId, Scene, Transform,
};

use crate::camera::PickingCamera;
use crate::pick::{DetectorId, PickDetector, PickSystem};
use crate::tools::{GizmoTool, ToolAction, ToolContext};

pub const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);
pub const DT: f32 = 0.1;

pub struct Fixture {
    pub scene: Scene,
    pub camera: PickingCamera,
    pub picks: PickSystem,
    pub base: MaterialId,
    pub highlight: MaterialId,
    pub time: f64,
}

impl Fixture {
    /// Picking camera at z = 10 looking down -Z
    pub fn new() -> Self {
        let mut scene = Scene::new();
        let base = scene.create_material("base");
        let highlight = scene.create_material("highlight");
        let camera_node = scene.insert(
            Node::new("picking_camera")
                .with_transform(Transform::from_translation(Vec3::new(0.0, 0.0, 10.0))),
        );
        Self {
            scene,
            camera: PickingCamera::new(camera_node, LayerMask::single(8)),
            picks: PickSystem::new(),
            base,
            highlight,
            time: 0.0,
        }
    }

    pub fn plain(&mut self, name: &str, position: Vec3) -> NodeId {
        self.scene
            .insert(Node::new(name).with_transform(Transform::from_translation(position)))
    }

    /// A pickable cube on the gizmo layer
    pub fn cube(&mut self, parent: Option<NodeId>, name: &str, position: Vec3, half: f32) -> NodeId {
        let half = Vec3::splat(half);
        let node = Node::new(name)
            .with_transform(Transform::from_translation(position))
            .with_renderer(MeshRenderer::new(
                self.base,
                BoundingBox::from_center_half_extents(Vec3::ZERO, half),
            ))
            .with_collider(Collider::Cuboid { half_extents: half })
            .with_layer(8);
        match parent {
            Some(parent) => self.scene.insert_child(parent, node).unwrap(),
            None => self.scene.insert(node),
        }
    }

    pub fn detector(&mut self, name: &str, targets: Vec<NodeId>) -> DetectorId {
        let detector = PickDetector::new(name, targets, self.highlight);
        self.picks.register(&self.scene, detector).unwrap()
    }

    fn input(&self, pointer: Vec2, delta: Vec2, button: ButtonState) -> FrameInput {
        FrameInput::at(pointer, button)
            .with_delta(delta)
            .with_time(self.time, DT)
            .with_viewport(VIEWPORT)
    }

    fn step(
        &mut self,
        pointer: Vec2,
        delta: Vec2,
        button: ButtonState,
        tool: &mut dyn GizmoTool,
    ) -> Option<ToolAction> {
        self.time += f64::from(DT);
        let input = self.input(pointer, delta, button);
        self.picks.update(&mut self.scene, &self.camera, &input);
        let mut ctx = ToolContext {
            scene: &mut self.scene,
            picks: &self.picks,
            input: &input,
        };
        tool.tick(&mut ctx)
    }

    /// Press on the projected centre of `node`
    pub fn press(&mut self, node: NodeId, tool: &mut dyn GizmoTool) -> Option<ToolAction> {
        let position = self.scene.world_position(node).unwrap();
        let pointer = self
            .camera
            .world_to_screen(&self.scene, position, VIEWPORT)
            .unwrap();
        self.step(pointer, Vec2::ZERO, ButtonState::PRESS, tool)
    }

    /// Press on empty space
    pub fn press_nothing(&mut self, tool: &mut dyn GizmoTool) -> Option<ToolAction> {
        self.step(Vec2::new(1.0, 1.0), Vec2::ZERO, ButtonState::PRESS, tool)
    }

    pub fn drag(&mut self, delta: Vec2, tool: &mut dyn GizmoTool) -> Option<ToolAction> {
        self.step(Vec2::ZERO, delta, ButtonState::HOLD, tool)
    }

    pub fn idle(&mut self, delta: Vec2, tool: &mut dyn GizmoTool) -> Option<ToolAction> {
        self.step(Vec2::ZERO, delta, ButtonState::IDLE, tool)
    }

    pub fn release(&mut self, tool: &mut dyn GizmoTool) -> Option<ToolAction> {
        self.step(Vec2::ZERO, Vec2::ZERO, ButtonState::RELEASE, tool)
    }

    /// Let time pass without input
    pub fn wait(&mut self, seconds: f64) {
        self.time += seconds;
    }
}

//! End-to-end behaviour of a built rig driven through `GizmoSuite::tick`

use glam::{Quat, Vec2, Vec3};
use rg_core::transform::axis_angle_degrees;
use rg_core::{ButtonState, FrameInput, GizmoConfig, Node, NodeId, Scene, Transform};
use rg_gizmo::{DetectorId, GizmoRig, GizmoSuite, ToolAction, ToolKind, ViewFace};

const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);
const DT: f32 = 0.1;

struct Harness {
    scene: Scene,
    suite: GizmoSuite,
    target: NodeId,
    container: NodeId,
    time: f64,
}

impl Harness {
    /// Target and pivot at the origin; the camera container at `camera`,
    /// looking at them, with only `tools` enabled.
    fn new(camera: Vec3, tools: &[ToolKind]) -> Self {
        let mut scene = Scene::new();
        let target = scene.insert(Node::new("target"));
        let pivot = scene.insert(Node::new("pivot"));
        let container = scene.insert(
            Node::new("camera_container").with_transform(Transform::from_translation(camera)),
        );
        scene.look_at(container, Vec3::ZERO, Vec3::Y);

        let rig = GizmoRig::build(
            &mut scene,
            target,
            pivot,
            container,
            &GizmoConfig::default(),
            0.0,
        )
        .unwrap();
        let mut suite = GizmoSuite::new(rig);
        for kind in ToolKind::ALL {
            suite.set_tool_enabled(&mut scene, kind, tools.contains(&kind));
        }
        Self {
            scene,
            suite,
            target,
            container,
            time: 0.0,
        }
    }

    fn step(&mut self, pointer: Vec2, delta: Vec2, button: ButtonState) -> Vec<(ToolKind, ToolAction)> {
        self.time += f64::from(DT);
        let input = FrameInput::at(pointer, button)
            .with_delta(delta)
            .with_time(self.time, DT)
            .with_viewport(VIEWPORT);
        self.suite.tick(&mut self.scene, &input)
    }

    fn press_at(&mut self, point: Vec3) -> Vec<(ToolKind, ToolAction)> {
        let pointer = self
            .suite
            .camera()
            .world_to_screen(&self.scene, point, VIEWPORT)
            .unwrap();
        self.step(pointer, Vec2::ZERO, ButtonState::PRESS)
    }

    fn press_node(&mut self, node: NodeId) -> Vec<(ToolKind, ToolAction)> {
        let point = self.scene.world_position(node).unwrap();
        self.press_at(point)
    }

    fn drag(&mut self, delta: Vec2) -> Vec<(ToolKind, ToolAction)> {
        self.step(Vec2::ZERO, delta, ButtonState::HOLD)
    }

    fn release(&mut self) -> Vec<(ToolKind, ToolAction)> {
        self.step(Vec2::ZERO, Vec2::ZERO, ButtonState::RELEASE)
    }

    fn wait(&mut self, seconds: f64) {
        self.time += seconds;
    }

    fn pressing(&self) -> Vec<DetectorId> {
        (0..self.suite.picks().len())
            .map(DetectorId)
            .filter(|id| self.suite.picks().pressing(*id))
            .collect()
    }

    fn target(&self) -> Transform {
        *self.scene.transform(self.target).unwrap()
    }
}

const OBLIQUE: Vec3 = Vec3::new(3.0, 4.0, 10.0);

#[test]
fn only_one_detector_captures_overlapping_handles() {
    let mut h = Harness::new(OBLIQUE, &ToolKind::ALL);
    // the Y arrow and the Y scale stem share this point
    h.press_at(Vec3::new(0.0, 0.5, 0.0));
    let pressing = h.pressing();
    assert_eq!(pressing.len(), 1);
    assert_eq!(h.suite.picks().arbiter().owner(), Some(pressing[0]));

    h.release();
    assert!(h.pressing().is_empty());
    assert!(!h.suite.picks().arbiter().is_captured());
}

#[test]
fn axis_scale_stops_exactly_at_floor() {
    let mut h = Harness::new(OBLIQUE, &[ToolKind::Scale]);
    h.scene.transform_mut(h.target).unwrap().scale = Vec3::new(1.0, 1.0, 0.02);
    let cap = h.suite.nodes().scale_handles[2].cap;
    h.press_node(cap);

    // 7.5 * 0.1 * -0.1 = -0.075 requested; only -0.01 fits
    h.drag(Vec2::new(-0.1, 0.0));
    assert_eq!(h.target().scale.z, 0.01);
    for _ in 0..3 {
        let actions = h.drag(Vec2::new(-0.5, 0.0));
        assert!(actions.is_empty());
        assert_eq!(h.target().scale.z, 0.01);
    }
}

#[test]
fn long_shrink_stream_never_passes_floor() {
    let mut h = Harness::new(OBLIQUE, &[ToolKind::Scale]);
    let cap = h.suite.nodes().scale_handles[0].cap;
    h.press_node(cap);

    // X grows with leftward drags; 200 ticks of -0.01 each
    let dx = 0.01 / (7.5 * DT);
    for _ in 0..200 {
        h.drag(Vec2::new(dx, 0.0));
        assert!(h.target().scale.x >= 0.01);
    }
    assert_eq!(h.target().scale.x, 0.01);
}

#[test]
fn uniform_scale_respects_floor() {
    let mut h = Harness::new(OBLIQUE, &[ToolKind::Scale]);
    let root = h.suite.nodes().scale_root;
    // a corner of the centre cube that no stem shadows
    h.press_at(Vec3::new(0.09, -0.09, 0.09));
    assert_eq!(h.suite.picks().arbiter().owner(), Some(DetectorId(9)));
    for _ in 0..20 {
        h.drag(Vec2::new(-0.2, -0.1));
        let gizmo = h.scene.transform(root).unwrap().scale;
        assert!(gizmo.min_element() > 1.0 / 25.0);
    }
    assert!(h.target().scale.x < 1.0);
}

#[test]
fn scale_handles_revert_and_target_keeps_scale() {
    let mut h = Harness::new(OBLIQUE, &[ToolKind::Scale]);
    let handle = h.suite.nodes().scale_handles[0];
    let root = h.suite.nodes().scale_root;
    let before = [
        *h.scene.transform(handle.stem).unwrap(),
        *h.scene.transform(handle.cap).unwrap(),
        *h.scene.transform(root).unwrap(),
    ];

    h.press_node(handle.cap);
    let mut total = 0.0;
    for dx in [-1.0, -0.5, 0.25] {
        for (_, action) in h.drag(Vec2::new(dx, 0.0)) {
            if let ToolAction::ScaledAxis { delta, .. } = action {
                total += delta;
            }
        }
    }
    h.release();

    let after = [
        *h.scene.transform(handle.stem).unwrap(),
        *h.scene.transform(handle.cap).unwrap(),
        *h.scene.transform(root).unwrap(),
    ];
    assert_eq!(before, after);
    approx::assert_relative_eq!(h.target().scale.x, 1.0 + total, epsilon = 1e-5);
}

#[test]
fn rotate_reverts_ring_and_accumulates_target() {
    let mut h = Harness::new(OBLIQUE, &[ToolKind::Rotate]);
    let root = h.suite.nodes().rotate_root;
    let baseline = h.scene.world_rotation(root).unwrap();

    // a point on the Z ring only
    let on_ring = Vec3::new(0.8, 0.8, 0.0).normalize() * 0.8;
    h.press_at(on_ring);
    assert_eq!(h.suite.picks().arbiter().owner(), Some(DetectorId(5)));

    let mut total = 0.0;
    for delta in [Vec2::new(1.0, 0.0), Vec2::new(0.5, -1.0), Vec2::new(-2.0, 0.25)] {
        for (_, action) in h.drag(delta) {
            if let ToolAction::Rotated { axis, degrees } = action {
                assert_eq!(axis, rg_gizmo::Axis::Z);
                total += degrees;
            }
        }
    }
    let expected = axis_angle_degrees(Vec3::NEG_Z, total);
    assert!(h.target().rotation.abs_diff_eq(expected, 1e-4));

    let actions = h.release();
    assert!(actions.contains(&(ToolKind::Rotate, ToolAction::Reverted)));
    assert!(h.scene.world_rotation(root).unwrap().abs_diff_eq(baseline, 1e-6));
    assert!(h.target().rotation.abs_diff_eq(expected, 1e-4));
    assert_ne!(h.target().rotation, Quat::IDENTITY);
}

#[test]
fn translate_is_linear_in_camera_distance() {
    let mut moved = Vec::new();
    for k in [1.0, 2.0] {
        let mut h = Harness::new(OBLIQUE * k, &[ToolKind::Translate]);
        h.press_at(Vec3::new(0.5, 0.0, 0.0));
        h.drag(Vec2::new(1.0, 0.0));
        moved.push(h.target().translation.x);
    }
    assert!(moved[0] < 0.0);
    approx::assert_relative_eq!(moved[1], 2.0 * moved[0], epsilon = 1e-4);
}

#[test]
fn view_returns_to_start_after_left_top_right() {
    let start = Vec3::new(10.0, 0.0, 0.0);
    let mut h = Harness::new(start, &[ToolKind::View]);
    let faces = h.suite.nodes().view_faces;
    let face = |f: ViewFace| faces[ViewFace::ALL.iter().position(|x| *x == f).unwrap()];

    h.wait(1.0);
    let actions = h.press_node(face(ViewFace::Left));
    assert_eq!(actions, vec![(ToolKind::View, ToolAction::Snapped(ViewFace::Left))]);
    let left = h.scene.world_position(h.container).unwrap();
    assert!(left.abs_diff_eq(Vec3::new(-10.0, 0.0, 0.0), 1e-3));
    h.release();

    h.wait(1.0);
    h.press_node(face(ViewFace::Top));
    assert!(h
        .scene
        .world_position(h.container)
        .unwrap()
        .abs_diff_eq(Vec3::new(0.0, 10.0, 0.0), 1e-3));
    h.release();

    h.wait(1.0);
    h.press_node(face(ViewFace::Right));
    let back = h.scene.world_position(h.container).unwrap();
    assert!(back.abs_diff_eq(start, 1e-3), "{back}");
    let view_root = h.suite.nodes().view_root;
    let rotation = h.scene.transform(view_root).unwrap().rotation;
    assert!(rotation.abs_diff_eq(ViewFace::Right.gizmo_rotation(), 1e-6));
}

#[test]
fn view_debounces_second_snap() {
    let mut h = Harness::new(Vec3::new(10.0, 0.0, 0.0), &[ToolKind::View]);
    let faces = h.suite.nodes().view_faces;

    h.wait(1.0);
    h.press_node(faces[0]);
    h.release();
    let after_first = h.scene.world_position(h.container).unwrap();

    // the top face is visible after a left snap, but the cooldown has not run out
    let actions = h.press_node(faces[2]);
    assert!(actions.is_empty());
    assert_eq!(h.scene.world_position(h.container), Some(after_first));
}

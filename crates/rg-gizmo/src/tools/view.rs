//! View cube: snap the camera to canonical vantages or orbit freely

use glam::{Quat, Vec3};
use rg_core::transform::euler_degrees;
use rg_core::{GizmoError, LabelId, NodeId, Scene, ViewConfig};

use super::{GizmoTool, ToolAction, ToolContext, require_node, require_renderer};
use crate::axis::Axis;
use crate::pick::{DetectorId, PickSystem};

const NAME: &str = "ViewTool";

/// One face of the view cube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewFace {
    /// Camera on -X looking toward +X
    Left,
    /// Camera on +X
    Right,
    /// Camera on +Y looking down
    Top,
    /// Camera on -Y looking up
    Bottom,
    /// Camera on -Z
    Front,
    /// Camera on +Z
    Back,
}

impl ViewFace {
    /// Faces in the order their detectors are scanned
    pub const ALL: [ViewFace; 6] = [
        ViewFace::Left,
        ViewFace::Right,
        ViewFace::Top,
        ViewFace::Bottom,
        ViewFace::Front,
        ViewFace::Back,
    ];

    /// Axis the camera sits on for this face
    pub fn axis(self) -> Axis {
        match self {
            ViewFace::Left | ViewFace::Right => Axis::X,
            ViewFace::Top | ViewFace::Bottom => Axis::Y,
            ViewFace::Front | ViewFace::Back => Axis::Z,
        }
    }

    /// Unit offset from the pivot to the camera
    pub fn camera_direction(self) -> Vec3 {
        match self {
            ViewFace::Left => Vec3::NEG_X,
            ViewFace::Right => Vec3::X,
            ViewFace::Top => Vec3::Y,
            ViewFace::Bottom => Vec3::NEG_Y,
            ViewFace::Front => Vec3::NEG_Z,
            ViewFace::Back => Vec3::Z,
        }
    }

    /// Orientation the view cube takes when this face is selected
    pub fn gizmo_rotation(self) -> Quat {
        match self {
            ViewFace::Left => euler_degrees(0.0, -90.0, 0.0),
            ViewFace::Right => euler_degrees(0.0, 90.0, 0.0),
            ViewFace::Top => euler_degrees(-90.0, 0.0, 0.0),
            ViewFace::Bottom => euler_degrees(90.0, 0.0, 0.0),
            ViewFace::Front => euler_degrees(0.0, 0.0, 0.0),
            ViewFace::Back => euler_degrees(0.0, 180.0, 0.0),
        }
    }

    /// Axes named by the side and top labels while this face is selected
    pub fn labels(self) -> (Axis, Axis) {
        match self.axis() {
            Axis::X => (Axis::Z, Axis::Y),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }
}

/// A face handle: its detector and the node whose renderer shows or hides it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewFaceHandle {
    /// Detector over the face
    pub detector: DetectorId,
    /// Face node
    pub node: NodeId,
}

/// Moves the camera container between six axis-aligned vantages around a
/// pivot, or orbits it while the centre handle is dragged.
///
/// A snap is followed by a cooldown during which further face presses are
/// ignored; the centre handle is never debounced. The pair of faces along
/// the current view axis is hidden, since it faces straight at or away from
/// the camera.
#[derive(Debug, Clone)]
pub struct ViewTool {
    gizmo: NodeId,
    pivot: NodeId,
    camera_container: NodeId,
    faces: [ViewFaceHandle; 6],
    center: DetectorId,
    side_label: LabelId,
    top_label: LabelId,
    config: ViewConfig,
    last_snap: f64,
}

impl ViewTool {
    /// Bind the tool to its nodes, six faces (in [`ViewFace::ALL`] order),
    /// centre detector and the two axis labels.
    ///
    /// The cooldown starts at `now`, and the front and back faces start hidden.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        scene: &mut Scene,
        picks: &PickSystem,
        gizmo: NodeId,
        pivot: NodeId,
        camera_container: NodeId,
        faces: [ViewFaceHandle; 6],
        center: DetectorId,
        labels: [LabelId; 2],
        config: ViewConfig,
        now: f64,
    ) -> Result<Self, GizmoError> {
        require_node(scene, NAME, "gizmo", gizmo)?;
        require_node(scene, NAME, "pivot", pivot)?;
        require_node(scene, NAME, "camera container", camera_container)?;
        for face in &faces {
            require_renderer(scene, NAME, "face", face.node)?;
        }
        picks.require(NAME, &faces.map(|f| f.detector))?;
        picks.require(NAME, &[center])?;
        if let Some(missing) = labels.iter().find(|l| scene.label(**l).is_none()) {
            return Err(GizmoError::MissingLabel {
                tool: NAME,
                index: missing.0,
            });
        }

        let tool = Self {
            gizmo,
            pivot,
            camera_container,
            faces,
            center,
            side_label: labels[0],
            top_label: labels[1],
            config,
            last_snap: now,
        };
        tool.show_faces_except(scene, Some(Axis::Z));
        Ok(tool)
    }

    /// Time of the last snap or orbit step
    pub fn last_snap(&self) -> f64 {
        self.last_snap
    }

    /// Current settings
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    fn show_faces_except(&self, scene: &mut Scene, hidden: Option<Axis>) {
        for (face, handle) in ViewFace::ALL.iter().zip(&self.faces) {
            scene.set_renderer_enabled(handle.node, Some(face.axis()) != hidden);
        }
    }

    fn snap(&self, scene: &mut Scene, face: ViewFace, pivot: Vec3) {
        let distance = scene
            .world_position(self.camera_container)
            .map_or(0.0, |p| p.distance(pivot));
        scene.set_world_position(
            self.camera_container,
            pivot + face.camera_direction() * distance,
        );
        if let Some(t) = scene.transform_mut(self.gizmo) {
            t.rotation = face.gizmo_rotation();
        }

        let (side, top) = face.labels();
        scene.set_label(self.side_label, side.label());
        scene.set_label(self.top_label, top.label());
        self.show_faces_except(scene, Some(face.axis()));
    }

    fn orbit(&self, scene: &mut Scene, pivot: Vec3, yaw: f32, pitch: f32) {
        scene.set_label(self.side_label, "");
        scene.set_label(self.top_label, "");

        scene.rotate_around(self.camera_container, pivot, Vec3::Y, yaw);
        scene.rotate_around(self.camera_container, pivot, Vec3::X, -pitch);

        if let Some(origin) = scene.world_position(self.gizmo) {
            scene.rotate_around(self.gizmo, origin, Vec3::Y, -yaw);
            scene.rotate_around(self.gizmo, origin, Vec3::X, pitch);
        }
        self.show_faces_except(scene, None);
    }
}

impl GizmoTool for ViewTool {
    fn name(&self) -> &'static str {
        NAME
    }

    fn detectors(&self) -> Vec<DetectorId> {
        let mut ids: Vec<DetectorId> = self.faces.iter().map(|f| f.detector).collect();
        ids.push(self.center);
        ids
    }

    fn tick(&mut self, ctx: &mut ToolContext<'_>) -> Option<ToolAction> {
        let time = ctx.input.time;
        if !ctx.picks.pressing(self.center) && time - self.last_snap < self.config.snap_cooldown_secs
        {
            return None;
        }

        let ids = self.detectors();
        let index = ctx.first_pressed(&ids)?;
        let pivot = ctx.scene.world_position(self.pivot)?;

        let action = match ViewFace::ALL.get(index) {
            Some(&face) => {
                self.snap(ctx.scene, face, pivot);
                tracing::debug!("View snapped to {:?}", face);
                ToolAction::Snapped(face)
            }
            None => {
                let gain = ctx.input.dt * self.config.orbit_speed;
                let yaw = ctx.input.delta.x * gain;
                let pitch = ctx.input.delta.y * gain;
                self.orbit(ctx.scene, pivot, yaw, pitch);
                tracing::debug!("View orbit: yaw {:.3}, pitch {:.3}", yaw, pitch);
                ToolAction::Orbited { yaw, pitch }
            }
        };

        ctx.scene.look_at(self.camera_container, pivot, Vec3::Y);
        self.last_snap = time;
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use glam::Vec2;

    struct Rig {
        f: Fixture,
        tool: ViewTool,
        gizmo: NodeId,
        container: NodeId,
        faces: [NodeId; 6],
        center: NodeId,
        labels: [LabelId; 2],
    }

    const PIVOT: Vec3 = Vec3::new(0.0, 0.0, -50.0);

    /// Face cubes laid out in a row in front of the picking camera; the main
    /// camera container starts on the right of the pivot.
    fn rig() -> Rig {
        let mut f = Fixture::new();
        let pivot = f.plain("pivot", PIVOT);
        let container = f.plain("camera_container", PIVOT + Vec3::X * 10.0);
        let gizmo = f.plain("view_gizmo", Vec3::new(0.0, -3.0, 0.0));

        let faces = ViewFace::ALL.map(|face| {
            let x = -5.0 + 2.0 * face as usize as f32;
            f.cube(None, &format!("{face:?}"), Vec3::new(x, 0.0, 0.0), 0.4)
        });
        let handles = faces.map(|node| {
            let name = f.scene.get(node).unwrap().name.clone();
            ViewFaceHandle {
                detector: f.detector(&name, vec![node]),
                node,
            }
        });
        let center = f.cube(None, "center", Vec3::new(0.0, 2.0, 0.0), 0.4);
        let center_detector = f.detector("center", vec![center]);
        let labels = [f.scene.create_label(), f.scene.create_label()];

        let tool = ViewTool::new(
            &mut f.scene,
            &f.picks,
            gizmo,
            pivot,
            container,
            handles,
            center_detector,
            labels,
            ViewConfig::default(),
            0.0,
        )
        .unwrap();
        Rig {
            f,
            tool,
            gizmo,
            container,
            faces,
            center,
            labels,
        }
    }

    fn container_position(r: &Rig) -> Vec3 {
        r.f.scene.world_position(r.container).unwrap()
    }

    fn face_node(r: &Rig, face: ViewFace) -> NodeId {
        r.faces[face as usize]
    }

    #[test]
    fn test_z_faces_start_hidden() {
        let r = rig();
        assert!(!r.f.scene.renderer_enabled(face_node(&r, ViewFace::Front)));
        assert!(!r.f.scene.renderer_enabled(face_node(&r, ViewFace::Back)));
        assert!(r.f.scene.renderer_enabled(face_node(&r, ViewFace::Left)));
    }

    #[test]
    fn test_snap_positions_camera_and_labels() {
        let mut r = rig();
        r.f.wait(1.0);
        let top = face_node(&r, ViewFace::Top);
        assert_eq!(r.f.press(top, &mut r.tool), Some(ToolAction::Snapped(ViewFace::Top)));

        assert!(container_position(&r).abs_diff_eq(PIVOT + Vec3::Y * 10.0, 1e-3));
        let gizmo = r.f.scene.transform(r.gizmo).unwrap().rotation;
        assert!(gizmo.abs_diff_eq(ViewFace::Top.gizmo_rotation(), 1e-6));
        assert_eq!(r.f.scene.label(r.labels[0]), Some("x"));
        assert_eq!(r.f.scene.label(r.labels[1]), Some("z"));

        assert!(!r.f.scene.renderer_enabled(top));
        assert!(!r.f.scene.renderer_enabled(face_node(&r, ViewFace::Bottom)));
        assert!(r.f.scene.renderer_enabled(face_node(&r, ViewFace::Front)));

        // the container looks at the pivot
        let forward = r.f.scene.world_rotation(r.container).unwrap() * Vec3::NEG_Z;
        assert!(forward.abs_diff_eq(Vec3::NEG_Y, 1e-4));
    }

    #[test]
    fn test_left_then_right_round_trip() {
        let mut r = rig();
        let start = container_position(&r);
        r.f.wait(1.0);
        let left = face_node(&r, ViewFace::Left);
        r.f.press(left, &mut r.tool);
        r.f.release(&mut r.tool);
        assert!(container_position(&r).abs_diff_eq(PIVOT - Vec3::X * 10.0, 1e-3));

        r.f.wait(1.0);
        let right = face_node(&r, ViewFace::Right);
        r.f.press(right, &mut r.tool);
        assert!(container_position(&r).abs_diff_eq(start, 1e-3));
        let gizmo = r.f.scene.transform(r.gizmo).unwrap().rotation;
        assert!(gizmo.abs_diff_eq(ViewFace::Right.gizmo_rotation(), 1e-6));
    }

    #[test]
    fn test_second_snap_within_cooldown_is_ignored() {
        let mut r = rig();
        r.f.wait(1.0);
        let left = face_node(&r, ViewFace::Left);
        let right = face_node(&r, ViewFace::Right);
        r.f.press(left, &mut r.tool);
        r.f.release(&mut r.tool);
        assert!(r.f.press(right, &mut r.tool).is_none());
        assert!(container_position(&r).abs_diff_eq(PIVOT - Vec3::X * 10.0, 1e-3));
    }

    #[test]
    fn test_first_snap_after_construction_is_debounced() {
        let mut r = rig();
        let top = face_node(&r, ViewFace::Top);
        assert!(r.f.press(top, &mut r.tool).is_none());
        assert_eq!(r.tool.last_snap(), 0.0);
    }

    #[test]
    fn test_center_orbits_inside_cooldown() {
        let mut r = rig();
        let center = r.center;
        let start = container_position(&r);
        assert_eq!(
            r.f.press(center, &mut r.tool),
            Some(ToolAction::Orbited {
                yaw: 0.0,
                pitch: 0.0
            })
        );
        assert_eq!(r.f.scene.label(r.labels[0]), Some(""));
        assert!(r.f.scene.renderer_enabled(face_node(&r, ViewFace::Front)));

        r.f.drag(Vec2::new(1.0, 0.0), &mut r.tool);
        let moved = container_position(&r);
        assert!(!moved.abs_diff_eq(start, 1e-3));
        approx::assert_relative_eq!(moved.distance(PIVOT), 10.0, epsilon = 1e-3);
        let forward = r.f.scene.world_rotation(r.container).unwrap() * Vec3::NEG_Z;
        assert!(forward.abs_diff_eq((PIVOT - moved).normalize(), 1e-4));
    }

    #[test]
    fn test_hidden_face_cannot_be_pressed() {
        let mut r = rig();
        r.f.wait(1.0);
        let front = face_node(&r, ViewFace::Front);
        assert!(r.f.press(front, &mut r.tool).is_none());
    }

    #[test]
    fn test_face_table() {
        assert_eq!(ViewFace::Left.labels(), (Axis::Z, Axis::Y));
        assert_eq!(ViewFace::Bottom.labels(), (Axis::X, Axis::Z));
        assert_eq!(ViewFace::Back.labels(), (Axis::X, Axis::Y));
        let back = ViewFace::Back.gizmo_rotation() * Vec3::Z;
        assert!(back.abs_diff_eq(Vec3::NEG_Z, 1e-6));
    }
}

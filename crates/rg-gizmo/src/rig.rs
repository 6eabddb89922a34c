//! Standard gizmo hierarchy
//!
//! Builds the handle nodes for all four tools, registers one detector per
//! handle and wires the tools to them. Handle geometry lives on the gizmo
//! layer so the picking camera sees nothing else.

use glam::{Quat, Vec3};
use rg_core::{
    BoundingBox, Collider, GizmoConfig, GizmoError, LabelId, LayerMask, MaterialId, MeshRenderer,
    Node, NodeId, Scene, Transform,
};

use crate::axis::Axis;
use crate::camera::PickingCamera;
use crate::constants::{rotate, scale, translate, view};
use crate::pick::{DetectorId, PickDetector, PickSystem};
use crate::tools::{
    RotateTool, ScaleHandle, ScaleTool, TranslateTool, ViewFace, ViewFaceHandle, ViewTool,
};

/// Handle nodes created by [`GizmoRig::build`]
#[derive(Debug, Clone)]
pub struct RigNodes {
    /// Root of the translate arrows
    pub translate_root: NodeId,
    /// Arrow per axis
    pub arrows: [NodeId; 3],
    /// Plane sub-handle per axis
    pub planes: [NodeId; 3],
    /// Root of the rotate rings
    pub rotate_root: NodeId,
    /// Ring per axis
    pub rings: [NodeId; 3],
    /// Root of the scale handles
    pub scale_root: NodeId,
    /// Stem, cap and detector per axis
    pub scale_handles: [ScaleHandle; 3],
    /// Uniform scale cube
    pub scale_center: NodeId,
    /// Root of the view cube, a child of the camera container
    pub view_root: NodeId,
    /// Face per [`ViewFace`], in [`ViewFace::ALL`] order
    pub view_faces: [NodeId; 6],
    /// Free-rotate cube
    pub view_center: NodeId,
    /// Side and top axis labels
    pub labels: [LabelId; 2],
}

/// A fully wired gizmo: pick system, picking camera and the four tools
#[derive(Debug)]
pub struct GizmoRig {
    /// Camera used for hit testing
    pub camera: PickingCamera,
    /// Every handle detector, in scan order
    pub picks: PickSystem,
    /// Translate tool
    pub translate: TranslateTool,
    /// Rotate tool
    pub rotate: RotateTool,
    /// Scale tool
    pub scale: ScaleTool,
    /// View tool
    pub view: ViewTool,
    /// Nodes created for the handles
    pub nodes: RigNodes,
}

struct Palette {
    axes: [MaterialId; 3],
    center: MaterialId,
    highlight: MaterialId,
}

/// Rotation taking local +Z onto `axis`
fn z_onto(axis: Axis) -> Quat {
    match axis {
        Axis::X => Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        Axis::Y => Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
        Axis::Z => Quat::IDENTITY,
    }
}

/// Half extents of `along` on `axis` and `across` on the other two
fn slab(axis: Axis, across: f32, along: f32) -> Vec3 {
    let mut half = Vec3::splat(across);
    half[axis.index()] = along;
    half
}

fn centered(half_extents: Vec3) -> BoundingBox {
    BoundingBox::from_center_half_extents(Vec3::ZERO, half_extents)
}

struct Builder<'a> {
    scene: &'a mut Scene,
    picks: PickSystem,
    palette: Palette,
    layer: u32,
    plane_marker: String,
}

impl Builder<'_> {
    fn root(
        &mut self,
        parent: Option<NodeId>,
        name: &str,
        transform: Transform,
    ) -> Result<NodeId, GizmoError> {
        let node = Node::new(name).with_transform(transform);
        match parent {
            Some(parent) => self.child(parent, node),
            None => Ok(self.scene.insert(node)),
        }
    }

    fn child(&mut self, parent: NodeId, node: Node) -> Result<NodeId, GizmoError> {
        self.scene
            .insert_child(parent, node)
            .ok_or(GizmoError::MissingNode {
                tool: "GizmoRig",
                role: "parent",
                id: parent,
            })
    }

    fn handle(
        &mut self,
        root: NodeId,
        name: String,
        transform: Transform,
        material: MaterialId,
        bounds: BoundingBox,
        collider: Collider,
    ) -> Result<NodeId, GizmoError> {
        let node = Node::new(name)
            .with_transform(transform)
            .with_renderer(MeshRenderer::new(material, bounds))
            .with_collider(collider)
            .with_layer(self.layer);
        self.child(root, node)
    }

    fn cube(
        &mut self,
        root: NodeId,
        name: String,
        position: Vec3,
        half: Vec3,
    ) -> Result<NodeId, GizmoError> {
        let material = self.palette.center;
        self.handle(
            root,
            name,
            Transform::from_translation(position),
            material,
            centered(half),
            Collider::Cuboid { half_extents: half },
        )
    }

    fn detector(&mut self, name: String, targets: Vec<NodeId>) -> Result<DetectorId, GizmoError> {
        let detector = PickDetector::new(name, targets, self.palette.highlight)
            .with_plane_marker(self.plane_marker.clone());
        self.picks.register(self.scene, detector)
    }

    fn translate_handles(&mut self, root: NodeId) -> Result<TranslateParts, GizmoError> {
        let mut arrows = [NodeId::default(); 3];
        let mut planes = [NodeId::default(); 3];
        let mut detectors = [DetectorId(0); 3];
        for axis in Axis::ALL {
            let i = axis.index();
            let tip = axis.unit() * translate::ARROW_LENGTH;
            arrows[i] = self.handle(
                root,
                format!("{}_arrow", axis.label()),
                Transform::IDENTITY,
                self.palette.axes[i],
                BoundingBox::from_center_half_extents(
                    tip * 0.5,
                    slab(axis, translate::HIT_RADIUS, translate::ARROW_LENGTH * 0.5),
                ),
                Collider::Cylinder {
                    start: Vec3::ZERO,
                    end: tip,
                    radius: translate::HIT_RADIUS,
                },
            )?;
            let half = slab(axis, translate::PLANE_SIZE * 0.5, translate::PLANE_THICKNESS);
            planes[i] = self.handle(
                root,
                format!("{}{}handle", axis.label(), self.plane_marker),
                Transform::from_translation((Vec3::ONE - axis.unit()) * translate::PLANE_OFFSET),
                self.palette.axes[i],
                centered(half),
                Collider::Cuboid { half_extents: half },
            )?;
            detectors[i] =
                self.detector(format!("translate_{}", axis.label()), vec![arrows[i], planes[i]])?;
        }
        Ok(TranslateParts {
            arrows,
            planes,
            detectors,
        })
    }

    fn rotate_handles(
        &mut self,
        root: NodeId,
    ) -> Result<([NodeId; 3], [DetectorId; 3]), GizmoError> {
        let mut rings = [NodeId::default(); 3];
        let mut detectors = [DetectorId(0); 3];
        for axis in Axis::ALL {
            let i = axis.index();
            rings[i] = self.handle(
                root,
                format!("{}_ring", axis.label()),
                Transform::IDENTITY,
                self.palette.axes[i],
                centered(slab(axis, rotate::RING_RADIUS, rotate::RING_HIT_THICKNESS)),
                Collider::Ring {
                    normal: axis.unit(),
                    radius: rotate::RING_RADIUS,
                    thickness: rotate::RING_HIT_THICKNESS,
                },
            )?;
            detectors[i] = self.detector(format!("rotate_{}", axis.label()), vec![rings[i]])?;
        }
        Ok((rings, detectors))
    }

    fn scale_handles(
        &mut self,
        root: NodeId,
    ) -> Result<([ScaleHandle; 3], NodeId, DetectorId), GizmoError> {
        let mut handles = [ScaleHandle {
            detector: DetectorId(0),
            stem: NodeId::default(),
            cap: NodeId::default(),
        }; 3];
        let half_length = scale::STEM_LENGTH * 0.5;
        for axis in Axis::ALL {
            let i = axis.index();
            let stem = self.handle(
                root,
                format!("{}_stem", axis.label()),
                Transform::from_translation(axis.unit() * half_length).with_rotation(z_onto(axis)),
                self.palette.axes[i],
                centered(Vec3::new(scale::STEM_RADIUS, scale::STEM_RADIUS, half_length)),
                Collider::Cylinder {
                    start: Vec3::new(0.0, 0.0, -half_length),
                    end: Vec3::new(0.0, 0.0, half_length),
                    radius: scale::STEM_HIT_RADIUS,
                },
            )?;
            let cap_half = Vec3::splat(scale::CAP_HALF_SIZE);
            let cap = self.handle(
                root,
                format!("{}_cap", axis.label()),
                Transform::from_translation(
                    axis.unit() * (scale::STEM_LENGTH + scale::CAP_HALF_SIZE),
                ),
                self.palette.axes[i],
                centered(cap_half),
                Collider::Cuboid {
                    half_extents: cap_half,
                },
            )?;
            let detector = self.detector(format!("scale_{}", axis.label()), vec![stem, cap])?;
            handles[i] = ScaleHandle {
                detector,
                stem,
                cap,
            };
        }
        let center = self.cube(
            root,
            "scale_center".to_string(),
            Vec3::ZERO,
            Vec3::splat(scale::CENTER_HALF_SIZE),
        )?;
        let center_detector = self.detector("scale_center".to_string(), vec![center])?;
        Ok((handles, center, center_detector))
    }

    fn view_handles(
        &mut self,
        root: NodeId,
    ) -> Result<([ViewFaceHandle; 6], NodeId, DetectorId), GizmoError> {
        let mut faces = [ViewFaceHandle {
            detector: DetectorId(0),
            node: NodeId::default(),
        }; 6];
        for (i, face) in ViewFace::ALL.into_iter().enumerate() {
            let axis = face.axis();
            let half = slab(axis, view::FACE_HALF_SIZE, view::FACE_HALF_DEPTH);
            let name = format!("view_{}", format!("{face:?}").to_lowercase());
            let node = self.handle(
                root,
                name.clone(),
                Transform::from_translation(face.camera_direction() * view::FACE_OFFSET),
                self.palette.axes[axis.index()],
                centered(half),
                Collider::Cuboid { half_extents: half },
            )?;
            faces[i] = ViewFaceHandle {
                detector: self.detector(name, vec![node])?,
                node,
            };
        }
        let center = self.cube(
            root,
            "view_center".to_string(),
            Vec3::ZERO,
            Vec3::splat(view::CENTER_HALF_SIZE),
        )?;
        let center_detector = self.detector("view_center".to_string(), vec![center])?;
        Ok((faces, center, center_detector))
    }
}

struct TranslateParts {
    arrows: [NodeId; 3],
    planes: [NodeId; 3],
    detectors: [DetectorId; 3],
}

impl GizmoRig {
    /// Build handles for all four tools around `target`.
    ///
    /// The camera container both carries the picking camera and is what the
    /// view tool moves around `pivot`; the view cube hangs off it so it stays
    /// in a corner of the screen. Detectors are registered translate, rotate,
    /// scale, view, which is also the order in which overlapping handles win.
    pub fn build(
        scene: &mut Scene,
        target: NodeId,
        pivot: NodeId,
        camera_container: NodeId,
        config: &GizmoConfig,
        now: f64,
    ) -> Result<Self, GizmoError> {
        for (role, id) in [
            ("target", target),
            ("pivot", pivot),
            ("camera container", camera_container),
        ] {
            if !scene.contains(id) {
                return Err(GizmoError::MissingNode {
                    tool: "GizmoRig",
                    role,
                    id,
                });
            }
        }

        let palette = Palette {
            axes: [
                scene.create_material("gizmo_x"),
                scene.create_material("gizmo_y"),
                scene.create_material("gizmo_z"),
            ],
            center: scene.create_material("gizmo_center"),
            highlight: scene.create_material("gizmo_highlight"),
        };
        let mut builder = Builder {
            scene,
            picks: PickSystem::new(),
            palette,
            layer: config.pick.gizmo_layer,
            plane_marker: config.pick.plane_marker.clone(),
        };

        let translate_root = builder.root(None, "translate_gizmo", Transform::IDENTITY)?;
        let translate_parts = builder.translate_handles(translate_root)?;
        let rotate_root = builder.root(None, "rotate_gizmo", Transform::IDENTITY)?;
        let (rings, ring_detectors) = builder.rotate_handles(rotate_root)?;
        let scale_root = builder.root(None, "scale_gizmo", Transform::IDENTITY)?;
        let (scale_handles, scale_center, scale_center_detector) =
            builder.scale_handles(scale_root)?;
        let view_root = builder.root(
            Some(camera_container),
            "view_gizmo",
            Transform::from_translation(view::ANCHOR),
        )?;
        let (view_faces, view_center, view_center_detector) = builder.view_handles(view_root)?;

        let Builder { scene, picks, .. } = builder;
        let labels = [scene.create_label(), scene.create_label()];

        let translate = TranslateTool::new(
            scene,
            &picks,
            translate_root,
            target,
            camera_container,
            translate_parts.detectors,
            config.translate.clone(),
        )?;
        let rotate = RotateTool::new(
            scene,
            &picks,
            rotate_root,
            target,
            ring_detectors,
            config.rotate.clone(),
        )?;
        let scale = ScaleTool::new(
            scene,
            &picks,
            scale_root,
            target,
            scale_handles,
            scale_center_detector,
            config.scale.clone(),
        )?;
        let view = ViewTool::new(
            scene,
            &picks,
            view_root,
            pivot,
            camera_container,
            view_faces,
            view_center_detector,
            labels,
            config.view.clone(),
            now,
        )?;

        let mut camera =
            PickingCamera::new(camera_container, LayerMask::single(config.pick.gizmo_layer));
        camera.set_fov_degrees(config.pick.fov_degrees);

        tracing::info!(
            "Gizmo rig built: {} detectors on layer {}",
            picks.len(),
            config.pick.gizmo_layer
        );

        Ok(Self {
            camera,
            picks,
            translate,
            rotate,
            scale,
            view,
            nodes: RigNodes {
                translate_root,
                arrows: translate_parts.arrows,
                planes: translate_parts.planes,
                rotate_root,
                rings,
                scale_root,
                scale_handles,
                scale_center,
                view_root,
                view_faces: view_faces.map(|f| f.node),
                view_center,
                labels,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> (Scene, NodeId, NodeId, NodeId) {
        let mut scene = Scene::new();
        let target = scene.insert(Node::new("target"));
        let pivot = scene.insert(Node::new("pivot"));
        let container = scene.insert(
            Node::new("camera_container")
                .with_transform(Transform::from_translation(Vec3::new(0.0, 0.0, 10.0))),
        );
        (scene, target, pivot, container)
    }

    #[test]
    fn test_build_registers_every_handle() {
        let (mut scene, target, pivot, container) = scene();
        let config = GizmoConfig::default();
        let rig = GizmoRig::build(&mut scene, target, pivot, container, &config, 0.0).unwrap();
        // 3 translate + 3 rotate + 3 scale + centre + 6 faces + centre
        assert_eq!(rig.picks.len(), 17);
        assert_eq!(scene.get(rig.nodes.view_root).unwrap().parent(), Some(container));
        assert!(scene.get(rig.nodes.planes[0]).unwrap().name.contains("_plane_"));
        assert!(scene.find_by_name("view_left").is_some());
    }

    #[test]
    fn test_stems_lie_along_their_axes() {
        let (mut scene, target, pivot, container) = scene();
        let config = GizmoConfig::default();
        let rig = GizmoRig::build(&mut scene, target, pivot, container, &config, 0.0).unwrap();
        for (axis, handle) in Axis::ALL.into_iter().zip(rig.nodes.scale_handles) {
            let size = scene.world_bounds(handle.stem).unwrap().size();
            approx::assert_relative_eq!(size[axis.index()], scale::STEM_LENGTH, epsilon = 1e-5);
            let cap = scene.world_position(handle.cap).unwrap();
            approx::assert_relative_eq!(
                cap[axis.index()],
                scale::STEM_LENGTH + scale::CAP_HALF_SIZE,
                epsilon = 1e-5
            );
        }
    }

    #[test]
    fn test_handle_under_missing_parent_fails() {
        let (mut scene, ..) = scene();
        let material = scene.create_material("m");
        let mut builder = Builder {
            scene: &mut scene,
            picks: PickSystem::new(),
            palette: Palette {
                axes: [material; 3],
                center: material,
                highlight: material,
            },
            layer: 8,
            plane_marker: "_plane_".to_string(),
        };
        let ghost = NodeId::new();
        let err = builder
            .cube(ghost, "orphan".to_string(), Vec3::ZERO, Vec3::ONE)
            .unwrap_err();
        assert_eq!(
            err,
            GizmoError::MissingNode {
                tool: "GizmoRig",
                role: "parent",
                id: ghost,
            }
        );
        assert!(builder.root(Some(ghost), "orphan_root", Transform::IDENTITY).is_err());
        assert!(builder.scene.find_by_name("orphan").is_none());
    }

    #[test]
    fn test_missing_target_fails() {
        let (mut scene, _, pivot, container) = scene();
        let err = GizmoRig::build(
            &mut scene,
            NodeId::new(),
            pivot,
            container,
            &GizmoConfig::default(),
            0.0,
        )
        .unwrap_err();
        assert!(matches!(err, GizmoError::MissingNode { role: "target", .. }));
    }
}

//! Scene graph the gizmo tools read from and write to
//!
//! The scene is a flat map of nodes keyed by [`NodeId`] with parent/child links.
//! Each node has a local [`Transform`]; world-space queries walk the parent
//! chain. Nodes may carry a [`MeshRenderer`] (appearance + bounds) and a
//! [`Collider`] (pickable shape), which is all the gizmo tools need to know
//! about rendering and physics.

use std::collections::HashMap;
use std::fmt;

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bounds::BoundingBox;
use crate::transform::{Transform, axis_angle_degrees, look_rotation};

/// Unique identifier of a scene node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to an appearance (material) owned by the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialId(pub u32);

/// Handle to an on-screen text sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelId(pub usize);

/// Coordinate space for offsets applied to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GizmoSpace {
    /// World axes
    Global,
    /// The node's own axes
    #[default]
    Local,
}

/// Bit set of layers a camera or raycast considers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const ALL: Self = Self(u32::MAX);

    pub fn single(layer: u32) -> Self {
        Self(1 << layer)
    }

    pub fn contains(&self, layer: u32) -> bool {
        layer < 32 && self.0 & (1 << layer) != 0
    }
}

/// Drawable part of a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshRenderer {
    pub enabled: bool,
    pub material: MaterialId,
    /// Mesh bounds in node-local space
    pub local_bounds: BoundingBox,
}

impl MeshRenderer {
    pub fn new(material: MaterialId, local_bounds: BoundingBox) -> Self {
        Self {
            enabled: true,
            material,
            local_bounds,
        }
    }
}

/// Pickable shape in node-local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collider {
    /// Finite cylinder between two points
    Cylinder { start: Vec3, end: Vec3, radius: f32 },
    /// Annulus centred on the node origin
    Ring {
        normal: Vec3,
        radius: f32,
        thickness: f32,
    },
    /// Box centred on the node origin
    Cuboid { half_extents: Vec3 },
    /// Sphere centred on the node origin
    Sphere { radius: f32 },
}

/// A node in the scene graph
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    pub transform: Transform,
    pub renderer: Option<MeshRenderer>,
    pub collider: Option<Collider>,
    pub layer: u32,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            parent: None,
            children: Vec::new(),
            transform: Transform::IDENTITY,
            renderer: None,
            collider: None,
            layer: 0,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_renderer(mut self, renderer: MeshRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.collider = Some(collider);
        self
    }

    pub fn with_layer(mut self, layer: u32) -> Self {
        self.layer = layer;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Scene graph
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: HashMap<NodeId, Node>,
    materials: Vec<String>,
    labels: Vec<String>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    // ============== Nodes ==============

    /// Insert a root node, returns its ID
    pub fn insert(&mut self, mut node: Node) -> NodeId {
        let id = node.id;
        node.parent = None;
        self.nodes.insert(id, node);
        id
    }

    /// Insert a node under `parent`. Returns `None` if the parent is unknown.
    pub fn insert_child(&mut self, parent: NodeId, mut node: Node) -> Option<NodeId> {
        let id = node.id;
        self.nodes.get_mut(&parent)?.children.push(id);
        node.parent = Some(parent);
        self.nodes.insert(id, node);
        Some(id)
    }

    /// Remove a node and its whole subtree
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let parent = self.nodes.get(&id)?.parent;
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != id);
        }
        for child in self.descendants(id).into_iter().skip(1) {
            self.nodes.remove(&child);
        }
        self.nodes.remove(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// First node with the given name
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes.values().find(|n| n.name == name).map(|n| n.id)
    }

    /// `id` followed by every node below it, depth first
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(&current) else {
                continue;
            };
            out.push(current);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    // ============== Local transforms ==============

    pub fn transform(&self, id: NodeId) -> Option<&Transform> {
        self.nodes.get(&id).map(|n| &n.transform)
    }

    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.nodes.get_mut(&id).map(|n| &mut n.transform)
    }

    // ============== World transforms ==============

    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        let node = self.nodes.get(&id)?;
        let local = node.transform.matrix();
        match node.parent {
            Some(parent) => Some(self.world_matrix(parent)? * local),
            None => Some(local),
        }
    }

    fn parent_world_matrix(&self, id: NodeId) -> Option<Mat4> {
        match self.nodes.get(&id)?.parent {
            Some(parent) => self.world_matrix(parent),
            None => Some(Mat4::IDENTITY),
        }
    }

    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        self.world_matrix(id).map(|m| m.w_axis.truncate())
    }

    pub fn world_rotation(&self, id: NodeId) -> Option<Quat> {
        let node = self.nodes.get(&id)?;
        match node.parent {
            Some(parent) => Some(self.world_rotation(parent)? * node.transform.rotation),
            None => Some(node.transform.rotation),
        }
    }

    pub fn set_world_position(&mut self, id: NodeId, position: Vec3) -> bool {
        let Some(parent) = self.parent_world_matrix(id) else {
            return false;
        };
        let local = parent.inverse().transform_point3(position);
        match self.transform_mut(id) {
            Some(t) => {
                t.translation = local;
                true
            }
            None => false,
        }
    }

    pub fn set_world_rotation(&mut self, id: NodeId, rotation: Quat) -> bool {
        let parent = match self.nodes.get(&id).map(|n| n.parent) {
            Some(Some(parent)) => match self.world_rotation(parent) {
                Some(r) => r,
                None => return false,
            },
            Some(None) => Quat::IDENTITY,
            None => return false,
        };
        match self.transform_mut(id) {
            Some(t) => {
                t.rotation = (parent.inverse() * rotation).normalize();
                true
            }
            None => false,
        }
    }

    /// Move a node by `offset`, interpreted in `space`
    pub fn translate(&mut self, id: NodeId, offset: Vec3, space: GizmoSpace) -> bool {
        let (Some(position), Some(rotation)) = (self.world_position(id), self.world_rotation(id))
        else {
            return false;
        };
        let offset = match space {
            GizmoSpace::Global => offset,
            GizmoSpace::Local => rotation * offset,
        };
        self.set_world_position(id, position + offset)
    }

    /// Rotate a node about a world axis through its own origin
    pub fn rotate_world(&mut self, id: NodeId, axis: Vec3, degrees: f32) -> bool {
        let Some(rotation) = self.world_rotation(id) else {
            return false;
        };
        self.set_world_rotation(id, axis_angle_degrees(axis, degrees) * rotation)
    }

    /// Rotate a node about a world axis passing through `point`
    pub fn rotate_around(&mut self, id: NodeId, point: Vec3, axis: Vec3, degrees: f32) -> bool {
        let (Some(position), Some(rotation)) = (self.world_position(id), self.world_rotation(id))
        else {
            return false;
        };
        let q = axis_angle_degrees(axis, degrees);
        self.set_world_position(id, point + q * (position - point))
            && self.set_world_rotation(id, q * rotation)
    }

    /// Turn a node so its -Z axis faces `target`
    pub fn look_at(&mut self, id: NodeId, target: Vec3, up: Vec3) -> bool {
        let Some(position) = self.world_position(id) else {
            return false;
        };
        if (target - position).length_squared() < f32::EPSILON {
            return false;
        }
        self.set_world_rotation(id, look_rotation(target - position, up))
    }

    // ============== Rendering ==============

    pub fn renderer(&self, id: NodeId) -> Option<&MeshRenderer> {
        self.nodes.get(&id)?.renderer.as_ref()
    }

    pub fn renderer_mut(&mut self, id: NodeId) -> Option<&mut MeshRenderer> {
        self.nodes.get_mut(&id)?.renderer.as_mut()
    }

    /// Missing renderers count as disabled
    pub fn renderer_enabled(&self, id: NodeId) -> bool {
        self.renderer(id).is_some_and(|r| r.enabled)
    }

    pub fn set_renderer_enabled(&mut self, id: NodeId, enabled: bool) {
        if let Some(renderer) = self.renderer_mut(id) {
            renderer.enabled = enabled;
        }
    }

    /// Bounds of the node's mesh after its world transform is applied
    pub fn world_bounds(&self, id: NodeId) -> Option<BoundingBox> {
        let local = self.renderer(id)?.local_bounds;
        Some(local.transform(&self.world_matrix(id)?))
    }

    pub fn create_material(&mut self, name: impl Into<String>) -> MaterialId {
        self.materials.push(name.into());
        MaterialId(self.materials.len() as u32 - 1)
    }

    pub fn material_name(&self, id: MaterialId) -> Option<&str> {
        self.materials.get(id.0 as usize).map(String::as_str)
    }

    // ============== Labels ==============

    pub fn create_label(&mut self) -> LabelId {
        self.labels.push(String::new());
        LabelId(self.labels.len() - 1)
    }

    pub fn set_label(&mut self, id: LabelId, text: &str) {
        if let Some(label) = self.labels.get_mut(id.0) {
            label.clear();
            label.push_str(text);
        }
    }

    pub fn label(&self, id: LabelId) -> Option<&str> {
        self.labels.get(id.0).map(String::as_str)
    }
}

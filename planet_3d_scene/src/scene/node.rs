/// Scene node types.
///
/// A node is a local transform plus what it carries (nothing, a mesh, a
/// light or the camera anchor). Parent/child links are owned by `Scene`,
/// which keeps the tree single-owner and acyclic.

use bitflags::bitflags;
use glam::{EulerRot, Mat4, Quat, Vec3};
use slotmap::new_key_type;
use crate::resource::{GeometryKey, MaterialKey};

new_key_type! {
    /// Stable key for a node within a Scene.
    ///
    /// Remains valid until the node (or one of its ancestors) is removed.
    pub struct NodeKey;
}

bitflags! {
    /// Per-node flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u32 {
        /// Node and its subtree are submitted for drawing
        const VISIBLE = 1 << 0;
    }
}

// ===== TRANSFORM =====

/// Local transform: translation, Euler rotation (XYZ order, radians), scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// T * R * S
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation_quat(), self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ===== PAYLOAD =====

/// Light sources
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Omnidirectional light at the node position; `distance` 0 means unlimited range
    Point { color: Vec3, intensity: f32, distance: f32 },
    /// Uniform fill light
    Ambient { color: Vec3, intensity: f32 },
}

/// What a node carries
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    /// Transform-only grouping node
    Group,
    /// Drawable surface
    Mesh { geometry: GeometryKey, material: MaterialKey },
    Light(Light),
    /// Mirrors the camera position into the tree
    CameraAnchor,
}

// ===== NODE =====

/// A renderable node
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    kind: NodeKind,
    transform: Transform,
    flags: NodeFlags,
    pub(super) parent: Option<NodeKey>,
    pub(super) children: Vec<NodeKey>,
}

impl Node {
    fn with_kind(name: &str, kind: NodeKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            transform: Transform::IDENTITY,
            flags: NodeFlags::VISIBLE,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn group(name: &str) -> Self {
        Self::with_kind(name, NodeKind::Group)
    }

    pub fn mesh(name: &str, geometry: GeometryKey, material: MaterialKey) -> Self {
        Self::with_kind(name, NodeKind::Mesh { geometry, material })
    }

    pub fn light(name: &str, light: Light) -> Self {
        Self::with_kind(name, NodeKind::Light(light))
    }

    pub fn camera_anchor(name: &str) -> Self {
        Self::with_kind(name, NodeKind::CameraAnchor)
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.transform.scale = scale;
        self
    }

    // ===== GETTERS =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    pub fn is_visible(&self) -> bool {
        self.flags.contains(NodeFlags::VISIBLE)
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    pub fn is_mesh(&self) -> bool {
        matches!(self.kind, NodeKind::Mesh { .. })
    }

    // ===== SETTERS =====

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.flags.set(NodeFlags::VISIBLE, visible);
    }
}

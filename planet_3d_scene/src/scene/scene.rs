/// Scene: the node tree plus the geometries and materials it references.
///
/// Uses SlotMaps for O(1) insert/remove with stable keys. Geometries and
/// materials are shared by key, so a thousand stars cost one of each.
///
/// Invariant: every node except the root has exactly one parent, and the
/// parent links never form a cycle.

use glam::{Mat4, Vec3};
use slotmap::SlotMap;
use crate::error::Result;
use crate::engine_bail;
use crate::resource::{
    Geometry, GeometryKey, Material, MaterialDesc, MaterialKey,
};
use super::node::{Node, NodeKey, Transform};

const SOURCE: &str = "planet3d::Scene";

/// A renderable scene tree
pub struct Scene {
    nodes: SlotMap<NodeKey, Node>,
    geometries: SlotMap<GeometryKey, Geometry>,
    materials: SlotMap<MaterialKey, Material>,
    root: NodeKey,
}

impl Scene {
    /// Create a scene holding only the root group
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::group("root"));
        Self {
            nodes,
            geometries: SlotMap::with_key(),
            materials: SlotMap::with_key(),
            root,
        }
    }

    pub fn root(&self) -> NodeKey {
        self.root
    }

    // ===== RESOURCES =====

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryKey {
        self.geometries.insert(geometry)
    }

    pub fn geometry(&self, key: GeometryKey) -> Option<&Geometry> {
        self.geometries.get(key)
    }

    /// Create a material (missing required parameters get their defaults)
    pub fn add_material(&mut self, desc: MaterialDesc) -> Result<MaterialKey> {
        let material = Material::from_desc(desc)?;
        Ok(self.materials.insert(material))
    }

    pub fn material(&self, key: MaterialKey) -> Option<&Material> {
        self.materials.get(key)
    }

    pub fn material_mut(&mut self, key: MaterialKey) -> Option<&mut Material> {
        self.materials.get_mut(key)
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn geometry_count(&self) -> usize {
        self.geometries.len()
    }

    // ===== TREE =====

    /// Insert `node` as the last child of `parent`
    pub fn add_node(&mut self, parent: NodeKey, mut node: Node) -> Result<NodeKey> {
        if !self.nodes.contains_key(parent) {
            engine_bail!(InvalidResource; SOURCE,
                "Cannot add '{}': parent key does not exist", node.name());
        }
        node.parent = Some(parent);
        node.children.clear();
        let key = self.nodes.insert(node);
        self.nodes[parent].children.push(key);
        Ok(key)
    }

    /// Remove a node and its whole subtree. Returns the number of nodes removed.
    pub fn remove_node(&mut self, key: NodeKey) -> Result<usize> {
        if key == self.root {
            engine_bail!(InvalidHierarchy; SOURCE, "The root node cannot be removed");
        }
        let Some(parent) = self.nodes.get(key).map(|n| n.parent) else {
            engine_bail!(InvalidResource; SOURCE, "Cannot remove: node key does not exist");
        };
        if let Some(parent) = parent {
            self.nodes[parent].children.retain(|&c| c != key);
        }

        let mut stack = vec![key];
        let mut removed = 0;
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Move `key` under `new_parent`, rejecting moves that would create a cycle
    pub fn reparent(&mut self, key: NodeKey, new_parent: NodeKey) -> Result<()> {
        if key == self.root {
            engine_bail!(InvalidHierarchy; SOURCE, "The root node cannot be reparented");
        }
        if !self.nodes.contains_key(key) || !self.nodes.contains_key(new_parent) {
            engine_bail!(InvalidResource; SOURCE, "Cannot reparent: unknown node key");
        }
        if key == new_parent || self.is_ancestor(key, new_parent) {
            engine_bail!(InvalidHierarchy; SOURCE,
                "Cannot move '{}' under its own descendant", self.nodes[key].name());
        }

        if let Some(old_parent) = self.nodes[key].parent {
            self.nodes[old_parent].children.retain(|&c| c != key);
        }
        self.nodes[key].parent = Some(new_parent);
        self.nodes[new_parent].children.push(key);
        Ok(())
    }

    /// Whether `ancestor` lies on the parent chain of `node`
    pub fn is_ancestor(&self, ancestor: NodeKey, node: NodeKey) -> bool {
        let mut current = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(key) = current {
            if key == ancestor {
                return true;
            }
            current = self.nodes.get(key).and_then(|n| n.parent);
        }
        false
    }

    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    pub fn transform(&self, key: NodeKey) -> Option<&Transform> {
        self.nodes.get(key).map(Node::transform)
    }

    pub fn transform_mut(&mut self, key: NodeKey) -> Option<&mut Transform> {
        self.nodes.get_mut(key).map(Node::transform_mut)
    }

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes.get(key).and_then(Node::parent)
    }

    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.nodes.get(key).map(Node::children).unwrap_or(&[])
    }

    /// First node with this name, in depth-first order from the root
    pub fn find_by_name(&self, name: &str) -> Option<NodeKey> {
        let mut stack = vec![self.root];
        while let Some(key) = stack.pop() {
            let node = &self.nodes[key];
            if node.name() == name {
                return Some(key);
            }
            stack.extend(node.children().iter().rev());
        }
        None
    }

    /// Total node count, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeKey, &Node)> {
        self.nodes.iter()
    }

    // ===== WORLD SPACE =====

    /// Local matrix composed with every ancestor's
    pub fn world_matrix(&self, key: NodeKey) -> Option<Mat4> {
        let mut matrix = self.nodes.get(key)?.transform().local_matrix();
        let mut current = self.nodes[key].parent;
        while let Some(parent) = current {
            let node = &self.nodes[parent];
            matrix = node.transform().local_matrix() * matrix;
            current = node.parent;
        }
        Some(matrix)
    }

    pub fn world_position(&self, key: NodeKey) -> Option<Vec3> {
        self.world_matrix(key).map(|m| m.w_axis.truncate())
    }

    /// Depth-first walk of visible nodes with their world matrices.
    ///
    /// A hidden node hides its whole subtree.
    pub fn visit_world<F>(&self, mut visit: F)
    where
        F: FnMut(NodeKey, &Node, &Mat4),
    {
        let mut stack = vec![(self.root, Mat4::IDENTITY)];
        while let Some((key, parent_world)) = stack.pop() {
            let node = &self.nodes[key];
            if !node.is_visible() {
                continue;
            }
            let world = parent_world * node.transform().local_matrix();
            visit(key, node, &world);
            for &child in node.children().iter().rev() {
                stack.push((child, world));
            }
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;

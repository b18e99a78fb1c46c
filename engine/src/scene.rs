//! Scene Graph
//!
//! A tree of named transform nodes. Each node stores a translation and an
//! Euler rotation relative to its parent; world transforms are composed on
//! demand by walking up to the root.
//!
//! Nodes live in one arena (`Vec<SceneNode>`) and refer to each other by
//! [`NodeId`]. Parents own their child lists and every child keeps a back
//! reference to its parent, so there are no reference cycles.
//!
//! # Example
//!
//! ```ignore
//! use woborms_engine::scene::SceneGraph;
//! use glam::Vec3;
//!
//! let mut graph = SceneGraph::new();
//! let waist = graph.add_root("waist", Vec3::new(0.0, 1.0, 0.0));
//! let torso = graph.add_child(waist, "torso", Vec3::new(0.0, 0.5, 0.0));
//! assert_eq!(graph.world_position(torso), Vec3::new(0.0, 1.5, 0.0));
//! ```

use std::collections::HashMap;

use glam::{Affine3A, EulerRot, Quat, Vec3};

/// Index of a node inside its [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// One animatable scalar of a node's local transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    PositionX,
    PositionY,
    PositionZ,
    RotationX,
    RotationY,
    RotationZ,
}

/// A transform node with parent-relative offsets.
#[derive(Debug, Clone)]
pub struct SceneNode {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Offset from the parent origin
    pub translation: Vec3,
    /// Euler angles (radians), applied in XYZ order
    pub rotation: Vec3,
}

impl SceneNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn get(&self, channel: Channel) -> f32 {
        match channel {
            Channel::PositionX => self.translation.x,
            Channel::PositionY => self.translation.y,
            Channel::PositionZ => self.translation.z,
            Channel::RotationX => self.rotation.x,
            Channel::RotationY => self.rotation.y,
            Channel::RotationZ => self.rotation.z,
        }
    }

    pub fn set(&mut self, channel: Channel, value: f32) {
        match channel {
            Channel::PositionX => self.translation.x = value,
            Channel::PositionY => self.translation.y = value,
            Channel::PositionZ => self.translation.z = value,
            Channel::RotationX => self.rotation.x = value,
            Channel::RotationY => self.rotation.y = value,
            Channel::RotationZ => self.rotation.z = value,
        }
    }

    /// Local rotation as a quaternion.
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Transform from this node's space into its parent's space.
    pub fn local_transform(&self) -> Affine3A {
        Affine3A::from_rotation_translation(self.orientation(), self.translation)
    }
}

/// Arena of scene nodes with name lookup.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    names: HashMap<String, NodeId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node without a parent.
    pub fn add_root(&mut self, name: &str, translation: Vec3) -> NodeId {
        self.insert(name, None, translation)
    }

    /// Add a node under `parent`.
    pub fn add_child(&mut self, parent: NodeId, name: &str, translation: Vec3) -> NodeId {
        let id = self.insert(name, Some(parent), translation);
        if let Some(p) = self.nodes.get_mut(parent.0) {
            p.children.push(id);
        }
        id
    }

    fn insert(&mut self, name: &str, parent: Option<NodeId>, translation: Vec3) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode {
            name: name.to_string(),
            parent,
            children: Vec::new(),
            translation,
            rotation: Vec3::ZERO,
        });
        self.names.insert(name.to_string(), id);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by name. Later nodes shadow earlier ones with the same name.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0)
    }

    /// Read one channel of a node (0 for unknown nodes).
    pub fn get(&self, id: NodeId, channel: Channel) -> f32 {
        self.node(id).map_or(0.0, |n| n.get(channel))
    }

    /// Write one channel of a node. Unknown nodes are ignored.
    pub fn set(&mut self, id: NodeId, channel: Channel, value: f32) {
        if let Some(node) = self.node_mut(id) {
            node.set(channel, value);
        }
    }

    /// Root of the tree containing `id`.
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.node(current).and_then(SceneNode::parent) {
            current = parent;
        }
        current
    }

    /// Compose local transforms from the root down to `id`.
    pub fn world_transform(&self, id: NodeId) -> Affine3A {
        let mut transform = Affine3A::IDENTITY;
        let mut current = Some(id);
        while let Some(node) = current.and_then(|c| self.node(c)) {
            transform = node.local_transform() * transform;
            current = node.parent;
        }
        transform
    }

    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.world_transform(id).translation.into()
    }

    /// Depth-first list of `id` and all its descendants.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            if let Some(node) = self.node(current) {
                stack.extend(node.children.iter().rev());
            }
        }
        out
    }
}

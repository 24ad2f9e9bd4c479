//! Node arena and its shared handle

use parking_lot::RwLock;
use std::sync::Arc;

use crate::error::SceneError;
use crate::interactivity::InteractivityCache;
use crate::node::{Control, Node, NodeId};
use crate::Result;

/// Arena of rendering nodes. Freed slots are never reused, so a stale
/// [`NodeId`] reports `NodeNotFound` instead of aliasing a newer node.
#[derive(Debug, Default)]
pub struct NodeTree {
    nodes: Vec<Option<Node>>,
}

impl NodeTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_node(&mut self, name: impl Into<String>) -> NodeId {
        self.insert(Node::new(name, None))
    }

    pub fn create_control(&mut self, name: impl Into<String>, control: Control) -> NodeId {
        self.insert(Node::new(name, Some(control)))
    }

    fn insert(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(node));
        id
    }

    pub fn contains(&self, id: NodeId) -> bool {
        matches!(self.nodes.get(id.0), Some(Some(_)))
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(SceneError::NodeNotFound(id))
    }

    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(SceneError::NodeNotFound(id))
    }

    /// Attach `child` under `parent`, detaching it from its previous parent
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.get(child)?;
        self.get(parent)?;

        // Walk up from the parent to refuse cycles
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(SceneError::CyclicAttach { parent, child });
            }
            cursor = self.get(id)?.parent;
        }

        if let Some(old_parent) = self.get(child)?.parent {
            self.get_mut(old_parent)?.children.retain(|c| *c != child);
        }

        self.get_mut(parent)?.children.push(child);
        self.get_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Remove a node and its whole subtree. Returns the removed ids, root first.
    pub fn free(&mut self, id: NodeId) -> Result<Vec<NodeId>> {
        if let Some(parent) = self.get(id)?.parent {
            if let Ok(parent) = self.get_mut(parent) {
                parent.children.retain(|c| *c != id);
            }
        }

        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(current.0).and_then(Option::take) {
                removed.push(current);
                stack.extend(node.children.iter().rev().copied());
            }
        }

        tracing::debug!(node = %id, removed = removed.len(), "Freed node subtree");

        Ok(removed)
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<()> {
        self.get_mut(id)?.visible = visible;
        Ok(())
    }

    pub fn is_visible(&self, id: NodeId) -> Result<bool> {
        Ok(self.get(id)?.visible)
    }

    pub fn set_opacity(&mut self, id: NodeId, opacity: f32) -> Result<()> {
        self.get_mut(id)?.opacity = opacity.clamp(0.0, 1.0);
        Ok(())
    }

    pub fn opacity(&self, id: NodeId) -> Result<f32> {
        Ok(self.get(id)?.opacity)
    }

    pub fn control(&self, id: NodeId) -> Result<Control> {
        self.get(id)?.control.ok_or(SceneError::NotAControl(id))
    }

    pub fn set_control(&mut self, id: NodeId, control: Control) -> Result<()> {
        self.get_mut(id)?.control = Some(control);
        Ok(())
    }

    pub fn set_view_root(&mut self, id: NodeId, view_root: bool) -> Result<()> {
        self.get_mut(id)?.view_root = view_root;
        Ok(())
    }
}

/// Shared handle to a [`NodeTree`].
///
/// All clones point at the same arena. Node operations are short and never
/// call back into user code while the lock is held.
pub struct SceneTree {
    tree: Arc<RwLock<NodeTree>>,
}

impl SceneTree {
    pub fn new() -> Self {
        Self {
            tree: Arc::new(RwLock::new(NodeTree::new())),
        }
    }

    pub fn with_tree<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&NodeTree) -> T,
    {
        let tree = self.tree.read();
        f(&tree)
    }

    pub fn with_tree_mut<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut NodeTree) -> T,
    {
        let mut tree = self.tree.write();
        f(&mut tree)
    }

    /// Returns true if both handles point at the same arena
    pub fn same_tree(&self, other: &SceneTree) -> bool {
        Arc::ptr_eq(&self.tree, &other.tree)
    }

    pub fn create_node(&self, name: impl Into<String>) -> NodeId {
        self.with_tree_mut(|tree| tree.create_node(name))
    }

    pub fn create_control(&self, name: impl Into<String>, control: Control) -> NodeId {
        self.with_tree_mut(|tree| tree.create_control(name, control))
    }

    pub fn add_child(&self, parent: NodeId, child: NodeId) -> Result<()> {
        self.with_tree_mut(|tree| tree.add_child(parent, child))
    }

    pub fn free(&self, id: NodeId) -> Result<Vec<NodeId>> {
        self.with_tree_mut(|tree| tree.free(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.with_tree(|tree| tree.contains(id))
    }

    pub fn name(&self, id: NodeId) -> Result<String> {
        self.with_tree(|tree| Ok(tree.get(id)?.name.clone()))
    }

    pub fn set_visible(&self, id: NodeId, visible: bool) -> Result<()> {
        self.with_tree_mut(|tree| tree.set_visible(id, visible))
    }

    pub fn is_visible(&self, id: NodeId) -> Result<bool> {
        self.with_tree(|tree| tree.is_visible(id))
    }

    pub fn set_opacity(&self, id: NodeId, opacity: f32) -> Result<()> {
        self.with_tree_mut(|tree| tree.set_opacity(id, opacity))
    }

    pub fn opacity(&self, id: NodeId) -> Result<f32> {
        self.with_tree(|tree| tree.opacity(id))
    }

    pub fn control(&self, id: NodeId) -> Result<Control> {
        self.with_tree(|tree| tree.control(id))
    }

    pub fn set_control(&self, id: NodeId, control: Control) -> Result<()> {
        self.with_tree_mut(|tree| tree.set_control(id, control))
    }

    pub fn set_view_root(&self, id: NodeId, view_root: bool) -> Result<()> {
        self.with_tree_mut(|tree| tree.set_view_root(id, view_root))
    }

    /// Toggle focus and pointer input for every control under `root`.
    /// See [`NodeTree::set_subtree_interactive`].
    pub fn set_subtree_interactive(
        &self,
        root: NodeId,
        enabled: bool,
        cache: &mut InteractivityCache,
    ) -> Result<()> {
        self.with_tree_mut(|tree| tree.set_subtree_interactive(root, enabled, cache))
    }
}

impl Default for SceneTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SceneTree {
    fn clone(&self) -> Self {
        Self {
            tree: Arc::clone(&self.tree),
        }
    }
}

impl std::fmt::Debug for SceneTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneTree")
            .field("nodes", &self.with_tree(NodeTree::len))
            .finish()
    }
}

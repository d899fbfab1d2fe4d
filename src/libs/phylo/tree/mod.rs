pub mod io;
pub mod ops;
pub mod query;
pub mod stat;
#[cfg(test)]
mod tests;
pub mod traversal;

use super::node::{Node, NodeId};

#[derive(Debug, Default, Clone)]
pub struct Tree {
    /// Arena storage for all nodes
    pub(super) nodes: Vec<Node>,

    /// Optional root ID (a tree might be empty or in construction)
    pub(super) root: Option<NodeId>,
}

impl Tree {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new detached node to the tree. Returns the new node's ID.
    pub fn add_node(&mut self) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new(id));
        id
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| !n.deleted).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get_root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id).filter(|n| !n.deleted)
    }

    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id).filter(|n| !n.deleted)
    }

    pub fn set_root(&mut self, id: NodeId) {
        if self.get_node(id).is_some() {
            self.root = Some(id);
        }
    }

    /// Parent of a live node, None at the root.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.get_node(id).and_then(|n| n.parent)
    }

    // --- Delegation to ops ---

    pub fn add_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<(), String> {
        ops::add_child(self, parent_id, child_id)
    }

    pub fn detach_children(&mut self, id: NodeId) {
        ops::detach_children(self, id)
    }

    pub fn unroot(&mut self) -> Result<(), String> {
        ops::unroot(self)
    }

    // --- Delegation to traversal ---

    pub fn preorder(&self, start_node: &NodeId) -> Result<Vec<NodeId>, String> {
        Ok(traversal::preorder(self, *start_node))
    }

    pub fn postorder(&self, start_node: &NodeId) -> Result<Vec<NodeId>, String> {
        Ok(traversal::postorder(self, *start_node))
    }

    pub fn preorder_until<F>(&self, start_node: &NodeId, stop: F) -> Vec<NodeId>
    where
        F: Fn(NodeId) -> bool,
    {
        traversal::preorder_until(self, *start_node, stop)
    }

    // --- Delegation to query ---

    pub fn get_path_from_root(&self, id: &NodeId) -> Result<Vec<NodeId>, String> {
        query::get_path_from_root(self, id)
    }

    pub fn get_common_ancestor(&self, a: &NodeId, b: &NodeId) -> Result<NodeId, String> {
        query::get_common_ancestor(self, a, b)
    }

    pub fn get_distance(&self, a: &NodeId, b: &NodeId) -> Result<(f64, usize), String> {
        query::get_distance(self, a, b)
    }

    pub fn get_node_by_name(&self, name: &str) -> Option<NodeId> {
        query::get_node_by_name(self, name)
    }

    pub fn get_leaf_by_name(&self, name: &str) -> Option<NodeId> {
        query::get_leaf_by_name(self, name)
    }

    // --- Delegation to stat ---

    pub fn get_leaves(&self) -> Vec<NodeId> {
        match self.root {
            Some(root) => stat::get_leaves(self, root),
            None => Vec::new(),
        }
    }

    /// Leaf names of the whole tree, left to right.
    pub fn get_leaf_names(&self) -> Vec<String> {
        match self.root {
            Some(root) => stat::get_leaf_names(self, root),
            None => Vec::new(),
        }
    }

    pub fn leaves_under(&self, id: NodeId) -> Vec<NodeId> {
        stat::get_leaves(self, id)
    }

    pub fn leaf_names_under(&self, id: NodeId) -> Vec<String> {
        stat::get_leaf_names(self, id)
    }

    pub fn leaf_count(&self, id: NodeId) -> usize {
        stat::get_leaves(self, id).len()
    }

    pub fn leaf_counts(&self) -> Vec<usize> {
        stat::leaf_counts(self)
    }

    pub fn is_rooted(&self) -> bool {
        stat::is_rooted(self)
    }

    // --- Delegation to io ---

    pub fn from_file(infile: &str) -> anyhow::Result<Tree> {
        io::from_file(infile)
    }

    pub fn to_newick(&self) -> String {
        io::to_newick(self)
    }

    pub fn to_newick_subtree(&self, root: NodeId) -> String {
        io::to_newick_subtree(self, root)
    }
}

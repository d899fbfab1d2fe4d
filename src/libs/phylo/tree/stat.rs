use super::Tree;
use crate::libs::phylo::node::NodeId;

/// IDs of all leaves below `id`, left to right.
pub fn get_leaves(tree: &Tree, id: NodeId) -> Vec<NodeId> {
    super::traversal::preorder(tree, id)
        .into_iter()
        .filter(|&n| tree.nodes[n].is_leaf())
        .collect()
}

/// Names of all leaves below `id`, left to right. Unnamed leaves are skipped.
pub fn get_leaf_names(tree: &Tree, id: NodeId) -> Vec<String> {
    get_leaves(tree, id)
        .into_iter()
        .filter_map(|leaf| tree.nodes[leaf].name.clone())
        .collect()
}

/// Leaf count of every node, indexed by NodeId, in one postorder pass.
/// Deleted nodes count zero.
pub fn leaf_counts(tree: &Tree) -> Vec<usize> {
    let mut counts = vec![0; tree.nodes.len()];
    let root = match tree.root {
        Some(r) => r,
        None => return counts,
    };

    for id in super::traversal::postorder(tree, root) {
        let node = &tree.nodes[id];
        counts[id] = if node.is_leaf() {
            1
        } else {
            node.children.iter().map(|&c| counts[c]).sum()
        };
    }
    counts
}

/// Check if the tree is rooted (root node has degree 2).
/// Unrooted trees typically have a trifurcating root.
pub fn is_rooted(tree: &Tree) -> bool {
    tree.root
        .and_then(|r| tree.get_node(r))
        .is_some_and(|n| n.children.len() == 2)
}

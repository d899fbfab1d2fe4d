use super::Tree;
use crate::libs::phylo::node::NodeId;

/// Get node IDs in preorder traversal (Root -> Children)
pub fn preorder(tree: &Tree, start_node: NodeId) -> Vec<NodeId> {
    preorder_until(tree, start_node, |_| false)
}

/// Preorder traversal that yields a node for which `stop` holds but does not
/// descend below it.
///
/// ```
/// use shoot::libs::phylo::Tree;
///
/// let tree = Tree::from_newick("((A,B)X,(C,D)Y)R;").unwrap();
/// let root = tree.get_root().unwrap();
/// let counts = tree.leaf_counts();
/// let names: Vec<_> = tree
///     .preorder_until(&root, |id| counts[id] <= 2)
///     .into_iter()
///     .map(|id| tree.get_node(id).unwrap().name.clone().unwrap())
///     .collect();
/// assert_eq!(names, vec!["R", "X", "Y"]);
/// ```
pub fn preorder_until<F>(tree: &Tree, start_node: NodeId, stop: F) -> Vec<NodeId>
where
    F: Fn(NodeId) -> bool,
{
    let mut result = Vec::new();
    let mut stack = vec![start_node];

    while let Some(id) = stack.pop() {
        if let Some(node) = tree.get_node(id) {
            result.push(id);
            if stop(id) {
                continue;
            }
            // Reverse push keeps children in order
            for &child in node.children.iter().rev() {
                stack.push(child);
            }
        }
    }

    result
}

/// Get node IDs in postorder traversal (Children -> Root)
pub fn postorder(tree: &Tree, start_node: NodeId) -> Vec<NodeId> {
    let mut result = Vec::new();
    let mut stack = vec![(start_node, false)];

    while let Some((id, expanded)) = stack.pop() {
        if expanded {
            result.push(id);
            continue;
        }
        if let Some(node) = tree.get_node(id) {
            stack.push((id, true));
            for &child in node.children.iter().rev() {
                stack.push((child, false));
            }
        }
    }

    result
}

use super::Tree;
use crate::libs::phylo::node::NodeId;

/// Node IDs from the root down to `id`, both ends included.
pub fn get_path_from_root(tree: &Tree, id: &NodeId) -> Result<Vec<NodeId>, String> {
    if tree.get_node(*id).is_none() {
        return Err(format!("Node {} not found", id));
    }

    let mut path = vec![*id];
    let mut current = *id;
    while let Some(p) = tree.nodes[current].parent {
        path.push(p);
        current = p;
    }
    path.reverse();

    if tree.root != Some(path[0]) {
        return Err("Node is detached from root".to_string());
    }

    Ok(path)
}

/// Find Lowest Common Ancestor (LCA) of two nodes.
pub fn get_common_ancestor(tree: &Tree, a: &NodeId, b: &NodeId) -> Result<NodeId, String> {
    let path_a = get_path_from_root(tree, a)?;
    let path_b = get_path_from_root(tree, b)?;

    path_a
        .iter()
        .zip(path_b.iter())
        .take_while(|(u, v)| u == v)
        .last()
        .map(|(u, _)| *u)
        .ok_or_else(|| "Nodes are not in the same tree (no common ancestor)".to_string())
}

/// Distance between two nodes.
/// Returns (patristic distance, number of edges).
pub fn get_distance(tree: &Tree, a: &NodeId, b: &NodeId) -> Result<(f64, usize), String> {
    let lca = get_common_ancestor(tree, a, b)?;

    let up_to_lca = |start: NodeId| -> (f64, usize) {
        let mut weighted = 0.0;
        let mut topo = 0;
        let mut curr = start;
        while curr != lca {
            let node = &tree.nodes[curr];
            weighted += node.branch_length();
            topo += 1;
            match node.parent {
                Some(p) => curr = p,
                None => break,
            }
        }
        (weighted, topo)
    };

    let (w1, t1) = up_to_lca(*a);
    let (w2, t2) = up_to_lca(*b);

    Ok((w1 + w2, t1 + t2))
}

/// Get node ID by name. Returns first match.
pub fn get_node_by_name(tree: &Tree, name: &str) -> Option<NodeId> {
    tree.nodes
        .iter()
        .find(|n| !n.deleted && n.name.as_deref() == Some(name))
        .map(|n| n.id)
}

/// Like `get_node_by_name`, restricted to leaves.
pub fn get_leaf_by_name(tree: &Tree, name: &str) -> Option<NodeId> {
    tree.nodes
        .iter()
        .find(|n| !n.deleted && n.is_leaf() && n.name.as_deref() == Some(name))
        .map(|n| n.id)
}

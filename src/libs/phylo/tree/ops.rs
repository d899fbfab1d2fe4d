use super::Tree;
use crate::libs::phylo::node::NodeId;

/// Add a child to a parent node.
/// Updates both parent's `children` list and child's `parent` field.
pub fn add_child(tree: &mut Tree, parent_id: NodeId, child_id: NodeId) -> Result<(), String> {
    if parent_id == child_id {
        return Err("Cannot add node as child of itself".to_string());
    }
    if tree.get_node(parent_id).is_none() {
        return Err(format!("Parent node {} not found or deleted", parent_id));
    }
    if tree.get_node(child_id).is_none() {
        return Err(format!("Child node {} not found or deleted", child_id));
    }
    if let Some(old_parent) = tree.nodes[child_id].parent {
        return Err(format!(
            "Node {} already has parent {}",
            child_id, old_parent
        ));
    }

    tree.nodes[child_id].parent = Some(parent_id);
    tree.nodes[parent_id].children.push(child_id);

    Ok(())
}

/// Soft remove a node, and its descendants when `recursive`.
/// Without `recursive` the children are orphaned.
pub fn remove_node(tree: &mut Tree, id: NodeId, recursive: bool) {
    if id >= tree.nodes.len() || tree.nodes[id].deleted {
        return;
    }

    if let Some(parent_id) = tree.nodes[id].parent {
        if let Some(parent) = tree.get_node_mut(parent_id) {
            parent.children.retain(|&child| child != id);
        }
    }

    let children = std::mem::take(&mut tree.nodes[id].children);
    for child_id in children {
        if recursive {
            remove_node(tree, child_id, true);
        } else if let Some(child) = tree.get_node_mut(child_id) {
            child.parent = None;
        }
    }

    let node = &mut tree.nodes[id];
    node.deleted = true;
    node.parent = None;

    if tree.root == Some(id) {
        tree.root = None;
    }
}

/// Remove every descendant of `id`, leaving it as a leaf that keeps its own
/// name and branch length.
pub fn detach_children(tree: &mut Tree, id: NodeId) {
    let children = match tree.get_node(id) {
        Some(node) => node.children.clone(),
        None => return,
    };
    for child in children {
        remove_node(tree, child, true);
    }
}

/// Collapse a node, connecting its children to its parent.
/// Edge lengths are summed (parent->node + node->child).
pub fn collapse_node(tree: &mut Tree, id: NodeId) -> Result<(), String> {
    let node = tree.get_node(id).ok_or(format!("Node {} not found", id))?;
    let parent_id = node.parent.ok_or("Cannot collapse root node")?;
    let parent_edge = node.length;
    let children = node.children.clone();

    for &child_id in &children {
        if let Some(child) = tree.get_node_mut(child_id) {
            child.parent = Some(parent_id);
            child.length = match (parent_edge, child.length) {
                (Some(p), Some(c)) => Some(p + c),
                (p, c) => p.or(c),
            };
        }
    }

    if let Some(parent) = tree.get_node_mut(parent_id) {
        if let Some(pos) = parent.children.iter().position(|&x| x == id) {
            parent.children.splice(pos..pos + 1, children);
        }
    }

    let node = &mut tree.nodes[id];
    node.deleted = true;
    node.children.clear();
    node.parent = None;

    Ok(())
}

/// Turn a bifurcating root into a trifurcating one.
///
/// The first internal child of the root is spliced out, its children move up
/// to the root with the two edges merged, so every leaf-to-leaf distance is
/// kept. Only the root position is lost.
pub fn unroot(tree: &mut Tree) -> Result<(), String> {
    let root = tree.root.ok_or("Empty tree")?;
    let children = tree
        .get_node(root)
        .map(|n| n.children.clone())
        .unwrap_or_default();

    if children.len() != 2 {
        return Err(format!(
            "Root is not bifurcating (degree {})",
            children.len()
        ));
    }

    let target = children
        .iter()
        .copied()
        .find(|&c| tree.get_node(c).is_some_and(|n| !n.is_leaf()))
        .ok_or("Cannot unroot a tree with two leaves")?;

    // The sibling absorbs the target's edge so that paths across the root keep their length.
    let target_len = tree.nodes[target].length;
    let sibling = children.iter().copied().find(|&c| c != target).unwrap_or(target);
    if let Some(len) = target_len {
        let node = &mut tree.nodes[sibling];
        node.length = Some(node.length.unwrap_or(0.0) + len);
    }
    tree.nodes[target].length = None;

    collapse_node(tree, target)
}

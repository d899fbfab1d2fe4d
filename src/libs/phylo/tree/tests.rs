use super::*;

fn names(tree: &Tree, ids: &[NodeId]) -> Vec<String> {
    ids.iter()
        .map(|&id| tree.get_node(id).unwrap().name.clone().unwrap_or_default())
        .collect()
}

#[test]
fn test_tree_traversals() {
    let mut tree = Tree::new();
    //    0
    //   / \
    //  1   2
    // / \   \
    //3   4   5
    let n0 = tree.add_node();
    let n1 = tree.add_node();
    let n2 = tree.add_node();
    let n3 = tree.add_node();
    let n4 = tree.add_node();
    let n5 = tree.add_node();

    tree.set_root(n0);
    tree.add_child(n0, n1).unwrap();
    tree.add_child(n0, n2).unwrap();
    tree.add_child(n1, n3).unwrap();
    tree.add_child(n1, n4).unwrap();
    tree.add_child(n2, n5).unwrap();

    let pre = tree.preorder(&n0).unwrap();
    assert_eq!(pre, vec![n0, n1, n3, n4, n2, n5]);

    let post = tree.postorder(&n0).unwrap();
    assert_eq!(post, vec![n3, n4, n1, n5, n2, n0]);

    let stopped = tree.preorder_until(&n0, |id| id == n1);
    assert_eq!(stopped, vec![n0, n1, n2, n5]);
}

#[test]
fn test_add_child_rejects_second_parent() {
    let mut tree = Tree::new();
    let n0 = tree.add_node();
    let n1 = tree.add_node();
    let n2 = tree.add_node();

    assert_eq!(tree.add_child(n0, n2), Ok(()));
    assert!(tree.add_child(n1, n2).is_err());
    assert!(tree.add_child(n0, n0).is_err());
}

#[test]
fn test_leaf_counts_and_names() {
    let tree = Tree::from_newick("((A,B)X,((C,D)Y,E)Z)R;").unwrap();
    let counts = tree.leaf_counts();

    let x = tree.get_node_by_name("X").unwrap();
    let z = tree.get_node_by_name("Z").unwrap();
    let root = tree.get_root().unwrap();

    assert_eq!(counts[root], 5);
    assert_eq!(counts[x], 2);
    assert_eq!(counts[z], 3);
    assert_eq!(tree.leaf_count(z), 3);

    assert_eq!(tree.get_leaf_names(), vec!["A", "B", "C", "D", "E"]);
    assert_eq!(tree.leaf_names_under(z), vec!["C", "D", "E"]);
}

#[test]
fn test_leaf_counts_after_detach() {
    let mut tree = Tree::from_newick("((A,B)X,((C,D)Y,E)Z)R;").unwrap();
    let y = tree.get_node_by_name("Y").unwrap();
    tree.detach_children(y);

    let counts = tree.leaf_counts();
    assert_eq!(counts[tree.get_root().unwrap()], 4);
    assert_eq!(counts[y], 1);
    assert_eq!(tree.get_leaf_names(), vec!["A", "B", "Y", "E"]);
}

#[test]
fn test_distance_and_lca() {
    let tree = Tree::from_newick("((A:1,B:2)X:3,(C:4,D:5)Y:6)R;").unwrap();
    let a = tree.get_node_by_name("A").unwrap();
    let b = tree.get_node_by_name("B").unwrap();
    let d = tree.get_node_by_name("D").unwrap();
    let x = tree.get_node_by_name("X").unwrap();

    assert_eq!(tree.get_common_ancestor(&a, &b).unwrap(), x);
    assert_eq!(tree.get_distance(&a, &b).unwrap(), (3.0, 2));
    assert_eq!(tree.get_distance(&a, &d).unwrap(), (15.0, 4));
    // clade to leaf: the clade's own stem is on the path
    assert_eq!(tree.get_distance(&x, &d).unwrap(), (14.0, 3));
}

#[test]
fn test_path_from_root() {
    let tree = Tree::from_newick("((A,B)X,C)R;").unwrap();
    let a = tree.get_node_by_name("A").unwrap();
    let path = tree.get_path_from_root(&a).unwrap();
    assert_eq!(names(&tree, &path), vec!["R", "X", "A"]);
}

#[test]
fn test_leaf_lookup_ignores_internal_names() {
    let tree = Tree::from_newick("((A,B)A,C);").unwrap();
    let leaf = tree.get_leaf_by_name("A").unwrap();
    assert!(tree.get_node(leaf).unwrap().is_leaf());
}

#[test]
fn test_is_rooted() {
    assert!(Tree::from_newick("((A,B),C);").unwrap().is_rooted());
    assert!(!Tree::from_newick("(A,B,C);").unwrap().is_rooted());
}

//! Cut a placed tree down to a bounded neighbourhood of the query gene.

use crate::libs::error::ShootError;
use crate::libs::phylo::{NodeId, Tree};
use anyhow::Context;
use tracing::{debug, info};

/// Taxon-count policy for the returned tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    /// Upper limit on the number of taxa, unless `lower` forces a larger tree.
    /// `None` keeps the whole tree.
    pub upper: Option<usize>,
    /// Exceed `upper` when the alternative would have fewer taxa than this.
    pub lower: Option<usize>,
}

impl Bounds {
    pub fn new(upper: Option<usize>, lower: Option<usize>) -> Self {
        Self { upper, lower }
    }
}

/// Root of the smallest clade around `query` that satisfies `bounds`.
///
/// The walk goes up from the query leaf while the clade stays below the upper
/// bound. The last clade below the bound is preferred; the first one at or
/// above it is taken only when the smaller one would drop under `lower`.
pub fn narrow(tree: &Tree, query: &str, bounds: &Bounds) -> Result<NodeId, ShootError> {
    let root = tree
        .get_root()
        .ok_or_else(|| ShootError::LeafNotFound(query.to_string()))?;
    let mut node = tree
        .get_leaf_by_name(query)
        .ok_or_else(|| ShootError::LeafNotFound(query.to_string()))?;

    let upper = match bounds.upper {
        Some(u) => u,
        None => return Ok(root),
    };

    let counts = tree.leaf_counts();
    if counts[root] <= upper {
        return Ok(root);
    }

    let mut prev: Option<(NodeId, usize)> = None;
    while counts[node] < upper {
        prev = Some((node, counts[node]));
        // counts[root] > upper, so the loop stops at the root at the latest
        node = match tree.parent_of(node) {
            Some(p) => p,
            None => break,
        };
    }

    let chosen = match prev {
        Some((node_prev, n_taxa_prev)) if bounds.lower.map_or(true, |l| n_taxa_prev >= l) => {
            node_prev
        }
        _ => node,
    };
    debug!(
        query,
        upper,
        lower = ?bounds.lower,
        n_taxa = counts[chosen],
        "narrowed tree"
    );

    Ok(chosen)
}

/// Newick of the narrowed tree.
pub fn narrow_newick(tree: &Tree, query: &str, bounds: &Bounds) -> Result<String, ShootError> {
    let chosen = narrow(tree, query, bounds)?;
    Ok(if Some(chosen) == tree.get_root() {
        tree.to_newick()
    } else {
        tree.to_newick_subtree(chosen)
    })
}

/// Narrow the tree stored in `path` and overwrite the file with the result.
///
/// The file is left untouched when the tree already fits. Returns the Newick
/// string of the final tree.
pub fn narrow_file(path: &str, query: &str, bounds: &Bounds) -> anyhow::Result<String> {
    let tree = Tree::from_file(path)?;
    let chosen = narrow(&tree, query, bounds)?;

    if Some(chosen) == tree.get_root() {
        return Ok(tree.to_newick());
    }

    let newick = tree.to_newick_subtree(chosen);
    std::fs::write(path, &newick).with_context(|| format!("Cannot write {}", path))?;
    info!(path, n_taxa = tree.leaf_count(chosen), "tree narrowed in place");

    Ok(newick)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Caterpillar: Q joins A, then B, then (C,D), then (E,F,G,H)
    const LADDER: &str = "((((Q:1,A:1):1,B:1):1,(C:1,D:1):1):1,((E:1,F:1):1,(G:1,H:1):1):1);";

    fn n_taxa(tree: &Tree, query: &str, bounds: Bounds) -> usize {
        let id = narrow(tree, query, &bounds).unwrap();
        tree.leaf_count(id)
    }

    #[test]
    fn no_upper_bound_keeps_tree() {
        let tree = Tree::from_newick(LADDER).unwrap();
        for lower in [None, Some(3), Some(100)] {
            let newick = narrow_newick(&tree, "Q", &Bounds::new(None, lower)).unwrap();
            assert_eq!(newick, tree.to_newick());
        }
    }

    #[test]
    fn small_tree_is_kept() {
        let tree = Tree::from_newick(LADDER).unwrap();
        assert_eq!(n_taxa(&tree, "Q", Bounds::new(Some(9), None)), 9);
        assert_eq!(n_taxa(&tree, "Q", Bounds::new(Some(20), None)), 9);
    }

    #[test]
    fn steps_down_below_upper() {
        let tree = Tree::from_newick(LADDER).unwrap();
        // clades around Q: 1, 2, 3, 5, 9
        assert_eq!(n_taxa(&tree, "Q", Bounds::new(Some(4), None)), 3);
        assert_eq!(n_taxa(&tree, "Q", Bounds::new(Some(5), None)), 3);
        assert_eq!(n_taxa(&tree, "Q", Bounds::new(Some(6), None)), 5);
        assert_eq!(n_taxa(&tree, "Q", Bounds::new(Some(3), None)), 2);
    }

    #[test]
    fn lower_bound_allows_exceeding_upper() {
        let tree = Tree::from_newick(LADDER).unwrap();
        assert_eq!(n_taxa(&tree, "Q", Bounds::new(Some(4), Some(3))), 3);
        assert_eq!(n_taxa(&tree, "Q", Bounds::new(Some(4), Some(4))), 5);
        assert_eq!(n_taxa(&tree, "Q", Bounds::new(Some(8), Some(6))), 9);
    }

    #[test]
    fn result_always_contains_query() {
        let tree = Tree::from_newick(LADDER).unwrap();
        for upper in 1..12 {
            for lower in [None, Some(1), Some(4), Some(8)] {
                let id = narrow(&tree, "C", &Bounds::new(Some(upper), lower)).unwrap();
                assert!(tree.leaf_names_under(id).contains(&"C".to_string()));
                let n = tree.leaf_count(id);
                if lower.is_none() {
                    assert!(n <= upper.max(1));
                }
            }
        }
    }

    #[test]
    fn query_next_to_root() {
        // Q hangs directly off the root; the root itself is the first clade over the bound
        let tree = Tree::from_newick("(Q:1,((A:1,B:1):1,(C:1,D:1):1):1);").unwrap();
        let id = narrow(&tree, "Q", &Bounds::new(Some(3), None)).unwrap();
        assert_eq!(tree.get_node(id).unwrap().name.as_deref(), Some("Q"));

        let id = narrow(&tree, "Q", &Bounds::new(Some(3), Some(2))).unwrap();
        assert_eq!(Some(id), tree.get_root());
    }

    #[test]
    fn unit_upper_bound_returns_leaf() {
        let tree = Tree::from_newick(LADDER).unwrap();
        let id = narrow(&tree, "Q", &Bounds::new(Some(1), Some(5))).unwrap();
        assert_eq!(tree.get_node(id).unwrap().name.as_deref(), Some("Q"));
    }

    #[test]
    fn subtree_newick_has_no_stem() {
        let tree = Tree::from_newick(LADDER).unwrap();
        let newick = narrow_newick(&tree, "Q", &Bounds::new(Some(4), None)).unwrap();
        assert_eq!(newick, "((Q:1,A:1):1,B:1);");
    }

    #[test]
    fn unknown_query() {
        let tree = Tree::from_newick(LADDER).unwrap();
        assert_eq!(
            narrow(&tree, "Z", &Bounds::new(Some(4), None)),
            Err(ShootError::LeafNotFound("Z".to_string()))
        );
    }
}

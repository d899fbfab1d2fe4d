//! Split a large gene tree into taxon-bounded subtrees plus a supertree that
//! links them.
//!
//! Each subtree becomes a `PART.<i>-<n>_genes` leaf in the supertree. With
//! outgroups on, every subtree also gets the sister gene with the fewest
//! alignment gaps spliced in as `SHOOTOUTGROUP_<gene>`, so a query placed into
//! the subtree can be rooted later.

use crate::libs::alignment::{Alignment, GapTable};
use crate::libs::error::ShootError;
use crate::libs::phylo::node::{outgroup_name, profile_size};
use crate::libs::phylo::{NodeId, Partition, Tree, TreeError};
use anyhow::Context;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitOptions {
    /// Number of taxa to aim for in each subtree
    pub n_taxa: usize,
    /// Splice an outgroup gene into each subtree
    pub outgroup: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            n_taxa: 500,
            outgroup: false,
        }
    }
}

/// One excised clade.
#[derive(Debug, Clone, PartialEq)]
pub struct Subtree {
    pub partition: Partition,
    /// Rooted Newick, with the outgroup spliced in if requested
    pub newick: String,
    /// Unrooted variant; absent when the tree was not split at all
    pub unrooted: Option<String>,
    /// Real member genes, left to right
    pub genes: Vec<String>,
    /// Gene chosen as outgroup, by its original name
    pub outgroup: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Decomposition {
    pub subtrees: Vec<Subtree>,
    /// Tree with every subtree collapsed into its partition leaf.
    /// None when the input was small enough to keep whole.
    pub supertree: Option<Tree>,
    pub n_profile: usize,
}

impl Decomposition {
    pub fn partitions(&self) -> Vec<Partition> {
        self.subtrees.iter().map(|s| s.partition).collect()
    }
}

/// Split `tree` into clades of at most `options.n_taxa` leaves.
///
/// `gaps` is required when `options.outgroup` is set.
pub fn decompose(
    mut tree: Tree,
    gaps: Option<&GapTable>,
    options: &SplitOptions,
) -> Result<Decomposition, ShootError> {
    let n_taxa = options.n_taxa;
    if n_taxa == 0 {
        return Err(TreeError::LogicError("Target taxa must be positive".to_string()).into());
    }
    let root = tree.get_root().ok_or(TreeError::Empty)?;
    if let Some(leaf) = tree
        .get_leaves()
        .into_iter()
        .find(|&id| tree.get_node(id).is_some_and(|n| n.name.is_none()))
    {
        return Err(TreeError::LogicError(format!("Leaf {} has no name", leaf)).into());
    }
    let counts = tree.leaf_counts();

    if counts[root] <= n_taxa {
        debug!(n_genes = counts[root], "no need to split tree");
        let subtree = Subtree {
            partition: Partition::new(0, counts[root]),
            newick: tree.to_newick(),
            unrooted: None,
            genes: tree.get_leaf_names(),
            outgroup: None,
        };
        return Ok(Decomposition {
            subtrees: vec![subtree],
            supertree: None,
            n_profile: profile_size(counts[root]),
        });
    }

    // Distances and member genes are read from the untouched input
    let original = tree.clone();
    let boundaries: Vec<NodeId> = tree
        .preorder_until(&root, |id| counts[id] <= n_taxa)
        .into_iter()
        .filter(|&id| counts[id] <= n_taxa)
        .collect();

    // Mark
    let mut subtrees = Vec::with_capacity(boundaries.len());
    let mut n_profile = 0;
    for (i, &node) in boundaries.iter().enumerate() {
        let partition = Partition::new(i, counts[node]);
        let genes = original.leaf_names_under(node);

        let (newick, outgroup) = if options.outgroup {
            let gaps = gaps.ok_or_else(|| {
                TreeError::LogicError("Outgroup selection needs the alignment".to_string())
            })?;
            let (gene, newick) = splice_outgroup(&tree, &original, node, gaps)?;
            (newick, Some(gene))
        } else {
            (original.to_newick_subtree(node), None)
        };

        let mut sub = Tree::from_newick(&newick)?;
        if sub.get_leaves().len() >= 3 && sub.is_rooted() {
            sub.unroot()?;
        }

        n_profile += partition.n_profile();
        if let Some(n) = tree.get_node_mut(node) {
            n.set_name(partition.to_string());
        }
        debug!(partition = %partition, outgroup = ?outgroup, "subtree");

        subtrees.push(Subtree {
            partition,
            newick,
            unrooted: Some(sub.to_newick()),
            genes,
            outgroup,
        });
    }

    // Sweep
    for &node in &boundaries {
        tree.detach_children(node);
    }

    Ok(Decomposition {
        subtrees,
        supertree: Some(tree),
        n_profile,
    })
}

/// Sister gene with the fewest gaps. Ties go to the leftmost gene.
///
/// Leaves already renamed to a partition marker are not candidates.
pub fn choose_outgroup(tree: &Tree, node: NodeId, gaps: &GapTable) -> Result<String, ShootError> {
    let first_leaf = || tree.leaf_names_under(node).into_iter().next().unwrap_or_default();
    let parent = tree.parent_of(node).ok_or_else(|| ShootError::NoOutgroup {
        node,
        first_leaf: first_leaf(),
    })?;
    let siblings = tree
        .get_node(parent)
        .map(|p| p.children.clone())
        .unwrap_or_default();

    let mut best: Option<(usize, String)> = None;
    for sibling in siblings.into_iter().filter(|&s| s != node) {
        for leaf in tree.leaves_under(sibling) {
            let gene = match tree.get_node(leaf) {
                Some(n) if !n.is_partition() => match &n.name {
                    Some(name) => name.clone(),
                    None => continue,
                },
                _ => continue,
            };
            let n_gaps = *gaps
                .get(&gene)
                .ok_or_else(|| ShootError::MissingSequence(gene.clone()))?;
            if best.as_ref().map_or(true, |(min, _)| n_gaps < *min) {
                best = Some((n_gaps, gene));
            }
        }
    }

    best.map(|(_, gene)| gene).ok_or_else(|| ShootError::NoOutgroup {
        node,
        first_leaf: first_leaf(),
    })
}

/// Newick of the clade at `node` with its outgroup attached next to it.
///
/// The candidate is picked from `tree`, which carries the partition markers
/// set so far. Distances come from `original`. The clade is written without
/// its stem and the outgroup hangs at the patristic distance minus that stem.
fn splice_outgroup(
    tree: &Tree,
    original: &Tree,
    node: NodeId,
    gaps: &GapTable,
) -> Result<(String, String), ShootError> {
    let gene = choose_outgroup(tree, node, gaps)?;
    let gene_id = original
        .get_leaf_by_name(&gene)
        .ok_or_else(|| ShootError::LeafNotFound(gene.clone()))?;

    let (distance, _) = original.get_distance(&node, &gene_id)?;
    let branch_length = original
        .get_node(node)
        .map(|n| n.branch_length())
        .unwrap_or(0.0);
    if !(distance > branch_length) {
        return Err(ShootError::OutgroupTooClose {
            node,
            first_leaf: original
                .leaf_names_under(node)
                .into_iter()
                .next()
                .unwrap_or_default(),
            outgroup: gene,
            distance,
            branch_length,
        });
    }

    let clade = original.to_newick_subtree(node);
    let clade = clade.strip_suffix(';').unwrap_or(&clade);
    let newick = format!(
        "({},{}:{});",
        clade,
        outgroup_name(&gene),
        round5(distance - branch_length)
    );

    Ok((gene, newick))
}

fn round5(x: f64) -> f64 {
    (x * 1e5).round() / 1e5
}

//----------------------------
// Files
//----------------------------
/// Where the pieces of one split go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitLayout {
    /// File name of the input tree, used as the stem of every output
    pub name: String,
    pub sub: PathBuf,
    pub sup: PathBuf,
    pub msa_sub: PathBuf,
}

impl SplitLayout {
    /// `<dir of tree>/subtrees/{sub,super,msa_sub}/`
    pub fn beside(tree_path: &Path) -> Self {
        let dir = match tree_path.parent() {
            Some(d) if !d.as_os_str().is_empty() => d.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self::in_dir(&dir.join("subtrees"), &file_name(tree_path))
    }

    pub fn in_dir(outdir: &Path, name: &str) -> Self {
        Self {
            name: name.to_string(),
            sub: outdir.join("sub"),
            sup: outdir.join("super"),
            msa_sub: outdir.join("msa_sub"),
        }
    }

    pub fn create(&self) -> anyhow::Result<()> {
        for dir in [&self.sub, &self.sup, &self.msa_sub] {
            crate::libs::io::ensure_dir(dir)?;
        }
        Ok(())
    }

    pub fn subtree(&self, i: usize) -> PathBuf {
        self.sub.join(format!("{}.{}.tre", self.name, i))
    }

    pub fn subtree_unrooted(&self, i: usize) -> PathBuf {
        self.sub.join(format!("{}.{}.tre.unroot.tre", self.name, i))
    }

    pub fn subtree_msa(&self, i: usize) -> PathBuf {
        self.msa_sub.join(format!("{}.{}.fa", self.name, i))
    }

    pub fn supertree(&self) -> PathBuf {
        self.sup.join(format!("{}.super.tre", self.name))
    }

    pub fn supertree_unrooted(&self) -> PathBuf {
        self.sup.join(format!("{}.super.tre.unroot.tre", self.name))
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "tree".to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSummary {
    pub n_profile: usize,
    pub partitions: Vec<Partition>,
}

/// Split the tree in `tree_file` using the alignment in `msa_file` and write
/// every piece according to `layout`. Returns the profile sequence count.
pub fn split_tree(
    tree_file: &Path,
    msa_file: &Path,
    options: &SplitOptions,
    layout: &SplitLayout,
) -> anyhow::Result<SplitSummary> {
    let tree = Tree::from_file(&tree_file.to_string_lossy())?;
    let alignment = Alignment::from_file(&msa_file.to_string_lossy())?;
    let gaps = options.outgroup.then(|| alignment.gap_counts());

    let decomposition = decompose(tree, gaps.as_ref(), options)
        .with_context(|| format!("Cannot split {}", tree_file.display()))?;

    layout.create()?;
    write_decomposition(&decomposition, &alignment, layout)?;

    info!(
        tree = %tree_file.display(),
        n_subtrees = decomposition.subtrees.len(),
        n_profile = decomposition.n_profile,
        "split tree"
    );

    Ok(SplitSummary {
        n_profile: decomposition.n_profile,
        partitions: decomposition.partitions(),
    })
}

fn write_decomposition(
    decomposition: &Decomposition,
    alignment: &Alignment,
    layout: &SplitLayout,
) -> anyhow::Result<()> {
    use crate::libs::io::write_line;

    let supertree = match &decomposition.supertree {
        Some(t) => t,
        None => {
            // Unsplit trees are written as they are, without alignment or unrooted copy
            if let Some(sub) = decomposition.subtrees.first() {
                write_line(&layout.subtree(0), &sub.newick)?;
            }
            return Ok(());
        }
    };

    for sub in &decomposition.subtrees {
        let i = sub.partition.index;
        write_line(&layout.subtree(i), &sub.newick)?;

        let msa_path = layout.subtree_msa(i);
        let writer = crate::writer(&msa_path.to_string_lossy())?;
        alignment
            .write_subset(&sub.genes, sub.outgroup.as_deref(), writer)
            .with_context(|| format!("Cannot write {}", msa_path.display()))?;

        if let Some(unrooted) = &sub.unrooted {
            write_line(&layout.subtree_unrooted(i), unrooted)?;
        }
    }

    write_line(&layout.supertree(), &supertree.to_newick())?;

    let mut unrooted = supertree.clone();
    if unrooted.is_rooted() && unrooted.unroot().is_err() {
        debug!("supertree root joins two leaves, kept rooted");
    }
    write_line(&layout.supertree_unrooted(), &unrooted.to_newick())?;

    Ok(())
}

//----------------------------
// Database
//----------------------------
/// A tree and its alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitJob {
    pub tree: PathBuf,
    pub msa: PathBuf,
}

/// Pair `Gene_Trees/OG*_tree.txt` with `MultipleSequenceAlignments/OG*.fa`.
/// Trees without an alignment are skipped with a warning.
pub fn database_jobs(dir: &Path) -> anyhow::Result<Vec<SplitJob>> {
    let tree_dir = dir.join("Gene_Trees");
    let msa_dir = dir.join("MultipleSequenceAlignments");

    let mut jobs = Vec::new();
    let entries = std::fs::read_dir(&tree_dir)
        .with_context(|| format!("could not read {}", tree_dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        let og = match path
            .file_name()
            .and_then(|s| s.to_str())
            .and_then(|s| s.strip_suffix("_tree.txt"))
        {
            Some(og) if og.starts_with("OG") => og.to_string(),
            _ => continue,
        };

        let msa = msa_dir.join(format!("{}.fa", og));
        if msa.is_file() {
            jobs.push(SplitJob { tree: path, msa });
        } else {
            warn!(og = %og, "no alignment for tree");
        }
    }

    jobs.sort_by(|a, b| a.tree.cmp(&b.tree));
    Ok(jobs)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub n_split: usize,
    pub n_failed: usize,
    pub n_profile: usize,
}

/// Split every job on a pool of `parallel` threads.
///
/// Jobs share nothing but the output directories; a failing tree is logged
/// and left out of the totals.
pub fn split_database(
    jobs: &[SplitJob],
    options: &SplitOptions,
    parallel: usize,
) -> anyhow::Result<BatchSummary> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallel)
        .build()?;

    let results: Vec<Option<usize>> = pool.install(|| {
        jobs.par_iter()
            .map(|job| {
                let layout = SplitLayout::beside(&job.tree);
                match split_tree(&job.tree, &job.msa, options, &layout) {
                    Ok(summary) => Some(summary.n_profile),
                    Err(e) => {
                        warn!(tree = %job.tree.display(), error = %format!("{:#}", e), "skipped");
                        None
                    }
                }
            })
            .collect()
    });

    let summary = results.iter().fold(BatchSummary::default(), |mut acc, r| {
        match r {
            Some(n) => {
                acc.n_split += 1;
                acc.n_profile += n;
            }
            None => acc.n_failed += 1,
        }
        acc
    });
    info!(
        n_split = summary.n_split,
        n_failed = summary.n_failed,
        n_profile = summary.n_profile,
        "database split"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::BTreeSet;

    fn split(nwk: &str, n_taxa: usize) -> Decomposition {
        let tree = Tree::from_newick(nwk).unwrap();
        let options = SplitOptions {
            n_taxa,
            outgroup: false,
        };
        decompose(tree, None, &options).unwrap()
    }

    fn gaps(pairs: &[(&str, usize)]) -> GapTable {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn four_leaves_into_two_pairs() {
        let d = split("((A:1,B:1):1,(C:1,D:1):1);", 2);

        assert_eq!(d.n_profile, 4);
        assert_eq!(d.subtrees.len(), 2);
        assert_eq!(d.subtrees[0].newick, "(A:1,B:1);");
        assert_eq!(d.subtrees[1].newick, "(C:1,D:1);");
        assert_eq!(
            d.supertree.unwrap().to_newick(),
            "(PART.0-2_genes:1,PART.1-2_genes:1);"
        );
    }

    #[test]
    fn small_tree_is_kept_whole() {
        let d = split("((A:1,B:1):1,(C:1,D:1):1);", 4);
        assert!(d.supertree.is_none());
        assert_eq!(d.n_profile, 4);
        assert_eq!(d.subtrees.len(), 1);
        assert_eq!(d.subtrees[0].newick, "((A:1,B:1):1,(C:1,D:1):1);");
        assert_eq!(d.subtrees[0].unrooted, None);
    }

    #[test]
    fn profile_counts_cap_at_five() {
        // clades of 3, 7 and 5 leaves under a 7-taxa target
        let c3 = "(a1,(a2,a3))";
        let c7 = "((b1,b2),((b3,b4),(b5,(b6,b7))))";
        let c5 = "((c1,c2),(c3,(c4,c5)))";
        let nwk = format!("(({},{}),{});", c3, c7, c5);

        let d = split(&nwk, 7);
        let sizes: Vec<usize> = d.partitions().iter().map(|p| p.n_genes).collect();
        assert_eq!(sizes, vec![3, 7, 5]);
        assert_eq!(d.n_profile, 3 + 5 + 5);
    }

    #[test]
    fn leaves_covered_exactly_once() {
        let nwk = "(((a,b),(c,(d,e))),((f,(g,h)),((i,j),(k,(l,(m,n))))));";
        let all: BTreeSet<String> = Tree::from_newick(nwk)
            .unwrap()
            .get_leaf_names()
            .into_iter()
            .collect();

        for n_taxa in 1..=14 {
            let d = split(nwk, n_taxa);
            let mut seen = Vec::new();
            for sub in &d.subtrees {
                assert!(sub.genes.len() <= n_taxa);
                assert_eq!(sub.genes.len(), sub.partition.n_genes);
                seen.extend(sub.genes.iter().cloned());
            }
            assert_eq!(seen.len(), all.len(), "n_taxa = {}", n_taxa);
            assert_eq!(seen.into_iter().collect::<BTreeSet<_>>(), all);
        }
    }

    #[test]
    fn supertree_round_trip() {
        let nwk = "(((a,b),(c,(d,e))),((f,(g,h)),((i,j),(k,(l,(m,n))))));";
        let d = split(nwk, 3);

        let text = d.supertree.as_ref().unwrap().to_newick();
        let reparsed = Tree::from_newick(&text).unwrap();
        let parts: Vec<Partition> = reparsed
            .get_leaf_names()
            .iter()
            .filter_map(|name| Partition::parse(name))
            .collect();

        assert_eq!(parts, d.partitions());
        assert_eq!(reparsed.get_leaves().len(), parts.len());
    }

    #[test]
    fn unsplit_clade_remains_in_supertree() {
        // root has 4 leaves over a target of 3: a and the (b,c,d) clade become partitions
        let d = split("(a:1,(b:1,(c:1,d:1):1):1);", 3);
        assert_eq!(
            d.supertree.unwrap().to_newick(),
            "(PART.0-1_genes:1,PART.1-3_genes:1);"
        );
        assert_eq!(d.subtrees[0].newick, "a;");
        assert_eq!(d.n_profile, 1 + 3);
    }

    #[test]
    fn subtree_unrooted_variant() {
        let d = split("(((A:1,B:1):1,C:1):1,(D:1,E:1):1);", 3);
        assert_eq!(d.subtrees[0].newick, "((A:1,B:1):1,C:1);");
        assert_eq!(d.subtrees[0].unrooted.as_deref(), Some("(A:1,B:1,C:2);"));
        // two leaves stay rooted
        assert_eq!(d.subtrees[1].unrooted.as_deref(), Some("(D:1,E:1);"));
    }

    #[test]
    fn outgroup_fewest_gaps() {
        let tree = Tree::from_newick("((A:1,B:1):0.5,(C:1,D:2):0.25);").unwrap();
        let table = gaps(&[("A", 0), ("B", 0), ("C", 4), ("D", 1)]);
        let options = SplitOptions {
            n_taxa: 2,
            outgroup: true,
        };
        let d = decompose(tree, Some(&table), &options).unwrap();

        // (A,B) takes D, (C,D) takes A (tie with B, leftmost wins)
        assert_eq!(d.subtrees[0].outgroup.as_deref(), Some("D"));
        assert_eq!(
            d.subtrees[0].newick,
            "((A:1,B:1),SHOOTOUTGROUP_D:2.25);"
        );
        assert_eq!(d.subtrees[1].outgroup.as_deref(), Some("A"));
        assert_eq!(
            d.subtrees[1].newick,
            "((C:1,D:2),SHOOTOUTGROUP_A:1.5);"
        );
        // outgroup never counts as a member
        assert_eq!(d.subtrees[0].genes, vec!["A", "B"]);
        assert_eq!(d.n_profile, 4);
    }

    #[test]
    fn outgroup_branch_is_distance_minus_stem() {
        let tree = Tree::from_newick("((A:0.1,B:0.2):0.3,((C:0.4,D:0.5):0.6,E:0.7):0.8);").unwrap();
        let a = tree.get_node_by_name("A").unwrap();
        let clade = tree.parent_of(a).unwrap();
        let e = tree.get_node_by_name("E").unwrap();
        let expected = tree.get_distance(&clade, &e).unwrap().0 - 0.3;

        let table = gaps(&[("A", 0), ("B", 0), ("C", 3), ("D", 3), ("E", 0)]);
        let options = SplitOptions {
            n_taxa: 2,
            outgroup: true,
        };
        let d = decompose(tree, Some(&table), &options).unwrap();
        let first = &d.subtrees[0];
        assert_eq!(first.outgroup.as_deref(), Some("E"));

        let sub = Tree::from_newick(&first.newick).unwrap();
        let og = sub.get_node_by_name("SHOOTOUTGROUP_E").unwrap();
        let spliced = sub.get_node(og).unwrap().length.unwrap();
        assert!(spliced > 0.0);
        assert_relative_eq!(spliced, expected, epsilon = 1e-5);
    }

    #[test]
    fn outgroup_too_close_is_reported() {
        // Negative sister edge makes the outgroup closer than the clade's own stem
        let tree = Tree::from_newick("((A:1,B:1):2,(C:1,D:1):-1.5);").unwrap();
        let table = gaps(&[("A", 0), ("B", 0), ("C", 0), ("D", 0)]);
        let options = SplitOptions {
            n_taxa: 2,
            outgroup: true,
        };
        match decompose(tree, Some(&table), &options) {
            Err(ShootError::OutgroupTooClose {
                first_leaf,
                outgroup,
                distance,
                branch_length,
                ..
            }) => {
                assert_eq!(first_leaf, "A");
                assert_eq!(outgroup, "C");
                assert_relative_eq!(distance, 1.5);
                assert_relative_eq!(branch_length, 2.0);
            }
            other => panic!("Expected OutgroupTooClose, got {:?}", other),
        }
    }

    #[test]
    fn outgroup_skips_partition_names() {
        let tree = Tree::from_newick("((A:1,B:1):1,(PART.0-9_genes:1,C:1):1);").unwrap();
        let a = tree.get_node_by_name("A").unwrap();
        let clade = tree.parent_of(a).unwrap();
        let table = gaps(&[("A", 0), ("B", 0), ("C", 7)]);
        assert_eq!(choose_outgroup(&tree, clade, &table).unwrap(), "C");
    }

    #[test]
    fn outgroup_skips_renamed_sister_leaf() {
        let tree = Tree::from_newick("(a:1,(x:1,y:1):1,(b:1,c:1):1);").unwrap();
        let table = gaps(&[("a", 0), ("x", 3), ("y", 3), ("b", 5), ("c", 5)]);
        let options = SplitOptions {
            n_taxa: 2,
            outgroup: true,
        };
        let d = decompose(tree, Some(&table), &options).unwrap();

        let outgroups: Vec<_> = d
            .subtrees
            .iter()
            .map(|s| s.outgroup.as_deref().unwrap())
            .collect();
        // `a` is PART.0-1_genes by the time (x,y) and (b,c) look for a sister
        assert_eq!(outgroups, vec!["x", "b", "x"]);
        assert_eq!(d.subtrees[2].newick, "((b:1,c:1),SHOOTOUTGROUP_x:2);");
        // a renamed clade still offers its genes
        assert_eq!(d.subtrees[2].genes, vec!["b", "c"]);
    }

    #[test]
    fn outgroup_none_left_after_renaming() {
        let tree = Tree::from_newick("(a:1,b:1);").unwrap();
        let table = gaps(&[("a", 0), ("b", 0)]);
        let options = SplitOptions {
            n_taxa: 1,
            outgroup: true,
        };
        match decompose(tree, Some(&table), &options) {
            Err(ShootError::NoOutgroup { first_leaf, .. }) => assert_eq!(first_leaf, "b"),
            other => panic!("Expected NoOutgroup, got {:?}", other),
        }
    }

    #[test]
    fn unnamed_leaf_is_rejected() {
        let tree = Tree::from_newick("((A:1,B:1):1,(C:1,:1):1);").unwrap();
        let options = SplitOptions {
            n_taxa: 2,
            outgroup: false,
        };
        match decompose(tree, None, &options) {
            Err(ShootError::Tree(TreeError::LogicError(msg))) => assert!(msg.contains("no name")),
            other => panic!("Expected a logic error, got {:?}", other),
        }
    }

    #[test]
    fn outgroup_needs_gap_entry() {
        let tree = Tree::from_newick("((A:1,B:1):1,(C:1,D:1):1);").unwrap();
        let a = tree.get_node_by_name("A").unwrap();
        let clade = tree.parent_of(a).unwrap();
        let table = gaps(&[("A", 0), ("B", 0), ("C", 1)]);
        assert_eq!(
            choose_outgroup(&tree, clade, &table),
            Err(ShootError::MissingSequence("D".to_string()))
        );
    }

    #[test]
    fn zero_target_is_rejected() {
        let tree = Tree::from_newick("(A,B);").unwrap();
        let options = SplitOptions {
            n_taxa: 0,
            outgroup: false,
        };
        assert!(decompose(tree, None, &options).is_err());
    }

    #[test]
    fn layout_paths() {
        let layout = SplitLayout::beside(Path::new("db/Gene_Trees/OG1_tree.txt"));
        assert_eq!(
            layout.subtree(3),
            PathBuf::from("db/Gene_Trees/subtrees/sub/OG1_tree.txt.3.tre")
        );
        assert_eq!(
            layout.subtree_unrooted(3),
            PathBuf::from("db/Gene_Trees/subtrees/sub/OG1_tree.txt.3.tre.unroot.tre")
        );
        assert_eq!(
            layout.subtree_msa(0),
            PathBuf::from("db/Gene_Trees/subtrees/msa_sub/OG1_tree.txt.0.fa")
        );
        assert_eq!(
            layout.supertree(),
            PathBuf::from("db/Gene_Trees/subtrees/super/OG1_tree.txt.super.tre")
        );

        let bare = SplitLayout::beside(Path::new("t.nwk"));
        assert_eq!(bare.sub, PathBuf::from("./subtrees/sub"));
    }
}

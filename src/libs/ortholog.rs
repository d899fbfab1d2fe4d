//! Orthologs of a placed gene read off the tree topology.
//!
//! Walking from the query leaf to the root, the clade hanging off each
//! ancestor is called orthologous when its species do not reappear among the
//! species already seen on the query's side. A little overlap is tolerated as
//! tree noise: one shared species once both sides have at least 4 species,
//! two shared species from 9 species on.

use crate::libs::error::ShootError;
use crate::libs::phylo::Tree;
use crate::libs::species::species_of;
use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrthologRow {
    pub species: String,
    pub genes: Vec<String>,
}

impl OrthologRow {
    /// Genes as shown in the report, `g1, g2`
    pub fn genes_joined(&self) -> String {
        self.genes.join(", ")
    }
}

/// Whether a sister clade with `overlap` shared species counts as orthologous.
pub fn is_orthologous(overlap: usize, n_seen: usize, n_other: usize) -> bool {
    let m = n_seen.min(n_other);
    overlap == 0 || (m >= 4 && overlap == 1) || (m >= 9 && overlap == 2)
}

/// Candidate orthologs of `query`, nearest clades first.
pub fn infer_orthologs(tree: &Tree, query: &str) -> Result<Vec<OrthologRow>, ShootError> {
    let mut prev = tree
        .get_leaf_by_name(query)
        .ok_or_else(|| ShootError::LeafNotFound(query.to_string()))?;

    let mut rows = Vec::new();
    let mut species_seen: BTreeSet<String> = BTreeSet::new();

    while let Some(node) = tree.parent_of(prev) {
        let genes_other: Vec<String> = tree
            .get_node(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
            .into_iter()
            .filter(|&child| child != prev)
            .flat_map(|child| tree.leaf_names_under(child))
            .collect();
        let species_other: BTreeSet<String> =
            genes_other.iter().map(|g| species_of(g)).collect();

        let overlap: BTreeSet<String> =
            species_seen.intersection(&species_other).cloned().collect();
        if is_orthologous(overlap.len(), species_seen.len(), species_other.len()) {
            let mut by_species: BTreeMap<String, Vec<String>> = BTreeMap::new();
            for gene in genes_other {
                by_species.entry(species_of(&gene)).or_default().push(gene);
            }
            rows.extend(
                by_species
                    .into_iter()
                    .filter(|(sp, _)| !overlap.contains(sp))
                    .map(|(species, genes)| OrthologRow { species, genes }),
            );
        }

        species_seen.extend(species_other);
        prev = node;
    }

    Ok(rows)
}

/// Tab-separated report with a `Species\tOrthologs` header.
pub fn write_orthologs<W: Write>(rows: &[OrthologRow], writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "Species\tOrthologs")?;
    for row in rows {
        writeln!(writer, "{}\t{}", row.species, row.genes_joined())?;
    }
    Ok(())
}

/// Species present in the rows, in report order without repeats.
pub fn ortholog_species(rows: &[OrthologRow]) -> Vec<&str> {
    rows.iter().map(|r| r.species.as_str()).unique().collect()
}

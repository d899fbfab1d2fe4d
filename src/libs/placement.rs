//! Placement of a query gene: OG assignment, grafting into the OG tree, then
//! narrowing and ortholog calling on the grafted tree.
//!
//! Homolog search and tree grafting are external tools. They sit behind the
//! [`OgAssigner`] and [`Grafter`] traits and report back with a [`ToolResult`].

use crate::libs::error::ShootError;
use crate::libs::ortholog::{infer_orthologs, write_orthologs};
use crate::libs::phylo::Tree;
use crate::libs::query::{check_query, clean_query};
use crate::libs::scope::{narrow_file, Bounds};
use std::fmt;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

/// Outcome of a call to an external tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResult<T> {
    Success(T),
    /// The tool ran and found nothing
    NoMatch,
    ToolError(String),
}

pub trait OgAssigner {
    /// Orthogroup identifier for the query in `fasta`
    fn assign(&self, fasta: &Path) -> ToolResult<String>;
}

/// Grafted tree as left on disk by a [`Grafter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graft {
    pub tree: PathBuf,
    /// Leaf name of the query in `tree`
    pub query_gene: String,
    pub warning: Option<String>,
}

pub trait Grafter {
    fn add_gene(
        &self,
        og: &str,
        method: TreeMethod,
        cleaned: &Path,
        original: &Path,
    ) -> ToolResult<Graft>;
}

/// Tree inference used by the grafting step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TreeMethod {
    #[default]
    Epa,
    Iqtree,
}

impl FromStr for TreeMethod {
    type Err = ShootError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "epa" => Ok(TreeMethod::Epa),
            "iqtree" => Ok(TreeMethod::Iqtree),
            _ => Err(ShootError::UnknownTreeMethod(s.to_string())),
        }
    }
}

impl fmt::Display for TreeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeMethod::Epa => write!(f, "epa"),
            TreeMethod::Iqtree => write!(f, "iqtree"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub bounds: Bounds,
    pub tree_method: TreeMethod,
    /// Write `<query>.sh.orthologs.tsv` next to the query
    pub orthologs: bool,
    /// Keep the final Newick in the outcome
    pub print_tree: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub og: String,
    pub tree: PathBuf,
    pub query_gene: String,
    pub warning: Option<String>,
    /// Final tree, set with `print_tree`
    pub newick: Option<String>,
    pub orthologs: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    NoHomologs,
    Placed(Placement),
}

/// Place the gene in `query` and post-process the resulting tree.
///
/// A malformed query is rejected before anything is written. No homologs in
/// the database is an outcome, not an error.
pub fn search(
    query: &Path,
    assigner: &dyn OgAssigner,
    grafter: &dyn Grafter,
    options: &SearchOptions,
) -> anyhow::Result<SearchOutcome> {
    let infile = query.to_string_lossy().to_string();
    check_query(&infile)?;
    let cleaned = PathBuf::from(clean_query(&infile)?);

    let og = match assigner.assign(&cleaned) {
        ToolResult::Success(og) => og,
        ToolResult::NoMatch => {
            info!(query = %infile, "no homologs found in this database");
            return Ok(SearchOutcome::NoHomologs);
        }
        ToolResult::ToolError(msg) => return Err(ShootError::ToolError(msg).into()),
    };
    info!(og = %og, method = %options.tree_method, "gene assigned");

    let graft = match grafter.add_gene(&og, options.tree_method, &cleaned, query) {
        ToolResult::Success(graft) => graft,
        ToolResult::NoMatch => {
            return Err(ShootError::ToolError(format!("could not graft query into {}", og)).into())
        }
        ToolResult::ToolError(msg) => return Err(ShootError::ToolError(msg).into()),
    };
    if let Some(w) = &graft.warning {
        warn!("{}", w);
    }
    info!(tree = %graft.tree.display(), "tree");

    let tree_file = graft.tree.to_string_lossy().to_string();
    let newick = if options.bounds.upper.is_some() {
        narrow_file(&tree_file, &graft.query_gene, &options.bounds)?
    } else {
        first_line(&tree_file)?
    };

    let orthologs = if options.orthologs {
        let outfile = PathBuf::from(format!("{}.sh.orthologs.tsv", cleaned.display()));
        let tree = Tree::from_newick(&newick)?;
        let rows = infer_orthologs(&tree, &graft.query_gene)?;
        let mut writer = crate::writer(&outfile.to_string_lossy())?;
        write_orthologs(&rows, &mut writer)?;
        writer.flush()?;
        info!(n_species = rows.len(), "orthologs written");
        Some(outfile)
    } else {
        None
    };

    Ok(SearchOutcome::Placed(Placement {
        og,
        tree: graft.tree,
        query_gene: graft.query_gene,
        warning: graft.warning,
        newick: options.print_tree.then_some(newick),
        orthologs,
    }))
}

fn first_line(infile: &str) -> anyhow::Result<String> {
    let line = crate::reader(infile)?
        .lines()
        .next()
        .transpose()?
        .unwrap_or_default();
    Ok(line.trim_end().to_string())
}

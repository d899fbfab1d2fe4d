use crate::libs::phylo::{NodeId, TreeError};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ShootError {
    /// The query file does not look like FASTA
    InvalidFasta(String),
    /// Tree inference method other than `epa` or `iqtree`
    UnknownTreeMethod(String),
    /// Name not present as a leaf of the tree
    LeafNotFound(String),
    /// The chosen outgroup is not further from the clade than the clade's own stem.
    /// Points at a malformed or non-ultrametric input tree.
    OutgroupTooClose {
        node: NodeId,
        first_leaf: String,
        outgroup: String,
        distance: f64,
        branch_length: f64,
    },
    /// No sister gene can serve as outgroup for the clade
    NoOutgroup { node: NodeId, first_leaf: String },
    /// Tree leaf without a sequence in the alignment
    MissingSequence(String),
    /// An external placement tool failed
    ToolError(String),
    Tree(TreeError),
}

impl fmt::Display for ShootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShootError::InvalidFasta(path) => {
                write!(f, "Input file should be FASTA format: {}", path)
            }
            ShootError::UnknownTreeMethod(method) => {
                write!(f, "{} method has not been implemented", method)
            }
            ShootError::LeafNotFound(name) => write!(f, "Leaf not found in tree: {}", name),
            ShootError::OutgroupTooClose {
                node,
                first_leaf,
                outgroup,
                distance,
                branch_length,
            } => write!(
                f,
                "Outgroup {} is at distance {} from clade {} (containing {}), not beyond its branch length {}",
                outgroup, distance, node, first_leaf, branch_length
            ),
            ShootError::NoOutgroup { node, first_leaf } => write!(
                f,
                "No outgroup candidate for clade {} (containing {})",
                node, first_leaf
            ),
            ShootError::MissingSequence(name) => {
                write!(f, "Sequence not found in alignment: {}", name)
            }
            ShootError::ToolError(msg) => write!(f, "External tool failed: {}", msg),
            ShootError::Tree(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ShootError {}

impl From<TreeError> for ShootError {
    fn from(e: TreeError) -> Self {
        ShootError::Tree(e)
    }
}

impl From<String> for ShootError {
    fn from(msg: String) -> Self {
        ShootError::Tree(TreeError::LogicError(msg))
    }
}

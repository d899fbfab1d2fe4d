use std::collections::BTreeMap;
use std::fmt;

/// NodeId is an index into the Tree's node vector.
pub type NodeId = usize;

/// Prefix of the names given to nodes that stand in for an excised subtree.
pub const PARTITION_PREFIX: &str = "PART.";

/// Prefix of the synthetic leaf spliced into a subtree for root placement.
pub const OUTGROUP_PREFIX: &str = "SHOOTOUTGROUP_";

#[derive(Debug, Clone)]
pub struct Node {
    /// Index in the arena
    pub id: NodeId,

    /// Parent node ID (None for root)
    pub parent: Option<NodeId>,

    /// Ordered child node IDs
    pub children: Vec<NodeId>,

    /// Gene identifier on leaves, partition marker or support label on internal nodes
    pub name: Option<String>,

    /// Branch length to parent
    pub length: Option<f64>,

    /// NHX tags, e.g. [&&NHX:S=human]
    pub properties: Option<BTreeMap<String, String>>,

    /// Soft deletion flag. Detached nodes stay in the arena with this set.
    pub deleted: bool,
}

impl Node {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            name: None,
            length: None,
            properties: None,
            deleted: false,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn add_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Branch length with a missing value read as zero.
    pub fn branch_length(&self) -> f64 {
        self.length.unwrap_or(0.0)
    }

    /// True when the node carries a `PART.` marker.
    pub fn is_partition(&self) -> bool {
        self.name
            .as_deref()
            .is_some_and(|name| name.starts_with(PARTITION_PREFIX))
    }
}

/// A collapsed subtree in a supertree, named `PART.<index>-<n_genes>_genes`.
///
/// ```
/// use shoot::libs::phylo::Partition;
///
/// let part = Partition::new(3, 120);
/// assert_eq!(part.to_string(), "PART.3-120_genes");
/// assert_eq!(Partition::parse("PART.3-120_genes"), Some(part));
/// assert_eq!(Partition::parse("homo_sapiens_1"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub index: usize,
    pub n_genes: usize,
}

impl Partition {
    pub fn new(index: usize, n_genes: usize) -> Self {
        Self { index, n_genes }
    }

    pub fn parse(name: &str) -> Option<Self> {
        let body = name.strip_prefix(PARTITION_PREFIX)?.strip_suffix("_genes")?;
        let (index, n_genes) = body.split_once('-')?;
        Some(Self {
            index: index.parse().ok()?,
            n_genes: n_genes.parse().ok()?,
        })
    }

    /// Representative sequences needed for this subtree.
    pub fn n_profile(&self) -> usize {
        profile_size(self.n_genes)
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}-{}_genes", PARTITION_PREFIX, self.index, self.n_genes)
    }
}

/// Up to five profile sequences stand in for a clade.
pub fn profile_size(n_genes: usize) -> usize {
    n_genes.min(5)
}

/// Name of the synthetic rooting leaf for `gene`.
pub fn outgroup_name(gene: &str) -> String {
    format!("{}{}", OUTGROUP_PREFIX, gene)
}

//! Gene name to species key.
//!
//! Database genes are named `genus_species_geneid`; the species is everything
//! before the second underscore.

/// ```
/// use shoot::libs::species::species_of;
///
/// assert_eq!(species_of("homo_sapiens_GENE1"), "homo_sapiens");
/// assert_eq!(species_of("a_b_c_d"), "a_b");
/// assert_eq!(species_of("orphan"), "orphan");
/// ```
pub fn species_of(gene: &str) -> String {
    gene.split('_').take(2).collect::<Vec<_>>().join("_")
}

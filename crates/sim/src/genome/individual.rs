use crate::genome::Gene;
use serde::{Deserialize, Serialize};

/// Fitness assigned to an individual before any selection phase has run.
pub const DEFAULT_FITNESS: f64 = 1.0;

/// An organism made of an ordered, fixed-length sequence of genes.
///
/// Gene order is significant: position `i` corresponds to row/column `i` of
/// a regulatory network adjacency and of any interaction matrix. The gene
/// count never changes after construction; only levels and fitness do.
/// Each individual owns its genes outright, so no gene can be shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    /// Genes in positional order
    genes: Vec<Gene>,
    /// Fitness computed by the most recent selection phase
    fitness: f64,
}

impl Individual {
    /// Create a new `Individual` from a list of genes.
    pub fn new(genes: Vec<Gene>) -> Self {
        Self {
            genes,
            fitness: DEFAULT_FITNESS,
        }
    }

    /// Build an individual from parallel name and level slices.
    ///
    /// Extra names or levels beyond the shorter slice are ignored.
    pub fn from_levels<S: AsRef<str>>(names: &[S], levels: &[f64]) -> Self {
        let genes = names
            .iter()
            .zip(levels.iter())
            .map(|(name, &level)| Gene::new(name.as_ref(), level))
            .collect();
        Self::new(genes)
    }

    /// Number of genes.
    #[inline]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// True if the individual carries no genes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Borrow the genes in positional order.
    #[inline]
    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    /// Borrow the genes mutably. The slice cannot grow or shrink.
    #[inline]
    pub fn genes_mut(&mut self) -> &mut [Gene] {
        &mut self.genes
    }

    /// Borrow the gene at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Gene> {
        self.genes.get(index)
    }

    /// Find a gene by identifier.
    pub fn gene(&self, id: &str) -> Option<&Gene> {
        self.genes.iter().find(|g| g.id() == id)
    }

    /// Gene identifiers in positional order.
    pub fn gene_names(&self) -> Vec<String> {
        self.genes.iter().map(|g| g.id().to_string()).collect()
    }

    /// Current expression levels in positional order.
    pub fn expression_levels(&self) -> Vec<f64> {
        self.genes.iter().map(Gene::expression_level).collect()
    }

    /// Overwrite expression levels positionally, clamping each to `>= 0`.
    ///
    /// Only `min(len, levels.len())` genes are touched.
    pub fn set_expression_levels(&mut self, levels: &[f64]) {
        for (gene, &level) in self.genes.iter_mut().zip(levels.iter()) {
            gene.set_expression_level(level);
        }
    }

    /// Mean expression level, or 0.0 for an empty gene list.
    pub fn mean_expression(&self) -> f64 {
        if self.genes.is_empty() {
            return 0.0;
        }
        let total: f64 = self.genes.iter().map(Gene::expression_level).sum();
        total / self.genes.len() as f64
    }

    /// Return the fitness from the last selection phase.
    #[inline]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Set the fitness value.
    #[inline]
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

impl Default for Individual {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_individual(levels: &[f64]) -> Individual {
        let names: Vec<String> = (0..levels.len()).map(|i| format!("g{i}")).collect();
        Individual::from_levels(&names, levels)
    }

    #[test]
    fn test_individual_new() {
        let ind = test_individual(&[1.0, 2.0, 3.0]);

        assert_eq!(ind.len(), 3);
        assert!(!ind.is_empty());
        assert_eq!(ind.fitness(), DEFAULT_FITNESS);
        assert_eq!(ind.gene_names(), vec!["g0", "g1", "g2"]);
    }

    #[test]
    fn test_individual_default_is_empty() {
        let ind = Individual::default();
        assert!(ind.is_empty());
        assert_eq!(ind.fitness(), 1.0);
        assert_eq!(ind.mean_expression(), 0.0);
    }

    #[test]
    fn test_mean_expression() {
        let ind = test_individual(&[1.0, 2.0, 3.0]);
        assert_eq!(ind.mean_expression(), 2.0);
    }

    #[test]
    fn test_from_levels_clamps_negative() {
        let ind = Individual::from_levels(&["a", "b"], &[-1.0, 2.0]);
        assert_eq!(ind.expression_levels(), vec![0.0, 2.0]);
    }

    #[test]
    fn test_set_expression_levels() {
        let mut ind = test_individual(&[1.0, 1.0, 1.0]);
        ind.set_expression_levels(&[0.5, -2.0]);

        // Only the first two genes are touched and negatives clamp
        assert_eq!(ind.expression_levels(), vec![0.5, 0.0, 1.0]);
    }

    #[test]
    fn test_gene_lookup() {
        let ind = Individual::from_levels(&["A", "B"], &[0.1, 0.2]);
        assert_eq!(ind.gene("B").map(Gene::expression_level), Some(0.2));
        assert!(ind.gene("C").is_none());
        assert_eq!(ind.get(0).map(Gene::id), Some("A"));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = test_individual(&[1.0, 2.0]);
        let mut copy = original.clone();

        copy.genes_mut()[0].set_expression_level(9.0);
        copy.set_fitness(0.0);

        assert_eq!(original.expression_levels(), vec![1.0, 2.0]);
        assert_eq!(original.fitness(), 1.0);
    }
}

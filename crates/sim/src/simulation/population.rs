//! Population management.
//!
//! A population is the ordered set of individuals owned by one engine. Its
//! membership is fixed at construction: only mutable access to existing
//! individuals is exposed, never insertion or removal.

use crate::genome::{Gene, Individual};
use rayon::prelude::*;

/// An ordered, fixed-size collection of individuals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Create a new population from individuals.
    pub fn new(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    /// Create `size` identical individuals carrying `genes`, all at
    /// `initial_level`.
    pub fn uniform<S: AsRef<str>>(genes: &[S], initial_level: f64, size: usize) -> Self {
        let template = Individual::new(
            genes
                .iter()
                .map(|id| Gene::new(id.as_ref(), initial_level))
                .collect(),
        );
        Self::new(vec![template; size])
    }

    /// Get the number of individuals in the population.
    pub fn size(&self) -> usize {
        self.individuals.len()
    }

    /// Check if population is empty.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Gene count of the first individual, if any.
    pub fn gene_count(&self) -> Option<usize> {
        self.individuals.first().map(Individual::len)
    }

    /// Get all individuals as a slice.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Get mutable access to individuals.
    pub fn individuals_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    /// Get a specific individual by index.
    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.individuals.get(index)
    }

    /// Get a mutable reference to a specific individual.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Individual> {
        self.individuals.get_mut(index)
    }

    /// Fitness of every individual, in population order.
    pub fn fitness_values(&self) -> Vec<f64> {
        self.individuals.iter().map(Individual::fitness).collect()
    }

    /// Mean fitness, or 0.0 for an empty population.
    pub fn mean_fitness(&self) -> f64 {
        if self.individuals.is_empty() {
            return 0.0;
        }
        let total: f64 = self.individuals.par_iter().map(Individual::fitness).sum();
        total / self.individuals.len() as f64
    }

    /// Mean of per-individual mean expression, or 0.0 for an empty
    /// population.
    pub fn mean_expression(&self) -> f64 {
        if self.individuals.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .individuals
            .par_iter()
            .map(Individual::mean_expression)
            .sum();
        total / self.individuals.len() as f64
    }
}

impl From<Vec<Individual>> for Population {
    fn from(individuals: Vec<Individual>) -> Self {
        Self::new(individuals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_population() {
        let pop = Population::uniform(&["A", "B", "C"], 0.5, 4);

        assert_eq!(pop.size(), 4);
        assert_eq!(pop.gene_count(), Some(3));
        for ind in pop.individuals() {
            assert_eq!(ind.expression_levels(), vec![0.5; 3]);
            assert_eq!(ind.gene_names(), vec!["A", "B", "C"]);
        }
    }

    #[test]
    fn test_uniform_individuals_are_independent() {
        let mut pop = Population::uniform(&["A"], 1.0, 2);
        pop.get_mut(0).unwrap().genes_mut()[0].set_expression_level(3.0);

        assert_eq!(pop.get(1).unwrap().expression_levels(), vec![1.0]);
    }

    #[test]
    fn test_empty_population() {
        let pop = Population::default();
        assert!(pop.is_empty());
        assert_eq!(pop.gene_count(), None);
        assert_eq!(pop.mean_fitness(), 0.0);
        assert_eq!(pop.mean_expression(), 0.0);
    }

    #[test]
    fn test_means() {
        let mut pop = Population::from(vec![
            Individual::from_levels(&["a", "b"], &[1.0, 3.0]),
            Individual::from_levels(&["a", "b"], &[0.0, 0.0]),
        ]);
        pop.individuals_mut()[0].set_fitness(0.5);
        pop.individuals_mut()[1].set_fitness(1.5);

        assert_eq!(pop.mean_expression(), 1.0);
        assert_eq!(pop.mean_fitness(), 1.0);
        assert_eq!(pop.fitness_values(), vec![0.5, 1.5]);
    }
}

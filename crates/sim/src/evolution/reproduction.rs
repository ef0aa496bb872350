//! Reproduction strategies producing offspring from parents.
//!
//! These are value-producing operations: they never touch population
//! membership.

pub use crate::errors::ReproductionError;
use crate::genome::Individual;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Uniform per-gene crossover between two parents.
///
/// For each gene position independently, the child takes parent 2's gene
/// with probability `crossover_rate`, otherwise parent 1's.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SexualReproduction {
    crossover_rate: f64,
}

impl SexualReproduction {
    /// Create a sexual reproduction strategy.
    ///
    /// # Errors
    /// Returns an error if `crossover_rate` is outside `[0, 1]`.
    pub fn new(crossover_rate: f64) -> Result<Self, ReproductionError> {
        if !(0.0..=1.0).contains(&crossover_rate) {
            return Err(ReproductionError::InvalidProbability(crossover_rate));
        }
        Ok(Self { crossover_rate })
    }

    #[inline]
    pub fn crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    /// Produce one child from two parents.
    ///
    /// One uniform value is drawn per gene position.
    ///
    /// # Errors
    /// Returns an error if the parents carry a different number of genes.
    pub fn reproduce<R: Rng + ?Sized>(
        &self,
        parent1: &Individual,
        parent2: &Individual,
        rng: &mut R,
    ) -> Result<Individual, ReproductionError> {
        if parent1.len() != parent2.len() {
            return Err(ReproductionError::GeneCountMismatch {
                left: parent1.len(),
                right: parent2.len(),
            });
        }

        let genes = parent1
            .genes()
            .iter()
            .zip(parent2.genes())
            .map(|(g1, g2)| {
                if rng.random::<f64>() < self.crossover_rate {
                    g2.clone()
                } else {
                    g1.clone()
                }
            })
            .collect();
        // Crossover children have not been scored yet
        Ok(Individual::new(genes))
    }
}

/// Clonal reproduction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsexualReproduction;

impl AsexualReproduction {
    /// Produce an independent deep copy of `parent`, fitness included.
    pub fn reproduce(&self, parent: &Individual) -> Individual {
        parent.clone()
    }
}

//! Mutation operations on gene expression levels.
//!
//! Mutation perturbs an individual's expression levels in place, drawing from
//! the engine's random stream. Draw order is fixed (genes in positional
//! order) so that a seeded run is reproducible.

pub use crate::errors::MutationError;
use crate::genome::Individual;
use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};
use std::fmt;

/// Trait for in-place mutation of an individual.
///
/// The random source is passed as a trait object so that models stay object
/// safe and can be boxed inside the engine.
pub trait MutationModel: fmt::Debug + Send + Sync {
    /// Perturb `individual` in place.
    fn mutate(&self, individual: &mut Individual, rng: &mut dyn RngCore);
}

impl<M: MutationModel + ?Sized> MutationModel for Box<M> {
    fn mutate(&self, individual: &mut Individual, rng: &mut dyn RngCore) {
        (**self).mutate(individual, rng)
    }
}

/// Independent Gaussian point mutations.
///
/// For each gene, with probability `rate`, a zero-mean Gaussian perturbation
/// of standard deviation `magnitude` is added to its expression level, which
/// is then clamped to `>= 0`.
///
/// Exactly one uniform draw is consumed per gene, plus one Gaussian draw per
/// hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMutation {
    rate: f64,
    magnitude: f64,
    noise: Normal<f64>,
}

impl PointMutation {
    /// Create a point mutation model.
    ///
    /// # Arguments
    /// * `rate` - Per-gene, per-generation mutation probability [0.0, 1.0]
    /// * `magnitude` - Standard deviation of the perturbation (>= 0.0)
    ///
    /// # Errors
    /// Returns an error if `rate` is outside `[0, 1]` or `magnitude` is
    /// negative or not finite.
    pub fn new(rate: f64, magnitude: f64) -> Result<Self, MutationError> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(MutationError::InvalidMutationRate(rate));
        }
        if !magnitude.is_finite() || magnitude < 0.0 {
            return Err(MutationError::InvalidMagnitude(magnitude));
        }
        let noise =
            Normal::new(0.0, magnitude).map_err(|_| MutationError::InvalidMagnitude(magnitude))?;
        Ok(Self {
            rate,
            magnitude,
            noise,
        })
    }

    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }
}

impl MutationModel for PointMutation {
    fn mutate(&self, individual: &mut Individual, rng: &mut dyn RngCore) {
        for gene in individual.genes_mut() {
            if rng.random::<f64>() < self.rate {
                let delta = self.noise.sample(rng);
                gene.set_expression_level(gene.expression_level() + delta);
            }
        }
    }
}

/// Mutation model that never changes anything and draws nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoMutation;

impl MutationModel for NoMutation {
    fn mutate(&self, _individual: &mut Individual, _rng: &mut dyn RngCore) {}
}

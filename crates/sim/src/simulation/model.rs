//! Generation lifecycle shared by every simulation model.
//!
//! A model owns a zero-based generation counter, a reproducible random
//! stream and a running flag. Concrete models implement [`SimulationModel::step`]
//! and expose their [`ModelState`]; everything else is provided.

use crate::errors::SimulationError;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::info;

/// Bookkeeping common to all simulation models.
#[derive(Debug, Clone)]
pub struct ModelState {
    generation: usize,
    rng: Xoshiro256PlusPlus,
    running: bool,
    seed: Option<u64>,
}

impl ModelState {
    /// Create a fresh state at generation 0 with the running flag set.
    ///
    /// With `Some(seed)` the random stream is fully reproducible; with `None`
    /// it is seeded from the thread-local generator.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_seed(rand::rng().random()),
        };
        Self {
            generation: 0,
            rng,
            running: true,
            seed,
        }
    }

    #[inline]
    pub fn generation(&self) -> usize {
        self.generation
    }

    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn rng_mut(&mut self) -> &mut Xoshiro256PlusPlus {
        &mut self.rng
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Advance the generation counter by exactly one.
    pub fn advance(&mut self) {
        self.generation += 1;
    }
}

/// Lifecycle contract for a generation-stepped model.
pub trait SimulationModel {
    /// Shared lifecycle state.
    fn state(&self) -> &ModelState;

    /// Mutable lifecycle state.
    fn state_mut(&mut self) -> &mut ModelState;

    /// Advance exactly one generation.
    ///
    /// Implementations are responsible for incrementing the counter.
    fn step(&mut self) -> Result<(), SimulationError>;

    /// Current generation (zero-based).
    fn generation(&self) -> usize {
        self.state().generation()
    }

    /// The model's random stream.
    fn rng(&mut self) -> &mut Xoshiro256PlusPlus {
        self.state_mut().rng_mut()
    }

    fn is_running(&self) -> bool {
        self.state().is_running()
    }

    /// Clear the running flag. Takes effect before the next step of `run`.
    fn stop(&mut self) {
        self.state_mut().set_running(false);
    }

    /// Call `step` up to `n` times, checking the running flag before each.
    ///
    /// Errors from `step` are returned as-is and end the run.
    fn run(&mut self, n: usize) -> Result<(), SimulationError> {
        for completed in 0..n {
            if !self.is_running() {
                info!(
                    generation = self.generation(),
                    completed,
                    requested = n,
                    "Run stopped early: running flag cleared"
                );
                break;
            }
            self.step()?;
        }
        Ok(())
    }
}

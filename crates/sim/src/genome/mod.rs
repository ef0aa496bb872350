//! Genome structures.
//!
//! Provides `Gene` (a named expression level) and `Individual` (an ordered,
//! fixed-length set of genes plus a fitness value).

pub mod gene;
pub mod individual;

pub use gene::Gene;
pub use individual::Individual;

//! Evolution module providing selection, reproduction, and mutation.
//!
//! This module implements the evolutionary processes applied to individuals:
//! - **Selection**: Fitness functions (proportional, threshold, epistatic, multi-objective)
//! - **Reproduction**: Sexual crossover and asexual cloning
//! - **Mutation**: Gaussian point mutations on expression levels

pub mod mutation;
pub mod reproduction;
pub mod selection;

pub use mutation::{MutationModel, NoMutation, PointMutation};
pub use reproduction::{AsexualReproduction, SexualReproduction};
pub use selection::{
    EpistaticSelection, MultiObjectiveSelection, ProportionalSelection, SelectionModel,
    ThresholdSelection,
};

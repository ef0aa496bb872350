//! Simulation engine and population management.
//!
//! This module provides the generation lifecycle, the gene-network engine,
//! and the ways of constructing and batching it.
//!
//! - `SimulationModel`: lifecycle contract (`step`, `run`, running flag).
//! - `GeneNetwork`: the engine that runs expression, selection and mutation.
//! - `Population`: in-memory container for individuals used during simulation.
//! - `GeneNetworkBuilder`: fluent builder with defaults and validation.
//! - `SimulationConfig`: serialisable description of a complete engine.
//! - `BatchRunner`: parallel independent runs with derived seeds.

pub mod batch;
pub mod builder;
pub mod config;
pub mod engine;
pub mod model;
pub mod population;

pub use batch::{BatchRunner, RunSummary};
pub use builder::GeneNetworkBuilder;
pub use config::{
    ExpressionConfig, MutationConfig, NetworkConfig, RegulationConfig, SelectionConfig,
    SimulationConfig,
};
pub use engine::GeneNetwork;
pub use model::{ModelState, SimulationModel};
pub use population::Population;

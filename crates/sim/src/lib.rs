//! # Simulation Crate
//!
//! The `sim` crate provides the core logic for gene-regulatory-network
//! evolution. It includes modules for defining genomes, modelling gene
//! expression and regulation, executing evolutionary operators (selection,
//! reproduction, mutation), and running the generation-stepped engine.

pub mod base;
pub mod errors;
pub mod evolution;
pub mod expression;
pub mod genome;
pub mod network;
pub mod prelude;
pub mod reporting;
pub mod simulation;

pub use base::Conditions;
pub use genome::{Gene, Individual};

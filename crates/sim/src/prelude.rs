//! Commonly used imports for convenience.
//!
//! This prelude module provides a convenient way to import the most commonly
//! used types and traits in the grnevo library.
//!
//! # Example
//!
//! ```
//! use grnevo_sim::prelude::*;
//!
//! let network = RegulatoryNetwork::new(&["A", "B"], [("A", "B", 2.0)]).unwrap();
//! let mut sim = GeneNetworkBuilder::new()
//!     .uniform_population(&["A", "B"], 1.0, 2)
//!     .expression_model(CompositeExpression::new(
//!         ConstantExpression::new(0.5).unwrap(),
//!         AdditiveRegulation::new(1.0).unwrap(),
//!     ))
//!     .selection_model(ProportionalSelection)
//!     .regulatory_network(network)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! sim.step().unwrap();
//! assert_eq!(sim.population().individuals()[0].expression_levels(), vec![0.5, 2.5]);
//! ```

pub use crate::base::Conditions;
pub use crate::errors;
pub use crate::evolution::{
    AsexualReproduction, EpistaticSelection, MultiObjectiveSelection, MutationModel, NoMutation,
    PointMutation, ProportionalSelection, SelectionModel, SexualReproduction, ThresholdSelection,
};
pub use crate::expression::{
    AdditiveRegulation, CompositeExpression, ConstantExpression, ExpressionModel, HillExpression,
    LinearExpression, MultiplicativeRegulation, RegulatoryExpressionModel,
};
pub use crate::genome::{Gene, Individual};
pub use crate::network::{RegulatoryEdge, RegulatoryNetwork};
pub use crate::reporting::{DataCollector, RecordingStrategy};
pub use crate::simulation::{
    GeneNetwork, GeneNetworkBuilder, Population, SimulationConfig, SimulationModel,
};

//! Builder pattern for creating gene-network engines.
//!
//! Provides a fluent API with sensible defaults: no mutation, neutral
//! conditions, no regulatory network and an unseeded random stream.

pub use crate::errors::BuilderError;
use crate::base::Conditions;
use crate::evolution::{MutationModel, NoMutation, SelectionModel};
use crate::expression::ExpressionModel;
use crate::network::RegulatoryNetwork;
use crate::simulation::{GeneNetwork, Population};

/// Builder for constructing [`GeneNetwork`] instances with a fluent API.
///
/// # Examples
///
/// ```
/// use grnevo_sim::evolution::{PointMutation, ProportionalSelection};
/// use grnevo_sim::expression::HillExpression;
/// use grnevo_sim::simulation::{GeneNetworkBuilder, SimulationModel};
///
/// let mut sim = GeneNetworkBuilder::new()
///     .uniform_population(&["lacI", "tetR", "cI"], 1.0, 20)
///     .expression_model(HillExpression::new(2.0, 1.0, 2.0).unwrap())
///     .selection_model(ProportionalSelection)
///     .mutation_model(PointMutation::new(0.05, 0.1).unwrap())
///     .seed(42)
///     .build()
///     .unwrap();
///
/// sim.run(10).unwrap();
/// assert_eq!(sim.generation(), 10);
/// ```
#[derive(Debug)]
pub struct GeneNetworkBuilder {
    // Required parameters
    population: Option<Population>,
    expression_model: Option<Box<dyn ExpressionModel>>,
    selection_model: Option<Box<dyn SelectionModel>>,

    // Optional parameters (with defaults)
    mutation_model: Box<dyn MutationModel>,       // Default: NoMutation
    regulatory_network: Option<RegulatoryNetwork>, // Default: None
    conditions: Conditions,                       // Default: neutral
    seed: Option<u64>,                            // Default: None (random)
}

impl Default for GeneNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneNetworkBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self {
            population: None,
            expression_model: None,
            selection_model: None,
            mutation_model: Box::new(NoMutation),
            regulatory_network: None,
            conditions: Conditions::default(),
            seed: None,
        }
    }

    /// Set the population (required).
    pub fn population(mut self, population: impl Into<Population>) -> Self {
        self.population = Some(population.into());
        self
    }

    /// Populate with `size` identical individuals (required, alternative to
    /// [`population`](Self::population)).
    pub fn uniform_population<S: AsRef<str>>(
        mut self,
        genes: &[S],
        initial_level: f64,
        size: usize,
    ) -> Self {
        self.population = Some(Population::uniform(genes, initial_level, size));
        self
    }

    /// Set the expression model (required).
    pub fn expression_model(self, model: impl ExpressionModel + 'static) -> Self {
        self.boxed_expression_model(Box::new(model))
    }

    pub fn boxed_expression_model(mut self, model: Box<dyn ExpressionModel>) -> Self {
        self.expression_model = Some(model);
        self
    }

    /// Set the selection model (required).
    pub fn selection_model(self, model: impl SelectionModel + 'static) -> Self {
        self.boxed_selection_model(Box::new(model))
    }

    pub fn boxed_selection_model(mut self, model: Box<dyn SelectionModel>) -> Self {
        self.selection_model = Some(model);
        self
    }

    /// Set the mutation model (default: no mutation).
    pub fn mutation_model(self, model: impl MutationModel + 'static) -> Self {
        self.boxed_mutation_model(Box::new(model))
    }

    pub fn boxed_mutation_model(mut self, model: Box<dyn MutationModel>) -> Self {
        self.mutation_model = model;
        self
    }

    /// Attach a regulatory network (default: none).
    pub fn regulatory_network(mut self, network: RegulatoryNetwork) -> Self {
        self.regulatory_network = Some(network);
        self
    }

    /// Set the environmental conditions (default: [`Conditions::default`]).
    pub fn conditions(mut self, conditions: Conditions) -> Self {
        self.conditions = conditions;
        self
    }

    /// Set the random seed for reproducibility (default: random).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the engine.
    ///
    /// # Errors
    /// Returns an error if the population, expression model or selection
    /// model was not supplied.
    pub fn build(self) -> Result<GeneNetwork, BuilderError> {
        let population = self
            .population
            .ok_or(BuilderError::MissingRequired("population"))?;
        let expression_model = self
            .expression_model
            .ok_or(BuilderError::MissingRequired("expression_model"))?;
        let selection_model = self
            .selection_model
            .ok_or(BuilderError::MissingRequired("selection_model"))?;

        Ok(GeneNetwork::new(
            population,
            expression_model,
            selection_model,
            self.mutation_model,
            self.regulatory_network,
            Some(self.conditions),
            self.seed,
        ))
    }
}

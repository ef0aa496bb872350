//! Simulation engine for gene-network evolution.
//!
//! [`GeneNetwork`] owns a population and advances it one generation per
//! step through four ordered phases:
//!
//! 1. **Expression**: recompute every gene's level from the conditions and,
//!    when a regulatory network is attached, from its regulators' levels at
//!    the start of the phase.
//! 2. **Selection**: assign each individual's fitness.
//! 3. **Mutation**: perturb levels in place using the engine's random stream.
//! 4. **Generation**: increment the counter.
//!
//! Expression and selection never draw random numbers, so they run in
//! parallel across individuals. Mutation runs sequentially in population
//! order, which keeps seeded runs reproducible.

use crate::base::Conditions;
use crate::errors::{RegulatoryError, SelectionError, SimulationError};
use crate::evolution::{MutationModel, SelectionModel};
use crate::expression::ExpressionModel;
use crate::network::RegulatoryNetwork;
use crate::simulation::{ModelState, Population, SimulationModel};
use rayon::prelude::*;
use tracing::{debug, trace, warn};

/// Concrete gene-network evolution engine.
#[derive(Debug)]
pub struct GeneNetwork {
    state: ModelState,
    population: Population,
    expression_model: Box<dyn ExpressionModel>,
    selection_model: Box<dyn SelectionModel>,
    mutation_model: Box<dyn MutationModel>,
    regulatory_network: Option<RegulatoryNetwork>,
    conditions: Conditions,
}

impl GeneNetwork {
    /// Create a new engine at generation 0.
    ///
    /// No validation happens here: a network whose gene count disagrees with
    /// the individuals surfaces as an error on the first step.
    ///
    /// # Arguments
    ///
    /// * `population` - Individuals to evolve
    /// * `expression_model` - Computes each gene's new level
    /// * `selection_model` - Scores each individual
    /// * `mutation_model` - Perturbs levels after selection
    /// * `regulatory_network` - Optional gene-to-gene coupling
    /// * `conditions` - Environment; defaults to [`Conditions::default`]
    /// * `seed` - Seed for the random stream; `None` for non-deterministic runs
    pub fn new(
        population: impl Into<Population>,
        expression_model: Box<dyn ExpressionModel>,
        selection_model: Box<dyn SelectionModel>,
        mutation_model: Box<dyn MutationModel>,
        regulatory_network: Option<RegulatoryNetwork>,
        conditions: Option<Conditions>,
        seed: Option<u64>,
    ) -> Self {
        let population = population.into();
        debug!(
            population_size = population.size(),
            gene_count = population.gene_count().unwrap_or(0),
            seed = ?seed,
            regulated = regulatory_network.is_some(),
            "Created gene network engine"
        );

        Self {
            state: ModelState::new(seed),
            population,
            expression_model,
            selection_model,
            mutation_model,
            regulatory_network,
            conditions: conditions.unwrap_or_default(),
        }
    }

    /// Get the current population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Get mutable access to the population. Membership stays fixed.
    pub fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    pub fn expression_model(&self) -> &dyn ExpressionModel {
        self.expression_model.as_ref()
    }

    pub fn selection_model(&self) -> &dyn SelectionModel {
        self.selection_model.as_ref()
    }

    pub fn mutation_model(&self) -> &dyn MutationModel {
        self.mutation_model.as_ref()
    }

    pub fn regulatory_network(&self) -> Option<&RegulatoryNetwork> {
        self.regulatory_network.as_ref()
    }

    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    /// The seed the engine was built with, if any.
    pub fn seed(&self) -> Option<u64> {
        self.state.seed()
    }

    /// Replace (or detach) the regulatory network.
    ///
    /// Networks are immutable; rewiring means swapping in a new one.
    pub fn set_regulatory_network(&mut self, network: Option<RegulatoryNetwork>) {
        if let (Some(net), Some(genes)) = (&network, self.population.gene_count()) {
            if net.gene_count() != genes {
                warn!(
                    network_genes = net.gene_count(),
                    individual_genes = genes,
                    "Regulatory network gene count differs from population; next step will fail"
                );
            }
        }
        self.regulatory_network = network;
    }

    pub fn set_conditions(&mut self, conditions: Conditions) {
        self.conditions = conditions;
    }

    /// Mean fitness across the population (0.0 when empty).
    pub fn mean_fitness(&self) -> f64 {
        self.population.mean_fitness()
    }

    /// Mean expression across the population (0.0 when empty).
    pub fn mean_expression(&self) -> f64 {
        self.population.mean_expression()
    }

    /// Recompute every gene's expression level.
    ///
    /// TF inputs are derived from each individual's levels before any of
    /// them are overwritten.
    fn apply_expression(&mut self) -> Result<(), RegulatoryError> {
        let model = self.expression_model.as_ref();
        let network = self.regulatory_network.as_ref();
        let conditions = &self.conditions;
        let regulated = model.regulatory_layer().is_some();
        let basal = model.compute_basal(conditions);

        self.population
            .individuals_mut()
            .par_iter_mut()
            .try_for_each(|individual| -> Result<(), RegulatoryError> {
                if individual.is_empty() {
                    return Ok(());
                }

                let tf_inputs = match network {
                    Some(net) => Some(net.compute_tf_inputs(&individual.expression_levels())?),
                    None => None,
                };

                let levels: Vec<f64> = match (regulated, tf_inputs) {
                    (true, Some(tf)) => tf.iter().map(|&t| model.compute(conditions, t)).collect(),
                    (true, None) => vec![model.compute(conditions, 0.0); individual.len()],
                    (false, _) => vec![basal; individual.len()],
                };
                individual.set_expression_levels(&levels);
                Ok(())
            })
    }

    /// Assign fitness to every individual.
    fn apply_selection(&mut self) -> Result<(), SelectionError> {
        let selection = self.selection_model.as_ref();

        self.population
            .individuals_mut()
            .par_iter_mut()
            .try_for_each(|individual| -> Result<(), SelectionError> {
                let fitness = selection.compute_fitness(individual)?;
                individual.set_fitness(fitness);
                Ok(())
            })
    }

    /// Mutate individuals in population order from the shared stream.
    fn apply_mutation(&mut self) {
        let rng = self.state.rng_mut();
        for individual in self.population.individuals_mut() {
            self.mutation_model.mutate(individual, &mut *rng);
        }
    }
}

impl SimulationModel for GeneNetwork {
    fn state(&self) -> &ModelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ModelState {
        &mut self.state
    }

    /// Advance one generation.
    ///
    /// # Errors
    /// Returns an error if the regulatory network does not match an
    /// individual's gene count or the selection model rejects an individual.
    /// The generation counter is not advanced in that case.
    fn step(&mut self) -> Result<(), SimulationError> {
        self.apply_expression()?;
        self.apply_selection()?;
        self.apply_mutation();
        self.state.advance();

        trace!(
            generation = self.state.generation(),
            mean_fitness = self.mean_fitness(),
            mean_expression = self.mean_expression(),
            "Completed generation"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::{NoMutation, PointMutation, ProportionalSelection, ThresholdSelection};
    use crate::expression::{
        AdditiveRegulation, CompositeExpression, ConstantExpression, LinearExpression,
    };
    use crate::genome::Individual;
    use crate::network::RegulatoryEdge;

    fn engine(
        population: Population,
        expression: Box<dyn ExpressionModel>,
        network: Option<RegulatoryNetwork>,
    ) -> GeneNetwork {
        GeneNetwork::new(
            population,
            expression,
            Box::new(ProportionalSelection),
            Box::new(NoMutation),
            network,
            None,
            Some(42),
        )
    }

    fn constant(level: f64) -> Box<dyn ExpressionModel> {
        Box::new(ConstantExpression::new(level).unwrap())
    }

    #[test]
    fn test_engine_initial_state() {
        let sim = engine(Population::uniform(&["A"], 1.0, 3), constant(0.5), None);

        assert_eq!(sim.generation(), 0);
        assert!(sim.is_running());
        assert_eq!(sim.seed(), Some(42));
        assert_eq!(sim.conditions(), &Conditions::default());
    }

    #[test]
    fn test_step_applies_expression_and_selection() {
        let mut sim = engine(Population::uniform(&["A", "B"], 0.0, 2), constant(2.0), None);
        sim.step().unwrap();

        assert_eq!(sim.generation(), 1);
        for ind in sim.population().individuals() {
            assert_eq!(ind.expression_levels(), vec![2.0, 2.0]);
            assert_eq!(ind.fitness(), 2.0);
        }
    }

    #[test]
    fn test_empty_population_still_advances() {
        let mut sim = engine(Population::default(), constant(1.0), None);
        sim.run(3).unwrap();
        assert_eq!(sim.generation(), 3);
    }

    #[test]
    fn test_empty_individuals_get_zero_fitness() {
        let pop = Population::new(vec![Individual::default(); 2]);
        let mut sim = engine(pop, constant(1.0), None);
        sim.step().unwrap();

        assert_eq!(sim.population().fitness_values(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_conditions_feed_base_model() {
        let mut sim = engine(
            Population::uniform(&["A"], 0.0, 1),
            Box::new(LinearExpression::new(2.0, 1.0).unwrap()),
            None,
        );
        sim.set_conditions(Conditions::default().with_tf_concentration(3.0));
        sim.step().unwrap();

        assert_eq!(sim.population().individuals()[0].expression_levels(), vec![7.0]);
    }

    #[test]
    fn test_regulated_step_uses_prior_levels() {
        let network = RegulatoryNetwork::new(&["A", "B"], [("A", "B", 2.0)]).unwrap();
        let expression = CompositeExpression::new(
            ConstantExpression::new(0.5).unwrap(),
            AdditiveRegulation::new(1.0).unwrap(),
        );
        let pop = Population::new(vec![
            Individual::from_levels(&["A", "B"], &[1.0, 0.0]),
            Individual::from_levels(&["A", "B"], &[3.0, 0.0]),
        ]);
        let mut sim = engine(pop, Box::new(expression), Some(network));
        sim.step().unwrap();

        let levels: Vec<Vec<f64>> = sim
            .population()
            .individuals()
            .iter()
            .map(Individual::expression_levels)
            .collect();
        assert_eq!(levels, vec![vec![0.5, 2.5], vec![0.5, 6.5]]);
    }

    #[test]
    fn test_network_without_regulatory_layer_uses_basal() {
        let network = RegulatoryNetwork::new(&["A", "B"], [("A", "B", 5.0)]).unwrap();
        let mut sim = engine(
            Population::uniform(&["A", "B"], 1.0, 1),
            constant(0.25),
            Some(network),
        );
        sim.step().unwrap();

        assert_eq!(
            sim.population().individuals()[0].expression_levels(),
            vec![0.25, 0.25]
        );
    }

    #[test]
    fn test_mismatched_network_fails_at_step() {
        let network = RegulatoryNetwork::new(&["A", "B", "C"], [("A", "B", 1.0)]).unwrap();
        let mut sim = engine(Population::uniform(&["A", "B"], 1.0, 2), constant(1.0), None);
        sim.set_regulatory_network(Some(network));

        let err = sim.step().unwrap_err();
        assert_eq!(
            err,
            SimulationError::Regulatory(RegulatoryError::ShapeMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(sim.generation(), 0);
    }

    #[test]
    fn test_detach_network() {
        let network = RegulatoryNetwork::new(&["A"], std::iter::empty::<RegulatoryEdge>()).unwrap();
        let mut sim = engine(Population::uniform(&["A"], 1.0, 1), constant(1.0), Some(network));
        assert!(sim.regulatory_network().is_some());

        sim.set_regulatory_network(None);
        assert!(sim.regulatory_network().is_none());
    }

    #[test]
    fn test_threshold_selection_in_engine() {
        let mut sim = GeneNetwork::new(
            Population::uniform(&["A", "B"], 0.0, 3),
            constant(1.0),
            Box::new(ThresholdSelection::new(1.0).unwrap()),
            Box::new(NoMutation),
            None,
            None,
            Some(1),
        );
        sim.step().unwrap();
        assert_eq!(sim.population().fitness_values(), vec![1.0; 3]);
    }

    #[test]
    fn test_mutation_is_applied_after_selection() {
        let mut sim = GeneNetwork::new(
            Population::uniform(&["A", "B", "C"], 0.0, 5),
            constant(1.0),
            Box::new(ProportionalSelection),
            Box::new(PointMutation::new(1.0, 0.5).unwrap()),
            None,
            None,
            Some(9),
        );
        sim.step().unwrap();

        // Fitness reflects the pre-mutation levels
        assert_eq!(sim.population().fitness_values(), vec![1.0; 5]);
        assert!(sim
            .population()
            .individuals()
            .iter()
            .any(|ind| ind.expression_levels() != vec![1.0; 3]));
    }

    #[test]
    fn test_stop_halts_run() {
        let mut sim = engine(Population::uniform(&["A"], 1.0, 1), constant(1.0), None);
        sim.run(2).unwrap();
        sim.stop();
        sim.run(5).unwrap();
        assert_eq!(sim.generation(), 2);
    }
}

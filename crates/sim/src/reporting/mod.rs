//! Read-only data collection over a running engine.
//!
//! A [`DataCollector`] holds named reporter closures at three levels (model,
//! individual and gene) and appends one record per reporter target each time
//! it collects. Reporters receive shared references only, so collection can
//! never alter the model.

use crate::errors::SimulationError;
use crate::genome::{Gene, Individual};
use crate::simulation::{GeneNetwork, SimulationModel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

type ModelReporter = Box<dyn Fn(&GeneNetwork) -> f64 + Send + Sync>;
type IndividualReporter = Box<dyn Fn(&Individual) -> f64 + Send + Sync>;
type GeneReporter = Box<dyn Fn(&Gene) -> f64 + Send + Sync>;

/// Strategy for deciding which generations to record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordingStrategy {
    /// Record every N generations.
    EveryN(usize),

    /// Record at specific generations.
    Specific(Vec<usize>),

    /// Record all generations.
    #[default]
    All,

    /// No recording.
    None,
}

impl RecordingStrategy {
    /// Check if generation should be recorded
    pub fn should_record(&self, generation: usize) -> bool {
        match self {
            Self::EveryN(n) => generation.is_multiple_of(*n),
            Self::Specific(gens) => gens.contains(&generation),
            Self::All => true,
            Self::None => false,
        }
    }
}

/// Model-level values for one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    pub generation: usize,
    pub values: BTreeMap<String, f64>,
}

/// Values for one individual in one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualRecord {
    pub generation: usize,
    /// Position in the population
    pub individual: usize,
    pub values: BTreeMap<String, f64>,
}

/// Values for one gene of one individual in one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneRecord {
    pub generation: usize,
    pub individual: usize,
    pub gene: String,
    pub values: BTreeMap<String, f64>,
}

/// Collects reporter values from a [`GeneNetwork`] over time.
///
/// ```
/// use grnevo_sim::evolution::ProportionalSelection;
/// use grnevo_sim::expression::ConstantExpression;
/// use grnevo_sim::reporting::DataCollector;
/// use grnevo_sim::simulation::GeneNetworkBuilder;
///
/// let mut sim = GeneNetworkBuilder::new()
///     .uniform_population(&["A", "B"], 0.0, 4)
///     .expression_model(ConstantExpression::new(1.0).unwrap())
///     .selection_model(ProportionalSelection)
///     .seed(1)
///     .build()
///     .unwrap();
///
/// let mut collector = DataCollector::new()
///     .with_model_reporter("mean_fitness", |m| m.mean_fitness())
///     .with_gene_reporter("level", |g| g.expression_level());
///
/// collector.run(&mut sim, 3).unwrap();
/// assert_eq!(collector.model_records().len(), 3);
/// assert_eq!(collector.gene_records().len(), 3 * 4 * 2);
/// ```
#[derive(Default)]
pub struct DataCollector {
    model_reporters: Vec<(String, ModelReporter)>,
    individual_reporters: Vec<(String, IndividualReporter)>,
    gene_reporters: Vec<(String, GeneReporter)>,
    strategy: RecordingStrategy,

    model_records: Vec<ModelRecord>,
    individual_records: Vec<IndividualRecord>,
    gene_records: Vec<GeneRecord>,
}

impl fmt::Debug for DataCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataCollector")
            .field("model_reporters", &reporter_names(&self.model_reporters))
            .field("individual_reporters", &reporter_names(&self.individual_reporters))
            .field("gene_reporters", &reporter_names(&self.gene_reporters))
            .field("strategy", &self.strategy)
            .field("model_records", &self.model_records.len())
            .field("individual_records", &self.individual_records.len())
            .field("gene_records", &self.gene_records.len())
            .finish()
    }
}

fn reporter_names<T>(reporters: &[(String, T)]) -> Vec<&str> {
    reporters.iter().map(|(name, _)| name.as_str()).collect()
}

impl DataCollector {
    /// An empty collector that records every generation.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: RecordingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_model_reporter<F>(mut self, name: impl Into<String>, reporter: F) -> Self
    where
        F: Fn(&GeneNetwork) -> f64 + Send + Sync + 'static,
    {
        self.model_reporters.push((name.into(), Box::new(reporter)));
        self
    }

    pub fn with_individual_reporter<F>(mut self, name: impl Into<String>, reporter: F) -> Self
    where
        F: Fn(&Individual) -> f64 + Send + Sync + 'static,
    {
        self.individual_reporters
            .push((name.into(), Box::new(reporter)));
        self
    }

    pub fn with_gene_reporter<F>(mut self, name: impl Into<String>, reporter: F) -> Self
    where
        F: Fn(&Gene) -> f64 + Send + Sync + 'static,
    {
        self.gene_reporters.push((name.into(), Box::new(reporter)));
        self
    }

    pub fn strategy(&self) -> &RecordingStrategy {
        &self.strategy
    }

    /// Record the current state of `model` if the strategy selects its
    /// generation. Returns whether anything was recorded.
    pub fn collect(&mut self, model: &GeneNetwork) -> bool {
        let generation = model.generation();
        if !self.strategy.should_record(generation) {
            return false;
        }

        if !self.model_reporters.is_empty() {
            let values = self
                .model_reporters
                .iter()
                .map(|(name, f)| (name.clone(), f(model)))
                .collect();
            self.model_records.push(ModelRecord { generation, values });
        }

        for (index, individual) in model.population().individuals().iter().enumerate() {
            if !self.individual_reporters.is_empty() {
                let values = self
                    .individual_reporters
                    .iter()
                    .map(|(name, f)| (name.clone(), f(individual)))
                    .collect();
                self.individual_records.push(IndividualRecord {
                    generation,
                    individual: index,
                    values,
                });
            }

            if self.gene_reporters.is_empty() {
                continue;
            }
            for gene in individual.genes() {
                let values = self
                    .gene_reporters
                    .iter()
                    .map(|(name, f)| (name.clone(), f(gene)))
                    .collect();
                self.gene_records.push(GeneRecord {
                    generation,
                    individual: index,
                    gene: gene.id().to_string(),
                    values,
                });
            }
        }
        true
    }

    /// Step `model` `n` times, collecting after every step.
    ///
    /// Stops early, like [`SimulationModel::run`], once the running flag is
    /// cleared.
    pub fn run(&mut self, model: &mut GeneNetwork, n: usize) -> Result<(), SimulationError> {
        for _ in 0..n {
            if !model.is_running() {
                break;
            }
            model.step()?;
            self.collect(model);
        }
        Ok(())
    }

    pub fn model_records(&self) -> &[ModelRecord] {
        &self.model_records
    }

    pub fn individual_records(&self) -> &[IndividualRecord] {
        &self.individual_records
    }

    pub fn gene_records(&self) -> &[GeneRecord] {
        &self.gene_records
    }

    /// Values of one model reporter across recorded generations.
    pub fn model_series(&self, name: &str) -> Vec<(usize, f64)> {
        self.model_records
            .iter()
            .filter_map(|r| r.values.get(name).map(|&v| (r.generation, v)))
            .collect()
    }

    /// Drop all recorded data, keeping reporters and strategy.
    pub fn clear(&mut self) {
        self.model_records.clear();
        self.individual_records.clear();
        self.gene_records.clear();
    }
}

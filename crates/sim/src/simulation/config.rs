//! Serialisable configuration records.
//!
//! These records describe a complete engine setup as plain data. They can be
//! deserialised from any serde format; validation happens when the records
//! are turned into models by their `build` methods.

use crate::base::Conditions;
use crate::errors::{ConfigError, ExpressionError, MutationError, RegulatoryError, SelectionError};
use crate::evolution::{
    EpistaticSelection, MultiObjectiveSelection, MutationModel, NoMutation, PointMutation,
    ProportionalSelection, SelectionModel, ThresholdSelection,
};
use crate::expression::{
    AdditiveRegulation, CompositeExpression, ConstantExpression, ExpressionModel, HillExpression,
    LinearExpression, MultiplicativeRegulation, RegulatoryExpressionModel,
};
use crate::network::{RegulatoryEdge, RegulatoryNetwork};
use crate::simulation::{GeneNetwork, GeneNetworkBuilder, Population};
use serde::{Deserialize, Serialize};

/// Expression model description. Composites nest recursively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExpressionConfig {
    Constant {
        level: f64,
    },
    Linear {
        slope: f64,
        intercept: f64,
    },
    Hill {
        v_max: f64,
        k: f64,
        n: f64,
    },
    Composite {
        base: Box<ExpressionConfig>,
        regulation: RegulationConfig,
    },
}

impl ExpressionConfig {
    /// Construct the described model.
    pub fn build(&self) -> Result<Box<dyn ExpressionModel>, ExpressionError> {
        let model: Box<dyn ExpressionModel> = match self {
            Self::Constant { level } => Box::new(ConstantExpression::new(*level)?),
            Self::Linear { slope, intercept } => Box::new(LinearExpression::new(*slope, *intercept)?),
            Self::Hill { v_max, k, n } => Box::new(HillExpression::new(*v_max, *k, *n)?),
            Self::Composite { base, regulation } => Box::new(CompositeExpression::from_boxed(
                base.build()?,
                regulation.build()?,
            )),
        };
        Ok(model)
    }
}

/// Regulatory layer description.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RegulationConfig {
    Additive { weight: f64 },
    Multiplicative { weight: f64 },
}

impl RegulationConfig {
    pub fn build(&self) -> Result<Box<dyn RegulatoryExpressionModel>, ExpressionError> {
        let model: Box<dyn RegulatoryExpressionModel> = match *self {
            Self::Additive { weight } => Box::new(AdditiveRegulation::new(weight)?),
            Self::Multiplicative { weight } => Box::new(MultiplicativeRegulation::new(weight)?),
        };
        Ok(model)
    }
}

/// Selection model description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionConfig {
    Proportional,
    Threshold { threshold: f64 },
    Epistatic { interactions: Vec<Vec<f64>> },
    MultiObjective { weights: Vec<f64> },
}

impl SelectionConfig {
    pub fn build(&self) -> Result<Box<dyn SelectionModel>, SelectionError> {
        let model: Box<dyn SelectionModel> = match self {
            Self::Proportional => Box::new(ProportionalSelection),
            Self::Threshold { threshold } => Box::new(ThresholdSelection::new(*threshold)?),
            Self::Epistatic { interactions } => {
                Box::new(EpistaticSelection::from_rows(interactions)?)
            }
            Self::MultiObjective { weights } => {
                Box::new(MultiObjectiveSelection::new(weights.clone())?)
            }
        };
        Ok(model)
    }
}

/// Mutation model description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MutationConfig {
    #[default]
    None,
    Point {
        rate: f64,
        magnitude: f64,
    },
}

impl MutationConfig {
    pub fn build(&self) -> Result<Box<dyn MutationModel>, MutationError> {
        let model: Box<dyn MutationModel> = match *self {
            Self::None => Box::new(NoMutation),
            Self::Point { rate, magnitude } => Box::new(PointMutation::new(rate, magnitude)?),
        };
        Ok(model)
    }
}

/// Regulatory network description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Gene names in positional order
    pub genes: Vec<String>,
    /// Directed weighted edges
    #[serde(default)]
    pub edges: Vec<RegulatoryEdge>,
}

impl NetworkConfig {
    pub fn build(&self) -> Result<RegulatoryNetwork, RegulatoryError> {
        RegulatoryNetwork::new(&self.genes, self.edges.iter().cloned())
    }
}

/// Complete engine description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of individuals
    pub population_size: usize,
    /// Gene names carried by every individual
    pub genes: Vec<String>,
    /// Starting expression level of every gene
    #[serde(default)]
    pub initial_level: f64,
    pub expression: ExpressionConfig,
    pub selection: SelectionConfig,
    #[serde(default)]
    pub mutation: MutationConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkConfig>,
    #[serde(default)]
    pub conditions: Conditions,
    /// Optional RNG seed for reproducibility
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SimulationConfig {
    /// Materialise every model and assemble the engine.
    ///
    /// # Errors
    /// Returns the first construction error raised by any described model.
    pub fn build(&self) -> Result<GeneNetwork, ConfigError> {
        let mut builder = GeneNetworkBuilder::new()
            .population(Population::uniform(
                &self.genes,
                self.initial_level,
                self.population_size,
            ))
            .boxed_expression_model(self.expression.build()?)
            .boxed_selection_model(self.selection.build()?)
            .boxed_mutation_model(self.mutation.build()?)
            .conditions(self.conditions.clone());

        if let Some(network) = &self.network {
            builder = builder.regulatory_network(network.build()?);
        }
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        Ok(builder.build()?)
    }
}

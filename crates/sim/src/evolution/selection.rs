//! Selection and fitness functions for individuals.
//!
//! A selection model scores an individual from its current gene expression
//! levels. The score is not forced into `[0, 1]`; each model defines its own
//! range. Every model returns 0.0 for an individual with no genes.
//!
//! ## Fitness Functions
//!
//! - **Proportional**: mean expression level
//! - **Threshold**: 1.0 if mean expression reaches a threshold, else 0.0
//! - **Epistatic**: mean expression plus a pairwise interaction bonus
//!   `(xᵀ M x) / 2`, modelling gene-gene epistasis
//! - **MultiObjective**: weighted mean expression with per-gene weights

use crate::errors::SelectionError;
use crate::genome::Individual;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trait for scoring the fitness of an individual.
///
/// Implementors should be pure: the same individual always yields the same
/// score and the individual is never modified.
///
/// Example (custom model):
///
/// ```rust
/// use grnevo_sim::errors::SelectionError;
/// use grnevo_sim::evolution::SelectionModel;
/// use grnevo_sim::genome::Individual;
///
/// #[derive(Debug)]
/// struct MaxExpression;
///
/// impl SelectionModel for MaxExpression {
///     fn compute_fitness(&self, ind: &Individual) -> Result<f64, SelectionError> {
///         Ok(ind.expression_levels().into_iter().fold(0.0, f64::max))
///     }
/// }
/// ```
pub trait SelectionModel: fmt::Debug + Send + Sync {
    /// Calculate the fitness of `individual`.
    ///
    /// # Errors
    /// Returns an error when the individual's shape is incompatible with the
    /// model (for example a gene count that disagrees with a weight vector).
    fn compute_fitness(&self, individual: &Individual) -> Result<f64, SelectionError>;
}

impl<M: SelectionModel + ?Sized> SelectionModel for Box<M> {
    fn compute_fitness(&self, individual: &Individual) -> Result<f64, SelectionError> {
        (**self).compute_fitness(individual)
    }
}

/// Fitness equal to the mean expression level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProportionalSelection;

impl ProportionalSelection {
    pub fn new() -> Self {
        Self
    }
}

impl SelectionModel for ProportionalSelection {
    fn compute_fitness(&self, individual: &Individual) -> Result<f64, SelectionError> {
        Ok(individual.mean_expression())
    }
}

/// Truncation selection on mean expression.
///
/// Fitness is 1.0 if the mean expression is at or above the threshold
/// (inclusive), otherwise 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdSelection {
    threshold: f64,
}

impl ThresholdSelection {
    /// Create a threshold model.
    ///
    /// # Errors
    /// Returns an error if `threshold` is not finite.
    pub fn new(threshold: f64) -> Result<Self, SelectionError> {
        if !threshold.is_finite() {
            return Err(SelectionError::InvalidParameter(format!(
                "threshold must be finite, got {threshold}"
            )));
        }
        Ok(Self { threshold })
    }

    /// Minimum mean expression for full fitness.
    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl SelectionModel for ThresholdSelection {
    fn compute_fitness(&self, individual: &Individual) -> Result<f64, SelectionError> {
        if individual.is_empty() {
            return Ok(0.0);
        }
        if individual.mean_expression() >= self.threshold {
            Ok(1.0)
        } else {
            Ok(0.0)
        }
    }
}

/// Mean expression plus a pairwise epistatic bonus.
///
/// With expression vector `x` and a square interaction matrix `M`, fitness
/// is `mean(x) + (xᵀ M x) / 2`. The halving counts each unordered gene pair
/// once when `M` is symmetric. A zero matrix reduces this model to
/// `ProportionalSelection`.
///
/// ```compile_fail
/// use grnevo_sim::evolution::EpistaticSelection;
///
/// let json = r#"{"interactions": [[0.0, 0.0], [0.0, 0.0], [0.0, 0.0]]}"#;
/// let model: EpistaticSelection = serde_json::from_str(json).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpistaticSelection {
    interactions: DMatrix<f64>,
}

impl EpistaticSelection {
    /// Create an epistatic model from a dense interaction matrix.
    ///
    /// # Errors
    /// Returns an error if the matrix is not square or contains non-finite
    /// values.
    pub fn new(interactions: DMatrix<f64>) -> Result<Self, SelectionError> {
        let (rows, cols) = interactions.shape();
        if rows != cols {
            return Err(SelectionError::NotSquare { rows, cols });
        }
        if interactions.iter().any(|v| !v.is_finite()) {
            return Err(SelectionError::InvalidParameter(
                "interaction matrix must contain only finite values".into(),
            ));
        }
        Ok(Self { interactions })
    }

    /// Create an epistatic model from nested rows.
    ///
    /// # Errors
    /// Returns an error if the rows do not form a rectangular 2-D matrix, or
    /// if that matrix is not square.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, SelectionError> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != ncols {
                return Err(SelectionError::RaggedMatrix {
                    row,
                    expected: ncols,
                    actual: values.len(),
                });
            }
        }
        let matrix = DMatrix::from_fn(nrows, ncols, |r, c| rows[r][c]);
        Self::new(matrix)
    }

    /// A zero interaction matrix for `n` genes.
    pub fn neutral(n: usize) -> Self {
        Self {
            interactions: DMatrix::zeros(n, n),
        }
    }

    /// The interaction matrix.
    pub fn interactions(&self) -> &DMatrix<f64> {
        &self.interactions
    }

    /// Number of genes the matrix is sized for.
    pub fn dimension(&self) -> usize {
        self.interactions.nrows()
    }
}

impl SelectionModel for EpistaticSelection {
    fn compute_fitness(&self, individual: &Individual) -> Result<f64, SelectionError> {
        if individual.is_empty() {
            return Ok(0.0);
        }
        if individual.len() != self.dimension() {
            return Err(SelectionError::GeneCountMismatch {
                expected: self.dimension(),
                actual: individual.len(),
            });
        }

        let x = DVector::from_vec(individual.expression_levels());
        let bonus = x.dot(&(&self.interactions * &x)) / 2.0;
        Ok(individual.mean_expression() + bonus)
    }
}

/// Weighted mean of expression levels with per-gene weights.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiObjectiveSelection {
    weights: Vec<f64>,
}

impl MultiObjectiveSelection {
    /// Create a multi-objective model.
    ///
    /// # Errors
    /// Returns an error if any weight is negative or not finite.
    pub fn new(weights: Vec<f64>) -> Result<Self, SelectionError> {
        if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(SelectionError::InvalidParameter(format!(
                "objective weights must be finite and non-negative, got {w}"
            )));
        }
        Ok(Self { weights })
    }

    /// Per-gene weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl SelectionModel for MultiObjectiveSelection {
    fn compute_fitness(&self, individual: &Individual) -> Result<f64, SelectionError> {
        if individual.is_empty() {
            return Ok(0.0);
        }
        if individual.len() != self.weights.len() {
            return Err(SelectionError::GeneCountMismatch {
                expected: self.weights.len(),
                actual: individual.len(),
            });
        }

        let total_weight: f64 = self.weights.iter().sum();
        if total_weight == 0.0 {
            return Ok(0.0);
        }
        let weighted: f64 = individual
            .genes()
            .iter()
            .zip(self.weights.iter())
            .map(|(gene, w)| gene.expression_level() * w)
            .sum();
        Ok(weighted / total_weight)
    }
}

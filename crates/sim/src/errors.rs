//! Error types shared across the crate.
//!
//! Every concern gets its own enum. Construction-time validation failures and
//! use-time shape mismatches are reported through these types and propagated
//! unchanged to the caller.

use thiserror::Error;

/// Errors raised when constructing an expression or regulation model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    /// A model parameter is outside its valid range.
    #[error("Invalid expression parameter: {0}")]
    InvalidParameter(String),
}

/// Errors raised by regulatory network construction and use.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegulatoryError {
    /// An edge starts and ends at the same gene.
    #[error("Self-loop on gene '{gene}' is not allowed")]
    SelfLoop { gene: String },

    /// An edge references a gene that is not part of the network.
    #[error("Unknown gene '{gene}' referenced by edge")]
    UnknownGene { gene: String },

    /// The same gene name was declared more than once.
    #[error("Gene '{gene}' declared more than once")]
    DuplicateGene { gene: String },

    /// An edge weight is NaN or infinite.
    #[error("Non-finite weight {weight} on edge {regulator} -> {target}")]
    NonFiniteWeight {
        regulator: String,
        target: String,
        weight: f64,
    },

    /// The expression vector length does not match the network's gene count.
    #[error("Shape mismatch: network has {expected} genes, got vector of length {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
}

/// Errors raised by fitness models.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    /// Invalid parameter value
    #[error("Invalid selection parameter: {0}")]
    InvalidParameter(String),

    /// Interaction matrix is not square.
    #[error("Interaction matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// A row of a nested-vector matrix has the wrong number of columns.
    #[error("Interaction matrix row {row} has {actual} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// The individual's gene count disagrees with the model's dimension.
    #[error("Gene count mismatch: model expects {expected} genes, individual has {actual}")]
    GeneCountMismatch { expected: usize, actual: usize },
}

/// Errors that can occur during reproduction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReproductionError {
    /// Crossover probability outside [0, 1]
    #[error("Invalid crossover probability: {0} (must be between 0.0 and 1.0)")]
    InvalidProbability(f64),

    /// Parents carry a different number of genes
    #[error("Parent gene count mismatch: {left} vs {right}")]
    GeneCountMismatch { left: usize, right: usize },
}

/// Errors that can occur when constructing mutation models.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MutationError {
    /// Invalid mutation rate (must be between 0.0 and 1.0)
    #[error("Invalid mutation rate: {0} (must be between 0.0 and 1.0)")]
    InvalidMutationRate(f64),

    /// Invalid perturbation magnitude (must be finite and non-negative)
    #[error("Invalid mutation magnitude: {0} (must be finite and >= 0.0)")]
    InvalidMagnitude(f64),
}

/// Errors surfaced while advancing a simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Regulatory(#[from] RegulatoryError),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Errors that can occur during engine building.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuilderError {
    /// A required collaborator was not supplied
    #[error("Missing required parameter: {0}")]
    MissingRequired(&'static str),
}

/// Errors raised while materialising configuration records into models.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("expression: {0}")]
    Expression(#[from] ExpressionError),

    #[error("selection: {0}")]
    Selection(#[from] SelectionError),

    #[error("mutation: {0}")]
    Mutation(#[from] MutationError),

    #[error("regulatory network: {0}")]
    Regulatory(#[from] RegulatoryError),

    #[error("{0}")]
    Builder(#[from] BuilderError),
}

/// Errors raised by a batch of independent runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BatchError {
    /// A sample point could not be turned into an engine.
    #[error("sample {index}: {source}")]
    Config {
        index: usize,
        #[source]
        source: ConfigError,
    },

    /// A sample's run failed part-way through.
    #[error("sample {index}: {source}")]
    Simulation {
        index: usize,
        #[source]
        source: SimulationError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_error_display() {
        let err = MutationError::InvalidMutationRate(1.5);
        let msg = format!("{err}");
        assert!(msg.contains("Invalid mutation rate"));
        assert!(msg.contains("1.5"));
    }

    #[test]
    fn test_shape_mismatch_display() {
        let err = RegulatoryError::ShapeMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "Shape mismatch: network has 3 genes, got vector of length 2"
        );
    }

    #[test]
    fn test_simulation_error_is_transparent() {
        let inner = SelectionError::GeneCountMismatch {
            expected: 2,
            actual: 3,
        };
        let err = SimulationError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
    }
}

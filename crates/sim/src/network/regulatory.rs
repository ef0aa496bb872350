//! Immutable regulatory network over a fixed gene-name set.

use crate::errors::RegulatoryError;
use crate::network::SparseMatrix;
use nalgebra::DMatrix;
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::DiGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A directed, weighted regulatory interaction `source -> target`.
///
/// Positive weights activate the target, negative weights repress it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulatoryEdge {
    /// Regulating gene
    pub source: String,
    /// Regulated gene
    pub target: String,
    /// Signed coupling strength
    pub weight: f64,
}

impl RegulatoryEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }
}

impl<S: Into<String>, T: Into<String>> From<(S, T, f64)> for RegulatoryEdge {
    fn from((source, target, weight): (S, T, f64)) -> Self {
        Self::new(source, target, weight)
    }
}

/// Weighted directed graph coupling gene expression levels.
///
/// Built once from a gene-name list and a set of edges and never mutated
/// afterwards; swapping the network of a running engine means replacing the
/// whole value. The adjacency is a CSR matrix keyed `(target, source)` so
/// that `adjacency * x` gives, for each gene, the weighted sum of its
/// regulators' current expression.
///
/// ```
/// use grnevo_sim::network::RegulatoryNetwork;
///
/// // Repressilator: A -| B -| C -| A
/// let net = RegulatoryNetwork::new(
///     &["A", "B", "C"],
///     [("A", "B", -1.0), ("B", "C", -1.0), ("C", "A", -1.0)],
/// )
/// .unwrap();
///
/// assert!(!net.is_acyclic());
/// assert_eq!(net.compute_tf_inputs(&[1.0, 0.0, 0.5]).unwrap(), vec![-0.5, -1.0, 0.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RegulatoryNetwork {
    gene_names: Vec<String>,
    index: HashMap<String, usize>,
    adjacency: SparseMatrix,
    acyclic: bool,
}

impl RegulatoryNetwork {
    /// Build a network from gene names and edges.
    ///
    /// Every stored edge has a non-zero weight. An edge given with weight
    /// `0.0` is accepted but dropped, as it has no regulatory effect.
    /// Duplicate edges between the same pair are summed first, so a pair
    /// whose weights cancel to exactly zero is dropped too. Dropped edges
    /// count towards neither [`edge_count`](Self::edge_count) nor cycle
    /// detection.
    ///
    /// # Errors
    /// Returns an error if a gene name is declared twice, an edge references
    /// an unknown gene, an edge is a self-loop, or a weight is not finite.
    pub fn new<S, E>(gene_names: &[S], edges: E) -> Result<Self, RegulatoryError>
    where
        S: AsRef<str>,
        E: IntoIterator,
        E::Item: Into<RegulatoryEdge>,
    {
        let gene_names: Vec<String> = gene_names.iter().map(|s| s.as_ref().to_string()).collect();

        let mut index = HashMap::with_capacity(gene_names.len());
        for (i, name) in gene_names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(RegulatoryError::DuplicateGene { gene: name.clone() });
            }
        }

        let mut triplets = Vec::new();
        for edge in edges {
            let edge: RegulatoryEdge = edge.into();
            let source = *index
                .get(&edge.source)
                .ok_or_else(|| RegulatoryError::UnknownGene {
                    gene: edge.source.clone(),
                })?;
            let target = *index
                .get(&edge.target)
                .ok_or_else(|| RegulatoryError::UnknownGene {
                    gene: edge.target.clone(),
                })?;
            if source == target {
                return Err(RegulatoryError::SelfLoop { gene: edge.source });
            }
            if !edge.weight.is_finite() {
                return Err(RegulatoryError::NonFiniteWeight {
                    regulator: edge.source,
                    target: edge.target,
                    weight: edge.weight,
                });
            }
            // Row = target, column = source
            triplets.push((target, source, edge.weight));
        }

        let n = gene_names.len();
        let adjacency = SparseMatrix::from_triplets(n, n, triplets);
        let acyclic = Self::check_acyclic(&adjacency);

        tracing::debug!(
            genes = n,
            edges = adjacency.nnz(),
            acyclic,
            "built regulatory network"
        );

        Ok(Self {
            gene_names,
            index,
            adjacency,
            acyclic,
        })
    }

    /// Traverse the non-zero edges looking for a directed cycle.
    fn check_acyclic(adjacency: &SparseMatrix) -> bool {
        let mut graph = DiGraph::<(), f64>::with_capacity(adjacency.nrows(), adjacency.nnz());
        let nodes: Vec<_> = (0..adjacency.nrows()).map(|_| graph.add_node(())).collect();
        for (target, source, weight) in adjacency.triplets() {
            graph.add_edge(nodes[source], nodes[target], weight);
        }
        !is_cyclic_directed(&graph)
    }

    /// Gene names in positional order (an owned copy).
    pub fn gene_names(&self) -> Vec<String> {
        self.gene_names.clone()
    }

    /// Number of genes.
    #[inline]
    pub fn gene_count(&self) -> usize {
        self.gene_names.len()
    }

    /// Number of stored (non-zero) edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.adjacency.nnz()
    }

    /// Position of a gene, if it belongs to the network.
    pub fn gene_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// The read-only adjacency matrix, indexed `(target, source)`.
    #[inline]
    pub fn adjacency(&self) -> &SparseMatrix {
        &self.adjacency
    }

    /// True if the network contains no directed cycle.
    #[inline]
    pub fn is_acyclic(&self) -> bool {
        self.acyclic
    }

    /// Weight of the edge `source -> target`, or 0.0 if absent or unknown.
    pub fn weight(&self, source: &str, target: &str) -> f64 {
        match (self.gene_index(source), self.gene_index(target)) {
            (Some(s), Some(t)) => self.adjacency.get(t, s),
            _ => 0.0,
        }
    }

    /// Incoming edges of `target` as `(regulator name, weight)` pairs.
    pub fn regulators(&self, target: &str) -> Vec<(String, f64)> {
        match self.gene_index(target) {
            Some(t) => self
                .adjacency
                .row(t)
                .map(|(s, w)| (self.gene_names[s].clone(), w))
                .collect(),
            None => Vec::new(),
        }
    }

    /// All stored edges in `(target, source)` row-major order.
    pub fn edges(&self) -> Vec<RegulatoryEdge> {
        self.adjacency
            .triplets()
            .map(|(t, s, w)| RegulatoryEdge::new(&self.gene_names[s], &self.gene_names[t], w))
            .collect()
    }

    /// Dense copy of the adjacency matrix.
    pub fn to_dense(&self) -> DMatrix<f64> {
        self.adjacency.to_dense()
    }

    /// Transcription-factor input of every gene for the given expression
    /// vector: `adjacency * expression`.
    ///
    /// Values may be negative (net repression); they are not clamped.
    ///
    /// # Errors
    /// Returns `ShapeMismatch` if `expression.len()` differs from the gene
    /// count.
    pub fn compute_tf_inputs(&self, expression: &[f64]) -> Result<Vec<f64>, RegulatoryError> {
        self.adjacency
            .mul_vec(expression)
            .ok_or(RegulatoryError::ShapeMismatch {
                expected: self.gene_count(),
                actual: expression.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_gene() -> RegulatoryNetwork {
        RegulatoryNetwork::new(&["A", "B"], [("A", "B", 2.0)]).unwrap()
    }

    #[test]
    fn test_new_basic() {
        let net = two_gene();
        assert_eq!(net.gene_count(), 2);
        assert_eq!(net.edge_count(), 1);
        assert_eq!(net.gene_names(), vec!["A", "B"]);
        assert_eq!(net.gene_index("B"), Some(1));
        assert_eq!(net.weight("A", "B"), 2.0);
        assert_eq!(net.weight("B", "A"), 0.0);
    }

    #[test]
    fn test_adjacency_is_target_by_source() {
        let net = two_gene();
        assert_eq!(net.adjacency().get(1, 0), 2.0);
        assert_eq!(net.adjacency().get(0, 1), 0.0);
    }

    #[test]
    fn test_gene_names_is_a_copy() {
        let net = two_gene();
        let mut names = net.gene_names();
        names.push("C".to_string());
        names[0] = "Z".to_string();
        assert_eq!(net.gene_names(), vec!["A", "B"]);
    }

    #[test]
    fn test_self_loop_rejected() {
        let err = RegulatoryNetwork::new(&["A", "B"], [("A", "A", 1.0)]).unwrap_err();
        assert_eq!(err, RegulatoryError::SelfLoop { gene: "A".into() });
    }

    #[test]
    fn test_unknown_gene_rejected() {
        let err = RegulatoryNetwork::new(&["A", "B"], [("A", "C", 1.0)]).unwrap_err();
        assert_eq!(err, RegulatoryError::UnknownGene { gene: "C".into() });

        let err = RegulatoryNetwork::new(&["A", "B"], [("X", "B", 1.0)]).unwrap_err();
        assert_eq!(err, RegulatoryError::UnknownGene { gene: "X".into() });
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        let err = RegulatoryNetwork::new(&["A", "B"], [("A", "B", f64::NAN)]).unwrap_err();
        assert!(matches!(err, RegulatoryError::NonFiniteWeight { .. }));
        assert!(RegulatoryNetwork::new(&["A", "B"], [("A", "B", f64::INFINITY)]).is_err());
    }

    #[test]
    fn test_duplicate_gene_rejected() {
        let err = RegulatoryNetwork::new(&["A", "A"], Vec::<RegulatoryEdge>::new()).unwrap_err();
        assert_eq!(err, RegulatoryError::DuplicateGene { gene: "A".into() });
    }

    #[test]
    fn test_compute_tf_inputs() {
        let net = two_gene();
        assert_eq!(net.compute_tf_inputs(&[0.3, 5.0]).unwrap(), vec![0.0, 0.6]);
    }

    #[test]
    fn test_compute_tf_inputs_shape_mismatch() {
        let net = two_gene();
        let err = net.compute_tf_inputs(&[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            RegulatoryError::ShapeMismatch {
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_negative_tf_inputs_are_not_clamped() {
        let net = RegulatoryNetwork::new(&["A", "B"], [("A", "B", -1.5)]).unwrap();
        assert_eq!(net.compute_tf_inputs(&[2.0, 0.0]).unwrap(), vec![0.0, -3.0]);
    }

    #[test]
    fn test_acyclic_detection() {
        let chain =
            RegulatoryNetwork::new(&["A", "B", "C"], [("A", "B", 1.0), ("B", "C", 1.0)]).unwrap();
        assert!(chain.is_acyclic());

        let cycle = RegulatoryNetwork::new(
            &["A", "B", "C"],
            [("A", "B", 1.0), ("B", "C", 1.0), ("C", "A", -1.0)],
        )
        .unwrap();
        assert!(!cycle.is_acyclic());

        let mutual = RegulatoryNetwork::new(&["A", "B"], [("A", "B", 1.0), ("B", "A", 1.0)]).unwrap();
        assert!(!mutual.is_acyclic());
    }

    #[test]
    fn test_zero_weight_edges_do_not_form_cycles() {
        let net = RegulatoryNetwork::new(&["A", "B"], [("A", "B", 1.0), ("B", "A", 0.0)]).unwrap();
        assert!(net.is_acyclic());
        assert_eq!(net.edge_count(), 1);
    }

    #[test]
    fn test_zero_weight_edges_are_dropped() {
        let net = RegulatoryNetwork::new(
            &["A", "B", "C"],
            [("A", "B", 0.0), ("B", "C", 2.0), ("C", "A", 0.5), ("C", "A", -0.5)],
        )
        .unwrap();

        assert_eq!(net.edge_count(), 1);
        assert_eq!(net.weight("A", "B"), 0.0);
        assert_eq!(net.weight("C", "A"), 0.0);
        assert_eq!(net.edges().len(), 1);
        assert_eq!(net.compute_tf_inputs(&[1.0, 1.0, 1.0]).unwrap(), vec![0.0, 0.0, 2.0]);
    }

    #[test]
    fn test_duplicate_edges_are_summed() {
        let net = RegulatoryNetwork::new(&["A", "B"], [("A", "B", 1.0), ("A", "B", 0.5)]).unwrap();
        assert_eq!(net.weight("A", "B"), 1.5);
        assert_eq!(net.edge_count(), 1);
    }

    #[test]
    fn test_regulators_and_edges() {
        let net = RegulatoryNetwork::new(
            &["A", "B", "C"],
            [("A", "C", 1.0), ("B", "C", -2.0), ("C", "A", 0.5)],
        )
        .unwrap();

        assert_eq!(
            net.regulators("C"),
            vec![("A".to_string(), 1.0), ("B".to_string(), -2.0)]
        );
        assert!(net.regulators("B").is_empty());
        assert!(net.regulators("missing").is_empty());

        let edges = net.edges();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0], RegulatoryEdge::new("C", "A", 0.5));
    }

    #[test]
    fn test_empty_network() {
        let net = RegulatoryNetwork::new(&[] as &[&str], Vec::<RegulatoryEdge>::new()).unwrap();
        assert_eq!(net.gene_count(), 0);
        assert!(net.is_acyclic());
        assert_eq!(net.compute_tf_inputs(&[]).unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn test_to_dense() {
        let net = two_gene();
        let dense = net.to_dense();
        assert_eq!(dense[(1, 0)], 2.0);
        assert_eq!(dense[(0, 1)], 0.0);
    }
}

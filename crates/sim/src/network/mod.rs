//! Gene regulatory networks.
//!
//! A `RegulatoryNetwork` is an immutable weighted directed graph over a fixed
//! set of gene names, stored as a compressed sparse row (`SparseMatrix`)
//! adjacency indexed `(target, source)`. Multiplying the adjacency by an
//! individual's expression vector yields the transcription-factor input of
//! every gene in one pass.

pub mod regulatory;
pub mod sparse;

pub use regulatory::{RegulatoryEdge, RegulatoryNetwork};
pub use sparse::SparseMatrix;

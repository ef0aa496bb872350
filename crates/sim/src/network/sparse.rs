//! Read-only compressed sparse row matrix.

use nalgebra::DMatrix;
use std::collections::BTreeMap;

/// An immutable sparse matrix in compressed sparse row (CSR) layout.
///
/// The matrix is assembled once from triplets and exposes no mutating
/// methods: the only way to obtain different contents is to build a new
/// matrix. Attempts to write into it are rejected at compile time:
///
/// ```compile_fail
/// use grnevo_sim::network::RegulatoryNetwork;
///
/// let net = RegulatoryNetwork::new(&["A", "B"], [("A", "B", 2.0)]).unwrap();
/// net.adjacency().values()[0] = 5.0;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    nrows: usize,
    ncols: usize,
    /// `row_offsets[r]..row_offsets[r + 1]` spans the entries of row `r`
    row_offsets: Vec<usize>,
    col_indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseMatrix {
    /// Assemble a matrix from `(row, col, value)` triplets.
    ///
    /// Duplicate coordinates are summed and entries that end up exactly zero
    /// are not stored. Callers must guarantee indices are in range.
    pub(crate) fn from_triplets<I>(nrows: usize, ncols: usize, triplets: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let mut entries: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for (row, col, value) in triplets {
            debug_assert!(row < nrows && col < ncols);
            *entries.entry((row, col)).or_insert(0.0) += value;
        }

        let mut row_offsets = vec![0usize; nrows + 1];
        let mut col_indices = Vec::with_capacity(entries.len());
        let mut values = Vec::with_capacity(entries.len());

        // BTreeMap iterates in (row, col) order, which is exactly CSR order
        for ((row, col), value) in entries {
            if value == 0.0 {
                continue;
            }
            row_offsets[row + 1] += 1;
            col_indices.push(col);
            values.push(value);
        }
        for r in 0..nrows {
            row_offsets[r + 1] += row_offsets[r];
        }

        Self {
            nrows,
            ncols,
            row_offsets,
            col_indices,
            values,
        }
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of stored (non-zero) entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Row offset array (length `nrows + 1`).
    #[inline]
    pub fn row_offsets(&self) -> &[usize] {
        &self.row_offsets
    }

    /// Column index of every stored entry, row by row.
    #[inline]
    pub fn col_indices(&self) -> &[usize] {
        &self.col_indices
    }

    /// Value of every stored entry, row by row.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at `(row, col)`, or 0.0 if nothing is stored there.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        if row >= self.nrows {
            return 0.0;
        }
        let span = self.row_offsets[row]..self.row_offsets[row + 1];
        match self.col_indices[span.clone()].binary_search(&col) {
            Ok(pos) => self.values[span.start + pos],
            Err(_) => 0.0,
        }
    }

    /// Stored entries of one row as `(col, value)` pairs.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let span = if row < self.nrows {
            self.row_offsets[row]..self.row_offsets[row + 1]
        } else {
            0..0
        };
        self.col_indices[span.clone()]
            .iter()
            .copied()
            .zip(self.values[span].iter().copied())
    }

    /// All stored entries as `(row, col, value)` in row-major order.
    pub fn triplets(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.nrows).flat_map(move |r| self.row(r).map(move |(c, v)| (r, c, v)))
    }

    /// Matrix-vector product. Returns `None` if `x.len() != ncols`.
    pub fn mul_vec(&self, x: &[f64]) -> Option<Vec<f64>> {
        if x.len() != self.ncols {
            return None;
        }
        let y = (0..self.nrows)
            .map(|r| self.row(r).map(|(c, v)| v * x[c]).sum())
            .collect();
        Some(y)
    }

    /// Dense copy of the matrix.
    pub fn to_dense(&self) -> DMatrix<f64> {
        let mut dense = DMatrix::zeros(self.nrows, self.ncols);
        for (r, c, v) in self.triplets() {
            dense[(r, c)] = v;
        }
        dense
    }
}

//! Sparse matrix types in coordinate (COO) and compressed sparse row (CSR) formats.
//!
//! COO is the construction format: push triplets in any order, duplicates
//! allowed, then coalesce into CSR. CSR is the compute format: two flat
//! index vectors plus a value vector, cache-friendly row iteration, and a
//! row-by-row sparse multiplication used for the co-occurrence build.

use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Coordinate-format sparse matrix builder.
///
/// Accumulates (row, col, value) triplets in insertion order. Duplicate
/// (row, col) keys are allowed and are summed when converting to CSR,
/// which is exactly the reduction the affinity build needs for repeated
/// (user, item) events.
///
/// # Examples
///
/// ```
/// use sugerir::primitives::CooMatrix;
///
/// let mut coo = CooMatrix::new(2, 3);
/// coo.push(0, 1, 2.0);
/// coo.push(0, 1, 3.0); // duplicate key, summed on conversion
/// coo.push(1, 2, 1.0);
///
/// let csr = coo.to_csr();
/// assert_eq!(csr.get(0, 1), 5.0);
/// assert_eq!(csr.nnz(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CooMatrix {
    rows: usize,
    cols: usize,
    entries: Vec<(usize, usize, f32)>,
}

impl CooMatrix {
    /// Creates an empty COO matrix with the given shape.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            entries: Vec::new(),
        }
    }

    /// Creates an empty COO matrix with capacity for `capacity` triplets.
    #[must_use]
    pub fn with_capacity(rows: usize, cols: usize, capacity: usize) -> Self {
        Self {
            rows,
            cols,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Appends a triplet.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    pub fn push(&mut self, row: usize, col: usize, value: f32) {
        assert!(row < self.rows, "row {row} out of bounds ({})", self.rows);
        assert!(col < self.cols, "col {col} out of bounds ({})", self.cols);
        self.entries.push((row, col, value));
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of stored triplets (before coalescing).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no triplets have been pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts to CSR, coalescing duplicate (row, col) keys by summation.
    ///
    /// Column indices within each row come out sorted ascending.
    #[must_use]
    pub fn to_csr(mut self) -> CsrMatrix {
        self.entries
            .sort_unstable_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

        let mut row_counts = vec![0usize; self.rows + 1];
        let mut col_indices = Vec::with_capacity(self.entries.len());
        let mut values: Vec<f32> = Vec::with_capacity(self.entries.len());
        let mut last_key: Option<(usize, usize)> = None;

        for (row, col, value) in self.entries {
            if last_key == Some((row, col)) {
                if let Some(last) = values.last_mut() {
                    *last += value;
                }
            } else {
                col_indices.push(col);
                values.push(value);
                row_counts[row + 1] += 1;
                last_key = Some((row, col));
            }
        }

        // Prefix-sum the per-row counts into offsets.
        for i in 0..self.rows {
            row_counts[i + 1] += row_counts[i];
        }

        CsrMatrix {
            rows: self.rows,
            cols: self.cols,
            row_ptr: row_counts,
            col_indices,
            values,
        }
    }
}

/// Compressed-sparse-row matrix of `f32` values.
///
/// Layout follows the classic three-array CSR scheme: `row_ptr` offsets
/// into `col_indices`/`values`, with column indices sorted ascending
/// within each row.
///
/// # Examples
///
/// ```
/// use sugerir::primitives::CooMatrix;
///
/// let mut coo = CooMatrix::new(2, 2);
/// coo.push(0, 0, 1.0);
/// coo.push(1, 1, 2.0);
/// let csr = coo.to_csr();
///
/// assert_eq!(csr.shape(), (2, 2));
/// assert_eq!(csr.diagonal(), vec![1.0, 2.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsrMatrix {
    rows: usize,
    cols: usize,
    row_ptr: Vec<usize>,
    col_indices: Vec<usize>,
    values: Vec<f32>,
}

impl CsrMatrix {
    /// Creates an empty CSR matrix (no stored entries) with the given shape.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            row_ptr: vec![0; rows + 1],
            col_indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Number of explicitly stored entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.col_indices.len()
    }

    /// Returns the stored entries of one row as parallel slices
    /// (column indices, values).
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[must_use]
    pub fn row(&self, row: usize) -> (&[usize], &[f32]) {
        let start = self.row_ptr[row];
        let end = self.row_ptr[row + 1];
        (&self.col_indices[start..end], &self.values[start..end])
    }

    /// Gets the value at (row, col), returning 0.0 for absent entries.
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(col < self.cols, "col {col} out of bounds ({})", self.cols);
        let (cols, vals) = self.row(row);
        match cols.binary_search(&col) {
            Ok(pos) => vals[pos],
            Err(_) => 0.0,
        }
    }

    /// Returns the main diagonal as a dense vector (zeros for absent entries).
    #[must_use]
    pub fn diagonal(&self) -> Vec<f32> {
        (0..self.rows.min(self.cols))
            .map(|i| self.get(i, i))
            .collect()
    }

    /// Iterates over all stored entries as (row, col, value).
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        (0..self.rows).flat_map(move |r| {
            let (cols, vals) = self.row(r);
            cols.iter().zip(vals.iter()).map(move |(&c, &v)| (r, c, v))
        })
    }

    /// Applies a function to every stored value, keeping the sparsity pattern.
    ///
    /// The function receives (row, col, value).
    #[must_use]
    pub fn map_values<F: Fn(usize, usize, f32) -> f32>(&self, f: F) -> Self {
        let mut values = Vec::with_capacity(self.values.len());
        for row in 0..self.rows {
            let start = self.row_ptr[row];
            let end = self.row_ptr[row + 1];
            for k in start..end {
                values.push(f(row, self.col_indices[k], self.values[k]));
            }
        }
        Self {
            rows: self.rows,
            cols: self.cols,
            row_ptr: self.row_ptr.clone(),
            col_indices: self.col_indices.clone(),
            values,
        }
    }

    /// Transposes the matrix using a counting pass plus prefix offsets.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut row_ptr = vec![0usize; self.cols + 1];
        for &col in &self.col_indices {
            row_ptr[col + 1] += 1;
        }
        for i in 0..self.cols {
            row_ptr[i + 1] += row_ptr[i];
        }

        let mut col_indices = vec![0usize; self.nnz()];
        let mut values = vec![0.0f32; self.nnz()];
        let mut next = row_ptr.clone();
        for row in 0..self.rows {
            let (cols, vals) = self.row(row);
            for (&col, &val) in cols.iter().zip(vals.iter()) {
                let pos = next[col];
                col_indices[pos] = row;
                values[pos] = val;
                next[col] += 1;
            }
        }
        // Source rows are visited in order, so each transposed row stays sorted.
        Self {
            rows: self.cols,
            cols: self.rows,
            row_ptr,
            col_indices,
            values,
        }
    }

    /// Sparse matrix multiplication `self * other`.
    ///
    /// Uses a per-row dense accumulator (Gustavson's algorithm), so the
    /// cost is proportional to the number of scalar products over stored
    /// entries rather than the dense dimensions. Rows are independent and
    /// computed in parallel when the `parallel` feature is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if inner dimensions don't match.
    pub fn matmul(&self, other: &Self) -> Result<Self, &'static str> {
        if self.cols != other.rows {
            return Err("Matrix dimensions don't match for multiplication");
        }

        #[cfg(feature = "parallel")]
        let row_results: Vec<(Vec<usize>, Vec<f32>)> = (0..self.rows)
            .into_par_iter()
            .map(|row| self.matmul_row(row, other))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let row_results: Vec<(Vec<usize>, Vec<f32>)> = (0..self.rows)
            .map(|row| self.matmul_row(row, other))
            .collect();

        let nnz: usize = row_results.iter().map(|(c, _)| c.len()).sum();
        let mut row_ptr = Vec::with_capacity(self.rows + 1);
        let mut col_indices = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);
        row_ptr.push(0);
        for (cols, vals) in row_results {
            col_indices.extend(cols);
            values.extend(vals);
            row_ptr.push(col_indices.len());
        }

        Ok(Self {
            rows: self.rows,
            cols: other.cols,
            row_ptr,
            col_indices,
            values,
        })
    }

    /// Computes one output row of `self * other` with a dense accumulator.
    fn matmul_row(&self, row: usize, other: &Self) -> (Vec<usize>, Vec<f32>) {
        let mut acc = vec![0.0f32; other.cols];
        let mut mark = vec![false; other.cols];
        let mut touched = Vec::new();
        let (cols, vals) = self.row(row);
        for (&k, &a) in cols.iter().zip(vals.iter()) {
            let (other_cols, other_vals) = other.row(k);
            for (&j, &b) in other_cols.iter().zip(other_vals.iter()) {
                if !mark[j] {
                    mark[j] = true;
                    touched.push(j);
                }
                acc[j] += a * b;
            }
        }
        touched.sort_unstable();
        let row_vals = touched.iter().map(|&j| acc[j]).collect();
        (touched, row_vals)
    }

    /// Multiplies a dense row vector by this matrix: `out = v * self`.
    ///
    /// Only the stored entries of `self` are visited.
    ///
    /// # Panics
    ///
    /// Panics if `v.len()` doesn't match the number of rows.
    #[must_use]
    pub fn left_vecmul(&self, v: &[f32]) -> Vec<f32> {
        assert_eq!(v.len(), self.rows, "vector length must match matrix rows");
        let mut out = vec![0.0f32; self.cols];
        for (row, &scale) in v.iter().enumerate() {
            if scale == 0.0 {
                continue;
            }
            let (cols, vals) = self.row(row);
            for (&col, &val) in cols.iter().zip(vals.iter()) {
                out[col] += scale * val;
            }
        }
        out
    }

    /// Materializes the matrix as a dense row-major vector.
    ///
    /// Intended for small matrices in tests and inspection.
    #[must_use]
    pub fn to_dense(&self) -> Vec<f32> {
        let mut dense = vec![0.0f32; self.rows * self.cols];
        for (row, col, val) in self.iter() {
            dense[row * self.cols + col] = val;
        }
        dense
    }
}

#[cfg(test)]
#[path = "sparse_tests.rs"]
mod tests;

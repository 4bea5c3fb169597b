//! Dense matrix storage and the linear-algebra primitives built on it
//!
//! Everything is single precision and stored row-major in one flat buffer,
//! so vectors are simply `R×1` matrices handed around as slices.

pub mod ops;

use rayon::prelude::*;

/// A heap-owned, row-major dense matrix of `f32`
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl DenseMatrix {
    /// Allocate an all-zero `rows × cols` matrix
    ///
    /// Every cell is independent, so zeroing runs on the rayon pool.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        data.par_extend((0..rows * cols).into_par_iter().map(|_| 0.0f32));
        Self { rows, cols, data }
    }

    /// Allocate an `n × n` all-zero matrix
    pub fn square(n: usize) -> Self {
        Self::zeros(n, n)
    }

    /// Wrap an existing row-major buffer
    ///
    /// Returns `None` when the buffer length doesn't match the shape.
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<f32>) -> Option<Self> {
        if data.len() != rows * cols {
            return None;
        }
        Some(Self { rows, cols, data })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the matrix has as many rows as columns
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Read the cell at (`row`, `col`)
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols + col]
    }

    /// Overwrite the cell at (`row`, `col`)
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row * self.cols + col] = value;
    }

    /// Borrow one row
    pub fn row(&self, row: usize) -> &[f32] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Sum of the entries in column `col`
    pub fn column_sum(&self, col: usize) -> f32 {
        (0..self.rows).map(|row| self.get(row, col)).sum()
    }

    /// Flat row-major view
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Flat mutable row-major view
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }
}

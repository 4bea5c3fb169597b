//! Vector/matrix primitives used by the power-iteration solver
//!
//! All but [`norm`] are data-parallel over independent output cells: each
//! cell is written exactly once from inputs nobody else is writing, so the
//! result never depends on how rayon schedules the work.

use rayon::prelude::*;

use super::DenseMatrix;
use crate::error::{RankError, Result};

/// Multiply every entry by `scalar`, in place
///
/// Works on any flat buffer: pass `matrix.as_mut_slice()` for a matrix or a
/// score vector directly.
pub fn scale(values: &mut [f32], scalar: f32) {
    values.par_iter_mut().for_each(|v| *v *= scalar);
}

/// Compute `output = matrix · input`
///
/// `input` must have `matrix.cols()` entries and `output` `matrix.rows()`.
/// The two buffers are distinct by construction, so every row reads the
/// untouched input vector.
pub fn mat_vec_into(matrix: &DenseMatrix, input: &[f32], output: &mut [f32]) -> Result<()> {
    if input.len() != matrix.cols() {
        return Err(RankError::DimensionMismatch {
            op: "mat_vec",
            expected: matrix.cols(),
            actual: input.len(),
        });
    }
    if output.len() != matrix.rows() {
        return Err(RankError::DimensionMismatch {
            op: "mat_vec",
            expected: matrix.rows(),
            actual: output.len(),
        });
    }

    output.par_iter_mut().enumerate().for_each(|(i, out)| {
        let mut sum = 0.0f32;
        for (a, x) in matrix.row(i).iter().zip(input) {
            sum += a * x;
        }
        *out = sum;
    });

    Ok(())
}

/// Compute `vector = matrix · vector`
///
/// The product is staged in a separate buffer and copied back only once
/// every row is done. The matrix must be square.
pub fn mat_vec(matrix: &DenseMatrix, vector: &mut [f32]) -> Result<()> {
    if !matrix.is_square() {
        return Err(RankError::DimensionMismatch {
            op: "mat_vec",
            expected: matrix.cols(),
            actual: matrix.rows(),
        });
    }

    let mut product = vec![0.0f32; matrix.rows()];
    mat_vec_into(matrix, vector, &mut product)?;
    vector
        .par_iter_mut()
        .zip(product.par_iter())
        .for_each(|(dst, &src)| *dst = src);

    Ok(())
}

/// Add `rhs` into `lhs` elementwise
pub fn add_assign(lhs: &mut [f32], rhs: &[f32]) -> Result<()> {
    if lhs.len() != rhs.len() {
        return Err(RankError::DimensionMismatch {
            op: "add",
            expected: lhs.len(),
            actual: rhs.len(),
        });
    }

    lhs.par_iter_mut()
        .zip(rhs.par_iter())
        .for_each(|(a, &b)| *a += b);

    Ok(())
}

/// Euclidean (L2) norm
///
/// Serial reduction; entries are summed in index order.
pub fn norm(values: &[f32]) -> f32 {
    let mut sum = 0.0f32;
    for v in values {
        sum += v * v;
    }
    sum.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_matrix() -> DenseMatrix {
        // [1 2]
        // [3 4]
        DenseMatrix::from_row_major(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap()
    }

    #[test]
    fn test_scale_in_place() {
        let mut values = vec![1.0, -2.0, 0.5];
        scale(&mut values, 2.0);
        assert_eq!(values, vec![2.0, -4.0, 1.0]);
    }

    #[test]
    fn test_scale_matrix_buffer() {
        let mut m = sample_matrix();
        scale(m.as_mut_slice(), 0.5);
        assert_eq!(m.as_slice(), &[0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_mat_vec_uses_original_vector() {
        let m = sample_matrix();
        let mut v = vec![1.0, 1.0];
        mat_vec(&m, &mut v).unwrap();

        // Row 1 must see the original v[0] = 1, not the freshly written 3
        assert_eq!(v, vec![3.0, 7.0]);
    }

    #[test]
    fn test_mat_vec_is_linear() {
        let m = DenseMatrix::from_row_major(3, 3, vec![0.0, 0.5, 1.0, 0.5, 0.0, 0.0, 0.5, 0.5, 0.0])
            .unwrap();
        let base = vec![0.2, 0.3, 0.5];
        let k = 3.5f32;

        let mut plain = base.clone();
        mat_vec(&m, &mut plain).unwrap();

        let mut scaled = base.clone();
        scale(&mut scaled, k);
        mat_vec(&m, &mut scaled).unwrap();

        for (p, s) in plain.iter().zip(&scaled) {
            assert!((p * k - s).abs() < 1e-5);
        }
    }

    #[test]
    fn test_mat_vec_into_rectangular() {
        let m = DenseMatrix::from_row_major(1, 3, vec![1.0, 2.0, 3.0]).unwrap();
        let mut out = vec![0.0];
        mat_vec_into(&m, &[1.0, 1.0, 1.0], &mut out).unwrap();
        assert_eq!(out, vec![6.0]);
    }

    #[test]
    fn test_mat_vec_dimension_mismatch() {
        let m = sample_matrix();
        let mut v = vec![1.0, 2.0, 3.0];
        let err = mat_vec(&m, &mut v).unwrap_err();
        assert!(matches!(err, RankError::DimensionMismatch { op: "mat_vec", .. }));

        let rect = DenseMatrix::zeros(2, 3);
        let mut v = vec![1.0, 2.0, 3.0];
        assert!(mat_vec(&rect, &mut v).is_err());
    }

    #[test]
    fn test_add_assign() {
        let mut a = vec![1.0, 2.0];
        add_assign(&mut a, &[0.5, -1.0]).unwrap();
        assert_eq!(a, vec![1.5, 1.0]);

        assert!(add_assign(&mut a, &[1.0]).is_err());
    }

    #[test]
    fn test_norm() {
        assert_eq!(norm(&[3.0, 4.0]), 5.0);
        assert_eq!(norm(&[0.0, 0.0, 0.0]), 0.0);
        assert_eq!(norm(&[]), 0.0);
        assert!(norm(&[-1e-3, 0.0]) > 0.0);
    }
}

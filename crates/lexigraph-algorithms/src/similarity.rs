//! Pairwise cosine similarity
//!
//! The matrix is computed once per build and shared by every later stage, so
//! all stages read the exact same `f64` values.

use ndarray::Array2;
use rayon::prelude::*;
use thiserror::Error;

/// Similarity errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimilarityError {
    #[error("Vector {index} has zero magnitude")]
    ZeroVector { index: usize },

    #[error("Vector {index} contains non-finite components")]
    NonFinite { index: usize },

    #[error("Dimension mismatch at vector {index}: expected {expected}, got {got}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        got: usize,
    },
}

pub type SimilarityResult<T> = Result<T, SimilarityError>;

/// Symmetric N x N cosine similarity matrix.
///
/// The diagonal is fixed at 1.0. Off-diagonal values are clamped to [-1, 1]
/// so rounding never produces a similarity above 1.0.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    values: Array2<f64>,
}

impl SimilarityMatrix {
    /// Build a matrix from a pairwise function. `f(i, j)` is only called for
    /// `i < j`; the lower triangle mirrors it and the diagonal is 1.0.
    pub fn from_fn<F>(n: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> f64,
    {
        let mut values = Array2::<f64>::zeros((n, n));
        for i in 0..n {
            values[[i, i]] = 1.0;
            for j in (i + 1)..n {
                let s = f(i, j);
                values[[i, j]] = s;
                values[[j, i]] = s;
            }
        }
        SimilarityMatrix { values }
    }

    /// Similarity between vectors `i` and `j`
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[[i, j]]
    }

    /// Number of vectors the matrix covers
    pub fn len(&self) -> usize {
        self.values.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.values.nrows() == 0
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.values
    }
}

/// Compute the cosine similarity matrix for `vectors`.
///
/// Vectors are L2-normalised first, then rows are filled in parallel and the
/// upper triangle is mirrored into the lower one so the result is exactly
/// symmetric.
pub fn cosine_similarity_matrix(vectors: &[Vec<f32>]) -> SimilarityResult<SimilarityMatrix> {
    let n = vectors.len();
    if n == 0 {
        return Ok(SimilarityMatrix {
            values: Array2::zeros((0, 0)),
        });
    }

    let dim = vectors[0].len();
    let mut normalized = Array2::<f64>::zeros((n, dim));

    for (i, vector) in vectors.iter().enumerate() {
        if vector.len() != dim {
            return Err(SimilarityError::DimensionMismatch {
                index: i,
                expected: dim,
                got: vector.len(),
            });
        }

        let norm = vector
            .iter()
            .map(|&x| f64::from(x) * f64::from(x))
            .sum::<f64>()
            .sqrt();
        if !norm.is_finite() {
            return Err(SimilarityError::NonFinite { index: i });
        }
        if norm == 0.0 {
            return Err(SimilarityError::ZeroVector { index: i });
        }

        for (k, &x) in vector.iter().enumerate() {
            normalized[[i, k]] = f64::from(x) / norm;
        }
    }

    let rows: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|i| {
            let a = normalized.row(i);
            let mut row = vec![0.0; n];
            for (j, cell) in row.iter_mut().enumerate().skip(i + 1) {
                *cell = a.dot(&normalized.row(j)).clamp(-1.0, 1.0);
            }
            row
        })
        .collect();

    let mut values = Array2::<f64>::zeros((n, n));
    for (i, row) in rows.into_iter().enumerate() {
        values[[i, i]] = 1.0;
        for j in (i + 1)..n {
            values[[i, j]] = row[j];
            values[[j, i]] = row[j];
        }
    }

    Ok(SimilarityMatrix { values })
}

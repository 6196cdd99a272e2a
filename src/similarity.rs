//! Pairwise affinity construction for the SymNMF pipeline.
//!
//! Raw points are turned into a Gaussian (heat-kernel) similarity matrix
//! `W`, whose row sums form the diagonal degree matrix `D`, and finally the
//! symmetrically normalized affinity `A = D^(-1/2) · W · D^(-1/2)` that the
//! factorizer consumes.

use ndarray::{Array1, Array2, ArrayBase, Data, Ix2};
use thiserror::Error;

use crate::distance::{Distance, L2Dist};
use crate::Float;

#[derive(Error, Debug)]
pub enum SimilarityError {
    /// A point with zero similarity to every other point produces a
    /// zero-degree row, which cannot be normalized without dividing by
    /// zero.
    #[error("point {0} has zero similarity to every other point, the affinity matrix cannot be normalized")]
    ZeroDegree(usize),
}

/// Gaussian similarity matrix of a point set.
///
/// `W[(i, j)] = exp(-||p_i - p_j||² / 2)` for `i ≠ j` and `W[(i, i)] = 0`.
/// Only the upper triangle is computed and then mirrored, so the result is
/// symmetric bit-for-bit rather than up to rounding.
pub fn similarity<F: Float, D: Data<Elem = F>>(observations: &ArrayBase<D, Ix2>) -> Array2<F> {
    let n_samples = observations.nrows();
    let mut w = Array2::zeros((n_samples, n_samples));

    for i in 0..n_samples {
        for j in (i + 1)..n_samples {
            let sq_dist = L2Dist.rdistance(observations.row(i), observations.row(j));
            let affinity = (-sq_dist / F::cast(2.)).exp();
            w[(i, j)] = affinity;
            w[(j, i)] = affinity;
        }
    }
    w
}

/// Row sums of an affinity matrix, i.e. the diagonal of the degree matrix.
pub fn degree_vector<F: Float, D: Data<Elem = F>>(w: &ArrayBase<D, Ix2>) -> Array1<F> {
    w.rows().into_iter().map(|row| row.sum()).collect()
}

/// Diagonal degree matrix of a point set, materialized as a full `N × N`
/// matrix with the row sums of [`similarity`] on the diagonal.
pub fn degree<F: Float, D: Data<Elem = F>>(observations: &ArrayBase<D, Ix2>) -> Array2<F> {
    Array2::from_diag(&degree_vector(&similarity(observations)))
}

/// Symmetric normalization `A = D^(-1/2) · W · D^(-1/2)` of an affinity
/// matrix.
///
/// `A[(i, j)] = W[(i, j)] / sqrt(D[i] · D[j])`, computed on the upper
/// triangle and mirrored like [`similarity`]. Fails with
/// [`SimilarityError::ZeroDegree`] when any row of `w` sums to zero; the
/// result never contains NaN or infinities.
pub fn normalize<F: Float, D: Data<Elem = F>>(
    w: &ArrayBase<D, Ix2>,
) -> Result<Array2<F>, SimilarityError> {
    let degrees = degree_vector(w);
    if let Some(isolated) = degrees.iter().position(|d| *d <= F::zero()) {
        return Err(SimilarityError::ZeroDegree(isolated));
    }
    let inv_sqrt = degrees.mapv(|d| F::one() / d.sqrt());

    let n_samples = w.nrows();
    let mut a = Array2::zeros((n_samples, n_samples));
    for i in 0..n_samples {
        a[(i, i)] = w[(i, i)] * inv_sqrt[i] * inv_sqrt[i];
        for j in (i + 1)..n_samples {
            let scaled = w[(i, j)] * inv_sqrt[i] * inv_sqrt[j];
            a[(i, j)] = scaled;
            a[(j, i)] = scaled;
        }
    }
    Ok(a)
}

/// Normalized similarity matrix of a point set, composing [`similarity`]
/// and [`normalize`].
pub fn normalized<F: Float, D: Data<Elem = F>>(
    observations: &ArrayBase<D, Ix2>,
) -> Result<Array2<F>, SimilarityError> {
    normalize(&similarity(observations))
}

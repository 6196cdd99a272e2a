//! Distance metrics over fixed-dimension real vectors.

use ndarray::{ArrayView1, Zip};

use crate::error::{Error, Result};
use crate::Float;

/// A distance metric between two points.
///
/// Should satisfy the triangle inequality (no squared Euclidean); callers
/// needing only the *order* of distances can use [`Distance::rdistance`],
/// which is allowed to be a cheaper monotone surrogate.
pub trait Distance<F: Float>: Clone + Send + Sync {
    /// Panics if `a` and `b` are not of equal dimension; use
    /// [`euclidean`] at the public boundary where inputs are unchecked.
    fn distance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F;

    /// Fast distance surrogate that keeps the order of the distance function
    fn rdistance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        self.distance(a, b)
    }

    fn rdist_to_dist(&self, rdist: F) -> F {
        rdist
    }

    fn dist_to_rdist(&self, dist: F) -> F {
        dist
    }
}

/// Euclidean (L2) distance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct L2Dist;

impl<F: Float> Distance<F> for L2Dist {
    fn distance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        self.rdistance(a, b).sqrt()
    }

    fn rdistance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        Zip::from(&a)
            .and(&b)
            .fold(F::zero(), |acc, &a, &b| acc + (a - b) * (a - b))
    }

    fn rdist_to_dist(&self, rdist: F) -> F {
        rdist.sqrt()
    }

    fn dist_to_rdist(&self, dist: F) -> F {
        dist * dist
    }
}

/// Euclidean distance between two vectors of equal dimension.
///
/// Unlike the [`Distance`] implementations, which are reserved for inner
/// loops where matrix shapes already guarantee equal dimensions, this
/// checks its inputs and fails with [`Error::DimensionMismatch`] when the
/// lengths differ.
pub fn euclidean<F: Float>(a: ArrayView1<F>, b: ArrayView1<F>) -> Result<F> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(L2Dist.distance(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn euclidean_matches_hand_computation() {
        let a = array![0., 3.];
        let b = array![4., 0.];
        assert_abs_diff_eq!(euclidean(a.view(), b.view()).unwrap(), 5.0);
    }

    #[test]
    fn euclidean_is_zero_on_identical_points() {
        let a = array![1.5, -2., 7.25];
        assert_abs_diff_eq!(euclidean(a.view(), a.view()).unwrap(), 0.0);
    }

    #[test]
    fn euclidean_rejects_mismatched_dimensions() {
        let a = array![0., 1.];
        let b = array![0., 1., 2.];
        let res = euclidean(a.view(), b.view());
        assert!(matches!(
            res,
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn rdistance_keeps_order() {
        let origin = array![0., 0.];
        let near = array![1., 1.];
        let far = array![3., 4.];
        let d_near: f64 = L2Dist.rdistance(origin.view(), near.view());
        let d_far = L2Dist.rdistance(origin.view(), far.view());
        assert!(d_near < d_far);
        assert_abs_diff_eq!(L2Dist.rdist_to_dist(d_far), 5.0);
    }
}

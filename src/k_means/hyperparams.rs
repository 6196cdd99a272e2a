use ndarray_rand::rand::Rng;

use super::errors::KMeansParamsError;
use super::init::KMeansInit;
use crate::param_guard::ParamGuard;
use crate::Float;

/// The set of hyperparameters that can be specified for the execution of
/// the [K-means algorithm](crate::KMeans).
#[derive(Clone, Debug, PartialEq)]
pub struct KMeansValidParams<F: Float, R: Rng> {
    /// An iteration is considered the last one if, for every centroid, the
    /// euclidean distance between its previous and updated position is
    /// strictly lower than `tolerance`.
    tolerance: F,
    /// We exit the training loop when the number of training iterations
    /// exceeds `max_n_iterations` even if the `tolerance` convergence
    /// condition has not been met.
    max_n_iterations: u64,
    /// The number of clusters we will be looking for in the training dataset.
    n_clusters: usize,
    /// The initialization strategy used to pick the starting centroids.
    init: KMeansInit<F>,
    /// The random number generator
    rng: R,
}

/// An helper struct used to construct a set of [valid hyperparameters](KMeansValidParams)
/// for the [K-means algorithm](crate::KMeans) (using the builder pattern).
#[derive(Clone, Debug, PartialEq)]
pub struct KMeansParams<F: Float, R: Rng>(KMeansValidParams<F, R>);

impl<F: Float, R: Rng> KMeansParams<F, R> {
    /// `new` lets us configure our training algorithm parameters:
    /// * we will be looking for `n_clusters` in the training dataset;
    /// * an iteration is considered the last one if every centroid moved
    ///   strictly less than `tolerance` during the update step;
    /// * we exit the training loop when the number of training iterations
    ///   exceeds `max_n_iterations` even if the `tolerance` convergence
    ///   condition has not been met.
    ///
    /// Defaults are provided if optional parameters are not specified:
    /// * `tolerance = 1e-4`
    /// * `max_n_iterations = 300`
    /// * `init = KMeansInit::FirstK`
    pub fn new(n_clusters: usize, rng: R) -> Self {
        Self(KMeansValidParams {
            tolerance: F::cast(1e-4),
            max_n_iterations: 300,
            n_clusters,
            init: KMeansInit::FirstK,
            rng,
        })
    }

    /// Change the value of `tolerance`
    pub fn tolerance(mut self, tolerance: F) -> Self {
        self.0.tolerance = tolerance;
        self
    }

    /// Change the value of `max_n_iterations`
    pub fn max_n_iterations(mut self, max_n_iterations: u64) -> Self {
        self.0.max_n_iterations = max_n_iterations;
        self
    }

    /// Change the value of `init`
    pub fn init_method(mut self, init: KMeansInit<F>) -> Self {
        self.0.init = init;
        self
    }
}

impl<F: Float, R: Rng> ParamGuard for KMeansParams<F, R> {
    type Checked = KMeansValidParams<F, R>;
    type Error = KMeansParamsError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        if self.0.n_clusters == 0 {
            Err(KMeansParamsError::NClusters)
        } else if self.0.tolerance < F::zero() {
            Err(KMeansParamsError::Tolerance)
        } else if self.0.max_n_iterations == 0 {
            Err(KMeansParamsError::MaxIterations)
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl<F: Float, R: Rng> KMeansValidParams<F, R> {
    /// An iteration is considered the last one if every centroid moved
    /// strictly less than `tolerance` during the update step.
    pub fn tolerance(&self) -> F {
        self.tolerance
    }

    /// We exit the training loop when the number of training iterations
    /// exceeds `max_n_iterations` even if the `tolerance` convergence
    /// condition has not been met.
    pub fn max_n_iterations(&self) -> u64 {
        self.max_n_iterations
    }

    /// The number of clusters we will be looking for in the training dataset.
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Centroid initialization strategy
    pub fn init_method(&self) -> &KMeansInit<F> {
        &self.init
    }

    /// Returns the random generator
    pub fn rng(&self) -> &R {
        &self.rng
    }
}

#[cfg(test)]
mod tests {
    use crate::{KMeans, KMeansParams, KMeansParamsError, KMeansValidParams, ParamGuard};
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    fn autotraits() {
        fn has_autotraits<T: Send + Sync + Sized + Unpin>() {}
        has_autotraits::<KMeansParams<f64, Xoshiro256Plus>>();
        has_autotraits::<KMeansValidParams<f64, Xoshiro256Plus>>();
    }

    #[test]
    fn n_clusters_cannot_be_zero() {
        let res = KMeans::<f32>::params(0).check();
        assert!(matches!(res, Err(KMeansParamsError::NClusters)))
    }

    #[test]
    fn tolerance_cannot_be_negative() {
        let res = KMeans::<f64>::params(1).tolerance(-1.).check();
        assert!(matches!(res, Err(KMeansParamsError::Tolerance)))
    }

    #[test]
    fn zero_tolerance_is_accepted() {
        // epsilon = 0 is legal: the engine simply runs to the iteration bound
        assert!(KMeans::<f64>::params(1).tolerance(0.).check().is_ok())
    }

    #[test]
    fn max_n_iterations_cannot_be_zero() {
        let res = KMeans::<f64>::params(1).max_n_iterations(0).check();
        assert!(matches!(res, Err(KMeansParamsError::MaxIterations)))
    }
}

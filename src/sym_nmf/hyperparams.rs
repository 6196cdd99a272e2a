use ndarray_rand::rand::Rng;

use super::errors::SymNmfParamsError;
use crate::param_guard::ParamGuard;
use crate::Float;

/// The set of hyperparameters that can be specified for the execution of
/// the [SymNMF algorithm](crate::SymNmf).
#[derive(Clone, Debug, PartialEq)]
pub struct SymNmfValidParams<F: Float, R: Rng> {
    /// The rank of the factorization, i.e. the number of clusters encoded
    /// by the columns of the factor matrix.
    n_clusters: usize,
    /// The optimization is considered complete when the squared Frobenius
    /// norm of the difference between consecutive factor matrices falls
    /// strictly below `tolerance`.
    tolerance: F,
    /// We exit the optimization loop when the number of multiplicative
    /// updates exceeds `max_n_iterations` even if the `tolerance`
    /// convergence condition has not been met.
    max_n_iterations: u64,
    /// Small positive constant added to the update denominator, guarding
    /// the multiplicative rule against division by zero.
    regularization: F,
    /// The random number generator used to draw the initial factors
    rng: R,
}

/// An helper struct used to construct a set of [valid hyperparameters](SymNmfValidParams)
/// for the [SymNMF algorithm](crate::SymNmf) (using the builder pattern).
#[derive(Clone, Debug, PartialEq)]
pub struct SymNmfParams<F: Float, R: Rng>(SymNmfValidParams<F, R>);

impl<F: Float, R: Rng> SymNmfParams<F, R> {
    /// `new` lets us configure our training algorithm parameters:
    /// * the factorization has rank `n_clusters`;
    /// * the optimization is considered complete when the squared
    ///   Frobenius norm of the update difference falls strictly below
    ///   `tolerance`;
    /// * we exit the optimization loop when the number of updates exceeds
    ///   `max_n_iterations` even if the `tolerance` convergence condition
    ///   has not been met.
    ///
    /// Defaults are provided if optional parameters are not specified:
    /// * `tolerance = 1e-4`
    /// * `max_n_iterations = 300`
    /// * `regularization = 1e-12`
    pub fn new(n_clusters: usize, rng: R) -> Self {
        Self(SymNmfValidParams {
            n_clusters,
            tolerance: F::cast(1e-4),
            max_n_iterations: 300,
            regularization: F::cast(1e-12),
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

    /// Change the value of `regularization`
    pub fn regularization(mut self, regularization: F) -> Self {
        self.0.regularization = regularization;
        self
    }
}

impl<F: Float, R: Rng> ParamGuard for SymNmfParams<F, R> {
    type Checked = SymNmfValidParams<F, R>;
    type Error = SymNmfParamsError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        if self.0.n_clusters == 0 {
            Err(SymNmfParamsError::NClusters)
        } else if self.0.tolerance < F::zero() {
            Err(SymNmfParamsError::Tolerance)
        } else if self.0.max_n_iterations == 0 {
            Err(SymNmfParamsError::MaxIterations)
        } else if self.0.regularization <= F::zero() {
            Err(SymNmfParamsError::Regularization)
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl<F: Float, R: Rng> SymNmfValidParams<F, R> {
    /// The rank of the factorization
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// The optimization is considered complete when the squared Frobenius
    /// norm of the update difference falls strictly below `tolerance`.
    pub fn tolerance(&self) -> F {
        self.tolerance
    }

    /// We exit the optimization loop when the number of updates exceeds
    /// `max_n_iterations` even if the `tolerance` convergence condition
    /// has not been met.
    pub fn max_n_iterations(&self) -> u64 {
        self.max_n_iterations
    }

    /// Division guard added to the update denominator
    pub fn regularization(&self) -> F {
        self.regularization
    }

    /// Returns the random generator
    pub fn rng(&self) -> &R {
        &self.rng
    }
}

#[cfg(test)]
mod tests {
    use crate::{ParamGuard, SymNmf, SymNmfParams, SymNmfParamsError, SymNmfValidParams};
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    fn autotraits() {
        fn has_autotraits<T: Send + Sync + Sized + Unpin>() {}
        has_autotraits::<SymNmfParams<f64, Xoshiro256Plus>>();
        has_autotraits::<SymNmfValidParams<f64, Xoshiro256Plus>>();
    }

    #[test]
    fn n_clusters_cannot_be_zero() {
        let res = SymNmf::<f64>::params(0).check();
        assert!(matches!(res, Err(SymNmfParamsError::NClusters)))
    }

    #[test]
    fn tolerance_cannot_be_negative() {
        let res = SymNmf::<f64>::params(2).tolerance(-1e-4).check();
        assert!(matches!(res, Err(SymNmfParamsError::Tolerance)))
    }

    #[test]
    fn max_n_iterations_cannot_be_zero() {
        let res = SymNmf::<f64>::params(2).max_n_iterations(0).check();
        assert!(matches!(res, Err(SymNmfParamsError::MaxIterations)))
    }

    #[test]
    fn regularization_cannot_be_zero() {
        let res = SymNmf::<f64>::params(2).regularization(0.).check();
        assert!(matches!(res, Err(SymNmfParamsError::Regularization)))
    }
}

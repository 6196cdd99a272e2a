use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2};
use ndarray_rand::rand::Rng;
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand_xoshiro::Xoshiro256Plus;

use crate::param_guard::ParamGuard;
use crate::similarity::{normalize, similarity};
use crate::sym_nmf::{SymNmfError, SymNmfParams, SymNmfValidParams};
use crate::traits::Fit;
use crate::Float;

/// Step damping of the multiplicative update. The undamped rule is not
/// monotone for the symmetric factorization (consecutive iterates can
/// oscillate around a fixed point); halving the step keeps the objective
/// non-increasing while preserving the fixed points.
const DAMPING: f64 = 0.5;

/// Symmetric Nonnegative Matrix Factorization (SymNMF) clusters a point
/// set by factorizing its normalized affinity matrix.
///
/// The pipeline runs in four stages:
/// 1. the Gaussian [similarity matrix](crate::similarity::similarity) `W`
///    of the observations is computed;
/// 2. `W` is [normalized](crate::similarity::normalize) into
///    `A = D^(-1/2) · W · D^(-1/2)` with `D` the diagonal degree matrix;
/// 3. a nonnegative factor matrix `H` of shape `(n_observations,
///    n_clusters)` is initialized with entries drawn uniformly from
///    `[0, 2·sqrt(mean(A) / n_clusters))`, keeping the initial magnitude
///    of `H·Hᵀ` consistent with the scale of `A`;
/// 4. `H` is refined by damped multiplicative updates
///    `H ← H ∘ ((1 − β) + β · (A·H) / (H·(Hᵀ·H) + δ))`, with `β = 1/2`
///    and `δ` a small division guard (the `regularization` parameter),
///    until the squared Frobenius norm of the difference between
///    consecutive iterates falls strictly below `tolerance` or
///    `max_n_iterations` is reached.
///
/// Every entry of `H` stays nonnegative by construction: the update
/// multiplies nonnegative values by ratios of nonnegative terms. The rows
/// of the final `H` encode soft cluster memberships; [`argmax_rows`]
/// hardens them into one label per observation.
///
/// Reaching the iteration bound is a normal termination path, reported
/// through [`SymNmf::converged`].
///
/// ## Example
///
/// ```
/// use ndarray::array;
/// use symclust::SymNmf;
/// use symclust::traits::Fit;
///
/// let observations = array![[0.0, 0.0], [0.3, 0.0], [10.0, 0.0], [10.3, 0.0]];
///
/// let model = SymNmf::params(2).fit(&observations).expect("SymNMF fitted");
///
/// let factors = model.factors();
/// assert_eq!(factors.dim(), (4, 2));
/// assert!(factors.iter().all(|&entry| entry >= 0.0));
///
/// let labels = model.labels();
/// assert!(labels.iter().all(|&label| label < 2));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SymNmf<F: Float> {
    factors: Array2<F>,
    update_norm: F,
    n_iterations: u64,
    converged: bool,
}

impl<F: Float> SymNmf<F> {
    /// Configure the factorization with a default, seeded random number
    /// generator for the initial factors.
    pub fn params(n_clusters: usize) -> SymNmfParams<F, Xoshiro256Plus> {
        SymNmfParams::new(n_clusters, Xoshiro256Plus::seed_from_u64(42))
    }

    /// Configure the factorization with the given random number generator,
    /// so the initial factors (and therefore the whole run) are
    /// reproducible.
    pub fn params_with_rng<R: Rng>(n_clusters: usize, rng: R) -> SymNmfParams<F, R> {
        SymNmfParams::new(n_clusters, rng)
    }

    /// Return the factor matrix `H` with shape `(n_observations, n_clusters)`
    pub fn factors(&self) -> &Array2<F> {
        &self.factors
    }

    /// Return one hard cluster label per observation, the column of the
    /// maximum entry in each factor row
    pub fn labels(&self) -> Array1<usize> {
        argmax_rows(&self.factors)
    }

    /// Squared Frobenius norm of the last update difference
    pub fn update_norm(&self) -> F {
        self.update_norm
    }

    /// Number of multiplicative updates actually executed
    pub fn n_iterations(&self) -> u64 {
        self.n_iterations
    }

    /// Whether the update difference fell below `tolerance` before the
    /// iteration bound. `false` is not an error: the model still carries
    /// the best-effort factors.
    pub fn converged(&self) -> bool {
        self.converged
    }
}

impl<F: Float, R: Rng + Clone, D: Data<Elem = F>> Fit<ArrayBase<D, Ix2>, SymNmfError>
    for SymNmfValidParams<F, R>
{
    type Object = SymNmf<F>;

    /// Given an input matrix `records`, with shape `(n_observations,
    /// n_features)`, `fit` composes the full pipeline: similarity,
    /// normalization, factor initialization and multiplicative updates.
    fn fit(&self, records: &ArrayBase<D, Ix2>) -> Result<Self::Object, SymNmfError> {
        let n_samples = records.nrows();
        if self.n_clusters() > n_samples {
            return Err(SymNmfError::TooManyClusters {
                n_clusters: self.n_clusters(),
                n_samples,
            });
        }

        let affinity = normalize(&similarity(records))?;
        let initial = self.initial_factors(&affinity);
        self.fit_normalized(&affinity, initial)
    }
}

impl<F: Float, R: Rng + Clone, D: Data<Elem = F>> Fit<ArrayBase<D, Ix2>, SymNmfError>
    for SymNmfParams<F, R>
{
    type Object = SymNmf<F>;

    /// Performs the checking step and calls `fit` on the checked
    /// hyperparameters, so the builder can be fitted directly.
    fn fit(&self, records: &ArrayBase<D, Ix2>) -> Result<Self::Object, SymNmfError> {
        let checked = self.check_ref()?;
        checked.fit(records)
    }
}

impl<F: Float, R: Rng + Clone> SymNmfValidParams<F, R> {
    /// Draw the initial factors, uniformly from `[0, 2·sqrt(m/k))` where
    /// `m` is the mean of all affinity entries and `k` the number of
    /// clusters.
    fn initial_factors<D: Data<Elem = F>>(&self, affinity: &ArrayBase<D, Ix2>) -> Array2<F> {
        let n_samples = affinity.nrows();
        let mean = affinity.mean().unwrap_or_else(F::zero);
        let upper = F::cast(2.) * (mean / F::cast(self.n_clusters())).sqrt();
        let mut rng = self.rng().clone();
        Array2::random_using(
            (n_samples, self.n_clusters()),
            Uniform::new(F::zero(), upper),
            &mut rng,
        )
    }

    /// Run the multiplicative updates on an already-normalized affinity
    /// matrix, starting from the given factors.
    ///
    /// This is the entry point for callers that construct `A` and the
    /// initial `H` themselves (e.g. to reproduce an exact run); shapes are
    /// validated, the values are trusted.
    pub fn fit_normalized<D: Data<Elem = F>>(
        &self,
        affinity: &ArrayBase<D, Ix2>,
        initial: Array2<F>,
    ) -> Result<SymNmf<F>, SymNmfError> {
        let (rows, cols) = affinity.dim();
        if rows != cols {
            return Err(SymNmfError::NotSquare { rows, cols });
        }
        if initial.dim() != (rows, self.n_clusters()) {
            return Err(SymNmfError::InvalidInitShape(
                initial.nrows(),
                initial.ncols(),
                rows,
                self.n_clusters(),
            ));
        }

        let damping = F::cast(DAMPING);
        let mut factors = initial;
        let mut update_norm = F::infinity();
        let mut converged = false;
        let mut n_iterations = 0;
        for _ in 0..self.max_n_iterations() {
            n_iterations += 1;
            let numerator = affinity.dot(&factors);
            // H·(HᵀH) instead of (H·Hᵀ)·H: same product, O(N·k²) instead of O(N²·k)
            let gram = factors.t().dot(&factors);
            let denominator = factors.dot(&gram) + self.regularization();
            let step = (numerator / denominator)
                .mapv(|ratio| F::one() - damping + damping * ratio);
            let updated = &factors * &step;
            update_norm = (&updated - &factors).mapv(|diff| diff * diff).sum();
            factors = updated;
            if update_norm < self.tolerance() {
                converged = true;
                break;
            }
        }

        Ok(SymNmf {
            factors,
            update_norm,
            n_iterations,
            converged,
        })
    }
}

/// Hard label per row of a factor matrix: the column index of the row
/// maximum, with ties broken to the lowest column index.
///
/// Exposed separately from [`SymNmf::labels`] so callers can score any
/// nonnegative membership matrix with the same extraction rule.
///
/// Panics if `factors` has zero columns.
pub fn argmax_rows<F: Float, D: Data<Elem = F>>(factors: &ArrayBase<D, Ix2>) -> Array1<usize> {
    factors.map_axis(Axis(1), |row| {
        let mut best_index = 0;
        let mut best_value = row[0];
        for (index, &value) in row.iter().enumerate() {
            if value > best_value {
                best_index = index;
                best_value = value;
            }
        }
        best_index
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate_blobs;
    use crate::similarity::SimilarityError;
    use crate::ParamGuard;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn factors_stay_nonnegative() {
        let mut rng = Xoshiro256Plus::seed_from_u64(42);
        let centers = array![[0., 0.], [8., 8.], [-8., 8.]];
        let observations = generate_blobs(15, &centers, &mut rng);

        let model = SymNmf::params(3)
            .max_n_iterations(200)
            .fit(&observations)
            .expect("SymNMF fitted");

        assert_eq!(model.factors().dim(), (45, 3));
        assert!(model.factors().iter().all(|&entry| entry >= 0.0));
    }

    #[test]
    fn update_norm_is_non_increasing() {
        let mut rng = Xoshiro256Plus::seed_from_u64(42);
        let centers = array![[0., 0.], [10., 10.]];
        let observations = generate_blobs(10, &centers, &mut rng);
        let affinity = crate::similarity::normalized(&observations).unwrap();

        let params = SymNmf::params_with_rng(2, rng).check_unwrap();
        let initial = params.initial_factors(&affinity);

        // a zero tolerance makes every run execute exactly its bound, so
        // the final update norm is the per-iteration difference
        let norms: Vec<f64> = (1..=8u64)
            .map(|bound| {
                SymNmf::params(2)
                    .tolerance(0.)
                    .max_n_iterations(bound)
                    .check_unwrap()
                    .fit_normalized(&affinity, initial.clone())
                    .expect("SymNMF fitted")
                    .update_norm()
            })
            .collect();

        for pair in norms.windows(2) {
            assert!(
                pair[1] <= pair[0] * (1.0 + 1e-9) + 1e-12,
                "update norm increased: {} -> {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn well_separated_pairs_recover_the_pairing() {
        let observations = array![[0.0, 0.0], [0.3, 0.0], [10.0, 0.0], [10.3, 0.0]];
        let model = SymNmf::params(2).fit(&observations).expect("SymNMF fitted");
        let labels = model.labels();

        assert!(model.converged());
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[2], labels[3]);
        assert_ne!(labels[0], labels[2]);
    }

    #[test]
    fn reruns_with_the_same_rng_are_reproducible() {
        let observations = array![[0.0, 0.0], [0.5, 0.0], [7.0, 1.0], [7.5, 1.0], [7.2, 0.4]];
        let rng = Xoshiro256Plus::seed_from_u64(7);

        let first = SymNmf::params_with_rng(2, rng.clone())
            .fit(&observations)
            .expect("SymNMF fitted");
        let second = SymNmf::params_with_rng(2, rng)
            .fit(&observations)
            .expect("SymNMF fitted");

        assert_eq!(first.factors(), second.factors());
        assert_eq!(first.n_iterations(), second.n_iterations());
    }

    #[test]
    fn more_clusters_than_points_is_rejected() {
        let observations = array![[0., 0.], [1., 1.]];
        let res = SymNmf::<f64>::params(3).fit(&observations);
        assert!(matches!(
            res,
            Err(SymNmfError::TooManyClusters {
                n_clusters: 3,
                n_samples: 2
            })
        ));
    }

    #[test]
    fn an_isolated_point_set_cannot_be_factorized() {
        // a single point has zero similarity to everything
        let observations = array![[1., 2.]];
        let res = SymNmf::<f64>::params(1).fit(&observations);
        assert!(matches!(
            res,
            Err(SymNmfError::Similarity(SimilarityError::ZeroDegree(0)))
        ));
    }

    #[test]
    fn caller_provided_affinity_must_be_square() {
        let affinity = array![[0., 1., 0.5], [1., 0., 0.5]];
        let initial = array![[0.1], [0.1]];
        let res = SymNmf::params(1)
            .check_unwrap()
            .fit_normalized(&affinity, initial);
        assert!(matches!(res, Err(SymNmfError::NotSquare { rows: 2, cols: 3 })));
    }

    #[test]
    fn caller_provided_initial_factors_must_match_shape() {
        let affinity = array![[0., 1.], [1., 0.]];
        let initial = array![[0.1, 0.2, 0.3], [0.1, 0.2, 0.3]];
        let res = SymNmf::params(2)
            .check_unwrap()
            .fit_normalized(&affinity, initial);
        assert!(matches!(res, Err(SymNmfError::InvalidInitShape(2, 3, 2, 2))));
    }

    #[test]
    fn argmax_rows_breaks_ties_to_the_lowest_column() {
        let factors = array![[0.5, 0.5], [0.2, 0.7], [0.9, 0.1]];
        assert_eq!(argmax_rows(&factors), array![0, 1, 0]);
    }

    #[test]
    fn converged_factors_are_a_fixed_point() {
        let affinity = array![[0., 1.], [1., 0.]];
        let initial = array![[0.6, 0.4], [0.4, 0.6]];
        let params = SymNmf::params(2)
            .max_n_iterations(2000)
            .tolerance(1e-8)
            .check_unwrap();
        let model = params
            .fit_normalized(&affinity, initial)
            .expect("SymNMF fitted");
        assert!(model.converged());

        // restarting from the converged factors stops after one update
        let restarted = params
            .fit_normalized(&affinity, model.factors().clone())
            .expect("SymNMF fitted");
        assert!(restarted.converged());
        assert_eq!(restarted.n_iterations(), 1);
        assert_abs_diff_eq!(restarted.factors(), model.factors(), epsilon = 1e-4);
    }
}

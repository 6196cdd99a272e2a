use ndarray::{Array1, Array2, ArrayBase, Axis, Data, DataMut, Ix1, Ix2, Zip};
use ndarray_rand::rand::Rng;
use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

use crate::distance::{Distance, L2Dist};
use crate::k_means::{KMeansError, KMeansInit, KMeansParams, KMeansValidParams};
use crate::param_guard::ParamGuard;
use crate::traits::{Fit, PredictInplace};
use crate::Float;

/// K-means clustering aims to partition a set of unlabeled observations
/// into clusters, where each observation belongs to the cluster with the
/// nearest mean.
///
/// The mean of the points within a cluster is called *centroid*.
///
/// Given the set of centroids, you can assign an observation to a cluster
/// choosing the nearest centroid.
///
/// This is the _standard algorithm_ (also known as Lloyd's algorithm): it
/// progressively refines the choice of centroids. There are three steps,
/// repeated in a loop:
/// - assignment step: assign each observation to the nearest cluster
///   (minimum distance between the observation and the cluster's centroid;
///   ties break to the lowest centroid index);
/// - update step: recompute the centroid of each cluster as the
///   coordinate-wise mean of its assigned observations. A cluster that
///   received no observations keeps its previous centroid;
/// - convergence check: training is complete once every centroid moved
///   strictly less than `tolerance` during the update step, or when
///   `max_n_iterations` is reached. Running into the iteration bound is a
///   normal termination path, reported through [`KMeans::converged`].
///
/// The initial centroids are, by default, the first `n_clusters`
/// observations in input order, so a run is fully deterministic; see
/// [`KMeansInit`] for the alternatives.
///
/// The fitted model keeps the labels computed by the assignment step of
/// the final executed iteration, available through [`KMeans::labels`].
///
/// ## Parallelisation
///
/// The work performed by the assignment step does not require any
/// coordination: the closest centroid for each point can be computed
/// independently from the closest centroid for any of the remaining
/// points, so the assignment step is parallelised per observation thanks
/// to the `rayon` feature in `ndarray`. Iterations remain strictly
/// sequential.
///
/// ## Example
///
/// ```
/// use ndarray::array;
/// use symclust::KMeans;
/// use symclust::traits::{Fit, Predict};
///
/// // two tight pairs on the x axis
/// let observations = array![[0.0, 0.0], [10.0, 0.0], [0.2, 0.0], [10.2, 0.0]];
///
/// let model = KMeans::params(2)
///     .tolerance(1e-3)
///     .fit(&observations)
///     .expect("KMeans fitted");
///
/// let labels = model.labels();
/// assert_eq!(labels[0], labels[2]);
/// assert_eq!(labels[1], labels[3]);
///
/// // new observations are assigned to the nearest centroid
/// let assigned = model.predict(&array![[9.8, 0.3]]);
/// assert_eq!(assigned[0], labels[1]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct KMeans<F: Float> {
    centroids: Array2<F>,
    labels: Array1<usize>,
    cluster_count: Array1<usize>,
    inertia: F,
    n_iterations: u64,
    converged: bool,
}

impl<F: Float> KMeans<F> {
    /// Configure the training with a default, seeded random number
    /// generator. Randomness is only consumed by [`KMeansInit::Random`].
    pub fn params(n_clusters: usize) -> KMeansParams<F, Xoshiro256Plus> {
        KMeansParams::new(n_clusters, Xoshiro256Plus::seed_from_u64(42))
    }

    /// Configure the training with the given random number generator
    pub fn params_with_rng<R: Rng>(n_clusters: usize, rng: R) -> KMeansParams<F, R> {
        KMeansParams::new(n_clusters, rng)
    }

    /// Return the set of centroids as a 2-dimensional matrix with shape
    /// `(n_centroids, n_features)`.
    pub fn centroids(&self) -> &Array2<F> {
        &self.centroids
    }

    /// Return the cluster index assigned to each training observation by
    /// the assignment step of the final executed iteration.
    pub fn labels(&self) -> &Array1<usize> {
        &self.labels
    }

    /// Return the number of training points belonging to each cluster
    pub fn cluster_count(&self) -> &Array1<usize> {
        &self.cluster_count
    }

    /// Return the sum of squared distances between each training point and
    /// its closest centroid
    pub fn inertia(&self) -> F {
        self.inertia
    }

    /// Number of iterations actually executed
    pub fn n_iterations(&self) -> u64 {
        self.n_iterations
    }

    /// Whether the centroids settled below `tolerance` before the
    /// iteration bound. `false` is not an error: the model still carries
    /// the best-effort result.
    pub fn converged(&self) -> bool {
        self.converged
    }
}

impl<F: Float, R: Rng + Clone, D: Data<Elem = F>> Fit<ArrayBase<D, Ix2>, KMeansError>
    for KMeansValidParams<F, R>
{
    type Object = KMeans<F>;

    /// Given an input matrix `records`, with shape `(n_observations,
    /// n_features)`, `fit` identifies `n_clusters` centroids based on the
    /// training data distribution and labels every observation.
    fn fit(&self, records: &ArrayBase<D, Ix2>) -> Result<Self::Object, KMeansError> {
        let observations = records.view();
        let (n_samples, n_features) = observations.dim();
        let n_clusters = self.n_clusters();
        if n_clusters > n_samples {
            return Err(KMeansError::TooManyClusters {
                n_clusters,
                n_samples,
            });
        }
        if let KMeansInit::Precomputed(centroids) = self.init_method() {
            if centroids.dim() != (n_clusters, n_features) {
                return Err(KMeansError::InvalidInitShape(
                    centroids.nrows(),
                    centroids.ncols(),
                    n_clusters,
                    n_features,
                ));
            }
        }

        let mut rng = self.rng().clone();
        let mut centroids = self.init_method().run(n_clusters, &observations, &mut rng);
        let mut memberships = Array1::zeros(n_samples);
        let mut dists = Array1::zeros(n_samples);

        let mut converged = false;
        let mut n_iterations = 0;
        for _ in 0..self.max_n_iterations() {
            n_iterations += 1;
            update_memberships_and_dists(&centroids, &observations, &mut memberships, &mut dists);
            let new_centroids = compute_centroids(&centroids, &observations, &memberships);
            let settled = centroids
                .rows()
                .into_iter()
                .zip(new_centroids.rows())
                .all(|(previous, updated)| L2Dist.distance(previous, updated) < self.tolerance());
            centroids = new_centroids;
            if settled {
                converged = true;
                break;
            }
        }

        let mut cluster_count = Array1::zeros(n_clusters);
        memberships.iter().for_each(|&cluster| cluster_count[cluster] += 1);

        Ok(KMeans {
            centroids,
            labels: memberships,
            cluster_count,
            inertia: dists.sum(),
            n_iterations,
            converged,
        })
    }
}

impl<F: Float, R: Rng + Clone, D: Data<Elem = F>> Fit<ArrayBase<D, Ix2>, KMeansError>
    for KMeansParams<F, R>
{
    type Object = KMeans<F>;

    /// Performs the checking step and calls `fit` on the checked
    /// hyperparameters, so the builder can be fitted directly.
    fn fit(&self, records: &ArrayBase<D, Ix2>) -> Result<Self::Object, KMeansError> {
        let checked = self.check_ref()?;
        checked.fit(records)
    }
}

impl<F: Float, D: Data<Elem = F>> PredictInplace<ArrayBase<D, Ix2>, Array1<usize>> for KMeans<F> {
    /// Given an input matrix `observations`, with shape `(n_observations,
    /// n_features)`, `predict` returns, for each observation, the index of
    /// the closest cluster/centroid.
    ///
    /// You can retrieve the centroid associated to an index using the
    /// [`centroids` method](KMeans::centroids).
    fn predict_inplace(&self, observations: &ArrayBase<D, Ix2>, memberships: &mut Array1<usize>) {
        assert_eq!(
            observations.nrows(),
            memberships.len(),
            "The number of data points must match the number of memberships."
        );

        update_cluster_memberships(&self.centroids, &observations.view(), memberships);
    }

    fn default_target(&self, observations: &ArrayBase<D, Ix2>) -> Array1<usize> {
        Array1::zeros(observations.nrows())
    }
}

impl<F: Float, D: Data<Elem = F>> PredictInplace<ArrayBase<D, Ix1>, usize> for KMeans<F> {
    /// Given one input observation, return the index of its closest
    /// cluster.
    fn predict_inplace(&self, observation: &ArrayBase<D, Ix1>, membership: &mut usize) {
        *membership = closest_centroid(&self.centroids, &observation.view()).0;
    }

    fn default_target(&self, _observation: &ArrayBase<D, Ix1>) -> usize {
        0
    }
}

/// `compute_centroids` returns a 2-dimensional array, where the i-th row
/// corresponds to the i-th cluster.
///
/// A cluster that received no observations keeps its previous centroid,
/// avoiding the division by zero a mean over an empty set would incur.
fn compute_centroids<F: Float>(
    old_centroids: &Array2<F>,
    // (n_observations, n_features)
    observations: &ArrayBase<impl Data<Elem = F>, Ix2>,
    // (n_observations,)
    cluster_memberships: &ArrayBase<impl Data<Elem = usize>, Ix1>,
) -> Array2<F> {
    let n_clusters = old_centroids.nrows();
    let mut counts: Array1<usize> = Array1::zeros(n_clusters);
    let mut centroids = Array2::zeros((n_clusters, observations.ncols()));

    Zip::from(observations.rows())
        .and(cluster_memberships)
        .for_each(|observation, &cluster_membership| {
            let mut centroid = centroids.row_mut(cluster_membership);
            centroid += &observation;
            counts[cluster_membership] += 1;
        });

    Zip::from(centroids.rows_mut())
        .and(old_centroids.rows())
        .and(&counts)
        .for_each(|mut centroid, old_centroid, &count| {
            if count == 0 {
                centroid.assign(&old_centroid);
            } else {
                centroid /= F::cast(count);
            }
        });
    centroids
}

// Update `cluster_memberships` with the index of the cluster each observation belongs to.
pub(crate) fn update_cluster_memberships<F: Float>(
    centroids: &ArrayBase<impl Data<Elem = F> + Sync, Ix2>,
    observations: &ArrayBase<impl Data<Elem = F> + Sync, Ix2>,
    cluster_memberships: &mut ArrayBase<impl DataMut<Elem = usize>, Ix1>,
) {
    Zip::from(observations.axis_iter(Axis(0)))
        .and(cluster_memberships)
        .par_for_each(|observation, cluster_membership| {
            *cluster_membership = closest_centroid(centroids, &observation).0
        });
}

// Efficient combination of the assignment step and the distance bookkeeping:
// updates `cluster_memberships` and, for each observation, the squared
// distance to its closest centroid.
pub(crate) fn update_memberships_and_dists<F: Float>(
    centroids: &ArrayBase<impl Data<Elem = F> + Sync, Ix2>,
    observations: &ArrayBase<impl Data<Elem = F> + Sync, Ix2>,
    cluster_memberships: &mut ArrayBase<impl DataMut<Elem = usize>, Ix1>,
    dists: &mut ArrayBase<impl DataMut<Elem = F>, Ix1>,
) {
    Zip::from(observations.axis_iter(Axis(0)))
        .and(cluster_memberships)
        .and(dists)
        .par_for_each(|observation, cluster_membership, dist| {
            let (membership, distance) = closest_centroid(centroids, &observation);
            *cluster_membership = membership;
            *dist = distance;
        });
}

/// Given a matrix of centroids with shape (n_centroids, n_features) and an
/// observation, return the index of the closest centroid (the index of the
/// corresponding row in `centroids`) together with its squared distance.
///
/// Ties break to the lowest centroid index: the scan replaces the running
/// minimum only on a strictly smaller distance.
pub(crate) fn closest_centroid<F: Float>(
    // (n_centroids, n_features)
    centroids: &ArrayBase<impl Data<Elem = F>, Ix2>,
    // (n_features)
    observation: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> (usize, F) {
    let first_centroid = centroids.row(0);
    let (mut closest_index, mut minimum_distance) = (
        0,
        L2Dist.rdistance(first_centroid.view(), observation.view()),
    );

    for (centroid_index, centroid) in centroids.rows().into_iter().enumerate() {
        let distance = L2Dist.rdistance(centroid.view(), observation.view());
        if distance < minimum_distance {
            closest_index = centroid_index;
            minimum_distance = distance;
        }
    }
    (closest_index, minimum_distance)
}

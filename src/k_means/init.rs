use ndarray::{s, Array2, ArrayView2, Axis};
use ndarray_rand::rand;
use ndarray_rand::rand::Rng;

use crate::Float;

/// Specifies centroid initialization for [`KMeans`](crate::KMeans).
#[derive(Clone, Debug, PartialEq)]
pub enum KMeansInit<F: Float> {
    /// Use the first `n_clusters` observations, in input order. Fully
    /// deterministic; this is the default.
    FirstK,
    /// Pick `n_clusters` distinct observations at random
    Random,
    /// Use the provided centroid matrix of shape `(n_clusters, n_features)`
    Precomputed(Array2<F>),
}

impl<F: Float> KMeansInit<F> {
    /// Runs the chosen initialization routine. `n_clusters <= n_samples`
    /// has already been validated by the caller.
    pub(crate) fn run(
        &self,
        n_clusters: usize,
        observations: &ArrayView2<F>,
        rng: &mut impl Rng,
    ) -> Array2<F> {
        match self {
            Self::FirstK => observations.slice(s![..n_clusters, ..]).to_owned(),
            Self::Random => random_init(n_clusters, observations, rng),
            Self::Precomputed(centroids) => centroids.clone(),
        }
    }
}

fn random_init<F: Float>(
    n_clusters: usize,
    observations: &ArrayView2<F>,
    rng: &mut impl Rng,
) -> Array2<F> {
    let (n_samples, _) = observations.dim();
    let indices = rand::seq::index::sample(rng, n_samples, n_clusters).into_vec();
    observations.select(Axis(0), &indices)
}

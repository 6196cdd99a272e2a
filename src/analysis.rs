//! Runs both clustering engines on the same point set and reports a
//! silhouette score per method.

use ndarray::{ArrayBase, Data, Ix2};

use crate::error::Result;
use crate::metrics::silhouette_score;
use crate::traits::Fit;
use crate::{Float, KMeans, SymNmf};

/// Silhouette score of each clustering method over one point set.
#[derive(Clone, Debug, PartialEq)]
pub struct SilhouetteComparison<F> {
    /// Score of the labels extracted from the SymNMF factors
    pub sym_nmf: F,
    /// Score of the K-means labels
    pub k_means: F,
}

/// Cluster `observations` into `n_clusters` with both engines, using the
/// same iteration bound and convergence threshold for each, and score the
/// two label vectors with the silhouette metric.
///
/// Both runs are deterministic: K-means seeds its centroids from the first
/// `n_clusters` observations and SymNMF draws its initial factors from the
/// default seeded generator.
pub fn compare<F: Float, D: Data<Elem = F>>(
    observations: &ArrayBase<D, Ix2>,
    n_clusters: usize,
    max_n_iterations: u64,
    tolerance: F,
) -> Result<SilhouetteComparison<F>> {
    let k_means = KMeans::params(n_clusters)
        .max_n_iterations(max_n_iterations)
        .tolerance(tolerance)
        .fit(observations)?;
    let k_means_score = silhouette_score(observations, k_means.labels())?;

    let sym_nmf = SymNmf::params(n_clusters)
        .max_n_iterations(max_n_iterations)
        .tolerance(tolerance)
        .fit(observations)?;
    let sym_nmf_score = silhouette_score(observations, &sym_nmf.labels())?;

    Ok(SilhouetteComparison {
        sym_nmf: sym_nmf_score,
        k_means: k_means_score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate_blobs;
    use ndarray::array;
    use ndarray_rand::rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    fn scores_stay_in_the_silhouette_range() {
        let mut rng = Xoshiro256Plus::seed_from_u64(42);
        let centers = array![[0., 0.], [12., 12.]];
        let observations = generate_blobs(20, &centers, &mut rng);

        let scores = compare(&observations, 2, 300, 1e-4).expect("comparison");
        assert!((-1.0..=1.0).contains(&scores.k_means));
        assert!((-1.0..=1.0).contains(&scores.sym_nmf));
        // the blobs are well separated, K-means recovers them cleanly
        assert!(scores.k_means > 0.5);
    }

    #[test]
    fn invalid_cluster_counts_surface_before_any_computation() {
        let observations = array![[0., 0.], [1., 1.]];
        assert!(compare(&observations, 0, 300, 1e-4).is_err());
        assert!(compare(&observations, 3, 300, 1e-4).is_err());
    }
}

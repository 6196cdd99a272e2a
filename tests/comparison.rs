use ndarray::array;
use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

use symclust::generate_blobs;
use symclust::prelude::*;

/// Round-trip sanity: on two well-separated Gaussian blobs, factorizing and
/// taking the row-wise argmax recovers the same two-group partition as
/// K-means, allowing for a swap of the label numbering.
#[test]
fn both_engines_recover_the_same_partition_on_two_blobs() {
    let mut rng = Xoshiro256Plus::seed_from_u64(42);
    let centers = array![[0., 0.], [20., 20.]];
    let observations = generate_blobs(25, &centers, &mut rng);

    let k_means = KMeans::params(2)
        .fit(&observations)
        .expect("KMeans fitted");
    assert!(k_means.converged());

    let sym_nmf = SymNmf::params(2).fit(&observations).expect("SymNMF fitted");
    let nmf_labels = argmax_rows(sym_nmf.factors());

    let identical = k_means
        .labels()
        .iter()
        .zip(nmf_labels.iter())
        .all(|(&km, &nmf)| km == nmf);
    let swapped = k_means
        .labels()
        .iter()
        .zip(nmf_labels.iter())
        .all(|(&km, &nmf)| km == 1 - nmf);
    assert!(identical || swapped);
}

#[test]
fn the_harness_reports_a_high_score_for_both_methods_on_clean_data() {
    let mut rng = Xoshiro256Plus::seed_from_u64(17);
    let centers = array![[-10., 0.], [10., 0.]];
    let observations = generate_blobs(20, &centers, &mut rng);

    let scores = compare(&observations, 2, 300, 1e-4).expect("comparison");
    assert!(scores.k_means > 0.5);
    assert!(scores.sym_nmf > 0.5);
}

//! Common metrics for clustering
use std::collections::HashMap;

use ndarray::{ArrayBase, ArrayView1, Data, Ix1, Ix2};

use crate::distance::{Distance, L2Dist};
use crate::error::{Error, Result};
use crate::Float;

struct DistanceCount<F> {
    total_distance: F,
    count: usize,
}

impl<F: Float> DistanceCount<F> {
    fn new(count: usize) -> DistanceCount<F> {
        DistanceCount {
            total_distance: F::zero(),
            count,
        }
    }

    /// Sets the total distance from the sample to this cluster back to zero
    fn reset(&mut self) {
        self.total_distance = F::zero();
    }

    /// Divides the total distance from the sample to this cluster by the
    /// number of samples in the cluster
    fn mean_distance(&self) -> F {
        self.total_distance / F::cast(self.count)
    }

    /// To be used in the cluster in which the sample is located. The
    /// distance from the sample to itself is zero so it does not get added
    /// to the total distance. We can then just divide the total distance
    /// by #samples in this cluster - 1
    fn same_label_mean_distance(&self) -> F {
        if self.count == 1 {
            return F::zero();
        }
        self.total_distance / F::cast(self.count - 1)
    }

    /// Adds the distance between `eval_sample` and `other_sample` to the
    /// total distance of `eval_sample` from the current cluster
    fn add_point(&mut self, eval_sample: ArrayView1<F>, other_sample: ArrayView1<F>) {
        self.total_distance += L2Dist.distance(eval_sample, other_sample);
    }
}

/// Evaluates the quality of a clustering using euclidean distance.
///
/// Given a clustered dataset, the silhouette score for each sample is
/// computed as the relative difference between the average distance of the
/// sample to other samples in the same cluster and the minimum average
/// distance of the sample to samples in another cluster. This value goes
/// from -1 to +1 when the point is respectively closer (in average) to
/// points in another cluster and to points in its own cluster.
///
/// Finally, the silhouette score for the clustering is evaluated as the
/// mean silhouette score of each sample. A clustering with a single label
/// scores 1.
pub fn silhouette_score<F: Float, DO: Data<Elem = F>, DL: Data<Elem = usize>>(
    observations: &ArrayBase<DO, Ix2>,
    labels: &ArrayBase<DL, Ix1>,
) -> Result<F> {
    let n_samples = observations.nrows();
    if labels.len() != n_samples {
        return Err(Error::LabelCount {
            observations: n_samples,
            labels: labels.len(),
        });
    }
    if n_samples == 0 {
        return Err(Error::NotEnoughSamples);
    }

    let mut label_count: HashMap<usize, usize> = HashMap::new();
    for label in labels.iter() {
        *label_count.entry(*label).or_insert(0) += 1;
    }
    let mut clusters: HashMap<usize, DistanceCount<F>> = label_count
        .into_iter()
        .map(|(label, count)| (label, DistanceCount::new(count)))
        .collect();

    // Single label dataset, all points are in the same cluster.
    if clusters.len() == 1 {
        return Ok(F::one());
    }

    // Compute and sum the silhouette score of each sample
    let score = observations
        .rows()
        .into_iter()
        .zip(labels.iter())
        .map(|(sample, &sample_label)| {
            // Loops through all samples in the dataset and adds the
            // distance between them and `sample` to the cluster in which
            // they belong
            for (other, other_label) in observations.rows().into_iter().zip(labels.iter()) {
                clusters.get_mut(other_label).unwrap().add_point(sample, other);
            }

            // average distance from `sample` to points in its cluster
            let mut a_x = F::zero();
            // minimum average distance from `sample` to another cluster;
            // set to none so that it can be initialized by the first value
            let mut b_x: Option<F> = None;

            for (label, cluster) in &mut clusters {
                if *label == sample_label {
                    // The cluster of `sample` averages by excluding `sample` from the counting
                    a_x = cluster.same_label_mean_distance();
                } else {
                    // Keep the minimum average distance
                    b_x = match b_x {
                        None => Some(cluster.mean_distance()),
                        Some(minimum) => {
                            if cluster.mean_distance() < minimum {
                                Some(cluster.mean_distance())
                            } else {
                                Some(minimum)
                            }
                        }
                    }
                }
                cluster.reset()
            }
            // Since the single label case was taken care of earlier, here
            // there are at least two clusters so `b_x` can't be `None`
            let b_x = b_x.unwrap();

            // s(x) = (b(x) - a(x)) / max{a(x), b(x)}
            if a_x >= b_x {
                (b_x - a_x) / a_x
            } else {
                (b_x - a_x) / b_x
            }
        })
        .sum::<F>();
    Ok(score / F::cast(n_samples))
}

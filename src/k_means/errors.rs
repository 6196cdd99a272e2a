use thiserror::Error;

/// An error when checking a K-means hyperparameter
#[derive(Error, Debug)]
pub enum KMeansParamsError {
    #[error("n_clusters cannot be 0")]
    NClusters,
    #[error("tolerance must not be negative")]
    Tolerance,
    #[error("max_n_iterations cannot be 0")]
    MaxIterations,
}

/// An error when fitting the K-means algorithm
#[derive(Error, Debug)]
pub enum KMeansError {
    /// When any of the hyperparameters is set to an invalid value
    #[error("Invalid hyperparameter: {0}")]
    InvalidParams(#[from] KMeansParamsError),
    /// When more clusters are requested than there are observations
    #[error("n_clusters ({n_clusters}) cannot exceed the number of observations ({n_samples})")]
    TooManyClusters {
        n_clusters: usize,
        n_samples: usize,
    },
    /// When precomputed centroids do not match the requested clustering
    #[error("precomputed centroids have shape ({0}, {1}) but ({2}, {3}) was expected")]
    InvalidInitShape(usize, usize, usize, usize),
}

use thiserror::Error;

use crate::similarity::SimilarityError;

/// An error when checking a SymNMF hyperparameter
#[derive(Error, Debug)]
pub enum SymNmfParamsError {
    #[error("n_clusters cannot be 0")]
    NClusters,
    #[error("tolerance must not be negative")]
    Tolerance,
    #[error("max_n_iterations cannot be 0")]
    MaxIterations,
    #[error("regularization must be greater than 0")]
    Regularization,
}

/// An error when fitting the SymNMF algorithm
#[derive(Error, Debug)]
pub enum SymNmfError {
    /// When any of the hyperparameters is set to an invalid value
    #[error("Invalid hyperparameter: {0}")]
    InvalidParams(#[from] SymNmfParamsError),
    /// When more clusters are requested than there are observations
    #[error("n_clusters ({n_clusters}) cannot exceed the number of observations ({n_samples})")]
    TooManyClusters {
        n_clusters: usize,
        n_samples: usize,
    },
    /// When the affinity matrix cannot be normalized
    #[error(transparent)]
    Similarity(#[from] SimilarityError),
    /// When a caller-provided affinity matrix is not square
    #[error("affinity matrix must be square, got {rows} x {cols}")]
    NotSquare { rows: usize, cols: usize },
    /// When caller-provided initial factors do not match the requested factorization
    #[error("initial factors have shape ({0}, {1}) but ({2}, {3}) was expected")]
    InvalidInitShape(usize, usize, usize, usize),
}

//! Error types in symclust
//!

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("expected one label per observation: {observations} observations, {labels} labels")]
    LabelCount { observations: usize, labels: usize },
    #[error("not enough samples")]
    NotEnoughSamples,
    #[error(transparent)]
    KMeans(#[from] crate::k_means::KMeansError),
    #[error(transparent)]
    SymNmf(#[from] crate::sym_nmf::SymNmfError),
    #[error(transparent)]
    Similarity(#[from] crate::similarity::SimilarityError),
}

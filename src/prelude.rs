//! symclust prelude.
//!
//! This module contains the most used types, traits and functions that you
//! can import easily as a group.

#[doc(no_inline)]
pub use crate::error::{Error, Result};

#[doc(no_inline)]
pub use crate::traits::{Fit, Predict, PredictInplace};

#[doc(no_inline)]
pub use crate::analysis::{compare, SilhouetteComparison};

#[doc(no_inline)]
pub use crate::metrics::silhouette_score;

#[doc(no_inline)]
pub use crate::similarity::{degree, normalized, similarity};

#[doc(no_inline)]
pub use crate::{argmax_rows, Float, KMeans, KMeansInit, ParamGuard, SymNmf};

//! `symclust` provides pure Rust implementations of two unsupervised
//! clustering methods over the same Euclidean point set, together with a
//! silhouette-based comparison of their results.
//!
//! ## Current state
//!
//! Right now `symclust` provides:
//! * [K-means](KMeans) — Lloyd's iterative centroid refinement with
//!   deterministic first-`k` seeding by default
//! * [Symmetric NMF](SymNmf) — Gaussian similarity construction, symmetric
//!   degree normalization and a multiplicative-update factorizer whose
//!   factor rows encode soft cluster memberships
//! * a [silhouette score](metrics::silhouette_score) and a small
//!   [comparison harness](analysis::compare) reporting one score per method
//!
//! Implementation choices and algorithmic details can be found in the
//! modules dedicated to the specific algorithms.

use std::fmt;
use std::iter::Sum;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

use ndarray::ScalarOperand;
use ndarray_rand::rand::distributions::uniform::SampleUniform;
use num_traits::{FromPrimitive, NumAssignOps, NumCast, Signed};

pub mod analysis;
pub mod distance;
pub mod error;
mod k_means;
pub mod metrics;
mod param_guard;
pub mod prelude;
pub mod similarity;
mod sym_nmf;
pub mod traits;
mod utils;

pub use k_means::*;
pub use param_guard::ParamGuard;
pub use sym_nmf::*;
pub use utils::{generate_blob, generate_blobs};

/// Floating point numbers usable by every algorithm in this crate.
///
/// This trait is implemented for `f32` and `f64`; all algorithms are generic
/// over it so callers pick the precision once, at the observation matrix.
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Signed
    + Sum
    + NumAssignOps
    + for<'a> AddAssign<&'a Self>
    + for<'a> MulAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> DivAssign<&'a Self>
    + SampleUniform
    + ScalarOperand
    + approx::AbsDiffEq
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}
impl Float for f64 {}

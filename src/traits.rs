//! Traits at the seams between hyperparameters, fitted models and data.

/// Fit a model from an observation matrix, consuming nothing.
pub trait Fit<R, E: std::error::Error> {
    type Object;

    fn fit(&self, records: &R) -> Result<Self::Object, E>;
}

/// Predict targets for an observation collection, writing into a
/// caller-provided buffer.
pub trait PredictInplace<R: ?Sized, T> {
    /// Predict targets for `records` and store them in `targets`.
    fn predict_inplace(&self, records: &R, targets: &mut T);

    /// Create a target buffer of the right shape for `records`.
    fn default_target(&self, records: &R) -> T;
}

/// Predict targets for an observation collection, allocating the result.
pub trait Predict<R, T> {
    fn predict(&self, records: R) -> T;
}

impl<R, T, O: PredictInplace<R, T>> Predict<&R, T> for O {
    fn predict(&self, records: &R) -> T {
        let mut targets = self.default_target(records);
        self.predict_inplace(records, &mut targets);
        targets
    }
}

use crate::error::{DataError, PredictError};
use crate::math::Array2;

/// Probability at or above which a sample is labeled positive.
pub const DECISION_THRESHOLD: f32 = 0.5;

/// Contract shared by the trainer and the predictor.
///
/// Labels use the dataset convention: 1 for a positive outcome, 0 otherwise.
pub trait ClassifierModel {
    /// Fit the model on scaled features.
    fn fit(&mut self, x: &Array2<f32>, y: &[i32]) -> Result<(), DataError>;

    /// Probability of the positive class for every row.
    fn predict_proba(&self, x: &Array2<f32>) -> Result<Vec<f32>, PredictError>;

    /// Hard 0/1 labels.
    fn predict(&self, x: &Array2<f32>) -> Result<Vec<i32>, PredictError> {
        Ok(self
            .predict_proba(x)?
            .into_iter()
            .map(|p| i32::from(p >= DECISION_THRESHOLD))
            .collect())
    }

    /// Feature count seen at fit time, `None` while unfitted.
    fn n_features(&self) -> Option<usize>;

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "classifier"
    }
}

//! Predictor port: Trait for the external cost model.
//!
//! This trait abstracts the trained model artifact from the application
//! logic. The model itself is a black box: one encoded row in, one cost out.

use crate::domain::EncodedProfile;

/// Errors that can occur while invoking a predictor.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictError {
    #[error("Feature schema mismatch: model expects {expected:?}, input provides {actual:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("Model produced a non-finite value: {0}")]
    NonFinite(f64),

    #[error("Model evaluation failed: {0}")]
    Evaluation(String),
}

/// A loaded regression model mapping an encoded profile to an annual cost.
///
/// Implementations are read-only after construction and may be shared
/// across threads.
pub trait Predictor: Send + Sync {
    /// Feature names in the order the model was trained on.
    fn feature_names(&self) -> &[String];

    /// Predict the annual insurance cost for one row.
    ///
    /// # Errors
    /// Returns `PredictError::SchemaMismatch` if the model was trained on a
    /// different feature set, or another variant if evaluation fails.
    fn predict(&self, row: &EncodedProfile) -> Result<f64, PredictError>;
}

//! Process-wide holder for the loaded model artifact.
//!
//! The artifact is loaded once at startup and is read-only afterwards. A
//! failed load is remembered so every later request reports the same,
//! distinguishable error instead of retrying.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::{ArtifactError, ArtifactPredictor};
use crate::ports::Predictor;
use crate::InsurecastError;

/// Single accessor for the loaded predictor.
pub struct ModelStore<P: Predictor> {
    state: Result<Arc<P>, ArtifactError>,
}

impl<P: Predictor> ModelStore<P> {
    /// Store holding an already constructed predictor.
    pub fn ready(predictor: P) -> Self {
        Self::shared(Arc::new(predictor))
    }

    /// Store sharing a predictor with other owners.
    pub fn shared(predictor: Arc<P>) -> Self {
        Self {
            state: Ok(predictor),
        }
    }

    /// Store remembering a failed load.
    pub fn failed(error: ArtifactError) -> Self {
        Self { state: Err(error) }
    }

    /// The loaded predictor.
    ///
    /// # Errors
    /// Returns `ArtifactUnavailable` or `ArtifactCorrupt` if loading failed.
    pub fn predictor(&self) -> Result<&P, InsurecastError> {
        match &self.state {
            Ok(p) => Ok(p.as_ref()),
            Err(e) => Err(e.clone().into()),
        }
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.state.is_ok()
    }

    #[must_use]
    pub fn load_error(&self) -> Option<&ArtifactError> {
        self.state.as_ref().err()
    }
}

impl ModelStore<ArtifactPredictor> {
    /// Load the JSON artifact at `path`. Never fails: a load error is kept
    /// and reported on each access.
    pub fn open(path: &Path) -> Self {
        match ArtifactPredictor::load(path) {
            Ok(predictor) => Self::ready(predictor),
            Err(e) => {
                tracing::error!("Model artifact unusable: {}", e);
                Self::failed(e)
            }
        }
    }
}

impl<P: Predictor> Clone for ModelStore<P> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

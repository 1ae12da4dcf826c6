//! # Insurecast
//!
//! Interactive medical insurance cost estimator.
//!
//! This crate provides:
//! - A six-attribute patient profile with strict range and category checks
//! - A predictor port with a JSON model artifact adapter
//! - Derived metrics, advice and declarative chart specifications
//! - Terminal UI for entering a profile and reading the estimate
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (profile, metrics, cost tiers, charts)
//! - `ports`: Trait definitions for external operations (the predictor)
//! - `adapters`: Concrete implementations (JSON artifact, log sanitizer)
//! - `application`: Use cases orchestrating domain and ports
//! - `config`: Environment-driven settings
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use application::{ModelStore, PredictionPresenter, PredictionReport};
pub use domain::{PatientProfile, Region, Sex, SmokerStatus};

/// Result type for Insurecast operations
pub type Result<T> = std::result::Result<T, InsurecastError>;

/// Main error type for Insurecast
#[derive(Debug, thiserror::Error)]
pub enum InsurecastError {
    #[error("Model not found: {path}. Make sure the exported model file is present.")]
    ArtifactUnavailable { path: String },

    #[error("Failed to load model: {0}")]
    ArtifactCorrupt(String),

    #[error("Prediction failed: {0}")]
    PredictionFailure(String),

    #[error("Unknown {field} category: {value:?}")]
    UnknownCategory { field: &'static str, value: String },

    #[error("Invalid patient data: {0}")]
    Validation(String),

    #[error("Chart error: {0}")]
    Chart(#[from] domain::ChartError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<domain::ProfileError> for InsurecastError {
    fn from(e: domain::ProfileError) -> Self {
        match e {
            domain::ProfileError::UnknownCategory { field, value } => {
                Self::UnknownCategory { field, value }
            }
            domain::ProfileError::OutOfRange(errors) => Self::Validation(errors.join(", ")),
        }
    }
}

impl From<adapters::ArtifactError> for InsurecastError {
    fn from(e: adapters::ArtifactError) -> Self {
        match e {
            adapters::ArtifactError::Unavailable(path) => Self::ArtifactUnavailable {
                path: path.display().to_string(),
            },
            adapters::ArtifactError::Corrupt(reason) => Self::ArtifactCorrupt(reason),
        }
    }
}

impl From<ports::PredictError> for InsurecastError {
    fn from(e: ports::PredictError) -> Self {
        Self::PredictionFailure(e.to_string())
    }
}

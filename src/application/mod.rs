//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with the predictor port to turn a
//! patient profile into a complete prediction report.

mod model_store;
mod presenter;

pub use model_store::ModelStore;
pub use presenter::{PredictionPresenter, PredictionReport};

//! Adapters layer: Concrete implementations of ports.
//!
//! - `artifact`: JSON model artifact loader and evaluator
//! - `sanitize`: patient-attribute filtering for logs

pub mod artifact;
pub mod sanitize;

pub use artifact::{ArtifactError, ArtifactPredictor, ModelInfo};

//! Domain layer: Core business types and logic.
//!
//! Pure Rust types with no I/O. Everything here is a total, side-effect-free
//! transformation from a patient profile and a predicted cost.

pub mod advice;
pub mod bands;
pub mod chart;
pub mod cost;
pub mod metrics;
pub mod profile;

pub use advice::{generate_advice, Advice};
pub use chart::{
    build_cost_comparison_chart, build_profile_radar, normalize_profile, ChartError, ChartSpec,
};
pub use cost::{classify_cost, format_dollars, CostCategory, CostClass};
pub use metrics::{derive_metrics, BmiCategory, DerivedMetrics, RiskFactor};
pub use profile::{
    EncodedProfile, PatientProfile, ProfileError, Region, Sex, SmokerStatus, FEATURE_NAMES,
};

//! Prediction presenter: Turns one profile into everything the page shows.
//!
//! Each call is a single-shot pipeline:
//! 1. Validate and encode the profile
//! 2. Call the predictor
//! 3. Derive metrics, advice and the cost tier
//! 4. Build both chart specifications

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::ModelStore;
use crate::domain::{
    build_cost_comparison_chart, build_profile_radar, classify_cost, derive_metrics,
    generate_advice, Advice, ChartSpec, CostClass, DerivedMetrics, EncodedProfile,
    PatientProfile,
};
use crate::ports::Predictor;
use crate::InsurecastError;

/// Everything rendered for one prediction.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionReport {
    pub profile: PatientProfile,
    pub encoded: EncodedProfile,
    /// Predicted annual cost in dollars
    pub cost: f64,
    pub metrics: DerivedMetrics,
    pub cost_class: CostClass,
    pub advice: Vec<Advice>,
    pub radar: ChartSpec,
    pub comparison: ChartSpec,
    pub generated_at: DateTime<Utc>,
}

/// Service producing prediction reports from a loaded model.
pub struct PredictionPresenter<P: Predictor> {
    store: ModelStore<P>,
}

impl<P: Predictor> PredictionPresenter<P> {
    pub fn new(store: ModelStore<P>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &ModelStore<P> {
        &self.store
    }

    /// Run the full prediction pipeline for one profile.
    ///
    /// # Errors
    /// - `Validation` if the profile is out of range
    /// - `ArtifactUnavailable` / `ArtifactCorrupt` if the model did not load;
    ///   the predictor is not invoked
    /// - `PredictionFailure` if the model rejects the row or returns a
    ///   non-finite value
    pub fn present(&self, profile: &PatientProfile) -> Result<PredictionReport, InsurecastError> {
        profile.validate()?;
        let encoded = profile.encode();

        let predictor = self.store.predictor()?;

        tracing::debug!("Invoking predictor...");
        let cost = predictor.predict(&encoded)?;
        if !cost.is_finite() {
            return Err(InsurecastError::PredictionFailure(format!(
                "model returned a non-finite value: {cost}"
            )));
        }
        if cost < 0.0 {
            tracing::warn!("Model returned a negative cost estimate");
        }

        let metrics = derive_metrics(profile, cost);
        let advice = generate_advice(profile, cost);
        let cost_class = classify_cost(cost);
        let radar = build_profile_radar(profile, &encoded);
        let comparison = build_cost_comparison_chart(cost)?;

        tracing::info!(
            "Prediction complete: tier={}, risk_factor={}, advice_items={}",
            cost_class.category,
            metrics.risk_factor,
            advice.len()
        );

        Ok(PredictionReport {
            profile: *profile,
            encoded,
            cost,
            metrics,
            cost_class,
            advice,
            radar,
            comparison,
            generated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{ArtifactError, ArtifactPredictor};
    use crate::domain::{BmiCategory, CostCategory, Region, RiskFactor, Sex, SmokerStatus};
    use crate::ports::PredictError;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed {
        cost: f64,
        calls: AtomicUsize,
    }

    impl Fixed {
        fn new(cost: f64) -> Self {
            Self {
                cost,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Predictor for Fixed {
        fn feature_names(&self) -> &[String] {
            &[]
        }

        fn predict(&self, _row: &EncodedProfile) -> Result<f64, PredictError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.cost)
        }
    }

    struct Failing;

    impl Predictor for Failing {
        fn feature_names(&self) -> &[String] {
            &[]
        }

        fn predict(&self, _row: &EncodedProfile) -> Result<f64, PredictError> {
            Err(PredictError::Evaluation("booster exploded".into()))
        }
    }

    fn smoker_profile() -> PatientProfile {
        PatientProfile::new(55, 31.0, 1, Sex::Male, SmokerStatus::Smoker, Region::Southeast)
            .expect("valid")
    }

    #[test]
    fn test_present_builds_full_report() {
        let presenter = PredictionPresenter::new(ModelStore::ready(Fixed::new(18_500.0)));
        let report = presenter.present(&smoker_profile()).expect("report");

        assert!((report.cost - 18_500.0).abs() < f64::EPSILON);
        assert_eq!(report.cost_class.category, CostCategory::High);
        assert_eq!(report.metrics.risk_factor, RiskFactor::High);
        assert_eq!(report.metrics.bmi_category, BmiCategory::Obese);
        assert!((report.metrics.monthly_cost - 18_500.0 / 12.0).abs() < 1e-9);
        assert_eq!(
            report.advice,
            vec![
                Advice::QuitSmoking,
                Advice::HealthyWeight,
                Advice::RegularCheckups
            ]
        );
        assert!(matches!(report.radar, ChartSpec::Radar(_)));
        assert!(matches!(report.comparison, ChartSpec::Bar(_)));
        assert_eq!(presenter.store().predictor().unwrap().calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_missing_artifact_skips_inference() {
        let store: ModelStore<Fixed> =
            ModelStore::failed(ArtifactError::Unavailable(PathBuf::from("models/none.json")));
        let presenter = PredictionPresenter::new(store);

        let err = presenter.present(&PatientProfile::default()).unwrap_err();
        assert!(matches!(err, InsurecastError::ArtifactUnavailable { .. }));
    }

    #[test]
    fn test_invalid_profile_skips_inference() {
        let presenter = PredictionPresenter::new(ModelStore::ready(Fixed::new(1.0)));
        let bad = PatientProfile {
            age: 95,
            ..PatientProfile::default()
        };

        assert!(matches!(
            presenter.present(&bad),
            Err(InsurecastError::Validation(_))
        ));
        assert_eq!(presenter.store().predictor().unwrap().calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_non_finite_prediction_is_failure() {
        let presenter = PredictionPresenter::new(ModelStore::ready(Fixed::new(f64::NAN)));
        let err = presenter.present(&PatientProfile::default()).unwrap_err();
        assert!(matches!(err, InsurecastError::PredictionFailure(_)));
    }

    #[test]
    fn test_predictor_error_surfaces_message() {
        let presenter = PredictionPresenter::new(ModelStore::ready(Failing));
        let err = presenter.present(&PatientProfile::default()).unwrap_err();
        assert!(err.to_string().contains("booster exploded"));
    }

    #[test]
    fn test_bundled_model_end_to_end() {
        let store = ModelStore::open(&Path::new(env!("CARGO_MANIFEST_DIR")).join("models"));
        let presenter = PredictionPresenter::new(store);

        let healthy = presenter.present(&PatientProfile::default()).expect("report");
        let risky = presenter.present(&smoker_profile()).expect("report");
        assert!(risky.cost > healthy.cost);

        let json = serde_json::to_value(&risky).expect("serializes");
        assert_eq!(json["radar"]["type"], "radar");
        assert_eq!(json["comparison"]["type"], "bar");
    }

    #[test]
    fn test_schema_mismatch_is_prediction_failure() {
        let json = r#"{
            "format_version": 1,
            "feature_names": ["age", "bmi", "children", "sex", "smoker", "region"],
            "model": {"kind": "linear", "intercept": 0.0, "coefficients": [1, 1, 1, 1, 1, 1]}
        }"#;
        let predictor = ArtifactPredictor::from_json(json).expect("structurally valid");
        let presenter = PredictionPresenter::new(ModelStore::ready(predictor));

        assert!(matches!(
            presenter.present(&PatientProfile::default()),
            Err(InsurecastError::PredictionFailure(_))
        ));
    }
}

//! Display metrics derived from a profile and its predicted cost.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::bands::{self, Band};
use super::profile::PatientProfile;

/// WHO adult BMI classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

const BMI_BANDS: [Band<BmiCategory>; 4] = [
    Band::new(f64::NEG_INFINITY, BmiCategory::Underweight),
    Band::new(18.5, BmiCategory::Normal),
    Band::new(25.0, BmiCategory::Overweight),
    Band::new(30.0, BmiCategory::Obese),
];

impl BmiCategory {
    /// Classify a BMI value. NaN lands in the top band.
    #[must_use]
    pub fn from_bmi(bmi: f64) -> Self {
        bands::lookup(&BMI_BANDS, bmi)
            .copied()
            .unwrap_or(Self::Obese)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Risk factor shown next to the cost; mirrors the smoker flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskFactor {
    Low,
    High,
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::High => write!(f, "High"),
        }
    }
}

/// Four summary tiles under the prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub monthly_cost: f64,
    pub daily_cost: f64,
    pub risk_factor: RiskFactor,
    pub bmi_category: BmiCategory,
}

/// Derive the display metrics for a prediction.
#[must_use]
pub fn derive_metrics(profile: &PatientProfile, cost: f64) -> DerivedMetrics {
    let risk_factor = if profile.smoker.is_smoker() {
        RiskFactor::High
    } else {
        RiskFactor::Low
    };

    DerivedMetrics {
        monthly_cost: cost / 12.0,
        daily_cost: cost / 365.0,
        risk_factor,
        bmi_category: BmiCategory::from_bmi(profile.bmi),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{Region, Sex, SmokerStatus};

    #[test]
    fn test_bmi_category_boundaries() {
        assert_eq!(BmiCategory::from_bmi(18.49), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(24.99), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(29.99), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
        assert_eq!(BmiCategory::from_bmi(15.0), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(50.0), BmiCategory::Obese);
    }

    #[test]
    fn test_monthly_and_daily_costs() {
        let profile = PatientProfile::default();
        for cost in [0.0, 1.0, 1121.8739, 13270.42, 63770.43] {
            let m = derive_metrics(&profile, cost);
            assert!((m.monthly_cost - cost / 12.0).abs() < 1e-9);
            assert!((m.daily_cost - cost / 365.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_risk_factor_follows_smoker_only() {
        let smoker = PatientProfile {
            smoker: SmokerStatus::Smoker,
            age: 20,
            bmi: 21.0,
            ..PatientProfile::default()
        };
        let non_smoker = PatientProfile {
            smoker: SmokerStatus::NonSmoker,
            age: 80,
            bmi: 45.0,
            ..PatientProfile::default()
        };

        assert_eq!(derive_metrics(&smoker, 5000.0).risk_factor, RiskFactor::High);
        assert_eq!(derive_metrics(&non_smoker, 5000.0).risk_factor, RiskFactor::Low);
    }

    #[test]
    fn test_total_over_valid_domain() {
        for age in [18u8, 35, 50, 80] {
            for bmi in [15.0, 18.5, 25.0, 30.0, 50.0] {
                for children in 0..=5u8 {
                    for sex in Sex::ALL {
                        for smoker in SmokerStatus::ALL {
                            for region in Region::ALL {
                                let p = PatientProfile::new(age, bmi, children, sex, smoker, region)
                                    .expect("valid");
                                let m = derive_metrics(&p, 12_000.0);
                                assert!(m.monthly_cost.is_finite());
                            }
                        }
                    }
                }
            }
        }
    }
}

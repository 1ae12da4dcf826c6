//! Personalized advice shown under the prediction.

use serde::{Deserialize, Serialize};

use super::profile::PatientProfile;

/// Age from which regular checkups are suggested.
const CHECKUP_AGE: u8 = 50;

/// One advisory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advice {
    QuitSmoking,
    HealthyWeight,
    BalancedDiet,
    RegularCheckups,
    LowRisk,
}

impl Advice {
    /// Short bold-worthy headline.
    #[must_use]
    pub fn headline(self) -> &'static str {
        match self {
            Self::QuitSmoking => "Quitting smoking",
            Self::HealthyWeight => "Maintaining a healthy weight",
            Self::BalancedDiet => "A balanced diet",
            Self::RegularCheckups => "Regular checkups",
            Self::LowRisk => "Congratulations!",
        }
    }

    /// Full advisory sentence.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::QuitSmoking => "Quitting smoking could considerably reduce your insurance costs",
            Self::HealthyWeight => "Maintaining a healthy weight can help reduce health risks",
            Self::BalancedDiet => "A balanced diet can help you stay in good health",
            Self::RegularCheckups => "Regular checkups are recommended for prevention",
            Self::LowRisk => "Congratulations! Your profile carries a relatively low risk",
        }
    }
}

/// Build the advice list for a profile.
///
/// Rules fire in a fixed order: smoking, then weight, then age. When none
/// fires the list holds a single [`Advice::LowRisk`] entry. The cost does not
/// influence the rules today.
#[must_use]
pub fn generate_advice(profile: &PatientProfile, _cost: f64) -> Vec<Advice> {
    let mut advice = Vec::with_capacity(3);

    if profile.smoker.is_smoker() {
        advice.push(Advice::QuitSmoking);
    }

    if profile.bmi >= 30.0 {
        advice.push(Advice::HealthyWeight);
    } else if profile.bmi >= 25.0 {
        advice.push(Advice::BalancedDiet);
    }

    if profile.age >= CHECKUP_AGE {
        advice.push(Advice::RegularCheckups);
    }

    if advice.is_empty() {
        advice.push(Advice::LowRisk);
    }

    advice
}

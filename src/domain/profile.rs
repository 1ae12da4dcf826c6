//! Patient profile types for insurance cost prediction.
//!
//! Six attributes from the public medical-insurance dataset: age, BMI,
//! number of covered children, sex, smoking status and US region.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Valid age range in years (inclusive).
pub const AGE_RANGE: (u8, u8) = (18, 80);

/// Valid BMI range (inclusive).
pub const BMI_RANGE: (f64, f64) = (15.0, 50.0);

/// Maximum number of covered children.
pub const MAX_CHILDREN: u8 = 5;

/// Feature names in the order the exported model was trained on.
pub const FEATURE_NAMES: [&str; 6] = [
    "age",
    "bmi",
    "children",
    "sex_encoded",
    "smoker_encoded",
    "region_encoded",
];

/// Errors raised while building or decoding a profile.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("Unknown {field} category: {value:?}")]
    UnknownCategory { field: &'static str, value: String },

    #[error("Invalid patient profile: {}", .0.join(", "))]
    OutOfRange(Vec<String>),
}

/// Biological sex as recorded in the training data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Female,
    Male,
}

/// Smoking status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SmokerStatus {
    NonSmoker,
    Smoker,
}

/// US region of residence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Northeast,
    Northwest,
    Southeast,
    Southwest,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Female, Sex::Male];

    /// Model encoding: Female = 0, Male = 1.
    #[must_use]
    pub fn encode(self) -> u8 {
        match self {
            Self::Female => 0,
            Self::Male => 1,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Male => "Male",
        }
    }
}

impl SmokerStatus {
    pub const ALL: [SmokerStatus; 2] = [SmokerStatus::NonSmoker, SmokerStatus::Smoker];

    /// Model encoding: NonSmoker = 0, Smoker = 1.
    #[must_use]
    pub fn encode(self) -> u8 {
        match self {
            Self::NonSmoker => 0,
            Self::Smoker => 1,
        }
    }

    #[must_use]
    pub fn is_smoker(self) -> bool {
        matches!(self, Self::Smoker)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NonSmoker => "Non-smoker",
            Self::Smoker => "Smoker",
        }
    }
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::Northeast,
        Region::Northwest,
        Region::Southeast,
        Region::Southwest,
    ];

    /// Model encoding: Northeast = 0 .. Southwest = 3.
    #[must_use]
    pub fn encode(self) -> u8 {
        match self {
            Self::Northeast => 0,
            Self::Northwest => 1,
            Self::Southeast => 2,
            Self::Southwest => 3,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Northeast => "Northeast",
            Self::Northwest => "Northwest",
            Self::Southeast => "Southeast",
            Self::Southwest => "Southwest",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for SmokerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn normalize_token(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Sex {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "female" | "f" => Ok(Self::Female),
            "male" | "m" => Ok(Self::Male),
            _ => Err(ProfileError::UnknownCategory {
                field: "sex",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for SmokerStatus {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "nonsmoker" | "no" => Ok(Self::NonSmoker),
            "smoker" | "yes" => Ok(Self::Smoker),
            _ => Err(ProfileError::UnknownCategory {
                field: "smoker",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for Region {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "northeast" => Ok(Self::Northeast),
            "northwest" => Ok(Self::Northwest),
            "southeast" => Ok(Self::Southeast),
            "southwest" => Ok(Self::Southwest),
            _ => Err(ProfileError::UnknownCategory {
                field: "region",
                value: s.to_string(),
            }),
        }
    }
}

/// Patient attributes entered through the form.
///
/// Constructed with [`PatientProfile::new`], which enforces the input ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    /// Age in years (18-80)
    pub age: u8,

    /// Body-mass index, kg/m² (15.0-50.0)
    pub bmi: f64,

    /// Children covered by the policy (0-5)
    pub children: u8,

    pub sex: Sex,

    pub smoker: SmokerStatus,

    pub region: Region,
}

impl PatientProfile {
    /// Build a validated profile.
    ///
    /// # Errors
    /// Returns `ProfileError::OutOfRange` listing every field outside its range.
    pub fn new(
        age: u8,
        bmi: f64,
        children: u8,
        sex: Sex,
        smoker: SmokerStatus,
        region: Region,
    ) -> Result<Self, ProfileError> {
        let profile = Self {
            age,
            bmi,
            children,
            sex,
            smoker,
            region,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Check all numeric fields against their ranges.
    ///
    /// # Errors
    /// Returns `ProfileError::OutOfRange` with one message per violation.
    pub fn validate(&self) -> Result<(), ProfileError> {
        let mut errors = Vec::new();

        if !(AGE_RANGE.0..=AGE_RANGE.1).contains(&self.age) {
            errors.push(format!(
                "Age {} out of range [{}, {}]",
                self.age, AGE_RANGE.0, AGE_RANGE.1
            ));
        }
        if !self.bmi.is_finite() || !(BMI_RANGE.0..=BMI_RANGE.1).contains(&self.bmi) {
            errors.push(format!(
                "BMI {} out of range [{}, {}]",
                self.bmi, BMI_RANGE.0, BMI_RANGE.1
            ));
        }
        if self.children > MAX_CHILDREN {
            errors.push(format!(
                "Children {} out of range [0, {}]",
                self.children, MAX_CHILDREN
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ProfileError::OutOfRange(errors))
        }
    }

    /// Numeric view of the profile for the predictor.
    #[must_use]
    pub fn encode(&self) -> EncodedProfile {
        EncodedProfile {
            age: f64::from(self.age),
            bmi: self.bmi,
            children: f64::from(self.children),
            sex_encoded: self.sex.encode(),
            smoker_encoded: self.smoker.encode(),
            region_encoded: self.region.encode(),
        }
    }
}

impl Default for PatientProfile {
    fn default() -> Self {
        Self {
            age: 35,
            bmi: 25.0,
            children: 0,
            sex: Sex::Female,
            smoker: SmokerStatus::NonSmoker,
            region: Region::Northeast,
        }
    }
}

/// Single-row model input with categorical fields as integers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncodedProfile {
    pub age: f64,
    pub bmi: f64,
    pub children: f64,
    pub sex_encoded: u8,
    pub smoker_encoded: u8,
    pub region_encoded: u8,
}

impl EncodedProfile {
    /// Feature values in [`FEATURE_NAMES`] order.
    #[must_use]
    pub fn to_row(&self) -> [f64; 6] {
        [
            self.age,
            self.bmi,
            self.children,
            f64::from(self.sex_encoded),
            f64::from(self.smoker_encoded),
            f64::from(self.region_encoded),
        ]
    }

    /// Feature names paired with their values.
    pub fn named_values(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FEATURE_NAMES.into_iter().zip(self.to_row())
    }
}

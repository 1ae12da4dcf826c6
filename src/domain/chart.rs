//! Declarative chart descriptions.
//!
//! Builders here only describe what to draw. The TUI renders them with
//! ratatui widgets and the `estimate` binary exports them as JSON.

use serde::{Deserialize, Serialize};

use super::cost::{classify_cost, format_dollars, CostCategory};
use super::profile::{EncodedProfile, PatientProfile};

/// Radar axis labels, in feature order.
pub const RADAR_AXES: [&str; 6] = ["Age", "BMI", "Children", "Sex", "Smoker", "Region"];

/// Divisors mapping each encoded feature onto [0, 1].
const RADAR_DIVISORS: [f64; 6] = [100.0, 50.0, 5.0, 1.0, 1.0, 3.0];

const RADAR_LINE_COLOR: &str = "#667eea";
const RADAR_FILL_COLOR: &str = "rgba(102,126,234,0.3)";
const HIGHLIGHT_BAR_COLOR: &str = "#28a745";
const MUTED_BAR_COLOR: &str = "#e9ecef";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChartError {
    #[error("Cannot chart a non-finite cost: {0}")]
    NonFiniteCost(f64),
}

/// A closed polygon over labelled radial axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarChart {
    pub title: String,
    /// Axis labels; the first label is repeated at the end.
    pub axes: Vec<String>,
    /// Radial values in [0, 1]; the first value is repeated at the end.
    pub values: Vec<f64>,
    pub range: (f64, f64),
    pub line_color: String,
    pub fill_color: String,
}

impl RadarChart {
    /// Points of the polygon in cartesian coordinates, starting at 12 o'clock
    /// and running clockwise. Closed like `values`.
    #[must_use]
    pub fn polygon(&self) -> Vec<(f64, f64)> {
        let n = self.values.len().saturating_sub(1).max(1);
        self.values
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let (x, y) = axis_direction(i % n, n);
                (x * r, y * r)
            })
            .collect()
    }
}

/// Unit vector of axis `index` out of `count`.
#[must_use]
pub fn axis_direction(index: usize, count: usize) -> (f64, f64) {
    let angle = std::f64::consts::FRAC_PI_2
        - (index as f64) * std::f64::consts::TAU / (count.max(1) as f64);
    (angle.cos(), angle.sin())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: String,
    pub text: String,
    pub highlighted: bool,
}

/// Horizontal marker across a bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub value: f64,
    pub color: String,
    pub dashed: bool,
    pub annotation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub bars: Vec<Bar>,
    pub reference: ReferenceLine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartSpec {
    Radar(RadarChart),
    Bar(BarChart),
}

impl ChartSpec {
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Radar(r) => &r.title,
            Self::Bar(b) => &b.title,
        }
    }
}

/// Each encoded feature scaled to [0, 1] by its fixed divisor.
#[must_use]
pub fn normalize_profile(encoded: &EncodedProfile) -> [f64; 6] {
    let row = encoded.to_row();
    let mut out = [0.0; 6];
    for (slot, (value, divisor)) in out.iter_mut().zip(row.iter().zip(RADAR_DIVISORS)) {
        *slot = value / divisor;
    }
    out
}

/// Radar chart of the patient's normalized attributes.
#[must_use]
pub fn build_profile_radar(_profile: &PatientProfile, encoded: &EncodedProfile) -> ChartSpec {
    let normalized = normalize_profile(encoded);

    let mut values = normalized.to_vec();
    values.push(normalized[0]);

    let mut axes: Vec<String> = RADAR_AXES.iter().map(|s| (*s).to_string()).collect();
    axes.push(RADAR_AXES[0].to_string());

    ChartSpec::Radar(RadarChart {
        title: "Patient Profile".to_string(),
        axes,
        values,
        range: (0.0, 1.0),
        line_color: RADAR_LINE_COLOR.to_string(),
        fill_color: RADAR_FILL_COLOR.to_string(),
    })
}

/// Bar chart of reference costs per tier, with the prediction as a marker.
///
/// # Errors
/// Returns `ChartError::NonFiniteCost` for NaN or infinite costs.
pub fn build_cost_comparison_chart(cost: f64) -> Result<ChartSpec, ChartError> {
    if !cost.is_finite() {
        return Err(ChartError::NonFiniteCost(cost));
    }

    let class = classify_cost(cost);

    let bars = CostCategory::ALL
        .iter()
        .map(|&category| {
            let highlighted = category == class.category;
            let reference = category.reference_cost();
            Bar {
                label: category.label().to_string(),
                value: reference,
                color: if highlighted {
                    HIGHLIGHT_BAR_COLOR
                } else {
                    MUTED_BAR_COLOR
                }
                .to_string(),
                text: format_dollars(reference, 0),
                highlighted,
            }
        })
        .collect();

    Ok(ChartSpec::Bar(BarChart {
        title: "Insurance Cost Comparison".to_string(),
        x_title: "Risk Category".to_string(),
        y_title: "Cost ($)".to_string(),
        bars,
        reference: ReferenceLine {
            value: cost,
            color: class.color.to_string(),
            dashed: true,
            annotation: format!("Your prediction: {}", format_dollars(cost, 0)),
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{Region, Sex, SmokerStatus};

    fn sample_profile() -> PatientProfile {
        PatientProfile::new(
            35,
            25.0,
            0,
            Sex::Female,
            SmokerStatus::NonSmoker,
            Region::Northwest,
        )
        .expect("valid")
    }

    #[test]
    fn test_radar_normalization() {
        let profile = sample_profile();
        let ChartSpec::Radar(radar) = build_profile_radar(&profile, &profile.encode()) else {
            panic!("expected radar chart");
        };

        let expected = [0.35, 0.5, 0.0, 0.0, 0.0, 1.0 / 3.0];
        assert_eq!(radar.values.len(), 7);
        for (got, want) in radar.values.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
        }
        assert_eq!(radar.values.first(), radar.values.last());
        assert_eq!(radar.axes.first(), radar.axes.last());
        assert_eq!(radar.axes.len(), 7);
        assert_eq!(radar.range, (0.0, 1.0));
    }

    #[test]
    fn test_radar_polygon_is_closed() {
        let profile = PatientProfile::new(
            80,
            50.0,
            5,
            Sex::Male,
            SmokerStatus::Smoker,
            Region::Southwest,
        )
        .expect("valid");
        let ChartSpec::Radar(radar) = build_profile_radar(&profile, &profile.encode()) else {
            panic!("expected radar chart");
        };

        let polygon = radar.polygon();
        let first = polygon.first().copied().unwrap();
        let last = polygon.last().copied().unwrap();
        assert!((first.0 - last.0).abs() < 1e-12);
        assert!((first.1 - last.1).abs() < 1e-12);
        // Age axis points straight up.
        assert!(first.0.abs() < 1e-12);
        assert!((first.1 - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_comparison_highlights_matching_bar() {
        let ChartSpec::Bar(chart) = build_cost_comparison_chart(18_500.0).expect("finite") else {
            panic!("expected bar chart");
        };

        let highlighted: Vec<&str> = chart
            .bars
            .iter()
            .filter(|b| b.highlighted)
            .map(|b| b.label.as_str())
            .collect();
        assert_eq!(highlighted, vec!["High"]);

        let high = chart.bars.iter().find(|b| b.label == "High").unwrap();
        assert_eq!(high.color, "#28a745");
        assert!(chart
            .bars
            .iter()
            .filter(|b| !b.highlighted)
            .all(|b| b.color == "#e9ecef"));

        assert_eq!(chart.reference.color, "#dc3545");
        assert!((chart.reference.value - 18_500.0).abs() < f64::EPSILON);
        assert_eq!(chart.reference.annotation, "Your prediction: $18,500");
    }

    #[test]
    fn test_comparison_reference_costs() {
        let ChartSpec::Bar(chart) = build_cost_comparison_chart(1_000.0).expect("finite") else {
            panic!("expected bar chart");
        };
        let values: Vec<f64> = chart.bars.iter().map(|b| b.value).collect();
        assert_eq!(values, vec![2_000.0, 5_000.0, 10_000.0, 20_000.0, 35_000.0]);
        assert_eq!(chart.bars[3].text, "$20,000");
    }

    #[test]
    fn test_comparison_rejects_non_finite() {
        assert_eq!(
            build_cost_comparison_chart(f64::INFINITY),
            Err(ChartError::NonFiniteCost(f64::INFINITY))
        );
        assert!(build_cost_comparison_chart(f64::NAN).is_err());
    }

    #[test]
    fn test_chart_spec_serializes_with_type_tag() {
        let json = serde_json::to_value(build_cost_comparison_chart(9_000.0).unwrap()).unwrap();
        assert_eq!(json["type"], "bar");
        assert_eq!(json["bars"].as_array().map(Vec::len), Some(5));
    }
}

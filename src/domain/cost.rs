//! Cost categories used to place a prediction among reference costs.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::bands::{self, Band};

/// Five cost tiers, cheapest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostCategory {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl CostCategory {
    pub const ALL: [CostCategory; 5] = [
        CostCategory::VeryLow,
        CostCategory::Low,
        CostCategory::Medium,
        CostCategory::High,
        CostCategory::VeryHigh,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }

    /// Typical annual cost shown as the reference bar for this tier.
    #[must_use]
    pub fn reference_cost(self) -> f64 {
        match self {
            Self::VeryLow => 2_000.0,
            Self::Low => 5_000.0,
            Self::Medium => 10_000.0,
            Self::High => 20_000.0,
            Self::VeryHigh => 35_000.0,
        }
    }

    /// Presentation color token (`#rrggbb`).
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::VeryLow => "#28a745",
            Self::Low => "#6f42c1",
            Self::Medium => "#fd7e14",
            Self::High => "#dc3545",
            Self::VeryHigh => "#6f1e1e",
        }
    }
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const COST_BANDS: [Band<CostCategory>; 5] = [
    Band::new(f64::NEG_INFINITY, CostCategory::VeryLow),
    Band::new(3_000.0, CostCategory::Low),
    Band::new(8_000.0, CostCategory::Medium),
    Band::new(15_000.0, CostCategory::High),
    Band::new(25_000.0, CostCategory::VeryHigh),
];

/// A classified cost with its presentation color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostClass {
    pub category: CostCategory,
    pub color: &'static str,
}

/// Place a cost in its tier. NaN lands in the top tier.
#[must_use]
pub fn classify_cost(cost: f64) -> CostClass {
    let category = bands::lookup(&COST_BANDS, cost)
        .copied()
        .unwrap_or(CostCategory::VeryHigh);
    CostClass {
        category,
        color: category.color(),
    }
}

/// Format a dollar amount with thousands separators, e.g. `$13,270`.
#[must_use]
pub fn format_dollars(amount: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, amount.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{sign}${grouped}.{frac}"),
        None => format!("{sign}${grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries_go_to_higher_category() {
        assert_eq!(classify_cost(2_999.99).category, CostCategory::VeryLow);
        assert_eq!(classify_cost(3_000.0).category, CostCategory::Low);
        assert_eq!(classify_cost(7_999.99).category, CostCategory::Low);
        assert_eq!(classify_cost(8_000.0).category, CostCategory::Medium);
        assert_eq!(classify_cost(14_999.99).category, CostCategory::Medium);
        assert_eq!(classify_cost(15_000.0).category, CostCategory::High);
        assert_eq!(classify_cost(24_999.99).category, CostCategory::High);
        assert_eq!(classify_cost(25_000.0).category, CostCategory::VeryHigh);
    }

    #[test]
    fn test_classify_covers_whole_line() {
        assert_eq!(classify_cost(-500.0).category, CostCategory::VeryLow);
        assert_eq!(classify_cost(0.0).category, CostCategory::VeryLow);
        assert_eq!(classify_cost(1e12).category, CostCategory::VeryHigh);
    }

    #[test]
    fn test_intervals_are_monotonic() {
        let mut previous = CostCategory::VeryLow;
        let mut cost = -1_000.0;
        while cost < 40_000.0 {
            let current = classify_cost(cost).category;
            let prev_idx = CostCategory::ALL.iter().position(|c| *c == previous).unwrap();
            let cur_idx = CostCategory::ALL.iter().position(|c| *c == current).unwrap();
            assert!(cur_idx == prev_idx || cur_idx == prev_idx + 1);
            previous = current;
            cost += 250.0;
        }
        assert_eq!(previous, CostCategory::VeryHigh);
    }

    #[test]
    fn test_color_tokens() {
        assert_eq!(classify_cost(1_000.0).color, "#28a745");
        assert_eq!(classify_cost(5_000.0).color, "#6f42c1");
        assert_eq!(classify_cost(10_000.0).color, "#fd7e14");
        assert_eq!(classify_cost(20_000.0).color, "#dc3545");
        assert_eq!(classify_cost(30_000.0).color, "#6f1e1e");
    }

    #[test]
    fn test_format_dollars() {
        assert_eq!(format_dollars(0.0, 0), "$0");
        assert_eq!(format_dollars(999.0, 0), "$999");
        assert_eq!(format_dollars(13_270.4, 0), "$13,270");
        assert_eq!(format_dollars(1_234_567.891, 2), "$1,234,567.89");
        assert_eq!(format_dollars(-2_500.0, 0), "-$2,500");
    }
}

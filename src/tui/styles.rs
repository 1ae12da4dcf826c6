//! Color palette and preset styles.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::{BmiCategory, CostCategory, RiskFactor};

/// Application theme.
pub struct Theme;

impl Theme {
    /// Indigo accent used by the radar chart and headings (#667eea)
    pub const ACCENT: Color = Color::Rgb(102, 126, 234);

    /// Purple end of the prediction card gradient (#764ba2)
    pub const ACCENT_DARK: Color = Color::Rgb(118, 75, 162);

    pub const PINK: Color = Color::Rgb(236, 72, 153); // #EC4899

    pub const SUCCESS: Color = Color::Rgb(16, 185, 129); // #10B981
    pub const WARNING: Color = Color::Rgb(251, 191, 36); // #FBBF24
    pub const DANGER: Color = Color::Rgb(244, 63, 94); // #F43F5E

    pub const BORDER: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const GRID: Color = Color::Rgb(71, 85, 105); // #475569

    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    /// Parse a `#rrggbb` color token. Anything else falls back to gray.
    #[must_use]
    pub fn token(hex: &str) -> Color {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Color::Gray;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
        match (channel(0), channel(2), channel(4)) {
            (Ok(r), Ok(g), Ok(b)) => Color::Rgb(r, g, b),
            _ => Color::Gray,
        }
    }

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PINK)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PINK)
    }

    /// Highlighted option in a selector.
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::ACCENT_DARK)
            .add_modifier(Modifier::BOLD)
    }

    /// Big prediction figure.
    #[must_use]
    pub fn headline() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::ACCENT_DARK)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn cost_category(category: CostCategory) -> Style {
        Style::default()
            .fg(Self::token(category.color()))
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn risk_factor(risk: RiskFactor) -> Style {
        match risk {
            RiskFactor::Low => Self::success(),
            RiskFactor::High => Self::danger(),
        }
    }

    #[must_use]
    pub fn bmi_category(category: BmiCategory) -> Style {
        match category {
            BmiCategory::Normal => Self::success(),
            BmiCategory::Underweight | BmiCategory::Overweight => Self::warning(),
            BmiCategory::Obese => Self::danger(),
        }
    }
}

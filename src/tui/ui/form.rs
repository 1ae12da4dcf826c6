//! Patient profile form: two sliders and four selectors.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::{
    profile::{AGE_RANGE, BMI_RANGE},
    PatientProfile, ProfileError, Region, Sex, SmokerStatus,
};
use crate::tui::styles::Theme;

const CHILDREN_OPTIONS: [&str; 6] = ["0", "1", "2", "3", "4", "5"];
const SEX_OPTIONS: [&str; 2] = ["Female", "Male"];
const SMOKER_OPTIONS: [&str; 2] = ["Non-smoker", "Smoker"];
const REGION_OPTIONS: [&str; 4] = ["Northeast", "Northwest", "Southeast", "Southwest"];

const AGE: usize = 0;
const BMI: usize = 1;
const CHILDREN: usize = 2;
const SEX: usize = 3;
const SMOKER: usize = 4;
const REGION: usize = 5;

/// Input widget kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    Slider {
        min: f64,
        max: f64,
        step: f64,
        decimals: i32,
        value: f64,
    },
    Choice {
        options: &'static [&'static str],
        selected: usize,
    },
}

/// One labelled form control.
#[derive(Debug, Clone, PartialEq)]
pub struct FormControl {
    pub label: &'static str,
    pub hint: &'static str,
    pub kind: ControlKind,
}

impl FormControl {
    fn slider(
        label: &'static str,
        hint: &'static str,
        (min, max): (f64, f64),
        step: f64,
        decimals: i32,
        value: f64,
    ) -> Self {
        Self {
            label,
            hint,
            kind: ControlKind::Slider {
                min,
                max,
                step,
                decimals,
                value,
            },
        }
    }

    fn choice(
        label: &'static str,
        hint: &'static str,
        options: &'static [&'static str],
        selected: usize,
    ) -> Self {
        Self {
            label,
            hint,
            kind: ControlKind::Choice { options, selected },
        }
    }

    /// Move the control by `steps` (negative moves down/left). Values clamp
    /// at the ends of their range.
    pub fn adjust(&mut self, steps: i32) {
        match &mut self.kind {
            ControlKind::Slider {
                min,
                max,
                step,
                decimals,
                value,
            } => {
                let factor = 10f64.powi(*decimals);
                let raw = (*value + f64::from(steps) * *step).clamp(*min, *max);
                *value = (raw * factor).round() / factor;
            }
            ControlKind::Choice { options, selected } => {
                let last = options.len().saturating_sub(1) as i64;
                *selected = (*selected as i64 + i64::from(steps)).clamp(0, last) as usize;
            }
        }
    }

    /// Current value rendered for display.
    #[must_use]
    pub fn display_value(&self) -> String {
        match &self.kind {
            ControlKind::Slider {
                decimals, value, ..
            } => format!("{:.*}", (*decimals).max(0) as usize, value),
            ControlKind::Choice { options, selected } => {
                options.get(*selected).copied().unwrap_or("?").to_string()
            }
        }
    }

    fn slider_value(&self) -> f64 {
        match &self.kind {
            ControlKind::Slider { value, .. } => *value,
            ControlKind::Choice { .. } => f64::NAN,
        }
    }

    fn choice_label(&self) -> &'static str {
        match &self.kind {
            ControlKind::Choice { options, selected } => options.get(*selected).copied().unwrap_or(""),
            ControlKind::Slider { .. } => "",
        }
    }
}

/// State of the sidebar form.
pub struct ProfileFormState {
    pub controls: Vec<FormControl>,
    pub selected: usize,
    pub error_message: Option<String>,
}

impl Default for ProfileFormState {
    fn default() -> Self {
        let defaults = PatientProfile::default();
        Self {
            controls: vec![
                FormControl::slider(
                    "Age",
                    "years",
                    (f64::from(AGE_RANGE.0), f64::from(AGE_RANGE.1)),
                    1.0,
                    0,
                    f64::from(defaults.age),
                ),
                FormControl::slider(
                    "Body-mass index",
                    "weight(kg) / height(m)²",
                    BMI_RANGE,
                    0.1,
                    1,
                    defaults.bmi,
                ),
                FormControl::choice(
                    "Children",
                    "covered by the policy",
                    &CHILDREN_OPTIONS,
                    usize::from(defaults.children),
                ),
                FormControl::choice("Sex", "", &SEX_OPTIONS, 0),
                FormControl::choice("Smoking status", "", &SMOKER_OPTIONS, 0),
                FormControl::choice("Region", "US region", &REGION_OPTIONS, 0),
            ],
            selected: 0,
            error_message: None,
        }
    }
}

impl ProfileFormState {
    pub fn next_control(&mut self) {
        self.selected = (self.selected + 1) % self.controls.len();
    }

    pub fn prev_control(&mut self) {
        if self.selected == 0 {
            self.selected = self.controls.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    /// Adjust the focused control.
    pub fn adjust(&mut self, steps: i32) {
        self.controls[self.selected].adjust(steps);
        self.error_message = None;
    }

    /// Restore every control to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Read the form into a validated profile.
    ///
    /// # Errors
    /// Returns `ProfileError::UnknownCategory` if a selector label has no
    /// matching category, or `ProfileError::OutOfRange` on invalid values.
    pub fn to_profile(&self) -> Result<PatientProfile, ProfileError> {
        let age = self.controls[AGE].slider_value();
        let bmi = self.controls[BMI].slider_value();

        let children_label = self.controls[CHILDREN].choice_label();
        let children: u8 = children_label
            .parse()
            .map_err(|_| ProfileError::UnknownCategory {
                field: "children",
                value: children_label.to_string(),
            })?;

        let sex: Sex = self.controls[SEX].choice_label().parse()?;
        let smoker: SmokerStatus = self.controls[SMOKER].choice_label().parse()?;
        let region: Region = self.controls[REGION].choice_label().parse()?;

        if !age.is_finite() || !(0.0..=f64::from(u8::MAX)).contains(&age) {
            return Err(ProfileError::OutOfRange(vec![format!("Age {age} is not a whole number of years")]));
        }

        PatientProfile::new(age.round() as u8, bmi, children, sex, smoker, region)
    }
}

/// Render the form sidebar.
pub fn render_profile_form(f: &mut Frame, area: Rect, state: &ProfileFormState) {
    let block = Block::default()
        .title(Span::styled(" Patient Information ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let constraints: Vec<Constraint> = state
        .controls
        .iter()
        .map(|_| Constraint::Length(3))
        .chain([Constraint::Min(0), Constraint::Length(4)])
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, control) in state.controls.iter().enumerate() {
        render_control(f, chunks[i], control, i == state.selected);
    }

    render_form_footer(f, chunks[chunks.len() - 1], state);
}

fn render_control(f: &mut Frame, area: Rect, control: &FormControl, focused: bool) {
    let (border_style, title_style) = if focused {
        (Theme::border_focused(), Theme::focused())
    } else {
        (Theme::border(), Theme::text_secondary())
    };

    let mut title = vec![Span::styled(format!(" {} ", control.label), title_style)];
    if !control.hint.is_empty() {
        title.push(Span::styled(format!("({}) ", control.hint), Theme::text_muted()));
    }

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(border_style);

    match &control.kind {
        ControlKind::Slider {
            min, max, value, ..
        } => {
            let ratio = if max > min {
                ((value - min) / (max - min)).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let gauge = Gauge::default()
                .block(block)
                .gauge_style(if focused {
                    Theme::focused()
                } else {
                    Theme::subtitle()
                })
                .ratio(ratio)
                .label(format!("◀ {} ▶", control.display_value()));
            f.render_widget(gauge, area);
        }
        ControlKind::Choice { options, selected } => {
            let mut spans = Vec::with_capacity(options.len() * 2);
            for (i, option) in options.iter().enumerate() {
                let style = if i == *selected {
                    Theme::selected()
                } else {
                    Theme::text_muted()
                };
                spans.push(Span::styled(format!(" {option} "), style));
                spans.push(Span::raw(" "));
            }
            let p = Paragraph::new(Line::from(spans)).block(block);
            f.render_widget(p, area);
        }
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &ProfileFormState) {
    let lines = if let Some(err) = &state.error_message {
        vec![Line::from(vec![
            Span::styled("! ", Theme::danger()),
            Span::styled(err.clone(), Theme::danger()),
        ])]
    } else {
        vec![
            Line::from(vec![
                Span::styled("[↑↓] ", Theme::key_hint()),
                Span::styled("Field ", Theme::key_desc()),
                Span::styled("[←→] ", Theme::key_hint()),
                Span::styled("Adjust ", Theme::key_desc()),
                Span::styled("[PgUp/PgDn] ", Theme::key_hint()),
                Span::styled("×10", Theme::key_desc()),
            ]),
            Line::from(vec![
                Span::styled("[Enter] ", Theme::key_hint()),
                Span::styled("Predict cost ", Theme::key_desc()),
                Span::styled("[R] ", Theme::key_hint()),
                Span::styled("Reset ", Theme::key_desc()),
                Span::styled("[Q] ", Theme::key_hint()),
                Span::styled("Quit", Theme::key_desc()),
            ]),
        ]
    };

    let footer = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );
    f.render_widget(footer, area);
}

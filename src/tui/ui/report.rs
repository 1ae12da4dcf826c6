//! Prediction pane: cost card, tier comparison, metric tiles and advice.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::PredictionReport;
use crate::domain::{chart, format_dollars, ChartSpec};
use crate::tui::styles::Theme;

/// What the prediction pane currently shows.
#[derive(Debug, Clone, Default)]
pub enum ReportState {
    /// No prediction requested yet
    #[default]
    Idle,
    Ready(Box<PredictionReport>),
    Error(String),
}

/// Render the prediction pane. `load_error` is the model-load failure, if any.
pub fn render_report(f: &mut Frame, area: Rect, state: &ReportState, load_error: Option<&str>) {
    let area = match load_error {
        Some(message) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(4), Constraint::Min(0)])
                .split(area);
            render_banner(f, chunks[0], "Model unavailable", message);
            chunks[1]
        }
        None => area,
    };

    match state {
        ReportState::Idle => render_idle(f, area),
        ReportState::Error(message) => render_error(f, area, message),
        ReportState::Ready(report) => render_ready(f, area, report),
    }
}

fn render_banner(f: &mut Frame, area: Rect, title: &str, message: &str) {
    let p = Paragraph::new(Line::from(Span::styled(message.to_string(), Theme::danger())))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled(format!(" {title} "), Theme::danger()))
                .borders(Borders::ALL)
                .border_style(Theme::danger()),
        );
    f.render_widget(p, area);
}

fn render_idle(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Insurance Cost Prediction", Theme::title())),
        Line::from(""),
        Line::from(Span::styled(
            "Fill in the patient information on the left,",
            Theme::text_secondary(),
        )),
        Line::from(vec![
            Span::styled("then press ", Theme::text_secondary()),
            Span::styled("[Enter]", Theme::key_hint()),
            Span::styled(" to estimate the annual premium.", Theme::text_secondary()),
        ]),
    ];

    let p = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(Span::styled(" Prediction ", Theme::subtitle()))
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );
    f.render_widget(p, area);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);
    render_banner(f, chunks[0], "Prediction failed", message);
    render_idle(f, chunks[1]);
}

fn render_ready(f: &mut Frame, area: Rect, report: &PredictionReport) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),  // Cost card
            Constraint::Min(10),    // Comparison chart
            Constraint::Length(4),  // Metric tiles
            Constraint::Length(9),  // Advice
        ])
        .split(area);

    render_cost_card(f, chunks[0], report);
    if let ChartSpec::Bar(spec) = &report.comparison {
        render_comparison(f, chunks[1], spec);
    }
    render_metric_tiles(f, chunks[2], report);
    render_advice(f, chunks[3], report);
}

fn render_cost_card(f: &mut Frame, area: Rect, report: &PredictionReport) {
    let category = report.cost_class.category;
    let text = vec![
        Line::from(Span::styled(
            format!("  {}  ", format_dollars(report.cost, 2)),
            Theme::headline(),
        )),
        Line::from(vec![
            Span::styled("Annual premium estimate · tier ", Theme::text_secondary()),
            Span::styled(category.label(), Theme::cost_category(category)),
        ]),
    ];

    let p = Paragraph::new(text).centered().block(
        Block::default()
            .title(Span::styled(" Estimated Annual Cost ", Theme::subtitle()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::ACCENT_DARK)),
    );
    f.render_widget(p, area);
}

fn render_comparison(f: &mut Frame, area: Rect, spec: &chart::BarChart) {
    let block = Block::default()
        .title(Span::styled(format!(" {} ", spec.title), Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let bars: Vec<Bar> = spec
        .bars
        .iter()
        .map(|b| {
            let style = Style::default().fg(Theme::token(&b.color));
            let label_style = if b.highlighted {
                Theme::success()
            } else {
                Theme::text_secondary()
            };
            Bar::default()
                .value(b.value.max(0.0).round() as u64)
                .label(Line::from(Span::styled(b.label.clone(), label_style)))
                .text_value(b.text.clone())
                .style(style)
                .value_style(Style::default().fg(Theme::GRID).bg(Theme::token(&b.color)))
        })
        .collect();

    let top = spec
        .bars
        .iter()
        .map(|b| b.value)
        .fold(spec.reference.value, f64::max)
        .max(0.0)
        .ceil() as u64;

    let count = bars.len().max(1) as u16;
    let bar_gap = 1;
    let bar_width = (chunks[0].width.saturating_sub(bar_gap * count) / count).max(3);

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(bar_gap)
        .max(top);
    f.render_widget(chart, chunks[0]);

    let reference = &spec.reference;
    let marker = if reference.dashed { "╌╌╌ " } else { "─── " };
    let caption = Paragraph::new(Line::from(vec![
        Span::styled(marker, Style::default().fg(Theme::token(&reference.color))),
        Span::styled(
            reference.annotation.clone(),
            Style::default().fg(Theme::token(&reference.color)),
        ),
        Span::styled(
            format!("   {} vs {}", spec.y_title, spec.x_title),
            Theme::text_muted(),
        ),
    ]));
    f.render_widget(caption, chunks[1]);
}

fn render_metric_tiles(f: &mut Frame, area: Rect, report: &PredictionReport) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let m = &report.metrics;
    let tiles = [
        ("Monthly", format_dollars(m.monthly_cost, 2), Theme::text()),
        ("Daily", format_dollars(m.daily_cost, 2), Theme::text()),
        ("Risk factor", m.risk_factor.to_string(), Theme::risk_factor(m.risk_factor)),
        ("BMI category", m.bmi_category.to_string(), Theme::bmi_category(m.bmi_category)),
    ];

    for (chunk, (title, value, style)) in chunks.iter().zip(tiles) {
        let p = Paragraph::new(Line::from(Span::styled(value, style)))
            .centered()
            .block(
                Block::default()
                    .title(Span::styled(format!(" {title} "), Theme::text_secondary()))
                    .borders(Borders::ALL)
                    .border_style(Theme::border()),
            );
        f.render_widget(p, *chunk);
    }
}

fn render_advice(f: &mut Frame, area: Rect, report: &PredictionReport) {
    let mut lines = Vec::with_capacity(report.advice.len() * 2);
    for advice in &report.advice {
        lines.push(Line::from(vec![
            Span::styled("• ", Theme::subtitle()),
            Span::styled(advice.headline(), Theme::title()),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", advice.message()),
            Theme::text_secondary(),
        )));
    }

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(Span::styled(" Personalized Advice ", Theme::subtitle()))
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );
    f.render_widget(p, area);
}

//! Side pane: patient radar and model information.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as Segment},
        Block, Borders, Paragraph, Wrap,
    },
    Frame,
};

use crate::adapters::ModelInfo;
use crate::domain::chart::{axis_direction, RadarChart};
use crate::domain::{format_dollars, ChartSpec};
use crate::tui::styles::Theme;

const RADAR_BOUNDS: [f64; 2] = [-1.35, 1.35];
const LABEL_RADIUS: f64 = 1.12;
const GRID_RINGS: [f64; 2] = [0.5, 1.0];

/// Render the insights pane. `radar` is `None` until a prediction exists.
pub fn render_insights(
    f: &mut Frame,
    area: Rect,
    radar: Option<&ChartSpec>,
    info: Option<&ModelInfo>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    match radar {
        Some(ChartSpec::Radar(spec)) => render_radar(f, chunks[0], spec),
        _ => render_radar_placeholder(f, chunks[0]),
    }
    render_model_info(f, chunks[1], info);
}

fn radar_block(title: &str) -> Block<'static> {
    Block::default()
        .title(Span::styled(format!(" {title} "), Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border())
}

fn render_radar_placeholder(f: &mut Frame, area: Rect) {
    let p = Paragraph::new(Span::styled(
        "The profile chart appears after the first prediction.",
        Theme::text_muted(),
    ))
    .wrap(Wrap { trim: true })
    .block(radar_block("Patient Profile"));
    f.render_widget(p, area);
}

fn render_radar(f: &mut Frame, area: Rect, spec: &RadarChart) {
    let axes = spec.axes.len().saturating_sub(1).max(1);
    let line_color = Theme::token(&spec.line_color);
    let (lo, hi) = spec.range;
    let span = if hi > lo { hi - lo } else { 1.0 };
    let scaled: Vec<(f64, f64)> = spec
        .values
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let (x, y) = axis_direction(i % axes, axes);
            let radius = ((r - lo) / span).clamp(0.0, 1.0);
            (x * radius, y * radius)
        })
        .collect();

    let canvas = Canvas::default()
        .block(radar_block(&spec.title))
        .marker(Marker::Braille)
        .x_bounds(RADAR_BOUNDS)
        .y_bounds(RADAR_BOUNDS)
        .paint(|ctx| {
            for ring in GRID_RINGS {
                for i in 0..axes {
                    let (x1, y1) = axis_direction(i, axes);
                    let (x2, y2) = axis_direction((i + 1) % axes, axes);
                    ctx.draw(&Segment {
                        x1: x1 * ring,
                        y1: y1 * ring,
                        x2: x2 * ring,
                        y2: y2 * ring,
                        color: Theme::GRID,
                    });
                }
            }
            for i in 0..axes {
                let (x, y) = axis_direction(i, axes);
                ctx.draw(&Segment {
                    x1: 0.0,
                    y1: 0.0,
                    x2: x,
                    y2: y,
                    color: Theme::GRID,
                });
            }

            ctx.layer();

            for pair in scaled.windows(2) {
                ctx.draw(&Segment {
                    x1: pair[0].0,
                    y1: pair[0].1,
                    x2: pair[1].0,
                    y2: pair[1].1,
                    color: line_color,
                });
            }

            for (i, label) in spec.axes.iter().take(axes).enumerate() {
                let (x, y) = axis_direction(i, axes);
                // Nudge left-side labels so the text ends near the spoke.
                let offset = if x < -0.1 { -0.05 * label.len() as f64 } else { 0.0 };
                ctx.print(
                    x * LABEL_RADIUS + offset,
                    y * LABEL_RADIUS,
                    Span::styled(label.clone(), Style::default().fg(Color::Gray)),
                );
            }
        });

    f.render_widget(canvas, area);
}

fn render_model_info(f: &mut Frame, area: Rect, info: Option<&ModelInfo>) {
    let mut lines = vec![Line::from(Span::styled("About the model", Theme::title()))];

    match info {
        Some(info) => {
            lines.push(kv("Algorithm", info.algorithm.clone()));
            if let Some(r2) = info.r_squared {
                lines.push(kv("R²", format!("{r2:.2}")));
            }
            if let Some(tuning) = &info.tuning {
                lines.push(kv("Tuning", tuning.clone()));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Data statistics", Theme::title())));
            match &info.dataset {
                Some(ds) => {
                    lines.push(kv("Samples", ds.samples.to_string()));
                    lines.push(kv("Mean cost", format_dollars(ds.mean_cost, 0)));
                    lines.push(kv("Mean age", format!("{:.1} years", ds.mean_age)));
                    lines.push(kv("Mean BMI", format!("{:.2}", ds.mean_bmi)));
                }
                None => lines.push(Line::from(Span::styled(
                    "No dataset summary in the artifact.",
                    Theme::text_muted(),
                ))),
            }
        }
        None => lines.push(Line::from(Span::styled(
            "No model metadata available.",
            Theme::text_muted(),
        ))),
    }

    let p = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(Span::styled(" Information ", Theme::subtitle()))
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );
    f.render_widget(p, area);
}

fn kv(key: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key}: "), Theme::text_secondary()),
        Span::styled(value, Theme::text()),
    ])
}

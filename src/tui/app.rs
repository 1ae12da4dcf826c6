//! Main TUI application state machine.
//!
//! Handles:
//! - Input event handling
//! - Running predictions through the presenter
//! - Laying out the form, prediction and insights panes

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::ArtifactPredictor;
use crate::application::{ModelStore, PredictionPresenter};
use crate::config::Settings;

use super::ui::{
    form::{render_profile_form, ProfileFormState},
    insights::render_insights,
    render_disclaimer,
    report::{render_report, ReportState},
};

const FORM_WIDTH: u16 = 44;
const PAGE_STEPS: i32 = 10;

/// Main application state
pub struct App {
    /// Whether the app should quit
    should_quit: bool,

    presenter: PredictionPresenter<ArtifactPredictor>,

    form_state: ProfileFormState,

    report_state: ReportState,
}

impl App {
    /// Create the application, loading the model artifact named in `settings`.
    ///
    /// A missing or corrupt artifact does not prevent startup; the failure is
    /// shown in the interface and returned on every prediction.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        tracing::info!("Loading model artifact from {:?}", settings.model_path);
        let store = ModelStore::open(&settings.model_path);
        Self::with_presenter(PredictionPresenter::new(store))
    }

    /// Create application with an injected presenter.
    #[must_use]
    pub fn with_presenter(presenter: PredictionPresenter<ArtifactPredictor>) -> Self {
        Self {
            should_quit: false,
            presenter,
            form_state: ProfileFormState::default(),
            report_state: ReportState::default(),
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main loop
        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Render the whole screen.
    pub fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(f.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(FORM_WIDTH),
                Constraint::Percentage(62),
                Constraint::Percentage(38),
            ])
            .split(chunks[0]);

        render_profile_form(f, columns[0], &self.form_state);

        let store = self.presenter.store();
        let load_error = store.load_error().map(ToString::to_string);
        render_report(f, columns[1], &self.report_state, load_error.as_deref());

        let radar = match &self.report_state {
            ReportState::Ready(report) => Some(&report.radar),
            _ => None,
        };
        let info = store.predictor().ok().and_then(ArtifactPredictor::info);
        render_insights(f, columns[2], radar, info);

        render_disclaimer(f, chunks[1]);
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::BackTab => self.form_state.prev_control(),
            KeyCode::Down | KeyCode::Tab => self.form_state.next_control(),
            KeyCode::Left => self.form_state.adjust(-1),
            KeyCode::Right => self.form_state.adjust(1),
            KeyCode::PageDown => self.form_state.adjust(-PAGE_STEPS),
            KeyCode::PageUp => self.form_state.adjust(PAGE_STEPS),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.form_state.reset();
                self.report_state = ReportState::Idle;
            }
            KeyCode::Enter => self.predict(),
            _ => {}
        }
    }

    fn predict(&mut self) {
        let profile = match self.form_state.to_profile() {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("Form rejected: {}", e);
                self.form_state.error_message = Some(e.to_string());
                return;
            }
        };

        self.report_state = match self.presenter.present(&profile) {
            Ok(report) => ReportState::Ready(Box::new(report)),
            Err(e) => {
                tracing::error!("Prediction failed: {}", e);
                ReportState::Error(e.to_string())
            }
        };
    }
}

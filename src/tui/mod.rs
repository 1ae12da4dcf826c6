//! TUI module: Terminal User Interface using Ratatui.
//!
//! One screen with three columns: the patient form, the prediction pane and
//! the insights pane (profile radar plus model information).

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::Theme;

//! Status bar component

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::notifications::{ToastLevel, Toasts};

/// How long a toast stays in the status bar
const TOAST_SECONDS: i64 = 5;

const SHORTCUTS: &str = "Tab: screen • /: search • s: sort • f: filter • n/p: page • r: refresh • ?: help • q: quit";

/// Status bar component
pub struct StatusBar;

impl StatusBar {
    /// Text and color for the current state: a fresh toast wins, then loading, then shortcuts
    #[must_use]
    pub fn status_line(toasts: &Toasts, loading: bool) -> (String, Color) {
        if let Some(toast) = toasts.latest() {
            let age = chrono::Local::now().signed_duration_since(toast.at);
            if age.num_seconds() < TOAST_SECONDS {
                let color = match toast.level {
                    ToastLevel::Success => Color::Green,
                    ToastLevel::Info => Color::Cyan,
                    ToastLevel::Error => Color::Red,
                };
                return (toast.message, color);
            }
        }

        if loading {
            ("Loading...".to_string(), Color::Yellow)
        } else {
            (SHORTCUTS.to_string(), Color::Gray)
        }
    }

    /// Render the status bar
    pub fn render(f: &mut Frame, area: Rect, toasts: &Toasts, loading: bool) {
        let (text, color) = Self::status_line(toasts, loading);

        let status_bar = Paragraph::new(text)
            .block(Block::default())
            .alignment(Alignment::Center)
            .style(Style::default().fg(color));

        f.render_widget(status_bar, area);
    }
}

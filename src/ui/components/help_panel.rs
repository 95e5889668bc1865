//! Help panel component

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::super::layout::LayoutManager;

const HELP_TEXT: &str = r"
SCREENS
-------
Tab / S-Tab   Next / previous list
1-8           Jump to a list

TABLE
-----
h/l ←→        Select column
j/k ↑↓        Select row
s             Sort by column (again to flip)
/             Search in column, Enter to commit
n/p           Next / previous page
r             Refresh

FILTERS
-------
f             Open filter popover (or click it)
↑↓ Tab        Move between fields
←→            Adjust range
Space         Toggle checkbox
Enter         Pick date / apply
c             Clear all filters
Esc           Close without applying

GENERAL
-------
?             Toggle this panel
q  Ctrl+C     Quit
";

/// Help panel component
pub struct HelpPanel;

impl HelpPanel {
    /// Render the help panel
    pub fn render(f: &mut Frame) {
        let help_area = LayoutManager::centered_rect(60, 80, f.area());
        f.render_widget(Clear, help_area);

        let help_paragraph = Paragraph::new(HELP_TEXT)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help ")
                    .title_alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            )
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false });
        f.render_widget(help_paragraph, help_area);
    }
}

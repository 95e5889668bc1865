//! Terminal setup, main loop and frame composition

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Tabs,
    Frame, Terminal,
};
use tokio::time::Duration;

use super::app::App;
use super::components::{HelpPanel, StatusBar, Toolbar};
use super::core::{AppContext, Component, EventHandler};
use super::layout::LayoutManager;
use crate::screens::ListScreen;

/// Run the TUI until the user quits
pub async fn run_app(ctx: AppContext) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(ctx);
    app.load_screen();

    let res = run_ui(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

async fn run_ui(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App) -> Result<()> {
    let mut events = EventHandler::new(Duration::from_millis(100));

    loop {
        app.drain_actions();
        app.refresh_view();
        terminal.draw(|f| render_ui(f, app))?;

        let event = events.next_event().await?;
        app.handle_event(event);

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Compose one frame
pub fn render_ui(f: &mut Frame, app: &mut App) {
    app.viewport = f.area();
    let areas = LayoutManager::main_layout(f.area());

    let titles: Vec<Line> = ListScreen::ALL
        .iter()
        .enumerate()
        .map(|(index, screen)| Line::from(format!("{} {}", index + 1, screen)))
        .collect();
    let selected = ListScreen::ALL.iter().position(|s| *s == app.screen).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, areas.tabs);

    let state = app.query_state();
    let has_filters = !app.screen.config().filters.is_empty();
    app.filter_button = Toolbar::render(
        f,
        areas.toolbar,
        &app.table,
        &state.filters,
        app.filter.is_open(),
        has_filters,
    );

    app.table.render(f, areas.table);
    StatusBar::render(f, areas.status, &app.ctx.toasts, app.fetcher.loading());

    app.filter.render(f, areas.table);

    if app.show_help {
        HelpPanel::render(f);
    }
}

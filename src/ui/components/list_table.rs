//! Presentational list table.
//!
//! Renders whatever rows the fetcher holds and turns key presses into
//! [`Action::Sort`], [`Action::SearchInput`]/[`Action::SearchCommitted`] and
//! [`Action::PageChange`]. It never fetches anything itself.

use crate::constants::{EMPTY_TEXT, LOADING_TEXT};
use crate::query::{Pagination, SearchQuery, SortOrder, SortSpec};
use crate::screens::{Column, Layout as ScreenLayout, ListScreen, ScreenConfig};
use crate::ui::core::{Action, Component};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use serde_json::Value;

/// Data the table shows, refreshed by the app before every draw.
#[derive(Debug, Clone, Default)]
pub struct TableView {
    pub rows: Vec<Value>,
    pub loading: bool,
    pub total: Option<u64>,
    pub pagination: Pagination,
    pub sort: Option<SortSpec>,
    pub error: Option<String>,
}

pub struct ListTable {
    screen: ListScreen,
    config: ScreenConfig,
    table_state: TableState,
    column: usize,
    searching: bool,
    search: SearchQuery,
    view: TableView,
}

impl ListTable {
    pub fn new(screen: ListScreen) -> Self {
        Self {
            screen,
            config: screen.config(),
            table_state: TableState::default().with_selected(Some(0)),
            column: 0,
            searching: false,
            search: SearchQuery::new(),
            view: TableView::default(),
        }
    }

    pub fn screen(&self) -> ListScreen {
        self.screen
    }

    pub fn set_view(&mut self, view: TableView) {
        if view.rows.is_empty() {
            self.table_state.select(None);
        } else {
            let selected = self.table_state.selected().unwrap_or(0).min(view.rows.len() - 1);
            self.table_state.select(Some(selected));
        }
        self.view = view;
    }

    pub fn view(&self) -> &TableView {
        &self.view
    }

    /// Seed the search drafts from stored state
    pub fn set_search(&mut self, search: SearchQuery) {
        self.search = search;
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn selected_column(&self) -> Column {
        self.config.columns[self.column]
    }

    pub fn search_text(&self, column: &str) -> &str {
        self.search.get(column).map(String::as_str).unwrap_or("")
    }

    /// Non-blank search drafts, as committed to the query state
    pub fn search_query(&self) -> SearchQuery {
        self.search
            .iter()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(column, text)| (column.clone(), text.clone()))
            .collect()
    }

    fn move_column(&mut self, forward: bool) {
        let len = self.config.columns.len();
        self.column = if forward {
            (self.column + 1) % len
        } else {
            (self.column + len - 1) % len
        };
    }

    fn move_row(&mut self, forward: bool) {
        let len = self.view.rows.len();
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = if forward {
            (current + 1).min(len - 1)
        } else {
            current.saturating_sub(1)
        };
        self.table_state.select(Some(next));
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Action {
        let column = self.selected_column().key.to_string();
        match key.code {
            KeyCode::Char(c) => {
                let text = self.search.entry(column.clone()).or_default();
                text.push(c);
                Action::SearchInput {
                    column,
                    text: text.clone(),
                }
            }
            KeyCode::Backspace => {
                let text = self.search.entry(column.clone()).or_default();
                text.pop();
                Action::SearchInput {
                    column,
                    text: text.clone(),
                }
            }
            KeyCode::Enter => {
                self.searching = false;
                Action::SearchCommitted {
                    screen: self.screen,
                    query: self.search_query(),
                }
            }
            KeyCode::Esc => {
                self.searching = false;
                Action::None
            }
            _ => Action::None,
        }
    }

    fn header_cell(&self, index: usize, column: &Column) -> Cell<'static> {
        let marker = match &self.view.sort {
            Some(sort) if sort.key == column.key => match sort.order {
                SortOrder::Asc => " ▲",
                SortOrder::Desc => " ▼",
            },
            _ => "",
        };
        let mut style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        if index == self.column {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        Cell::from(format!("{}{}", column.header, marker)).style(style)
    }

    fn title(&self) -> String {
        let pages = self
            .view
            .total
            .map(|total| self.view.pagination.total_pages(total).to_string())
            .unwrap_or_else(|| "?".to_string());
        format!(
            " {} · page {}/{} ",
            self.config.title, self.view.pagination.current_page, pages
        )
    }
}

impl ListTable {
    /// Two cards per line; the selected card is highlighted
    fn render_cards(&self, f: &mut Frame, rect: Rect, block: Block) {
        let inner = block.inner(rect);
        f.render_widget(block, rect);

        let lines = self.view.rows.len().div_ceil(2);
        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(CARD_HEIGHT); lines])
            .split(inner);
        let selected = self.table_state.selected();

        for (line, row_area) in row_areas.iter().enumerate() {
            let halves = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Fill(1), Constraint::Fill(1)])
                .split(*row_area);
            for (half, area) in halves.iter().enumerate() {
                let index = line * 2 + half;
                let Some(row) = self.view.rows.get(index) else {
                    continue;
                };
                let (title, rest) = match self.config.columns.split_first() {
                    Some((first, rest)) => (cell_text(row, first.key), rest),
                    None => (String::new(), &[][..]),
                };
                let body: Vec<Line> = rest
                    .iter()
                    .take(usize::from(CARD_HEIGHT.saturating_sub(2)))
                    .map(|column| Line::from(format!("{}: {}", column.header, cell_text(row, column.key))))
                    .collect();
                let color = if selected == Some(index) { Color::Cyan } else { Color::Gray };
                let card = Paragraph::new(body).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .title(format!(" {title} "))
                        .style(Style::default().fg(color)),
                );
                f.render_widget(card, *area);
            }
        }
    }
}

const CARD_HEIGHT: u16 = 5;

/// Display text of one payload cell
pub fn cell_text(row: &Value, key: &str) -> String {
    match row.get(key) {
        None | Some(Value::Null) => "—".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => (if *b { "yes" } else { "no" }).to_string(),
        Some(other) => other.to_string(),
    }
}

impl Component for ListTable {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.searching {
            return self.handle_search_key(key);
        }

        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.move_column(false);
                Action::None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.move_column(true);
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_row(false);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_row(true);
                Action::None
            }
            KeyCode::Char('s') => {
                let column = self.selected_column();
                if column.sortable {
                    Action::Sort(column.key.to_string())
                } else {
                    Action::None
                }
            }
            KeyCode::Char('/') => {
                if self.selected_column().searchable {
                    self.searching = true;
                }
                Action::None
            }
            KeyCode::Char('n') | KeyCode::PageDown => self
                .view
                .pagination
                .next_page(self.view.total)
                .map(Action::PageChange)
                .unwrap_or(Action::None),
            KeyCode::Char('p') | KeyCode::PageUp => self
                .view
                .pagination
                .previous_page()
                .map(Action::PageChange)
                .unwrap_or(Action::None),
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(self.title())
            .style(Style::default().fg(Color::White));

        if self.view.loading || self.view.rows.is_empty() {
            let text = if self.view.loading {
                LOADING_TEXT.to_string()
            } else {
                self.view.error.clone().unwrap_or_else(|| EMPTY_TEXT.to_string())
            };
            let color = if self.view.error.is_some() && !self.view.loading {
                Color::Red
            } else {
                Color::Gray
            };
            let message = Paragraph::new(Line::from(text))
                .alignment(Alignment::Center)
                .style(Style::default().fg(color))
                .block(block);
            f.render_widget(message, rect);
            return;
        }

        if self.config.layout == ScreenLayout::Cards {
            self.render_cards(f, rect, block);
            return;
        }

        let columns = self.config.columns;
        let header = Row::new(
            columns
                .iter()
                .enumerate()
                .map(|(index, column)| self.header_cell(index, column))
                .collect::<Vec<_>>(),
        );
        let rows = self.view.rows.iter().map(|row| {
            Row::new(
                columns
                    .iter()
                    .map(|column| Cell::from(cell_text(row, column.key)))
                    .collect::<Vec<_>>(),
            )
        });
        let widths = vec![Constraint::Fill(1); columns.len()];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

        f.render_stateful_widget(table, rect, &mut self.table_state);
    }
}

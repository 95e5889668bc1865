//! Search box and filter button above the table

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::common::create_input_paragraph;
use super::list_table::ListTable;
use crate::query::FilterCriteria;
use crate::ui::layout::LayoutManager;

pub struct Toolbar;

impl Toolbar {
    /// Label of the filter button, with the number of narrowing criteria
    #[must_use]
    pub fn filter_label(filters: &FilterCriteria) -> String {
        match filters.active_count() {
            0 => "Filter".to_string(),
            n => format!("Filter ({n})"),
        }
    }

    /// Render the toolbar and return where the filter button was drawn
    pub fn render(
        f: &mut Frame,
        area: Rect,
        table: &ListTable,
        filters: &FilterCriteria,
        filter_open: bool,
        has_filters: bool,
    ) -> Rect {
        let (search_area, button_area) = LayoutManager::toolbar_layout(area);

        let column = table.selected_column();
        let title = if column.searchable {
            format!("Search {}", column.header)
        } else {
            format!("{} (not searchable)", column.header)
        };
        let search = create_input_paragraph(table.search_text(column.key), &title, table.is_searching());
        f.render_widget(search, search_area);

        let color = if !has_filters {
            Color::DarkGray
        } else if filter_open || filters.active_count() > 0 {
            Color::Cyan
        } else {
            Color::White
        };
        let button = Paragraph::new(Self::filter_label(filters))
            .alignment(Alignment::Center)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .style(Style::default().fg(color)),
            );
        f.render_widget(button, button_area);

        button_area
    }
}

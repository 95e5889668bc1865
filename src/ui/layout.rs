//! Layout management and calculations

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Manages layout calculations and constraints for the UI
pub struct LayoutManager;

/// Areas of the main screen, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainAreas {
    pub tabs: Rect,
    pub toolbar: Rect,
    pub table: Rect,
    pub status: Rect,
}

impl LayoutManager {
    /// Split the screen into tab bar, toolbar (search + filter button), table and status line
    #[must_use]
    pub fn main_layout(area: Rect) -> MainAreas {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        MainAreas {
            tabs: chunks[0],
            toolbar: chunks[1],
            table: chunks[2],
            status: chunks[3],
        }
    }

    /// Split the toolbar into the search box and the filter button
    #[must_use]
    pub fn toolbar_layout(area: Rect) -> (Rect, Rect) {
        let button_width = std::cmp::min(16, area.width / 3);
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(button_width)])
            .split(area);
        (chunks[0], chunks[1])
    }

    /// Place a `width`×`height` popover against `anchor`.
    ///
    /// The popover opens below the anchor, left-aligned with it. It shifts
    /// left to stay inside `viewport`, and flips above the anchor when there is
    /// not enough room below. The result is always clipped to `viewport`.
    #[must_use]
    pub fn anchored_rect(anchor: Rect, viewport: Rect, width: u16, height: u16) -> Rect {
        let width = width.min(viewport.width);
        let height = height.min(viewport.height);

        let max_x = viewport.right().saturating_sub(width);
        let x = anchor.x.clamp(viewport.x, max_x.max(viewport.x));

        let room_below = viewport.bottom().saturating_sub(anchor.bottom());
        let room_above = anchor.y.saturating_sub(viewport.y);
        let y = if room_below >= height {
            anchor.bottom()
        } else if room_above >= height {
            anchor.y - height
        } else {
            viewport.bottom().saturating_sub(height).max(viewport.y)
        };

        Rect::new(x, y, width, height)
    }

    /// Whether the terminal cell at (`column`, `row`) lies inside `rect`
    #[must_use]
    pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
        column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
    }

    /// Calculate a centered rectangle within the given area
    #[must_use]
    pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}

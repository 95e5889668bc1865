//! Filter popover anchored to the screen's filter button.
//!
//! Lifecycle: `Closed → Open → (apply | clear | dismiss) → Closed`. While
//! open, the popover edits a local draft; only `apply` and `clear` touch the
//! shared query state, through the action they return. A mouse press outside
//! both the popover and its date picker dismisses without applying.

use super::common::{create_dialog_block, create_instructions_paragraph, shortcuts};
use crate::constants::{
    DEFAULT_MILES_RANGE, DEFAULT_SCORE_RANGE, FILTER_POPOVER_WIDTH, MILES_STEP, SCORE_STEP,
};
use crate::query::{FilterCriteria, FilterPatch};
use crate::screens::FilterFields;
use crate::ui::core::{Action, Component};
use crate::ui::layout::LayoutManager;
use chrono::{Datelike, Duration, Months, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

const DATE_PICKER_WIDTH: u16 = 24;
const DATE_PICKER_HEIGHT: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    From,
    To,
}

/// One focusable line of the popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterItem {
    Date(DateField),
    ScoreLow,
    ScoreHigh,
    MilesLow,
    MilesHigh,
    Completed,
    InProgress,
    Truncate,
    Policy(usize),
    Contract(usize),
    Status(usize),
}

/// Nested calendar opened from a date item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatePicker {
    pub field: DateField,
    pub cursor: NaiveDate,
    pub area: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    Open { area: Rect },
}

pub struct FilterDialog {
    fields: FilterFields,
    state: DialogState,
    draft: FilterCriteria,
    items: Vec<FilterItem>,
    focus: usize,
    picker: Option<DatePicker>,
    viewport: Rect,
}

impl FilterDialog {
    pub fn new(fields: FilterFields) -> Self {
        Self {
            fields,
            state: DialogState::Closed,
            draft: FilterCriteria::default(),
            items: items_for(&fields),
            focus: 0,
            picker: None,
            viewport: Rect::default(),
        }
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, DialogState::Open { .. })
    }

    pub fn area(&self) -> Option<Rect> {
        match self.state {
            DialogState::Open { area } => Some(area),
            DialogState::Closed => None,
        }
    }

    pub fn picker(&self) -> Option<&DatePicker> {
        self.picker.as_ref()
    }

    pub fn items(&self) -> &[FilterItem] {
        &self.items
    }

    pub fn focused(&self) -> Option<FilterItem> {
        self.items.get(self.focus).copied()
    }

    pub fn draft(&self) -> &FilterCriteria {
        &self.draft
    }

    /// Direct access to the draft, as a slider drag would have
    pub fn draft_mut(&mut self) -> &mut FilterCriteria {
        &mut self.draft
    }

    /// Popover height for the current item list: items plus borders, spacer and instructions
    pub fn height(&self) -> u16 {
        u16::try_from(self.items.len()).unwrap_or(u16::MAX).saturating_add(4)
    }

    /// Open below `anchor`, seeding the draft from the shared criteria
    pub fn open(&mut self, anchor: Rect, viewport: Rect, current: &FilterCriteria) {
        let area = LayoutManager::anchored_rect(anchor, viewport, FILTER_POPOVER_WIDTH, self.height());
        self.state = DialogState::Open { area };
        self.viewport = viewport;
        self.draft = current.clone();
        self.focus = 0;
        self.picker = None;
    }

    /// Commit the draft and close
    pub fn apply(&mut self) -> Action {
        if !self.is_open() {
            return Action::None;
        }
        let patch = FilterPatch::replace_all(&self.draft);
        self.close();
        Action::FilterApplied(patch)
    }

    /// Reset the draft to defaults and close; the caller clears shared state and refetches
    pub fn clear(&mut self) -> Action {
        if !self.is_open() {
            return Action::None;
        }
        self.draft = FilterCriteria::default();
        self.close();
        Action::FilterCleared
    }

    /// Close without applying
    pub fn dismiss(&mut self) -> Action {
        if !self.is_open() {
            return Action::None;
        }
        self.close();
        Action::FilterDismissed
    }

    fn close(&mut self) {
        self.state = DialogState::Closed;
        self.picker = None;
    }

    fn item_row(&self, index: usize) -> Option<Rect> {
        let area = self.area()?;
        let offset = u16::try_from(index).ok()?.saturating_add(1);
        Some(Rect::new(area.x, area.y.saturating_add(offset), area.width, 1))
    }

    /// Open the calendar for `field`, placed beside the popover
    pub fn open_date_picker(&mut self, field: DateField) {
        let Some(index) = self.items.iter().position(|item| *item == FilterItem::Date(field)) else {
            return;
        };
        let (Some(area), Some(row)) = (self.area(), self.item_row(index)) else {
            return;
        };

        let anchor = Rect::new(area.right(), row.y, 1, 1);
        let picker_area = LayoutManager::anchored_rect(anchor, self.viewport, DATE_PICKER_WIDTH, DATE_PICKER_HEIGHT);
        let cursor = self
            .date(field)
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        self.focus = index;
        self.picker = Some(DatePicker {
            field,
            cursor,
            area: picker_area,
        });
    }

    fn date(&self, field: DateField) -> Option<NaiveDate> {
        match field {
            DateField::From => self.draft.from_date,
            DateField::To => self.draft.to_date,
        }
    }

    fn set_date(&mut self, field: DateField, date: Option<NaiveDate>) {
        match field {
            DateField::From => self.draft.from_date = date,
            DateField::To => self.draft.to_date = date,
        }
    }

    fn move_focus(&mut self, forward: bool) {
        if self.items.is_empty() {
            return;
        }
        let len = self.items.len();
        self.focus = if forward {
            (self.focus + 1) % len
        } else {
            (self.focus + len - 1) % len
        };
    }

    /// Move the focused slider handle by `steps`
    fn adjust(&mut self, steps: i64) {
        let Some(item) = self.focused() else {
            return;
        };
        let [score_low, score_high] = self.draft.score_range;
        let [miles_low, miles_high] = self.draft.miles_range;
        match item {
            FilterItem::ScoreLow => {
                self.draft.score_range[0] = step(score_low, steps, SCORE_STEP, DEFAULT_SCORE_RANGE[0], score_high);
            }
            FilterItem::ScoreHigh => {
                self.draft.score_range[1] = step(score_high, steps, SCORE_STEP, score_low, DEFAULT_SCORE_RANGE[1]);
            }
            FilterItem::MilesLow => {
                self.draft.miles_range[0] = step(miles_low, steps, MILES_STEP, DEFAULT_MILES_RANGE[0], miles_high);
            }
            FilterItem::MilesHigh => {
                self.draft.miles_range[1] = step(miles_high, steps, MILES_STEP, miles_low, DEFAULT_MILES_RANGE[1]);
            }
            _ => {}
        }
    }

    /// Toggle the focused checkbox
    fn toggle(&mut self) {
        let Some(item) = self.focused() else {
            return;
        };
        match item {
            FilterItem::Completed => self.draft.completed = toggled(self.draft.completed),
            FilterItem::InProgress => self.draft.in_progress = toggled(self.draft.in_progress),
            FilterItem::Truncate => self.draft.is_truncate = toggled(self.draft.is_truncate),
            FilterItem::Policy(i) => toggle_flag(&mut self.draft.policy_status, self.fields.policy_status[i]),
            FilterItem::Contract(i) => toggle_flag(&mut self.draft.contract_status, self.fields.contract_status[i]),
            FilterItem::Status(i) => toggle_flag(&mut self.draft.status, self.fields.status[i]),
            FilterItem::Date(field) => self.open_date_picker(field),
            _ => {}
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent) -> Action {
        let Some(picker) = self.picker.as_mut() else {
            return Action::None;
        };
        let cursor = picker.cursor;
        match key.code {
            KeyCode::Left => picker.cursor = cursor - Duration::days(1),
            KeyCode::Right => picker.cursor = cursor + Duration::days(1),
            KeyCode::Up => picker.cursor = cursor - Duration::days(7),
            KeyCode::Down => picker.cursor = cursor + Duration::days(7),
            KeyCode::PageUp => picker.cursor = cursor.checked_sub_months(Months::new(1)).unwrap_or(cursor),
            KeyCode::PageDown => picker.cursor = cursor.checked_add_months(Months::new(1)).unwrap_or(cursor),
            KeyCode::Enter => {
                let field = picker.field;
                self.picker = None;
                self.set_date(field, Some(cursor));
            }
            KeyCode::Esc => self.picker = None,
            _ => {}
        }
        Action::None
    }

    fn render_item(&self, item: FilterItem, focused: bool) -> Line<'static> {
        let (label, value) = match item {
            FilterItem::Date(field) => (
                if field == DateField::From { "From date" } else { "To date" },
                self.date(field)
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "—".to_string()),
            ),
            FilterItem::ScoreLow => ("Score min", format!("◀ {} ▶", self.draft.score_range[0])),
            FilterItem::ScoreHigh => ("Score max", format!("◀ {} ▶", self.draft.score_range[1])),
            FilterItem::MilesLow => ("Miles min", format!("◀ {} ▶", self.draft.miles_range[0])),
            FilterItem::MilesHigh => ("Miles max", format!("◀ {} ▶", self.draft.miles_range[1])),
            FilterItem::Completed => ("Completed", checkbox(self.draft.completed == Some(true))),
            FilterItem::InProgress => ("In progress", checkbox(self.draft.in_progress == Some(true))),
            FilterItem::Truncate => ("Truncated", checkbox(self.draft.is_truncate == Some(true))),
            FilterItem::Policy(i) => (
                self.fields.policy_status[i],
                checkbox(flag(&self.draft.policy_status, self.fields.policy_status[i])),
            ),
            FilterItem::Contract(i) => (
                self.fields.contract_status[i],
                checkbox(flag(&self.draft.contract_status, self.fields.contract_status[i])),
            ),
            FilterItem::Status(i) => (
                self.fields.status[i],
                checkbox(flag(&self.draft.status, self.fields.status[i])),
            ),
        };

        let style = if focused {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::White)
        };
        Line::from(vec![
            Span::styled(format!(" {:<14}", label), style.add_modifier(Modifier::BOLD)),
            Span::styled(format!(" {}", value), style),
        ])
    }

    fn render_picker(&self, f: &mut Frame, picker: &DatePicker) {
        let first = picker.cursor.with_day(1).unwrap_or(picker.cursor);
        let offset = first.weekday().num_days_from_monday();
        let mut lines = vec![Line::from(" Mo Tu We Th Fr Sa Su")];

        let mut week = vec![Span::raw("   ".repeat(offset as usize))];
        let mut day = first;
        while day.month() == first.month() {
            let style = if day == picker.cursor {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            };
            week.push(Span::styled(format!("{:>3}", day.day()), style));
            if day.weekday().num_days_from_monday() == 6 {
                lines.push(Line::from(std::mem::take(&mut week)));
            }
            day = day + Duration::days(1);
        }
        if !week.is_empty() {
            lines.push(Line::from(week));
        }

        let title = format!(" {} ", first.format("%B %Y"));
        f.render_widget(Clear, picker.area);
        f.render_widget(
            Paragraph::new(lines).block(create_dialog_block(&title, Color::Magenta)),
            picker.area,
        );
    }
}

impl Component for FilterDialog {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if !self.is_open() {
            return Action::None;
        }
        if self.picker.is_some() {
            return self.handle_picker_key(key);
        }

        match key.code {
            KeyCode::Esc => self.dismiss(),
            KeyCode::Enter => match self.focused() {
                Some(FilterItem::Date(field)) => {
                    self.open_date_picker(field);
                    Action::None
                }
                _ => self.apply(),
            },
            KeyCode::Char('a') => self.apply(),
            KeyCode::Char('c') => self.clear(),
            KeyCode::Up | KeyCode::BackTab => {
                self.move_focus(false);
                Action::None
            }
            KeyCode::Down | KeyCode::Tab => {
                self.move_focus(true);
                Action::None
            }
            KeyCode::Left => {
                self.adjust(-1);
                Action::None
            }
            KeyCode::Right => {
                self.adjust(1);
                Action::None
            }
            KeyCode::Char(' ') => {
                self.toggle();
                Action::None
            }
            KeyCode::Backspace | KeyCode::Delete | KeyCode::Char('x') => {
                if let Some(FilterItem::Date(field)) = self.focused() {
                    self.set_date(field, None);
                }
                Action::None
            }
            _ => Action::None,
        }
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Action {
        let Some(area) = self.area() else {
            return Action::None;
        };
        if !matches!(mouse.kind, MouseEventKind::Down(_)) {
            return Action::None;
        }

        let (column, row) = (mouse.column, mouse.row);
        if let Some(picker) = &self.picker {
            if LayoutManager::contains(picker.area, column, row) {
                return Action::None;
            }
        }
        if !LayoutManager::contains(area, column, row) {
            return self.dismiss();
        }

        // Click on an item focuses it; clicking a checkbox also toggles it
        let index = usize::from(row.saturating_sub(area.y)).checked_sub(1);
        if let Some(index) = index.filter(|i| *i < self.items.len()) {
            self.picker = None;
            self.focus = index;
            if !matches!(
                self.items[index],
                FilterItem::ScoreLow | FilterItem::ScoreHigh | FilterItem::MilesLow | FilterItem::MilesHigh
            ) {
                self.toggle();
            }
        }
        Action::None
    }

    fn render(&mut self, f: &mut Frame, _rect: Rect) {
        let Some(area) = self.area() else {
            return;
        };

        f.render_widget(Clear, area);
        f.render_widget(create_dialog_block(" Filters ", Color::Cyan), area);

        for (index, item) in self.items.iter().enumerate() {
            if let Some(row) = self.item_row(index) {
                let inner = Rect::new(row.x + 1, row.y, row.width.saturating_sub(2), 1);
                f.render_widget(Paragraph::new(self.render_item(*item, index == self.focus)), inner);
            }
        }

        let instructions = create_instructions_paragraph(&[
            shortcuts::ENTER_APPLY,
            shortcuts::SEPARATOR,
            shortcuts::CLEAR,
            shortcuts::SEPARATOR,
            shortcuts::ESC_CANCEL,
        ]);
        let bottom = Rect::new(area.x + 1, area.bottom().saturating_sub(2), area.width.saturating_sub(2), 1);
        f.render_widget(instructions, bottom);

        if let Some(picker) = self.picker {
            self.render_picker(f, &picker);
        }
    }
}

fn items_for(fields: &FilterFields) -> Vec<FilterItem> {
    let mut items = Vec::new();
    if fields.dates {
        items.push(FilterItem::Date(DateField::From));
        items.push(FilterItem::Date(DateField::To));
    }
    if fields.score_range {
        items.push(FilterItem::ScoreLow);
        items.push(FilterItem::ScoreHigh);
    }
    if fields.miles_range {
        items.push(FilterItem::MilesLow);
        items.push(FilterItem::MilesHigh);
    }
    if fields.trip_state {
        items.push(FilterItem::Completed);
        items.push(FilterItem::InProgress);
    }
    if fields.truncate {
        items.push(FilterItem::Truncate);
    }
    items.extend((0..fields.policy_status.len()).map(FilterItem::Policy));
    items.extend((0..fields.contract_status.len()).map(FilterItem::Contract));
    items.extend((0..fields.status.len()).map(FilterItem::Status));
    items
}

fn step(value: u32, steps: i64, size: u32, min: u32, max: u32) -> u32 {
    let moved = i64::from(value) + steps * i64::from(size);
    let clamped = moved.clamp(i64::from(min), i64::from(max.max(min)));
    u32::try_from(clamped).unwrap_or(min)
}

// Unchecked boxes mean "no filter", so they unset rather than send false
fn toggled(value: Option<bool>) -> Option<bool> {
    match value {
        Some(true) => None,
        _ => Some(true),
    }
}

fn toggle_flag(flags: &mut std::collections::BTreeMap<String, bool>, key: &str) {
    if flags.get(key).copied().unwrap_or(false) {
        flags.remove(key);
    } else {
        flags.insert(key.to_string(), true);
    }
}

fn flag(flags: &std::collections::BTreeMap<String, bool>, key: &str) -> bool {
    flags.get(key).copied().unwrap_or(false)
}

fn checkbox(checked: bool) -> String {
    let mark = if checked { "[x]" } else { "[ ]" };
    mark.to_string()
}

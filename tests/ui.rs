use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fleetdash::api::ApiClient;
use fleetdash::auth::SessionStore;
use fleetdash::config::Config;
use fleetdash::constants::ERROR_NOT_AUTHENTICATED;
use fleetdash::notifications::{ToastLevel, Toasts};
use fleetdash::query::{FilterCriteria, FilterPatch, FilterStore, Pagination, QueryAction, SearchQuery, SortOrder};
use fleetdash::screens::ListScreen;
use fleetdash::ui::components::{cell_text, ListTable, StatusBar, TableView, Toolbar};
use fleetdash::ui::core::{Action, AppContext, Component, EventType};
use fleetdash::ui::App;
use ratatui::style::Color;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn signed_out_app() -> App {
    let session = SessionStore::in_memory();
    let client = ApiClient::new("http://127.0.0.1:9/", Arc::new(session)).unwrap();
    App::new(AppContext::new(Config::default(), client, FilterStore::new()))
}

#[test]
fn test_cell_text() {
    let row = json!({"vin": "1HG", "year": 2020, "active": true, "fleet": null});
    assert_eq!(cell_text(&row, "vin"), "1HG");
    assert_eq!(cell_text(&row, "year"), "2020");
    assert_eq!(cell_text(&row, "active"), "yes");
    assert_eq!(cell_text(&row, "fleet"), "—");
    assert_eq!(cell_text(&row, "missing"), "—");
}

#[test]
fn test_sort_key_only_on_sortable_columns() {
    let mut table = ListTable::new(ListScreen::Vehicles);
    assert_eq!(table.handle_key_events(key(KeyCode::Char('s'))), Action::Sort("vin".to_string()));

    // Plate is not sortable
    for _ in 0..4 {
        table.handle_key_events(key(KeyCode::Char('l')));
    }
    assert_eq!(table.selected_column().key, "plateNumber");
    assert_eq!(table.handle_key_events(key(KeyCode::Char('s'))), Action::None);
}

#[test]
fn test_search_typing_and_commit() {
    let mut table = ListTable::new(ListScreen::Devices);
    table.handle_key_events(key(KeyCode::Char('/')));
    assert!(table.is_searching());

    assert_eq!(
        table.handle_key_events(key(KeyCode::Char('3'))),
        Action::SearchInput {
            column: "imei".to_string(),
            text: "3".to_string()
        }
    );
    table.handle_key_events(key(KeyCode::Char('5')));
    table.handle_key_events(key(KeyCode::Char('9')));
    table.handle_key_events(key(KeyCode::Backspace));

    let mut expected = SearchQuery::new();
    expected.insert("imei".to_string(), "35".to_string());
    assert_eq!(
        table.handle_key_events(key(KeyCode::Enter)),
        Action::SearchCommitted {
            screen: ListScreen::Devices,
            query: expected
        }
    );
    assert!(!table.is_searching());
}

#[test]
fn test_search_refused_on_unsearchable_column() {
    let mut table = ListTable::new(ListScreen::Devices);
    table.handle_key_events(key(KeyCode::Char('l')));
    assert_eq!(table.selected_column().key, "deviceType");

    table.handle_key_events(key(KeyCode::Char('/')));
    assert!(!table.is_searching());
}

#[test]
fn test_paging_keys_respect_bounds() {
    let mut table = ListTable::new(ListScreen::Vehicles);
    table.set_view(TableView {
        rows: vec![json!({"vin": "A"})],
        total: Some(25),
        pagination: Pagination::new(10),
        ..TableView::default()
    });

    assert_eq!(table.handle_key_events(key(KeyCode::Char('p'))), Action::None);
    assert_eq!(table.handle_key_events(key(KeyCode::Char('n'))), Action::PageChange(2));

    let mut last = Pagination::new(10);
    last.go_to(3);
    table.set_view(TableView {
        rows: vec![json!({"vin": "A"})],
        total: Some(25),
        pagination: last,
        ..TableView::default()
    });
    assert_eq!(table.handle_key_events(key(KeyCode::PageDown)), Action::None);
    assert_eq!(table.handle_key_events(key(KeyCode::PageUp)), Action::PageChange(2));
}

#[test]
fn test_status_line_prefers_fresh_toast() {
    let toasts = Toasts::new();
    let (text, color) = StatusBar::status_line(&toasts, true);
    assert_eq!(text, "Loading...");
    assert_eq!(color, Color::Yellow);

    toasts.error("Fleet not found");
    let (text, color) = StatusBar::status_line(&toasts, true);
    assert_eq!(text, "Fleet not found");
    assert_eq!(color, Color::Red);
}

#[test]
fn test_filter_button_label_counts_active_filters() {
    let mut filters = FilterCriteria::default();
    assert_eq!(Toolbar::filter_label(&filters), "Filter");

    filters.score_range = [40, 90];
    filters.from_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1);
    assert_eq!(Toolbar::filter_label(&filters), "Filter (2)");
}

#[tokio::test]
async fn test_sort_clicks_cycle_through_store() {
    let mut app = signed_out_app();

    app.update(Action::Sort("vin".to_string()));
    let sort = app.query_state().sort.unwrap();
    assert_eq!((sort.key.as_str(), sort.order), ("vin", SortOrder::Asc));

    app.update(Action::Sort("vin".to_string()));
    assert_eq!(app.query_state().sort.unwrap().order, SortOrder::Desc);
}

#[tokio::test]
async fn test_filters_reset_page_and_screen_switch_forgets_state() {
    let mut app = signed_out_app();

    app.update(Action::PageChange(3));
    assert_eq!(app.query_state().page(), 3);

    app.update(Action::FilterApplied(FilterPatch::default().score_range([40, 90])));
    assert_eq!(app.query_state().page(), 1);

    app.update(Action::SwitchScreen(ListScreen::Drivers));
    assert_eq!(app.screen, ListScreen::Drivers);
    assert!(!app.ctx.store.contains(ListScreen::Vehicles));
}

#[tokio::test]
async fn test_trip_filters_persist_across_screens() {
    let mut app = signed_out_app();
    app.update(Action::SwitchScreen(ListScreen::Trips));
    app.update(Action::FilterApplied(FilterPatch::default().miles_range([0, 500])));

    app.update(Action::NextScreen);
    app.update(Action::PreviousScreen);

    assert_eq!(app.screen, ListScreen::Trips);
    assert_eq!(app.query_state().filters.miles_range, [0, 500]);
}

#[tokio::test]
async fn test_search_commit_for_other_screen_is_ignored() {
    let mut app = signed_out_app();
    let mut query = SearchQuery::new();
    query.insert("imei".to_string(), "3517".to_string());

    app.update(Action::SearchCommitted {
        screen: ListScreen::Devices,
        query,
    });

    assert!(app.query_state().search.is_empty());
    assert!(!app.ctx.store.contains(ListScreen::Devices));
}

#[tokio::test]
async fn test_failed_fetch_reaches_table_and_toasts() {
    let mut app = signed_out_app();
    app.update(Action::Refresh);

    for _ in 0..100 {
        if app.fetcher.last_error().is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    app.drain_actions();
    app.refresh_view();

    assert!(!app.table.view().loading);
    assert_eq!(app.table.view().error.as_deref(), Some(ERROR_NOT_AUTHENTICATED));
    let toast = app.ctx.toasts.latest().unwrap();
    assert_eq!(toast.level, ToastLevel::Error);
}

#[tokio::test]
async fn test_keys_route_to_open_popover() {
    let mut app = signed_out_app();
    app.viewport = ratatui::layout::Rect::new(0, 0, 120, 40);
    app.filter_button = ratatui::layout::Rect::new(100, 1, 16, 3);

    app.handle_event(EventType::Key(key(KeyCode::Char('f'))));
    assert!(app.filter.is_open());

    // 'q' inside the popover does not quit
    app.handle_event(EventType::Key(key(KeyCode::Char('q'))));
    assert!(!app.should_quit);

    app.handle_event(EventType::Key(key(KeyCode::Esc)));
    assert!(!app.filter.is_open());
    assert!(app.ctx.store.snapshot(ListScreen::Vehicles, 10).filters.is_default());

    app.handle_event(EventType::Key(key(KeyCode::Char('q'))));
    assert!(app.should_quit);
}

#[tokio::test]
async fn test_clear_action_resets_store() {
    let mut app = signed_out_app();
    app.update(Action::FilterApplied(FilterPatch::default().score_range([10, 20])));

    app.update(Action::FilterCleared);

    let state = app.ctx.store.snapshot(ListScreen::Vehicles, 10);
    assert!(state.filters.is_default());
    // Clearing twice is harmless
    let again = app.ctx.store.dispatch(ListScreen::Vehicles, 10, QueryAction::ClearFilterCriteria);
    assert_eq!(state, again);
}

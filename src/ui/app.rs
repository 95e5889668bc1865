//! Application state and action handling.

use super::components::{FilterDialog, ListTable, TableView};
use super::core::{Action, AppContext, Component, EventType};
use super::layout::LayoutManager;
use crate::debounce::Debouncer;
use crate::orchestrator::{FetchOutcome, ListFetcher};
use crate::query::{QueryAction, QueryState, SearchQuery, SortSpec};
use crate::screens::ListScreen;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::sync::mpsc;

type SearchDebouncer = Debouncer<(ListScreen, SearchQuery)>;

pub struct App {
    pub ctx: AppContext,
    pub screen: ListScreen,
    pub fetcher: ListFetcher,
    pub table: ListTable,
    pub filter: FilterDialog,
    pub show_help: bool,
    pub should_quit: bool,
    /// Where the filter button was last drawn; the popover anchors to it
    pub filter_button: Rect,
    pub viewport: Rect,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    search_debouncer: SearchDebouncer,
}

impl App {
    /// Create the app on the first screen. Must be called inside a Tokio runtime.
    pub fn new(ctx: AppContext) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let debounce_tx = action_tx.clone();
        let (search_debouncer, _) = Debouncer::spawn(
            Duration::from_millis(ctx.config.search.debounce_ms),
            move |(screen, query): (ListScreen, SearchQuery)| {
                let tx = debounce_tx.clone();
                async move {
                    let _ = tx.send(Action::SearchCommitted { screen, query });
                }
            },
        );

        let screen = ListScreen::Vehicles;
        let fetcher = ListFetcher::for_screen(ctx.client.clone(), screen, &ctx.config, ctx.toasts.clone());

        Self {
            screen,
            fetcher,
            table: ListTable::new(screen),
            filter: FilterDialog::new(screen.config().filters),
            show_help: false,
            should_quit: false,
            filter_button: Rect::default(),
            viewport: Rect::default(),
            ctx,
            action_tx,
            action_rx,
            search_debouncer,
        }
    }

    fn items_per_page(&self) -> u32 {
        self.screen.items_per_page(&self.ctx.config)
    }

    /// Snapshot of the current screen's query state
    pub fn query_state(&self) -> QueryState {
        self.ctx.store.snapshot(self.screen, self.items_per_page())
    }

    fn dispatch(&self, action: QueryAction) -> QueryState {
        self.ctx.store.dispatch(self.screen, self.items_per_page(), action)
    }

    /// Fixed parameters some endpoints need in the body
    fn extra_params(&self) -> Value {
        match self.screen {
            ListScreen::VideoHistory => json!({ "lonestarId": self.ctx.config.api.lonestar_id }),
            _ => json!({}),
        }
    }

    /// Fetch the page `state` points at in the background
    pub fn spawn_fetch(&self, state: QueryState) {
        let fetcher = self.fetcher.clone();
        let extra = self.extra_params();
        let tx = self.action_tx.clone();
        let screen = self.screen;

        tokio::spawn(async move {
            let outcome = fetcher.fetch(state.page(), &extra, &state).await;
            let _ = tx.send(Action::FetchSettled { screen, outcome });
        });
    }

    /// Load the current screen with its stored state
    pub fn load_screen(&mut self) {
        let state = self.query_state();
        self.table.set_search(state.search.clone());
        self.spawn_fetch(state);
    }

    fn switch_screen(&mut self, screen: ListScreen) {
        if screen == self.screen {
            return;
        }
        self.ctx.store.leave(self.screen);
        log::info!("Switching screen {} -> {}", self.screen, screen);

        self.screen = screen;
        self.fetcher = ListFetcher::for_screen(
            self.ctx.client.clone(),
            screen,
            &self.ctx.config,
            self.ctx.toasts.clone(),
        );
        self.table = ListTable::new(screen);
        self.filter = FilterDialog::new(screen.config().filters);
        self.load_screen();
    }

    /// Apply an action, possibly producing follow-up work
    pub fn update(&mut self, action: Action) {
        match action {
            Action::SwitchScreen(screen) => self.switch_screen(screen),
            Action::NextScreen => self.switch_screen(self.screen.next()),
            Action::PreviousScreen => self.switch_screen(self.screen.previous()),
            Action::Sort(key) => {
                let current = self.query_state();
                let spec = SortSpec::after_click(current.sort.as_ref(), &key);
                let state = self.dispatch(QueryAction::SetSort {
                    key: spec.key,
                    order: spec.order,
                });
                self.spawn_fetch(state);
            }
            Action::SearchInput { .. } => {
                if self.screen.config().debounced_search {
                    self.search_debouncer.send((self.screen, self.table.search_query()));
                }
            }
            Action::SearchCommitted { screen, query } => {
                if screen != self.screen {
                    return;
                }
                // A debounced commit can land after Enter already committed the same text
                if self.query_state().search == query {
                    return;
                }
                let state = self.dispatch(QueryAction::SetSearch(query));
                self.spawn_fetch(state);
            }
            Action::PageChange(page) => {
                let state = self.dispatch(QueryAction::SetPage(page));
                self.spawn_fetch(state);
            }
            Action::Refresh => self.spawn_fetch(self.query_state()),
            Action::OpenFilter => {
                if self.screen.config().filters.is_empty() {
                    self.ctx.toasts.info(format!("{} has no filters", self.screen));
                    return;
                }
                let current = self.query_state().filters;
                self.filter.open(self.filter_button, self.viewport, &current);
            }
            Action::FilterApplied(patch) => {
                let state = self.dispatch(QueryAction::SetFilterCriteria(patch));
                self.spawn_fetch(state);
            }
            Action::FilterCleared => {
                let state = self.dispatch(QueryAction::ClearFilterCriteria);
                self.spawn_fetch(state);
            }
            Action::FilterDismissed => {}
            Action::FetchSettled { screen, outcome } => {
                if screen != self.screen {
                    return;
                }
                if let FetchOutcome::Failed(message) = outcome {
                    log::debug!("{} fetch failed: {}", screen, message);
                }
            }
            Action::ShowHelp(show) => self.show_help = show,
            Action::Quit => self.should_quit = true,
            Action::None => {}
        }
    }

    /// Apply every action that background tasks have sent since the last call
    pub fn drain_actions(&mut self) {
        while let Ok(action) = self.action_rx.try_recv() {
            self.update(action);
        }
    }

    pub fn handle_event(&mut self, event: EventType) {
        let action = match event {
            EventType::Key(key) => self.handle_key(key),
            EventType::Mouse(mouse) => self.handle_mouse(mouse),
            EventType::Resize(..) | EventType::Tick | EventType::Other => Action::None,
        };
        self.update(action);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }
        if self.show_help {
            return Action::ShowHelp(false);
        }
        if self.filter.is_open() {
            return self.filter.handle_key_events(key);
        }
        if self.table.is_searching() {
            return self.table.handle_key_events(key);
        }

        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Tab => Action::NextScreen,
            KeyCode::BackTab => Action::PreviousScreen,
            KeyCode::Char('f') => Action::OpenFilter,
            KeyCode::Char('r') => Action::Refresh,
            KeyCode::Char('?') => Action::ShowHelp(true),
            KeyCode::Char(c @ '1'..='8') => {
                let index = c as usize - '1' as usize;
                Action::SwitchScreen(ListScreen::ALL[index])
            }
            _ => self.table.handle_key_events(key),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Action {
        if self.filter.is_open() {
            return self.filter.handle_mouse_events(mouse);
        }
        if matches!(mouse.kind, MouseEventKind::Down(_))
            && LayoutManager::contains(self.filter_button, mouse.column, mouse.row)
        {
            return Action::OpenFilter;
        }
        Action::None
    }

    /// Copy the fetcher's slot and the stored state into the table before drawing
    pub fn refresh_view(&mut self) {
        let state = self.query_state();
        self.table.set_view(TableView {
            rows: self.fetcher.rows(),
            loading: self.fetcher.loading(),
            total: self.fetcher.total(),
            pagination: state.pagination,
            sort: state.sort,
            error: self.fetcher.last_error(),
        });
    }
}

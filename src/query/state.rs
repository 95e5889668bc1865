use super::filters::{FilterCriteria, FilterPatch};
use super::pagination::Pagination;
use super::sort::{SortOrder, SortSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Column key → search text, forwarded verbatim as extra filter parameters.
pub type SearchQuery = BTreeMap<String, String>;

/// Everything that shapes the next fetch of one list screen.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryState {
    pub pagination: Pagination,
    pub sort: Option<SortSpec>,
    pub search: SearchQuery,
    pub filters: FilterCriteria,
}

/// State transitions of a [`QueryState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryAction {
    SetFilterCriteria(FilterPatch),
    ClearFilterCriteria,
    SetSort { key: String, order: SortOrder },
    ClearSort,
    SetSearch(SearchQuery),
    SetPage(u32),
}

/// Pure reducer: the state after applying `action` to `state`.
///
/// Filter and search changes always land on page 1 so a stale page number
/// never outlives the result set it belonged to.
pub fn reduce(state: &QueryState, action: QueryAction) -> QueryState {
    let mut next = state.clone();
    match action {
        QueryAction::SetFilterCriteria(patch) => {
            next.filters.merge(patch);
            next.pagination.reset();
        }
        QueryAction::ClearFilterCriteria => {
            next.filters = FilterCriteria::default();
            next.pagination.reset();
        }
        QueryAction::SetSort { key, order } => {
            next.sort = Some(SortSpec::new(key, order));
        }
        QueryAction::ClearSort => {
            next.sort = None;
        }
        QueryAction::SetSearch(queries) => {
            next.search = queries;
            next.pagination.reset();
        }
        QueryAction::SetPage(page) => {
            next.pagination.go_to(page);
        }
    }
    next
}

impl QueryState {
    pub fn new(items_per_page: u32) -> Self {
        Self {
            pagination: Pagination::new(items_per_page),
            ..Self::default()
        }
    }

    pub fn page(&self) -> u32 {
        self.pagination.current_page
    }

    /// Apply `action` in place
    pub fn apply(&mut self, action: QueryAction) {
        *self = reduce(self, action);
    }

    pub fn set_filter_criteria(&mut self, patch: FilterPatch) {
        self.apply(QueryAction::SetFilterCriteria(patch));
    }

    pub fn clear_filter_criteria(&mut self) {
        self.apply(QueryAction::ClearFilterCriteria);
    }

    pub fn set_sort(&mut self, key: impl Into<String>, order: SortOrder) {
        self.apply(QueryAction::SetSort { key: key.into(), order });
    }

    pub fn set_search(&mut self, queries: SearchQuery) {
        self.apply(QueryAction::SetSearch(queries));
    }

    pub fn set_page(&mut self, page: u32) {
        self.apply(QueryAction::SetPage(page));
    }
}

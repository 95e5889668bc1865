use crate::orchestrator::FetchOutcome;
use crate::query::{FilterPatch, SearchQuery};
use crate::screens::ListScreen;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Navigation
    SwitchScreen(ListScreen),
    NextScreen,
    PreviousScreen,

    // Table events
    Sort(String), // Column key
    SearchInput {
        column: String,
        text: String,
    },
    SearchCommitted {
        screen: ListScreen,
        query: SearchQuery,
    },
    PageChange(u32),
    Refresh,

    // Filter popover
    OpenFilter,
    FilterApplied(FilterPatch),
    FilterCleared,
    FilterDismissed,

    // Fetch results
    FetchSettled {
        screen: ListScreen,
        outcome: FetchOutcome,
    },

    // UI operations
    ShowHelp(bool),

    // App control
    Quit,
    None,
}

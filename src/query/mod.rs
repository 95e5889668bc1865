//! Query state for list screens.
//!
//! Everything that shapes the next list fetch lives here: filter criteria,
//! the single active sort, the search map and the current page. State changes
//! go through pure reducer functions ([`state::reduce`]) so they can be tested
//! without any rendering, and [`request::build_list_body`] turns a state
//! snapshot into the outgoing request body.

pub mod filters;
pub mod pagination;
pub mod request;
pub mod sort;
pub mod state;
pub mod store;

pub use filters::{FilterCriteria, FilterPatch};
pub use pagination::Pagination;
pub use request::{build_list_body, RequestShape};
pub use sort::{SortOrder, SortSpec};
pub use state::{reduce, QueryAction, QueryState, SearchQuery};
pub use store::FilterStore;

use crate::{api::ApiClient, config::Config, notifications::Toasts, query::FilterStore};

/// Services shared by every screen.
pub struct AppContext {
    pub config: Config,
    pub client: ApiClient,
    pub store: FilterStore,
    pub toasts: Toasts,
}

impl AppContext {
    pub fn new(config: Config, client: ApiClient, store: FilterStore) -> Self {
        Self {
            config,
            client,
            store,
            toasts: Toasts::new(),
        }
    }
}

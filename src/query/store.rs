use super::state::{reduce, QueryAction, QueryState};
use crate::constants::FILTERS_FILE_NAME;
use crate::screens::ListScreen;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Shared, cross-screen query state.
///
/// One handle is created at startup and handed to every screen through the
/// app context. Reads return snapshots; writes go through [`dispatch`],
/// which runs the pure reducer under the write lock.
///
/// [`dispatch`]: FilterStore::dispatch
#[derive(Clone, Default)]
pub struct FilterStore {
    screens: Arc<RwLock<BTreeMap<ListScreen, QueryState>>>,
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a screen's state, or a fresh state with the given page size.
    /// Stored state always takes the current page size.
    pub fn snapshot(&self, screen: ListScreen, items_per_page: u32) -> QueryState {
        let mut state = self
            .screens
            .read()
            .ok()
            .and_then(|screens| screens.get(&screen).cloned())
            .unwrap_or_else(|| QueryState::new(items_per_page));
        state.pagination.set_items_per_page(items_per_page);
        state
    }

    /// Whether a screen currently has stored state
    pub fn contains(&self, screen: ListScreen) -> bool {
        self.screens
            .read()
            .map(|screens| screens.contains_key(&screen))
            .unwrap_or(false)
    }

    /// Apply `action` to a screen's state, creating it on first use. Returns the new state.
    pub fn dispatch(&self, screen: ListScreen, items_per_page: u32, action: QueryAction) -> QueryState {
        let Ok(mut screens) = self.screens.write() else {
            log::error!("Filter store lock poisoned; dropping {:?}", action);
            return QueryState::new(items_per_page);
        };
        let current = screens
            .entry(screen)
            .or_insert_with(|| QueryState::new(items_per_page));
        current.pagination.set_items_per_page(items_per_page);
        let next = reduce(current, action);
        *current = next.clone();
        next
    }

    /// Forget a screen's state when the user navigates away, unless that screen keeps its filters
    pub fn leave(&self, screen: ListScreen) {
        if screen.config().persists_filters {
            return;
        }
        if let Ok(mut screens) = self.screens.write() {
            screens.remove(&screen);
        }
    }

    pub fn to_json(&self) -> Result<String> {
        let screens = self
            .screens
            .read()
            .map_err(|_| anyhow::anyhow!("Filter store lock poisoned"))?;
        serde_json::to_string_pretty(&*screens).context("Failed to serialize filter store")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let screens: BTreeMap<ListScreen, QueryState> =
            serde_json::from_str(json).context("Failed to parse filter store")?;
        Ok(Self {
            screens: Arc::new(RwLock::new(screens)),
        })
    }

    /// Persist the screens that keep their filters across runs
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let persistent: BTreeMap<ListScreen, QueryState> = self
            .screens
            .read()
            .map_err(|_| anyhow::anyhow!("Filter store lock poisoned"))?
            .iter()
            .filter(|(screen, _)| screen.config().persists_filters)
            .map(|(screen, state)| (*screen, state.clone()))
            .collect();
        let content = serde_json::to_string_pretty(&persistent).context("Failed to serialize filter store")?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write filter store: {}", path.as_ref().display()))
    }

    /// Load a store saved with [`save_to_file`](FilterStore::save_to_file); a missing file yields an empty store
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        if !path.as_ref().exists() {
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read filter store: {}", path.as_ref().display()))?;
        Self::from_json(&content)
    }

    /// Get the default filter store path
    pub fn get_store_file_path() -> Result<PathBuf> {
        dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
            .map(|dir| dir.join("fleetdash").join(FILTERS_FILE_NAME))
    }
}

//! Fetch orchestration for list screens.
//!
//! A [`ListFetcher`] turns the current [`QueryState`] into one request, calls
//! its [`DataSource`], and keeps the outcome in a shared slot together with a
//! loading flag. Errors end here: they are logged, surfaced as a toast, and
//! leave an empty array in the slot.
//!
//! Every fetch takes a sequence number. Only the most recently issued fetch
//! may write the slot or clear the loading flag, so a slow, superseded
//! response can never overwrite fresher data.

use crate::api::{self, ifta::IftaReport, ApiClient, ApiError, ApiResponse, Paging};
use crate::config::Config;
use crate::constants::{ERROR_GENERIC_FETCH, ERROR_NOT_AUTHENTICATED};
use crate::notifications::Toasts;
use crate::query::{build_list_body, QueryState, RequestShape};
use crate::screens::ListScreen;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Where a list screen gets its pages from.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_page(&self, paging: Paging, body: &Value) -> Result<ApiResponse, ApiError>;
}

/// [`DataSource`] backed by the list endpoint of one screen.
pub struct ScreenSource {
    client: ApiClient,
    screen: ListScreen,
    lonestar_id: String,
    insurer_id: String,
}

impl ScreenSource {
    pub fn new(client: ApiClient, screen: ListScreen, config: &Config) -> Self {
        Self {
            client,
            screen,
            lonestar_id: config.api.lonestar_id.clone(),
            insurer_id: config.api.insurer_id.clone(),
        }
    }
}

#[async_trait]
impl DataSource for ScreenSource {
    async fn fetch_page(&self, paging: Paging, body: &Value) -> Result<ApiResponse, ApiError> {
        let client = &self.client;
        let id = self.lonestar_id.as_str();
        match self.screen {
            ListScreen::Vehicles => api::vehicles::list_vehicles(client, id, paging, body).await,
            ListScreen::Drivers => api::drivers::list_drivers(client, id, paging, body).await,
            ListScreen::Devices => api::devices::list_devices(client, id, paging, body).await,
            ListScreen::Trips => api::trips::list_trips(client, id, paging, body).await,
            ListScreen::Fleets => api::fleets::list_fleets(client, &self.insurer_id, paging, body).await,
            ListScreen::IftaFuel => api::ifta::list_ifta(client, id, IftaReport::Fuel, paging, body).await,
            ListScreen::IftaMileage => api::ifta::list_ifta(client, id, IftaReport::Mileage, paging, body).await,
            ListScreen::VideoHistory => api::devices::list_video_history(client, paging, body).await,
        }
    }
}

/// How a fetch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Payload stored
    Loaded,
    /// Slot reset to an empty array; carries the message shown to the user
    Failed(String),
    /// A newer fetch was issued meanwhile; this response was dropped
    Stale,
}

#[derive(Debug)]
struct Slot {
    /// Sequence number of the most recently issued fetch
    latest: u64,
    loading: bool,
    result: Value,
    last_error: Option<String>,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            latest: 0,
            loading: false,
            result: Value::Array(Vec::new()),
            last_error: None,
        }
    }
}

/// Clears the loading flag when the fetch that owns it ends, however it ends.
struct LoadingGuard {
    slot: Arc<Mutex<Slot>>,
    seq: u64,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        if let Ok(mut slot) = self.slot.lock() {
            if slot.latest == self.seq {
                slot.loading = false;
            }
        }
    }
}

/// Paged, sorted, filtered list fetch with a loading flag.
#[derive(Clone)]
pub struct ListFetcher {
    source: Arc<dyn DataSource>,
    shape: RequestShape,
    toasts: Toasts,
    slot: Arc<Mutex<Slot>>,
}

impl ListFetcher {
    pub fn new(source: Arc<dyn DataSource>, shape: RequestShape, toasts: Toasts) -> Self {
        Self {
            source,
            shape,
            toasts,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    /// Fetcher for a screen's list endpoint
    pub fn for_screen(client: ApiClient, screen: ListScreen, config: &Config, toasts: Toasts) -> Self {
        let source = Arc::new(ScreenSource::new(client, screen, config));
        Self::new(source, RequestShape::from(&screen.config()), toasts)
    }

    pub fn loading(&self) -> bool {
        self.slot.lock().map(|slot| slot.loading).unwrap_or(false)
    }

    /// The stored payload; an empty array before the first load and after any failure
    pub fn result(&self) -> Value {
        self.slot
            .lock()
            .map(|slot| slot.result.clone())
            .unwrap_or_else(|_| Value::Array(Vec::new()))
    }

    pub fn rows(&self) -> Vec<Value> {
        api::rows_of(&self.result()).to_vec()
    }

    pub fn total(&self) -> Option<u64> {
        api::total_of(&self.result())
    }

    pub fn last_error(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.last_error.clone())
    }

    /// Fetch `page` for `state`, merging `extra` into the request body.
    pub async fn fetch(&self, page: u32, extra: &Value, state: &QueryState) -> FetchOutcome {
        let seq = match self.slot.lock() {
            Ok(mut slot) => {
                slot.latest += 1;
                slot.loading = true;
                slot.latest
            }
            Err(_) => {
                log::error!("Fetch slot lock poisoned");
                return self.fail(ERROR_GENERIC_FETCH.to_string());
            }
        };
        let _guard = LoadingGuard {
            slot: Arc::clone(&self.slot),
            seq,
        };

        let body = build_list_body(self.shape, state, extra);
        let paging = Paging::new(page, state.pagination.items_per_page);
        log::debug!("Fetch #{} page {} body {}", seq, paging.page, body);

        let result = self.source.fetch_page(paging, &body).await;

        let (data, error) = match result {
            Ok(response) => match response.failure_message() {
                None => (response.data, None),
                Some(message) => {
                    log::warn!("List fetch #{} rejected ({}): {}", seq, response.status, message);
                    (Value::Array(Vec::new()), Some(message))
                }
            },
            Err(ApiError::Authentication) => {
                log::error!("List fetch #{} without a session token", seq);
                (Value::Array(Vec::new()), Some(ERROR_NOT_AUTHENTICATED.to_string()))
            }
            Err(e) => {
                log::error!("List fetch #{} failed: {}", seq, e);
                (Value::Array(Vec::new()), Some(ERROR_GENERIC_FETCH.to_string()))
            }
        };

        if !self.commit(seq, data, error.clone()) {
            log::debug!("Dropping stale response #{}", seq);
            return FetchOutcome::Stale;
        }

        match error {
            None => FetchOutcome::Loaded,
            Some(message) => {
                self.toasts.error(message.clone());
                FetchOutcome::Failed(message)
            }
        }
    }

    fn fail(&self, message: String) -> FetchOutcome {
        self.toasts.error(message.clone());
        FetchOutcome::Failed(message)
    }

    /// Store `result` if `seq` is still the latest fetch. The check and the
    /// write happen under one lock.
    fn commit(&self, seq: u64, result: Value, error: Option<String>) -> bool {
        let Ok(mut slot) = self.slot.lock() else {
            return false;
        };
        if slot.latest != seq {
            return false;
        }
        slot.result = result;
        slot.last_error = error;
        true
    }
}

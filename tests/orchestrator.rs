use async_trait::async_trait;
use fleetdash::api::{ApiError, ApiResponse, Paging};
use fleetdash::constants::{ERROR_GENERIC_FETCH, ERROR_NOT_AUTHENTICATED};
use fleetdash::notifications::{ToastLevel, Toasts};
use fleetdash::orchestrator::{DataSource, FetchOutcome, ListFetcher};
use fleetdash::query::{FilterPatch, QueryState, RequestShape, SortOrder};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

type Reply = (Option<oneshot::Receiver<()>>, Result<ApiResponse, ApiError>);

/// Data source answering from a scripted queue; a reply can be held back by a gate.
#[derive(Default)]
struct ScriptedSource {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<(Paging, Value)>>,
}

impl ScriptedSource {
    fn reply(&self, result: Result<ApiResponse, ApiError>) {
        self.replies.lock().unwrap().push_back((None, result));
    }

    fn gated_reply(&self, result: Result<ApiResponse, ApiError>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.replies.lock().unwrap().push_back((Some(rx), result));
        tx
    }

    fn calls(&self) -> Vec<(Paging, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DataSource for ScriptedSource {
    async fn fetch_page(&self, paging: Paging, body: &Value) -> Result<ApiResponse, ApiError> {
        self.calls.lock().unwrap().push((paging, body.clone()));
        let (gate, result) = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected fetch");
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        result
    }
}

fn fetcher_with(source: &Arc<ScriptedSource>) -> (ListFetcher, Toasts) {
    let toasts = Toasts::new();
    let fetcher = ListFetcher::new(source.clone(), RequestShape::default(), toasts.clone());
    (fetcher, toasts)
}

#[tokio::test]
async fn test_initial_result_is_empty_array() {
    let source = Arc::new(ScriptedSource::default());
    let (fetcher, _) = fetcher_with(&source);

    assert!(!fetcher.loading());
    assert_eq!(fetcher.result(), json!([]));
    assert!(fetcher.rows().is_empty());
}

#[tokio::test]
async fn test_successful_fetch_stores_payload() {
    let source = Arc::new(ScriptedSource::default());
    source.reply(Ok(ApiResponse::new(200, json!({"rows": [{"id": 1}, {"id": 2}], "count": 12}))));
    let (fetcher, toasts) = fetcher_with(&source);

    let mut state = QueryState::new(10);
    state.set_sort("make", SortOrder::Desc);
    state.set_filter_criteria(FilterPatch::default().score_range([40, 90]));
    state.set_page(2);

    let outcome = fetcher.fetch(state.page(), &json!({}), &state).await;

    assert_eq!(outcome, FetchOutcome::Loaded);
    assert!(!fetcher.loading());
    assert_eq!(fetcher.rows().len(), 2);
    assert_eq!(fetcher.total(), Some(12));
    assert!(fetcher.last_error().is_none());
    assert!(toasts.latest().is_none());

    let calls = source.calls();
    assert_eq!(calls.len(), 1);
    let (paging, body) = &calls[0];
    assert_eq!(*paging, Paging::new(2, 10));
    assert_eq!(body["sortKey"], json!("make"));
    assert_eq!(body["sortOrder"], json!("DESC"));
    assert_eq!(body["scoreRange"], json!([40, 90]));
}

#[tokio::test]
async fn test_transport_error_resets_result_and_clears_loading() {
    let source = Arc::new(ScriptedSource::default());
    source.reply(Ok(ApiResponse::new(200, json!([{"id": 1}]))));
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let refused = reqwest::get("http://127.0.0.1:9/").await.unwrap_err();
    source.reply(Err(ApiError::Transport(refused)));
    let (fetcher, toasts) = fetcher_with(&source);
    let state = QueryState::new(10);

    fetcher.fetch(1, &json!({}), &state).await;
    assert_eq!(fetcher.rows().len(), 1);

    let outcome = fetcher.fetch(1, &json!({}), &state).await;

    assert_eq!(outcome, FetchOutcome::Failed(ERROR_GENERIC_FETCH.to_string()));
    assert!(!fetcher.loading());
    assert_eq!(fetcher.result(), json!([]));
    let toast = toasts.latest().unwrap();
    assert_eq!(toast.level, ToastLevel::Error);
    assert_eq!(toast.message, ERROR_GENERIC_FETCH);
}

#[tokio::test]
async fn test_missing_token_surfaces_sign_in_message() {
    let source = Arc::new(ScriptedSource::default());
    source.reply(Err(ApiError::Authentication));
    let (fetcher, _) = fetcher_with(&source);

    let outcome = fetcher.fetch(1, &json!({}), &QueryState::new(10)).await;

    assert_eq!(outcome, FetchOutcome::Failed(ERROR_NOT_AUTHENTICATED.to_string()));
    assert_eq!(fetcher.last_error().as_deref(), Some(ERROR_NOT_AUTHENTICATED));
}

#[tokio::test]
async fn test_application_error_shows_details() {
    let source = Arc::new(ScriptedSource::default());
    source.reply(Ok(ApiResponse::new(200, json!({"details": "Fleet is not insured"}))));
    source.reply(Ok(ApiResponse::new(500, Value::Null)));
    let (fetcher, toasts) = fetcher_with(&source);
    let state = QueryState::new(10);

    let outcome = fetcher.fetch(1, &json!({}), &state).await;
    assert_eq!(outcome, FetchOutcome::Failed("Fleet is not insured".to_string()));
    assert_eq!(fetcher.result(), json!([]));

    let outcome = fetcher.fetch(1, &json!({}), &state).await;
    assert_eq!(outcome, FetchOutcome::Failed("Request failed with status 500".to_string()));
    assert_eq!(toasts.all().len(), 2);
}

#[tokio::test]
async fn test_extra_params_are_merged_into_body() {
    let source = Arc::new(ScriptedSource::default());
    source.reply(Ok(ApiResponse::new(200, json!([]))));
    let (fetcher, _) = fetcher_with(&source);

    fetcher
        .fetch(1, &json!({"lonestarId": "L1"}), &QueryState::new(6))
        .await;

    let (paging, body) = &source.calls()[0];
    assert_eq!(paging.limit, 6);
    assert_eq!(*body, json!({"lonestarId": "L1"}));
}

#[tokio::test]
async fn test_loading_is_set_while_request_is_in_flight() {
    let source = Arc::new(ScriptedSource::default());
    let gate = source.gated_reply(Ok(ApiResponse::new(200, json!([{"id": 1}]))));
    let (fetcher, _) = fetcher_with(&source);

    let background = fetcher.clone();
    let handle = tokio::spawn(async move { background.fetch(1, &json!({}), &QueryState::new(10)).await });

    while source.calls().is_empty() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    assert!(fetcher.loading());

    gate.send(()).unwrap();
    assert_eq!(handle.await.unwrap(), FetchOutcome::Loaded);
    assert!(!fetcher.loading());
}

#[tokio::test]
async fn test_superseded_response_is_discarded() {
    let source = Arc::new(ScriptedSource::default());
    let slow_gate = source.gated_reply(Ok(ApiResponse::new(200, json!([{"id": "old"}]))));
    source.reply(Ok(ApiResponse::new(200, json!([{"id": "new"}]))));
    let (fetcher, _) = fetcher_with(&source);

    let slow = fetcher.clone();
    let slow_handle = tokio::spawn(async move { slow.fetch(1, &json!({}), &QueryState::new(10)).await });
    while source.calls().is_empty() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    let mut state = QueryState::new(10);
    state.set_page(2);
    assert_eq!(fetcher.fetch(2, &json!({}), &state).await, FetchOutcome::Loaded);

    slow_gate.send(()).unwrap();
    assert_eq!(slow_handle.await.unwrap(), FetchOutcome::Stale);

    assert_eq!(fetcher.rows()[0]["id"], json!("new"));
    assert!(!fetcher.loading());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_fetches_never_leave_loading_set() {
    let source = Arc::new(ScriptedSource::default());
    for id in 0..64 {
        source.reply(Ok(ApiResponse::new(200, json!([{"id": id}]))));
    }
    let (fetcher, _) = fetcher_with(&source);

    let handles: Vec<_> = (0..64)
        .map(|_| {
            let fetcher = fetcher.clone();
            tokio::spawn(async move { fetcher.fetch(1, &json!({}), &QueryState::new(10)).await })
        })
        .collect();
    let mut loaded = 0;
    for handle in handles {
        if handle.await.unwrap() == FetchOutcome::Loaded {
            loaded += 1;
        }
    }

    assert!(loaded >= 1);
    assert!(!fetcher.loading());
    assert_eq!(fetcher.rows().len(), 1);
}

#[tokio::test]
async fn test_superseded_failure_is_not_toasted() {
    let source = Arc::new(ScriptedSource::default());
    let slow_gate = source.gated_reply(Err(ApiError::Authentication));
    source.reply(Ok(ApiResponse::new(200, json!([{"id": "new"}]))));
    let (fetcher, toasts) = fetcher_with(&source);

    let slow = fetcher.clone();
    let slow_handle = tokio::spawn(async move { slow.fetch(1, &json!({}), &QueryState::new(10)).await });
    while source.calls().is_empty() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    assert_eq!(fetcher.fetch(1, &json!({}), &QueryState::new(10)).await, FetchOutcome::Loaded);

    slow_gate.send(()).unwrap();
    assert_eq!(slow_handle.await.unwrap(), FetchOutcome::Stale);
    assert!(toasts.latest().is_none());
    assert!(fetcher.last_error().is_none());
}

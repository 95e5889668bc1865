use chrono::NaiveDate;
use fleetdash::query::filters::StatusFlags;
use fleetdash::query::{build_list_body, FilterPatch, QueryState, RequestShape, SearchQuery, SortOrder};
use fleetdash::screens::ListScreen;
use serde_json::json;

#[test]
fn test_default_state_sends_empty_body() {
    let state = QueryState::new(10);
    let body = build_list_body(RequestShape::default(), &state, &json!({}));
    assert_eq!(body, json!({}));
}

#[test]
fn test_moved_score_range_is_sent() {
    let mut state = QueryState::new(10);
    state.set_filter_criteria(FilterPatch::default().score_range([40, 90]));

    let body = build_list_body(RequestShape::default(), &state, &json!({}));

    assert_eq!(body, json!({"scoreRange": [40, 90]}));
}

#[test]
fn test_range_back_at_default_is_omitted() {
    let mut state = QueryState::new(10);
    state.set_filter_criteria(FilterPatch::default().score_range([40, 90]));
    state.set_filter_criteria(FilterPatch::default().score_range([0, 100]));

    let body = build_list_body(RequestShape::default(), &state, &json!({}));

    assert!(body.get("scoreRange").is_none());
}

#[test]
fn test_trips_use_trip_score_key() {
    let mut state = QueryState::new(10);
    state.set_filter_criteria(
        FilterPatch::default()
            .score_range([40, 90])
            .miles_range([1_000, 20_000]),
    );
    let shape = RequestShape::from(&ListScreen::Trips.config());

    let body = build_list_body(shape, &state, &json!({}));

    assert_eq!(body["tripScoreRange"], json!([40, 90]));
    assert_eq!(body["milesRange"], json!([1_000, 20_000]));
    assert!(body.get("scoreRange").is_none());
}

#[test]
fn test_sort_and_dates() {
    let mut state = QueryState::new(10);
    state.set_sort("startTime", SortOrder::Desc);
    state.set_filter_criteria(FilterPatch::default().dates(
        NaiveDate::from_ymd_opt(2024, 3, 1),
        NaiveDate::from_ymd_opt(2024, 3, 31),
    ));

    let body = build_list_body(RequestShape::default(), &state, &json!({}));

    assert_eq!(
        body,
        json!({
            "sortKey": "startTime",
            "sortOrder": "DESC",
            "fromDate": "2024-03-01",
            "toDate": "2024-03-31",
        })
    );
}

#[test]
fn test_flags_and_checked_statuses() {
    let mut state = QueryState::new(10);
    let mut status = StatusFlags::new();
    status.insert("active".to_string(), true);
    status.insert("expired".to_string(), false);
    state.set_filter_criteria(FilterPatch {
        completed: Some(Some(true)),
        is_truncate: Some(Some(false)),
        ..FilterPatch::default().status(status)
    });

    let body = build_list_body(RequestShape::default(), &state, &json!({}));

    assert_eq!(body["completed"], json!(true));
    assert_eq!(body["isTruncate"], json!(false));
    assert!(body.get("inProgress").is_none());
    assert_eq!(body["status"], json!({"active": true}));
    assert!(body.get("policyStatus").is_none());
}

#[test]
fn test_all_unchecked_group_is_omitted() {
    let mut state = QueryState::new(10);
    let mut policy = StatusFlags::new();
    policy.insert("active".to_string(), false);
    state.set_filter_criteria(FilterPatch {
        policy_status: Some(policy),
        ..FilterPatch::default()
    });

    let body = build_list_body(RequestShape::default(), &state, &json!({}));

    assert_eq!(body, json!({}));
}

#[test]
fn test_search_text_is_forwarded_verbatim_and_blank_entries_dropped() {
    let mut state = QueryState::new(10);
    let mut search = SearchQuery::new();
    search.insert("driverName".to_string(), "  Smith ".to_string());
    search.insert("make".to_string(), "   ".to_string());
    state.set_search(search);

    let body = build_list_body(RequestShape::default(), &state, &json!({}));

    assert_eq!(body, json!({"driverName": "  Smith "}));
}

#[test]
fn test_extra_params_win() {
    let mut state = QueryState::new(10);
    let mut search = SearchQuery::new();
    search.insert("lonestarId".to_string(), "typed".to_string());
    state.set_search(search);

    let body = build_list_body(RequestShape::default(), &state, &json!({"lonestarId": "L1"}));

    assert_eq!(body, json!({"lonestarId": "L1"}));
}

use super::filters::{has_checked, StatusFlags};
use super::state::QueryState;
use crate::screens::ScreenConfig;
use serde_json::{json, Map, Value};

/// Screen-specific naming of request-body keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestShape {
    pub score_key: &'static str,
}

impl Default for RequestShape {
    fn default() -> Self {
        Self { score_key: "scoreRange" }
    }
}

impl From<&ScreenConfig> for RequestShape {
    fn from(config: &ScreenConfig) -> Self {
        Self {
            score_key: config.score_key,
        }
    }
}

/// Build the body of a list request from a state snapshot.
///
/// Only fields that narrow the query are included: a sort only when a key is
/// set, ranges only when moved off their full span, dates, flags and status
/// groups only when set, search entries only when non-blank. `extra` is merged
/// last and wins on key collisions.
pub fn build_list_body(shape: RequestShape, state: &QueryState, extra: &Value) -> Value {
    let mut body = Map::new();
    let filters = &state.filters;

    if let Some(sort) = state.sort.as_ref().filter(|sort| !sort.key.is_empty()) {
        body.insert("sortKey".to_string(), json!(sort.key));
        body.insert("sortOrder".to_string(), json!(sort.order.as_str()));
    }

    if let Some(from) = filters.from_date {
        body.insert("fromDate".to_string(), json!(from.format("%Y-%m-%d").to_string()));
    }
    if let Some(to) = filters.to_date {
        body.insert("toDate".to_string(), json!(to.format("%Y-%m-%d").to_string()));
    }

    if filters.has_score_filter() {
        body.insert(shape.score_key.to_string(), json!(filters.score_range));
    }
    if filters.has_miles_filter() {
        body.insert("milesRange".to_string(), json!(filters.miles_range));
    }

    for (key, flag) in [
        ("completed", filters.completed),
        ("inProgress", filters.in_progress),
        ("isTruncate", filters.is_truncate),
    ] {
        if let Some(flag) = flag {
            body.insert(key.to_string(), json!(flag));
        }
    }

    for (key, flags) in [
        ("policyStatus", &filters.policy_status),
        ("contractStatus", &filters.contract_status),
        ("status", &filters.status),
    ] {
        if has_checked(flags) {
            body.insert(key.to_string(), checked_only(flags));
        }
    }

    for (column, text) in &state.search {
        if !text.trim().is_empty() {
            body.insert(column.clone(), json!(text));
        }
    }

    if let Value::Object(extra) = extra {
        for (key, value) in extra {
            body.insert(key.clone(), value.clone());
        }
    }

    Value::Object(body)
}

fn checked_only(flags: &StatusFlags) -> Value {
    let checked: Map<String, Value> = flags
        .iter()
        .filter(|(_, checked)| **checked)
        .map(|(key, _)| (key.clone(), Value::Bool(true)))
        .collect();
    Value::Object(checked)
}

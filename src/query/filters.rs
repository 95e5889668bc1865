use crate::constants::{DEFAULT_MILES_RANGE, DEFAULT_SCORE_RANGE};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Checkbox group such as policy or contract status: key → checked.
pub type StatusFlags = BTreeMap<String, bool>;

/// Structured filters a user can set from a filter popover.
///
/// Ranges default to the full span; a range left at its default is treated
/// as "no filter" and never reaches the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub score_range: [u32; 2],
    pub miles_range: [u32; 2],
    pub completed: Option<bool>,
    pub in_progress: Option<bool>,
    pub is_truncate: Option<bool>,
    pub policy_status: StatusFlags,
    pub contract_status: StatusFlags,
    pub status: StatusFlags,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            from_date: None,
            to_date: None,
            score_range: DEFAULT_SCORE_RANGE,
            miles_range: DEFAULT_MILES_RANGE,
            completed: None,
            in_progress: None,
            is_truncate: None,
            policy_status: StatusFlags::new(),
            contract_status: StatusFlags::new(),
            status: StatusFlags::new(),
        }
    }
}

impl FilterCriteria {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn has_score_filter(&self) -> bool {
        self.score_range != DEFAULT_SCORE_RANGE
    }

    pub fn has_miles_filter(&self) -> bool {
        self.miles_range != DEFAULT_MILES_RANGE
    }

    /// Number of active (non-default) filter fields, shown as a badge on the filter button
    pub fn active_count(&self) -> usize {
        [
            self.from_date.is_some(),
            self.to_date.is_some(),
            self.has_score_filter(),
            self.has_miles_filter(),
            self.completed.is_some(),
            self.in_progress.is_some(),
            self.is_truncate.is_some(),
            has_checked(&self.policy_status),
            has_checked(&self.contract_status),
            has_checked(&self.status),
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }

    /// Shallow merge: every field present in `patch` replaces the current one.
    /// Status maps are replaced wholesale.
    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(from_date) = patch.from_date {
            self.from_date = from_date;
        }
        if let Some(to_date) = patch.to_date {
            self.to_date = to_date;
        }
        if let Some(score_range) = patch.score_range {
            self.score_range = normalize_range(score_range);
        }
        if let Some(miles_range) = patch.miles_range {
            self.miles_range = normalize_range(miles_range);
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(in_progress) = patch.in_progress {
            self.in_progress = in_progress;
        }
        if let Some(is_truncate) = patch.is_truncate {
            self.is_truncate = is_truncate;
        }
        if let Some(policy_status) = patch.policy_status {
            self.policy_status = policy_status;
        }
        if let Some(contract_status) = patch.contract_status {
            self.contract_status = contract_status;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// Partial update of [`FilterCriteria`]. `None` leaves a field alone;
/// for optional fields `Some(None)` unsets it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub from_date: Option<Option<NaiveDate>>,
    pub to_date: Option<Option<NaiveDate>>,
    pub score_range: Option<[u32; 2]>,
    pub miles_range: Option<[u32; 2]>,
    pub completed: Option<Option<bool>>,
    pub in_progress: Option<Option<bool>>,
    pub is_truncate: Option<Option<bool>>,
    pub policy_status: Option<StatusFlags>,
    pub contract_status: Option<StatusFlags>,
    pub status: Option<StatusFlags>,
}

impl FilterPatch {
    /// A patch that sets every field to the values of `criteria`
    pub fn replace_all(criteria: &FilterCriteria) -> Self {
        Self {
            from_date: Some(criteria.from_date),
            to_date: Some(criteria.to_date),
            score_range: Some(criteria.score_range),
            miles_range: Some(criteria.miles_range),
            completed: Some(criteria.completed),
            in_progress: Some(criteria.in_progress),
            is_truncate: Some(criteria.is_truncate),
            policy_status: Some(criteria.policy_status.clone()),
            contract_status: Some(criteria.contract_status.clone()),
            status: Some(criteria.status.clone()),
        }
    }

    #[must_use]
    pub fn score_range(mut self, range: [u32; 2]) -> Self {
        self.score_range = Some(range);
        self
    }

    #[must_use]
    pub fn miles_range(mut self, range: [u32; 2]) -> Self {
        self.miles_range = Some(range);
        self
    }

    #[must_use]
    pub fn dates(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from_date = Some(from);
        self.to_date = Some(to);
        self
    }

    #[must_use]
    pub fn status(mut self, status: StatusFlags) -> Self {
        self.status = Some(status);
        self
    }
}

/// Whether any box in a checkbox group is ticked
pub fn has_checked(flags: &StatusFlags) -> bool {
    flags.values().any(|checked| *checked)
}

// Slider handles can cross while dragging; keep low <= high
fn normalize_range([low, high]: [u32; 2]) -> [u32; 2] {
    if low <= high {
        [low, high]
    } else {
        [high, low]
    }
}

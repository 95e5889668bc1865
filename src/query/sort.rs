use serde::{Deserialize, Serialize};

/// Sort direction, serialized the way the backend expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// The one active sort of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(key: impl Into<String>, order: SortOrder) -> Self {
        Self { key: key.into(), order }
    }

    /// Sort spec produced by clicking column `key` while `current` is active:
    /// the same column flips direction, another column starts ascending.
    pub fn after_click(current: Option<&SortSpec>, key: &str) -> Self {
        match current {
            Some(spec) if spec.key == key => Self::new(key, spec.order.toggled()),
            _ => Self::new(key, SortOrder::Asc),
        }
    }
}

//! Pagination values
//!
//! A `Page` lives only inside one pagination run; `Collected` is what the
//! run hands back.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::outcome::FailureKind;
use crate::constants::{PAGE_CURSOR_FIELD, PAGE_DATA_FIELD};

/// One page of a cursor-paginated list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(rename = "nextPageCursor", default)]
    pub next_page_cursor: Option<String>,
}

impl Page {
    /// Read a page out of a decoded response
    ///
    /// A missing or non-array `data` field is an empty page. A missing,
    /// null, empty, or non-string cursor means there is no next page.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Self::default();
        };

        let data = match fields.remove(PAGE_DATA_FIELD) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };
        let next_page_cursor = match fields.remove(PAGE_CURSOR_FIELD) {
            Some(Value::String(cursor)) if !cursor.is_empty() => Some(cursor),
            _ => None,
        };

        Self { data, next_page_cursor }
    }
}

/// Why a pagination run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "kind", rename_all = "snake_case")]
pub enum StopReason {
    /// The last page carried no next cursor.
    Exhausted,
    /// A page came back without items.
    EmptyPage,
    /// A page request failed; items gathered so far are kept.
    Failed(FailureKind),
    /// The configured page cap was reached.
    PageLimit,
    /// The configured item cap was reached.
    ItemLimit,
}

impl StopReason {
    /// `true` when the collection ended because the server said so.
    #[must_use]
    pub fn is_complete(self) -> bool {
        matches!(self, Self::Exhausted | Self::EmptyPage)
    }
}

/// Items gathered by a pagination run, in page order then within-page order.
#[derive(Debug, Clone, PartialEq)]
pub struct Collected {
    pub items: Vec<Value>,
    /// Number of page requests issued.
    pub pages: usize,
    pub stop: StopReason,
}

impl Collected {
    /// Collected items, dropping the run metadata.
    #[must_use]
    pub fn into_items(self) -> Vec<Value> {
        self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

//! Search history records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted search keyword.
///
/// The store holds at most one row per distinct `keyword`; committing the
/// same keyword again refreshes `added_at` instead of adding a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchKeyword {
    /// Row id assigned by the store.
    pub id: i64,
    pub keyword: String,
    pub added_at: DateTime<Utc>,
}

/// A keyword about to be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSearchKeyword {
    pub keyword: String,
    pub added_at: DateTime<Utc>,
}

impl NewSearchKeyword {
    pub fn new(keyword: impl Into<String>, added_at: DateTime<Utc>) -> Self {
        Self {
            keyword: keyword.into(),
            added_at,
        }
    }

    /// Record `keyword` with the current time.
    pub fn now(keyword: impl Into<String>) -> Self {
        Self::new(keyword, Utc::now())
    }
}

//! Row mapping helpers for `SQLite` queries.

use chrono::{DateTime, TimeZone, Utc};
use mymovies_core::{RepositoryError, SearchKeyword};
use sqlx::Row;

/// Shared SELECT column list for keyword queries.
pub const KEYWORD_SELECT_COLUMNS: &str = "id, keyword, added_at";

/// Timestamps are stored as Unix milliseconds.
pub fn to_millis(at: &DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

pub fn from_millis(millis: i64) -> Result<DateTime<Utc>, RepositoryError> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| RepositoryError::Serialization(format!("invalid timestamp: {millis}")))
}

/// Parse a database row into a `SearchKeyword`.
pub fn row_to_keyword(row: &sqlx::sqlite::SqliteRow) -> Result<SearchKeyword, RepositoryError> {
    let added_at: i64 = row
        .try_get("added_at")
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;

    Ok(SearchKeyword {
        id: row
            .try_get("id")
            .map_err(|e| RepositoryError::Storage(e.to_string()))?,
        keyword: row
            .try_get("keyword")
            .map_err(|e| RepositoryError::Storage(e.to_string()))?,
        added_at: from_millis(added_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_round_trip_keeps_precision() {
        let at = Utc.timestamp_millis_opt(1_717_171_717_123).unwrap();
        assert_eq!(from_millis(to_millis(&at)).unwrap(), at);
    }

    #[test]
    fn test_out_of_range_timestamp() {
        assert!(matches!(
            from_millis(i64::MAX),
            Err(RepositoryError::Serialization(_))
        ));
    }
}

//! Storage row layouts (column names + row <-> domain mapping).
//!
//! Rows are JSON maps keyed by column name, the shape an insert-or-update-by-map
//! write API takes.

pub mod outbox;
pub mod product;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value as JsonValue;

use crate::contracts::RepositoryError;

pub type Row = serde_json::Map<String, JsonValue>;

pub(crate) fn timestamp(at: DateTime<Utc>) -> JsonValue {
    JsonValue::String(at.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

pub(crate) fn str_col<'a>(row: &'a Row, column: &str) -> Result<&'a str, RepositoryError> {
    opt_str_col(row, column)?
        .ok_or_else(|| RepositoryError::Corrupt(format!("column '{column}' is missing")))
}

pub(crate) fn opt_str_col<'a>(row: &'a Row, column: &str) -> Result<Option<&'a str>, RepositoryError> {
    match row.get(column) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s)),
        Some(other) => Err(RepositoryError::Corrupt(format!(
            "column '{column}' is not a string: {other}"
        ))),
    }
}

pub(crate) fn i64_col(row: &Row, column: &str) -> Result<i64, RepositoryError> {
    row.get(column)
        .and_then(JsonValue::as_i64)
        .ok_or_else(|| RepositoryError::Corrupt(format!("column '{column}' is not an integer")))
}

pub(crate) fn time_col(row: &Row, column: &str) -> Result<DateTime<Utc>, RepositoryError> {
    opt_time_col(row, column)?
        .ok_or_else(|| RepositoryError::Corrupt(format!("column '{column}' is missing")))
}

pub(crate) fn opt_time_col(row: &Row, column: &str) -> Result<Option<DateTime<Utc>>, RepositoryError> {
    opt_str_col(row, column)?
        .map(|s| {
            DateTime::parse_from_rfc3339(s)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| RepositoryError::Corrupt(format!("column '{column}': {e}")))
        })
        .transpose()
}

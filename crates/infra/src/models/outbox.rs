//! `outbox_events` table.

use catalog_core::EventId;
use catalog_events::OutboxEnvelope;

use super::{Row, str_col, time_col};
use crate::contracts::RepositoryError;

pub const TABLE: &str = "outbox_events";

pub const EVENT_ID: &str = "event_id";
pub const EVENT_TYPE: &str = "event_type";
pub const AGGREGATE_ID: &str = "aggregate_id";
pub const PAYLOAD: &str = "payload";
pub const STATUS: &str = "status";
pub const CREATED_AT: &str = "created_at";
pub const PROCESSED_AT: &str = "processed_at";

/// Row written together with the state change, waiting for the relay.
pub const STATUS_NEW: &str = "NEW";
/// Row already published by the relay.
pub const STATUS_PROCESSED: &str = "PROCESSED";

pub fn envelope_from_row(row: &Row) -> Result<OutboxEnvelope, RepositoryError> {
    let event_id: EventId = str_col(row, EVENT_ID)?
        .parse()
        .map_err(|e| RepositoryError::Corrupt(format!("column '{EVENT_ID}': {e}")))?;
    let payload = row
        .get(PAYLOAD)
        .cloned()
        .ok_or_else(|| RepositoryError::Corrupt(format!("column '{PAYLOAD}' is missing")))?;

    Ok(OutboxEnvelope::new(
        event_id,
        str_col(row, EVENT_TYPE)?,
        str_col(row, AGGREGATE_ID)?,
        payload,
        time_col(row, CREATED_AT)?,
    ))
}

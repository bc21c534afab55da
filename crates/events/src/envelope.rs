use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use catalog_core::EventId;

/// A committed outbox row, as handed to downstream consumers.
///
/// `payload` is the serialized event body; `event_type` and `aggregate_id` are
/// carried alongside so consumers can route without decoding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboxEnvelope {
    event_id: EventId,
    event_type: String,
    aggregate_id: String,
    payload: JsonValue,
    created_at: DateTime<Utc>,
}

impl OutboxEnvelope {
    pub fn new(
        event_id: EventId,
        event_type: impl Into<String>,
        aggregate_id: impl Into<String>,
        payload: JsonValue,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id,
            event_type: event_type.into(),
            aggregate_id: aggregate_id.into(),
            payload,
            created_at,
        }
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn aggregate_id(&self) -> &str {
        &self.aggregate_id
    }

    pub fn payload(&self) -> &JsonValue {
        &self.payload
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

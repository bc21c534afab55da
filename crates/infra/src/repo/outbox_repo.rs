use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

use catalog_core::{Clock, EventId};
use catalog_events::OutboxEnvelope;

use crate::contracts::{OutboxReader, OutboxRepository, RepositoryError};
use crate::models::outbox::{self, envelope_from_row};
use crate::models::{Row, timestamp};
use crate::store::{InMemoryDatabase, StoreMutation, Table};
use crate::unit_of_work::Mutation;

/// Outbox rows in the `outbox_events` table of an `InMemoryDatabase`.
pub struct StoreOutboxRepository {
    db: Arc<InMemoryDatabase>,
    clock: Arc<dyn Clock>,
}

impl StoreOutboxRepository {
    pub fn new(db: Arc<InMemoryDatabase>, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }
}

impl OutboxRepository for StoreOutboxRepository {
    fn insert_mut(
        &self,
        event_id: EventId,
        event_type: &str,
        aggregate_id: &str,
        payload: JsonValue,
    ) -> Box<dyn Mutation> {
        let mut row = Row::new();
        row.insert(outbox::EVENT_ID.into(), event_id.to_string().into());
        row.insert(outbox::EVENT_TYPE.into(), event_type.into());
        row.insert(outbox::AGGREGATE_ID.into(), aggregate_id.into());
        row.insert(outbox::PAYLOAD.into(), payload);
        row.insert(outbox::STATUS.into(), outbox::STATUS_NEW.into());
        row.insert(outbox::CREATED_AT.into(), timestamp(self.clock.now()));
        row.insert(outbox::PROCESSED_AT.into(), JsonValue::Null);
        StoreMutation::insert(Table::OutboxEvents, row).boxed()
    }

    fn mark_processed_mut(&self, event_id: EventId, processed_at: DateTime<Utc>) -> Box<dyn Mutation> {
        let mut row = Row::new();
        row.insert(outbox::EVENT_ID.into(), event_id.to_string().into());
        row.insert(outbox::STATUS.into(), outbox::STATUS_PROCESSED.into());
        row.insert(outbox::PROCESSED_AT.into(), timestamp(processed_at));
        StoreMutation::update(Table::OutboxEvents, row).boxed()
    }
}

#[async_trait]
impl OutboxReader for StoreOutboxRepository {
    async fn pending(&self, limit: usize) -> Result<Vec<OutboxEnvelope>, RepositoryError> {
        self.db
            .scan(Table::OutboxEvents)?
            .iter()
            .filter(|row| row.get(outbox::STATUS).and_then(JsonValue::as_str) == Some(outbox::STATUS_NEW))
            .take(limit)
            .map(envelope_from_row)
            .collect()
    }
}

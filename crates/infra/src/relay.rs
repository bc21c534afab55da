//! Outbox relay: moves committed outbox rows onto an event bus.
//!
//! Delivery is at-least-once. A row is marked processed only after it was
//! published, so a crash between the two republishes it on the next pass.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use catalog_core::Clock;
use catalog_events::{EventBus, OutboxEnvelope};

use crate::contracts::{OutboxReader, OutboxRepository, RepositoryError};
use crate::unit_of_work::{CommitError, Committer, Plan};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("reading outbox failed: {0}")]
    Read(#[from] RepositoryError),

    /// Rows published before the failure were still marked processed.
    #[error("publishing event {event_id} failed: {reason}")]
    Publish { event_id: String, reason: String },

    #[error("marking rows processed failed: {0}")]
    Commit(#[from] CommitError),
}

pub struct OutboxRelay<B> {
    reader: Arc<dyn OutboxReader>,
    outbox: Arc<dyn OutboxRepository>,
    committer: Arc<dyn Committer>,
    bus: B,
    clock: Arc<dyn Clock>,
    batch_size: usize,
}

impl<B> OutboxRelay<B>
where
    B: EventBus<OutboxEnvelope>,
{
    pub fn new(
        reader: Arc<dyn OutboxReader>,
        outbox: Arc<dyn OutboxRepository>,
        committer: Arc<dyn Committer>,
        bus: B,
        clock: Arc<dyn Clock>,
        batch_size: usize,
    ) -> Self {
        Self {
            reader,
            outbox,
            committer,
            bus,
            clock,
            batch_size: batch_size.max(1),
        }
    }

    /// Drain one batch. Returns the number of rows published.
    pub async fn run_once(&self) -> Result<usize, RelayError> {
        let pending = self.reader.pending(self.batch_size).await?;
        if pending.is_empty() {
            debug!("outbox empty");
            return Ok(0);
        }

        let mut marks = Plan::new();
        let mut failure = None;
        for envelope in pending {
            let event_id = envelope.event_id();
            if let Err(err) = self.bus.publish(envelope) {
                warn!(event_id = %event_id, error = ?err, "outbox publish failed; stopping batch");
                failure = Some(RelayError::Publish {
                    event_id: event_id.to_string(),
                    reason: format!("{err:?}"),
                });
                break;
            }
            marks.add(self.outbox.mark_processed_mut(event_id, self.clock.now()));
        }

        let published = marks.len();
        self.committer.apply(marks).await?;
        info!(published, "outbox batch relayed");

        match failure {
            Some(err) => Err(err),
            None => Ok(published),
        }
    }

    /// Run passes until the outbox is empty. Returns the total published.
    pub async fn drain(&self) -> Result<usize, RelayError> {
        let mut total = 0;
        loop {
            match self.run_once().await? {
                0 => return Ok(total),
                n => total += n,
            }
        }
    }
}

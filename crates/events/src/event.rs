use chrono::{DateTime, Utc};

/// An immutable fact about something that happened to an aggregate.
///
/// Events here are change notifications, not an event-sourced log: they live in
/// the aggregate's pending buffer until the owning unit of work commits, and
/// are persisted only as outbox rows for downstream consumers.
pub trait DomainEvent: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "product.created").
    fn event_type(&self) -> &'static str;

    /// Identifier of the aggregate the event belongs to.
    fn aggregate_id(&self) -> &str;

    /// When the event occurred (business time, UTC).
    fn occurred_at(&self) -> DateTime<Utc>;
}

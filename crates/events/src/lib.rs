//! Domain events and their outbox representation.
//!
//! Aggregates record `DomainEvent`s; the application layer serializes them into
//! outbox rows inside the same unit of work as the state change. An outbox relay
//! later drains those rows as `OutboxEnvelope`s onto an `EventBus`.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use envelope::OutboxEnvelope;
pub use event::DomainEvent;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};

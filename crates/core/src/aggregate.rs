//! Aggregate root trait for change-tracked domain models.

/// Aggregate root marker + minimal interface.
///
/// Aggregates mutate their own state through domain operations and buffer the
/// facts they produce as pending events. The buffer is transient: callers read
/// it while building a unit of work and clear it only after that unit of work
/// has been durably committed.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Event type recorded by this aggregate.
    type Event: Clone + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;

    /// Snapshot copy of the events recorded since the last clear.
    fn domain_events(&self) -> Vec<Self::Event>;

    /// Drop all pending events.
    ///
    /// Call only once the events have been durably committed.
    fn clear_domain_events(&mut self);
}

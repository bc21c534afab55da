//! Atomic batches of opaque write intents (transactional outbox plumbing).
//!
//! One use-case execution builds one `Plan`: the aggregate's own persistence
//! change followed by one outbox insert per recorded event. A `Committer`
//! applies the whole plan or nothing, so a state change is never stored
//! without its events, nor the events without the state change.
//!
//! The abstraction assumes nothing about the backing store beyond multi-row
//! atomic commit: mutations are opaque here, and only the committer that
//! produced them knows their concrete kind.

pub mod committer;
pub mod mutation;
pub mod plan;

pub use committer::{CommitError, Committer};
pub use mutation::Mutation;
pub use plan::Plan;

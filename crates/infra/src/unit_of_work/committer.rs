use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use super::plan::Plan;

/// Failure while applying a plan. Whatever the variant, nothing from the plan
/// is visible afterwards.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommitError {
    /// The plan contains a mutation this committer cannot apply.
    #[error("unsupported mutation type: {0}")]
    UnsupportedMutation(&'static str),

    #[error("duplicate key '{key}' in table {table}")]
    DuplicateKey { table: &'static str, key: String },

    #[error("no row with key '{key}' in table {table}")]
    MissingRow { table: &'static str, key: String },

    #[error("mutation for table {table} has no key column")]
    MissingKey { table: &'static str },

    #[error("storage lock poisoned")]
    Poisoned,

    #[error("commit failed: {0}")]
    Backend(String),
}

/// Applies a `Plan` atomically: every mutation becomes visible, or none does.
///
/// An empty plan is a successful no-op. Retries, if any, are the caller's call.
#[async_trait]
pub trait Committer: Send + Sync {
    async fn apply(&self, plan: Plan) -> Result<(), CommitError>;
}

#[async_trait]
impl<C> Committer for Arc<C>
where
    C: Committer + ?Sized,
{
    async fn apply(&self, plan: Plan) -> Result<(), CommitError> {
        (**self).apply(plan).await
    }
}

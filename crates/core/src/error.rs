//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Deterministic business failures only: input validation and state
/// conflicts. Lookups and storage failures are reported by the callers.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainError {
    #[error("invalid product ID")]
    InvalidProductId,

    #[error("invalid product name")]
    InvalidProductName,

    #[error("invalid category")]
    InvalidCategory,

    #[error("invalid money")]
    InvalidMoney,

    #[error("invalid discount percent")]
    InvalidDiscountPercent,

    #[error("invalid discount period")]
    InvalidDiscountPeriod,

    /// Discount operations require an active product.
    #[error("product not active")]
    ProductNotActive,

    /// A new discount collides with the one already attached.
    #[error("discount overlaps existing")]
    DiscountOverlaps,

    /// Archived products are frozen.
    #[error("product archived")]
    ProductArchived,
}

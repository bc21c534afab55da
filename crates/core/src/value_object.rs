//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. To
/// "modify" one, build a new one (e.g. `Money::sub` returns a fresh `Money`).
/// Construction goes through a validating constructor, so a value object that
/// exists is always valid.
///
/// Implemented by `Money` and `Discount` in `catalog-products`.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug + Send + Sync {}

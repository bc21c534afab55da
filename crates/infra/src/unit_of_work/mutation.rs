use std::any::Any;

/// An opaque, intended persistence change.
///
/// Repositories produce mutations of a concrete kind their committer knows how
/// to apply; everything in between only collects and forwards them.
pub trait Mutation: Any + core::fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    /// Concrete kind, for diagnostics.
    fn kind(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

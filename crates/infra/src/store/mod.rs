//! Storage backends that implement `Committer`.

pub mod in_memory;

pub use in_memory::{InMemoryDatabase, StoreMutation, Table, WriteOp};

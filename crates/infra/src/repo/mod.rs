//! Store-backed implementations of the repository and read-model contracts.

pub mod outbox_repo;
pub mod product_repo;
pub mod read_model;

pub use outbox_repo::StoreOutboxRepository;
pub use product_repo::StoreProductRepository;
pub use read_model::InMemoryReadModel;

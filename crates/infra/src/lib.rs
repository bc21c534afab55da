//! Infrastructure + application layer: unit of work, storage, repositories,
//! use-case interactors, queries, outbox relay, config.

pub mod app;
pub mod config;
pub mod contracts;
pub mod models;
pub mod queries;
pub mod relay;
pub mod repo;
pub mod store;
pub mod unit_of_work;
pub mod usecases;

#[cfg(test)]
mod integration_tests;

pub use app::CatalogApp;
pub use config::CatalogConfig;
pub use contracts::RepositoryError;
pub use usecases::UseCaseError;

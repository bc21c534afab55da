//! Runtime configuration from environment variables.

use std::str::FromStr;

pub use catalog_observability::{LOG_FORMAT_VAR, LogFormat};

pub const DEFAULT_PAGE_SIZE_VAR: &str = "CATALOG_DEFAULT_PAGE_SIZE";
pub const MAX_PAGE_SIZE_VAR: &str = "CATALOG_MAX_PAGE_SIZE";
pub const OUTBOX_BATCH_SIZE_VAR: &str = "CATALOG_OUTBOX_BATCH_SIZE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Page size used when a list request passes 0.
    pub default_page_size: usize,
    /// Upper bound on any requested page size.
    pub max_page_size: usize,
    /// Outbox rows drained per relay pass.
    pub outbox_batch_size: usize,
    pub log_format: LogFormat,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
            outbox_batch_size: 100,
            log_format: LogFormat::Json,
        }
    }
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their default, invalid ones
    /// are logged and keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let mut config = Self {
            default_page_size: positive(&lookup, DEFAULT_PAGE_SIZE_VAR, defaults.default_page_size),
            max_page_size: positive(&lookup, MAX_PAGE_SIZE_VAR, defaults.max_page_size),
            outbox_batch_size: positive(&lookup, OUTBOX_BATCH_SIZE_VAR, defaults.outbox_batch_size),
            log_format: parsed(&lookup, LOG_FORMAT_VAR, defaults.log_format),
        };

        if config.default_page_size > config.max_page_size {
            tracing::warn!(
                default_page_size = config.default_page_size,
                max_page_size = config.max_page_size,
                "default page size exceeds maximum; clamping"
            );
            config.default_page_size = config.max_page_size;
        }
        config
    }

    /// Effective page size for a requested `limit`.
    pub fn page_size(&self, limit: usize) -> usize {
        match limit {
            0 => self.default_page_size,
            n => n.min(self.max_page_size),
        }
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + core::fmt::Debug,
    T::Err: core::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            tracing::warn!(%key, value = %raw, error = %e, "invalid config value; using default {default:?}");
            default
        }),
    }
}

fn positive(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: usize) -> usize {
    match parsed(lookup, key, default) {
        0 => {
            tracing::warn!(%key, "config value must be positive; using default {default}");
            default
        }
        n => n,
    }
}

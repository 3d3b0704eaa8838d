//! Error types.
//!
//! Cache operations are total and never fail. The only fallible step is
//! turning an unchecked capacity into a [`LruCacheConfig`](crate::config::LruCacheConfig).

use thiserror::Error;

/// Rejected cache configuration.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A cache must be able to hold at least one entry.
    #[error("cache capacity must be at least 1")]
    ZeroCapacity,
}

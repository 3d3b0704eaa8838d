//! Cache Configuration
//!
//! [`LruCacheConfig`] carries the one parameter an LRU cache needs: how many
//! entries it may hold. The field is a [`NonZeroUsize`], so a cache that can
//! hold nothing cannot be built by accident. When the capacity comes from an
//! unchecked source (a config file, an environment variable) use
//! [`LruCacheConfig::try_new`], which reports zero as a [`ConfigError`].
//!
//! Both [`LruCache`](crate::LruCache) and, with the `concurrent` feature,
//! `ConcurrentLruCache` are built from this struct.
//!
//! # Examples
//!
//! ```
//! use recency_cache::config::LruCacheConfig;
//! use recency_cache::LruCache;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(1000).unwrap(),
//! };
//! let cache: LruCache<String, i32> = LruCache::init(config, None);
//! assert_eq!(cache.cap().get(), 1000);
//!
//! assert!(LruCacheConfig::try_new(0).is_err());
//! ```

use crate::error::ConfigError;
use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an LRU (Least Recently Used) cache.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries. Inserting a new key into a full
///   cache evicts the least recently used entry.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: NonZeroUsize,
}

impl LruCacheConfig {
    /// Creates a configuration with the given capacity.
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self { capacity }
    }

    /// Creates a configuration from an unchecked capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCapacity`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        NonZeroUsize::new(capacity)
            .map(Self::new)
            .ok_or(ConfigError::ZeroCapacity)
    }

    /// Returns the maximum number of entries.
    #[inline]
    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }
}

impl TryFrom<usize> for LruCacheConfig {
    type Error = ConfigError;

    fn try_from(capacity: usize) -> Result<Self, Self::Error> {
        Self::try_new(capacity)
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}

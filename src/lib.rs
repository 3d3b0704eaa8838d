#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Layering
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  ConcurrentLruCache      one Mutex around the whole segment  │
//! │  LruCache                &mut self, no lock                  │
//! ├──────────────────────────────────────────────────────────────┤
//! │  LruSegment              capacity policy, eviction, metrics  │
//! │    map:  K -> Handle                                         │
//! │    list: List<(K, V)>    front = most recent, back = victim  │
//! ├──────────────────────────────────────────────────────────────┤
//! │  List<T>                 slab of slots, index links          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Performance Characteristics
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `get` / `set` / `remove` | O(1) average |
//! | eviction | O(1) |
//! | `clear` | O(n) drops |
//!
//! ## Capacity
//!
//! Capacity is a [`NonZeroUsize`](core::num::NonZeroUsize). A capacity read
//! from an unchecked source goes through
//! [`LruCacheConfig::try_new`](config::LruCacheConfig::try_new), which rejects
//! zero with [`ConfigError::ZeroCapacity`].
//!
//! ```rust
//! use recency_cache::config::LruCacheConfig;
//! use recency_cache::{ConfigError, LruCache};
//!
//! assert_eq!(LruCacheConfig::try_new(0), Err(ConfigError::ZeroCapacity));
//!
//! let config = LruCacheConfig::try_new(2).unwrap();
//! let mut cache = LruCache::init(config, None);
//! cache.set("a", 1);
//! cache.set("b", 2);
//! cache.get(&"a");      // "a" becomes most recently used
//! cache.set("c", 3);    // "b" evicted (least recently used)
//! assert!(cache.get(&"b").is_none());
//! ```
//!
//! ## Logging
//!
//! Construction and `clear` emit `tracing` events at `DEBUG`; evictions and
//! removals emit at `TRACE`. The crate never installs a subscriber.
//!
//! ## Modules
//!
//! - [`list`]: Arena-backed doubly linked list with stable handles
//! - [`lru`]: Least Recently Used cache implementation
//! - [`config`]: Cache configuration
//! - [`error`]: Configuration errors
//! - [`metrics`]: Metrics collection for cache monitoring
//! - [`concurrent`]: Thread-safe LRU cache (requires `concurrent` feature)

#![no_std]

extern crate alloc;

#[cfg(any(test, not(feature = "hashbrown")))]
extern crate std;

/// Doubly linked list backed by a slab of reusable slots.
///
/// Nodes are addressed by [`Handle`](list::Handle)s, which are plain slot
/// indices. Handles stay valid across moves, and removed slots are recycled.
pub mod list;

/// Cache configuration structures.
pub mod config;

/// Error types.
pub mod error;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used entry
/// when a new key would exceed the capacity.
pub mod lru;

/// Cache metrics system.
pub mod metrics;

/// Concurrent cache implementations.
///
/// Provides a thread-safe LRU cache that serializes every operation through
/// a single lock.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use config::LruCacheConfig;
pub use error::ConfigError;
pub use list::{Handle, List};
pub use lru::LruCache;

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentLruCache;

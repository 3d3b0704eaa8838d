//! Concurrent Cache Implementations
//!
//! Thread-safe wrappers around the LRU algorithm in [`crate::lru`].
//!
//! # Architecture
//!
//! A [`ConcurrentLruCache`] owns exactly one `parking_lot::Mutex` guarding the
//! whole LRU state: the recency list and the key map are one unit of
//! consistency and are never touched without the lock held. The lock is
//! acquired before the first read of either structure and released by the
//! guard's `Drop` on every exit path, including unwinding.
//!
//! ## Why Mutex Instead of RwLock?
//!
//! An LRU `get()` is a write: it moves the entry to the front of the recency
//! list. Every operation would need the exclusive side of an `RwLock` anyway,
//! so a `Mutex` states the real contract with less bookkeeping.
//!
//! # Ordering
//!
//! All calls are linearizable with respect to the single lock. Which of two
//! racing callers goes first is unspecified.
//!
//! # Example
//!
//! ```rust
//! use recency_cache::concurrent::ConcurrentLruCache;
//! use core::num::NonZeroUsize;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(ConcurrentLruCache::new(NonZeroUsize::new(1000).unwrap()));
//!
//! let handles: Vec<_> = (0..4).map(|t| {
//!     let cache = Arc::clone(&cache);
//!     thread::spawn(move || {
//!         for i in 0..100 {
//!             let key = format!("key_{}_{}", t, i);
//!             cache.set(key.clone(), i);
//!             let _ = cache.get(&key);
//!         }
//!     })
//! }).collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.len(), 400);
//! ```

mod lru;

pub use self::lru::ConcurrentLruCache;

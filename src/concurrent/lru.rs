//! Concurrent LRU Cache Implementation
//!
//! The multi-threaded counterpart to [`LruCache`](crate::LruCache). One mutex
//! guards one [`LruSegment`], so recency order is global and exact: the entry
//! evicted is always the one least recently touched by any thread.
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │            ConcurrentLruCache              │
//! │                                            │
//! │   set / get / clear / ...                  │
//! │              │                             │
//! │         ┌────▼────┐                        │
//! │         │  Mutex  │  acquired first,       │
//! │         └────┬────┘  released on drop      │
//! │              │                             │
//! │   ┌──────────▼───────────┐                 │
//! │   │ LruSegment           │                 │
//! │   │  map: K -> Handle    │                 │
//! │   │  list: (K, V) nodes  │                 │
//! │   └──────────────────────┘                 │
//! └────────────────────────────────────────────┘
//! ```

use crate::config::LruCacheConfig;
use crate::lru::{DefaultHashBuilder, LruSegment, Write};
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use parking_lot::Mutex;

/// A thread-safe LRU cache.
///
/// Every method takes `&self` and runs under one exclusive lock, so the cache
/// can be shared through an `Arc` or a scoped borrow. Values are returned by
/// clone from [`get`](Self::get); use [`get_with`](Self::get_with) to read in
/// place while the lock is held.
///
/// # Type Parameters
///
/// - `K`: Key type. Must implement `Hash + Eq + Clone`.
/// - `V`: Value type. Only [`get`](Self::get) needs `Clone`.
/// - `S`: Hash builder type. Defaults to `DefaultHashBuilder`.
///
/// # Example
///
/// ```rust
/// use recency_cache::ConcurrentLruCache;
/// use core::num::NonZeroUsize;
///
/// let cache = ConcurrentLruCache::new(NonZeroUsize::new(2).unwrap());
/// assert!(!cache.set("a".to_string(), 1));
/// assert!(!cache.set("b".to_string(), 2));
/// assert_eq!(cache.get("a"), Some(1));
/// cache.set("c".to_string(), 3);
/// assert_eq!(cache.get("b"), None);
/// ```
pub struct ConcurrentLruCache<K, V, S = DefaultHashBuilder> {
    inner: Mutex<LruSegment<K, V, S>>,
}

impl<K: Hash + Eq, V> ConcurrentLruCache<K, V> {
    /// Creates a cache holding at most `cap` entries.
    pub fn new(cap: NonZeroUsize) -> Self {
        Self::init(LruCacheConfig::new(cap), None)
    }

    /// Creates a cache from a configuration and an optional hash builder.
    ///
    /// # Example
    ///
    /// ```rust
    /// use recency_cache::ConcurrentLruCache;
    /// use recency_cache::config::LruCacheConfig;
    ///
    /// let config = LruCacheConfig::try_new(10_000).unwrap();
    /// let cache: ConcurrentLruCache<String, i32> = ConcurrentLruCache::init(config, None);
    /// assert_eq!(cache.capacity(), 10_000);
    /// ```
    pub fn init(config: LruCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::init_with_hasher(config, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ConcurrentLruCache<K, V, S> {
    /// Creates a cache with a custom hash builder.
    pub fn init_with_hasher(config: LruCacheConfig, hash_builder: S) -> Self {
        Self {
            inner: Mutex::new(LruSegment::init(config, hash_builder)),
        }
    }

    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.inner.lock().cap().get()
    }

    /// Returns the number of entries currently stored.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if the cache contains no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Retrieves a clone of the value and marks the key most recently used.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Applies `f` to the value while holding the lock, avoiding a clone.
    /// Marks the key most recently used.
    ///
    /// `f` must not call back into this cache: the lock is not reentrant.
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.inner.lock().get(key).map(f)
    }

    /// Applies `f` to a mutable reference to the value while holding the lock.
    /// Marks the key most recently used.
    pub fn get_mut_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&mut V) -> R,
    {
        self.inner.lock().get_mut(key).map(f)
    }

    /// Retrieves a clone of the value without changing recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    /// Returns `true` if `key` is present. Does not change recency.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().contains(key)
    }

    /// Removes a key from the cache and returns its value.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().remove(key)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&self) -> Option<(K, V)> {
        self.inner.lock().pop_lru()
    }

    /// Removes all entries. The capacity is unchanged.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Takes a snapshot of the cache's counters.
    pub fn lru_metrics(&self) -> LruCacheMetrics {
        self.inner.lock().metrics()
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> ConcurrentLruCache<K, V, S> {
    /// Stores `value` under `key` and marks the key most recently used.
    ///
    /// Returns `true` if the key already existed, `false` if it was newly
    /// inserted (possibly evicting the least recently used entry).
    pub fn set(&self, key: K, value: V) -> bool {
        matches!(self.inner.lock().write(key, value), Write::Updated { .. })
    }

    /// Same as [`set`](Self::set), but returns the displaced entry: the old
    /// pair if the key existed, the evicted pair if insertion overflowed.
    pub fn put(&self, key: K, value: V) -> Option<(K, V)> {
        match self.inner.lock().write(key, value) {
            Write::Updated { key, old } => Some((key, old)),
            Write::Inserted { evicted } => evicted,
        }
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for ConcurrentLruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.lru_metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        "ConcurrentLRU"
    }
}

impl<K, V, S> core::fmt::Debug for ConcurrentLruCache<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ConcurrentLruCache")
            .field("inner", &*self.inner.lock())
            .finish()
    }
}

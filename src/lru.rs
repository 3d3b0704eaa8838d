//! Least Recently Used (LRU) Cache Implementation
//!
//! A fixed-capacity cache with O(1) insert, lookup and eviction. Two coupled
//! structures back it:
//!
//! - a [`List`] of `(key, value)` pairs ordered by recency, most recently used
//!   at the front and the next eviction candidate at the back;
//! - a hash map from key to the [`Handle`] of that key's list node.
//!
//! Every key in the map names exactly one node in the list and every node is
//! named by exactly one key. All operations below keep that bijection intact.
//!
//! # Algorithm
//!
//! - `get` moves the node to the front.
//! - `set` on an existing key moves the node to the front and overwrites the
//!   value in place.
//! - `set` on a new key pushes a node to the front. If the list then holds more
//!   than `capacity` nodes, the back node is popped and its key dropped from
//!   the map.
//!
//! Handles are stable across moves, so a move is a pure relink and never
//! reallocates.
//!
//! # Thread Safety
//!
//! [`LruCache`] takes `&mut self` for every recency-changing operation and
//! has no internal lock. For shared access use `ConcurrentLruCache` (feature
//! `concurrent`), which serializes every call through one mutex.

use crate::config::LruCacheConfig;
use crate::list::{self, Handle, List};
use crate::metrics::{CacheMetrics, CoreCacheMetrics, LruCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use tracing::{debug, trace};

#[cfg(feature = "hashbrown")]
pub use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
pub use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Upper bound on slots reserved up front. Larger caches grow on demand.
const MAX_PREALLOCATED: usize = 1 << 16;

/// Outcome of writing a key.
pub(crate) enum Write<K, V> {
    /// The key was present; its old value was replaced.
    Updated { key: K, old: V },
    /// The key was new. Carries the entry evicted to make room, if any.
    Inserted { evicted: Option<(K, V)> },
}

/// Internal LRU segment containing the cache algorithm.
///
/// Shared between `LruCache` (single-threaded) and `ConcurrentLruCache`
/// (behind one mutex), so both front ends run the same code.
pub(crate) struct LruSegment<K, V, S = DefaultHashBuilder> {
    config: LruCacheConfig,
    list: List<(K, V)>,
    map: HashMap<K, Handle, S>,
    metrics: CoreCacheMetrics,
}

impl<K: Hash + Eq, V, S: BuildHasher> LruSegment<K, V, S> {
    pub(crate) fn init(config: LruCacheConfig, hash_builder: S) -> Self {
        // A write may hold one node over capacity until the eviction runs.
        let reserve = config
            .capacity
            .get()
            .saturating_add(1)
            .min(MAX_PREALLOCATED);
        debug!(capacity = config.capacity.get(), "creating LRU cache");
        LruSegment {
            config,
            list: List::with_capacity(reserve),
            map: HashMap::with_capacity_and_hasher(reserve, hash_builder),
            metrics: CoreCacheMetrics::new(),
        }
    }

    #[inline]
    pub(crate) fn cap(&self) -> NonZeroUsize {
        self.config.capacity()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub(crate) fn metrics(&self) -> LruCacheMetrics {
        LruCacheMetrics {
            core: self.metrics.clone(),
            len: self.len(),
            capacity: self.cap().get(),
        }
    }

    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key).copied() {
            Some(handle) => {
                self.list.move_to_front(handle);
                self.metrics.record_hit();
                Some(&self.list.get(handle).1)
            }
            None => {
                self.metrics.record_miss();
                None
            }
        }
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key).copied() {
            Some(handle) => {
                self.list.move_to_front(handle);
                self.metrics.record_hit();
                Some(&mut self.list.get_mut(handle).1)
            }
            None => {
                self.metrics.record_miss();
                None
            }
        }
    }

    pub(crate) fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = *self.map.get(key)?;
        Some(&self.list.get(handle).1)
    }

    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    pub(crate) fn peek_lru(&self) -> Option<(&K, &V)> {
        let handle = self.list.back()?;
        let (key, value) = self.list.get(handle);
        Some((key, value))
    }

    pub(crate) fn write(&mut self, key: K, value: V) -> Write<K, V>
    where
        K: Clone,
    {
        if let Some(&handle) = self.map.get(&key) {
            self.list.move_to_front(handle);
            let old = core::mem::replace(&mut self.list.get_mut(handle).1, value);
            self.metrics.record_update();
            return Write::Updated { key, old };
        }

        let handle = self.list.push_front((key.clone(), value));
        self.map.insert(key, handle);
        self.metrics.record_insertion();

        let evicted = if self.list.len() > self.cap().get() {
            self.evict()
        } else {
            None
        };
        Write::Inserted { evicted }
    }

    fn evict(&mut self) -> Option<(K, V)> {
        let (key, value) = self.list.pop_back()?;
        self.map.remove(&key);
        self.metrics.record_eviction();
        trace!(len = self.list.len(), "evicted least recently used entry");
        Some((key, value))
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = self.map.remove(key)?;
        let (_, value) = self.list.remove(handle);
        self.metrics.record_removal();
        trace!(len = self.list.len(), "removed entry");
        Some(value)
    }

    pub(crate) fn pop_lru(&mut self) -> Option<(K, V)> {
        let (key, value) = self.list.pop_back()?;
        self.map.remove(&key);
        self.metrics.record_removal();
        trace!(len = self.list.len(), "popped least recently used entry");
        Some((key, value))
    }

    pub(crate) fn clear(&mut self) {
        let dropped = self.list.len();
        self.map.clear();
        self.list.clear();
        self.metrics.record_clear();
        debug!(dropped, "cleared LRU cache");
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Checks the list structure and the map/list bijection.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        self.list.is_well_formed()
            && self.map.len() == self.list.len()
            && self.list.len() <= self.cap().get()
            && self
                .map
                .iter()
                .all(|(key, &handle)| self.list.get(handle).0 == *key)
    }
}

impl<K, V, S> fmt::Debug for LruSegment<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruSegment")
            .field("capacity", &self.config.capacity())
            .field("len", &self.list.len())
            .finish()
    }
}

/// An implementation of a Least Recently Used (LRU) cache.
///
/// The cache has a fixed capacity and supports O(1) operations for
/// inserting, retrieving, and updating entries. When a new key would push the
/// cache over capacity, the least recently used entry is evicted.
///
/// # Examples
///
/// ```
/// use recency_cache::LruCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
///
/// assert!(!cache.set("apple", 1));
/// assert!(!cache.set("banana", 2));
///
/// // Accessing items updates their recency
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// // Adding beyond capacity evicts the least recently used item
/// cache.set("cherry", 3);
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
/// ```
#[derive(Debug)]
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    segment: LruSegment<K, V, S>,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates a cache holding at most `cap` entries.
    pub fn new(cap: NonZeroUsize) -> Self {
        Self::init(LruCacheConfig::new(cap), None)
    }

    /// Creates a cache from a configuration and an optional hash builder.
    pub fn init(config: LruCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self {
            segment: LruSegment::init(config, hasher.unwrap_or_default()),
        }
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates a cache with the given capacity and hash builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        Self::init_with_hasher(LruCacheConfig::new(cap), hash_builder)
    }

    /// Creates a cache from a configuration and a hash builder.
    pub fn init_with_hasher(config: LruCacheConfig, hash_builder: S) -> Self {
        Self {
            segment: LruSegment::init(config, hash_builder),
        }
    }

    /// Returns the maximum number of entries.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.segment.cap()
    }

    /// Returns the number of entries currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.segment.len()
    }

    /// Returns true if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segment.is_empty()
    }

    /// Looks up `key` and marks it most recently used.
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get(key)
    }

    /// Looks up `key` for mutation and marks it most recently used.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get_mut(key)
    }

    /// Looks up `key` without changing its recency.
    #[inline]
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.peek(key)
    }

    /// Returns true if `key` is present. Does not change recency.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.contains(key)
    }

    /// Returns the entry that would be evicted next, without touching it.
    #[inline]
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.segment.peek_lru()
    }

    /// Removes `key` and returns its value.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.remove(key)
    }

    /// Removes and returns the least recently used entry.
    #[inline]
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        self.segment.pop_lru()
    }

    /// Drops every entry. The capacity is unchanged.
    #[inline]
    pub fn clear(&mut self) {
        self.segment.clear()
    }

    /// Iterates over the entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.segment.iter()
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruCache<K, V, S> {
    /// Stores `value` under `key` and marks the key most recently used.
    ///
    /// Returns `true` if the key was already present (its value is replaced
    /// and nothing is evicted) and `false` if it was newly inserted. A new key
    /// that takes the cache over capacity evicts the least recently used
    /// entry.
    #[inline]
    pub fn set(&mut self, key: K, value: V) -> bool {
        matches!(self.segment.write(key, value), Write::Updated { .. })
    }

    /// Same as [`set`](Self::set), but returns the displaced entry.
    ///
    /// - `Some((key, old_value))` if the key existed
    /// - `Some((evicted_key, evicted_value))` if a new key caused an eviction
    /// - `None` if the key was inserted without eviction
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        match self.segment.write(key, value) {
            Write::Updated { key, old } => Some((key, old)),
            Write::Inserted { evicted } => evicted,
        }
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a LruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over cache entries in recency order, most recent first.
pub struct Iter<'a, K, V> {
    inner: list::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.inner.len())
            .finish()
    }
}

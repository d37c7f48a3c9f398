//! # Least Recently Used (LRU) Cache
//!
//! Bounded key→value store with access-order eviction. The locale resolver
//! uses it to memoize `raw header → ranked locales`, but the container is
//! generic and has no knowledge of headers.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                    ConcurrentLruCache<K, V>                      │
//!   │             Arc<RwLock<LruCore<K, Arc<V>>>>                      │
//!   └───────────────────────────────┬──────────────────────────────────┘
//!                                   ▼
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                         LruCore<K, V>                            │
//!   │                                                                  │
//!   │   FxHashMap<K, SlotId>            RecencyList<Entry<K, V>>       │
//!   │   ┌─────────┬────────┐                                           │
//!   │   │ "en-US" │ id_2 ──┼──┐   head ─► [id_1] ◄─► [id_2] ◄─► [id_3] │
//!   │   │ "da"    │ id_3 ──┼──┼─┐  (MRU)                       (LRU)   │
//!   │   │ "de"    │ id_1 ──┼┐ │ │                                      │
//!   │   └─────────┴────────┘│ │ │                                      │
//!   │                       └─┴─┴──► Entry { key, value }              │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The index holds the slot of each entry in the recency list, so lookup,
//! promotion and eviction are all O(1). No raw pointers are involved; links
//! are `SlotId`s into a slot arena.
//!
//! ## Operations
//!
//! | Method           | Recency update | Description                            |
//! |------------------|----------------|----------------------------------------|
//! | `insert(k, v)`   | yes            | Insert or overwrite, may evict the LRU |
//! | `push(k, v)`     | yes            | Like `insert`, reports what left       |
//! | `get(&k)`        | yes            | Lookup, promotes to MRU                |
//! | `touch(&k)`      | yes            | Promote without reading                |
//! | `peek(&k)`       | no             | Lookup without promotion               |
//! | `contains(&k)`   | no             | Existence check                        |
//! | `remove(&k)`     | -              | Drop one entry                         |
//! | `pop_lru()`      | -              | Remove the least recently used entry   |
//! | `peek_lru()`     | no             | Look at the least recently used entry  |
//! | `recency_rank()` | no             | O(n) position, 0 = MRU                 |
//!
//! ## Eviction
//!
//! Capacity is at least one. Inserting a key that is not yet present into a
//! full cache first removes exactly one entry: the back of the recency list.
//! Both `get` and `insert` move an entry to the front, so the back is always
//! the entry whose last read or write is oldest. Overwriting an existing key
//! never evicts.
//!
//! ```text
//!   capacity = 3
//!     head ─► [C] ◄─► [B] ◄─► [A] ◄── tail
//!   get(A):
//!     head ─► [A] ◄─► [C] ◄─► [B] ◄── tail
//!   insert(D):   evict B, then
//!     head ─► [D] ◄─► [A] ◄─► [C] ◄── tail
//! ```
//!
//! ## Thread Safety
//!
//! - `LruCore`: single-threaded; every recency change needs `&mut self`.
//! - `ConcurrentLruCache`: one `parking_lot::RwLock` around index and list.
//!   `get` takes the write lock because it reorders. Values are handed out
//!   as `Arc<V>`, so a reader never sees a value that is still being built
//!   and can keep it after eviction. Concurrent inserts of one key are
//!   serialized by the lock; the last writer wins.

use std::fmt;
use std::hash::Hash;
use std::mem;
use std::num::NonZeroUsize;
#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ds::{RecencyList, SlotId};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, LruMetricsRecorder, MetricsSnapshotProvider};
#[cfg(feature = "concurrency")]
use crate::traits::ConcurrentCache;
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Capacity used by `Default`.
pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1024) {
    Some(capacity) => capacity,
    None => panic!("default capacity must be non-zero"),
};

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Outcome of storing a key.
enum Stored<K, V> {
    Inserted,
    Replaced(K, V),
    Evicted(K, V),
}

/// Single-threaded LRU cache core.
///
/// Keys are cloned once on insert (the index and the list entry each own a
/// copy); values are stored as-is.
pub struct LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    index: FxHashMap<K, SlotId>,
    order: RecencyList<Entry<K, V>>,
    capacity: NonZeroUsize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Example
    /// ```
    /// use std::num::NonZeroUsize;
    /// use acceptkit::policy::lru::LruCore;
    ///
    /// let cache: LruCore<String, u32> = LruCore::with_capacity(NonZeroUsize::new(64).unwrap());
    /// assert_eq!(cache.capacity(), 64);
    /// ```
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        LruCore {
            index: FxHashMap::with_capacity_and_hasher(capacity.get(), Default::default()),
            order: RecencyList::with_capacity(capacity.get()),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        }
    }

    /// Fallible constructor for user-supplied capacities.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `capacity` is zero.
    ///
    /// # Example
    /// ```
    /// use acceptkit::policy::lru::LruCore;
    ///
    /// assert!(LruCore::<u32, u32>::try_new(1).is_ok());
    /// assert!(LruCore::<u32, u32>::try_new(0).is_err());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        NonZeroUsize::new(capacity)
            .map(Self::with_capacity)
            .ok_or_else(|| ConfigError::new("cache capacity must be at least 1"))
    }

    /// Maximum number of entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Read-only lookup; does not change recency.
    ///
    /// ```
    /// use acceptkit::policy::lru::LruCore;
    /// use acceptkit::traits::CoreCache;
    ///
    /// let mut cache = LruCore::try_new(2).unwrap();
    /// cache.insert(1, "first");
    /// cache.insert(2, "second");
    /// assert_eq!(cache.peek(&1), Some(&"first"));
    ///
    /// // 1 is still least recently used
    /// cache.insert(3, "third");
    /// assert!(!cache.contains(&1));
    /// ```
    #[inline]
    pub fn peek(&self, key: &K) -> Option<&V> {
        let &id = self.index.get(key)?;
        self.order.get(id).map(|entry| &entry.value)
    }

    /// Inserts like [`insert`](CoreCache::insert) but returns the entry that
    /// left the cache: the old pair for an overwrite, the evicted least
    /// recently used pair for a new key in a full cache, `None` otherwise.
    ///
    /// ```
    /// use acceptkit::policy::lru::LruCore;
    ///
    /// let mut cache = LruCore::try_new(1).unwrap();
    /// assert_eq!(cache.push("da", 1), None);
    /// assert_eq!(cache.push("da", 2), Some(("da", 1)));
    /// assert_eq!(cache.push("sk", 3), Some(("da", 2)));
    /// ```
    pub fn push(&mut self, key: K, value: V) -> Option<(K, V)> {
        match self.store(key, value) {
            Stored::Inserted => None,
            Stored::Replaced(key, old) | Stored::Evicted(key, old) => Some((key, old)),
        }
    }

    /// Entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.order.iter().map(|entry| (&entry.key, &entry.value))
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.order.iter().map(|entry| &entry.key)
    }

    /// Verifies that the index and the recency list describe the same set of
    /// entries and that the size bound holds.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but recency list holds {} entries",
                self.index.len(),
                self.order.len()
            )));
        }
        if self.index.len() > self.capacity.get() {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.index.len(),
                self.capacity
            )));
        }
        self.order.validate().map_err(InvariantError::new)?;
        for id in self.order.iter_ids() {
            let entry = self
                .order
                .get(id)
                .ok_or_else(|| InvariantError::new("recency list yielded a vacant slot"))?;
            if self.index.get(&entry.key) != Some(&id) {
                return Err(InvariantError::new(
                    "index entry does not point at its recency slot",
                ));
            }
        }
        Ok(())
    }

    fn store(&mut self, key: K, value: V) -> Stored<K, V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            self.order.move_to_front(id);
            if let Some(entry) = self.order.get_mut(id) {
                let previous = mem::replace(&mut entry.value, value);
                return Stored::Replaced(key, previous);
            }
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        let evicted = if self.index.len() >= self.capacity.get() {
            self.evict_lru()
        } else {
            None
        };

        let id = self.order.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);

        #[cfg(debug_assertions)]
        self.debug_validate();

        match evicted {
            Some(entry) => Stored::Evicted(entry.key, entry.value),
            None => Stored::Inserted,
        }
    }

    fn evict_lru(&mut self) -> Option<Entry<K, V>> {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        let entry = self.order.pop_back()?;
        self.index.remove(&entry.key);

        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();

        Some(entry)
    }

    #[cfg(debug_assertions)]
    fn debug_validate(&self) {
        debug_assert_eq!(self.index.len(), self.order.len());
        debug_assert!(self.index.len() <= self.capacity.get());
    }
}

impl<K, V> CoreCache<K, V> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.store(key, value) {
            Stored::Replaced(_, previous) => Some(previous),
            Stored::Inserted | Stored::Evicted(..) => None,
        }
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.order.move_to_front(id);
        self.order.get(id).map(|entry| &entry.value)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity.get()
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.index.clear();
        self.order.clear();
    }
}

impl<K, V> MutableCache<K, V> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        let entry = self.order.remove(id)?;

        #[cfg(debug_assertions)]
        self.debug_validate();

        Some(entry.value)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let entry = self.order.pop_back()?;
        self.index.remove(&entry.key);

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();

        Some((entry.key, entry.value))
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        self.order.back().map(|entry| (&entry.key, &entry.value))
    }

    fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        match self.index.get(key) {
            Some(&id) => {
                self.order.move_to_front(id);
                #[cfg(feature = "metrics")]
                self.metrics.record_touch_found();
                true
            },
            None => false,
        }
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        let &id = self.index.get(key)?;
        self.order.position(id)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            pop_lru_calls: self.metrics.pop_lru_calls,
            pop_lru_found: self.metrics.pop_lru_found,
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            cache_len: self.index.len(),
            capacity: self.capacity.get(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> fmt::Debug for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCore")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LRU cache with [`DEFAULT_CAPACITY`].
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl<K, V> Extend<(K, V)> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Thread-safe LRU cache sharing one lock across index and recency list.
///
/// Cloning is cheap and yields a handle to the same cache.
#[cfg(feature = "concurrency")]
pub struct ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    inner: Arc<RwLock<LruCore<K, Arc<V>>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> Clone for ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.read();
        f.debug_struct("ConcurrentLruCache")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> Default for ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        ConcurrentLruCache {
            inner: Arc::new(RwLock::new(LruCore::with_capacity(capacity))),
        }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError`] when `capacity` is zero.
    ///
    /// ```
    /// use acceptkit::policy::lru::ConcurrentLruCache;
    ///
    /// let cache: ConcurrentLruCache<String, u32> = ConcurrentLruCache::try_new(100).unwrap();
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(ConcurrentLruCache {
            inner: Arc::new(RwLock::new(LruCore::try_new(capacity)?)),
        })
    }

    /// Inserts a value, wrapping it in `Arc<V>` before taking the lock.
    ///
    /// ```
    /// use acceptkit::policy::lru::ConcurrentLruCache;
    ///
    /// let cache = ConcurrentLruCache::try_new(4).unwrap();
    /// assert!(cache.insert("en", 1).is_none());
    /// assert_eq!(*cache.insert("en", 2).unwrap(), 1);
    /// ```
    pub fn insert(&self, key: K, value: V) -> Option<Arc<V>> {
        self.insert_arc(key, Arc::new(value))
    }

    /// Inserts a pre-wrapped `Arc<V>`.
    pub fn insert_arc(&self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        let mut cache = self.inner.write();
        cache.insert(key, value)
    }

    /// See [`LruCore::push`].
    pub fn push(&self, key: K, value: Arc<V>) -> Option<(K, Arc<V>)> {
        let mut cache = self.inner.write();
        cache.push(key, value)
    }

    /// Lookup that promotes the entry to MRU; takes the write lock.
    ///
    /// ```
    /// use acceptkit::policy::lru::ConcurrentLruCache;
    ///
    /// let cache = ConcurrentLruCache::try_new(2).unwrap();
    /// cache.insert(1, "first");
    /// cache.insert(2, "second");
    /// assert_eq!(*cache.get(&1).unwrap(), "first");
    ///
    /// // 2 is now least recently used
    /// cache.insert(3, "third");
    /// assert!(cache.contains(&1));
    /// assert!(!cache.contains(&2));
    /// ```
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let mut cache = self.inner.write();
        cache.get(key).map(Arc::clone)
    }

    /// Lookup without promotion; takes the read lock.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        let cache = self.inner.read();
        cache.peek(key).map(Arc::clone)
    }

    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        let mut cache = self.inner.write();
        cache.remove(key)
    }

    pub fn touch(&self, key: &K) -> bool {
        let mut cache = self.inner.write();
        cache.touch(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    pub fn clear(&self) {
        self.inner.write().clear()
    }

    pub fn pop_lru(&self) -> Option<(K, Arc<V>)> {
        let mut cache = self.inner.write();
        cache.pop_lru()
    }

    pub fn peek_lru(&self) -> Option<(K, Arc<V>)> {
        let cache = self.inner.read();
        cache
            .peek_lru()
            .map(|(key, value)| (key.clone(), Arc::clone(value)))
    }

    /// Keys from most to least recently used, copied out under the read lock.
    pub fn keys(&self) -> Vec<K> {
        self.inner.read().keys().cloned().collect()
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.read().check_invariants()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentCache for ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
}

#[cfg(all(feature = "metrics", feature = "concurrency"))]
impl<K, V> ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.inner.read().metrics_snapshot()
    }
}

#[cfg(all(feature = "metrics", feature = "concurrency"))]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

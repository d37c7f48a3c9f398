//! # Cache Trait Hierarchy
//!
//! The memo cache behind the locale resolver is described by three small
//! traits, so the LRU core can be exercised (and swapped) independently of
//! header parsing.
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │  insert(&mut, K, V) → Option<V>         │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  contains / len / is_empty / capacity   │
//!   │  clear(&mut)                            │
//!   └──────────────────┬──────────────────────┘
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          MutableCache<K, V>             │
//!   │  remove(&K) → Option<V>                 │
//!   └──────────────────┬──────────────────────┘
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LruCacheTrait<K, V>            │
//!   │  pop_lru / peek_lru / touch             │
//!   │  recency_rank                           │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! `ConcurrentCache` is a `Send + Sync` marker for wrappers that carry their
//! own synchronization.
//!
//! ## Thread Safety
//!
//! Implementations of these traits take `&mut self` for anything that changes
//! recency and are not thread-safe on their own. Use
//! [`ConcurrentLruCache`](crate::policy::lru::ConcurrentLruCache) for shared
//! access.

/// Core cache operations.
///
/// # Example
///
/// ```
/// use acceptkit::policy::lru::LruCore;
/// use acceptkit::traits::CoreCache;
///
/// fn warm<C: CoreCache<String, usize>>(cache: &mut C, headers: &[&str]) {
///     for header in headers {
///         cache.insert(header.to_string(), header.len());
///     }
/// }
///
/// let mut cache = LruCore::try_new(8).unwrap();
/// warm(&mut cache, &["en-US", "de;q=0.5"]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    ///
    /// If the cache is at capacity and `key` is new, one entry is evicted
    /// according to the cache's policy before the new entry is stored.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// May update eviction state. Use [`contains`](Self::contains) to check
    /// existence without affecting eviction order.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries held at once.
    fn capacity(&self) -> usize;

    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// # Example
///
/// ```
/// use acceptkit::policy::lru::LruCore;
/// use acceptkit::traits::{CoreCache, MutableCache};
///
/// let mut cache = LruCore::try_new(4).unwrap();
/// cache.insert("da", 1);
/// assert_eq!(cache.remove(&"da"), Some(1));
/// assert_eq!(cache.remove(&"da"), None);
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a specific key-value pair.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes several keys; results are in input order.
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// LRU-specific operations that respect access order.
///
/// # Example
///
/// ```
/// use acceptkit::policy::lru::LruCore;
/// use acceptkit::traits::{CoreCache, LruCacheTrait};
///
/// let mut cache = LruCore::try_new(3).unwrap();
/// cache.insert(1, "first");
/// cache.insert(2, "second");
/// cache.insert(3, "third");
///
/// // Access key 1 to make it MRU
/// cache.get(&1);
///
/// // Key 2 is now LRU
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
///
/// // Touch without retrieving value
/// assert!(cache.touch(&2));
///
/// let (key, _) = cache.pop_lru().unwrap();
/// assert_eq!(key, 3);
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Peeks at the LRU entry without removing it or updating recency.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks an entry as recently used without retrieving the value.
    ///
    /// Returns `true` if the key was found.
    fn touch(&mut self, key: &K) -> bool;

    /// Recency rank of a key (0 = most recent).
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Marker for caches that synchronize internally.
///
/// ```
/// use acceptkit::traits::ConcurrentCache;
///
/// fn share<C: ConcurrentCache + 'static>(cache: std::sync::Arc<C>) {
///     std::thread::spawn(move || drop(cache));
/// }
/// ```
pub trait ConcurrentCache: Send + Sync {}

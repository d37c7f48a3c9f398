//! # Metrics Trait Hierarchy
//!
//! Recording and snapshotting are split into separate traits so the cache core
//! only ever writes counters and callers only ever read copies.
//!
//! ```text
//!   ┌─────────────────────────────┐
//!   │     CoreMetricsRecorder     │
//!   │  get_hit/get_miss/insert    │
//!   │  evict/clear                │
//!   └──────────────┬──────────────┘
//!                  ▼
//!   ┌─────────────────────────────┐      ┌──────────────────────────────┐
//!   │     LruMetricsRecorder      │      │ MetricsSnapshotProvider<S>   │
//!   │  pop_lru / touch            │      │ (tests, resolver stats)      │
//!   └─────────────────────────────┘      └──────────────────────────────┘
//! ```

/// Common counters for any cache policy.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Metrics for LRU behavior (recency order).
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
}

/// Snapshot provider for tests and stats endpoints.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

//! Cache counters (feature `metrics`).
//!
//! Recording lives in [`metrics_impl::LruMetrics`], owned by the cache core
//! and updated under whatever lock already guards the core. Reading goes
//! through [`snapshot::LruMetricsSnapshot`], a plain copy taken on demand.

pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

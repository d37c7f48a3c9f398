//! Errors raised by acceptkit.
//!
//! Header parsing is total and has no error type. Failures come from two
//! places only:
//!
//! - [`ConfigError`]: a cache or resolver was set up with unusable values,
//!   such as a zero capacity or an empty publication name.
//! - [`InvariantError`]: `check_invariants` found the cache index and its
//!   recency list out of step.
//!
//! ```
//! use acceptkit::policy::lru::LruCore;
//!
//! let headers = LruCore::<Option<String>, usize>::try_new(0);
//! assert!(headers.is_err());
//! ```

use thiserror::Error;

/// The LRU index and recency list disagree.
///
/// The message names the broken relation, e.g. a length mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// A cache or resolver setting was rejected at construction.
///
/// `Display` prefixes the message with `invalid configuration: `.
///
/// ```
/// use acceptkit::config::ResolverConfig;
///
/// let config = ResolverConfig { cache_capacity: 0, ..ResolverConfig::default() };
/// let err = config.validate().unwrap_err();
/// assert_eq!(err.to_string(), "invalid configuration: cache capacity must be at least 1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid configuration: {0}")]
pub struct ConfigError(String);

impl ConfigError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Message without the display prefix.
    pub fn message(&self) -> &str {
        &self.0
    }
}

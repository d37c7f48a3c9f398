//! acceptkit: `Accept-Language` parsing with a bounded LRU memo cache.
//!
//! - [`parser`]: header value → locales ranked by quality.
//! - [`policy::lru`]: generic LRU cache (`LruCore`, `ConcurrentLruCache`).
//! - [`resolver`]: cache-backed resolution and request-scope publishing.
//!
//! ```
//! use acceptkit::parser::parse;
//!
//! let locales = parse(Some("en-US;q=0.4,de;q=1"));
//! assert_eq!(locales[0].to_string(), "de");
//! assert_eq!(locales[1].to_string(), "en_US");
//! ```

pub mod config;
pub mod ds;
pub mod error;
pub mod locale;
pub mod parser;
pub mod policy;

#[cfg(feature = "concurrency")]
pub mod builder;
#[cfg(feature = "concurrency")]
pub mod resolver;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;

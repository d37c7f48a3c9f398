pub use crate::config::ResolverConfig;
pub use crate::error::{ConfigError, InvariantError};
pub use crate::locale::{LanguageTag, Locale};
pub use crate::parser::{parse, parse_tags};
pub use crate::policy::lru::LruCore;
pub use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

#[cfg(feature = "concurrency")]
pub use crate::builder::ResolverBuilder;
#[cfg(feature = "concurrency")]
pub use crate::policy::lru::ConcurrentLruCache;
#[cfg(feature = "concurrency")]
pub use crate::resolver::{LocaleAttribute, LocaleResolver, RequestScope, Resolution};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::LruMetricsSnapshot;

//! Request-level locale resolution.
//!
//! [`LocaleResolver`] ties the parser to the LRU cache: it turns the raw
//! `Accept-Language` value of a request into a ranked locale list plus a
//! primary locale, and can publish both into whatever request-scoped state
//! the surrounding framework keeps.
//!
//! ```text
//!   header ──► caching? ──no──────────────────────► parse ──┐
//!                │ yes                                      │
//!                ▼                                          ▼
//!          cache.get(header) ──hit──► Arc<Vec<Locale>> ──► Resolution
//!                │ miss                     ▲              { locales,
//!                ▼                          │                primary }
//!             parse ──► cache.push(header) ─┘
//! ```
//!
//! The cache key is the raw header, `None` included, so a request without
//! the header is memoized like any other. Two threads missing on the same
//! header both parse it; the later insert overwrites the earlier one with an
//! equal value.

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::builder::ResolverBuilder;
use crate::config::ResolverConfig;
use crate::error::ConfigError;
use crate::locale::Locale;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
use crate::parser;
use crate::policy::lru::ConcurrentLruCache;

type HeaderCache = ConcurrentLruCache<Option<String>, Vec<Locale>>;

/// Outcome of resolving one header.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Locales ranked by quality; shared with the cache when caching.
    pub locales: Arc<Vec<Locale>>,
    /// First ranked locale, or the configured default when there is none.
    pub primary: Locale,
}

/// Value published into a [`RequestScope`].
#[derive(Debug, Clone, PartialEq)]
pub enum LocaleAttribute {
    Locales(Arc<Vec<Locale>>),
    Locale(Locale),
}

/// Request-scoped attribute storage the resolver publishes into.
///
/// Implemented for `HashMap<String, LocaleAttribute>`; web frameworks adapt
/// their own request extensions to it.
pub trait RequestScope {
    fn set_attribute(&mut self, name: &str, value: LocaleAttribute);
}

impl<S: BuildHasher> RequestScope for HashMap<String, LocaleAttribute, S> {
    fn set_attribute(&mut self, name: &str, value: LocaleAttribute) {
        self.insert(name.to_owned(), value);
    }
}

/// Resolves `Accept-Language` headers, optionally memoizing the parse.
///
/// Cheap to share behind an `Arc`; cloning shares the cache.
///
/// # Example
///
/// ```
/// use acceptkit::locale::Locale;
/// use acceptkit::resolver::LocaleResolver;
///
/// let resolver = LocaleResolver::builder().caching(true).try_build().unwrap();
///
/// let resolution = resolver.resolve(Some("en-US;q=0.4,de;q=1"));
/// assert_eq!(resolution.primary, Locale::new("de"));
/// assert_eq!(resolution.locales.len(), 2);
///
/// // no header: empty list, default primary
/// let resolution = resolver.resolve(None);
/// assert!(resolution.locales.is_empty());
/// assert_eq!(resolution.primary, Locale::english());
/// ```
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    config: ResolverConfig,
    cache: Option<HeaderCache>,
}

impl LocaleResolver {
    /// Creates a resolver after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when [`ResolverConfig::validate`] fails.
    pub fn new(config: ResolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let cache = if config.caching {
            Some(HeaderCache::try_new(config.cache_capacity)?)
        } else {
            None
        };

        debug!(
            caching = config.caching,
            cache_capacity = config.cache_capacity,
            default_locale = %config.default_locale,
            locales_name = %config.locales_name,
            locale_name = %config.locale_name,
            "locale resolver initialized"
        );

        Ok(LocaleResolver { config, cache })
    }

    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn is_caching(&self) -> bool {
        self.cache.is_some()
    }

    /// Ranked locales plus the primary locale for `header`.
    pub fn resolve(&self, header: Option<&str>) -> Resolution {
        let locales = self.locales(header);
        let primary = locales
            .first()
            .cloned()
            .unwrap_or_else(|| self.config.default_locale.clone());
        Resolution { locales, primary }
    }

    /// Ranked locales for `header`, served from the cache when enabled.
    pub fn locales(&self, header: Option<&str>) -> Arc<Vec<Locale>> {
        let Some(cache) = &self.cache else {
            return Arc::new(parser::parse(header));
        };

        let key = header.map(str::to_owned);
        if let Some(locales) = cache.get(&key) {
            trace!(header = ?header, "locale cache hit");
            return locales;
        }

        trace!(header = ?header, "locale cache miss");
        let locales = Arc::new(parser::parse(header));
        if let Some((displaced, _)) = cache.push(key, Arc::clone(&locales)) {
            if displaced.as_deref() != header {
                trace!(evicted = ?displaced, "evicted least recently used header");
            }
        }
        locales
    }

    /// Resolves `header` and publishes the list under `locales_name` and the
    /// primary locale under `locale_name`.
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use acceptkit::locale::Locale;
    /// use acceptkit::resolver::{LocaleAttribute, LocaleResolver};
    ///
    /// let resolver = LocaleResolver::builder().try_build().unwrap();
    /// let mut scope: HashMap<String, LocaleAttribute> = HashMap::new();
    /// resolver.handle(Some("da,en;q=0.7"), &mut scope);
    ///
    /// assert_eq!(scope.get("locale"), Some(&LocaleAttribute::Locale(Locale::new("da"))));
    /// assert!(matches!(scope.get("locales"), Some(LocaleAttribute::Locales(list)) if list.len() == 2));
    /// ```
    pub fn handle<S>(&self, header: Option<&str>, scope: &mut S) -> Resolution
    where
        S: RequestScope + ?Sized,
    {
        let resolution = self.resolve(header);
        scope.set_attribute(
            &self.config.locales_name,
            LocaleAttribute::Locales(Arc::clone(&resolution.locales)),
        );
        scope.set_attribute(
            &self.config.locale_name,
            LocaleAttribute::Locale(resolution.primary.clone()),
        );
        resolution
    }

    /// Number of memoized headers; zero when caching is off.
    pub fn cached_headers(&self) -> usize {
        self.cache.as_ref().map_or(0, HeaderCache::len)
    }

    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
            debug!("locale cache cleared");
        }
    }

    /// Cache counters, `None` when caching is off.
    #[cfg(feature = "metrics")]
    pub fn cache_metrics(&self) -> Option<LruMetricsSnapshot> {
        self.cache.as_ref().map(HeaderCache::metrics_snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caching_resolver(capacity: usize) -> LocaleResolver {
        LocaleResolver::builder()
            .caching(true)
            .cache_capacity(capacity)
            .try_build()
            .unwrap()
    }

    mod resolve {
        use super::*;

        #[test]
        fn test_primary_is_first_ranked() {
            let resolver = LocaleResolver::new(ResolverConfig::default()).unwrap();
            let resolution = resolver.resolve(Some("en-US;q=0.4,de;q=1"));
            assert_eq!(resolution.primary, Locale::new("de"));
            assert_eq!(
                *resolution.locales,
                vec![Locale::new("de"), Locale::new("en").with_region("US")]
            );
        }

        #[test]
        fn test_absent_header_falls_back_to_default() {
            let resolver = LocaleResolver::builder()
                .default_locale(Locale::new("sk"))
                .try_build()
                .unwrap();
            let resolution = resolver.resolve(None);
            assert!(resolution.locales.is_empty());
            assert_eq!(resolution.primary, Locale::new("sk"));
        }

        #[test]
        fn test_empty_header_primary_is_empty_locale() {
            let resolver = LocaleResolver::new(ResolverConfig::default()).unwrap();
            let resolution = resolver.resolve(Some(""));
            assert_eq!(resolution.primary, Locale::new(""));
        }

        #[test]
        fn test_trailing_separators_do_not_add_locales() {
            let resolver = LocaleResolver::builder()
                .default_locale(Locale::new("sk"))
                .try_build()
                .unwrap();

            let resolution = resolver.resolve(Some("da,"));
            assert_eq!(*resolution.locales, vec![Locale::new("da")]);
            assert_eq!(resolution.primary, Locale::new("da"));

            let resolution = resolver.resolve(Some(",,"));
            assert!(resolution.locales.is_empty());
            assert_eq!(resolution.primary, Locale::new("sk"));
        }

        #[test]
        fn test_invalid_config_is_rejected() {
            let config = ResolverConfig {
                cache_capacity: 0,
                ..ResolverConfig::default()
            };
            assert!(LocaleResolver::new(config).is_err());
        }
    }

    mod caching {
        use super::*;

        #[test]
        fn test_disabled_cache_parses_every_time() {
            let resolver = LocaleResolver::new(ResolverConfig::default()).unwrap();
            assert!(!resolver.is_caching());
            let first = resolver.locales(Some("da"));
            let second = resolver.locales(Some("da"));
            assert_eq!(first, second);
            assert!(!Arc::ptr_eq(&first, &second));
            assert_eq!(resolver.cached_headers(), 0);
        }

        #[test]
        fn test_hit_returns_shared_list() {
            let resolver = caching_resolver(4);
            let first = resolver.locales(Some("da,en;q=0.7"));
            let second = resolver.locales(Some("da,en;q=0.7"));
            assert!(Arc::ptr_eq(&first, &second));
            assert_eq!(resolver.cached_headers(), 1);
        }

        #[test]
        fn test_absent_and_empty_headers_are_distinct_keys() {
            let resolver = caching_resolver(4);
            assert!(resolver.locales(None).is_empty());
            assert_eq!(resolver.locales(Some("")).len(), 1);
            assert!(resolver.locales(None).is_empty());
            assert_eq!(resolver.cached_headers(), 2);
        }

        #[test]
        fn test_capacity_bounds_cached_headers() {
            let resolver = caching_resolver(2);
            let da = resolver.locales(Some("da"));
            let de = resolver.locales(Some("de"));
            resolver.locales(Some("da"));
            resolver.locales(Some("sk"));
            assert_eq!(resolver.cached_headers(), 2);

            // "da" was read last and stays; "de" was least recently used
            assert!(Arc::ptr_eq(&da, &resolver.locales(Some("da"))));
            assert!(!Arc::ptr_eq(&de, &resolver.locales(Some("de"))));
        }

        #[test]
        fn test_clear_cache() {
            let resolver = caching_resolver(4);
            resolver.locales(Some("da"));
            resolver.clear_cache();
            assert_eq!(resolver.cached_headers(), 0);
        }

        #[cfg(feature = "metrics")]
        #[test]
        fn test_cache_metrics_count_hits_and_misses() {
            let resolver = caching_resolver(1);
            resolver.resolve(Some("da"));
            resolver.resolve(Some("da"));
            resolver.resolve(Some("sk"));

            let metrics = resolver.cache_metrics().unwrap();
            assert_eq!(metrics.get_hits, 1);
            assert_eq!(metrics.get_misses, 2);
            assert_eq!(metrics.evicted_entries, 1);
            assert_eq!(metrics.cache_len, 1);
            assert_eq!(metrics.capacity, 1);

            let uncached = LocaleResolver::new(ResolverConfig::default()).unwrap();
            assert!(uncached.cache_metrics().is_none());
        }
    }

    mod publishing {
        use super::*;

        #[test]
        fn test_handle_uses_configured_names() {
            let resolver = LocaleResolver::builder()
                .locales_name("acceptLanguages")
                .locale_name("acceptLanguage")
                .try_build()
                .unwrap();
            let mut scope: HashMap<String, LocaleAttribute> = HashMap::new();
            let resolution = resolver.handle(Some("sk,da;q=0.5"), &mut scope);

            assert_eq!(scope.len(), 2);
            assert_eq!(
                scope.get("acceptLanguage"),
                Some(&LocaleAttribute::Locale(Locale::new("sk")))
            );
            assert_eq!(
                scope.get("acceptLanguages"),
                Some(&LocaleAttribute::Locales(Arc::clone(&resolution.locales)))
            );
        }

        #[test]
        fn test_handle_publishes_default_for_absent_header() {
            let resolver = LocaleResolver::new(ResolverConfig::default()).unwrap();
            let mut scope: HashMap<String, LocaleAttribute> = HashMap::new();
            resolver.handle(None, &mut scope);
            assert_eq!(
                scope.get("locale"),
                Some(&LocaleAttribute::Locale(Locale::english()))
            );
            assert_eq!(
                scope.get("locales"),
                Some(&LocaleAttribute::Locales(Arc::new(Vec::new())))
            );
        }

        #[test]
        fn test_custom_scope() {
            #[derive(Default)]
            struct Recorder(Vec<String>);

            impl RequestScope for Recorder {
                fn set_attribute(&mut self, name: &str, _value: LocaleAttribute) {
                    self.0.push(name.to_owned());
                }
            }

            let resolver = LocaleResolver::new(ResolverConfig::default()).unwrap();
            let mut recorder = Recorder::default();
            resolver.handle(Some("da"), &mut recorder);
            assert_eq!(recorder.0, vec!["locales", "locale"]);
        }
    }

    #[test]
    fn test_resolver_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LocaleResolver>();
    }
}

//! Resolver configuration.
//!
//! [`ResolverConfig`] carries every tunable of a
//! [`LocaleResolver`](crate::resolver::LocaleResolver). It can be built in
//! code (usually through [`ResolverBuilder`](crate::builder::ResolverBuilder))
//! or, with the `serde` feature, deserialized from any serde format. Missing
//! fields fall back to their defaults.
//!
//! | Field            | Default     |
//! |------------------|-------------|
//! | `caching`        | `false`     |
//! | `cache_capacity` | `1024`      |
//! | `default_locale` | `en`        |
//! | `locales_name`   | `"locales"` |
//! | `locale_name`    | `"locale"`  |

use crate::error::ConfigError;
use crate::locale::Locale;

pub const DEFAULT_CACHE_CAPACITY: usize = 1024;
pub const DEFAULT_LOCALES_NAME: &str = "locales";
pub const DEFAULT_LOCALE_NAME: &str = "locale";

/// Settings for a locale resolver.
///
/// # Example
///
/// ```
/// use acceptkit::config::ResolverConfig;
///
/// let config = ResolverConfig {
///     caching: true,
///     ..ResolverConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// assert_eq!(config.cache_capacity, 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ResolverConfig {
    /// Memoize parse results per raw header value.
    pub caching: bool,
    /// Maximum number of distinct headers kept when caching.
    pub cache_capacity: usize,
    /// Primary locale when a header yields no locales.
    pub default_locale: Locale,
    /// Request-scope name the ranked list is published under.
    pub locales_name: String,
    /// Request-scope name the primary locale is published under.
    pub locale_name: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            caching: false,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            default_locale: Locale::english(),
            locales_name: DEFAULT_LOCALES_NAME.to_owned(),
            locale_name: DEFAULT_LOCALE_NAME.to_owned(),
        }
    }
}

impl ResolverConfig {
    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// - `cache_capacity` is zero (checked even with caching off)
    /// - either publication name is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_capacity == 0 {
            return Err(ConfigError::new("cache capacity must be at least 1"));
        }
        if self.locales_name.is_empty() {
            return Err(ConfigError::new("locales name must not be empty"));
        }
        if self.locale_name.is_empty() {
            return Err(ConfigError::new("locale name must not be empty"));
        }
        Ok(())
    }
}

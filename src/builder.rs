//! Builder for [`LocaleResolver`].
//!
//! Starts from [`ResolverConfig::default`] and overrides one setting per
//! call. Validation happens once, in [`ResolverBuilder::try_build`].
//!
//! ## Example
//!
//! ```rust
//! use acceptkit::builder::ResolverBuilder;
//! use acceptkit::locale::Locale;
//!
//! let resolver = ResolverBuilder::new()
//!     .caching(true)
//!     .cache_capacity(256)
//!     .default_locale(Locale::new("da"))
//!     .try_build()
//!     .unwrap();
//!
//! assert_eq!(resolver.resolve(None).primary, Locale::new("da"));
//! ```

use crate::config::ResolverConfig;
use crate::error::ConfigError;
use crate::locale::Locale;
use crate::resolver::LocaleResolver;

/// Chainable construction of a [`LocaleResolver`].
#[derive(Debug, Clone, Default)]
pub struct ResolverBuilder {
    config: ResolverConfig,
}

impl ResolverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration, e.g. one loaded with serde.
    pub fn from_config(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Enables or disables memoization of parse results.
    pub fn caching(mut self, enabled: bool) -> Self {
        self.config.caching = enabled;
        self
    }

    /// Maximum number of distinct headers kept; must be at least 1.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.config.cache_capacity = capacity;
        self
    }

    pub fn default_locale(mut self, locale: Locale) -> Self {
        self.config.default_locale = locale;
        self
    }

    pub fn locales_name(mut self, name: impl Into<String>) -> Self {
        self.config.locales_name = name.into();
        self
    }

    pub fn locale_name(mut self, name: impl Into<String>) -> Self {
        self.config.locale_name = name.into();
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Validates the configuration and builds the resolver.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration is invalid.
    pub fn try_build(self) -> Result<LocaleResolver, ConfigError> {
        LocaleResolver::new(self.config)
    }
}

//! Locale identifiers and quality-weighted language tags.
//!
//! A [`Locale`] is the `(language, region?, variant?)` triple derived from a
//! tag such as `en-US` or `de_CH_1996`. Subtags are kept as written; no case
//! folding or registry lookup takes place.
//!
//! ```text
//!   "en-US-POSIX"  ──normalize──►  "en_US_POSIX"  ──split '_'──►
//!       Locale { language: "en", region: Some("US"), variant: Some("POSIX") }
//! ```

use std::fmt;

use crate::parser::split_fields;

/// Quality assumed when an entry carries no usable `q` parameter.
pub const DEFAULT_QUALITY: f64 = 1.0;

/// Language/region/variant triple.
///
/// # Example
///
/// ```
/// use acceptkit::locale::Locale;
///
/// let locale = Locale::from_tag("en-US");
/// assert_eq!(locale.language, "en");
/// assert_eq!(locale.region.as_deref(), Some("US"));
/// assert_eq!(locale.to_string(), "en_US");
/// assert_eq!(locale.to_language_tag(), "en-US");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Locale {
    pub language: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub region: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub variant: Option<String>,
}

impl Locale {
    /// Locale with only a language subtag.
    pub fn new(language: impl Into<String>) -> Self {
        Locale {
            language: language.into(),
            region: None,
            variant: None,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets the variant. A variant without a region renders as `lang__variant`.
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Fallback used when a header names no locale at all.
    pub fn english() -> Self {
        Locale::new("en")
    }

    /// Builds a locale from a tag written with `-` or `_` separators.
    ///
    /// Only the first three subtags are kept. Inner empty subtags stay as
    /// empty strings, trailing ones are dropped: `"en-"` has no region and
    /// `""` or `"-"` yield an empty language.
    ///
    /// ```
    /// use acceptkit::locale::Locale;
    ///
    /// let locale = Locale::from_tag("de-CH-1996-extra");
    /// assert_eq!(locale, Locale::new("de").with_region("CH").with_variant("1996"));
    /// assert_eq!(Locale::from_tag(""), Locale::new(""));
    /// ```
    pub fn from_tag(tag: &str) -> Self {
        Self::from_normalized(&tag.replace('-', "_"))
    }

    /// Splits an already `_`-separated tag.
    pub(crate) fn from_normalized(tag: &str) -> Self {
        let mut subtags = split_fields(tag, '_').into_iter();
        let language = subtags.next().unwrap_or_default().to_owned();
        let region = subtags.next().map(str::to_owned);
        let variant = subtags.next().map(str::to_owned);
        Locale {
            language,
            region,
            variant,
        }
    }

    /// Hyphenated wire form, e.g. `en-US`.
    pub fn to_language_tag(&self) -> String {
        self.join('-')
    }

    fn join(&self, separator: char) -> String {
        let mut out = self.language.clone();
        if self.region.is_some() || self.variant.is_some() {
            out.push(separator);
            out.push_str(self.region.as_deref().unwrap_or_default());
        }
        if let Some(variant) = &self.variant {
            out.push(separator);
            out.push_str(variant);
        }
        out
    }
}

impl fmt::Display for Locale {
    /// Underscore form, e.g. `en_US` or `de_CH_1996`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join('_'))
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Locale::from_tag(tag)
    }
}

/// Normalized tag with its client-stated quality.
///
/// Quality is not range-checked: `q=5` and `q=inf` are taken at face value.
/// Produced by [`LanguageTag::parse`] and
/// [`parse_tags`](crate::parser::parse_tags).
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageTag {
    /// Primary tag with every `-` replaced by `_`.
    pub tag: String,
    pub quality: f64,
}

impl LanguageTag {
    pub fn new(tag: impl Into<String>, quality: f64) -> Self {
        LanguageTag {
            tag: tag.into(),
            quality,
        }
    }

    pub fn to_locale(&self) -> Locale {
        Locale::from_normalized(&self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod construction {
        use super::*;

        #[test]
        fn test_single_subtag_is_language_only() {
            let locale = Locale::from_tag("da");
            assert_eq!(locale.language, "da");
            assert!(locale.region.is_none());
            assert!(locale.variant.is_none());
        }

        #[test]
        fn test_two_subtags_give_region() {
            assert_eq!(Locale::from_tag("en_US"), Locale::new("en").with_region("US"));
            assert_eq!(Locale::from_tag("en-US"), Locale::new("en").with_region("US"));
        }

        #[test]
        fn test_extra_subtags_are_dropped() {
            let locale = Locale::from_tag("zh-Hant-TW-x-private");
            assert_eq!(locale.language, "zh");
            assert_eq!(locale.region.as_deref(), Some("Hant"));
            assert_eq!(locale.variant.as_deref(), Some("TW"));
        }

        #[test]
        fn test_inner_empty_subtags_are_kept() {
            assert_eq!(Locale::from_tag(""), Locale::new(""));
            assert_eq!(
                Locale::from_tag("en__POSIX"),
                Locale::new("en").with_region("").with_variant("POSIX")
            );
        }

        #[test]
        fn test_trailing_empty_subtags_are_dropped() {
            assert_eq!(Locale::from_tag("_"), Locale::new(""));
            assert_eq!(Locale::from_tag("en-"), Locale::new("en"));
            assert_eq!(Locale::from_tag("en-US-"), Locale::new("en").with_region("US"));
            assert_eq!(
                Locale::from_tag("de-CH-1996-"),
                Locale::new("de").with_region("CH").with_variant("1996")
            );
        }

        #[test]
        fn test_case_is_preserved() {
            assert_eq!(Locale::from_tag("EN-us").to_string(), "EN_us");
        }

        #[test]
        fn test_english_fallback() {
            assert_eq!(Locale::english(), Locale::from("en"));
        }
    }

    mod formatting {
        use super::*;

        #[test]
        fn test_display_uses_underscores() {
            assert_eq!(Locale::new("de").to_string(), "de");
            assert_eq!(Locale::from_tag("en-US").to_string(), "en_US");
            assert_eq!(Locale::from_tag("de-CH-1996").to_string(), "de_CH_1996");
        }

        #[test]
        fn test_variant_without_region_keeps_empty_slot() {
            let locale = Locale::new("en").with_variant("POSIX");
            assert_eq!(locale.to_string(), "en__POSIX");
            assert_eq!(locale.to_language_tag(), "en--POSIX");
        }

        #[test]
        fn test_language_tag_form() {
            assert_eq!(Locale::from_tag("pt_BR").to_language_tag(), "pt-BR");
            assert_eq!(Locale::new("sk").to_language_tag(), "sk");
        }
    }

    #[test]
    fn test_language_tag_to_locale() {
        let tag = LanguageTag::new("en_GB", 0.8);
        assert_eq!(tag.to_locale(), Locale::new("en").with_region("GB"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_missing_optional_subtags() {
        let locale: Locale = serde_json::from_str(r#"{"language":"fr"}"#).unwrap();
        assert_eq!(locale, Locale::new("fr"));

        let json = serde_json::to_string(&Locale::from_tag("fr-CA")).unwrap();
        let back: Locale = serde_json::from_str(&json).unwrap();
        assert_eq!(back.region.as_deref(), Some("CA"));
    }
}

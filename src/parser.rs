//! `Accept-Language` parsing.
//!
//! Turns a raw header value into locales ordered by descending quality.
//! Parsing never fails: fragments that cannot be understood degrade to
//! defaults instead of being rejected.
//!
//! ```text
//!   "en-US;q=0.4, de;q=1"
//!        │ split ','
//!        ▼
//!   ["en-US;q=0.4", " de;q=1"]          trailing empty segments dropped
//!        │ per entry: trim, '-' → '_', split ';'
//!        ▼
//!   [LanguageTag("en_US", 0.4), LanguageTag("de", 1.0)]
//!        │ stable sort, quality descending
//!        ▼
//!   [de, en_US]
//! ```
//!
//! ## Quality rules
//!
//! - Only the parameter fragments after the primary tag are inspected.
//! - The first fragment that starts with `q=` (after trimming) decides; later
//!   ones are ignored even if the first one is unparsable.
//! - Missing, unparsable or `NaN` values count as `1.0`.
//! - `-` is normalized to `_` over the whole entry, parameters included, so a
//!   value such as `q=-1` or `q=1e-3` is unparsable and counts as `1.0`.
//! - Entries with equal quality keep their header order.
//!
//! ## Empty segments
//!
//! Splitting on `,` (and on `_` inside a tag) keeps inner empty pieces but
//! drops trailing ones, so `"da,"` is `[da]`, `",,"` is `[]` and `"en-"` has
//! no region. An empty header is the exception and yields one empty tag.

use std::cmp::Ordering;

use crate::locale::{LanguageTag, Locale, DEFAULT_QUALITY};

/// Parses a header into locales, most preferred first.
///
/// An absent header yields an empty list.
///
/// # Example
///
/// ```
/// use acceptkit::locale::Locale;
/// use acceptkit::parser::parse;
///
/// let locales = parse(Some("da, en-GB;q=0.8, en;q=0.7"));
/// assert_eq!(
///     locales,
///     vec![
///         Locale::new("da"),
///         Locale::new("en").with_region("GB"),
///         Locale::new("en"),
///     ]
/// );
/// assert!(parse(None).is_empty());
/// ```
pub fn parse(header: Option<&str>) -> Vec<Locale> {
    match header {
        Some(header) => parse_tags(header)
            .iter()
            .map(LanguageTag::to_locale)
            .collect(),
        None => Vec::new(),
    }
}

/// Parses a header into normalized tags ranked by quality.
///
/// Every `,`-separated segment up to the last non-empty one produces a tag.
///
/// ```
/// use acceptkit::parser::parse_tags;
///
/// let tags = parse_tags("fr;q=0.5,it");
/// assert_eq!(tags[0].tag, "it");
/// assert_eq!(tags[1].quality, 0.5);
/// ```
pub fn parse_tags(header: &str) -> Vec<LanguageTag> {
    let mut tags: Vec<LanguageTag> = split_fields(header, ',')
        .into_iter()
        .map(LanguageTag::parse)
        .collect();
    // `sort_by` is stable; qualities are never NaN.
    tags.sort_by(|a, b| b.quality.partial_cmp(&a.quality).unwrap_or(Ordering::Equal));
    tags
}

impl LanguageTag {
    /// Parses one header entry such as `en-US;q=0.4`.
    ///
    /// ```
    /// use acceptkit::locale::LanguageTag;
    ///
    /// assert_eq!(LanguageTag::parse(" en-US;q=0.4"), LanguageTag::new("en_US", 0.4));
    /// assert_eq!(LanguageTag::parse("de;q=high").quality, 1.0);
    /// ```
    pub fn parse(entry: &str) -> LanguageTag {
        let normalized = entry.trim().replace('-', "_");
        let mut fragments = normalized.split(';');
        let tag = fragments.next().unwrap_or_default().to_owned();
        let quality = fragments
            .map(str::trim)
            .find_map(|fragment| fragment.strip_prefix("q="))
            .map_or(DEFAULT_QUALITY, parse_quality);
        LanguageTag { tag, quality }
    }
}

/// Splits on `separator`, dropping trailing empty pieces. `""` yields `[""]`.
pub(crate) fn split_fields(input: &str, separator: char) -> Vec<&str> {
    if input.is_empty() {
        return vec![input];
    }
    let mut fields: Vec<&str> = input.split(separator).collect();
    while fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }
    fields
}

fn parse_quality(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(quality) if !quality.is_nan() => quality,
        _ => DEFAULT_QUALITY,
    }
}

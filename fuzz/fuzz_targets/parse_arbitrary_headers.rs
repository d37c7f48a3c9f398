#![no_main]

use acceptkit::locale::Locale;
use acceptkit::parser::{parse, parse_tags};
use libfuzzer_sys::fuzz_target;

// Arbitrary header bytes: parsing never panics, qualities come out sorted,
// at most one locale per ',' segment, and parsing twice gives the same result.
fuzz_target!(|data: &[u8]| {
    let header = String::from_utf8_lossy(data);
    let header: &str = &header;

    let tags = parse_tags(header);
    assert!(tags.len() <= header.split(',').count());
    if header.is_empty() {
        assert_eq!(tags.len(), 1);
    }
    for pair in tags.windows(2) {
        assert!(!pair[0].quality.is_nan());
        assert!(pair[0].quality >= pair[1].quality);
    }

    let locales = parse(Some(header));
    assert_eq!(locales.len(), tags.len());
    assert_eq!(locales, parse(Some(header)));

    for (tag, locale) in tags.iter().zip(&locales) {
        assert!(!tag.tag.contains('-'));
        assert_eq!(&tag.to_locale(), locale);
        // rendering and re-reading keeps language and region
        let reparsed = Locale::from_tag(&locale.to_string());
        assert_eq!(reparsed.language, locale.language);
    }
});

//! Conversion between jabba's legacy `1.N` numbering and modern `N`
//! numbering.
//!
//! Only majors 9 and above have a modern rendering. Legacy tokens for older
//! majors (`openjdk@1.8.0`) pass through [`to_display`] untouched.

use crate::types::{DisplayVersion, LEGACY_PREFIX, RawVersion, VENDOR_SEPARATOR, leading_number};

const FIRST_MODERN_MAJOR: u32 = 9;

/// Rewrites `vendor@X.Y.Z` as `vendor@1.X.Y.Z`.
///
/// Tokens without a vendor, or already in legacy form, are returned as-is.
#[must_use]
pub fn to_legacy(display: &DisplayVersion) -> RawVersion {
    let text = display.as_str();
    let Some((vendor, version)) = text.split_once(VENDOR_SEPARATOR) else {
        return RawVersion::new(text);
    };

    if version.starts_with(LEGACY_PREFIX) {
        return RawVersion::new(text);
    }

    RawVersion::new(format!("{vendor}{VENDOR_SEPARATOR}{LEGACY_PREFIX}{version}"))
}

/// Rewrites `vendor@1.X.Y.Z` as `vendor@X.Y.Z` when `X >= 9`.
#[must_use]
pub fn to_display(raw: &RawVersion) -> DisplayVersion {
    let text = raw.as_str();
    let Some((vendor, version)) = text.split_once(VENDOR_SEPARATOR) else {
        return DisplayVersion::new(text);
    };

    let Some(modern) = version.strip_prefix(LEGACY_PREFIX) else {
        return DisplayVersion::new(text);
    };

    let (major, rest) = match modern.split_once('.') {
        Some((major, rest)) => (major, Some(rest)),
        None => (modern, None),
    };

    match leading_number(major) {
        Some(number) if number >= FIRST_MODERN_MAJOR => match rest {
            Some(rest) => DisplayVersion::new(format!("{vendor}{VENDOR_SEPARATOR}{major}.{rest}")),
            None => DisplayVersion::new(format!("{vendor}{VENDOR_SEPARATOR}{major}")),
        },
        _ => DisplayVersion::new(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display(text: &str) -> DisplayVersion {
        DisplayVersion::new(text)
    }

    fn raw(text: &str) -> RawVersion {
        RawVersion::new(text)
    }

    #[test]
    fn to_legacy_prefixes_modern_versions() {
        assert_eq!(to_legacy(&display("openjdk@21.0.1")).as_str(), "openjdk@1.21.0.1");
    }

    #[test]
    fn to_legacy_keeps_legacy_versions() {
        assert_eq!(to_legacy(&display("openjdk@1.17.0")).as_str(), "openjdk@1.17.0");
    }

    #[test]
    fn to_legacy_keeps_tokens_without_vendor() {
        assert_eq!(to_legacy(&display("17.0.9")).as_str(), "17.0.9");
    }

    #[test]
    fn to_display_strips_legacy_prefix_for_modern_majors() {
        assert_eq!(to_display(&raw("openjdk@1.17.0")).as_str(), "openjdk@17.0");
        assert_eq!(to_display(&raw("zulu@1.21.0.1")).as_str(), "zulu@21.0.1");
    }

    #[test]
    fn to_display_leaves_majors_below_nine_unchanged() {
        assert_eq!(to_display(&raw("openjdk@1.8.0")).as_str(), "openjdk@1.8.0");
        assert_eq!(to_display(&raw("zulu@1.8.282")).as_str(), "zulu@1.8.282");
    }

    #[test]
    fn to_display_handles_bare_major() {
        assert_eq!(to_display(&raw("openjdk@1.17")).as_str(), "openjdk@17");
    }

    #[test]
    fn to_display_keeps_modern_and_vendorless_tokens() {
        assert_eq!(to_display(&raw("openjdk@17.0.9")).as_str(), "openjdk@17.0.9");
        assert_eq!(to_display(&raw("1.17.0")).as_str(), "1.17.0");
    }

    #[test]
    fn round_trip_holds_for_modern_majors() {
        for text in [
            "openjdk@9.0.4",
            "openjdk@11.0.2",
            "temurin@17.0.9",
            "openjdk@21.0.1",
            "zulu@21",
            "liberica@17.0.9-11",
            "openjdk@09.0.1",
        ] {
            let original = display(text);
            assert_eq!(to_display(&to_legacy(&original)), original, "round trip of {text}");
        }
    }
}

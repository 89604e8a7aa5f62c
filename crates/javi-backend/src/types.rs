use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Distribution assumed when a token carries no `vendor@` prefix.
pub const DEFAULT_VENDOR: &str = "openjdk";

/// Per-project file holding the declared local version.
pub const MARKER_FILE_NAME: &str = ".jabbarc";

/// Major versions with long-term support.
pub const LTS_MAJORS: [&str; 4] = ["8", "11", "17", "21"];

pub(crate) const VENDOR_SEPARATOR: char = '@';
pub(crate) const LEGACY_PREFIX: &str = "1.";

/// A version token exactly as jabba emits or accepts it, for example
/// `openjdk@1.17.0` or `zulu@1.8.282`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawVersion(String);

/// The same version rendered in modern `major.minor.patch` numbering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayVersion(String);

macro_rules! version_token {
    ($name:ident) => {
        impl $name {
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }

            #[must_use]
            pub fn identifier(&self) -> VersionIdentifier {
                VersionIdentifier::parse(&self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

version_token!(RawVersion);
version_token!(DisplayVersion);

/// Structured view of a version token.
///
/// Always derived from a raw string with [`VersionIdentifier::parse`], which
/// never fails: missing or unreadable components become `"0"`. Numeric
/// components stay textual so leading zeros survive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionIdentifier {
    pub raw: String,
    pub vendor: String,
    pub major: String,
    pub minor: String,
    pub patch: String,
    pub build: Option<String>,
    pub is_long_term_support: bool,
}

impl VersionIdentifier {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let (vendor, version) = match raw.split_once(VENDOR_SEPARATOR) {
            Some((vendor, version)) if !vendor.trim().is_empty() => {
                (vendor.trim().to_lowercase(), version.trim())
            }
            Some((_, version)) => (DEFAULT_VENDOR.to_string(), version.trim()),
            None => (DEFAULT_VENDOR.to_string(), raw.trim()),
        };

        let version = version.strip_prefix(LEGACY_PREFIX).unwrap_or(version);

        let mut parts = version.split('.');
        let major = component_or_zero(parts.next());
        let minor = component_or_zero(parts.next());

        let (patch, build) = match parts.next() {
            Some(rest) => match rest.split_once('-') {
                Some((patch, build)) => (
                    component_or_zero(Some(patch)),
                    Some(build.to_string()).filter(|b| !b.is_empty()),
                ),
                None => (component_or_zero(Some(rest)), None),
            },
            None => ("0".to_string(), None),
        };

        let is_long_term_support = LTS_MAJORS.contains(&major.as_str());

        Self {
            raw: raw.to_string(),
            vendor,
            major,
            minor,
            patch,
            build,
            is_long_term_support,
        }
    }

    #[must_use]
    pub fn is_default_vendor(&self) -> bool {
        self.vendor == DEFAULT_VENDOR
    }

    /// `OpenJDK` for the default vendor, otherwise the vendor as written.
    #[must_use]
    pub fn vendor_label(&self) -> &str {
        if self.is_default_vendor() {
            "OpenJDK"
        } else {
            &self.vendor
        }
    }

    /// Human label such as `OpenJDK 17` or `zulu 11`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.vendor_label(), self.major)
    }

    /// Short `major.minor.patch` rendering.
    #[must_use]
    pub fn short_version(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    /// Leading integer of the major component, if it has one.
    #[must_use]
    pub fn major_number(&self) -> Option<u32> {
        leading_number(&self.major)
    }

    /// Compares by numeric major, minor, then patch; used for newest-first
    /// listings where the textual form is irrelevant.
    #[must_use]
    pub fn cmp_numeric(&self, other: &Self) -> Ordering {
        let key = |id: &Self| {
            (
                leading_number(&id.major).unwrap_or(0),
                leading_number(&id.minor).unwrap_or(0),
                leading_number(&id.patch).unwrap_or(0),
            )
        };
        key(self).cmp(&key(other))
    }
}

impl fmt::Display for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.vendor_label(), self.short_version())
    }
}

fn component_or_zero(part: Option<&str>) -> String {
    match part.map(str::trim) {
        Some(text) if text.chars().any(|c| c.is_ascii_digit()) => text.to_string(),
        _ => "0".to_string(),
    }
}

/// Parses the leading run of ASCII digits, ignoring anything after it.
#[must_use]
pub fn leading_number(text: &str) -> Option<u32> {
    let digits: &str = &text[..text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len())];
    digits.parse().ok()
}

/// String comparison that treats runs of digits as numbers, so `21` orders
/// after `9`. Non-digit runs compare case-insensitively.
#[must_use]
pub fn compare_numeric_aware(a: &str, b: &str) -> Ordering {
    let mut left = Segments::new(a);
    let mut right = Segments::new(b);

    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ordering = match (l, r) {
                    (Segment::Digits(l), Segment::Digits(r)) => compare_digit_runs(l, r),
                    (Segment::Text(l), Segment::Text(r)) => l
                        .to_lowercase()
                        .cmp(&r.to_lowercase()),
                    (Segment::Digits(_), Segment::Text(_)) => Ordering::Less,
                    (Segment::Text(_), Segment::Digits(_)) => Ordering::Greater,
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a_trimmed = a.trim_start_matches('0');
    let b_trimmed = b.trim_start_matches('0');
    a_trimmed
        .len()
        .cmp(&b_trimmed.len())
        .then_with(|| a_trimmed.cmp(b_trimmed))
}

enum Segment<'a> {
    Digits(&'a str),
    Text(&'a str),
}

struct Segments<'a> {
    rest: &'a str,
}

impl<'a> Segments<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let is_digit = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != is_digit)
            .unwrap_or(self.rest.len());
        let (segment, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if is_digit {
            Segment::Digits(segment)
        } else {
            Segment::Text(segment)
        })
    }
}

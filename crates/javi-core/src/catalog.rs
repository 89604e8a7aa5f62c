use std::cmp::Ordering;

use javi_backend::{
    DEFAULT_VENDOR, DisplayVersion, RawVersion, VersionIdentifier, compare_numeric_aware,
    to_display,
};

/// An installed version with its status flags for one listing snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub identifier: VersionIdentifier,
    pub is_global: bool,
    pub is_local: bool,
    pub is_recommended: bool,
}

impl CatalogEntry {
    #[must_use]
    pub fn raw(&self) -> RawVersion {
        RawVersion::new(self.identifier.raw.clone())
    }

    #[must_use]
    pub fn display(&self) -> DisplayVersion {
        to_display(&self.raw())
    }

    /// Status markers such as `LTS, global, local`.
    #[must_use]
    pub fn tags(&self) -> Vec<&'static str> {
        [
            (self.identifier.is_long_term_support, "LTS"),
            (self.is_global, "global"),
            (self.is_local, "local"),
            (self.is_recommended, "recommended"),
        ]
        .into_iter()
        .filter_map(|(set, tag)| set.then_some(tag))
        .collect()
    }
}

fn is_default_group(raw: &str) -> bool {
    raw.to_lowercase().contains(DEFAULT_VENDOR)
}

fn catalog_order(a: &str, b: &str) -> Ordering {
    match (is_default_group(a), is_default_group(b)) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => compare_numeric_aware(b, a),
    }
}

/// Builds a fresh snapshot of installed versions.
///
/// OpenJDK builds come first, then everything else; each group is sorted
/// newest first by numeric-aware comparison of the raw token. Global and
/// local flags use exact string equality against the trimmed current
/// values, so the same release written in two notations is not matched.
#[must_use]
pub fn list(
    installed: &[RawVersion],
    current_global: Option<&RawVersion>,
    current_local: Option<&RawVersion>,
    recommended: Option<&DisplayVersion>,
) -> Vec<CatalogEntry> {
    let global = current_global.map(|v| v.as_str().trim());
    let local = current_local.map(|v| v.as_str().trim());

    let mut raws: Vec<&str> = installed
        .iter()
        .map(|v| v.as_str().trim())
        .filter(|v| !v.is_empty())
        .collect();
    raws.sort_by(|a, b| catalog_order(a, b));

    raws.into_iter()
        .map(|raw| {
            let is_recommended = recommended.is_some_and(|rec| {
                raw == rec.as_str() || to_display(&RawVersion::new(raw)).as_str() == rec.as_str()
            });
            CatalogEntry {
                identifier: VersionIdentifier::parse(raw),
                is_global: global == Some(raw),
                is_local: local == Some(raw),
                is_recommended,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raws(values: &[&str]) -> Vec<RawVersion> {
        values.iter().map(|v| RawVersion::new(*v)).collect()
    }

    fn order(entries: &[CatalogEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.identifier.raw.as_str()).collect()
    }

    #[test]
    fn openjdk_group_sorts_first_and_newest_first() {
        let entries = list(
            &raws(&["openjdk@21.0.1", "temurin@17.0.9", "openjdk@11.0.2"]),
            None,
            None,
            None,
        );

        assert_eq!(
            order(&entries),
            vec!["openjdk@21.0.1", "openjdk@11.0.2", "temurin@17.0.9"]
        );
    }

    #[test]
    fn numeric_aware_sort_puts_21_before_9() {
        let entries = list(
            &raws(&["zulu@1.9.0", "zulu@1.21.0", "zulu@1.17.0"]),
            None,
            None,
            None,
        );

        assert_eq!(
            order(&entries),
            vec!["zulu@1.21.0", "zulu@1.17.0", "zulu@1.9.0"]
        );
    }

    #[test]
    fn flags_use_exact_trimmed_equality() {
        let global = RawVersion::new(" openjdk@1.17.0\n");
        let local = RawVersion::new("openjdk@1.11.0");
        let entries = list(
            &raws(&["openjdk@1.17.0", "openjdk@1.11.0"]),
            Some(&global),
            Some(&local),
            None,
        );

        assert!(entries[0].is_global && !entries[0].is_local);
        assert!(entries[1].is_local && !entries[1].is_global);
    }

    #[test]
    fn equivalent_tokens_in_other_notation_are_not_flagged() {
        let global = RawVersion::new("openjdk@17.0");
        let entries = list(&raws(&["openjdk@1.17.0"]), Some(&global), None, None);

        assert!(!entries[0].is_global);
    }

    #[test]
    fn recommended_matches_raw_or_display_form() {
        let recommended = DisplayVersion::new("openjdk@17.0");
        let entries = list(
            &raws(&["openjdk@1.17.0", "openjdk@1.11.0"]),
            None,
            None,
            Some(&recommended),
        );

        assert!(entries[0].is_recommended);
        assert!(!entries[1].is_recommended);
        assert_eq!(entries[0].tags(), vec!["LTS", "recommended"]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let entries = list(&raws(&["", "  ", "openjdk@1.17.0"]), None, None, None);
        assert_eq!(entries.len(), 1);
    }
}

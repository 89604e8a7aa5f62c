use log::{debug, warn};

use javi_backend::{DisplayVersion, RawVersion, VersionIdentifier, VersionManager, to_display};

use crate::recommend::FALLBACK_VERSIONS;

/// A remote release offered for installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableVersion {
    /// Token to hand back to the version manager.
    pub raw: RawVersion,
    pub display: DisplayVersion,
    pub info: VersionIdentifier,
}

impl AvailableVersion {
    #[must_use]
    pub fn from_raw(raw: RawVersion) -> Self {
        let display = to_display(&raw);
        let info = display.identifier();
        Self { raw, display, info }
    }

    /// `OpenJDK 17.0.9` style description.
    #[must_use]
    pub fn description(&self) -> String {
        self.info.to_string()
    }
}

/// Orders a remote listing newest first, substituting the fallback table
/// for an empty listing.
#[must_use]
pub fn from_listing(listing: Vec<RawVersion>) -> Vec<AvailableVersion> {
    let listing: Vec<RawVersion> = listing
        .into_iter()
        .filter(|raw| !raw.as_str().trim().is_empty())
        .collect();

    let source = if listing.is_empty() {
        debug!("Remote listing empty, offering fallback versions");
        fallback_listing()
    } else {
        listing
    };

    let mut versions: Vec<AvailableVersion> =
        source.into_iter().map(AvailableVersion::from_raw).collect();
    versions.sort_by(|a, b| b.info.cmp_numeric(&a.info));
    versions
}

fn fallback_listing() -> Vec<RawVersion> {
    FALLBACK_VERSIONS.iter().map(|v| RawVersion::new(*v)).collect()
}

/// Remote versions matching `filter`, or the fallback table if the listing
/// fails.
pub async fn available_versions(
    manager: &dyn VersionManager,
    filter: Option<&str>,
) -> Vec<AvailableVersion> {
    match manager.list_remote(filter).await {
        Ok(listing) => from_listing(listing),
        Err(error) => {
            warn!("Remote listing failed, offering fallback versions: {error}");
            from_listing(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_sorted_newest_first_by_numbers() {
        let versions = from_listing(vec![
            RawVersion::new("openjdk@1.11.0-2"),
            RawVersion::new("zulu@1.21.0-1"),
            RawVersion::new("openjdk@1.17.0"),
            RawVersion::new("openjdk@1.17.0-9"),
        ]);

        let order: Vec<&str> = versions.iter().map(|v| v.raw.as_str()).collect();
        assert_eq!(order[0], "zulu@1.21.0-1");
        assert_eq!(order[3], "openjdk@1.11.0-2");
    }

    #[test]
    fn display_form_keeps_raw_token_for_install() {
        let versions = from_listing(vec![RawVersion::new("openjdk@1.17.0")]);

        assert_eq!(versions[0].raw.as_str(), "openjdk@1.17.0");
        assert_eq!(versions[0].display.as_str(), "openjdk@17.0");
        assert_eq!(versions[0].description(), "OpenJDK 17.0.0");
    }

    #[test]
    fn legacy_majors_stay_in_legacy_form() {
        let versions = from_listing(vec![RawVersion::new("openjdk@1.8.0")]);

        assert_eq!(versions[0].display.as_str(), "openjdk@1.8.0");
        assert_eq!(versions[0].info.major, "8");
    }

    #[test]
    fn empty_listing_uses_fallback_table() {
        let versions = from_listing(vec![RawVersion::new("  ")]);

        let order: Vec<&str> = versions.iter().map(|v| v.raw.as_str()).collect();
        assert_eq!(order, FALLBACK_VERSIONS.to_vec());
    }
}

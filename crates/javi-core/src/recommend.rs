use std::future::Future;

use log::{debug, info, warn};

use javi_backend::{
    DEFAULT_VENDOR, DisplayVersion, RawVersion, VersionIdentifier, VersionManager,
    compare_numeric_aware, to_display,
};

use crate::project::ProjectSignals;

/// One OpenJDK release per LTS major, newest first, used when the remote
/// listing cannot be reached.
pub const FALLBACK_VERSIONS: [&str; 4] = [
    "openjdk@1.21.0",
    "openjdk@1.17.0",
    "openjdk@1.11.0",
    "openjdk@1.8.0",
];

const DEFAULT_MAJOR: &str = "17";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationSource {
    Remote,
    FallbackTable,
    Synthesized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub major: String,
    pub version: RawVersion,
    pub display: DisplayVersion,
    pub source: RecommendationSource,
}

/// Picks a major version from manifest signals. A declared Java version
/// overrides anything inferred from the framework version.
#[must_use]
pub fn recommended_major(signals: &ProjectSignals) -> &'static str {
    let mut major = DEFAULT_MAJOR;

    if let Some(framework) = signals.declared_framework_version.as_deref() {
        if framework.starts_with("3.") {
            major = "17";
        } else if framework.starts_with("2.") {
            major = "11";
        }
    }

    if let Some(java) = signals.declared_java_version.as_deref() {
        if java.starts_with("21") {
            major = "21";
        } else if java.starts_with("17") {
            major = "17";
        } else if java.starts_with("11") {
            major = "11";
        } else if java.starts_with("1.8") || java.starts_with('8') {
            major = "8";
        }
    }

    major
}

/// First fallback table entry whose parsed major matches.
#[must_use]
pub fn fallback_for_major(major: &str) -> Option<RawVersion> {
    FALLBACK_VERSIONS
        .iter()
        .find(|version| VersionIdentifier::parse(version).major == major)
        .map(|version| RawVersion::new(*version))
}

/// Resolves the recommended major to a concrete version.
///
/// `resolve_latest` is asked first; when it has nothing, the fallback table
/// is consulted, and failing that `openjdk@<major>.0.0` is synthesized.
pub async fn recommend<F, Fut>(signals: &ProjectSignals, resolve_latest: F) -> Recommendation
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Option<RawVersion>>,
{
    let major = recommended_major(signals);
    debug!("Recommended major {major} for {signals:?}");

    let (version, source) = if let Some(latest) = resolve_latest(major.to_string()).await {
        (latest, RecommendationSource::Remote)
    } else if let Some(fallback) = fallback_for_major(major) {
        info!("No remote version for Java {major}, using {fallback}");
        (fallback, RecommendationSource::FallbackTable)
    } else {
        let synthesized = RawVersion::new(format!("{DEFAULT_VENDOR}@{major}.0.0"));
        info!("No known version for Java {major}, synthesized {synthesized}");
        (synthesized, RecommendationSource::Synthesized)
    };

    Recommendation {
        major: major.to_string(),
        display: to_display(&version),
        version,
        source,
    }
}

/// Newest remote OpenJDK release for `major`, or `None` if the listing
/// fails or is empty.
pub async fn latest_for_major(manager: &dyn VersionManager, major: &str) -> Option<RawVersion> {
    let filter = format!("{DEFAULT_VENDOR}@{major}");
    let mut versions = match manager.list_remote(Some(&filter)).await {
        Ok(versions) => versions,
        Err(error) => {
            warn!("Remote listing for {filter} failed: {error}");
            return None;
        }
    };

    versions.sort_by(|a, b| compare_numeric_aware(version_part(b), version_part(a)));
    versions.into_iter().next()
}

fn version_part(version: &RawVersion) -> &str {
    version
        .as_str()
        .split_once('@')
        .map_or("", |(_, version)| version)
}

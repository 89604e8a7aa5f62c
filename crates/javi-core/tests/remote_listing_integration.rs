use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use javi_backend::{BackendError, BackendInfo, RawVersion, VersionManager};
use javi_core::{
    FALLBACK_VERSIONS, ProjectSignals, RecommendationSource, available_versions, catalog,
    latest_for_major, recommend,
};

#[derive(Clone)]
struct RemoteOnlyManager {
    info: BackendInfo,
    remote: Result<Vec<RawVersion>, BackendError>,
    filters: Arc<Mutex<Vec<Option<String>>>>,
}

impl RemoteOnlyManager {
    fn new(remote: Result<Vec<&str>, BackendError>) -> Self {
        Self {
            info: BackendInfo {
                name: "mock",
                path: PathBuf::from("/tmp/mock-jabba"),
                version: None,
                data_dir: None,
                in_path: false,
            },
            remote: remote.map(|list| list.into_iter().map(RawVersion::new).collect()),
            filters: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn filters(&self) -> Vec<Option<String>> {
        self.filters.lock().expect("filters lock").clone()
    }
}

#[async_trait]
impl VersionManager for RemoteOnlyManager {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn backend_info(&self) -> &BackendInfo {
        &self.info
    }

    async fn list_installed(&self) -> Result<Vec<RawVersion>, BackendError> {
        Ok(Vec::new())
    }

    async fn list_remote(&self, filter: Option<&str>) -> Result<Vec<RawVersion>, BackendError> {
        self.filters
            .lock()
            .expect("filters lock")
            .push(filter.map(str::to_string));
        self.remote.clone()
    }

    async fn install(&self, _version: &RawVersion) -> Result<(), BackendError> {
        Ok(())
    }

    async fn uninstall(&self, _version: &RawVersion) -> Result<(), BackendError> {
        Ok(())
    }

    async fn use_version(
        &self,
        _version: &RawVersion,
        _cwd: Option<&Path>,
    ) -> Result<(), BackendError> {
        Ok(())
    }

    async fn set_default(&self, _version: &RawVersion) -> Result<(), BackendError> {
        Ok(())
    }

    async fn current_global(&self) -> Result<Option<RawVersion>, BackendError> {
        Ok(None)
    }
}

#[tokio::test]
async fn latest_for_major_filters_and_picks_newest() {
    let manager = RemoteOnlyManager::new(Ok(vec![
        "openjdk@1.17.0-1",
        "openjdk@1.17.0-10",
        "openjdk@1.17.0-9",
    ]));

    let latest = latest_for_major(&manager, "17").await;

    assert_eq!(latest, Some(RawVersion::new("openjdk@1.17.0-10")));
    assert_eq!(manager.filters(), vec![Some("openjdk@17".to_string())]);
}

#[tokio::test]
async fn latest_for_major_is_none_when_remote_fails() {
    let manager = RemoteOnlyManager::new(Err(BackendError::command_failed("network down")));

    assert_eq!(latest_for_major(&manager, "21").await, None);
}

#[tokio::test]
async fn recommendation_flows_through_remote_listing() {
    let manager = RemoteOnlyManager::new(Ok(vec!["openjdk@1.11.0-28", "openjdk@1.11.0-2"]));
    let signals = ProjectSignals {
        declared_java_version: None,
        declared_framework_version: Some("2.7.18".to_string()),
    };

    let recommendation = recommend(&signals, |major| {
        let manager = manager.clone();
        async move { latest_for_major(&manager, &major).await }
    })
    .await;

    assert_eq!(recommendation.major, "11");
    assert_eq!(recommendation.version.as_str(), "openjdk@1.11.0-28");
    assert_eq!(recommendation.source, RecommendationSource::Remote);

    let installed = vec![
        RawVersion::new("openjdk@1.11.0-28"),
        RawVersion::new("openjdk@1.17.0"),
    ];
    let entries = catalog::list(&installed, None, None, Some(&recommendation.display));
    let flagged: Vec<&str> = entries
        .iter()
        .filter(|entry| entry.is_recommended)
        .map(|entry| entry.identifier.raw.as_str())
        .collect();
    assert_eq!(flagged, vec!["openjdk@1.11.0-28"]);
}

#[tokio::test]
async fn recommendation_falls_back_when_remote_empty() {
    let manager = RemoteOnlyManager::new(Ok(Vec::new()));

    let recommendation = recommend(&ProjectSignals::default(), |major| {
        let manager = manager.clone();
        async move { latest_for_major(&manager, &major).await }
    })
    .await;

    assert_eq!(recommendation.version.as_str(), "openjdk@1.17.0");
    assert_eq!(recommendation.source, RecommendationSource::FallbackTable);
}

#[tokio::test]
async fn available_versions_fall_back_on_error() {
    let manager = RemoteOnlyManager::new(Err(BackendError::NotFound));

    let versions = available_versions(&manager, None).await;

    let raws: Vec<&str> = versions.iter().map(|v| v.raw.as_str()).collect();
    assert_eq!(raws, FALLBACK_VERSIONS.to_vec());
}

#[tokio::test]
async fn available_versions_pass_filter_through() {
    let manager = RemoteOnlyManager::new(Ok(vec!["zulu@1.21.0", "zulu@1.17.0"]));

    let versions = available_versions(&manager, Some("zulu")).await;

    assert_eq!(versions.len(), 2);
    assert_eq!(versions[0].display.as_str(), "zulu@21.0");
    assert_eq!(manager.filters(), vec![Some("zulu".to_string())]);
}

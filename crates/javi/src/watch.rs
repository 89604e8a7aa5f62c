use std::path::Path;
use std::time::SystemTime;

use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

use javi_backend::{RawVersion, VersionManager};
use javi_core::{ApplyOutcome, DriftCheck, EnvironmentReconciler, ManifestKind, MarkerStore};

use crate::commands::{describe_recommendation, project_recommendation, wait_for_dispatch};
use crate::context::AppContext;
use crate::error::AppError;
use crate::single_instance::{AcquireError, SingleInstance};

/// Modification stamp of one manifest candidate; `None` when absent.
type ManifestStamp = Option<(SystemTime, u64)>;

/// What the watcher observed in the project on one poll.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot {
    marker: Option<String>,
    manifests: Vec<ManifestStamp>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Changes {
    marker: bool,
    manifest: bool,
}

impl Snapshot {
    async fn capture(root: &Path, marker: &dyn MarkerStore) -> Self {
        let marker = match marker.read().await {
            Ok(value) => value,
            Err(error) => {
                warn!("{error}");
                None
            }
        };

        let mut manifests = Vec::with_capacity(ManifestKind::DISCOVERY_ORDER.len());
        for kind in ManifestKind::DISCOVERY_ORDER {
            let stamp = tokio::fs::metadata(root.join(kind.file_name()))
                .await
                .ok()
                .and_then(|meta| Some((meta.modified().ok()?, meta.len())));
            manifests.push(stamp);
        }

        Self { marker, manifests }
    }

    fn changes_since(&self, previous: &Self) -> Changes {
        Changes {
            marker: self.marker != previous.marker,
            manifest: self.manifests != previous.manifests,
        }
    }
}

fn acquire_lock(context: &AppContext) -> Result<SingleInstance, AppError> {
    SingleInstance::acquire(&context.paths.watch_lock_file()).map_err(|error| match error {
        AcquireError::AlreadyRunning => AppError::WatchAlreadyRunning,
        other => AppError::operation_failed("Acquire watch lock", other.to_string()),
    })
}

/// `use` in the project root followed by `alias default`, as done when the
/// watcher starts or `.jabbarc` changes. Failures are logged, not fatal.
async fn activate_marker(context: &AppContext, manager: &dyn VersionManager, version: &RawVersion) {
    info!("Applying {version} from .jabbarc");

    if let Err(error) = manager
        .use_version(version, Some(&context.project_root))
        .await
    {
        warn!("Failed to use {version}: {error}");
        eprintln!("warning: failed to use {version}: {error}");
        return;
    }

    if let Err(error) = manager.set_default(version).await {
        warn!("Failed to set {version} as default: {error}");
    }
}

/// Periodic checks see the watcher's own environment, which a dispatched
/// `use` never changes, so a mismatch is corrected once per marker value and
/// active version.
fn watch_reconciler(context: &AppContext, manager: &dyn VersionManager) -> EnvironmentReconciler {
    context.reconciler(manager).once_per_change()
}

async fn correct_drift(context: &AppContext, reconciler: &EnvironmentReconciler) {
    match reconciler.check_drift().await {
        DriftCheck::Drifted {
            expected,
            active,
            outcome,
        } => {
            println!("Active Java {active} does not match {expected}, switching.");
            if let ApplyOutcome::Started { dispatch, marker } = outcome {
                if let Err(error) = marker {
                    warn!("{error}");
                }
                if let Err(error) = wait_for_dispatch(context, dispatch).await {
                    warn!("{error}");
                    eprintln!("warning: {error}");
                }
            }
        }
        DriftCheck::AlreadyCorrected { expected, active } => {
            debug!("Still {active} against {expected}, already corrected");
        }
        other => debug!("Drift check: {other:?}"),
    }
}

async fn print_recommendation(context: &AppContext, manager: &dyn VersionManager) {
    let (analysis, recommendation) = project_recommendation(context, manager).await;
    println!("{}", describe_recommendation(analysis.as_ref(), &recommendation));
}

pub async fn run(context: &AppContext) -> Result<(), AppError> {
    let _lock = acquire_lock(context)?;
    let manager = context.manager().await?;
    let reconciler = watch_reconciler(context, manager.as_ref());
    let marker = context.marker();

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });

    println!("Watching {} (Ctrl+C to stop)", context.project_root.display());

    let mut previous = Snapshot::capture(&context.project_root, &marker).await;
    if let Some(version) = previous.marker.clone() {
        activate_marker(context, manager.as_ref(), &RawVersion::new(version)).await;
    }
    correct_drift(context, &reconciler).await;

    let interval = context.settings.watch_interval();
    loop {
        tokio::select! {
            () = shutdown.cancelled() => break,
            () = tokio::time::sleep(interval) => {}
        }

        let current = Snapshot::capture(&context.project_root, &marker).await;
        let changes = current.changes_since(&previous);

        if changes.marker {
            match &current.marker {
                Some(version) => {
                    println!(".jabbarc changed to {version}");
                    activate_marker(context, manager.as_ref(), &RawVersion::new(version.clone()))
                        .await;
                    correct_drift(context, &reconciler).await;
                }
                None => debug!(".jabbarc removed or emptied"),
            }
        }

        if changes.manifest && context.settings.auto_recommend {
            print_recommendation(context, manager.as_ref()).await;
        }

        if context.settings.auto_correct && !changes.marker {
            correct_drift(context, &reconciler).await;
        }

        previous = current;
    }

    reconciler.reset();
    println!("Stopped watching.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use javi_backend::{BackendError, RawVersion, RuntimeProbe};
    use javi_core::{EnvironmentReconciler, FileMarkerStore};
    use javi_platform::AppPaths;
    use javi_shell::ShellDispatcher;

    use super::{Changes, Snapshot, correct_drift};
    use crate::context::AppContext;
    use crate::settings::AppSettings;

    /// A runtime that never changes, as seen from the watcher's environment.
    struct SteadyRuntime;

    #[async_trait]
    impl RuntimeProbe for SteadyRuntime {
        async fn active_runtime_report(&self) -> Result<Option<String>, BackendError> {
            Ok(Some("openjdk version \"11.0.2\" 2019-01-15".to_string()))
        }
    }

    #[derive(Default)]
    struct CountingDispatcher {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ShellDispatcher for CountingDispatcher {
        async fn dispatch_use(
            &self,
            _version: &RawVersion,
            _cwd: Option<&Path>,
        ) -> Result<(), BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn periodic_checks_do_not_redispatch_a_steady_mismatch() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let marker_path = temp_dir.path().join(".jabbarc");
        std::fs::write(&marker_path, "openjdk@1.17.0\n").expect("write marker");
        let context = AppContext::new(
            AppPaths::rooted_at(temp_dir.path()),
            AppSettings::default(),
            Some(temp_dir.path().into()),
        )
        .expect("context for existing dir");

        let dispatcher = Arc::new(CountingDispatcher::default());
        let reconciler = EnvironmentReconciler::new(
            Arc::new(context.marker()),
            Arc::new(SteadyRuntime),
            dispatcher.clone(),
        )
        .with_cooldown(Duration::from_millis(10))
        .once_per_change();

        for _ in 0..4 {
            correct_drift(&context, &reconciler).await;
            tokio::time::sleep(Duration::from_millis(40)).await;
        }
        assert_eq!(dispatcher.calls.load(Ordering::SeqCst), 1);

        std::fs::write(&marker_path, "openjdk@1.21.0\n").expect("rewrite marker");
        correct_drift(&context, &reconciler).await;
        assert_eq!(dispatcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn snapshot_detects_marker_change() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let marker = FileMarkerStore::in_dir(temp_dir.path());

        let before = Snapshot::capture(temp_dir.path(), &marker).await;
        std::fs::write(temp_dir.path().join(".jabbarc"), "openjdk@1.17.0\n").expect("write marker");
        let after = Snapshot::capture(temp_dir.path(), &marker).await;

        assert_eq!(before.marker, None);
        assert_eq!(after.marker.as_deref(), Some("openjdk@1.17.0"));
        assert_eq!(
            after.changes_since(&before),
            Changes {
                marker: true,
                manifest: false
            }
        );
    }

    #[tokio::test]
    async fn snapshot_detects_new_manifest() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let marker = FileMarkerStore::in_dir(temp_dir.path());

        let before = Snapshot::capture(temp_dir.path(), &marker).await;
        std::fs::write(temp_dir.path().join("build.gradle"), "sourceCompatibility = '21'\n")
            .expect("write manifest");
        let after = Snapshot::capture(temp_dir.path(), &marker).await;

        let changes = after.changes_since(&before);
        assert!(changes.manifest);
        assert!(!changes.marker);
    }

    #[tokio::test]
    async fn unchanged_project_reports_no_changes() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(temp_dir.path().join("pom.xml"), "<project/>").expect("write manifest");
        let marker = FileMarkerStore::in_dir(temp_dir.path());

        let first = Snapshot::capture(temp_dir.path(), &marker).await;
        let second = Snapshot::capture(temp_dir.path(), &marker).await;

        assert_eq!(second.changes_since(&first), Changes::default());
    }
}

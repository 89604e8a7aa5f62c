//! Detects when the active Java runtime no longer matches the project's
//! `.jabbarc` and switches it back.
//!
//! After a correction starts the reconciler stays in
//! [`ReconcilerState::Applying`] for a fixed cool-down. Requests arriving in
//! that window are dropped, not queued, so a slow `use` command cannot
//! trigger a second correction while its effect is still invisible. The
//! cool-down is a timer and says nothing about whether the command finished;
//! the [`DispatchHandle`] in [`ApplyOutcome::Started`] reports that.
//!
//! A long-running caller whose runtime probe cannot see the correction (the
//! `use` lands in another shell) turns on [`EnvironmentReconciler::once_per_change`]
//! so the same mismatch is corrected once rather than on every check.

use std::path::PathBuf;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::{debug, info, warn};
use regex::Regex;
use tokio_util::sync::CancellationToken;

use javi_backend::{RawVersion, RuntimeProbe, VersionIdentifier};
use javi_shell::{DispatchHandle, ShellDispatcher};

use crate::marker::{MarkerError, MarkerStore};

pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(2);

static RUNTIME_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:version|openjdk)\s+"([^"]+)""#).expect("runtime version pattern is valid")
});

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("digit pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilerState {
    Idle,
    Applying,
}

#[derive(Debug)]
pub enum ApplyOutcome {
    /// Another correction is cooling down; nothing was done.
    Suppressed,
    /// The `use` command is running and the marker write has been attempted.
    Started {
        dispatch: DispatchHandle,
        marker: Result<(), MarkerError>,
    },
}

impl ApplyOutcome {
    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Self::Suppressed)
    }
}

#[derive(Debug)]
pub enum DriftCheck {
    Suppressed,
    NoMarker,
    RuntimeUnknown,
    MajorUnknown,
    InSync {
        major: String,
    },
    /// The same mismatch was already corrected; waiting for the marker or
    /// the active runtime to change.
    AlreadyCorrected {
        expected: RawVersion,
        active: String,
    },
    Drifted {
        expected: RawVersion,
        active: String,
        outcome: ApplyOutcome,
    },
}

/// The quoted version in `java -version` output.
#[must_use]
pub fn extract_runtime_version(report: &str) -> Option<String> {
    RUNTIME_VERSION
        .captures(report)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Major named by a marker value such as `openjdk@1.17.0` or `zulu@21.0.1`.
/// Only the part after `vendor@` is read, so digits in a vendor name like
/// `adopt-openj9` are ignored.
#[must_use]
pub fn marker_major(value: &str) -> Option<String> {
    let value = value.trim();
    let version = value.split_once('@').map_or(value, |(_, version)| version.trim());
    if !version.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    VersionIdentifier::parse(value)
        .major_number()
        .map(|major| major.to_string())
}

/// Major of a runtime-reported version; `1.8.0_292` is major 8.
#[must_use]
pub fn runtime_major(version: &str) -> Option<String> {
    let version = version.trim();
    let version = version
        .strip_prefix("1.")
        .filter(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
        .unwrap_or(version);
    DIGITS.find(version).map(|m| m.as_str().to_string())
}

struct Guard {
    state: ReconcilerState,
    generation: u64,
    cooldown: Option<CancellationToken>,
    /// Marker value and active version of the last mismatch corrected.
    corrected: Option<(String, String)>,
}

pub struct EnvironmentReconciler {
    marker: Arc<dyn MarkerStore>,
    runtime: Arc<dyn RuntimeProbe>,
    dispatcher: Arc<dyn ShellDispatcher>,
    working_dir: Option<PathBuf>,
    cooldown: Duration,
    once_per_change: bool,
    guard: Arc<Mutex<Guard>>,
    shutdown: CancellationToken,
}

impl EnvironmentReconciler {
    #[must_use]
    pub fn new(
        marker: Arc<dyn MarkerStore>,
        runtime: Arc<dyn RuntimeProbe>,
        dispatcher: Arc<dyn ShellDispatcher>,
    ) -> Self {
        Self {
            marker,
            runtime,
            dispatcher,
            working_dir: None,
            cooldown: DEFAULT_COOLDOWN,
            once_per_change: false,
            guard: Arc::new(Mutex::new(Guard {
                state: ReconcilerState::Idle,
                generation: 0,
                cooldown: None,
                corrected: None,
            })),
            shutdown: CancellationToken::new(),
        }
    }

    /// Directory the `use` command runs in.
    #[must_use]
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = Some(dir);
        self
    }

    #[must_use]
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Correct a given pair of marker value and active version only once.
    /// Later checks report [`DriftCheck::AlreadyCorrected`] until one of the
    /// two changes.
    #[must_use]
    pub fn once_per_change(mut self) -> Self {
        self.once_per_change = true;
        self
    }

    #[must_use]
    pub fn state(&self) -> ReconcilerState {
        self.lock().state
    }

    fn lock(&self) -> MutexGuard<'_, Guard> {
        self.guard.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Compares the marker's major with the active runtime's and starts a
    /// correction when they differ.
    pub async fn check_drift(&self) -> DriftCheck {
        if self.state() == ReconcilerState::Applying {
            debug!("Skipping drift check while a version is being applied");
            return DriftCheck::Suppressed;
        }

        let expected = match self.marker.read().await {
            Ok(Some(value)) => value,
            Ok(None) => return DriftCheck::NoMarker,
            Err(error) => {
                warn!("{error}");
                return DriftCheck::NoMarker;
            }
        };

        let report = match self.runtime.active_runtime_report().await {
            Ok(Some(report)) => report,
            Ok(None) => {
                debug!("No active Java runtime found");
                return DriftCheck::RuntimeUnknown;
            }
            Err(error) => {
                warn!("Failed to query the active Java runtime: {error}");
                return DriftCheck::RuntimeUnknown;
            }
        };

        let Some(active) = extract_runtime_version(&report) else {
            debug!("Could not parse Java version from output: {report}");
            return DriftCheck::RuntimeUnknown;
        };

        let (Some(expected_major), Some(active_major)) =
            (marker_major(&expected), runtime_major(&active))
        else {
            debug!("Could not extract majors from {expected:?} and {active:?}");
            return DriftCheck::MajorUnknown;
        };

        if expected_major == active_major {
            debug!("Active Java {active} matches {expected}");
            self.lock().corrected = None;
            return DriftCheck::InSync {
                major: active_major,
            };
        }

        let mismatch = (expected.clone(), active.clone());
        if self.once_per_change && self.lock().corrected.as_ref() == Some(&mismatch) {
            debug!("Already corrected {expected} against active {active}, waiting for a change");
            return DriftCheck::AlreadyCorrected {
                expected: RawVersion::new(expected),
                active,
            };
        }

        info!("Version mismatch detected: active={active_major}, expected={expected_major}");
        let expected = RawVersion::new(expected);
        let outcome = self.apply_version(&expected).await;
        if !outcome.is_suppressed() {
            self.lock().corrected = Some(mismatch);
        }

        DriftCheck::Drifted {
            expected,
            active,
            outcome,
        }
    }

    /// Starts `use` for `version` and records it in the marker, unless a
    /// previous correction is still cooling down.
    pub async fn apply_version(&self, version: &RawVersion) -> ApplyOutcome {
        let Some((generation, token)) = self.begin_apply() else {
            debug!("Already applying a version, skipping {version}");
            return ApplyOutcome::Suppressed;
        };

        info!("Applying Java version {version}");
        let dispatch = DispatchHandle::spawn(
            Arc::clone(&self.dispatcher),
            version.clone(),
            self.working_dir.clone(),
        );

        let marker = self.marker.write(version.as_str()).await;
        if let Err(error) = &marker {
            warn!("{error}");
        }

        self.schedule_cooldown(generation, token);

        ApplyOutcome::Started { dispatch, marker }
    }

    /// Cancels a pending cool-down, forgets the last correction and returns
    /// to idle.
    pub fn reset(&self) {
        let mut guard = self.lock();
        if let Some(token) = guard.cooldown.take() {
            token.cancel();
        }
        guard.state = ReconcilerState::Idle;
        guard.corrected = None;
    }

    fn begin_apply(&self) -> Option<(u64, CancellationToken)> {
        let mut guard = self.lock();
        if guard.state == ReconcilerState::Applying {
            return None;
        }

        let token = self.shutdown.child_token();
        guard.state = ReconcilerState::Applying;
        guard.generation += 1;
        guard.cooldown = Some(token.clone());
        Some((guard.generation, token))
    }

    fn schedule_cooldown(&self, generation: u64, token: CancellationToken) {
        let guard = Arc::clone(&self.guard);
        let cooldown = self.cooldown;

        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {}
                () = tokio::time::sleep(cooldown) => {
                    let mut guard = guard.lock().unwrap_or_else(PoisonError::into_inner);
                    if guard.generation == generation {
                        guard.state = ReconcilerState::Idle;
                        guard.cooldown = None;
                        debug!("Apply cool-down elapsed");
                    }
                }
            }
        });
    }
}

impl Drop for EnvironmentReconciler {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

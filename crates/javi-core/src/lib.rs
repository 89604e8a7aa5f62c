//! Version resolution and environment reconciliation for javi.
//!
//! This crate holds the logic that sits between a project and the version
//! manager:
//! - Manifest discovery and version signal extraction.
//! - Recommendation of a Java version from those signals.
//! - Installed and available version listings.
//! - The `.jabbarc` marker store and drift correction.

#![allow(clippy::missing_errors_doc)]

pub mod available;
pub mod catalog;
mod marker;
pub mod project;
pub mod recommend;
pub mod reconcile;

/// Remote release listing with fallback versions.
pub use available::{AvailableVersion, available_versions};
/// Installed version snapshot with status flags.
pub use catalog::CatalogEntry;
/// Project-root marker file holding the declared local version.
pub use marker::{FileMarkerStore, MarkerError, MarkerStore};
/// Manifest analysis.
pub use project::{ManifestKind, ProjectAnalysis, ProjectSignals, analyze_project};
/// Recommendation engine.
pub use recommend::{
    FALLBACK_VERSIONS, Recommendation, RecommendationSource, latest_for_major, recommend,
    recommended_major,
};
/// Drift detection and correction.
pub use reconcile::{
    ApplyOutcome, DEFAULT_COOLDOWN, DriftCheck, EnvironmentReconciler, ReconcilerState,
};

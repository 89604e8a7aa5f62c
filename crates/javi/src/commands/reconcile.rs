use log::warn;

use javi_backend::{RawVersion, to_display};
use javi_core::{ApplyOutcome, DriftCheck, MarkerStore};
use javi_shell::{DispatchHandle, use_command};

use crate::async_helpers::run_with_timeout;
use crate::context::AppContext;
use crate::error::AppError;

/// Waits for a `use` command started by the reconciler, bounded by the
/// operation timeout, then tells the user how to switch the shell they are
/// in. javi runs `use` in a child process, which only reaches new shells.
pub(crate) async fn wait_for_dispatch(
    context: &AppContext,
    dispatch: DispatchHandle,
) -> Result<(), AppError> {
    let version = dispatch.version().clone();
    run_with_timeout(
        context.settings.command_timeouts().operation,
        "jabba use",
        dispatch.wait(),
        |error| AppError::operation_failed("Apply", error),
    )
    .await?;
    println!("{}", describe_applied(&version));
    Ok(())
}

async fn finish_outcome(context: &AppContext, outcome: ApplyOutcome) -> Result<(), AppError> {
    match outcome {
        ApplyOutcome::Suppressed => {
            println!("A version is already being applied, try again in a moment.");
            Ok(())
        }
        ApplyOutcome::Started { dispatch, marker } => {
            if let Err(error) = marker {
                warn!("{error}");
                eprintln!("warning: {error}");
            }
            wait_for_dispatch(context, dispatch).await
        }
    }
}

pub(crate) fn describe_applied(version: &RawVersion) -> String {
    format!(
        "{version} is now the jabba default for new shells.\nRun `{}` to switch this shell.",
        use_command(version)
    )
}

/// Text for a drift check result. `None` when a correction was started and
/// its completion is reported separately.
pub(crate) fn describe_check(check: &DriftCheck) -> Option<String> {
    match check {
        DriftCheck::Suppressed => Some("A version is being applied, skipped the check.".to_string()),
        DriftCheck::NoMarker => Some("No .jabbarc file found, nothing to check.".to_string()),
        DriftCheck::RuntimeUnknown => {
            Some("Could not determine the active Java version.".to_string())
        }
        DriftCheck::MajorUnknown => {
            Some("Could not compare the active Java version with .jabbarc.".to_string())
        }
        DriftCheck::InSync { major } => Some(format!("Java {major} is active, matching .jabbarc.")),
        DriftCheck::AlreadyCorrected { expected, active } => Some(format!(
            "Active Java {active} still does not match {expected}. Run `{}` to switch this shell.",
            use_command(expected)
        )),
        DriftCheck::Drifted { .. } => None,
    }
}

pub async fn check(context: &AppContext) -> Result<(), AppError> {
    let manager = context.manager().await?;
    let reconciler = context.reconciler(manager.as_ref());

    let check = reconciler.check_drift().await;
    if let Some(text) = describe_check(&check) {
        println!("{text}");
        return Ok(());
    }

    if let DriftCheck::Drifted {
        expected,
        active,
        outcome,
    } = check
    {
        println!("Active Java {active} does not match {expected}, switching.");
        finish_outcome(context, outcome).await?;
    }
    Ok(())
}

/// The trimmed `.jabbarc` value, or an error explaining why there is none.
async fn required_marker(context: &AppContext) -> Result<RawVersion, AppError> {
    let marker = context.marker();
    match marker
        .read()
        .await
        .map_err(|error| AppError::operation_failed("Read .jabbarc", error))?
    {
        Some(value) => Ok(RawVersion::new(value)),
        None if marker.path().exists() => Err(AppError::no_marker("The .jabbarc file is empty")),
        None => Err(AppError::no_marker("No .jabbarc file found")),
    }
}

pub async fn apply(context: &AppContext) -> Result<(), AppError> {
    let version = required_marker(context).await?;
    let manager = context.manager().await?;
    let reconciler = context.reconciler(manager.as_ref());

    let outcome = reconciler.apply_version(&version).await;
    finish_outcome(context, outcome).await
}

pub async fn status(context: &AppContext) -> Result<(), AppError> {
    let marker = context.marker();
    let value = marker
        .read()
        .await
        .map_err(|error| AppError::operation_failed("Read .jabbarc", error))?;

    println!("{}", describe_status(value.as_deref(), marker.path().exists()));
    Ok(())
}

pub(crate) fn describe_status(value: Option<&str>, file_exists: bool) -> String {
    match value {
        Some(value) => {
            let identifier = to_display(&RawVersion::new(value)).identifier();
            format!("Local Java version: {value} ({identifier})")
        }
        None if file_exists => "Empty .jabbarc file".to_string(),
        None => "No local Java version set".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use javi_backend::RawVersion;
    use javi_core::DriftCheck;

    use super::{describe_applied, describe_check, describe_status};

    #[test]
    fn status_reports_marker_states() {
        assert_eq!(describe_status(None, false), "No local Java version set");
        assert_eq!(describe_status(None, true), "Empty .jabbarc file");
        assert_eq!(
            describe_status(Some("openjdk@1.17.0"), true),
            "Local Java version: openjdk@1.17.0 (OpenJDK 17.0.0)"
        );
    }

    #[test]
    fn check_descriptions_cover_non_correcting_results() {
        assert_eq!(
            describe_check(&DriftCheck::InSync {
                major: "21".to_string()
            })
            .as_deref(),
            Some("Java 21 is active, matching .jabbarc.")
        );
        assert!(describe_check(&DriftCheck::NoMarker).is_some());
        assert!(describe_check(&DriftCheck::Suppressed).is_some());
    }

    #[test]
    fn applied_text_hands_over_the_use_line() {
        let text = describe_applied(&RawVersion::new("openjdk@1.17.0"));

        assert!(text.starts_with("openjdk@1.17.0 is now the jabba default for new shells."));
        assert!(text.ends_with("Run `jabba use openjdk@1.17.0` to switch this shell."));
        assert!(!text.contains("Applied"));
    }

    #[test]
    fn repeated_mismatch_points_at_the_shell() {
        let text = describe_check(&DriftCheck::AlreadyCorrected {
            expected: RawVersion::new("zulu@1.21.0"),
            active: "11.0.2".to_string(),
        })
        .expect("already corrected has a description");

        assert!(text.contains("jabba use zulu@1.21.0"));
    }
}

use log::{debug, info};

use javi_backend::{RawVersion, VersionManager};
use javi_core::{MarkerStore, available_versions, catalog};

use super::project_recommendation;
use crate::context::AppContext;
use crate::error::AppError;

/// Trims user input and rejects blank versions before they reach jabba.
pub(crate) fn parse_version(input: &str) -> Result<RawVersion, AppError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::message("Version must not be empty"));
    }
    Ok(RawVersion::new(trimmed))
}

pub async fn list(context: &AppContext) -> Result<(), AppError> {
    let manager = context.manager().await?;

    let installed = manager
        .list_installed()
        .await
        .map_err(|error| AppError::operation_failed("List", error))?;

    if installed.is_empty() {
        println!("No Java versions installed via jabba yet.");
        return Ok(());
    }

    let global = match manager.current_global().await {
        Ok(global) => global,
        Err(error) => {
            debug!("Could not read the global version: {error}");
            None
        }
    };

    let local = match manager.current_local(&context.project_root).await {
        Ok(local) => local,
        Err(error) => {
            debug!("Could not read the local version: {error}");
            None
        }
    };

    let recommended = if context.settings.auto_recommend {
        Some(project_recommendation(context, manager.as_ref()).await.1.display)
    } else {
        None
    };

    for entry in catalog::list(&installed, global.as_ref(), local.as_ref(), recommended.as_ref()) {
        let tags = entry.tags();
        if tags.is_empty() {
            println!("{:<28} {}", entry.identifier.raw, entry.identifier);
        } else {
            println!(
                "{:<28} {} ({})",
                entry.identifier.raw,
                entry.identifier,
                tags.join(", ")
            );
        }
    }

    Ok(())
}

pub async fn available(context: &AppContext, filter: Option<&str>) -> Result<(), AppError> {
    let manager = context.manager().await?;

    for version in available_versions(manager.as_ref(), filter).await {
        println!("{:<28} {}", version.raw.as_str(), version.description());
    }

    Ok(())
}

pub async fn install(context: &AppContext, version: &str) -> Result<(), AppError> {
    let version = parse_version(version)?;
    let manager = context.manager().await?;

    println!("Installing {version}...");
    manager
        .install(&version)
        .await
        .map_err(|error| AppError::operation_failed("Install", error))?;

    println!("Installed {version}");
    Ok(())
}

pub async fn uninstall(context: &AppContext, version: &str) -> Result<(), AppError> {
    let version = parse_version(version)?;
    let manager = context.manager().await?;

    manager
        .uninstall(&version)
        .await
        .map_err(|error| AppError::operation_failed("Uninstall", error))?;

    println!("Uninstalled {version}");
    Ok(())
}

pub async fn use_version(context: &AppContext, version: &str) -> Result<(), AppError> {
    let version = parse_version(version)?;
    let manager = context.manager().await?;

    set_default(manager.as_ref(), &version).await?;
    activate(context, manager.as_ref(), &version).await?;
    write_marker(context, &version).await?;

    info!("Switched to {version} in {}", context.project_root.display());
    println!("Now using {version} (default and .jabbarc updated)");
    Ok(())
}

pub async fn set_global(context: &AppContext, version: &str) -> Result<(), AppError> {
    let version = parse_version(version)?;
    let manager = context.manager().await?;

    set_default(manager.as_ref(), &version).await?;
    write_marker(context, &version).await?;

    println!("Default Java version set to {version}");
    Ok(())
}

pub async fn set_local(context: &AppContext, version: &str) -> Result<(), AppError> {
    let version = parse_version(version)?;
    let manager = context.manager().await?;

    write_marker(context, &version).await?;
    activate(context, manager.as_ref(), &version).await?;
    set_default(manager.as_ref(), &version).await?;

    println!("Local Java version set to {version}");
    Ok(())
}

async fn set_default(manager: &dyn VersionManager, version: &RawVersion) -> Result<(), AppError> {
    manager
        .set_default(version)
        .await
        .map_err(|error| AppError::operation_failed("Set default", error))
}

async fn activate(
    context: &AppContext,
    manager: &dyn VersionManager,
    version: &RawVersion,
) -> Result<(), AppError> {
    manager
        .use_version(version, Some(&context.project_root))
        .await
        .map_err(|error| AppError::operation_failed("Use", error))
}

async fn write_marker(context: &AppContext, version: &RawVersion) -> Result<(), AppError> {
    context
        .marker()
        .write(version.as_str())
        .await
        .map_err(|error| AppError::operation_failed("Write .jabbarc", error))
}

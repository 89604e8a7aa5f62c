use log::{debug, info};

use javi_backend::BackendProvider;
use javi_jabba::JabbaProvider;
use javi_shell::{
    ShellConfig, ShellConfigEdit, ShellType, VerificationResult, detect_shell,
    get_config_path_for_shell, get_or_create_config_path, verify_shell_config,
};

use crate::error::AppError;

fn resolve_shell(requested: Option<&str>) -> Result<ShellType, AppError> {
    match requested {
        Some(name) => ShellType::from_name(name)
            .ok_or_else(|| AppError::message(format!("Unsupported shell: {name}"))),
        None => Ok(detect_shell()),
    }
}

/// The edit that wires jabba into `config`, or `None` when an active init
/// line is already present.
pub(crate) fn plan_setup(config: &mut ShellConfig, label: &str) -> Option<ShellConfigEdit> {
    let shell = config.shell_type;
    if config.has_init(shell.init_marker()) {
        return None;
    }
    Some(config.add_init(shell.init_command(), label))
}

/// The edit that takes jabba's init block back out of `config`, or `None`
/// when there is nothing to remove.
pub(crate) fn plan_removal(config: &mut ShellConfig, label: &str) -> Option<ShellConfigEdit> {
    let marker = config.shell_type.init_marker();
    let edit = config.remove_init(marker, label);
    edit.has_changes().then_some(edit)
}

fn remove_setup(shell: ShellType, label: &str, dry_run: bool) -> Result<(), AppError> {
    let Some(path) = get_config_path_for_shell(shell) else {
        println!("No {} profile found, nothing to remove.", shell.name());
        return Ok(());
    };
    let mut config = ShellConfig::load(shell, path.clone())
        .map_err(|error| AppError::shell_config_failed(shell.name(), "read config", error))?;

    let Some(edit) = plan_removal(&mut config, label) else {
        println!("{} does not load jabba.", path.display());
        return Ok(());
    };

    println!("{}: {}", path.display(), edit.diff_preview().trim_end());
    if dry_run {
        return Ok(());
    }

    config
        .apply_edit(&edit)
        .map_err(|error| AppError::shell_config_failed(shell.name(), "write config", error))?;

    info!("Removed jabba initialisation from {}", path.display());
    Ok(())
}

pub async fn setup_shell(
    requested: Option<&str>,
    dry_run: bool,
    remove: bool,
) -> Result<(), AppError> {
    let shell = resolve_shell(requested)?;
    let provider = JabbaProvider::new();

    if remove {
        return remove_setup(shell, provider.shell_config_label(), dry_run);
    }

    match verify_shell_config(shell, shell.init_marker(), provider.name()).await {
        VerificationResult::Configured(path) => {
            println!("{} already loads jabba from {}", shell.name(), path.display());
            return Ok(());
        }
        VerificationResult::FunctionalButNotInConfig => {
            debug!("jabba works in {} but is not in its profile", shell.name());
        }
        VerificationResult::Error(error) => {
            return Err(AppError::shell_config_failed(shell.name(), "read config", error));
        }
        VerificationResult::NotConfigured | VerificationResult::ConfigFileNotFound => {}
    }

    let path = get_or_create_config_path(shell)
        .ok_or_else(|| AppError::shell_config_path_not_found(shell.name()))?;
    let mut config = ShellConfig::load(shell, path.clone())
        .map_err(|error| AppError::shell_config_failed(shell.name(), "read config", error))?;

    let Some(edit) = plan_setup(&mut config, provider.shell_config_label()) else {
        println!("{} already loads jabba from {}", shell.name(), path.display());
        return Ok(());
    };

    println!("{}: {}", path.display(), edit.diff_preview().trim_end());
    if dry_run {
        return Ok(());
    }

    config
        .apply_edit(&edit)
        .map_err(|error| AppError::shell_config_failed(shell.name(), "write config", error))?;

    info!("Added jabba initialisation to {}", path.display());
    println!("Open a new terminal for the change to take effect.");
    Ok(())
}

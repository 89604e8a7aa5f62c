//! javi keeps the active Java runtime in line with each project's
//! `.jabbarc`, using jabba to install and switch versions.

mod async_helpers;
mod cli;
mod commands;
mod context;
mod error;
mod logging;
mod settings;
mod single_instance;
mod watch;

use clap::Parser;
use log::{debug, info};

use javi_platform::AppPaths;

use crate::cli::Cli;
use crate::context::AppContext;
use crate::error::AppError;
use crate::settings::AppSettings;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    let paths = AppPaths::new().map_err(AppError::environment_unavailable)?;
    let settings = AppSettings::load(&paths);

    logging::init_logging(
        &paths,
        cli.verbose,
        settings.debug_logging,
        settings.max_log_size_bytes,
    );
    info!("javi {} starting", env!("CARGO_PKG_VERSION"));
    debug!("Command: {:?}, settings: {settings:?}", cli.command);

    let context = AppContext::new(paths, settings, cli.project)?;
    commands::execute(&context, cli.command).await
}

mod config;
mod recommend;
mod reconcile;
mod shell;
mod versions;

pub(crate) use recommend::{describe as describe_recommendation, project_recommendation};
pub(crate) use reconcile::wait_for_dispatch;

use crate::cli::Commands;
use crate::context::AppContext;
use crate::error::AppError;

pub async fn execute(context: &AppContext, command: Commands) -> Result<(), AppError> {
    match command {
        Commands::List => versions::list(context).await,
        Commands::Available { filter } => versions::available(context, filter.as_deref()).await,
        Commands::Install { version } => versions::install(context, &version).await,
        Commands::Uninstall { version } => versions::uninstall(context, &version).await,
        Commands::Use { version } => versions::use_version(context, &version).await,
        Commands::Global { version } => versions::set_global(context, &version).await,
        Commands::Local { version } => versions::set_local(context, &version).await,
        Commands::Recommend { install, switch } => {
            recommend::recommend(context, install, switch).await
        }
        Commands::Check => reconcile::check(context).await,
        Commands::Apply => reconcile::apply(context).await,
        Commands::Status => reconcile::status(context).await,
        Commands::Watch => crate::watch::run(context).await,
        Commands::SetupShell {
            shell,
            dry_run,
            remove,
        } => shell::setup_shell(shell.as_deref(), dry_run, remove).await,
        Commands::Config { reset } => config::config(context, reset),
    }
}

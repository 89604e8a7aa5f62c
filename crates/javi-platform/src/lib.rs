mod commands;
mod paths;

pub use commands::HideWindow;
pub use paths::{AppPaths, AppPathsError, default_jabba_home};

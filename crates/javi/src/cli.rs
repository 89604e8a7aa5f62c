use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// javi - keep the active Java runtime in line with each project's .jabbarc
#[derive(Parser, Debug)]
#[command(name = "javi")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root holding the .jabbarc file and build manifest
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub project: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List installed Java versions with their status tags
    List,

    /// List versions that can be installed
    ///
    /// Examples:
    ///   javi available           # Every version jabba knows about
    ///   javi available zulu      # Only zulu builds
    Available {
        /// Vendor or version prefix passed through to jabba
        filter: Option<String>,
    },

    /// Install a Java version
    Install {
        /// Version as jabba names it, e.g. openjdk@1.17.0
        version: String,
    },

    /// Remove an installed Java version
    Uninstall {
        version: String,
    },

    /// Make a version the default, activate it here and record it in .jabbarc
    Use {
        version: String,
    },

    /// Make a version the default and record it in .jabbarc
    Global {
        version: String,
    },

    /// Record a version in .jabbarc, activate it here and make it the default
    Local {
        version: String,
    },

    /// Recommend a Java version from the project's build manifest
    Recommend {
        /// Install the recommended version
        #[arg(long, conflicts_with = "switch")]
        install: bool,

        /// Switch to the recommended version
        #[arg(long)]
        switch: bool,
    },

    /// Compare the active Java runtime with .jabbarc and correct drift
    Check,

    /// Apply the version recorded in .jabbarc
    Apply,

    /// Show the version recorded in .jabbarc
    Status,

    /// Keep correcting drift until interrupted
    ///
    /// Re-applies .jabbarc when it changes and re-analyses the build
    /// manifest when it is edited.
    Watch,

    /// Add jabba initialisation to the shell profile, or take it out again
    SetupShell {
        /// Shell to configure (bash, zsh, fish, powershell)
        #[arg(long)]
        shell: Option<String>,

        /// Show the change without writing it
        #[arg(long)]
        dry_run: bool,

        /// Remove the initialisation block instead of adding it
        #[arg(long)]
        remove: bool,
    },

    /// Show or reset the settings file
    Config {
        /// Overwrite the settings file with defaults
        #[arg(long)]
        reset: bool,
    },
}

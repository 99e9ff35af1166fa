use crate::sync::Direction;
use clap::{Args, Parser, Subcommand};

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the config file location
    Path,

    /// Print the stored configuration
    Show,
}

#[derive(Parser, Debug)]
#[command(name = "syncode")]
#[command(about = "Sync AI coding agent configs through a git repository", long_about = None)]
#[command(version = env!("SYNCODE_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show debug logs on stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the config, pointing at a sync repository
    Init {
        /// Path of the sync repository (created if missing)
        #[arg(long)]
        repo: String,

        /// Agent to track (repeatable). Defaults to every detected agent.
        #[arg(long = "agent")]
        agents: Vec<String>,

        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Import configs into the repository or export them onto this machine
    Sync(SyncArgs),

    /// Pull the latest configs from the repository's remote
    Pull,

    /// Show the config, tracked agents and newly detected ones
    Status {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Args, Debug, Default)]
pub struct SyncArgs {
    /// Copy configs from this machine into the repository
    #[arg(long, conflicts_with = "export")]
    pub import: bool,

    /// Copy configs from the repository onto this machine
    #[arg(long)]
    pub export: bool,

    /// Agent to sync (repeatable). Defaults to every tracked agent.
    #[arg(short = 'a', long = "agent")]
    pub agents: Vec<String>,

    /// Add newly detected agents to the config without asking
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Do not look for newly installed agents
    #[arg(long)]
    pub no_migrate: bool,
}

impl SyncArgs {
    pub fn direction(&self) -> Option<Direction> {
        match (self.import, self.export) {
            (true, _) => Some(Direction::Import),
            (_, true) => Some(Direction::Export),
            _ => None,
        }
    }
}

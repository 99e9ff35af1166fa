#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use syncode::adapters::AdapterRegistry;
use syncode::agents::HostEnv;
use syncode::cli::{Cli, Commands};
use syncode::commands::{self, Outcome};
use syncode::config::ConfigStore;

/// Log filter override, e.g. `SYNCODE_LOG=syncode=trace`
const LOG_ENV: &str = "SYNCODE_LOG";

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = match run(&cli) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };
    std::process::exit(code);
}

fn init_logging(verbose: bool) {
    let default = if verbose { "syncode=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<Outcome> {
    let outcome = match &cli.command {
        Commands::Version => commands::version::execute()?,
        Commands::Config { command } => {
            commands::config::execute(&ConfigStore::locate()?, command)?
        }
        Commands::Init {
            repo,
            agents,
            force,
        } => {
            let (store, env) = machine()?;
            commands::init::execute(&store, &env, repo, agents, *force)?
        }
        Commands::Sync(args) => {
            let (store, env) = machine()?;
            commands::sync::execute(&store, &env, &AdapterRegistry::builtin(), args)?
        }
        Commands::Pull => {
            let (store, env) = machine()?;
            commands::pull::execute(&store, &env)?
        }
        Commands::Status { json } => {
            let (store, env) = machine()?;
            commands::status::execute(&store, &env, &AdapterRegistry::builtin(), *json)?
        }
    };
    Ok(outcome)
}

/// Config store and host view for commands that touch this machine
fn machine() -> Result<(ConfigStore, HostEnv)> {
    Ok((ConfigStore::locate()?, HostEnv::detect()?))
}

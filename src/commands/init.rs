use crate::agents::{detect_installed_agents, display_name, get_agent_metadata, HostEnv};
use crate::commands::Outcome;
use crate::config::{ConfigStore, GlobalConfig};
use crate::error::{Result, SyncodeError};
use crate::utils::path::contract_home;
use std::fs;
use tracing::warn;

pub fn execute(
    store: &ConfigStore,
    env: &HostEnv,
    repo: &str,
    agents: &[String],
    force: bool,
) -> Result<Outcome> {
    if store.exists() && !force {
        return Err(SyncodeError::InvalidConfig(format!(
            "config already exists at {}. Use --force to overwrite it",
            store.path().display()
        )));
    }

    let agents = if agents.is_empty() {
        detect_installed_agents(env)
    } else {
        for id in agents {
            if get_agent_metadata(id).is_none() {
                warn!(agent = %id, "unknown agent id, tracking it anyway");
            }
        }
        agents.to_vec()
    };

    let config = GlobalConfig::new(repo, agents);
    let repo_root = config.repo_root(&env.home);
    if !repo_root.exists() {
        fs::create_dir_all(&repo_root)?;
        println!("Created {}", repo_root.display());
    }

    store.save(&config)?;

    println!("✓ Config written to {}", store.path().display());
    println!("  Repository: {}", contract_home(&repo_root, &env.home));
    if config.agents.is_empty() {
        println!("  No agents detected. Add some with 'syncode init --force --agent <id>'");
    } else {
        let names: Vec<&str> = config.agents.iter().map(|id| display_name(id)).collect();
        println!("  Tracking: {}", names.join(", "));
    }
    Ok(Outcome::Success)
}

use crate::adapters::AdapterRegistry;
use crate::agents::{display_name, is_agent_installed, HostEnv};
use crate::commands::Outcome;
use crate::config::ConfigStore;
use crate::error::Result;
use crate::platform::Platform;
use crate::reconcile;
use crate::utils::path::contract_home;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct StatusReport {
    #[serde(skip)]
    repo_display: String,
    platform: Platform,
    config_path: String,
    repo_path: String,
    agents: Vec<AgentStatus>,
    new_configs: Vec<String>,
}

#[derive(Debug, Serialize)]
struct AgentStatus {
    id: String,
    name: String,
    installed: bool,
    has_adapter: bool,
}

pub fn execute(
    store: &ConfigStore,
    env: &HostEnv,
    registry: &AdapterRegistry,
    json: bool,
) -> Result<Outcome> {
    let config = store.load()?;
    let repo_root = config.repo_root(&env.home);
    let report = StatusReport {
        repo_display: contract_home(&repo_root, &env.home),
        platform: env.platform,
        config_path: store.path().display().to_string(),
        repo_path: repo_root.display().to_string(),
        agents: config
            .unique_agents()
            .into_iter()
            .map(|id| AgentStatus {
                name: display_name(&id).to_string(),
                installed: is_agent_installed(&id, env),
                has_adapter: registry.get(&id).is_some(),
                id,
            })
            .collect(),
        new_configs: reconcile::new_configs_available(store, env),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?);
    } else {
        print_report(&report);
    }
    Ok(Outcome::Success)
}

fn print_report(report: &StatusReport) {
    println!("Config:     {}", report.config_path);
    println!("Repository: {}", report.repo_display);
    println!();

    if report.agents.is_empty() {
        println!("No agents tracked.");
    } else {
        println!("Tracked agents:");
        for agent in &report.agents {
            let mut notes = Vec::new();
            if !agent.installed {
                notes.push("not installed");
            }
            if !agent.has_adapter {
                notes.push("no adapter");
            }
            let mark = if notes.is_empty() { "✓" } else { "!" };
            if notes.is_empty() {
                println!("  {} {} ({})", mark, agent.name, agent.id);
            } else {
                println!(
                    "  {} {} ({}) - {}",
                    mark,
                    agent.name,
                    agent.id,
                    notes.join(", ")
                );
            }
        }
    }

    if !report.new_configs.is_empty() {
        let names: Vec<&str> = report
            .new_configs
            .iter()
            .map(|id| display_name(id))
            .collect();
        println!();
        println!("New config available: {}", names.join(", "));
        println!("Run 'syncode sync' to add them to your config");
    }
}

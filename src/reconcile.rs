//! Offer newly installed agents for tracking.
//!
//! An agent counts as new when it is detected on this machine but missing
//! from the config's agent list. The sync command runs
//! [`check_and_migrate_config`] before anything else; `status` only reports.

use crate::agents::{detect_installed_agents, display_name, HostEnv};
use crate::config::{ConfigStore, GlobalConfig};
use crate::error::{Result, SyncodeError};
use crate::prompt::Prompter;
use tracing::debug;

/// What a reconciliation pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Migration {
    /// No config yet, nothing to reconcile
    Unconfigured,
    UpToDate,
    /// New agents found but prompting was disabled
    Skipped(Vec<String>),
    /// Operator said no, or cancelled
    Declined(Vec<String>),
    /// Ids appended to the config and saved
    Added(Vec<String>),
}

/// Ids in `detected` that `config` does not track, in `detected` order.
pub fn find_missing(config: &GlobalConfig, detected: &[String]) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for id in detected {
        if !config.tracks(id) && !missing.contains(id) {
            missing.push(id.clone());
        }
    }
    missing
}

/// Offer untracked installed agents and persist the ones accepted.
///
/// With `silent` the operator is never asked and the config never changes.
pub fn check_and_migrate_config(
    store: &ConfigStore,
    env: &HostEnv,
    prompter: &mut dyn Prompter,
    silent: bool,
) -> Result<Migration> {
    let mut config = match store.load() {
        Ok(config) => config,
        Err(SyncodeError::NotConfigured) => return Ok(Migration::Unconfigured),
        Err(e) => return Err(e),
    };

    let missing = find_missing(&config, &detect_installed_agents(env));
    if missing.is_empty() {
        return Ok(Migration::UpToDate);
    }
    debug!(agents = ?missing, "untracked agents detected");

    if silent {
        return Ok(Migration::Skipped(missing));
    }

    let names: Vec<&str> = missing.iter().map(|id| display_name(id)).collect();
    let message = format!(
        "New config available: {}. Add to your config?",
        names.join(", ")
    );
    if prompter.confirm(&message, false)? != Some(true) {
        return Ok(Migration::Declined(missing));
    }

    let added = config.add_agents(missing);
    store.save(&config)?;
    Ok(Migration::Added(added))
}

/// Untracked installed agents. Any failure reads as "none".
pub fn new_configs_available(store: &ConfigStore, env: &HostEnv) -> Vec<String> {
    match store.load() {
        Ok(config) => find_missing(&config, &detect_installed_agents(env)),
        Err(e) => {
            debug!(error = %e, "skipping new config check");
            Vec::new()
        }
    }
}

pub fn has_new_configs_available(store: &ConfigStore, env: &HostEnv) -> bool {
    !new_configs_available(store, env).is_empty()
}

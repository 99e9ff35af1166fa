//! Import/export of agent configs between this machine and the repository.
//!
//! [`run`] drives one sync session: load the config, ask for a direction,
//! ask which tracked agents to sync, then hand the selection to
//! [`SyncOrchestrator`]. The orchestrator runs one adapter at a time and
//! turns every failure, including a missing adapter, into that agent's
//! outcome so the rest of the selection still runs.

use crate::adapters::{AdapterRegistry, SyncResult};
use crate::agents::{display_name, HostEnv};
use crate::config::ConfigStore;
use crate::error::{Result, SyncodeError};
use crate::prompt::{AgentChoice, Prompter};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// System to repository
    Import,
    /// Repository to system
    Export,
}

impl Direction {
    pub fn verb(self) -> &'static str {
        match self {
            Direction::Import => "import",
            Direction::Export => "export",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Import => write!(f, "Import (system → repo)"),
            Direction::Export => write!(f, "Export (repo → system)"),
        }
    }
}

/// Everything a sync session reads from.
pub struct SyncContext<'a> {
    pub store: &'a ConfigStore,
    pub env: &'a HostEnv,
    pub registry: &'a AdapterRegistry,
}

/// Result of syncing one agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentOutcome {
    pub agent: String,
    pub name: String,
    pub result: SyncResult,
}

impl AgentOutcome {
    pub fn succeeded(&self) -> bool {
        self.result.success
    }
}

#[derive(Debug, Clone)]
pub struct SyncReport {
    pub direction: Direction,
    pub outcomes: Vec<AgentOutcome>,
}

impl SyncReport {
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded()).count()
    }

    pub fn fail_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }

    /// 0 when every agent synced, 2 when any failed
    pub fn exit_code(&self) -> i32 {
        if self.fail_count() == 0 {
            0
        } else {
            2
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    DirectionCancelled,
    SelectionCancelled,
    NothingSelected,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::DirectionCancelled | CancelReason::SelectionCancelled => {
                write!(f, "Cancelled")
            }
            CancelReason::NothingSelected => write!(f, "No agents selected"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum SyncRun {
    Cancelled(CancelReason),
    Completed(SyncReport),
}

/// Per-agent progress events emitted by [`SyncOrchestrator::run_agents`].
#[derive(Debug)]
pub enum SyncProgress<'a> {
    Started {
        index: usize,
        total: usize,
        agent: &'a str,
        name: &'a str,
    },
    Finished(&'a AgentOutcome),
}

/// Runs adapters for a list of agents against one repository.
pub struct SyncOrchestrator<'a> {
    registry: &'a AdapterRegistry,
    env: &'a HostEnv,
    repo_root: PathBuf,
}

impl<'a> SyncOrchestrator<'a> {
    pub fn new(registry: &'a AdapterRegistry, env: &'a HostEnv, repo_root: PathBuf) -> Self {
        Self {
            registry,
            env,
            repo_root,
        }
    }

    /// Sync one agent. Never fails: every error ends up in the outcome.
    pub fn sync_agent(&self, agent: &str, direction: Direction) -> AgentOutcome {
        let Some(adapter) = self.registry.get(agent) else {
            warn!(agent, "no adapter registered");
            let missing = SyncodeError::AdapterMissing(agent.to_string());
            return AgentOutcome {
                agent: agent.to_string(),
                name: display_name(agent).to_string(),
                result: SyncResult::failed(missing.to_string()),
            };
        };

        let system = adapter.config_path(self.env.platform, &self.env.home);
        let repo = adapter.repo_path(&self.repo_root);
        debug!(
            agent,
            direction = direction.verb(),
            system = %system.display(),
            repo = %repo.display(),
            "syncing agent"
        );

        let attempt = match direction {
            Direction::Import => adapter.import(&system, &repo),
            Direction::Export => adapter.export(&repo, &system),
        };
        let result = match attempt {
            Ok(result) => result,
            Err(e) => {
                warn!(agent, error = %e, "adapter failed");
                SyncResult::failed(
                    SyncodeError::AdapterOperationFailed {
                        agent: adapter.name().to_string(),
                        message: e.to_string(),
                    }
                    .to_string(),
                )
            }
        };

        AgentOutcome {
            agent: agent.to_string(),
            name: adapter.name().to_string(),
            result,
        }
    }

    /// Sync `agents` one after another, in order.
    pub fn run_agents(
        &self,
        direction: Direction,
        agents: &[String],
        progress: &mut dyn FnMut(SyncProgress<'_>),
    ) -> SyncReport {
        let total = agents.len();
        let mut outcomes = Vec::with_capacity(total);

        for (index, agent) in agents.iter().enumerate() {
            let name = self
                .registry
                .get(agent)
                .map(|a| a.name())
                .unwrap_or_else(|| display_name(agent));
            progress(SyncProgress::Started {
                index,
                total,
                agent,
                name,
            });

            let outcome = self.sync_agent(agent, direction);
            progress(SyncProgress::Finished(&outcome));
            outcomes.push(outcome);
        }

        SyncReport {
            direction,
            outcomes,
        }
    }
}

/// Selection list for the tracked `agents`: adapter name as the label,
/// or the raw id with a hint when no adapter exists.
pub fn agent_choices(agents: &[String], registry: &AdapterRegistry) -> Vec<AgentChoice> {
    agents
        .iter()
        .map(|id| match registry.get(id) {
            Some(adapter) => AgentChoice {
                id: id.clone(),
                label: adapter.name().to_string(),
                hint: None,
            },
            None => AgentChoice {
                id: id.clone(),
                label: id.clone(),
                hint: Some("No adapter found".to_string()),
            },
        })
        .collect()
}

/// One sync session, from config load to the per-agent report.
pub fn run(
    ctx: &SyncContext<'_>,
    prompter: &mut dyn Prompter,
    progress: &mut dyn FnMut(SyncProgress<'_>),
) -> Result<SyncRun> {
    let config = ctx.store.load()?;
    let agents = config.unique_agents();
    if agents.is_empty() {
        return Err(SyncodeError::NoAgentsConfigured);
    }

    let Some(direction) = prompter.select_direction()? else {
        return Ok(SyncRun::Cancelled(CancelReason::DirectionCancelled));
    };

    let choices = agent_choices(&agents, ctx.registry);
    let Some(picked) = prompter.select_agents(direction, &choices)? else {
        return Ok(SyncRun::Cancelled(CancelReason::SelectionCancelled));
    };
    let selected: Vec<String> = agents
        .into_iter()
        .filter(|id| picked.contains(id))
        .collect();
    if selected.is_empty() {
        return Ok(SyncRun::Cancelled(CancelReason::NothingSelected));
    }

    let repo_root = config.repo_root(&ctx.env.home);
    debug!(
        direction = direction.verb(),
        repo = %repo_root.display(),
        agents = ?selected,
        "starting sync"
    );
    let orchestrator = SyncOrchestrator::new(ctx.registry, ctx.env, repo_root);
    Ok(SyncRun::Completed(
        orchestrator.run_agents(direction, &selected, progress),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{Adapter, Layout};
    use crate::config::GlobalConfig;
    use crate::platform::Platform;
    use crate::prompt::ScriptedPrompter;
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Single-file adapter keeping `<home>/<id>.conf`
    struct FileAdapter(&'static str);

    impl Adapter for FileAdapter {
        fn id(&self) -> &'static str {
            self.0
        }

        fn name(&self) -> &'static str {
            self.0
        }

        fn config_path(&self, _platform: Platform, home: &Path) -> PathBuf {
            home.join(format!("{}.conf", self.0))
        }

        fn repo_path(&self, repo_root: &Path) -> PathBuf {
            repo_root
                .join("configs")
                .join(self.0)
                .join(format!("{}.conf", self.0))
        }

        fn layout(&self) -> Layout {
            Layout::File
        }
    }

    /// Adapter whose import always errors
    struct BrokenAdapter;

    impl Adapter for BrokenAdapter {
        fn id(&self) -> &'static str {
            "broken"
        }

        fn name(&self) -> &'static str {
            "Broken"
        }

        fn config_path(&self, _platform: Platform, home: &Path) -> PathBuf {
            home.join("broken")
        }

        fn layout(&self) -> Layout {
            Layout::File
        }

        fn import(&self, _system: &Path, _repo: &Path) -> Result<SyncResult> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into())
        }
    }

    struct Fixture {
        _dir: TempDir,
        env: HostEnv,
        store: ConfigStore,
        registry: AdapterRegistry,
    }

    fn fixture(agents: &[&str]) -> Fixture {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("home");
        fs::create_dir_all(&home).unwrap();
        for id in ["alpha", "gamma"] {
            fs::write(home.join(format!("{}.conf", id)), id).unwrap();
        }

        let store = ConfigStore::new(dir.path().join("config.toml"));
        let repo = dir.path().join("repo");
        store
            .save(&GlobalConfig::new(
                repo.to_string_lossy(),
                agents.iter().map(|a| a.to_string()).collect(),
            ))
            .unwrap();

        Fixture {
            env: HostEnv::new(Platform::Linux, home),
            store,
            registry: AdapterRegistry::from_adapters(vec![
                Arc::new(FileAdapter("alpha")),
                Arc::new(FileAdapter("gamma")),
                Arc::new(BrokenAdapter),
            ]),
            _dir: dir,
        }
    }

    fn ctx(f: &Fixture) -> SyncContext<'_> {
        SyncContext {
            store: &f.store,
            env: &f.env,
            registry: &f.registry,
        }
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_missing_adapter_does_not_stop_others() {
        let f = fixture(&[]);
        let orchestrator = SyncOrchestrator::new(&f.registry, &f.env, f.env.home.join("repo"));

        let report = orchestrator.run_agents(
            Direction::Import,
            &ids(&["alpha", "beta", "gamma"]),
            &mut |_| {},
        );

        let agents: Vec<&str> = report.outcomes.iter().map(|o| o.agent.as_str()).collect();
        assert_eq!(agents, vec!["alpha", "beta", "gamma"]);
        assert!(report.outcomes[0].succeeded());
        assert!(!report.outcomes[1].succeeded());
        assert_eq!(report.outcomes[1].result.message, "No adapter found for beta");
        assert!(report.outcomes[2].succeeded());
        assert_eq!(report.success_count(), 2);
        assert_eq!(report.fail_count(), 1);
        assert_eq!(report.exit_code(), 2);
    }

    #[test]
    fn test_adapter_error_becomes_failed_outcome() {
        let f = fixture(&[]);
        let orchestrator = SyncOrchestrator::new(&f.registry, &f.env, f.env.home.join("repo"));

        let report =
            orchestrator.run_agents(Direction::Import, &ids(&["broken", "alpha"]), &mut |_| {});

        assert!(!report.outcomes[0].succeeded());
        assert!(report.outcomes[0].result.message.contains("Failed to sync Broken"));
        assert!(report.outcomes[0].result.message.contains("denied"));
        assert!(report.outcomes[1].succeeded());
    }

    #[test]
    fn test_progress_events_bracket_each_agent() {
        let f = fixture(&[]);
        let orchestrator = SyncOrchestrator::new(&f.registry, &f.env, f.env.home.join("repo"));
        let mut events = Vec::new();

        orchestrator.run_agents(Direction::Import, &ids(&["alpha", "beta"]), &mut |event| {
            events.push(match event {
                SyncProgress::Started { index, total, name, .. } => {
                    format!("start {}/{} {}", index + 1, total, name)
                }
                SyncProgress::Finished(outcome) => {
                    format!("done {} {}", outcome.agent, outcome.succeeded())
                }
            })
        });

        assert_eq!(
            events,
            vec![
                "start 1/2 alpha",
                "done alpha true",
                "start 2/2 beta",
                "done beta false"
            ]
        );
    }

    #[test]
    fn test_run_counts_match_selection() {
        let f = fixture(&["alpha", "beta", "gamma"]);
        let mut prompter = ScriptedPrompter {
            direction: Some(Direction::Import),
            agents: Some(ids(&["gamma", "beta", "alpha"])),
            ..Default::default()
        };

        let run = run(&ctx(&f), &mut prompter, &mut |_| {}).unwrap();
        let SyncRun::Completed(report) = run else {
            panic!("expected a completed run");
        };

        assert_eq!(report.success_count() + report.fail_count(), 3);
        let agents: Vec<&str> = report.outcomes.iter().map(|o| o.agent.as_str()).collect();
        assert_eq!(agents, vec!["alpha", "beta", "gamma"]);

        let repo = f.store.load().unwrap().repo_root(&f.env.home);
        assert_eq!(
            fs::read_to_string(repo.join("configs").join("alpha").join("alpha.conf")).unwrap(),
            "alpha"
        );
    }

    #[test]
    fn test_run_export_all_succeeded_exit_zero() {
        let f = fixture(&["alpha"]);
        let mut import = ScriptedPrompter {
            direction: Some(Direction::Import),
            agents: Some(ids(&["alpha"])),
            ..Default::default()
        };
        run(&ctx(&f), &mut import, &mut |_| {}).unwrap();
        fs::remove_file(f.env.home.join("alpha.conf")).unwrap();

        let mut export = ScriptedPrompter {
            direction: Some(Direction::Export),
            agents: Some(ids(&["alpha"])),
            ..Default::default()
        };
        let SyncRun::Completed(report) = run(&ctx(&f), &mut export, &mut |_| {}).unwrap() else {
            panic!("expected a completed run");
        };

        assert_eq!(report.exit_code(), 0);
        assert_eq!(
            fs::read_to_string(f.env.home.join("alpha.conf")).unwrap(),
            "alpha"
        );
    }

    #[test]
    fn test_run_cancellations() {
        let f = fixture(&["alpha"]);

        let mut no_direction = ScriptedPrompter::default();
        assert!(matches!(
            run(&ctx(&f), &mut no_direction, &mut |_| {}).unwrap(),
            SyncRun::Cancelled(CancelReason::DirectionCancelled)
        ));
        assert_eq!(no_direction.asked, vec!["direction"]);

        let mut no_agents = ScriptedPrompter {
            direction: Some(Direction::Import),
            ..Default::default()
        };
        assert!(matches!(
            run(&ctx(&f), &mut no_agents, &mut |_| {}).unwrap(),
            SyncRun::Cancelled(CancelReason::SelectionCancelled)
        ));

        let mut empty = ScriptedPrompter {
            direction: Some(Direction::Import),
            agents: Some(vec![]),
            ..Default::default()
        };
        assert!(matches!(
            run(&ctx(&f), &mut empty, &mut |_| {}).unwrap(),
            SyncRun::Cancelled(CancelReason::NothingSelected)
        ));

        let repo = f.store.load().unwrap().repo_root(&f.env.home);
        assert!(!repo.exists());
    }

    #[test]
    fn test_run_without_config() {
        let dir = TempDir::new().unwrap();
        let f = Fixture {
            env: HostEnv::new(Platform::Linux, dir.path()),
            store: ConfigStore::new(dir.path().join("missing.toml")),
            registry: AdapterRegistry::builtin(),
            _dir: dir,
        };
        let mut prompter = ScriptedPrompter::default();

        let err = run(&ctx(&f), &mut prompter, &mut |_| {}).unwrap_err();
        assert!(matches!(err, SyncodeError::NotConfigured));
        assert!(prompter.asked.is_empty());
    }

    #[test]
    fn test_run_without_agents() {
        let f = fixture(&[]);
        let mut prompter = ScriptedPrompter::default();

        let err = run(&ctx(&f), &mut prompter, &mut |_| {}).unwrap_err();
        assert!(matches!(err, SyncodeError::NoAgentsConfigured));
    }

    #[test]
    fn test_agent_choices_label_unknown_ids() {
        let registry = AdapterRegistry::builtin();
        let choices = agent_choices(&ids(&["claude", "amp"]), &registry);

        assert_eq!(choices[0].label, "Claude Code");
        assert_eq!(choices[0].hint, None);
        assert_eq!(choices[1].label, "amp");
        assert_eq!(choices[1].hint.as_deref(), Some("No adapter found"));
    }

    #[test]
    fn test_direction_labels() {
        assert_eq!(Direction::Import.to_string(), "Import (system → repo)");
        assert_eq!(Direction::Export.verb(), "export");
        assert_eq!(CancelReason::NothingSelected.to_string(), "No agents selected");
    }
}

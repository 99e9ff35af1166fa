//! Import on one machine, export on another, through the builtin adapters.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use syncode::adapters::AdapterRegistry;
use syncode::agents::HostEnv;
use syncode::config::{ConfigStore, GlobalConfig};
use syncode::error::SyncodeError;
use syncode::platform::Platform;
use syncode::sync::{Direction, SyncOrchestrator};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Relative path -> contents for every file under `root`
fn snapshot(root: &Path) -> BTreeMap<String, String> {
    WalkDir::new(root)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap();
            (
                rel.to_string_lossy().replace('\\', "/"),
                fs::read_to_string(e.path()).unwrap(),
            )
        })
        .collect()
}

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn agents(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_tree_adapter_round_trips_between_machines() {
    let dir = TempDir::new().unwrap();
    let laptop = HostEnv::new(Platform::Linux, dir.path().join("laptop"));
    let desktop = HostEnv::new(Platform::Linux, dir.path().join("desktop"));
    let repo = dir.path().join("repo");
    let registry = AdapterRegistry::builtin();

    let source = laptop.home.join(".config/opencode");
    write(&source.join("opencode.json"), "{\"theme\":\"dark\"}");
    write(&source.join("agent/review.md"), "# Review");
    write(&source.join("node_modules/pkg/index.js"), "ignored");

    let import = SyncOrchestrator::new(&registry, &laptop, repo.clone()).run_agents(
        Direction::Import,
        &agents(&["opencode"]),
        &mut |_| {},
    );
    assert_eq!(import.exit_code(), 0);

    let export = SyncOrchestrator::new(&registry, &desktop, repo.clone()).run_agents(
        Direction::Export,
        &agents(&["opencode"]),
        &mut |_| {},
    );
    assert_eq!(export.exit_code(), 0);

    let mut expected = snapshot(&source);
    expected.remove("node_modules/pkg/index.js");
    assert_eq!(snapshot(&desktop.home.join(".config/opencode")), expected);
}

#[test]
fn test_subset_adapter_round_trips_filtered_entries() {
    let dir = TempDir::new().unwrap();
    let laptop = HostEnv::new(Platform::Linux, dir.path().join("laptop"));
    let desktop = HostEnv::new(Platform::Linux, dir.path().join("desktop"));
    let repo = dir.path().join("repo");
    let registry = AdapterRegistry::builtin();

    let claude = laptop.home.join(".claude");
    write(&claude.join("CLAUDE.md"), "be terse");
    write(&claude.join("settings.json"), "{}");
    write(&claude.join("commands/ship.md"), "ship it");
    write(&claude.join(".credentials.json"), "secret");
    write(&claude.join("projects/foo/session.jsonl"), "{}");

    SyncOrchestrator::new(&registry, &laptop, repo.clone()).run_agents(
        Direction::Import,
        &agents(&["claude"]),
        &mut |_| {},
    );
    let repo_files = snapshot(&repo.join("configs/claude"));
    assert!(!repo_files.contains_key(".credentials.json"));
    assert!(!repo_files.keys().any(|k| k.starts_with("projects/")));

    SyncOrchestrator::new(&registry, &desktop, repo.clone()).run_agents(
        Direction::Export,
        &agents(&["claude"]),
        &mut |_| {},
    );

    let exported = snapshot(&desktop.home.join(".claude"));
    let expected: BTreeMap<String, String> = [
        ("CLAUDE.md", "be terse"),
        ("commands/ship.md", "ship it"),
        ("settings.json", "{}"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    assert_eq!(exported, expected);
}

#[test]
fn test_missing_sources_are_reported_per_agent() {
    let dir = TempDir::new().unwrap();
    let env = HostEnv::new(Platform::Linux, dir.path().join("home"));
    let registry = AdapterRegistry::builtin();
    write(&env.home.join(".zshrc"), "setopt autocd\n");

    let report = SyncOrchestrator::new(&registry, &env, dir.path().join("repo")).run_agents(
        Direction::Import,
        &agents(&["codex", "windsurf", "zsh"]),
        &mut |_| {},
    );

    assert_eq!(report.outcomes.len(), 3);
    assert!(report.outcomes[0].result.message.contains("not found"));
    assert_eq!(
        report.outcomes[1].result.message,
        "No adapter found for windsurf"
    );
    assert!(report.outcomes[2].succeeded());
    assert_eq!(report.success_count(), 1);
    assert_eq!(report.fail_count(), 2);
}

#[test]
fn test_absent_config_touches_nothing() {
    let dir = TempDir::new().unwrap();
    let env = HostEnv::new(Platform::Linux, dir.path().join("home"));
    let store = ConfigStore::new(dir.path().join("config.toml"));

    assert!(matches!(store.load(), Err(SyncodeError::NotConfigured)));
    assert!(matches!(store.load(), Err(SyncodeError::NotConfigured)));
    assert!(!store.exists());
    assert!(!env.home.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_config_repo_root_drives_sync_location() {
    let dir = TempDir::new().unwrap();
    let env = HostEnv::new(Platform::Linux, dir.path().join("home"));
    let config = GlobalConfig::new("~/dotfiles", agents(&["zsh"]));
    write(&env.home.join(".zshrc"), "bindkey -e\n");

    let registry = AdapterRegistry::builtin();
    let report = SyncOrchestrator::new(&registry, &env, config.repo_root(&env.home)).run_agents(
        Direction::Import,
        &config.agents,
        &mut |_| {},
    );

    assert_eq!(report.exit_code(), 0);
    assert_eq!(
        fs::read_to_string(env.home.join("dotfiles/configs/zsh/.zshrc")).unwrap(),
        "bindkey -e\n"
    );
}

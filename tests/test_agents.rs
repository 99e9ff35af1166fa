use std::fs;
use syncode::adapters::AdapterRegistry;
use syncode::agents::{
    agents_with_adapters, all_agent_ids, detect_installed_agents, get_agent_metadata,
    is_agent_installed, HostEnv,
};
use syncode::platform::Platform;
use tempfile::TempDir;

#[test]
fn test_registry_lists_every_adapter_backed_agent() {
    let registry = AdapterRegistry::builtin();
    let available = registry.list_available();

    assert!(available.contains(&"claude".to_string()));
    assert!(available.contains(&"opencode".to_string()));
    assert_eq!(available.len(), agents_with_adapters().len());
}

#[test]
fn test_get_claude_adapter() {
    let registry = AdapterRegistry::builtin();
    let adapter = registry
        .get("claude")
        .expect("Claude adapter should be available");
    let home = std::path::Path::new("/home/alice");

    assert_eq!(adapter.id(), "claude");
    assert_eq!(adapter.name(), "Claude Code");
    assert_eq!(
        adapter.config_path(Platform::Linux, home),
        home.join(".claude")
    );
    assert_eq!(
        adapter.repo_path(std::path::Path::new("/srv/dotfiles")),
        std::path::PathBuf::from("/srv/dotfiles/configs/claude")
    );
}

#[test]
fn test_get_nonexistent_adapter() {
    let registry = AdapterRegistry::builtin();
    assert!(registry.get("nonexistent").is_none());
    assert!(registry.get("amp").is_none());
    assert!(get_agent_metadata("amp").is_some());
}

#[test]
fn test_every_id_has_metadata() {
    for id in all_agent_ids() {
        let meta = get_agent_metadata(id).unwrap();
        assert_eq!(meta.id, id);
        assert!(!meta.display_name.is_empty());
    }
}

#[test]
fn test_detection_over_temp_home() {
    let home = TempDir::new().unwrap();
    let env = HostEnv::new(Platform::Linux, home.path());
    assert!(detect_installed_agents(&env).is_empty());

    fs::create_dir_all(home.path().join(".gemini")).unwrap();
    fs::create_dir_all(home.path().join(".config/Code/User")).unwrap();
    fs::create_dir_all(home.path().join(".codeium/windsurf")).unwrap();

    assert_eq!(
        detect_installed_agents(&env),
        vec!["gemini", "vscode", "windsurf"]
    );
    assert!(is_agent_installed("gemini", &env));
    assert!(!is_agent_installed("cursor", &env));
    assert!(!is_agent_installed("unknown", &env));
}

#[cfg(unix)]
#[test]
fn test_detection_via_search_path() {
    use std::os::unix::fs::PermissionsExt;

    let home = TempDir::new().unwrap();
    let bin = home.path().join("bin");
    fs::create_dir_all(&bin).unwrap();
    let codex = bin.join("codex");
    fs::write(&codex, "#!/bin/sh\n").unwrap();
    fs::set_permissions(&codex, fs::Permissions::from_mode(0o755)).unwrap();

    let env = HostEnv::new(Platform::Linux, home.path()).with_search_path(&bin);

    assert_eq!(detect_installed_agents(&env), vec!["codex"]);
}

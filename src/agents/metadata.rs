//! Static table of known agents and their detection predicates.

use super::host::HostEnv;

/// A known agent. Defined once at compile time and never mutated.
#[derive(Clone, Copy)]
pub struct AgentMetadata {
    pub id: &'static str,
    pub display_name: &'static str,
    /// Whether a sync adapter is registered for this agent
    pub has_adapter: bool,
    /// Is this agent installed on the given machine
    pub detect: fn(&HostEnv) -> bool,
}

impl AgentMetadata {
    pub fn is_installed(&self, env: &HostEnv) -> bool {
        (self.detect)(env)
    }
}

static AGENTS: &[AgentMetadata] = &[
    AgentMetadata {
        id: "opencode",
        display_name: "OpenCode",
        has_adapter: true,
        detect: detect_opencode,
    },
    AgentMetadata {
        id: "claude",
        display_name: "Claude Code",
        has_adapter: true,
        detect: detect_claude,
    },
    AgentMetadata {
        id: "codex",
        display_name: "Codex CLI",
        has_adapter: true,
        detect: detect_codex,
    },
    AgentMetadata {
        id: "gemini",
        display_name: "Gemini CLI",
        has_adapter: true,
        detect: detect_gemini,
    },
    AgentMetadata {
        id: "cursor",
        display_name: "Cursor",
        has_adapter: true,
        detect: detect_cursor,
    },
    AgentMetadata {
        id: "vscode",
        display_name: "VS Code",
        has_adapter: true,
        detect: detect_vscode,
    },
    AgentMetadata {
        id: "ghostty",
        display_name: "Ghostty",
        has_adapter: true,
        detect: detect_ghostty,
    },
    AgentMetadata {
        id: "zsh",
        display_name: "Zsh",
        has_adapter: true,
        detect: detect_zsh,
    },
    AgentMetadata {
        id: "windsurf",
        display_name: "Windsurf",
        has_adapter: false,
        detect: detect_windsurf,
    },
    AgentMetadata {
        id: "amp",
        display_name: "Amp",
        has_adapter: false,
        detect: detect_amp,
    },
];

fn detect_opencode(env: &HostEnv) -> bool {
    env.home_exists(".config/opencode") || env.has_binary("opencode")
}

fn detect_claude(env: &HostEnv) -> bool {
    env.home_exists(".claude") || env.has_binary("claude")
}

fn detect_codex(env: &HostEnv) -> bool {
    env.home_exists(".codex") || env.has_binary("codex")
}

fn detect_gemini(env: &HostEnv) -> bool {
    env.home_exists(".gemini") || env.has_binary("gemini")
}

fn detect_cursor(env: &HostEnv) -> bool {
    env.app_config_dir("Cursor").join("User").is_dir()
}

fn detect_vscode(env: &HostEnv) -> bool {
    env.app_config_dir("Code").join("User").is_dir()
}

fn detect_ghostty(env: &HostEnv) -> bool {
    crate::adapters::ghostty::config_dir(env.platform, &env.home).is_dir()
        || env.has_binary("ghostty")
}

fn detect_zsh(env: &HostEnv) -> bool {
    env.home_exists(".zshrc")
}

fn detect_windsurf(env: &HostEnv) -> bool {
    env.home_exists(".codeium/windsurf") || env.has_binary("windsurf")
}

fn detect_amp(env: &HostEnv) -> bool {
    env.home_exists(".config/amp") || env.has_binary("amp")
}

/// Look up an agent by id
pub fn get_agent_metadata(id: &str) -> Option<&'static AgentMetadata> {
    AGENTS.iter().find(|a| a.id == id)
}

/// Display name for an id, falling back to the id itself for unknown agents
pub fn display_name(id: &str) -> &str {
    get_agent_metadata(id).map_or(id, |a| a.display_name)
}

/// Every known agent id, in table order
pub fn all_agent_ids() -> Vec<&'static str> {
    AGENTS.iter().map(|a| a.id).collect()
}

/// Unknown ids are never installed
pub fn is_agent_installed(id: &str, env: &HostEnv) -> bool {
    get_agent_metadata(id).is_some_and(|a| a.is_installed(env))
}

/// Ids of all agents detected on this machine, in table order
pub fn detect_installed_agents(env: &HostEnv) -> Vec<String> {
    AGENTS
        .iter()
        .filter(|a| a.is_installed(env))
        .map(|a| a.id.to_string())
        .collect()
}

pub fn agents_with_adapters() -> Vec<&'static str> {
    AGENTS.iter().filter(|a| a.has_adapter).map(|a| a.id).collect()
}

pub fn agents_without_adapters() -> Vec<&'static str> {
    AGENTS.iter().filter(|a| !a.has_adapter).map(|a| a.id).collect()
}

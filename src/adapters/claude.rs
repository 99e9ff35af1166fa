use super::{Adapter, Layout};
use crate::platform::Platform;
use std::path::{Path, PathBuf};

/// Everything else under `~/.claude` is machine-local state
/// (projects, todos, shell snapshots, credentials).
const SYNCED: &[&str] = &[
    "CLAUDE.md",
    "settings.json",
    "agents",
    "commands",
    "skills",
    "hooks",
    "output-styles",
];

pub struct ClaudeAdapter;

impl Adapter for ClaudeAdapter {
    fn id(&self) -> &'static str {
        "claude"
    }

    fn name(&self) -> &'static str {
        "Claude Code"
    }

    fn config_path(&self, _platform: Platform, home: &Path) -> PathBuf {
        home.join(".claude")
    }

    fn layout(&self) -> Layout {
        Layout::Subset { entries: SYNCED }
    }
}

use super::{Adapter, Layout};
use crate::platform::Platform;
use std::path::{Path, PathBuf};

pub struct CodexAdapter;

impl Adapter for CodexAdapter {
    fn id(&self) -> &'static str {
        "codex"
    }

    fn name(&self) -> &'static str {
        "Codex CLI"
    }

    fn config_path(&self, _platform: Platform, home: &Path) -> PathBuf {
        home.join(".codex")
    }

    // auth.json and sessions/ stay on the machine
    fn layout(&self) -> Layout {
        Layout::Subset {
            entries: &["config.toml", "AGENTS.md", "prompts"],
        }
    }
}

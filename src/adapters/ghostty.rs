use super::{Adapter, Layout, REPO_CONFIGS_DIR};
use crate::platform::Platform;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config";

/// Directory holding Ghostty's config file
pub fn config_dir(platform: Platform, home: &Path) -> PathBuf {
    match platform {
        Platform::Macos => home
            .join("Library")
            .join("Application Support")
            .join("com.mitchellh.ghostty"),
        Platform::Linux | Platform::Windows => home.join(".config").join("ghostty"),
    }
}

pub struct GhosttyAdapter;

impl Adapter for GhosttyAdapter {
    fn id(&self) -> &'static str {
        "ghostty"
    }

    fn name(&self) -> &'static str {
        "Ghostty"
    }

    fn config_path(&self, platform: Platform, home: &Path) -> PathBuf {
        config_dir(platform, home).join(CONFIG_FILE)
    }

    fn repo_path(&self, repo_root: &Path) -> PathBuf {
        repo_root
            .join(REPO_CONFIGS_DIR)
            .join(self.id())
            .join(CONFIG_FILE)
    }

    fn layout(&self) -> Layout {
        Layout::File
    }
}

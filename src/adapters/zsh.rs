use super::{Adapter, Layout, REPO_CONFIGS_DIR};
use crate::platform::Platform;
use std::path::{Path, PathBuf};

pub struct ZshAdapter;

impl Adapter for ZshAdapter {
    fn id(&self) -> &'static str {
        "zsh"
    }

    fn name(&self) -> &'static str {
        "Zsh"
    }

    fn config_path(&self, _platform: Platform, home: &Path) -> PathBuf {
        home.join(".zshrc")
    }

    fn repo_path(&self, repo_root: &Path) -> PathBuf {
        repo_root.join(REPO_CONFIGS_DIR).join(self.id()).join(".zshrc")
    }

    fn layout(&self) -> Layout {
        Layout::File
    }
}

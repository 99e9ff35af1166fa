use super::{Adapter, Layout};
use crate::platform::Platform;
use std::path::{Path, PathBuf};

pub struct OpenCodeAdapter;

impl Adapter for OpenCodeAdapter {
    fn id(&self) -> &'static str {
        "opencode"
    }

    fn name(&self) -> &'static str {
        "OpenCode"
    }

    // opencode uses the XDG layout on every platform
    fn config_path(&self, _platform: Platform, home: &Path) -> PathBuf {
        home.join(".config").join("opencode")
    }

    fn layout(&self) -> Layout {
        Layout::Tree {
            exclude: &["node_modules", ".git"],
        }
    }
}

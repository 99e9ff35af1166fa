//! VS Code style editors keep user settings in `<app config>/User`.

use super::{Adapter, Layout};
use crate::agents::host::app_config_dir;
use crate::platform::Platform;
use std::path::{Path, PathBuf};

const EDITOR_FILES: &[&str] = &["settings.json", "keybindings.json", "snippets"];

fn user_dir(platform: Platform, home: &Path, app: &str) -> PathBuf {
    app_config_dir(platform, home, app).join("User")
}

pub struct CursorAdapter;

impl Adapter for CursorAdapter {
    fn id(&self) -> &'static str {
        "cursor"
    }

    fn name(&self) -> &'static str {
        "Cursor"
    }

    fn config_path(&self, platform: Platform, home: &Path) -> PathBuf {
        user_dir(platform, home, "Cursor")
    }

    fn layout(&self) -> Layout {
        Layout::Subset {
            entries: EDITOR_FILES,
        }
    }
}

pub struct VsCodeAdapter;

impl Adapter for VsCodeAdapter {
    fn id(&self) -> &'static str {
        "vscode"
    }

    fn name(&self) -> &'static str {
        "VS Code"
    }

    fn config_path(&self, platform: Platform, home: &Path) -> PathBuf {
        user_dir(platform, home, "Code")
    }

    fn layout(&self) -> Layout {
        Layout::Subset {
            entries: EDITOR_FILES,
        }
    }
}

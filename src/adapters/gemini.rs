use super::{Adapter, Layout};
use crate::platform::Platform;
use std::path::{Path, PathBuf};

pub struct GeminiAdapter;

impl Adapter for GeminiAdapter {
    fn id(&self) -> &'static str {
        "gemini"
    }

    fn name(&self) -> &'static str {
        "Gemini CLI"
    }

    fn config_path(&self, _platform: Platform, home: &Path) -> PathBuf {
        home.join(".gemini")
    }

    fn layout(&self) -> Layout {
        Layout::Subset {
            entries: &["settings.json", "GEMINI.md", "commands"],
        }
    }
}

//! The machine view agent detection and path resolution run against.

use crate::error::{Result, SyncodeError};
use crate::platform::Platform;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Platform, home directory and executable search path of a machine.
#[derive(Debug, Clone)]
pub struct HostEnv {
    pub platform: Platform,
    pub home: PathBuf,
    /// `PATH`-style list used for binary lookups. `None` disables them.
    pub search_path: Option<OsString>,
}

impl HostEnv {
    /// Build from the running process: current platform, `$HOME`, `$PATH`
    pub fn detect() -> Result<Self> {
        let home = dirs::home_dir().ok_or(SyncodeError::HomeNotFound)?;
        Ok(Self {
            platform: Platform::current(),
            home,
            search_path: std::env::var_os("PATH"),
        })
    }

    /// A host rooted at `home` with binary lookups disabled
    pub fn new(platform: Platform, home: impl Into<PathBuf>) -> Self {
        Self {
            platform,
            home: home.into(),
            search_path: None,
        }
    }

    pub fn with_search_path(mut self, search_path: impl Into<OsString>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }

    /// Whether an executable named `name` is on the search path
    pub fn has_binary(&self, name: &str) -> bool {
        match &self.search_path {
            Some(paths) => which::which_in(name, Some(paths), &self.home).is_ok(),
            None => false,
        }
    }

    /// Whether `relative` exists under the home directory
    pub fn home_exists(&self, relative: impl AsRef<Path>) -> bool {
        self.home.join(relative).exists()
    }

    /// Per-platform application config directory, see [`app_config_dir`]
    pub fn app_config_dir(&self, app: &str) -> PathBuf {
        app_config_dir(self.platform, &self.home, app)
    }
}

/// Where desktop applications keep their settings:
/// `Library/Application Support` on macOS, `AppData/Roaming` on Windows,
/// `.config` elsewhere.
pub fn app_config_dir(platform: Platform, home: &Path, app: &str) -> PathBuf {
    match platform {
        Platform::Macos => home.join("Library").join("Application Support").join(app),
        Platform::Windows => home.join("AppData").join("Roaming").join(app),
        Platform::Linux => home.join(".config").join(app),
    }
}

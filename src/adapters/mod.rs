//! Per-agent sync adapters.
//!
//! An adapter knows where an agent keeps its config on this machine, where
//! that config lives inside the sync repository, and how to copy between
//! the two. Adapters are stateless; the registry hands out shared
//! instances.

pub mod claude;
pub mod codex;
pub mod editor;
pub mod gemini;
pub mod ghostty;
pub mod layout;
pub mod opencode;
pub mod registry;
pub mod zsh;

pub use layout::{CopyStats, Layout};
pub use registry::AdapterRegistry;

use crate::error::Result;
use crate::platform::Platform;
use std::path::{Path, PathBuf};

/// Directory inside the repository holding one subdirectory per agent
pub const REPO_CONFIGS_DIR: &str = "configs";

/// Outcome of one import or export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncResult {
    pub success: bool,
    pub message: String,
}

impl SyncResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Sync capabilities of one agent.
///
/// Expected conditions such as a missing source are reported through
/// [`SyncResult::failed`]; `Err` is reserved for I/O failures.
pub trait Adapter: Send + Sync {
    fn id(&self) -> &'static str;

    fn name(&self) -> &'static str;

    /// Location of the agent's config on a machine
    fn config_path(&self, platform: Platform, home: &Path) -> PathBuf;

    fn layout(&self) -> Layout;

    /// Location of the agent's config inside the repository
    fn repo_path(&self, repo_root: &Path) -> PathBuf {
        repo_root.join(REPO_CONFIGS_DIR).join(self.id())
    }

    /// Copy system config into the repository
    fn import(&self, system_path: &Path, repo_path: &Path) -> Result<SyncResult> {
        if let Some(linked) = self.already_linked(system_path, repo_path) {
            return Ok(linked);
        }
        Ok(match self.layout().sync(system_path, repo_path)? {
            Some(stats) => SyncResult::ok(format!("Imported {} ({})", self.name(), stats)),
            None => SyncResult::failed(format!(
                "{} config not found at {}",
                self.name(),
                system_path.display()
            )),
        })
    }

    /// Copy repository config onto the system
    fn export(&self, repo_path: &Path, system_path: &Path) -> Result<SyncResult> {
        if let Some(linked) = self.already_linked(system_path, repo_path) {
            return Ok(linked);
        }
        Ok(match self.layout().sync(repo_path, system_path)? {
            Some(stats) => SyncResult::ok(format!("Exported {} ({})", self.name(), stats)),
            None => SyncResult::failed(format!(
                "No {} config in repository at {}. Import it on another machine first.",
                self.name(),
                repo_path.display()
            )),
        })
    }

    /// Result for a system path that resolves into the repository, as with
    /// a symlinked dotfile. A single file is already in sync; a directory
    /// is reported so the link is not mistaken for a copy.
    fn already_linked(&self, system_path: &Path, repo_path: &Path) -> Option<SyncResult> {
        if !layout::same_location(system_path, repo_path) {
            return None;
        }
        Some(match self.layout() {
            Layout::File => SyncResult::ok(format!(
                "{} already points at the repository",
                self.name()
            )),
            Layout::Tree { .. } | Layout::Subset { .. } => SyncResult::failed(format!(
                "{} config at {} already points at the repository",
                self.name(),
                system_path.display()
            )),
        })
    }
}

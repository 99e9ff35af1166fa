//! Bring the sync repository up to date with its remote.
//!
//! The workflow refuses to touch a repository with uncommitted changes,
//! fetches, and only pulls (fast-forward) when the local branch is behind.

use crate::agents::HostEnv;
use crate::config::ConfigStore;
use crate::error::{Result, SyncodeError};
use crate::trace::{self, ErrorDetail, TraceRecord};
use crate::utils::git::{GitOps, SystemGit};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Steps reported while the workflow runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullStep<'a> {
    Remote { url: &'a str, branch: &'a str },
    Fetching,
    Behind(u32),
    Pulling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullOutcome {
    UpToDate,
    Pulled { commits: u32, branch: String },
}

pub struct PullWorkflow<G: GitOps> {
    git: G,
    trace_dir: PathBuf,
}

impl<G: GitOps> PullWorkflow<G> {
    /// `trace_dir` receives a trace file when the pull itself fails
    pub fn new(git: G, trace_dir: PathBuf) -> Self {
        Self { git, trace_dir }
    }

    pub fn git(&self) -> &G {
        &self.git
    }

    pub fn trace_dir(&self) -> &Path {
        &self.trace_dir
    }

    pub fn run(&self, observer: &mut dyn FnMut(PullStep<'_>)) -> Result<PullOutcome> {
        let url = self.git.remote_url()?.ok_or(SyncodeError::NoRemote)?;
        let branch = self.git.current_branch()?;
        observer(PullStep::Remote {
            url: &url,
            branch: &branch,
        });

        let status = self.git.status_summary()?;
        if !status.trim().is_empty() {
            return Err(SyncodeError::DirtyWorkingTree(status));
        }

        observer(PullStep::Fetching);
        self.git
            .fetch()
            .map_err(|e| SyncodeError::FetchFailed(git_message(e)))?;

        let behind = self.git.behind_count()?;
        debug!(behind, branch = %branch, "fetched");
        if behind == 0 {
            return Ok(PullOutcome::UpToDate);
        }

        observer(PullStep::Behind(behind));
        observer(PullStep::Pulling);
        if let Err(e) = self.git.pull() {
            let message = git_message(e);
            let record = TraceRecord::new(
                Some("pull"),
                vec![],
                ErrorDetail::from_message("PullFailed", message.clone()),
            );
            let trace = trace::write_trace(&self.trace_dir, &record)?;
            return Err(SyncodeError::PullFailed { message, trace });
        }

        Ok(PullOutcome::Pulled {
            commits: behind,
            branch,
        })
    }
}

/// Workflow over the configured repository, with traces in its log dir
pub fn workflow_for(store: &ConfigStore, env: &HostEnv) -> Result<PullWorkflow<SystemGit>> {
    let config = store.load()?;
    let repo_root = config.repo_root(&env.home);
    let git = SystemGit::new(&repo_root);
    if !git.is_repository() {
        return Err(SyncodeError::Git(format!(
            "{} is not a git repository",
            repo_root.display()
        )));
    }
    Ok(PullWorkflow::new(git, trace::log_dir(&repo_root)))
}

/// Git's own text for git failures, the full message otherwise
fn git_message(error: SyncodeError) -> String {
    match error {
        SyncodeError::Git(message) => message,
        other => other.to_string(),
    }
}

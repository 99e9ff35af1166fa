use crate::error::{Result, SyncodeError};
use crate::trace::LOG_DIR;
use crate::utils::process::{run_with_timeout, CommandOutput};
use std::io;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

/// Timeout for local, read-only git queries
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for git operations that talk to the remote
pub const NETWORK_TIMEOUT: Duration = Duration::from_secs(120);

/// Git operations the pull workflow depends on.
pub trait GitOps {
    /// URL of the preferred remote (`origin` if present), `None` without remotes
    fn remote_url(&self) -> Result<Option<String>>;

    /// Current branch name; errors on detached HEAD
    fn current_branch(&self) -> Result<String>;

    /// Porcelain status of the working tree, empty when clean
    fn status_summary(&self) -> Result<String>;

    fn fetch(&self) -> Result<()>;

    /// Number of commits the local branch is behind its remote tracking branch
    fn behind_count(&self) -> Result<u32>;

    /// Fast-forward the local branch to the remote
    fn pull(&self) -> Result<()>;
}

/// `GitOps` backed by the `git` executable, run against a fixed repository.
#[derive(Debug, Clone)]
pub struct SystemGit {
    repo: PathBuf,
}

impl SystemGit {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }

    /// Whether the repository path is inside a git work tree
    pub fn is_repository(&self) -> bool {
        self.repo.is_dir()
            && self
                .run(&["rev-parse", "--is-inside-work-tree"], QUERY_TIMEOUT)
                .map(|o| o.success() && o.stdout.trim() == "true")
                .unwrap_or(false)
    }

    fn run(&self, args: &[&str], timeout: Duration) -> Result<CommandOutput> {
        let mut command = Command::new("git");
        command
            .arg("-C")
            .arg(&self.repo)
            .args(args)
            .env("GIT_TERMINAL_PROMPT", "0");

        tracing::debug!(repo = %self.repo.display(), ?args, "running git");

        run_with_timeout(&mut command, timeout).map_err(|e| match e.kind() {
            io::ErrorKind::TimedOut => SyncodeError::Git(format!(
                "git {} timed out after {}s",
                args.first().copied().unwrap_or_default(),
                timeout.as_secs()
            )),
            _ => SyncodeError::Git(format!("Failed to run git: {}", e)),
        })
    }

    /// Run git and return trimmed stdout, failing with git's own message
    fn run_checked(&self, args: &[&str], timeout: Duration) -> Result<String> {
        let output = self.run(args, timeout)?;
        if !output.success() {
            return Err(SyncodeError::Git(output.message()));
        }
        Ok(output.stdout.trim().to_string())
    }

    fn preferred_remote(&self) -> Result<Option<String>> {
        let remotes = self.run_checked(&["remote"], QUERY_TIMEOUT)?;
        Ok(pick_remote(&remotes))
    }
}

impl GitOps for SystemGit {
    fn remote_url(&self) -> Result<Option<String>> {
        let Some(remote) = self.preferred_remote()? else {
            return Ok(None);
        };
        let url = self.run_checked(&["remote", "get-url", &remote], QUERY_TIMEOUT)?;
        Ok(if url.is_empty() { None } else { Some(url) })
    }

    fn current_branch(&self) -> Result<String> {
        let output = self.run(&["symbolic-ref", "--short", "HEAD"], QUERY_TIMEOUT)?;
        if !output.success() {
            return Err(SyncodeError::Git(
                "Not on a branch (detached HEAD)".to_string(),
            ));
        }
        Ok(output.stdout.trim().to_string())
    }

    fn status_summary(&self) -> Result<String> {
        // Porcelain paths are relative to the top level, not to `repo`
        let prefix = self.run_checked(&["rev-parse", "--show-prefix"], QUERY_TIMEOUT)?;
        let output = self.run(&["status", "--porcelain"], QUERY_TIMEOUT)?;
        if !output.success() {
            return Err(SyncodeError::Git(output.message()));
        }
        Ok(filter_status(&output.stdout, &prefix))
    }

    fn fetch(&self) -> Result<()> {
        self.run_checked(&["fetch", "--quiet"], NETWORK_TIMEOUT)
            .map(|_| ())
    }

    fn behind_count(&self) -> Result<u32> {
        let upstream = self.run(&["rev-list", "--count", "HEAD..@{u}"], QUERY_TIMEOUT)?;
        let count = if upstream.success() {
            upstream.stdout
        } else {
            // No tracking branch configured: compare against <remote>/<branch>
            let remote = self.preferred_remote()?.ok_or(SyncodeError::NoRemote)?;
            let branch = self.current_branch()?;
            let range = format!("HEAD..{}/{}", remote, branch);
            self.run_checked(&["rev-list", "--count", &range], QUERY_TIMEOUT)?
        };

        count
            .trim()
            .parse()
            .map_err(|_| SyncodeError::Git(format!("Unexpected rev-list output: {}", count.trim())))
    }

    fn pull(&self) -> Result<()> {
        let remote = self.preferred_remote()?.ok_or(SyncodeError::NoRemote)?;
        let branch = self.current_branch()?;
        self.run_checked(
            &["pull", "--ff-only", "--quiet", &remote, &branch],
            NETWORK_TIMEOUT,
        )
        .map(|_| ())
    }
}

/// Choose `origin` when configured, otherwise the first listed remote
fn pick_remote(remotes: &str) -> Option<String> {
    let names: Vec<&str> = remotes
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    names
        .iter()
        .find(|n| **n == "origin")
        .or_else(|| names.first())
        .map(|n| n.to_string())
}

/// Drop porcelain entries for syncode's own trace directory.
/// Trace files are written into the repository on failures and must not
/// make the tree look dirty on the next pull. `prefix` is the repository
/// root's path below the git top level, as printed by `--show-prefix`.
fn filter_status(porcelain: &str, prefix: &str) -> String {
    let log_dir = format!("{}{}/", prefix, LOG_DIR);
    porcelain
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| {
            let path = line.get(3..).unwrap_or_default().trim_matches('"');
            !path.starts_with(&log_dir)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_remote_prefers_origin() {
        assert_eq!(pick_remote("upstream\norigin\n"), Some("origin".to_string()));
        assert_eq!(pick_remote("upstream\n"), Some("upstream".to_string()));
        assert_eq!(pick_remote(""), None);
        assert_eq!(pick_remote("\n  \n"), None);
    }

    #[test]
    fn test_filter_status_ignores_trace_dir() {
        let porcelain = " M configs/claude/settings.json\n?? .syncode-logs/\n?? new.txt\n";
        assert_eq!(
            filter_status(porcelain, ""),
            " M configs/claude/settings.json\n?? new.txt"
        );
    }

    #[test]
    fn test_filter_status_only_trace_dir_is_clean() {
        let porcelain = "?? .syncode-logs/syncode-trace-1.log\n";
        assert!(filter_status(porcelain, "").is_empty());
    }

    #[test]
    fn test_filter_status_keeps_lookalike_dirs() {
        let porcelain = "?? .syncode-logs-old/x\n?? .syncode-logs/syncode-trace-1.log\n";
        assert_eq!(filter_status(porcelain, ""), "?? .syncode-logs-old/x");
    }

    #[test]
    fn test_filter_status_repo_in_subdirectory() {
        let porcelain = "?? dotfiles/.syncode-logs/\n?? .syncode-logs/\n M dotfiles/x\n";
        assert_eq!(
            filter_status(porcelain, "dotfiles/"),
            "?? .syncode-logs/\n M dotfiles/x"
        );
    }

    #[test]
    fn test_filter_status_empty() {
        assert!(filter_status("", "").is_empty());
    }
}

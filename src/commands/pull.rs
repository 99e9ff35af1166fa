use crate::agents::HostEnv;
use crate::commands::Outcome;
use crate::config::ConfigStore;
use crate::error::{Result, SyncodeError};
use crate::pull::{self, PullOutcome, PullStep};
use crate::reconcile;
use crate::trace::{self, ErrorDetail, TraceRecord};
use indicatif::ProgressBar;
use std::time::Duration;

pub fn execute(store: &ConfigStore, env: &HostEnv) -> Result<Outcome> {
    let workflow = pull::workflow_for(store, env)?;

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = workflow.run(&mut |step| match step {
        PullStep::Remote { url, branch } => {
            spinner.suspend(|| println!("Remote: {} ({})", url, branch));
        }
        PullStep::Fetching => spinner.set_message("Fetching from remote..."),
        PullStep::Behind(commits) => {
            spinner.suspend(|| println!("{} new commit(s) on remote", commits));
        }
        PullStep::Pulling => spinner.set_message("Pulling changes..."),
    });
    spinner.finish_and_clear();

    match result {
        Ok(outcome) => {
            match outcome {
                PullOutcome::UpToDate => println!("✓ Already up to date"),
                PullOutcome::Pulled { commits, branch } => {
                    println!("✓ Pulled {} commit(s) into {}", commits, branch);
                    println!("Run 'syncode sync --export' to apply them to this machine");
                }
            }
            if reconcile::has_new_configs_available(store, env) {
                println!("New agent configs detected. Run 'syncode sync' to add them.");
            }
            Ok(Outcome::Success)
        }
        Err(SyncodeError::DirtyWorkingTree(summary)) => {
            println!("Uncommitted changes:");
            for line in summary.lines() {
                println!("  {}", line);
            }
            Err(SyncodeError::DirtyWorkingTree(summary))
        }
        Err(e) if is_expected(&e) => Err(e),
        Err(e) => {
            let record = TraceRecord::new(
                Some("pull"),
                std::env::args().skip(2).collect(),
                ErrorDetail::from_error(e.kind(), &e),
            );
            match trace::write_trace(workflow.trace_dir(), &record) {
                Ok(path) => eprintln!("{}", trace::issue_hint(&path)),
                Err(trace_err) => {
                    tracing::warn!(error = %trace_err, "could not write trace file")
                }
            }
            Err(e)
        }
    }
}

/// Failures with their own remediation message, not worth a trace
fn is_expected(error: &SyncodeError) -> bool {
    matches!(
        error,
        SyncodeError::NotConfigured
            | SyncodeError::NoRemote
            | SyncodeError::DirtyWorkingTree(_)
            | SyncodeError::FetchFailed(_)
            | SyncodeError::PullFailed { .. }
    )
}

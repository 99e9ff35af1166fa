use crate::adapters::AdapterRegistry;
use crate::agents::{display_name, HostEnv};
use crate::cli::SyncArgs;
use crate::commands::Outcome;
use crate::config::ConfigStore;
use crate::error::Result;
use crate::prompt::CliPrompter;
use crate::reconcile::{self, Migration};
use crate::sync::{self, SyncContext, SyncProgress, SyncReport, SyncRun};
use indicatif::ProgressBar;
use std::io::IsTerminal;
use std::time::Duration;

pub fn execute(
    store: &ConfigStore,
    env: &HostEnv,
    registry: &AdapterRegistry,
    args: &SyncArgs,
) -> Result<Outcome> {
    let interactive = std::io::stdin().is_terminal();
    let mut prompter = CliPrompter::new(args.direction(), args.agents.clone(), args.yes, interactive);

    // Without a terminal only --yes may grow the config
    let silent = args.no_migrate || (!interactive && !args.yes);
    match reconcile::check_and_migrate_config(store, env, &mut prompter, silent)? {
        Migration::Added(ids) => {
            let names: Vec<&str> = ids.iter().map(|id| display_name(id)).collect();
            println!("✓ Added {} to your config", names.join(", "));
        }
        Migration::Skipped(ids) => {
            tracing::info!(agents = ?ids, "new agents detected, not added");
        }
        _ => {}
    }

    let ctx = SyncContext {
        store,
        env,
        registry,
    };

    let mut spinner: Option<ProgressBar> = None;
    let run = sync::run(&ctx, &mut prompter, &mut |event| match event {
        SyncProgress::Started {
            index, total, name, ..
        } => {
            let bar = spinner.get_or_insert_with(|| {
                let bar = ProgressBar::new_spinner();
                bar.enable_steady_tick(Duration::from_millis(100));
                bar
            });
            bar.set_message(format!("[{}/{}] {}...", index + 1, total, name));
        }
        SyncProgress::Finished(outcome) => {
            let mark = if outcome.succeeded() { "✓" } else { "✗" };
            let line = format!("  {} {}", mark, outcome.result.message);
            match &spinner {
                Some(bar) => bar.suspend(|| println!("{}", line)),
                None => println!("{}", line),
            }
        }
    });
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }

    match run? {
        SyncRun::Cancelled(reason) => {
            println!("{}", reason);
            Ok(Outcome::Aborted)
        }
        SyncRun::Completed(report) => {
            print_summary(&report);
            Ok(outcome_for(&report))
        }
    }
}

fn print_summary(report: &SyncReport) {
    let verb = match report.direction {
        sync::Direction::Import => "Imported",
        sync::Direction::Export => "Exported",
    };
    println!();
    if report.fail_count() == 0 {
        println!("{} {} agent config(s)", verb, report.success_count());
    } else {
        println!(
            "{} {} agent config(s), {} failed",
            verb,
            report.success_count(),
            report.fail_count()
        );
    }
}

fn outcome_for(report: &SyncReport) -> Outcome {
    match report.exit_code() {
        0 => Outcome::Success,
        _ => Outcome::PartialFailure,
    }
}

use std::process;
use std::sync::atomic::Ordering;

use clap::Parser;
use log::{error, info, warn};

use article_importer_lib::{delay, input_loader, logger, prompt};
use article_importer_lib::{BatchRunner, HttpSubmitter, ProgressRecord, RunConfig, RunError};

fn main() {
    logger::init();
    let config = RunConfig::parse();
    info!("Starting article importer...");

    let stop = delay::new_stop_flag();
    {
        let stop = stop.clone();
        if let Err(e) = ctrlc::set_handler(move || {
            stop.store(true, Ordering::SeqCst);
            eprintln!("Stop requested; finishing the current URL...");
        }) {
            warn!("Could not install Ctrl-C handler: {}. Interrupts will abort hard.", e);
        }
    }

    let items = match input_loader::load_items(&config.input) {
        Ok(items) => items,
        Err(e) => fatal(&e),
    };
    if items.is_empty() {
        error!(
            "No importable URLs found in {:?}. Expected one absolute http(s) URL per line.",
            config.input
        );
        process::exit(1);
    }

    let (mut progress, fresh) = ProgressRecord::load(&config.progress_file);

    let mut start_at = config.start_at;
    if !fresh {
        if config.yes || prompt::confirm("Resume after the last imported URL?") {
            if let Some(last) = progress.last_completed {
                start_at = last + 1;
                info!("Resuming at URL {} of {}.", start_at + 1, items.len());
            }
        } else {
            info!("Not resuming; starting at index {}.", start_at);
        }
    }

    if !config.yes {
        prompt::wait_for_enter(
            "Log in to the import site in your browser session, then press Enter to start...",
        );
    }

    let submitter = match HttpSubmitter::new(&config.endpoint) {
        Ok(s) => s,
        Err(e) => fatal(&RunError::SetupFault(e.to_string())),
    };

    let runner = BatchRunner::new(&submitter, &config, stop);
    let summary = match runner.run(&items, &mut progress, start_at) {
        Ok(summary) => summary,
        Err(e) => fatal(&e),
    };

    info!(
        "Run finished: {} imported, {} failed, {} skipped ({} submitted this run).",
        summary.succeeded,
        summary.failed.len(),
        summary.skipped,
        summary.submitted
    );
    for failed in &summary.failed {
        warn!(
            "  failed: {} after {} attempt(s): {}",
            failed.url, failed.attempts, failed.reason
        );
    }
    if summary.stopped_early {
        warn!("Run stopped at the first failure (--stop-on-error).");
    }
    if summary.interrupted {
        warn!("Run interrupted; re-run with the same progress file to resume.");
    }
}

// Fatal faults get a remediation hint and a non-zero exit. Item failures
// never come through here.
fn fatal(e: &RunError) -> ! {
    error!("{}", e);
    match e {
        RunError::SourceUnreadable { path, .. } => {
            error!("Check that {:?} exists and is readable, then re-run.", path);
        }
        RunError::SetupFault(_) => {
            error!("Fix the --endpoint URL or the browser session, then re-run; completed URLs will be skipped.");
        }
    }
    process::exit(1);
}

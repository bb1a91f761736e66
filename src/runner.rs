use log::{error, info, warn};

use crate::config::RunConfig;
use crate::delay::{self, StopFlag};
use crate::error::RunError;
use crate::input_loader::WorkItem;
use crate::progress::{FailedItem, ProgressRecord};
use crate::retry::{self, ItemOutcome};
use crate::submitter::Submitter;

/// What happened over the whole run, for the end-of-run report.
#[derive(Debug, Default, PartialEq)]
pub struct RunSummary {
    pub submitted: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: Vec<FailedItem>,
    pub interrupted: bool,
    pub stopped_early: bool,
}

/// Walks the URL list in order, one at a time, handing each pending URL to
/// the retry controller and persisting progress after every terminal
/// outcome.
pub struct BatchRunner<'a> {
    submitter: &'a dyn Submitter,
    config: &'a RunConfig,
    stop: StopFlag,
}

impl<'a> BatchRunner<'a> {
    pub fn new(submitter: &'a dyn Submitter, config: &'a RunConfig, stop: StopFlag) -> Self {
        BatchRunner {
            submitter,
            config,
            stop,
        }
    }

    pub fn run(
        &self,
        items: &[WorkItem],
        progress: &mut ProgressRecord,
        start_at: usize,
    ) -> Result<RunSummary, RunError> {
        let mut summary = RunSummary::default();
        let total = items.len();

        for item in items.iter().skip(start_at) {
            if delay::stop_requested(&self.stop) {
                summary.interrupted = true;
                break;
            }

            if progress.contains(&item.url) {
                info!(
                    "Skipping {} / {}: {} already imported",
                    item.ordinal + 1,
                    total,
                    item.url
                );
                summary.skipped += 1;
                continue;
            }

            // Pace before every submission except the first of this run.
            if summary.submitted > 0 && !delay::pacing_delay(self.config, &self.stop) {
                summary.interrupted = true;
                break;
            }

            info!("Processing {} / {}: {}", item.ordinal + 1, total, item.url);
            summary.submitted += 1;

            match retry::run_item(self.submitter, item, self.config, &self.stop)? {
                ItemOutcome::Succeeded { attempts } => {
                    info!("Imported {} after {} attempt(s)", item.url, attempts);
                    progress.mark_completed(&item.url, item.ordinal);
                    summary.succeeded += 1;
                    self.persist(progress);
                }
                ItemOutcome::PermanentlyFailed { reason, attempts } => {
                    error!("Cannot import {}: {}", item.url, reason);
                    progress.mark_failed(&item.url, reason.clone(), attempts);
                    summary.failed.push(FailedItem {
                        url: item.url.clone(),
                        reason,
                        attempts,
                    });
                    self.persist(progress);
                    if self.config.stop_on_error {
                        summary.stopped_early = true;
                        break;
                    }
                }
                ItemOutcome::Exhausted { reason, attempts } => {
                    warn!(
                        "Giving up on {} after {} attempts: {}",
                        item.url, attempts, reason
                    );
                    progress.mark_failed(&item.url, reason.clone(), attempts);
                    summary.failed.push(FailedItem {
                        url: item.url.clone(),
                        reason,
                        attempts,
                    });
                    self.persist(progress);
                    if self.config.stop_on_error {
                        summary.stopped_early = true;
                        break;
                    }
                }
                ItemOutcome::Interrupted => {
                    summary.interrupted = true;
                    break;
                }
            }
        }

        self.persist(progress);
        Ok(summary)
    }

    // A failed save degrades durability to the last good save; it does not
    // kill the run.
    fn persist(&self, progress: &ProgressRecord) {
        if let Err(e) = progress.save(&self.config.progress_file) {
            error!("Failed to write progress file: {}", e);
        }
    }
}

use log::{info, warn};

use crate::classifier::{self, AttemptResult};
use crate::config::RunConfig;
use crate::delay::{self, StopFlag};
use crate::error::RunError;
use crate::input_loader::WorkItem;
use crate::submitter::{SubmitFault, Submitter};

/// Terminal outcome of one item. `Exhausted` is reported like a permanent
/// failure but means "might work on a later run", not "will never work".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Succeeded { attempts: u32 },
    PermanentlyFailed { reason: String, attempts: u32 },
    Exhausted { reason: String, attempts: u32 },
    Interrupted,
}

/// Drives one item to a terminal outcome: at most `max_retries + 1`
/// attempts, stopping early on success or a permanent verdict. Operation
/// faults count as retryable; a setup fault aborts the whole run.
pub fn run_item(
    submitter: &dyn Submitter,
    item: &WorkItem,
    config: &RunConfig,
    stop: &StopFlag,
) -> Result<ItemOutcome, RunError> {
    let max_attempts = config.max_retries + 1;
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        info!("Submitting {} (attempt {}/{})", item.url, attempt, max_attempts);

        let verdict = match submitter.submit(&item.url) {
            Ok(raw) => classifier::classify(&raw),
            Err(SubmitFault::Setup(msg)) => return Err(RunError::SetupFault(msg)),
            Err(SubmitFault::Operation(reason)) => AttemptResult::RetryableFailure { reason },
        };

        match verdict {
            AttemptResult::Success => {
                return Ok(ItemOutcome::Succeeded { attempts: attempt });
            }
            AttemptResult::PermanentFailure { reason } => {
                return Ok(ItemOutcome::PermanentlyFailed {
                    reason,
                    attempts: attempt,
                });
            }
            AttemptResult::RetryableFailure { reason } => {
                if attempt >= max_attempts {
                    return Ok(ItemOutcome::Exhausted {
                        reason,
                        attempts: attempt,
                    });
                }
                warn!(
                    "Attempt {} for {} failed: {}. Retrying in {} seconds...",
                    attempt, item.url, reason, config.retry_delay_secs
                );
                if !delay::retry_backoff(config, stop) {
                    return Ok(ItemOutcome::Interrupted);
                }
            }
        }
    }
}

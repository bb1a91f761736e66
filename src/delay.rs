use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::info;

use crate::config::RunConfig;

/// Shared stop flag, set from the Ctrl-C handler and checked at every
/// suspension point.
pub type StopFlag = Arc<AtomicBool>;

pub fn new_stop_flag() -> StopFlag {
    Arc::new(AtomicBool::new(false))
}

pub fn stop_requested(stop: &StopFlag) -> bool {
    stop.load(Ordering::Relaxed)
}

const SLICE: Duration = Duration::from_millis(250);

/// Sleeps for `total`, waking early when the stop flag is set.
/// Returns false if the wait was interrupted.
pub fn interruptible_sleep(total: Duration, stop: &StopFlag) -> bool {
    let deadline = Instant::now() + total;
    loop {
        if stop_requested(stop) {
            return false;
        }
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return true;
        }
        thread::sleep(remaining.min(SLICE));
    }
}

/// Mandatory wait between URLs. The import site rate-limits; this is a
/// deliberate throughput cap.
pub fn pacing_delay(config: &RunConfig, stop: &StopFlag) -> bool {
    if config.item_delay_secs > 0 {
        info!("Waiting {} seconds before the next URL...", config.item_delay_secs);
    }
    interruptible_sleep(Duration::from_secs(config.item_delay_secs), stop)
}

/// Fixed wait between retries of the same URL.
pub fn retry_backoff(config: &RunConfig, stop: &StopFlag) -> bool {
    interruptible_sleep(Duration::from_secs(config.retry_delay_secs), stop)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_duration_completes() {
        let stop = new_stop_flag();
        assert!(interruptible_sleep(Duration::ZERO, &stop));
    }

    #[test]
    fn preset_stop_flag_interrupts_immediately() {
        let stop = new_stop_flag();
        stop.store(true, Ordering::Relaxed);
        let started = Instant::now();
        assert!(!interruptible_sleep(Duration::from_secs(60), &stop));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn short_sleep_completes_when_not_stopped() {
        let stop = new_stop_flag();
        assert!(interruptible_sleep(Duration::from_millis(10), &stop));
    }
}

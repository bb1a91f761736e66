use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

use log::{error, info};
use serde::{Deserialize, Serialize};

/// One URL that ran out of options, kept for the end-of-run summary and
/// carried across runs in the progress file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FailedItem {
    pub url: String,
    pub reason: String,
    pub attempts: u32,
}

/// Durable record of everything the runner has finished with. Saved after
/// every terminal outcome, so a crash loses at most the in-flight URL.
#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
pub struct ProgressRecord {
    pub completed: Vec<String>,
    pub failed: Vec<FailedItem>,
    pub last_completed: Option<usize>,
    #[serde(skip)]
    completed_index: HashSet<String>,
}

impl ProgressRecord {
    /// Loads the record from `path`. Returns the record plus whether it is
    /// fresh. A missing, unreadable, or unparseable file is never fatal:
    /// the run just starts over.
    pub fn load(path: &Path) -> (Self, bool) {
        if !path.exists() {
            info!("No progress file found. Starting fresh.");
            return (ProgressRecord::default(), true);
        }

        let mut file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                error!("Failed to open progress file: {}. Starting fresh.", e);
                return (ProgressRecord::default(), true);
            }
        };
        let mut content = String::new();
        if let Err(e) = file.read_to_string(&mut content) {
            error!("Failed to read progress file: {}. Starting fresh.", e);
            return (ProgressRecord::default(), true);
        }
        match serde_json::from_str::<ProgressRecord>(&content) {
            Ok(mut record) => {
                record.rebuild_index();
                info!(
                    "Resumed previous session: {} imported, {} failed.",
                    record.completed.len(),
                    record.failed.len()
                );
                (record, false)
            }
            Err(e) => {
                error!("Failed to parse progress file: {}. Starting fresh.", e);
                (ProgressRecord::default(), true)
            }
        }
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        file.write_all(json.as_bytes())
    }

    /// Records a successful import. Also clears any stale failure entry for
    /// the same URL from an earlier run, so a URL ends up in exactly one of
    /// the two lists.
    pub fn mark_completed(&mut self, url: &str, ordinal: usize) {
        if self.completed_index.insert(url.to_string()) {
            self.completed.push(url.to_string());
        }
        self.failed.retain(|f| f.url != url);
        self.last_completed = Some(ordinal);
    }

    /// Records a terminal failure, replacing any earlier entry for the URL.
    pub fn mark_failed(&mut self, url: &str, reason: String, attempts: u32) {
        self.failed.retain(|f| f.url != url);
        self.failed.push(FailedItem {
            url: url.to_string(),
            reason,
            attempts,
        });
    }

    pub fn contains(&self, url: &str) -> bool {
        self.completed_index.contains(url)
    }

    fn rebuild_index(&mut self) {
        self.completed_index = self.completed.iter().cloned().collect();
    }
}

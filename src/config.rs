use std::path::PathBuf;

use clap::Parser;

/// Replay a list of article URLs into a web import form, one at a time.
///
/// Parsed once at startup and passed by reference everywhere; nothing
/// mutates it during the run.
#[derive(Parser, Debug, Clone)]
#[command(name = "article-importer")]
pub struct RunConfig {
    /// Newline-delimited list of article URLs to import
    #[arg(long, default_value = "urls.txt")]
    pub input: PathBuf,

    /// Progress file used to resume an interrupted run
    #[arg(long, default_value = "progress.json")]
    pub progress_file: PathBuf,

    /// URL of the import form the articles are submitted to
    #[arg(long)]
    pub endpoint: String,

    /// Retries per URL after the first attempt
    #[arg(long, default_value = "2")]
    pub max_retries: u32,

    /// Seconds to wait before retrying the same URL
    #[arg(long, default_value = "10")]
    pub retry_delay_secs: u64,

    /// Seconds to wait between URLs (the import site rate-limits)
    #[arg(long, default_value = "20")]
    pub item_delay_secs: u64,

    /// Stop the run at the first URL that fails for good
    #[arg(long)]
    pub stop_on_error: bool,

    /// Index of the first URL to process when not resuming
    #[arg(long, default_value = "0")]
    pub start_at: usize,

    /// Skip the login and resume prompts
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub mod classifier;
pub mod config;
pub mod delay;
pub mod error;
pub mod input_loader;
pub mod logger;
pub mod progress;
pub mod prompt;
pub mod retry;
pub mod runner;
pub mod submitter;

// Exporting types for convenience
pub use classifier::{AttemptResult, LandedView, RawOutcome};
pub use config::RunConfig;
pub use error::RunError;
pub use input_loader::WorkItem;
pub use progress::{FailedItem, ProgressRecord};
pub use retry::ItemOutcome;
pub use runner::{BatchRunner, RunSummary};
pub use submitter::{HttpSubmitter, SubmitFault, Submitter};

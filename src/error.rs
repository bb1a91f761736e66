use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Faults that abort the whole run. Everything item-scoped is handled
/// inside the retry controller and never reaches this type.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("cannot read URL list {path:?}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("setup fault: {0}")]
    SetupFault(String),
}

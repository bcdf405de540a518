use joran_source::SourceError;
use joran_types::{ErrorItem, ParseDiagnostic};
use thiserror::Error;

/// Why a configuration run stopped before all actions ran.
#[derive(Error, Debug)]
pub enum ConfigureError {
    /// The document could not be read; no action was invoked.
    #[error(
        "Problem parsing XML document. See previously reported errors. Abandoning all further processing. (first fatal error: {fatal})"
    )]
    Abandoned {
        fatal: ParseDiagnostic,
        /// The error log as it stood when the run was abandoned.
        errors: Vec<ErrorItem>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Source error: {0}")]
    Source(SourceError),

    #[error("Invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}

impl From<SourceError> for ConfigureError {
    fn from(e: SourceError) -> Self {
        match e {
            SourceError::Io(e) => ConfigureError::Io(e),
            other => ConfigureError::Source(other),
        }
    }
}

use joran_types::ParseDiagnostic;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    /// The first fatal diagnostic of a buffered document.
    #[error("Fatal parse error: {0}")]
    Fatal(ParseDiagnostic),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

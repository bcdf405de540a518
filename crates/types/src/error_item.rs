use crate::location::{Location, ParseDiagnostic};
use std::fmt;

/// Severity of an [`ErrorItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorLevel {
    Warning,
    Error,
    Fatal,
}

impl fmt::Display for ErrorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorLevel::Warning => "WARN",
            ErrorLevel::Error => "ERROR",
            ErrorLevel::Fatal => "FATAL",
        };
        f.write_str(s)
    }
}

/// One entry of a document-scoped error log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorItem {
    pub level: ErrorLevel,
    pub message: String,
    /// Rendered text of the underlying error, if any.
    pub cause: Option<String>,
    pub location: Option<Location>,
}

impl ErrorItem {
    pub fn new(level: ErrorLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            cause: None,
            location: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ErrorLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ErrorLevel::Error, message)
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self::new(ErrorLevel::Fatal, message)
    }

    pub fn with_cause(mut self, cause: impl fmt::Display) -> Self {
        self.cause = Some(cause.to_string());
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Wraps a parser diagnostic, keeping its position.
    pub fn from_diagnostic(level: ErrorLevel, message: &str, diagnostic: &ParseDiagnostic) -> Self {
        Self::new(level, message)
            .with_cause(&diagnostic.message)
            .with_location(diagnostic.location)
    }
}

impl fmt::Display for ErrorItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level, self.message)?;
        if let Some(location) = &self.location {
            write!(f, " ({})", location)?;
        }
        if let Some(cause) = &self.cause {
            write!(f, ": {}", cause)?;
        }
        Ok(())
    }
}

use std::fmt;
use thiserror::Error;

/// A line/column position in the source document. Both are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub line: usize,
    pub col: usize,
}

impl Location {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    /// Computes the location of a byte offset within `source`.
    pub fn from_offset(source: &str, pos: usize) -> Self {
        let pos = pos.min(source.len());
        let prefix = &source.as_bytes()[..pos];
        let line = prefix.iter().filter(|&&b| b == b'\n').count() + 1;
        let col = prefix
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(pos + 1, |nl| pos - nl);
        Self { line, col }
    }
}

impl From<(usize, usize)> for Location {
    fn from((line, col): (usize, usize)) -> Self {
        Location { line, col }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.col)
    }
}

/// A warning, error or fatal condition reported by the underlying parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at {location}")]
pub struct ParseDiagnostic {
    pub message: String,
    pub location: Location,
}

impl ParseDiagnostic {
    pub fn new(message: impl Into<String>, location: Location) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }
}

use thiserror::Error;

/// A runtime fault raised from inside an action's `begin` or `end`.
///
/// The interpreter never propagates these; it records them in the error log
/// and skips the affected part of the document.
#[derive(Error, Debug)]
pub enum ActionError {
    #[error("{0}")]
    Message(String),

    #[error("Missing required attribute '{attribute}' on <{tag}>")]
    MissingAttribute { attribute: String, tag: String },

    #[error("Unexpected object on top of the object stack, expected {expected}")]
    UnexpectedObject { expected: &'static str },

    #[error("Variable substitution failed: {0}")]
    Substitution(#[from] SubstitutionError),

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ActionError {
    pub fn message(msg: impl Into<String>) -> Self {
        ActionError::Message(msg.into())
    }
}

/// Raised when a value contains `${` without a closing `}`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("\"{value}\" has no closing brace. Opening brace at position {position}.")]
pub struct SubstitutionError {
    pub value: String,
    pub position: usize,
}

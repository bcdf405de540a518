//! The rule-driven interpreter at the heart of Joran.
//!
//! An [`Interpreter`] consumes element events, tracks the open-element
//! [`Pattern`](joran_types::Pattern), asks the [`RuleStore`] (and, failing
//! that, the [`ImplicitActionRegistry`]) which [`Action`]s apply, and invokes
//! them against a shared [`ExecutionContext`]. Actions can narrow dispatch
//! by returning a skip [`Flow`]; faults are contained and logged.

pub mod action;
pub mod context;
pub mod error;
pub mod implicit;
pub mod interpreter;
pub mod rule_store;

pub use action::{Action, ActionList, Flow, ImplicitAction};
pub use context::{ExecutionContext, substitute_vars};
pub use error::{ActionError, SubstitutionError};
pub use implicit::ImplicitActionRegistry;
pub use interpreter::Interpreter;
pub use rule_store::RuleStore;

pub use joran_types::{
    Attributes, ContentHandler, ElementName, ErrorItem, ErrorLevel, Location, ParseDiagnostic,
    Pattern,
};

//! Joran: a rule-driven interpreter for XML configuration documents.
//!
//! Callers register [`Action`]s against element paths in a [`RuleStore`],
//! optionally add [`ImplicitAction`] fallbacks, and hand a document to a
//! [`Configurator`]. The document is read once into a buffer; only if it is
//! well formed are the recorded elements replayed into an [`Interpreter`],
//! which invokes the matching actions against a shared [`ExecutionContext`].
//!
//! ```ignore
//! let mut rules = RuleStore::new();
//! rules.add_rule("configuration/logger", Arc::new(LoggerAction));
//! rules.add_rule("*/param", Arc::new(ParamAction));
//!
//! let mut configurator = Configurator::new(rules);
//! configurator.configure_file("log4j.xml")?;
//! for item in configurator.execution_context().errors() {
//!     eprintln!("{item}");
//! }
//! ```

pub mod config;
pub mod configurator;
pub mod error;

pub use config::ConfiguratorConfig;
pub use configurator::Configurator;
pub use error::ConfigureError;

pub use joran_core::{
    Action, ActionError, ActionList, ExecutionContext, Flow, ImplicitAction,
    ImplicitActionRegistry, Interpreter, RuleStore, SubstitutionError, substitute_vars,
};
pub use joran_source::{DocumentBuffer, LOG4J_NS, LS_NS, SourceConfig, SourceError, XmlEventSource};
pub use joran_types::{
    Attributes, ContentHandler, ElementName, ErrorItem, ErrorLevel, Location, ParseDiagnostic,
    Pattern,
};

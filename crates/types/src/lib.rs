//! Foundation types shared by the interpreter, the event source and the
//! document buffer.
//!
//! - [`Pattern`]: the open-element path and rule keys
//! - [`Attributes`] / [`ElementName`]: what an element event carries
//! - [`Location`] / [`ParseDiagnostic`]: where things happened
//! - [`ErrorItem`]: an entry in a document-scoped error log
//! - [`ContentHandler`]: the push-style element event contract

pub mod attributes;
pub mod error_item;
pub mod handler;
pub mod location;
pub mod pattern;

pub use attributes::{Attributes, ElementName};
pub use error_item::{ErrorItem, ErrorLevel};
pub use handler::ContentHandler;
pub use location::{Location, ParseDiagnostic};
pub use pattern::Pattern;

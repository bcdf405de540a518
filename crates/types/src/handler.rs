//! The push-style element event contract.
use crate::attributes::{Attributes, ElementName};
use crate::location::{Location, ParseDiagnostic};

/// Receives element events in document order.
///
/// Implemented by the document buffer (first pass) and by the interpreter
/// (replay). Only the element callbacks are required.
pub trait ContentHandler {
    fn start_document(&mut self) {}

    fn end_document(&mut self) {}

    /// Called before each event with the position the event came from.
    fn set_location(&mut self, _location: Location) {}

    fn start_element(&mut self, name: ElementName<'_>, attributes: &Attributes);

    fn end_element(&mut self, name: ElementName<'_>);

    fn warning(&mut self, _diagnostic: &ParseDiagnostic) {}

    fn error(&mut self, _diagnostic: &ParseDiagnostic) {}

    fn fatal_error(&mut self, _diagnostic: &ParseDiagnostic) {}
}

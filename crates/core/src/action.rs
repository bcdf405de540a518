//! The capabilities the interpreter invokes on matched elements.
use crate::context::ExecutionContext;
use crate::error::ActionError;
use joran_types::{Attributes, Pattern};
use std::sync::Arc;

/// What an action asks the interpreter to do after `begin` or `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    /// Keep dispatching normally.
    #[default]
    Continue,
    /// Suppress every descendant of the current element. Dispatch resumes
    /// once the current element closes.
    SkipChildren,
    /// Suppress the current element's remaining work, its descendants and its
    /// following siblings. Dispatch resumes once the parent closes.
    SkipSiblings,
}

/// An action bound to a pattern in the [`RuleStore`](crate::RuleStore).
///
/// Actions are shared between interpreters and must not keep per-document
/// state of their own; anything that has to survive from `begin` to `end`
/// goes on the [`ExecutionContext`] object stack.
pub trait Action: Send + Sync {
    fn begin(
        &self,
        ctx: &mut ExecutionContext,
        tag: &str,
        attributes: &Attributes,
    ) -> Result<Flow, ActionError>;

    fn end(&self, ctx: &mut ExecutionContext, tag: &str) -> Result<Flow, ActionError>;

    /// Called once per document after the last element has closed.
    fn finish(&self, _ctx: &mut ExecutionContext) {}

    /// A label for diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A fallback action chosen by a runtime applicability test instead of a
/// registered pattern. Only consulted when no rule matches.
pub trait ImplicitAction: Action {
    fn is_applicable(&self, pattern: &Pattern, attributes: &Attributes, ctx: &ExecutionContext)
    -> bool;
}

/// The actions applying to one element, in firing order.
pub type ActionList = Vec<Arc<dyn Action>>;

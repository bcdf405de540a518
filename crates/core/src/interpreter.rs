//! The dispatcher: turns element events into action invocations.
//!
//! For every start-element the interpreter extends the live pattern, looks up
//! the applicable actions and calls their `begin`; for every end-element it
//! calls `end` on the same list and shrinks the pattern again.
//!
//! Actions can abandon parts of the document. When an action returns
//! [`Flow::SkipChildren`] (or fails in `begin`) the interpreter remembers the
//! current pattern as the *skip pattern*; [`Flow::SkipSiblings`] (or a failure
//! in `end`) remembers the parent's pattern instead. While a skip pattern is
//! set no `begin` or `end` is invoked. It is cleared when the element it names
//! closes, and that element's own `end` is suppressed as well since it belongs
//! to the skipped span.
use crate::action::{ActionList, Flow, ImplicitAction};
use crate::context::ExecutionContext;
use crate::error::ActionError;
use crate::implicit::ImplicitActionRegistry;
use crate::rule_store::RuleStore;
use joran_types::{
    Attributes, ContentHandler, ElementName, ErrorItem, ErrorLevel, Location, ParseDiagnostic,
    Pattern,
};
use std::sync::Arc;

/// A single-use interpreter for one document.
pub struct Interpreter {
    rule_store: Arc<RuleStore>,
    implicit_actions: ImplicitActionRegistry,
    context: ExecutionContext,
    pattern: Pattern,
    /// One entry per open element; `None` marks "no rule matched".
    action_list_stack: Vec<Option<ActionList>>,
    skip: Option<Pattern>,
}

impl Interpreter {
    pub fn new(rule_store: Arc<RuleStore>) -> Self {
        Self::with_context(rule_store, ExecutionContext::new())
    }

    /// Starts from a caller-prepared context, e.g. with objects already pushed.
    pub fn with_context(rule_store: Arc<RuleStore>, context: ExecutionContext) -> Self {
        Self {
            rule_store,
            implicit_actions: ImplicitActionRegistry::new(),
            context,
            pattern: Pattern::new(),
            action_list_stack: Vec::new(),
            skip: None,
        }
    }

    pub fn add_implicit_action(&mut self, action: Arc<dyn ImplicitAction>) {
        self.implicit_actions.add_implicit(action);
    }

    pub fn set_implicit_actions(&mut self, registry: ImplicitActionRegistry) {
        self.implicit_actions = registry;
    }

    pub fn rule_store(&self) -> &Arc<RuleStore> {
        &self.rule_store
    }

    pub fn execution_context(&self) -> &ExecutionContext {
        &self.context
    }

    pub fn execution_context_mut(&mut self) -> &mut ExecutionContext {
        &mut self.context
    }

    /// Ends the interpreter's life and hands the context back to the caller.
    pub fn into_execution_context(self) -> ExecutionContext {
        self.context
    }

    /// The path of currently open elements.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn skip_pattern(&self) -> Option<&Pattern> {
        self.skip.as_ref()
    }

    fn applicable_actions(&self, attributes: &Attributes) -> Option<ActionList> {
        match self.rule_store.match_actions(&self.pattern) {
            Some(actions) => Some(actions.to_vec()),
            None => self
                .implicit_actions
                .lookup(&self.pattern, attributes, &self.context),
        }
    }

    fn set_skip(&mut self, skip: Pattern) {
        log::info!("Skip pattern set to <{}>", skip);
        self.skip = Some(skip);
    }

    fn record_fault(&mut self, tag: &str, err: &ActionError) {
        log::error!("Exception in Action for tag <{}>: {}", tag, err);
        let item = self
            .context
            .locate(ErrorItem::error(format!("Exception in Action for tag <{}>", tag)).with_cause(err));
        self.context.add_error(item);
    }

    fn call_begin_actions(&mut self, actions: &ActionList, tag: &str, attributes: &Attributes) {
        if self.skip.is_some() {
            log::debug!("Skipping invoking begin() method for <{}>.", self.pattern);
            return;
        }

        for action in actions {
            match action.begin(&mut self.context, tag, attributes) {
                Ok(Flow::Continue) => {}
                Ok(Flow::SkipChildren) => {
                    self.set_skip(self.pattern.clone());
                    break;
                }
                Ok(Flow::SkipSiblings) => {
                    self.set_skip(self.pattern.parent());
                    break;
                }
                Err(e) => {
                    self.record_fault(tag, &e);
                    self.set_skip(self.pattern.clone());
                    break;
                }
            }
        }
    }

    fn call_end_actions(&mut self, actions: &ActionList, tag: &str) {
        for action in actions {
            match action.end(&mut self.context, tag) {
                Ok(Flow::Continue) => {}
                Ok(Flow::SkipChildren) => {
                    log::debug!("Ignoring SkipChildren from end() of <{}>: children are closed.", tag);
                }
                Ok(Flow::SkipSiblings) => {
                    self.set_skip(self.pattern.parent());
                    break;
                }
                Err(e) => {
                    self.record_fault(tag, &e);
                    self.set_skip(self.pattern.parent());
                    break;
                }
            }
        }
    }
}

impl ContentHandler for Interpreter {
    fn start_document(&mut self) {
        log::debug!("Starting document with {} rules.", self.rule_store.len());
    }

    /// Calls `finish` on every registered action, rules first.
    fn end_document(&mut self) {
        for action in self.rule_store.distinct_actions() {
            action.finish(&mut self.context);
        }
        for action in self.implicit_actions.iter() {
            action.finish(&mut self.context);
        }
    }

    fn set_location(&mut self, location: Location) {
        self.context.set_location(location);
    }

    fn start_element(&mut self, name: ElementName<'_>, attributes: &Attributes) {
        let tag = name.tag_name();
        self.pattern.push(tag);

        match self.applicable_actions(attributes) {
            Some(actions) => {
                self.call_begin_actions(&actions, tag, attributes);
                self.action_list_stack.push(Some(actions));
            }
            None => {
                self.action_list_stack.push(None);
                let msg = format!(
                    "no applicable action for <{}>, current pattern is [{}]",
                    tag, self.pattern
                );
                log::warn!("{}", msg);
                self.context.add_warning(msg);
            }
        }
    }

    fn end_element(&mut self, name: ElementName<'_>) {
        let tag = name.tag_name();
        let Some(actions) = self.action_list_stack.pop() else {
            let msg = format!("end of element <{}> without a matching start", tag);
            log::warn!("{}", msg);
            self.context.add_warning(msg);
            return;
        };

        if let Some(skip) = &self.skip {
            if *skip == self.pattern {
                log::info!(
                    "Normal processing will continue with the next element. Current pattern is <{}>",
                    self.pattern
                );
                self.skip = None;
            } else {
                log::debug!("Skipping invoking end() method for <{}>.", self.pattern);
            }
        } else if let Some(actions) = actions {
            self.call_end_actions(&actions, tag);
        }

        self.pattern.pop();
    }

    fn warning(&mut self, diagnostic: &ParseDiagnostic) {
        log::warn!("Parsing problem: {}", diagnostic);
        self.context.add_error(
            ErrorItem::from_diagnostic(ErrorLevel::Warning, "Parsing warning", diagnostic),
        );
    }

    fn error(&mut self, diagnostic: &ParseDiagnostic) {
        log::error!("Parsing problem: {}", diagnostic);
        self.context.add_error(
            ErrorItem::from_diagnostic(ErrorLevel::Error, "Parsing error", diagnostic),
        );
    }

    fn fatal_error(&mut self, diagnostic: &ParseDiagnostic) {
        log::error!("Parsing problem: {}", diagnostic);
        self.context.add_error(ErrorItem::from_diagnostic(
            ErrorLevel::Fatal,
            "Parsing fatal error",
            diagnostic,
        ));
    }
}

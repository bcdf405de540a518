use crate::action::{Action, ActionList, ImplicitAction};
use crate::context::ExecutionContext;
use joran_types::{Attributes, Pattern};
use std::sync::Arc;

/// Ordered fallback handlers, consulted only when no rule matches.
#[derive(Default, Clone)]
pub struct ImplicitActionRegistry {
    actions: Vec<Arc<dyn ImplicitAction>>,
}

impl ImplicitActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_implicit(&mut self, action: Arc<dyn ImplicitAction>) {
        self.actions.push(action);
    }

    /// The first applicable action, wrapped as a one-element list.
    pub fn lookup(
        &self,
        pattern: &Pattern,
        attributes: &Attributes,
        ctx: &ExecutionContext,
    ) -> Option<ActionList> {
        self.actions
            .iter()
            .find(|ia| ia.is_applicable(pattern, attributes, ctx))
            .map(|ia| {
                let action: Arc<dyn Action> = ia.clone();
                vec![action]
            })
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ImplicitAction>> {
        self.actions.iter()
    }
}

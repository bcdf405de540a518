use super::Trace;
use joran::{Action, ActionError, Attributes, ExecutionContext, Flow};
use std::sync::Arc;

/// Does nothing.
pub struct NopAction;

impl Action for NopAction {
    fn begin(&self, _ctx: &mut ExecutionContext, _tag: &str, _attributes: &Attributes) -> Result<Flow, ActionError> {
        Ok(Flow::Continue)
    }

    fn end(&self, _ctx: &mut ExecutionContext, _tag: &str) -> Result<Flow, ActionError> {
        Ok(Flow::Continue)
    }
}

/// Stores a greeting for the `name` attribute under the `hello` key.
pub struct HelloAction;

impl HelloAction {
    pub const KEY: &'static str = "hello";
}

impl Action for HelloAction {
    fn begin(&self, ctx: &mut ExecutionContext, tag: &str, attributes: &Attributes) -> Result<Flow, ActionError> {
        let name = attributes.get("name").ok_or_else(|| ActionError::MissingAttribute {
            attribute: "name".into(),
            tag: tag.into(),
        })?;
        let greeting = format!("Hello {}.", ctx.subst(name));
        ctx.put_object(Self::KEY, greeting);
        Ok(Flow::Continue)
    }

    fn end(&self, _ctx: &mut ExecutionContext, _tag: &str) -> Result<Flow, ActionError> {
        Ok(Flow::Continue)
    }
}

/// Counts begin calls under the `touched` key.
pub struct TouchAction;

impl TouchAction {
    pub const KEY: &'static str = "touched";

    pub fn count(ctx: &ExecutionContext) -> usize {
        ctx.get_object::<usize>(Self::KEY).copied().unwrap_or(0)
    }
}

impl Action for TouchAction {
    fn begin(&self, ctx: &mut ExecutionContext, _tag: &str, _attributes: &Attributes) -> Result<Flow, ActionError> {
        let count = Self::count(ctx);
        ctx.put_object(Self::KEY, count + 1);
        Ok(Flow::Continue)
    }

    fn end(&self, _ctx: &mut ExecutionContext, _tag: &str) -> Result<Flow, ActionError> {
        Ok(Flow::Continue)
    }
}

/// Fails in `begin`.
pub struct BadBeginAction;

impl Action for BadBeginAction {
    fn begin(&self, _ctx: &mut ExecutionContext, tag: &str, _attributes: &Attributes) -> Result<Flow, ActionError> {
        Err(ActionError::message(format!("cannot begin <{}>", tag)))
    }

    fn end(&self, _ctx: &mut ExecutionContext, _tag: &str) -> Result<Flow, ActionError> {
        Ok(Flow::Continue)
    }
}

/// Fails in `end`.
pub struct BadEndAction;

impl Action for BadEndAction {
    fn begin(&self, _ctx: &mut ExecutionContext, _tag: &str, _attributes: &Attributes) -> Result<Flow, ActionError> {
        Ok(Flow::Continue)
    }

    fn end(&self, _ctx: &mut ExecutionContext, tag: &str) -> Result<Flow, ActionError> {
        Err(ActionError::message(format!("cannot end <{}>", tag)))
    }
}

/// Answers `begin` with a fixed flow.
pub struct SkipAction(pub Flow);

impl Action for SkipAction {
    fn begin(&self, _ctx: &mut ExecutionContext, _tag: &str, _attributes: &Attributes) -> Result<Flow, ActionError> {
        Ok(self.0)
    }

    fn end(&self, _ctx: &mut ExecutionContext, _tag: &str) -> Result<Flow, ActionError> {
        Ok(Flow::Continue)
    }
}

/// Appends `<label>.begin(<tag>)` and `<label>.end(<tag>)` to a trace.
pub struct RecordingAction {
    label: &'static str,
    trace: Trace,
}

impl RecordingAction {
    pub fn shared(label: &'static str, trace: &Trace) -> Arc<dyn Action> {
        Arc::new(Self {
            label,
            trace: Arc::clone(trace),
        })
    }
}

impl Action for RecordingAction {
    fn begin(&self, _ctx: &mut ExecutionContext, tag: &str, _attributes: &Attributes) -> Result<Flow, ActionError> {
        self.trace.lock().unwrap().push(format!("{}.begin({})", self.label, tag));
        Ok(Flow::Continue)
    }

    fn end(&self, _ctx: &mut ExecutionContext, tag: &str) -> Result<Flow, ActionError> {
        self.trace.lock().unwrap().push(format!("{}.end({})", self.label, tag));
        Ok(Flow::Continue)
    }

    fn finish(&self, _ctx: &mut ExecutionContext) {
        self.trace.lock().unwrap().push(format!("{}.finish", self.label));
    }

    fn name(&self) -> &str {
        self.label
    }
}

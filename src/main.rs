use joran::{
    Action, ActionError, Attributes, ConfigureError, Configurator, ConfiguratorConfig,
    ExecutionContext, Flow, ImplicitAction, Pattern, RuleStore,
};
use std::env;
use std::fs;
use std::process::ExitCode;
use std::sync::Arc;

const DEPTH_KEY: &str = "trace.depth";

/// Prints every element it is offered, indented by nesting depth.
struct TraceAction;

impl TraceAction {
    fn depth(ctx: &ExecutionContext) -> usize {
        ctx.get_object::<usize>(DEPTH_KEY).copied().unwrap_or(0)
    }
}

impl Action for TraceAction {
    fn begin(&self, ctx: &mut ExecutionContext, tag: &str, attributes: &Attributes) -> Result<Flow, ActionError> {
        let depth = Self::depth(ctx);
        let attrs: String = attributes
            .iter()
            .map(|(k, v)| format!(" {}=\"{}\"", k, v))
            .collect();
        println!("{:>5} {}<{}{}>", ctx.line_number(), "  ".repeat(depth), tag, attrs);
        ctx.put_object(DEPTH_KEY, depth + 1);
        Ok(Flow::Continue)
    }

    fn end(&self, ctx: &mut ExecutionContext, tag: &str) -> Result<Flow, ActionError> {
        let depth = Self::depth(ctx).saturating_sub(1);
        ctx.put_object(DEPTH_KEY, depth);
        println!("{:>5} {}</{}>", ctx.line_number(), "  ".repeat(depth), tag);
        Ok(Flow::Continue)
    }

    fn name(&self) -> &str {
        "trace"
    }
}

impl ImplicitAction for TraceAction {
    fn is_applicable(&self, _pattern: &Pattern, _attributes: &Attributes, _ctx: &ExecutionContext) -> bool {
        true
    }
}

/// Prints the element structure a configuration document would be
/// interpreted with, followed by everything the run reported.
fn main() -> Result<ExitCode, ConfigureError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Traces how a configuration document is dispatched.");
        eprintln!();
        eprintln!("Usage: {} <path/to/document.xml> [path/to/settings.json]", args[0]);
        return Ok(ExitCode::FAILURE);
    }

    let config = match args.get(2) {
        Some(path) => ConfiguratorConfig::from_json(&fs::read_to_string(path)?)?,
        None => ConfiguratorConfig::default(),
    };

    let mut configurator = Configurator::new(RuleStore::new())
        .with_config(config)
        .with_implicit_action(Arc::new(TraceAction));

    let outcome = configurator.configure_file(&args[1]);

    let errors = configurator.execution_context().errors();
    if !errors.is_empty() {
        println!();
        println!("{} problem(s) reported:", errors.len());
        for item in errors {
            println!("  {}", item);
        }
    }

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(ConfigureError::Abandoned { .. }) => Ok(ExitCode::FAILURE),
        Err(e) => Err(e),
    }
}

// Each integration test crate uses a different subset of these helpers.
#![allow(dead_code)]

pub mod fixtures;

use joran::{ConfigureError, Configurator, ExecutionContext, RuleStore};
use std::sync::{Arc, Mutex};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Shared call log written by [`fixtures::RecordingAction`].
pub type Trace = Arc<Mutex<Vec<String>>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn new_trace() -> Trace {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn calls(trace: &Trace) -> Vec<String> {
    trace.lock().unwrap().clone()
}

/// Runs `xml` against `rules` and returns the final context along with the
/// outcome of the run.
pub fn configure(rules: RuleStore, xml: &str) -> (ExecutionContext, Result<(), ConfigureError>) {
    init_logging();
    let mut configurator = Configurator::new(rules);
    let outcome = configurator.configure_str(xml);
    (configurator.into_execution_context(), outcome)
}

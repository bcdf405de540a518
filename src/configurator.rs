//! Two-pass orchestration: read and validate a document, then interpret it.
use crate::config::ConfiguratorConfig;
use crate::error::ConfigureError;
use joran_core::{ExecutionContext, ImplicitAction, ImplicitActionRegistry, Interpreter, RuleStore};
use joran_source::{DocumentBuffer, SourceError, XmlEventSource};
use joran_types::ErrorItem;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

const ABANDON_MESSAGE: &str =
    "Problem parsing XML document. See previously reported errors. Abandoning all further processing.";

/// Runs configuration documents against a rule store.
///
/// The execution context outlives each run, so objects pushed before a run
/// and the error log written during it stay available afterwards, whether or
/// not the run succeeded.
pub struct Configurator {
    rule_store: Arc<RuleStore>,
    implicit_actions: ImplicitActionRegistry,
    config: ConfiguratorConfig,
    context: ExecutionContext,
}

impl Configurator {
    pub fn new(rule_store: impl Into<Arc<RuleStore>>) -> Self {
        Self {
            rule_store: rule_store.into(),
            implicit_actions: ImplicitActionRegistry::new(),
            config: ConfiguratorConfig::default(),
            context: ExecutionContext::new(),
        }
    }

    pub fn with_config(mut self, config: ConfiguratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_implicit_action(mut self, action: Arc<dyn ImplicitAction>) -> Self {
        self.implicit_actions.add_implicit(action);
        self
    }

    pub fn config(&self) -> &ConfiguratorConfig {
        &self.config
    }

    pub fn rule_store(&self) -> &Arc<RuleStore> {
        &self.rule_store
    }

    pub fn execution_context(&self) -> &ExecutionContext {
        &self.context
    }

    /// For seeding the object stack or properties before a run.
    pub fn execution_context_mut(&mut self) -> &mut ExecutionContext {
        &mut self.context
    }

    pub fn into_execution_context(self) -> ExecutionContext {
        self.context
    }

    pub fn configure_str(&mut self, source: &str) -> Result<(), ConfigureError> {
        let mut buffer = DocumentBuffer::new(self.config.source.clone());
        self.event_source().parse_str(source, &mut buffer);
        self.interpret(buffer)
    }

    pub fn configure_file(&mut self, path: impl AsRef<Path>) -> Result<(), ConfigureError> {
        let path = path.as_ref();
        log::debug!("Configuring from file [{}]", path.display());
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                let item = ErrorItem::error(format!("Could not open [{}].", path.display())).with_cause(&e);
                self.context.add_error(item);
                return Err(e.into());
            }
        };
        self.configure_reader(BufReader::new(file))
    }

    pub fn configure_reader(&mut self, reader: impl Read) -> Result<(), ConfigureError> {
        let mut buffer = DocumentBuffer::new(self.config.source.clone());
        if let Err(e) = self.event_source().parse_reader(reader, &mut buffer) {
            let message = match &e {
                SourceError::Io(_) => "I/O error occurred while parsing xml file",
                _ => "Could not decode xml file",
            };
            log::error!("{}: {}", message, e);
            self.context.extend_errors(buffer.take_errors());
            self.context.add_error(ErrorItem::error(message).with_cause(&e));
            return Err(e.into());
        }
        self.interpret(buffer)
    }

    fn event_source(&self) -> XmlEventSource {
        XmlEventSource::new(self.config.source.clone())
    }

    /// Second pass. Nothing is replayed if the first pass hit a fatal error.
    fn interpret(&mut self, mut buffer: DocumentBuffer) -> Result<(), ConfigureError> {
        self.context.extend_errors(buffer.take_errors());
        for (key, value) in &self.config.properties {
            self.context.set_property(key.as_str(), value.as_str());
        }

        let context = std::mem::take(&mut self.context);
        let mut interpreter = Interpreter::with_context(Arc::clone(&self.rule_store), context);
        interpreter.set_implicit_actions(self.implicit_actions.clone());
        let replayed = buffer.replay(&mut interpreter);
        self.context = interpreter.into_execution_context();

        match replayed {
            Ok(()) => Ok(()),
            Err(SourceError::Fatal(fatal)) => {
                log::error!("{}", ABANDON_MESSAGE);
                self.context.add_error(ErrorItem::error(ABANDON_MESSAGE));
                Err(ConfigureError::Abandoned {
                    fatal,
                    errors: self.context.errors().to_vec(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use joran_core::{Action, ActionError, Flow};
    use joran_types::{Attributes, ErrorLevel};

    /// Pushes the tag on begin and moves it into the object map on end.
    struct Collect;

    impl Action for Collect {
        fn begin(&self, ctx: &mut ExecutionContext, tag: &str, attributes: &Attributes) -> Result<Flow, ActionError> {
            let value = ctx.subst(attributes.get("value").unwrap_or(tag));
            ctx.push_object(value);
            Ok(Flow::Continue)
        }

        fn end(&self, ctx: &mut ExecutionContext, tag: &str) -> Result<Flow, ActionError> {
            let value = ctx
                .pop_as::<String>()
                .ok_or(ActionError::UnexpectedObject { expected: "String" })?;
            ctx.put_object(tag, value);
            Ok(Flow::Continue)
        }
    }

    fn rules() -> RuleStore {
        let mut rules = RuleStore::new();
        rules.add_rule("configuration", Arc::new(Collect));
        rules.add_rule("*/level", Arc::new(Collect));
        rules
    }

    #[test]
    fn test_properties_reach_actions() {
        let config = ConfiguratorConfig::default().with_property("lvl", "INFO");
        let mut configurator = Configurator::new(rules()).with_config(config);
        configurator
            .configure_str(r#"<configuration><logger><level value="${lvl}"/></logger></configuration>"#)
            .unwrap();

        let ctx = configurator.into_execution_context();
        assert_eq!(ctx.get_object::<String>("level").map(String::as_str), Some("INFO"));
        assert_eq!(ctx.get_object::<String>("configuration").map(String::as_str), Some("configuration"));
        // <logger> has no rule.
        assert_eq!(ctx.errors().len(), 1);
        assert_eq!(ctx.errors()[0].level, ErrorLevel::Warning);
    }

    #[test]
    fn test_fatal_document_runs_no_action() {
        let mut configurator = Configurator::new(rules());
        let err = configurator
            .configure_str("<configuration><level value=\"x\"/>")
            .unwrap_err();

        let ConfigureError::Abandoned { errors, .. } = err else {
            panic!("expected an abandoned run");
        };
        assert_eq!(errors.last().map(|e| e.message.as_str()), Some(ABANDON_MESSAGE));
        assert!(errors.iter().any(|e| e.level == ErrorLevel::Fatal));

        let ctx = configurator.execution_context();
        assert!(!ctx.contains_object("level"));
        assert_eq!(ctx.errors().len(), errors.len());
    }

    #[test]
    fn test_failing_reader_is_reported() {
        struct Broken;

        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk on fire"))
            }
        }

        let mut configurator = Configurator::new(rules());
        let err = configurator.configure_reader(Broken).unwrap_err();
        assert!(matches!(err, ConfigureError::Io(_)));
        let errors = configurator.execution_context().errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "I/O error occurred while parsing xml file");
    }

    #[test]
    fn test_missing_file() {
        let mut configurator = Configurator::new(rules());
        let err = configurator
            .configure_file("/nonexistent/joran/log4j.xml")
            .unwrap_err();
        assert!(matches!(err, ConfigureError::Io(_)));
        assert!(configurator.execution_context().has_errors());
    }
}

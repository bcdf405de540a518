//! First-pass recording of an element stream, replayed once it is known to
//! be readable.
use crate::config::{LOG4J_NS, SourceConfig};
use crate::error::SourceError;
use joran_types::{
    Attributes, ContentHandler, ElementName, ErrorItem, ErrorLevel, Location, ParseDiagnostic,
};

#[derive(Debug, Clone, PartialEq)]
enum CapturedEvent {
    Start {
        tag: String,
        attributes: Attributes,
        location: Location,
    },
    End {
        tag: String,
        location: Location,
    },
}

/// Records element events whose namespace is allowed, along with every
/// diagnostic the parser reported.
///
/// The first fatal diagnostic is kept aside; a buffer holding one refuses to
/// replay.
#[derive(Debug)]
pub struct DocumentBuffer {
    config: SourceConfig,
    events: Vec<CapturedEvent>,
    errors: Vec<ErrorItem>,
    fatal: Option<ParseDiagnostic>,
    location: Location,
}

impl Default for DocumentBuffer {
    fn default() -> Self {
        Self::new(SourceConfig::default())
    }
}

impl DocumentBuffer {
    pub fn new(config: SourceConfig) -> Self {
        Self {
            config,
            events: Vec::new(),
            errors: Vec::new(),
            fatal: None,
            location: Location::new(1, 1),
        }
    }

    /// Number of recorded start and end events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn errors(&self) -> &[ErrorItem] {
        &self.errors
    }

    /// Moves the recorded diagnostics out, e.g. into an execution context.
    pub fn take_errors(&mut self) -> Vec<ErrorItem> {
        std::mem::take(&mut self.errors)
    }

    pub fn fatal(&self) -> Option<&ParseDiagnostic> {
        self.fatal.as_ref()
    }

    pub fn has_fatal(&self) -> bool {
        self.fatal.is_some()
    }

    /// Re-emits the recorded events into `target` as one document.
    ///
    /// Fails without emitting anything if a fatal diagnostic was recorded.
    /// Replayed elements carry the log4j namespace and their local name as the
    /// qualified name.
    pub fn replay(self, target: &mut impl ContentHandler) -> Result<(), SourceError> {
        if let Some(fatal) = self.fatal {
            return Err(SourceError::Fatal(fatal));
        }

        log::debug!("Replaying {} buffered events.", self.events.len());
        target.start_document();
        for event in self.events {
            Self::apply_event(target, event);
        }
        target.end_document();
        Ok(())
    }

    fn apply_event(target: &mut impl ContentHandler, event: CapturedEvent) {
        match event {
            CapturedEvent::Start {
                tag,
                attributes,
                location,
            } => {
                target.set_location(location);
                target.start_element(ElementName::new(Some(LOG4J_NS), &tag, &tag), &attributes);
            }
            CapturedEvent::End { tag, location } => {
                target.set_location(location);
                target.end_element(ElementName::new(Some(LOG4J_NS), &tag, &tag));
            }
        }
    }

    fn record(&mut self, level: ErrorLevel, message: &str, diagnostic: &ParseDiagnostic) {
        self.errors
            .push(ErrorItem::from_diagnostic(level, message, diagnostic));
    }
}

impl ContentHandler for DocumentBuffer {
    fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    fn start_element(&mut self, name: ElementName<'_>, attributes: &Attributes) {
        if !self.config.allows(name.namespace) {
            log::debug!(
                "Dropping <{}> from foreign namespace {:?}",
                name.qualified_name,
                name.namespace
            );
            return;
        }
        self.events.push(CapturedEvent::Start {
            tag: name.tag_name().to_string(),
            attributes: attributes.clone(),
            location: self.location,
        });
    }

    fn end_element(&mut self, name: ElementName<'_>) {
        if !self.config.allows(name.namespace) {
            return;
        }
        self.events.push(CapturedEvent::End {
            tag: name.tag_name().to_string(),
            location: self.location,
        });
    }

    fn warning(&mut self, diagnostic: &ParseDiagnostic) {
        log::warn!("Parsing warning: {}", diagnostic);
        self.record(ErrorLevel::Warning, "Parsing warning", diagnostic);
    }

    fn error(&mut self, diagnostic: &ParseDiagnostic) {
        log::error!("Parsing error: {}", diagnostic);
        self.record(ErrorLevel::Error, "Parsing error", diagnostic);
    }

    fn fatal_error(&mut self, diagnostic: &ParseDiagnostic) {
        log::error!("Parsing fatal error: {}", diagnostic);
        self.record(ErrorLevel::Fatal, "Parsing fatal error", diagnostic);
        if self.fatal.is_none() {
            self.fatal = Some(diagnostic.clone());
        }
    }
}

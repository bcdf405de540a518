//! quick-xml driver for the element event contract.
use crate::config::SourceConfig;
use crate::error::SourceError;
use joran_types::{Attributes, ContentHandler, ElementName, Location, ParseDiagnostic};
use quick_xml::NsReader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use std::borrow::Cow;
use std::io::Read;

const LOG4J_DTD: &str = "log4j.dtd";

/// Reads an XML document and pushes its element events into a
/// [`ContentHandler`].
///
/// Empty elements are reported as a start followed by an end. Text,
/// comments and processing instructions are not reported. Malformed markup
/// ends the document with a `fatal_error`; `end_document` is only sent for
/// documents read to the end.
#[derive(Debug, Clone, Default)]
pub struct XmlEventSource {
    config: SourceConfig,
}

/// Namespace of an element as owned data, so the reader can be used again
/// while the event is processed.
enum Resolved {
    Namespace(Option<String>),
    UnknownPrefix(String),
}

impl From<ResolveResult<'_>> for Resolved {
    fn from(result: ResolveResult<'_>) -> Self {
        match result {
            ResolveResult::Bound(ns) => {
                Resolved::Namespace(Some(String::from_utf8_lossy(ns.as_ref()).into_owned()))
            }
            ResolveResult::Unbound => Resolved::Namespace(None),
            ResolveResult::Unknown(prefix) => {
                Resolved::UnknownPrefix(String::from_utf8_lossy(&prefix).into_owned())
            }
        }
    }
}

impl XmlEventSource {
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Reads all of `reader` and parses it as UTF-8.
    pub fn parse_reader(
        &self,
        mut reader: impl Read,
        handler: &mut impl ContentHandler,
    ) -> Result<(), SourceError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.parse_slice(&bytes, handler)
    }

    pub fn parse_slice(
        &self,
        bytes: &[u8],
        handler: &mut impl ContentHandler,
    ) -> Result<(), SourceError> {
        let source = std::str::from_utf8(bytes)?;
        self.parse_str(source, handler);
        Ok(())
    }

    /// Parses `source`. Every problem is reported through `handler`.
    pub fn parse_str(&self, source: &str, handler: &mut impl ContentHandler) {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        let mut reader = NsReader::from_str(source);
        reader.config_mut().trim_text(self.config.trim_text);
        let mut cursor = LineCursor::new(source);
        let mut depth = 0usize;
        let mut seen_root = false;

        handler.start_document();
        loop {
            let (resolved, event) = match reader.read_resolved_event() {
                Ok((result, event)) => (Resolved::from(result), event),
                Err(e) => {
                    let location = cursor.locate(reader.error_position() as usize);
                    handler.fatal_error(&ParseDiagnostic::new(e.to_string(), location));
                    return;
                }
            };
            let location = cursor.locate(reader.buffer_position() as usize);

            match event {
                Event::Start(e) => {
                    depth += 1;
                    seen_root = true;
                    Self::start_element(handler, &e, &resolved, location);
                }
                Event::Empty(e) => {
                    seen_root = true;
                    if Self::start_element(handler, &e, &resolved, location) {
                        Self::end_element(handler, &e, &resolved);
                    }
                }
                Event::End(e) => {
                    depth = depth.saturating_sub(1);
                    handler.set_location(location);
                    if let Resolved::Namespace(ns) = &resolved {
                        let local = String::from_utf8_lossy(e.local_name().into_inner());
                        let qualified = String::from_utf8_lossy(e.name().into_inner());
                        handler.end_element(ElementName::new(ns.as_deref(), &local, &qualified));
                    }
                }
                Event::DocType(e) => {
                    let doctype = String::from_utf8_lossy(&e);
                    let message = if doctype.contains(LOG4J_DTD) {
                        format!("The '{}' is no longer used nor needed.", LOG4J_DTD)
                    } else {
                        format!("DOCTYPE declaration ignored: {}", doctype.trim())
                    };
                    handler.warning(&ParseDiagnostic::new(message, location));
                }
                Event::Eof => {
                    if !seen_root {
                        handler.fatal_error(&ParseDiagnostic::new("Premature end of file.", location));
                        return;
                    }
                    if depth > 0 {
                        handler.fatal_error(&ParseDiagnostic::new(
                            "XML document structures must start and end within the same entity.",
                            location,
                        ));
                        return;
                    }
                    break;
                }
                _ => (),
            }
        }
        handler.end_document();
    }

    /// Reports a start tag. Returns `false` when the element was dropped
    /// because its prefix is not bound.
    fn start_element(
        handler: &mut impl ContentHandler,
        e: &BytesStart<'_>,
        resolved: &Resolved,
        location: Location,
    ) -> bool {
        handler.set_location(location);
        let qualified = String::from_utf8_lossy(e.name().into_inner());
        let ns = match resolved {
            Resolved::Namespace(ns) => ns.as_deref(),
            Resolved::UnknownPrefix(prefix) => {
                handler.error(&ParseDiagnostic::new(
                    format!(
                        "The prefix \"{}\" for element \"{}\" is not bound.",
                        prefix, qualified
                    ),
                    location,
                ));
                return false;
            }
        };
        let local = String::from_utf8_lossy(e.local_name().into_inner());
        let attributes = Self::collect_attributes(handler, e, &qualified, location);
        handler.start_element(ElementName::new(ns, &local, &qualified), &attributes);
        true
    }

    fn end_element(handler: &mut impl ContentHandler, e: &BytesStart<'_>, resolved: &Resolved) {
        if let Resolved::Namespace(ns) = resolved {
            let local = String::from_utf8_lossy(e.local_name().into_inner());
            let qualified = String::from_utf8_lossy(e.name().into_inner());
            handler.end_element(ElementName::new(ns.as_deref(), &local, &qualified));
        }
    }

    /// Namespace declarations are not reported as attributes. Malformed
    /// attributes are reported and left out.
    fn collect_attributes(
        handler: &mut impl ContentHandler,
        e: &BytesStart<'_>,
        tag: &str,
        location: Location,
    ) -> Attributes {
        let mut attributes = Attributes::new();
        for attr in e.attributes() {
            let attr = match attr {
                Ok(attr) => attr,
                Err(err) => {
                    handler.error(&ParseDiagnostic::new(
                        format!("Malformed attribute on <{}>: {}", tag, err),
                        location,
                    ));
                    continue;
                }
            };
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }
            let key: Cow<'_, str> = String::from_utf8_lossy(attr.key.as_ref());
            let raw = String::from_utf8_lossy(&attr.value);
            match unescape(&raw) {
                Ok(value) => attributes.push(key, value),
                Err(err) => handler.error(&ParseDiagnostic::new(
                    format!("Bad value for attribute '{}' on <{}>: {}", key, tag, err),
                    location,
                )),
            }
        }
        attributes
    }
}

/// Converts increasing byte offsets to locations without rescanning the
/// source from the start each time.
struct LineCursor<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
    line_start: usize,
}

impl<'a> LineCursor<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    fn locate(&mut self, pos: usize) -> Location {
        let pos = pos.min(self.source.len());
        if pos < self.pos {
            return Location::from_offset(self.source, pos);
        }
        for (i, b) in self.source.as_bytes()[self.pos..pos].iter().enumerate() {
            if *b == b'\n' {
                self.line += 1;
                self.line_start = self.pos + i + 1;
            }
        }
        self.pos = pos;
        Location::new(self.line, pos - self.line_start + 1)
    }
}

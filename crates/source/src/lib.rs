//! Getting element events out of a document and into the interpreter.
//!
//! [`XmlEventSource`] drives a namespace-aware quick-xml reader and pushes
//! [`ContentHandler`](joran_types::ContentHandler) callbacks. The usual
//! consumer is a [`DocumentBuffer`], which records the element stream and the
//! parser's diagnostics during a first pass so the caller can decide whether
//! the document is worth interpreting before any action runs. A successful
//! [`DocumentBuffer::replay`] then re-emits the recorded events into the
//! interpreter.
//!
//! ```ignore
//! let config = SourceConfig::default();
//! let mut buffer = DocumentBuffer::new(config.clone());
//! XmlEventSource::new(config).parse_str(xml, &mut buffer);
//! buffer.replay(&mut interpreter)?;
//! ```

pub mod buffer;
pub mod config;
pub mod error;
pub mod reader;

pub use buffer::DocumentBuffer;
pub use config::{LOG4J_NS, LS_NS, SourceConfig};
pub use error::SourceError;
pub use reader::XmlEventSource;

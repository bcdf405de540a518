use serde::Deserialize;

/// Namespace of log4j configuration documents.
pub const LOG4J_NS: &str = "http://jakarta.apache.org/log4j/";
/// Namespace of logging services configuration documents.
pub const LS_NS: &str = "http://logging.apache.org/";

/// Settings for reading and buffering a configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Element namespaces kept by the document buffer. Elements without a
    /// namespace are always kept.
    pub allowed_namespaces: Vec<String>,
    /// Whether the reader drops whitespace around text content.
    pub trim_text: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            allowed_namespaces: vec![LOG4J_NS.to_string(), LS_NS.to_string()],
            trim_text: true,
        }
    }
}

impl SourceConfig {
    pub fn allows(&self, namespace: Option<&str>) -> bool {
        match namespace {
            None | Some("") => true,
            Some(ns) => self.allowed_namespaces.iter().any(|allowed| allowed == ns),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.allowed_namespaces.push(namespace.into());
        self
    }
}

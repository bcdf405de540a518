use joran_source::SourceConfig;
use serde::Deserialize;
use std::collections::HashMap;

/// Settings for a [`Configurator`](crate::Configurator) run.
///
/// ```json
/// {
///   "source": { "allowed_namespaces": ["http://jakarta.apache.org/log4j/"] },
///   "properties": { "log.dir": "/var/log/app" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfiguratorConfig {
    pub source: SourceConfig,
    /// Seeded into the execution context before the document is replayed,
    /// available to actions as `${key}`.
    pub properties: HashMap<String, String>,
}

impl ConfiguratorConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use joran_source::LOG4J_NS;

    #[test]
    fn test_from_json() {
        let config = ConfiguratorConfig::from_json(
            r#"{ "source": { "trim_text": false }, "properties": { "level": "WARN" } }"#,
        )
        .unwrap();
        assert!(!config.source.trim_text);
        assert!(config.source.allows(Some(LOG4J_NS)));
        assert_eq!(config.properties.get("level").map(String::as_str), Some("WARN"));
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(ConfiguratorConfig::from_json("{}").unwrap(), ConfiguratorConfig::default());
        assert!(ConfiguratorConfig::from_json("{ \"properties\": 3 }").is_err());
    }
}

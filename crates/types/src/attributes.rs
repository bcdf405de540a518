/// The attributes of one element, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Returns the value of the first attribute called `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// The name of an element as reported by a namespace-aware event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementName<'a> {
    pub namespace: Option<&'a str>,
    pub local_name: &'a str,
    pub qualified_name: &'a str,
}

impl<'a> ElementName<'a> {
    pub fn new(namespace: Option<&'a str>, local_name: &'a str, qualified_name: &'a str) -> Self {
        Self {
            namespace,
            local_name,
            qualified_name,
        }
    }

    /// A name without namespace, where the local and qualified names coincide.
    pub fn local(name: &'a str) -> Self {
        Self::new(None, name, name)
    }

    /// The name rules are matched against: the local name, or the qualified
    /// name when the source did not provide one.
    pub fn tag_name(&self) -> &'a str {
        if self.local_name.is_empty() {
            self.qualified_name
        } else {
            self.local_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_lookup() {
        let attrs: Attributes = [("name", "root"), ("level", "debug"), ("name", "shadowed")]
            .into_iter()
            .collect();
        assert_eq!(attrs.get("name"), Some("root"));
        assert_eq!(attrs.get("level"), Some("debug"));
        assert_eq!(attrs.get("class"), None);
        assert!(attrs.contains("level"));
        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs.iter().nth(1), Some(("level", "debug")));
    }

    #[test]
    fn test_tag_name_falls_back_to_qualified_name() {
        assert_eq!(ElementName::new(None, "logger", "log4j:logger").tag_name(), "logger");
        assert_eq!(ElementName::new(None, "", "log4j:logger").tag_name(), "log4j:logger");
        assert_eq!(ElementName::local("root").tag_name(), "root");
    }
}

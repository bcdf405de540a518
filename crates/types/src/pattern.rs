//! Element paths and rule keys.
use std::fmt;
use std::str::FromStr;

/// The segment that marks a rule key as a tail (wildcard) key: `*/b` matches
/// any path ending in `b`.
pub const WILDCARD: &str = "*";

/// An ordered path of element names, e.g. `configuration/logger/level`.
///
/// The interpreter keeps one of these as the live path of open elements; the
/// rule store uses them as keys. `/x`, `x/` and `x` all parse to the same
/// single-segment pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pattern {
    components: Vec<String>,
}

impl Pattern {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a `/`-delimited path. Empty segments are dropped.
    pub fn parse(path: &str) -> Self {
        Self {
            components: path
                .split('/')
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.components.push(segment.into());
    }

    /// Removes the last segment. Popping an empty pattern does nothing.
    pub fn pop(&mut self) {
        self.components.pop();
    }

    /// Returns a copy of this pattern with its last segment removed.
    pub fn parent(&self) -> Pattern {
        let mut parent = self.clone();
        parent.pop();
        parent
    }

    pub fn peek_last(&self) -> Option<&str> {
        self.components.last().map(String::as_str)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.components.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// Number of trailing segments shared with `other`, counted from the end
    /// and stopping at the first mismatch. Zero if either side is empty.
    pub fn tail_match(&self, other: &Pattern) -> usize {
        self.components
            .iter()
            .rev()
            .zip(other.components.iter().rev())
            .take_while(|(l, r)| l == r)
            .count()
    }

    /// True for keys of the form `*/suffix...`.
    pub fn is_tail_key(&self) -> bool {
        self.components.len() > 1 && self.components[0] == WILDCARD
    }

    /// For a tail key, the segments after the leading wildcard.
    pub fn tail_suffix(&self) -> Option<Pattern> {
        self.is_tail_key().then(|| Pattern {
            components: self.components[1..].to_vec(),
        })
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.components {
            write!(f, "/{}", c)?;
        }
        Ok(())
    }
}

impl FromStr for Pattern {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Pattern::parse(s))
    }
}

impl From<&str> for Pattern {
    fn from(s: &str) -> Self {
        Pattern::parse(s)
    }
}

impl<S: Into<String>> FromIterator<S> for Pattern {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            components: iter.into_iter().map(Into::into).collect(),
        }
    }
}

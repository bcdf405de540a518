//! Document-scoped storage shared by every action invocation.
use crate::error::SubstitutionError;
use joran_types::{ErrorItem, ErrorLevel, Location};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;

const DELIM_START: &str = "${";
const DELIM_STOP: char = '}';

type Object = Box<dyn Any + Send>;

/// Storage for one parse: an object stack for passing partially built values
/// between nested actions, a named object map, the error log, substitution
/// properties and the position of the current event.
#[derive(Default)]
pub struct ExecutionContext {
    object_stack: Vec<Object>,
    object_map: HashMap<String, Object>,
    errors: Vec<ErrorItem>,
    properties: HashMap<String, String>,
    location: Option<Location>,
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("object_stack", &self.object_stack.len())
            .field("object_map", &self.object_map.keys().collect::<Vec<_>>())
            .field("errors", &self.errors)
            .field("properties", &self.properties)
            .field("location", &self.location)
            .finish()
    }
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Object stack ---

    pub fn push_object<T: Any + Send>(&mut self, object: T) {
        self.object_stack.push(Box::new(object));
    }

    pub fn pop_object(&mut self) -> Option<Box<dyn Any + Send>> {
        self.object_stack.pop()
    }

    pub fn peek_object(&self) -> Option<&(dyn Any + Send)> {
        self.object_stack.last().map(|o| &**o)
    }

    pub fn peek_as<T: Any>(&self) -> Option<&T> {
        self.object_stack.last().and_then(|o| o.downcast_ref::<T>())
    }

    pub fn peek_as_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.object_stack.last_mut().and_then(|o| o.downcast_mut::<T>())
    }

    /// Pops the top object if it is a `T`. Anything else is left in place.
    pub fn pop_as<T: Any>(&mut self) -> Option<T> {
        self.peek_as::<T>()?;
        let object = self.object_stack.pop()?;
        object.downcast::<T>().ok().map(|b| *b)
    }

    /// The object at `index`, counted from the bottom of the stack.
    pub fn object_at(&self, index: usize) -> Option<&(dyn Any + Send)> {
        self.object_stack.get(index).map(|o| &**o)
    }

    pub fn object_at_as<T: Any>(&self, index: usize) -> Option<&T> {
        self.object_stack.get(index).and_then(|o| o.downcast_ref::<T>())
    }

    pub fn object_stack_len(&self) -> usize {
        self.object_stack.len()
    }

    pub fn is_object_stack_empty(&self) -> bool {
        self.object_stack.is_empty()
    }

    // --- Object map ---

    pub fn put_object<T: Any + Send>(&mut self, key: impl Into<String>, object: T) {
        self.object_map.insert(key.into(), Box::new(object));
    }

    pub fn get_object<T: Any>(&self, key: &str) -> Option<&T> {
        self.object_map.get(key).and_then(|o| o.downcast_ref::<T>())
    }

    pub fn get_object_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.object_map.get_mut(key).and_then(|o| o.downcast_mut::<T>())
    }

    pub fn remove_object(&mut self, key: &str) -> Option<Box<dyn Any + Send>> {
        self.object_map.remove(key)
    }

    pub fn contains_object(&self, key: &str) -> bool {
        self.object_map.contains_key(key)
    }

    // --- Error log ---

    pub fn add_error(&mut self, item: ErrorItem) {
        self.errors.push(item);
    }

    /// Records a warning at the current location.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        let item = self.locate(ErrorItem::warning(message));
        self.errors.push(item);
    }

    pub fn errors(&self) -> &[ErrorItem] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<ErrorItem> {
        std::mem::take(&mut self.errors)
    }

    pub fn extend_errors(&mut self, items: impl IntoIterator<Item = ErrorItem>) {
        self.errors.extend(items);
    }

    /// True if anything at error level or above has been recorded.
    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(|e| e.level >= ErrorLevel::Error)
    }

    /// Attaches the current location to `item` unless it already has one.
    pub fn locate(&self, mut item: ErrorItem) -> ErrorItem {
        if item.location.is_none() {
            item.location = self.location;
        }
        item
    }

    // --- Substitution properties ---

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn properties(&self) -> &HashMap<String, String> {
        &self.properties
    }

    /// Replaces `${key}` references in `value`. A malformed value is reported
    /// in the error log and returned unchanged.
    pub fn subst(&mut self, value: &str) -> String {
        match substitute_vars(value, &self.properties) {
            Ok(s) => s,
            Err(e) => {
                log::error!("Bad option value [{}]: {}", value, e);
                let item = self.locate(ErrorItem::error("Variable substitution failed").with_cause(&e));
                self.errors.push(item);
                value.to_string()
            }
        }
    }

    // --- Location ---

    pub fn set_location(&mut self, location: Location) {
        self.location = Some(location);
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    /// Line of the current event, 0 when unknown.
    pub fn line_number(&self) -> usize {
        self.location.map_or(0, |l| l.line)
    }

    /// Column of the current event, 0 when unknown.
    pub fn column_number(&self) -> usize {
        self.location.map_or(0, |l| l.col)
    }
}

/// Replaces every `${key}` in `value` with the value of `key` from
/// `properties`, falling back to the process environment. Unknown keys are
/// replaced by the empty string.
pub fn substitute_vars(
    value: &str,
    properties: &HashMap<String, String>,
) -> Result<String, SubstitutionError> {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    let mut offset = 0;

    while let Some(start) = rest.find(DELIM_START) {
        out.push_str(&rest[..start]);
        let after = &rest[start + DELIM_START.len()..];
        let Some(end) = after.find(DELIM_STOP) else {
            return Err(SubstitutionError {
                value: value.to_string(),
                position: offset + start,
            });
        };
        let key = &after[..end];
        if let Some(replacement) = lookup(key, properties) {
            out.push_str(&replacement);
        }
        let consumed = start + DELIM_START.len() + end + 1;
        rest = &rest[consumed..];
        offset += consumed;
    }

    out.push_str(rest);
    Ok(out)
}

fn lookup(key: &str, properties: &HashMap<String, String>) -> Option<String> {
    if let Some(v) = properties.get(key) {
        return Some(v.clone());
    }
    if key.is_empty() || key.contains(['=', '\0']) {
        return None;
    }
    std::env::var(key).ok()
}

//! Translation documents and dotted-path lookup
//!
//! A translation document is a loosely-typed JSON tree. Almost every field is
//! optional, so lookups return `Option` and callers treat `None` as a normal
//! outcome rather than an error.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Parsed translation document for one language. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationDocument {
    root: Value,
}

impl TranslationDocument {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Parse a document from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Resolve a dotted path like `gdpr.templates.erasure.paragraphs`
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        resolve(&self.root, path)
    }

    /// Resolve a path that must hold a string
    pub fn text(&self, path: &str) -> Option<&str> {
        self.resolve(path).and_then(Value::as_str)
    }

    /// Resolve a path that must hold an array
    pub fn list(&self, path: &str) -> Option<&[Value]> {
        self.resolve(path)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    /// Resolve a top-level section that is present and not falsy
    pub fn section(&self, path: &str) -> Option<&Value> {
        self.resolve(path).filter(|value| is_truthy(value))
    }

    /// Human-readable name shown in the language selector
    pub fn language_name(&self) -> Option<&str> {
        self.text("languageName")
    }

    /// Declared date locale, e.g. `nb-NO`
    pub fn date_locale(&self) -> Option<&str> {
        self.text("dateLocale")
    }

    /// Placeholder strings declared under `<section>.placeholders`
    pub fn placeholders(&self, section: &str) -> Placeholders {
        let map = self
            .resolve(&format!("{section}.placeholders"))
            .and_then(Value::as_object);
        Placeholders::from_object(map)
    }
}

/// Walk `root` along a dot-delimited path.
///
/// Objects are indexed by key, arrays by decimal index. Any missing segment
/// yields `None`.
pub fn resolve<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, |node, segment| match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => array_index(segment).and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Canonical decimal index only: `01` or `+1` do not name an element
fn array_index(segment: &str) -> Option<usize> {
    segment
        .parse::<usize>()
        .ok()
        .filter(|i| i.to_string() == segment)
}

/// Read a string field from an object node
pub fn field<'a>(node: &'a Value, key: &str) -> Option<&'a str> {
    node.get(key).and_then(Value::as_str)
}

/// Read a non-empty string field from an object node
pub fn non_empty_field<'a>(node: &'a Value, key: &str) -> Option<&'a str> {
    field(node, key).filter(|s| !s.is_empty())
}

/// Whether a value counts as present when probing optional sections
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Placeholder texts for one letter type, keyed by form field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    entries: BTreeMap<String, String>,
}

impl Placeholders {
    fn from_object(map: Option<&Map<String, Value>>) -> Self {
        let entries = map
            .into_iter()
            .flatten()
            .filter_map(|(key, value)| value.as_str().map(|s| (key.clone(), s.to_string())))
            .collect();
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Placeholder for `key`, or `default` when missing or empty
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).filter(|s| !s.is_empty()).unwrap_or(default)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

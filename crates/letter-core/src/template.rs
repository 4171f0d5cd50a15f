//! `{{token}}` substitution over a flat token table
//!
//! Substitution is a single pass: values are inserted verbatim and never
//! re-scanned, so a value containing `{{...}}` stays literal.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::BTreeMap;

lazy_static! {
    /// `{{identifier}}` marker, ASCII word characters only
    static ref TOKEN_PATTERN: Regex = Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").unwrap();
}

/// Token values available to a template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    values: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TemplateContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Self::new();
        for (key, value) in iter {
            context.insert(key, value);
        }
        context
    }
}

/// Replace every marker in `template` with its value from `context`.
/// Unknown identifiers become the empty string.
pub fn apply_template(template: &str, context: &TemplateContext) -> String {
    if template.is_empty() {
        return String::new();
    }
    TOKEN_PATTERN
        .replace_all(template, |caps: &Captures| {
            context.get(&caps[1]).unwrap_or_default().to_string()
        })
        .into_owned()
}

/// Apply a template taken straight from a translation document.
/// Anything other than a string renders as the empty string.
pub fn apply_value(template: Option<&Value>, context: &TemplateContext) -> String {
    match template {
        Some(Value::String(s)) => apply_template(s, context),
        _ => String::new(),
    }
}

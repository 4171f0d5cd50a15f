//! UI binding model
//!
//! DOM-free half of the UI binder: which attribute maps to which binding,
//! what value a key resolves to, and how the type selectors are rebuilt.
//! The browser front end walks the DOM and applies these results.

use crate::document::{non_empty_field, TranslationDocument};
use serde::Serialize;
use serde_json::Value;

/// How an element consumes a translation key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingMode {
    /// Replace the element's text content
    Text,
    /// Set the `aria-label` attribute
    AriaLabel,
    /// Set an input's placeholder
    Placeholder,
    /// Rebuild the element's children as one list item per entry
    List,
    /// Set a copy button's label and cache it as the reset label
    CopyLabel,
}

impl BindingMode {
    pub const ALL: [BindingMode; 5] = [
        BindingMode::Text,
        BindingMode::AriaLabel,
        BindingMode::Placeholder,
        BindingMode::List,
        BindingMode::CopyLabel,
    ];

    /// Element attribute carrying the dotted key
    pub fn attribute(&self) -> &'static str {
        match self {
            Self::Text => "data-i18n",
            Self::AriaLabel => "data-i18n-aria",
            Self::Placeholder => "data-i18n-placeholder",
            Self::List => "data-i18n-list",
            Self::CopyLabel => "data-i18n-copy",
        }
    }
}

/// Value to apply to a bound element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundValue {
    Text(String),
    Items(Vec<String>),
}

/// Resolve `key` for an element bound with `mode`. `None` means the element
/// keeps whatever it currently shows.
pub fn resolve_binding(
    document: &TranslationDocument,
    mode: BindingMode,
    key: &str,
) -> Option<BoundValue> {
    let value = document.resolve(key)?;
    match mode {
        BindingMode::List => value
            .as_array()
            .map(|items| BoundValue::Items(items.iter().map(list_item_text).collect())),
        _ => value.as_str().map(|s| BoundValue::Text(s.to_string())),
    }
}

/// Text shown for one list entry. `null` shows nothing, other non-strings
/// show their JSON text.
fn list_item_text(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// One entry of a `<select>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Rebuilt option list plus the value that ends up selected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionList {
    pub options: Vec<SelectOption>,
    pub selected: String,
}

impl OptionList {
    /// Keep `previous` selected when it is still offered, else pick the first
    /// option. `None` when there is nothing to offer.
    pub fn reconcile(options: Vec<SelectOption>, previous: &str) -> Option<Self> {
        let selected = options
            .iter()
            .find(|option| !previous.is_empty() && option.value == previous)
            .or_else(|| options.first())?
            .value
            .clone();
        Some(Self { options, selected })
    }
}

/// Parse a document-declared option array. Entries without a string `value`
/// are skipped; a missing or empty label shows the value.
fn declared_options(document: &TranslationDocument, path: &str) -> Option<Vec<SelectOption>> {
    let entries = document.list(path).filter(|entries| !entries.is_empty())?;
    Some(
        entries
            .iter()
            .filter_map(|entry| {
                let value = entry.get("value").and_then(Value::as_str)?;
                let label = non_empty_field(entry, "label").unwrap_or(value);
                Some(SelectOption::new(value, label))
            })
            .collect(),
    )
}

/// Request-type options. Without a declared list, options are inferred from
/// which GDPR template sections exist.
pub fn request_type_options(document: &TranslationDocument, previous: &str) -> Option<OptionList> {
    let options = declared_options(document, "gdpr.form.requestType.options").unwrap_or_else(|| {
        let mut inferred = Vec::new();
        if document.section("gdpr.templates.information").is_some()
            || document.section("gdpr.templates.subjectLine").is_some()
        {
            inferred.push(SelectOption::new("information", "Information"));
        }
        if document.section("gdpr.templates.erasure").is_some() {
            inferred.push(SelectOption::new("erasure", "Erasure"));
        }
        inferred
    });
    OptionList::reconcile(options, previous)
}

/// Agreement-type options. Only a declared list is used.
pub fn agreement_type_options(document: &TranslationDocument, previous: &str) -> Option<OptionList> {
    let options = declared_options(document, "angrerett.form.agreementType.options")?;
    OptionList::reconcile(options, previous)
}

//! Active-language context
//!
//! Everything derived from one translation document lives here, so a
//! language switch replaces it in a single assignment and renderers never
//! see fields from two documents at once.

use crate::document::{Placeholders, TranslationDocument};
use crate::locale::DateFormatter;
use std::sync::Arc;

pub const DEFAULT_COPY_SUCCESS: &str = "Copied!";
pub const DEFAULT_COPY_ERROR: &str = "Copy error";
pub const DEFAULT_COPY_LOG_ERROR: &str = "Unable to copy";

/// Copy-button notification texts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiMessages {
    pub copy_success: String,
    pub copy_error: String,
    pub copy_log_error: String,
}

impl Default for UiMessages {
    fn default() -> Self {
        Self {
            copy_success: DEFAULT_COPY_SUCCESS.to_string(),
            copy_error: DEFAULT_COPY_ERROR.to_string(),
            copy_log_error: DEFAULT_COPY_LOG_ERROR.to_string(),
        }
    }
}

impl UiMessages {
    fn from_document(document: &TranslationDocument) -> Self {
        let text = |path: &str, default: &str| {
            document
                .text(path)
                .filter(|s| !s.is_empty())
                .unwrap_or(default)
                .to_string()
        };
        Self {
            copy_success: text("notifications.copySuccess", DEFAULT_COPY_SUCCESS),
            copy_error: text("notifications.copyError", DEFAULT_COPY_ERROR),
            copy_log_error: text("notifications.copyLogError", DEFAULT_COPY_LOG_ERROR),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LanguageContext {
    code: String,
    document: Arc<TranslationDocument>,
    gdpr_placeholders: Placeholders,
    angrerett_placeholders: Placeholders,
    formatter: DateFormatter,
    messages: UiMessages,
}

impl LanguageContext {
    /// Derive a context from `document`. `default_locale` applies when the
    /// document declares no `dateLocale` or an invalid one.
    pub fn new(
        code: impl Into<String>,
        document: Arc<TranslationDocument>,
        default_locale: &str,
    ) -> Self {
        let locale = document.date_locale().unwrap_or(default_locale);
        Self {
            code: code.into(),
            gdpr_placeholders: document.placeholders("gdpr"),
            angrerett_placeholders: document.placeholders("angrerett"),
            formatter: DateFormatter::new(locale, default_locale),
            messages: UiMessages::from_document(&document),
            document,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn document(&self) -> &TranslationDocument {
        &self.document
    }

    pub fn gdpr_placeholders(&self) -> &Placeholders {
        &self.gdpr_placeholders
    }

    pub fn angrerett_placeholders(&self) -> &Placeholders {
        &self.angrerett_placeholders
    }

    pub fn formatter(&self) -> &DateFormatter {
        &self.formatter
    }

    pub fn messages(&self) -> &UiMessages {
        &self.messages
    }

    /// `app.pageTitle`, when the document declares one
    pub fn page_title(&self) -> Option<&str> {
        self.document.text("app.pageTitle")
    }
}

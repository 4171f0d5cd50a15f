//! Letter renderers
//!
//! Both renderers are pure: `(form, context) -> text`. A missing context or a
//! document without the letter's section renders as the empty string.

pub mod gdpr;
pub mod withdrawal;

pub use gdpr::render_gdpr;
pub use withdrawal::render_withdrawal;

/// Blank-line separated letter segments, joined with single newlines
#[derive(Debug, Default)]
struct Segments {
    lines: Vec<String>,
}

impl Segments {
    fn new() -> Self {
        Self::default()
    }

    fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    /// Blank line followed by `text`
    fn paragraph(&mut self, text: impl Into<String>) {
        self.lines.push(String::new());
        self.lines.push(text.into());
    }

    /// Blank line followed by `text`, skipped when `text` is empty
    fn optional_paragraph(&mut self, text: Option<&str>) {
        if let Some(text) = text.filter(|t| !t.is_empty()) {
            self.paragraph(text);
        }
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}

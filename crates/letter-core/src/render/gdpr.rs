//! GDPR data-subject request letter
//!
//! Two branches keyed by the request type. `erasure` needs a
//! `gdpr.templates.erasure` section and otherwise renders as `information`.

use super::Segments;
use crate::context::LanguageContext;
use crate::document::{is_truthy, non_empty_field};
use crate::state::{or_placeholder, GdprForm, RequestType};
use crate::template::{apply_value, TemplateContext};
use serde_json::Value;

static EMPTY: Value = Value::Null;

/// Resolved field values shared by both branches
struct LetterFields {
    subject_name: String,
    subject_address: String,
    request_date: String,
    controller_block: String,
    reference_id: String,
    data_source: String,
    context: TemplateContext,
}

impl LetterFields {
    fn new(form: &GdprForm, language: &LanguageContext) -> Self {
        let placeholders = language.gdpr_placeholders();

        let controller_name = or_placeholder(
            &form.controller_name,
            placeholders.get_or("controllerName", "[Controller]"),
        );
        let controller_address = or_placeholder(
            &form.controller_address,
            placeholders.get_or("controllerAddress", "[Address]"),
        );
        let subject_name =
            or_placeholder(&form.subject_name, placeholders.get_or("subjectName", "[Name]"));
        let subject_address = or_placeholder(
            &form.subject_address,
            placeholders.get_or("subjectAddress", "[Address]"),
        );
        let request_date = language
            .formatter()
            .format_input(&form.request_date)
            .unwrap_or_else(|| placeholders.get_or("requestDate", "[Date]").to_string());
        let controller_email = form.controller_email.trim().to_string();
        let reference_id = form.reference_id.trim().to_string();
        let data_source = form.data_source.trim().to_string();

        let controller_block = [
            controller_name.as_str(),
            controller_address.as_str(),
            controller_email.as_str(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

        let context = TemplateContext::new()
            .with("controllerName", controller_name)
            .with("controllerAddress", controller_address)
            .with("controllerEmail", controller_email)
            .with("controllerBlock", controller_block.clone())
            .with("subjectName", subject_name.clone())
            .with("subjectAddress", subject_address.clone())
            .with("requestDate", request_date.clone())
            .with("referenceId", reference_id.clone())
            .with("dataSource", data_source.clone());

        Self {
            subject_name,
            subject_address,
            request_date,
            controller_block,
            reference_id,
            data_source,
            context,
        }
    }

    /// Sender block, date and recipient block common to every letter
    fn opening(&self) -> Segments {
        let mut segments = Segments::new();
        segments.line(&self.subject_name);
        segments.line(&self.subject_address);
        segments.line("");
        segments.line(&self.request_date);
        segments.optional_paragraph(Some(self.controller_block.as_str()));
        segments
    }

    /// Templated reference line, only when a reference id was entered
    fn reference_line(&self, template: &Value) -> String {
        if self.reference_id.is_empty() {
            return String::new();
        }
        apply_value(template.get("referenceLine"), &self.context)
            .trim()
            .to_string()
    }
}

/// Render the GDPR request letter for the active language
pub fn render_gdpr(form: &GdprForm, language: Option<&LanguageContext>) -> String {
    let Some(language) = language else {
        return String::new();
    };
    let Some(section) = language.document().section("gdpr") else {
        return String::new();
    };

    let templates = section
        .get("templates")
        .filter(|t| is_truthy(t))
        .unwrap_or(&EMPTY);
    let information = templates
        .get("information")
        .filter(|t| is_truthy(t))
        .unwrap_or(templates);
    let erasure = templates.get("erasure").filter(|t| is_truthy(t));

    let fields = LetterFields::new(form, language);
    match (form.request_type(), erasure) {
        (RequestType::Erasure, Some(erasure)) => render_erasure(&fields, erasure, information),
        _ => render_information(&fields, information),
    }
}

fn render_erasure(fields: &LetterFields, erasure: &Value, information: &Value) -> String {
    let reference_line = fields.reference_line(erasure);
    let signoff = non_empty_field(erasure, "signoff")
        .or_else(|| non_empty_field(information, "signoff"));

    let mut segments = fields.opening();
    segments.optional_paragraph(non_empty_field(erasure, "subjectLine"));
    segments.optional_paragraph(Some(reference_line.as_str()));
    for paragraph in templated_paragraphs(erasure.get("paragraphs"), &fields.context) {
        segments.paragraph(paragraph);
    }
    segments.optional_paragraph(signoff);
    segments.line(&fields.subject_name);
    segments.finish()
}

fn render_information(fields: &LetterFields, information: &Value) -> String {
    let reference_line = fields.reference_line(information);

    let data_source_line = if fields.data_source.is_empty() {
        String::new()
    } else {
        apply_value(information.get("dataSourceLine"), &fields.context)
            .trim()
            .to_string()
    };
    let mut post_list_context = fields.context.clone();
    post_list_context.insert(
        "dataSourceLine",
        if data_source_line.is_empty() {
            String::new()
        } else {
            format!("{data_source_line} ")
        },
    );

    let bullet_list = information
        .get("bulletItems")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| format!("- {}", display_item(item)))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default();

    let mut segments = fields.opening();
    segments.optional_paragraph(non_empty_field(information, "subjectLine"));
    segments.optional_paragraph(non_empty_field(information, "intro"));
    segments.optional_paragraph(Some(reference_line.as_str()));
    segments.optional_paragraph(non_empty_field(information, "requestListIntro"));
    segments.optional_paragraph(Some(bullet_list.as_str()));
    for paragraph in templated_paragraphs(information.get("postListParagraphs"), &post_list_context)
    {
        segments.paragraph(paragraph);
    }
    segments.optional_paragraph(non_empty_field(information, "signoff"));
    segments.line(&fields.subject_name);
    segments.finish()
}

/// Substitute and trim each paragraph, dropping the ones that end up empty
fn templated_paragraphs(paragraphs: Option<&Value>, context: &TemplateContext) -> Vec<String> {
    paragraphs
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .map(|paragraph| apply_value(Some(paragraph), context).trim().to_string())
        .filter(|paragraph| !paragraph.is_empty())
        .collect()
}

fn display_item(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

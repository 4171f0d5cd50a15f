//! Right-of-withdrawal (angrerett) notice
//!
//! The `purchase` or `service` template under `angrerett.templates` is the
//! whole letter body. This renderer only prepares the optional segments and
//! lets the template decide where they appear.

use crate::context::LanguageContext;
use crate::document::non_empty_field;
use crate::state::{or_placeholder, AgreementForm, AgreementType};
use crate::template::{apply_template, apply_value, TemplateContext};
use serde_json::Value;

const DEFAULT_PURCHASE_ACCOUNT_SEGMENT: &str = " (referanse: {{account}})";
const DEFAULT_SERVICE_ACCOUNT_SEGMENT: &str = " (konto: {{account}})";
const DEFAULT_PURCHASE_ITEM_LINE: &str = "The purchase concerns {{itemDescription}}.";
const DEFAULT_SERVICE_ITEM_SEGMENT: &str = " covering {{itemDescription}}";

static EMPTY: Value = Value::Null;

/// Render the withdrawal notice for the active language
pub fn render_withdrawal(form: &AgreementForm, language: Option<&LanguageContext>) -> String {
    let Some(language) = language else {
        return String::new();
    };
    let Some(section) = language.document().section("angrerett") else {
        return String::new();
    };
    let templates = section.get("templates").unwrap_or(&EMPTY);
    let placeholders = language.angrerett_placeholders();
    let formatter = language.formatter();

    let company = or_placeholder(
        &form.company_name,
        placeholders.get_or("companyName", "[Company]"),
    );
    let customer = or_placeholder(
        &form.customer_name,
        placeholders.get_or("customerName", "[Name]"),
    );
    let agreement_date = formatter
        .format_input(&form.agreement_date)
        .unwrap_or_else(|| placeholders.get_or("agreementDate", "[Agreement date]").to_string());
    let today = formatter
        .format_input(&form.today_date)
        .unwrap_or_else(|| placeholders.get_or("todayDate", "[Date]").to_string());
    let account = form.account_ref.trim();
    let item_description = form.item_description.trim();

    let delivery_segment = formatter
        .format_input(&form.delivery_date)
        .map(|delivery_date| {
            apply_value(
                templates.get("deliverySegment"),
                &TemplateContext::new().with("deliveryDate", delivery_date),
            )
        })
        .unwrap_or_default();

    let agreement_type = form.agreement_type();
    let account_segment = if account.is_empty() {
        String::new()
    } else {
        let template = match agreement_type {
            AgreementType::Purchase => non_empty_field(templates, "purchaseAccountSegment")
                .unwrap_or(DEFAULT_PURCHASE_ACCOUNT_SEGMENT),
            AgreementType::Service => non_empty_field(templates, "serviceAccountSegment")
                .unwrap_or(DEFAULT_SERVICE_ACCOUNT_SEGMENT),
        };
        apply_template(template, &TemplateContext::new().with("account", account))
    };

    let item_context = TemplateContext::new().with("itemDescription", item_description);
    let (purchase_item_block, service_item_segment) = if item_description.is_empty() {
        (String::new(), String::new())
    } else {
        let line_template =
            non_empty_field(templates, "purchaseItemLine").unwrap_or(DEFAULT_PURCHASE_ITEM_LINE);
        let segment_template = non_empty_field(templates, "serviceItemSegment")
            .unwrap_or(DEFAULT_SERVICE_ITEM_SEGMENT);
        let line = apply_template(line_template, &item_context);
        let segment = apply_template(segment_template, &item_context);
        (format!("{line}\n\n"), segment)
    };

    let context = TemplateContext::new()
        .with("company", company)
        .with("agreementDate", agreement_date)
        .with("customer", customer)
        .with("today", today)
        .with("deliverySegment", delivery_segment)
        .with("accountSegment", account_segment)
        .with("purchaseItemBlock", purchase_item_block)
        .with("serviceItemSegment", service_item_segment);

    apply_value(templates.get(agreement_type.template_key()), &context)
}

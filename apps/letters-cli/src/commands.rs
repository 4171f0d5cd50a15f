//! `languages` and `render` commands

use clap::ValueEnum;
use letter_core::{AgreementForm, GdprForm, LetterController, LoadedBundles};
use serde_json::Value;
use tracing::{debug, warn};

/// Which letter to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LetterKind {
    /// GDPR data-subject request
    Gdpr,
    /// Right-of-withdrawal notice
    Withdrawal,
}

/// One `code<TAB>name` line per loaded language, in selector order
pub fn language_lines(bundles: &LoadedBundles) -> Vec<String> {
    bundles
        .language_options()
        .into_iter()
        .map(|option| format!("{}\t{}", option.code, option.label))
        .collect()
}

/// Render `kind` for `form` in `language` (or the default language).
///
/// Only string values of the form object are applied; other values and
/// unknown field names are skipped. An unknown `language` keeps the default.
pub fn render_letter(
    bundles: LoadedBundles,
    kind: LetterKind,
    language: Option<&str>,
    form: Option<&Value>,
    default_locale: &str,
) -> String {
    let mut gdpr = GdprForm::default();
    let mut agreement = AgreementForm::default();
    if let Some(fields) = form.and_then(Value::as_object) {
        for (name, value) in fields {
            let Some(value) = value.as_str() else {
                debug!("Skipping non-string form value for {}", name);
                continue;
            };
            let applied = match kind {
                LetterKind::Gdpr => gdpr.set_field(name, value),
                LetterKind::Withdrawal => agreement.set_field(name, value),
            };
            if !applied {
                debug!("Ignoring unknown form field {}", name);
            }
        }
    }

    let mut controller =
        LetterController::with_forms(bundles, gdpr, agreement).with_default_locale(default_locale);
    controller.activate_default();
    if let Some(code) = language {
        if controller.set_language(code).is_none() {
            warn!(
                "Unknown language '{}', keeping {}",
                code,
                controller
                    .active()
                    .map(|active| active.code())
                    .unwrap_or("none")
            );
        }
    }

    match kind {
        LetterKind::Gdpr => controller.render_gdpr(),
        LetterKind::Withdrawal => controller.render_withdrawal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use letter_core::bundle::ManifestEntry;
    use letter_core::TranslationDocument;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn bundles() -> LoadedBundles {
        LoadedBundles::from_documents([
            (
                ManifestEntry::new("nb", "nb.json"),
                TranslationDocument::new(json!({
                    "languageName": "Norsk",
                    "dateLocale": "nb-NO",
                    "angrerett": { "templates": { "service": "Til {{company}} {{agreementDate}}" } }
                })),
            ),
            (
                ManifestEntry::new("en", "en.json"),
                TranslationDocument::new(json!({
                    "dateLocale": "en-GB",
                    "angrerett": { "templates": { "service": "To {{company}} {{agreementDate}}" } }
                })),
            ),
        ])
    }

    #[test]
    fn test_language_lines() {
        assert_eq!(language_lines(&bundles()), vec!["nb\tNorsk", "en\ten"]);
    }

    #[test]
    fn test_render_in_requested_language() {
        let form = json!({ "companyName": "Acme", "agreementDate": "2024-01-15" });
        let text = render_letter(
            bundles(),
            LetterKind::Withdrawal,
            Some("en"),
            Some(&form),
            "en-GB",
        );
        assert_eq!(text, "To Acme 15/01/2024");
    }

    #[test]
    fn test_unknown_language_keeps_default() {
        let form = json!({ "companyName": "Acme", "agreementDate": "2024-01-15" });
        let text = render_letter(
            bundles(),
            LetterKind::Withdrawal,
            Some("sv"),
            Some(&form),
            "en-GB",
        );
        assert_eq!(text, "Til Acme 15.01.2024");
    }

    #[test]
    fn test_non_string_and_unknown_fields_are_ignored() {
        let form = json!({ "companyName": 42, "controllerName": "Acme", "agreementDate": "2024-01-15" });
        let text = render_letter(bundles(), LetterKind::Withdrawal, None, Some(&form), "en-GB");
        assert_eq!(text, "Til [Company] 15.01.2024");
    }

    #[test]
    fn test_gdpr_without_section_is_empty() {
        assert_eq!(render_letter(bundles(), LetterKind::Gdpr, None, None, "en-GB"), "");
    }
}

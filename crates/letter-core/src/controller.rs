//! Top-level controller
//!
//! Owns the loaded bundles, the active-language context and both form
//! records. Every mutation returns the freshly rendered text for whatever it
//! affected, so a front end only has to write the results to its preview
//! surfaces.

use crate::binder::{agreement_type_options, request_type_options, OptionList};
use crate::bundle::{LanguageOption, LoadedBundles};
use crate::context::LanguageContext;
use crate::locale::DEFAULT_LOCALE;
use crate::render::{render_gdpr, render_withdrawal};
use crate::state::{AgreementForm, GdprForm};
use tracing::debug;

/// Everything a front end refreshes after a language switch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refresh {
    pub code: String,
    pub page_title: Option<String>,
    pub request_types: Option<OptionList>,
    pub agreement_types: Option<OptionList>,
    pub gdpr: String,
    pub withdrawal: String,
}

#[derive(Debug)]
pub struct LetterController {
    bundles: LoadedBundles,
    active: Option<LanguageContext>,
    gdpr: GdprForm,
    agreement: AgreementForm,
    default_locale: String,
}

impl LetterController {
    pub fn new(bundles: LoadedBundles) -> Self {
        Self::with_forms(bundles, GdprForm::default(), AgreementForm::default())
    }

    pub fn with_forms(bundles: LoadedBundles, gdpr: GdprForm, agreement: AgreementForm) -> Self {
        Self {
            bundles,
            active: None,
            gdpr,
            agreement,
            default_locale: DEFAULT_LOCALE.to_string(),
        }
    }

    /// Date locale used when a document declares none or an invalid one
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    pub fn bundles(&self) -> &LoadedBundles {
        &self.bundles
    }

    pub fn active(&self) -> Option<&LanguageContext> {
        self.active.as_ref()
    }

    pub fn gdpr_form(&self) -> &GdprForm {
        &self.gdpr
    }

    pub fn agreement_form(&self) -> &AgreementForm {
        &self.agreement
    }

    pub fn language_options(&self) -> Vec<LanguageOption> {
        self.bundles.language_options()
    }

    /// The language selector is usable only when something loaded
    pub fn selector_enabled(&self) -> bool {
        !self.bundles.is_empty()
    }

    /// Activate the default language, if any loaded
    pub fn activate_default(&mut self) -> Option<Refresh> {
        let code = self.bundles.default_code()?.to_string();
        self.set_language(&code)
    }

    /// Swap the active language. Unknown codes are a no-op and return `None`.
    pub fn set_language(&mut self, code: &str) -> Option<Refresh> {
        let document = self.bundles.get(code)?.clone();
        let context = LanguageContext::new(code, document, &self.default_locale);
        debug!("Switching language to {}", code);

        let request_types = request_type_options(context.document(), &self.gdpr.request_type);
        if let Some(list) = &request_types {
            self.gdpr.request_type = list.selected.clone();
        }
        let agreement_types =
            agreement_type_options(context.document(), &self.agreement.agreement_type);
        if let Some(list) = &agreement_types {
            self.agreement.agreement_type = list.selected.clone();
        }

        let page_title = context.page_title().map(str::to_string);
        self.active = Some(context);

        Some(Refresh {
            code: code.to_string(),
            page_title,
            request_types,
            agreement_types,
            gdpr: self.render_gdpr(),
            withdrawal: self.render_withdrawal(),
        })
    }

    /// Apply a request-form edit. Returns the re-rendered letter, or `None`
    /// when `name` is not a request-form field.
    pub fn update_gdpr_field(&mut self, name: &str, value: &str) -> Option<String> {
        self.gdpr
            .set_field(name, value)
            .then(|| self.render_gdpr())
    }

    /// Apply an agreement-form edit. Returns the re-rendered notice, or `None`
    /// when `name` is not an agreement-form field.
    pub fn update_agreement_field(&mut self, name: &str, value: &str) -> Option<String> {
        self.agreement
            .set_field(name, value)
            .then(|| self.render_withdrawal())
    }

    pub fn render_gdpr(&self) -> String {
        render_gdpr(&self.gdpr, self.active.as_ref())
    }

    pub fn render_withdrawal(&self) -> String {
        render_withdrawal(&self.agreement, self.active.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::ManifestEntry;
    use crate::document::TranslationDocument;
    use serde_json::json;

    fn bundles() -> LoadedBundles {
        LoadedBundles::from_documents([
            (
                ManifestEntry::new("nb", "nb.json"),
                TranslationDocument::new(json!({
                    "dateLocale": "nb-NO",
                    "app": { "pageTitle": "Brev" },
                    "gdpr": {
                        "form": { "requestType": { "options": [
                            { "value": "information", "label": "Innsyn" }
                        ] } },
                        "templates": { "information": { "signoff": "Hilsen" } }
                    },
                    "angrerett": { "templates": { "service": "Til {{company}}, {{today}}" } }
                })),
            ),
            (
                ManifestEntry::new("en", "en.json"),
                TranslationDocument::new(json!({
                    "dateLocale": "en-GB",
                    "gdpr": { "templates": { "information": { "signoff": "Regards" }, "erasure": {} } },
                    "angrerett": { "templates": { "service": "To {{company}}, {{today}}" } }
                })),
            ),
        ])
    }

    fn controller() -> LetterController {
        LetterController::with_forms(
            bundles(),
            GdprForm::new("2024-01-15"),
            AgreementForm::new("2024-01-15"),
        )
    }

    #[test]
    fn test_nothing_renders_before_activation() {
        let controller = controller();
        assert!(controller.active().is_none());
        assert_eq!(controller.render_gdpr(), "");
        assert_eq!(controller.render_withdrawal(), "");
    }

    #[test]
    fn test_activate_default_uses_manifest_order() {
        let mut controller = controller();
        let refresh = controller.activate_default().unwrap();
        assert_eq!(refresh.code, "nb");
        assert_eq!(refresh.page_title.as_deref(), Some("Brev"));
        assert_eq!(refresh.withdrawal, "Til [Company], 15.01.2024");
        assert!(refresh.gdpr.ends_with("Hilsen\n[Name]"));
    }

    #[test]
    fn test_unknown_language_is_noop() {
        let mut controller = controller();
        controller.set_language("en").unwrap();
        let before = controller.render_gdpr();
        assert!(controller.set_language("sv").is_none());
        assert_eq!(controller.active().unwrap().code(), "en");
        assert_eq!(controller.render_gdpr(), before);
    }

    #[test]
    fn test_switching_is_idempotent() {
        let mut controller = controller();
        controller.update_gdpr_field("controllerName", "Acme AS");
        let first = controller.set_language("en").unwrap();
        let second = controller.set_language("en").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_option_rebuild_adopts_selection() {
        let mut controller = controller();
        controller.set_language("en").unwrap();
        controller.update_gdpr_field("requestType", "erasure");
        assert_eq!(controller.gdpr_form().request_type, "erasure");

        let refresh = controller.set_language("nb").unwrap();
        assert_eq!(refresh.request_types.unwrap().selected, "information");
        assert_eq!(controller.gdpr_form().request_type, "information");
        assert!(refresh.agreement_types.is_none());
        assert_eq!(controller.agreement_form().agreement_type, "service");
    }

    #[test]
    fn test_field_updates_rerender_only_their_letter() {
        let mut controller = controller();
        controller.activate_default();
        let text = controller.update_agreement_field("companyName", "Acme AS").unwrap();
        assert_eq!(text, "Til Acme AS, 15.01.2024");
        assert_eq!(controller.update_agreement_field("controllerName", "x"), None);
        assert_eq!(controller.update_gdpr_field("companyName", "x"), None);
    }

    #[test]
    fn test_empty_bundles_disable_selector() {
        let mut controller = LetterController::new(LoadedBundles::default());
        assert!(!controller.selector_enabled());
        assert!(controller.activate_default().is_none());
    }
}

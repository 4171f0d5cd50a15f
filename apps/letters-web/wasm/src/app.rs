//! Stateful app session
//!
//! Wraps the core [`LetterController`] in shared ownership so DOM event
//! closures and the JS-facing methods see the same state.

use crate::clipboard;
use crate::copy_feedback::{restore_label, CopyFeedback, CopyOutcome};
use crate::dom;
use crate::fetch::{js_error_message, HttpBundleSource};
use letter_core::context::UiMessages;
use letter_core::locale::today_iso;
use letter_core::{BundleLoader, LetterController, LocalizationConfig, Refresh};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, Element, HtmlButtonElement};

type SharedController = Rc<RefCell<LetterController>>;

/// Language entry handed to JavaScript
#[derive(Debug, Serialize)]
struct LanguageEntry {
    code: String,
    label: String,
}

#[wasm_bindgen]
pub struct LetterApp {
    controller: SharedController,
    document: Document,
}

impl LetterApp {
    pub(crate) async fn start(config: LocalizationConfig) -> Result<LetterApp, JsValue> {
        console::log_1(&"Starting letter generator".into());
        let document = dom::document()?;

        dom::setup_tabs(&document)?;
        dom::set_default_dates(&document, &today_iso())?;

        let source = HttpBundleSource::new();
        let bundles = BundleLoader::new(&source, &config).load().await;
        for failure in bundles.failures() {
            console::error_1(&failure.to_string().into());
        }

        let controller = LetterController::new(bundles).with_default_locale(&config.default_locale);
        let app = LetterApp {
            controller: Rc::new(RefCell::new(controller)),
            document,
        };

        dom::populate_language_select(&app.document, &app.controller.borrow().language_options())?;
        let refresh = app.controller.borrow_mut().activate_default();
        if let Some(refresh) = refresh {
            app.apply_refresh(&refresh)?;
        }

        app.wire_language_select()?;
        app.wire_forms()?;
        app.wire_copy_buttons()?;
        Ok(app)
    }

    fn apply_refresh(&self, refresh: &Refresh) -> Result<(), JsValue> {
        apply_refresh(&self.document, &self.controller, refresh)
    }

    fn wire_language_select(&self) -> Result<(), JsValue> {
        let Some(select) = self.document.get_element_by_id(dom::LANGUAGE_SELECT_ID) else {
            return Ok(());
        };
        let controller = self.controller.clone();
        let document = self.document.clone();
        let onchange = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            let Some(code) = event
                .target()
                .and_then(|target| target.dyn_into::<web_sys::HtmlSelectElement>().ok())
                .map(|select| select.value())
            else {
                return;
            };
            let refresh = controller.borrow_mut().set_language(&code);
            if let Some(refresh) = refresh {
                if let Err(e) = apply_refresh(&document, &controller, &refresh) {
                    console::error_1(&e);
                }
            }
        });
        select.add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())?;
        onchange.forget();
        Ok(())
    }

    fn wire_forms(&self) -> Result<(), JsValue> {
        if let Some(form) = self.document.query_selector(dom::GDPR_FORM_SELECTOR)? {
            self.wire_form(&form, |controller, name, value| {
                controller
                    .update_gdpr_field(name, value)
                    .map(|text| (dom::GDPR_PREVIEW_ID, text))
            })?;
        }
        if let Some(form) = self.document.query_selector(dom::WITHDRAWAL_FORM_SELECTOR)? {
            self.wire_form(&form, |controller, name, value| {
                controller
                    .update_agreement_field(name, value)
                    .map(|text| (dom::WITHDRAWAL_PREVIEW_ID, text))
            })?;
        }
        Ok(())
    }

    /// Listen for `input` and `change` on `form`; `update` applies the edit
    /// and returns the preview to refresh.
    fn wire_form<F>(&self, form: &Element, update: F) -> Result<(), JsValue>
    where
        F: Fn(&mut LetterController, &str, &str) -> Option<(&'static str, String)> + 'static,
    {
        let controller = self.controller.clone();
        let document = self.document.clone();
        let handler = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            let Some((name, value)) = dom::event_field(&event) else {
                return;
            };
            let updated = update(&mut *controller.borrow_mut(), &name, &value);
            if let Some((preview, text)) = updated {
                dom::write_preview(&document, preview, &text);
            }
        });
        form.add_event_listener_with_callback("input", handler.as_ref().unchecked_ref())?;
        form.add_event_listener_with_callback("change", handler.as_ref().unchecked_ref())?;
        handler.forget();
        Ok(())
    }

    fn wire_copy_buttons(&self) -> Result<(), JsValue> {
        for button in dom::elements(&self.document, dom::COPY_BUTTON_SELECTOR)? {
            let controller = self.controller.clone();
            let document = self.document.clone();
            let clicked = button.clone();
            let onclick = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
                let messages = controller
                    .borrow()
                    .active()
                    .map(|language| language.messages().clone())
                    .unwrap_or_default();
                copy_from_button(&document, &clicked, messages);
            });
            button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
            onclick.forget();
        }
        Ok(())
    }
}

#[wasm_bindgen]
impl LetterApp {
    /// Loaded languages in selector order, as `[{ code, label }]`
    pub fn languages(&self) -> Result<JsValue, JsValue> {
        let entries: Vec<LanguageEntry> = self
            .controller
            .borrow()
            .language_options()
            .into_iter()
            .map(|option| LanguageEntry {
                code: option.code,
                label: option.label,
            })
            .collect();
        serde_wasm_bindgen::to_value(&entries)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Code of the active language, if any loaded
    #[wasm_bindgen(js_name = activeLanguage)]
    pub fn active_language(&self) -> Option<String> {
        self.controller
            .borrow()
            .active()
            .map(|language| language.code().to_string())
    }

    /// Switch language and refresh the page. Returns `false` for unknown codes.
    #[wasm_bindgen(js_name = setLanguage)]
    pub fn set_language(&self, code: &str) -> Result<bool, JsValue> {
        let refresh = self.controller.borrow_mut().set_language(code);
        match refresh {
            Some(refresh) => {
                self.apply_refresh(&refresh)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Set a request-form field. Returns `false` for unknown field names.
    #[wasm_bindgen(js_name = updateGdprField)]
    pub fn update_gdpr_field(&self, name: &str, value: &str) -> bool {
        let text = self.controller.borrow_mut().update_gdpr_field(name, value);
        text.map(|text| dom::write_preview(&self.document, dom::GDPR_PREVIEW_ID, &text))
            .is_some()
    }

    /// Set an agreement-form field. Returns `false` for unknown field names.
    #[wasm_bindgen(js_name = updateAgreementField)]
    pub fn update_agreement_field(&self, name: &str, value: &str) -> bool {
        let text = self
            .controller
            .borrow_mut()
            .update_agreement_field(name, value);
        text.map(|text| dom::write_preview(&self.document, dom::WITHDRAWAL_PREVIEW_ID, &text))
            .is_some()
    }

    #[wasm_bindgen(js_name = gdprText)]
    pub fn gdpr_text(&self) -> String {
        self.controller.borrow().render_gdpr()
    }

    #[wasm_bindgen(js_name = withdrawalText)]
    pub fn withdrawal_text(&self) -> String {
        self.controller.borrow().render_withdrawal()
    }
}

/// Push a language switch to the page: selector, `lang`, bindings, type
/// selectors and both previews
fn apply_refresh(
    document: &Document,
    controller: &SharedController,
    refresh: &Refresh,
) -> Result<(), JsValue> {
    dom::select_language(document, &refresh.code);
    dom::set_page_language(document, &refresh.code)?;

    if let Some(language) = controller.borrow().active() {
        dom::apply_bindings(document, language.document())?;
    }
    if let Some(list) = &refresh.request_types {
        dom::rebuild_select(document, dom::REQUEST_TYPE_SELECT_ID, list)?;
    }
    if let Some(list) = &refresh.agreement_types {
        dom::rebuild_select(document, dom::AGREEMENT_TYPE_SELECT_ID, list)?;
    }

    dom::write_preview(document, dom::GDPR_PREVIEW_ID, &refresh.gdpr);
    dom::write_preview(document, dom::WITHDRAWAL_PREVIEW_ID, &refresh.withdrawal);
    Ok(())
}

/// Copy the button's `data-copy-target` text and show feedback on the button
fn copy_from_button(document: &Document, button: &Element, messages: UiMessages) {
    let Some(target) = button
        .get_attribute("data-copy-target")
        .and_then(|id| document.get_element_by_id(&id))
    else {
        return;
    };
    let text = target.text_content().unwrap_or_default();

    let original = restore_label(
        button.get_attribute(dom::ORIGINAL_LABEL_ATTRIBUTE),
        button.text_content(),
    );
    if button.get_attribute(dom::ORIGINAL_LABEL_ATTRIBUTE).is_none() {
        dom::log_failure(button.set_attribute(dom::ORIGINAL_LABEL_ATTRIBUTE, &original));
    }

    let button = button.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = match clipboard::write_text(&text).await {
            Ok(()) => CopyOutcome::Copied,
            Err(e) => {
                console::error_2(
                    &messages.copy_log_error.as_str().into(),
                    &js_error_message(&e).into(),
                );
                CopyOutcome::Failed
            }
        };
        let feedback = CopyFeedback::for_outcome(outcome, &messages);
        show_feedback(&button, &feedback, original);
    });
}

fn show_feedback(button: &Element, feedback: &CopyFeedback, original: String) {
    button.set_text_content(Some(&feedback.label));
    if feedback.disable {
        set_disabled(button, true);
    }

    let button = button.clone();
    let reenable = feedback.disable;
    let reset = Closure::once_into_js(move || {
        button.set_text_content(Some(&original));
        if reenable {
            set_disabled(&button, false);
        }
    });
    match web_sys::window() {
        Some(window) => {
            dom::log_failure(window.set_timeout_with_callback_and_timeout_and_arguments_0(
                reset.unchecked_ref(),
                feedback.reset_after_ms,
            ));
        }
        None => console::error_1(&"No window to schedule copy-button reset".into()),
    }
}

fn set_disabled(button: &Element, disabled: bool) {
    if let Some(button) = button.dyn_ref::<HtmlButtonElement>() {
        button.set_disabled(disabled);
    }
}

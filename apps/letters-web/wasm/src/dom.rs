//! DOM glue: bindings, selectors, previews, tabs and default dates

use letter_core::binder::{resolve_binding, BindingMode, BoundValue, OptionList};
use letter_core::{LanguageOption, TranslationDocument};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, HtmlOptionElement, HtmlSelectElement};

pub const GDPR_PREVIEW_ID: &str = "gdpr-preview";
pub const WITHDRAWAL_PREVIEW_ID: &str = "angrerett-preview";
pub const LANGUAGE_SELECT_ID: &str = "language-select";
pub const REQUEST_TYPE_SELECT_ID: &str = "gdpr-request-type";
pub const AGREEMENT_TYPE_SELECT_ID: &str = "angrerett-type";
pub const GDPR_FORM_SELECTOR: &str = "#gdpr .input-form";
pub const WITHDRAWAL_FORM_SELECTOR: &str = "#angrerett .input-form";
pub const COPY_BUTTON_SELECTOR: &str = ".copy-button";
pub const ORIGINAL_LABEL_ATTRIBUTE: &str = "data-original-label";

/// Log a failed DOM call to the console, keeping the success value
pub fn log_failure<T>(result: Result<T, JsValue>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            web_sys::console::error_1(&e);
            None
        }
    }
}

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .ok_or("No window")?
        .document()
        .ok_or_else(|| JsValue::from_str("No document"))
}

/// Every element matching `selector`
pub fn elements(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn select_by_id(document: &Document, id: &str) -> Option<HtmlSelectElement> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlSelectElement>().ok())
}

/// Apply every tagged element's binding from `translation`
pub fn apply_bindings(document: &Document, translation: &TranslationDocument) -> Result<(), JsValue> {
    for mode in BindingMode::ALL {
        let attribute = mode.attribute();
        for element in elements(document, &format!("[{}]", attribute))? {
            let Some(key) = element.get_attribute(attribute) else {
                continue;
            };
            if let Some(value) = resolve_binding(translation, mode, &key) {
                apply_bound_value(document, &element, mode, value)?;
            }
        }
    }

    if let Some(title) = translation.text("app.pageTitle") {
        document.set_title(title);
    }
    Ok(())
}

fn apply_bound_value(
    document: &Document,
    element: &Element,
    mode: BindingMode,
    value: BoundValue,
) -> Result<(), JsValue> {
    match (mode, value) {
        (BindingMode::Text, BoundValue::Text(text)) => element.set_text_content(Some(&text)),
        (BindingMode::AriaLabel, BoundValue::Text(text)) => {
            element.set_attribute("aria-label", &text)?
        }
        (BindingMode::Placeholder, BoundValue::Text(text)) => {
            element.set_attribute("placeholder", &text)?
        }
        (BindingMode::CopyLabel, BoundValue::Text(text)) => {
            element.set_text_content(Some(&text));
            element.set_attribute(ORIGINAL_LABEL_ATTRIBUTE, &text)?;
        }
        (BindingMode::List, BoundValue::Items(items)) => {
            element.set_inner_html("");
            for item in items {
                let li = document.create_element("li")?;
                li.set_text_content(Some(&item));
                element.append_child(&li)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Mark the page language on `<html lang>`
pub fn set_page_language(document: &Document, code: &str) -> Result<(), JsValue> {
    if let Some(root) = document.document_element() {
        root.set_attribute("lang", code)?;
    }
    Ok(())
}

/// Rebuild the language selector. Disabled when nothing loaded.
pub fn populate_language_select(
    document: &Document,
    options: &[LanguageOption],
) -> Result<(), JsValue> {
    let Some(select) = select_by_id(document, LANGUAGE_SELECT_ID) else {
        return Ok(());
    };
    select.set_inner_html("");
    for option in options {
        let element = HtmlOptionElement::new_with_text_and_value(&option.label, &option.code)?;
        select.append_child(&element)?;
    }
    select.set_disabled(options.is_empty());
    Ok(())
}

pub fn select_language(document: &Document, code: &str) {
    if let Some(select) = select_by_id(document, LANGUAGE_SELECT_ID) {
        if select.value() != code {
            select.set_value(code);
        }
    }
}

/// Replace a type selector's options and selection
pub fn rebuild_select(document: &Document, id: &str, list: &OptionList) -> Result<(), JsValue> {
    let Some(select) = select_by_id(document, id) else {
        return Ok(());
    };
    select.set_inner_html("");
    for option in &list.options {
        let element = HtmlOptionElement::new_with_text_and_value(&option.label, &option.value)?;
        select.append_child(&element)?;
    }
    select.set_value(&list.selected);
    Ok(())
}

pub fn write_preview(document: &Document, id: &str, text: &str) {
    if let Some(preview) = document.get_element_by_id(id) {
        preview.set_text_content(Some(text));
    }
}

/// Fill empty `data-default-today="true"` date inputs with `today`
pub fn set_default_dates(document: &Document, today: &str) -> Result<(), JsValue> {
    for element in elements(document, "input[type='date']")? {
        let Ok(input) = element.dyn_into::<HtmlInputElement>() else {
            continue;
        };
        if input.get_attribute("data-default-today").as_deref() == Some("true")
            && input.value().is_empty()
        {
            input.set_value(today);
        }
    }
    Ok(())
}

/// Tab buttons toggle the `active` class on themselves and on the panel
/// whose id matches their `data-template`
pub fn setup_tabs(document: &Document) -> Result<(), JsValue> {
    let buttons = elements(document, ".tab-button")?;
    let panels = elements(document, ".template-panel")?;

    for button in &buttons {
        let clicked = button.clone();
        let buttons = buttons.clone();
        let panels = panels.clone();
        let onclick = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            let template = clicked.get_attribute("data-template").unwrap_or_default();
            for other in &buttons {
                log_failure(
                    other
                        .class_list()
                        .toggle_with_force("active", other == &clicked),
                );
            }
            for panel in &panels {
                log_failure(
                    panel
                        .class_list()
                        .toggle_with_force("active", panel.id() == template),
                );
            }
        });
        button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }
    Ok(())
}

/// `(name, value)` of the form control an event came from
pub fn event_field(event: &web_sys::Event) -> Option<(String, String)> {
    let target = event.target()?;
    let (name, value) = if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        (input.name(), input.value())
    } else if let Some(select) = target.dyn_ref::<HtmlSelectElement>() {
        (select.name(), select.value())
    } else if let Some(textarea) = target.dyn_ref::<web_sys::HtmlTextAreaElement>() {
        (textarea.name(), textarea.value())
    } else {
        return None;
    };
    (!name.is_empty()).then_some((name, value))
}

// Browser-only: needs a JS runtime
#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_log_failure_keeps_success_value() {
        assert_eq!(log_failure::<i32>(Ok(7)), Some(7));
    }

    #[wasm_bindgen_test]
    fn test_log_failure_swallows_error() {
        assert_eq!(log_failure::<i32>(Err(JsValue::from_str("timer refused"))), None);
    }

    #[wasm_bindgen_test]
    fn test_tab_click_toggles_active_panel() {
        let document = document().unwrap();
        let body = document.body().unwrap();
        body.set_inner_html(
            r#"<button class="tab-button" data-template="one"></button>
               <button class="tab-button" data-template="two"></button>
               <section class="template-panel" id="one"></section>
               <section class="template-panel" id="two"></section>"#,
        );
        setup_tabs(&document).unwrap();

        let buttons = elements(&document, ".tab-button").unwrap();
        buttons[1]
            .dyn_ref::<web_sys::HtmlElement>()
            .unwrap()
            .click();

        let two = document.get_element_by_id("two").unwrap();
        let one = document.get_element_by_id("one").unwrap();
        assert!(two.class_list().contains("active"));
        assert!(!one.class_list().contains("active"));
        assert!(buttons[1].class_list().contains("active"));
    }
}

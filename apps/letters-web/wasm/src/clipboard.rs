//! Clipboard writes with an `execCommand` fallback

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Clipboard, Document, HtmlDocument, HtmlTextAreaElement};

/// Copy `text` to the clipboard. Uses the async Clipboard API when the browser
/// exposes it, else a hidden textarea and `document.execCommand("copy")`.
pub async fn write_text(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("No window")?;

    if let Some(clipboard) = async_clipboard(&window.navigator()) {
        JsFuture::from(clipboard.write_text(text)).await?;
        return Ok(());
    }

    let document = window.document().ok_or("No document")?;
    if fallback_copy(&document, text)? {
        Ok(())
    } else {
        Err(JsValue::from_str("clipboard-unavailable"))
    }
}

fn async_clipboard(navigator: &web_sys::Navigator) -> Option<Clipboard> {
    let clipboard = Reflect::get(navigator, &"clipboard".into()).ok()?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return None;
    }
    let write_text = Reflect::get(&clipboard, &"writeText".into()).ok()?;
    write_text
        .is_function()
        .then(|| clipboard.unchecked_into::<Clipboard>())
}

/// Copy through an off-screen textarea, restoring the user's selection after
fn fallback_copy(document: &Document, text: &str) -> Result<bool, JsValue> {
    let body = document.body().ok_or("No body")?;
    let textarea: HtmlTextAreaElement = document.create_element("textarea")?.dyn_into()?;
    textarea.set_value(text);
    textarea.set_attribute("readonly", "")?;
    let style = textarea.style();
    style.set_property("position", "fixed")?;
    style.set_property("top", "-9999px")?;
    body.append_child(&textarea)?;

    let selection = document.get_selection()?;
    let previous_range = match &selection {
        Some(selection) if selection.range_count() > 0 => selection.get_range_at(0).ok(),
        _ => None,
    };

    textarea.select();
    let copied = document
        .dyn_ref::<HtmlDocument>()
        .and_then(|html| html.exec_command("copy").ok())
        .unwrap_or(false);

    body.remove_child(&textarea)?;

    if let (Some(selection), Some(range)) = (selection, previous_range) {
        selection.remove_all_ranges()?;
        selection.add_range(&range)?;
    }

    Ok(copied)
}

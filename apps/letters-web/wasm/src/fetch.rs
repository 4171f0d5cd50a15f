//! HTTP bundle source backed by `window.fetch`

use async_trait::async_trait;
use letter_core::{BundleSource, LetterError};
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCache, RequestInit, Response};

/// Fetches translation files relative to the page, bypassing the HTTP cache
#[derive(Debug, Clone, Default)]
pub struct HttpBundleSource;

impl HttpBundleSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl BundleSource for HttpBundleSource {
    async fn fetch_json(&self, path: &str) -> Result<Value, LetterError> {
        let body = fetch_text(path)
            .await
            .map_err(|e| LetterError::fetch(path, js_error_message(&e)))?;
        Ok(serde_json::from_str(&body)?)
    }
}

async fn fetch_text(path: &str) -> Result<String, JsValue> {
    let window = web_sys::window().ok_or("No window")?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_cache(RequestCache::NoCache);
    let request = Request::new_with_str_and_init(path, &opts)?;

    let response = JsFuture::from(window.fetch_with_request(&request)).await?;
    let response: Response = response.dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", response.status())));
    }

    let body = JsFuture::from(response.text()?).await?;
    body.as_string()
        .ok_or_else(|| JsValue::from_str("Response body is not text"))
}

/// Readable message for a thrown JS value
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(message) = value.as_string() {
        return message;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{:?}", value)
}

// Browser-only: needs a JS runtime
#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_error_message_from_string() {
        assert_eq!(js_error_message(&JsValue::from_str("HTTP 404")), "HTTP 404");
    }

    #[wasm_bindgen_test]
    fn test_error_message_from_js_error() {
        let error: JsValue = js_sys::Error::new("Failed to fetch").into();
        assert_eq!(js_error_message(&error), "Failed to fetch");
    }
}

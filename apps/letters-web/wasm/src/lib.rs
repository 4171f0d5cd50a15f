//! WASM front end for the letter generator
//!
//! All letter state lives in Rust inside [`LetterApp`]. JavaScript only has to
//! load the module and call [`start`]; form events, tab switching, the
//! language selector and the copy buttons are wired from here.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { start } from './pkg/letters_wasm.js';
//!
//! await init();
//! const app = await start({ base_path: "translations" });
//! app.setLanguage("en");
//! console.log(app.gdprText());
//! ```

pub mod app;
pub mod clipboard;
pub mod copy_feedback;
pub mod dom;
pub mod fetch;

use letter_core::LocalizationConfig;
use wasm_bindgen::prelude::*;

pub use app::LetterApp;
pub use copy_feedback::{CopyFeedback, CopyOutcome};
pub use fetch::HttpBundleSource;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Load translations, bind the page and render both letters.
///
/// `config` is an optional object with the `LocalizationConfig` fields;
/// `undefined` or `null` uses the defaults.
#[wasm_bindgen]
pub async fn start(config: JsValue) -> Result<LetterApp, JsValue> {
    let config: LocalizationConfig = if config.is_undefined() || config.is_null() {
        LocalizationConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
    };
    LetterApp::start(config).await
}

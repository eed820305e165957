//! Module startup and reconfiguration from JS

use wasm_bindgen::prelude::*;

use super::frames::{replace_recognizer, with_recognizer};
use crate::config::RecognizerConfig;
use crate::lexicon::SignLexicon;
use crate::pipeline::SignRecognizer;

/// Called automatically when the WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Replace the recognizer using a TOML config (sessions are dropped)
///
/// `lexicon_toml` overrides the built-in sign table when non-empty.
#[wasm_bindgen]
pub fn configure(config_toml: &str, lexicon_toml: &str) -> Result<(), JsValue> {
    let config = RecognizerConfig::from_toml_str(config_toml)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let lexicon = if lexicon_toml.trim().is_empty() {
        SignLexicon::standard()
    } else {
        SignLexicon::from_toml_str(lexicon_toml).map_err(|e| JsValue::from_str(&e.to_string()))?
    };

    let signs = lexicon.len();
    replace_recognizer(SignRecognizer::with_lexicon(config, lexicon));
    web_sys::console::log_1(&format!("✅ Sign recognizer configured ({signs} signs)").into());
    Ok(())
}

/// Health report as JSON
#[wasm_bindgen]
pub fn health() -> String {
    with_recognizer(|recognizer| serde_json::to_string(&recognizer.health()).unwrap_or_default())
}

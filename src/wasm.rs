//! WASM bindings for browser-side conversion.

use wasm_bindgen::prelude::*;

use crate::markdown::render_document;
use crate::html_to_doc;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Convert extractor HTML to editor document JSON.
#[wasm_bindgen]
pub fn html_to_editor_json(html: &str) -> Result<String, JsValue> {
    let doc = html_to_doc(html).map_err(|e| JsValue::from_str(&e.to_string()))?;
    doc.to_json().map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert extractor HTML to Markdown.
#[wasm_bindgen]
pub fn html_to_markdown(html: &str) -> Result<String, JsValue> {
    let doc = html_to_doc(html).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(render_document(&doc))
}

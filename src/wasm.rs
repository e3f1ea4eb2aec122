//! Browser entry point.

use wasm_bindgen::prelude::*;

use crate::converters::layout::ConverterBuilder;
use crate::models::document::Document;

/// Converts a JSON document to SVG pages, title page first, with the named page theme.
///
/// Diagnostics are logged, not returned. Errors are reported as their message.
#[wasm_bindgen]
pub fn convert_document_json(json: &str, theme: &str) -> Result<Vec<String>, JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let run = || -> crate::Result<Vec<String>> {
        let document: Document = serde_json::from_str(json)?;
        let converter = ConverterBuilder::new().set_theme(theme).build()?;
        Ok(converter.convert_to_svg(&document)?.pages)
    };
    run().map_err(|err| JsValue::from_str(&err.to_string()))
}

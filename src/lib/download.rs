//! Saves binary API responses (CCB contracts, receipts) as browser downloads.

use super::errors::{AppError, js_error_message};
use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Offers `bytes` to the user as a PDF named `file_name`.
pub fn save_pdf(bytes: &[u8], file_name: &str) -> Result<(), AppError> {
    let storage_error = |err: wasm_bindgen::JsValue| AppError::Storage(js_error_message(&err));

    let parts = Array::new();
    parts.push(&Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type("application/pdf");
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(storage_error)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(storage_error)?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| AppError::Storage("document is not available".to_string()))?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(storage_error)?
        .dyn_into()
        .map_err(|_| AppError::Storage("failed to create download link".to_string()))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    if let Some(body) = document.body() {
        body.append_child(&anchor).map_err(storage_error)?;
        anchor.click();
        anchor.remove();
    }
    Url::revoke_object_url(&url).map_err(storage_error)?;
    Ok(())
}

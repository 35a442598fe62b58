use thiserror::Error;

/// Errors surfaced by the client core. Request failures carry a single,
/// already-resolved message so pages can show it as-is.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("User is not authenticated.")]
    Unauthenticated,
    #[error("{0}")]
    Network(String),
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    #[error("Identity provider error: {0}")]
    Identity(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// HTTP status of the failed response, when the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the server rejected the request with 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Best-effort text for a JavaScript exception or rejection value.
#[cfg(target_arch = "wasm32")]
pub(crate) fn js_error_message(value: &wasm_bindgen::JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &wasm_bindgen::JsValue::from_str("message"))
                .ok()
                .and_then(|message| message.as_string())
        })
        .or_else(|| {
            js_sys::JSON::stringify(value)
                .ok()
                .and_then(|text| text.as_string())
        })
        .unwrap_or_else(|| "unknown JavaScript error".to_string())
}

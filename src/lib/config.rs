//! Build-time configuration for the backend API and the identity provider with
//! an optional runtime override. The runtime config is read from
//! `window.CREDIFLOW_CONFIG` (if present) so static deployments can change
//! endpoints without rebuilding. Configuration values are public; do not store
//! secrets here.

const DEFAULT_API_BASE_URL: &str = "http://localhost:8082";
const DEFAULT_IDENTITY_URL: &str = "http://localhost:8080";
const DEFAULT_IDENTITY_REALM: &str = "crediflow";
const DEFAULT_IDENTITY_CLIENT_ID: &str = "frontend";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Frontend configuration derived from build-time environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub identity_url: String,
    pub identity_realm: String,
    pub identity_client_id: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            identity_url: DEFAULT_IDENTITY_URL.to_string(),
            identity_realm: DEFAULT_IDENTITY_REALM.to_string(),
            identity_client_id: DEFAULT_IDENTITY_CLIENT_ID.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::from_build_env();

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config
    }

    fn from_build_env() -> Self {
        let defaults = Self::default();
        let pick = |value: Option<&'static str>, fallback: String| {
            value
                .and_then(normalize_runtime_value)
                .unwrap_or(fallback)
        };

        Self {
            api_base_url: pick(option_env!("CREDIFLOW_API_BASE_URL"), defaults.api_base_url),
            identity_url: pick(option_env!("CREDIFLOW_IDENTITY_URL"), defaults.identity_url),
            identity_realm: pick(
                option_env!("CREDIFLOW_IDENTITY_REALM"),
                defaults.identity_realm,
            ),
            identity_client_id: pick(
                option_env!("CREDIFLOW_IDENTITY_CLIENT_ID"),
                defaults.identity_client_id,
            ),
            log_level: pick(option_env!("CREDIFLOW_LOG_LEVEL"), defaults.log_level),
        }
    }
}

#[derive(Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    identity_url: Option<String>,
    identity_realm: Option<String>,
    identity_client_id: Option<String>,
    log_level: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.identity_url {
        config.identity_url = value;
    }
    if let Some(value) = runtime.identity_realm {
        config.identity_realm = value;
    }
    if let Some(value) = runtime.identity_client_id {
        config.identity_client_id = value;
    }
    if let Some(value) = runtime.log_level {
        config.log_level = value;
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("CREDIFLOW_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        api_base_url: read_runtime_value(&object, "api_base_url"),
        identity_url: read_runtime_value(&object, "identity_url"),
        identity_realm: read_runtime_value(&object, "identity_realm"),
        identity_client_id: read_runtime_value(&object, "identity_client_id"),
        log_level: read_runtime_value(&object, "log_level"),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key))
        .ok()?
        .as_string()?;
    normalize_runtime_value(&value)
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, RuntimeConfig, apply_runtime_overrides, normalize_runtime_value};

    #[test]
    fn normalize_runtime_value_trims_and_rejects_empty() {
        assert_eq!(normalize_runtime_value(""), None);
        assert_eq!(normalize_runtime_value("   "), None);
        assert_eq!(
            normalize_runtime_value("  https://api.crediflow.dev "),
            Some("https://api.crediflow.dev".to_string())
        );
    }

    #[test]
    fn defaults_point_at_local_stack() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8082");
        assert_eq!(config.identity_url, "http://localhost:8080");
        assert_eq!(config.identity_realm, "crediflow");
        assert_eq!(config.identity_client_id, "frontend");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn load_without_runtime_config_has_no_empty_values() {
        let config = AppConfig::load();
        assert!(!config.api_base_url.is_empty());
        assert!(!config.identity_url.is_empty());
        assert!(!config.identity_realm.is_empty());
        assert!(!config.identity_client_id.is_empty());
        assert!(!config.log_level.is_empty());
    }

    #[test]
    fn apply_runtime_overrides_ignores_empty_values() {
        let mut config = AppConfig::default();
        let runtime = RuntimeConfig {
            api_base_url: normalize_runtime_value(""),
            identity_url: normalize_runtime_value("  "),
            identity_realm: normalize_runtime_value(""),
            identity_client_id: normalize_runtime_value("  "),
            log_level: None,
        };

        apply_runtime_overrides(&mut config, runtime);

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn apply_runtime_overrides_overwrites_when_present() {
        let mut config = AppConfig::default();
        let runtime = RuntimeConfig {
            api_base_url: normalize_runtime_value("https://api.override"),
            identity_url: normalize_runtime_value("https://sso.override"),
            identity_realm: normalize_runtime_value("override-realm"),
            identity_client_id: normalize_runtime_value("override-client"),
            log_level: normalize_runtime_value("debug"),
        };

        apply_runtime_overrides(&mut config, runtime);

        assert_eq!(config.api_base_url, "https://api.override");
        assert_eq!(config.identity_url, "https://sso.override");
        assert_eq!(config.identity_realm, "override-realm");
        assert_eq!(config.identity_client_id, "override-client");
        assert_eq!(config.log_level, "debug");
    }
}

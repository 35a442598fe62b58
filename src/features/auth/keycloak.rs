//! `keycloak-js` bindings. The adapter is loaded by `index.html` as a global
//! `Keycloak` class; one instance per page is kept in a thread-local and
//! [`KeycloakIdentity`] is a zero-sized handle to it, so it can live in
//! reactive state.

use crate::{
    app_lib::{
        config::AppConfig,
        errors::{AppError, js_error_message},
    },
    features::auth::{
        claims::identity_profile_from_userinfo,
        identity::{IdentityClient, IdentityProfile, InitOptions},
    },
};
use js_sys::Promise;
use serde_json::{Value, json};
use std::cell::OnceCell;
use tracing::{debug, error};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    #[derive(Clone)]
    type Keycloak;

    #[wasm_bindgen(constructor, catch)]
    fn new(config: &JsValue) -> Result<Keycloak, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn init(this: &Keycloak, options: &JsValue) -> Result<Promise, JsValue>;

    #[wasm_bindgen(method, getter)]
    fn token(this: &Keycloak) -> Option<String>;

    #[wasm_bindgen(method, getter)]
    fn subject(this: &Keycloak) -> Option<String>;

    #[wasm_bindgen(method, catch, js_name = loadUserInfo)]
    fn load_user_info(this: &Keycloak) -> Result<Promise, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn logout(this: &Keycloak, options: &JsValue) -> Result<Promise, JsValue>;
}

thread_local! {
    static INSTANCE: OnceCell<Keycloak> = const { OnceCell::new() };
}

fn instance() -> Result<Keycloak, AppError> {
    INSTANCE
        .with(|cell| cell.get().cloned())
        .ok_or_else(|| AppError::Identity("identity client is not installed".to_string()))
}

fn to_js(value: &Value) -> Result<JsValue, AppError> {
    js_sys::JSON::parse(&value.to_string())
        .map_err(|err| AppError::Serialization(js_error_message(&err)))
}

async fn await_promise(promise: Result<Promise, JsValue>) -> Result<JsValue, AppError> {
    let promise = promise.map_err(|err| AppError::Identity(js_error_message(&err)))?;
    JsFuture::from(promise)
        .await
        .map_err(|err| AppError::Identity(js_error_message(&err)))
}

/// Handle to the page's Keycloak adapter.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeycloakIdentity;

impl KeycloakIdentity {
    /// Creates the adapter for this page. Failures are logged; the session
    /// then ends up not authenticated when init is attempted.
    pub fn install(config: &AppConfig) {
        let options = json!({
            "url": config.identity_url,
            "realm": config.identity_realm,
            "clientId": config.identity_client_id,
        });
        let created = to_js(&options).and_then(|options| {
            Keycloak::new(&options).map_err(|err| AppError::Identity(js_error_message(&err)))
        });
        match created {
            Ok(keycloak) => {
                INSTANCE.with(|cell| {
                    if cell.set(keycloak).is_err() {
                        debug!("identity client already installed");
                    }
                });
            }
            Err(err) => error!(error = %err, "failed to create identity client"),
        }
    }
}

impl IdentityClient for KeycloakIdentity {
    async fn init(&self, options: &InitOptions) -> Result<bool, AppError> {
        let keycloak = instance()?;
        let options = to_js(&json!({
            "onLoad": options.on_load,
            "checkLoginIframe": options.check_login_iframe,
        }))?;
        let authenticated = await_promise(keycloak.init(&options)).await?;
        Ok(authenticated.as_bool().unwrap_or(false))
    }

    fn token(&self) -> Option<String> {
        instance().ok().and_then(|keycloak| keycloak.token())
    }

    async fn load_profile(&self) -> Result<IdentityProfile, AppError> {
        let keycloak = instance()?;
        let info = await_promise(keycloak.load_user_info()).await?;
        let text = js_sys::JSON::stringify(&info)
            .map_err(|err| AppError::Parse(js_error_message(&err)))?
            .as_string()
            .unwrap_or_default();
        let info: Value =
            serde_json::from_str(&text).map_err(|err| AppError::Parse(err.to_string()))?;
        Ok(identity_profile_from_userinfo(
            &info,
            keycloak.subject().as_deref(),
        ))
    }

    async fn logout(&self, redirect_uri: &str) -> Result<(), AppError> {
        let keycloak = instance()?;
        let options = to_js(&json!({ "redirectUri": redirect_uri }))?;
        await_promise(keycloak.logout(&options)).await?;
        Ok(())
    }
}

//! CrediFlow web client.
//!
//! The crate is split into a platform-independent core and a browser layer.
//! The core (`app_lib`, `features`) owns the session state machine, role
//! resolution, the route-guard decision, the authenticated HTTP client and the
//! typed REST clients, and is tested on the host target. The browser layer
//! (`app`, `components`, `routes`) only compiles for `wasm32` and renders the
//! Leptos CSR application on top of the core.

#[path = "lib/mod.rs"]
pub mod app_lib;
pub mod features;

#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(target_arch = "wasm32")]
mod routes;

/// Boots the browser application: panic hook, logging, identity client, mount.
#[cfg(target_arch = "wasm32")]
pub fn start() {
    use leptos::prelude::*;

    console_error_panic_hook::set_once();

    let config = app_lib::config::AppConfig::load();
    app_lib::telemetry::init(&config.log_level);
    tracing::info!(
        commit = app_lib::GIT_COMMIT_HASH,
        api = %config.api_base_url,
        "starting CrediFlow web"
    );

    features::auth::keycloak::KeycloakIdentity::install(&config);
    mount_to_body(move || view! { <app::App config=config.clone() /> });
}

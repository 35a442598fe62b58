//! Session context for the browser. The provider runs the session pipeline
//! once on mount and exposes the session signal to guards and pages. Only
//! non-sensitive metadata lives in the signal; the access token stays inside
//! the identity adapter.

use crate::{
    app_lib::{ApiClient, config::AppConfig, storage::BrowserStore},
    features::{
        auth::{
            keycloak::KeycloakIdentity,
            service::{SessionService, warn_if_roleless},
            session::Session,
        },
        bank_accounts::BankAccount,
    },
};
use leptos::{prelude::*, task::spawn_local};
use tracing::{debug, warn};

/// Session context shared through Leptos.
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub session: RwSignal<Session>,
    config: StoredValue<AppConfig>,
}

impl AuthContext {
    fn new(config: AppConfig) -> Self {
        Self {
            session: RwSignal::new(Session::new(0)),
            config: StoredValue::new(config),
        }
    }

    fn service(&self) -> SessionService<KeycloakIdentity, BrowserStore> {
        SessionService::new(KeycloakIdentity, BrowserStore, self.config.get_value())
    }

    /// API client with the current access token.
    pub fn api(&self) -> ApiClient {
        self.service().api()
    }

    /// Runs fetches until the session is settled or replaced. Completions of
    /// an older generation are dropped by [`Session::apply`].
    pub fn drive(self) {
        spawn_local(async move {
            let service = self.service();
            let generation = self.session.with_untracked(Session::generation);
            loop {
                let Some(fetch) = self.session.with_untracked(|session| {
                    (session.generation() == generation)
                        .then(|| session.next_fetch())
                        .flatten()
                }) else {
                    break;
                };
                let event = service.run(fetch).await;
                let applied = self
                    .session
                    .try_update(|session| *session = session.clone().apply(event));
                if applied.is_none() {
                    debug!("session context disposed; stopping pipeline");
                    return;
                }
            }
            self.session.with_untracked(warn_if_roleless);
        });
    }

    /// Fetches the bank account again, e.g. after a transfer. A failed
    /// refresh keeps the previous value.
    pub fn refresh_bank_account(self) {
        let Some(request) = self.session.with_untracked(Session::bank_account_request) else {
            return;
        };
        spawn_local(async move {
            let event = self.service().fetch_bank_account(request).await;
            let _ = self
                .session
                .try_update(|session| *session = session.clone().apply(event));
        });
    }

    /// Enables or disables a user account at the identity provider.
    pub async fn toggle_user_enabled(&self, user_id: &str, enabled: bool) -> bool {
        self.service().toggle_user_enabled(user_id, enabled).await
    }

    /// Resets the session, wipes local storage and signs out through the
    /// identity provider, which sends the browser back to the app origin.
    /// If the wipe or the sign-out fails the previous session is restored.
    pub fn logout(self) {
        let previous = self.session.get_untracked();
        self.session.set(previous.sign_out());
        spawn_local(async move {
            let origin = window().location().origin().unwrap_or_default();
            if let Err(err) = self.service().logout(&origin).await {
                warn!(error = %err, "logout failed");
                self.session.set(previous);
                // Resume fetches the sign-out interrupted.
                self.drive();
            }
        });
    }
}

/// Provides the session context and starts the pipeline.
#[component]
pub fn AuthProvider(config: AppConfig, children: Children) -> impl IntoView {
    let auth = AuthContext::new(config);
    provide_context(auth);
    auth.drive();

    view! { {children()} }
}

/// Returns the session context, or a detached one outside the provider.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| AuthContext::new(AppConfig::load()))
}

/// Bank account of the signed-in client, if loaded.
pub fn use_bank_account() -> Signal<Option<BankAccount>> {
    let auth = use_auth();
    Signal::derive(move || auth.session.with(|session| session.bank_account().loaded().cloned()))
}

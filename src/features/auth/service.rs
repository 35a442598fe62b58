//! Effectful side of the session: runs the fetches a [`Session`] asks for and
//! turns each outcome into a [`SessionEvent`]. Failures are logged and
//! recorded, never retried.

use crate::{
    app_lib::{ApiClient, AppError, config::AppConfig, storage::LocalStore},
    features::{
        auth::{
            identity::{IdentityClient, IdentityProfile, InitOptions},
            roles::{Role, RoleSet},
            session::{BankAccountRequest, Fetch, ProfileRequest, Session, SessionEvent},
            types::{ProfileKind, UserProfile},
        },
        bank_accounts, companies, customers,
    },
};
use serde_json::json;
use tracing::{debug, error, info, instrument, warn};

/// Owns the identity client, local storage and API configuration.
pub struct SessionService<I, S> {
    identity: I,
    store: S,
    config: AppConfig,
}

impl<I: IdentityClient, S: LocalStore> SessionService<I, S> {
    pub fn new(identity: I, store: S, config: AppConfig) -> Self {
        Self {
            identity,
            store,
            config,
        }
    }

    pub fn identity(&self) -> &I {
        &self.identity
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// API client carrying the identity client's current token.
    pub fn api(&self) -> ApiClient {
        ApiClient::from_config(&self.config, self.identity.token())
    }

    /// Performs one fetch of the pipeline.
    pub async fn run(&self, fetch: Fetch) -> SessionEvent {
        match fetch {
            Fetch::Initialize { generation } => self.initialize(generation).await,
            Fetch::Profile(request) => self.fetch_profile(request).await,
            Fetch::BankAccount(request) => self.fetch_bank_account(request).await,
        }
    }

    /// Drives `session` until nothing is left to fetch.
    pub async fn bootstrap(&self, mut session: Session) -> Session {
        while let Some(fetch) = session.next_fetch() {
            let event = self.run(fetch).await;
            session = session.apply(event);
        }
        warn_if_roleless(&session);
        session
    }

    /// Initializes the identity client with login forced on load.
    #[instrument(skip(self))]
    pub async fn initialize(&self, generation: u64) -> SessionEvent {
        match self.try_initialize().await {
            Ok((authenticated, roles, identity)) => {
                info!(authenticated, "identity client initialized");
                SessionEvent::Initialized {
                    generation,
                    authenticated,
                    roles,
                    identity,
                }
            }
            Err(err) => {
                error!(error = %err, "failed to initialize identity client");
                SessionEvent::InitFailed {
                    generation,
                    reason: err.to_string(),
                }
            }
        }
    }

    async fn try_initialize(&self) -> Result<(bool, RoleSet, Option<IdentityProfile>), AppError> {
        let authenticated = self.identity.init(&InitOptions::login_required()).await?;
        if !authenticated {
            return Ok((false, RoleSet::new(), None));
        }
        let mut profile = self.identity.load_profile().await?;
        if profile.subject.is_none() {
            profile.subject = self.identity.subject();
        }
        Ok((true, self.identity.realm_roles(), Some(profile)))
    }

    /// Loads the customer or company record of the signed-in user.
    #[instrument(skip(self, request), fields(kind = ?request.kind))]
    pub async fn fetch_profile(&self, request: ProfileRequest) -> SessionEvent {
        let api = self.api();
        let result = match request.kind {
            ProfileKind::Customer => customers::client::by_identity(&api, &request.subject)
                .await
                .map(UserProfile::Customer),
            ProfileKind::Company => companies::client::by_identity(&api, &request.subject)
                .await
                .map(UserProfile::Company),
        };
        match result {
            Ok(profile) => {
                debug!(id = profile.id(), "profile loaded");
                SessionEvent::ProfileLoaded {
                    generation: request.generation,
                    profile,
                }
            }
            Err(err) => {
                error!(error = %err, "failed to load user profile");
                SessionEvent::ProfileFailed {
                    generation: request.generation,
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Loads the client's bank account; also used as the refresh action.
    #[instrument(skip(self, request), fields(customer_id = request.customer_id))]
    pub async fn fetch_bank_account(&self, request: BankAccountRequest) -> SessionEvent {
        match bank_accounts::client::by_customer(&self.api(), request.customer_id).await {
            Ok(account) => {
                debug!(account_id = account.id, "bank account loaded");
                SessionEvent::BankAccountLoaded {
                    generation: request.generation,
                    account,
                }
            }
            Err(err) => {
                error!(error = %err, "failed to load bank account");
                SessionEvent::BankAccountFailed {
                    generation: request.generation,
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Enables or disables a managed identity-provider user. Returns whether
    /// the backend accepted the change.
    #[instrument(skip(self))]
    pub async fn toggle_user_enabled(&self, user_id: &str, enabled: bool) -> bool {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            warn!("cannot toggle a user without identity id");
            return false;
        }
        let path = format!("/auth/toggle/{user_id}?enabled={enabled}");
        match self
            .api()
            .put_json_empty(&path, &json!({ "enabled": enabled }))
            .await
        {
            Ok(()) => {
                info!(enabled, "user status changed");
                true
            }
            Err(err) => {
                error!(error = %err, "failed to change user status");
                false
            }
        }
    }

    /// Wipes local storage, checks nothing is left, then hands over to the
    /// identity provider's logout, which reloads the page at `redirect_uri`.
    #[instrument(skip(self))]
    pub async fn logout(&self, redirect_uri: &str) -> Result<(), AppError> {
        self.store.clear_all().await?;
        let remaining = self.store.entry_count();
        if remaining > 0 {
            error!(remaining, "local storage still has entries after wipe");
            return Err(AppError::Storage(format!(
                "{remaining} entries survived the storage wipe"
            )));
        }
        debug!("local storage cleared");
        self.identity.logout(redirect_uri).await
    }
}

/// Why an authenticated session settled without a role-scoped profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileGap {
    /// Neither the client nor the company role is held.
    NoProfileRole,
    /// The token carries no subject to look the profile up by.
    NoSubject,
}

#[must_use]
pub fn profile_gap(session: &Session) -> Option<ProfileGap> {
    if !session.is_authenticated() || session.profile_request().is_some() {
        return None;
    }
    if !session.has_role(Role::Client) && !session.has_role(Role::Company) {
        Some(ProfileGap::NoProfileRole)
    } else if session.subject().is_none() {
        Some(ProfileGap::NoSubject)
    } else {
        None
    }
}

/// Logs why no profile was loaded for an authenticated user.
pub fn warn_if_roleless(session: &Session) {
    match profile_gap(session) {
        Some(ProfileGap::NoProfileRole) => {
            warn!(role = session.role().label(), "authenticated user has no client or company role; no profile loaded");
        }
        Some(ProfileGap::NoSubject) => {
            warn!(role = session.role().label(), "token has no subject; profile not loaded");
        }
        None => {}
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::{ProfileGap, SessionService, profile_gap};
    use crate::{
        app_lib::{AppError, config::AppConfig},
        features::{
            auth::{
                identity::{IdentityProfile, InitOptions},
                remote::RemoteData,
                roles::Role,
                session::{Session, SessionEvent},
                test_support::{MemoryStore, MockIdentity, StubbornStore},
            },
            transactions::TransactionType,
        },
    };
    use anyhow::Result;
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn config(api: &str) -> AppConfig {
        AppConfig {
            api_base_url: api.to_string(),
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn client_session_loads_profile_and_account() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customers/keycloak/kc-42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 42 })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/bank-accounts/by-customer/42"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "id": 7, "balance": 100.50 })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let service = SessionService::new(
            MockIdentity::signed_in(&["client"]),
            MemoryStore::default(),
            config(&server.uri()),
        );
        let session = service.bootstrap(Session::new(0)).await;

        assert!(session.is_ready());
        assert!(session.is_authenticated());
        assert_eq!(session.role(), Role::Client);
        assert_eq!(session.profile().loaded().map(|p| p.id()), Some(42));
        let account = session.bank_account().loaded().unwrap();
        assert_eq!(account.id, 7);
        assert!((account.balance - 100.50).abs() < f64::EPSILON);
        assert_eq!(TransactionType::from("PIX".to_string()).icon(), "swap_horiz");

        let calls = service.identity().init_calls.borrow();
        assert_eq!(calls.as_slice(), &[InitOptions::login_required()]);
        Ok(())
    }

    #[tokio::test]
    async fn company_session_never_fetches_bank_account() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/companies/keycloak/kc-42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 42 })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/bank-accounts/by-customer/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 7 })))
            .expect(0)
            .mount(&server)
            .await;

        let service = SessionService::new(
            MockIdentity::signed_in(&["company"]),
            MemoryStore::default(),
            config(&server.uri()),
        );
        let session = service.bootstrap(Session::new(0)).await;
        assert_eq!(session.role(), Role::Company);
        assert_eq!(session.bank_account(), &RemoteData::NotLoaded);
        Ok(())
    }

    #[tokio::test]
    async fn profile_failure_is_recorded_without_retry() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customers/keycloak/kc-42"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "error": "Customer not found" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let service = SessionService::new(
            MockIdentity::signed_in(&["client"]),
            MemoryStore::default(),
            config(&server.uri()),
        );
        let session = service.bootstrap(Session::new(0)).await;
        assert_eq!(session.profile().error(), Some("Customer not found"));
        assert_eq!(session.bank_account(), &RemoteData::NotLoaded);
        Ok(())
    }

    #[tokio::test]
    async fn init_failure_leaves_ready_unauthenticated_session() {
        let service = SessionService::new(
            MockIdentity::failing_init("adapter crashed"),
            MemoryStore::default(),
            config("http://127.0.0.1:9"),
        );
        let session = service.bootstrap(Session::new(0)).await;
        assert!(session.is_ready());
        assert!(!session.is_authenticated());
        assert!(session.roles().is_empty());
    }

    #[tokio::test]
    async fn userinfo_failure_counts_as_init_failure() {
        let service = SessionService::new(
            MockIdentity::signed_in(&["client"]).failing_profile("userinfo 500"),
            MemoryStore::default(),
            config("http://127.0.0.1:9"),
        );
        let session = service.bootstrap(Session::new(0)).await;
        assert!(session.is_ready());
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn signed_out_user_is_ready_without_roles() {
        let service = SessionService::new(
            MockIdentity::signed_out(),
            MemoryStore::default(),
            config("http://127.0.0.1:9"),
        );
        let session = service.bootstrap(Session::new(0)).await;
        assert!(session.is_ready());
        assert!(!session.is_authenticated());
        assert!(!service.api().has_token());
    }

    #[tokio::test]
    async fn toggle_user_sends_query_and_body() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/auth/toggle/kc-7"))
            .and(query_param("enabled", "false"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({ "enabled": false })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/auth/toggle/kc-8"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let service = SessionService::new(
            MockIdentity::signed_in(&["company"]),
            MemoryStore::default(),
            config(&server.uri()),
        );
        assert!(service.toggle_user_enabled("kc-7", false).await);
        assert!(!service.toggle_user_enabled("kc-8", true).await);
        assert!(!service.toggle_user_enabled("  ", true).await);
        Ok(())
    }

    #[tokio::test]
    async fn logout_wipes_storage_before_redirect() -> Result<()> {
        let store = MemoryStore::with_entries(&[("theme", "dark"), ("draft", "{}")]);
        let identity = MockIdentity::signed_in(&["client"]).observing(store.clone());
        let service = SessionService::new(identity, store, config("http://127.0.0.1:9"));

        service.logout("http://localhost:3000").await?;

        let logouts = service.identity().logouts.borrow();
        assert_eq!(
            logouts.as_slice(),
            &[("http://localhost:3000".to_string(), Some(0))]
        );
        Ok(())
    }

    #[tokio::test]
    async fn logout_stops_when_entries_survive() {
        let service = SessionService::new(
            MockIdentity::signed_in(&["client"]),
            StubbornStore,
            config("http://127.0.0.1:9"),
        );
        let result = service.logout("http://localhost:3000").await;
        assert!(matches!(result, Err(AppError::Storage(_))));
        assert!(service.identity().logouts.borrow().is_empty());
    }

    #[tokio::test]
    async fn logout_waits_for_a_deferred_wipe() -> Result<()> {
        let store = MemoryStore::with_entries(&[("keycloak-session", "1")]).deferred();
        let identity = MockIdentity::signed_in(&["client"]).observing(store.clone());
        let service = SessionService::new(identity, store, config("http://127.0.0.1:9"));

        service.logout("http://localhost:3000").await?;

        let logouts = service.identity().logouts.borrow();
        assert_eq!(
            logouts.as_slice(),
            &[("http://localhost:3000".to_string(), Some(0))]
        );
        Ok(())
    }

    fn authenticated(roles: &[&str], subject: Option<&str>) -> Session {
        Session::new(1).apply(SessionEvent::Initialized {
            generation: 1,
            authenticated: true,
            roles: roles.iter().copied().collect(),
            identity: Some(IdentityProfile {
                subject: subject.map(str::to_string),
                ..IdentityProfile::default()
            }),
        })
    }

    #[test]
    fn missing_subject_is_not_reported_as_missing_role() {
        assert_eq!(
            profile_gap(&authenticated(&["client"], None)),
            Some(ProfileGap::NoSubject)
        );
        assert_eq!(
            profile_gap(&authenticated(&["admin"], Some("kc-1"))),
            Some(ProfileGap::NoProfileRole)
        );
        assert_eq!(profile_gap(&authenticated(&["company"], Some("kc-1"))), None);
        assert_eq!(profile_gap(&Session::new(0)), None);
    }
}

//! Seam between the session and the identity provider. The browser build
//! binds `keycloak-js`; tests use an in-memory double.

use crate::{
    app_lib::AppError,
    features::auth::{claims::decode_claims, roles::RoleSet},
};

/// Options passed to the identity client's init routine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitOptions {
    pub on_load: &'static str,
    pub check_login_iframe: bool,
}

impl InitOptions {
    /// Forces the login screen on load, without the session-status iframe.
    #[must_use]
    pub fn login_required() -> Self {
        Self {
            on_load: "login-required",
            check_login_iframe: false,
        }
    }
}

/// Identity-provider profile of the signed-in user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdentityProfile {
    pub subject: Option<String>,
    pub username: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub tenant_code: Option<String>,
}

impl IdentityProfile {
    /// Name to greet the user with.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.username.as_deref())
            .or(self.email.as_deref())
            .unwrap_or("")
    }
}

/// Operations the session needs from the identity provider.
#[allow(async_fn_in_trait)]
pub trait IdentityClient {
    /// Runs the adapter's init routine and reports whether the user is authenticated.
    async fn init(&self, options: &InitOptions) -> Result<bool, AppError>;

    /// Current access token, if any.
    fn token(&self) -> Option<String>;

    /// Identity-provider user id of the signed-in user.
    fn subject(&self) -> Option<String> {
        self.token()
            .and_then(|token| decode_claims(&token).ok())
            .and_then(|claims| claims.sub)
    }

    /// Realm roles carried by the access token.
    fn realm_roles(&self) -> RoleSet {
        self.token()
            .and_then(|token| decode_claims(&token).ok())
            .map(|claims| claims.realm_roles())
            .unwrap_or_default()
    }

    /// Loads the userinfo document.
    async fn load_profile(&self) -> Result<IdentityProfile, AppError>;

    /// Ends the identity session and navigates to `redirect_uri`.
    async fn logout(&self, redirect_uri: &str) -> Result<(), AppError>;
}

//! Reads identity claims from the access token and the userinfo document.
//! Tokens are decoded only to read claims; signatures are checked by the
//! backend.

use crate::{
    app_lib::AppError,
    features::auth::{identity::IdentityProfile, roles::RoleSet},
};
use base64ct::{Base64UrlUnpadded, Encoding};
use serde::Deserialize;
use serde_json::Value;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct RealmAccess {
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Claims of a Keycloak access token that the client reads.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub preferred_username: Option<String>,
    #[serde(default)]
    pub realm_access: Option<RealmAccess>,
    #[serde(default)]
    pub tenant_code: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    #[must_use]
    pub fn realm_roles(&self) -> RoleSet {
        self.realm_access
            .as_ref()
            .map(|access| access.roles.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// Decodes the payload segment of a JWT.
pub fn decode_claims(token: &str) -> Result<TokenClaims, AppError> {
    let payload = token
        .split('.')
        .nth(1)
        .map(|segment| segment.trim_end_matches('='))
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| AppError::Identity("Malformed access token".to_string()))?;
    let bytes = Base64UrlUnpadded::decode_vec(payload)
        .map_err(|_| AppError::Identity("Access token is not base64url".to_string()))?;
    serde_json::from_slice(&bytes)
        .map_err(|err| AppError::Identity(format!("Invalid token claims: {err}")))
}

/// Builds the identity profile from a userinfo document. The tenant code is
/// read from `attributes.tenant_code[0]`, falling back to a top-level claim.
#[must_use]
pub fn identity_profile_from_userinfo(userinfo: &Value, subject: Option<&str>) -> IdentityProfile {
    let text = |key: &str| {
        userinfo
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let tenant_code = userinfo
        .get("attributes")
        .and_then(|attributes| attributes.get("tenant_code"))
        .and_then(|value| match value {
            Value::Array(values) => values.first().and_then(Value::as_str),
            Value::String(value) => Some(value.as_str()),
            _ => None,
        })
        .map(str::to_string)
        .or_else(|| text("tenant_code"));

    IdentityProfile {
        subject: text("sub").or_else(|| subject.map(str::to_string)),
        username: text("preferred_username"),
        name: text("name"),
        email: text("email"),
        tenant_code,
    }
}

#[cfg(test)]
pub(crate) fn encode_test_token(claims: &Value) -> String {
    let payload = Base64UrlUnpadded::encode_string(claims.to_string().as_bytes());
    format!("eyJhbGciOiJSUzI1NiJ9.{payload}.signature")
}

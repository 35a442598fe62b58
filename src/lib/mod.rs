//! Shared frontend utilities: API access, configuration, errors, storage,
//! logging, formatting, paging and route paths.
//!
//! ## Session bootstrap
//!
//! 1. **Identity:** The Keycloak adapter is initialized with `login-required`,
//!    so an unauthenticated visitor is sent to the identity provider first.
//! 2. **Profile:** Once authenticated, the role-scoped profile is fetched from
//!    `/customers/keycloak/{sub}` (client) or `/companies/keycloak/{sub}` (company).
//! 3. **Account:** Client users then get their bank account from
//!    `/bank-accounts/by-customer/{id}`.
//!
//! Every backend call carries `Authorization: Bearer <token>` through
//! [`api::ApiClient`]. Tokens are never logged.

pub mod api;
#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}
pub mod config;
#[cfg(target_arch = "wasm32")]
pub mod download;
pub mod errors;
pub mod format;
pub mod paging;
pub mod paths;
pub mod storage;
pub mod telemetry;
#[cfg(target_arch = "wasm32")]
pub mod theme;

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub use api::ApiClient;
pub use errors::AppError;
pub use paging::{PageQuery, PagedResult};

//! Auth feature: identity-provider session, role resolution, the route guard
//! decision and the dependent profile/bank-account fetch pipeline.
//!
//! Flow Overview: the provider initializes the identity client once with
//! login forced on load. When the session turns authenticated the role-scoped
//! profile is fetched (customer for clients, company for companies); once a
//! client profile id is known the bank account is fetched. Every completion is
//! an event tagged with the session generation that started it, so results
//! that arrive after a logout or reset are discarded. This module touches
//! security boundaries and must never log tokens.

pub mod claims;
pub mod guards;
pub mod identity;
pub mod remote;
pub mod roles;
pub mod service;
pub mod session;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod keycloak;
#[cfg(target_arch = "wasm32")]
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use guards::{GuardDecision, evaluate};
pub use remote::RemoteData;
pub use roles::{Role, RoleSet, resolve_role};
pub use session::{Session, SessionEvent};

#[cfg(target_arch = "wasm32")]
pub use guards::RequireRole;

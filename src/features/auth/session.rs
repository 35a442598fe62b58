//! Session state machine. The session is a plain value: every change goes
//! through [`Session::apply`], and the fetches it still needs are derived from
//! it with [`Session::next_fetch`]. Events carry the generation that started
//! them; after a reset older events are ignored.

use crate::features::{
    auth::{
        identity::IdentityProfile,
        remote::RemoteData,
        roles::{Role, RoleSet, resolve_role},
        types::{ProfileKind, UserProfile},
    },
    bank_accounts::BankAccount,
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    generation: u64,
    ready: bool,
    authenticated: bool,
    roles: RoleSet,
    role: Role,
    identity: Option<IdentityProfile>,
    profile: RemoteData<UserProfile>,
    bank_account: RemoteData<BankAccount>,
    signing_out: bool,
}

/// Completion of an identity or backend call.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    Initialized {
        generation: u64,
        authenticated: bool,
        roles: RoleSet,
        identity: Option<IdentityProfile>,
    },
    InitFailed {
        generation: u64,
        reason: String,
    },
    ProfileLoaded {
        generation: u64,
        profile: UserProfile,
    },
    ProfileFailed {
        generation: u64,
        reason: String,
    },
    BankAccountLoaded {
        generation: u64,
        account: BankAccount,
    },
    BankAccountFailed {
        generation: u64,
        reason: String,
    },
}

impl SessionEvent {
    #[must_use]
    pub fn generation(&self) -> u64 {
        match self {
            SessionEvent::Initialized { generation, .. }
            | SessionEvent::InitFailed { generation, .. }
            | SessionEvent::ProfileLoaded { generation, .. }
            | SessionEvent::ProfileFailed { generation, .. }
            | SessionEvent::BankAccountLoaded { generation, .. }
            | SessionEvent::BankAccountFailed { generation, .. } => *generation,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileRequest {
    pub generation: u64,
    pub kind: ProfileKind,
    pub subject: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BankAccountRequest {
    pub generation: u64,
    pub customer_id: i64,
}

/// Next call the pipeline has to make.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fetch {
    Initialize { generation: u64 },
    Profile(ProfileRequest),
    BankAccount(BankAccountRequest),
}

impl Session {
    /// A fresh, not yet initialized session.
    #[must_use]
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            ..Self::default()
        }
    }

    /// Fresh session of the next generation; pending completions become no-ops.
    #[must_use]
    pub fn reset(&self) -> Self {
        Self::new(self.generation.wrapping_add(1))
    }

    /// Session left behind by logout: the next generation, never initialized
    /// again, so the identity adapter is not re-entered while it redirects.
    #[must_use]
    pub fn sign_out(&self) -> Self {
        Self {
            signing_out: true,
            ..self.reset()
        }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn is_signing_out(&self) -> bool {
        self.signing_out
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    #[must_use]
    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.has(role)
    }

    #[must_use]
    pub fn identity(&self) -> Option<&IdentityProfile> {
        self.identity.as_ref()
    }

    #[must_use]
    pub fn tenant_code(&self) -> Option<&str> {
        self.identity
            .as_ref()
            .and_then(|identity| identity.tenant_code.as_deref())
    }

    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.identity
            .as_ref()
            .and_then(|identity| identity.subject.as_deref())
            .filter(|subject| !subject.trim().is_empty())
    }

    #[must_use]
    pub fn profile(&self) -> &RemoteData<UserProfile> {
        &self.profile
    }

    #[must_use]
    pub fn bank_account(&self) -> &RemoteData<BankAccount> {
        &self.bank_account
    }

    /// Applies an event from the current generation; anything else is dropped.
    #[must_use]
    pub fn apply(mut self, event: SessionEvent) -> Self {
        if self.signing_out || event.generation() != self.generation {
            return self;
        }

        match event {
            SessionEvent::Initialized {
                authenticated: true,
                roles,
                identity,
                ..
            } => {
                self.ready = true;
                self.authenticated = true;
                self.role = resolve_role(&roles);
                self.roles = roles;
                self.identity = identity;
            }
            SessionEvent::Initialized { .. } | SessionEvent::InitFailed { .. } => {
                self = Self {
                    ready: true,
                    ..Self::new(self.generation)
                };
            }
            SessionEvent::ProfileLoaded { profile, .. } => {
                if self.authenticated {
                    self.profile = RemoteData::Loaded(profile);
                }
            }
            SessionEvent::ProfileFailed { reason, .. } => {
                if self.authenticated {
                    self.profile = RemoteData::Failed(reason);
                }
            }
            SessionEvent::BankAccountLoaded { account, .. } => {
                if self.bank_account_request().is_some() {
                    self.bank_account = RemoteData::Loaded(account);
                }
            }
            SessionEvent::BankAccountFailed { reason, .. } => {
                // A failed refresh keeps the last good value.
                if self.bank_account_request().is_some() && !self.bank_account.is_loaded() {
                    self.bank_account = RemoteData::Failed(reason);
                }
            }
        }
        self
    }

    /// Profile lookup for the signed-in user, when one applies.
    #[must_use]
    pub fn profile_request(&self) -> Option<ProfileRequest> {
        if !self.authenticated {
            return None;
        }
        let kind = ProfileKind::for_roles(self.has_role(Role::Client), self.has_role(Role::Company))?;
        Some(ProfileRequest {
            generation: self.generation,
            kind,
            subject: self.subject()?.to_string(),
        })
    }

    /// Bank-account lookup; only clients with a known customer id have one.
    #[must_use]
    pub fn bank_account_request(&self) -> Option<BankAccountRequest> {
        if !self.authenticated || !self.has_role(Role::Client) {
            return None;
        }
        let customer_id = self.profile.loaded()?.customer()?.id;
        Some(BankAccountRequest {
            generation: self.generation,
            customer_id,
        })
    }

    /// The next call needed to complete the session, `None` once settled.
    #[must_use]
    pub fn next_fetch(&self) -> Option<Fetch> {
        if self.signing_out {
            return None;
        }
        if !self.ready {
            return Some(Fetch::Initialize {
                generation: self.generation,
            });
        }
        if matches!(self.profile, RemoteData::NotLoaded) {
            return self.profile_request().map(Fetch::Profile);
        }
        if matches!(self.bank_account, RemoteData::NotLoaded) {
            return self.bank_account_request().map(Fetch::BankAccount);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{Fetch, Session, SessionEvent};
    use crate::features::{
        auth::{
            identity::IdentityProfile,
            remote::RemoteData,
            roles::{Role, RoleSet},
            types::{ProfileKind, UserProfile},
        },
        bank_accounts::BankAccount,
        companies::Company,
        customers::Customer,
    };

    fn roles(names: &[&str]) -> RoleSet {
        names.iter().copied().collect()
    }

    fn signed_in(names: &[&str]) -> Session {
        Session::new(1).apply(SessionEvent::Initialized {
            generation: 1,
            authenticated: true,
            roles: roles(names),
            identity: Some(IdentityProfile {
                subject: Some("kc-42".to_string()),
                ..IdentityProfile::default()
            }),
        })
    }

    fn customer(id: i64) -> UserProfile {
        UserProfile::Customer(Customer {
            id,
            ..Customer::default()
        })
    }

    fn account(balance: f64) -> BankAccount {
        BankAccount {
            id: 7,
            balance,
            ..BankAccount::default()
        }
    }

    #[test]
    fn new_session_is_not_ready_and_has_no_roles() {
        let session = Session::new(0);
        assert!(!session.is_ready());
        assert!(session.roles().is_empty());
        assert_eq!(session.next_fetch(), Some(Fetch::Initialize { generation: 0 }));
    }

    #[test]
    fn init_failure_marks_ready_but_unauthenticated() {
        let session = Session::new(3).apply(SessionEvent::InitFailed {
            generation: 3,
            reason: "network".to_string(),
        });
        assert!(session.is_ready());
        assert!(!session.is_authenticated());
        assert!(session.roles().is_empty());
        assert_eq!(session.next_fetch(), None);
    }

    #[test]
    fn unauthenticated_init_drops_roles() {
        let session = Session::new(1).apply(SessionEvent::Initialized {
            generation: 1,
            authenticated: false,
            roles: roles(&["admin"]),
            identity: None,
        });
        assert!(session.is_ready());
        assert!(session.roles().is_empty());
        assert_eq!(session.role(), Role::None);
    }

    #[test]
    fn client_pipeline_fetches_customer_then_account() {
        let session = signed_in(&["client"]);
        assert_eq!(session.role(), Role::Client);
        match session.next_fetch() {
            Some(Fetch::Profile(request)) => {
                assert_eq!(request.kind, ProfileKind::Customer);
                assert_eq!(request.subject, "kc-42");
            }
            other => panic!("expected profile fetch, got {other:?}"),
        }

        let session = session.apply(SessionEvent::ProfileLoaded {
            generation: 1,
            profile: customer(42),
        });
        match session.next_fetch() {
            Some(Fetch::BankAccount(request)) => assert_eq!(request.customer_id, 42),
            other => panic!("expected bank account fetch, got {other:?}"),
        }

        let session = session.apply(SessionEvent::BankAccountLoaded {
            generation: 1,
            account: account(100.5),
        });
        assert_eq!(session.bank_account().loaded().map(|a| a.balance), Some(100.5));
        assert_eq!(session.next_fetch(), None);
    }

    #[test]
    fn company_users_load_company_and_never_a_bank_account() {
        let session = signed_in(&["company"]).apply(SessionEvent::ProfileLoaded {
            generation: 1,
            profile: UserProfile::Company(Company {
                id: 42,
                ..Company::default()
            }),
        });
        assert_eq!(session.bank_account_request(), None);
        assert_eq!(session.next_fetch(), None);
    }

    #[test]
    fn bank_account_requires_client_role_even_with_profile_id() {
        let session = signed_in(&["admin"]).apply(SessionEvent::ProfileLoaded {
            generation: 1,
            profile: customer(42),
        });
        assert_eq!(session.bank_account_request(), None);

        let session = session.apply(SessionEvent::BankAccountLoaded {
            generation: 1,
            account: account(10.0),
        });
        assert_eq!(session.bank_account(), &RemoteData::NotLoaded);
    }

    #[test]
    fn roleless_users_fetch_nothing() {
        let session = signed_in(&["offline_access"]);
        assert_eq!(session.role(), Role::None);
        assert_eq!(session.next_fetch(), None);
    }

    #[test]
    fn stale_generation_events_are_ignored() {
        let session = signed_in(&["client"]);
        let reset = session.reset();
        assert_eq!(reset.generation(), 2);

        let after = reset.clone().apply(SessionEvent::ProfileLoaded {
            generation: 1,
            profile: customer(42),
        });
        assert_eq!(after, reset);

        let after = reset.clone().apply(SessionEvent::Initialized {
            generation: 1,
            authenticated: true,
            roles: roles(&["admin"]),
            identity: None,
        });
        assert!(!after.is_ready());
    }

    #[test]
    fn signing_out_never_requests_a_second_init() {
        let session = signed_in(&["client"]);
        let leaving = session.sign_out();
        assert_eq!(leaving.generation(), 2);
        assert!(leaving.is_signing_out());
        assert!(!leaving.is_ready());
        assert_eq!(leaving.next_fetch(), None);

        // A profile fetch still in flight completes after logout started.
        let after = leaving.clone().apply(SessionEvent::ProfileLoaded {
            generation: 1,
            profile: customer(42),
        });
        assert_eq!(after.next_fetch(), None);

        let after = leaving.clone().apply(SessionEvent::Initialized {
            generation: 2,
            authenticated: true,
            roles: roles(&["client"]),
            identity: None,
        });
        assert_eq!(after, leaving);
    }

    #[test]
    fn failed_refresh_keeps_loaded_account() {
        let session = signed_in(&["client"])
            .apply(SessionEvent::ProfileLoaded {
                generation: 1,
                profile: customer(42),
            })
            .apply(SessionEvent::BankAccountLoaded {
                generation: 1,
                account: account(100.5),
            })
            .apply(SessionEvent::BankAccountFailed {
                generation: 1,
                reason: "timeout".to_string(),
            });
        assert_eq!(session.bank_account().loaded().map(|a| a.balance), Some(100.5));
    }

    #[test]
    fn first_account_failure_is_recorded() {
        let session = signed_in(&["client"])
            .apply(SessionEvent::ProfileLoaded {
                generation: 1,
                profile: customer(42),
            })
            .apply(SessionEvent::BankAccountFailed {
                generation: 1,
                reason: "Customer has no account".to_string(),
            });
        assert_eq!(session.bank_account().error(), Some("Customer has no account"));
        assert_eq!(session.next_fetch(), None);
    }

    #[test]
    fn profile_failure_stops_the_pipeline() {
        let session = signed_in(&["client"]).apply(SessionEvent::ProfileFailed {
            generation: 1,
            reason: "404".to_string(),
        });
        assert_eq!(session.profile().error(), Some("404"));
        assert_eq!(session.next_fetch(), None);
    }

    #[test]
    fn tenant_code_comes_from_identity() {
        let session = Session::new(0).apply(SessionEvent::Initialized {
            generation: 0,
            authenticated: true,
            roles: roles(&["company"]),
            identity: Some(IdentityProfile {
                tenant_code: Some("T-01".to_string()),
                ..IdentityProfile::default()
            }),
        });
        assert_eq!(session.tenant_code(), Some("T-01"));
        // No subject: nothing to look the profile up by.
        assert_eq!(session.profile_request(), None);
    }
}

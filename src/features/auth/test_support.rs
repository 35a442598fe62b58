//! In-memory doubles for the identity client and local storage.

use crate::{
    app_lib::{AppError, storage::LocalStore},
    features::auth::{
        claims::encode_test_token,
        identity::{IdentityClient, IdentityProfile, InitOptions},
    },
};
use serde_json::json;
use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

#[derive(Clone, Debug, Default)]
pub(crate) struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
    deferred: bool,
}

impl MemoryStore {
    pub(crate) fn with_entries(entries: &[(&str, &str)]) -> Self {
        let store = Self::default();
        for (key, value) in entries {
            store
                .entries
                .borrow_mut()
                .insert((*key).to_string(), (*value).to_string());
        }
        store
    }

    /// Store whose wipe finishes only after yielding to the runtime, like
    /// IndexedDB deletes that complete through request callbacks.
    pub(crate) fn deferred(self) -> Self {
        Self {
            deferred: true,
            ..self
        }
    }
}

impl LocalStore for MemoryStore {
    fn entry_count(&self) -> usize {
        self.entries.borrow().len()
    }

    async fn clear_all(&self) -> Result<(), AppError> {
        if self.deferred {
            for _ in 0..3 {
                tokio::task::yield_now().await;
            }
        }
        self.entries.borrow_mut().clear();
        Ok(())
    }
}

/// Store whose wipe silently leaves entries behind.
#[derive(Clone, Debug, Default)]
pub(crate) struct StubbornStore;

impl LocalStore for StubbornStore {
    fn entry_count(&self) -> usize {
        1
    }

    async fn clear_all(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[derive(Debug)]
pub(crate) struct MockIdentity {
    authenticated: bool,
    init_error: Option<AppError>,
    token: Option<String>,
    profile: Result<IdentityProfile, AppError>,
    observed_store: Option<MemoryStore>,
    pub(crate) init_calls: RefCell<Vec<InitOptions>>,
    /// Redirect URI and store entry count seen by each logout.
    pub(crate) logouts: RefCell<Vec<(String, Option<usize>)>>,
}

impl MockIdentity {
    /// Authenticated user `kc-42` holding `roles`.
    pub(crate) fn signed_in(roles: &[&str]) -> Self {
        let token = encode_test_token(&json!({
            "sub": "kc-42",
            "preferred_username": "ana",
            "realm_access": { "roles": roles }
        }));
        Self {
            authenticated: true,
            init_error: None,
            token: Some(token),
            profile: Ok(IdentityProfile {
                subject: Some("kc-42".to_string()),
                username: Some("ana".to_string()),
                ..IdentityProfile::default()
            }),
            observed_store: None,
            init_calls: RefCell::new(Vec::new()),
            logouts: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn signed_out() -> Self {
        Self {
            authenticated: false,
            token: None,
            ..Self::signed_in(&[])
        }
    }

    pub(crate) fn failing_init(message: &str) -> Self {
        Self {
            init_error: Some(AppError::Identity(message.to_string())),
            ..Self::signed_in(&[])
        }
    }

    pub(crate) fn failing_profile(self, message: &str) -> Self {
        Self {
            profile: Err(AppError::Identity(message.to_string())),
            ..self
        }
    }

    /// Records `store`'s entry count whenever logout is called.
    pub(crate) fn observing(self, store: MemoryStore) -> Self {
        Self {
            observed_store: Some(store),
            ..self
        }
    }
}

impl IdentityClient for MockIdentity {
    async fn init(&self, options: &InitOptions) -> Result<bool, AppError> {
        self.init_calls.borrow_mut().push(options.clone());
        match &self.init_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.authenticated),
        }
    }

    fn token(&self) -> Option<String> {
        self.token.clone()
    }

    async fn load_profile(&self) -> Result<IdentityProfile, AppError> {
        self.profile.clone()
    }

    async fn logout(&self, redirect_uri: &str) -> Result<(), AppError> {
        let observed = self.observed_store.as_ref().map(LocalStore::entry_count);
        self.logouts
            .borrow_mut()
            .push((redirect_uri.to_string(), observed));
        Ok(())
    }
}

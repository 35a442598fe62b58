//! Route guard. [`evaluate`] decides from session state alone; the browser
//! component only renders the decision. This is UX gating: the backend
//! enforces authorization on every request.

use crate::{
    app_lib::paths,
    features::auth::{roles::Role, session::Session},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not initialized yet; show a loading placeholder.
    Pending,
    /// Not authenticated; go to the login page, remembering `from`.
    Login { from: String },
    /// Authenticated but lacking the required roles; go to the role's dashboard.
    Redirect(&'static str),
    /// Authenticated without any known role.
    Denied,
    Allow,
}

impl GuardDecision {
    /// Where to navigate, for decisions that leave the page.
    #[must_use]
    pub fn target(&self) -> Option<String> {
        match self {
            GuardDecision::Login { from } => Some(paths::login_with_return(from)),
            GuardDecision::Redirect(path) => Some((*path).to_string()),
            _ => None,
        }
    }
}

/// Decides access to `location` for a route requiring any of `required`.
#[must_use]
pub fn evaluate(session: &Session, required: &[Role], location: &str) -> GuardDecision {
    if !session.is_ready() {
        return GuardDecision::Pending;
    }
    if !session.is_authenticated() {
        return GuardDecision::Login {
            from: location.to_string(),
        };
    }
    if session.roles().grants_any(required) {
        return GuardDecision::Allow;
    }
    match session.role().dashboard_path() {
        Some(path) => GuardDecision::Redirect(path),
        None => GuardDecision::Denied,
    }
}

#[cfg(target_arch = "wasm32")]
pub use component::RequireRole;

#[cfg(target_arch = "wasm32")]
mod component {
    use super::{GuardDecision, evaluate};
    use crate::{
        components::{NoAccess, Spinner},
        features::auth::{roles::Role, state::use_auth},
    };
    use leptos::prelude::*;
    use leptos_router::{components::Redirect, hooks::use_location};

    /// Renders `children` only when the session passes the guard.
    #[component]
    pub fn RequireRole(
        #[prop(optional)] roles: Vec<Role>,
        children: ChildrenFn,
    ) -> impl IntoView {
        let auth = use_auth();
        let location = use_location();
        let decision = Memo::new(move |_| {
            let current = format!("{}{}", location.pathname.get(), location.search.get());
            auth.session.with(|session| evaluate(session, &roles, &current))
        });

        move || match decision.get() {
            GuardDecision::Pending => view! {
                <div class="flex justify-center py-16">
                    <Spinner />
                </div>
            }
            .into_any(),
            GuardDecision::Allow => children().into_any(),
            GuardDecision::Denied => view! { <NoAccess /> }.into_any(),
            redirect => match redirect.target() {
                Some(path) => view! { <Redirect path=path /> }.into_any(),
                None => ().into_any(),
            },
        }
    }
}

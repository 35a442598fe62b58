//! `/` and `/dashboard` land on the dashboard of the resolved role.

use crate::{
    components::{NoAccess, Spinner},
    features::auth::{GuardDecision, evaluate, state::use_auth},
};
use leptos::prelude::*;
use leptos_router::{components::Redirect, hooks::use_location};

#[component]
pub fn HomeRedirect() -> impl IntoView {
    let auth = use_auth();
    let location = use_location();

    move || {
        let current = location.pathname.get();
        auth.session.with(|session| match evaluate(session, &[], &current) {
            GuardDecision::Pending => view! {
                <div class="flex justify-center py-16"><Spinner /></div>
            }
            .into_any(),
            GuardDecision::Allow => match session.role().dashboard_path() {
                Some(path) => view! { <Redirect path=path /> }.into_any(),
                None => view! { <NoAccess /> }.into_any(),
            },
            decision => match decision.target() {
                Some(path) => view! { <Redirect path=path /> }.into_any(),
                None => view! { <NoAccess /> }.into_any(),
            },
        })
    }
}

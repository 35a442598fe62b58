//! Landing for `/login`. The identity client already forces its own login
//! screen on load, so this page only shows who is signed in and continues to
//! the page the visitor came from. Unauthenticated visitors get a full reload
//! of the target, which sends them through the identity provider again.

use crate::{
    app_lib::{paths, theme::Theme},
    components::Spinner,
    features::auth::state::use_auth,
};
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let query = use_query_map();
    let navigate = use_navigate();
    let target = Memo::new(move |_| {
        query.with(|params| paths::return_target(params.get_str(paths::RETURN_PARAM)))
    });

    let details = move || {
        auth.session.with(|session| {
            let identity = session.identity().cloned().unwrap_or_default();
            let roles = session.roles().iter().map(str::to_string).collect::<Vec<_>>();
            (
                session.is_ready(),
                session.is_authenticated(),
                identity,
                roles,
                session.tenant_code().map(str::to_string),
            )
        })
    };

    let proceed = move |_| {
        let target = target.get_untracked();
        if auth.session.with_untracked(|session| session.is_authenticated()) {
            navigate(&target, Default::default());
        } else {
            let _ = window().location().assign(&target);
        }
    };

    view! {
        <div class="max-w-md mx-auto mt-16">
            <div class=format!("{} p-8 flex flex-col items-center text-center gap-4", Theme::CARD)>
                <span class="material-symbols-outlined text-6xl text-blue-600">"lock_open"</span>
                {move || {
                    let (ready, authenticated, identity, roles, tenant) = details();
                    if !ready {
                        return view! { <Spinner /> }.into_any();
                    }
                    if !authenticated {
                        return view! {
                            <h1 class=Theme::H1>"Sign in to CrediFlow"</h1>
                            <p class="text-sm text-gray-500">"You will be sent to the sign-in page."</p>
                        }
                        .into_any();
                    }
                    let username = identity
                        .username
                        .clone()
                        .unwrap_or_else(|| "user".to_string());
                    view! {
                        <h1 class=Theme::H1>{format!("You are signed in as {username}")}</h1>
                        <dl class="text-sm text-gray-600 dark:text-gray-300 space-y-1">
                            <div>
                                <dt class="inline font-medium">"Roles: "</dt>
                                <dd class="inline">
                                    {if roles.is_empty() { "none".to_string() } else { roles.join(", ") }}
                                </dd>
                            </div>
                            <div>
                                <dt class="inline font-medium">"Tenant code: "</dt>
                                <dd class="inline">{tenant.unwrap_or_else(|| "not set".to_string())}</dd>
                            </div>
                            <div>
                                <dt class="inline font-medium">"Email: "</dt>
                                <dd class="inline">{identity.email.unwrap_or_else(|| "not set".to_string())}</dd>
                            </div>
                        </dl>
                    }
                    .into_any()
                }}
                <button type="button" class=Theme::BUTTON_PRIMARY on:click=proceed>
                    "Continue"
                </button>
            </div>
        </div>
    }
}

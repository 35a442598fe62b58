use crate::{
    app_lib::{format::format_brl, paths, theme::Theme},
    components::{Alert, AlertKind, Spinner},
    features::auth::{
        RemoteData,
        state::{use_auth, use_bank_account},
    },
};
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn ClientDashboardPage() -> impl IntoView {
    let auth = use_auth();
    let account = use_bank_account();
    let show_balance = RwSignal::new(true);
    let name = move || {
        auth.session.with(|session| {
            session
                .profile()
                .loaded()
                .map(|profile| profile.display_name().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "client".to_string())
        })
    };
    let failure = move || {
        auth.session.with(|session| match session.bank_account() {
            RemoteData::Failed(reason) => Some(reason.clone()),
            _ => None,
        })
    };
    let loading = move || {
        auth.session.with(|session| match session.profile() {
            RemoteData::NotLoaded => true,
            RemoteData::Failed(_) => false,
            RemoteData::Loaded(profile) => {
                !profile.needs_bank_account()
                    && matches!(session.bank_account(), RemoteData::NotLoaded)
            }
        })
    };

    view! {
        <div class="space-y-6">
            <h1 class=Theme::H1>{move || format!("Hello, {}!", name())}</h1>
            {move || failure().map(|reason| view! { <Alert kind=AlertKind::Warning message=format!("Your account could not be loaded: {reason}") /> })}
            <Show
                when=move || !loading()
                fallback=|| view! {
                    <div class="flex items-center gap-3 py-12 justify-center">
                        <Spinner />
                        <span class="text-sm text-gray-500">"Loading your account..."</span>
                    </div>
                }
            >
                <div class="grid gap-6 md:grid-cols-2">
                    <div class=format!("{} p-6 space-y-4", Theme::CARD)>
                        <div class="flex items-start justify-between">
                            <div>
                                <p class="text-sm text-gray-500">"Account balance"</p>
                                <p class="text-3xl font-bold text-gray-900 dark:text-white">
                                    {move || {
                                        if show_balance.get() {
                                            format_brl(account.get().map_or(0.0, |a| a.balance))
                                        } else {
                                            "R$ ••••••".to_string()
                                        }
                                    }}
                                </p>
                            </div>
                            <button
                                type="button"
                                class="material-symbols-outlined text-gray-500"
                                aria-label="Toggle balance"
                                on:click=move |_| show_balance.update(|show| *show = !*show)
                            >
                                {move || if show_balance.get() { "visibility_off" } else { "visibility" }}
                            </button>
                        </div>
                        <p class="text-sm text-gray-600 dark:text-gray-300">
                            {move || {
                                let account = account.get();
                                let number = account
                                    .as_ref()
                                    .and_then(|a| a.account_number.clone())
                                    .unwrap_or_else(|| "-".to_string());
                                let agency = account
                                    .as_ref()
                                    .and_then(|a| a.agency_number.clone())
                                    .unwrap_or_else(|| "-".to_string());
                                format!("Account {number} | Agency {agency}")
                            }}
                        </p>
                        <div class="flex justify-end gap-3">
                            <A href=paths::STATEMENT {..} class=Theme::BUTTON_SECONDARY>"View statement"</A>
                            <A href=paths::TRANSFERS {..} class=Theme::BUTTON_PRIMARY>"Make a PIX"</A>
                        </div>
                    </div>
                    <div class=format!("{} p-6 space-y-4", Theme::CARD)>
                        <div class="flex items-center gap-2">
                            <span class="material-symbols-outlined text-4xl text-blue-600">"account_balance"</span>
                            <h2 class="text-lg font-semibold text-gray-900 dark:text-white">"Pre-approved credit"</h2>
                        </div>
                        <p class="text-sm text-gray-600 dark:text-gray-300">
                            "Simulate and take out payroll-deducted credit quickly and safely."
                        </p>
                        <A href=paths::LOANS {..} class=format!("{} block w-full", Theme::BUTTON_PRIMARY)>
                            "Simulate now"
                        </A>
                    </div>
                </div>
            </Show>
        </div>
    }
}

//! Full-screen onboarding for clients without a virtual bank account. The
//! account is opened once the terms are accepted, then the page reloads so
//! the session pipeline runs again with the new account.

use crate::{
    components::{Alert, AlertKind, Button},
    features::{auth::state::use_auth, bank_accounts},
};
use leptos::{prelude::*, task::spawn_local};
use tracing::{error, info};

const TERMS: [&str; 4] = [
    "The account receives amounts authorized by your employer's partner company.",
    "Access to the platform requires this account.",
    "Your personal data is protected under the LGPD.",
    "You may request the account to be closed at any time.",
];

#[component]
pub fn WelcomeDialog() -> impl IntoView {
    let auth = use_auth();
    let customer = Memo::new(move |_| {
        auth.session.with(|session| {
            session
                .profile()
                .loaded()
                .filter(|profile| profile.needs_bank_account())
                .and_then(|profile| profile.customer().cloned())
        })
    });
    let accepted = RwSignal::new(false);
    let busy = RwSignal::new(false);
    let failure = RwSignal::new(None::<String>);

    let create_account = Callback::new(move |()| {
        let Some(customer_id) = customer.with_untracked(|c| c.as_ref().map(|c| c.id)) else {
            return;
        };
        busy.set(true);
        failure.set(None);
        spawn_local(async move {
            match bank_accounts::client::create(&auth.api(), customer_id).await {
                Ok(account) => {
                    info!(account = account.id, "bank account opened");
                    let _ = window().location().reload();
                }
                Err(err) => {
                    error!(error = %err, "failed to open bank account");
                    failure.set(Some(format!("Could not open the account: {err}")));
                    busy.set(false);
                }
            }
        });
    });

    move || {
        customer.get().map(|customer| {
            let company = customer
                .company_name
                .clone()
                .unwrap_or_else(|| "your company".to_string());
            view! {
                <div class="fixed inset-0 z-40 overflow-y-auto bg-white dark:bg-gray-900 p-8">
                    <div class="max-w-2xl mx-auto space-y-6">
                        <h1 class="text-3xl font-bold text-blue-900 dark:text-blue-300">
                            {format!("Welcome, {}!", customer.name)}
                        </h1>
                        <p class="text-lg text-gray-700 dark:text-gray-300">
                            "You are accessing the platform of " <strong>{company}</strong> "."
                        </p>
                        <p class="text-gray-600 dark:text-gray-400">
                            "To use the financial services you need to open your digital bank account."
                        </p>
                        <details class="rounded-lg border border-gray-200 dark:border-gray-700 p-4">
                            <summary class="font-semibold cursor-pointer">"Terms of use"</summary>
                            <ul class="mt-3 list-disc pl-5 space-y-1 text-sm text-gray-600 dark:text-gray-400">
                                {TERMS.iter().map(|term| view! { <li>{*term}</li> }).collect_view()}
                            </ul>
                        </details>
                        <label class="flex items-center gap-2 text-sm">
                            <input
                                type="checkbox"
                                prop:checked=move || accepted.get()
                                on:change=move |ev| accepted.set(event_target_checked(&ev))
                            />
                            "I have read and accept the terms of use."
                        </label>
                        {move || failure.get().map(|message| view! { <Alert kind=AlertKind::Error message=message /> })}
                        <div class="flex justify-end">
                            <Button
                                disabled=Signal::derive(move || !accepted.get())
                                busy=busy
                                busy_label="Opening account..."
                                on_click=create_account
                            >
                                "Open account and continue"
                            </Button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}

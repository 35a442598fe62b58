//! Transfers by agency/account or PIX key, and deposits into the user's own
//! account. Debits look the recipient up and ask for confirmation first.

use super::pix_keys::PixKeyManager;
use crate::{
    app_lib::{AppError, format::format_brl, theme::Theme},
    components::{Alert, AlertKind, Button, ButtonVariant, Spinner, TextField},
    features::{
        auth::state::{use_auth, use_bank_account},
        bank_accounts::{self, RecipientInfo},
        transactions::{self, TransferForm, TransferMethod},
    },
};
use leptos::prelude::*;

/// Validated transfer waiting for confirmation.
#[derive(Clone)]
struct Review {
    form: TransferForm,
    amount: f64,
    recipient: Option<RecipientInfo>,
    description: String,
}

#[component]
pub fn TransferPage() -> impl IntoView {
    let auth = use_auth();
    let account = use_bank_account();

    let method = RwSignal::new(TransferMethod::default());
    let agency = RwSignal::new(String::new());
    let account_number = RwSignal::new(String::new());
    let pix_key = RwSignal::new(String::new());
    let amount = RwSignal::new(String::new());
    let accepted = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let review = RwSignal::new(None::<Review>);

    let reset = move || {
        agency.set(String::new());
        account_number.set(String::new());
        pix_key.set(String::new());
        amount.set(String::new());
        accepted.set(false);
        review.set(None);
    };

    let current_form = move || TransferForm {
        method: method.get_untracked(),
        agency_number: agency.get_untracked(),
        account_number: account_number.get_untracked(),
        pix_key: pix_key.get_untracked(),
        amount: amount.get_untracked(),
        accepted_terms: accepted.get_untracked(),
    };

    let submit = Action::new_local(move |review: &Review| {
        let review = review.clone();
        async move {
            let own = account
                .get_untracked()
                .ok_or_else(|| AppError::Validation("Your account is not loaded yet.".to_string()))?;
            let (own_agency, own_number) = auth.session.with_untracked(|session| {
                let profile = session.profile().loaded();
                (
                    profile.and_then(|profile| profile.virtual_agency_number().map(str::to_string)),
                    profile.and_then(|profile| profile.virtual_account_number().map(str::to_string)),
                )
            });
            let request = review.form.request(
                review.amount,
                review.description.clone(),
                &own,
                own_agency.as_deref(),
                own_number.as_deref(),
            )?;
            transactions::client::submit(&auth.api(), review.form.method, &request).await?;
            Ok::<_, AppError>(review)
        }
    });

    let lookup = Action::new_local(move |form: &TransferForm| {
        let form = form.clone();
        async move {
            let balance = account.get_untracked().map_or(0.0, |account| account.balance);
            let amount = form.validate(balance)?;
            let api = auth.api();
            let recipient = match form.method {
                TransferMethod::Account => Some(
                    bank_accounts::client::recipient_by_agency(
                        &api,
                        &form.agency_number,
                        &form.account_number,
                    )
                    .await?,
                ),
                TransferMethod::Pix => {
                    Some(bank_accounts::client::recipient_by_pix(&api, &form.pix_key).await?)
                }
                TransferMethod::Deposit => None,
            };
            let description = form.describe(amount, recipient.as_ref());
            Ok::<_, AppError>(Review {
                form,
                amount,
                recipient,
                description,
            })
        }
    });

    Effect::new(move |_| {
        if let Some(result) = lookup.value().get() {
            match result {
                Ok(ready) if ready.form.method.needs_recipient() => review.set(Some(ready)),
                Ok(ready) => {
                    submit.dispatch(ready);
                }
                Err(err) => error.set(Some(lookup_error(&err))),
            }
        }
    });

    Effect::new(move |_| {
        if let Some(result) = submit.value().get() {
            match result {
                Ok(done) => {
                    auth.refresh_bank_account();
                    notice.set(Some(format!(
                        "{} of {} completed.",
                        done.form.method.label(),
                        format_brl(done.amount)
                    )));
                    reset();
                }
                Err(err) => {
                    review.set(None);
                    error.set(Some(err.to_string()));
                }
            }
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        error.set(None);
        notice.set(None);
        lookup.dispatch(current_form());
    };

    let busy = Signal::derive(move || lookup.pending().get() || submit.pending().get());

    view! {
        <section class=format!("{} p-6 space-y-6", Theme::CARD)>
            <h1 class=Theme::H1>"Transfers"</h1>
            {move || match account.get() {
                Some(account) => view! {
                    <p class="text-sm text-gray-600 dark:text-gray-400">
                        "Available balance: "
                        <span class="font-semibold">{format_brl(account.balance)}</span>
                    </p>
                }
                .into_any(),
                None => view! { <Spinner small=true /> }.into_any(),
            }}
            <div class="flex flex-wrap gap-2">
                {TransferMethod::ALL
                    .into_iter()
                    .map(|option| {
                        view! {
                            <button
                                type="button"
                                class="px-4 py-2 text-sm font-medium rounded-lg border"
                                class:bg-blue-700=move || method.get() == option
                                class:text-white=move || method.get() == option
                                on:click=move |_| {
                                    method.set(option);
                                    error.set(None);
                                    reset();
                                }
                            >
                                {option.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            {move || error.get().map(|message| view! { <Alert kind=AlertKind::Error message=message /> })}
            {move || notice.get().map(|message| view! { <Alert kind=AlertKind::Success message=message /> })}
            <form class="space-y-4" on:submit=on_submit>
                {move || match method.get() {
                    TransferMethod::Account => view! {
                        <div class="grid gap-4 sm:grid-cols-2">
                            <TextField label="Agency" value=agency required=true />
                            <TextField label="Account" value=account_number required=true />
                        </div>
                    }
                    .into_any(),
                    TransferMethod::Pix => view! {
                        <TextField label="PIX key" value=pix_key required=true />
                    }
                    .into_any(),
                    TransferMethod::Deposit => view! {
                        <p class="text-sm text-gray-600 dark:text-gray-400">
                            "The amount is credited to your own account."
                        </p>
                    }
                    .into_any(),
                }}
                <TextField label="Amount (R$)" value=amount required=true placeholder="0,00" />
                <label class="flex items-center gap-2 text-sm text-gray-700 dark:text-gray-300">
                    <input
                        type="checkbox"
                        prop:checked=move || accepted.get()
                        on:change=move |ev| accepted.set(event_target_checked(&ev))
                    />
                    "I accept the terms of use."
                </label>
                <Button button_type="submit" busy=busy busy_label="Processing...">
                    {move || if method.get().needs_recipient() { "Continue" } else { "Deposit" }}
                </Button>
            </form>
            <Show when=move || method.get() == TransferMethod::Pix>
                <PixKeyManager />
            </Show>
            {move || review.get().map(|pending| {
                let name = pending
                    .recipient
                    .as_ref()
                    .map(|info| info.name.clone())
                    .unwrap_or_default();
                let confirmed = pending.clone();
                view! {
                    <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/50 p-4">
                        <div class=format!("{} w-full max-w-md p-6 space-y-4", Theme::CARD)>
                            <h2 class="text-lg font-semibold text-gray-900 dark:text-white">"Confirm transfer"</h2>
                            <dl class="space-y-1 text-sm text-gray-700 dark:text-gray-300">
                                <div><dt class="inline font-medium">"Recipient: "</dt><dd class="inline">{name}</dd></div>
                                <div><dt class="inline font-medium">"Amount: "</dt><dd class="inline">{format_brl(pending.amount)}</dd></div>
                            </dl>
                            <p class="text-sm text-gray-500">{pending.description.clone()}</p>
                            <div class="flex justify-end gap-3">
                                <Button variant=ButtonVariant::Secondary on_click=Callback::new(move |()| review.set(None))>
                                    "Cancel"
                                </Button>
                                <Button
                                    busy=submit.pending()
                                    busy_label="Sending..."
                                    on_click=Callback::new(move |()| {
                                        submit.dispatch(confirmed.clone());
                                    })
                                >
                                    "Confirm"
                                </Button>
                            </div>
                        </div>
                    </div>
                }
            })}
        </section>
    }
}

/// Recipient lookups answer 404 for unknown accounts and keys.
fn lookup_error(err: &AppError) -> String {
    if err.is_not_found() {
        "Recipient not found. Check the details and try again.".to_string()
    } else {
        err.to_string()
    }
}

//! Payroll loan simulation and contracting, with the client's proposals below.

use super::loan_list::LoanList;
use crate::{
    app_lib::{
        AppError,
        format::{format_brl, today_iso},
        theme::Theme,
    },
    components::{Alert, AlertKind, Button, ButtonVariant, Spinner, use_toast},
    features::{
        auth::state::use_auth,
        loans::{
            self, SimulationRequest, SimulationResult,
            types::{AMOUNT_STEP, DEFAULT_MAX_AMOUNT, MAX_TERM_MONTHS, MIN_AMOUNT, MIN_TERM_MONTHS},
        },
    },
};
use leptos::prelude::*;

const INITIAL_AMOUNT: f64 = 500.0;
const INITIAL_TERM: u32 = 24;

#[component]
pub fn LoansPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toast();
    let amount = RwSignal::new(INITIAL_AMOUNT);
    let term = RwSignal::new(INITIAL_TERM);
    let simulation = RwSignal::new(None::<(SimulationRequest, SimulationResult)>);
    let refresh = RwSignal::new(0_u32);

    let customer = Memo::new(move |_| {
        auth.session.with(|session| {
            session
                .profile()
                .loaded()
                .map(|profile| (profile.id(), profile.company_id()))
        })
    });

    let margin = LocalResource::new(move || {
        let customer = customer.get();
        refresh.track();
        async move {
            match customer {
                Some((id, _)) => loans::client::available_margin(&auth.api(), id).await.map(Some),
                None => Ok(None),
            }
        }
    });
    let margin_value = Signal::derive(move || margin.get().and_then(|result| result.ok().flatten()));
    let no_margin = Signal::derive(move || margin_value.get().is_some_and(|value| value <= 0.0));
    let max_amount = Signal::derive(move || {
        margin_value
            .get()
            .filter(|value| *value > 0.0)
            .unwrap_or(DEFAULT_MAX_AMOUNT)
    });

    let simulate = Action::new_local(move |_: &()| async move {
        let (customer_id, company_id) = customer
            .get_untracked()
            .ok_or_else(|| AppError::Validation("Your profile is not loaded yet.".to_string()))?;
        let company_id = company_id.ok_or_else(|| {
            AppError::Validation("You are not linked to an employer.".to_string())
        })?;
        let available = margin_value.get_untracked().unwrap_or(0.0);
        let request = SimulationRequest::new(
            customer_id,
            company_id,
            amount.get_untracked(),
            term.get_untracked(),
            available,
            today_iso(),
        )?;
        let result = loans::client::simulate(&auth.api(), &request).await?;
        Ok::<_, AppError>((request, result))
    });

    let contract = Action::new_local(move |_: &()| async move {
        let (request, result) = simulation
            .get_untracked()
            .ok_or_else(|| AppError::Validation("Simulate the loan first.".to_string()))?;
        loans::client::contract(&auth.api(), &result, &request).await
    });

    Effect::new(move |_| {
        if let Some(outcome) = simulate.value().get() {
            match outcome {
                Ok(ready) => simulation.set(Some(ready)),
                Err(err) => {
                    simulation.set(None);
                    toasts.error(err.to_string());
                }
            }
        }
    });

    Effect::new(move |_| {
        if let Some(outcome) = contract.value().get() {
            match outcome {
                Ok(()) => {
                    toasts.success("Loan requested. Generate and sign the CCB to continue.");
                    simulation.set(None);
                    refresh.update(|count| *count += 1);
                }
                Err(err) => toasts.error(format!("Could not contract the loan: {err}")),
            }
        }
    });

    let exceeds = Signal::derive(move || {
        simulation.with(|current| {
            current.as_ref().is_some_and(|(request, result)| {
                result.exceeds_margin(margin_value.get().unwrap_or(request.available_limit))
            })
        })
    });

    view! {
        <div class="space-y-6">
            <section class=format!("{} p-6 space-y-4", Theme::CARD)>
                <h1 class=Theme::H1>"Payroll loan"</h1>
                {move || match margin.get() {
                    None => view! { <Spinner small=true /> }.into_any(),
                    Some(Err(err)) => view! {
                        <Alert kind=AlertKind::Error message=format!("Could not load your margin: {err}") />
                    }
                    .into_any(),
                    Some(Ok(None)) => ().into_any(),
                    Some(Ok(Some(value))) if value <= 0.0 => view! {
                        <Alert kind=AlertKind::Warning message="You have no available margin for new loans.".to_string() />
                    }
                    .into_any(),
                    Some(Ok(Some(value))) => view! {
                        <p class="text-sm text-gray-600 dark:text-gray-400">
                            "Available margin: "<span class="font-semibold">{format_brl(value)}</span>
                        </p>
                    }
                    .into_any(),
                }}
                <label class="block">
                    <span class=Theme::LABEL>{move || format!("Amount: {}", format_brl(amount.get()))}</span>
                    <input
                        type="range"
                        class="w-full"
                        min=MIN_AMOUNT
                        max=move || max_amount.get()
                        step=AMOUNT_STEP
                        disabled=move || no_margin.get()
                        prop:value=move || amount.get().to_string()
                        on:input=move |ev| {
                            if let Ok(value) = event_target_value(&ev).parse::<f64>() {
                                amount.set(value);
                            }
                        }
                    />
                </label>
                <label class="block">
                    <span class=Theme::LABEL>{move || format!("Term: {} months", term.get())}</span>
                    <input
                        type="range"
                        class="w-full"
                        min=MIN_TERM_MONTHS
                        max=MAX_TERM_MONTHS
                        step="1"
                        disabled=move || no_margin.get()
                        prop:value=move || term.get().to_string()
                        on:input=move |ev| {
                            if let Ok(value) = event_target_value(&ev).parse::<u32>() {
                                term.set(value);
                            }
                        }
                    />
                </label>
                <Button
                    disabled=no_margin
                    busy=simulate.pending()
                    busy_label="Simulating..."
                    on_click=Callback::new(move |()| {
                        simulate.dispatch(());
                    })
                >
                    "Simulate"
                </Button>
                {move || simulation.get().map(|(_, result)| view! {
                    <div class="rounded-lg border border-gray-200 dark:border-gray-700 p-4 space-y-2">
                        <dl class="grid gap-2 sm:grid-cols-3 text-sm">
                            <div>
                                <dt class="text-gray-500">"Financed amount"</dt>
                                <dd class="font-semibold">{format_brl(result.financed_amount)}</dd>
                            </div>
                            <div>
                                <dt class="text-gray-500">"Installment"</dt>
                                <dd class="font-semibold" class:text-red-600=move || exceeds.get()>
                                    {format_brl(result.installment_value)}
                                </dd>
                            </div>
                            <div>
                                <dt class="text-gray-500">"Total payment"</dt>
                                <dd class="font-semibold">{format_brl(result.total_payment)}</dd>
                            </div>
                        </dl>
                        <Show when=move || exceeds.get()>
                            <Alert
                                kind=AlertKind::Warning
                                message=format!(
                                    "The installment exceeds your available margin ({}).",
                                    format_brl(margin_value.get_untracked().unwrap_or(0.0)),
                                )
                            />
                        </Show>
                        <div class="flex justify-end gap-3">
                            <Button variant=ButtonVariant::Secondary on_click=Callback::new(move |()| simulation.set(None))>
                                "Discard"
                            </Button>
                            <Button
                                disabled=exceeds
                                busy=contract.pending()
                                busy_label="Contracting..."
                                on_click=Callback::new(move |()| {
                                    contract.dispatch(());
                                })
                            >
                                "Contract"
                            </Button>
                        </div>
                    </div>
                })}
            </section>
            <section class=format!("{} p-6 space-y-4", Theme::CARD)>
                <h2 class="text-lg font-semibold text-gray-900 dark:text-white">"My proposals"</h2>
                <LoanList refresh=refresh />
            </section>
        </div>
    }
}

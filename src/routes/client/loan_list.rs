//! The client's own proposals: CCB steps and installment payments.

use crate::{
    app_lib::{
        PageQuery,
        download::save_pdf,
        format::{format_brl, format_timestamp},
        theme::Theme,
    },
    components::{Alert, AlertKind, Button, ButtonVariant, InstallmentTable, Pager, Spinner, use_toast},
    features::{
        auth::state::{use_auth, use_bank_account},
        loans::{self, CcbDocument, LoanProposal},
    },
};
use leptos::{prelude::*, task::spawn_local};

/// Paged proposal table. Bumping `refresh` reloads the current page.
#[component]
pub fn LoanList(refresh: RwSignal<u32>) -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toast();
    let account = use_bank_account();
    let page = RwSignal::new(PageQuery::default());
    let expanded = RwSignal::new(None::<i64>);
    let busy = RwSignal::new(false);

    let proposals = LocalResource::new(move || {
        let current = page.get();
        refresh.track();
        async move { loans::client::my_proposals(&auth.api(), current).await }
    });
    let total_pages = Signal::derive(move || {
        proposals
            .get()
            .and_then(|result| result.ok())
            .map_or(1, |paged| paged.total_pages())
    });

    let run_document = move |proposal_id: i64, document: CcbDocument| {
        busy.set(true);
        spawn_local(async move {
            let result = loans::client::ccb(&auth.api(), proposal_id, document)
                .await
                .and_then(|bytes| save_pdf(&bytes, &document.file_name(proposal_id)));
            busy.set(false);
            match result {
                Ok(()) => {
                    toasts.success(format!("{} completed.", document.label()));
                    if document != CcbDocument::Signed {
                        refresh.update(|count| *count += 1);
                    }
                }
                Err(err) => toasts.error(format!("{} failed: {err}", document.label())),
            }
        });
    };

    let pay = Callback::new(move |installment_id: i64| {
        let Some(account_id) = account.get_untracked().map(|account| account.id) else {
            toasts.error("Your account is not loaded yet.");
            return;
        };
        busy.set(true);
        spawn_local(async move {
            let result = loans::client::pay_installment(&auth.api(), installment_id, account_id)
                .await
                .and_then(|receipt| save_pdf(&receipt, &format!("receipt_installment_{installment_id}.pdf")));
            busy.set(false);
            match result {
                Ok(()) => {
                    toasts.success("Installment paid. The receipt was downloaded.");
                    auth.refresh_bank_account();
                    refresh.update(|count| *count += 1);
                }
                Err(err) => toasts.error(format!("Could not pay the installment: {err}")),
            }
        });
    });

    view! {
        <div class="overflow-x-auto">
            <table class="min-w-full divide-y divide-gray-200 dark:divide-gray-700">
                <thead class="bg-gray-50 dark:bg-gray-900/50">
                    <tr>
                        <th class=Theme::TH>"ID"</th>
                        <th class=Theme::TH>"Amount"</th>
                        <th class=Theme::TH>"Term"</th>
                        <th class=Theme::TH>"Installment"</th>
                        <th class=Theme::TH>"Status"</th>
                        <th class=Theme::TH>"Created"</th>
                        <th class=Theme::TH>"Actions"</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-gray-200 dark:divide-gray-700">
                    {move || match proposals.get() {
                        None => view! {
                            <tr><td colspan="7" class="px-6 py-12 text-center"><Spinner /></td></tr>
                        }
                        .into_any(),
                        Some(Err(err)) => view! {
                            <tr><td colspan="7" class="px-6 py-4"><Alert kind=AlertKind::Error message=err.to_string() /></td></tr>
                        }
                        .into_any(),
                        Some(Ok(paged)) if paged.items.is_empty() => view! {
                            <tr><td colspan="7" class="px-6 py-12 text-center text-sm text-gray-500">"No proposals yet."</td></tr>
                        }
                        .into_any(),
                        Some(Ok(paged)) => paged
                            .items
                            .into_iter()
                            .map(|proposal| proposal_rows(proposal, expanded, busy, run_document, pay))
                            .collect_view()
                            .into_any(),
                    }}
                </tbody>
            </table>
            <Pager page=page total_pages=total_pages />
        </div>
    }
}

fn proposal_rows(
    proposal: LoanProposal,
    expanded: RwSignal<Option<i64>>,
    busy: RwSignal<bool>,
    run_document: impl Fn(i64, CcbDocument) + Copy + Send + Sync + 'static,
    pay: Callback<i64>,
) -> impl IntoView {
    let id = proposal.id;
    let document = proposal.status.client_document();
    let is_open = move || expanded.get() == Some(id);
    let detail = proposal.clone();

    view! {
        <tr>
            <td class=Theme::TD>{id}</td>
            <td class=Theme::TD>{format_brl(proposal.requested_amount)}</td>
            <td class=Theme::TD>
                {proposal.term_in_months.map(|months| format!("{months} months")).unwrap_or_default()}
            </td>
            <td class=Theme::TD>{proposal.installment_value.map(format_brl).unwrap_or_default()}</td>
            <td class=Theme::TD>
                <span class=format!("rounded-full px-2 py-0.5 text-xs {}", proposal.status.badge_class())>
                    {proposal.status.label().to_string()}
                </span>
            </td>
            <td class=Theme::TD>{proposal.created_at.as_deref().map(format_timestamp).unwrap_or_default()}</td>
            <td class=format!("{} space-x-2", Theme::TD)>
                {document.map(|document| view! {
                    <Button
                        variant=ButtonVariant::Secondary
                        busy=busy
                        on_click=Callback::new(move |()| run_document(id, document))
                    >
                        {document.label()}
                    </Button>
                })}
                <button
                    type="button"
                    class=Theme::LINK
                    on:click=move |_| expanded.update(|current| {
                        *current = if *current == Some(id) { None } else { Some(id) };
                    })
                >
                    {move || if is_open() { "Hide installments" } else { "Installments" }}
                </button>
            </td>
        </tr>
        <Show when=is_open>
            <tr>
                <td colspan="7" class="bg-gray-50 dark:bg-gray-900/40">
                    <InstallmentTable proposal=detail.clone() on_pay=pay busy=busy />
                </td>
            </tr>
        </Show>
    }
}

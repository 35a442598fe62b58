//! Credit proposal management for administrators: paged search, disbursement
//! and cancellation of signed proposals, signed CCB download.

use crate::{
    app_lib::{PageQuery, download::save_pdf, format::format_brl, theme::Theme},
    components::{Alert, AlertKind, Button, ButtonVariant, InstallmentTable, Pager, Spinner, use_toast},
    features::{
        auth::state::use_auth,
        loans::{self, CcbDocument, LoanProposal},
    },
};
use leptos::{prelude::*, task::spawn_local};
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Settlement {
    Pay,
    Cancel,
}

#[component]
pub fn ProposalsPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toast();
    let search = RwSignal::new(String::new());
    let page = RwSignal::new(PageQuery::default());
    let refresh = RwSignal::new(0_u32);
    let expanded = RwSignal::new(None::<i64>);

    let proposals = LocalResource::new(move || {
        let query = search.get();
        let current = page.get();
        refresh.track();
        async move { loans::client::search(&auth.api(), &query, current).await }
    });
    let total_pages = Signal::derive(move || {
        proposals
            .get()
            .and_then(|result| result.ok())
            .map_or(1, |paged| paged.total_pages())
    });

    let settle = move |id: i64, action: Settlement| {
        spawn_local(async move {
            let api = auth.api();
            let result = match action {
                Settlement::Pay => loans::client::pay(&api, id).await,
                Settlement::Cancel => loans::client::cancel(&api, id).await,
            };
            match (result, action) {
                (Ok(_), Settlement::Pay) => toasts.success("Proposal disbursed."),
                (Ok(_), Settlement::Cancel) => toasts.success("Proposal canceled."),
                (Err(err), _) => toasts.error(format!("Could not update proposal: {err}")),
            }
            refresh.update(|count| *count += 1);
        });
    };

    let download_ccb = move |id: i64| {
        spawn_local(async move {
            let document = CcbDocument::Signed;
            let saved = match loans::client::ccb(&auth.api(), id, document).await {
                Ok(bytes) => save_pdf(&bytes, &document.file_name(id)),
                Err(err) => Err(err),
            };
            match saved {
                Ok(()) => toasts.success("CCB downloaded."),
                Err(err) => {
                    warn!(proposal = id, error = %err, "CCB download failed");
                    toasts.error(format!("Could not download CCB: {err}"));
                }
            }
        });
    };

    let row = move |proposal: LoanProposal| {
        let id = proposal.id;
        let settleable = proposal.status.can_settle();
        let details = proposal.clone();
        view! {
            <tr class="hover:bg-gray-50 dark:hover:bg-gray-700/50">
                <td class=Theme::TD>{id}</td>
                <td class=Theme::TD>{proposal.customer_name.clone().unwrap_or_default()}</td>
                <td class=Theme::TD>{format_brl(proposal.financed_amount.unwrap_or(proposal.requested_amount))}</td>
                <td class=Theme::TD>{proposal.company_name.clone().unwrap_or_default()}</td>
                <td class=Theme::TD>
                    <span class=format!("rounded-full px-2 py-0.5 text-xs {}", proposal.status.badge_class())>
                        {proposal.status.label().to_string()}
                    </span>
                </td>
                <td class=format!("{} flex gap-2", Theme::TD)>
                    <Show when=move || settleable>
                        <Button on_click=Callback::new(move |()| settle(id, Settlement::Pay))>"Disburse"</Button>
                        <Button variant=ButtonVariant::Danger on_click=Callback::new(move |()| settle(id, Settlement::Cancel))>
                            "Cancel"
                        </Button>
                    </Show>
                    <Button variant=ButtonVariant::Secondary on_click=Callback::new(move |()| download_ccb(id))>
                        "Download CCB"
                    </Button>
                    <Button
                        variant=ButtonVariant::Secondary
                        on_click=Callback::new(move |()| {
                            expanded.update(|open| *open = if *open == Some(id) { None } else { Some(id) })
                        })
                    >
                        "Installments"
                    </Button>
                </td>
            </tr>
            <Show when=move || expanded.get() == Some(id)>
                <tr>
                    <td colspan="6" class="bg-gray-50 dark:bg-gray-900/40">
                        <InstallmentTable proposal=details.clone() />
                    </td>
                </tr>
            </Show>
        }
    };

    view! {
        <section class=format!("{} p-6 space-y-4", Theme::CARD)>
            <div class="flex flex-wrap items-center justify-between gap-4">
                <h1 class=Theme::H1>"Credit proposals"</h1>
                <input
                    type="search"
                    class=format!("{} max-w-xs", Theme::INPUT)
                    placeholder="Search by customer or company"
                    prop:value=move || search.get()
                    on:input=move |ev| {
                        search.set(event_target_value(&ev));
                        page.update(|query| query.page = 0);
                    }
                />
            </div>
            <div class="overflow-x-auto">
                <table class="min-w-full divide-y divide-gray-200 dark:divide-gray-700">
                    <thead class="bg-gray-50 dark:bg-gray-900/50">
                        <tr>
                            <th class=Theme::TH>"ID"</th>
                            <th class=Theme::TH>"Customer"</th>
                            <th class=Theme::TH>"Amount"</th>
                            <th class=Theme::TH>"Company"</th>
                            <th class=Theme::TH>"Status"</th>
                            <th class=Theme::TH>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-gray-200 dark:divide-gray-700">
                        {move || match proposals.get() {
                            None => view! {
                                <tr><td colspan="6" class="px-6 py-12 text-center"><Spinner /></td></tr>
                            }
                            .into_any(),
                            Some(Err(err)) => view! {
                                <tr><td colspan="6" class="px-6 py-4"><Alert kind=AlertKind::Error message=err.to_string() /></td></tr>
                            }
                            .into_any(),
                            Some(Ok(paged)) if paged.items.is_empty() => view! {
                                <tr><td colspan="6" class="px-6 py-12 text-center text-sm text-gray-500">"No proposals found."</td></tr>
                            }
                            .into_any(),
                            Some(Ok(paged)) => paged.items.into_iter().map(row).collect_view().into_any(),
                        }}
                    </tbody>
                </table>
            </div>
            <Pager page=page total_pages=total_pages />
        </section>
    }
}

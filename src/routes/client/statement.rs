//! Paged account statement with type and status filters.

use crate::{
    app_lib::{
        PageQuery,
        format::{format_brl, format_timestamp},
        theme::Theme,
    },
    components::{Alert, AlertKind, Pager, Spinner},
    features::{
        auth::state::{use_auth, use_bank_account},
        transactions::{self, Transaction, TransactionStatus, TransactionType, types::StatementQuery},
    },
};
use leptos::prelude::*;

#[component]
pub fn StatementPage() -> impl IntoView {
    let auth = use_auth();
    let account = use_bank_account();
    let kind = RwSignal::new(String::new());
    let status = RwSignal::new(String::new());
    let page = RwSignal::new(PageQuery::default());

    let statement = LocalResource::new(move || {
        let account_id = account.get().map(|account| account.id);
        let query = StatementQuery {
            kind: Some(kind.get()).filter(|value| !value.is_empty()).map(TransactionType::from),
            status: Some(status.get())
                .filter(|value| !value.is_empty())
                .map(TransactionStatus::from),
            page: page.get().page,
            size: page.get().size,
        };
        async move {
            match account_id {
                Some(id) => transactions::client::statement(&auth.api(), id, &query)
                    .await
                    .map(|paged| Some((id, paged))),
                None => Ok(None),
            }
        }
    });
    let total_pages = Signal::derive(move || {
        statement
            .get()
            .and_then(|result| result.ok().flatten())
            .map_or(1, |(_, paged)| paged.total_pages())
    });

    let filter = move |label: &'static str, value: RwSignal<String>, options: Vec<(String, String)>| {
        view! {
            <label class="block">
                <span class=Theme::LABEL>{label}</span>
                <select
                    class=Theme::INPUT
                    prop:value=move || value.get()
                    on:change=move |ev| {
                        value.set(event_target_value(&ev));
                        page.update(|query| query.page = 0);
                    }
                >
                    <option value="">"All"</option>
                    {options
                        .into_iter()
                        .map(|(option, text)| view! { <option value=option>{text}</option> })
                        .collect_view()}
                </select>
            </label>
        }
    };
    let kinds = TransactionType::KNOWN
        .iter()
        .map(|kind| (kind.as_str().to_string(), kind.label()))
        .collect::<Vec<_>>();
    let statuses = TransactionStatus::KNOWN
        .iter()
        .map(|status| (status.as_str().to_string(), status.label().to_string()))
        .collect::<Vec<_>>();

    view! {
        <section class=format!("{} p-6 space-y-4", Theme::CARD)>
            <h1 class=Theme::H1>"Statement"</h1>
            <div class="grid gap-4 sm:grid-cols-2">
                {filter("Type", kind, kinds)}
                {filter("Status", status, statuses)}
            </div>
            {move || match statement.get() {
                None => view! { <div class="py-12 text-center"><Spinner /></div> }.into_any(),
                Some(Err(err)) => view! { <Alert kind=AlertKind::Error message=err.to_string() /> }.into_any(),
                Some(Ok(None)) => view! {
                    <p class="text-sm text-gray-500">"Your account is not available yet."</p>
                }
                .into_any(),
                Some(Ok(Some((_, paged)))) if paged.items.is_empty() => view! {
                    <p class="py-12 text-center text-sm text-gray-500">"No transactions found."</p>
                }
                .into_any(),
                Some(Ok(Some((account_id, paged)))) => view! {
                    <ul class="divide-y divide-gray-200 dark:divide-gray-700">
                        {paged
                            .items
                            .into_iter()
                            .map(|transaction| view! { <StatementRow transaction=transaction account_id=account_id /> })
                            .collect_view()}
                    </ul>
                }
                .into_any(),
            }}
            <Pager page=page total_pages=total_pages />
        </section>
    }
}

#[component]
fn StatementRow(transaction: Transaction, account_id: i64) -> impl IntoView {
    let credit = transaction.is_credit(account_id);
    let (sign, tone) = if credit {
        ("+", "text-green-600 dark:text-green-400")
    } else {
        ("-", "text-red-600 dark:text-red-400")
    };
    let when = transaction
        .created_at
        .as_deref()
        .map(format_timestamp)
        .unwrap_or_default();
    let status = transaction
        .status
        .as_ref()
        .map(|status| status.label().to_string())
        .unwrap_or_default();

    view! {
        <li class="flex items-center justify-between gap-4 py-3">
            <div class="flex items-center gap-3">
                <span class=format!("material-symbols-outlined {tone}")>{transaction.kind.icon()}</span>
                <div>
                    <p class="text-sm font-medium text-gray-900 dark:text-white">{transaction.label()}</p>
                    <p class="text-xs text-gray-500">{when}" · "{status}</p>
                </div>
            </div>
            <span class=format!("text-sm font-semibold {tone}")>
                {format!("{sign} {}", format_brl(transaction.amount))}
            </span>
        </li>
    }
}

use crate::{
    app_lib::{
        format::{format_brl, format_date},
        theme::Theme,
    },
    components::{Button, ButtonVariant},
    features::loans::LoanProposal,
};
use leptos::prelude::*;

/// Installment schedule of a proposal. With `on_pay`, open installments of a
/// disbursed loan get a pay button.
#[component]
pub fn InstallmentTable(
    proposal: LoanProposal,
    #[prop(optional)] on_pay: Option<Callback<i64>>,
    #[prop(optional, into, default = Signal::from(false))] busy: Signal<bool>,
) -> impl IntoView {
    if proposal.installments.is_empty() {
        return view! { <p class="text-sm text-gray-500 px-6 py-3">"No installments yet."</p> }.into_any();
    }
    let rows = proposal
        .installments
        .iter()
        .map(|installment| {
            let payable = proposal.installment_payable(installment);
            let id = installment.id;
            let status = if installment.paid { "Paid" } else { "Open" };
            let status_class = if installment.paid {
                "rounded-full px-2 py-0.5 text-xs bg-green-100 text-green-800"
            } else {
                "rounded-full px-2 py-0.5 text-xs bg-gray-100 text-gray-800"
            };
            view! {
                <tr>
                    <td class=Theme::TD>{installment.number}</td>
                    <td class=Theme::TD>
                        {installment.due_date.as_deref().map(format_date).unwrap_or_default()}
                    </td>
                    <td class=Theme::TD>{format_brl(installment.value)}</td>
                    <td class=Theme::TD>{installment.paid_value.map(format_brl).unwrap_or_else(|| "-".to_string())}</td>
                    <td class=Theme::TD><span class=status_class>{status}</span></td>
                    <td class=Theme::TD>
                        {on_pay
                            .filter(|_| payable)
                            .map(|on_pay| {
                                view! {
                                    <Button
                                        variant=ButtonVariant::Secondary
                                        busy=busy
                                        busy_label="Paying..."
                                        on_click=Callback::new(move |()| on_pay.run(id))
                                    >
                                        "Pay"
                                    </Button>
                                }
                            })}
                    </td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <table class="min-w-full divide-y divide-gray-200 dark:divide-gray-700">
            <thead class="bg-gray-50 dark:bg-gray-900/50">
                <tr>
                    <th class=Theme::TH>"#"</th>
                    <th class=Theme::TH>"Due date"</th>
                    <th class=Theme::TH>"Amount"</th>
                    <th class=Theme::TH>"Paid"</th>
                    <th class=Theme::TH>"Status"</th>
                    <th class=Theme::TH></th>
                </tr>
            </thead>
            <tbody class="divide-y divide-gray-200 dark:divide-gray-700">{rows}</tbody>
        </table>
    }
    .into_any()
}

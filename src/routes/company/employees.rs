//! Employees of the signed-in company, with a detail panel that can enable or
//! disable the employee's sign-in.

use crate::{
    app_lib::{PageQuery, format::format_brl, paths, theme::Theme},
    components::{Alert, AlertKind, Button, ButtonVariant, Pager, Spinner, use_toast},
    features::{
        auth::state::use_auth,
        customers::{self, Customer},
    },
};
use leptos::{prelude::*, task::spawn_local};
use leptos_router::components::A;

#[component]
pub fn EmployeesPage() -> impl IntoView {
    view! {
        <section class=format!("{} p-6 space-y-4", Theme::CARD)>
            <div class="flex items-center justify-between">
                <h1 class=Theme::H1>"Employees"</h1>
                <A href=paths::EMPLOYEE_NEW {..} class=Theme::LINK>"New employee"</A>
            </div>
            <EmployeeList refresh=RwSignal::new(0) />
        </section>
    }
}

/// Paged employee table. Bumping `refresh` reloads the current page.
#[component]
pub fn EmployeeList(refresh: RwSignal<u32>) -> impl IntoView {
    let auth = use_auth();
    let page = RwSignal::new(PageQuery::default());
    let selected = RwSignal::new(None::<Customer>);

    let employees = LocalResource::new(move || {
        let subject = auth
            .session
            .with(|session| session.subject().map(str::to_string))
            .unwrap_or_default();
        let current = page.get();
        refresh.track();
        async move { customers::client::by_company(&auth.api(), &subject, current).await }
    });
    let total_pages = Signal::derive(move || {
        employees
            .get()
            .and_then(|result| result.ok())
            .map_or(1, |paged| paged.total_pages())
    });

    view! {
        <div class="overflow-x-auto">
            <table class="min-w-full divide-y divide-gray-200 dark:divide-gray-700">
                <thead class="bg-gray-50 dark:bg-gray-900/50">
                    <tr>
                        <th class=Theme::TH>"ID"</th>
                        <th class=Theme::TH>"Name"</th>
                        <th class=Theme::TH>"CPF"</th>
                        <th class=Theme::TH>"Email"</th>
                        <th class=Theme::TH>"Phone"</th>
                        <th class=Theme::TH>"Sign-in enabled"</th>
                        <th class=Theme::TH>"Actions"</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-gray-200 dark:divide-gray-700">
                    {move || match employees.get() {
                        None => view! {
                            <tr><td colspan="7" class="px-6 py-12 text-center"><Spinner /></td></tr>
                        }
                        .into_any(),
                        Some(Err(err)) => view! {
                            <tr><td colspan="7" class="px-6 py-4"><Alert kind=AlertKind::Error message=err.to_string() /></td></tr>
                        }
                        .into_any(),
                        Some(Ok(paged)) if paged.items.is_empty() => view! {
                            <tr><td colspan="7" class="px-6 py-12 text-center text-sm text-gray-500">"No employees yet."</td></tr>
                        }
                        .into_any(),
                        Some(Ok(paged)) => paged
                            .items
                            .into_iter()
                            .map(|employee| {
                                let chosen = employee.clone();
                                view! {
                                    <tr class="hover:bg-gray-50 dark:hover:bg-gray-700/50">
                                        <td class=Theme::TD>{employee.id}</td>
                                        <td class=Theme::TD>{employee.name.clone()}</td>
                                        <td class=Theme::TD>{employee.cpf.clone()}</td>
                                        <td class=Theme::TD>{employee.email.clone()}</td>
                                        <td class=Theme::TD>{employee.phone.clone()}</td>
                                        <td class=Theme::TD>{if employee.is_enabled() { "Yes" } else { "No" }}</td>
                                        <td class=format!("{} space-x-3", Theme::TD)>
                                            <A href=paths::employee_edit(employee.id) {..} class=Theme::LINK>"Edit"</A>
                                            <button
                                                type="button"
                                                class=Theme::LINK
                                                on:click=move |_| selected.set(Some(chosen.clone()))
                                            >
                                                "Details"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                            .into_any(),
                    }}
                </tbody>
            </table>
        </div>
        <Pager page=page total_pages=total_pages />
        {move || selected.get().map(|employee| view! { <EmployeeDetails employee=employee selected=selected refresh=refresh /> })}
    }
}

#[component]
fn EmployeeDetails(
    employee: Customer,
    selected: RwSignal<Option<Customer>>,
    refresh: RwSignal<u32>,
) -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toast();
    let busy = RwSignal::new(false);
    let enabled = employee.is_enabled();
    let keycloak_id = employee.keycloak_id.clone();

    let toggle = Callback::new(move |()| {
        let Some(user_id) = keycloak_id.clone() else {
            toasts.error("This employee has no sign-in account.");
            return;
        };
        busy.set(true);
        spawn_local(async move {
            let target = !enabled;
            if auth.toggle_user_enabled(&user_id, target).await {
                toasts.success(if target { "Sign-in enabled." } else { "Sign-in disabled." });
                selected.update(|current| {
                    if let Some(current) = current {
                        current.enabled = Some(target);
                    }
                });
                refresh.update(|count| *count += 1);
            } else {
                toasts.error("Could not change the employee's sign-in.");
            }
            busy.set(false);
        });
    });

    let text = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    let address = format!(
        "{}, {}",
        text(&employee.street),
        employee
            .street_number
            .map_or_else(|| "-".to_string(), |number| format!("{number:.0}"))
    );
    let details = [
        ("Name", employee.name.clone()),
        ("CPF", employee.cpf.clone()),
        ("Birth date", text(&employee.birth_date)),
        ("Occupation", text(&employee.occupation)),
        ("Salary", format_brl(employee.salary.unwrap_or_default())),
        ("Email", employee.email.clone()),
        ("Phone", employee.phone.clone()),
        ("Address", address),
        ("Neighborhood", text(&employee.neighborhood)),
        ("City", text(&employee.city)),
        ("State", text(&employee.state)),
        ("ZIP code", text(&employee.zip_code)),
        ("Sign-in", if enabled { "Enabled" } else { "Disabled" }.to_string()),
    ];

    view! {
        <div class="fixed inset-0 z-30 flex items-center justify-center bg-black/40 p-4">
            <div class=format!("{} w-full max-w-2xl p-6 space-y-4", Theme::CARD)>
                <h2 class="text-lg font-semibold text-gray-900 dark:text-white">"Employee details"</h2>
                <dl class="grid gap-3 sm:grid-cols-2 text-sm">
                    {details
                        .into_iter()
                        .map(|(label, value)| {
                            view! {
                                <div>
                                    <dt class="font-medium text-gray-500">{label}</dt>
                                    <dd class="text-gray-900 dark:text-white">{value}</dd>
                                </div>
                            }
                        })
                        .collect_view()}
                </dl>
                <div class="flex justify-end gap-3">
                    <Button variant=ButtonVariant::Secondary on_click=Callback::new(move |()| selected.set(None))>
                        "Close"
                    </Button>
                    <Button
                        variant=if enabled { ButtonVariant::Danger } else { ButtonVariant::Primary }
                        busy=busy
                        busy_label="Saving..."
                        on_click=toggle
                    >
                        {if enabled { "Disable sign-in" } else { "Enable sign-in" }}
                    </Button>
                </div>
            </div>
        </div>
    }
}

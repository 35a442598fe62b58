use crate::app_lib::{paths, theme::Theme};
use leptos::prelude::*;
use leptos_router::components::A;

const SHORTCUTS: [(&str, &str, &str, &str); 2] = [
    (
        "Proposals",
        "Approve or reject credit requests.",
        "assignment",
        paths::PROPOSALS,
    ),
    (
        "Companies",
        "Register and edit partner companies.",
        "business",
        paths::COMPANY_NEW,
    ),
];

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    view! {
        <div class="space-y-6">
            <div class="space-y-1">
                <h1 class=Theme::H1>"Hello, administrator"</h1>
                <p class="text-sm text-gray-500 dark:text-gray-400">"What would you like to do today?"</p>
            </div>
            <div class="grid gap-6 md:grid-cols-2">
                {SHORTCUTS
                    .iter()
                    .map(|(title, description, icon, href)| {
                        view! {
                            <A href=*href {..} class=format!("{} block p-6 hover:shadow-md transition-shadow", Theme::CARD)>
                                <span class="material-symbols-outlined text-3xl text-white bg-blue-600 rounded-full p-3">
                                    {*icon}
                                </span>
                                <h2 class="mt-4 text-lg font-semibold text-gray-900 dark:text-white">{*title}</h2>
                                <p class="text-sm text-gray-500 dark:text-gray-400">{*description}</p>
                            </A>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

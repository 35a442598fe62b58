use crate::{
    app_lib::{paths, theme::Theme},
    features::auth::state::use_auth,
};
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn CompanyDashboardPage() -> impl IntoView {
    let auth = use_auth();
    let company_name = move || {
        auth.session.with(|session| {
            session
                .profile()
                .loaded()
                .map(|profile| profile.display_name().to_string())
                .unwrap_or_default()
        })
    };

    view! {
        <div class="space-y-6">
            <div class="space-y-1">
                <h1 class=Theme::H1>"Company dashboard"</h1>
                <p class="text-sm text-gray-500 dark:text-gray-400">{company_name}</p>
            </div>
            {move || {
                auth.session
                    .with(|session| session.profile().error().map(str::to_string))
                    .map(|reason| {
                        view! {
                            <p class="text-sm text-red-600">
                                {format!("Company profile could not be loaded: {reason}")}
                            </p>
                        }
                    })
            }}
            <div class="grid gap-6 md:grid-cols-3">
                <A href=paths::EMPLOYEE_NEW {..} class=format!("{} block p-6 hover:shadow-md transition-shadow", Theme::CARD)>
                    <span class="material-symbols-outlined text-3xl text-white bg-blue-600 rounded-full p-3">"person_add"</span>
                    <h2 class="mt-4 text-lg font-semibold text-gray-900 dark:text-white">"Register employee"</h2>
                    <p class="text-sm text-gray-500 dark:text-gray-400">"Add a new employee to your company."</p>
                </A>
                <A href=paths::EMPLOYEES {..} class=format!("{} block p-6 hover:shadow-md transition-shadow", Theme::CARD)>
                    <span class="material-symbols-outlined text-3xl text-white bg-purple-600 rounded-full p-3">"group"</span>
                    <h2 class="mt-4 text-lg font-semibold text-gray-900 dark:text-white">"Employees"</h2>
                    <p class="text-sm text-gray-500 dark:text-gray-400">"Review employees and manage their access."</p>
                </A>
            </div>
        </div>
    }
}

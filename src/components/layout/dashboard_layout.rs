//! Shell for every dashboard page: header with sign-out, role menu and the
//! nested route outlet.

use crate::{
    components::layout::Sidebar,
    features::auth::state::use_auth,
};
use leptos::prelude::*;
use leptos_router::components::Outlet;

#[component]
pub fn DashboardLayout() -> impl IntoView {
    let auth = use_auth();
    let menu_open = RwSignal::new(false);
    let greeting = move || {
        auth.session.with(|session| {
            session
                .identity()
                .map(|identity| identity.display_name().to_string())
                .unwrap_or_default()
        })
    };

    view! {
        <div class="min-h-screen flex flex-col">
            <header class="border-b border-gray-200 dark:border-gray-800 bg-white dark:bg-gray-900">
                <div class="flex items-center justify-between px-4 py-3">
                    <div class="flex items-center gap-3">
                        <button
                            type="button"
                            class="inline-flex items-center p-2 w-10 h-10 justify-center text-gray-500 rounded-lg md:hidden hover:bg-gray-100"
                            aria-label="Open menu"
                            aria-expanded=move || menu_open.get().to_string()
                            on:click=move |_| menu_open.update(|open| *open = !*open)
                        >
                            <span class="material-symbols-outlined">"menu"</span>
                        </button>
                        <span class="text-lg font-semibold text-gray-900 dark:text-white">
                            "CrediFlow"
                        </span>
                    </div>
                    <div class="flex items-center gap-4">
                        <span class="hidden sm:inline text-sm text-gray-500 dark:text-gray-400">
                            {greeting}
                        </span>
                        <button
                            type="button"
                            class="text-sm font-medium text-gray-900 hover:text-blue-700 dark:text-white"
                            on:click=move |_| auth.logout()
                        >
                            "Sign Out"
                        </button>
                    </div>
                </div>
            </header>
            <div class="flex flex-1">
                <Sidebar open=menu_open />
                <main class="flex-1 p-6 flex flex-col">
                    <div class="flex-1">
                        <Outlet />
                    </div>
                    <p class="pt-8 text-center text-xs text-gray-400">"© CrediFlow"</p>
                </main>
            </div>
        </div>
    }
}

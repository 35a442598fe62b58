//! Side navigation. Entries come from the resolved role's menu.

use crate::{
    app_lib::GIT_COMMIT_HASH,
    features::auth::{roles::MenuItem, state::use_auth},
};
use leptos::prelude::*;
use leptos_router::{components::A, hooks::use_location};

#[component]
pub fn Sidebar(open: RwSignal<bool>) -> impl IntoView {
    let auth = use_auth();
    let menu = Memo::new(move |_| auth.session.with(|session| session.role().menu()));

    view! {
        <aside
            class="w-64 flex-shrink-0 flex-col border-r border-gray-200 dark:border-gray-800 bg-white dark:bg-gray-900 overflow-y-auto md:flex"
            class:hidden=move || !open.get()
            class:flex=move || open.get()
        >
            <nav class="flex-1 px-4 py-6 space-y-1">
                <For
                    each=move || menu.get().iter().copied()
                    key=|item| item.path
                    children=move |item| {
                        view! { <SidebarLink item=item open=open /> }
                    }
                />
            </nav>
            <div class="p-4 border-t border-gray-100 dark:border-gray-800">
                <p class="text-[10px] text-gray-400 font-mono text-center uppercase tracking-tighter">
                    {format!("CrediFlow {}", GIT_COMMIT_HASH)}
                </p>
            </div>
        </aside>
    }
}

#[component]
fn SidebarLink(item: MenuItem, open: RwSignal<bool>) -> impl IntoView {
    let location = use_location();
    let active = Memo::new(move |_| location.pathname.get() == item.path);

    view! {
        <A
            href=item.path
            {..}
            class="group flex items-center px-2 py-2 text-sm font-medium rounded-md transition-colors"
            class:text-blue-600=move || active.get()
            class:bg-blue-50=move || active.get()
            class:text-gray-600=move || !active.get()
            class:hover:bg-gray-50=move || !active.get()
            on:click=move |_| open.set(false)
        >
            <span class="material-symbols-outlined mr-3 text-xl">{item.icon}</span>
            {item.label}
        </A>
    }
}

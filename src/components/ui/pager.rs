use crate::app_lib::PageQuery;
use leptos::prelude::*;

/// Previous/next controls for a server-side paged list.
#[component]
pub fn Pager(
    page: RwSignal<PageQuery>,
    #[prop(into)] total_pages: Signal<u32>,
) -> impl IntoView {
    let has_previous = move || page.with(|query| query.page > 0);
    let has_next = move || page.with(|query| query.page.saturating_add(1) < total_pages.get());
    let button = "px-3 py-1.5 text-sm font-medium text-gray-900 bg-white border border-gray-200 rounded-lg hover:bg-gray-100 disabled:opacity-50 disabled:cursor-not-allowed dark:bg-gray-800 dark:text-gray-300 dark:border-gray-600";

    view! {
        <div class="flex items-center justify-center gap-4 py-4">
            <button
                type="button"
                class=button
                disabled=move || !has_previous()
                on:click=move |_| page.update(|query| *query = query.previous())
            >
                "Previous"
            </button>
            <span class="text-sm text-gray-600 dark:text-gray-400">
                {move || format!("Page {} of {}", page.with(|query| query.page).saturating_add(1), total_pages.get())}
            </span>
            <button
                type="button"
                class=button
                disabled=move || !has_next()
                on:click=move |_| page.update(|query| *query = query.next())
            >
                "Next"
            </button>
        </div>
    }
}

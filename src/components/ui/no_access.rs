use leptos::prelude::*;

/// Shown to signed-in users without any role this application knows.
#[component]
pub fn NoAccess() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[50vh] text-center px-4">
            <span class="material-symbols-outlined text-6xl text-gray-300 mb-4">"block"</span>
            <h2 class="text-2xl font-bold text-gray-900 dark:text-white mb-2">"No access"</h2>
            <p class="text-gray-500 dark:text-gray-400 max-w-sm text-sm">
                "Your account has no role in CrediFlow yet. Contact your administrator."
            </p>
        </div>
    }
}

//! Alert banners for feedback messages. Messages are shown as-is and must
//! never include tokens.

use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Error,
    Warning,
    Success,
    Info,
}

impl AlertKind {
    pub(crate) fn class(self) -> &'static str {
        match self {
            AlertKind::Error => {
                "rounded-lg border border-red-200 bg-red-50 px-4 py-3 text-sm text-red-700 dark:border-red-400 dark:bg-red-900/30 dark:text-red-200"
            }
            AlertKind::Warning => {
                "rounded-lg border border-amber-200 bg-amber-50 px-4 py-3 text-sm text-amber-800 dark:border-amber-400 dark:bg-amber-900/30 dark:text-amber-200"
            }
            AlertKind::Success => {
                "rounded-lg border border-emerald-200 bg-emerald-50 px-4 py-3 text-sm text-emerald-700 dark:border-emerald-400 dark:bg-emerald-900/30 dark:text-emerald-200"
            }
            AlertKind::Info => {
                "rounded-lg border border-blue-200 bg-blue-50 px-4 py-3 text-sm text-blue-700 dark:border-blue-400 dark:bg-blue-900/30 dark:text-blue-200"
            }
        }
    }
}

#[component]
pub fn Alert(kind: AlertKind, message: String) -> impl IntoView {
    view! { <div class=kind.class() role="alert">{message}</div> }
}

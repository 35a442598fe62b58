//! Transient notifications shared by all pages. One toast is visible at a
//! time and hides itself after a few seconds.

use super::alert::AlertKind;
use leptos::prelude::*;
use std::time::Duration;

const AUTO_HIDE: Duration = Duration::from_secs(6);

#[derive(Clone, Debug, PartialEq)]
struct Toast {
    id: u64,
    kind: AlertKind,
    message: String,
}

/// Handle for showing toasts.
#[derive(Clone, Copy)]
pub struct Toasts {
    current: RwSignal<Option<Toast>>,
    counter: StoredValue<u64>,
}

impl Toasts {
    fn new() -> Self {
        Self {
            current: RwSignal::new(None),
            counter: StoredValue::new(0),
        }
    }

    pub fn show(&self, kind: AlertKind, message: impl Into<String>) {
        self.counter.update_value(|counter| *counter += 1);
        let id = self.counter.get_value();
        self.current.set(Some(Toast {
            id,
            kind,
            message: message.into(),
        }));
        let current = self.current;
        set_timeout(
            move || {
                // A newer toast keeps its own timer.
                if current.with_untracked(|toast| toast.as_ref().map(|t| t.id)) == Some(id) {
                    current.set(None);
                }
            },
            AUTO_HIDE,
        );
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(AlertKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(AlertKind::Error, message);
    }

    fn dismiss(&self) {
        self.current.set(None);
    }
}

#[component]
pub fn ToastProvider(children: Children) -> impl IntoView {
    let toasts = Toasts::new();
    provide_context(toasts);

    view! {
        {children()}
        {move || {
            toasts
                .current
                .get()
                .map(|toast| {
                    view! {
                        <div class="fixed bottom-4 left-4 z-50 max-w-sm shadow-lg">
                            <div class=format!("{} flex items-start gap-3", toast.kind.class()) role="alert">
                                <span class="flex-1">{toast.message}</span>
                                <button
                                    type="button"
                                    class="material-symbols-outlined text-base"
                                    aria-label="Dismiss"
                                    on:click=move |_| toasts.dismiss()
                                >
                                    "close"
                                </button>
                            </div>
                        </div>
                    }
                })
        }}
    }
}

pub fn use_toast() -> Toasts {
    use_context::<Toasts>().unwrap_or_else(Toasts::new)
}

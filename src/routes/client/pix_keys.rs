//! PIX keys of the client's account: list, add, edit, delete.

use crate::{
    app_lib::theme::Theme,
    components::{Alert, AlertKind, Button, ButtonVariant, SelectField, Spinner, TextField, use_toast},
    features::{
        auth::state::{use_auth, use_bank_account},
        pix_keys::{self, PixKey, PixKeyRequest, PixKeyType},
    },
};
use leptos::{prelude::*, task::spawn_local};

#[component]
pub fn PixKeyManager() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toast();
    let account = use_bank_account();
    let refresh = RwSignal::new(0_u32);
    let editing = RwSignal::new(None::<Option<i64>>);
    let key = RwSignal::new(String::new());
    let key_type = RwSignal::new(PixKeyType::Cpf.as_str().to_string());

    let keys = LocalResource::new(move || {
        let account_id = account.get().map(|account| account.id);
        refresh.track();
        async move {
            match account_id {
                Some(id) => pix_keys::client::list(&auth.api(), id).await.map(Some),
                None => Ok(None),
            }
        }
    });

    let open_editor = move |existing: Option<PixKey>| {
        match &existing {
            Some(pix) => {
                key.set(pix.pix_key.clone());
                key_type.set(pix.key_type.as_str().to_string());
            }
            None => {
                key.set(String::new());
                key_type.set(PixKeyType::Cpf.as_str().to_string());
            }
        }
        editing.set(Some(existing.map(|pix| pix.id)));
    };

    let save = Callback::new(move |()| {
        let Some(target) = editing.get_untracked() else {
            return;
        };
        let Some(account_id) = account.get_untracked().map(|account| account.id) else {
            return;
        };
        let kind = PixKeyType::parse(&key_type.get_untracked()).unwrap_or(PixKeyType::Cpf);
        let request = match PixKeyRequest::new(account_id, &key.get_untracked(), kind) {
            Ok(request) => request,
            Err(err) => {
                toasts.error(err.to_string());
                return;
            }
        };
        spawn_local(async move {
            let api = auth.api();
            let result = match target {
                Some(id) => pix_keys::client::update(&api, id, &request).await,
                None => pix_keys::client::create(&api, &request).await,
            };
            match result {
                Ok(()) => {
                    toasts.success("PIX key saved.");
                    editing.set(None);
                    refresh.update(|count| *count += 1);
                }
                Err(err) => toasts.error(format!("Could not save PIX key: {err}")),
            }
        });
    });

    let remove = move |id: i64| {
        spawn_local(async move {
            match pix_keys::client::delete(&auth.api(), id).await {
                Ok(()) => {
                    toasts.success("PIX key removed.");
                    refresh.update(|count| *count += 1);
                }
                Err(err) => toasts.error(format!("Could not remove PIX key: {err}")),
            }
        });
    };

    let type_options = PixKeyType::ALL
        .iter()
        .map(|kind| (kind.as_str(), kind.as_str()))
        .collect::<Vec<_>>();

    view! {
        <div class="rounded-lg border border-gray-200 dark:border-gray-700 p-4 space-y-3">
            <div class="flex items-center justify-between">
                <h2 class="font-semibold text-gray-900 dark:text-white">"My PIX keys"</h2>
                <Button variant=ButtonVariant::Secondary on_click=Callback::new(move |()| open_editor(None))>
                    "Add key"
                </Button>
            </div>
            {move || match keys.get() {
                None => view! { <Spinner small=true /> }.into_any(),
                Some(Err(err)) => view! { <Alert kind=AlertKind::Error message=err.to_string() /> }.into_any(),
                Some(Ok(None)) => view! { <p class="text-sm text-gray-500">"Your account is not loaded yet."</p> }.into_any(),
                Some(Ok(Some(list))) if list.is_empty() => {
                    view! { <p class="text-sm text-gray-500">"No PIX keys registered."</p> }.into_any()
                }
                Some(Ok(Some(list))) => view! {
                    <ul class="divide-y divide-gray-200 dark:divide-gray-700">
                        {list
                            .into_iter()
                            .map(|pix| {
                                let id = pix.id;
                                let existing = pix.clone();
                                view! {
                                    <li class="flex items-center justify-between py-2">
                                        <div>
                                            <p class="text-sm font-medium text-gray-900 dark:text-white">{pix.pix_key.clone()}</p>
                                            <p class="text-xs text-gray-500">{format!("Type: {}", pix.key_type.as_str())}</p>
                                        </div>
                                        <div class="flex gap-3">
                                            <button type="button" class=Theme::LINK on:click=move |_| open_editor(Some(existing.clone()))>
                                                "Edit"
                                            </button>
                                            <button type="button" class="text-red-600 text-sm font-medium" on:click=move |_| remove(id)>
                                                "Delete"
                                            </button>
                                        </div>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                }
                .into_any(),
            }}
            <Show when=move || editing.get().is_some()>
                <div class="grid gap-3 sm:grid-cols-2">
                    <TextField label="Key" value=key required=true />
                    <SelectField label="Type" value=key_type options=type_options.clone() />
                </div>
                <div class="flex justify-end gap-3">
                    <Button variant=ButtonVariant::Secondary on_click=Callback::new(move |()| editing.set(None))>
                        "Cancel"
                    </Button>
                    <Button on_click=save>"Save key"</Button>
                </div>
            </Show>
        </div>
    }
}

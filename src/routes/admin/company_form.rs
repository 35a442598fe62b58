//! Partner-company registration for administrators: create/edit form on top,
//! searchable paged list below. `/dashboard/empresas/editar/:id` loads the
//! company into the form.

use crate::{
    app_lib::{AppError, PageQuery, paths, theme::Theme},
    components::{Alert, AlertKind, Button, ButtonVariant, Pager, SelectField, Spinner, TextField, use_toast},
    features::{
        auth::state::use_auth,
        companies::{self, Company, CompanyRequest},
    },
};
use leptos::{ev::SubmitEvent, prelude::*, task::spawn_local};
use leptos_router::{
    components::A,
    hooks::{use_navigate, use_params_map},
};
use tracing::info;

#[derive(Clone, Copy)]
struct CompanyFields {
    name: RwSignal<String>,
    cnpj: RwSignal<String>,
    responsible: RwSignal<String>,
    email: RwSignal<String>,
    phone: RwSignal<String>,
    convenio_type: RwSignal<String>,
}

impl CompanyFields {
    fn new() -> Self {
        let defaults = CompanyRequest::default();
        Self {
            name: RwSignal::new(defaults.name),
            cnpj: RwSignal::new(defaults.cnpj),
            responsible: RwSignal::new(defaults.responsible),
            email: RwSignal::new(defaults.email),
            phone: RwSignal::new(defaults.phone),
            convenio_type: RwSignal::new(defaults.convenio_type),
        }
    }

    fn fill(&self, request: CompanyRequest) {
        self.name.set(request.name);
        self.cnpj.set(request.cnpj);
        self.responsible.set(request.responsible);
        self.email.set(request.email);
        self.phone.set(request.phone);
        self.convenio_type.set(request.convenio_type);
    }

    fn request(&self) -> CompanyRequest {
        CompanyRequest {
            name: self.name.get_untracked(),
            cnpj: self.cnpj.get_untracked(),
            responsible: self.responsible.get_untracked(),
            email: self.email.get_untracked(),
            phone: self.phone.get_untracked(),
            convenio_type: self.convenio_type.get_untracked(),
        }
    }
}

#[component]
pub fn CompanyFormPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toast();
    let navigate = use_navigate();
    let params = use_params_map();
    let editing = Memo::new(move |_| {
        params.with(|params| params.get_str("id").and_then(|id| id.parse::<i64>().ok()))
    });

    let fields = CompanyFields::new();
    let (load_error, set_load_error) = signal::<Option<AppError>>(None);
    let (form_error, set_form_error) = signal::<Option<AppError>>(None);
    let refresh = RwSignal::new(0_u32);

    Effect::new(move |_| {
        set_load_error.set(None);
        match editing.get() {
            Some(id) => spawn_local(async move {
                match companies::client::get(&auth.api(), id).await {
                    Ok(company) => fields.fill(CompanyRequest::from(&company)),
                    Err(err) => set_load_error.set(Some(err)),
                }
            }),
            None => fields.fill(CompanyRequest::default()),
        }
    });

    let save = Action::new_local(move |(id, request): &(Option<i64>, CompanyRequest)| {
        let (id, request) = (*id, request.clone());
        async move {
            let api = auth.api();
            match id {
                Some(id) => companies::client::update(&api, id, &request).await,
                None => companies::client::create(&api, &request).await,
            }
        }
    });

    Effect::new(move |_| {
        if let Some(result) = save.value().get() {
            match result {
                Ok(company) => {
                    info!(company = company.id, "company saved");
                    toasts.success("Company saved.");
                    fields.fill(CompanyRequest::default());
                    refresh.update(|count| *count += 1);
                    navigate(paths::COMPANY_NEW, Default::default());
                }
                Err(err) => set_form_error.set(Some(err)),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_form_error.set(None);
        match fields.request().normalized() {
            Ok(request) => {
                save.dispatch((editing.get_untracked(), request));
            }
            Err(err) => set_form_error.set(Some(err)),
        }
    };

    view! {
        <div class="space-y-8">
            <form class=format!("{} p-6 space-y-4", Theme::CARD) on:submit=on_submit novalidate>
                <h1 class=Theme::H1>
                    {move || if editing.get().is_some() { "Edit company" } else { "Register new company" }}
                </h1>
                {move || load_error.get().map(|err| view! { <Alert kind=AlertKind::Error message=err.to_string() /> })}
                <div class="grid gap-4 sm:grid-cols-2">
                    <TextField label="Company name" value=fields.name required=true />
                    <TextField label="CNPJ" value=fields.cnpj required=true placeholder="00.000.000/0000-00" />
                    <TextField label="Email" value=fields.email input_type="email" />
                    <TextField label="Phone" value=fields.phone />
                    <TextField label="Responsible" value=fields.responsible />
                    <SelectField
                        label="Type"
                        value=fields.convenio_type
                        options=vec![("PUBLIC", "Public"), ("PRIVATE", "Private")]
                    />
                </div>
                {move || form_error.get().map(|err| view! { <Alert kind=AlertKind::Error message=err.to_string() /> })}
                <Button button_type="submit" busy=save.pending() busy_label="Saving...">
                    {move || if editing.get().is_some() { "Save changes" } else { "Register company" }}
                </Button>
            </form>
            <CompanyList refresh=refresh />
        </div>
    }
}

#[component]
fn CompanyList(refresh: RwSignal<u32>) -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toast();
    let search = RwSignal::new(String::new());
    let page = RwSignal::new(PageQuery::default());

    let companies = LocalResource::new(move || {
        let query = search.get();
        let current = page.get();
        refresh.track();
        async move { companies::client::search(&auth.api(), &query, current).await }
    });
    let total_pages = Signal::derive(move || {
        companies
            .get()
            .and_then(|result| result.ok())
            .map_or(1, |paged| paged.total_pages())
    });

    let remove = move |company: Company| {
        let confirmed = window()
            .confirm_with_message(&format!("Delete {}?", company.name))
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match companies::client::delete(&auth.api(), company.id).await {
                Ok(()) => {
                    toasts.success("Company deleted.");
                    refresh.update(|count| *count += 1);
                }
                Err(err) => toasts.error(format!("Could not delete company: {err}")),
            }
        });
    };

    view! {
        <section class=format!("{} p-6 space-y-4", Theme::CARD)>
            <div class="flex flex-wrap items-center justify-between gap-4">
                <h2 class="text-lg font-semibold text-gray-900 dark:text-white">"Registered companies"</h2>
                <input
                    type="search"
                    class=format!("{} max-w-xs", Theme::INPUT)
                    placeholder="Search by name or CNPJ"
                    prop:value=move || search.get()
                    on:input=move |ev| {
                        search.set(event_target_value(&ev));
                        page.update(|query| query.page = 0);
                    }
                />
            </div>
            <div class="overflow-x-auto">
                <table class="min-w-full divide-y divide-gray-200 dark:divide-gray-700">
                    <thead class="bg-gray-50 dark:bg-gray-900/50">
                        <tr>
                            <th class=Theme::TH>"ID"</th>
                            <th class=Theme::TH>"Name"</th>
                            <th class=Theme::TH>"CNPJ"</th>
                            <th class=Theme::TH>"Email"</th>
                            <th class=Theme::TH>"Phone"</th>
                            <th class=Theme::TH>"Responsible"</th>
                            <th class=Theme::TH>"Type"</th>
                            <th class=Theme::TH>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-gray-200 dark:divide-gray-700">
                        {move || match companies.get() {
                            None => view! {
                                <tr><td colspan="8" class="px-6 py-12 text-center"><Spinner /></td></tr>
                            }
                            .into_any(),
                            Some(Err(err)) => view! {
                                <tr><td colspan="8" class="px-6 py-4"><Alert kind=AlertKind::Error message=err.to_string() /></td></tr>
                            }
                            .into_any(),
                            Some(Ok(paged)) if paged.items.is_empty() => view! {
                                <tr><td colspan="8" class="px-6 py-12 text-center text-sm text-gray-500">"No companies found."</td></tr>
                            }
                            .into_any(),
                            Some(Ok(paged)) => paged
                                .items
                                .into_iter()
                                .map(|company| {
                                    let target = company.clone();
                                    view! {
                                        <tr class="hover:bg-gray-50 dark:hover:bg-gray-700/50">
                                            <td class=Theme::TD>{company.id}</td>
                                            <td class=Theme::TD>{company.name.clone()}</td>
                                            <td class=Theme::TD>{company.cnpj.clone()}</td>
                                            <td class=Theme::TD>{company.email.clone()}</td>
                                            <td class=Theme::TD>{company.phone.clone()}</td>
                                            <td class=Theme::TD>{company.responsible.clone()}</td>
                                            <td class=Theme::TD>{company.convenio_type.clone()}</td>
                                            <td class=format!("{} space-x-3", Theme::TD)>
                                                <A href=paths::company_edit(company.id) {..} class=Theme::LINK>"Edit"</A>
                                                <Button
                                                    variant=ButtonVariant::Danger
                                                    on_click=Callback::new(move |()| remove(target.clone()))
                                                >
                                                    "Delete"
                                                </Button>
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
        </section>
    }
}

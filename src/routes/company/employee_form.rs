//! Employee registration for company users. New employees are attached to the
//! signed-in company; `/dashboard/funcionarios/editar/:id` edits one.

use super::employees::EmployeeList;
use crate::{
    app_lib::{AppError, format::parse_amount, paths, theme::Theme},
    components::{Alert, AlertKind, Button, TextField, use_toast},
    features::{
        auth::state::use_auth,
        customers::{self, CustomerRequest},
    },
};
use leptos::{ev::SubmitEvent, prelude::*, task::spawn_local};
use leptos_router::hooks::{use_navigate, use_params_map};
use tracing::info;

#[derive(Clone, Copy)]
struct EmployeeFields {
    name: RwSignal<String>,
    cpf: RwSignal<String>,
    email: RwSignal<String>,
    phone: RwSignal<String>,
    birth_date: RwSignal<String>,
    occupation: RwSignal<String>,
    salary: RwSignal<String>,
    zip_code: RwSignal<String>,
    street: RwSignal<String>,
    street_number: RwSignal<String>,
    neighborhood: RwSignal<String>,
    city: RwSignal<String>,
    state: RwSignal<String>,
    country: RwSignal<String>,
}

impl EmployeeFields {
    fn new() -> Self {
        let fields = Self {
            name: RwSignal::new(String::new()),
            cpf: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            phone: RwSignal::new(String::new()),
            birth_date: RwSignal::new(String::new()),
            occupation: RwSignal::new(String::new()),
            salary: RwSignal::new(String::new()),
            zip_code: RwSignal::new(String::new()),
            street: RwSignal::new(String::new()),
            street_number: RwSignal::new(String::new()),
            neighborhood: RwSignal::new(String::new()),
            city: RwSignal::new(String::new()),
            state: RwSignal::new(String::new()),
            country: RwSignal::new(String::new()),
        };
        fields.fill(&CustomerRequest::default());
        fields
    }

    fn fill(&self, request: &CustomerRequest) {
        self.name.set(request.name.clone());
        self.cpf.set(request.cpf.clone());
        self.email.set(request.email.clone());
        self.phone.set(request.phone.clone());
        self.birth_date.set(request.birth_date.clone().unwrap_or_default());
        self.occupation.set(request.occupation.clone());
        self.salary.set(if request.salary > 0.0 {
            format!("{:.2}", request.salary)
        } else {
            String::new()
        });
        self.zip_code.set(request.zip_code.clone());
        self.street.set(request.street.clone());
        self.street_number
            .set(request.street_number.map(|n| n.to_string()).unwrap_or_default());
        self.neighborhood.set(request.neighborhood.clone());
        self.city.set(request.city.clone());
        self.state.set(request.state.clone());
        self.country.set(request.country.clone());
    }

    fn request(&self, company_id: Option<i64>) -> CustomerRequest {
        let text = |signal: RwSignal<String>| signal.get_untracked().trim().to_string();
        let birth_date = text(self.birth_date);
        CustomerRequest {
            name: text(self.name),
            cpf: text(self.cpf),
            email: text(self.email),
            phone: text(self.phone),
            birth_date: (!birth_date.is_empty()).then_some(birth_date),
            company_id,
            occupation: text(self.occupation),
            street: text(self.street),
            street_number: text(self.street_number).parse().ok(),
            city: text(self.city),
            neighborhood: text(self.neighborhood),
            state: text(self.state),
            zip_code: text(self.zip_code),
            country: text(self.country),
            salary: parse_amount(&text(self.salary)).unwrap_or_default(),
        }
    }
}

#[component]
pub fn EmployeeFormPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toast();
    let navigate = use_navigate();
    let params = use_params_map();
    let editing = Memo::new(move |_| {
        params.with(|params| params.get_str("id").and_then(|id| id.parse::<i64>().ok()))
    });
    let company_id = Memo::new(move |_| {
        auth.session
            .with(|session| session.profile().loaded().and_then(|profile| profile.company_id()))
    });

    let fields = EmployeeFields::new();
    let (error, set_error) = signal::<Option<AppError>>(None);
    let refresh = RwSignal::new(0_u32);

    Effect::new(move |_| {
        set_error.set(None);
        match editing.get() {
            Some(id) => spawn_local(async move {
                match customers::client::get(&auth.api(), id).await {
                    Ok(customer) => fields.fill(&CustomerRequest::from(&customer)),
                    Err(err) => {
                        toasts.error(format!("Could not load employee: {err}"));
                        set_error.set(Some(err));
                    }
                }
            }),
            None => fields.fill(&CustomerRequest::default()),
        }
    });

    let save = Action::new_local(move |(id, request): &(Option<i64>, CustomerRequest)| {
        let (id, request) = (*id, request.clone());
        async move {
            let api = auth.api();
            match id {
                Some(id) => customers::client::update(&api, id, &request).await,
                None => customers::client::create(&api, &request).await,
            }
        }
    });

    Effect::new(move |_| {
        if let Some(result) = save.value().get() {
            match result {
                Ok(customer) => {
                    info!(customer = customer.id, "employee saved");
                    toasts.success("Employee saved.");
                    fields.fill(&CustomerRequest::default());
                    refresh.update(|count| *count += 1);
                    navigate(paths::EMPLOYEE_NEW, Default::default());
                }
                Err(err) => {
                    toasts.error(format!("Could not save employee: {err}"));
                    set_error.set(Some(err));
                }
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);
        let request = fields.request(company_id.get_untracked());
        match request.validate() {
            Ok(()) => {
                save.dispatch((editing.get_untracked(), request));
            }
            Err(err) => set_error.set(Some(err)),
        }
    };

    view! {
        <div class="space-y-8">
            <form class=format!("{} p-6 space-y-6", Theme::CARD) on:submit=on_submit novalidate>
                <h1 class=Theme::H1>
                    {move || if editing.get().is_some() { "Edit employee" } else { "New employee" }}
                </h1>
                <fieldset class="space-y-4">
                    <legend class="text-lg font-semibold text-gray-900 dark:text-white">"Personal data"</legend>
                    <div class="grid gap-4 sm:grid-cols-2">
                        <TextField label="Full name" value=fields.name required=true />
                        <TextField label="CPF" value=fields.cpf required=true placeholder="000.000.000-00" />
                        <TextField label="Email" value=fields.email input_type="email" required=true />
                        <TextField label="Phone" value=fields.phone required=true placeholder="+5581999990000" />
                        <TextField label="Birth date" value=fields.birth_date input_type="date" />
                        <TextField label="Occupation" value=fields.occupation required=true />
                        <TextField label="Salary" value=fields.salary required=true placeholder="3500,00" />
                    </div>
                </fieldset>
                <fieldset class="space-y-4">
                    <legend class="text-lg font-semibold text-gray-900 dark:text-white">"Address"</legend>
                    <div class="grid gap-4 sm:grid-cols-3">
                        <TextField label="ZIP code" value=fields.zip_code required=true placeholder="00000-000" />
                        <TextField label="Street" value=fields.street required=true />
                        <TextField label="Number" value=fields.street_number input_type="number" required=true />
                        <TextField label="Neighborhood" value=fields.neighborhood required=true />
                        <TextField label="City" value=fields.city required=true />
                        <TextField label="State" value=fields.state required=true />
                        <TextField label="Country" value=fields.country required=true />
                    </div>
                </fieldset>
                {move || error.get().map(|err| view! { <Alert kind=AlertKind::Error message=err.to_string() /> })}
                <Button button_type="submit" busy=save.pending() busy_label="Saving...">
                    {move || if editing.get().is_some() { "Save changes" } else { "Register employee" }}
                </Button>
            </form>
            <section class=format!("{} p-6 space-y-4", Theme::CARD)>
                <h2 class="text-lg font-semibold text-gray-900 dark:text-white">"Employees"</h2>
                <EmployeeList refresh=refresh />
            </section>
        </div>
    }
}

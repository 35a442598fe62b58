//! Route table. Every dashboard page sits behind [`RequireRole`]; the guard
//! only shapes navigation, the backend authorizes each request.

mod admin;
mod client;
mod company;
mod home;
mod login;

use crate::{
    app_lib::paths,
    components::layout::DashboardLayout,
    features::auth::{RequireRole, Role},
};
use leptos::prelude::*;
use leptos_router::{
    components::{ParentRoute, Redirect, Route, Routes},
    path,
};

pub(crate) use home::HomeRedirect;
pub(crate) use login::LoginPage;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <Redirect path=paths::ROOT /> }>
            <Route path=path!("/") view=HomeRedirect />
            <Route path=path!("/login") view=LoginPage />
            <ParentRoute
                path=path!("/dashboard")
                view=|| view! { <RequireRole><DashboardLayout /></RequireRole> }
            >
                <Route path=path!("") view=HomeRedirect />

                <Route path=path!("admin") view=|| view! { <RequireRole roles=vec![Role::Admin]><admin::AdminDashboardPage /></RequireRole> } />
                <Route path=path!("propostas") view=|| view! { <RequireRole roles=vec![Role::Admin]><admin::ProposalsPage /></RequireRole> } />
                <Route path=path!("empresas/nova") view=|| view! { <RequireRole roles=vec![Role::Admin]><admin::CompanyFormPage /></RequireRole> } />
                <Route path=path!("empresas/editar/:id") view=|| view! { <RequireRole roles=vec![Role::Admin]><admin::CompanyFormPage /></RequireRole> } />

                <Route path=path!("company") view=|| view! { <RequireRole roles=vec![Role::Company]><company::CompanyDashboardPage /></RequireRole> } />
                <Route path=path!("funcionarios") view=|| view! { <RequireRole roles=vec![Role::Company]><company::EmployeesPage /></RequireRole> } />
                <Route path=path!("funcionarios/novo") view=|| view! { <RequireRole roles=vec![Role::Company]><company::EmployeeFormPage /></RequireRole> } />
                <Route path=path!("funcionarios/editar/:id") view=|| view! { <RequireRole roles=vec![Role::Company]><company::EmployeeFormPage /></RequireRole> } />

                <Route path=path!("client") view=|| view! { <RequireRole roles=vec![Role::Client]><client::ClientDashboardPage /></RequireRole> } />
                <Route path=path!("transactions") view=|| view! { <RequireRole roles=vec![Role::Client]><client::TransferPage /></RequireRole> } />
                <Route path=path!("extrato") view=|| view! { <RequireRole roles=vec![Role::Client]><client::StatementPage /></RequireRole> } />
                <Route path=path!("credito") view=|| view! { <RequireRole roles=vec![Role::Client]><client::LoansPage /></RequireRole> } />
            </ParentRoute>
        </Routes>
    }
}

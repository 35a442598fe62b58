use crate::{
    app_lib::config::AppConfig,
    components::{ToastProvider, WelcomeDialog},
    features::auth::state::AuthProvider,
    routes::AppRoutes,
};
use leptos::prelude::*;
use leptos_router::components::Router;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    view! {
        <AuthProvider config=config>
            <ToastProvider>
                <Router>
                    <AppRoutes />
                </Router>
                <WelcomeDialog />
            </ToastProvider>
        </AuthProvider>
    }
}

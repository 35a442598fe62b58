//! Client-side route paths. Dashboards are role-scoped under `/dashboard`.

use url::form_urlencoded;

pub const ROOT: &str = "/";
pub const LOGIN: &str = "/login";
pub const DASHBOARD: &str = "/dashboard";

pub const ADMIN_DASHBOARD: &str = "/dashboard/admin";
pub const PROPOSALS: &str = "/dashboard/propostas";
pub const COMPANY_NEW: &str = "/dashboard/empresas/nova";

pub const COMPANY_DASHBOARD: &str = "/dashboard/company";
pub const EMPLOYEES: &str = "/dashboard/funcionarios";
pub const EMPLOYEE_NEW: &str = "/dashboard/funcionarios/novo";

pub const CLIENT_DASHBOARD: &str = "/dashboard/client";
pub const TRANSFERS: &str = "/dashboard/transactions";
pub const STATEMENT: &str = "/dashboard/extrato";
pub const LOANS: &str = "/dashboard/credito";

/// Query parameter carrying the location a visitor tried to open.
pub const RETURN_PARAM: &str = "from";

#[must_use]
pub fn company_edit(id: i64) -> String {
    format!("/dashboard/empresas/editar/{id}")
}

#[must_use]
pub fn employee_edit(id: i64) -> String {
    format!("/dashboard/funcionarios/editar/{id}")
}

/// Login path that remembers where the visitor was going.
#[must_use]
pub fn login_with_return(from: &str) -> String {
    let from = from.trim();
    if from.is_empty() || from == LOGIN {
        return LOGIN.to_string();
    }
    let encoded: String = form_urlencoded::byte_serialize(from.as_bytes()).collect();
    format!("{LOGIN}?{RETURN_PARAM}={encoded}")
}

/// Post-login target. Only same-origin absolute paths are honoured.
#[must_use]
pub fn return_target(from: Option<&str>) -> String {
    match from.map(str::trim) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && path != LOGIN => {
            path.to_string()
        }
        _ => DASHBOARD.to_string(),
    }
}

//! Client helpers for `/customers`.

use crate::{
    app_lib::{ApiClient, AppError, PageQuery, PagedResult},
    features::customers::types::{Customer, CustomerRequest},
};

pub async fn get(api: &ApiClient, id: i64) -> Result<Customer, AppError> {
    api.get_json(&format!("/customers/{id}")).await
}

/// Customer record linked to an identity-provider user.
pub async fn by_identity(api: &ApiClient, subject: &str) -> Result<Customer, AppError> {
    api.get_json(&format!("/customers/keycloak/{}", subject.trim()))
        .await
}

/// Employees of the company whose identity-provider user is `company_subject`.
pub async fn by_company(
    api: &ApiClient,
    company_subject: &str,
    page: PageQuery,
) -> Result<PagedResult<Customer>, AppError> {
    let subject = company_subject.trim();
    if subject.is_empty() {
        return Err(AppError::Validation("Company is required.".to_string()));
    }
    api.get_json_with_query(&format!("/customers/company/{subject}"), &page)
        .await
}

pub async fn create(api: &ApiClient, request: &CustomerRequest) -> Result<Customer, AppError> {
    request.validate()?;
    api.post_json("/customers", request).await
}

pub async fn update(
    api: &ApiClient,
    id: i64,
    request: &CustomerRequest,
) -> Result<Customer, AppError> {
    request.validate()?;
    api.put_json(&format!("/customers/{id}"), request).await
}

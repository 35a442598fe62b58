//! Client helpers for `/companies`.

use crate::{
    app_lib::{ApiClient, AppError, PageQuery, PagedResult},
    features::companies::types::{Company, CompanyRequest},
};
use serde::Serialize;

#[derive(Serialize)]
struct SearchQuery<'a> {
    query: &'a str,
    page: u32,
    size: u32,
}

/// Lists companies page by page.
pub async fn list(api: &ApiClient, page: PageQuery) -> Result<PagedResult<Company>, AppError> {
    api.get_json_with_query("/companies", &page).await
}

/// Searches companies by name or CNPJ; a blank query lists everything.
pub async fn search(
    api: &ApiClient,
    query: &str,
    page: PageQuery,
) -> Result<PagedResult<Company>, AppError> {
    let query = query.trim();
    if query.is_empty() {
        return list(api, page).await;
    }
    api.get_json_with_query(
        "/companies/search",
        &SearchQuery {
            query,
            page: page.page,
            size: page.size,
        },
    )
    .await
}

pub async fn get(api: &ApiClient, id: i64) -> Result<Company, AppError> {
    api.get_json(&format!("/companies/{id}")).await
}

/// Company record linked to an identity-provider user.
pub async fn by_identity(api: &ApiClient, subject: &str) -> Result<Company, AppError> {
    api.get_json(&format!("/companies/keycloak/{}", subject.trim()))
        .await
}

pub async fn create(api: &ApiClient, request: &CompanyRequest) -> Result<Company, AppError> {
    let request = request.normalized()?;
    api.post_json("/companies", &request).await
}

pub async fn update(
    api: &ApiClient,
    id: i64,
    request: &CompanyRequest,
) -> Result<Company, AppError> {
    let request = request.normalized()?;
    api.put_json(&format!("/companies/{id}"), &request).await
}

pub async fn delete(api: &ApiClient, id: i64) -> Result<(), AppError> {
    api.delete(&format!("/companies/{id}")).await
}

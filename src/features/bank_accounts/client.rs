//! Client helpers for `/bank-accounts`.

use crate::{
    app_lib::{ApiClient, AppError},
    features::bank_accounts::types::{BankAccount, CreateBankAccountRequest, RecipientInfo},
};

/// Fetches the account owned by a customer.
pub async fn by_customer(api: &ApiClient, customer_id: i64) -> Result<BankAccount, AppError> {
    api.get_json(&format!("/bank-accounts/by-customer/{customer_id}"))
        .await
}

/// Opens the virtual account of a customer who has none yet.
pub async fn create(api: &ApiClient, customer_id: i64) -> Result<BankAccount, AppError> {
    api.post_json("/bank-accounts", &CreateBankAccountRequest { customer_id })
        .await
}

/// Looks up the owner of an agency/account pair.
pub async fn recipient_by_agency(
    api: &ApiClient,
    agency: &str,
    account: &str,
) -> Result<RecipientInfo, AppError> {
    let agency = agency.trim();
    let account = account.trim();
    if agency.is_empty() || account.is_empty() {
        return Err(AppError::Validation(
            "Agency and account are required.".to_string(),
        ));
    }
    api.get_json_with_query(
        "/bank-accounts/account-info/agency",
        &[("agency", agency), ("account", account)],
    )
    .await
}

/// Looks up the owner of a PIX key.
pub async fn recipient_by_pix(api: &ApiClient, key: &str) -> Result<RecipientInfo, AppError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(AppError::Validation("PIX key is required.".to_string()));
    }
    api.get_json_with_query("/bank-accounts/account-info/pix", &[("key", key)])
        .await
}

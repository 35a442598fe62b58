//! Client helpers for `/transactions`.

use crate::{
    app_lib::{ApiClient, AppError, PagedResult},
    features::transactions::{
        transfer::TransferMethod,
        types::{StatementQuery, Transaction, TransactionRequest},
    },
};

/// Posts a transaction to the endpoint of its method.
pub async fn submit(
    api: &ApiClient,
    method: TransferMethod,
    request: &TransactionRequest,
) -> Result<(), AppError> {
    let path = match method {
        TransferMethod::Account => "/transactions/transfer/agency",
        TransferMethod::Pix => "/transactions/pix",
        TransferMethod::Deposit => "/transactions/deposit/agency",
    };
    api.post_json_empty(path, request).await
}

/// One page of the statement of `account_id`.
pub async fn statement(
    api: &ApiClient,
    account_id: i64,
    query: &StatementQuery,
) -> Result<PagedResult<Transaction>, AppError> {
    api.get_json_with_query(&format!("/transactions/by-account/{account_id}"), query)
        .await
}

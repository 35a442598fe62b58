//! Client helpers for `/loan-proposals`.

use crate::{
    app_lib::{ApiClient, AppError, PageQuery, PagedResult},
    features::loans::types::{CcbDocument, LoanProposal, SimulationRequest, SimulationResult},
};
use serde::Serialize;

#[derive(Serialize)]
struct SearchQuery<'a> {
    search: &'a str,
    page: u32,
    size: u32,
}

/// All proposals, filtered by a free-text search (administrators).
pub async fn search(
    api: &ApiClient,
    search: &str,
    page: PageQuery,
) -> Result<PagedResult<LoanProposal>, AppError> {
    api.get_json_with_query(
        "/loan-proposals/paged",
        &SearchQuery {
            search: search.trim(),
            page: page.page,
            size: page.size,
        },
    )
    .await
}

/// Proposals of the signed-in customer.
pub async fn my_proposals(
    api: &ApiClient,
    page: PageQuery,
) -> Result<PagedResult<LoanProposal>, AppError> {
    api.get_json_with_query("/loan-proposals/my-proposals", &page)
        .await
}

pub async fn simulate(
    api: &ApiClient,
    request: &SimulationRequest,
) -> Result<SimulationResult, AppError> {
    api.post_json("/loan-proposals/simulate", request).await
}

/// Contracts a simulated proposal.
pub async fn contract(
    api: &ApiClient,
    simulation: &SimulationResult,
    request: &SimulationRequest,
) -> Result<(), AppError> {
    let payload = simulation.contract_payload(request)?;
    api.post_json_empty("/loan-proposals", &payload).await
}

/// Disburses a signed proposal.
pub async fn pay(api: &ApiClient, id: i64) -> Result<LoanProposal, AppError> {
    api.put_action(&format!("/loan-proposals/{id}/pay")).await
}

pub async fn cancel(api: &ApiClient, id: i64) -> Result<LoanProposal, AppError> {
    api.put_action(&format!("/loan-proposals/{id}/cancel")).await
}

/// Payroll margin still available to a customer.
pub async fn available_margin(api: &ApiClient, customer_id: i64) -> Result<f64, AppError> {
    api.get_json(&format!("/loan-proposals/available-margin/{customer_id}"))
        .await
}

/// Fetches a CCB PDF.
pub async fn ccb(
    api: &ApiClient,
    proposal_id: i64,
    document: CcbDocument,
) -> Result<Vec<u8>, AppError> {
    api.get_bytes(&document.path(proposal_id)).await
}

/// Pays an installment from `account_id` and returns the receipt PDF.
pub async fn pay_installment(
    api: &ApiClient,
    installment_id: i64,
    account_id: i64,
) -> Result<Vec<u8>, AppError> {
    api.post_for_bytes(&format!(
        "/loan-proposals/installments-pay/{installment_id}/pay/{account_id}/receipt"
    ))
    .await
}

#[cfg(test)]
mod tests {
    use super::{available_margin, contract, my_proposals, pay, pay_installment, search, simulate};
    use crate::app_lib::{ApiClient, PageQuery};
    use crate::features::loans::types::{LoanStatus, SimulationRequest};
    use anyhow::Result;
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    #[tokio::test]
    async fn simulate_then_contract() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/loan-proposals/simulate"))
            .and(body_partial_json(json!({ "modoSimulacao": "VALOR_PARCELA" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "installmentValue": 45.9,
                "totalPayment": 1101.6,
                "firstInstallmentDate": "2024-06-05",
                "spread": 0.5
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/loan-proposals"))
            .and(body_partial_json(json!({
                "spread": 0.5,
                "customerId": 42,
                "convenioType": "Prefeitura"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 1 })))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri(), Some("token".to_string()));
        let request = SimulationRequest::new(42, 3, 1000.0, 24, 300.0, "2024-05-01".to_string())?;
        let simulation = simulate(&api, &request).await?;
        assert!(!simulation.exceeds_margin(300.0));
        contract(&api, &simulation, &request).await?;
        Ok(())
    }

    #[tokio::test]
    async fn margin_is_a_bare_number() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/loan-proposals/available-margin/42"))
            .respond_with(ResponseTemplate::new(200).set_body_string("350.75"))
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri(), Some("token".to_string()));
        assert!((available_margin(&api, 42).await? - 350.75).abs() < f64::EPSILON);
        Ok(())
    }

    #[tokio::test]
    async fn listings_are_paged() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        let page = json!({
            "items": [{ "id": 5, "requestedAmount": 1000.0, "status": "SIGNED" }],
            "total": 1,
            "page": 0,
            "size": 10
        });
        Mock::given(method("GET"))
            .and(path("/loan-proposals/paged"))
            .and(query_param("search", "ana"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page.clone()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/loan-proposals/my-proposals"))
            .and(query_param("page", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri(), Some("token".to_string()));
        let all = search(&api, " ana ", PageQuery::default()).await?;
        assert_eq!(all.items[0].status, LoanStatus::Signed);
        let mine = my_proposals(&api, PageQuery::default()).await?;
        assert_eq!(mine.items.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn pay_and_installment_receipt() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/loan-proposals/5/pay"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "id": 5, "status": "PAID" })),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/loan-proposals/installments-pay/10/pay/7/receipt"))
            .and(body_json(json!({})))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(b"%PDF".to_vec(), "application/pdf"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri(), Some("token".to_string()));
        assert_eq!(pay(&api, 5).await?.status, LoanStatus::Paid);
        assert_eq!(pay_installment(&api, 10, 7).await?, b"%PDF".to_vec());
        Ok(())
    }
}

//! Client helpers for `/pix-keys`.

use crate::{
    app_lib::{ApiClient, AppError},
    features::pix_keys::types::{PixKey, PixKeyRequest},
};

pub async fn list(api: &ApiClient, account_id: i64) -> Result<Vec<PixKey>, AppError> {
    api.get_json(&format!("/pix-keys/account/{account_id}")).await
}

pub async fn create(api: &ApiClient, request: &PixKeyRequest) -> Result<(), AppError> {
    api.post_json_empty("/pix-keys", request).await
}

pub async fn update(api: &ApiClient, id: i64, request: &PixKeyRequest) -> Result<(), AppError> {
    api.put_json_empty(&format!("/pix-keys/{id}"), request).await
}

pub async fn delete(api: &ApiClient, id: i64) -> Result<(), AppError> {
    api.delete(&format!("/pix-keys/{id}")).await
}

#[cfg(test)]
mod tests {
    use super::{create, delete, list};
    use crate::app_lib::ApiClient;
    use crate::features::pix_keys::types::{PixKeyRequest, PixKeyType};
    use anyhow::Result;
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    #[tokio::test]
    async fn crud_round() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pix-keys/account/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 1, "pixKey": "ana@example.com", "keyType": "EMAIL" }
            ])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/pix-keys"))
            .and(body_json(json!({
                "bankAccountId": 7,
                "pixKey": "81999990000",
                "keyType": "PHONE"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/pix-keys/1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri(), Some("token".to_string()));
        let keys = list(&api, 7).await?;
        assert_eq!(keys[0].key_type, PixKeyType::Email);
        create(&api, &PixKeyRequest::new(7, "81999990000", PixKeyType::Phone)?).await?;
        delete(&api, 1).await?;
        Ok(())
    }
}

//! Authenticated HTTP client for the CrediFlow backend. Feature clients use it
//! to avoid duplicating request setup and to get one consistent error shape.
//! Every request carries the bearer token of the current identity session; a
//! client built without a token refuses to send anything. There is no retry
//! and no timeout policy: callers surface failures to the user.

use super::{config::AppConfig, errors::AppError};
use reqwest::{Client, Method, RequestBuilder, Response, header::CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Message used when neither the server, the transport nor the status line
/// explain a failure.
pub const FALLBACK_ERROR_MESSAGE: &str = "Unknown error";
/// Maximum number of error characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// Bearer-authenticated JSON client bound to one API base URL.
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<SecretString>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

impl ApiClient {
    /// Builds a client for `base_url`. Blank tokens are treated as missing.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let token = token
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(SecretString::from);

        Self {
            http: Client::new(),
            base_url: base_url.into(),
            token,
        }
    }

    /// Builds a client against the configured API base URL.
    #[must_use]
    pub fn from_config(config: &AppConfig, token: Option<String>) -> Self {
        Self::new(config.api_base_url.clone(), token)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Fetches and decodes JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let builder = self.request(Method::GET, path)?;
        decode_json(self.send(builder).await?).await
    }

    /// Fetches and decodes JSON with query parameters; `None` fields are omitted.
    pub async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::GET, path)?.query(query);
        decode_json(self.send(builder).await?).await
    }

    /// Posts JSON and decodes a JSON response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.json_request(Method::POST, path, body)?;
        decode_json(self.send(builder).await?).await
    }

    /// Posts JSON and ignores the response body.
    pub async fn post_json_empty<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), AppError> {
        let builder = self.json_request(Method::POST, path, body)?;
        self.send(builder).await.map(drop)
    }

    /// Puts JSON and decodes a JSON response.
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.json_request(Method::PUT, path, body)?;
        decode_json(self.send(builder).await?).await
    }

    /// Puts JSON and ignores the response body.
    pub async fn put_json_empty<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), AppError> {
        let builder = self.json_request(Method::PUT, path, body)?;
        self.send(builder).await.map(drop)
    }

    /// Puts without a body, used by state-transition endpoints such as
    /// `/loan-proposals/{id}/pay`, and decodes a JSON response.
    pub async fn put_action<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let builder = self.request(Method::PUT, path)?;
        decode_json(self.send(builder).await?).await
    }

    /// Deletes a resource and ignores the response body.
    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        let builder = self.request(Method::DELETE, path)?;
        self.send(builder).await.map(drop)
    }

    /// Fetches a binary document (PDF receipts and contracts).
    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, AppError> {
        let builder = self.request(Method::GET, path)?;
        read_bytes(self.send(builder).await?).await
    }

    /// Posts an empty JSON object and returns the binary response.
    pub async fn post_for_bytes(&self, path: &str) -> Result<Vec<u8>, AppError> {
        let builder = self.json_request(Method::POST, path, &serde_json::json!({}))?;
        read_bytes(self.send(builder).await?).await
    }

    /// Starts a request with the bearer token attached.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, AppError> {
        let token = self.token.as_ref().ok_or(AppError::Unauthenticated)?;
        let url = build_url_with_base(&self.base_url, path);
        Ok(self
            .http
            .request(method, url)
            .bearer_auth(token.expose_secret()))
    }

    fn json_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<RequestBuilder, AppError> {
        let payload = serde_json::to_vec(body)
            .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;
        Ok(self
            .request(method, path)?
            .header(CONTENT_TYPE, "application/json")
            .body(payload))
    }

    /// Sends a request and turns non-2xx responses into `AppError::Http`.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, AppError> {
        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = resolve_error_message(Some(&body), None, status.canonical_reason());
        debug!(status = status.as_u16(), %message, "request rejected by server");
        Err(AppError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

/// Picks the one message shown to the user for a failed request, in order:
/// the server's `message` (or `error`) field, the transport error, the HTTP
/// status text, then [`FALLBACK_ERROR_MESSAGE`].
#[must_use]
pub fn resolve_error_message(
    body: Option<&str>,
    transport: Option<&str>,
    status_text: Option<&str>,
) -> String {
    if let Some(message) = body.and_then(server_message) {
        return sanitize(&message);
    }
    if let Some(message) = transport.map(str::trim).filter(|value| !value.is_empty()) {
        return sanitize(message);
    }
    if let Some(status) = status_text.map(str::trim).filter(|value| !value.is_empty()) {
        return format!("Request failed: {status}");
    }
    FALLBACK_ERROR_MESSAGE.to_string()
}

fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body.trim()).ok()?;
    ["message", "error"].iter().find_map(|key| {
        value
            .get(*key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .map(str::to_string)
    })
}

fn sanitize(message: &str) -> String {
    message.trim().chars().take(MAX_ERROR_CHARS).collect()
}

fn map_transport_error(err: reqwest::Error) -> AppError {
    AppError::Network(resolve_error_message(None, Some(&err.to_string()), None))
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|err| AppError::Parse(format!("Failed to read response: {err}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
}

async fn read_bytes(response: Response) -> Result<Vec<u8>, AppError> {
    response
        .bytes()
        .await
        .map(|bytes| bytes.to_vec())
        .map_err(|err| AppError::Parse(format!("Failed to read response: {err}")))
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::{
        ApiClient, FALLBACK_ERROR_MESSAGE, build_url_with_base, resolve_error_message,
    };
    use crate::app_lib::AppError;
    use anyhow::Result;
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Account {
        id: i64,
        balance: f64,
    }

    #[derive(Serialize)]
    struct Paging {
        page: u32,
        size: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        kind: Option<&'static str>,
    }

    #[test]
    fn server_message_wins_over_everything() {
        let message = resolve_error_message(
            Some(r#"{"message":"Saldo insuficiente"}"#),
            Some("connection reset"),
            Some("Bad Request"),
        );
        assert_eq!(message, "Saldo insuficiente");
    }

    #[test]
    fn backend_error_field_is_used_when_message_is_absent() {
        let message = resolve_error_message(
            Some(r#"{"error":"Customer not found"}"#),
            None,
            Some("Not Found"),
        );
        assert_eq!(message, "Customer not found");
    }

    #[test]
    fn transport_error_precedes_status_text() {
        let message = resolve_error_message(Some("<html>"), Some("dns failure"), Some("Bad Gateway"));
        assert_eq!(message, "dns failure");
    }

    #[test]
    fn status_text_is_used_when_body_and_transport_are_silent() {
        let message = resolve_error_message(Some(r#"{"message":"  "}"#), None, Some("Conflict"));
        assert_eq!(message, "Request failed: Conflict");
    }

    #[test]
    fn fallback_when_nothing_is_known() {
        assert_eq!(
            resolve_error_message(None, None, None),
            FALLBACK_ERROR_MESSAGE
        );
        assert_eq!(
            resolve_error_message(Some(""), Some("  "), Some("")),
            FALLBACK_ERROR_MESSAGE
        );
    }

    #[test]
    fn long_messages_are_truncated() {
        let long = "x".repeat(500);
        let body = json!({ "message": long }).to_string();
        assert_eq!(resolve_error_message(Some(&body), None, None).len(), 200);
    }

    #[test]
    fn build_url_joins_base_and_path() {
        assert_eq!(
            build_url_with_base("http://localhost:8082/", "/customers/1"),
            "http://localhost:8082/customers/1"
        );
        assert_eq!(build_url_with_base("", "/customers"), "/customers");
    }

    #[test]
    fn blank_token_counts_as_missing() {
        assert!(!ApiClient::new("http://localhost", Some("   ".to_string())).has_token());
        assert!(ApiClient::new("http://localhost", Some("abc".to_string())).has_token());
    }

    #[test]
    fn debug_output_redacts_token() {
        let client = ApiClient::new("http://localhost", Some("secret-token".to_string()));
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("[redacted]"));
    }

    #[tokio::test]
    async fn missing_token_fails_without_network_io() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), None);
        let result: Result<Account, AppError> = client.get_json("/bank-accounts/7").await;
        assert_eq!(result, Err(AppError::Unauthenticated));
        Ok(())
    }

    #[tokio::test]
    async fn get_json_sends_bearer_token() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bank-accounts/by-customer/42"))
            .and(header("Authorization", "Bearer token-42"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "id": 7, "balance": 100.5 })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), Some("token-42".to_string()));
        let account: Account = client.get_json("/bank-accounts/by-customer/42").await?;
        assert_eq!(
            account,
            Account {
                id: 7,
                balance: 100.5
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn query_parameters_skip_missing_values() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transactions/by-account/7"))
            .and(query_param("page", "2"))
            .and(query_param("size", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), Some("token".to_string()));
        let query = Paging {
            page: 2,
            size: 10,
            kind: None,
        };
        let items: Vec<Account> = client
            .get_json_with_query("/transactions/by-account/7", &query)
            .await?;
        assert!(items.is_empty());

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert!(!received[0].url.query().unwrap_or_default().contains("kind"));
        Ok(())
    }

    #[tokio::test]
    async fn post_json_sends_body_and_content_type() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bank-accounts"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({ "customerId": 42 })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 7 })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), Some("token".to_string()));
        client
            .post_json_empty("/bank-accounts", &json!({ "customerId": 42 }))
            .await?;
        Ok(())
    }

    #[tokio::test]
    async fn http_error_uses_server_message() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/transactions/pix"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({ "message": "Saldo insuficiente" })),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), Some("token".to_string()));
        let result = client
            .post_json_empty("/transactions/pix", &json!({ "amount": 10 }))
            .await;
        assert_eq!(
            result,
            Err(AppError::Http {
                status: 400,
                message: "Saldo insuficiente".to_string()
            })
        );
        Ok(())
    }

    #[tokio::test]
    async fn http_error_without_body_uses_status_text() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/pix-keys/3"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), Some("token".to_string()));
        let result = client.delete("/pix-keys/3").await;
        assert_eq!(
            result,
            Err(AppError::Http {
                status: 500,
                message: "Request failed: Internal Server Error".to_string()
            })
        );
        Ok(())
    }

    #[tokio::test]
    async fn transport_failure_maps_to_network_error() -> Result<()> {
        let listener = TcpListener::bind("127.0.0.1:0");
        let Ok(listener) = listener else {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        };
        let address = listener.local_addr()?;
        drop(listener);

        let client = ApiClient::new(format!("http://{address}"), Some("token".to_string()));
        let result: Result<Account, AppError> = client.get_json("/bank-accounts/1").await;
        match result {
            Err(AppError::Network(message)) => assert!(!message.is_empty()),
            other => panic!("expected network error, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn get_bytes_returns_binary_body() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/loan-proposals/5/ccb-sign"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(b"%PDF-1.7".to_vec(), "application/pdf"),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), Some("token".to_string()));
        let bytes = client.get_bytes("/loan-proposals/5/ccb-sign").await?;
        assert_eq!(bytes, b"%PDF-1.7".to_vec());
        Ok(())
    }
}

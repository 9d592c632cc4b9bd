use async_trait::async_trait;
use dialer_core::Assistant;
use reqwest::Client;
use tracing::debug;

use crate::error::{GatewayError, Result};
use crate::traits::CallGateway;
use crate::types::{CallResponse, CreateCallRequest};

pub const DEFAULT_BASE_URL: &str = "https://api.vapi.ai";

/// `reqwest` client for the Vapi calling API.
#[derive(Clone)]
pub struct VapiClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl VapiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(base_url, api_key, Client::new())
    }

    pub fn with_client(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CallGateway for VapiClient {
    async fn list_assistants(&self) -> Result<Vec<Assistant>> {
        debug!("Fetching assistants from {}", self.base_url);

        let response = self
            .client
            .get(format!("{}/assistant", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn create_call(&self, request: &CreateCallRequest) -> Result<CallResponse> {
        debug!(
            number = %request.customer.number,
            scheduled = request.schedule_plan.is_some(),
            "Placing call"
        );

        let response = self
            .client
            .post(format!("{}/call/phone", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialer_core::{CallRequest, CallStatus};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn call_request() -> CreateCallRequest {
        CreateCallRequest::new(&CallRequest::new("asst-1", "+15550001"), "pn-1")
    }

    #[test]
    fn test_client_creation() {
        let client = VapiClient::new("http://localhost:4096/", "secret");
        assert_eq!(client.base_url(), "http://localhost:4096");
        assert_eq!(client.api_key, "secret");
    }

    #[tokio::test]
    async fn test_list_assistants() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/assistant"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "asst-1", "name": "Sales", "model": { "model": "gpt-4o" } },
                { "id": "asst-2" }
            ])))
            .expect(1)
            .mount(&mock)
            .await;

        let client = VapiClient::new(mock.uri(), "secret");
        let assistants = client.list_assistants().await.unwrap();

        assert_eq!(assistants.len(), 2);
        assert_eq!(assistants[0].name(), Some("Sales"));
        assert_eq!(assistants[1].id, "asst-2");
    }

    #[tokio::test]
    async fn test_list_assistants_unauthorized() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/assistant"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&mock)
            .await;

        let client = VapiClient::new(mock.uri(), "wrong");
        let err = client.list_assistants().await.unwrap_err();

        assert!(matches!(err, GatewayError::Api { status: 401, .. }));
        assert_eq!(err.to_string(), "API error: 401 - Unauthorized");
    }

    #[tokio::test]
    async fn test_create_call() {
        let mock = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/call/phone"))
            .and(header("authorization", "Bearer secret"))
            .and(body_partial_json(json!({
                "assistantId": "asst-1",
                "phoneNumberId": "pn-1",
                "customer": { "number": "+15550001", "numberE164CheckEnabled": false }
            })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({ "id": "call-1", "status": "queued" })),
            )
            .expect(1)
            .mount(&mock)
            .await;

        let client = VapiClient::new(mock.uri(), "secret");
        let response = client.create_call(&call_request()).await.unwrap();

        assert_eq!(response.id, "call-1");
        assert_eq!(response.call_status(), Some(CallStatus::Queued));
    }

    #[tokio::test]
    async fn test_create_call_malformed_body() {
        let mock = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/call/phone"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock)
            .await;

        let client = VapiClient::new(mock.uri(), "secret");
        let err = client.create_call(&call_request()).await.unwrap_err();

        assert!(matches!(err, GatewayError::Serialization(_)));
    }
}

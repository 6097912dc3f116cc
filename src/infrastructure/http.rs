use crate::domain::ports::ButtonApi;
use crate::domain::signature::SignedRequest;
use crate::error::{GatewayError, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;

pub const ACCESS_KEY: &str = "ACCESS_KEY";
pub const ACCESS_SIGNATURE: &str = "ACCESS_SIGNATURE";
pub const ACCESS_NONCE: &str = "ACCESS_NONCE";

const JSON: &str = "application/json";

/// Button API client over `reqwest`.
///
/// A single attempt per call; non-success statuses surface as transport
/// errors and retrying is left to the caller.
#[derive(Clone, Default)]
pub struct HttpButtonApi {
    client: reqwest::Client,
}

impl HttpButtonApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl ButtonApi for HttpButtonApi {
    async fn create_button(&self, key: &str, request: &SignedRequest) -> Result<String> {
        let response = self
            .client
            .post(&request.url)
            .header(ACCESS_KEY, key)
            .header(ACCESS_SIGNATURE, &request.signature)
            .header(ACCESS_NONCE, request.nonce.to_string())
            .header(ACCEPT, JSON)
            .header(CONTENT_TYPE, JSON)
            .body(request.body.clone())
            .send()
            .await?
            .error_for_status()?;

        let bytes = response.bytes().await?;
        let results: Value = serde_json::from_slice(&bytes).map_err(|e| {
            GatewayError::MalformedResponse(format!("response is not JSON: {}", e))
        })?;
        checkout_code(&results)
    }
}

/// Pulls `button.code` out of a button-creation response.
pub fn checkout_code(results: &Value) -> Result<String> {
    if let Some(code) = results.pointer("/button/code").and_then(Value::as_str) {
        return Ok(code.to_string());
    }
    let detail = match results.get("errors") {
        Some(errors) => format!("missing `button.code`, provider errors: {}", errors),
        None => "missing `button.code`".to_string(),
    };
    Err(GatewayError::MalformedResponse(detail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::signature::Nonce;
    use serde_json::json;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(server: &MockServer) -> SignedRequest {
        SignedRequest::new(
            "S",
            Nonce(1_700_000_000_000_000),
            format!("{}/v1/buttons", server.uri()),
            r#"{"button":{"name":"x"}}"#.to_string(),
        )
    }

    #[test]
    fn test_checkout_code_extraction() {
        let results = json!({"success": true, "button": {"code": "abc"}});
        assert_eq!(checkout_code(&results).unwrap(), "abc");
    }

    #[test]
    fn test_checkout_code_missing() {
        let results = json!({"success": false, "errors": ["Price must be greater than 0"]});
        match checkout_code(&results) {
            Err(GatewayError::MalformedResponse(detail)) => {
                assert!(detail.contains("Price must be greater than 0"))
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(matches!(
            checkout_code(&json!({"button": {"code": 7}})),
            Err(GatewayError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_create_button_sends_signed_headers() {
        let server = MockServer::start().await;
        let request = request(&server);

        Mock::given(method("POST"))
            .and(path("/v1/buttons"))
            .and(header(ACCESS_KEY, "K"))
            .and(header(ACCESS_SIGNATURE, request.signature.as_str()))
            .and(header(ACCESS_NONCE, "1700000000000000"))
            .and(header("Accept", "application/json"))
            .and(body_string(r#"{"button":{"name":"x"}}"#))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"button": {"code": "XYZ"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpButtonApi::new();
        let code = api.create_button("K", &request).await.unwrap();
        assert_eq!(code, "XYZ");
    }

    #[tokio::test]
    async fn test_create_button_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpButtonApi::new();
        let result = api.create_button("K", &request(&server)).await;
        assert!(matches!(result, Err(GatewayError::Transport(_))));
    }

    #[tokio::test]
    async fn test_create_button_non_json_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let api = HttpButtonApi::with_timeout(Some(Duration::from_secs(5))).unwrap();
        let result = api.create_button("K", &request(&server)).await;
        assert!(matches!(result, Err(GatewayError::MalformedResponse(_))));
    }
}

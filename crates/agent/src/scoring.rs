use std::time::Duration;

use async_trait::async_trait;
use loanbot_core::config::ScoringConfig;
use loanbot_core::{ApplicationPayload, ScoringError, ScoringResult};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

#[async_trait]
pub trait ScoringClient: Send + Sync {
    async fn score(&self, payload: &ApplicationPayload) -> Result<ScoringResult, ScoringError>;
}

/// Posts the application payload as JSON to the scoring endpoint.
#[derive(Clone, Debug)]
pub struct HttpScoringClient {
    client: Client,
    url: String,
    api_key: Option<SecretString>,
    timeout: Duration,
}

impl HttpScoringClient {
    /// Blank API keys are dropped so no empty bearer header goes out.
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self {
            client: Client::new(),
            url: config.url.clone(),
            api_key: config.bearer_token().map(|token| SecretString::from(token.to_string())),
            timeout: config.timeout(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    #[cfg(test)]
    fn with_timeout(url: impl Into<String>, timeout: Duration) -> Self {
        Self { client: Client::new(), url: url.into(), api_key: None, timeout }
    }

    fn classify(&self, error: reqwest::Error) -> ScoringError {
        if error.is_timeout() {
            ScoringError::Timeout(self.timeout)
        } else if error.is_decode() {
            ScoringError::MalformedBody(error.to_string())
        } else {
            ScoringError::Transport(error.to_string())
        }
    }
}

#[async_trait]
impl ScoringClient for HttpScoringClient {
    async fn score(&self, payload: &ApplicationPayload) -> Result<ScoringResult, ScoringError> {
        let mut request = self.client.post(&self.url).timeout(self.timeout).json(payload);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key.expose_secret());
        }

        let response = request.send().await.map_err(|error| self.classify(error))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScoringError::Status(status.as_u16()));
        }

        let body = response.json::<Value>().await.map_err(|error| self.classify(error))?;
        ScoringResult::from_json(&body)
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::time::Duration;

    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use loanbot_core::config::ScoringConfig;
    use loanbot_core::{ApplicationPayload, Eligibility, ScoringError};
    use serde_json::{json, Map, Value};

    use super::{HttpScoringClient, ScoringClient};

    async fn spawn_stub() -> SocketAddr {
        let router = Router::new()
            .route(
                "/predict",
                post(|Json(body): Json<Value>| async move {
                    let eligible = body["age"].as_i64().unwrap_or_default() >= 18;
                    Json(json!({
                        "eligibility": if eligible { "eligible" } else { "not_eligible" },
                        "score": 0.87,
                    }))
                }),
            )
            .route(
                "/secured",
                post(|headers: HeaderMap| async move {
                    let authorized = headers
                        .get("authorization")
                        .and_then(|value| value.to_str().ok())
                        == Some("Bearer sk-test");
                    if authorized {
                        (StatusCode::OK, Json(json!({"eligibility": "eligible"})))
                    } else {
                        (StatusCode::UNAUTHORIZED, Json(json!({"error": "unauthorized"})))
                    }
                }),
            )
            .route(
                "/anonymous",
                post(|headers: HeaderMap| async move {
                    if headers.contains_key("authorization") {
                        (StatusCode::BAD_REQUEST, Json(json!({"error": "unexpected credentials"})))
                    } else {
                        (StatusCode::OK, Json(json!({"eligibility": "not_eligible"})))
                    }
                }),
            )
            .route("/broken", post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }))
            .route("/garbage", post(|| async { "definitely not json" }))
            .route(
                "/slow",
                post(|| async {
                    tokio::time::sleep(Duration::from_secs(2)).await;
                    Json(json!({"eligibility": "eligible"}))
                }),
            );

        let listener =
            tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind stub scoring service");
        let address = listener.local_addr().expect("stub address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        address
    }

    fn payload() -> ApplicationPayload {
        let mut slots = Map::new();
        slots.insert("age".to_string(), json!(30));
        slots.insert("annual_salary".to_string(), json!(500000.0));
        ApplicationPayload::from_slots(&slots)
    }

    fn client(address: SocketAddr, path: &str) -> HttpScoringClient {
        HttpScoringClient::with_timeout(format!("http://{address}{path}"), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn posts_payload_and_reads_decision() {
        let address = spawn_stub().await;

        let result = client(address, "/predict").score(&payload()).await.expect("scored");

        assert_eq!(result.eligibility, Eligibility::Eligible);
        assert_eq!(result.confidence_pct(), Some(87));
    }

    #[tokio::test]
    async fn sends_configured_api_key_as_bearer_token() {
        let address = spawn_stub().await;
        let config = ScoringConfig {
            url: format!("http://{address}/secured"),
            api_key: Some("sk-test".to_string().into()),
        };

        let result =
            HttpScoringClient::from_config(&config).score(&payload()).await.expect("scored");
        let anonymous = client(address, "/secured").score(&payload()).await;

        assert_eq!(result.eligibility, Eligibility::Eligible);
        assert_eq!(anonymous, Err(ScoringError::Status(401)));
    }

    #[tokio::test]
    async fn blank_api_key_sends_no_authorization_header() {
        let address = spawn_stub().await;

        for blank in ["", "   "] {
            let config = ScoringConfig {
                url: format!("http://{address}/anonymous"),
                api_key: Some(blank.to_string().into()),
            };

            let result = HttpScoringClient::from_config(&config).score(&payload()).await;

            assert_eq!(result.map(|scored| scored.eligibility), Ok(Eligibility::NotEligible));
        }
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let address = spawn_stub().await;

        let result = client(address, "/broken").score(&payload()).await;

        assert_eq!(result, Err(ScoringError::Status(500)));
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let address = spawn_stub().await;

        let result = client(address, "/garbage").score(&payload()).await;

        assert!(matches!(result, Err(ScoringError::MalformedBody(_))), "got {result:?}");
    }

    #[tokio::test]
    async fn slow_service_times_out() {
        let address = spawn_stub().await;
        let client = HttpScoringClient::with_timeout(
            format!("http://{address}/slow"),
            Duration::from_millis(200),
        );

        let result = client.score(&payload()).await;

        assert_eq!(result, Err(ScoringError::Timeout(Duration::from_millis(200))));
    }

    #[tokio::test]
    async fn closed_port_is_a_transport_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let address = listener.local_addr().expect("address");
        drop(listener);

        let result = client(address, "/predict").score(&payload()).await;

        assert!(matches!(result, Err(ScoringError::Transport(_))), "got {result:?}");
    }
}

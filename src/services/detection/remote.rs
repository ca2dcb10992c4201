// Prediction Service Client
// Single blocking-style call to the remote AI-detection endpoint: the
// request carries a `Prefer: wait` header so the service holds the
// connection until the prediction settles instead of requiring polling.

use super::error::DetectionError;
use super::normalize::RawOutput;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Instant;
use tracing::debug;

const PREDICTION_DEFAULT_URL: &str = "https://api.replicate.com/v1/predictions";
/// Pinned detection model version; requests always name it explicitly so
/// upstream model rollouts cannot silently change scoring behavior.
pub const MODEL_VERSION: &str = "8e6975e5ed6174911a6ff3d60540dfd4844201974602551e10e9e87ab143d81e";

const REQUEST_TIMEOUT_SECS: u64 = 80;

#[derive(Debug, Clone, Serialize)]
struct PredictionInput {
    text: String,
}

#[derive(Debug, Clone, Serialize)]
struct PredictionRequest {
    version: String,
    input: PredictionInput,
}

#[derive(Debug, Clone, Deserialize)]
struct PredictionResponse {
    output: Option<RawOutput>,
    error: Option<serde_json::Value>,
}

/// Raw output plus measured wall-clock latency.
#[derive(Debug, Clone)]
pub struct PredictionOutcome {
    pub output: RawOutput,
    pub latency_ms: i64,
}

pub struct PredictionClient {
    client: Client,
    url: String,
}

impl Default for PredictionClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        let url = env::var("ESSAYLENS_API_URL").unwrap_or_else(|_| PREDICTION_DEFAULT_URL.to_string());

        Self { client, url }
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        let mut c = Self::new();
        c.url = url.into();
        c
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue one prediction request and wait for completion.
    pub async fn predict(&self, token: &str, text: &str) -> Result<PredictionOutcome, DetectionError> {
        let request = PredictionRequest {
            version: MODEL_VERSION.to_string(),
            input: PredictionInput {
                text: text.to_string(),
            },
        };

        let start = Instant::now();

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", token))
            .header("Prefer", "wait")
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let latency_ms = start.elapsed().as_millis() as i64;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status.as_u16(), body));
        }

        let data: PredictionResponse = response
            .json()
            .await
            .map_err(|e| DetectionError::MalformedResponse(e.to_string()))?;

        if let Some(error) = data.error {
            return Err(DetectionError::MalformedResponse(error.to_string()));
        }

        let output = data
            .output
            .ok_or_else(|| DetectionError::MalformedResponse("missing output field".to_string()))?;

        debug!("[PREDICTION] completed latency_ms={}", latency_ms);

        Ok(PredictionOutcome { output, latency_ms })
    }
}

/// Map a non-success HTTP status onto the error taxonomy.
fn classify_status(status: u16, body: String) -> DetectionError {
    match status {
        401 => DetectionError::InvalidCredential,
        429 => DetectionError::RateLimited,
        _ => DetectionError::Upstream {
            status,
            message: body,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_status() {
        assert!(matches!(
            classify_status(401, String::new()),
            DetectionError::InvalidCredential
        ));
        assert!(matches!(
            classify_status(429, String::new()),
            DetectionError::RateLimited
        ));
        assert!(matches!(
            classify_status(503, "overloaded".to_string()),
            DetectionError::Upstream { status: 503, .. }
        ));
    }

    #[test]
    fn test_prediction_client_url_override() {
        let client = PredictionClient::with_url("http://localhost:9999/predict");
        assert_eq!(client.url(), "http://localhost:9999/predict");
    }

    #[test]
    fn test_request_body_shape() {
        let request = PredictionRequest {
            version: MODEL_VERSION.to_string(),
            input: PredictionInput {
                text: "essay body".to_string(),
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["version"], MODEL_VERSION);
        assert_eq!(json["input"]["text"], "essay body");
    }

    #[test]
    fn test_prediction_response_with_error_field() {
        let data: PredictionResponse =
            serde_json::from_str(r#"{"error": "model exploded"}"#).unwrap();
        assert!(data.output.is_none());
        assert!(data.error.is_some());
    }
}

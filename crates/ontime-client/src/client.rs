//! FlightOnTime prediction API client.

use std::time::Duration;

use ontime_core::{NetworkError, ReqwestErrorExt};
use tracing::instrument;

use crate::error::PredictError;
use crate::types::{PredictionEnvelope, PredictionRequest, PredictionResponse};

const PREDICT_PATH: &str = "predict";
const HEALTH_PATH: &str = "health";

/// Fields checked, in order, for a readable message in an error body.
const ERROR_MESSAGE_FIELDS: [&str; 3] = ["detail", "error", "message"];

/// Objects that map rejected request fields to their messages.
const FIELD_ERROR_OBJECTS: [&str; 2] = ["campos", "fields"];

/// Backend availability as shown in the status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Operational,
    Limited,
}

#[derive(Debug, Clone)]
pub struct PredictionClient {
    client: reqwest::Client,
    base_url: String,
}

impl PredictionClient {
    /// Create a client for the API rooted at `base_url` (e.g. `http://host:8080/api`).
    ///
    /// With `timeout` unset, requests wait until the network layer gives up.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, NetworkError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| e.into_network_error())?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Probe `GET /health`. Any non-2xx status or transport failure is
    /// reported as [`HealthStatus::Limited`]; never retried.
    #[instrument(skip(self), level = "info")]
    pub async fn health(&self) -> HealthStatus {
        match self.client.get(self.endpoint(HEALTH_PATH)).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!("Backend connected");
                HealthStatus::Operational
            }
            Ok(response) => {
                tracing::warn!("Backend responded with status {}", response.status());
                HealthStatus::Limited
            }
            Err(e) => {
                tracing::error!("Backend unavailable: {}", e);
                HealthStatus::Limited
            }
        }
    }

    /// Submit a prediction request, asking for simulated output when `use_mock`.
    #[instrument(
        skip(self, request),
        fields(
            airline = %request.airline_id,
            origin = %request.origin_code,
            destination = %request.destination_code
        ),
        level = "info"
    )]
    pub async fn predict(
        &self,
        request: &PredictionRequest,
        use_mock: bool,
    ) -> Result<PredictionResponse, PredictError> {
        let mut url = self.endpoint(PREDICT_PATH);
        if use_mock {
            url.push_str("?mock=true");
        }

        tracing::debug!("Sending prediction request to {}", url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| PredictError::Network(e.into_network_error()))?;

        let status = response.status();
        tracing::debug!("Prediction response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message_from_body(&body).unwrap_or_else(|| {
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown status")
                )
            });
            tracing::warn!("Prediction request failed ({}): {}", status, message);
            return Err(match rejected_fields_from_body(&body) {
                Some(fields) => PredictError::Rejected {
                    status: status.as_u16(),
                    fields,
                    message,
                },
                None => PredictError::Request {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| PredictError::Network(e.into_network_error()))?;

        let envelope: PredictionEnvelope = serde_json::from_str(&body)
            .map_err(|e| PredictError::InvalidResponse(format!("JSON parse error: {}", e)))?;

        let prediction = PredictionResponse::try_from(envelope)?;
        tracing::info!(
            "Prediction received: {:?} (confidence {:.1}%)",
            prediction.prediction,
            prediction.confidence * 100.0
        );
        Ok(prediction)
    }
}

/// Pull a human-readable message out of an error body.
///
/// Checks `detail`, `error`, `message`, then `metadata.error`; only
/// non-empty strings count. `None` when the body is not JSON or has none.
pub fn error_message_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    let top_level = ERROR_MESSAGE_FIELDS
        .iter()
        .filter_map(|field| value.get(*field));
    let nested = value.get("metadata").and_then(|m| m.get("error"));

    top_level
        .chain(nested)
        .find_map(|v| v.as_str().filter(|s| !s.is_empty()))
        .map(str::to_string)
}

/// Names of the request fields a validation body rejects, sorted.
///
/// `None` unless the body has a non-empty `campos` or `fields` object.
pub fn rejected_fields_from_body(body: &str) -> Option<Vec<String>> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let object = FIELD_ERROR_OBJECTS
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_object()))
        .filter(|fields| !fields.is_empty())?;

    let mut fields: Vec<String> = object.keys().cloned().collect();
    fields.sort();
    Some(fields)
}

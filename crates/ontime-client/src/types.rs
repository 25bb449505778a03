use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PredictError, ValidationError};

/// Body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionRequest {
    #[serde(rename = "airline")]
    pub airline_id: String,
    #[serde(rename = "origin")]
    pub origin_code: String,
    #[serde(rename = "destination")]
    pub destination_code: String,
    /// Absolute UTC timestamp, serialized as `null` when unset
    #[serde(rename = "departure_date")]
    pub departure_time: Option<String>,
}

impl PredictionRequest {
    /// Build a request, rejecting identical origin and destination airports.
    pub fn new(
        airline_id: impl Into<String>,
        origin_code: impl Into<String>,
        destination_code: impl Into<String>,
        departure: Option<DateTime<Utc>>,
    ) -> Result<Self, ValidationError> {
        let origin_code = origin_code.into();
        let destination_code = destination_code.into();

        if origin_code == destination_code {
            return Err(ValidationError::SameAirport(origin_code));
        }

        Ok(Self {
            airline_id: airline_id.into(),
            origin_code,
            destination_code,
            departure_time: departure.map(|d| d.to_rfc3339_opts(SecondsFormat::Millis, true)),
        })
    }
}

/// Punctuality verdict. On the wire: `0` is on time, anything else delayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prediction {
    OnTime,
    Delayed,
}

impl Prediction {
    pub fn from_code(code: i64) -> Self {
        if code == 0 {
            Self::OnTime
        } else {
            Self::Delayed
        }
    }

    pub fn is_on_time(&self) -> bool {
        matches!(self, Self::OnTime)
    }
}

/// Raw `prediction` field: an integer code, or the string `"Error"` when the
/// service failed internally.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WirePrediction {
    Code(i64),
    Label(String),
}

/// Weather observed at the origin airport, in metric units.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherSnapshot {
    #[serde(alias = "condicion", alias = "condition", default)]
    pub condition_text: String,
    /// Longer human-readable description, preferred over the condition
    #[serde(alias = "descripcion", default)]
    pub description: Option<String>,
    #[serde(alias = "temperatura", alias = "temperature")]
    pub temperature_c: f64,
    #[serde(alias = "humedad", alias = "humidity")]
    pub humidity_pct: i32,
    #[serde(alias = "viento_velocidad", alias = "wind_speed")]
    pub wind_speed_ms: f64,
    #[serde(alias = "visibilidad", alias = "visibility")]
    pub visibility_m: f64,
    #[serde(alias = "presion", alias = "pressure", default)]
    pub pressure_hpa: Option<f64>,
}

impl WeatherSnapshot {
    /// Text to show for the condition: description if present, else the condition.
    pub fn display_condition(&self) -> &str {
        match self.description.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => &self.condition_text,
        }
    }
}

/// Metadata keys the client understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataKey {
    Mode,
    Note,
    Airline,
    Route,
    OriginName,
    DestinationName,
    DepartureTime,
    PredictionTimestamp,
    Error,
    Status,
}

impl MetadataKey {
    /// Keys rendered as plain rows, in display order.
    pub const DISPLAY_ORDER: [MetadataKey; 6] = [
        MetadataKey::Airline,
        MetadataKey::Route,
        MetadataKey::OriginName,
        MetadataKey::DestinationName,
        MetadataKey::DepartureTime,
        MetadataKey::PredictionTimestamp,
    ];

    /// Accepted wire names, English first.
    pub fn wire_names(&self) -> &'static [&'static str] {
        match self {
            Self::Mode => &["mode", "modo"],
            Self::Note => &["note", "nota"],
            Self::Airline => &["airline", "aerolinea"],
            Self::Route => &["route", "ruta"],
            Self::OriginName => &["origin_name", "origen_nombre"],
            Self::DestinationName => &["destination_name", "destino_nombre"],
            Self::DepartureTime => &["departure_time", "fecha_partida"],
            Self::PredictionTimestamp => &["prediction_timestamp", "timestamp_prediccion"],
            Self::Error => &["error"],
            Self::Status => &["status"],
        }
    }

    /// Whether values under this key are dates to be reformatted for display.
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::DepartureTime | Self::PredictionTimestamp)
    }
}

/// Open key/value metadata attached to a prediction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, serde_json::Value>);

impl Metadata {
    pub fn new(entries: BTreeMap<String, serde_json::Value>) -> Self {
        Self(entries)
    }

    /// Display text for a key. Null, `false` and empty strings count as absent.
    pub fn text(&self, key: MetadataKey) -> Option<String> {
        key.wire_names()
            .iter()
            .filter_map(|name| self.0.get(*name))
            .find_map(|value| match value {
                serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                serde_json::Value::Bool(true) => Some("true".to_string()),
                _ => None,
            })
    }

    pub fn mode(&self) -> Option<String> {
        self.text(MetadataKey::Mode)
    }

    pub fn note(&self) -> Option<String> {
        self.text(MetadataKey::Note)
    }

    /// Error message embedded by the service alongside the error sentinel.
    pub fn error_message(&self) -> Option<String> {
        self.text(MetadataKey::Error)
    }

    /// HTTP-like status embedded by the service alongside the error sentinel.
    pub fn status(&self) -> Option<u16> {
        MetadataKey::Status
            .wire_names()
            .iter()
            .find_map(|name| self.0.get(*name))
            .and_then(value_as_u16)
    }
}

fn value_as_u16(value: &serde_json::Value) -> Option<u16> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|v| u16::try_from(v).ok()),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// How the backend produced the prediction, derived from `metadata.mode`
/// and the `is_mock` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemMode {
    /// Demo request answered by the real model
    MockWithModel,
    /// Real model unavailable, backend fell back to simulated data
    Fallback,
    /// Simulated data
    Mock,
    /// Production prediction
    Real,
}

impl SystemMode {
    pub fn resolve(metadata: Option<&Metadata>, is_mock: bool) -> Self {
        let mode = metadata.and_then(Metadata::mode).unwrap_or_default();
        match mode.to_ascii_uppercase().as_str() {
            "MOCK_CON_ML" | "MOCK_WITH_ML" => Self::MockWithModel,
            "MOCK_FALLBACK" => Self::Fallback,
            _ if is_mock => Self::Mock,
            _ => Self::Real,
        }
    }
}

/// The `/predict` payload exactly as sent by the service, before the error
/// sentinel has been checked.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionEnvelope {
    #[serde(alias = "prediccion")]
    pub prediction: WirePrediction,
    #[serde(alias = "probabilidad_retraso", default)]
    pub delay_probability: f64,
    #[serde(alias = "confianza", default)]
    pub confidence: f64,
    #[serde(alias = "distancia_km", default)]
    pub distance_km: f64,
    #[serde(alias = "clima_origen", default)]
    pub origin_weather: Option<WeatherSnapshot>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    #[serde(alias = "modo_mock", default)]
    pub is_mock: bool,
}

/// A successful prediction. Immutable once received.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "PredictionEnvelope")]
pub struct PredictionResponse {
    pub prediction: Prediction,
    pub delay_probability: f64,
    pub confidence: f64,
    pub distance_km: f64,
    pub origin_weather: Option<WeatherSnapshot>,
    pub metadata: Option<Metadata>,
    pub is_mock: bool,
}

impl PredictionResponse {
    pub fn system_mode(&self) -> SystemMode {
        SystemMode::resolve(self.metadata.as_ref(), self.is_mock)
    }
}

impl TryFrom<PredictionEnvelope> for PredictionResponse {
    type Error = PredictError;

    fn try_from(envelope: PredictionEnvelope) -> Result<Self, Self::Error> {
        let prediction = match &envelope.prediction {
            WirePrediction::Code(code) => Prediction::from_code(*code),
            WirePrediction::Label(label) if label.eq_ignore_ascii_case("error") => {
                let metadata = envelope.metadata.as_ref();
                return Err(PredictError::Service {
                    status: metadata.and_then(Metadata::status),
                    message: metadata
                        .and_then(Metadata::error_message)
                        .unwrap_or_else(|| "The prediction service reported an error".to_string()),
                });
            }
            WirePrediction::Label(label) => match label.trim().parse::<i64>() {
                Ok(code) => Prediction::from_code(code),
                Err(_) => {
                    return Err(PredictError::InvalidResponse(format!(
                        "unexpected prediction value '{}'",
                        label
                    )))
                }
            },
        };

        Ok(Self {
            prediction,
            delay_probability: envelope.delay_probability,
            confidence: envelope.confidence,
            distance_km: envelope.distance_km,
            origin_weather: envelope.origin_weather,
            metadata: envelope.metadata,
            is_mock: envelope.is_mock,
        })
    }
}

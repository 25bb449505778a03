//! Prediction error types.
//!
//! Every failure carries an [`ErrorKind`] decided where the failure happens
//! (status code, transport error class), so presentation never has to
//! inspect message text.

use ontime_core::NetworkError;
use thiserror::Error;

/// Presentation category of a failed submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Origin and destination are the same airport
    SameAirport,
    /// The service has no data for this airline/route
    NotFound,
    /// The service could not be reached
    Connectivity,
    /// An airport was rejected by the service
    InvalidAirport,
    /// The request or the service timed out
    Timeout,
    Generic,
}

impl ErrorKind {
    /// Category for an HTTP status reported by the service.
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => Self::NotFound,
            408 | 504 => Self::Timeout,
            400 | 422 => Self::InvalidAirport,
            _ => Self::Generic,
        }
    }
}

/// Request fields that name an airport in a field-level rejection.
const AIRPORT_FIELDS: [&str; 4] = ["origin", "destination", "origen", "destino"];

/// Form input rejected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Origin and destination airports must be different (both {0})")]
    SameAirport(String),
}

#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Non-success HTTP status; message extracted from the body when possible
    #[error("{message}")]
    Request { status: u16, message: String },

    /// Field-level validation failure; `fields` lists the rejected request fields
    #[error("{message}")]
    Rejected {
        status: u16,
        fields: Vec<String>,
        message: String,
    },

    /// Success status, but the payload carries the service's error sentinel
    #[error("{message}")]
    Service { status: Option<u16>, message: String },

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl PredictError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(ValidationError::SameAirport(_)) => ErrorKind::SameAirport,
            Self::Request { status, .. } => ErrorKind::from_status(*status),
            Self::Rejected { fields, .. }
                if fields.iter().any(|f| AIRPORT_FIELDS.contains(&f.as_str())) =>
            {
                ErrorKind::InvalidAirport
            }
            Self::Rejected { .. } => ErrorKind::Generic,
            Self::Service { status, .. } => status.map_or(ErrorKind::Generic, ErrorKind::from_status),
            Self::Network(e) if e.is_timeout() => ErrorKind::Timeout,
            Self::Network(NetworkError::ServerError { status, .. }) => {
                ErrorKind::from_status(*status)
            }
            Self::Network(NetworkError::InvalidResponse(_)) => ErrorKind::Generic,
            Self::Network(_) => ErrorKind::Connectivity,
            Self::InvalidResponse(_) => ErrorKind::Generic,
        }
    }
}

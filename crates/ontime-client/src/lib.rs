//! HTTP client for the FlightOnTime prediction service.
//!
//! Provides the request/response wire types, the `/predict` and `/health`
//! calls, and a typed error whose [`ErrorKind`] drives presentation.

pub mod client;
pub mod error;
pub mod types;

pub use client::{HealthStatus, PredictionClient};
pub use error::{ErrorKind, PredictError, ValidationError};
pub use types::*;

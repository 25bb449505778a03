//! Flight form input and its conversion into a prediction request.

use chrono::{Local, NaiveDateTime, TimeZone, Utc};
use ontime_client::{PredictionRequest, ValidationError};

/// Accepted departure formats, most specific first.
const DEPARTURE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Values entered by the user. The departure is wall-clock time with no zone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightForm {
    pub airline: String,
    pub origin: String,
    pub destination: String,
    pub departure: Option<NaiveDateTime>,
}

impl FlightForm {
    pub fn new(
        airline: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            airline: airline.into(),
            origin: origin.into(),
            destination: destination.into(),
            departure: None,
        }
    }

    pub fn with_departure(mut self, departure: NaiveDateTime) -> Self {
        self.departure = Some(departure);
        self
    }

    /// Build the request, reading the departure in the local time zone.
    pub fn to_request(&self) -> Result<PredictionRequest, ValidationError> {
        self.to_request_in(&Local)
    }

    /// Build the request, reading the departure in `tz`.
    ///
    /// A wall-clock time skipped by a DST jump has no local instant; it is
    /// then taken as UTC.
    pub fn to_request_in<Tz: TimeZone>(&self, tz: &Tz) -> Result<PredictionRequest, ValidationError> {
        let departure = self.departure.map(|naive| {
            tz.from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|| naive.and_utc())
        });

        PredictionRequest::new(
            self.airline.trim(),
            self.origin.trim(),
            self.destination.trim(),
            departure,
        )
    }
}

/// Parse a departure such as `2025-12-25T14:30`.
pub fn parse_departure(input: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let input = input.trim();
    DEPARTURE_FORMATS[1..].iter().fold(
        NaiveDateTime::parse_from_str(input, DEPARTURE_FORMATS[0]),
        |parsed, fmt| parsed.or_else(|_| NaiveDateTime::parse_from_str(input, fmt)),
    )
}

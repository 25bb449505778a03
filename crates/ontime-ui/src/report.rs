//! Localized, multi-line messages for failed submissions.

use ontime_client::{ErrorKind, PredictError};

use crate::i18n::Localizer;

/// What the presenter shows when a submission fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    /// Message lines; empty strings are paragraph breaks
    pub lines: Vec<String>,
}

impl ErrorReport {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Build the report for `error`. `base_url` is named in connectivity hints.
pub fn error_report(error: &PredictError, localizer: &Localizer, base_url: &str) -> ErrorReport {
    let kind = error.kind();
    let t = |key: &str| localizer.t(key).to_string();
    let message = error.to_string();

    let lines = match kind {
        ErrorKind::SameAirport => vec![t("error.same.airport")],
        ErrorKind::NotFound => vec![
            t("error.not.found"),
            String::new(),
            t("error.verify"),
            t("error.airline.valid"),
            t("error.airports.exist"),
            String::new(),
            t("error.airlines.valid"),
        ],
        ErrorKind::Connectivity => vec![
            t("error.prediction"),
            String::new(),
            t("error.connection"),
            localizer.t_args("error.backend", &[("url", base_url)]),
        ],
        ErrorKind::InvalidAirport => vec![
            t("error.prediction"),
            String::new(),
            localizer.t_args("error.airport", &[("message", &message)]),
            String::new(),
            t("error.airport.select"),
        ],
        ErrorKind::Timeout => vec![
            t("error.prediction"),
            String::new(),
            t("error.timeout"),
            t("error.server.busy"),
        ],
        ErrorKind::Generic => vec![
            t("error.prediction"),
            String::new(),
            localizer.t_args("error.generic", &[("message", &message)]),
        ],
    };

    ErrorReport { kind, lines }
}

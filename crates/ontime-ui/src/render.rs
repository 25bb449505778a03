//! Turns a prediction response into a localized, unit-converted view model.
//!
//! Rendering is pure: the same response, locale, unit system and local time
//! zone always give the same [`ResultView`]. Presenters decide how to draw it.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use ontime_client::{Metadata, MetadataKey, PredictionResponse, SystemMode, WeatherSnapshot};

use crate::i18n::{Locale, Localizer};
use crate::units::UnitConverter;

const DISPLAY_DATE_FORMAT: &str = "%d %b %Y, %H:%M";

const NAIVE_DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Default,
    Success,
    Danger,
    Warning,
    Info,
}

impl Tone {
    /// Icon prefixed to full-width rows.
    pub fn icon(&self) -> Option<&'static str> {
        match self {
            Tone::Success => Some("✅"),
            Tone::Warning => Some("⚠️"),
            Tone::Info => Some("ℹ️"),
            Tone::Default | Tone::Danger => None,
        }
    }
}

/// A labelled display value.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub label: String,
    pub value: String,
}

impl Field {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusView {
    pub on_time: bool,
    pub icon: &'static str,
    pub tone: Tone,
    pub label: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricView {
    pub field: Field,
    /// Bar width in percent, when the metric is drawn as a bar
    pub bar_width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherView {
    pub title: String,
    pub condition: Field,
    pub temperature: Field,
    pub humidity: Field,
    pub wind: Field,
    pub visibility: Field,
}

impl WeatherView {
    pub fn fields(&self) -> [&Field; 5] {
        [
            &self.condition,
            &self.temperature,
            &self.humidity,
            &self.wind,
            &self.visibility,
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetadataRow {
    pub field: Field,
    pub tone: Tone,
    pub full_width: bool,
}

impl MetadataRow {
    /// Value as displayed: full-width rows carry their tone icon.
    pub fn display_value(&self) -> String {
        match self.tone.icon() {
            Some(icon) if self.full_width => format!("{} {}", icon, self.field.value),
            _ => self.field.value.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub title: String,
    pub status: StatusView,
    pub probability: MetricView,
    pub confidence: MetricView,
    pub distance: MetricView,
    pub weather: Option<WeatherView>,
    pub metadata_title: String,
    pub metadata: Vec<MetadataRow>,
}

pub fn render(
    response: &PredictionResponse,
    localizer: &Localizer,
    units: &UnitConverter,
) -> ResultView {
    let probability = percent(response.delay_probability);
    let confidence = percent(response.confidence);

    ResultView {
        title: localizer.t("results.title").to_string(),
        status: status_view(response, localizer),
        probability: MetricView {
            field: Field::new(localizer.t("metrics.probability"), format!("{:.1}%", probability)),
            bar_width: Some(probability),
        },
        confidence: MetricView {
            field: Field::new(localizer.t("metrics.confidence"), format!("{:.1}%", confidence)),
            bar_width: Some(confidence),
        },
        distance: MetricView {
            field: Field::new(localizer.t("metrics.distance"), units.distance(response.distance_km)),
            bar_width: None,
        },
        weather: response
            .origin_weather
            .as_ref()
            .map(|w| weather_view(w, localizer, units)),
        metadata_title: localizer.t("metadata.title").to_string(),
        metadata: metadata_rows(response, localizer),
    }
}

/// Fraction in [0, 1] as a percentage with one decimal.
fn percent(fraction: f64) -> f64 {
    (fraction * 1000.0).round() / 10.0
}

fn status_view(response: &PredictionResponse, localizer: &Localizer) -> StatusView {
    if response.prediction.is_on_time() {
        StatusView {
            on_time: true,
            icon: "✈️",
            tone: Tone::Success,
            label: localizer.t("results.ontime").to_string(),
            subtitle: localizer.t("results.ontime.subtitle").to_string(),
        }
    } else {
        StatusView {
            on_time: false,
            icon: "⏰",
            tone: Tone::Danger,
            label: localizer.t("results.delayed").to_string(),
            subtitle: localizer.t("results.delayed.subtitle").to_string(),
        }
    }
}

fn weather_view(weather: &WeatherSnapshot, localizer: &Localizer, units: &UnitConverter) -> WeatherView {
    WeatherView {
        title: localizer.t("weather.title").to_string(),
        condition: Field::new(localizer.t("weather.condition"), weather.display_condition()),
        temperature: Field::new(
            localizer.t("weather.temperature"),
            units.temperature(weather.temperature_c),
        ),
        humidity: Field::new(localizer.t("weather.humidity"), format!("{}%", weather.humidity_pct)),
        wind: Field::new(localizer.t("weather.wind"), units.wind_speed(weather.wind_speed_ms)),
        visibility: Field::new(
            localizer.t("weather.visibility"),
            units.visibility(weather.visibility_m),
        ),
    }
}

fn metadata_rows(response: &PredictionResponse, localizer: &Localizer) -> Vec<MetadataRow> {
    let mut rows = Vec::with_capacity(MetadataKey::DISPLAY_ORDER.len() + 2);

    let (mode_key, tone) = match response.system_mode() {
        SystemMode::MockWithModel => ("metadata.mode.ml", Tone::Success),
        SystemMode::Fallback => ("metadata.mode.fallback", Tone::Warning),
        SystemMode::Mock => ("metadata.mode.mock", Tone::Info),
        SystemMode::Real => ("metadata.mode.real", Tone::Success),
    };
    rows.push(MetadataRow {
        field: Field::new(localizer.t("metadata.mode.label"), localizer.t(mode_key)),
        tone,
        full_width: true,
    });

    let Some(metadata) = response.metadata.as_ref() else {
        return rows;
    };

    if let Some(note) = metadata.note() {
        rows.push(MetadataRow {
            field: Field::new(localizer.t("metadata.note"), note),
            tone: Tone::Warning,
            full_width: true,
        });
    }

    rows.extend(
        MetadataKey::DISPLAY_ORDER
            .iter()
            .filter_map(|key| plain_row(metadata, *key, localizer)),
    );
    rows
}

fn plain_row(metadata: &Metadata, key: MetadataKey, localizer: &Localizer) -> Option<MetadataRow> {
    let label = label_key(key)?;
    let raw = metadata.text(key)?;
    let value = if key.is_temporal() {
        format_timestamp(&raw, localizer.locale()).unwrap_or(raw)
    } else {
        raw
    };

    Some(MetadataRow {
        field: Field::new(localizer.t(label), value),
        tone: Tone::Default,
        full_width: false,
    })
}

/// Row label for keys shown as plain rows.
fn label_key(key: MetadataKey) -> Option<&'static str> {
    match key {
        MetadataKey::Airline => Some("metadata.airline"),
        MetadataKey::Route => Some("metadata.route"),
        MetadataKey::OriginName => Some("metadata.origin"),
        MetadataKey::DestinationName => Some("metadata.destination"),
        MetadataKey::DepartureTime => Some("metadata.departure"),
        MetadataKey::PredictionTimestamp => Some("metadata.calculated"),
        MetadataKey::Mode | MetadataKey::Note | MetadataKey::Error | MetadataKey::Status => None,
    }
}

/// Format a date or timestamp as e.g. `25 Dec 2025, 14:30` in `locale`,
/// converting absolute timestamps to the local time zone.
pub fn format_timestamp(value: &str, locale: Locale) -> Option<String> {
    format_timestamp_in(value, locale, &Local)
}

/// Like [`format_timestamp`], converting absolute timestamps to `tz`.
///
/// Naive values carry no zone and are shown as given. Returns `None` for
/// values that are not dates.
pub fn format_timestamp_in<Tz>(value: &str, locale: Locale, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let value = value.trim();
    let chrono_locale = locale.chrono_locale();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(
            dt.with_timezone(tz)
                .format_localized(DISPLAY_DATE_FORMAT, chrono_locale)
                .to_string(),
        );
    }

    let naive = NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    Some(
        naive
            .and_utc()
            .format_localized(DISPLAY_DATE_FORMAT, chrono_locale)
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::UnitSystem;
    use chrono::{FixedOffset, Utc};
    use ontime_client::Prediction;

    fn response(metadata: Option<serde_json::Value>, is_mock: bool) -> PredictionResponse {
        PredictionResponse {
            prediction: Prediction::Delayed,
            delay_probability: 0.873,
            confidence: 0.9134,
            distance_km: 1000.0,
            origin_weather: Some(WeatherSnapshot {
                condition_text: "Rain".into(),
                description: Some("lluvia ligera".into()),
                temperature_c: 25.0,
                humidity_pct: 82,
                wind_speed_ms: 10.0,
                visibility_m: 10000.0,
                pressure_hpa: Some(1008.0),
            }),
            metadata: metadata.map(|m| serde_json::from_value(m).unwrap()),
            is_mock,
        }
    }

    #[test]
    fn test_status_and_metrics() {
        let view = render(
            &response(None, false),
            &Localizer::new(Locale::En),
            &UnitConverter::default(),
        );

        assert!(!view.status.on_time);
        assert_eq!(view.status.icon, "⏰");
        assert_eq!(view.status.tone, Tone::Danger);
        assert_eq!(view.status.label, "Delayed");
        assert_eq!(view.probability.field.value, "87.3%");
        assert_eq!(view.probability.bar_width, Some(87.3));
        assert_eq!(view.confidence.field.value, "91.3%");
        assert_eq!(view.distance.field.value, "1000 km");
    }

    #[test]
    fn test_on_time_status() {
        let mut on_time = response(None, false);
        on_time.prediction = Prediction::OnTime;

        let view = render(&on_time, &Localizer::new(Locale::Es), &UnitConverter::default());
        assert_eq!(view.status.icon, "✈️");
        assert_eq!(view.status.tone, Tone::Success);
        assert_eq!(view.status.label, "Puntual");
    }

    #[test]
    fn test_weather_in_imperial() {
        let view = render(
            &response(None, false),
            &Localizer::new(Locale::En),
            &UnitConverter::new(UnitSystem::Imperial),
        );

        let weather = view.weather.unwrap();
        assert_eq!(weather.condition.value, "lluvia ligera");
        assert_eq!(weather.temperature.value, "77.0°F");
        assert_eq!(weather.humidity.value, "82%");
        assert_eq!(weather.wind.value, "22.4 mph");
        assert_eq!(weather.visibility.value, "6.2 mi");
        assert_eq!(view.distance.field.value, "621 mi");
    }

    #[test]
    fn test_missing_weather_omits_section() {
        let mut no_weather = response(None, false);
        no_weather.origin_weather = None;

        let view = render(&no_weather, &Localizer::default(), &UnitConverter::default());
        assert!(view.weather.is_none());
    }

    #[test]
    fn test_mode_banner_without_metadata() {
        let view = render(&response(None, true), &Localizer::new(Locale::En), &UnitConverter::default());

        assert_eq!(view.metadata.len(), 1);
        assert_eq!(view.metadata[0].tone, Tone::Info);
        assert_eq!(view.metadata[0].display_value(), "ℹ️ 🔧 Demo (Simulated Data)");
    }

    #[test]
    fn test_metadata_rows_order_and_tones() {
        let metadata = serde_json::json!({
            "modo": "MOCK_FALLBACK",
            "nota": "Modelo no disponible",
            "timestamp_prediccion": "2025-12-25T14:30:00",
            "ruta": "GRU → SCL",
            "aerolinea": "LATAM",
            "unknown_key": "ignored"
        });
        let view = render(
            &response(Some(metadata), true),
            &Localizer::new(Locale::En),
            &UnitConverter::default(),
        );

        let labels: Vec<_> = view.metadata.iter().map(|r| r.field.label.as_str()).collect();
        assert_eq!(
            labels,
            ["System Mode", "System Note", "Airline", "Flight Route", "Calculated At"]
        );
        assert_eq!(view.metadata[0].tone, Tone::Warning);
        assert!(view.metadata[0].display_value().starts_with("⚠️"));
        assert_eq!(view.metadata[1].display_value(), "⚠️ Modelo no disponible");
        assert_eq!(view.metadata[2].display_value(), "LATAM");
        assert_eq!(view.metadata[4].field.value, "25 Dec 2025, 14:30");
    }

    #[test]
    fn test_format_timestamp_converts_to_viewer_zone() {
        let sao_paulo = FixedOffset::west_opt(3 * 3600).unwrap();

        // The departure the form sent for 14:30 local comes back as UTC
        assert_eq!(
            format_timestamp_in("2025-12-25T17:30:00.000Z", Locale::En, &sao_paulo).as_deref(),
            Some("25 Dec 2025, 14:30")
        );
        assert_eq!(
            format_timestamp_in("2025-12-25T14:30:00-03:00", Locale::En, &Utc).as_deref(),
            Some("25 Dec 2025, 17:30")
        );
    }

    #[test]
    fn test_format_timestamp_keeps_naive_values() {
        let sao_paulo = FixedOffset::west_opt(3 * 3600).unwrap();
        assert_eq!(
            format_timestamp_in("2025-03-01T08:05", Locale::En, &sao_paulo).as_deref(),
            Some("01 Mar 2025, 08:05")
        );
        let es = format_timestamp("2025-12-25T14:30:00", Locale::Es).unwrap();
        assert!(es.contains("dic"), "got {}", es);
        assert!(es.ends_with("14:30"), "got {}", es);
    }

    #[test]
    fn test_non_date_value_kept() {
        assert_eq!(format_timestamp("mañana", Locale::Es), None);

        let metadata = serde_json::json!({ "fecha_partida": "por confirmar" });
        let view = render(
            &response(Some(metadata), false),
            &Localizer::new(Locale::Es),
            &UnitConverter::default(),
        );
        assert_eq!(view.metadata.last().unwrap().field.value, "por confirmar");
    }
}

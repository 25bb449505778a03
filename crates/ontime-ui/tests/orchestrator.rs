//! Orchestrator tests against a wiremock backend.

use std::sync::Arc;
use std::time::Duration;

use ontime_client::{ErrorKind, HealthStatus, PredictionClient};
use ontime_core::PreferencesConfig;
use ontime_ui::render::Tone;
use ontime_ui::{
    AppState, ErrorReport, FlightForm, Localizer, MemoryStore, Orchestrator, PreferenceStore,
    Presenter, ResultView, LOCALE_KEY, UNIT_KEY,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Loading(bool),
    Health(HealthStatus),
    Result(ResultView),
    Error(ErrorReport),
    Translations(String),
}

#[derive(Default)]
struct RecordingPresenter {
    events: Vec<Event>,
}

impl RecordingPresenter {
    fn results(&self) -> Vec<&ResultView> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Result(view) => Some(view),
                _ => None,
            })
            .collect()
    }

    fn loading(&self) -> Vec<bool> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Loading(on) => Some(*on),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn set_loading(&mut self, loading: bool) {
        self.events.push(Event::Loading(loading));
    }

    fn show_health(&mut self, status: HealthStatus) {
        self.events.push(Event::Health(status));
    }

    fn show_result(&mut self, view: &ResultView) {
        self.events.push(Event::Result(view.clone()));
    }

    fn show_error(&mut self, report: &ErrorReport) {
        self.events.push(Event::Error(report.clone()));
    }

    fn apply_translations(&mut self, localizer: &Localizer) {
        self.events
            .push(Event::Translations(localizer.locale().code().to_string()));
    }
}

fn prediction_body() -> serde_json::Value {
    serde_json::json!({
        "prediccion": 1,
        "probabilidad_retraso": 0.873,
        "confianza": 0.912,
        "distancia_km": 1000.0,
        "clima_origen": {
            "temperatura": 25.0,
            "humedad": 70,
            "presion": 1012,
            "visibilidad": 10000,
            "viento_velocidad": 10.0,
            "condicion": "Clouds",
            "descripcion": "nubes dispersas"
        },
        "metadata": {
            "modo": "MOCK_FALLBACK",
            "nota": "Modelo ML no disponible",
            "aerolinea": "LATAM"
        },
        "modo_mock": true
    })
}

fn orchestrator(base_url: &str, store: Arc<dyn PreferenceStore>) -> Orchestrator<RecordingPresenter> {
    let defaults = PreferencesConfig {
        default_locale: Some("es".into()),
        default_unit: Some("km".into()),
    };
    let client = PredictionClient::new(base_url, None).unwrap();
    let state = AppState::load(store, &defaults);
    Orchestrator::new(client, state, RecordingPresenter::default())
}

#[tokio::test]
async fn test_same_airport_never_calls_backend() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(prediction_body()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut orch = orchestrator(&mock_server.uri(), Arc::new(MemoryStore::new()));
    let result = orch.submit(&FlightForm::new("1", "GRU", "GRU"), false).await;

    assert_eq!(result, Err(ErrorKind::SameAirport));
    assert!(orch.presenter().loading().is_empty());
    assert!(matches!(
        orch.presenter().events.last(),
        Some(Event::Error(report)) if report.kind == ErrorKind::SameAirport
    ));
}

#[tokio::test]
async fn test_successful_submission_renders_result() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(query_param("mock", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(prediction_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut orch = orchestrator(&mock_server.uri(), Arc::new(MemoryStore::new()));
    orch.submit(&FlightForm::new("1", "GRU", "SCL"), true)
        .await
        .unwrap();

    let presenter = orch.presenter();
    assert_eq!(presenter.loading(), vec![true, false]);

    let results = presenter.results();
    assert_eq!(results.len(), 1);
    let view = results[0];
    assert_eq!(view.status.label, "Retrasado");
    assert_eq!(view.probability.field.value, "87.3%");
    assert_eq!(view.distance.field.value, "1000 km");

    // Fallback banner first, then the system note
    assert_eq!(view.metadata[0].tone, Tone::Warning);
    assert_eq!(view.metadata[0].display_value(), "⚠️ 🔧 Demo (Fallback activo)");
    assert_eq!(view.metadata[1].display_value(), "⚠️ Modelo ML no disponible");
    assert!(orch.state().last_result().is_some());
}

#[tokio::test]
async fn test_unit_change_rerenders_without_new_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(prediction_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let mut orch = orchestrator(&mock_server.uri(), store.clone());
    orch.submit(&FlightForm::new("1", "GRU", "SCL"), false)
        .await
        .unwrap();

    orch.set_unit("miles").unwrap();

    let results = orch.presenter().results();
    assert_eq!(results.len(), 2);
    let view = results[1];
    assert_eq!(view.distance.field.value, "621 mi");
    assert_eq!(view.weather.as_ref().unwrap().temperature.value, "77.0°F");
    // Percentages are untouched by unit changes
    assert_eq!(view.probability.field.value, "87.3%");
    assert_eq!(store.get(UNIT_KEY).as_deref(), Some("miles"));
}

#[tokio::test]
async fn test_locale_change_relabels_and_rerenders() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(prediction_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let mut orch = orchestrator(&mock_server.uri(), store.clone());
    orch.submit(&FlightForm::new("1", "GRU", "SCL"), false)
        .await
        .unwrap();

    orch.set_locale("en").unwrap();
    assert!(orch.set_locale("de").is_none());

    let presenter = orch.into_presenter();
    let translations: Vec<_> = presenter
        .events
        .iter()
        .filter_map(|e| match e {
            Event::Translations(code) => Some(code.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(translations, ["es", "en"]);

    let results = presenter.results();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].status.label, "Retrasado");
    assert_eq!(results[1].status.label, "Delayed");
    assert_ne!(results[1].probability.field.label, results[0].probability.field.label);
    // Only labels change; the numbers are the same values in the same units
    assert_eq!(results[1].probability.field.value, results[0].probability.field.value);
    assert_eq!(results[1].probability.bar_width, results[0].probability.bar_width);
    assert_eq!(results[1].distance.field.value, results[0].distance.field.value);
    assert_eq!(results[1].distance.field.value, "1000 km");
    assert_eq!(store.get(LOCALE_KEY).as_deref(), Some("en"));
}

#[tokio::test]
async fn test_state_changes_are_picked_up_on_sync() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(prediction_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut orch = orchestrator(&mock_server.uri(), Arc::new(MemoryStore::new()));
    orch.submit(&FlightForm::new("1", "GRU", "SCL"), false)
        .await
        .unwrap();

    orch.state_mut().set_unit("miles").unwrap();
    orch.state_mut().set_locale("en").unwrap();
    assert_eq!(orch.presenter().results().len(), 1);

    orch.sync_preferences();
    orch.sync_preferences();

    let presenter = orch.presenter();
    let results = presenter.results();
    assert_eq!(results.len(), 2, "both changes redraw once");
    assert_eq!(results[1].distance.field.value, "621 mi");
    assert_eq!(results[1].status.label, "Delayed");
    assert_eq!(
        presenter.events.iter().filter(|e| matches!(e, Event::Translations(_))).count(),
        2
    );
}

#[tokio::test]
async fn test_preference_change_without_result_renders_nothing() {
    let mut orch = orchestrator("http://127.0.0.1:1", Arc::new(MemoryStore::new()));
    orch.set_unit("miles").unwrap();
    assert!(orch.presenter().results().is_empty());
}

#[tokio::test]
async fn test_not_found_clears_loading_and_reports() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": "No se hallan esos datos en la base de datos."
        })))
        .mount(&mock_server)
        .await;

    let mut orch = orchestrator(&mock_server.uri(), Arc::new(MemoryStore::new()));
    let result = orch.submit(&FlightForm::new("99", "GRU", "SCL"), false).await;

    assert_eq!(result, Err(ErrorKind::NotFound));
    let presenter = orch.presenter();
    assert_eq!(presenter.loading(), vec![true, false]);
    match presenter.events.last() {
        Some(Event::Error(report)) => {
            assert_eq!(report.lines[0], "⚠️ No se hallan esos datos en la base de datos.");
        }
        other => panic!("expected error report, got {:?}", other),
    }
    assert!(orch.state().last_result().is_none());
}

#[tokio::test]
async fn test_abandoned_submission_clears_loading() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(prediction_body())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let mut orch = orchestrator(&mock_server.uri(), Arc::new(MemoryStore::new()));
    let form = FlightForm::new("1", "GRU", "SCL");
    let outcome = tokio::time::timeout(Duration::from_millis(100), orch.submit(&form, false)).await;

    assert!(outcome.is_err(), "submission should still be in flight");
    assert_eq!(orch.presenter().loading(), vec![true, false]);
    assert!(orch.presenter().results().is_empty());
    assert!(orch.state().last_result().is_none());
}

#[tokio::test]
async fn test_connection_failure_clears_loading() {
    let mut orch = orchestrator("http://127.0.0.1:1", Arc::new(MemoryStore::new()));
    let result = orch.submit(&FlightForm::new("1", "GRU", "SCL"), false).await;

    assert_eq!(result, Err(ErrorKind::Connectivity));
    assert_eq!(orch.presenter().loading(), vec![true, false]);
    match orch.presenter().events.last() {
        Some(Event::Error(report)) => {
            assert!(report.text().contains("http://127.0.0.1:1"));
        }
        other => panic!("expected error report, got {:?}", other),
    }
}

#[tokio::test]
async fn test_health_check_is_presented() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let mut orch = orchestrator(&mock_server.uri(), Arc::new(MemoryStore::new()));
    assert_eq!(orch.check_health().await, HealthStatus::Operational);
    assert_eq!(
        orch.presenter().events.last(),
        Some(&Event::Health(HealthStatus::Operational))
    );
}

//! Drives a submission from form input to rendered result or error report.

use std::sync::Arc;

use ontime_client::{ErrorKind, HealthStatus, PredictError, PredictionClient};
use parking_lot::Mutex;
use tracing::instrument;

use crate::form::FlightForm;
use crate::i18n::Locale;
use crate::presenter::Presenter;
use crate::render::render;
use crate::report::error_report;
use crate::state::{AppState, PreferenceChange};
use crate::units::UnitSystem;

/// Keeps the presenter in the loading state until dropped.
struct LoadingGuard<'a, P: Presenter> {
    presenter: &'a mut P,
}

impl<'a, P: Presenter> LoadingGuard<'a, P> {
    fn enter(presenter: &'a mut P) -> Self {
        presenter.set_loading(true);
        Self { presenter }
    }
}

impl<P: Presenter> Drop for LoadingGuard<'_, P> {
    fn drop(&mut self) {
        self.presenter.set_loading(false);
    }
}

pub struct Orchestrator<P: Presenter> {
    client: PredictionClient,
    state: AppState,
    presenter: P,
    pending: Arc<Mutex<Vec<PreferenceChange>>>,
}

impl<P: Presenter> Orchestrator<P> {
    pub fn new(client: PredictionClient, mut state: AppState, mut presenter: P) -> Self {
        presenter.apply_translations(state.localizer());

        let pending = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&pending);
        state.subscribe(move |change| sink.lock().push(change));

        Self {
            client,
            state,
            presenter,
            pending,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    pub async fn check_health(&mut self) -> HealthStatus {
        let status = self.client.health().await;
        self.presenter.show_health(status);
        status
    }

    /// Validate `form`, request a prediction and present the outcome.
    ///
    /// The presenter is in the loading state only while the request is in
    /// flight. It is left on every path, including when this future is
    /// dropped mid-request. A same-airport form never reaches the network.
    #[instrument(skip(self, form), fields(origin = %form.origin, destination = %form.destination), level = "info")]
    pub async fn submit(&mut self, form: &FlightForm, use_mock: bool) -> Result<(), ErrorKind> {
        let request = match form.to_request() {
            Ok(request) => request,
            Err(e) => return Err(self.fail(&PredictError::Validation(e))),
        };

        let outcome = {
            let _loading = LoadingGuard::enter(&mut self.presenter);
            self.client.predict(&request, use_mock).await
        };

        match outcome {
            Ok(response) => {
                let view = render(&response, self.state.localizer(), self.state.units());
                self.state.set_last_result(response);
                self.presenter.show_result(&view);
                Ok(())
            }
            Err(e) => Err(self.fail(&e)),
        }
    }

    /// Change the locale; static labels and any shown result follow.
    pub fn set_locale(&mut self, code: &str) -> Option<Locale> {
        let locale = self.state.set_locale(code)?;
        self.sync_preferences();
        Some(locale)
    }

    /// Change the unit system and redraw any shown result.
    pub fn set_unit(&mut self, code: &str) -> Option<UnitSystem> {
        let unit = self.state.set_unit(code)?;
        self.sync_preferences();
        Some(unit)
    }

    /// Apply preference changes announced by [`AppState`] since the last
    /// sync, including ones made through [`Orchestrator::state_mut`].
    ///
    /// A locale change relabels the presenter. Any change redraws the shown
    /// result once.
    pub fn sync_preferences(&mut self) {
        let changes = std::mem::take(&mut *self.pending.lock());
        if changes.is_empty() {
            return;
        }

        if changes
            .iter()
            .any(|change| matches!(change, PreferenceChange::Locale(_)))
        {
            self.presenter.apply_translations(self.state.localizer());
        }
        self.rerender();
    }

    fn rerender(&mut self) {
        if let Some(response) = self.state.last_result() {
            let view = render(response, self.state.localizer(), self.state.units());
            self.presenter.show_result(&view);
        }
    }

    fn fail(&mut self, error: &PredictError) -> ErrorKind {
        let report = error_report(error, self.state.localizer(), self.client.base_url());
        tracing::error!("Prediction failed ({:?}): {}", report.kind, error);
        self.presenter.show_error(&report);
        report.kind
    }
}

//! Application state: preferences, the last prediction, and change subscribers.

use std::sync::Arc;

use ontime_client::PredictionResponse;
use ontime_core::PreferencesConfig;

use crate::i18n::{Locale, Localizer};
use crate::preferences::{PreferenceStore, LOCALE_KEY, UNIT_KEY};
use crate::units::{UnitConverter, UnitSystem};

/// Notification sent to subscribers after a preference changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceChange {
    Locale(Locale),
    Unit(UnitSystem),
}

type Subscriber = Box<dyn Fn(PreferenceChange) + Send + Sync>;

pub struct AppState {
    localizer: Localizer,
    units: UnitConverter,
    store: Arc<dyn PreferenceStore>,
    last_result: Option<PredictionResponse>,
    subscribers: Vec<Subscriber>,
}

impl AppState {
    /// Restore preferences from `store`, falling back to the configured
    /// defaults, then the platform locale, then Spanish and kilometres.
    pub fn load(store: Arc<dyn PreferenceStore>, defaults: &PreferencesConfig) -> Self {
        let locale = store
            .get(LOCALE_KEY)
            .and_then(|code| Locale::from_code(&code))
            .or_else(|| defaults.default_locale.as_deref().and_then(Locale::from_code))
            .or_else(Locale::detect_system)
            .unwrap_or_default();

        let unit = store
            .get(UNIT_KEY)
            .and_then(|code| UnitSystem::from_code(&code))
            .or_else(|| defaults.default_unit.as_deref().and_then(UnitSystem::from_code))
            .unwrap_or_default();

        tracing::debug!("Preferences loaded: locale={}, unit={}", locale.code(), unit.code());

        Self {
            localizer: Localizer::new(locale),
            units: UnitConverter::new(unit),
            store,
            last_result: None,
            subscribers: Vec::new(),
        }
    }

    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    pub fn units(&self) -> &UnitConverter {
        &self.units
    }

    pub fn last_result(&self) -> Option<&PredictionResponse> {
        self.last_result.as_ref()
    }

    pub fn set_last_result(&mut self, response: PredictionResponse) {
        self.last_result = Some(response);
    }

    pub fn subscribe(&mut self, callback: impl Fn(PreferenceChange) + Send + Sync + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    /// Switch the display locale. Unsupported codes are logged and ignored.
    pub fn set_locale(&mut self, code: &str) -> Option<Locale> {
        let Some(locale) = Locale::from_code(code) else {
            tracing::warn!("Unsupported locale: {}", code);
            return None;
        };

        self.localizer.set_locale(locale);
        self.persist(LOCALE_KEY, locale.code());
        self.notify(PreferenceChange::Locale(locale));
        Some(locale)
    }

    /// Switch the unit system. Unsupported codes are logged and ignored.
    pub fn set_unit(&mut self, code: &str) -> Option<UnitSystem> {
        let Some(unit) = UnitSystem::from_code(code) else {
            tracing::warn!("Unsupported unit system: {}", code);
            return None;
        };

        self.units.set_system(unit);
        self.persist(UNIT_KEY, unit.code());
        self.notify(PreferenceChange::Unit(unit));
        Some(unit)
    }

    // A failed write keeps the in-memory preference.
    fn persist(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            tracing::warn!("{}", e);
        }
    }

    fn notify(&self, change: PreferenceChange) {
        for subscriber in &self.subscribers {
            subscriber(change);
        }
    }
}

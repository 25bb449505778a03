//! Metric/imperial conversion of the values the service reports in metric.

const MILES_PER_KM: f64 = 0.621371;
const MPH_PER_MS: f64 = 2.23694;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub const ALL: [UnitSystem; 2] = [UnitSystem::Metric, UnitSystem::Imperial];

    /// Persisted code: `km` or `miles`.
    pub fn code(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "km",
            UnitSystem::Imperial => "miles",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "km" => Some(UnitSystem::Metric),
            "miles" => Some(UnitSystem::Imperial),
            _ => None,
        }
    }
}

/// Converts and formats metric inputs for the active unit system.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitConverter {
    system: UnitSystem,
}

impl UnitConverter {
    pub fn new(system: UnitSystem) -> Self {
        Self { system }
    }

    pub fn system(&self) -> UnitSystem {
        self.system
    }

    pub(crate) fn set_system(&mut self, system: UnitSystem) {
        self.system = system;
    }

    /// Distance rounded to whole units.
    pub fn distance_value(&self, km: f64) -> f64 {
        match self.system {
            UnitSystem::Metric => km.round(),
            UnitSystem::Imperial => (km * MILES_PER_KM).round(),
        }
    }

    pub fn distance(&self, km: f64) -> String {
        let value = self.distance_value(km);
        match self.system {
            UnitSystem::Metric => format!("{:.0} km", value),
            UnitSystem::Imperial => format!("{:.0} mi", value),
        }
    }

    pub fn temperature_value(&self, celsius: f64) -> f64 {
        match self.system {
            UnitSystem::Metric => round1(celsius),
            UnitSystem::Imperial => round1(celsius * 9.0 / 5.0 + 32.0),
        }
    }

    pub fn temperature(&self, celsius: f64) -> String {
        let value = self.temperature_value(celsius);
        match self.system {
            UnitSystem::Metric => format!("{:.1}°C", value),
            UnitSystem::Imperial => format!("{:.1}°F", value),
        }
    }

    pub fn wind_speed_value(&self, ms: f64) -> f64 {
        match self.system {
            UnitSystem::Metric => round1(ms),
            UnitSystem::Imperial => round1(ms * MPH_PER_MS),
        }
    }

    pub fn wind_speed(&self, ms: f64) -> String {
        let value = self.wind_speed_value(ms);
        match self.system {
            UnitSystem::Metric => format!("{:.1} m/s", value),
            UnitSystem::Imperial => format!("{:.1} mph", value),
        }
    }

    /// Visibility goes through kilometres first; only the result is rounded.
    pub fn visibility_value(&self, meters: f64) -> f64 {
        let km = meters / 1000.0;
        match self.system {
            UnitSystem::Metric => round1(km),
            UnitSystem::Imperial => round1(km * MILES_PER_KM),
        }
    }

    pub fn visibility(&self, meters: f64) -> String {
        let value = self.visibility_value(meters);
        match self.system {
            UnitSystem::Metric => format!("{:.1} km", value),
            UnitSystem::Imperial => format!("{:.1} mi", value),
        }
    }

    /// Distance in kilometres from a value in the active system.
    pub fn km_from(&self, value: f64) -> f64 {
        match self.system {
            UnitSystem::Metric => value,
            UnitSystem::Imperial => km_from_miles(value),
        }
    }
}

pub fn km_from_miles(miles: f64) -> f64 {
    miles / MILES_PER_KM
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

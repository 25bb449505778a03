//! Presentation layer for FlightOnTime predictions: localization, unit
//! conversion, result rendering and the submission orchestrator.

pub mod form;
pub mod i18n;
pub mod orchestrator;
pub mod preferences;
pub mod presenter;
pub mod render;
pub mod report;
pub mod state;
pub mod units;

pub use form::{parse_departure, FlightForm};
pub use i18n::{Locale, Localizer};
pub use orchestrator::Orchestrator;
pub use preferences::{FileStore, MemoryStore, PreferenceStore, LOCALE_KEY, UNIT_KEY};
pub use presenter::{Presenter, TerminalPresenter};
pub use render::{format_timestamp, render, ResultView};
pub use report::{error_report, ErrorReport};
pub use state::{AppState, PreferenceChange};
pub use units::{km_from_miles, UnitConverter, UnitSystem};

//! Localization store: key → string tables for the supported locales.

mod en;
mod es;

use sys_locale::get_locale;

/// Supported display locales. Spanish is the primary locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Es, Locale::En];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "es" => Some(Locale::Es),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    /// Locale of the operating system when it is one we support.
    pub fn detect_system() -> Option<Self> {
        get_locale().as_deref().and_then(Self::from_system_tag)
    }

    /// Parse a platform tag such as `en-US`, `es_AR.UTF-8` or `C`.
    fn from_system_tag(tag: &str) -> Option<Self> {
        let language = tag.split(['-', '_', '.']).next()?;
        Self::from_code(language)
    }

    /// Locale used by chrono for month names.
    pub fn chrono_locale(&self) -> chrono::Locale {
        match self {
            Locale::Es => chrono::Locale::es_ES,
            Locale::En => chrono::Locale::en_US,
        }
    }

    fn table(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Locale::Es => es::TABLE,
            Locale::En => en::TABLE,
        }
    }
}

/// Resolves translation keys in the active locale.
#[derive(Debug, Clone, Default)]
pub struct Localizer {
    locale: Locale,
}

impl Localizer {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub(crate) fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    /// Translation for `key`, or the key itself when the table has no entry.
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        self.locale
            .table()
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .unwrap_or(key)
    }

    /// Translation with every `{name}` placeholder replaced.
    pub fn t_args(&self, key: &str, params: &[(&str, &str)]) -> String {
        params
            .iter()
            .fold(self.t(key).to_string(), |text, (name, value)| {
                text.replace(&format!("{{{}}}", name), value)
            })
    }
}

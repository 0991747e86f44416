//! Host locale monetary separators
//!
//! Only consulted when a request asks for host-locale formatting. The
//! environment variables follow POSIX precedence: `LC_ALL`, then
//! `LC_MONETARY`, then `LANG`.

use tracing::trace;

/// Monetary separators of a locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonetarySeparators {
    pub decimal: String,
    pub thousands: String,
}

impl MonetarySeparators {
    pub fn new(decimal: impl Into<String>, thousands: impl Into<String>) -> Self {
        Self {
            decimal: decimal.into(),
            thousands: thousands.into(),
        }
    }
}

impl Default for MonetarySeparators {
    fn default() -> Self {
        Self::new(".", ",")
    }
}

/// Source of the current process locale's monetary separators
pub trait HostLocale: Send + Sync {
    fn monetary_separators(&self) -> MonetarySeparators;
}

/// Reads the locale name from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvLocale;

impl EnvLocale {
    fn locale_name() -> Option<String> {
        ["LC_ALL", "LC_MONETARY", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.trim().is_empty())
    }
}

impl HostLocale for EnvLocale {
    fn monetary_separators(&self) -> MonetarySeparators {
        let name = Self::locale_name().unwrap_or_default();
        let separators = separators_for_locale(&name);
        trace!(locale = %name, ?separators, "host locale separators");
        separators
    }
}

/// Fixed separators, for embedding hosts and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLocale(pub MonetarySeparators);

impl HostLocale for FixedLocale {
    fn monetary_separators(&self) -> MonetarySeparators {
        self.0.clone()
    }
}

/// Map a POSIX or BCP 47 locale name (e.g., "de_DE.UTF-8", "pt-BR") to
/// its monetary separators. Unknown, `C` and `POSIX` locales use `.`/`,`.
pub fn separators_for_locale(name: &str) -> MonetarySeparators {
    // Strip codeset and modifier: "de_CH.UTF-8@euro" -> "de_CH"
    let base = name.split(['.', '@']).next().unwrap_or("");
    let mut parts = base.split(['_', '-']);
    let lang = parts.next().unwrap_or("").to_ascii_lowercase();
    let region = parts.next().unwrap_or("").to_ascii_uppercase();

    match (lang.as_str(), region.as_str()) {
        ("de" | "it" | "fr", "CH") => MonetarySeparators::new(".", "'"),
        ("de" | "es" | "id" | "it" | "nl" | "pt" | "tr" | "da" | "el" | "ro" | "hr" | "sl", _) => {
            MonetarySeparators::new(",", ".")
        }
        ("fr" | "ru" | "pl" | "sv" | "cs" | "sk" | "fi" | "nb" | "nn" | "uk" | "hu" | "bg", _) => {
            MonetarySeparators::new(",", " ")
        }
        _ => MonetarySeparators::default(),
    }
}

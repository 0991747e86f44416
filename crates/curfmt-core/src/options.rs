//! Formatting options and per-call requests

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::{FormatError, Result};
use crate::types::NumberingSystem;

/// Option keys accepted by [`FormatOptions::from_pairs`]
pub const OPTION_KEYS: &[&str] = &[
    "placeCurrencySymbolAtEnd",
    "decimalPlaces",
    "numberFormatSystem",
    "smartNumberFormatting",
];

/// Presentation options layered over the resolved currency metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FormatOptions {
    #[serde(default)]
    pub place_currency_symbol_at_end: bool,
    /// Overrides the currency's own decimal places
    #[serde(default)]
    pub decimal_places: Option<u32>,
    #[serde(default)]
    pub number_format_system: NumberingSystem,
    #[serde(default)]
    pub smart_number_formatting: bool,
}

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn symbol_at_end(mut self, at_end: bool) -> Self {
        self.place_currency_symbol_at_end = at_end;
        self
    }

    pub fn decimal_places(mut self, places: u32) -> Self {
        self.decimal_places = Some(places);
        self
    }

    pub fn numbering(mut self, system: NumberingSystem) -> Self {
        self.number_format_system = system;
        self
    }

    pub fn smart(mut self, smart: bool) -> Self {
        self.smart_number_formatting = smart;
        self
    }

    /// Build options from untyped key/value pairs.
    ///
    /// Every unrecognized key is reported in a single error.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, JsonValue)>,
    {
        let mut options = Self::default();
        let mut unknown = Vec::new();

        for (key, value) in pairs {
            match key {
                "placeCurrencySymbolAtEnd" => {
                    options.place_currency_symbol_at_end = expect_bool(key, &value)?;
                }
                "smartNumberFormatting" => {
                    options.smart_number_formatting = expect_bool(key, &value)?;
                }
                "decimalPlaces" => {
                    options.decimal_places = match value {
                        JsonValue::Null => None,
                        ref v => Some(
                            v.as_u64()
                                .and_then(|n| u32::try_from(n).ok())
                                .ok_or_else(|| {
                                    FormatError::invalid(format!(
                                        "decimalPlaces must be a non-negative integer, got {v}"
                                    ))
                                })?,
                        ),
                    };
                }
                "numberFormatSystem" => {
                    let name = value.as_str().ok_or_else(|| {
                        FormatError::invalid(format!("numberFormatSystem must be a string, got {value}"))
                    })?;
                    options.number_format_system = name.parse()?;
                }
                other => unknown.push(other.to_string()),
            }
        }

        if !unknown.is_empty() {
            return Err(FormatError::invalid(format!(
                "unexpected option(s): {} (accepted: {})",
                unknown.join(", "),
                OPTION_KEYS.join(", ")
            )));
        }
        Ok(options)
    }

    /// Build options from a JSON object
    pub fn from_json(object: &Map<String, JsonValue>) -> Result<Self> {
        Self::from_pairs(object.iter().map(|(k, v)| (k.as_str(), v.clone())))
    }
}

fn expect_bool(key: &str, value: &JsonValue) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| FormatError::invalid(format!("{key} must be a boolean, got {value}")))
}

/// A single formatting call: the amount plus everything that shapes it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatRequest {
    pub country_code: Option<String>,
    pub currency_code: Option<String>,
    /// Explicit symbol; together with the separators below, any one of
    /// these disables metadata lookup for all three.
    pub currency_symbol: Option<String>,
    pub decimal_separator: Option<String>,
    pub thousands_separator: Option<String>,
    #[serde(default)]
    pub use_host_locale: bool,
    #[serde(default)]
    pub options: FormatOptions,
}

impl FormatRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn country(mut self, code: impl Into<String>) -> Self {
        self.country_code = Some(code.into());
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency_code = Some(code.into());
        self
    }

    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = Some(symbol.into());
        self
    }

    pub fn decimal_separator(mut self, sep: impl Into<String>) -> Self {
        self.decimal_separator = Some(sep.into());
        self
    }

    pub fn thousands_separator(mut self, sep: impl Into<String>) -> Self {
        self.thousands_separator = Some(sep.into());
        self
    }

    pub fn host_locale(mut self, use_host_locale: bool) -> Self {
        self.use_host_locale = use_host_locale;
        self
    }

    pub fn options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    /// True when any explicit symbol or separator was given
    pub(crate) fn has_explicit_overrides(&self) -> bool {
        [
            &self.currency_symbol,
            &self.decimal_separator,
            &self.thousands_separator,
        ]
        .iter()
        .any(|v| v.as_deref().is_some_and(|s| !s.is_empty()))
    }
}

/// Fully resolved configuration, ready for the formatting pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFormat {
    pub symbol: String,
    pub decimal_separator: String,
    pub thousands_separator: String,
    pub decimal_places: u32,
    /// Never `Auto` once resolved
    pub numbering: NumberingSystem,
    pub symbol_at_end: bool,
    pub smart: bool,
}

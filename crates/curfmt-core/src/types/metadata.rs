//! Per-country currency metadata

use serde::{Deserialize, Serialize};

pub const DEFAULT_DECIMAL_SEPARATOR: &str = ".";
pub const DEFAULT_THOUSANDS_SEPARATOR: &str = ",";
pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

/// Currency metadata for one country, as stored in the country table.
///
/// Instances are immutable once built; two lookups for the same code
/// compare equal even when they are not the same allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyMetadata {
    /// Country display name (e.g., "United States")
    pub display_name: String,
    /// ISO 3166 alpha-2 code (e.g., "US")
    pub iso_alpha2: String,
    /// ISO 3166 alpha-3 code (e.g., "USA")
    pub iso_alpha3: String,
    /// ISO 4217 code (e.g., "USD")
    pub currency_code: String,
    /// Short currency name (e.g., "Dollar")
    pub currency_name: String,
    /// Display symbol; `None` for currencies without one (e.g., Bahraini Dinar)
    pub currency_symbol: Option<String>,
    pub decimal_separator: String,
    pub thousands_separator: String,
    pub decimal_places: u32,
}

impl CurrencyMetadata {
    /// Label to print next to an amount: the symbol when there is one,
    /// otherwise the currency code.
    pub fn display_symbol(&self) -> &str {
        match self.currency_symbol.as_deref() {
            Some(symbol) if !symbol.is_empty() => symbol,
            _ => &self.currency_code,
        }
    }
}

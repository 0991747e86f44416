//! Currency formatting engine
//!
//! Pipeline: resolve configuration, render the canonical grouped form,
//! regroup for the numbering system, optionally abbreviate, substitute
//! separators, then place the symbol.

mod abbreviate;
mod grouping;
mod render;

pub use abbreviate::{abbreviate, Abbreviation};
pub use grouping::{group_integer, regroup, substitute_separators};
pub use render::{render_canonical, render_canonical_decimal};

use std::sync::{Arc, OnceLock};

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::error::Result;
use crate::locale::{EnvLocale, HostLocale};
use crate::metadata::MetadataStore;
use crate::options::{FormatOptions, FormatRequest, ResolvedFormat};
use crate::types::metadata::{
    DEFAULT_DECIMAL_PLACES, DEFAULT_DECIMAL_SEPARATOR, DEFAULT_THOUSANDS_SEPARATOR,
};
use crate::types::NumberingSystem;

/// Join symbol and number with a space; an empty symbol leaves the number alone
pub fn place_symbol(symbol: &str, number: &str, at_end: bool) -> String {
    let joined = if at_end {
        format!("{number} {symbol}")
    } else {
        format!("{symbol} {number}")
    };
    joined.trim().to_string()
}

/// Trimmed code, `None` when blank
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Separators are taken verbatim; whitespace is a valid separator
fn given(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Formats amounts against a metadata store and a host locale
pub struct CurrencyFormatter {
    store: Arc<MetadataStore>,
    locale: Box<dyn HostLocale>,
}

impl CurrencyFormatter {
    /// Formatter over the shared embedded table and the process locale
    pub fn new() -> Self {
        Self::with_store(MetadataStore::shared())
    }

    pub fn with_store(store: Arc<MetadataStore>) -> Self {
        Self {
            store,
            locale: Box::new(EnvLocale),
        }
    }

    /// Replace the host locale consulted for `use_host_locale` requests
    pub fn with_locale(mut self, locale: impl HostLocale + 'static) -> Self {
        self.locale = Box::new(locale);
        self
    }

    pub fn store(&self) -> &MetadataStore {
        &self.store
    }

    /// Resolve a request into concrete separators, symbol and grouping
    pub fn resolve(&self, request: &FormatRequest) -> Result<ResolvedFormat> {
        let options = &request.options;

        // Currency overrides country when both are given, even when the
        // currency code is unknown.
        let mut metadata = None;
        if let Some(code) = non_empty(&request.country_code) {
            metadata = self.store.lookup_by_country(code)?;
        }
        if let Some(code) = non_empty(&request.currency_code) {
            metadata = self.store.lookup_by_currency(code)?;
        }

        let mut resolved = ResolvedFormat {
            symbol: String::new(),
            decimal_separator: DEFAULT_DECIMAL_SEPARATOR.to_string(),
            thousands_separator: DEFAULT_THOUSANDS_SEPARATOR.to_string(),
            decimal_places: DEFAULT_DECIMAL_PLACES,
            numbering: options.number_format_system,
            symbol_at_end: options.place_currency_symbol_at_end,
            smart: options.smart_number_formatting,
        };

        if request.has_explicit_overrides() {
            if let Some(symbol) = &request.currency_symbol {
                resolved.symbol = symbol.clone();
            }
            if let Some(sep) = given(&request.decimal_separator) {
                resolved.decimal_separator = sep.to_string();
            }
            if let Some(sep) = given(&request.thousands_separator) {
                resolved.thousands_separator = sep.to_string();
            }
        } else if let Some(metadata) = &metadata {
            resolved.symbol = metadata.display_symbol().to_string();
            resolved.decimal_separator = metadata.decimal_separator.clone();
            resolved.thousands_separator = metadata.thousands_separator.clone();
            resolved.decimal_places = metadata.decimal_places;
        } else {
            debug!(
                country = ?request.country_code,
                currency = ?request.currency_code,
                "no currency metadata, using defaults"
            );
        }

        if let Some(places) = options.decimal_places {
            resolved.decimal_places = places;
        }

        if request.use_host_locale {
            let host = self.locale.monetary_separators();
            resolved.decimal_separator = host.decimal;
            resolved.thousands_separator = host.thousands;
        }

        if resolved.numbering == NumberingSystem::Auto {
            resolved.numbering = if request.use_host_locale {
                NumberingSystem::International
            } else {
                let region = metadata.as_ref().map_or("", |m| m.iso_alpha2.as_str());
                NumberingSystem::for_region(region)
            };
        }

        trace!(?resolved, "resolved format");
        Ok(resolved)
    }

    /// Format a binary float amount
    pub fn format(&self, value: f64, request: &FormatRequest) -> Result<String> {
        let resolved = self.resolve(request)?;
        let canonical = render_canonical(value, resolved.decimal_places)?;
        Ok(finish(&canonical, &resolved))
    }

    /// Format a decimal amount; rounding is half to even
    pub fn format_decimal(&self, value: Decimal, request: &FormatRequest) -> Result<String> {
        let resolved = self.resolve(request)?;
        let canonical = render_canonical_decimal(value, resolved.decimal_places);
        Ok(finish(&canonical, &resolved))
    }
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the string stages on a canonical number
fn finish(canonical: &str, resolved: &ResolvedFormat) -> String {
    let grouped = regroup(canonical, resolved.numbering);
    trace!(canonical, %grouped, numbering = %resolved.numbering, "regrouped");

    let number = if resolved.smart {
        abbreviate(&grouped, resolved.decimal_places, resolved.numbering)
            .map_or(grouped, |a| a.to_string())
    } else {
        grouped
    };

    let number = substitute_separators(
        &number,
        &resolved.decimal_separator,
        &resolved.thousands_separator,
    );
    place_symbol(&resolved.symbol, &number, resolved.symbol_at_end)
}

/// Format an amount with the shared metadata store and the process locale.
///
/// Any of `currency_symbol`, `decimal_separator` or `thousands_separator`
/// disables metadata lookup for all three; `options.decimal_places` can
/// still be overridden on its own.
///
/// ```
/// use curfmt_core::{format_currency, FormatOptions};
///
/// let out = format_currency(1234567.89, Some("US"), None, None, None, None, false, FormatOptions::new());
/// assert_eq!(out.unwrap(), "$ 1,234,567.89");
/// ```
#[allow(clippy::too_many_arguments)]
pub fn format_currency(
    value: f64,
    country_code: Option<&str>,
    currency_code: Option<&str>,
    currency_symbol: Option<&str>,
    decimal_separator: Option<&str>,
    thousands_separator: Option<&str>,
    use_host_locale: bool,
    options: FormatOptions,
) -> Result<String> {
    static FORMATTER: OnceLock<CurrencyFormatter> = OnceLock::new();
    let formatter = FORMATTER.get_or_init(CurrencyFormatter::new);

    let request = FormatRequest {
        country_code: country_code.map(str::to_string),
        currency_code: currency_code.map(str::to_string),
        currency_symbol: currency_symbol.map(str::to_string),
        decimal_separator: decimal_separator.map(str::to_string),
        thousands_separator: thousands_separator.map(str::to_string),
        use_host_locale,
        options,
    };
    formatter.format(value, &request)
}

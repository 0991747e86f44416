//! Country and currency metadata store
//!
//! The country table ships inside the crate (`data/countries.json`) and is
//! parsed on first use. Resolved entries are memoised per code for the
//! lifetime of the store, so the parse and the linear scan are paid once.
//! The table is a curated subset of ISO 3166, not the full list.

use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use serde::Deserialize;
use tracing::debug;

use crate::error::{FormatError, Result};
use crate::types::metadata::{
    DEFAULT_DECIMAL_PLACES, DEFAULT_DECIMAL_SEPARATOR, DEFAULT_THOUSANDS_SEPARATOR,
};
use crate::types::CurrencyMetadata;

static EMBEDDED_COUNTRIES: &str = include_str!("../../data/countries.json");

/// Country table record format
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CountryRecord {
    #[serde(default)]
    name: String,
    #[serde(default)]
    iso_alpha2: String,
    #[serde(default)]
    iso_alpha3: String,
    #[serde(default)]
    currency: Option<CurrencyRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrencyRecord {
    #[serde(default)]
    code: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default = "default_decimal")]
    decimal: String,
    #[serde(default = "default_thousands")]
    thousands: String,
    #[serde(default = "default_decimal_places")]
    decimal_places: u32,
}

fn default_decimal() -> String {
    DEFAULT_DECIMAL_SEPARATOR.to_string()
}

fn default_thousands() -> String {
    DEFAULT_THOUSANDS_SEPARATOR.to_string()
}

fn default_decimal_places() -> u32 {
    DEFAULT_DECIMAL_PLACES
}

impl CountryRecord {
    fn to_metadata(&self) -> CurrencyMetadata {
        let currency = self.currency.as_ref();
        CurrencyMetadata {
            display_name: self.name.clone(),
            iso_alpha2: self.iso_alpha2.clone(),
            iso_alpha3: self.iso_alpha3.clone(),
            currency_code: currency.map(|c| c.code.clone()).unwrap_or_default(),
            currency_name: currency.map(|c| c.name.clone()).unwrap_or_default(),
            currency_symbol: currency.and_then(|c| c.symbol.clone()),
            decimal_separator: currency.map_or_else(default_decimal, |c| c.decimal.clone()),
            thousands_separator: currency.map_or_else(default_thousands, |c| c.thousands.clone()),
            decimal_places: currency.map_or(DEFAULT_DECIMAL_PLACES, |c| c.decimal_places),
        }
    }

    fn currency_code(&self) -> Option<&str> {
        self.currency.as_ref().map(|c| c.code.as_str())
    }
}

type MetadataCache = RwLock<HashMap<String, Arc<CurrencyMetadata>>>;

/// Lookup of currency metadata by country code or currency code.
///
/// Lookups are case-insensitive. A missing code yields `Ok(None)`; an
/// error only means the table itself could not be parsed.
pub struct MetadataStore {
    source: Cow<'static, str>,
    records: OnceLock<Result<Vec<CountryRecord>>>,
    by_country: MetadataCache,
    by_currency: MetadataCache,
}

impl MetadataStore {
    /// Store backed by the embedded country table
    pub fn new() -> Self {
        Self::with_source(Cow::Borrowed(EMBEDDED_COUNTRIES))
    }

    /// Store backed by a caller-supplied table in the same JSON format
    pub fn from_json(json: impl Into<String>) -> Self {
        Self::with_source(Cow::Owned(json.into()))
    }

    fn with_source(source: Cow<'static, str>) -> Self {
        Self {
            source,
            records: OnceLock::new(),
            by_country: RwLock::new(HashMap::new()),
            by_currency: RwLock::new(HashMap::new()),
        }
    }

    /// Process-wide store over the embedded table
    pub fn shared() -> Arc<MetadataStore> {
        static SHARED: OnceLock<Arc<MetadataStore>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(MetadataStore::new())).clone()
    }

    fn records(&self) -> Result<&[CountryRecord]> {
        self.records
            .get_or_init(|| {
                let parsed: Vec<CountryRecord> = serde_json::from_str(&self.source)
                    .map_err(|e| FormatError::Metadata(format!("bad country table: {e}")))?;
                debug!(countries = parsed.len(), "loaded country table");
                Ok(parsed)
            })
            .as_deref()
            .map_err(Clone::clone)
    }

    /// Find metadata by ISO alpha-2 country code (e.g., "US", "us")
    pub fn lookup_by_country(&self, code: &str) -> Result<Option<Arc<CurrencyMetadata>>> {
        self.lookup(&self.by_country, code, |record, key| record.iso_alpha2 == key)
    }

    /// Find metadata by ISO 4217 currency code (e.g., "USD").
    /// Returns the first country in table order using that currency.
    pub fn lookup_by_currency(&self, code: &str) -> Result<Option<Arc<CurrencyMetadata>>> {
        self.lookup(&self.by_currency, code, |record, key| {
            record.currency_code() == Some(key)
        })
    }

    fn lookup(
        &self,
        cache: &MetadataCache,
        code: &str,
        matches: impl Fn(&CountryRecord, &str) -> bool,
    ) -> Result<Option<Arc<CurrencyMetadata>>> {
        let key = code.trim().to_uppercase();
        if key.is_empty() {
            return Ok(None);
        }

        if let Some(hit) = cache.read().unwrap_or_else(PoisonError::into_inner).get(&key) {
            return Ok(Some(hit.clone()));
        }

        let Some(record) = self.records()?.iter().find(|&r| matches(r, key.as_str())) else {
            debug!(code = %key, "no metadata for code");
            return Ok(None);
        };

        // Racing first lookups may both get here; either entry is equal.
        let metadata = Arc::new(record.to_metadata());
        cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, metadata.clone());
        Ok(Some(metadata))
    }

    /// All countries in table order
    pub fn countries(&self) -> Result<Vec<CurrencyMetadata>> {
        Ok(self.records()?.iter().map(CountryRecord::to_metadata).collect())
    }

    /// Sorted, de-duplicated currency codes present in the table
    pub fn currency_codes(&self) -> Result<Vec<String>> {
        let codes: BTreeSet<&str> = self
            .records()?
            .iter()
            .filter_map(CountryRecord::currency_code)
            .filter(|c| !c.is_empty())
            .collect();
        Ok(codes.into_iter().map(str::to_string).collect())
    }
}

impl Default for MetadataStore {
    fn default() -> Self {
        Self::new()
    }
}

//! curfmt-core: locale-aware currency formatting
//!
//! Formats amounts with per-country symbols and separators, regroups
//! digits for international, Indian or Chinese numbering, and can
//! abbreviate large magnitudes ("1.23 Million", "1.23 Crore", "12.35 亿").
//! It has no UI dependencies and performs no I/O after the embedded
//! country table is parsed.
//!
//! The embedded table covers about 120 countries, a subset of ISO 3166.
//! Codes outside it format with the default separators and no symbol; a
//! fuller table can be loaded with [`MetadataStore::from_json`].
//!
//! # Example
//!
//! ```
//! use curfmt_core::{CurrencyFormatter, FormatOptions, FormatRequest, NumberingSystem};
//!
//! let formatter = CurrencyFormatter::new();
//!
//! // Country defaults
//! let out = formatter.format(1234567.89, &FormatRequest::new().country("ID"));
//! assert_eq!(out.unwrap(), "Rp 1.234.567,89");
//!
//! // Indian grouping picked from the currency
//! let out = formatter.format(1234567.891, &FormatRequest::new().currency("INR"));
//! assert_eq!(out.unwrap(), "₹ 12,34,567.89");
//!
//! // Magnitude abbreviation
//! let request = FormatRequest::new().currency("USD").options(
//!     FormatOptions::new()
//!         .numbering(NumberingSystem::International)
//!         .smart(true),
//! );
//! assert_eq!(formatter.format(1234567.89, &request).unwrap(), "$ 1.23 Million");
//! ```

pub mod engine;
pub mod error;
pub mod locale;
pub mod metadata;
pub mod options;
pub mod types;

pub use engine::{format_currency, CurrencyFormatter};
pub use error::{FormatError, Result};
pub use locale::{EnvLocale, FixedLocale, HostLocale, MonetarySeparators};
pub use metadata::MetadataStore;
pub use options::{FormatOptions, FormatRequest, ResolvedFormat, OPTION_KEYS};
pub use types::{CurrencyMetadata, NumberingSystem};

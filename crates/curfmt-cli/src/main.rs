//! curfmt - currency formatting from the command line
//!
//! Usage:
//!   curfmt 1234567.89 --country US          # Single amount
//!   curfmt 12345678.9 -C INR --smart        # Abbreviated: ₹ 1.23 Crore
//!   echo "1234.5" | curfmt --country ID     # Pipe mode, one amount per line
//!   curfmt --lookup BH                      # Metadata for a country or currency
//!   curfmt --server                         # JSON-RPC over stdin/stdout

mod server;

use std::io::{self, BufRead, IsTerminal};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::Parser;
use curfmt_core::{CurrencyFormatter, FormatOptions, FormatRequest, NumberingSystem};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "curfmt")]
#[command(about = "Format amounts as locale-aware currency strings", long_about = None)]
struct Args {
    /// Amount to format
    #[arg(allow_negative_numbers = true)]
    value: Option<String>,

    /// ISO alpha-2 country code (e.g. US, IN)
    #[arg(short, long, env = "CURFMT_COUNTRY")]
    country: Option<String>,

    /// ISO 4217 currency code (e.g. USD, INR); wins over --country
    #[arg(short = 'C', long, env = "CURFMT_CURRENCY")]
    currency: Option<String>,

    /// Explicit currency symbol (disables metadata separators)
    #[arg(long)]
    symbol: Option<String>,

    /// Explicit decimal separator (disables metadata symbol)
    #[arg(long)]
    decimal_separator: Option<String>,

    /// Explicit thousands separator (disables metadata symbol)
    #[arg(long)]
    thousands_separator: Option<String>,

    /// Number of decimal places (defaults to the currency's)
    #[arg(short, long)]
    decimal_places: Option<u32>,

    /// Numbering system: auto, global, international, indian, chinese, none
    #[arg(short, long, default_value = "auto", env = "CURFMT_SYSTEM")]
    system: NumberingSystem,

    /// Abbreviate large amounts (1.23 Million, 1.23 Crore, 12.35 亿)
    #[arg(long)]
    smart: bool,

    /// Place the symbol after the amount
    #[arg(long)]
    symbol_at_end: bool,

    /// Use the host locale's monetary separators
    #[arg(long)]
    host_locale: bool,

    /// Print metadata for a country or currency code as JSON
    #[arg(long, value_name = "CODE")]
    lookup: Option<String>,

    /// List all known currency codes
    #[arg(long)]
    list: bool,

    /// JSON-RPC server mode (stdin/stdout)
    #[arg(long)]
    server: bool,
}

impl Args {
    fn request(&self) -> FormatRequest {
        let mut options = FormatOptions::new()
            .numbering(self.system)
            .smart(self.smart)
            .symbol_at_end(self.symbol_at_end);
        options.decimal_places = self.decimal_places;

        FormatRequest {
            country_code: self.country.clone(),
            currency_code: self.currency.clone(),
            currency_symbol: self.symbol.clone(),
            decimal_separator: self.decimal_separator.clone(),
            thousands_separator: self.thousands_separator.clone(),
            use_host_locale: self.host_locale,
            options,
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("CURFMT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let formatter = CurrencyFormatter::new();

    if args.server {
        server::run_server(&formatter)?;
    } else if let Some(code) = &args.lookup {
        print_lookup(&formatter, code)?;
    } else if args.list {
        for code in formatter.store().currency_codes()? {
            println!("{code}");
        }
    } else if let Some(value) = &args.value {
        println!("{}", format_input(&formatter, &args.request(), value)?);
    } else if !io::stdin().is_terminal() {
        // Pipe mode (stdin is not a tty)
        let request = args.request();
        for line in io::stdin().lock().lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                println!();
                continue;
            }
            format_and_print(&formatter, &request, line);
        }
    } else {
        // No input, show help
        eprintln!("Usage: curfmt <AMOUNT> [--country CC | --currency CCC] [--smart]");
        eprintln!("       curfmt --lookup <CODE>");
        eprintln!("       curfmt --server");
        eprintln!("       echo \"1234.5\" | curfmt --country US");
        std::process::exit(1);
    }

    Ok(())
}

/// Format user text: exact decimals when they fit, binary floats otherwise
fn format_input(formatter: &CurrencyFormatter, request: &FormatRequest, text: &str) -> Result<String> {
    let text = text.trim();
    let formatted = if let Ok(value) = Decimal::from_str(text) {
        formatter.format_decimal(value, request)?
    } else if let Ok(value) = text.parse::<f64>() {
        formatter.format(value, request)?
    } else {
        bail!("not a number: {text:?}");
    };
    Ok(formatted)
}

/// Pipe mode: a bad line is reported and leaves an empty output line
fn format_and_print(formatter: &CurrencyFormatter, request: &FormatRequest, line: &str) {
    match format_input(formatter, request, line) {
        Ok(formatted) => println!("{formatted}"),
        Err(e) => {
            eprintln!("Error: {e:#}");
            println!();
        }
    }
}

/// Two-letter codes are tried as countries first, everything else as currencies
fn print_lookup(formatter: &CurrencyFormatter, code: &str) -> Result<()> {
    let store = formatter.store();
    let by_country = if code.trim().len() == 2 {
        store.lookup_by_country(code)?
    } else {
        None
    };
    let found = match by_country {
        Some(metadata) => Some(metadata),
        None => store.lookup_by_currency(code)?,
    };

    let metadata = found.with_context(|| format!("no currency metadata for {code:?}"))?;
    println!("{}", serde_json::to_string_pretty(&*metadata)?);
    Ok(())
}

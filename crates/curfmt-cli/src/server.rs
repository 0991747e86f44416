//! JSON-RPC 2.0 server mode for curfmt
//!
//! Lets external tools use curfmt as a formatting backend.
//! Reads one JSON-RPC request per stdin line, writes one response per line.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use curfmt_core::{CurrencyFormatter, CurrencyMetadata, FormatError, FormatOptions, FormatRequest, ResolvedFormat};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// JSON-RPC 2.0 request
#[derive(Deserialize)]
struct Request {
    jsonrpc: String,
    method: String,
    #[serde(default)]
    params: Option<serde_json::Value>,
    id: serde_json::Value,
}

/// JSON-RPC 2.0 response
#[derive(Serialize)]
struct Response {
    jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<RpcError>,
    id: serde_json::Value,
}

/// JSON-RPC error object
#[derive(Serialize)]
struct RpcError {
    code: i32,
    message: String,
}

/// Amount as a JSON number (binary float) or a string (exact decimal)
#[derive(Deserialize)]
#[serde(untagged)]
enum Amount {
    Number(f64),
    Text(String),
}

/// Params for format method
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormatParams {
    value: Amount,
    #[serde(default)]
    country_code: Option<String>,
    #[serde(default)]
    currency_code: Option<String>,
    #[serde(default)]
    currency_symbol: Option<String>,
    #[serde(default)]
    decimal_separator: Option<String>,
    #[serde(default)]
    thousands_separator: Option<String>,
    #[serde(default)]
    use_host_locale: bool,
    /// Validated separately so every unknown key is reported
    #[serde(default)]
    options: serde_json::Map<String, serde_json::Value>,
}

/// Params for lookup method
#[derive(Deserialize)]
struct LookupParams {
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    currency: Option<String>,
}

/// Structured format result
#[derive(Serialize)]
struct FormatResult {
    display: String,
    resolved: ResolvedFormat,
}

// JSON-RPC error codes
const PARSE_ERROR: i32 = -32700;
const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;

impl Response {
    fn success(id: serde_json::Value, result: impl Serialize) -> Self {
        match serde_json::to_value(result) {
            Ok(result) => Self {
                jsonrpc: "2.0",
                result: Some(result),
                error: None,
                id,
            },
            Err(e) => Self::error(id, INTERNAL_ERROR, format!("Serialization error: {e}")),
        }
    }

    fn error(id: serde_json::Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
            id,
        }
    }

    fn from_format_error(id: serde_json::Value, err: FormatError) -> Self {
        let code = match err {
            FormatError::InvalidArgument(_) => INVALID_PARAMS,
            FormatError::Metadata(_) => INTERNAL_ERROR,
        };
        Self::error(id, code, err.to_string())
    }
}

fn parse_params<T: for<'de> Deserialize<'de>>(
    id: &serde_json::Value,
    params: Option<serde_json::Value>,
) -> Result<T, Response> {
    let params = params.ok_or_else(|| Response::error(id.clone(), INVALID_PARAMS, "Missing params"))?;
    serde_json::from_value(params)
        .map_err(|e| Response::error(id.clone(), INVALID_PARAMS, format!("Invalid params: {e}")))
}

/// Handle a single JSON-RPC request
fn handle_request(formatter: &CurrencyFormatter, input: &str) -> Response {
    // Parse request
    let request: Request = match serde_json::from_str(input) {
        Ok(r) => r,
        Err(e) => {
            return Response::error(
                serde_json::Value::Null,
                PARSE_ERROR,
                format!("Parse error: {e}"),
            );
        }
    };

    // Validate jsonrpc version
    if request.jsonrpc != "2.0" {
        return Response::error(request.id, INVALID_REQUEST, "Invalid JSON-RPC version");
    }

    debug!(method = %request.method, "rpc request");

    // Dispatch method
    match request.method.as_str() {
        "format" => handle_format(formatter, request.id, request.params),
        "lookup" => handle_lookup(formatter, request.id, request.params),
        "list_currencies" => handle_list_currencies(formatter, request.id),
        _ => Response::error(
            request.id,
            METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        ),
    }
}

/// Handle format method - format one amount
fn handle_format(
    formatter: &CurrencyFormatter,
    id: serde_json::Value,
    params: Option<serde_json::Value>,
) -> Response {
    let params: FormatParams = match parse_params(&id, params) {
        Ok(p) => p,
        Err(response) => return response,
    };

    let options = match FormatOptions::from_json(&params.options) {
        Ok(options) => options,
        Err(e) => return Response::from_format_error(id, e),
    };

    let request = FormatRequest {
        country_code: params.country_code,
        currency_code: params.currency_code,
        currency_symbol: params.currency_symbol,
        decimal_separator: params.decimal_separator,
        thousands_separator: params.thousands_separator,
        use_host_locale: params.use_host_locale,
        options,
    };

    let display = match params.value {
        Amount::Number(value) => formatter.format(value, &request),
        Amount::Text(text) => match Decimal::from_str(text.trim()) {
            Ok(value) => formatter.format_decimal(value, &request),
            Err(e) => Err(FormatError::InvalidArgument(format!("value {text:?} is not a number: {e}"))),
        },
    };

    let result = display.and_then(|display| {
        let resolved = formatter.resolve(&request)?;
        Ok(FormatResult { display, resolved })
    });

    match result {
        Ok(result) => Response::success(id, result),
        Err(e) => Response::from_format_error(id, e),
    }
}

/// Handle lookup method - currency metadata by country or currency code
fn handle_lookup(
    formatter: &CurrencyFormatter,
    id: serde_json::Value,
    params: Option<serde_json::Value>,
) -> Response {
    let params: LookupParams = match parse_params(&id, params) {
        Ok(p) => p,
        Err(response) => return response,
    };

    let store = formatter.store();
    let found = match (params.country.as_deref(), params.currency.as_deref()) {
        (Some(country), None) => store.lookup_by_country(country),
        (None, Some(currency)) => store.lookup_by_currency(currency),
        _ => {
            return Response::error(id, INVALID_PARAMS, "Expected exactly one of country, currency")
        }
    };

    match found {
        Ok(metadata) => {
            let metadata: Option<CurrencyMetadata> = metadata.map(|m| (*m).clone());
            Response::success(id, metadata)
        }
        Err(e) => Response::from_format_error(id, e),
    }
}

/// Handle list_currencies method - every currency code in the table
fn handle_list_currencies(formatter: &CurrencyFormatter, id: serde_json::Value) -> Response {
    match formatter.store().currency_codes() {
        Ok(codes) => Response::success(id, codes),
        Err(e) => Response::from_format_error(id, e),
    }
}

/// Run the JSON-RPC server loop
pub fn run_server(formatter: &CurrencyFormatter) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_request(formatter, &line);
        if let Some(error) = &response.error {
            warn!(code = error.code, message = %error.message, "rpc error");
        }
        let json = serde_json::to_string(&response)?;
        writeln!(stdout, "{json}")?;
        stdout.flush()?;
    }

    Ok(())
}

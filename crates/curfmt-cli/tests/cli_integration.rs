//! Integration tests for the curfmt binary
//!
//! Single-amount mode, pipe mode, lookups, and a JSON-RPC session that
//! keeps one server process alive across many requests.

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Output, Stdio};

/// Run curfmt with arguments and a clean environment
fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_curfmt"))
        .args(args)
        .env_remove("CURFMT_COUNTRY")
        .env_remove("CURFMT_CURRENCY")
        .env_remove("CURFMT_SYSTEM")
        .stdin(Stdio::null())
        .output()
        .expect("failed to run curfmt")
}

fn stdout_of(args: &[&str]) -> String {
    let output = run(args);
    assert!(output.status.success(), "curfmt {args:?} failed: {output:?}");
    String::from_utf8(output.stdout).unwrap().trim_end().to_string()
}

/// Helper to send a JSON-RPC request and get response
fn send_request(stdin: &mut impl Write, stdout: &mut impl BufRead, request: Value) -> Value {
    writeln!(stdin, "{}", request).unwrap();
    stdin.flush().unwrap();

    let mut response = String::new();
    stdout.read_line(&mut response).unwrap();
    serde_json::from_str(&response).unwrap()
}

fn format_request(params: Value, id: u32) -> Value {
    json!({
        "jsonrpc": "2.0",
        "method": "format",
        "params": params,
        "id": id
    })
}

/// Spawn server process
fn spawn_server() -> std::process::Child {
    Command::new(env!("CARGO_BIN_EXE_curfmt"))
        .arg("--server")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to spawn server")
}

#[test]
fn test_single_amount() {
    assert_eq!(stdout_of(&["1234567.89", "--country", "US"]), "$ 1,234,567.89");
    assert_eq!(stdout_of(&["1234567.89", "--country", "ID"]), "Rp 1.234.567,89");
    assert_eq!(stdout_of(&["1234567.891", "--country", "IN"]), "₹ 12,34,567.89");
    assert_eq!(stdout_of(&["1234567.891", "--country", "CN"]), "¥ 123,4567.89");
    assert_eq!(stdout_of(&["1234567.89", "--country", "XX"]), "1,234,567.89");
}

#[test]
fn test_negative_amount_argument() {
    assert_eq!(stdout_of(&["-1234567.89", "--country", "ID"]), "Rp -1.234.567,89");
}

#[test]
fn test_smart_flags() {
    assert_eq!(
        stdout_of(&["1234567.89", "-C", "USD", "--system", "global", "--smart"]),
        "$ 1.23 Million"
    );
    assert_eq!(
        stdout_of(&["12345678.9", "-C", "INR", "--system", "indian", "--smart"]),
        "₹ 1.23 Crore"
    );
    assert_eq!(
        stdout_of(&["1234567890.12", "-C", "CNY", "--smart", "--symbol-at-end"]),
        "12.35 亿 ¥"
    );
}

#[test]
fn test_invalid_system_is_rejected() {
    let output = run(&["1234567.89", "-C", "USD", "--system", "invalid"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("chinese"), "{stderr}");
}

#[test]
fn test_unknown_flag_is_rejected() {
    let output = run(&["1234567.89", "-C", "USD", "--unexpected-option"]);
    assert!(!output.status.success());
}

#[test]
fn test_lookup() {
    let metadata: Value = serde_json::from_str(&stdout_of(&["--lookup", "bh"])).unwrap();
    assert_eq!(metadata["displayName"], "Bahrain");
    assert_eq!(metadata["currencyCode"], "BHD");
    assert!(metadata["currencySymbol"].is_null());
    assert_eq!(metadata["decimalPlaces"], 3);

    let metadata: Value = serde_json::from_str(&stdout_of(&["--lookup", "USD"])).unwrap();
    assert_eq!(metadata["isoAlpha2"], "US");

    assert!(!run(&["--lookup", "XX"]).status.success());
}

#[test]
fn test_list_currencies() {
    let listing = stdout_of(&["--list"]);
    let codes: Vec<&str> = listing.lines().collect();
    assert!(codes.contains(&"USD"));
    assert!(codes.contains(&"INR"));
    assert!(codes.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_pipe_mode() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_curfmt"))
        .args(["--currency", "INR"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to spawn curfmt");

    let mut stdin = child.stdin.take().unwrap();
    writeln!(stdin, "1234567.891\n100\n-5000").unwrap();
    drop(stdin);

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["₹ 12,34,567.89", "₹ 100.00", "₹ -5,000.00"]);
}

#[test]
fn test_pipe_mode_skips_bad_lines() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_curfmt"))
        .args(["--currency", "USD"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn curfmt");

    let mut stdin = child.stdin.take().unwrap();
    writeln!(stdin, "12\nabc\n5").unwrap();
    drop(stdin);

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["$ 12.00", "", "$ 5.00"]);
    assert!(String::from_utf8_lossy(&output.stderr).contains("abc"));
}

/// Test: one server session formatting a batch of amounts
#[test]
fn test_server_session() {
    let mut child = spawn_server();
    let mut stdin = child.stdin.take().unwrap();
    let mut stdout = BufReader::new(child.stdout.take().unwrap());

    let cases = [
        (json!({"value": 1234567.89, "countryCode": "US"}), "$ 1,234,567.89"),
        (json!({"value": 1234567.89, "currencyCode": "IDR"}), "Rp 1.234.567,89"),
        (
            json!({"value": 999.89, "currencyCode": "CNY",
                   "options": {"numberFormatSystem": "chinese", "smartNumberFormatting": true}}),
            "¥ 999.89",
        ),
        (
            json!({"value": "1234567.885", "currencyCode": "USD",
                   "options": {"placeCurrencySymbolAtEnd": true}}),
            "1,234,567.88 $",
        ),
        (
            json!({"value": 1234567.89, "currencySymbol": "EUR",
                   "decimalSeparator": ",", "thousandsSeparator": "."}),
            "EUR 1.234.567,89",
        ),
    ];

    for (i, (params, expected)) in cases.into_iter().enumerate() {
        let response = send_request(&mut stdin, &mut stdout, format_request(params, i as u32));
        assert_eq!(response["id"], i as u32);
        assert_eq!(response["result"]["display"], expected);
    }

    // Errors keep the session alive
    let response = send_request(
        &mut stdin,
        &mut stdout,
        format_request(
            json!({"value": 1, "currencyCode": "USD", "options": {"numberFormatSystem": "invalid"}}),
            100,
        ),
    );
    assert_eq!(response["error"]["code"], -32602);

    writeln!(stdin, "not json").unwrap();
    stdin.flush().unwrap();
    let mut line = String::new();
    stdout.read_line(&mut line).unwrap();
    let response: Value = serde_json::from_str(&line).unwrap();
    assert_eq!(response["error"]["code"], -32700);

    let response = send_request(
        &mut stdin,
        &mut stdout,
        json!({"jsonrpc": "2.0", "method": "lookup", "params": {"currency": "inr"}, "id": 101}),
    );
    assert_eq!(response["result"]["isoAlpha2"], "IN");

    drop(stdin);
    child.wait().unwrap();
}

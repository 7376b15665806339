//! Upstream Data Fetchers
//!
//! One client per provider: chain RPC with explorer fallback, portfolio
//! analytics, and market data. Each issues plain HTTP requests with a
//! fixed per-call timeout and parses responses defensively.

pub mod balance;
pub mod market;
pub mod portfolio;

use std::time::Duration;

use crate::error::Result;

/// Build the shared HTTP client with the configured per-call timeout
pub(crate) fn http_client(timeout_secs: u64) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?)
}

/// Coerce a JSON value that may be a number or a numeric string into a
/// Decimal. Returns None on anything else; callers default the field.
pub(crate) fn coerce_decimal(value: &serde_json::Value) -> Option<rust_decimal::Decimal> {
    match value {
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(rust_decimal::Decimal::from(i))
            } else {
                n.as_f64().and_then(rust_decimal::Decimal::from_f64_retain)
            }
        }
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

//! Balance Fetcher
//!
//! Queries an ordered list of JSON-RPC endpoints for the native balance
//! and token accounts of an address, falling back to an explorer API when
//! every endpoint fails. The first endpoint where both calls succeed wins;
//! later endpoints are never contacted.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Value, json};

use crate::config::AdvisorConfig;
use crate::error::{AdvisorError, Result};
use crate::model::DataSource;

/// SPL token program id, used as the token-account filter
pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

/// Lamports per SOL
const LAMPORTS_PER_SOL: Decimal = dec!(1_000_000_000);

/// One raw token account as reported by the RPC, before valuation
#[derive(Clone, Debug)]
pub struct RawTokenAccount {
    pub mint: String,
    /// Amount in human units (`uiAmount`)
    pub ui_amount: Decimal,
    pub decimals: u32,
}

/// Result of a successful balance fetch
#[derive(Clone, Debug)]
pub struct BalanceSummary {
    pub native_balance: Decimal,
    pub token_accounts: Vec<RawTokenAccount>,
    pub source: DataSource,
}

/// Fetches native balance and token accounts with endpoint fallback
pub struct BalanceFetcher {
    client: reqwest::Client,
    rpc_urls: Vec<String>,
    explorer_url: String,
}

impl BalanceFetcher {
    pub fn new(client: reqwest::Client, config: &AdvisorConfig) -> Self {
        Self {
            client,
            rpc_urls: config.rpc_urls.clone(),
            explorer_url: config.explorer_url.clone(),
        }
    }

    /// Fetch the balance summary for an address.
    ///
    /// Tries each RPC endpoint in order; an endpoint counts as failed when
    /// either call times out, errors at the transport level, or carries an
    /// `error` field in its JSON-RPC body. Failures are logged and the loop
    /// continues. When every endpoint fails the explorer fallback is tried
    /// once; if that fails too, the whole fetch is exhausted.
    pub async fn fetch(&self, address: &str) -> Result<BalanceSummary> {
        for url in &self.rpc_urls {
            match self.try_rpc(url, address).await {
                Ok(summary) => {
                    tracing::debug!(endpoint = %url, "balance fetched");
                    return Ok(summary);
                }
                Err(e) => {
                    tracing::warn!(endpoint = %url, error = %e, "RPC endpoint failed");
                }
            }
        }

        match self.try_explorer(address).await {
            Ok(summary) => Ok(summary),
            Err(e) => {
                tracing::warn!(error = %e, "explorer fallback failed");
                Err(AdvisorError::AllSourcesExhausted)
            }
        }
    }

    /// Issue both dependent queries against one endpoint
    async fn try_rpc(&self, url: &str, address: &str) -> Result<BalanceSummary> {
        let balance = self
            .rpc_call(url, 1, "getBalance", json!([address]))
            .await?;
        let lamports = balance
            .get("value")
            .and_then(Value::as_u64)
            .unwrap_or_default();

        let accounts = self
            .rpc_call(
                url,
                2,
                "getTokenAccountsByOwner",
                json!([
                    address,
                    { "programId": TOKEN_PROGRAM_ID },
                    { "encoding": "jsonParsed" },
                ]),
            )
            .await?;

        Ok(BalanceSummary {
            native_balance: lamports_to_sol(lamports),
            token_accounts: parse_token_accounts(&accounts),
            source: DataSource::Rpc(url.to_string()),
        })
    }

    async fn rpc_call(&self, url: &str, id: u32, method: &str, params: Value) -> Result<Value> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let response: Value = self.client.post(url).json(&body).send().await?.json().await?;
        extract_rpc_result(response, method)
    }

    /// Explorer fallback: native balance only, no token accounts
    async fn try_explorer(&self, address: &str) -> Result<BalanceSummary> {
        let url = format!("{}/account", self.explorer_url);
        let response = self
            .client
            .get(&url)
            .query(&[("address", address)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AdvisorError::SourceUnavailable(format!(
                "explorer returned {}",
                response.status()
            )));
        }

        let body: Value = response.json().await?;
        let lamports = body
            .pointer("/data/lamports")
            .and_then(Value::as_u64)
            .unwrap_or_default();

        Ok(BalanceSummary {
            native_balance: lamports_to_sol(lamports),
            token_accounts: Vec::new(),
            source: DataSource::Explorer,
        })
    }
}

/// Pull the `result` out of a JSON-RPC response, treating an `error`
/// field as endpoint failure.
fn extract_rpc_result(mut response: Value, method: &str) -> Result<Value> {
    if let Some(error) = response.get("error") {
        return Err(AdvisorError::SourceUnavailable(format!(
            "{method}: {error}"
        )));
    }

    Ok(response
        .get_mut("result")
        .map(Value::take)
        .unwrap_or(Value::Null))
}

fn lamports_to_sol(lamports: u64) -> Decimal {
    Decimal::from(lamports) / LAMPORTS_PER_SOL
}

/// Walk the `getTokenAccountsByOwner` result defensively. Accounts with a
/// malformed or missing amount coerce to zero and are filtered out later
/// during reconciliation.
fn parse_token_accounts(result: &Value) -> Vec<RawTokenAccount> {
    let Some(entries) = result.get("value").and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let info = entry.pointer("/account/data/parsed/info")?;
            let mint = info.get("mint").and_then(Value::as_str)?.to_string();
            let amount = info.get("tokenAmount");

            let ui_amount = amount
                .and_then(|a| a.get("uiAmount"))
                .and_then(super::coerce_decimal)
                .unwrap_or_else(|| {
                    tracing::debug!(%mint, "token amount missing or malformed, defaulting to 0");
                    Decimal::ZERO
                });
            let decimals = amount
                .and_then(|a| a.get("decimals"))
                .and_then(Value::as_u64)
                .unwrap_or_default() as u32;

            Some(RawTokenAccount {
                mint,
                ui_amount,
                decimals,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lamports_conversion() {
        assert_eq!(lamports_to_sol(1_000_000_000), dec!(1));
        assert_eq!(lamports_to_sol(2_500_000_000), dec!(2.5));
        assert_eq!(lamports_to_sol(0), Decimal::ZERO);
    }

    #[test]
    fn test_rpc_error_field_is_failure() {
        let body = json!({"jsonrpc": "2.0", "id": 1, "error": {"code": -32602, "message": "Invalid param"}});
        let result = extract_rpc_result(body, "getBalance");
        assert!(matches!(result, Err(AdvisorError::SourceUnavailable(_))));
    }

    #[test]
    fn test_rpc_result_extraction() {
        let body = json!({"jsonrpc": "2.0", "id": 1, "result": {"value": 42}});
        let result = extract_rpc_result(body, "getBalance").unwrap();
        assert_eq!(result.pointer("/value").and_then(Value::as_u64), Some(42));
    }

    #[test]
    fn test_parse_token_accounts() {
        let result = json!({
            "value": [
                {
                    "account": { "data": { "parsed": { "info": {
                        "mint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                        "tokenAmount": { "uiAmount": 12.5, "decimals": 6 }
                    }}}}
                },
                {
                    // Null amount coerces to zero instead of failing the parse
                    "account": { "data": { "parsed": { "info": {
                        "mint": "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263",
                        "tokenAmount": { "uiAmount": null, "decimals": 5 }
                    }}}}
                },
                { "account": { "data": "base64-not-parsed" } }
            ]
        });

        let accounts = parse_token_accounts(&result);
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].ui_amount, dec!(12.5));
        assert_eq!(accounts[0].decimals, 6);
        assert_eq!(accounts[1].ui_amount, Decimal::ZERO);
    }

    #[test]
    fn test_parse_token_accounts_malformed_result() {
        assert!(parse_token_accounts(&json!(null)).is_empty());
        assert!(parse_token_accounts(&json!({"value": "oops"})).is_empty());
    }

    #[tokio::test]
    async fn test_all_sources_exhausted() {
        // Port 1 refuses connections, so every endpoint and the explorer fail
        let config = AdvisorConfig {
            rpc_urls: vec!["http://127.0.0.1:1".into()],
            explorer_url: "http://127.0.0.1:1".into(),
            timeout_secs: 2,
            ..AdvisorConfig::default()
        };
        let client = crate::fetch::http_client(config.timeout_secs).unwrap();
        let fetcher = BalanceFetcher::new(client, &config);

        let result = fetcher
            .fetch("7pQHLgaTrP25TjmSaoGvTJJKeS2ZyGT2xAAvYLHsSXtk")
            .await;
        assert!(matches!(result, Err(AdvisorError::AllSourcesExhausted)));
    }
}

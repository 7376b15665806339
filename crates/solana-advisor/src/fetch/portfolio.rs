//! Portfolio Valuation Fetcher
//!
//! Queries a Zerion-shaped analytics provider for USD-denominated totals
//! and per-position values. Both calls are independent and optional: a
//! missing API key or any upstream failure yields "unavailable" (None),
//! never a silent zero, so callers can distinguish unknown from broke.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::config::AdvisorConfig;
use crate::knowledge;
use crate::model::TokenHolding;

use super::coerce_decimal;

/// Aggregate portfolio figures from the analytics provider
#[derive(Clone, Debug)]
pub struct PortfolioOverview {
    pub total_value_usd: Decimal,
    pub daily_change_usd: Option<Decimal>,
    pub daily_change_percent: Option<Decimal>,
    /// USD value per position type ("wallet", "staked", "deposited", ...)
    pub distribution_by_type: Vec<(String, Decimal)>,
    /// USD value per chain
    pub distribution_by_chain: Vec<(String, Decimal)>,
}

/// Client for the portfolio analytics provider
pub struct PortfolioClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl PortfolioClient {
    pub fn new(client: reqwest::Client, config: &AdvisorConfig) -> Self {
        Self {
            client,
            base_url: config.portfolio_api_url.clone(),
            api_key: config.portfolio_api_key.clone(),
        }
    }

    /// Whether the analytics provider is configured at all
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch aggregate USD totals and distributions. None means the
    /// source is unavailable, which is distinct from a zero-value wallet.
    pub async fn overview(&self, address: &str) -> Option<PortfolioOverview> {
        let key = self.api_key.as_deref()?;
        let url = format!("{}/v1/wallets/{}/portfolio", self.base_url, address);

        let body = match self.get_json(&url, key, &[("currency", "usd")]).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "portfolio overview unavailable");
                return None;
            }
        };

        parse_overview(&body)
    }

    /// Fetch per-position values, ordered by descending USD value as
    /// requested from the provider. The order is preserved, not re-sorted.
    pub async fn positions(&self, address: &str) -> Option<Vec<TokenHolding>> {
        let key = self.api_key.as_deref()?;
        let url = format!("{}/v1/wallets/{}/positions/", self.base_url, address);
        let query = [
            ("filter[positions]", "only_simple"),
            ("currency", "usd"),
            ("sort", "value"),
        ];

        match self.get_json(&url, key, &query).await {
            Ok(body) => Some(parse_positions(&body)),
            Err(e) => {
                tracing::warn!(error = %e, "position data unavailable");
                None
            }
        }
    }

    async fn get_json(
        &self,
        url: &str,
        key: &str,
        query: &[(&str, &str)],
    ) -> crate::error::Result<Value> {
        let response = self
            .client
            .get(url)
            .basic_auth(key, None::<&str>)
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(crate::error::AdvisorError::SourceUnavailable(format!(
                "analytics provider returned {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}

/// Parse the aggregate endpoint. A response without a total value counts
/// as unavailable; every other field defaults independently.
fn parse_overview(body: &Value) -> Option<PortfolioOverview> {
    let attributes = body.pointer("/data/attributes")?;

    let total_value_usd = attributes
        .pointer("/total/positions")
        .and_then(coerce_decimal)?;

    Some(PortfolioOverview {
        total_value_usd,
        daily_change_usd: attributes
            .pointer("/changes/absolute_1d")
            .and_then(coerce_decimal),
        daily_change_percent: attributes
            .pointer("/changes/percent_1d")
            .and_then(coerce_decimal),
        distribution_by_type: parse_distribution(
            attributes.get("positions_distribution_by_type"),
        ),
        distribution_by_chain: parse_distribution(
            attributes.get("positions_distribution_by_chain"),
        ),
    })
}

fn parse_distribution(value: Option<&Value>) -> Vec<(String, Decimal)> {
    let Some(map) = value.and_then(Value::as_object) else {
        return Vec::new();
    };

    map.iter()
        .filter_map(|(name, v)| coerce_decimal(v).map(|amount| (name.clone(), amount)))
        .collect()
}

/// Parse the positions endpoint into token holdings.
///
/// Every nested field is treated as independently possibly-missing or
/// wrongly-typed and coerced with a default; this function never errors.
/// Entries with a non-positive quantity are discarded.
fn parse_positions(body: &Value) -> Vec<TokenHolding> {
    let Some(entries) = body.get("data").and_then(Value::as_array) else {
        return Vec::new();
    };

    entries.iter().filter_map(parse_position).collect()
}

fn parse_position(entry: &Value) -> Option<TokenHolding> {
    let attributes = entry.get("attributes")?;

    let quantity = attributes
        .pointer("/quantity/float")
        .or_else(|| attributes.pointer("/quantity/numeric"))
        .or_else(|| attributes.get("quantity"))
        .and_then(coerce_decimal)
        .unwrap_or(Decimal::ZERO);

    if quantity <= Decimal::ZERO {
        return None;
    }

    let fungible = attributes.get("fungible_info");

    // Identity: the Solana implementation address when present, else the
    // provider's position id so malformed entries are kept, not dropped.
    let mint = fungible
        .and_then(|f| f.get("implementations"))
        .and_then(Value::as_array)
        .and_then(|impls| {
            impls
                .iter()
                .find(|i| i.get("chain_id").and_then(Value::as_str) == Some("solana"))
                .or_else(|| impls.first())
        })
        .and_then(|i| i.get("address"))
        .and_then(Value::as_str)
        .or_else(|| entry.get("id").and_then(Value::as_str))?
        .to_string();

    let symbol = fungible
        .and_then(|f| f.get("symbol"))
        .and_then(Value::as_str)
        .map_or_else(|| knowledge::resolve_symbol(&mint), ToString::to_string);

    let name = fungible
        .and_then(|f| f.get("name"))
        .and_then(Value::as_str)
        .map_or_else(|| symbol.clone(), ToString::to_string);

    Some(TokenHolding {
        mint,
        symbol,
        name,
        quantity,
        value_usd: attributes.get("value").and_then(coerce_decimal),
        price_usd: attributes.get("price").and_then(coerce_decimal),
        change_1d_percent: attributes
            .pointer("/changes/percent_1d")
            .and_then(coerce_decimal),
        verified: fungible
            .and_then(|f| f.pointer("/flags/verified"))
            .and_then(Value::as_bool)
            .unwrap_or(false),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_parse_overview() {
        let body = json!({
            "data": { "attributes": {
                "total": { "positions": 1523.75 },
                "changes": { "absolute_1d": "-12.4", "percent_1d": -0.81 },
                "positions_distribution_by_type": { "wallet": 1200.0, "staked": 323.75 },
                "positions_distribution_by_chain": { "solana": 1523.75 }
            }}
        });

        let overview = parse_overview(&body).unwrap();
        assert_eq!(overview.total_value_usd, dec!(1523.75));
        // String-typed change coerces
        assert_eq!(overview.daily_change_usd, Some(dec!(-12.4)));
        assert_eq!(overview.distribution_by_type.len(), 2);
        assert_eq!(
            overview.distribution_by_chain,
            vec![("solana".to_string(), dec!(1523.75))]
        );
    }

    #[test]
    fn test_overview_without_total_is_unavailable() {
        let body = json!({"data": {"attributes": {"changes": {}}}});
        assert!(parse_overview(&body).is_none());
    }

    #[test]
    fn test_parse_positions_coercion_and_filtering() {
        let body = json!({
            "data": [
                {
                    "id": "pos-1",
                    "attributes": {
                        "quantity": { "float": "2.5" },
                        "value": 487.5,
                        "price": "195",
                        "changes": { "percent_1d": 4.2 },
                        "fungible_info": {
                            "name": "Solana",
                            "symbol": "SOL",
                            "flags": { "verified": true },
                            "implementations": [
                                { "chain_id": "solana",
                                  "address": "So11111111111111111111111111111111111111112" }
                            ]
                        }
                    }
                },
                {
                    "id": "pos-2",
                    "attributes": {
                        "quantity": { "float": 0.0 },
                        "value": 0.0
                    }
                },
                {
                    "id": "pos-3",
                    "attributes": {
                        "quantity": { "float": 10 },
                        "value": "garbage",
                        "price": null
                    }
                }
            ]
        });

        let holdings = parse_positions(&body);
        assert_eq!(holdings.len(), 2);

        // Provider order preserved
        assert_eq!(holdings[0].symbol, "SOL");
        assert_eq!(holdings[0].quantity, dec!(2.5));
        assert_eq!(holdings[0].price_usd, Some(dec!(195)));
        assert!(holdings[0].verified);

        // Junk fields default rather than erroring
        assert_eq!(holdings[1].mint, "pos-3");
        assert_eq!(holdings[1].value_usd, None);
        assert_eq!(holdings[1].price_usd, None);
        assert!(!holdings[1].verified);
    }

    #[test]
    fn test_parse_positions_malformed_body() {
        assert!(parse_positions(&json!({"data": "nope"})).is_empty());
        assert!(parse_positions(&json!(null)).is_empty());
    }
}

//! Market Context Fetcher
//!
//! Spot price and 7-day trend for the native token. This fetcher never
//! fails outwardly: any upstream problem yields the fixed fallback
//! context instead of an error.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::config::AdvisorConfig;
use crate::error::{AdvisorError, Result};
use crate::model::MarketContext;

use super::coerce_decimal;

/// Length of the trend window in days
const TREND_WINDOW_DAYS: u32 = 7;

/// Client for the market data provider
pub struct MarketClient {
    client: reqwest::Client,
    base_url: String,
}

impl MarketClient {
    pub fn new(client: reqwest::Client, config: &AdvisorConfig) -> Self {
        Self {
            client,
            base_url: config.market_api_url.clone(),
        }
    }

    /// Fetch the current market context, degrading to the fixed fallback
    /// on any failure.
    pub async fn context(&self) -> MarketContext {
        match self.fetch_context().await {
            Ok(context) => context,
            Err(e) => {
                tracing::warn!(error = %e, "market data unavailable, using fallback");
                MarketContext::fallback()
            }
        }
    }

    async fn fetch_context(&self) -> Result<MarketContext> {
        let price = self.spot_price().await?;
        let series = self.price_series().await?;
        let change = seven_day_change(&series);
        Ok(MarketContext::from_fetched(price, change))
    }

    async fn spot_price(&self) -> Result<Decimal> {
        let url = format!("{}/simple/price", self.base_url);
        let body: Value = self
            .client
            .get(&url)
            .query(&[("ids", "solana"), ("vs_currencies", "usd")])
            .send()
            .await?
            .json()
            .await?;

        body.pointer("/solana/usd")
            .and_then(coerce_decimal)
            .ok_or_else(|| AdvisorError::SourceUnavailable("spot price missing".into()))
    }

    async fn price_series(&self) -> Result<Vec<Decimal>> {
        let url = format!("{}/coins/solana/market_chart", self.base_url);
        let days = TREND_WINDOW_DAYS.to_string();
        let body: Value = self
            .client
            .get(&url)
            .query(&[("vs_currency", "usd"), ("days", days.as_str())])
            .send()
            .await?
            .json()
            .await?;

        // Samples arrive as [timestamp, price] pairs; malformed entries
        // are skipped rather than failing the series.
        let samples = body
            .get("prices")
            .and_then(Value::as_array)
            .map(|rows| {
                rows.iter()
                    .filter_map(|row| row.get(1).and_then(coerce_decimal))
                    .collect()
            })
            .unwrap_or_default();

        Ok(samples)
    }
}

/// Percent change across the endpoints of the series:
/// `(last - first) / first * 100`. A series with fewer than two samples
/// (or a zero first sample) has no measurable change.
fn seven_day_change(series: &[Decimal]) -> Decimal {
    match (series.first(), series.last()) {
        (Some(&first), Some(&last)) if series.len() >= 2 && first != Decimal::ZERO => {
            (last - first) / first * Decimal::ONE_HUNDRED
        }
        _ => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MarketTrend;
    use rust_decimal_macros::dec;

    #[test]
    fn test_seven_day_change() {
        assert_eq!(seven_day_change(&[dec!(100), dec!(110)]), dec!(10));
        assert_eq!(
            seven_day_change(&[dec!(200), dec!(150), dec!(100)]),
            dec!(-50)
        );
    }

    #[test]
    fn test_short_series_has_no_change() {
        assert_eq!(seven_day_change(&[]), Decimal::ZERO);
        assert_eq!(seven_day_change(&[dec!(100)]), Decimal::ZERO);
        assert_eq!(seven_day_change(&[Decimal::ZERO, dec!(5)]), Decimal::ZERO);
    }

    #[test]
    fn test_flat_series_classifies_bearish() {
        // Zero change from a successful fetch is Bearish by the
        // documented asymmetric rule; Neutral only comes from fallback.
        let change = seven_day_change(&[dec!(100), dec!(100)]);
        assert_eq!(change, Decimal::ZERO);
        assert_eq!(
            MarketContext::from_fetched(dec!(100), change).trend,
            MarketTrend::Bearish
        );
    }
}

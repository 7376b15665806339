//! Advisory Sources
//!
//! Strategy seam for bucket-keyed investment advice. The built-in
//! `KnowledgeAdvisor` reads the static knowledge tables; an AI-backed
//! source can implement the same trait and plug into the engine.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::knowledge::{self, PortfolioSize, RiskTolerance};
use crate::model::{MarketContext, WalletSnapshot};

/// One piece of advice, before being wrapped as a recommendation
#[derive(Clone, Debug)]
pub struct Advisory {
    pub action: String,
    pub description: String,
    pub reasoning: String,
}

/// Source of bucket-keyed advisories
#[async_trait]
pub trait AdvisorySource: Send + Sync {
    /// Produce advisories for a snapshot. `resolved_value_usd` is the
    /// portfolio value already resolved by the engine, reused here so the
    /// bucket decisions stay consistent.
    async fn advisories(
        &self,
        snapshot: &WalletSnapshot,
        market: &MarketContext,
        resolved_value_usd: Decimal,
    ) -> Vec<Advisory>;

    /// Source name, for logging
    fn name(&self) -> &str;
}

/// Default advisory source backed by the static knowledge tables
#[derive(Clone, Copy, Debug, Default)]
pub struct KnowledgeAdvisor;

#[async_trait]
impl AdvisorySource for KnowledgeAdvisor {
    async fn advisories(
        &self,
        _snapshot: &WalletSnapshot,
        market: &MarketContext,
        resolved_value_usd: Decimal,
    ) -> Vec<Advisory> {
        let size = PortfolioSize::from_value_usd(resolved_value_usd);
        let tolerance = RiskTolerance::from_portfolio_value(resolved_value_usd);

        vec![
            Advisory {
                action: "Optimize staking strategy".into(),
                description: knowledge::size_strategy(size).into(),
                reasoning: format!("Matched to a {size} portfolio"),
            },
            Advisory {
                action: "Review allocation targets".into(),
                description: knowledge::allocation_strategy(tolerance).into(),
                reasoning: format!("Suited to a {tolerance} risk tolerance"),
            },
            Advisory {
                action: "Align with market trend".into(),
                description: knowledge::trend_strategy(market.trend).into(),
                reasoning: format!(
                    "7-day SOL trend is {} ({:+.2}%)",
                    market.trend, market.price_change_7d_percent
                ),
            },
        ]
    }

    fn name(&self) -> &str {
        "knowledge_table"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::balance::BalanceSummary;
    use crate::model::DataSource;
    use rust_decimal_macros::dec;

    fn snapshot() -> WalletSnapshot {
        WalletSnapshot::reconcile(
            "addr",
            BalanceSummary {
                native_balance: dec!(2),
                token_accounts: Vec::new(),
                source: DataSource::Explorer,
            },
            None,
            None,
        )
    }

    #[tokio::test]
    async fn test_knowledge_advisor_buckets() {
        let advisor = KnowledgeAdvisor;
        let market = MarketContext::fallback();

        let advisories = advisor.advisories(&snapshot(), &market, dec!(200)).await;
        assert_eq!(advisories.len(), 3);
        assert!(advisories[0].description.contains("Under $1000"));
        assert!(advisories[1].description.contains("70% SOL staking"));
        // Neutral trend maps to the sideways strategy
        assert!(advisories[2].description.contains("DCA strategies"));
    }
}

//! Recommendation Engine
//!
//! Consumes the reconciled snapshot, the market context and the advisory
//! source, and produces the ordered recommendation list. Emission order is
//! insertion order: staking, then advisories, then diversification —
//! recommendations are never re-sorted by priority.

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::advisory::{AdvisorySource, KnowledgeAdvisor};
use crate::error::AdvisorError;
use crate::knowledge;
use crate::model::{
    MarketContext, Priority, Recommendation, RecommendationKind, WalletSnapshot,
};

/// Balances at or below this are not worth staking
pub const MIN_STAKEABLE_BALANCE: Decimal = dec!(0.1);

/// Fewer distinct tokens than this triggers the diversification advice
pub const MIN_DIVERSIFIED_TOKENS: usize = 3;

/// Advisory sub-list cap, applied before concatenation
const MAX_ADVISORIES: usize = 5;

/// Produces ordered, length-bounded recommendation lists
pub struct RecommendationEngine {
    advisor: Arc<dyn AdvisorySource>,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(Arc::new(KnowledgeAdvisor))
    }
}

impl RecommendationEngine {
    pub fn new(advisor: Arc<dyn AdvisorySource>) -> Self {
        Self { advisor }
    }

    /// Generate recommendations for a snapshot.
    ///
    /// The portfolio value is resolved once up front and reused for every
    /// bucket decision downstream.
    pub async fn recommend(
        &self,
        snapshot: &WalletSnapshot,
        market: &MarketContext,
    ) -> Vec<Recommendation> {
        let resolved_value = snapshot.resolved_value_usd(market.native_price_usd);
        let mut recommendations = Vec::new();

        if let Some(staking) = staking_recommendation(snapshot.native_balance) {
            recommendations.push(staking);
        }

        let mut advisories = self
            .advisor
            .advisories(snapshot, market, resolved_value)
            .await;
        if advisories.len() > MAX_ADVISORIES {
            tracing::debug!(
                source = self.advisor.name(),
                dropped = advisories.len() - MAX_ADVISORIES,
                "advisory list capped"
            );
            advisories.truncate(MAX_ADVISORIES);
        }
        recommendations.extend(advisories.into_iter().map(|a| {
            Recommendation::new(
                RecommendationKind::Advisory,
                Priority::Medium,
                a.action,
                a.description,
                a.reasoning,
            )
        }));

        if let Some(diversify) = diversification_recommendation(snapshot) {
            recommendations.push(diversify);
        }

        recommendations
    }

    /// The single recommendation emitted when the balance fetch fails and
    /// the pipeline short-circuits.
    pub fn failure(error: &AdvisorError) -> Recommendation {
        Recommendation::new(
            RecommendationKind::Error,
            Priority::High,
            "Analysis failed",
            error.user_message(),
            "Wallet data could not be fetched from any source",
        )
    }
}

/// Staking advice for balances above the minimum.
///
/// The stake fraction is tiered by balance: under 1 SOL stake half
/// (medium priority), under 5 SOL stake 70%, larger wallets 60% (both
/// high priority). Yield estimate uses the best static validator APY.
fn staking_recommendation(native_balance: Decimal) -> Option<Recommendation> {
    if native_balance <= MIN_STAKEABLE_BALANCE {
        return None;
    }

    let (fraction, priority) = if native_balance < dec!(1) {
        (dec!(0.5), Priority::Medium)
    } else if native_balance < dec!(5) {
        (dec!(0.7), Priority::High)
    } else {
        (dec!(0.6), Priority::High)
    };

    let stake_amount = native_balance * fraction;
    let best = knowledge::best_validator();
    let estimated_return = stake_amount * best.apy / Decimal::ONE_HUNDRED;

    Some(
        Recommendation::new(
            RecommendationKind::Staking,
            priority,
            format!("Stake {stake_amount:.2} SOL"),
            format!("Stake with {} for {:.2}% APY", best.name, best.apy),
            "High APY staking opportunity with reputable validator",
        )
        .with_estimated_return(format!("{estimated_return:.4} SOL")),
    )
}

fn diversification_recommendation(snapshot: &WalletSnapshot) -> Option<Recommendation> {
    let count = snapshot.distinct_token_count();
    if count >= MIN_DIVERSIFIED_TOKENS {
        return None;
    }

    Some(Recommendation::new(
        RecommendationKind::Diversification,
        Priority::Medium,
        "Diversify portfolio",
        "Consider adding more tokens to diversify risk",
        format!("Current portfolio has only {count} tokens. Diversification reduces risk."),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::balance::{BalanceSummary, RawTokenAccount};
    use crate::model::DataSource;

    fn snapshot_with(native: Decimal, token_count: usize) -> WalletSnapshot {
        let accounts = (0..token_count)
            .map(|i| RawTokenAccount {
                mint: format!("Mint{i:0>40}"),
                ui_amount: dec!(1),
                decimals: 6,
            })
            .collect();
        WalletSnapshot::reconcile(
            "7pQHLgaTrP25TjmSaoGvTJJKeS2ZyGT2xAAvYLHsSXtk",
            BalanceSummary {
                native_balance: native,
                token_accounts: accounts,
                source: DataSource::Rpc("https://rpc.example".into()),
            },
            None,
            None,
        )
    }

    #[test]
    fn test_staking_threshold() {
        assert!(staking_recommendation(dec!(0.05)).is_none());
        assert!(staking_recommendation(dec!(0.1)).is_none());
        assert!(staking_recommendation(dec!(0.11)).is_some());
    }

    #[test]
    fn test_staking_tiers() {
        // (0.1, 1): stake half, medium priority
        let small = staking_recommendation(dec!(0.5)).unwrap();
        assert_eq!(small.priority, Priority::Medium);
        assert_eq!(small.action, "Stake 0.25 SOL");

        // [1, 5): stake 70%, high priority
        let mid = staking_recommendation(dec!(2)).unwrap();
        assert_eq!(mid.priority, Priority::High);
        assert_eq!(mid.action, "Stake 1.40 SOL");

        // [5, inf): stake 60%
        let large = staking_recommendation(dec!(10)).unwrap();
        assert_eq!(large.priority, Priority::High);
        assert_eq!(large.action, "Stake 6.00 SOL");
    }

    #[test]
    fn test_staking_uses_best_validator() {
        let rec = staking_recommendation(dec!(2)).unwrap();
        assert!(rec.description.contains("Solana Foundation"));
        assert!(rec.description.contains("7.20% APY"));
        // 1.4 SOL at 7.2% APY
        assert_eq!(rec.estimated_annual_return.as_deref(), Some("0.1008 SOL"));
    }

    #[tokio::test]
    async fn test_emission_order_and_diversification() {
        let engine = RecommendationEngine::default();
        let market = MarketContext::fallback();

        let recs = engine.recommend(&snapshot_with(dec!(2), 1), &market).await;

        // staking, three advisories, diversification - in that order
        assert_eq!(recs.len(), 5);
        assert_eq!(recs[0].kind, RecommendationKind::Staking);
        assert!(recs[1..4]
            .iter()
            .all(|r| r.kind == RecommendationKind::Advisory && r.priority == Priority::Medium));
        assert_eq!(recs[4].kind, RecommendationKind::Diversification);
    }

    #[tokio::test]
    async fn test_no_diversification_when_spread() {
        let engine = RecommendationEngine::default();
        let market = MarketContext::fallback();

        let recs = engine.recommend(&snapshot_with(dec!(2), 3), &market).await;
        assert!(recs
            .iter()
            .all(|r| r.kind != RecommendationKind::Diversification));
    }

    #[tokio::test]
    async fn test_dust_wallet_gets_no_staking() {
        let engine = RecommendationEngine::default();
        let market = MarketContext::fallback();

        let recs = engine.recommend(&snapshot_with(dec!(0.05), 0), &market).await;
        assert!(recs.iter().all(|r| r.kind != RecommendationKind::Staking));
        // diversification still fires regardless of value
        assert!(recs
            .iter()
            .any(|r| r.kind == RecommendationKind::Diversification));
    }

    #[test]
    fn test_failure_recommendation() {
        let rec = RecommendationEngine::failure(&AdvisorError::AllSourcesExhausted);
        assert_eq!(rec.kind, RecommendationKind::Error);
        assert!(rec.description.contains("All RPC endpoints"));
    }
}

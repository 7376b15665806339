//! Wallet Analyzer
//!
//! Orchestrates one analysis request: validate the address, fetch the
//! balance (fatal on failure), gather valuation and market context
//! concurrently, reconcile the snapshot and run the recommendation engine.

use crate::address;
use crate::config::AdvisorConfig;
use crate::engine::RecommendationEngine;
use crate::error::{AdvisorError, Result};
use crate::fetch::{self, balance::BalanceFetcher, market::MarketClient, portfolio::PortfolioClient};
use crate::model::{MarketContext, Recommendation, WalletSnapshot};

/// Outcome of one analysis request
#[derive(Debug)]
pub enum WalletAnalysis {
    /// The pipeline ran to completion; valuation fields may still be
    /// unavailable inside the snapshot.
    Complete {
        snapshot: WalletSnapshot,
        market: MarketContext,
        recommendations: Vec<Recommendation>,
    },

    /// The balance fetch (or validation) failed; nothing else was invoked.
    Failed {
        address: String,
        message: String,
        recommendations: Vec<Recommendation>,
    },
}

impl WalletAnalysis {
    fn failed(address: &str, error: &AdvisorError) -> Self {
        Self::Failed {
            address: address.to_string(),
            message: error.user_message(),
            recommendations: vec![RecommendationEngine::failure(error)],
        }
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        match self {
            Self::Complete { recommendations, .. } | Self::Failed { recommendations, .. } => {
                recommendations
            }
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Drives the full analysis pipeline for one address at a time
pub struct WalletAnalyzer {
    balance: BalanceFetcher,
    portfolio: PortfolioClient,
    market: MarketClient,
    engine: RecommendationEngine,
}

impl WalletAnalyzer {
    pub fn new(config: &AdvisorConfig) -> Result<Self> {
        let client = fetch::http_client(config.timeout_secs)?;

        Ok(Self {
            balance: BalanceFetcher::new(client.clone(), config),
            portfolio: PortfolioClient::new(client.clone(), config),
            market: MarketClient::new(client, config),
            engine: RecommendationEngine::default(),
        })
    }

    /// Replace the recommendation engine (e.g. to plug a different
    /// advisory source)
    pub fn with_engine(mut self, engine: RecommendationEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Whether the portfolio analytics provider is configured
    pub fn portfolio_configured(&self) -> bool {
        self.portfolio.is_configured()
    }

    /// Analyze one wallet address.
    ///
    /// The balance fetch gates the rest of the pipeline: when it fails the
    /// valuation and market providers are never contacted and the result
    /// carries a single error recommendation. The three remaining fetches
    /// are independent and run concurrently.
    pub async fn analyze(&self, candidate: &str) -> WalletAnalysis {
        if !address::is_valid_address(candidate) {
            let error = AdvisorError::InvalidAddress(candidate.to_string());
            return WalletAnalysis::failed(candidate, &error);
        }

        let balance = match self.balance.fetch(candidate).await {
            Ok(balance) => balance,
            Err(error) => {
                tracing::error!(address = %candidate, error = %error, "balance fetch failed");
                return WalletAnalysis::failed(candidate, &error);
            }
        };

        let (overview, positions, market) = tokio::join!(
            self.portfolio.overview(candidate),
            self.portfolio.positions(candidate),
            self.market.context(),
        );

        let snapshot = WalletSnapshot::reconcile(candidate, balance, overview, positions);
        let recommendations = self.engine.recommend(&snapshot, &market).await;

        tracing::info!(
            address = %candidate,
            source = %snapshot.data_source,
            tokens = snapshot.distinct_token_count(),
            recommendations = recommendations.len(),
            "analysis complete"
        );

        WalletAnalysis::Complete {
            snapshot,
            market,
            recommendations,
        }
    }
}

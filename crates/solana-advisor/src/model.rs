//! Domain Models
//!
//! Core data types for wallet analysis. Every structure here is built once
//! per request, lives for the duration of one report, and is never mutated
//! after construction.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::fetch::balance::BalanceSummary;
use crate::fetch::portfolio::PortfolioOverview;
use crate::knowledge;

/// Which upstream produced the balance data (display/debugging only)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "endpoint")]
pub enum DataSource {
    /// A JSON-RPC endpoint, identified by its URL
    Rpc(String),
    /// The explorer fallback API
    Explorer,
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Rpc(endpoint) => write!(f, "{endpoint}"),
            DataSource::Explorer => write!(f, "explorer fallback"),
        }
    }
}

/// One SPL-token position, unique by mint within a snapshot
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenHolding {
    /// Mint address, the identity key
    pub mint: String,

    /// Resolved symbol, or a truncated mint for unknown assets
    pub symbol: String,

    /// Display name
    pub name: String,

    /// Quantity in human units (already divided by the token's decimals)
    pub quantity: Decimal,

    /// USD value, present only when the position analytics call succeeded
    pub value_usd: Option<Decimal>,

    /// Unit price in USD
    pub price_usd: Option<Decimal>,

    /// 24-hour change percentage
    pub change_1d_percent: Option<Decimal>,

    /// Upstream "known/trusted asset" flag
    pub verified: bool,
}

impl TokenHolding {
    /// Build a holding from a raw RPC token account, without valuation data
    pub fn from_token_account(mint: impl Into<String>, quantity: Decimal) -> Self {
        let mint = mint.into();
        let symbol = knowledge::resolve_symbol(&mint);
        let name = knowledge::asset_name(&symbol)
            .map_or_else(|| symbol.clone(), ToString::to_string);
        Self {
            mint,
            symbol,
            name,
            quantity,
            value_usd: None,
            price_usd: None,
            change_1d_percent: None,
            verified: false,
        }
    }
}

/// Current market conditions for the native token
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarketContext {
    /// Spot price of SOL in USD
    pub native_price_usd: Decimal,

    /// 7-day price change percentage
    pub price_change_7d_percent: Decimal,

    /// Trend classification
    pub trend: MarketTrend,
}

/// Price used when the market provider is unreachable
pub const FALLBACK_NATIVE_PRICE: Decimal = dec!(100);

impl MarketContext {
    /// Fixed fallback used whenever the market fetch fails.
    /// Neutral is only ever produced here, never computed from data.
    pub fn fallback() -> Self {
        Self {
            native_price_usd: FALLBACK_NATIVE_PRICE,
            price_change_7d_percent: Decimal::ZERO,
            trend: MarketTrend::Neutral,
        }
    }

    /// Build from fetched values, classifying the trend
    pub fn from_fetched(price: Decimal, change_7d: Decimal) -> Self {
        Self {
            native_price_usd: price,
            price_change_7d_percent: change_7d,
            trend: MarketTrend::classify(change_7d),
        }
    }
}

/// 7-day market trend
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketTrend {
    Bullish,
    Bearish,
    Neutral,
}

impl MarketTrend {
    /// Classify a successful fetch. A change of exactly zero is Bearish:
    /// the rule is `> 0` / else, and Neutral is reserved for the
    /// fetch-failure default.
    pub fn classify(change_7d: Decimal) -> Self {
        if change_7d > Decimal::ZERO {
            MarketTrend::Bullish
        } else {
            MarketTrend::Bearish
        }
    }
}

impl std::fmt::Display for MarketTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarketTrend::Bullish => write!(f, "bullish"),
            MarketTrend::Bearish => write!(f, "bearish"),
            MarketTrend::Neutral => write!(f, "neutral"),
        }
    }
}

/// The reconciled view of one address at one point in time
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WalletSnapshot {
    /// Validated input address
    pub address: String,

    /// Native SOL balance (lamports / 1e9)
    pub native_balance: Decimal,

    /// Token positions, unique by mint, quantity strictly positive
    pub token_holdings: Vec<TokenHolding>,

    /// Total USD value from the analytics provider; None means unavailable,
    /// which is distinct from a wallet worth zero dollars
    pub portfolio_value_usd: Option<Decimal>,

    /// Absolute 24h change in USD
    pub daily_change_usd: Option<Decimal>,

    /// Relative 24h change percentage
    pub daily_change_percent: Option<Decimal>,

    /// USD value per position type ("wallet", "staked", "deposited", ...).
    /// The values summing below the total is informational, not an error.
    pub distribution_by_type: Vec<(String, Decimal)>,

    /// Which upstream produced the balance data
    pub data_source: DataSource,

    /// When the snapshot was assembled
    pub fetched_at: DateTime<Utc>,
}

impl WalletSnapshot {
    /// Merge the balance fetch with the (possibly unavailable) analytics
    /// results into one consistent snapshot.
    ///
    /// Position-level analytics entries come first, in provider order
    /// (descending USD value as requested upstream); RPC-derived holdings
    /// fill in mints the analytics source did not cover. Entries with a
    /// non-positive quantity are dropped, and mints are deduplicated
    /// keeping the first occurrence.
    pub fn reconcile(
        address: impl Into<String>,
        balance: BalanceSummary,
        overview: Option<PortfolioOverview>,
        positions: Option<Vec<TokenHolding>>,
    ) -> Self {
        let mut seen: HashSet<String> = HashSet::new();
        let mut holdings = Vec::new();

        for holding in positions.into_iter().flatten() {
            if holding.quantity <= Decimal::ZERO {
                continue;
            }
            if seen.insert(holding.mint.clone()) {
                holdings.push(holding);
            }
        }

        for account in &balance.token_accounts {
            if account.ui_amount <= Decimal::ZERO {
                continue;
            }
            if seen.insert(account.mint.clone()) {
                holdings.push(TokenHolding::from_token_account(
                    account.mint.clone(),
                    account.ui_amount,
                ));
            }
        }

        let (portfolio_value_usd, daily_change_usd, daily_change_percent, distribution_by_type) =
            match overview {
                Some(o) => (
                    Some(o.total_value_usd),
                    o.daily_change_usd,
                    o.daily_change_percent,
                    o.distribution_by_type,
                ),
                None => (None, None, None, Vec::new()),
            };

        Self {
            address: address.into(),
            native_balance: balance.native_balance,
            token_holdings: holdings,
            portfolio_value_usd,
            daily_change_usd,
            daily_change_percent,
            distribution_by_type,
            data_source: balance.source,
            fetched_at: Utc::now(),
        }
    }

    /// Resolve the portfolio value that drives every bucket decision:
    /// the analytics total when available, else native balance at the
    /// current market price. Computed once and reused by the engine.
    pub fn resolved_value_usd(&self, native_price_usd: Decimal) -> Decimal {
        self.portfolio_value_usd
            .unwrap_or_else(|| self.native_balance * native_price_usd)
    }

    /// Number of distinct token positions held
    pub fn distinct_token_count(&self) -> usize {
        self.token_holdings.len()
    }
}

/// Recommendation category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Staking,
    Diversification,
    Defi,
    MarketTiming,
    RiskManagement,
    /// Bucket-keyed advice from the knowledge table
    #[serde(rename = "knowledge_advice")]
    Advisory,
    /// Terminal failure marker, emitted alone
    Error,
}

impl std::fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RecommendationKind::Staking => "staking",
            RecommendationKind::Diversification => "diversification",
            RecommendationKind::Defi => "defi",
            RecommendationKind::MarketTiming => "market_timing",
            RecommendationKind::RiskManagement => "risk_management",
            RecommendationKind::Advisory => "knowledge_advice",
            RecommendationKind::Error => "error",
        };
        write!(f, "{s}")
    }
}

/// Recommendation priority
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// One advisory item; produced fresh per request, never stored
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub priority: Priority,

    /// Short imperative, e.g. "Stake 1.40 SOL"
    pub action: String,

    pub description: String,
    pub reasoning: String,

    /// Formatted estimated yearly yield, when computable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_annual_return: Option<String>,
}

impl Recommendation {
    pub fn new(
        kind: RecommendationKind,
        priority: Priority,
        action: impl Into<String>,
        description: impl Into<String>,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            priority,
            action: action.into(),
            description: description.into(),
            reasoning: reasoning.into(),
            estimated_annual_return: None,
        }
    }

    pub fn with_estimated_return(mut self, estimate: impl Into<String>) -> Self {
        self.estimated_annual_return = Some(estimate.into());
        self
    }
}

/// A staking validator with its advertised yield
#[derive(Clone, Debug, Serialize)]
pub struct ValidatorInfo {
    pub name: &'static str,
    pub apy: Decimal,
    pub commission: Decimal,
    pub vote_account: &'static str,
}

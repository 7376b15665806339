//! Knowledge Lookup
//!
//! Fixed in-memory tables of investment heuristics: asset profiles,
//! mint resolution, bucket-keyed strategy strings and the fallback
//! validator set. Pure O(1) lookups, no I/O, fixed defaults on miss.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::model::{MarketTrend, ValidatorInfo};

/// Asset category
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetCategory {
    NativeToken,
    Stablecoin,
    DefiToken,
    Memecoin,
}

impl std::fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetCategory::NativeToken => write!(f, "native token"),
            AssetCategory::Stablecoin => write!(f, "stablecoin"),
            AssetCategory::DefiToken => write!(f, "DeFi token"),
            AssetCategory::Memecoin => write!(f, "memecoin"),
        }
    }
}

/// Relative risk level of an asset
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// Static profile of a known asset
#[derive(Clone, Copy, Debug)]
pub struct AssetProfile {
    pub category: AssetCategory,
    pub risk: RiskLevel,
    pub description: &'static str,
}

/// Look up the profile of a known asset symbol. Unknown symbols return None.
pub fn asset_profile(symbol: &str) -> Option<AssetProfile> {
    use AssetCategory::{DefiToken, Memecoin, NativeToken, Stablecoin};
    use RiskLevel::{High, Low, Medium};

    let (category, risk, description) = match symbol.to_uppercase().as_str() {
        "SOL" => (NativeToken, Medium, "Solana native token, high performance blockchain"),
        "USDC" => (Stablecoin, Low, "USD Coin, stablecoin for trading and DeFi"),
        "USDT" => (Stablecoin, Low, "Tether, stablecoin for trading and DeFi"),
        "RAY" => (DefiToken, Medium, "Raydium token, DEX and AMM protocol"),
        "BONK" => (Memecoin, High, "BONK memecoin, high volatility, speculative"),
        "JUP" => (DefiToken, Medium, "Jupiter token, DEX aggregator"),
        "ORCA" => (DefiToken, Medium, "Orca token, user-friendly DEX"),
        "MNGO" => (DefiToken, Medium, "Mango token, lending protocol"),
        _ => return None,
    };

    Some(AssetProfile { category, risk, description })
}

/// Display name for a known symbol
pub fn asset_name(symbol: &str) -> Option<&'static str> {
    match symbol.to_uppercase().as_str() {
        "SOL" => Some("Solana"),
        "USDC" => Some("USD Coin"),
        "USDT" => Some("Tether"),
        "RAY" => Some("Raydium"),
        "BONK" => Some("Bonk"),
        "JUP" => Some("Jupiter"),
        "ORCA" => Some("Orca"),
        "MNGO" => Some("Mango"),
        _ => None,
    }
}

/// Resolve a mint address to a known symbol
pub fn symbol_for_mint(mint: &str) -> Option<&'static str> {
    match mint {
        "So11111111111111111111111111111111111111112" => Some("SOL"),
        "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v" => Some("USDC"),
        "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB" => Some("USDT"),
        "4k3Dyjzvzp8eMZWUXbBCjEvwSkkk59S5iCNLY3QrkX6R" => Some("RAY"),
        "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263" => Some("BONK"),
        "JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN" => Some("JUP"),
        "orcaEKTdK7LKz57vaAYr9QeNsVEPfiu6QeMU1kektZE" => Some("ORCA"),
        "MangoCzJ36AjZyKwVj3VnYU4GOnOGMVzVhR7c3SBF9Qi" => Some("MNGO"),
        _ => None,
    }
}

/// Resolve a mint to a symbol, falling back to a truncated mint form
pub fn resolve_symbol(mint: &str) -> String {
    if let Some(symbol) = symbol_for_mint(mint) {
        return symbol.to_string();
    }

    if mint.len() > 8 {
        format!("{}...", &mint[..8])
    } else {
        mint.to_string()
    }
}

/// Portfolio size bucket
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortfolioSize {
    Small,
    Medium,
    Large,
}

impl PortfolioSize {
    pub fn from_value_usd(value: Decimal) -> Self {
        if value < dec!(1000) {
            PortfolioSize::Small
        } else if value < dec!(10000) {
            PortfolioSize::Medium
        } else {
            PortfolioSize::Large
        }
    }
}

impl std::fmt::Display for PortfolioSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortfolioSize::Small => write!(f, "small"),
            PortfolioSize::Medium => write!(f, "medium"),
            PortfolioSize::Large => write!(f, "large"),
        }
    }
}

/// Staking strategy keyed by portfolio size
pub fn size_strategy(size: PortfolioSize) -> &'static str {
    match size {
        PortfolioSize::Small => "Under $1000, stake 50-70% with Foundation",
        PortfolioSize::Medium => "$1000-$10000, diversify staking across validators",
        PortfolioSize::Large => "Over $10000, use liquid staking and DeFi strategies",
    }
}

/// Risk tolerance derived from portfolio size
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskTolerance {
    Conservative,
    Balanced,
    Aggressive,
}

impl RiskTolerance {
    pub fn from_portfolio_value(value: Decimal) -> Self {
        if value < dec!(1000) {
            RiskTolerance::Conservative
        } else if value > dec!(10000) {
            RiskTolerance::Aggressive
        } else {
            RiskTolerance::Balanced
        }
    }
}

impl std::fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTolerance::Conservative => write!(f, "conservative"),
            RiskTolerance::Balanced => write!(f, "balanced"),
            RiskTolerance::Aggressive => write!(f, "aggressive"),
        }
    }
}

/// Allocation strategy keyed by risk tolerance
pub fn allocation_strategy(tolerance: RiskTolerance) -> &'static str {
    match tolerance {
        RiskTolerance::Conservative => "70% SOL staking, 20% stablecoins, 10% DeFi",
        RiskTolerance::Balanced => "50% SOL staking, 30% DeFi tokens, 20% stablecoins",
        RiskTolerance::Aggressive => "30% SOL staking, 50% DeFi tokens, 20% memecoins",
    }
}

/// Strategy keyed by the 7-day market trend
pub fn trend_strategy(trend: MarketTrend) -> &'static str {
    match trend {
        MarketTrend::Bullish => "Focus on growth tokens, reduce stablecoin allocation",
        MarketTrend::Bearish => "Increase stablecoin allocation, focus on staking",
        MarketTrend::Neutral => "DCA strategies, yield farming, balanced allocation",
    }
}

/// Fallback validator set with advertised APY and commission
pub fn validator_set() -> Vec<ValidatorInfo> {
    vec![
        ValidatorInfo {
            name: "Solana Foundation",
            apy: dec!(7.2),
            commission: dec!(0),
            vote_account: "Vote1111111111111111111111111111111111111112",
        },
        ValidatorInfo {
            name: "P2P Validator",
            apy: dec!(6.9),
            commission: dec!(5.0),
            vote_account: "P2PValidatr11111111111111111111111111111111",
        },
        ValidatorInfo {
            name: "Marinade Finance",
            apy: dec!(6.8),
            commission: dec!(2.0),
            vote_account: "MarBmsSgKXdrN1egZf5sqe1TMai9K1rChYNDJgjq7aD",
        },
        ValidatorInfo {
            name: "Everstake",
            apy: dec!(6.7),
            commission: dec!(4.0),
            vote_account: "EverSFw9uN5t1V8kS3ficHUcKffSjwpGzUSGd7mgmSks",
        },
        ValidatorInfo {
            name: "Jito Labs",
            apy: dec!(6.5),
            commission: dec!(3.0),
            vote_account: "Jito4APyf642JPZPx3hGc6WWJ8zPKtRbR4Xe2q7WnK",
        },
    ]
}

/// Highest-APY validator from the static set
pub fn best_validator() -> ValidatorInfo {
    let mut validators = validator_set();
    validators.sort_by(|a, b| b.apy.cmp(&a.apy));
    // The set is a non-empty compile-time constant.
    validators.remove(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_lookup() {
        let sol = asset_profile("sol").unwrap();
        assert_eq!(sol.category, AssetCategory::NativeToken);
        assert_eq!(sol.risk, RiskLevel::Medium);

        let bonk = asset_profile("BONK").unwrap();
        assert_eq!(bonk.risk, RiskLevel::High);

        assert!(asset_profile("NOTREAL").is_none());
    }

    #[test]
    fn test_mint_resolution() {
        assert_eq!(
            resolve_symbol("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"),
            "USDC"
        );
        assert_eq!(
            resolve_symbol("5yA3P1hT9qW8kQvGJx2c4NfUZrE6mBdL7oSuVXeYtKjM"),
            "5yA3P1hT..."
        );
    }

    #[test]
    fn test_size_buckets() {
        assert_eq!(PortfolioSize::from_value_usd(dec!(999.99)), PortfolioSize::Small);
        assert_eq!(PortfolioSize::from_value_usd(dec!(1000)), PortfolioSize::Medium);
        assert_eq!(PortfolioSize::from_value_usd(dec!(9999)), PortfolioSize::Medium);
        assert_eq!(PortfolioSize::from_value_usd(dec!(10000)), PortfolioSize::Large);
    }

    #[test]
    fn test_tolerance_buckets() {
        assert_eq!(
            RiskTolerance::from_portfolio_value(dec!(500)),
            RiskTolerance::Conservative
        );
        // Exactly 10000 stays balanced; only strictly-greater is aggressive.
        assert_eq!(
            RiskTolerance::from_portfolio_value(dec!(10000)),
            RiskTolerance::Balanced
        );
        assert_eq!(
            RiskTolerance::from_portfolio_value(dec!(10001)),
            RiskTolerance::Aggressive
        );
    }

    #[test]
    fn test_best_validator() {
        let best = best_validator();
        assert_eq!(best.name, "Solana Foundation");
        assert_eq!(best.apy, dec!(7.2));
    }
}

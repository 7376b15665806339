//! Report Renderer
//!
//! Turns an analysis outcome into the markdown-flavored text sent back
//! over the chat substrate.

use crate::analyzer::WalletAnalysis;
use crate::knowledge;
use crate::model::{MarketContext, Priority, Recommendation, TokenHolding, WalletSnapshot};

/// At most this many holdings are listed in a report
pub const MAX_DISPLAY_HOLDINGS: usize = 15;

/// Render an analysis outcome into display text
pub fn render(analysis: &WalletAnalysis) -> String {
    match analysis {
        WalletAnalysis::Complete {
            snapshot,
            market,
            recommendations,
        } => render_report(snapshot, market, recommendations),
        WalletAnalysis::Failed {
            address, message, ..
        } => render_failure(address, message),
    }
}

fn render_report(
    snapshot: &WalletSnapshot,
    market: &MarketContext,
    recommendations: &[Recommendation],
) -> String {
    let mut out = String::new();

    out.push_str("**Wallet Analysis Complete!**\n\n");
    out.push_str(&format!(
        "**Wallet:** `{}`\n\n",
        truncate_address(&snapshot.address)
    ));

    out.push_str("## 📊 Wallet Statistics\n\n");
    out.push_str(&format!(
        "**SOL Balance:** {:.4} SOL\n",
        snapshot.native_balance
    ));
    out.push_str(&format!(
        "**Token Holdings:** {} tokens\n",
        snapshot.distinct_token_count()
    ));
    out.push_str(&format!("**Data Source:** {}\n", snapshot.data_source));
    out.push_str(&format!(
        "**SOL Price:** ${:.2} ({:+.2}% 7d, {})\n\n",
        market.native_price_usd, market.price_change_7d_percent, market.trend
    ));

    render_valuation(&mut out, snapshot);
    render_holdings(&mut out, &snapshot.token_holdings);
    render_asset_notes(&mut out, &snapshot.token_holdings);
    render_recommendations(&mut out, recommendations);

    out
}

fn render_valuation(out: &mut String, snapshot: &WalletSnapshot) {
    out.push_str("### 💰 Portfolio Value\n\n");

    match snapshot.portfolio_value_usd {
        Some(total) => {
            out.push_str(&format!("**Total Value:** ${total:.2}\n"));
            match (snapshot.daily_change_usd, snapshot.daily_change_percent) {
                (Some(abs), Some(pct)) => {
                    out.push_str(&format!("**24h Change:** {abs:+.2} USD ({pct:+.2}%)\n"));
                }
                (Some(abs), None) => {
                    out.push_str(&format!("**24h Change:** {abs:+.2} USD\n"));
                }
                _ => {}
            }

            if !snapshot.distribution_by_type.is_empty() {
                out.push_str("\n**Distribution:**\n");
                for (position_type, value) in &snapshot.distribution_by_type {
                    out.push_str(&format!("- {position_type}: ${value:.2}\n"));
                }
            }
        }
        None => {
            out.push_str("Portfolio valuation unavailable.\n");
        }
    }

    out.push('\n');
}

fn render_holdings(out: &mut String, holdings: &[TokenHolding]) {
    out.push_str("### 🪙 Token Holdings\n\n");

    if holdings.is_empty() {
        out.push_str("No token holdings found or token data unavailable.\n\n");
        return;
    }

    for (i, holding) in holdings.iter().take(MAX_DISPLAY_HOLDINGS).enumerate() {
        let verified = if holding.verified { " ✓" } else { "" };
        out.push_str(&format!("{}. **{}**{}\n", i + 1, holding.symbol, verified));
        out.push_str(&format!("   - Amount: {:.6}\n", holding.quantity));

        match holding.value_usd {
            Some(value) => out.push_str(&format!("   - Value: ${value:.2}\n")),
            None => out.push_str("   - Value: unavailable\n"),
        }
        if let Some(price) = holding.price_usd {
            out.push_str(&format!("   - Price: ${price:.4}\n"));
        }
        if let Some(change) = holding.change_1d_percent {
            out.push_str(&format!("   - 24h: {change:+.2}%\n"));
        }
        out.push_str(&format!("   - Mint: `{}`\n\n", truncate_address(&holding.mint)));
    }

    if holdings.len() > MAX_DISPLAY_HOLDINGS {
        out.push_str(&format!(
            "...and {} more\n\n",
            holdings.len() - MAX_DISPLAY_HOLDINGS
        ));
    }
}

fn render_asset_notes(out: &mut String, holdings: &[TokenHolding]) {
    let notes: Vec<_> = holdings
        .iter()
        .take(MAX_DISPLAY_HOLDINGS)
        .filter_map(|h| knowledge::asset_profile(&h.symbol).map(|p| (h.symbol.as_str(), p)))
        .collect();

    if notes.is_empty() {
        return;
    }

    out.push_str("### 📚 Asset Notes\n\n");
    for (symbol, profile) in notes {
        out.push_str(&format!(
            "- **{}** ({}, {} risk): {}\n",
            symbol, profile.category, profile.risk, profile.description
        ));
    }
    out.push('\n');
}

fn render_recommendations(out: &mut String, recommendations: &[Recommendation]) {
    out.push_str("## 💡 Investment Recommendations\n\n");

    if recommendations.is_empty() {
        out.push_str("No specific recommendations at this time.\n");
        return;
    }

    for (i, rec) in recommendations.iter().enumerate() {
        let marker = priority_marker(rec.priority);
        out.push_str(&format!("### {} {}. {}\n", marker, i + 1, rec.action));
        out.push_str(&format!("**Description:** {}\n", rec.description));
        out.push_str(&format!("**Reasoning:** {}\n", rec.reasoning));
        if let Some(ref estimate) = rec.estimated_annual_return {
            out.push_str(&format!("**Estimated Annual Return:** {estimate}\n"));
        }
        out.push('\n');
    }
}

fn render_failure(address: &str, message: &str) -> String {
    format!(
        "❌ **Analysis Failed**\n\n**Wallet:** `{}`\n\n{}",
        truncate_address(address),
        message
    )
}

fn priority_marker(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "🔴",
        Priority::Medium => "🟡",
        Priority::Low => "🟢",
    }
}

/// Display form of an address: `first8...last8`
fn truncate_address(address: &str) -> String {
    if address.len() <= 16 {
        return address.to_string();
    }
    format!("{}...{}", &address[..8], &address[address.len() - 8..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::balance::BalanceSummary;
    use crate::model::{DataSource, RecommendationKind};
    use rust_decimal_macros::dec;

    const ADDRESS: &str = "7pQHLgaTrP25TjmSaoGvTJJKeS2ZyGT2xAAvYLHsSXtk";

    fn snapshot(positions: Option<Vec<TokenHolding>>) -> WalletSnapshot {
        WalletSnapshot::reconcile(
            ADDRESS,
            BalanceSummary {
                native_balance: dec!(2),
                token_accounts: Vec::new(),
                source: DataSource::Rpc("https://api.mainnet-beta.solana.com".into()),
            },
            None,
            positions,
        )
    }

    #[test]
    fn test_truncated_address() {
        assert_eq!(
            truncate_address(ADDRESS),
            "7pQHLgaT...YLHsSXtk"
        );
        assert_eq!(truncate_address("short"), "short");
    }

    #[test]
    fn test_report_renders_unavailable_states() {
        let mut holding = TokenHolding::from_token_account(
            "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
            dec!(5),
        );
        holding.value_usd = None;

        let report = render_report(
            &snapshot(Some(vec![holding])),
            &MarketContext::fallback(),
            &[],
        );

        assert!(report.contains("7pQHLgaT...YLHsSXtk"));
        assert!(report.contains("2.0000 SOL"));
        assert!(report.contains("Portfolio valuation unavailable."));
        // A holding without a USD value still renders
        assert!(report.contains("**USDC**"));
        assert!(report.contains("Value: unavailable"));
        // Known asset gets a knowledge note
        assert!(report.contains("stablecoin"));
    }

    #[test]
    fn test_holdings_capped_at_fifteen() {
        let holdings: Vec<_> = (0..20)
            .map(|i| TokenHolding::from_token_account(format!("Mint{i:0>40}"), dec!(1)))
            .collect();

        let report = render_report(&snapshot(Some(holdings)), &MarketContext::fallback(), &[]);
        assert!(report.contains("15. **"));
        assert!(!report.contains("16. **"));
        assert!(report.contains("...and 5 more"));
    }

    #[test]
    fn test_recommendation_rendering() {
        let recs = vec![Recommendation::new(
            RecommendationKind::Staking,
            Priority::High,
            "Stake 1.40 SOL",
            "Stake with Solana Foundation for 7.20% APY",
            "High APY staking opportunity with reputable validator",
        )
        .with_estimated_return("0.1008 SOL")];

        let report = render_report(&snapshot(None), &MarketContext::fallback(), &recs);
        assert!(report.contains("🔴 1. Stake 1.40 SOL"));
        assert!(report.contains("**Estimated Annual Return:** 0.1008 SOL"));
    }

    #[test]
    fn test_failure_report() {
        let text = render_failure(ADDRESS, "All RPC endpoints and fallback APIs failed.");
        assert!(text.contains("Analysis Failed"));
        assert!(text.contains("7pQHLgaT...YLHsSXtk"));
    }
}

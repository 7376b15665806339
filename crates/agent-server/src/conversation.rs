//! Conversation Handling
//!
//! Turns free-form chat text into pipeline invocations and reply text.
//! The classification step is pure so the turn logic is testable without
//! network access.

use solana_advisor::address;

/// What a user turn asks for
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnIntent {
    /// A shape-valid address to analyze
    Analyze(String),
    /// An address-shaped candidate that failed validation
    Invalid(String),
    /// No address found in the text
    NeedAddress,
}

/// Classify one user turn
pub fn classify(text: &str) -> TurnIntent {
    match address::extract_address(text) {
        Some(candidate) if address::is_valid_address(&candidate) => TurnIntent::Analyze(candidate),
        Some(candidate) => TurnIntent::Invalid(candidate),
        None => TurnIntent::NeedAddress,
    }
}

/// Greeting sent when a session starts
pub fn greeting() -> String {
    "🔮 **Solana Investment Advisor**\n\n\
     I analyze Solana wallets and suggest what to do with them:\n\
     • Portfolio breakdown with USD valuation\n\
     • Staking recommendations with yield estimates\n\
     • Diversification and market-trend guidance\n\n\
     Please provide your Solana wallet address to get started!"
        .into()
}

/// Notice sent while an analysis is running
pub fn working_notice() -> &'static str {
    "🔍 Analyzing your Solana wallet... This may take a moment."
}

/// Reply for a turn that carried no address
pub fn missing_address_prompt() -> String {
    "🤔 I need a Solana wallet address to analyze your portfolio.\n\n\
     Please provide a valid Solana wallet address (32-44 characters, base58 encoded).\n\n\
     You can find your wallet address in:\n\
     • Phantom wallet\n\
     • Solflare wallet\n\
     • Any other Solana wallet\n\n\
     **Example:** `7pQHLgaTrP25TjmSaoGvTJJKeS2ZyGT2xAAvYLHsSXtk`"
        .into()
}

/// Reply for an address-shaped candidate that failed validation
pub fn invalid_address_reply() -> String {
    "❌ **Invalid Wallet Address**\n\n\
     The address you provided doesn't appear to be a valid Solana wallet address.\n\n\
     Please provide a valid Solana wallet address (32-44 characters, base58 encoded).\n\n\
     **Example:** `7pQHLgaTrP25TjmSaoGvTJJKeS2ZyGT2xAAvYLHsSXtk`"
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "7pQHLgaTrP25TjmSaoGvTJJKeS2ZyGT2xAAvYLHsSXtk";

    #[test]
    fn test_classify_bare_address() {
        assert_eq!(classify(EXAMPLE), TurnIntent::Analyze(EXAMPLE.into()));
    }

    #[test]
    fn test_classify_embedded_address() {
        let text = format!("hey, can you look at {EXAMPLE} please?");
        assert_eq!(classify(&text), TurnIntent::Analyze(EXAMPLE.into()));
    }

    #[test]
    fn test_classify_invalid_candidate() {
        // Plausible length, but the alphabet check fails on '0'
        let bad = format!("0{}", &EXAMPLE[1..]);
        assert_eq!(classify(&bad), TurnIntent::Invalid(bad.clone()));
    }

    #[test]
    fn test_classify_chatter() {
        assert_eq!(classify("what can you do?"), TurnIntent::NeedAddress);
    }
}

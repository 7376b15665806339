//! Error Types for the Wallet Advisor

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Candidate string is not a plausible base58 Solana address
    #[error("invalid wallet address: {0}")]
    InvalidAddress(String),

    /// One upstream source failed; recoverable via fallback or defaults
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    /// Every RPC endpoint and the explorer fallback failed
    #[error("all RPC endpoints and fallback APIs failed")]
    AllSourcesExhausted,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AdvisorError {
    /// Whether this error ends the whole request rather than degrading it
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AdvisorError::AllSourcesExhausted | AdvisorError::InvalidAddress(_)
        )
    }

    /// Convert to a user-facing message
    pub fn user_message(&self) -> String {
        match self {
            AdvisorError::InvalidAddress(_) => {
                "The address you provided doesn't appear to be a valid Solana wallet address. \
                 Please provide a valid base58 address (32-44 characters)."
                    .into()
            }
            AdvisorError::AllSourcesExhausted => {
                "All RPC endpoints and fallback APIs failed. Please try again later.".into()
            }
            AdvisorError::SourceUnavailable(source) => {
                format!("The {source} data source is temporarily unavailable.")
            }
            AdvisorError::Network(_) => "A network error occurred while fetching wallet data.".into(),
            _ => "An unexpected error occurred during wallet analysis.".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatality() {
        assert!(AdvisorError::AllSourcesExhausted.is_fatal());
        assert!(AdvisorError::InvalidAddress("xyz".into()).is_fatal());
        assert!(!AdvisorError::SourceUnavailable("market".into()).is_fatal());
    }
}

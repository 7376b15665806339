//! # solana-advisor
//!
//! Read-only Solana wallet analysis with investment recommendations.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      WalletAnalyzer                          │
//! │  ┌───────────┐ ┌────────────┐ ┌─────────┐ ┌──────────────┐  │
//! │  │  Balance  │ │ Portfolio  │ │ Market  │ │  Knowledge   │  │
//! │  │  Fetcher  │ │ Valuation  │ │ Context │ │   Lookup     │  │
//! │  └─────┬─────┘ └─────┬──────┘ └────┬────┘ └──────┬───────┘  │
//! │        └─────────────┴─── merge ───┴──────┐      │          │
//! │                   WalletSnapshot          ▼      ▼          │
//! │                             RecommendationEngine → Report   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the balance fetch is fatal: the valuation and market providers
//! degrade to "unavailable" and a fixed fallback respectively, so a
//! report can always be produced for a reachable wallet.
//!
//! All monetary values use `rust_decimal::Decimal`.

pub mod address;
pub mod advisory;
pub mod analyzer;
pub mod config;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod knowledge;
pub mod model;
pub mod report;

pub use advisory::{Advisory, AdvisorySource, KnowledgeAdvisor};
pub use analyzer::{WalletAnalysis, WalletAnalyzer};
pub use config::AdvisorConfig;
pub use engine::RecommendationEngine;
pub use error::{AdvisorError, Result};
pub use model::{
    DataSource, MarketContext, MarketTrend, Priority, Recommendation, RecommendationKind,
    TokenHolding, ValidatorInfo, WalletSnapshot,
};

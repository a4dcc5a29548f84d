//! Social Indexer: Web3 Social Graph Aggregation
//!
//! Gathers "follows" edges for an on-chain identity from several social
//! platforms concurrently, and recommends people to meet through shared
//! proof-of-attendance (POAP) events.

pub mod config;
pub mod connections;
pub mod error;
pub mod fetcher;
pub mod identity;
pub mod logging;
pub mod poap;
pub mod tooling;
pub mod transport;
pub mod types;

pub use error::ApiError;
pub use fetcher::Fetcher;
pub use types::{ConnectionEntry, PlatformTag, PoapRecommendation, UserPoapIdentity};

//! Connection aggregation
//!
//! One adapter per platform turns that platform's follow lists into
//! [`ConnectionEntry`](crate::types::ConnectionEntry) values; the aggregator
//! runs every registered adapter concurrently and merges what succeeds.

pub mod adapter;
pub mod aggregator;
pub mod context;
pub mod rarible;
pub mod registry;

pub use adapter::{Direction, PlatformAdapter};
pub use aggregator::ConnectionAggregator;
pub use context::ContextAdapter;
pub use rarible::RaribleAdapter;
pub use registry::PlatformRegistry;

//! Fraud phone-number lookup core.
//!
//! Ingests a comma-delimited fraud feed (a spreadsheet published as
//! delimited text), normalizes each row into a [`FraudRecord`], and builds
//! an immutable [`Snapshot`] holding two derived indexes: normalized phone →
//! records and customer id → phone. [`FraudCache`] owns the current
//! snapshot, refreshes it lazily at most once per staleness interval, and
//! answers point lookups that accept either a phone number or a customer
//! identifier.

pub mod cache;
pub mod config;
pub mod error;
pub mod feed;
pub mod lookup;
pub mod parse;
pub mod snapshot;

pub use cache::FraudCache;
pub use config::{load_config, load_config_from_env, AppConfig, ConfigError};
pub use error::FeedError;
pub use feed::FeedClient;
pub use lookup::{CacheStats, LocationView, SearchResult, SearchStatus};
pub use snapshot::{FraudRecord, Snapshot};

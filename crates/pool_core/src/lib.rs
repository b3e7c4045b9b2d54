//! Shared-ride pooling engine: groups compatible ride requests headed to a
//! common destination, orders their pickups, and prices the pooled trip.

pub mod concurrency;
pub mod domain;
pub mod engine;
pub mod error;
pub mod matching;
pub mod pricing;
pub mod routing;
pub mod spatial;
pub mod store;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;

pub use engine::{EngineConfig, MatchingEngine};
pub use error::PoolError;

//! Test helpers for common setup across test files.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::{NewRequest, PassengerId};
use crate::engine::{EngineConfig, MatchingEngine};
use crate::spatial::GeoPoint;
use crate::store::{InMemoryGroupStore, InMemoryRequestStore};

/// A fixed departure instant shared across test files.
pub fn test_departure() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// A request departing at [`test_departure`] from `(lat, lng)`.
pub fn request_at(lat: f64, lng: f64, seats: u8, luggage: u8, max_detour_pct: u8) -> NewRequest {
    NewRequest {
        passenger: PassengerId::new(format!("passenger-{lat}-{lng}")),
        pickup: GeoPoint::new(lat, lng),
        departure: test_departure(),
        seats,
        luggage,
        max_detour_pct,
    }
}

/// An engine over fresh in-memory stores with the default config
/// (destination at the origin).
pub fn test_engine() -> MatchingEngine {
    MatchingEngine::new(
        Arc::new(InMemoryRequestStore::new()),
        Arc::new(InMemoryGroupStore::new()),
        EngineConfig::default(),
    )
}

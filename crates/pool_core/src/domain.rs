//! Domain records: ride requests, passenger groups, routes, fares.
//!
//! These are the concrete, compile-time-checked shapes the engine operates
//! on. Validation of raw external input happens at the boundary layer, never
//! here.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::spatial::GeoPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(Uuid);

impl GroupId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque reference to the owning passenger. Identity management lives
/// outside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PassengerId(String);

impl PassengerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PassengerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request lifecycle. Transitions are one-directional and only ever leave
/// Pending; a Matched or Cancelled request is never reconsidered as a
/// candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Matched,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupStatus {
    Forming,
}

/// An independently submitted ride request waiting to be pooled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideRequest {
    pub id: RequestId,
    pub passenger: PassengerId,
    pub pickup: GeoPoint,
    pub departure: DateTime<Utc>,
    /// Seats required, 1–4.
    pub seats: u8,
    /// Luggage pieces, 0–4.
    pub luggage: u8,
    /// Maximum accepted detour over the direct trip, in percent (0–100).
    pub max_detour_pct: u8,
    pub status: RequestStatus,
}

impl RideRequest {
    /// Mint a Pending request from validated intake parameters.
    pub fn new(params: NewRequest) -> Self {
        Self {
            id: RequestId::new(),
            passenger: params.passenger,
            pickup: params.pickup,
            departure: params.departure,
            seats: params.seats,
            luggage: params.luggage,
            max_detour_pct: params.max_detour_pct,
            status: RequestStatus::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

/// Validated parameters for a new request; the id and Pending status are
/// minted on submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRequest {
    pub passenger: PassengerId,
    pub pickup: GeoPoint,
    pub departure: DateTime<Utc>,
    pub seats: u8,
    pub luggage: u8,
    pub max_detour_pct: u8,
}

/// The ordered trip a formed group will drive. Immutable once created; owned
/// by exactly one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Pickup coordinates in visiting order, terminated by the destination.
    pub waypoints: Vec<GeoPoint>,
    pub total_distance_km: f64,
    pub estimated_duration_min: f64,
    /// Detour percentage each member incurs against their direct trip.
    pub detour_by_request: HashMap<RequestId, f64>,
}

impl Route {
    /// Detour percentage for `id`, `0.0` when the route does not know it.
    pub fn detour_for(&self, id: RequestId) -> f64 {
        self.detour_by_request.get(&id).copied().unwrap_or(0.0)
    }
}

/// A pooled vehicle group. Only ever produced with two or more members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerGroup {
    pub id: GroupId,
    pub member_requests: Vec<RequestId>,
    /// Sum of the members' seat requirements.
    pub total_passengers: u8,
    /// Fixed vehicle capacity the group was packed against.
    pub total_seats: u8,
    pub total_luggage: u8,
    pub status: GroupStatus,
    pub route: Route,
}

/// A computed fare. Derived, never persisted; recomputable from a group at
/// any time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub total: f64,
    /// Reserved for a per-passenger split; the pooling formula prices the
    /// group as a whole.
    pub per_passenger: HashMap<PassengerId, f64>,
    pub currency: String,
}

/// Closed departure-time interval used by the candidate query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// The window of `half_width` on either side of `center`.
    pub fn around(center: DateTime<Utc>, half_width: Duration) -> Self {
        Self {
            start: center - half_width,
            end: center + half_width,
        }
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts <= self.end
    }
}

//! Intake validation: raw creation payloads into well-formed requests.
//!
//! Integer fields deserialize wide (`i64`) so an out-of-range value reaches
//! our range checks instead of dying inside serde with a generic message.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use pool_core::domain::{NewRequest, PassengerId};
use pool_core::spatial::GeoPoint;

/// Raw coordinate pair as received on the wire.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PickupLocation {
    pub lat: f64,
    pub lng: f64,
}

/// Creation payload as received from the serving layer.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequestPayload {
    pub passenger_id: String,
    pub pickup_location: PickupLocation,
    /// RFC 3339 timestamp.
    pub departure_time: String,
    pub seat_requirement: i64,
    pub luggage_amount: i64,
    pub max_detour_tolerance: i64,
}

/// Field-level validation failures. Every variant maps to a client error at
/// the boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntakeError {
    #[error("passenger_id must not be empty")]
    EmptyPassengerId,

    #[error("pickup latitude {0} out of range [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("pickup longitude {0} out of range [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("departure_time `{0}` is not a valid RFC 3339 timestamp")]
    InvalidDepartureTime(String),

    #[error("seat_requirement {0} out of range [1, 4]")]
    SeatRequirementOutOfRange(i64),

    #[error("luggage_amount {0} out of range [0, 4]")]
    LuggageAmountOutOfRange(i64),

    #[error("max_detour_tolerance {0} out of range [0, 100]")]
    DetourToleranceOutOfRange(i64),
}

/// Validate a raw payload into engine input.
pub fn validate(payload: &CreateRequestPayload) -> Result<NewRequest, IntakeError> {
    if payload.passenger_id.trim().is_empty() {
        return Err(IntakeError::EmptyPassengerId);
    }

    let PickupLocation { lat, lng } = payload.pickup_location;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(IntakeError::LatitudeOutOfRange(lat));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(IntakeError::LongitudeOutOfRange(lng));
    }

    let departure = DateTime::parse_from_rfc3339(&payload.departure_time)
        .map_err(|_| IntakeError::InvalidDepartureTime(payload.departure_time.clone()))?
        .with_timezone(&Utc);

    if !(1..=4).contains(&payload.seat_requirement) {
        return Err(IntakeError::SeatRequirementOutOfRange(
            payload.seat_requirement,
        ));
    }
    if !(0..=4).contains(&payload.luggage_amount) {
        return Err(IntakeError::LuggageAmountOutOfRange(payload.luggage_amount));
    }
    if !(0..=100).contains(&payload.max_detour_tolerance) {
        return Err(IntakeError::DetourToleranceOutOfRange(
            payload.max_detour_tolerance,
        ));
    }

    Ok(NewRequest {
        passenger: PassengerId::new(payload.passenger_id.clone()),
        pickup: GeoPoint::new(lat, lng),
        departure,
        seats: payload.seat_requirement as u8,
        luggage: payload.luggage_amount as u8,
        max_detour_pct: payload.max_detour_tolerance as u8,
    })
}

//! Trip pricing with a pooling discount schedule.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{PassengerGroup, PriceBreakdown};
use crate::error::PoolError;

/// Base fare in currency units.
pub const BASE_FARE: f64 = 5.0;

/// Per-kilometre rate in currency units.
pub const PER_KM_RATE: f64 = 1.5;

/// Per-minute rate in currency units.
pub const PER_MINUTE_RATE: f64 = 0.5;

/// Currency tag attached to every breakdown.
pub const CURRENCY: &str = "USD";

/// Discount applied per passenger as group size grows. Flat tiers, no
/// interpolation; saturates at four or more passengers.
pub fn pooling_discount(passengers: u32) -> f64 {
    match passengers {
        0 | 1 => 0.0,
        2 => 0.2,
        3 => 0.3,
        _ => 0.4,
    }
}

/// Fare rates for a trip. Defaults to the standard schedule above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FareSchedule {
    pub base_fare: f64,
    pub per_km_rate: f64,
    pub per_minute_rate: f64,
}

impl Default for FareSchedule {
    fn default() -> Self {
        Self {
            base_fare: BASE_FARE,
            per_km_rate: PER_KM_RATE,
            per_minute_rate: PER_MINUTE_RATE,
        }
    }
}

impl FareSchedule {
    /// Price a trip of the given distance and duration, shared by
    /// `passengers` riders.
    ///
    /// Formula: `base + distance·per_km + duration·per_min`, scaled by the
    /// demand factor, then discounted per passenger by the pooling schedule
    /// and multiplied back over the group. Pure; a passenger count of zero
    /// is refused.
    pub fn price(
        &self,
        distance_km: f64,
        duration_min: f64,
        passengers: u32,
        demand_factor: f64,
    ) -> Result<PriceBreakdown, PoolError> {
        if passengers == 0 {
            return Err(PoolError::InvalidPassengerCount);
        }

        let base_price =
            self.base_fare + distance_km * self.per_km_rate + duration_min * self.per_minute_rate;
        let solo_fare = base_price * demand_factor;
        let per_passenger_fare = solo_fare * (1.0 - pooling_discount(passengers));

        Ok(PriceBreakdown {
            total: per_passenger_fare * f64::from(passengers),
            per_passenger: HashMap::new(),
            currency: CURRENCY.to_string(),
        })
    }

    /// Price a formed group over its owned route.
    pub fn price_group(
        &self,
        group: &PassengerGroup,
        demand_factor: f64,
    ) -> Result<PriceBreakdown, PoolError> {
        self.price(
            group.route.total_distance_km,
            group.route.estimated_duration_min,
            u32::from(group.total_passengers),
            demand_factor,
        )
    }
}

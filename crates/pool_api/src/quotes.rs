//! Fare-quote surface.
//!
//! Fills the documented defaults for missing fields, then defers to the core
//! formula. The defaults belong here at the boundary; the formula itself
//! never invents inputs.

use serde::Deserialize;

use pool_core::domain::PriceBreakdown;
use pool_core::error::PoolError;
use pool_core::pricing::FareSchedule;

fn default_distance() -> f64 {
    10.0
}

fn default_duration() -> f64 {
    20.0
}

fn default_passengers() -> u32 {
    1
}

fn default_demand() -> f64 {
    1.0
}

/// Quote query as received from the serving layer; unspecified fields fall
/// back to the documented defaults.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct QuoteQuery {
    #[serde(default = "default_distance")]
    pub distance: f64,
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default = "default_passengers")]
    pub passengers: u32,
    #[serde(default = "default_demand")]
    pub demand: f64,
}

impl Default for QuoteQuery {
    fn default() -> Self {
        Self {
            distance: default_distance(),
            duration: default_duration(),
            passengers: default_passengers(),
            demand: default_demand(),
        }
    }
}

/// Evaluate a quote query against a fare schedule.
pub fn quote(schedule: &FareSchedule, query: &QuoteQuery) -> Result<PriceBreakdown, PoolError> {
    schedule.price(query.distance, query.duration, query.passengers, query.demand)
}

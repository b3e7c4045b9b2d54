//! Group formation: greedy candidate packing under seat, luggage, and detour
//! constraints.

mod group_builder;

pub use group_builder::{FormedGroup, GroupBuilder};

use chrono::Duration;

/// Hard limits applied while packing a group.
#[derive(Debug, Clone, Copy)]
pub struct MatchingConstraints {
    /// Seats available in the vehicle.
    pub seat_capacity: u8,
    /// Luggage slots available in the vehicle.
    pub luggage_capacity: u8,
    /// Half-width of the departure window candidates must fall into.
    pub time_window: Duration,
    /// Maximum pickup distance from the triggering request, in kilometres.
    pub pickup_radius_km: f64,
}

impl Default for MatchingConstraints {
    fn default() -> Self {
        Self {
            seat_capacity: 4,
            luggage_capacity: 4,
            time_window: Duration::minutes(30),
            pickup_radius_km: 5.0,
        }
    }
}

//! The greedy packer that turns a pending pool into a single vehicle group.

use log::debug;

use crate::domain::{RideRequest, Route};
use crate::routing::{optimize_route, Pickup};
use crate::spatial::{distance_km, GeoPoint};

use super::MatchingConstraints;

/// Output of a successful packing run, ready to be persisted as a group.
#[derive(Debug, Clone)]
pub struct FormedGroup {
    /// The trigger first, then committed candidates in packing order.
    pub members: Vec<RideRequest>,
    /// Sum of the members' seat requirements.
    pub total_passengers: u8,
    pub total_luggage: u8,
    pub route: Route,
}

/// Greedily assembles a capacity- and detour-feasible group around a
/// triggering request.
///
/// The candidate pool arrives already narrowed to Pending requests inside
/// the departure window (that filter belongs to the store query); the pickup
/// radius is applied here. Survivors are walked in pool order, which makes
/// the outcome a function of the store's return order.
#[derive(Debug, Clone)]
pub struct GroupBuilder {
    constraints: MatchingConstraints,
    destination: GeoPoint,
}

impl GroupBuilder {
    pub fn new(constraints: MatchingConstraints, destination: GeoPoint) -> Self {
        Self {
            constraints,
            destination,
        }
    }

    pub fn constraints(&self) -> &MatchingConstraints {
        &self.constraints
    }

    /// Pack a group around `trigger`, one pass over the pool.
    ///
    /// A candidate is committed iff it fits the remaining seat and luggage
    /// budget and the whole tentative group stays within every member's
    /// detour tolerance. Returns `None` when nobody joined; the trigger is
    /// left untouched.
    pub fn form_group(&self, trigger: &RideRequest, pool: &[RideRequest]) -> Option<FormedGroup> {
        let mut members: Vec<&RideRequest> = vec![trigger];
        let mut seats_left = self.constraints.seat_capacity.saturating_sub(trigger.seats);
        let mut luggage_left = self
            .constraints
            .luggage_capacity
            .saturating_sub(trigger.luggage);

        for candidate in pool.iter().filter(|c| self.within_reach(trigger, c)) {
            if candidate.seats <= seats_left
                && candidate.luggage <= luggage_left
                && self.detour_feasible(&members, candidate)
            {
                members.push(candidate);
                seats_left -= candidate.seats;
                luggage_left -= candidate.luggage;
            }
            if seats_left == 0 {
                break;
            }
        }

        if members.len() < 2 {
            debug!("request {}: no compatible candidate joined", trigger.id);
            return None;
        }

        let route = optimize_route(&pickups_of(&members), self.destination);
        Some(FormedGroup {
            total_passengers: members.iter().map(|m| m.seats).sum(),
            total_luggage: members.iter().map(|m| m.luggage).sum(),
            members: members.into_iter().cloned().collect(),
            route,
        })
    }

    fn within_reach(&self, trigger: &RideRequest, candidate: &RideRequest) -> bool {
        candidate.id != trigger.id
            && candidate.is_pending()
            && distance_km(trigger.pickup, candidate.pickup) <= self.constraints.pickup_radius_km
    }

    /// Re-optimize the route for the tentative membership and check every
    /// member's detour against that member's own tolerance.
    fn detour_feasible(&self, members: &[&RideRequest], candidate: &RideRequest) -> bool {
        let mut tentative = members.to_vec();
        tentative.push(candidate);
        let route = optimize_route(&pickups_of(&tentative), self.destination);
        tentative
            .iter()
            .all(|member| route.detour_for(member.id) <= f64::from(member.max_detour_pct))
    }
}

fn pickups_of(members: &[&RideRequest]) -> Vec<Pickup> {
    members
        .iter()
        .map(|m| Pickup {
            request: m.id,
            location: m.pickup,
        })
        .collect()
}

//! The service facade: request submission, serialized match attempts,
//! cancellation, and fare quotes.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};

use crate::concurrency::{SectionLock, MATCHING_SECTION};
use crate::domain::{
    GroupId, GroupStatus, NewRequest, PassengerGroup, PriceBreakdown, RequestId, RequestStatus,
    RideRequest, TimeWindow,
};
use crate::error::PoolError;
use crate::matching::{GroupBuilder, MatchingConstraints};
use crate::pricing::FareSchedule;
use crate::spatial::GeoPoint;
use crate::store::{GroupStore, RequestStore};

/// How long one match attempt may hold the matching section before the
/// lease self-expires.
pub const MATCHING_SECTION_TTL: Duration = Duration::from_secs(5);

/// Engine wiring and tunables.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// The shared destination every group is routed to.
    pub destination: GeoPoint,
    pub constraints: MatchingConstraints,
    pub fares: FareSchedule,
    pub section_ttl: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            destination: GeoPoint::new(0.0, 0.0),
            constraints: MatchingConstraints::default(),
            fares: FareSchedule::default(),
            section_ttl: MATCHING_SECTION_TTL,
        }
    }
}

/// Ties the stores, the matching section, and the packing/pricing algorithms
/// together behind the operations the boundary layer calls.
pub struct MatchingEngine {
    requests: Arc<dyn RequestStore>,
    groups: Arc<dyn GroupStore>,
    lock: SectionLock,
    builder: GroupBuilder,
    config: EngineConfig,
}

impl MatchingEngine {
    pub fn new(
        requests: Arc<dyn RequestStore>,
        groups: Arc<dyn GroupStore>,
        config: EngineConfig,
    ) -> Self {
        let builder = GroupBuilder::new(config.constraints, config.destination);
        Self {
            requests,
            groups,
            lock: SectionLock::new(),
            builder,
            config,
        }
    }

    /// Accept a validated request into the pending pool.
    pub fn submit_request(&self, params: NewRequest) -> Result<RideRequest, PoolError> {
        let request = RideRequest::new(params);
        self.requests.insert(request.clone())?;
        debug!("request {} accepted into the pending pool", request.id);
        Ok(request)
    }

    /// Attempt to form a group around the request `id`.
    ///
    /// The whole attempt (candidate query, packing, group persistence, and
    /// the members' Pending to Matched transition) runs inside the global
    /// matching section, so two concurrent attempts can never allocate the
    /// same request into two groups. `Ok(None)` is the legitimate no-match
    /// outcome: nothing is persisted and the trigger stays Pending.
    pub fn find_group(&self, id: RequestId) -> Result<Option<PassengerGroup>, PoolError> {
        self.lock
            .run_exclusive(MATCHING_SECTION, self.config.section_ttl, || {
                let trigger = self.requests.get(id)?;
                if !trigger.is_pending() {
                    return Err(PoolError::NotPending {
                        id,
                        status: trigger.status,
                    });
                }

                let window =
                    TimeWindow::around(trigger.departure, self.config.constraints.time_window);
                let pool = self.requests.pending_in_window(window, trigger.id)?;
                debug!("request {id}: {} candidates in departure window", pool.len());

                let Some(formed) = self.builder.form_group(&trigger, &pool) else {
                    return Ok(None);
                };

                let member_ids: Vec<RequestId> = formed.members.iter().map(|m| m.id).collect();
                let group = PassengerGroup {
                    id: GroupId::new(),
                    member_requests: member_ids.clone(),
                    total_passengers: formed.total_passengers,
                    total_seats: self.config.constraints.seat_capacity,
                    total_luggage: formed.total_luggage,
                    status: GroupStatus::Forming,
                    route: formed.route,
                };
                self.groups.insert(group.clone())?;
                self.requests
                    .update_status(&member_ids, RequestStatus::Matched)?;
                info!(
                    "group {} formed from {} requests, {:.2} km",
                    group.id,
                    member_ids.len(),
                    group.route.total_distance_km
                );
                Ok(Some(group))
            })
    }

    /// Cancel a Pending request. Matched and Cancelled requests are refused
    /// rather than coerced.
    pub fn cancel_request(&self, id: RequestId) -> Result<RideRequest, PoolError> {
        let request = self.requests.get(id)?;
        if !request.is_pending() {
            return Err(PoolError::NotPending {
                id,
                status: request.status,
            });
        }
        self.requests
            .update_status(&[id], RequestStatus::Cancelled)?;
        self.requests.get(id)
    }

    /// The group a request was matched into, if any.
    pub fn group_for_request(
        &self,
        id: RequestId,
    ) -> Result<Option<PassengerGroup>, PoolError> {
        self.requests.get(id)?;
        self.groups.find_by_member(id)
    }

    /// Price a formed group's trip at the given demand factor.
    pub fn quote(&self, group_id: GroupId, demand_factor: f64) -> Result<PriceBreakdown, PoolError> {
        let group = self.groups.get(group_id)?;
        self.config.fares.price_group(&group, demand_factor)
    }
}

//! Vec-backed reference stores.

use std::sync::Mutex;

use crate::domain::{
    GroupId, PassengerGroup, RequestId, RequestStatus, RideRequest, TimeWindow,
};
use crate::error::PoolError;

use super::{GroupStore, RequestStore};

/// In-memory request pool. Submission order is query order, which keeps
/// candidate packing reproducible run to run.
#[derive(Debug, Default)]
pub struct InMemoryRequestStore {
    requests: Mutex<Vec<RideRequest>>,
}

impl InMemoryRequestStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RequestStore for InMemoryRequestStore {
    fn insert(&self, request: RideRequest) -> Result<(), PoolError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);
        Ok(())
    }

    fn get(&self, id: RequestId) -> Result<RideRequest, PoolError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(PoolError::RequestNotFound(id))
    }

    fn pending_in_window(
        &self,
        window: TimeWindow,
        exclude: RequestId,
    ) -> Result<Vec<RideRequest>, PoolError> {
        Ok(self
            .requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .filter(|r| {
                r.id != exclude && r.status == RequestStatus::Pending && window.contains(r.departure)
            })
            .cloned()
            .collect())
    }

    fn update_status(&self, ids: &[RequestId], status: RequestStatus) -> Result<(), PoolError> {
        let mut requests = self
            .requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for request in requests.iter_mut() {
            if ids.contains(&request.id) {
                request.status = status;
            }
        }
        Ok(())
    }
}

/// In-memory group storage.
#[derive(Debug, Default)]
pub struct InMemoryGroupStore {
    groups: Mutex<Vec<PassengerGroup>>,
}

impl InMemoryGroupStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GroupStore for InMemoryGroupStore {
    fn insert(&self, group: PassengerGroup) -> Result<(), PoolError> {
        self.groups
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(group);
        Ok(())
    }

    fn get(&self, id: GroupId) -> Result<PassengerGroup, PoolError> {
        self.groups
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or(PoolError::GroupNotFound(id))
    }

    fn find_by_member(&self, request: RequestId) -> Result<Option<PassengerGroup>, PoolError> {
        Ok(self
            .groups
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .find(|g| g.member_requests.contains(&request))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    use crate::domain::{NewRequest, PassengerId};
    use crate::spatial::GeoPoint;

    fn request_departing_at(offset_min: i64) -> RideRequest {
        let departure =
            Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap() + Duration::minutes(offset_min);
        RideRequest::new(NewRequest {
            passenger: PassengerId::new("p"),
            pickup: GeoPoint::new(0.0, 0.0),
            departure,
            seats: 1,
            luggage: 0,
            max_detour_pct: 50,
        })
    }

    #[test]
    fn get_round_trips_and_misses_are_distinct() {
        let store = InMemoryRequestStore::new();
        let request = request_departing_at(0);
        store.insert(request.clone()).unwrap();

        assert_eq!(store.get(request.id).unwrap(), request);
        let missing = RequestId::new();
        assert_eq!(
            store.get(missing).unwrap_err(),
            PoolError::RequestNotFound(missing)
        );
    }

    #[test]
    fn window_query_filters_status_window_and_exclusion() {
        let store = InMemoryRequestStore::new();
        let trigger = request_departing_at(0);
        let inside = request_departing_at(20);
        let outside = request_departing_at(45);
        let mut cancelled = request_departing_at(-10);
        cancelled.status = RequestStatus::Cancelled;

        for r in [&trigger, &inside, &outside, &cancelled] {
            store.insert((*r).clone()).unwrap();
        }

        let window = TimeWindow::around(trigger.departure, Duration::minutes(30));
        let pool = store.pending_in_window(window, trigger.id).unwrap();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].id, inside.id);
    }

    #[test]
    fn window_query_preserves_submission_order() {
        let store = InMemoryRequestStore::new();
        let trigger = request_departing_at(0);
        let first = request_departing_at(5);
        let second = request_departing_at(-5);
        let third = request_departing_at(10);
        for r in [&trigger, &first, &second, &third] {
            store.insert((*r).clone()).unwrap();
        }

        let window = TimeWindow::around(trigger.departure, Duration::minutes(30));
        let pool = store.pending_in_window(window, trigger.id).unwrap();
        let ids: Vec<_> = pool.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![first.id, second.id, third.id]);
    }

    #[test]
    fn update_status_flips_all_named_requests() {
        let store = InMemoryRequestStore::new();
        let a = request_departing_at(0);
        let b = request_departing_at(5);
        let untouched = request_departing_at(10);
        for r in [&a, &b, &untouched] {
            store.insert((*r).clone()).unwrap();
        }

        store
            .update_status(&[a.id, b.id], RequestStatus::Matched)
            .unwrap();
        assert_eq!(store.get(a.id).unwrap().status, RequestStatus::Matched);
        assert_eq!(store.get(b.id).unwrap().status, RequestStatus::Matched);
        assert_eq!(
            store.get(untouched.id).unwrap().status,
            RequestStatus::Pending
        );
    }
}

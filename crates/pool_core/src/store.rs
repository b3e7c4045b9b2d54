//! Persistence seams: the pending-request pool and group storage.
//!
//! The engine only relies on these traits; the in-memory implementations
//! back the tests and the demo. The candidate query filters by status and
//! departure window only; the pickup-radius filter belongs to the matching
//! core, not the store.

mod memory;

pub use memory::{InMemoryGroupStore, InMemoryRequestStore};

use crate::domain::{
    GroupId, PassengerGroup, RequestId, RequestStatus, RideRequest, TimeWindow,
};
use crate::error::PoolError;

/// The shared pool of ride requests.
pub trait RequestStore: Send + Sync {
    fn insert(&self, request: RideRequest) -> Result<(), PoolError>;

    /// Fetch a request by id. Absent ids are a distinct error, never an
    /// empty result.
    fn get(&self, id: RequestId) -> Result<RideRequest, PoolError>;

    /// All Pending requests whose departure falls inside `window`, excluding
    /// `exclude`. Return order is the pool's submission order; the matching
    /// outcome depends on it.
    fn pending_in_window(
        &self,
        window: TimeWindow,
        exclude: RequestId,
    ) -> Result<Vec<RideRequest>, PoolError>;

    /// Apply `status` to every request in `ids`, atomically from the
    /// caller's perspective.
    fn update_status(&self, ids: &[RequestId], status: RequestStatus) -> Result<(), PoolError>;
}

/// Storage for formed groups. Each persisted group carries its member ids
/// and owns its route; the member-to-group direction is queryable through
/// [`GroupStore::find_by_member`].
pub trait GroupStore: Send + Sync {
    fn insert(&self, group: PassengerGroup) -> Result<(), PoolError>;

    fn get(&self, id: GroupId) -> Result<PassengerGroup, PoolError>;

    /// The group a request was matched into, if any.
    fn find_by_member(&self, request: RequestId) -> Result<Option<PassengerGroup>, PoolError>;
}

//! Error taxonomy for the pooling engine.

use thiserror::Error;

use crate::domain::{GroupId, RequestId, RequestStatus};

/// Failures surfaced by the engine and its collaborators.
///
/// A match attempt that finds no compatible candidates is not an error; it
/// surfaces as `Ok(None)` so callers can tell it apart from every variant
/// here. The algorithms never catch collaborator failures; they propagate
/// unchanged to the boundary layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PoolError {
    /// The section is held by another attempt. Terminal for this attempt;
    /// callers decide whether to retry later.
    #[error("could not acquire section `{0}`")]
    SectionBusy(String),

    #[error("ride request {0} not found")]
    RequestNotFound(RequestId),

    #[error("passenger group {0} not found")]
    GroupNotFound(GroupId),

    /// The request has already left Pending and can be neither matched nor
    /// cancelled.
    #[error("ride request {id} is {status:?}, expected Pending")]
    NotPending {
        id: RequestId,
        status: RequestStatus,
    },

    #[error("passenger count must be at least 1")]
    InvalidPassengerCount,
}

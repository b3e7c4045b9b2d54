//! Error and outcome translation for the serving layer.
//!
//! The core keeps its four failure classes distinct; this module fixes the
//! status code each one carries out of the process. The legitimate no-match
//! outcome is not an error in the core and gets its own message here.

use serde::Serialize;

use pool_core::error::PoolError;

use crate::intake::IntakeError;

/// Message returned when a match attempt legitimately finds no group.
pub const NO_GROUP_MESSAGE: &str = "No suitable group found yet";

/// Body shape for non-2xx responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Status the serving layer should attach to a core failure.
///
/// Section contention is the one retryable class: the attempt was refused,
/// not judged invalid, so it maps to 503 rather than a 4xx.
pub fn status_for(error: &PoolError) -> u16 {
    match error {
        PoolError::RequestNotFound(_) | PoolError::GroupNotFound(_) => 404,
        PoolError::NotPending { .. } => 409,
        PoolError::SectionBusy(_) => 503,
        PoolError::InvalidPassengerCount => 400,
    }
}

/// Intake failures are always client errors.
pub fn intake_status(_error: &IntakeError) -> u16 {
    400
}

/// Status and body for the no-match outcome.
pub fn no_match_response() -> (u16, ErrorBody) {
    (404, ErrorBody::new(NO_GROUP_MESSAGE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pool_core::domain::{GroupId, RequestId, RequestStatus};

    #[test]
    fn every_failure_class_maps_distinctly() {
        let id = RequestId::new();
        assert_eq!(status_for(&PoolError::RequestNotFound(id)), 404);
        assert_eq!(status_for(&PoolError::GroupNotFound(GroupId::new())), 404);
        assert_eq!(
            status_for(&PoolError::NotPending {
                id,
                status: RequestStatus::Matched,
            }),
            409
        );
        assert_eq!(
            status_for(&PoolError::SectionBusy("matching:global".to_string())),
            503
        );
        assert_eq!(status_for(&PoolError::InvalidPassengerCount), 400);
    }

    #[test]
    fn no_match_is_distinguishable_from_errors() {
        let (status, body) = no_match_response();
        assert_eq!(status, 404);
        assert_eq!(body.message, NO_GROUP_MESSAGE);
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("No suitable group"));
    }
}

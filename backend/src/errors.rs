//! Service-level error type.
//!
//! Display strings double as the user-facing messages carried in the result
//! envelope, so nothing above the REST layer needs its own wording.
use thiserror::Error;

use crate::storage::traits::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Already checked in. Please check out first.")]
    AlreadyCheckedIn,

    #[error("No active check-in found.")]
    NoActiveCheckIn,

    #[error("Record not found")]
    RecordNotFound,

    #[error("Employee not found")]
    EmployeeNotFound,

    #[error("Location not found")]
    LocationNotFound,

    #[error("{0}")]
    Validation(String),

    /// Backend/transport failure, already reduced to a user-readable message
    #[error("{0}")]
    Backend(String),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::OpenEntryExists(_) => ServiceError::AlreadyCheckedIn,
            StoreError::NotFound(_) => ServiceError::RecordNotFound,
            StoreError::Backend(bc) => ServiceError::Backend(bc.user_message()),
            StoreError::Internal(msg) => ServiceError::Backend(msg),
        }
    }
}

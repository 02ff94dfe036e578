//! Storage abstraction traits.
//!
//! The domain layer works against these traits so the in-memory store and
//! the Business Central OData store are interchangeable at startup.
use async_trait::async_trait;
use thiserror::Error;

use crate::domain::commands::time_entry::HistoryFilters;
use crate::domain::models::employee::Employee;
use crate::domain::models::location::Location;
use crate::domain::models::time_entry::{NewManualEntry, NewOpenEntry, TimeEntry};
use crate::storage::bc::error::BcApiError;

/// Failures surfaced by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("an open time entry already exists for employee {0}")]
    OpenEntryExists(String),

    #[error("time entry not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Backend(#[from] BcApiError),

    #[error("{0}")]
    Internal(String),
}

/// Time-entry persistence.
#[async_trait]
pub trait TimeEntryStore: Send + Sync {
    /// Insert a new open entry, failing with [`StoreError::OpenEntryExists`]
    /// when the employee already has one. Implementations make the check and
    /// the insert atomic where their backend allows it.
    async fn insert_open_entry(&self, new: NewOpenEntry) -> Result<TimeEntry, StoreError>;

    /// The employee's open entry, if any. The open-entry invariant means at
    /// most one should exist.
    async fn find_open_entry(&self, employee_id: &str) -> Result<Option<TimeEntry>, StoreError>;

    async fn get_entry(&self, entry_id: &str) -> Result<Option<TimeEntry>, StoreError>;

    /// Persist a modified entry, keyed by its id.
    async fn update_entry(&self, entry: &TimeEntry) -> Result<TimeEntry, StoreError>;

    /// Insert a manager-added entry. Deliberately skips the open-entry
    /// check; manual corrections are trusted.
    async fn insert_manual_entry(&self, new: NewManualEntry) -> Result<TimeEntry, StoreError>;

    /// Entries for one employee matching the filters, sorted by
    /// `check_in_time` descending. The date range is inclusive.
    async fn list_entries(
        &self,
        employee_id: &str,
        filters: &HistoryFilters,
    ) -> Result<Vec<TimeEntry>, StoreError>;
}

/// Read-only employee directory.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn get_employee(&self, id: &str) -> Result<Option<Employee>, StoreError>;

    /// Active employees only.
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError>;
}

/// Read-only location directory.
#[async_trait]
pub trait LocationStore: Send + Sync {
    async fn get_location(&self, id: &str) -> Result<Option<Location>, StoreError>;

    /// Active locations only.
    async fn list_locations(&self) -> Result<Vec<Location>, StoreError>;
}

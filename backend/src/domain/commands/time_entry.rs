//! Command and result types for time-entry operations.
use chrono::{DateTime, Utc};

use crate::domain::models::location::Location;
use crate::domain::models::time_entry::TimeEntry;

/// Check in an employee at a location.
#[derive(Debug, Clone)]
pub struct CheckInCommand {
    pub employee_id: String,
    pub location_id: String,
    pub notes: Option<String>,
}

/// Check out the employee's open entry.
#[derive(Debug, Clone)]
pub struct CheckOutCommand {
    pub employee_id: String,
    pub notes: Option<String>,
}

/// History filtering; the date range is inclusive on `check_in_time`.
#[derive(Debug, Clone, Default)]
pub struct HistoryFilters {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub location_id: Option<String>,
}

/// Time summary over a date range, optionally restricted to one location.
#[derive(Debug, Clone)]
pub struct TimeSummaryQuery {
    pub employee_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location_id: Option<String>,
}

/// Manager correction of an existing entry. Only the provided fields change.
#[derive(Debug, Clone, Default)]
pub struct UpdateEntryCommand {
    pub entry_id: String,
    pub location_id: Option<String>,
    pub check_in_time: Option<DateTime<Utc>>,
    /// `Some(None)` clears the check-out and reopens the entry
    pub check_out_time: Option<Option<DateTime<Utc>>>,
    pub notes: Option<String>,
    /// Audit reason, logged with the correction
    pub reason: String,
}

/// Manager-added entry covering a missed check-in/out cycle.
#[derive(Debug, Clone)]
pub struct AddManualEntryCommand {
    pub employee_id: String,
    pub location_id: String,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    /// Audit reason, logged with the insertion
    pub reason: String,
}

/// Whether the employee currently has an open entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInState {
    CheckedIn,
    CheckedOut,
}

/// Result of a status query: the open entry and its location, if any.
#[derive(Debug, Clone)]
pub struct CurrentStatus {
    pub state: CheckInState,
    pub current_record: Option<TimeEntry>,
    pub location: Option<Location>,
}

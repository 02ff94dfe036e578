use serde::{Deserialize, Deserializer, Serialize};

/// Uniform result envelope returned by every API operation.
///
/// Service failures are reported through `success`/`error` rather than a
/// separate error payload, so callers can render a message without a
/// dedicated error-handling pathway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Payload of the operation; absent when the call failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub success: bool,
    /// User-readable failure message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            success: true,
            error: None,
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            data: None,
            success: false,
            error: Some(error.into()),
        }
    }
}

/// One check-in/check-out cycle as exposed over the API.
///
/// Timestamps are RFC 3339 strings with timezone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntryDto {
    pub id: String,
    pub employee_id: String,
    pub location_id: String,
    pub check_in_time: String,
    /// `None` while the entry is open (currently checked in)
    pub check_out_time: Option<String>,
    /// Whole minutes between the checkpoints; `None` while open
    pub duration_minutes: Option<i64>,
    pub notes: String,
    pub status: EntryStatusDto,
    pub created_at: String,
    pub modified_at: String,
}

/// Lifecycle state of a time entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntryStatusDto {
    Open,
    Closed,
}

/// Employee reference data (read-only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub manager_id: Option<String>,
    pub role: EmployeeRoleDto,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EmployeeRoleDto {
    Employee,
    Manager,
    Admin,
}

/// Work location reference data (read-only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDto {
    pub id: String,
    pub name: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_active: bool,
}

/// Whether the employee currently has an open entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckInStateDto {
    CheckedIn,
    CheckedOut,
}

/// Current check-in status for an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentStatusResponse {
    pub status: CheckInStateDto,
    /// The open entry when checked in
    pub current_record: Option<TimeEntryDto>,
    /// Location of the open entry, when it resolves
    pub location: Option<LocationDto>,
}

/// Request body for checking in to a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInRequest {
    pub location_id: String,
    pub notes: Option<String>,
}

/// Request body for checking out of the current location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckOutRequest {
    pub notes: Option<String>,
}

/// Query parameters for the history endpoint.
///
/// Dates are RFC 3339; the range is inclusive on `check_in_time`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub location_id: Option<String>,
}

/// Query parameters for the time summary endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSummaryQueryParams {
    pub start_date: String,
    pub end_date: String,
    pub location_id: Option<String>,
}

/// Aggregated time report over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSummaryDto {
    pub total_minutes: i64,
    /// Total hours rounded to one decimal
    pub total_hours: f64,
    pub by_location: Vec<LocationSummaryDto>,
    pub by_day: Vec<DaySummaryDto>,
}

/// Minutes worked at one location within the summary range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSummaryDto {
    pub location_id: String,
    /// Display name, or "Unknown" when the location doesn't resolve
    pub location_name: String,
    pub minutes: i64,
}

/// Minutes worked on one calendar day within the summary range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummaryDto {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    pub minutes: i64,
}

/// Manager correction of an existing entry.
///
/// Only the provided fields change; duration is recomputed whenever both
/// checkpoints end up present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateEntryRequest {
    pub location_id: Option<String>,
    pub check_in_time: Option<String>,
    /// `Some(None)` clears the check-out and reopens the entry; an absent
    /// field leaves it alone
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub check_out_time: Option<Option<String>>,
    pub notes: Option<String>,
    /// Audit reason for the correction
    #[serde(default)]
    pub reason: String,
}

/// Manager-added entry for a missed check-in/out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddManualEntryRequest {
    pub location_id: String,
    pub check_in_time: String,
    /// When present the entry is created already closed
    pub check_out_time: Option<String>,
    pub notes: Option<String>,
    /// Audit reason for the manual entry
    #[serde(default)]
    pub reason: String,
}

/// Distinguishes a field set to `null` (`Some(None)`) from a field that is
/// absent entirely (`None`, via `#[serde(default)]`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

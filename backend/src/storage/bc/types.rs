//! Wire-level records of the Business Central time-registration API and
//! their conversions into domain models.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::employee::{Employee, EmployeeRole};
use crate::domain::models::location::Location;
use crate::domain::models::time_entry::{EntryStatus, TimeEntry};

/// Collection response: `{"@odata.context": ..., "value": [...]}`.
#[derive(Debug, Deserialize)]
pub struct ODataCollection<T> {
    #[serde(default, rename = "@odata.context")]
    pub context: Option<String>,
    pub value: Vec<T>,
}

/// Time entry registration row (LSC Time Entry Registration).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BcTimeEntry {
    pub system_id: String,
    #[serde(default)]
    pub entry_no: i64,
    pub employee_no: String,
    pub location_code: String,
    pub check_in_date_time: DateTime<Utc>,
    #[serde(default)]
    pub check_out_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub created_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modified_date_time: Option<DateTime<Utc>>,
}

impl From<BcTimeEntry> for TimeEntry {
    fn from(bc: BcTimeEntry) -> Self {
        let status = if bc.check_out_date_time.is_some() {
            EntryStatus::Closed
        } else {
            EntryStatus::Open
        };
        TimeEntry {
            id: bc.system_id,
            employee_id: bc.employee_no,
            location_id: bc.location_code,
            check_in_time: bc.check_in_date_time,
            check_out_time: bc.check_out_date_time,
            duration_minutes: bc.duration_minutes,
            notes: bc.notes,
            status,
            created_at: bc.created_date_time.unwrap_or(bc.check_in_date_time),
            modified_at: bc
                .modified_date_time
                .or(bc.check_out_date_time)
                .unwrap_or(bc.check_in_date_time),
        }
    }
}

/// POST body for a new registration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BcNewTimeEntry {
    pub employee_no: String,
    pub location_code: String,
    pub check_in_date_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    pub notes: String,
}

/// PATCH body for corrections and check-outs.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BcTimeEntryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_date_time: Option<DateTime<Utc>>,
    /// Serialized even when null so a cleared check-out reopens the entry
    pub check_out_date_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Staff employee row (LSC STAFF Employee).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BcEmployee {
    pub system_id: String,
    pub no: String,
    pub display_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub manager_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub job_title: String,
}

impl From<BcEmployee> for Employee {
    fn from(bc: BcEmployee) -> Self {
        let role = if bc.job_title.to_lowercase().contains("manager") {
            EmployeeRole::Manager
        } else {
            EmployeeRole::Employee
        };
        Employee {
            id: bc.no,
            name: bc.display_name,
            email: bc.email,
            department: bc.department,
            manager_id: if bc.manager_id.is_empty() {
                None
            } else {
                Some(bc.manager_id)
            },
            role,
            is_active: bc.status == "Active",
        }
    }
}

/// Work location row (LSC Work Location).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BcLocation {
    pub system_id: String,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub address2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub post_code: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub is_active: bool,
}

impl From<BcLocation> for Location {
    fn from(bc: BcLocation) -> Self {
        let address = [bc.address, bc.address2, bc.city, bc.state, bc.post_code]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        Location {
            id: bc.code,
            name: bc.name,
            address,
            latitude: bc.latitude,
            longitude: bc.longitude,
            is_active: bc.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_entry_conversion_derives_status() {
        let raw = serde_json::json!({
            "systemId": "a1b2",
            "entryNo": 7,
            "employeeNo": "EMP001",
            "locationCode": "LOC001",
            "checkInDateTime": "2025-06-01T08:00:00Z",
            "checkOutDateTime": null,
            "durationMinutes": null,
            "notes": ""
        });
        let entry: TimeEntry = serde_json::from_value::<BcTimeEntry>(raw).unwrap().into();
        assert_eq!(entry.id, "a1b2");
        assert_eq!(entry.status, EntryStatus::Open);
        assert!(entry.is_open());
    }

    #[test]
    fn employee_role_follows_job_title() {
        let base = serde_json::json!({
            "systemId": "s1",
            "no": "EMP005",
            "displayName": "Robert Wilson",
            "status": "Active",
            "jobTitle": "Engineering Manager"
        });
        let employee: Employee = serde_json::from_value::<BcEmployee>(base).unwrap().into();
        assert_eq!(employee.role, EmployeeRole::Manager);
        assert!(employee.is_active);
        assert_eq!(employee.manager_id, None);
    }

    #[test]
    fn location_address_joins_non_empty_parts() {
        let raw = serde_json::json!({
            "systemId": "s2",
            "code": "LOC001",
            "name": "Headquarters",
            "address": "123 Main Street",
            "address2": "",
            "city": "Seattle",
            "state": "WA",
            "postCode": "98101",
            "isActive": true
        });
        let location: Location = serde_json::from_value::<BcLocation>(raw).unwrap().into();
        assert_eq!(location.address, "123 Main Street, Seattle, WA, 98101");
    }

    #[test]
    fn patch_serializes_cleared_checkout_as_null() {
        let patch = BcTimeEntryPatch {
            location_code: None,
            check_in_date_time: None,
            check_out_date_time: None,
            duration_minutes: None,
            notes: None,
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert!(json.get("locationCode").is_none());
        assert_eq!(json["checkOutDateTime"], serde_json::Value::Null);
    }
}

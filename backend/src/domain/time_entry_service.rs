//! Check-in/check-out lifecycle over the configured time-entry store.
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::commands::time_entry::{
    AddManualEntryCommand, CheckInCommand, CheckInState, CheckOutCommand, CurrentStatus,
    HistoryFilters, TimeSummaryQuery, UpdateEntryCommand,
};
use crate::domain::models::time_entry::{NewManualEntry, NewOpenEntry, TimeEntry};
use crate::domain::reporting::{self, TimeSummary};
use crate::errors::ServiceError;
use crate::storage::traits::{LocationStore, TimeEntryStore};

/// Service for recording and querying employee check-in/check-out cycles.
///
/// Maintains the invariant that an employee has at most one open entry; the
/// in-memory store enforces it atomically, the remote store inherits the
/// read-then-write semantics of the OData API.
#[derive(Clone)]
pub struct TimeEntryService {
    entries: Arc<dyn TimeEntryStore>,
    locations: Arc<dyn LocationStore>,
}

impl TimeEntryService {
    pub fn new(entries: Arc<dyn TimeEntryStore>, locations: Arc<dyn LocationStore>) -> Self {
        Self { entries, locations }
    }

    /// Current status for an employee: the open entry and its location, or
    /// checked-out when none exists.
    pub async fn current_status(&self, employee_id: &str) -> Result<CurrentStatus, ServiceError> {
        debug!(employee = %employee_id, "querying current status");

        match self.entries.find_open_entry(employee_id).await? {
            Some(entry) => {
                // A failed location lookup degrades to no location, it does
                // not fail the status query.
                let location = match self.locations.get_location(&entry.location_id).await {
                    Ok(location) => location,
                    Err(err) => {
                        warn!(location = %entry.location_id, error = %err, "location lookup failed");
                        None
                    }
                };
                Ok(CurrentStatus {
                    state: CheckInState::CheckedIn,
                    current_record: Some(entry),
                    location,
                })
            }
            None => Ok(CurrentStatus {
                state: CheckInState::CheckedOut,
                current_record: None,
                location: None,
            }),
        }
    }

    /// Check in, creating a new open entry stamped now. Fails when the
    /// employee already has one.
    pub async fn check_in(&self, command: CheckInCommand) -> Result<TimeEntry, ServiceError> {
        if command.employee_id.trim().is_empty() {
            return Err(ServiceError::Validation("Employee is required.".into()));
        }
        if command.location_id.trim().is_empty() {
            return Err(ServiceError::Validation("Location is required.".into()));
        }

        info!(employee = %command.employee_id, location = %command.location_id, "check-in");

        let entry = self
            .entries
            .insert_open_entry(NewOpenEntry {
                employee_id: command.employee_id,
                location_id: command.location_id,
                notes: command.notes.unwrap_or_default(),
                check_in_time: Utc::now(),
            })
            .await?;
        Ok(entry)
    }

    /// Check out the open entry: stamps the exit time, computes the duration
    /// and appends any notes. Fails when no entry is open.
    pub async fn check_out(&self, command: CheckOutCommand) -> Result<TimeEntry, ServiceError> {
        info!(employee = %command.employee_id, "check-out");

        let mut entry = self
            .entries
            .find_open_entry(&command.employee_id)
            .await?
            .ok_or(ServiceError::NoActiveCheckIn)?;

        entry.close(Utc::now(), command.notes.as_deref());
        let entry = self.entries.update_entry(&entry).await?;
        Ok(entry)
    }

    /// Entry history, newest first. Date filters are inclusive on the
    /// check-in time.
    pub async fn history(
        &self,
        employee_id: &str,
        filters: HistoryFilters,
    ) -> Result<Vec<TimeEntry>, ServiceError> {
        debug!(employee = %employee_id, "querying history");
        Ok(self.entries.list_entries(employee_id, &filters).await?)
    }

    /// Aggregated summary of closed entries within the range.
    pub async fn time_summary(&self, query: TimeSummaryQuery) -> Result<TimeSummary, ServiceError> {
        if query.end_date < query.start_date {
            return Err(ServiceError::Validation(
                "Start date must not be after end date.".into(),
            ));
        }

        let filters = HistoryFilters {
            start_date: Some(query.start_date),
            end_date: Some(query.end_date),
            location_id: query.location_id.clone(),
        };
        let entries = self.entries.list_entries(&query.employee_id, &filters).await?;
        let closed: Vec<TimeEntry> = entries
            .into_iter()
            .filter(|e| e.duration_minutes.is_some())
            .collect();

        // Name resolution is best-effort; unresolved locations show as
        // "Unknown" in the breakdown.
        let locations = match self.locations.list_locations().await {
            Ok(locations) => locations,
            Err(err) => {
                warn!(error = %err, "location list unavailable for summary");
                Vec::new()
            }
        };

        Ok(reporting::summarize(&closed, &locations))
    }

    pub async fn get_entry(&self, entry_id: &str) -> Result<TimeEntry, ServiceError> {
        self.entries
            .get_entry(entry_id)
            .await?
            .ok_or(ServiceError::RecordNotFound)
    }

    /// Manager correction: apply the provided fields and recompute duration
    /// and status from the resulting checkpoints.
    pub async fn update_entry(&self, command: UpdateEntryCommand) -> Result<TimeEntry, ServiceError> {
        info!(entry = %command.entry_id, reason = %command.reason, "manager correction");

        let mut entry = self
            .entries
            .get_entry(&command.entry_id)
            .await?
            .ok_or(ServiceError::RecordNotFound)?;

        if let Some(location_id) = command.location_id {
            entry.location_id = location_id;
        }
        if let Some(check_in_time) = command.check_in_time {
            entry.check_in_time = check_in_time;
        }
        if let Some(check_out_time) = command.check_out_time {
            entry.check_out_time = check_out_time;
        }
        if let Some(notes) = command.notes {
            entry.notes = notes;
        }
        if let (Some(out), check_in) = (entry.check_out_time, entry.check_in_time) {
            if out < check_in {
                return Err(ServiceError::Validation(
                    "Check-out must not be before check-in.".into(),
                ));
            }
        }

        entry.recompute();
        entry.modified_at = Utc::now();

        Ok(self.entries.update_entry(&entry).await?)
    }

    /// Manager-added entry for a missed cycle; closed iff a check-out time
    /// is supplied.
    pub async fn add_manual_entry(
        &self,
        command: AddManualEntryCommand,
    ) -> Result<TimeEntry, ServiceError> {
        if command.location_id.trim().is_empty() {
            return Err(ServiceError::Validation("Location is required.".into()));
        }
        if let Some(out) = command.check_out_time {
            if out < command.check_in_time {
                return Err(ServiceError::Validation(
                    "Check-out must not be before check-in.".into(),
                ));
            }
        }

        info!(
            employee = %command.employee_id,
            reason = %command.reason,
            "manual entry added"
        );

        let entry = self
            .entries
            .insert_manual_entry(NewManualEntry {
                employee_id: command.employee_id,
                location_id: command.location_id,
                check_in_time: command.check_in_time,
                check_out_time: command.check_out_time,
                notes: command.notes.unwrap_or_default(),
            })
            .await?;
        Ok(entry)
    }
}

//! Business Central implementations of the storage traits.
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::client::BcClient;
use super::config::endpoints;
use super::odata::ODataFilter;
use super::types::{
    BcEmployee, BcLocation, BcNewTimeEntry, BcTimeEntry, BcTimeEntryPatch, ODataCollection,
};
use crate::domain::commands::time_entry::HistoryFilters;
use crate::domain::models::employee::Employee;
use crate::domain::models::location::Location;
use crate::domain::models::time_entry::{
    duration_minutes, NewManualEntry, NewOpenEntry, TimeEntry,
};
use crate::storage::traits::{EmployeeStore, LocationStore, StoreError, TimeEntryStore};

/// Remote store backed by the Business Central time-registration API.
///
/// Check-in performs a query-then-POST; the open-entry invariant is only as
/// atomic as the remote API makes it, which mirrors the behavior of the
/// hosted service.
pub struct BcStore {
    client: Arc<BcClient>,
}

impl BcStore {
    pub fn new(client: Arc<BcClient>) -> Self {
        Self { client }
    }

    async fn query_entries(
        &self,
        filter: String,
        top: Option<u32>,
    ) -> Result<Vec<TimeEntry>, StoreError> {
        let mut query: Vec<(&str, String)> = vec![
            ("$filter", filter),
            ("$orderby", "checkInDateTime desc".to_string()),
        ];
        if let Some(top) = top {
            query.push(("$top", top.to_string()));
        }
        let collection: ODataCollection<BcTimeEntry> = self
            .client
            .get_json(endpoints::TIME_ENTRIES, &query)
            .await?;
        Ok(collection.value.into_iter().map(TimeEntry::from).collect())
    }
}

#[async_trait]
impl TimeEntryStore for BcStore {
    async fn insert_open_entry(&self, new: NewOpenEntry) -> Result<TimeEntry, StoreError> {
        if self.find_open_entry(&new.employee_id).await?.is_some() {
            return Err(StoreError::OpenEntryExists(new.employee_id));
        }

        let body = BcNewTimeEntry {
            employee_no: new.employee_id,
            location_code: new.location_id,
            check_in_date_time: new.check_in_time,
            check_out_date_time: None,
            duration_minutes: None,
            notes: new.notes,
        };
        let created: BcTimeEntry = self.client.post_json(endpoints::TIME_ENTRIES, &body).await?;
        debug!(entry = %created.system_id, "registration created");
        Ok(created.into())
    }

    async fn find_open_entry(&self, employee_id: &str) -> Result<Option<TimeEntry>, StoreError> {
        let filter = ODataFilter::new()
            .eq("employeeNo", employee_id)
            .is_null("checkOutDateTime")
            .build();
        let entries = self.query_entries(filter, Some(1)).await?;
        Ok(entries.into_iter().next())
    }

    async fn get_entry(&self, entry_id: &str) -> Result<Option<TimeEntry>, StoreError> {
        match self
            .client
            .get_entity::<BcTimeEntry>(endpoints::TIME_ENTRIES, entry_id)
            .await
        {
            Ok(entry) => Ok(Some(entry.into())),
            Err(err) if err.status == 404 => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn update_entry(&self, entry: &TimeEntry) -> Result<TimeEntry, StoreError> {
        let patch = BcTimeEntryPatch {
            location_code: Some(entry.location_id.clone()),
            check_in_date_time: Some(entry.check_in_time),
            check_out_date_time: entry.check_out_time,
            duration_minutes: entry.duration_minutes,
            notes: Some(entry.notes.clone()),
        };
        // The read APIs here don't surface the entity tag, so updates use
        // the wildcard and rely on BC's record locking.
        let updated: BcTimeEntry = self
            .client
            .patch_json(endpoints::TIME_ENTRIES, &entry.id, &patch, "*")
            .await?;
        Ok(updated.into())
    }

    async fn insert_manual_entry(&self, new: NewManualEntry) -> Result<TimeEntry, StoreError> {
        let duration = new
            .check_out_time
            .map(|out| duration_minutes(new.check_in_time, out));
        let body = BcNewTimeEntry {
            employee_no: new.employee_id,
            location_code: new.location_id,
            check_in_date_time: new.check_in_time,
            check_out_date_time: new.check_out_time,
            duration_minutes: duration,
            notes: new.notes,
        };
        let created: BcTimeEntry = self.client.post_json(endpoints::TIME_ENTRIES, &body).await?;
        Ok(created.into())
    }

    async fn list_entries(
        &self,
        employee_id: &str,
        filters: &HistoryFilters,
    ) -> Result<Vec<TimeEntry>, StoreError> {
        let mut filter = ODataFilter::new().eq("employeeNo", employee_id);
        if let Some(start) = filters.start_date {
            filter = filter.ge("checkInDateTime", start);
        }
        if let Some(end) = filters.end_date {
            filter = filter.le("checkInDateTime", end);
        }
        if let Some(location_id) = &filters.location_id {
            filter = filter.eq("locationCode", location_id);
        }
        self.query_entries(filter.build(), None).await
    }
}

#[async_trait]
impl EmployeeStore for BcStore {
    async fn get_employee(&self, id: &str) -> Result<Option<Employee>, StoreError> {
        let filter = ODataFilter::new().eq("no", id).build();
        let collection: ODataCollection<BcEmployee> = self
            .client
            .get_json(
                endpoints::EMPLOYEES,
                &[("$filter", filter), ("$top", "1".to_string())],
            )
            .await?;
        Ok(collection.value.into_iter().next().map(Employee::from))
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let filter = ODataFilter::new().eq("status", "Active").build();
        let collection: ODataCollection<BcEmployee> = self
            .client
            .get_json(endpoints::EMPLOYEES, &[("$filter", filter)])
            .await?;
        Ok(collection.value.into_iter().map(Employee::from).collect())
    }
}

#[async_trait]
impl LocationStore for BcStore {
    async fn get_location(&self, id: &str) -> Result<Option<Location>, StoreError> {
        let filter = ODataFilter::new().eq("code", id).build();
        let collection: ODataCollection<BcLocation> = self
            .client
            .get_json(
                endpoints::LOCATIONS,
                &[("$filter", filter), ("$top", "1".to_string())],
            )
            .await?;
        Ok(collection.value.into_iter().next().map(Location::from))
    }

    async fn list_locations(&self) -> Result<Vec<Location>, StoreError> {
        let filter = ODataFilter::new().eq_literal("isActive", true).build();
        let collection: ODataCollection<BcLocation> = self
            .client
            .get_json(endpoints::LOCATIONS, &[("$filter", filter)])
            .await?;
        Ok(collection.value.into_iter().map(Location::from).collect())
    }
}

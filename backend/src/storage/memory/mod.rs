//! In-memory store used for local development and tests.
//!
//! Entries live in a `RwLock`-guarded vector kept most-recent-first;
//! employees and locations are fixed seed data mirroring a small
//! organization.
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::domain::commands::time_entry::HistoryFilters;
use crate::domain::models::employee::{Employee, EmployeeRole};
use crate::domain::models::location::Location;
use crate::domain::models::time_entry::{NewManualEntry, NewOpenEntry, TimeEntry};
use crate::storage::traits::{EmployeeStore, LocationStore, StoreError, TimeEntryStore};

pub struct MemoryStore {
    entries: RwLock<Vec<TimeEntry>>,
    employees: Vec<Employee>,
    locations: Vec<Location>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            employees: seed_employees(),
            locations: seed_locations(),
        }
    }

    /// Snapshot of every entry, newest first.
    pub async fn all_entries(&self) -> Vec<TimeEntry> {
        self.entries.read().await.clone()
    }

    /// Drop all time entries; reference data is untouched.
    pub async fn reset(&self) {
        self.entries.write().await.clear();
    }

    fn matches(entry: &TimeEntry, employee_id: &str, filters: &HistoryFilters) -> bool {
        if entry.employee_id != employee_id {
            return false;
        }
        if let Some(start) = filters.start_date {
            if entry.check_in_time < start {
                return false;
            }
        }
        if let Some(end) = filters.end_date {
            if entry.check_in_time > end {
                return false;
            }
        }
        if let Some(location_id) = &filters.location_id {
            if &entry.location_id != location_id {
                return false;
            }
        }
        true
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TimeEntryStore for MemoryStore {
    async fn insert_open_entry(&self, new: NewOpenEntry) -> Result<TimeEntry, StoreError> {
        // Check and insert under one write lock: the open-entry invariant
        // cannot race in-process.
        let mut entries = self.entries.write().await;
        if entries
            .iter()
            .any(|e| e.employee_id == new.employee_id && e.is_open())
        {
            return Err(StoreError::OpenEntryExists(new.employee_id));
        }

        let entry = TimeEntry::open(Uuid::new_v4().to_string(), new);
        debug!(entry = %entry.id, employee = %entry.employee_id, "open entry inserted");
        entries.insert(0, entry.clone());
        Ok(entry)
    }

    async fn find_open_entry(&self, employee_id: &str) -> Result<Option<TimeEntry>, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .find(|e| e.employee_id == employee_id && e.is_open())
            .cloned())
    }

    async fn get_entry(&self, entry_id: &str) -> Result<Option<TimeEntry>, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries.iter().find(|e| e.id == entry_id).cloned())
    }

    async fn update_entry(&self, entry: &TimeEntry) -> Result<TimeEntry, StoreError> {
        let mut entries = self.entries.write().await;
        let slot = entries
            .iter_mut()
            .find(|e| e.id == entry.id)
            .ok_or_else(|| StoreError::NotFound(entry.id.clone()))?;
        *slot = entry.clone();
        Ok(entry.clone())
    }

    async fn insert_manual_entry(&self, new: NewManualEntry) -> Result<TimeEntry, StoreError> {
        let entry = TimeEntry::manual(Uuid::new_v4().to_string(), new, chrono::Utc::now());
        let mut entries = self.entries.write().await;
        entries.insert(0, entry.clone());
        entries.sort_by(|a, b| b.check_in_time.cmp(&a.check_in_time));
        Ok(entry)
    }

    async fn list_entries(
        &self,
        employee_id: &str,
        filters: &HistoryFilters,
    ) -> Result<Vec<TimeEntry>, StoreError> {
        let entries = self.entries.read().await;
        let mut matching: Vec<TimeEntry> = entries
            .iter()
            .filter(|e| Self::matches(e, employee_id, filters))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.check_in_time.cmp(&a.check_in_time));
        Ok(matching)
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn get_employee(&self, id: &str) -> Result<Option<Employee>, StoreError> {
        Ok(self.employees.iter().find(|e| e.id == id).cloned())
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self
            .employees
            .iter()
            .filter(|e| e.is_active)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl LocationStore for MemoryStore {
    async fn get_location(&self, id: &str) -> Result<Option<Location>, StoreError> {
        Ok(self.locations.iter().find(|l| l.id == id).cloned())
    }

    async fn list_locations(&self) -> Result<Vec<Location>, StoreError> {
        Ok(self
            .locations
            .iter()
            .filter(|l| l.is_active)
            .cloned()
            .collect())
    }
}

fn seed_employees() -> Vec<Employee> {
    let employee = |id: &str, name: &str, email: &str, department: &str, manager: Option<&str>, role| Employee {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        department: department.to_string(),
        manager_id: manager.map(str::to_string),
        role,
        is_active: true,
    };
    vec![
        employee(
            "EMP001",
            "John Smith",
            "john.smith@company.com",
            "Engineering",
            Some("EMP005"),
            EmployeeRole::Employee,
        ),
        employee(
            "EMP002",
            "Sarah Johnson",
            "sarah.johnson@company.com",
            "Engineering",
            Some("EMP005"),
            EmployeeRole::Employee,
        ),
        employee(
            "EMP003",
            "Michael Brown",
            "michael.brown@company.com",
            "Sales",
            Some("EMP006"),
            EmployeeRole::Employee,
        ),
        employee(
            "EMP004",
            "Emily Davis",
            "emily.davis@company.com",
            "HR",
            Some("EMP006"),
            EmployeeRole::Employee,
        ),
        employee(
            "EMP005",
            "Robert Wilson",
            "robert.wilson@company.com",
            "Engineering",
            None,
            EmployeeRole::Manager,
        ),
        employee(
            "EMP006",
            "Jennifer Martinez",
            "jennifer.martinez@company.com",
            "Operations",
            None,
            EmployeeRole::Manager,
        ),
    ]
}

fn seed_locations() -> Vec<Location> {
    let location = |id: &str, name: &str, address: &str, lat: f64, lon: f64| Location {
        id: id.to_string(),
        name: name.to_string(),
        address: address.to_string(),
        latitude: Some(lat),
        longitude: Some(lon),
        is_active: true,
    };
    vec![
        location(
            "LOC001",
            "Headquarters",
            "123 Main Street, Seattle, WA 98101",
            47.6062,
            -122.3321,
        ),
        location(
            "LOC002",
            "Downtown Office",
            "456 Commerce Ave, Seattle, WA 98104",
            47.6097,
            -122.3331,
        ),
        location(
            "LOC003",
            "Eastside Campus",
            "789 Tech Parkway, Bellevue, WA 98004",
            47.6101,
            -122.2015,
        ),
        location(
            "LOC004",
            "South Distribution Center",
            "321 Industrial Blvd, Tukwila, WA 98188",
            47.4620,
            -122.2587,
        ),
    ]
}

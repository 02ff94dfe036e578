//! Read-only lookups for the employee and location reference entities.
use std::sync::Arc;

use tracing::debug;

use crate::domain::models::employee::Employee;
use crate::domain::models::location::Location;
use crate::errors::ServiceError;
use crate::storage::traits::{EmployeeStore, LocationStore};

/// Thin service over the directory stores; no lifecycle is managed here.
#[derive(Clone)]
pub struct DirectoryService {
    employees: Arc<dyn EmployeeStore>,
    locations: Arc<dyn LocationStore>,
}

impl DirectoryService {
    pub fn new(employees: Arc<dyn EmployeeStore>, locations: Arc<dyn LocationStore>) -> Self {
        Self { employees, locations }
    }

    pub async fn employee(&self, id: &str) -> Result<Employee, ServiceError> {
        debug!(employee = %id, "employee lookup");
        self.employees
            .get_employee(id)
            .await?
            .ok_or(ServiceError::EmployeeNotFound)
    }

    pub async fn employees(&self) -> Result<Vec<Employee>, ServiceError> {
        Ok(self.employees.list_employees().await?)
    }

    pub async fn location(&self, id: &str) -> Result<Location, ServiceError> {
        debug!(location = %id, "location lookup");
        self.locations
            .get_location(id)
            .await?
            .ok_or(ServiceError::LocationNotFound)
    }

    pub async fn locations(&self) -> Result<Vec<Location>, ServiceError> {
        Ok(self.locations.list_locations().await?)
    }
}

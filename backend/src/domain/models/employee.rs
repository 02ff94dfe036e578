//! Domain model for an employee (read-only reference data).
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeRole {
    Employee,
    Manager,
    Admin,
}

/// Employee as fetched from the backend directory. The time-entry core never
/// mutates employees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub manager_id: Option<String>,
    pub role: EmployeeRole,
    pub is_active: bool,
}

//! Domain model for a work location (read-only reference data).
use serde::{Deserialize, Serialize};

/// A named work location employees check in against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_active: bool,
}

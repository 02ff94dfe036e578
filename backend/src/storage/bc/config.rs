//! Connection settings for the Business Central OData API.
use std::env;

/// Entity endpoints of the time-registration API.
pub mod endpoints {
    pub const EMPLOYEES: &str = "/staffEmployees";
    pub const LOCATIONS: &str = "/workLocations";
    pub const TIME_ENTRIES: &str = "/timeEntryRegistrations";
}

#[derive(Debug, Clone, Default)]
pub struct BcConfig {
    /// Tenant/environment base, e.g. `https://api.businesscentral.dynamics.com/v2.0/{tenant}/{env}`
    pub base_url: String,
    pub api_version: String,
    pub company_id: String,
    pub tenant_id: String,
}

impl BcConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("BC_BASE_URL").unwrap_or_default(),
            api_version: env::var("BC_API_VERSION").unwrap_or_else(|_| "v2.0".to_string()),
            company_id: env::var("BC_COMPANY_ID").unwrap_or_default(),
            tenant_id: env::var("BC_TENANT_ID").unwrap_or_default(),
        }
    }
}

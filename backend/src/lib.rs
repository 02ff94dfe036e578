//! Check In/Check Out backend.
//!
//! Employees record arrival and departure against named work locations; the
//! service exposes status, history and aggregated time summaries over a REST
//! surface. Data comes from either an in-memory store or a Business Central
//! OData backend behind common storage traits, selected at startup.
use std::sync::Arc;

use anyhow::Context;

pub mod config;
pub mod domain;
pub mod errors;
pub mod rest;
pub mod storage;

use config::{AppConfig, Provider};
use domain::{DirectoryService, TimeEntryService};
use storage::bc::{BcClient, BcStore};
use storage::traits::{EmployeeStore, LocationStore, TimeEntryStore};
use storage::MemoryStore;

/// Orchestrates the domain services over the configured storage provider.
pub struct Backend {
    pub time_entry_service: TimeEntryService,
    pub directory_service: DirectoryService,
}

impl Backend {
    /// Wire the services against the provider named in the configuration.
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        match config.provider {
            Provider::Mock => {
                let store = Arc::new(MemoryStore::new());
                Ok(Self::with_stores(store.clone(), store.clone(), store))
            }
            Provider::BusinessCentral => {
                anyhow::ensure!(
                    !config.bc.base_url.is_empty(),
                    "BC_BASE_URL is required for the business-central provider"
                );
                anyhow::ensure!(
                    !config.bc.company_id.is_empty(),
                    "BC_COMPANY_ID is required for the business-central provider"
                );
                let client = Arc::new(
                    BcClient::new(config.bc.clone()).context("building BC client")?,
                );
                let store = Arc::new(BcStore::new(client));
                Ok(Self::with_stores(store.clone(), store.clone(), store))
            }
        }
    }

    /// Wire the services against explicit stores (used by tests and by the
    /// provider arms above).
    pub fn with_stores<S>(entries: Arc<S>, employees: Arc<S>, locations: Arc<S>) -> Self
    where
        S: TimeEntryStore + EmployeeStore + LocationStore + 'static,
    {
        let entry_store: Arc<dyn TimeEntryStore> = entries;
        let employee_store: Arc<dyn EmployeeStore> = employees;
        let location_store: Arc<dyn LocationStore> = locations;
        Self {
            time_entry_service: TimeEntryService::new(entry_store, location_store.clone()),
            directory_service: DirectoryService::new(employee_store, location_store),
        }
    }
}

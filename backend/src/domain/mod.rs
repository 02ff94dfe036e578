//! Domain layer: models, commands, services and the reporting aggregator.
pub mod commands;
pub mod directory_service;
pub mod models;
pub mod reporting;
pub mod time_entry_service;

pub use directory_service::DirectoryService;
pub use time_entry_service::TimeEntryService;

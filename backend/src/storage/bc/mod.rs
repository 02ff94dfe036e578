//! Business Central OData backend: configuration, filter construction,
//! error classification, the HTTP client and the store implementations.
pub mod client;
pub mod config;
pub mod error;
pub mod odata;
pub mod store;
pub mod types;

pub use client::{BcClient, RetryConfig};
pub use config::BcConfig;
pub use store::BcStore;

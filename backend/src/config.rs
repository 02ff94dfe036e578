//! Runtime configuration sourced from environment variables.
use std::env;
use std::str::FromStr;

use tracing::warn;

use crate::storage::bc::BcConfig;

/// Which storage backend serves the time-entry data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Mock,
    BusinessCentral,
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(Provider::Mock),
            "bc" | "business-central" | "businesscentral" => Ok(Provider::BusinessCentral),
            other => Err(format!("unknown provider {other:?}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub provider: Provider,
    pub bind_address: String,
    pub bc: BcConfig,
}

impl AppConfig {
    /// Read configuration from the environment; unset variables fall back to
    /// the mock provider on localhost.
    pub fn from_env() -> Self {
        let provider = match env::var("CHECKINOUT_PROVIDER") {
            Ok(raw) => raw.parse().unwrap_or_else(|err: String| {
                warn!("{err}, falling back to mock provider");
                Provider::Mock
            }),
            Err(_) => Provider::Mock,
        };
        Self {
            provider,
            bind_address: env::var("CHECKINOUT_BIND")
                .unwrap_or_else(|_| "127.0.0.1:3000".to_string()),
            bc: BcConfig::from_env(),
        }
    }
}

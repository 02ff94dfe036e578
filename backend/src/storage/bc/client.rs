//! HTTP client for the Business Central OData API.
//!
//! GETs are idempotent and retried with exponential backoff; POST and PATCH
//! are never retried to avoid duplicate side effects.
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, IF_MATCH};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use super::config::BcConfig;
use super::error::BcApiError;

/// Retry policy for idempotent reads.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub backoff_multiplier: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(1000),
            backoff_multiplier: 2,
        }
    }
}

pub struct BcClient {
    http: reqwest::Client,
    config: BcConfig,
    retry: RetryConfig,
}

impl BcClient {
    pub fn new(config: BcConfig) -> anyhow::Result<Self> {
        Self::with_retry(config, RetryConfig::default())
    }

    pub fn with_retry(config: BcConfig, retry: RetryConfig) -> anyhow::Result<Self> {
        Url::parse(&config.base_url)
            .map_err(|err| anyhow::anyhow!("invalid BC base URL {:?}: {err}", config.base_url))?;
        Ok(Self {
            http: reqwest::Client::new(),
            config,
            retry,
        })
    }

    /// `{base}/api/lsretail/timeregistration/{version}/companies({companyId}){endpoint}`
    pub fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/api/lsretail/timeregistration/{}/companies({}){}",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_version,
            self.config.company_id,
            endpoint
        )
    }

    /// GET with query parameters, retried with exponential backoff. Statuses
    /// that cannot succeed on retry (401/403/404) fail immediately.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, BcApiError> {
        let mut delay = self.retry.initial_delay;
        let mut last_err: Option<BcApiError> = None;

        for attempt in 0..=self.retry.max_retries {
            if attempt > 0 {
                tokio::time::sleep(delay).await;
                delay *= self.retry.backoff_multiplier;
            }
            match self.try_get(endpoint, query).await {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_retryable() => return Err(err),
                Err(err) => {
                    warn!(endpoint, attempt, error = %err, "BC read failed");
                    last_err = Some(err);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| BcApiError {
            code: "RetriesExhausted".to_string(),
            message: "retry budget exhausted".to_string(),
            status: 0,
            details: Vec::new(),
        }))
    }

    async fn try_get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, BcApiError> {
        debug!(endpoint, "GET");
        let response = self
            .http
            .get(self.url(endpoint))
            .headers(json_headers())
            .query(query)
            .send()
            .await
            .map_err(|err| BcApiError::network(&err))?;
        Self::decode(response).await
    }

    /// POST a new entity; not retried.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &impl Serialize,
    ) -> Result<T, BcApiError> {
        debug!(endpoint, "POST");
        let response = self
            .http
            .post(self.url(endpoint))
            .headers(json_headers())
            .json(body)
            .send()
            .await
            .map_err(|err| BcApiError::network(&err))?;
        Self::decode(response).await
    }

    /// PATCH an entity addressed by `{endpoint}({id})` with an `If-Match`
    /// concurrency tag; not retried.
    pub async fn patch_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        entity_id: &str,
        body: &impl Serialize,
        etag: &str,
    ) -> Result<T, BcApiError> {
        debug!(endpoint, entity_id, "PATCH");
        let url = format!("{}({})", self.url(endpoint), entity_id);
        let etag_value = HeaderValue::from_str(etag)
            .unwrap_or_else(|_| HeaderValue::from_static("*"));
        let response = self
            .http
            .patch(url)
            .headers(json_headers())
            .header(IF_MATCH, etag_value)
            .json(body)
            .send()
            .await
            .map_err(|err| BcApiError::network(&err))?;
        Self::decode(response).await
    }

    /// GET a single entity addressed by `{endpoint}({id})`; retried like any
    /// other read.
    pub async fn get_entity<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        entity_id: &str,
    ) -> Result<T, BcApiError> {
        let path = format!("{endpoint}({entity_id})");
        self.get_json(&path, &[]).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BcApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(BcApiError::from_response(status.as_u16(), &body));
        }
        if status == StatusCode::NO_CONTENT {
            // BC always echoes the entity for the requests made here
            return Err(BcApiError {
                code: "EmptyResponse".to_string(),
                message: "expected an entity body".to_string(),
                status: status.as_u16(),
                details: Vec::new(),
            });
        }
        response.json().await.map_err(|err| BcApiError::decode(&err))
    }
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

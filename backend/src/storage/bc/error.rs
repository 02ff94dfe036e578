//! Business Central API error taxonomy.
//!
//! HTTP and OData failures are classified into a small fixed set of codes
//! with user-readable messages; retry eligibility is decided per status.
use serde::Deserialize;
use thiserror::Error;

/// OData error body: `{"error": {"code": ..., "message": ..., "details": [...]}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct BcErrorBody {
    pub error: BcErrorContent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BcErrorContent {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: Vec<BcErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BcErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub target: Option<String>,
}

/// A classified failure from the Business Central API.
#[derive(Debug, Clone, Error)]
#[error("{code}: {message} (HTTP {status})")]
pub struct BcApiError {
    pub code: String,
    pub message: String,
    /// HTTP status; 0 for transport-level failures
    pub status: u16,
    pub details: Vec<BcErrorDetail>,
}

impl BcApiError {
    /// Classify a non-success response from its status and raw body.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<BcErrorBody>(body) {
            Ok(parsed) => Self {
                code: parsed.error.code,
                message: parsed.error.message,
                status,
                details: parsed.error.details,
            },
            Err(_) => Self {
                code: format!("HTTP_{status}"),
                message: format!("HTTP Error {status}"),
                status,
                details: Vec::new(),
            },
        }
    }

    /// A transport-level failure (connect, timeout, DNS).
    pub fn network(err: &reqwest::Error) -> Self {
        Self {
            code: "NetworkError".to_string(),
            message: err.to_string(),
            status: 0,
            details: Vec::new(),
        }
    }

    /// The server answered but the payload didn't deserialize.
    pub fn decode(err: &reqwest::Error) -> Self {
        Self {
            code: "DecodeError".to_string(),
            message: err.to_string(),
            status: 0,
            details: Vec::new(),
        }
    }

    /// Whether a retry can possibly succeed. Authorization and not-found
    /// failures are final.
    pub fn is_retryable(&self) -> bool {
        !matches!(self.status, 401 | 403 | 404)
    }

    /// User-facing message for the result envelope.
    pub fn user_message(&self) -> String {
        match self.code.as_str() {
            "Authorization_RequestDenied" => {
                "You do not have permission to perform this action.".to_string()
            }
            "Request_ResourceNotFound" => "The requested resource was not found.".to_string(),
            "BusinessCentral_RecordNotFound" => {
                "The record you are looking for does not exist.".to_string()
            }
            "BusinessCentral_RecordLocked" => {
                "This record is currently being edited by another user.".to_string()
            }
            "BusinessCentral_ValidationError" => {
                if self.message.is_empty() {
                    "Validation error. Please check your input.".to_string()
                } else {
                    self.message.clone()
                }
            }
            "NetworkError" => {
                "Unable to connect to the server. Please check your connection.".to_string()
            }
            _ => {
                if self.message.is_empty() {
                    "An unexpected error occurred.".to_string()
                } else {
                    self.message.clone()
                }
            }
        }
    }
}

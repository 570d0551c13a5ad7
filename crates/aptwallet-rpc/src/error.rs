//! RPC error types.

use serde::Deserialize;
use thiserror::Error;

/// Error body returned by the node on 4xx/5xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub vm_error_code: Option<u64>,
}

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("HTTP error calling {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API error {status} from {url}: {message}")]
    Api {
        url: String,
        status: u16,
        message: String,
        error_code: Option<String>,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("timed out waiting for transaction {hash}")]
    Timeout { hash: String },

    #[error("no faucet configured for this client")]
    NoFaucet,

    #[error("{0}")]
    Other(String),
}

impl RpcError {
    /// Whether a retry may succeed (connection trouble, rate limiting, 5xx).
    pub fn is_transient(&self) -> bool {
        match self {
            RpcError::Http { source, .. } => source.is_timeout() || source.is_connect(),
            RpcError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            RpcError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Node-reported error code (e.g. `account_not_found`).
    pub fn error_code(&self) -> Option<&str> {
        match self {
            RpcError::Api { error_code, .. } => error_code.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn api(url: &str, status: u16, body: &str) -> Self {
        let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_else(|_| ApiErrorBody {
            message: body.chars().take(500).collect(),
            ..Default::default()
        });
        RpcError::Api {
            url: url.to_string(),
            status,
            message: parsed.message,
            error_code: parsed.error_code,
        }
    }
}

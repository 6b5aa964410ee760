//! error.rs
//!
//! Error kinds surfaced to the user. Every variant is recovered at the UI
//! boundary and shown as a dismissable notice.

use std::io;
use std::path::PathBuf;

pub const MIN_INPUT_CHARS: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Input too short")]
    Validation,
    #[error("Request timed out")]
    Timeout,
    #[error("Failed to connect to server: {0}")]
    Network(String),
    #[error("{message}")]
    Server {
        status: u16,
        message: String,
        hint: Option<String>,
    },
    #[error("invalid response from server: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Remediation text shown under the message.
    pub fn hint(&self) -> Option<&str> {
        match self {
            ApiError::Validation => Some("Please provide at least 3 characters"),
            ApiError::Timeout => Some(
                "The generation took too long. Try with simpler code or check if Ollama is responding.",
            ),
            ApiError::Network(_) => Some("Make sure the server is running"),
            ApiError::Server { hint, .. } => hint.as_deref(),
            ApiError::InvalidResponse(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation => "validation",
            ApiError::Timeout => "timeout",
            ApiError::Network(_) => "network",
            ApiError::Server { .. } => "server",
            ApiError::InvalidResponse(_) => "invalid_response",
        }
    }

    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No test cases to export")]
    NothingToExport,
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize export: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("timeout must be at least 1 second")]
    InvalidTimeout,
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn hint(&self) -> Option<&str> {
        match self {
            AppError::Api(e) => e.hint(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_and_network_have_distinct_messages() {
        let timeout = ApiError::Timeout;
        let network = ApiError::Network("connection refused".into());
        assert_ne!(timeout.to_string(), network.to_string());
        assert_ne!(timeout.hint(), network.hint());
        assert_eq!(timeout.kind(), "timeout");
        assert_eq!(network.kind(), "network");
    }

    #[test]
    fn server_error_displays_backend_message() {
        let err = ApiError::Server {
            status: 503,
            message: "Ollama not available. Please start Ollama server.".into(),
            hint: Some("Run: ollama serve".into()),
        };
        assert_eq!(
            err.to_string(),
            "Ollama not available. Please start Ollama server."
        );
        assert_eq!(err.hint(), Some("Run: ollama serve"));
    }

    #[test]
    fn app_error_forwards_api_hint() {
        let err = AppError::from(ApiError::Validation);
        assert_eq!(err.hint(), Some("Please provide at least 3 characters"));
        assert!(AppError::from(ExportError::NothingToExport).hint().is_none());
    }
}

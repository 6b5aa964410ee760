// src/api/client.rs

use reqwest::blocking::{Client, Response};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ApiError, ConfigError, MIN_INPUT_CHARS};
use crate::model::{
    ErrorBody, GenerateRequest, GenerateResponse, GenerationResult, HealthReport, HealthStatus,
};

const GENERATE_PATH: &str = "api/generate";
const HEALTH_PATH: &str = "api/health";

/// Trim the input and reject anything shorter than [`MIN_INPUT_CHARS`]
/// before it reaches the network.
pub fn validate_input(raw: &str) -> Result<&str, ApiError> {
    let text = raw.trim();
    if text.chars().count() < MIN_INPUT_CHARS {
        return Err(ApiError::Validation);
    }
    Ok(text)
}

/// Blocking client for the test-generation backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(cfg: &ClientConfig) -> Result<Self, ConfigError> {
        let http = Client::builder().timeout(cfg.timeout).build()?;

        Ok(Self {
            http,
            base_url: cfg.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Network(format!("bad endpoint {path}: {e}")))
    }

    /// `POST /api/generate`. Exactly one request, never retried.
    pub fn generate(&self, input: &str) -> Result<GenerationResult, ApiError> {
        let code = validate_input(input)?;
        let url = self.endpoint(GENERATE_PATH)?;

        tracing::info!(%url, chars = code.chars().count(), "dispatching generation request");

        let resp = self
            .http
            .post(url)
            .json(&GenerateRequest { code })
            .send()
            .map_err(|e| {
                let err = ApiError::from_transport(e);
                tracing::warn!(kind = err.kind(), error = %err, "generation request failed");
                err
            })?;

        let result = parse_generate_response(resp);
        match &result {
            Ok(r) => tracing::info!(
                cases = r.test_cases.len(),
                code_bytes = r.pytest_code.len(),
                model = r.model_used.as_deref().unwrap_or("-"),
                "generation succeeded"
            ),
            Err(e) => tracing::warn!(kind = e.kind(), error = %e, "generation rejected"),
        }
        result
    }

    /// `GET /api/health`.
    pub fn health(&self) -> Result<HealthReport, ApiError> {
        let url = self.endpoint(HEALTH_PATH)?;
        let resp = self
            .http
            .get(url)
            .send()
            .map_err(ApiError::from_transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
                message: format!("HTTP {}", status.as_u16()),
                hint: None,
            });
        }

        resp.json::<HealthReport>()
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Health probe that never fails: any error reads as offline.
    pub fn check_health(&self) -> HealthStatus {
        match self.health() {
            Ok(report) => {
                tracing::info!(
                    connected = report.ollama_connected,
                    model = %report.model,
                    status = report.status.as_deref().unwrap_or("-"),
                    "health check"
                );
                report.into()
            }
            Err(e) => {
                tracing::warn!(error = %e, "health check failed");
                HealthStatus::offline()
            }
        }
    }
}

fn parse_generate_response(resp: Response) -> Result<GenerationResult, ApiError> {
    let status = resp.status();
    let body = resp.text().map_err(ApiError::from_transport)?;

    if !status.is_success() {
        return Err(server_error(status.as_u16(), &body));
    }

    let parsed: GenerateResponse =
        serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

    if let Some(message) = parsed.error {
        return Err(ApiError::Server {
            status: status.as_u16(),
            message,
            hint: parsed.hint,
        });
    }

    Ok(parsed.result)
}

fn server_error(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            error: Some(message),
            hint,
        }) => ApiError::Server {
            status,
            message,
            hint,
        },
        _ => ApiError::Server {
            status,
            message: format!("HTTP {status}"),
            hint: None,
        },
    }
}

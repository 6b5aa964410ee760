//! model.rs
//!
//! Wire and transcript types shared by the client, renderer and exporter.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/* ============================================================
   Test cases
   ============================================================ */

/// Classification of a test case, derived from its raw `type` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseKind {
    Positive,
    Negative,
    Other,
}

impl CaseKind {
    pub fn classify(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "POSITIVE" => CaseKind::Positive,
            "NEGATIVE" => CaseKind::Negative,
            _ => CaseKind::Other,
        }
    }
}

/// A manual test case as produced by the backend.
///
/// The backend forwards model output as-is, so `raw` keeps the exact object it
/// sent and is what gets serialized back out. The other fields are a lenient
/// read of it for display: missing, null or non-scalar values become empty and
/// numbers are stringified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct TestCase {
    pub id: String,
    pub title: String,
    /// Raw `type` string; see [`TestCase::classify`].
    pub kind: String,
    pub steps: Vec<String>,
    pub expected: String,
    raw: Value,
}

impl TestCase {
    pub fn classify(&self) -> CaseKind {
        CaseKind::classify(&self.kind)
    }

    /// Badge text; `TEST` when the backend left the type blank.
    pub fn label(&self) -> &str {
        if self.kind.trim().is_empty() {
            "TEST"
        } else {
            &self.kind
        }
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl From<Value> for TestCase {
    fn from(raw: Value) -> Self {
        let field = |key: &str| raw.get(key).map(scalar_text).unwrap_or_default();

        let steps = match raw.get("steps") {
            Some(Value::Array(items)) => items
                .iter()
                .map(scalar_text)
                .filter(|s| !s.is_empty())
                .collect(),
            Some(Value::String(s)) if !s.trim().is_empty() => vec![s.clone()],
            _ => Vec::new(),
        };

        Self {
            id: field("id"),
            title: field("title"),
            kind: field("type"),
            steps,
            expected: field("expected"),
            raw,
        }
    }
}

impl From<TestCase> for Value {
    fn from(tc: TestCase) -> Self {
        tc.raw
    }
}

fn scalar_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Treats an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

/* ============================================================
   Generation result
   ============================================================ */

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub test_cases: Vec<TestCase>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pytest_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_used: Option<String>,
}

impl GenerationResult {
    /// Note text, treating an empty string the same as an absent one.
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref().filter(|n| !n.trim().is_empty())
    }
}

/// Raw body of a `/api/generate` response before it is split into a result
/// or a backend-reported error.
#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(flatten)]
    pub result: GenerationResult,
}

/// Error body returned with a non-success status.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest<'a> {
    pub code: &'a str,
}

/* ============================================================
   Health
   ============================================================ */

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct HealthReport {
    #[serde(default)]
    pub ollama_connected: bool,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub available_models: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HealthStatus {
    pub connected: bool,
    pub model: String,
}

impl HealthStatus {
    pub fn offline() -> Self {
        Self::default()
    }
}

impl From<HealthReport> for HealthStatus {
    fn from(report: HealthReport) -> Self {
        Self {
            connected: report.ollama_connected,
            model: report.model,
        }
    }
}

/* ============================================================
   Transcript
   ============================================================ */

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    User { content: String },
    Bot(GenerationResult),
}

//! export.rs
//!
//! `test_cases.json` export of the latest successful result.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::model::{GenerationResult, Message, TestCase};

pub const EXPORT_FILENAME: &str = "test_cases.json";

/// On-disk export shape. Field order is part of the format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub manual_test_cases: Vec<TestCase>,
    pub pytest_code: String,
    pub exported_at: String,
}

impl ExportDocument {
    pub fn new(result: &GenerationResult, now: DateTime<Utc>) -> Self {
        Self {
            manual_test_cases: result.test_cases.clone(),
            pytest_code: result.pytest_code.clone(),
            exported_at: iso_timestamp(now),
        }
    }

    /// Two-space indented JSON.
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// `2026-10-18T09:15:02.481Z`
pub fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Most recent bot result in the transcript.
pub fn latest_result(transcript: &[Message]) -> Option<&GenerationResult> {
    transcript.iter().rev().find_map(|m| match m {
        Message::Bot(result) => Some(result),
        Message::User { .. } => None,
    })
}

pub fn write_export(
    result: &GenerationResult,
    path: &Path,
    now: DateTime<Utc>,
) -> Result<PathBuf, ExportError> {
    let json = ExportDocument::new(result, now).to_json()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ExportError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, json).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        cases = result.test_cases.len(),
        "exported test cases"
    );
    Ok(path.to_path_buf())
}

/// Export the latest result into `dir/test_cases.json`. Nothing is written
/// when the transcript has no result yet.
pub fn export_latest(
    transcript: &[Message],
    dir: &Path,
    now: DateTime<Utc>,
) -> Result<PathBuf, ExportError> {
    let result = latest_result(transcript).ok_or(ExportError::NothingToExport)?;
    write_export(result, &dir.join(EXPORT_FILENAME), now)
}

//! cli.rs
//!
//! Non-interactive commands: one generation request or one health probe,
//! printed to stdout.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use chrono::Utc;
use clap::Args;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::AppError;
use crate::export::{write_export, EXPORT_FILENAME};
use crate::model::{GenerationResult, Message};
use crate::render::html::render_document;
use crate::render::text::render_plain;

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    #[arg(help = "Python code or feature description (reads stdin when omitted)")]
    pub input: Option<String>,

    #[arg(long, short, conflicts_with = "input", help = "Read the input from a file")]
    pub file: Option<PathBuf>,

    #[arg(
        long,
        num_args = 0..=1,
        default_missing_value = EXPORT_FILENAME,
        help = "Write the result as test_cases.json (or to the given path)"
    )]
    pub export: Option<PathBuf>,

    #[arg(long, help = "Write a standalone HTML report to this path")]
    pub html: Option<PathBuf>,

    #[arg(long, default_value_t = false, help = "Print the raw result as JSON")]
    pub json: bool,
}

pub fn read_input(args: &GenerateArgs) -> io::Result<String> {
    if let Some(text) = &args.input {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        return fs::read_to_string(path);
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

pub fn generate(args: GenerateArgs, cfg: &ClientConfig) -> Result<(), AppError> {
    let input = read_input(&args)?;
    let client = ApiClient::new(cfg)?;
    let result = client.generate(&input)?;

    let mut out = io::stdout().lock();
    write_result(&mut out, &result, args.json)?;

    if let Some(path) = &args.export {
        let path = write_export(&result, path, Utc::now())?;
        eprintln!("exported to {}", path.display());
    }

    if let Some(path) = &args.html {
        let transcript = [
            Message::User {
                content: input.trim().to_string(),
            },
            Message::Bot(result),
        ];
        fs::write(path, render_document("Generated test cases", &transcript))?;
        eprintln!("report written to {}", path.display());
    }

    Ok(())
}

pub fn write_result<W: Write>(
    out: &mut W,
    result: &GenerationResult,
    json: bool,
) -> Result<(), AppError> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(result)?)?;
    } else {
        write!(out, "{}", render_plain(result))?;
    }
    Ok(())
}

pub fn health(cfg: &ClientConfig) -> Result<(), AppError> {
    let client = ApiClient::new(cfg)?;
    let mut out = io::stdout().lock();

    writeln!(out, "backend:   {}", client.base_url())?;
    match client.health() {
        Ok(report) => {
            let status = if report.ollama_connected { "connected" } else { "disconnected" };
            writeln!(out, "ollama:    {status}")?;
            writeln!(out, "model:     {}", report.model)?;
            if let Some(s) = &report.status {
                writeln!(out, "status:    {s}")?;
            }
            if !report.available_models.is_empty() {
                writeln!(out, "available: {}", report.available_models.join(", "))?;
            }
        }
        Err(e) => {
            writeln!(out, "ollama:    unreachable ({e})")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TestCase;
    use serde_json::json;

    fn result() -> GenerationResult {
        GenerationResult {
            test_cases: vec![TestCase::from(json!({
                "id": "TC_001",
                "title": "Valid division",
                "type": "positive",
                "steps": ["divide(10, 2)"],
                "expected": "5.0"
            }))],
            pytest_code: "def test_divide():\n    assert divide(10, 2) == 5".into(),
            note: None,
            model_used: Some("llama3.2".into()),
        }
    }

    #[test]
    fn explicit_input_wins() {
        let args = GenerateArgs {
            input: Some("def f(): pass".into()),
            ..Default::default()
        };
        assert_eq!(read_input(&args).unwrap(), "def f(): pass");
    }

    #[test]
    fn input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.py");
        fs::write(&path, "def g(x):\n    return x\n").unwrap();
        let args = GenerateArgs {
            file: Some(path),
            ..Default::default()
        };
        assert_eq!(read_input(&args).unwrap(), "def g(x):\n    return x\n");
    }

    #[test]
    fn json_output_is_parseable() {
        let mut out = Vec::new();
        write_result(&mut out, &result(), true).unwrap();
        let back: GenerationResult = serde_json::from_slice(&out).unwrap();
        assert_eq!(back, result());
    }

    #[test]
    fn plain_output_lists_cases() {
        let mut out = Vec::new();
        write_result(&mut out, &result(), false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Coverage Summary: 1 test cases generated"));
        assert!(text.contains("TC_001"));
        assert!(text.contains("assert divide(10, 2) == 5"));
    }
}

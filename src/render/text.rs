//! render/text.rs
//!
//! Plain-text rendering for the one-shot CLI.

use std::fmt::Write as _;

use crate::model::GenerationResult;
use crate::render::{sections, summary_line, Section};

pub fn render_plain(result: &GenerationResult) -> String {
    let mut out = String::new();

    for section in sections(result) {
        match section {
            Section::Summary { count, note, model } => {
                let _ = writeln!(out, "{}", summary_line(count));
                if let Some(note) = note {
                    let _ = writeln!(out, "  note:  {note}");
                }
                if let Some(model) = model {
                    let _ = writeln!(out, "  model: {model}");
                }
                out.push('\n');
            }
            Section::Cases(cards) => {
                for card in cards {
                    let _ = writeln!(
                        out,
                        "{} {} [{}] {}",
                        card.tone.icon(),
                        card.id,
                        card.label,
                        card.title
                    );
                    if !card.steps.is_empty() {
                        out.push_str("  Steps:\n");
                        for (i, step) in card.steps.iter().enumerate() {
                            let _ = writeln!(out, "    {}. {}", i + 1, step);
                        }
                    }
                    if let Some(expected) = card.expected {
                        let _ = writeln!(out, "  Expected: {expected}");
                    }
                    out.push('\n');
                }
            }
            Section::Code {
                filename,
                language,
                code,
            } => {
                let _ = writeln!(out, "── {filename} ({language}) ──");
                out.push_str(code);
                if !code.ends_with('\n') {
                    out.push('\n');
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TestCase;
    use serde_json::json;

    #[test]
    fn prints_numbered_steps_and_code() {
        let result = GenerationResult {
            test_cases: vec![TestCase::from(json!({
                "id": "TC_001",
                "title": "Divide two numbers",
                "type": "POSITIVE",
                "steps": ["call divide(4, 2)", "read result"],
                "expected": "2.0"
            }))],
            pytest_code: "def test_divide():\n    assert divide(4, 2) == 2".into(),
            note: None,
            model_used: Some("llama3.2".into()),
        };

        let out = render_plain(&result);
        assert!(out.starts_with("Coverage Summary: 1 test cases generated\n"));
        assert!(out.contains("✔ TC_001 [POSITIVE] Divide two numbers"));
        assert!(out.contains("    2. read result\n"));
        assert!(out.contains("── test_generated.py (Python) ──"));
        assert!(out.ends_with("assert divide(4, 2) == 2\n"));
    }
}

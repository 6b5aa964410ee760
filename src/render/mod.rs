//! render/mod.rs
//!
//! Turns a `GenerationResult` into a section model shared by the terminal UI,
//! the plain-text printer and the HTML report.

pub mod highlight;
pub mod html;
pub mod text;

use crate::model::{CaseKind, GenerationResult, TestCase};

pub const CODE_FILENAME: &str = "test_generated.py";
pub const CODE_LANGUAGE: &str = "Python";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

impl From<CaseKind> for Tone {
    fn from(kind: CaseKind) -> Self {
        match kind {
            CaseKind::Positive => Tone::Positive,
            CaseKind::Negative => Tone::Negative,
            CaseKind::Other => Tone::Neutral,
        }
    }
}

impl Tone {
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Positive => "positive",
            Tone::Negative => "negative",
            Tone::Neutral => "neutral",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Tone::Positive => "✔",
            Tone::Negative => "✖",
            Tone::Neutral => "ℹ",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseCard<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub label: &'a str,
    pub tone: Tone,
    /// Empty when the card has no steps to show.
    pub steps: &'a [String],
    pub expected: Option<&'a str>,
}

impl<'a> From<&'a TestCase> for CaseCard<'a> {
    fn from(tc: &'a TestCase) -> Self {
        Self {
            id: &tc.id,
            title: &tc.title,
            label: tc.label(),
            tone: tc.classify().into(),
            steps: &tc.steps,
            expected: Some(tc.expected.as_str()).filter(|e| !e.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Section<'a> {
    Summary {
        count: usize,
        note: Option<&'a str>,
        model: Option<&'a str>,
    },
    Cases(Vec<CaseCard<'a>>),
    Code {
        filename: &'static str,
        language: &'static str,
        code: &'a str,
    },
}

/// Sections in display order. Empty test cases or empty code drop their
/// section entirely.
pub fn sections(result: &GenerationResult) -> Vec<Section<'_>> {
    let mut out = vec![Section::Summary {
        count: result.test_cases.len(),
        note: result.note(),
        model: result.model_used.as_deref().filter(|m| !m.is_empty()),
    }];

    if !result.test_cases.is_empty() {
        out.push(Section::Cases(
            result.test_cases.iter().map(CaseCard::from).collect(),
        ));
    }

    if !result.pytest_code.is_empty() {
        out.push(Section::Code {
            filename: CODE_FILENAME,
            language: CODE_LANGUAGE,
            code: &result.pytest_code,
        });
    }

    out
}

pub fn summary_line(count: usize) -> String {
    format!("Coverage Summary: {count} test cases generated")
}

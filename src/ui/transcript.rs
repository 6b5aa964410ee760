//! ui/transcript.rs
//!
//! Transcript → styled lines.

use std::time::Instant;

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::model::{GenerationResult, Message};
use crate::render::highlight::highlight;
use crate::render::{sections, summary_line, CaseCard, Section};
use crate::state::AppState;
use crate::ui::helpers::{spinner, token_style, tone_color, ACCENT, BG_CODE, BG_INPUT, DIM, GREEN, TEXT};

pub fn transcript_lines(state: &AppState, now: Instant) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if state.transcript.is_empty() && !state.is_loading() {
        welcome(&mut lines);
        return lines;
    }

    let last_bot = state
        .transcript
        .iter()
        .rposition(|m| matches!(m, Message::Bot(_)));
    let copied = state.copied(now);

    for (idx, msg) in state.transcript.iter().enumerate() {
        match msg {
            Message::User { content } => user_block(&mut lines, content),
            Message::Bot(result) => {
                bot_block(&mut lines, result, copied && Some(idx) == last_bot)
            }
        }
        lines.push(Line::default());
    }

    if let Some(started) = state.ui.loading_since {
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", spinner(started)), Style::default().fg(GREEN)),
            Span::styled(
                format!(
                    "Generating test cases… {}s",
                    now.saturating_duration_since(started).as_secs()
                ),
                Style::default().fg(DIM),
            ),
        ]));
    }

    lines
}

fn welcome(lines: &mut Vec<Line<'static>>) {
    let dim = Style::default().fg(DIM);
    lines.push(Line::from(Span::styled(
        "Paste a Python function or describe a feature.",
        Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "You get manual test cases (positive and negative) plus runnable pytest code.",
        dim,
    )));
    lines.push(Line::from(Span::styled(
        "Enter adds a newline; Ctrl+S or Ctrl+Enter sends.",
        dim,
    )));
}

fn user_block(lines: &mut Vec<Line<'static>>, content: &str) {
    lines.push(Line::from(Span::styled(
        "▌ you",
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )));
    for l in content.lines() {
        lines.push(Line::from(vec![
            Span::styled("▌ ", Style::default().fg(ACCENT)),
            Span::styled(l.to_string(), Style::default().fg(TEXT).bg(BG_INPUT)),
        ]));
    }
}

fn bot_block(lines: &mut Vec<Line<'static>>, result: &GenerationResult, copied: bool) {
    for section in sections(result) {
        match section {
            Section::Summary { count, note, model } => {
                let mut spans = vec![Span::styled(
                    summary_line(count),
                    Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
                )];
                if let Some(note) = note {
                    spans.push(Span::raw("  "));
                    spans.push(Span::styled(
                        format!(" {note} "),
                        Style::default().fg(BG_CODE).bg(ACCENT),
                    ));
                }
                if let Some(model) = model {
                    spans.push(Span::styled(format!("  · {model}"), Style::default().fg(DIM)));
                }
                lines.push(Line::from(spans));
                lines.push(Line::default());
            }
            Section::Cases(cards) => {
                for card in &cards {
                    case_card(lines, card);
                }
            }
            Section::Code {
                filename,
                language,
                code,
            } => code_block(lines, filename, language, code, copied),
        }
    }

    lines.push(Line::from(Span::styled(
        "[ctrl+e] export all  [ctrl+y] copy code",
        Style::default().fg(DIM),
    )));
}

fn case_card(lines: &mut Vec<Line<'static>>, card: &CaseCard<'_>) {
    let color = tone_color(card.tone);
    let bar = || Span::styled("┃ ", Style::default().fg(color));

    lines.push(Line::from(vec![
        bar(),
        Span::styled(
            card.id.to_string(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{} {}", card.tone.icon(), card.label.to_uppercase()),
            Style::default().fg(color),
        ),
    ]));
    lines.push(Line::from(vec![
        bar(),
        Span::styled(
            card.title.to_string(),
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
        ),
    ]));

    if !card.steps.is_empty() {
        lines.push(Line::from(vec![bar(), Span::styled("STEPS", Style::default().fg(DIM))]));
        for (i, step) in card.steps.iter().enumerate() {
            lines.push(Line::from(vec![
                bar(),
                Span::styled(format!("{:>2}. ", i + 1), Style::default().fg(DIM)),
                Span::styled(step.clone(), Style::default().fg(TEXT)),
            ]));
        }
    }

    if let Some(expected) = card.expected {
        lines.push(Line::from(vec![
            bar(),
            Span::styled("EXPECTED ", Style::default().fg(DIM)),
            Span::styled(expected.to_string(), Style::default().fg(TEXT)),
        ]));
    }

    lines.push(Line::default());
}

fn code_block(
    lines: &mut Vec<Line<'static>>,
    filename: &str,
    language: &str,
    code: &str,
    copied: bool,
) {
    let copy_label = if copied { "✔ Copied!" } else { "Copy" };
    lines.push(Line::from(vec![
        Span::styled(format!(" {filename} "), Style::default().fg(TEXT).bg(BG_INPUT)),
        Span::styled(format!(" {language} "), Style::default().fg(DIM).bg(BG_INPUT)),
        Span::raw("  "),
        Span::styled(copy_label, Style::default().fg(if copied { GREEN } else { DIM })),
    ]));

    for (n, tokens) in highlight(code).into_iter().enumerate() {
        let mut spans = vec![Span::styled(
            format!("{:>4} ", n + 1),
            Style::default().fg(DIM).bg(BG_CODE),
        )];
        spans.extend(
            tokens
                .into_iter()
                .map(|(tok, text)| Span::styled(text, token_style(tok))),
        );
        lines.push(Line::from(spans));
    }
    lines.push(Line::default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TestCase;
    use serde_json::json;
    use std::path::PathBuf;

    fn flat(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| &*s.content).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn state_with(result: GenerationResult) -> AppState {
        let mut s = AppState::new("http://127.0.0.1:5000/", PathBuf::from("."));
        s.transcript.push(Message::User {
            content: "def divide(a, b):\n    return a / b".into(),
        });
        s.transcript.push(Message::Bot(result));
        s
    }

    #[test]
    fn empty_transcript_shows_welcome() {
        let s = AppState::new("x", PathBuf::from("."));
        let text = flat(&transcript_lines(&s, Instant::now()));
        assert!(text.contains("Paste a Python function"));
    }

    #[test]
    fn renders_cards_and_code() {
        let s = state_with(GenerationResult {
            test_cases: vec![TestCase::from(json!({
                "id": "TC_001",
                "title": "Divide by zero",
                "type": "negative",
                "steps": ["call divide(1, 0)"],
                "expected": "ZeroDivisionError"
            }))],
            pytest_code: "def test_zero():\n    pass".into(),
            note: None,
            model_used: None,
        });
        let text = flat(&transcript_lines(&s, Instant::now()));
        assert!(text.contains("Coverage Summary: 1 test cases generated"));
        assert!(text.contains("✖ NEGATIVE"));
        assert!(text.contains(" 1. call divide(1, 0)"));
        assert!(text.contains("test_generated.py"));
        assert!(text.contains("   2     pass"));
    }

    #[test]
    fn copied_indicator_only_while_active() {
        let mut s = state_with(GenerationResult {
            pytest_code: "import pytest".into(),
            ..Default::default()
        });
        let now = Instant::now();
        assert!(!flat(&transcript_lines(&s, now)).contains("Copied!"));
        s.mark_copied(now);
        assert!(flat(&transcript_lines(&s, now)).contains("Copied!"));
    }

    #[test]
    fn empty_code_has_no_code_header() {
        let s = state_with(GenerationResult {
            test_cases: vec![TestCase::from(json!({"id": "TC_001", "title": "t", "type": "POSITIVE"}))],
            ..Default::default()
        });
        let text = flat(&transcript_lines(&s, Instant::now()));
        assert!(!text.contains("test_generated.py"));
        assert!(!text.contains("STEPS"));
    }
}

//! render/html.rs
//!
//! Standalone HTML report. Every string that came from the user or the
//! backend passes through `escape_html` before it is written into markup.

use std::fmt::Write as _;

use crate::model::{GenerationResult, Message};
use crate::render::{sections, summary_line, CaseCard, Section};

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Markup for one result, without the surrounding document.
pub fn render_result(result: &GenerationResult) -> String {
    let mut html = String::new();

    for section in sections(result) {
        match section {
            Section::Summary { count, note, model } => {
                html.push_str("<div class=\"test-cases-header\">\n");
                let _ = writeln!(html, "  <h3>{}</h3>", escape_html(&summary_line(count)));
                if let Some(note) = note {
                    let _ = writeln!(
                        html,
                        "  <span class=\"quick-mode-badge\">{}</span>",
                        escape_html(note)
                    );
                }
                if let Some(model) = model {
                    let _ = writeln!(
                        html,
                        "  <span class=\"model-badge\">{}</span>",
                        escape_html(model)
                    );
                }
                html.push_str("</div>\n");
            }
            Section::Cases(cards) => {
                html.push_str("<div class=\"test-cases-grid\">\n");
                for card in &cards {
                    render_card(&mut html, card);
                }
                html.push_str("</div>\n");
            }
            Section::Code {
                filename,
                language,
                code,
            } => {
                html.push_str("<div class=\"pytest-section\">\n");
                let _ = writeln!(
                    html,
                    "  <div class=\"pytest-header\"><span>{}</span><span>{}</span></div>",
                    escape_html(filename),
                    escape_html(language)
                );
                let _ = writeln!(
                    html,
                    "  <pre><code class=\"language-python\">{}</code></pre>",
                    escape_html(code)
                );
                html.push_str("</div>\n");
            }
        }
    }

    html
}

fn render_card(html: &mut String, card: &CaseCard<'_>) {
    let tone = card.tone.as_str();
    let _ = writeln!(html, "  <div class=\"test-case-card {tone}\">");
    let _ = writeln!(
        html,
        "    <div class=\"test-case-header\"><span class=\"test-case-id\">{}</span><span class=\"test-case-badge {tone}\">{}</span></div>",
        escape_html(card.id),
        escape_html(card.label)
    );
    let _ = writeln!(
        html,
        "    <h4 class=\"test-case-title\">{}</h4>",
        escape_html(card.title)
    );

    if !card.steps.is_empty() {
        html.push_str("    <div class=\"test-case-steps\"><label>Steps:</label><ol>");
        for step in card.steps {
            let _ = write!(html, "<li>{}</li>", escape_html(step));
        }
        html.push_str("</ol></div>\n");
    }

    if let Some(expected) = card.expected {
        let _ = writeln!(
            html,
            "    <div class=\"test-case-expected\"><label>Expected:</label><p>{}</p></div>",
            escape_html(expected)
        );
    }

    html.push_str("  </div>\n");
}

const STYLE: &str = "body{font-family:sans-serif;background:#0f172a;color:#e2e8f0;max-width:960px;margin:2rem auto}\
.message{margin:1rem 0;padding:1rem;border-radius:8px;background:#1e293b}\
.test-case-card{border-left:4px solid #6366f1;padding:.5rem 1rem;margin:.5rem 0}\
.test-case-card.positive{border-color:#22c55e}.test-case-card.negative{border-color:#ef4444}\
pre{background:#1d1f21;padding:1rem;overflow:auto}";

/// Full HTML document for a transcript.
pub fn render_document(title: &str, transcript: &[Message]) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(title));
    let _ = writeln!(html, "<style>{STYLE}</style>");
    html.push_str("</head>\n<body>\n");

    for msg in transcript {
        match msg {
            Message::User { content } => {
                html.push_str("<div class=\"message user-message\">\n");
                let _ = writeln!(
                    html,
                    "<pre><code class=\"language-python\">{}</code></pre>",
                    escape_html(content)
                );
                html.push_str("</div>\n");
            }
            Message::Bot(result) => {
                html.push_str("<div class=\"message bot-message\">\n");
                html.push_str(&render_result(result));
                html.push_str("</div>\n");
            }
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

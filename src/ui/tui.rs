// src/ui/tui.rs

use std::{io, time::Instant};

use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Terminal,
};
use unicode_width::UnicodeWidthStr;

use crate::state::{AppState, LogLevel};
use crate::ui::helpers::{level_color, ACCENT, BG_INPUT, BG_MAIN, DIM, GREEN, RED, TEXT};
use crate::ui::transcript::transcript_lines;

const MAX_INPUT_ROWS: u16 = 8;

pub fn draw_ui<B: Backend>(terminal: &mut Terminal<B>, state: &AppState) -> io::Result<()> {
    let now = Instant::now();

    terminal.draw(|f| {
        let area = f.size();

        let notice_rows = match &state.notice {
            Some(n) if n.hint.is_some() => 4,
            Some(_) => 3,
            None => 0,
        };
        let input_rows = (state.ui.input.lines().count().max(1) as u16)
            .saturating_add(u16::from(state.ui.input.ends_with('\n')))
            .min(MAX_INPUT_ROWS)
            + 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),           // HEADER
                Constraint::Min(5),              // TRANSCRIPT
                Constraint::Length(notice_rows), // NOTICE
                Constraint::Length(input_rows),  // INPUT
                Constraint::Length(1),           // STATUS
            ])
            .split(area);

        render_header(f, chunks[0], state);
        render_transcript(f, chunks[1], state, now);
        render_notice(f, chunks[2], state);
        render_input(f, chunks[3], state);
        render_status(f, chunks[4], state);
    })?;

    Ok(())
}

fn render_header(f: &mut ratatui::Frame, area: Rect, state: &AppState) {
    let (status, color) = match &state.health {
        None => ("Checking…", DIM),
        Some(h) if h.connected => ("Ready", GREEN),
        Some(_) => ("Offline", RED),
    };
    let model = state
        .health
        .as_ref()
        .map(|h| h.model.as_str())
        .filter(|m| !m.is_empty())
        .unwrap_or("llama3.2");

    let left = Line::from(vec![
        Span::styled(
            " Local Test Case Generator ",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(state.backend.clone(), Style::default().fg(DIM)),
    ]);
    let right = Line::from(vec![
        Span::styled(format!("⚙ {model}  "), Style::default().fg(ACCENT)),
        Span::styled(format!("● {status} "), Style::default().fg(color)),
    ]);

    f.render_widget(Paragraph::new(left), area);
    f.render_widget(Paragraph::new(right).alignment(Alignment::Right), area);
}

fn render_transcript(f: &mut ratatui::Frame, area: Rect, state: &AppState, now: Instant) {
    f.render_widget(Block::default().style(Style::default().bg(BG_MAIN)), area);

    let padded = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };

    let paragraph = Paragraph::new(transcript_lines(state, now)).wrap(Wrap { trim: false });
    let scroll = transcript_scroll(&paragraph, padded, state.ui.scroll_back);

    f.render_widget(paragraph.scroll((scroll, 0)), padded);
}

/// Top row to render so that `scroll_back` counts wrapped rows up from the
/// bottom of the transcript.
fn transcript_scroll(paragraph: &Paragraph<'_>, area: Rect, scroll_back: usize) -> u16 {
    let rows = paragraph.line_count(area.width.max(1));
    let max_scroll = rows.saturating_sub(area.height.max(1) as usize);
    max_scroll
        .saturating_sub(scroll_back)
        .min(u16::MAX as usize) as u16
}

fn render_notice(f: &mut ratatui::Frame, area: Rect, state: &AppState) {
    let Some(notice) = &state.notice else {
        return;
    };
    if area.height == 0 {
        return;
    }

    let color = level_color(notice.level);
    let mut lines = vec![Line::from(Span::styled(
        notice.message.clone(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))];
    if let Some(hint) = &notice.hint {
        lines.push(Line::from(Span::styled(hint.clone(), Style::default().fg(DIM))));
    }

    let title = match notice.level {
        LogLevel::Error => " error · esc to dismiss ",
        LogLevel::Warn => " notice · esc to dismiss ",
        _ => " info · esc to dismiss ",
    };

    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title),
        ),
        area,
    );
}

fn render_input(f: &mut ratatui::Frame, area: Rect, state: &AppState) {
    let loading = state.is_loading();
    let border = if loading { DIM } else { ACCENT };
    let title = if loading {
        " generating… "
    } else {
        " python code or feature description "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title)
        .style(Style::default().bg(BG_INPUT));
    let inner = block.inner(area);

    let rows: Vec<&str> = if state.ui.input.is_empty() {
        vec![""]
    } else {
        state.ui.input.split('\n').collect()
    };
    let visible = inner.height.max(1) as usize;
    let first = rows.len().saturating_sub(visible);

    let lines: Vec<Line> = rows[first..]
        .iter()
        .map(|r| Line::from(Span::styled(r.to_string(), Style::default().fg(TEXT))))
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);

    if !loading {
        let last = rows.last().copied().unwrap_or("");
        let row = (rows.len() - first - 1) as u16;
        let cursor_x = inner.x + (last.width() as u16).min(inner.width.saturating_sub(1));
        f.set_cursor(cursor_x, inner.y + row);
    }
}

fn render_status(f: &mut ratatui::Frame, area: Rect, state: &AppState) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(GREEN));
    let label = |l: &'static str| Span::styled(l, Style::default().fg(DIM));

    let hints = Line::from(vec![
        key("[ctrl+s]"),
        label(" send  "),
        key("[ctrl+e]"),
        label(" export  "),
        key("[ctrl+y]"),
        label(" copy  "),
        key("[ctrl+l]"),
        label(" clear  "),
        key("[esc]"),
        label(" exit"),
    ]);
    f.render_widget(Paragraph::new(hints), area);

    if let Some(last) = state.logs.back() {
        let line = Line::from(Span::styled(
            format!("{} ", last.text),
            Style::default().fg(level_color(last.level)),
        ));
        f.render_widget(Paragraph::new(line).alignment(Alignment::Right), area);
    }
}

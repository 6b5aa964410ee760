//! ui/helpers.rs
//!
//! Shared UI helper utilities.

use std::time::Instant;

use ratatui::style::{Color, Modifier, Style};

use crate::render::highlight::Token;
use crate::render::Tone;
use crate::state::LogLevel;

pub const BG_MAIN: Color = Color::Rgb(22, 22, 22);
pub const BG_INPUT: Color = Color::Rgb(40, 40, 40);
pub const BG_CODE: Color = Color::Rgb(29, 31, 33);

pub const ACCENT: Color = Color::Rgb(129, 140, 248);
pub const GREEN: Color = Color::Rgb(0, 220, 140);
pub const RED: Color = Color::Rgb(239, 68, 68);
pub const DIM: Color = Color::Rgb(140, 140, 140);
pub const TEXT: Color = Color::Rgb(210, 210, 210);

pub fn spinner(started: Instant) -> &'static str {
    const FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];
    let idx = (started.elapsed().as_millis() / 120) as usize;
    FRAMES[idx % FRAMES.len()]
}

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Positive => GREEN,
        Tone::Negative => RED,
        Tone::Neutral => ACCENT,
    }
}

pub fn level_color(level: LogLevel) -> Color {
    match level {
        LogLevel::Success => Color::Green,
        LogLevel::Warn => Color::Yellow,
        LogLevel::Error => RED,
        LogLevel::Info => Color::Gray,
    }
}

/// Code colours, loosely after the "tomorrow night" palette.
pub fn token_style(token: Token) -> Style {
    let base = Style::default().bg(BG_CODE);
    match token {
        Token::Keyword => base.fg(Color::Rgb(178, 148, 187)).add_modifier(Modifier::BOLD),
        Token::Builtin => base.fg(Color::Rgb(129, 162, 190)),
        Token::Str => base.fg(Color::Rgb(181, 189, 104)),
        Token::Comment => base.fg(Color::Rgb(150, 152, 150)).add_modifier(Modifier::ITALIC),
        Token::Number => base.fg(Color::Rgb(222, 147, 95)),
        Token::Decorator => base.fg(Color::Rgb(240, 198, 116)),
        Token::Plain => base.fg(Color::Rgb(197, 200, 198)),
    }
}

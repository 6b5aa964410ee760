//! clipboard.rs
//!
//! Terminal clipboard via the OSC 52 escape sequence, plus the transient
//! "copied" indicator.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use base64::{engine::general_purpose::STANDARD, Engine as _};

pub const COPIED_FLASH: Duration = Duration::from_secs(2);

pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
}

pub fn copy_to_clipboard<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()?;
    tracing::debug!(bytes = text.len(), "copied to clipboard");
    Ok(())
}

/// Whether the "copied" indicator should still be shown.
pub fn copied_active(copied_at: Option<Instant>, now: Instant) -> bool {
    copied_at.is_some_and(|at| now.saturating_duration_since(at) < COPIED_FLASH)
}

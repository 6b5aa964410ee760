use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Instant;

use crate::api::validate_input;
use crate::clipboard::copied_active;
use crate::error::ApiError;
use crate::export::latest_result;
use crate::model::{GenerationResult, HealthStatus, Message};

pub const MAX_LOGS: usize = 200;

/* ---------- logging ---------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warn,
    Error,
}

#[derive(Clone, Debug)]
pub struct LogLine {
    pub level: LogLevel,
    pub text: String,
    pub at: Instant,
}

/* ---------- notices ---------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: LogLevel,
    pub message: String,
    pub hint: Option<String>,
}

impl Notice {
    pub fn error(message: impl Into<String>, hint: Option<&str>) -> Self {
        Self {
            level: LogLevel::Error,
            message: message.into(),
            hint: hint.map(str::to_string),
        }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            level: LogLevel::Warn,
            message: message.into(),
            hint: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: LogLevel::Info,
            message: message.into(),
            hint: None,
        }
    }
}

impl From<&ApiError> for Notice {
    fn from(err: &ApiError) -> Self {
        Notice::error(err.to_string(), err.hint())
    }
}

/* ---------- ui ---------- */

/// Side effects requested by key handling, performed by the main loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Submit,
    Export,
    CopyCode,
}

pub struct UiState {
    pub input: String,
    /// Lines scrolled back from the bottom; 0 follows the tail.
    pub scroll_back: usize,
    pub should_exit: bool,
    pub pending: Option<Action>,
    pub loading_since: Option<Instant>,
    pub copied_at: Option<Instant>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            input: String::new(),
            scroll_back: 0,
            should_exit: false,
            pending: None,
            loading_since: None,
            copied_at: None,
        }
    }
}

/* ---------- app state ---------- */

pub struct AppState {
    pub ui: UiState,
    pub transcript: Vec<Message>,
    /// `None` until the startup health check reports.
    pub health: Option<HealthStatus>,
    pub notice: Option<Notice>,
    pub logs: VecDeque<LogLine>,
    pub export_dir: PathBuf,
    pub backend: String,
}

impl AppState {
    pub fn new(backend: impl Into<String>, export_dir: PathBuf) -> Self {
        Self {
            ui: UiState::default(),
            transcript: Vec::new(),
            health: None,
            notice: None,
            logs: VecDeque::new(),
            export_dir,
            backend: backend.into(),
        }
    }

    /* input */

    pub fn push_char(&mut self, c: char) {
        self.ui.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.ui.input.pop();
    }

    pub fn is_loading(&self) -> bool {
        self.ui.loading_since.is_some()
    }

    /// Validate and commit the input box as a user message. On success the
    /// trimmed text is returned for dispatch; on failure a notice is raised
    /// and nothing is appended.
    pub fn begin_submission(&mut self, now: Instant) -> Result<String, ApiError> {
        let text = match validate_input(&self.ui.input) {
            Ok(t) => t.to_string(),
            Err(e) => {
                self.notice = Some(Notice::from(&e));
                return Err(e);
            }
        };

        self.transcript.push(Message::User {
            content: text.clone(),
        });
        self.ui.input.clear();
        self.ui.loading_since = Some(now);
        self.ui.scroll_back = 0;
        self.notice = None;
        Ok(text)
    }

    pub fn finish_submission(&mut self, result: Result<GenerationResult, ApiError>) {
        self.ui.loading_since = None;
        match result {
            Ok(r) => {
                self.transcript.push(Message::Bot(r));
                self.ui.scroll_back = 0;
            }
            Err(e) => self.notice = Some(Notice::from(&e)),
        }
    }

    pub fn apply_health(&mut self, status: HealthStatus) {
        if !status.connected {
            self.notice = Some(Notice::warn(
                "Ollama is not running. Please start it with: ollama serve",
            ));
        }
        self.health = Some(status);
    }

    pub fn dismiss_notice(&mut self) -> bool {
        self.notice.take().is_some()
    }

    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
        self.ui.scroll_back = 0;
    }

    pub fn latest_result(&self) -> Option<&GenerationResult> {
        latest_result(&self.transcript)
    }

    pub fn mark_copied(&mut self, now: Instant) {
        self.ui.copied_at = Some(now);
    }

    pub fn copied(&self, now: Instant) -> bool {
        copied_active(self.ui.copied_at, now)
    }

    pub fn push_log(&mut self, level: LogLevel, text: impl Into<String>) {
        if self.logs.len() >= MAX_LOGS {
            self.logs.pop_front();
        }

        self.logs.push_back(LogLine {
            level,
            text: text.into(),
            at: Instant::now(),
        });
    }
}

//! app.rs
//!
//! Terminal chat loop: draw, read input, perform requested actions, and
//! collect results from the background workers.

use std::io::{self, Write};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::api::{spawn_health_check, ApiClient, DispatchEvent, Dispatcher};
use crate::clipboard::copy_to_clipboard;
use crate::config::ClientConfig;
use crate::error::{AppError, ExportError};
use crate::export::export_latest;
use crate::logger::{log, log_status};
use crate::model::HealthStatus;
use crate::state::{Action, AppState, LogLevel, Notice};
use crate::ui::{draw_ui, handle_event};

const POLL_INTERVAL: Duration = Duration::from_millis(120);

pub struct App {
    pub state: AppState,
    dispatcher: Dispatcher,
    health_rx: Option<Receiver<HealthStatus>>,
}

impl App {
    pub fn new(client: ApiClient, cfg: &ClientConfig) -> Self {
        let state = AppState::new(client.base_url().as_str(), cfg.export_dir.clone());
        Self {
            state,
            dispatcher: Dispatcher::new(client),
            health_rx: None,
        }
    }

    /// Kick off the one-shot startup health check.
    pub fn start_health_check(&mut self) {
        self.health_rx = Some(spawn_health_check(self.dispatcher.client().clone()));
    }

    pub fn is_busy(&self) -> bool {
        self.dispatcher.is_busy()
    }

    /// Perform any pending action and drain worker results. `clip` receives
    /// clipboard escape sequences.
    pub fn tick<W: Write>(&mut self, now: Instant, clip: &mut W) {
        if let Some(action) = self.state.ui.pending.take() {
            self.perform(action, now, clip);
        }

        if let Some(DispatchEvent::Finished { result, started_at }) = self.dispatcher.poll() {
            let secs = now.saturating_duration_since(started_at).as_secs_f32();
            match &result {
                Ok(r) => log(
                    &mut self.state,
                    LogLevel::Success,
                    format!("{} test cases in {secs:.1}s", r.test_cases.len()),
                ),
                Err(e) => log(&mut self.state, LogLevel::Error, format!("{e} after {secs:.1}s")),
            }
            self.state.finish_submission(result);
        }

        self.poll_health();
    }

    fn poll_health(&mut self) {
        let Some(rx) = &self.health_rx else {
            return;
        };

        match rx.try_recv() {
            Ok(status) => {
                let text = if status.connected {
                    format!("backend ready · {}", status.model)
                } else {
                    "backend offline".to_string()
                };
                log_status(&mut self.state, text);
                self.state.apply_health(status);
                self.health_rx = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.state.apply_health(HealthStatus::offline());
                self.health_rx = None;
            }
        }
    }

    fn perform<W: Write>(&mut self, action: Action, now: Instant, clip: &mut W) {
        match action {
            Action::Submit => self.submit(now),
            Action::Export => self.export(),
            Action::CopyCode => self.copy_code(now, clip),
        }
    }

    fn submit(&mut self, now: Instant) {
        if self.dispatcher.is_busy() {
            return;
        }

        let text = match self.state.begin_submission(now) {
            Ok(text) => text,
            Err(e) => {
                log(&mut self.state, LogLevel::Warn, e.to_string());
                return;
            }
        };

        log_status(&mut self.state, format!("sending {} chars", text.chars().count()));
        if self.dispatcher.submit(text).is_err() {
            self.state.ui.loading_since = None;
        }
    }

    fn export(&mut self) {
        match export_latest(&self.state.transcript, &self.state.export_dir, Utc::now()) {
            Ok(path) => {
                let msg = format!("Exported to {}", path.display());
                log(&mut self.state, LogLevel::Success, msg.clone());
                self.state.notice = Some(Notice::info(msg));
            }
            Err(ExportError::NothingToExport) => {
                self.state.notice = Some(Notice::warn(ExportError::NothingToExport.to_string()));
            }
            Err(e) => {
                log(&mut self.state, LogLevel::Error, e.to_string());
                self.state.notice = Some(Notice::error(e.to_string(), None));
            }
        }
    }

    fn copy_code<W: Write>(&mut self, now: Instant, clip: &mut W) {
        let code = match self.state.latest_result() {
            Some(r) if !r.pytest_code.is_empty() => r.pytest_code.clone(),
            _ => {
                self.state.notice = Some(Notice::warn("No code to copy"));
                return;
            }
        };

        match copy_to_clipboard(clip, &code) {
            Ok(()) => self.state.mark_copied(now),
            Err(e) => self.state.notice = Some(Notice::error(format!("Copy failed: {e}"), None)),
        }
    }
}

pub fn run(cfg: ClientConfig) -> Result<(), AppError> {
    let client = ApiClient::new(&cfg)?;
    let mut app = App::new(client, &cfg);
    app.start_health_check();

    setup_terminal()?;
    let mut terminal = or_restore(
        || Terminal::new(CrosstermBackend::new(io::stdout())),
        || restore_terminal(&mut io::stdout()),
    )?;

    let result = event_loop(&mut terminal, &mut app);

    restore_terminal(terminal.backend_mut())?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), AppError> {
    let mut clip = io::stdout();

    loop {
        draw_ui(terminal, &app.state)?;

        if event::poll(POLL_INTERVAL)? {
            handle_event(&mut app.state, event::read()?);
        }

        if app.state.ui.should_exit {
            break;
        }

        app.tick(Instant::now(), &mut clip);
    }

    Ok(())
}

fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, EnableBracketedPaste)?;
    Ok(())
}

/// Run `make`; if it fails, run `restore` before handing back the error.
fn or_restore<T>(
    make: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    make().or_else(|e| {
        if let Err(re) = restore() {
            tracing::warn!(error = %re, "terminal restore failed");
        }
        Err(e)
    })
}

/// Undo `setup_terminal`. Safe to call before a `Terminal` exists.
fn restore_terminal<W: Write>(out: &mut W) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(out, DisableBracketedPaste, LeaveAlternateScreen)?;
    Ok(())
}

// src/ui/main_ui.rs

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use crate::state::{Action, AppState};

pub fn handle_event(state: &mut AppState, event: impl Into<Event>) {
    match event.into() {
        Event::Key(k) if k.kind != KeyEventKind::Release => handle_key(state, k),
        Event::Mouse(m) => handle_mouse(state, m),
        Event::Paste(text) => state.ui.input.push_str(&text.replace('\r', "")),
        _ => {}
    }
}

fn request(state: &mut AppState, action: Action) {
    // send control is disabled while a request is in flight
    if action == Action::Submit && state.is_loading() {
        return;
    }
    state.ui.pending = Some(action);
}

fn handle_key(state: &mut AppState, k: KeyEvent) {
    let ctrl = k.modifiers.contains(KeyModifiers::CONTROL);
    let alt = k.modifiers.contains(KeyModifiers::ALT);

    match k.code {
        KeyCode::Enter if ctrl || alt => request(state, Action::Submit),
        KeyCode::Char('s') if ctrl => request(state, Action::Submit),
        KeyCode::Char('e') if ctrl => request(state, Action::Export),
        KeyCode::Char('y') if ctrl => request(state, Action::CopyCode),

        KeyCode::Char('l') if ctrl => state.clear_transcript(),
        KeyCode::Char('u') if ctrl => state.ui.input.clear(),
        KeyCode::Char('c') if ctrl => state.ui.should_exit = true,

        KeyCode::Char(c) if !ctrl => state.push_char(c),
        KeyCode::Enter => state.push_char('\n'),
        KeyCode::Tab => state.ui.input.push_str("    "),
        KeyCode::Backspace => state.backspace(),

        KeyCode::PageUp => state.ui.scroll_back = state.ui.scroll_back.saturating_add(5),
        KeyCode::PageDown => state.ui.scroll_back = state.ui.scroll_back.saturating_sub(5),
        KeyCode::Up if ctrl => state.ui.scroll_back = state.ui.scroll_back.saturating_add(1),
        KeyCode::Down if ctrl => state.ui.scroll_back = state.ui.scroll_back.saturating_sub(1),
        KeyCode::End => state.ui.scroll_back = 0,

        KeyCode::Esc => {
            if !state.dismiss_notice() {
                state.ui.should_exit = true;
            }
        }

        _ => {}
    }
}

fn handle_mouse(state: &mut AppState, m: MouseEvent) {
    match m.kind {
        MouseEventKind::ScrollUp => {
            state.ui.scroll_back = state.ui.scroll_back.saturating_add(3);
        }

        MouseEventKind::ScrollDown => {
            state.ui.scroll_back = state.ui.scroll_back.saturating_sub(3);
        }

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Notice;
    use std::path::PathBuf;
    use std::time::Instant;

    fn state() -> AppState {
        AppState::new("x", PathBuf::from("."))
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn typing_and_plain_enter_edit_input() {
        let mut s = state();
        for c in "def f():".chars() {
            handle_event(&mut s, key(KeyCode::Char(c), KeyModifiers::NONE));
        }
        handle_event(&mut s, key(KeyCode::Enter, KeyModifiers::NONE));
        handle_event(&mut s, key(KeyCode::Tab, KeyModifiers::NONE));
        handle_event(&mut s, key(KeyCode::Char('x'), KeyModifiers::SHIFT));
        assert_eq!(s.ui.input, "def f():\n    x");
        assert_eq!(s.ui.pending, None);
    }

    #[test]
    fn ctrl_enter_and_ctrl_s_request_submit() {
        let mut s = state();
        handle_event(&mut s, key(KeyCode::Enter, KeyModifiers::CONTROL));
        assert_eq!(s.ui.pending, Some(Action::Submit));

        s.ui.pending = None;
        handle_event(&mut s, key(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(s.ui.pending, Some(Action::Submit));
        assert!(s.ui.input.is_empty());
    }

    #[test]
    fn submit_is_ignored_while_loading() {
        let mut s = state();
        s.ui.loading_since = Some(Instant::now());
        handle_event(&mut s, key(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(s.ui.pending, None);

        handle_event(&mut s, key(KeyCode::Char('e'), KeyModifiers::CONTROL));
        assert_eq!(s.ui.pending, Some(Action::Export));
    }

    #[test]
    fn esc_dismisses_notice_before_exiting() {
        let mut s = state();
        s.notice = Some(Notice::warn("offline"));
        handle_event(&mut s, key(KeyCode::Esc, KeyModifiers::NONE));
        assert!(s.notice.is_none());
        assert!(!s.ui.should_exit);

        handle_event(&mut s, key(KeyCode::Esc, KeyModifiers::NONE));
        assert!(s.ui.should_exit);
    }

    #[test]
    fn scrolling_never_underflows() {
        let mut s = state();
        handle_event(&mut s, key(KeyCode::PageDown, KeyModifiers::NONE));
        assert_eq!(s.ui.scroll_back, 0);
        handle_event(&mut s, key(KeyCode::PageUp, KeyModifiers::NONE));
        assert_eq!(s.ui.scroll_back, 5);
    }
}
